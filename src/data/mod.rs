//! Data layer: core types, loading, and aggregation.
//!
//! Architecture:
//! ```text
//!  assets/iris.csv            user file (.csv / .json / .parquet)
//!        │                              │
//!        ▼                              ▼
//!   ┌──────────┐                  ┌──────────┐
//!   │  loader   │  parse → table   │  loader   │  parse → Frame
//!   └──────────┘                  └──────────┘
//!        │
//!        ▼
//!   ┌──────────────────┐
//!   │ ObservationTable │  Vec<Observation>, fixed columns
//!   └──────────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  stats    │  grouped means, describe()
//!   └──────────┘
//! ```

pub mod loader;
pub mod model;
pub mod stats;
