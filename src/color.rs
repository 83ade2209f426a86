use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{named, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Fixed colours
// ---------------------------------------------------------------------------

/// Bar fills, assigned to groups in order and cycled if there are more.
const BAR_COLORS: [Srgb<u8>; 3] = [named::SKYBLUE, named::LIGHTGREEN, named::SALMON];

pub fn to_color32(c: Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

pub fn bar_color(i: usize) -> Color32 {
    to_color32(BAR_COLORS[i % BAR_COLORS.len()])
}

pub fn line_color() -> Color32 {
    to_color32(named::BLUE)
}

pub fn histogram_fill() -> Color32 {
    to_color32(named::PURPLE)
}

pub fn histogram_edge() -> Color32 {
    to_color32(named::BLACK)
}

// ---------------------------------------------------------------------------
// Viridis colour map
// ---------------------------------------------------------------------------

const VIRIDIS_STOPS: [(u8, u8, u8); 5] = [
    (0x44, 0x01, 0x54),
    (0x3b, 0x52, 0x8b),
    (0x21, 0x91, 0x8c),
    (0x5e, 0xc9, 0x62),
    (0xfd, 0xe7, 0x25),
];

/// Sample the viridis map at `t` in `[0, 1]` (clamped), interpolating in
/// linear RGB between anchor stops.
pub fn viridis(t: f32) -> Color32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let segments = (VIRIDIS_STOPS.len() - 1) as f32;
    let pos = t * segments;
    let idx = (pos.floor() as usize).min(VIRIDIS_STOPS.len() - 2);
    let frac = pos - idx as f32;

    let linear = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
        Srgb::new(r, g, b).into_format::<f32>().into_linear()
    };
    let mixed = linear(VIRIDIS_STOPS[idx]).mix(linear(VIRIDIS_STOPS[idx + 1]), frac);
    to_color32(Srgb::<f32>::from_linear(mixed).into_format::<u8>())
}

// ---------------------------------------------------------------------------
// Color mapping: category code → Color32
// ---------------------------------------------------------------------------

/// Maps category codes to viridis colours, normalised over the codes present.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<i64, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the set of codes that occur in the data.
    pub fn new(codes: &BTreeSet<i64>) -> Self {
        let lo = codes.first().copied().unwrap_or(0);
        let hi = codes.last().copied().unwrap_or(0);
        let span = (hi - lo) as f32;

        let mapping = codes
            .iter()
            .map(|&code| {
                let t = if span > 0.0 { (code - lo) as f32 / span } else { 0.0 };
                (code, viridis(t))
            })
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given code.
    pub fn color_for(&self, code: i64) -> Color32 {
        self.mapping
            .get(&code)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viridis_endpoints() {
        assert_eq!(viridis(0.0), Color32::from_rgb(0x44, 0x01, 0x54));
        assert_eq!(viridis(1.0), Color32::from_rgb(0xfd, 0xe7, 0x25));
        assert_eq!(viridis(0.5), Color32::from_rgb(0x21, 0x91, 0x8c));
        assert_eq!(viridis(-3.0), viridis(0.0));
    }

    #[test]
    fn bar_colors_cycle() {
        assert_eq!(bar_color(0), Color32::from_rgb(135, 206, 235));
        assert_eq!(bar_color(3), bar_color(0));
        assert_ne!(bar_color(1), bar_color(2));
    }

    #[test]
    fn color_map_normalises_codes() {
        let codes: BTreeSet<i64> = [0, 1, 2].into_iter().collect();
        let cm = ColorMap::new(&codes);

        assert_eq!(cm.color_for(0), viridis(0.0));
        assert_eq!(cm.color_for(2), viridis(1.0));
        assert_eq!(cm.color_for(9), Color32::GRAY);
    }

    #[test]
    fn single_code_maps_to_start() {
        let codes: BTreeSet<i64> = [1].into_iter().collect();
        assert_eq!(ColorMap::new(&codes).color_for(1), viridis(0.0));
    }
}
