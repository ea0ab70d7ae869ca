use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::MetricLabel;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues at the
/// given lightness.
pub fn generate_palette(n: usize, lightness: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, lightness);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: metric → Color32
// ---------------------------------------------------------------------------

/// One colour per metric; trends use a lighter shade of the same hue.
/// Darker than a dark-theme palette so lines read on a white plot.
#[derive(Debug, Clone)]
pub struct MetricColors {
    series: BTreeMap<MetricLabel, Color32>,
    trend: BTreeMap<MetricLabel, Color32>,
}

impl Default for MetricColors {
    fn default() -> Self {
        let n = MetricLabel::ALL.len();
        let zip = |palette: Vec<Color32>| -> BTreeMap<MetricLabel, Color32> {
            MetricLabel::ALL.iter().copied().zip(palette).collect()
        };
        Self {
            series: zip(generate_palette(n, 0.42)),
            trend: zip(generate_palette(n, 0.62)),
        }
    }
}

impl MetricColors {
    pub fn color_for(&self, label: MetricLabel) -> Color32 {
        self.series.get(&label).copied().unwrap_or(Color32::GRAY)
    }

    pub fn trend_color_for(&self, label: MetricLabel) -> Color32 {
        self.trend.get(&label).copied().unwrap_or(Color32::LIGHT_GRAY)
    }

    /// Legend entries (metric name → colour) for the side panel.
    pub fn legend_entries(&self) -> Vec<(MetricLabel, Color32)> {
        self.series.iter().map(|(&l, &c)| (l, c)).collect()
    }
}
