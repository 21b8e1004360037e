use std::collections::HashMap;

use serde::Serialize;
use wardmap_shared::DivisionId;

/// Light-to-dark fill palette for the choropleth scale.
pub const PALETTE: [&str; 7] = [
    "#fee5d9", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d", "#99000d",
];

/// Fill for divisions with no deficient ballots at all. Kept out of
/// the palette so zero reads as "nothing here", not "few".
pub const EMPTY_COLOR: &str = "#e8e8e8";

/// One `(threshold, color)` breakpoint of the choropleth scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorStop {
    pub value: f64,
    pub color: String,
}

impl ColorStop {
    fn new(value: f64, color: &str) -> Self {
        Self {
            value,
            color: color.to_string(),
        }
    }
}

/// Builds the choropleth stop table from the per-division counts.
///
/// Counts are heavy-tailed: most divisions sit near zero while a few
/// run very high, so linear thresholds would collapse nearly all
/// divisions into one bucket. Thresholds are spaced on a log scale
/// over the observed positive range instead, with an explicit zero
/// stop ahead of the interpolated range.
pub fn count_color_stops(stats: &HashMap<DivisionId, u64>) -> Vec<ColorStop> {
    let zero_stop = ColorStop::new(0.0, EMPTY_COLOR);

    let positive: Vec<u64> = stats.values().copied().filter(|&c| c > 0).collect();
    let Some(&max) = positive.iter().max() else {
        return vec![zero_stop];
    };
    let min = positive.iter().copied().min().unwrap_or(max);

    if min == max {
        // Uniform distribution: a single bucket at the shared value.
        return vec![zero_stop, ColorStop::new(max as f64, PALETTE[PALETTE.len() - 1])];
    }

    let log_min = (min as f64).max(0.1).ln();
    let log_max = (max as f64).ln();
    let step = (log_max - log_min) / (PALETTE.len() - 1) as f64;

    let mut stops = vec![zero_stop];
    for (i, color) in PALETTE.iter().enumerate() {
        let value = round2((log_min + step * i as f64).exp());
        // Rounding can collapse neighboring thresholds on a narrow
        // range; the table must stay strictly increasing.
        if let Some(last) = stops.last()
            && value <= last.value
        {
            continue;
        }
        stops.push(ColorStop::new(value, color));
    }
    stops
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
