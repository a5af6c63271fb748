// src/analysis/chart.rs

/// Angular extent of one donut slice, in degrees counter-clockwise from 3 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonutSlice {
    pub index: usize,
    pub start_deg: f32,
    pub sweep_deg: f32,
}

impl DonutSlice {
    pub fn end_deg(&self) -> f32 {
        self.start_deg + self.sweep_deg
    }
}

/// Lays out slices proportionally around a full circle with `padding_deg`
/// between neighbours. Negative and non-finite values get no slice.
pub fn donut_slices(values: &[f64], padding_deg: f32) -> Vec<DonutSlice> {
    let drawable: Vec<(usize, f64)> = values.iter()
        .copied()
        .enumerate()
        .filter(|(_, v)| v.is_finite() && *v > 0.0)
        .collect();

    let total: f64 = drawable.iter().map(|(_, v)| v).sum();
    if drawable.is_empty() || total <= 0.0 {
        return Vec::new();
    }

    let padding = if drawable.len() > 1 { padding_deg } else { 0.0 };
    let available = 360.0 - padding * drawable.len() as f32;

    let mut start = 0.0;
    drawable.into_iter()
        .map(|(index, value)| {
            let sweep = (value / total) as f32 * available;
            let slice = DonutSlice { index, start_deg: start, sweep_deg: sweep };
            start += sweep + padding;
            slice
        })
        .collect()
}
