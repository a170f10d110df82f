use crate::config::SobelConfig;
use imageproc::definitions::Clamp;
use itertools::{Itertools, MinMaxResult};
use log::debug;

/// Ranges narrower than this are treated as a uniform image.
pub const DEGENERATE_RANGE: f64 = 1e-10;

#[inline]
fn saturate(value: f64) -> u8 {
    <u8 as Clamp<f64>>::clamp(value)
}

/// Maps magnitudes to 8-bit output according to `config`.
///
/// Without quantization each value saturates into `0..=255`. With it, values
/// are min-max scaled onto `quantization_levels` and, when `normalize_output`
/// is set, rescaled from levels to `0..=255`. Both paths truncate after
/// clamping.
pub fn quantize(magnitudes: &[f64], config: &SobelConfig) -> Vec<u8> {
    if magnitudes.is_empty() {
        return Vec::new();
    }

    if !config.use_quantization {
        return magnitudes.iter().map(|&m| saturate(m)).collect();
    }

    let (min_mag, max_mag) = match magnitudes.iter().copied().minmax() {
        MinMaxResult::NoElements => return Vec::new(),
        MinMaxResult::OneElement(m) => (m, m),
        MinMaxResult::MinMax(min, max) => (min, max),
    };
    let range = max_mag - min_mag;
    if range < DEGENERATE_RANGE || config.quantization_levels == 0 {
        debug!(
            "quantize: degenerate range {range:e} with {} levels, output is all zeros",
            config.quantization_levels
        );
        return vec![0; magnitudes.len()];
    }

    let levels = f64::from(config.quantization_levels);
    let scale = levels / range;
    magnitudes
        .iter()
        .map(|&m| {
            let mut normalized = (m - min_mag) * scale;
            if config.normalize_output {
                normalized = (normalized / levels) * 255.0;
            }
            saturate(normalized)
        })
        .collect()
}
