//! Buffer-managed Sobel filter.
//!
//! Same numeric contract as [`SobelFilter`](crate::SobelFilter), but the
//! grayscale stage writes into a cached [`AlignedGrayBuffer`] whose rows are
//! padded to a 32-byte stride, which is the layout vectorized kernels expect.
//! Every [`OptimizationLevel`] currently runs the scalar kernels, so output
//! bytes never depend on the level or on the host CPU.

use crate::config::{OptimizationLevel, SobelConfig};
use crate::sobel::aligned::AlignedGrayBuffer;
use crate::sobel::convolution::{convolve_strided, SOBEL_X_5X5, SOBEL_Y_5X5};
use crate::sobel::filter::edges_from_gradients;
use crate::sobel::grayscale::to_grayscale_strided;
use crate::sobel::grid::{GrayGrid, RgbGrid};
use log::debug;
use std::time::{Duration, Instant};

/// Timing of the most recent profiled call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerformanceMetrics {
    pub processing_time: Duration,
    pub pixels_per_second: u64,
    /// Approximate bytes read, one per pixel.
    pub memory_bandwidth: u64,
    pub optimization_used: String,
}

/// Instruction-set extensions detected on the running CPU, in ascending order.
pub fn detected_features() -> Vec<&'static str> {
    #[allow(unused_mut)]
    let mut features = Vec::new();
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    {
        let checks = [
            ("SSE", is_x86_feature_detected!("sse")),
            ("SSE2", is_x86_feature_detected!("sse2")),
            ("SSE3", is_x86_feature_detected!("sse3")),
            ("SSE4.1", is_x86_feature_detected!("sse4.1")),
            ("SSE4.2", is_x86_feature_detected!("sse4.2")),
            ("AVX", is_x86_feature_detected!("avx")),
            ("AVX2", is_x86_feature_detected!("avx2")),
        ];
        features.extend(
            checks
                .into_iter()
                .filter_map(|(name, present)| present.then_some(name)),
        );
    }
    features
}

/// Space-terminated list of detected extensions, e.g. `"SSE SSE2 AVX2 "`.
///
/// Returns `"Unknown "` when nothing can be detected. Advisory only.
pub fn cpu_capabilities() -> String {
    let features = detected_features();
    if features.is_empty() {
        return "Unknown ".to_string();
    }
    features.iter().map(|name| format!("{name} ")).collect()
}

/// Picks the best level the CPU supports for `Auto`; other levels pass through.
pub fn resolve_level(level: OptimizationLevel) -> OptimizationLevel {
    if level != OptimizationLevel::Auto {
        return level;
    }
    let features = detected_features();
    if features.contains(&"AVX2") {
        OptimizationLevel::Avx2
    } else if features.contains(&"SSE4.1") {
        OptimizationLevel::Sse
    } else {
        OptimizationLevel::Scalar
    }
}

/// Sobel filter that reuses an aligned grayscale buffer between calls.
///
/// Not meant for concurrent calls on one instance; separate instances share
/// nothing.
#[derive(Debug)]
pub struct AlignedSobelFilter {
    config: SobelConfig,
    level: OptimizationLevel,
    buffer: AlignedGrayBuffer,
    last_metrics: PerformanceMetrics,
}

impl Default for AlignedSobelFilter {
    fn default() -> Self {
        Self::new(OptimizationLevel::Auto)
    }
}

impl AlignedSobelFilter {
    /// Creates a filter with the default config; `Auto` is resolved here.
    pub fn new(level: OptimizationLevel) -> Self {
        Self::with_config(SobelConfig::default(), level)
    }

    pub fn with_config(config: SobelConfig, level: OptimizationLevel) -> Self {
        let level = resolve_level(level);
        debug!("AlignedSobelFilter using {} path", level.name());
        Self {
            config,
            level,
            buffer: AlignedGrayBuffer::new(),
            last_metrics: PerformanceMetrics::default(),
        }
    }

    /// Edge intensity of an RGB grid. The empty grid maps to the empty grid.
    pub fn apply(&mut self, input: &RgbGrid) -> GrayGrid {
        if input.is_empty() {
            return GrayGrid::default();
        }
        self.buffer.ensure(input.width(), input.height());
        let stride = self.buffer.padded_width();
        to_grayscale_strided(input, self.buffer.as_mut_slice(), stride);
        self.sobel_from_buffer()
    }

    /// Edge intensity of an already grayscale grid.
    pub fn apply_gray(&mut self, input: &GrayGrid) -> GrayGrid {
        if input.is_empty() {
            return GrayGrid::default();
        }
        self.buffer.ensure(input.width(), input.height());
        let (width, stride) = (input.width(), self.buffer.padded_width());
        for (src, dst) in input
            .as_slice()
            .chunks_exact(width)
            .zip(self.buffer.as_mut_slice().chunks_exact_mut(stride))
        {
            dst[..width].copy_from_slice(src);
        }
        self.sobel_from_buffer()
    }

    /// Like [`apply`](Self::apply), recording timing in [`last_metrics`](Self::last_metrics).
    pub fn apply_profiled(&mut self, input: &RgbGrid) -> GrayGrid {
        let start = Instant::now();
        let output = self.apply(input);
        let elapsed = start.elapsed();

        let pixels = input.len() as u64;
        let micros = elapsed.as_micros() as u64;
        self.last_metrics = PerformanceMetrics {
            processing_time: elapsed,
            pixels_per_second: if micros > 0 {
                pixels * 1_000_000 / micros
            } else {
                0
            },
            memory_bandwidth: pixels,
            optimization_used: self.level.name().to_string(),
        };
        debug!("AlignedSobelFilter::apply_profiled {:?}", self.last_metrics);
        output
    }

    fn sobel_from_buffer(&self) -> GrayGrid {
        let (width, height) = (self.buffer.width(), self.buffer.height());
        let stride = self.buffer.padded_width();
        let gray = self.buffer.as_slice();
        let gx = convolve_strided(gray, width, height, stride, &SOBEL_X_5X5);
        let gy = convolve_strided(gray, width, height, stride, &SOBEL_Y_5X5);
        edges_from_gradients(&gx, &gy, &self.config)
    }

    pub fn last_metrics(&self) -> &PerformanceMetrics {
        &self.last_metrics
    }

    /// The level in effect after `Auto` resolution.
    pub fn optimization_level(&self) -> OptimizationLevel {
        self.level
    }

    pub fn cpu_capabilities(&self) -> String {
        cpu_capabilities()
    }

    pub fn config(&self) -> &SobelConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SobelConfig {
        &mut self.config
    }

    pub fn set_config(&mut self, config: SobelConfig) {
        self.config = config;
    }

    pub fn buffer(&self) -> &AlignedGrayBuffer {
        &self.buffer
    }
}
