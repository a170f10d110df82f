//! Integration tests for sobel-edges workflows
//!
//! These tests run the whole chain the command-line tool uses: raw file in,
//! edge filter, raw file out, and the analysis helpers on the result.

use image::{ImageBuffer, Luma, Rgb};
use sobel_edges::analysis::{ascii_preview, EdgeStatistics};
use sobel_edges::pattern::{horizontal_gradient, stripe_pattern};
use sobel_edges::raw_io::{load_rgb_raw, save_gray_raw};
use sobel_edges::{
    AlignedSobelFilter, GrayGrid, Image, OptimizationLevel, RgbGrid, SobelConfig, SobelEdges,
    SobelFilter,
};
use std::path::PathBuf;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn scratch_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("sobel-edges-{name}-{}", std::process::id()))
}

fn rgb_bytes(grid: &RgbGrid) -> Vec<u8> {
    grid.as_slice().iter().flat_map(|Rgb(channels)| *channels).collect()
}

#[test]
fn horizontal_gradient_responds_only_at_the_image_edge() {
    init_logger();
    let input = horizontal_gradient(64, 64).unwrap();
    let output = SobelFilter::default().apply(&input);
    assert_eq!(output.dimensions(), (64, 64));

    // The ramp itself is a constant slope, so the interior stays dark.
    for y in 2..62 {
        for x in 2..60 {
            assert!(*output.at(x, y).unwrap() <= 10, "({x}, {y})");
        }
    }
    // The drop to zero padding past the bright right edge is the strongest transition.
    for y in 0..64 {
        let band = output.row(y)[62..].iter().copied().max().unwrap();
        assert!(band > 100, "row {y}: {band}");
    }
}

#[test]
fn stripe_pattern_marks_band_transitions() {
    init_logger();
    let input = stripe_pattern(160, 160).unwrap();
    let output = SobelFilter::default().apply(&input);

    assert!(*output.at(80, 40).unwrap() > 100);
    assert!(*output.at(79, 40).unwrap() > 100);
    assert_eq!(*output.at(40, 40).unwrap(), 0);

    let stats = EdgeStatistics::from_grid(&output).unwrap();
    assert!(stats.strong > 0);
    assert!(stats.mean < 20.0);
}

#[test]
fn raw_file_round_trip_through_aligned_filter() {
    init_logger();
    let dir = scratch_dir("workflow");
    let input_path = dir.join("input.raw");
    let output_path = dir.join("out/edges.raw");

    let (width, height) = (96, 48);
    let source = stripe_pattern(width, height).unwrap();
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(&input_path, rgb_bytes(&source)).unwrap();

    let loaded = load_rgb_raw(&input_path, width, height).unwrap();
    assert_eq!(loaded, source);

    let mut filter = AlignedSobelFilter::new(OptimizationLevel::Auto);
    let edges = filter.apply_profiled(&loaded);
    assert!(!filter.last_metrics().optimization_used.is_empty());
    save_gray_raw(&edges, &output_path).unwrap();

    let written = std::fs::read(&output_path).unwrap();
    assert_eq!(written.len(), width * height);
    assert_eq!(written, SobelFilter::default().apply(&source).into_vec());
}

#[test]
fn config_swap_between_calls_takes_effect() {
    let input = stripe_pattern(64, 64).unwrap();
    let mut filter = AlignedSobelFilter::new(OptimizationLevel::Scalar);
    let normalized = filter.apply(&input);

    filter.set_config(SobelConfig::new(true, 8, false));
    let coarse = filter.apply(&input);
    assert!(coarse.as_slice().iter().all(|&v| v <= 8));
    assert_ne!(coarse, normalized);

    filter.set_config(SobelConfig::default());
    assert_eq!(filter.apply(&input), normalized);
}

#[test]
fn image_buffers_use_the_same_pipeline() {
    let input = stripe_pattern(40, 30).unwrap();
    let image = input.to_image().unwrap();
    let edges: Image<Luma<u8>> = image.sobel_edges_default().unwrap();
    assert_eq!(
        GrayGrid::from_image(&edges),
        SobelFilter::default().apply(&input)
    );

    let gray: Image<Luma<u8>> = ImageBuffer::from_fn(40, 30, |x, _| Luma([(x * 6) as u8]));
    assert_eq!(gray.sobel_edges_default().unwrap().dimensions(), (40, 30));
}

#[test]
fn ascii_preview_shows_edges() {
    let input = stripe_pattern(160, 160).unwrap();
    let output = SobelFilter::default().apply(&input);
    let preview = ascii_preview(&output, 8);
    assert_eq!(preview.lines().count(), 20);
    assert!(preview.lines().all(|line| line.len() == 20));
    assert!(preview.chars().any(|c| c != ' ' && c != '\n'));
}
