use log::info;
use sobel_edges::analysis::EdgeStatistics;
use sobel_edges::raw_io::{load_rgb_raw, save_gray_raw};
use sobel_edges::{load_config, AlignedSobelFilter, FilterSettings};
use std::env;
use std::path::Path;

const DEFAULT_WIDTH: usize = 640;
const DEFAULT_HEIGHT: usize = 640;

fn usage() -> String {
    format!(
        "Usage: sobel-edges <input.raw> <output.raw> [width height] [config.json]\n\
         \x20 input.raw  : headerless interleaved RGB, width*height*3 bytes (default {DEFAULT_WIDTH}x{DEFAULT_HEIGHT})\n\
         \x20 output.raw : headerless 8-bit edge intensity, width*height bytes"
    )
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn parse_dimension(value: &str, name: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|e| format!("Invalid {name} '{value}': {e}"))
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let (input, output, rest) = match args.as_slice() {
        [input, output, rest @ ..] => (input, output, rest),
        _ => return Err(usage()),
    };

    let (width, height, config_path) = match rest {
        [] => (DEFAULT_WIDTH, DEFAULT_HEIGHT, None),
        [config] => (DEFAULT_WIDTH, DEFAULT_HEIGHT, Some(config)),
        [w, h] => (parse_dimension(w, "width")?, parse_dimension(h, "height")?, None),
        [w, h, config] => (
            parse_dimension(w, "width")?,
            parse_dimension(h, "height")?,
            Some(config),
        ),
        _ => return Err(usage()),
    };

    let settings = match config_path {
        Some(path) => load_config(Path::new(path)).map_err(|e| error_chain(&e))?,
        None => FilterSettings::default(),
    };

    let image = load_rgb_raw(Path::new(input), width, height).map_err(|e| error_chain(&e))?;
    info!("Loaded {input} ({width}x{height})");

    let mut filter = AlignedSobelFilter::with_config(settings.sobel, settings.optimization);
    info!("CPU capabilities: {}", filter.cpu_capabilities().trim_end());
    let edges = filter.apply_profiled(&image);
    let metrics = filter.last_metrics();
    info!(
        "Filtered with {} path in {:?} ({} px/s)",
        metrics.optimization_used, metrics.processing_time, metrics.pixels_per_second
    );

    if let Some(stats) = EdgeStatistics::from_grid(&edges) {
        info!(
            "Range {}-{}, mean {:.1}, strong {:.2}%, medium {:.2}%, weak {:.2}%",
            stats.min,
            stats.max,
            stats.mean,
            stats.strong_percent(),
            stats.medium_percent(),
            stats.weak_percent()
        );
    }

    save_gray_raw(&edges, Path::new(output)).map_err(|e| error_chain(&e))?;
    println!("Output saved to: {output}");
    Ok(())
}

fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    message
}
