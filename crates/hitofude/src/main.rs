//! hitofude: CLI for tracing raster line drawings into a single stroke.
//!
//! Reads an image file, binarizes and skeletonizes it, traces the
//! skeleton as one continuous path, and writes SVG and/or G-code
//! output. Prints trace diagnostics (graph shape, coverage, chosen
//! traversal) to stderr, or as JSON to stdout with `--json`.
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin hitofude -- [OPTIONS] <IMAGE_PATH>
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use hitofude_export::{GcodeConfig, SvgMetadata};
use hitofude_pipeline::{TraceConfig, TraceResult, Traversal};

/// Trace a raster line drawing into a single continuous plotter stroke.
///
/// The input is binarized, thinned to a one-pixel skeleton, and walked
/// as a graph: an Eulerian path when one exists, a route-inspection
/// covering walk otherwise. The result is simplified and written as
/// SVG and/or G-code.
#[derive(Parser)]
#[command(name = "hitofude", version)]
struct Cli {
    /// Path to the input image (PNG, JPEG, BMP, WebP).
    image_path: PathBuf,

    /// Binarization threshold (0-255); pixels darker than this are ink.
    #[arg(long, default_value_t = TraceConfig::DEFAULT_THRESHOLD)]
    threshold: u8,

    /// Flip binarization polarity (light strokes on dark background).
    #[arg(long)]
    invert: bool,

    /// Skip the morphological close that bridges small stroke gaps.
    #[arg(long)]
    no_close: bool,

    /// Simplification tolerance in pixels.
    #[arg(long, default_value_t = TraceConfig::DEFAULT_SIMPLIFY_TOLERANCE)]
    tolerance: f64,

    /// Write SVG output to file.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Write G-code output to file.
    #[arg(long)]
    gcode: Option<PathBuf>,

    /// Pixel-to-millimetre scale for G-code output.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Travel (tool off) feed rate for G-code output, mm/min.
    #[arg(long, default_value_t = hitofude_export::DEFAULT_TRAVEL_FEED)]
    travel_feed: f64,

    /// Drawing (tool on) feed rate for G-code output, mm/min.
    #[arg(long, default_value_t = hitofude_export::DEFAULT_DRAW_FEED)]
    draw_feed: f64,

    /// Number of G-code passes over the stroke.
    #[arg(long, default_value_t = 1, value_parser = clap::builder::RangedU64ValueParser::<u32>::new().range(1..))]
    passes: u32,

    /// Z step down between G-code passes, millimetres.
    #[arg(long, default_value_t = 1.0)]
    pass_depth: f64,

    /// Output diagnostics as JSON on stdout instead of a stderr report.
    #[arg(long)]
    json: bool,
}

/// Build a [`TraceConfig`] from CLI arguments.
const fn config_from_cli(cli: &Cli) -> TraceConfig {
    TraceConfig {
        threshold: cli.threshold,
        invert: cli.invert,
        close_gaps: !cli.no_close,
        simplify_tolerance: cli.tolerance,
    }
}

/// Human-readable diagnostics report, written to stderr.
fn print_report(result: &TraceResult) {
    let d = &result.diagnostics;
    let traversal = match d.traversal {
        Traversal::EulerianCircuit => "Eulerian circuit",
        Traversal::EulerianPath => "Eulerian path",
        Traversal::RouteInspection => "route inspection",
        Traversal::DepthFirst => "depth-first",
    };
    eprintln!(
        "Graph: {} vertices, {} edges, {} odd, {} component(s)",
        d.vertices, d.edges, d.odd_vertices, d.components,
    );
    eprintln!("Traversal: {traversal}, {}/{} edges covered", d.edges_covered, d.edges);
    eprintln!(
        "Path: {} raw points -> {} after simplification",
        d.raw_points,
        result.path.len(),
    );
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = config_from_cli(&cli);

    let image_bytes = match std::fs::read(&cli.image_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error reading {}: {e}", cli.image_path.display());
            return ExitCode::FAILURE;
        }
    };

    let result = match hitofude_pipeline::trace_image(&image_bytes, &config) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Trace error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&result.diagnostics) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing diagnostics: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_report(&result);
    }

    if let Some(ref svg_path) = cli.svg {
        let title = cli
            .image_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("hitofude");
        let desc = format!(
            "threshold={} invert={} close_gaps={} tolerance={}",
            config.threshold, config.invert, config.close_gaps, config.simplify_tolerance,
        );
        let metadata = SvgMetadata {
            title: Some(title),
            description: Some(&desc),
        };
        let svg = hitofude_export::to_svg(&result.path, result.dimensions, &metadata);
        match std::fs::write(svg_path, &svg) {
            Ok(()) => {
                eprintln!("SVG written to {} ({} bytes)", svg_path.display(), svg.len());
            }
            Err(e) => {
                eprintln!("Error writing SVG to {}: {e}", svg_path.display());
                return ExitCode::FAILURE;
            }
        }
    }

    if let Some(ref gcode_path) = cli.gcode {
        let gcode_config = GcodeConfig {
            scale: cli.scale,
            travel_feed: cli.travel_feed,
            draw_feed: cli.draw_feed,
            passes: cli.passes,
            pass_depth: cli.pass_depth,
        };
        let gcode = hitofude_export::to_gcode(&result.path, result.dimensions, &gcode_config);
        match std::fs::write(gcode_path, &gcode) {
            Ok(()) => {
                eprintln!(
                    "G-code written to {} ({} bytes)",
                    gcode_path.display(),
                    gcode.len(),
                );
            }
            Err(e) => {
                eprintln!("Error writing G-code to {}: {e}", gcode_path.display());
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
