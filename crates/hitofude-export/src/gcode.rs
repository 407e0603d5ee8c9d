//! G-code export serializer.
//!
//! Converts the traced path into a G-code program for pen plotters and
//! laser engravers.  The path is drawn as one continuous stroke: a
//! single rapid move (`G0`) to the start, tool on (`M3`), linear moves
//! (`G1`) through every point, tool off (`M5`).
//!
//! ## Coordinate Convention
//!
//! Image Y increases downward while machine Y increases upward, so the
//! Y axis is flipped against the image height before scaling.  A
//! uniform `scale` maps pixels to millimetres.
//!
//! ## Passes
//!
//! When `passes > 1` the whole stroke is repeated, stepping the Z axis
//! down by `pass_depth` millimetres between passes (relative move, for
//! cutters that need multiple depth passes).
//!
//! This is a pure function with no I/O — it returns a `String`.

use std::fmt::Write;

use hitofude_pipeline::{Dimensions, Polyline};

/// Default feed rate for travel (tool off) moves, mm/min.
pub const DEFAULT_TRAVEL_FEED: f64 = 3000.0;

/// Default feed rate for drawing (tool on) moves, mm/min.
pub const DEFAULT_DRAW_FEED: f64 = 1000.0;

/// G-code generation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GcodeConfig {
    /// Uniform pixel-to-millimetre scale factor.
    pub scale: f64,

    /// Feed rate for travel moves in mm/min.
    pub travel_feed: f64,

    /// Feed rate for drawing moves in mm/min.
    pub draw_feed: f64,

    /// Number of times the stroke is repeated.
    pub passes: u32,

    /// Z step down between passes in millimetres.
    pub pass_depth: f64,
}

impl Default for GcodeConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            travel_feed: DEFAULT_TRAVEL_FEED,
            draw_feed: DEFAULT_DRAW_FEED,
            passes: 1,
            pass_depth: 1.0,
        }
    }
}

/// Serialize the traced path into a G-code program string.
///
/// Coordinates are emitted in millimetres to 3 decimal places with the
/// Y axis flipped so the drawing appears upright on the machine bed.
/// A polyline with fewer than 2 points produces a program with no
/// drawing moves, only a comment noting the empty path.
///
/// # Examples
///
/// ```
/// use hitofude_pipeline::{Dimensions, Point, Polyline};
/// use hitofude_export::{GcodeConfig, to_gcode};
///
/// let polyline = Polyline::new(vec![Point::new(0, 10), Point::new(5, 10)]);
/// let dims = Dimensions { width: 20, height: 10 };
/// let gcode = to_gcode(&polyline, dims, &GcodeConfig::default());
/// assert!(gcode.contains("G21"));
/// assert!(gcode.contains("G1 X5.000 Y0.000"));
/// ```
#[must_use]
pub fn to_gcode(polyline: &Polyline, dimensions: Dimensions, config: &GcodeConfig) -> String {
    let mut out = String::new();

    // --- Preamble ---
    let _ = writeln!(out, "G21 ; millimetres");
    let _ = writeln!(out, "G90 ; absolute positioning");
    let _ = writeln!(out, "M5 ; tool off");

    let points = polyline.points();
    if points.len() < 2 {
        let _ = writeln!(out, "; empty path, nothing to draw");
        return out;
    }

    // Image Y grows downward; flip against the height so the drawing
    // is upright on the machine bed.
    let height = f64::from(dimensions.height);
    let tx = |p: &hitofude_pipeline::Point| {
        let x = f64::from(p.x) * config.scale;
        let y = (height - f64::from(p.y)) * config.scale;
        (x, y)
    };

    for pass in 0..config.passes.max(1) {
        if pass > 0 {
            // Relative Z step down between passes, then back to absolute.
            let _ = writeln!(out, "G91");
            let _ = writeln!(out, "G1 Z{:.3} F{:.0}", -config.pass_depth, config.draw_feed);
            let _ = writeln!(out, "G90");
        }

        let (sx, sy) = tx(&points[0]);
        let _ = writeln!(out, "G0 X{sx:.3} Y{sy:.3} F{:.0}", config.travel_feed);
        let _ = writeln!(out, "M3 ; tool on");
        for p in &points[1..] {
            let (x, y) = tx(p);
            let _ = writeln!(out, "G1 X{x:.3} Y{y:.3} F{:.0}", config.draw_feed);
        }
        let _ = writeln!(out, "M5 ; tool off");
    }

    // --- Footer: park at origin ---
    let _ = writeln!(out, "G0 X0.000 Y0.000 F{:.0}", config.travel_feed);

    out
}
