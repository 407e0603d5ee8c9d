//! hitofude-export: Pure format serializers (sans-IO)
//!
//! Converts the traced path into output formats: SVG and G-code.

pub mod gcode;
pub mod svg;

pub use gcode::{DEFAULT_DRAW_FEED, DEFAULT_TRAVEL_FEED, GcodeConfig, to_gcode};
pub use svg::{SvgMetadata, build_path_data, to_svg};
