//! SVG export serializer.
//!
//! Converts the traced path into an SVG string with a single `<path>`
//! element using the [`svg`] crate for document construction, XML
//! escaping, and path data formatting.
//!
//! The path uses `M` (move to) for the first point and `L` (line to)
//! for the rest, so the whole drawing is one continuous stroke.
//!
//! Optional [`SvgMetadata`] embeds `<title>` and `<desc>` elements for
//! accessibility and to help file managers identify exported files.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::Text;
use svg::node::element::path::Data;
use svg::node::element::{Description, Path, Title};

use hitofude_pipeline::{Dimensions, Polyline};

/// Metadata to embed in the SVG document.
///
/// Both fields are optional.  When present, a `<title>` and/or `<desc>`
/// element is emitted immediately after the opening `<svg>` tag.  These
/// are standard SVG accessibility elements and are surfaced by some file
/// managers and screen readers.
///
/// Text values are XML-escaped automatically by the `svg` crate.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title — emitted as `<title>`.
    ///
    /// Typically the source image filename (without extension).
    pub title: Option<&'a str>,

    /// Document description — emitted as `<desc>`.
    ///
    /// Typically contains trace parameters so exported files are
    /// distinguishable.
    pub description: Option<&'a str>,
}

/// Build an SVG path `d` attribute string from a polyline.
///
/// Uses `M` for the first point and `L` for subsequent points.
/// Returns an empty string for polylines with fewer than 2 points
/// (a single point cannot form a visible line segment).
///
/// # Examples
///
/// ```
/// use hitofude_pipeline::{Point, Polyline};
/// use hitofude_export::build_path_data;
///
/// let polyline = Polyline::new(vec![
///     Point::new(10, 20),
///     Point::new(30, 40),
/// ]);
/// let d = build_path_data(&polyline);
/// assert_eq!(d, "M10,20 L30,40");
/// ```
#[must_use]
pub fn build_path_data(polyline: &Polyline) -> String {
    let points = polyline.points();
    if points.len() < 2 {
        return String::new();
    }

    let first = &points[0];
    let mut data = Data::new().move_to((first.x, first.y));
    for p in &points[1..] {
        data = data.line_to((p.x, p.y));
    }
    String::from(svg::node::Value::from(data))
}

/// Serialize the traced path into an SVG document string.
///
/// The `viewBox` is set from [`Dimensions`] so the SVG coordinate
/// space matches the source image pixel grid.  A polyline with fewer
/// than 2 points produces a document with no `<path>` element.
///
/// If [`SvgMetadata::title`] or [`SvgMetadata::description`] is
/// provided, the corresponding `<title>` / `<desc>` element is emitted
/// after the opening `<svg>` tag.
///
/// # Examples
///
/// ```
/// use hitofude_pipeline::{Dimensions, Point, Polyline};
/// use hitofude_export::{SvgMetadata, to_svg};
///
/// let polyline = Polyline::new(vec![Point::new(10, 15), Point::new(12, 18)]);
/// let dims = Dimensions { width: 800, height: 600 };
/// let metadata = SvgMetadata {
///     title: Some("cherry-blossoms"),
///     ..SvgMetadata::default()
/// };
/// let svg = to_svg(&polyline, dims, &metadata);
/// assert!(svg.contains("<title>cherry-blossoms</title>"));
/// assert!(svg.contains("M10,15 L12,18"));
/// ```
#[must_use]
pub fn to_svg(polyline: &Polyline, dimensions: Dimensions, metadata: &SvgMetadata<'_>) -> String {
    let w = dimensions.width;
    let h = dimensions.height;
    let mut doc = Document::new()
        .set("width", w)
        .set("height", h)
        .set("viewBox", (0, 0, w, h));

    // Optional <title> element
    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }

    // Optional <desc> element
    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }

    let d = build_path_data(polyline);
    if !d.is_empty() {
        let path = Path::new()
            .set("d", d)
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", 1);
        doc = doc.add(path);
    }

    // The svg crate omits the XML declaration, so we prepend it.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hitofude_pipeline::Point;

    use super::*;

    fn dims(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    /// Shorthand: no metadata (most tests don't care about it).
    fn no_meta() -> SvgMetadata<'static> {
        SvgMetadata::default()
    }

    // --- build_path_data ---

    #[test]
    fn build_path_data_empty_polyline() {
        let polyline = Polyline::new(vec![]);
        assert_eq!(build_path_data(&polyline), "");
    }

    #[test]
    fn build_path_data_single_point() {
        let polyline = Polyline::new(vec![Point::new(5, 5)]);
        assert_eq!(build_path_data(&polyline), "");
    }

    #[test]
    fn build_path_data_two_points() {
        let polyline = Polyline::new(vec![Point::new(10, 20), Point::new(30, 40)]);
        assert_eq!(build_path_data(&polyline), "M10,20 L30,40");
    }

    #[test]
    fn build_path_data_three_points() {
        let polyline = Polyline::new(vec![
            Point::new(10, 15),
            Point::new(12, 18),
            Point::new(14, 20),
        ]);
        assert_eq!(build_path_data(&polyline), "M10,15 L12,18 L14,20");
    }

    // --- Empty / degenerate inputs ---

    #[test]
    fn empty_polyline_produces_valid_svg_with_no_path() {
        let svg = to_svg(&Polyline::new(vec![]), dims(100, 50), &no_meta());
        assert!(svg.contains(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(svg.contains(r#"width="100""#));
        assert!(svg.contains(r#"height="50""#));
        assert!(svg.contains(r#"viewBox="0 0 100 50""#));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn single_point_polyline_is_skipped() {
        let polyline = Polyline::new(vec![Point::new(5, 5)]);
        let svg = to_svg(&polyline, dims(100, 100), &no_meta());
        assert!(!svg.contains("<path"));
    }

    // --- Basic output structure ---

    #[test]
    fn two_point_polyline() {
        let polyline = Polyline::new(vec![Point::new(10, 20), Point::new(30, 40)]);
        let svg = to_svg(&polyline, dims(800, 600), &no_meta());

        assert!(svg.contains(r#"width="800""#));
        assert!(svg.contains(r#"height="600""#));
        assert!(svg.contains(r#"viewBox="0 0 800 600""#));
        assert!(svg.contains(r#"d="M10,20 L30,40""#));
        assert!(svg.contains(r#"fill="none""#));
        assert!(svg.contains(r#"stroke="black""#));
        assert!(svg.contains(r#"stroke-width="1""#));
    }

    #[test]
    fn whole_drawing_is_a_single_path() {
        let polyline = Polyline::new(vec![
            Point::new(1, 2),
            Point::new(3, 4),
            Point::new(5, 6),
            Point::new(7, 8),
        ]);
        let svg = to_svg(&polyline, dims(100, 100), &no_meta());

        let path_count = svg.matches("<path").count();
        assert_eq!(path_count, 1);
    }

    // --- SVG structure ---

    #[test]
    fn svg_has_xml_declaration() {
        let svg = to_svg(&Polyline::new(vec![]), dims(100, 100), &no_meta());
        assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    }

    #[test]
    fn svg_has_xmlns_namespace() {
        let svg = to_svg(&Polyline::new(vec![]), dims(100, 100), &no_meta());
        assert!(svg.contains(r#"xmlns="http://www.w3.org/2000/svg""#));
    }

    #[test]
    fn svg_ends_with_closing_tag() {
        let polyline = Polyline::new(vec![Point::new(1, 2), Point::new(3, 4)]);
        let svg = to_svg(&polyline, dims(100, 100), &no_meta());
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    // --- Metadata ---

    #[test]
    fn title_element_emitted_when_present() {
        let meta = SvgMetadata {
            title: Some("cherry-blossoms"),
            ..SvgMetadata::default()
        };
        let svg = to_svg(&Polyline::new(vec![]), dims(100, 100), &meta);
        assert!(svg.contains("<title>cherry-blossoms</title>"));
        assert!(!svg.contains("<desc>"));
    }

    #[test]
    fn desc_element_emitted_when_present() {
        let meta = SvgMetadata {
            description: Some("threshold=128 tolerance=1"),
            ..SvgMetadata::default()
        };
        let svg = to_svg(&Polyline::new(vec![]), dims(100, 100), &meta);
        assert!(svg.contains("<desc>threshold=128 tolerance=1</desc>"));
        assert!(!svg.contains("<title>"));
    }

    #[test]
    fn title_and_desc_omitted_when_none() {
        let svg = to_svg(&Polyline::new(vec![]), dims(100, 100), &no_meta());
        assert!(!svg.contains("<title>"));
        assert!(!svg.contains("<desc>"));
    }

    #[test]
    fn title_appears_before_path() {
        let polyline = Polyline::new(vec![Point::new(1, 2), Point::new(3, 4)]);
        let meta = SvgMetadata {
            title: Some("test"),
            description: Some("desc"),
        };
        let svg = to_svg(&polyline, dims(100, 100), &meta);

        let title_pos = svg.find("<title>").unwrap();
        let desc_pos = svg.find("<desc>").unwrap();
        let path_pos = svg.find("<path").unwrap();
        assert!(title_pos < desc_pos, "title should come before desc");
        assert!(desc_pos < path_pos, "desc should come before the path");
    }

    #[test]
    fn special_characters_in_title_are_escaped() {
        let meta = SvgMetadata {
            title: Some("A <B> & C"),
            ..SvgMetadata::default()
        };
        let svg = to_svg(&Polyline::new(vec![]), dims(100, 100), &meta);
        assert!(svg.contains("<title>A &lt;B&gt; &amp; C</title>"));
    }

    // --- End-to-end: trace_image() -> to_svg() ---

    /// Create a test PNG with a single black horizontal stroke on white.
    fn stroke_png(width: u32, height: u32) -> Vec<u8> {
        let row = height / 2;
        let img = image::GrayImage::from_fn(width, height, |_x, y| {
            if y == row {
                image::Luma([0u8])
            } else {
                image::Luma([255u8])
            }
        });
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::L8,
        )
        .unwrap();
        buf
    }

    #[test]
    fn end_to_end_image_to_svg() {
        use hitofude_pipeline::{TraceConfig, trace_image};

        let png = stroke_png(40, 20);
        let result = trace_image(&png, &TraceConfig::default()).unwrap();
        let svg = to_svg(&result.path, result.dimensions, &no_meta());

        assert!(svg.contains(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(svg.contains(r#"viewBox="0 0 40 20""#));
        assert!(svg.contains("<path"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains('M'));
        assert!(svg.contains('L'));
    }
}
