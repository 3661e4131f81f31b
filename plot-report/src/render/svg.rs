//! Dessin vectoriel du polygone projeté

use std::fmt::Write;

use survey_kml::project::CANVAS_SIZE;
use survey_kml::ProjectedPolygon;

const FILL: &str = "#22c55e";
const STROKE: &str = "#15803d";
const VERTEX_FILL: &str = "#dc2626";
const VERTEX_RADIUS: f64 = 3.0;

/// Construit le SVG 200×200 (fond blanc, polygone, un marqueur par sommet)
pub fn plot_svg(polygon: &ProjectedPolygon) -> String {
    let points = polygon
        .points()
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ");

    let mut svg = String::with_capacity(256 + polygon.len() * 96);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {size} {size}" width="{size}" height="{size}">"#,
        size = CANVAS_SIZE
    );
    let _ = write!(
        svg,
        r##"<rect x="0" y="0" width="{size}" height="{size}" fill="#ffffff"/>"##,
        size = CANVAS_SIZE
    );
    let _ = write!(
        svg,
        r#"<polygon points="{}" fill="{}" stroke="{}" stroke-width="2"/>"#,
        points, FILL, STROKE
    );
    for p in polygon.points() {
        let _ = write!(
            svg,
            r##"<circle cx="{}" cy="{}" r="{}" fill="{}" stroke="#ffffff" stroke-width="1"/>"##,
            p.x, p.y, VERTEX_RADIUS, VERTEX_FILL
        );
    }
    svg.push_str("</svg>");
    svg
}
