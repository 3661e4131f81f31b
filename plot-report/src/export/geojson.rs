//! Export GeoJSON d'un bundle avec geozero (contour + point de vue)

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use geo::{Geometry, LineString, Point, Polygon};
use geozero::geojson::GeoJsonWriter;
use geozero::GeozeroGeometry;

use crate::bundle::ReportBundle;

/// Les exports KML sont en WGS84
const EPSG_WGS84: u32 = 4326;

/// Exporte le bundle en FeatureCollection GeoJSON
pub fn export_to_geojson(bundle: &ReportBundle, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)
        .context(format!("Failed to create file: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    write_collection(&mut writer, bundle)?;
    writer.flush()?;

    Ok(())
}

/// Écrit la FeatureCollection : contour (si au moins 3 sommets) puis point
pub fn write_collection<W: Write>(writer: &mut W, bundle: &ReportBundle) -> Result<()> {
    write!(
        writer,
        r#"{{"type":"FeatureCollection","crs":{{"type":"name","properties":{{"name":"urn:ogc:def:crs:EPSG::{}"}}}},"features":["#,
        EPSG_WGS84
    )?;

    let mut features = Vec::with_capacity(2);
    if bundle.ring.len() >= 3 {
        let ring: LineString<f64> = bundle.ring.iter().map(|&[x, y]| (x, y)).collect();
        features.push(("boundary", Geometry::Polygon(Polygon::new(ring, vec![]))));
    }
    if let Some([x, y]) = bundle.point {
        features.push(("viewpoint", Geometry::Point(Point::new(x, y))));
    }

    for (i, (role, geometry)) in features.iter().enumerate() {
        if i > 0 {
            write!(writer, ",")?;
        }
        write_feature(writer, role, geometry, bundle)?;
    }

    write!(writer, "]}}")?;
    Ok(())
}

/// Écrit une feature en GeoJSON
fn write_feature<W: Write>(
    writer: &mut W,
    role: &str,
    geometry: &Geometry<f64>,
    bundle: &ReportBundle,
) -> Result<()> {
    let id = format!("{}:{}", bundle.field("PlotNumber"), role);
    write!(
        writer,
        r#"{{"type":"Feature","id":"{}","#,
        escape_json(&id)
    )?;

    write!(writer, r#""geometry":"#)?;
    let mut geom_buf = Vec::new();
    let mut geom_writer = GeoJsonWriter::new(&mut geom_buf);
    geometry.process_geom(&mut geom_writer)?;
    writer.write_all(&geom_buf)?;

    write!(
        writer,
        r#","properties":{{"role":"{}","source":"{}","coordinate_tier":"{}""#,
        role,
        escape_json(&bundle.source_name),
        escape_json(&bundle.coordinate_tier)
    )?;
    for (key, value) in &bundle.fields {
        write!(
            writer,
            r#","{}":"{}""#,
            escape_json(key),
            escape_json(value)
        )?;
    }
    write!(writer, "}}}}")?;

    Ok(())
}

/// Échappe une chaîne pour JSON
fn escape_json(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result
}
