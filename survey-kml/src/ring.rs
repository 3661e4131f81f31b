//! Lecture de l'anneau extérieur du polygone de la parcelle

use geo::{Coord, LineString};
use tracing::warn;

use crate::parser::{Document, Node};

/// Chemin KML de la liste de coordonnées de l'anneau extérieur
const OUTER_RING_PATH: &[&str] = &[
    "Polygon",
    "outerBoundaryIs",
    "LinearRing",
    "coordinates",
];

/// Anneau extérieur brut du document (vide si absent ou illisible)
pub fn document_ring(doc: &Document) -> LineString<f64> {
    doc.folder_placemark()
        .and_then(boundary_ring)
        .unwrap_or_else(|| LineString::new(Vec::new()))
}

/// Anneau extérieur d'un placemark
pub fn boundary_ring(placemark: &Node) -> Option<LineString<f64>> {
    let raw = placemark.find_path(OUTER_RING_PATH)?.text()?;
    parse_coordinates(raw)
}

/// Parse une liste de tuples `lng,lat[,alt]` séparés par des blancs
///
/// Un seul sommet illisible rend l'anneau entier inexploitable.
pub fn parse_coordinates(raw: &str) -> Option<LineString<f64>> {
    let mut coords = Vec::new();

    for (index, tuple) in raw.split_whitespace().enumerate() {
        match parse_vertex(tuple) {
            Some(coord) => coords.push(coord),
            None => {
                warn!(index = index, vertex = tuple, "Unreadable ring vertex");
                return None;
            }
        }
    }

    Some(LineString::new(coords))
}

/// Parse un sommet `lng,lat[,alt]` (l'altitude est ignorée)
fn parse_vertex(tuple: &str) -> Option<Coord<f64>> {
    let mut parts = tuple.split(',');
    let x = parse_number(parts.next()?)?;
    let y = parse_number(parts.next()?)?;
    Some(Coord { x, y })
}

/// Parse un nombre décimal fini
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    let value: f64 = fast_float::parse(raw.trim()).ok()?;
    value.is_finite().then_some(value)
}
