//! Résolution de la coordonnée représentative de la parcelle
//!
//! Stratégies évaluées dans l'ordre, la première qui aboutit l'emporte :
//!
//! 1. `LookAt` du placemark de premier niveau
//! 2. `LookAt` du premier placemark du premier dossier
//! 3. Moyenne des sommets de l'anneau extérieur de ce même placemark
//!
//! Une valeur non numérique rend la stratégie indisponible, sans erreur.

use geo::{Centroid, MultiPoint, Point};
use tracing::debug;

use crate::parser::{Document, Node};
use crate::ring::{boundary_ring, parse_number};
use crate::types::{CoordinateResult, SourceTier};

/// Stratégie pure : document -> résultat étiqueté par sa propre stratégie
type Strategy = fn(&Document) -> Option<CoordinateResult>;

const STRATEGIES: [Strategy; 3] = [primary_viewpoint, folder_viewpoint, polygon_centroid];

/// Résout la coordonnée représentative (jamais d'erreur)
pub fn resolve(doc: &Document) -> CoordinateResult {
    for strategy in STRATEGIES {
        if let Some(result) = strategy(doc) {
            debug!(
                tier = %result.source_tier,
                vertices = result.vertex_count,
                coordinates = %result.display(),
                "Coordinate resolved"
            );
            return result;
        }
    }

    debug!("No usable coordinate in document");
    CoordinateResult::unavailable()
}

fn primary_viewpoint(doc: &Document) -> Option<CoordinateResult> {
    let point = viewpoint(doc.top_placemark()?)?;
    Some(CoordinateResult {
        point: Some(point),
        vertex_count: 1,
        source_tier: SourceTier::PrimaryViewpoint,
    })
}

fn folder_viewpoint(doc: &Document) -> Option<CoordinateResult> {
    let point = viewpoint(doc.folder_placemark()?)?;
    Some(CoordinateResult {
        point: Some(point),
        vertex_count: 1,
        source_tier: SourceTier::FolderViewpoint,
    })
}

fn polygon_centroid(doc: &Document) -> Option<CoordinateResult> {
    let ring = boundary_ring(doc.folder_placemark()?)?;
    let vertex_count = ring.0.len();
    let center = ring.points().collect::<MultiPoint<f64>>().centroid()?;

    Some(CoordinateResult {
        point: Some(center),
        vertex_count,
        source_tier: SourceTier::PolygonCentroid,
    })
}

/// Point de vue `LookAt` (latitude et longitude toutes deux numériques)
fn viewpoint(placemark: &Node) -> Option<Point<f64>> {
    let look_at = placemark.child("LookAt")?;
    let lat = parse_number(look_at.child_text("latitude")?)?;
    let lng = parse_number(look_at.child_text("longitude")?)?;
    Some(Point::new(lng, lat))
}
