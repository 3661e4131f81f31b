//! Projection de l'anneau (degrés) dans la surface de dessin 200×200

use geo::{BoundingRect, Coord, LineString};

/// Côté de la surface de dessin (unités SVG)
pub const CANVAS_SIZE: f64 = 200.0;

/// Marge intérieure (unités SVG)
pub const PADDING: f64 = 5.0;

/// Nombre minimal de sommets pour un polygone dessinable
pub const MIN_VERTICES: usize = 3;

/// Anneau projeté : mêmes sommets, même ordre, coordonnées de dessin
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedPolygon {
    points: Vec<Coord<f64>>,
}

impl ProjectedPolygon {
    pub fn points(&self) -> &[Coord<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Projette un anneau dans le carré de dessin
///
/// Retourne `None` si l'anneau a moins de 3 sommets : le rendu doit alors
/// être sauté. L'axe Y est inversé (la latitude croît vers le haut, le
/// dessin vers le bas). Une étendue nulle sur un axe utilise un diviseur 1,
/// ce qui écrase l'axe sur la marge au lieu de diviser par zéro.
pub fn project(ring: &LineString<f64>) -> Option<ProjectedPolygon> {
    if ring.0.len() < MIN_VERTICES {
        return None;
    }

    let bounds = ring.bounding_rect()?;
    let min = bounds.min();
    let span_x = non_zero(bounds.width());
    let span_y = non_zero(bounds.height());
    let inner = CANVAS_SIZE - 2.0 * PADDING;

    let points = ring
        .0
        .iter()
        .map(|c| Coord {
            x: (c.x - min.x) / span_x * inner + PADDING,
            y: (CANVAS_SIZE - PADDING) - (c.y - min.y) / span_y * inner,
        })
        .collect();

    Some(ProjectedPolygon { points })
}

fn non_zero(span: f64) -> f64 {
    if span == 0.0 || span.is_nan() {
        1.0
    } else {
        span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(coords: &[(f64, f64)]) -> LineString<f64> {
        LineString::from(coords.to_vec())
    }

    fn assert_close(a: Coord<f64>, b: (f64, f64)) {
        assert!(
            (a.x - b.0).abs() < 1e-9 && (a.y - b.1).abs() < 1e-9,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_project_square() {
        let projected =
            project(&ring(&[(33.0, 35.0), (33.0, 35.1), (33.1, 35.1), (33.1, 35.0)])).unwrap();

        assert_eq!(projected.len(), 4);
        assert_close(projected.points()[0], (5.0, 195.0));
        assert_close(projected.points()[1], (5.0, 5.0));
        assert_close(projected.points()[2], (195.0, 5.0));
        assert_close(projected.points()[3], (195.0, 195.0));
    }

    #[test]
    fn test_project_preserves_order_and_duplicates() {
        let input = ring(&[(0.0, 0.0), (2.0, 1.0), (1.0, 2.0), (0.0, 0.0)]);
        let projected = project(&input).unwrap();

        assert_eq!(projected.len(), input.0.len());
        assert_eq!(projected.points()[0], projected.points()[3]);
        assert_close(projected.points()[1], (195.0, 100.0));
        assert_close(projected.points()[2], (100.0, 5.0));
    }

    #[test]
    fn test_project_flat_latitude() {
        let projected = project(&ring(&[(33.0, 35.0), (33.1, 35.0), (33.2, 35.0)])).unwrap();
        assert!(projected.points().iter().all(|p| p.y == CANVAS_SIZE - PADDING));
        assert_close(projected.points()[1], (100.0, 195.0));
    }

    #[test]
    fn test_project_flat_longitude() {
        let projected = project(&ring(&[(33.0, 35.0), (33.0, 35.1), (33.0, 35.2)])).unwrap();
        assert!(projected.points().iter().all(|p| p.x == PADDING));
    }

    #[test]
    fn test_project_too_few_vertices() {
        assert!(project(&ring(&[])).is_none());
        assert!(project(&ring(&[(1.0, 1.0), (2.0, 2.0)])).is_none());
    }
}
