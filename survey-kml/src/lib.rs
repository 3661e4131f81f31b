//! # survey-kml
//!
//! Extraction des informations de parcelle depuis un export KML de levé
//! cadastral (portail DLS chypriote).
//!
//! ## Features
//!
//! - Détection de l'encodage déclaré (`memchr`, `simdutf8`, `encoding_rs`)
//! - Arbre KML possédé avec accesseurs explicites (`Option`)
//! - Extraction des paires "Libellé: <b>valeur</b>" de la description HTML
//! - Coordonnée représentative par stratégies ordonnées (LookAt, centroïde)
//! - Projection de l'anneau extérieur dans une surface de dessin 200×200
//!
//! ## Usage
//!
//! ```rust,ignore
//! use survey_kml::extract_document;
//!
//! let bytes = std::fs::read("parcelle.kml")?;
//! let extraction = extract_document(&bytes)?;
//! println!("Coordonnées: {}", extraction.coordinate.display());
//!
//! for (field, value) in extraction.fields.iter() {
//!     println!("{}: {}", field, value);
//! }
//! ```

pub mod error;
pub mod extract;
pub mod normalize;
pub mod parser;
pub mod project;
pub mod resolve;
pub mod ring;
pub mod types;

pub use error::KmlError;
pub use extract::LabelSet;
pub use project::{project, ProjectedPolygon};
pub use types::{CoordinateResult, Extraction, Field, FieldSet, SourceTier};

use tracing::debug;

/// Parse un export KML et extrait champs, coordonnée et anneau.
///
/// # Arguments
///
/// * `data` - Contenu brut du fichier `.kml`
///
/// # Returns
///
/// Une `Extraction` complète. Les libellés absents donnent des champs vides,
/// une coordonnée introuvable donne `SourceTier::None`, un polygone absent
/// donne un anneau vide.
///
/// # Errors
///
/// Retourne `KmlError` si le document est mal formé ou mal encodé ; aucun
/// résultat partiel n'est produit dans ce cas.
pub fn extract_document(data: &[u8]) -> Result<Extraction, KmlError> {
    extract_document_with(data, &LabelSet::default())
}

/// Comme [`extract_document`], avec des libellés personnalisés
pub fn extract_document_with(data: &[u8], labels: &LabelSet) -> Result<Extraction, KmlError> {
    let doc = parser::parse_bytes(data)?;

    let fields = extract::extract_fields(&doc, labels);
    let coordinate = resolve::resolve(&doc);
    let ring = ring::document_ring(&doc);

    debug!(
        plot = fields.get(Field::PlotNumber),
        tier = %coordinate.source_tier,
        ring_vertices = ring.0.len(),
        "Document extracted"
    );

    Ok(Extraction {
        fields,
        coordinate,
        ring,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>0/1234</name>
    <Folder>
      <Placemark>
        <description><![CDATA[Δήμος: <b>Lemesos</b><hr>Εμβαδό: <b>1500 μ²</b><hr>Ορόφοι: <b>2,</b>]]></description>
        <Polygon><outerBoundaryIs><LinearRing>
          <coordinates>33.0,35.0,0 33.0,35.1,0 33.1,35.1,0 33.1,35.0,0</coordinates>
        </LinearRing></outerBoundaryIs></Polygon>
      </Placemark>
    </Folder>
  </Document>
</kml>"#;

    #[test]
    fn test_extract_document() {
        let extraction = extract_document(SAMPLE.as_bytes()).unwrap();

        assert_eq!(extraction.fields.get(Field::PlotNumber), "0/1234");
        assert_eq!(extraction.fields.get(Field::Municipality), "Lemesos");
        assert_eq!(extraction.fields.get(Field::Location), "Lemesos");
        assert_eq!(extraction.fields.get(Field::Area), "1500 m²");
        assert_eq!(extraction.fields.get(Field::PlotArea), "1500 m²");
        assert_eq!(extraction.fields.get(Field::Floors), "2");
        assert_eq!(extraction.fields.get(Field::Zone), "");

        assert_eq!(extraction.coordinate.source_tier, SourceTier::PolygonCentroid);
        assert_eq!(extraction.coordinate.vertex_count, 4);
        assert_eq!(extraction.ring.0.len(), 4);
    }

    #[test]
    fn test_extract_document_parse_error() {
        let result = extract_document(b"<kml><Document><name>broken</Document></kml>");
        assert!(matches!(result, Err(KmlError::Xml(_))));
    }
}
