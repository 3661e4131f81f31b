//! Données transmises à la mise en page du rapport

use std::collections::BTreeMap;

use serde::Serialize;

use crate::render::RasterImage;
use crate::session::Upload;

/// Champs, coordonnée, anneau brut et image de la parcelle
///
/// L'image n'est pas sérialisée en JSON : elle est écrite à part en PNG.
#[derive(Debug, Clone, Serialize)]
pub struct ReportBundle {
    /// Nom du fichier KML source
    pub source_name: String,

    /// Checksum blake3 (hex) du fichier source
    pub checksum: String,

    /// Champ canonique -> valeur normalisée (vide si absente)
    pub fields: BTreeMap<String, String>,

    /// Coordonnée `"lat, lng"` (6 décimales) ou chaîne vide
    pub coordinates: String,

    /// Point représentatif `[lng, lat]`
    pub point: Option<[f64; 2]>,

    /// Stratégie ayant produit la coordonnée
    pub coordinate_tier: String,

    /// Nombre de sommets ayant servi à la coordonnée
    pub vertex_count: usize,

    /// Anneau extérieur brut `[lng, lat]`
    pub ring: Vec<[f64; 2]>,

    #[serde(skip)]
    pub plot_image: Option<RasterImage>,
}

impl ReportBundle {
    pub fn from_upload(upload: &Upload, plot_image: Option<RasterImage>) -> Self {
        let extraction = &upload.extraction;

        Self {
            source_name: upload.file_name.clone(),
            checksum: upload.checksum.clone(),
            fields: extraction
                .fields
                .iter()
                .map(|(field, value)| (field.name().to_string(), value.to_string()))
                .collect(),
            coordinates: extraction.coordinate.display(),
            point: extraction.coordinate.point.map(|p| [p.x(), p.y()]),
            coordinate_tier: extraction.coordinate.source_tier.to_string(),
            vertex_count: extraction.coordinate.vertex_count,
            ring: extraction.ring.0.iter().map(|c| [c.x, c.y]).collect(),
            plot_image,
        }
    }

    pub fn has_image(&self) -> bool {
        self.plot_image.is_some()
    }

    pub fn has_coordinates(&self) -> bool {
        !self.coordinates.is_empty()
    }

    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
