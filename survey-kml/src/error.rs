//! Types d'erreurs pour le crate survey-kml

use thiserror::Error;

/// Erreurs fatales pouvant survenir lors du parsing d'un export KML
///
/// Seul le parsing du document peut échouer : les champs absents, les
/// coordonnées inexploitables et les polygones dégénérés sont des cas
/// normaux qui produisent des valeurs vides.
#[derive(Debug, Error)]
pub enum KmlError {
    /// Document XML mal formé (balise non fermée, entité invalide, etc.)
    #[error("Malformed KML document: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Octets invalides pour l'encodage déclaré, ou encodage inconnu
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Élément structurel obligatoire absent (racine `kml`, `Document`)
    #[error("Missing required element: {0}")]
    MissingElement(String),
}

impl KmlError {
    /// Crée une erreur d'encodage avec contexte
    pub fn encoding(reason: impl Into<String>) -> Self {
        Self::Encoding(reason.into())
    }

    /// Crée une erreur d'élément manquant
    pub fn missing(element: impl Into<String>) -> Self {
        Self::MissingElement(element.into())
    }
}
