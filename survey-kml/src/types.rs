//! Types de données pour le crate survey-kml

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use geo::{LineString, Point};

/// Résultat d'une passe d'extraction sur un export KML
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Champs de la parcelle, normalisés (jamais de clé manquante)
    pub fields: FieldSet,

    /// Coordonnée représentative et sa provenance
    pub coordinate: CoordinateResult,

    /// Anneau extérieur brut (lng, lat), vide si absent ou illisible
    pub ring: LineString<f64>,
}

/// Champ canonique d'une parcelle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    PlotNumber,
    PlotArea,
    Location,
    Municipality,
    Area,
    SheetPlan,
    RegistrationNo,
    PropertyType,
    Zone,
    ZoneDescription,
    BuildingCoefficient,
    Coverage,
    Floors,
    Height,
    Value2018,
    Value2021,
}

impl Field {
    /// Tous les champs, dans l'ordre d'affichage du rapport
    pub const ALL: [Field; 16] = [
        Field::PlotNumber,
        Field::PlotArea,
        Field::Location,
        Field::Municipality,
        Field::Area,
        Field::SheetPlan,
        Field::RegistrationNo,
        Field::PropertyType,
        Field::Zone,
        Field::ZoneDescription,
        Field::BuildingCoefficient,
        Field::Coverage,
        Field::Floors,
        Field::Height,
        Field::Value2018,
        Field::Value2021,
    ];

    /// Nom canonique (utilisé dans la configuration et les exports JSON)
    pub fn name(self) -> &'static str {
        match self {
            Field::PlotNumber => "PlotNumber",
            Field::PlotArea => "PlotArea",
            Field::Location => "Location",
            Field::Municipality => "Municipality",
            Field::Area => "Area",
            Field::SheetPlan => "SheetPlan",
            Field::RegistrationNo => "RegistrationNo",
            Field::PropertyType => "PropertyType",
            Field::Zone => "Zone",
            Field::ZoneDescription => "ZoneDescription",
            Field::BuildingCoefficient => "BuildingCoefficient",
            Field::Coverage => "Coverage",
            Field::Floors => "Floors",
            Field::Height => "Height",
            Field::Value2018 => "Value2018",
            Field::Value2021 => "Value2021",
        }
    }

    /// Intitulé affiché dans le rapport
    pub fn title(self) -> &'static str {
        match self {
            Field::PlotNumber => "Plot Number",
            Field::PlotArea => "Plot Area",
            Field::Location => "Location",
            Field::Municipality => "Municipality",
            Field::Area => "Area",
            Field::SheetPlan => "Sheet/Plan",
            Field::RegistrationNo => "Registration No",
            Field::PropertyType => "Property Type",
            Field::Zone => "Zone",
            Field::ZoneDescription => "Zone Description",
            Field::BuildingCoefficient => "Building Coefficient",
            Field::Coverage => "Coverage",
            Field::Floors => "Floors",
            Field::Height => "Height",
            Field::Value2018 => "Value 2018",
            Field::Value2021 => "Value 2021",
        }
    }

    /// Libellé source (grec) dans la description du placemark
    ///
    /// `None` pour le numéro de parcelle, qui vient du nom du `Document`.
    pub fn source_label(self) -> Option<&'static str> {
        match self {
            Field::PlotNumber => None,
            // Même source que Area / Municipality
            Field::PlotArea | Field::Area => Some("Εμβαδό"),
            Field::Location | Field::Municipality => Some("Δήμος"),
            Field::SheetPlan => Some("Αρ. Φ/Σχ"),
            Field::RegistrationNo => Some("Αριθμός εγγραφης"),
            Field::PropertyType => Some("Ειδος Ακινήτου"),
            Field::Zone => Some("Ζώνη"),
            Field::ZoneDescription => Some("Ζωνη Περιγραφή"),
            Field::BuildingCoefficient => Some("Δόμηση"),
            Field::Coverage => Some("Κάλυψη"),
            Field::Floors => Some("Ορόφοι"),
            Field::Height => Some("Υψος"),
            Field::Value2018 => Some("Αξία 2018"),
            Field::Value2021 => Some("Αξία 2021"),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown field: {}", s))
    }
}

/// Jeu de champs extraits : chaque `Field` a toujours une valeur (vide si absente)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    values: BTreeMap<Field, String>,
}

impl Default for FieldSet {
    fn default() -> Self {
        Self {
            values: Field::ALL
                .into_iter()
                .map(|field| (field, String::new()))
                .collect(),
        }
    }
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Valeur d'un champ (chaîne vide si non extrait)
    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }

    /// Nombre de champs non vides
    pub fn filled(&self) -> usize {
        self.values.values().filter(|v| !v.is_empty()).count()
    }
}

/// Stratégie ayant produit la coordonnée représentative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceTier {
    /// `LookAt` du placemark de premier niveau
    PrimaryViewpoint,
    /// `LookAt` du premier placemark du premier dossier
    FolderViewpoint,
    /// Moyenne arithmétique des sommets de l'anneau extérieur
    PolygonCentroid,
    /// Aucune stratégie n'a abouti
    None,
}

impl SourceTier {
    pub fn name(self) -> &'static str {
        match self {
            SourceTier::PrimaryViewpoint => "PrimaryViewpoint",
            SourceTier::FolderViewpoint => "FolderViewpoint",
            SourceTier::PolygonCentroid => "PolygonCentroid",
            SourceTier::None => "None",
        }
    }
}

impl fmt::Display for SourceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Coordonnée représentative de la parcelle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateResult {
    /// Point (x = longitude, y = latitude), absent si aucune stratégie n'a abouti
    pub point: Option<Point<f64>>,

    /// 1 pour un point de vue, nombre de sommets pour un centroïde
    pub vertex_count: usize,

    /// Stratégie gagnante
    pub source_tier: SourceTier,
}

impl CoordinateResult {
    /// Résultat vide : toutes les stratégies épuisées
    pub fn unavailable() -> Self {
        Self {
            point: None,
            vertex_count: 0,
            source_tier: SourceTier::None,
        }
    }

    /// Format `"lat, lng"` à 6 décimales, chaîne vide si indisponible
    pub fn display(&self) -> String {
        self.point
            .map(|p| format!("{:.6}, {:.6}", p.y(), p.x()))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_set_has_every_key() {
        let fields = FieldSet::new();
        assert_eq!(fields.iter().count(), Field::ALL.len());
        assert!(fields.iter().all(|(_, v)| v.is_empty()));
        assert_eq!(fields.filled(), 0);
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("Floors".parse::<Field>(), Ok(Field::Floors));
        assert_eq!("value2018".parse::<Field>(), Ok(Field::Value2018));
        assert!("Nope".parse::<Field>().is_err());
    }

    #[test]
    fn test_coordinate_display() {
        let result = CoordinateResult {
            point: Some(Point::new(33.05, 35.05)),
            vertex_count: 4,
            source_tier: SourceTier::PolygonCentroid,
        };
        assert_eq!(result.display(), "35.050000, 33.050000");
        assert_eq!(CoordinateResult::unavailable().display(), "");
    }
}
