//! Session d'upload : un seul export KML courant, remplacé à chaque upload
//!
//! Le cache d'aperçus (image par libellé) appartient à la session et est
//! vidé dès que l'upload courant change.

use std::collections::HashMap;

use survey_kml::{extract_document_with, Extraction, KmlError, LabelSet};
use thiserror::Error;
use tracing::{debug, info};

use crate::bundle::ReportBundle;
use crate::render::{render_plot, RasterImage};

/// Libellé de l'aperçu du polygone dans le cache
pub const PLOT_DIAGRAM: &str = "Plot Diagram";

/// Images d'aperçu, par libellé
pub type PreviewCache = HashMap<String, RasterImage>;

/// Rejet d'un upload
#[derive(Debug, Error)]
pub enum UploadError {
    /// Extension autre que `.kml`
    #[error("Please upload a valid .kml file (got '{0}')")]
    NotKml(String),

    /// Document mal formé : l'utilisateur doit fournir un autre fichier
    #[error("Failed to parse KML file. Please upload a valid KML file: {0}")]
    Parse(#[from] KmlError),
}

/// Export KML accepté et extrait
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub checksum: String,
    pub extraction: Extraction,
}

/// Session de travail : upload courant et cache d'aperçus
#[derive(Debug)]
pub struct Session {
    labels: LabelSet,
    render_plot: bool,
    current: Option<Upload>,
    previews: PreviewCache,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(LabelSet::default(), true)
    }
}

impl Session {
    pub fn new(labels: LabelSet, render_plot: bool) -> Self {
        Self {
            labels,
            render_plot,
            current: None,
            previews: PreviewCache::new(),
        }
    }

    pub fn current(&self) -> Option<&Upload> {
        self.current.as_ref()
    }

    pub fn previews(&self) -> &PreviewCache {
        &self.previews
    }

    /// Charge un nouvel upload, qui remplace le précédent
    ///
    /// Un fichier identique (même checksum) réutilise le résultat courant.
    /// En cas d'échec de parsing, l'upload courant est vidé : aucun résultat
    /// partiel ne subsiste.
    pub fn load(&mut self, file_name: &str, data: &[u8]) -> Result<&Upload, UploadError> {
        if !is_kml_file_name(file_name) {
            return Err(UploadError::NotKml(file_name.to_string()));
        }

        let checksum = compute_checksum(data);

        if let Some(mut upload) = self.current.take().filter(|u| u.checksum == checksum) {
            debug!(file = file_name, checksum = %checksum, "Upload unchanged, reusing extraction");
            upload.file_name = file_name.to_string();
            let upload: &Upload = self.current.insert(upload);
            return Ok(upload);
        }

        self.previews.clear();
        let extraction = extract_document_with(data, &self.labels)?;

        info!(
            file = file_name,
            plot = extraction.fields.get(survey_kml::Field::PlotNumber),
            tier = %extraction.coordinate.source_tier,
            "Upload loaded"
        );

        let upload: &Upload = self.current.insert(Upload {
            file_name: file_name.to_string(),
            checksum,
            extraction,
        });
        Ok(upload)
    }

    /// Prépare les données du rapport pour l'upload courant
    ///
    /// L'aperçu du polygone est rendu au plus une fois par upload puis
    /// servi depuis le cache. Moins de 3 sommets : pas d'image.
    pub async fn export(&mut self) -> Option<ReportBundle> {
        let upload = self.current.as_ref()?;

        let cached = self.previews.get(PLOT_DIAGRAM).cloned();
        let plot_image = match cached {
            Some(image) => Some(image),
            None if self.render_plot => match survey_kml::project(&upload.extraction.ring) {
                Some(polygon) => {
                    let image = render_plot(&polygon).await;
                    if let Some(ref image) = image {
                        self.previews.insert(PLOT_DIAGRAM.to_string(), image.clone());
                    }
                    image
                }
                None => {
                    debug!(
                        vertices = upload.extraction.ring.0.len(),
                        "Not enough vertices for plot diagram"
                    );
                    None
                }
            },
            None => None,
        };

        Some(ReportBundle::from_upload(upload, plot_image))
    }
}

/// Seuls les fichiers `.kml` sont acceptés
pub fn is_kml_file_name(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".kml")
}

/// Checksum blake3 (hex) d'un contenu
pub fn compute_checksum(data: &[u8]) -> String {
    hex::encode(blake3::hash(data).as_bytes())
}
