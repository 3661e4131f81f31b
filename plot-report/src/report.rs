//! Rapport d'export avec graceful degradation
//!
//! Un fichier illisible n'interrompt pas le lot : il est compté en échec et
//! les autres fichiers sont exportés normalement.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use crate::bundle::ReportBundle;

/// Statut global de l'export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExportStatus {
    /// Tous les fichiers exportés
    Success,
    /// Certains fichiers en échec
    PartialSuccess,
    /// Aucun fichier exporté
    Failed,
}

/// Fichier en échec
#[derive(Debug, Clone, Serialize)]
pub struct ExportError {
    pub file: String,
    pub message: String,
}

/// Fichier exporté avec dégradation (coordonnée ou image manquante)
#[derive(Debug, Clone, Serialize)]
pub struct ExportWarning {
    pub file: String,
    pub message: String,
}

/// Rapport complet d'export
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    /// Durée de l'export
    pub duration_secs: f64,
    /// Statut global
    pub status: ExportStatus,

    /// Fichiers traités (succès + échecs)
    pub files_processed: usize,
    /// Fichiers en échec
    pub files_failed: usize,
    /// Bundles sans coordonnée
    pub missing_coordinates: usize,
    /// Bundles sans image
    pub missing_images: usize,

    /// Nombre de bundles par stratégie de coordonnée
    pub by_tier: BTreeMap<String, usize>,

    pub errors: Vec<ExportError>,
    pub warnings: Vec<ExportWarning>,
}

impl Default for ExportReport {
    fn default() -> Self {
        Self {
            duration_secs: 0.0,
            status: ExportStatus::Success,
            files_processed: 0,
            files_failed: 0,
            missing_coordinates: 0,
            missing_images: 0,
            by_tier: BTreeMap::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl ExportReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enregistre un bundle exporté
    pub fn record_bundle(&mut self, file: &str, bundle: &ReportBundle) {
        self.files_processed += 1;
        *self.by_tier.entry(bundle.coordinate_tier.clone()).or_default() += 1;

        if !bundle.has_coordinates() {
            self.missing_coordinates += 1;
            self.warnings.push(ExportWarning {
                file: file.to_string(),
                message: "No coordinates found".to_string(),
            });
        }
        if !bundle.has_image() {
            self.missing_images += 1;
            self.warnings.push(ExportWarning {
                file: file.to_string(),
                message: "Plot diagram omitted".to_string(),
            });
        }
    }

    /// Enregistre un fichier en échec
    pub fn record_failure(&mut self, file: &str, message: &str) {
        self.files_processed += 1;
        self.files_failed += 1;
        self.errors.push(ExportError {
            file: file.to_string(),
            message: message.to_string(),
        });
    }

    /// Définit la durée de l'export
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Nombre de bundles exportés
    pub fn files_exported(&self) -> usize {
        self.files_processed - self.files_failed
    }

    /// Détermine le statut final
    pub fn finalize(&mut self) {
        self.status = match (self.files_failed, self.files_exported()) {
            (0, _) => ExportStatus::Success,
            (_, 0) => ExportStatus::Failed,
            _ => ExportStatus::PartialSuccess,
        };
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("EXPORT REPORT");
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duration: {:.2}s", self.duration_secs);

        println!("\n--- SUMMARY ---");
        println!(
            "Files: {} processed, {} exported, {} failed",
            self.files_processed,
            self.files_exported(),
            self.files_failed
        );
        println!(
            "Degraded: {} without coordinates, {} without image",
            self.missing_coordinates, self.missing_images
        );

        if !self.by_tier.is_empty() {
            println!("\n--- BY COORDINATE SOURCE ---");
            for (tier, count) in &self.by_tier {
                println!("  {}: {}", tier, count);
            }
        }

        if !self.warnings.is_empty() {
            println!("\n--- WARNINGS ({}) ---", self.warnings.len());
            for w in self.warnings.iter().take(10) {
                println!("  [{}] {}", w.file, w.message);
            }
            if self.warnings.len() > 10 {
                println!("  ... and {} more", self.warnings.len() - 10);
            }
        }

        if !self.errors.is_empty() {
            println!("\n--- ERRORS ({}) ---", self.errors.len());
            for e in self.errors.iter().take(20) {
                println!("  [{}] {}", e.file, e.message);
            }
            if self.errors.len() > 20 {
                println!("  ... and {} more", self.errors.len() - 20);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{} exported, {} failed, {} without coordinates, {} without image",
            self.files_exported(),
            self.files_failed,
            self.missing_coordinates,
            self.missing_images
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(coordinates: &str, tier: &str) -> ReportBundle {
        ReportBundle {
            source_name: "plot.kml".to_string(),
            checksum: String::new(),
            fields: BTreeMap::new(),
            coordinates: coordinates.to_string(),
            point: None,
            coordinate_tier: tier.to_string(),
            vertex_count: 0,
            ring: Vec::new(),
            plot_image: None,
        }
    }

    #[test]
    fn test_export_report_default() {
        let report = ExportReport::default();
        assert_eq!(report.status, ExportStatus::Success);
        assert_eq!(report.files_processed, 0);
        assert!(report.by_tier.is_empty());
    }

    #[test]
    fn test_record_bundle() {
        let mut report = ExportReport::new();
        report.record_bundle("a.kml", &bundle("35.000000, 33.000000", "PrimaryViewpoint"));
        report.record_bundle("b.kml", &bundle("35.000000, 33.000000", "PrimaryViewpoint"));
        report.record_bundle("c.kml", &bundle("", "None"));

        assert_eq!(report.files_processed, 3);
        assert_eq!(report.by_tier.get("PrimaryViewpoint"), Some(&2));
        assert_eq!(report.by_tier.get("None"), Some(&1));
        assert_eq!(report.missing_coordinates, 1);
        assert_eq!(report.missing_images, 3);
        assert_eq!(report.warnings.len(), 4);
    }

    #[test]
    fn test_finalize_success() {
        let mut report = ExportReport::new();
        report.record_bundle("a.kml", &bundle("", "None"));
        report.finalize();

        assert_eq!(report.status, ExportStatus::Success);
    }

    #[test]
    fn test_finalize_partial_success() {
        let mut report = ExportReport::new();
        report.record_bundle("a.kml", &bundle("", "None"));
        report.record_failure("b.kml", "Failed to parse KML file");
        report.finalize();

        assert_eq!(report.status, ExportStatus::PartialSuccess);
        assert_eq!(report.files_exported(), 1);
    }

    #[test]
    fn test_finalize_failed() {
        let mut report = ExportReport::new();
        report.record_failure("b.kml", "Failed to parse KML file");
        report.finalize();

        assert_eq!(report.status, ExportStatus::Failed);
    }

    #[test]
    fn test_summary() {
        let mut report = ExportReport::new();
        report.record_bundle("a.kml", &bundle("35.0, 33.0", "PolygonCentroid"));
        report.record_failure("b.kml", "boom");

        assert_eq!(
            report.summary(),
            "1 exported, 1 failed, 0 without coordinates, 1 without image"
        );
    }
}
