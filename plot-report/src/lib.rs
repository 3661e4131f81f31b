//! # plot-report
//!
//! Préparation des rapports de parcelle à partir d'exports KML de levé.
//!
//! ## Features
//!
//! - Session d'upload (checksum blake3, cache d'aperçus)
//! - Rendu du contour de la parcelle en PNG 300×300 (resvg)
//! - Export des bundles en JSON, GeoJSON et PNG
//! - Rapport d'export avec graceful degradation
//! - CLI simple
//!
//! ## Usage CLI
//!
//! ```bash
//! # Champs et coordonnée d'un export
//! plot-report extract --path ./parcelle.kml
//!
//! # Aperçu du contour
//! plot-report render --path ./parcelle.kml --output ./parcelle.png
//!
//! # Export d'un dossier complet
//! plot-report export --path ./exports/ --output ./bundles/ --jobs 4
//! ```

pub mod bundle;
pub mod config;
pub mod export;
pub mod render;
pub mod report;
pub mod session;

pub use bundle::ReportBundle;
pub use config::Config;
pub use render::{render_plot, render_svg, RasterImage, RenderError};
pub use report::{ExportReport, ExportStatus};
pub use session::{PreviewCache, Session, Upload, UploadError, PLOT_DIAGRAM};
