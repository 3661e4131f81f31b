//! Rendu du polygone de la parcelle en image raster
//!
//! Le dessin SVG est synchrone ; la rasterisation tourne sur un thread
//! bloquant dont on attend la complétion. Tout échec est absorbé : l'image
//! est simplement omise du rapport.

pub mod raster;
pub mod svg;

use survey_kml::ProjectedPolygon;
use thiserror::Error;
use tracing::{debug, warn};

/// Échec du dessin ou de la rasterisation
#[derive(Debug, Error)]
pub enum RenderError {
    /// SVG non interprétable par usvg
    #[error("SVG parse error: {0}")]
    Svg(#[from] resvg::usvg::Error),

    /// Allocation du bitmap impossible
    #[error("Failed to create pixmap")]
    Pixmap,

    /// Encodage PNG
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}

/// Bitmap PNG prêt à être intégré dans le rapport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl RasterImage {
    pub fn new(png: Vec<u8>, width: u32, height: u32) -> Self {
        Self { png, width, height }
    }

    pub fn as_png(&self) -> &[u8] {
        &self.png
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Dessine et rasterise le polygone projeté
///
/// Retourne `None` (avec un warning) en cas d'échec ; n'interrompt jamais
/// la génération du rapport.
pub async fn render_plot(polygon: &ProjectedPolygon) -> Option<RasterImage> {
    let image = render_svg(svg::plot_svg(polygon)).await?;
    debug!(vertices = polygon.len(), bytes = image.as_png().len(), "Plot rendered");
    Some(image)
}

/// Rasterise un SVG sur un thread bloquant ; tout échec donne `None`
pub async fn render_svg(svg: String) -> Option<RasterImage> {
    match tokio::task::spawn_blocking(move || raster::rasterize(&svg)).await {
        Ok(Ok(image)) => Some(image),
        Ok(Err(e)) => {
            warn!(error = %e, "Plot rasterization failed, image omitted");
            None
        }
        Err(e) => {
            warn!(error = %e, "Rasterization task failed, image omitted");
            None
        }
    }
}
