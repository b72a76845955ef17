//! Export of the print view to a single-page PDF
//!
//! Rasterization and document assembly sit behind the [`Rasterizer`] and
//! [`DocumentAssembler`] traits; [`ExportPipeline`] sequences them, computes
//! the page placement and writes the file.

mod document;
mod pipeline;
mod placement;
mod raster;

pub use document::PdfAssembler;
pub use pipeline::{ExportOutcome, ExportPipeline, EXPORT_FILE_NAME};
pub use placement::{PageSetup, PageSize, Placement};
pub use raster::{GlyphRasterizer, RasterOptions};

use async_trait::async_trait;
use image::RgbImage;
use ratatui::buffer::Buffer;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from scheduling or running an export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("an export is already in progress")]
    AlreadyRunning,
    #[error("print view has not been rendered yet")]
    RenderNotReady,
    #[error("rasterization failed: {0}")]
    Raster(String),
    #[error("captured image is empty")]
    EmptyImage,
    #[error("document assembly failed: {0}")]
    Document(String),
    #[error("failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("export task failed: {0}")]
    Task(String),
}

impl ExportError {
    /// True when the export ran and broke, as opposed to being refused up front
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::AlreadyRunning | Self::RenderNotReady)
    }
}

/// A finished single-page document
#[derive(Debug, Clone)]
pub struct AssembledDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub image_count: usize,
}

/// Turns a rendered print surface into a bitmap
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(
        &self,
        surface: &Buffer,
        options: RasterOptions,
    ) -> Result<RgbImage, ExportError>;
}

/// Builds the output document around a bitmap
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentAssembler: Send + Sync {
    /// Page dimensions in millimetres for the given setup
    fn page_size(&self, setup: PageSetup) -> PageSize;

    /// Create a one-page document with `image` drawn at `placement`
    async fn assemble(
        &self,
        setup: PageSetup,
        image: &RgbImage,
        placement: Placement,
    ) -> Result<AssembledDocument, ExportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refusals_are_not_failures() {
        assert!(!ExportError::AlreadyRunning.is_failure());
        assert!(!ExportError::RenderNotReady.is_failure());
        assert!(ExportError::Raster("boom".into()).is_failure());
        assert!(ExportError::EmptyImage.is_failure());
        assert!(ExportError::Task("cancelled".into()).is_failure());
    }

    #[test]
    fn test_save_error_names_path() {
        let err = ExportError::Save {
            path: PathBuf::from("/tmp/out/prescription.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "failed to save /tmp/out/prescription.pdf: denied"
        );
    }
}
