//! Sequencing of one export: rasterize, place, assemble, save

use super::{
    DocumentAssembler, ExportError, GlyphRasterizer, PageSetup, PdfAssembler, Placement,
    RasterOptions, Rasterizer,
};
use ratatui::buffer::Buffer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Name the exported document is always saved under
pub const EXPORT_FILE_NAME: &str = "prescription.pdf";

/// Summary of a successful export
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub byte_count: usize,
    pub page_count: usize,
    pub image_count: usize,
    pub placement: Placement,
}

/// Runs exports against a pair of collaborators
pub struct ExportPipeline {
    rasterizer: Arc<dyn Rasterizer>,
    assembler: Arc<dyn DocumentAssembler>,
    output_dir: PathBuf,
    page: PageSetup,
    raster: RasterOptions,
}

impl ExportPipeline {
    pub fn new(
        rasterizer: Arc<dyn Rasterizer>,
        assembler: Arc<dyn DocumentAssembler>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            rasterizer,
            assembler,
            output_dir: output_dir.into(),
            page: PageSetup::default(),
            raster: RasterOptions::default(),
        }
    }

    /// Bitmap-font rasterizer and printpdf assembler writing into `output_dir`
    pub fn with_defaults(output_dir: impl Into<PathBuf>) -> Self {
        Self::new(
            Arc::new(GlyphRasterizer),
            Arc::new(PdfAssembler::default()),
            output_dir,
        )
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(EXPORT_FILE_NAME)
    }

    /// Export a captured print surface
    pub async fn export(&self, surface: Buffer) -> Result<ExportOutcome, ExportError> {
        debug!(
            "Rasterizing print surface {}x{} cells",
            surface.area.width, surface.area.height
        );
        let image = self.rasterizer.rasterize(&surface, self.raster).await?;

        let page = self.assembler.page_size(self.page);
        let placement = Placement::fit(page, image.width(), image.height())?;
        debug!(
            "Placing {}x{} px image at ({:.1}, {:.1}) mm, {:.1}x{:.1} mm",
            image.width(),
            image.height(),
            placement.x,
            placement.y,
            placement.width,
            placement.height
        );

        let document = self.assembler.assemble(self.page, &image, placement).await?;

        let path = self.output_path();
        save(&path, &document.bytes).await?;
        info!("Saved prescription to {}", path.display());

        Ok(ExportOutcome {
            path,
            byte_count: document.bytes.len(),
            page_count: document.page_count,
            image_count: document.image_count,
            placement,
        })
    }
}

async fn save(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let to_error = |source: std::io::Error| ExportError::Save {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(to_error)?;
    }
    tokio::fs::write(path, bytes).await.map_err(to_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{AssembledDocument, MockDocumentAssembler, MockRasterizer, PageSize};
    use image::{Rgb, RgbImage};
    use ratatui::layout::Rect;

    fn surface() -> Buffer {
        Buffer::empty(Rect::new(0, 0, 10, 4))
    }

    fn a4_assembler() -> MockDocumentAssembler {
        let mut assembler = MockDocumentAssembler::new();
        assembler.expect_page_size().returning(|_| PageSize {
            width: 210.0,
            height: 297.0,
        });
        assembler
    }

    #[tokio::test]
    async fn test_export_writes_fixed_file_name() {
        let dir = tempfile::tempdir().unwrap();

        let mut rasterizer = MockRasterizer::new();
        rasterizer
            .expect_rasterize()
            .withf(|_, options| options.scale == 3 && options.background == Rgb([255, 255, 255]))
            .times(1)
            .returning(|_, _| Ok(RgbImage::new(300, 600)));

        let mut assembler = a4_assembler();
        assembler
            .expect_assemble()
            .times(1)
            .returning(|_, _, _| {
                Ok(AssembledDocument {
                    bytes: b"%PDF-1.3 stub".to_vec(),
                    page_count: 1,
                    image_count: 1,
                })
            });

        let pipeline = ExportPipeline::new(Arc::new(rasterizer), Arc::new(assembler), dir.path());
        let outcome = pipeline.export(surface()).await.unwrap();

        assert_eq!(outcome.path, dir.path().join("prescription.pdf"));
        assert_eq!(outcome.page_count, 1);
        assert_eq!(outcome.image_count, 1);
        assert_eq!(outcome.byte_count, 13);
        assert_eq!(
            std::fs::read(dir.path().join(EXPORT_FILE_NAME)).unwrap(),
            b"%PDF-1.3 stub"
        );
    }

    #[tokio::test]
    async fn test_export_passes_fitted_placement_to_assembler() {
        let dir = tempfile::tempdir().unwrap();

        let mut rasterizer = MockRasterizer::new();
        rasterizer
            .expect_rasterize()
            .returning(|_, _| Ok(RgbImage::new(1900, 950)));

        let mut assembler = a4_assembler();
        assembler
            .expect_assemble()
            .withf(|_, image, placement| {
                image.width() == 1900
                    && (placement.width - 190.0).abs() < 1e-3
                    && (placement.height - 95.0).abs() < 1e-3
                    && (placement.x - 10.0).abs() < 1e-3
                    && (placement.y - 10.0).abs() < 1e-3
            })
            .returning(|_, _, _| {
                Ok(AssembledDocument {
                    bytes: vec![0; 4],
                    page_count: 1,
                    image_count: 1,
                })
            });

        let pipeline = ExportPipeline::new(Arc::new(rasterizer), Arc::new(assembler), dir.path());
        tokio_test::assert_ok!(pipeline.export(surface()).await);
    }

    #[tokio::test]
    async fn test_raster_failure_skips_assembly_and_save() {
        let dir = tempfile::tempdir().unwrap();

        let mut rasterizer = MockRasterizer::new();
        rasterizer
            .expect_rasterize()
            .returning(|_, _| Err(ExportError::Raster("unsupported content".into())));

        let mut assembler = MockDocumentAssembler::new();
        assembler.expect_page_size().never();
        assembler.expect_assemble().never();

        let pipeline = ExportPipeline::new(Arc::new(rasterizer), Arc::new(assembler), dir.path());
        let err = pipeline.export(surface()).await.unwrap_err();

        assert!(matches!(err, ExportError::Raster(_)));
        assert!(!dir.path().join(EXPORT_FILE_NAME).exists());
    }

    #[tokio::test]
    async fn test_empty_bitmap_is_reported() {
        let dir = tempfile::tempdir().unwrap();

        let mut rasterizer = MockRasterizer::new();
        rasterizer
            .expect_rasterize()
            .returning(|_, _| Ok(RgbImage::new(0, 0)));
        let mut assembler = a4_assembler();
        assembler.expect_assemble().never();

        let pipeline = ExportPipeline::new(Arc::new(rasterizer), Arc::new(assembler), dir.path());
        let err = pipeline.export(surface()).await.unwrap_err();
        assert!(matches!(err, ExportError::EmptyImage));
    }

    #[tokio::test]
    async fn test_save_failure_names_target() {
        let dir = tempfile::tempdir().unwrap();
        // A plain file where the output directory should be
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();

        let mut rasterizer = MockRasterizer::new();
        rasterizer
            .expect_rasterize()
            .returning(|_, _| Ok(RgbImage::new(10, 10)));
        let mut assembler = a4_assembler();
        assembler.expect_assemble().returning(|_, _, _| {
            Ok(AssembledDocument {
                bytes: vec![1, 2, 3],
                page_count: 1,
                image_count: 1,
            })
        });

        let pipeline = ExportPipeline::new(Arc::new(rasterizer), Arc::new(assembler), &blocker);
        let err = pipeline.export(surface()).await.unwrap_err();

        match err {
            ExportError::Save { path, .. } => assert_eq!(path, blocker.join(EXPORT_FILE_NAME)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_output_path_uses_fixed_name() {
        let pipeline = ExportPipeline::with_defaults("/tmp/rx");
        assert_eq!(
            pipeline.output_path(),
            PathBuf::from("/tmp/rx/prescription.pdf")
        );
    }
}
