//! Single-page PDF assembly via `printpdf`

use super::{AssembledDocument, DocumentAssembler, ExportError, PageSetup, PageSize, Placement};
use async_trait::async_trait;
use image::{DynamicImage, RgbImage};
use printpdf::{Image, ImageTransform, Mm, PdfDocument};
use std::io::BufWriter;

/// Resolution the image is nominally embedded at before scaling to its box
const IMAGE_DPI: f32 = 300.0;
const MM_PER_INCH: f32 = 25.4;

/// Assembler producing an image-only PDF with one page
#[derive(Debug, Clone)]
pub struct PdfAssembler {
    title: String,
}

impl PdfAssembler {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Default for PdfAssembler {
    fn default() -> Self {
        Self::new("Prescription")
    }
}

#[async_trait]
impl DocumentAssembler for PdfAssembler {
    fn page_size(&self, setup: PageSetup) -> PageSize {
        setup.size()
    }

    async fn assemble(
        &self,
        setup: PageSetup,
        image: &RgbImage,
        placement: Placement,
    ) -> Result<AssembledDocument, ExportError> {
        let title = self.title.clone();
        let image = image.clone();
        tokio::task::spawn_blocking(move || build_pdf(&title, setup, image, placement))
            .await
            .map_err(|e| ExportError::Task(e.to_string()))?
    }
}

/// Build the PDF bytes for one page holding `image` at `placement`
fn build_pdf(
    title: &str,
    setup: PageSetup,
    image: RgbImage,
    placement: Placement,
) -> Result<AssembledDocument, ExportError> {
    let page = setup.size();
    let (px_width, px_height) = image.dimensions();
    if px_width == 0 || px_height == 0 {
        return Err(ExportError::EmptyImage);
    }

    let (doc, page1, layer1) = PdfDocument::new(title, Mm(page.width), Mm(page.height), "Layer 1");
    let layer = doc.get_page(page1).get_layer(layer1);

    // Natural size at IMAGE_DPI, then scaled into the placement box
    let natural_width = px_width as f32 / IMAGE_DPI * MM_PER_INCH;
    let natural_height = px_height as f32 / IMAGE_DPI * MM_PER_INCH;

    let pdf_image = Image::from_dynamic_image(&DynamicImage::ImageRgb8(image));
    pdf_image.add_to_layer(
        layer,
        ImageTransform {
            translate_x: Some(Mm(placement.x)),
            // PDF origin is bottom-left
            translate_y: Some(Mm(page.height - placement.y - placement.height)),
            scale_x: Some(placement.width / natural_width),
            scale_y: Some(placement.height / natural_height),
            dpi: Some(IMAGE_DPI),
            ..Default::default()
        },
    );

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ExportError::Document(format!("PDF save error: {e}")))?;
    let bytes = buf
        .into_inner()
        .map_err(|e| ExportError::Document(format!("PDF buffer error: {e}")))?;

    Ok(AssembledDocument {
        bytes,
        page_count: 1,
        image_count: 1,
    })
}
