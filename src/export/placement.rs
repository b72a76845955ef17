//! Page geometry and the fit-to-page calculation for the captured image
//!
//! All lengths are millimetres. The image keeps its aspect ratio, is centred
//! horizontally and hangs from a fixed top margin.

use super::ExportError;

/// Margin kept on every side of the page
pub const PAGE_MARGIN: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageFormat {
    #[default]
    A4,
}

impl PageFormat {
    /// Portrait width and height in millimetres
    fn portrait_mm(self) -> (f32, f32) {
        match self {
            Self::A4 => (210.0, 297.0),
        }
    }
}

/// Requested page of the output document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageSetup {
    pub orientation: Orientation,
    pub format: PageFormat,
}

impl PageSetup {
    pub fn size(self) -> PageSize {
        let (short, long) = self.format.portrait_mm();
        match self.orientation {
            Orientation::Portrait => PageSize {
                width: short,
                height: long,
            },
            Orientation::Landscape => PageSize {
                width: long,
                height: short,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

/// Where the image lands on the page, measured from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Placement {
    /// Fit an image of `image_width` x `image_height` pixels onto `page`
    pub fn fit(page: PageSize, image_width: u32, image_height: u32) -> Result<Self, ExportError> {
        if image_width == 0 || image_height == 0 {
            return Err(ExportError::EmptyImage);
        }

        let available_width = page.width - 2.0 * PAGE_MARGIN;
        let available_height = page.height - 2.0 * PAGE_MARGIN;
        let ratio = image_width as f32 / image_height as f32;

        let mut width = available_width;
        let mut height = width / ratio;
        if height > available_height {
            height = available_height;
            width = height * ratio;
        }

        Ok(Self {
            x: (page.width - width) / 2.0,
            y: PAGE_MARGIN,
            width,
            height,
        })
    }
}
