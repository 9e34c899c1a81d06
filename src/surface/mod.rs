//! The 2D drawing surface consumed by the stage renderer and the demos.
//!
//! [`DrawingSurface`] mirrors an immediate-mode canvas: fill, stroke, font,
//! alignment and global alpha are sticky state that persists until changed,
//! so every drawing routine sets what it depends on before drawing.
//!
//! Two implementations ship with the crate:
//! - [`RecordingSurface`]: flattens every call into a [`DrawOp`] list
//! - [`SvgSurface`]: builds an SVG document for the command-line host

pub mod color;
pub mod recording;
pub mod shapes;
pub mod svg;

pub use color::{Color, LinearGradient, Paint};
pub use recording::{DrawOp, RecordingSurface};
pub use svg::SvgSurface;

/// Typeface family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontFamily {
    /// Proportional sans-serif.
    #[default]
    Sans,
    /// Fixed-width.
    Monospace,
}

/// Text font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    /// Pixel size.
    pub size: f64,
    /// Bold weight.
    pub bold: bool,
    /// Family.
    pub family: FontFamily,
}

impl Font {
    /// Regular sans-serif font at `size` pixels.
    pub const fn new(size: f64) -> Self {
        Self {
            size,
            bold: false,
            family: FontFamily::Sans,
        }
    }

    /// Bold sans-serif font at `size` pixels.
    pub const fn bold(size: f64) -> Self {
        Self {
            size,
            bold: true,
            family: FontFamily::Sans,
        }
    }

    /// Regular monospace font at `size` pixels.
    pub const fn mono(size: f64) -> Self {
        Self {
            size,
            bold: false,
            family: FontFamily::Monospace,
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Font::new(10.0)
    }
}

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Text starts at x.
    #[default]
    Left,
    /// Text is centred on x.
    Center,
    /// Text ends at x.
    Right,
}

/// Vertical text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    /// y is the alphabetic baseline.
    #[default]
    Alphabetic,
    /// y is the vertical middle of the text.
    Middle,
}

/// An immediate-mode 2D drawing surface.
pub trait DrawingSurface {
    /// Current width in pixels.
    fn width(&self) -> f64;

    /// Current height in pixels.
    fn height(&self) -> f64;

    /// Change the pixel dimensions. Content is discarded.
    fn resize(&mut self, width: f64, height: f64);

    /// Clear a rectangular region.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Set the paint used by fills and text.
    fn set_fill(&mut self, paint: Paint);

    /// Set the stroke colour.
    fn set_stroke(&mut self, color: Color);

    /// Set the stroke width.
    fn set_line_width(&mut self, width: f64);

    /// Set the text font.
    fn set_font(&mut self, font: Font);

    /// Set the horizontal text anchor.
    fn set_text_align(&mut self, align: TextAlign);

    /// Set the vertical text anchor.
    fn set_text_baseline(&mut self, baseline: TextBaseline);

    /// Set the opacity applied to everything drawn afterwards.
    fn set_global_alpha(&mut self, alpha: f64);

    /// Current global opacity.
    fn global_alpha(&self) -> f64;

    /// Fill a rectangle with the current paint.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Outline a rectangle with the current stroke.
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Start a new path.
    fn begin_path(&mut self);

    /// Move the pen without drawing.
    fn move_to(&mut self, x: f64, y: f64);

    /// Add a straight segment.
    fn line_to(&mut self, x: f64, y: f64);

    /// Add a circular arc, angles in radians, clockwise in screen space.
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64);

    /// Close the current sub-path.
    fn close_path(&mut self);

    /// Fill the current path.
    fn fill(&mut self);

    /// Stroke the current path.
    fn stroke(&mut self);

    /// Draw text with the current font, paint and anchors.
    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    /// Create a linear gradient for use with [`set_fill`](Self::set_fill).
    fn create_linear_gradient(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> LinearGradient {
        LinearGradient::new(x0, y0, x1, y1)
    }

    /// Clear the whole surface.
    fn clear(&mut self) {
        let (width, height) = (self.width(), self.height());
        self.clear_rect(0.0, 0.0, width, height);
    }
}
