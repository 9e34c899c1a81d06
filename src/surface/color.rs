//! RGB colours and linear gradients.

use std::fmt;

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Slate text colour used for titles and labels.
    pub const INK: Color = Color::hex(0x1e293b);
    /// Muted text colour.
    pub const MUTED: Color = Color::hex(0x64748b);
    /// Light border colour.
    pub const BORDER: Color = Color::hex(0xcbd5e1);
    /// Neutral grey.
    pub const SLATE: Color = Color::hex(0x94a3b8);
    /// Empty bar track.
    pub const TRACK: Color = Color::hex(0xe2e8f0);
    /// Highlight amber.
    pub const AMBER: Color = Color::hex(0xf59e0b);
    /// Accent blue.
    pub const BLUE: Color = Color::hex(0x3b82f6);
    /// Dark accent blue.
    pub const BLUE_DARK: Color = Color::hex(0x2563eb);
    /// Positive green.
    pub const GREEN: Color = Color::hex(0x10b981);
    /// Dark positive green.
    pub const GREEN_DARK: Color = Color::hex(0x059669);
    /// Negative red.
    pub const RED: Color = Color::hex(0xef4444);
    /// White.
    pub const WHITE: Color = Color::hex(0xffffff);

    /// Build a colour from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a colour from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    /// Grey with every channel at `level`.
    pub const fn grey(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    /// Shift every channel by `percent` of full scale, clamped to `0..=255`.
    ///
    /// Negative percentages darken.
    pub fn lighten(self, percent: i32) -> Self {
        let amount = (2.55 * percent as f64).round() as i32;
        let shift = |channel: u8| (channel as i32 + amount).clamp(0, 255) as u8;
        Self::rgb(shift(self.r), shift(self.g), shift(self.b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A two-point linear gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    /// Start point.
    pub start: (f64, f64),
    /// End point.
    pub end: (f64, f64),
    /// `(offset, colour)` stops, offsets in `[0, 1]`.
    pub stops: Vec<(f64, Color)>,
}

impl LinearGradient {
    /// Gradient from `(x0, y0)` to `(x1, y1)` with no stops.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            start: (x0, y0),
            end: (x1, y1),
            stops: Vec::new(),
        }
    }

    /// Add a colour stop.
    pub fn with_stop(mut self, offset: f64, color: Color) -> Self {
        self.stops.push((offset.clamp(0.0, 1.0), color));
        self
    }
}

/// What a fill uses.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// Flat colour.
    Solid(Color),
    /// Linear gradient.
    Linear(LinearGradient),
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

impl From<LinearGradient> for Paint {
    fn from(gradient: LinearGradient) -> Self {
        Paint::Linear(gradient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrips_through_display() {
        let color = Color::hex(0x3b82f6);
        assert_eq!(color, Color::rgb(0x3b, 0x82, 0xf6));
        assert_eq!(color.to_string(), "#3b82f6");
    }

    #[test]
    fn test_lighten_clamps() {
        assert_eq!(Color::hex(0xf0f0f0).lighten(30), Color::grey(255));
        assert_eq!(Color::hex(0x101010).lighten(-20), Color::grey(0));
        assert_eq!(Color::grey(100).lighten(4), Color::grey(110));
    }
}
