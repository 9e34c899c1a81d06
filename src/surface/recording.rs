//! A surface that records resolved drawing operations.
//!
//! Each op carries the sticky state (paint, alpha, font) that was in effect
//! when it was issued, so tests can assert on what was drawn without a
//! rasteriser.

use super::{Color, DrawingSurface, Font, Paint, TextAlign, TextBaseline};

/// A path segment.
#[derive(Debug, Clone, PartialEq)]
pub enum PathCmd {
    /// Pen move.
    MoveTo(f64, f64),
    /// Straight segment.
    LineTo(f64, f64),
    /// Circular arc.
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        start: f64,
        end: f64,
    },
    /// Close sub-path.
    Close,
}

/// One resolved drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Region cleared.
    Clear {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Filled rectangle.
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        paint: Paint,
        alpha: f64,
    },
    /// Outlined rectangle.
    StrokeRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
        line_width: f64,
        alpha: f64,
    },
    /// Filled path.
    FillPath {
        path: Vec<PathCmd>,
        paint: Paint,
        alpha: f64,
    },
    /// Stroked path.
    StrokePath {
        path: Vec<PathCmd>,
        color: Color,
        line_width: f64,
        alpha: f64,
    },
    /// Text.
    Text {
        text: String,
        x: f64,
        y: f64,
        font: Font,
        align: TextAlign,
        baseline: TextBaseline,
        paint: Paint,
        alpha: f64,
    },
}

impl DrawOp {
    /// Opacity the op was drawn with; clears report `None`.
    pub fn alpha(&self) -> Option<f64> {
        match self {
            DrawOp::Clear { .. } => None,
            DrawOp::FillRect { alpha, .. }
            | DrawOp::StrokeRect { alpha, .. }
            | DrawOp::FillPath { alpha, .. }
            | DrawOp::StrokePath { alpha, .. }
            | DrawOp::Text { alpha, .. } => Some(*alpha),
        }
    }
}

/// Records every call as a [`DrawOp`].
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    fill: Paint,
    stroke: Color,
    line_width: f64,
    font: Font,
    align: TextAlign,
    baseline: TextBaseline,
    alpha: f64,
    path: Vec<PathCmd>,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    /// Create an empty surface of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            fill: Paint::Solid(Color::rgb(0, 0, 0)),
            stroke: Color::rgb(0, 0, 0),
            line_width: 1.0,
            font: Font::default(),
            align: TextAlign::default(),
            baseline: TextBaseline::default(),
            alpha: 1.0,
            path: Vec::new(),
            ops: Vec::new(),
        }
    }

    /// All recorded ops.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drain the recorded ops.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Number of full-surface clears, i.e. frames started.
    pub fn clear_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| {
                matches!(op, DrawOp::Clear { x, y, width, height }
                    if *x == 0.0 && *y == 0.0 && *width >= self.width && *height >= self.height)
            })
            .count()
    }

    /// Every string drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether `text` was drawn.
    pub fn drew_text(&self, text: &str) -> bool {
        self.texts().contains(&text)
    }

    /// Ops issued after the most recent full clear.
    pub fn last_frame(&self) -> &[DrawOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, DrawOp::Clear { .. }))
            .map_or(0, |idx| idx + 1);
        &self.ops[start..]
    }
}

impl DrawingSurface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::Clear {
            x,
            y,
            width,
            height,
        });
    }

    fn set_fill(&mut self, paint: Paint) {
        self.fill = paint;
    }

    fn set_stroke(&mut self, color: Color) {
        self.stroke = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.baseline = baseline;
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn global_alpha(&self) -> f64 {
        self.alpha
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
            paint: self.fill.clone(),
            alpha: self.alpha,
        });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::StrokeRect {
            x,
            y,
            width,
            height,
            color: self.stroke,
            line_width: self.line_width,
            alpha: self.alpha,
        });
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(PathCmd::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.push(PathCmd::LineTo(x, y));
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        self.path.push(PathCmd::Arc {
            cx,
            cy,
            radius,
            start,
            end,
        });
    }

    fn close_path(&mut self) {
        self.path.push(PathCmd::Close);
    }

    fn fill(&mut self) {
        self.ops.push(DrawOp::FillPath {
            path: self.path.clone(),
            paint: self.fill.clone(),
            alpha: self.alpha,
        });
    }

    fn stroke(&mut self) {
        self.ops.push(DrawOp::StrokePath {
            path: self.path.clone(),
            color: self.stroke,
            line_width: self.line_width,
            alpha: self.alpha,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            font: self.font,
            align: self.align,
            baseline: self.baseline,
            paint: self.fill.clone(),
            alpha: self.alpha,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ops_capture_sticky_state() {
        let mut surface = RecordingSurface::new(100.0, 50.0);
        surface.set_fill(Color::RED.into());
        surface.set_global_alpha(0.5);
        surface.fill_rect(1.0, 2.0, 3.0, 4.0);
        surface.fill_text("hi", 5.0, 6.0);

        assert_eq!(surface.ops().len(), 2);
        assert_eq!(surface.ops()[0].alpha(), Some(0.5));
        assert_eq!(surface.texts(), vec!["hi"]);
    }

    #[test]
    fn test_clear_count_ignores_partial_clears() {
        let mut surface = RecordingSurface::new(100.0, 50.0);
        surface.clear();
        surface.clear_rect(0.0, 0.0, 10.0, 10.0);
        surface.clear();
        assert_eq!(surface.clear_count(), 2);
    }

    #[test]
    fn test_last_frame_starts_after_clear() {
        let mut surface = RecordingSurface::new(100.0, 50.0);
        surface.fill_text("old", 0.0, 0.0);
        surface.clear();
        surface.fill_text("new", 0.0, 0.0);
        assert_eq!(surface.last_frame().len(), 1);
    }
}
