//! Composite shapes shared by the stage renderer and the demos.

use std::f64::consts::PI;

use super::{Color, DrawingSurface};

/// Arrow styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowStyle {
    /// Line and head colour.
    pub color: Color,
    /// Shaft width.
    pub line_width: f64,
    /// Length of the head's sides.
    pub head_length: f64,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            color: Color::BLUE,
            line_width: 2.0,
            head_length: 10.0,
        }
    }
}

/// Draw a straight arrow from `from` to `to` with a filled triangular head.
pub fn draw_arrow<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    from: (f64, f64),
    to: (f64, f64),
    style: ArrowStyle,
) {
    let angle = (to.1 - from.1).atan2(to.0 - from.0);

    surface.set_stroke(style.color);
    surface.set_fill(style.color.into());
    surface.set_line_width(style.line_width);

    surface.begin_path();
    surface.move_to(from.0, from.1);
    surface.line_to(to.0, to.1);
    surface.stroke();

    surface.begin_path();
    surface.move_to(to.0, to.1);
    surface.line_to(
        to.0 - style.head_length * (angle - PI / 6.0).cos(),
        to.1 - style.head_length * (angle - PI / 6.0).sin(),
    );
    surface.line_to(
        to.0 - style.head_length * (angle + PI / 6.0).cos(),
        to.1 - style.head_length * (angle + PI / 6.0).sin(),
    );
    surface.close_path();
    surface.fill();
}

/// Fill and outline a grid cell; the cell is inset by a 2px gutter.
pub fn draw_cell<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    x: f64,
    y: f64,
    size: f64,
    fill: Color,
    border: Color,
) {
    surface.set_fill(fill.into());
    surface.fill_rect(x, y, size - 2.0, size - 2.0);
    surface.set_stroke(border);
    surface.stroke_rect(x, y, size - 2.0, size - 2.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};

    #[test]
    fn test_arrow_is_shaft_plus_head() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        draw_arrow(&mut surface, (0.0, 0.0), (50.0, 0.0), ArrowStyle::default());

        let ops = surface.ops();
        assert_eq!(ops.len(), 2);
        assert!(matches!(ops[0], DrawOp::StrokePath { .. }));
        assert!(matches!(ops[1], DrawOp::FillPath { .. }));
    }
}
