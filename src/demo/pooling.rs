//! 2x2 max pooling with stride 2 over a 4x4 feature map.

use super::{Demo, StepCounter, centered, label};
use crate::surface::shapes::{ArrowStyle, draw_arrow, draw_cell};
use crate::surface::{Color, DrawingSurface, Font, TextAlign};

pub const INPUT: [[u8; 4]; 4] = [
    [45, 128, 67, 200],
    [23, 255, 89, 134],
    [156, 78, 234, 123],
    [67, 190, 45, 178],
];

/// One step per pooling window.
pub const MAX_STEPS: u32 = 4;

const CANVAS_WIDTH: f64 = 600.0;
const CANVAS_HEIGHT: f64 = 300.0;
const CELL: f64 = 50.0;
const START_X: f64 = 50.0;
const START_Y: f64 = 70.0;

/// Output cell for `step`, as (row, col) in the 2x2 result.
pub fn window(step: u32) -> Option<(usize, usize)> {
    (step < MAX_STEPS).then(|| ((step / 2) as usize, (step % 2) as usize))
}

/// Maximum of the 2x2 window feeding output cell (row, col).
pub fn max_at(row: usize, col: usize) -> u8 {
    let (r, c) = (row * 2, col * 2);
    INPUT[r][c]
        .max(INPUT[r][c + 1])
        .max(INPUT[r + 1][c])
        .max(INPUT[r + 1][c + 1])
}

/// Warm-to-cool colour for an activation value.
pub fn activation_color(value: u8) -> Color {
    Color::rgb(value, value / 2, 255 - value)
}

/// Animated max-pooling walkthrough.
#[derive(Debug, Clone)]
pub struct PoolingDemo {
    counter: StepCounter,
}

impl PoolingDemo {
    pub fn new(frames_per_step: u32) -> Self {
        Self {
            counter: StepCounter::new(MAX_STEPS, frames_per_step),
        }
    }

    /// Start from `step` instead of 0.
    pub fn at_step(mut self, step: u32) -> Self {
        self.counter.set_step(step);
        self
    }

    pub fn counter(&self) -> &StepCounter {
        &self.counter
    }

    fn draw(&self, surface: &mut dyn DrawingSurface) {
        surface.clear();
        surface.set_global_alpha(1.0);

        label(
            surface,
            "Max Pooling Operation (2×2 window, stride 2)",
            20.0,
            30.0,
            Font::bold(16.0),
            Color::INK,
            TextAlign::Left,
        );
        label(
            surface,
            "Input (4×4)",
            START_X,
            START_Y - 20.0,
            Font::new(12.0),
            Color::INK,
            TextAlign::Left,
        );

        surface.set_line_width(1.0);
        for (i, row) in INPUT.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                let x = START_X + j as f64 * CELL;
                let y = START_Y + i as f64 * CELL;
                draw_cell(surface, x, y, CELL, activation_color(*value), Color::BORDER);
                centered(
                    surface,
                    &value.to_string(),
                    x + CELL / 2.0,
                    y + CELL / 2.0,
                    Font::bold(12.0),
                    Color::INK,
                );
            }
        }

        let output_x = START_X + 320.0;
        let output_y = START_Y + 25.0;
        label(
            surface,
            "Output (2×2)",
            output_x,
            output_y - 20.0,
            Font::new(12.0),
            Color::INK,
            TextAlign::Left,
        );

        if let Some((row, col)) = window(self.counter.step()) {
            surface.set_stroke(Color::AMBER);
            surface.set_line_width(4.0);
            surface.stroke_rect(
                START_X + col as f64 * 2.0 * CELL,
                START_Y + row as f64 * 2.0 * CELL,
                CELL * 2.0 - 2.0,
                CELL * 2.0 - 2.0,
            );

            label(
                surface,
                "MAX",
                START_X + CELL * 4.0 + 50.0,
                START_Y + 100.0,
                Font::new(20.0),
                Color::BLUE,
                TextAlign::Center,
            );
            draw_arrow(
                surface,
                (START_X + CELL * 4.0 + 20.0, START_Y + 80.0),
                (output_x - 20.0, output_y + 50.0),
                ArrowStyle::default(),
            );

            // Every output cell, the current one solid.
            let out_cell = CELL * 1.2;
            for i in 0..2 {
                for j in 0..2 {
                    let current = i == row && j == col;
                    let value = max_at(i, j);
                    let x = output_x + j as f64 * out_cell;
                    let y = output_y + i as f64 * out_cell;

                    surface.set_global_alpha(if current { 1.0 } else { 0.3 });
                    surface.set_line_width(if current { 3.0 } else { 1.0 });
                    let border = if current { Color::GREEN } else { Color::BORDER };
                    draw_cell(surface, x, y, out_cell, activation_color(value), border);
                    centered(
                        surface,
                        &value.to_string(),
                        x + CELL * 0.6,
                        y + CELL * 0.6,
                        Font::bold(14.0),
                        Color::INK,
                    );
                }
            }
            surface.set_global_alpha(1.0);
        }

        let shown = (self.counter.step() + 1).min(MAX_STEPS);
        let bottom = surface.height() - 10.0;
        label(
            surface,
            &format!("Step {shown} of {MAX_STEPS}: Select maximum value from each 2×2 window"),
            20.0,
            bottom,
            Font::new(11.0),
            Color::MUTED,
            TextAlign::Left,
        );
    }
}

impl Demo for PoolingDemo {
    fn name(&self) -> &'static str {
        "pooling"
    }

    fn canvas_size(&self) -> (f64, f64) {
        (CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    fn render_frame(&mut self, surface: &mut dyn DrawingSurface) {
        self.draw(surface);
        self.counter.advance_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};

    #[test]
    fn test_max_per_window() {
        assert_eq!(max_at(0, 0), 255);
        assert_eq!(max_at(0, 1), 200);
        assert_eq!(max_at(1, 0), 190);
        assert_eq!(max_at(1, 1), 234);
    }

    #[test]
    fn test_activation_color() {
        assert_eq!(activation_color(200), Color::rgb(200, 100, 55));
        assert_eq!(activation_color(45), Color::rgb(45, 22, 210));
    }

    #[test]
    fn test_current_output_cell_is_opaque() {
        let mut surface = RecordingSurface::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        let mut demo = PoolingDemo::new(90).at_step(3);
        demo.render_frame(&mut surface);

        let faded = surface
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { .. }) && op.alpha() == Some(0.3))
            .count();
        assert_eq!(faded, 3);
        assert!(surface.drew_text("Step 4 of 4: Select maximum value from each 2×2 window"));
    }

    #[test]
    fn test_pause_step_caps_step_label() {
        let mut surface = RecordingSurface::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        let mut demo = PoolingDemo::new(90).at_step(5);
        demo.render_frame(&mut surface);
        assert!(surface.drew_text("Step 4 of 4: Select maximum value from each 2×2 window"));
        assert!(!surface.drew_text("MAX"));
    }
}
