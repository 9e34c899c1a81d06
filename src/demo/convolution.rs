//! A 3x3 edge filter sliding across a 6x6 image.

use super::{Demo, StepCounter, centered, label};
use crate::surface::shapes::{ArrowStyle, draw_arrow, draw_cell};
use crate::surface::{Color, DrawingSurface, Font, TextAlign};

/// Greyscale input: a dark left half and a bright right half.
pub const INPUT: [[u8; 6]; 6] = [[50, 50, 50, 200, 200, 200]; 6];

/// Horizontal edge detector.
pub const FILTER: [[i32; 3]; 3] = [[-1, -1, -1], [0, 0, 0], [1, 1, 1]];

/// One step per output cell of the 4x4 result.
pub const MAX_STEPS: u32 = 16;

const CANVAS_WIDTH: f64 = 600.0;
const CANVAS_HEIGHT: f64 = 300.0;
const CELL: f64 = 40.0;
const START_X: f64 = 20.0;
const START_Y: f64 = 50.0;
const FILTER_CELL: f64 = 35.0;

/// Top-left of the input window at `step`, as (row, col).
pub fn window(step: u32) -> Option<(usize, usize)> {
    (step < MAX_STEPS).then(|| ((step / 4) as usize, (step % 4) as usize))
}

/// Filter response at a window, shifted by 128 and clamped to a grey level.
pub fn convolve_at(row: usize, col: usize) -> u8 {
    let mut sum = 0i32;
    for (i, filter_row) in FILTER.iter().enumerate() {
        for (j, weight) in filter_row.iter().enumerate() {
            sum += INPUT[row + i][col + j] as i32 * weight;
        }
    }
    (sum + 128).clamp(0, 255) as u8
}

/// The whole 4x4 output map.
pub fn output_map() -> [[u8; 4]; 4] {
    std::array::from_fn(|row| std::array::from_fn(|col| convolve_at(row, col)))
}

/// Animated convolution walkthrough.
#[derive(Debug, Clone)]
pub struct ConvolutionDemo {
    counter: StepCounter,
}

impl ConvolutionDemo {
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
            "Convolution Operation",
            20.0,
            30.0,
            Font::bold(16.0),
            Color::INK,
            TextAlign::Left,
        );
        label(
            surface,
            "Input (6×6)",
            START_X,
            START_Y - 15.0,
            Font::new(10.0),
            Color::INK,
            TextAlign::Left,
        );

        surface.set_line_width(1.0);
        for (i, row) in INPUT.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                draw_cell(
                    surface,
                    START_X + j as f64 * CELL,
                    START_Y + i as f64 * CELL,
                    CELL,
                    Color::grey(*value),
                    Color::BORDER,
                );
            }
        }

        let filter_x = START_X + 280.0;
        let filter_y = START_Y + 20.0;
        label(
            surface,
            "3×3 Filter (Edge Detector)",
            filter_x,
            filter_y - 10.0,
            Font::new(10.0),
            Color::INK,
            TextAlign::Left,
        );
        for (i, row) in FILTER.iter().enumerate() {
            for (j, weight) in row.iter().enumerate() {
                let x = filter_x + j as f64 * FILTER_CELL;
                let y = filter_y + i as f64 * FILTER_CELL;
                let fill = match weight.signum() {
                    1 => Color::GREEN,
                    -1 => Color::RED,
                    _ => Color::SLATE,
                };
                draw_cell(surface, x, y, FILTER_CELL, fill, Color::INK);
                centered(
                    surface,
                    &weight.to_string(),
                    x + FILTER_CELL / 2.0,
                    y + FILTER_CELL / 2.0,
                    Font::bold(14.0),
                    Color::WHITE,
                );
            }
        }

        let Some((row, col)) = window(self.counter.step()) else {
            return;
        };

        surface.set_stroke(Color::AMBER);
        surface.set_line_width(3.0);
        surface.stroke_rect(
            START_X + col as f64 * CELL,
            START_Y + row as f64 * CELL,
            CELL * 3.0 - 2.0,
            CELL * 3.0 - 2.0,
        );

        draw_arrow(
            surface,
            (START_X + CELL * 6.0 + 20.0, START_Y + 100.0),
            (filter_x - 20.0, filter_y + 50.0),
            ArrowStyle::default(),
        );

        let value = convolve_at(row, col);
        let result_x = filter_x + 150.0;
        let result_y = filter_y + 30.0;
        label(
            surface,
            "Output:",
            result_x,
            result_y - 10.0,
            Font::new(12.0),
            Color::INK,
            TextAlign::Left,
        );
        surface.set_fill(Color::grey(value).into());
        surface.fill_rect(result_x, result_y, 50.0, 50.0);
        surface.set_stroke(Color::GREEN);
        surface.set_line_width(3.0);
        surface.stroke_rect(result_x, result_y, 50.0, 50.0);
        label(
            surface,
            &value.to_string(),
            result_x + 25.0,
            result_y + 70.0,
            Font::bold(12.0),
            Color::INK,
            TextAlign::Center,
        );

        let bottom = surface.height() - 10.0;
        label(
            surface,
            &format!(
                "Step {} of {}: Sliding 3×3 filter across input",
                self.counter.step() + 1,
                MAX_STEPS
            ),
            20.0,
            bottom,
            Font::new(11.0),
            Color::MUTED,
            TextAlign::Left,
        );
    }
}

impl Demo for ConvolutionDemo {
    fn name(&self) -> &'static str {
        "convolution"
    }

    fn canvas_size(&self) -> (f64, f64) {
        (CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    fn render_frame(&mut self, surface: &mut dyn DrawingSurface) {
        self.draw(surface);
        self.counter.advance_frame();
    }
}
