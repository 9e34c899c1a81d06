//! Static ReLU graph with worked examples.

use super::{Demo, label};
use crate::surface::{Color, DrawingSurface, Font, TextAlign};

/// Inputs shown in the examples column.
pub const EXAMPLE_INPUTS: [i32; 5] = [-5, -2, 0, 3, 7];

pub fn relu(x: i32) -> i32 {
    x.max(0)
}

/// `f(-5) = 0`, with the input right-aligned to two columns.
pub fn example_line(x: i32) -> String {
    format!("f({x:>2}) = {}", relu(x))
}

fn example_color(x: i32) -> Color {
    match x.signum() {
        -1 => Color::RED,
        0 => Color::SLATE,
        _ => Color::GREEN,
    }
}

/// Single-frame ReLU diagram.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReluDemo;

impl Demo for ReluDemo {
    fn name(&self) -> &'static str {
        "relu"
    }

    fn canvas_size(&self) -> (f64, f64) {
        (600.0, 280.0)
    }

    fn render_frame(&mut self, surface: &mut dyn DrawingSurface) {
        surface.clear();
        surface.set_global_alpha(1.0);

        label(
            surface,
            "ReLU Activation Function: f(x) = max(0, x)",
            20.0,
            30.0,
            Font::bold(16.0),
            Color::INK,
            TextAlign::Left,
        );

        let (gx, gy) = (50.0, 150.0);
        let (gw, gh) = (250.0, 100.0);

        surface.set_stroke(Color::MUTED);
        surface.set_line_width(2.0);
        surface.begin_path();
        surface.move_to(gx, gy - gh);
        surface.line_to(gx, gy + gh);
        surface.line_to(gx + gw, gy);
        surface.stroke();

        for (text, x, y) in [
            ("x", gx + gw + 10.0, gy + 5.0),
            ("f(x)", gx - 30.0, gy - gh - 5.0),
            ("0", gx - 10.0, gy + 15.0),
        ] {
            label(surface, text, x, y, Font::new(12.0), Color::MUTED, TextAlign::Left);
        }

        surface.set_stroke(Color::GREEN);
        surface.set_line_width(3.0);
        surface.begin_path();
        surface.move_to(gx, gy);
        surface.line_to(gx + gw, gy - gh);
        surface.stroke();

        // Negative inputs collapse to zero; positive ones pass through.
        surface.set_global_alpha(0.2);
        surface.set_fill(Color::RED.into());
        surface.fill_rect(gx - gw / 2.0, gy, gw / 2.0, gh);
        surface.set_fill(Color::GREEN.into());
        surface.fill_rect(gx, gy - gh, gw, gh);
        surface.set_global_alpha(1.0);

        let ex = gx + gw + 80.0;
        let ey = 80.0;
        label(surface, "Examples:", ex, ey, Font::bold(14.0), Color::INK, TextAlign::Left);
        for (i, x) in EXAMPLE_INPUTS.iter().enumerate() {
            label(
                surface,
                &example_line(*x),
                ex,
                ey + 30.0 + i as f64 * 25.0,
                Font::mono(13.0),
                example_color(*x),
                TextAlign::Left,
            );
        }

        for (i, note) in [
            "✓ Negative values → 0",
            "✓ Positive values → unchanged",
            "✓ Introduces non-linearity",
        ]
        .into_iter()
        .enumerate()
        {
            label(
                surface,
                note,
                ex,
                ey + 180.0 + i as f64 * 20.0,
                Font::new(12.0),
                Color::INK,
                TextAlign::Left,
            );
        }
    }

    fn is_animated(&self) -> bool {
        false
    }
}
