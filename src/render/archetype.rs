//! Per-archetype stage diagrams.
//!
//! Every routine is a pure function of the stage descriptor (plus the ranked
//! predictions for the output stage) onto the surface. Opacity always goes
//! through [`Painter::alpha`], which scales by the layer opacity so that a
//! cross-fade can draw two stages at complementary strengths.

use std::f64::consts::PI;
use std::ops::{Deref, DerefMut};

use crate::model::{Archetype, Prediction, StageDescriptor, ranked};
use crate::surface::shapes::{ArrowStyle, draw_arrow};
use crate::surface::{Color, DrawingSurface, Font, TextAlign, TextBaseline};

/// A surface borrowed at a fixed layer opacity.
pub(crate) struct Painter<'a, S: DrawingSurface + ?Sized> {
    surface: &'a mut S,
    layer_alpha: f64,
}

impl<'a, S: DrawingSurface + ?Sized> Painter<'a, S> {
    pub(crate) fn new(surface: &'a mut S, layer_alpha: f64) -> Self {
        let layer_alpha = layer_alpha.clamp(0.0, 1.0);
        surface.set_global_alpha(layer_alpha);
        Self {
            surface,
            layer_alpha,
        }
    }

    /// Set opacity relative to the layer.
    pub(crate) fn alpha(&mut self, alpha: f64) {
        self.surface.set_global_alpha(self.layer_alpha * alpha);
    }

    fn center(&self) -> (f64, f64) {
        (self.surface.width() / 2.0, self.surface.height() / 2.0)
    }

    fn text(&mut self, text: &str, x: f64, y: f64, font: Font, color: Color, align: TextAlign) {
        self.surface.set_fill(color.into());
        self.surface.set_font(font);
        self.surface.set_text_align(align);
        self.surface.set_text_baseline(TextBaseline::Alphabetic);
        self.surface.fill_text(text, x, y);
    }
}

impl<S: DrawingSurface + ?Sized> Deref for Painter<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: DrawingSurface + ?Sized> DerefMut for Painter<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

/// Draw a full stage diagram without clearing.
pub(crate) fn paint_stage<S: DrawingSurface + ?Sized>(
    p: &mut Painter<'_, S>,
    stage: &StageDescriptor,
    predictions: &[Prediction],
    filter_shades: &[u8; 9],
) {
    match stage.archetype() {
        Archetype::Input {
            width,
            height,
            depth,
        } => draw_input(p, stage, width, height, depth),
        Archetype::Conv { depth, .. } => draw_conv(p, stage, depth, filter_shades),
        Archetype::Pool { .. } => draw_pool(p, stage),
        Archetype::FullyConnected { neurons } => draw_fully_connected(p, stage, neurons),
        Archetype::Output { bars } => draw_output(p, predictions, bars as usize),
    }

    draw_stage_label(p, stage);

    if matches!(stage.archetype(), Archetype::Conv { .. }) && stage.id <= 5 {
        draw_feature_map_hints(p);
    }
    p.alpha(1.0);
}

fn draw_input<S: DrawingSurface + ?Sized>(
    p: &mut Painter<'_, S>,
    stage: &StageDescriptor,
    width: u32,
    height: u32,
    depth: u32,
) {
    let (cx, cy) = p.center();
    let size = 150.0;

    draw_3d_box(p, cx - size / 2.0, cy - size / 2.0, size, size, 20.0, stage.visual.color);

    // R, G and B channel swatches
    let channel = 40.0;
    let start_x = cx + size / 2.0 + 30.0;
    for (i, color) in [Color::RED, Color::hex(0x22c55e), Color::BLUE]
        .into_iter()
        .enumerate()
    {
        p.set_fill(color.into());
        p.alpha(0.7);
        p.fill_rect(start_x, cy - channel / 2.0 + i as f64 * 5.0, channel, channel);
        p.alpha(1.0);
    }

    p.text(
        &format!("{width}×{height}×{depth}"),
        cx,
        cy + size / 2.0 + 30.0,
        Font::bold(14.0),
        Color::INK,
        TextAlign::Center,
    );
}

fn draw_conv<S: DrawingSurface + ?Sized>(
    p: &mut Painter<'_, S>,
    stage: &StageDescriptor,
    depth: u32,
    filter_shades: &[u8; 9],
) {
    let (cx, cy) = p.center();
    let base = 120.0;
    let box_depth = (depth as f64 / 4.0).min(30.0);

    // Back to front so the first map ends up on top.
    for i in (0..5).rev() {
        let offset = i as f64 * 8.0;
        draw_3d_box(
            p,
            cx - base / 2.0 + offset,
            cy - base / 2.0 + offset,
            base,
            base,
            box_depth,
            stage.visual.color.lighten(i * 10),
        );
    }

    draw_filters(p, cx - base - 80.0, cy - 40.0, filter_shades);

    p.text(
        stage.output_shape,
        cx,
        cy + base / 2.0 + 50.0,
        Font::bold(14.0),
        Color::INK,
        TextAlign::Center,
    );
    p.text(
        &format!("{depth} feature maps"),
        cx,
        cy + base / 2.0 + 70.0,
        Font::new(12.0),
        Color::MUTED,
        TextAlign::Center,
    );
}

fn draw_pool<S: DrawingSurface + ?Sized>(p: &mut Painter<'_, S>, stage: &StageDescriptor) {
    let (cx, cy) = p.center();
    let size = 100.0;
    let depth = 25.0;

    p.alpha(0.3);
    draw_3d_box(
        p,
        cx - size - 60.0,
        cy - size / 2.0,
        size * 1.5,
        size * 1.5,
        depth,
        Color::SLATE,
    );
    p.alpha(1.0);

    draw_arrow(
        &mut **p,
        (cx - 30.0, cy),
        (cx + 30.0, cy),
        ArrowStyle {
            color: Color::BLUE,
            line_width: 3.0,
            head_length: 15.0,
        },
    );

    draw_3d_box(p, cx + 40.0, cy - size / 2.0, size, size, depth, stage.visual.color);

    let label_y = cy + size / 2.0 + 30.0;
    p.text(
        "Before",
        cx - 60.0,
        label_y,
        Font::bold(12.0),
        Color::INK,
        TextAlign::Center,
    );
    p.text(
        "After (Max Pool)",
        cx + 90.0,
        label_y,
        Font::bold(12.0),
        Color::INK,
        TextAlign::Center,
    );
    p.text(
        stage.output_shape,
        cx + 90.0,
        label_y + 20.0,
        Font::bold(14.0),
        Color::INK,
        TextAlign::Center,
    );
}

fn draw_fully_connected<S: DrawingSurface + ?Sized>(
    p: &mut Painter<'_, S>,
    stage: &StageDescriptor,
    neurons: u32,
) {
    let (cx, cy) = p.center();
    let shown = 12;
    let radius = 8.0;
    let layer_spacing = 200.0;
    let spacing = 30.0;
    let row_y = |i: usize| cy - (shown as f64 * spacing) / 2.0 + i as f64 * spacing;

    // A sparse sample of the connections, behind the neurons.
    p.set_stroke(Color::BORDER);
    p.set_line_width(1.0);
    p.alpha(0.3);
    for i in (0..shown).step_by(2) {
        for j in (0..shown).step_by(2) {
            p.begin_path();
            p.move_to(cx - layer_spacing / 2.0 + radius, row_y(i));
            p.line_to(cx + layer_spacing / 2.0 - radius, row_y(j));
            p.stroke();
        }
    }
    p.alpha(1.0);

    for i in 0..shown {
        draw_neuron(p, cx - layer_spacing / 2.0, row_y(i), radius, Color::MUTED);
        draw_neuron(p, cx + layer_spacing / 2.0, row_y(i), radius, stage.visual.color);
    }

    p.text(
        &format!("{neurons} neurons"),
        cx,
        cy + 180.0,
        Font::bold(14.0),
        Color::INK,
        TextAlign::Center,
    );
    p.text(
        "Fully Connected Layer",
        cx,
        cy + 200.0,
        Font::new(12.0),
        Color::MUTED,
        TextAlign::Center,
    );
}

fn draw_output<S: DrawingSurface + ?Sized>(
    p: &mut Painter<'_, S>,
    predictions: &[Prediction],
    bars: usize,
) {
    let (cx, cy) = p.center();
    let ranked: Vec<Prediction> = ranked(predictions).into_iter().take(bars).collect();

    let bar_width = 250.0;
    let bar_height = 25.0;
    let bar_spacing = 32.0;
    let left = cx - bar_width / 2.0;
    let start_y = cy - (ranked.len() as f64 * bar_spacing) / 2.0;

    p.text(
        &format!("Top {} Predictions", ranked.len()),
        cx,
        start_y - 30.0,
        Font::bold(16.0),
        Color::INK,
        TextAlign::Center,
    );

    for (i, pred) in ranked.iter().enumerate() {
        let y = start_y + i as f64 * bar_spacing;
        let fill_width = bar_width * pred.probability.clamp(0.0, 1.0);

        p.set_fill(Color::TRACK.into());
        p.fill_rect(left, y, bar_width, bar_height);

        // The winning class is green, the rest blue.
        let (from, to) = if i == 0 {
            (Color::GREEN, Color::GREEN_DARK)
        } else {
            (Color::BLUE, Color::BLUE_DARK)
        };
        let gradient = p
            .create_linear_gradient(left, y, left + fill_width, y)
            .with_stop(0.0, from)
            .with_stop(1.0, to);
        p.set_fill(gradient.into());
        p.fill_rect(left, y, fill_width, bar_height);

        let font = if i == 0 {
            Font::bold(12.0)
        } else {
            Font::new(11.0)
        };
        p.text(pred.label, left, y - 5.0, font, Color::INK, TextAlign::Left);
        p.text(
            &pred.percent_label(),
            cx + bar_width / 2.0 + 50.0,
            y + 17.0,
            font,
            Color::INK,
            TextAlign::Right,
        );
    }
}

fn draw_feature_map_hints<S: DrawingSurface + ?Sized>(p: &mut Painter<'_, S>) {
    let (cx, cy) = p.center();
    let start_x = cx - 100.0;
    let start_y = cy + 100.0;

    let patterns = [
        ("Edges", Color::RED),
        ("Textures", Color::AMBER),
        ("Patterns", Color::GREEN),
    ];
    for (i, (name, color)) in patterns.into_iter().enumerate() {
        let x = start_x + i as f64 * 70.0;
        p.set_fill(color.into());
        p.alpha(0.6);
        p.fill_rect(x, start_y, 50.0, 50.0);
        p.alpha(1.0);

        p.text(
            name,
            x + 25.0,
            start_y + 65.0,
            Font::new(10.0),
            Color::MUTED,
            TextAlign::Center,
        );
    }
    p.set_text_align(TextAlign::Left);
}

fn draw_stage_label<S: DrawingSurface + ?Sized>(p: &mut Painter<'_, S>, stage: &StageDescriptor) {
    let x = p.width() / 2.0;
    p.text(
        stage.short_name,
        x,
        30.0,
        Font::bold(18.0),
        Color::INK,
        TextAlign::Center,
    );
}

/// Front face with a lighter top and a darker right side.
fn draw_3d_box<S: DrawingSurface + ?Sized>(
    p: &mut Painter<'_, S>,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    depth: f64,
    color: Color,
) {
    p.set_fill(color.into());
    p.fill_rect(x, y, width, height);
    p.set_stroke(Color::INK);
    p.set_line_width(2.0);
    p.stroke_rect(x, y, width, height);

    p.set_fill(color.lighten(30).into());
    p.begin_path();
    p.move_to(x, y);
    p.line_to(x + depth, y - depth);
    p.line_to(x + width + depth, y - depth);
    p.line_to(x + width, y);
    p.close_path();
    p.fill();
    p.stroke();

    p.set_fill(color.lighten(-20).into());
    p.begin_path();
    p.move_to(x + width, y);
    p.line_to(x + width + depth, y - depth);
    p.line_to(x + width + depth, y + height - depth);
    p.line_to(x + width, y + height);
    p.close_path();
    p.fill();
    p.stroke();
}

fn draw_filters<S: DrawingSurface + ?Sized>(
    p: &mut Painter<'_, S>,
    x: f64,
    y: f64,
    shades: &[u8; 9],
) {
    let size = 20.0;
    let spacing = 4.0;
    for (idx, shade) in shades.iter().enumerate() {
        let (row, col) = ((idx / 3) as f64, (idx % 3) as f64);
        p.set_fill(Color::grey(*shade).into());
        p.fill_rect(
            x + col * (size + spacing),
            y + row * (size + spacing),
            size,
            size,
        );
    }

    p.text(
        "Filters",
        x + 30.0,
        y + 80.0,
        Font::new(10.0),
        Color::MUTED,
        TextAlign::Center,
    );
}

fn draw_neuron<S: DrawingSurface + ?Sized>(
    p: &mut Painter<'_, S>,
    x: f64,
    y: f64,
    radius: f64,
    color: Color,
) {
    p.begin_path();
    p.arc(x, y, radius, 0.0, PI * 2.0);
    p.set_fill(color.into());
    p.fill();
    p.set_stroke(Color::INK);
    p.set_line_width(2.0);
    p.stroke();
}
