//! SVG document surface for the command-line host.

use std::f64::consts::PI;
use std::fmt::Write as _;
use std::path::Path;

use super::recording::PathCmd;
use super::{
    Color, DrawingSurface, Font, FontFamily, LinearGradient, Paint, TextAlign, TextBaseline,
};
use crate::error::Result;

/// Builds an SVG document from canvas-style drawing calls.
///
/// A full-surface clear discards everything drawn so far, so the document
/// always holds the most recent frame.
#[derive(Debug, Clone)]
pub struct SvgSurface {
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
    defs: Vec<String>,
    body: Vec<String>,
}

impl SvgSurface {
    /// Create an empty document of the given size.
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
            defs: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Number of drawn elements in the current frame.
    pub fn element_count(&self) -> usize {
        self.body.len()
    }

    /// Render the document.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = fmt_num(self.width),
            h = fmt_num(self.height)
        );
        if !self.defs.is_empty() {
            out.push_str("<defs>\n");
            for def in &self.defs {
                out.push_str(def);
                out.push('\n');
            }
            out.push_str("</defs>\n");
        }
        for element in &self.body {
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }

    /// Write the document to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_svg_string())?;
        Ok(())
    }

    /// Resolve the current fill into an SVG paint reference.
    fn fill_ref(&mut self) -> String {
        match self.fill.clone() {
            Paint::Solid(color) => color.to_string(),
            Paint::Linear(gradient) => {
                let id = format!("g{}", self.defs.len());
                self.defs.push(gradient_def(&id, &gradient));
                format!("url(#{id})")
            }
        }
    }

    fn opacity_attr(&self) -> String {
        if self.alpha < 1.0 {
            format!(r#" opacity="{}""#, fmt_num(self.alpha))
        } else {
            String::new()
        }
    }
}

impl DrawingSurface for SvgSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.defs.clear();
        self.body.clear();
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if x <= 0.0 && y <= 0.0 && x + width >= self.width && y + height >= self.height {
            self.defs.clear();
            self.body.clear();
        } else {
            self.body.push(format!(
                r##"<rect x="{}" y="{}" width="{}" height="{}" fill="#ffffff"/>"##,
                fmt_num(x),
                fmt_num(y),
                fmt_num(width),
                fmt_num(height)
            ));
        }
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
        let fill = self.fill_ref();
        let element = format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}"{}/>"#,
            fmt_num(x),
            fmt_num(y),
            fmt_num(width),
            fmt_num(height),
            self.opacity_attr()
        );
        self.body.push(element);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.body.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="{}"{}/>"#,
            fmt_num(x),
            fmt_num(y),
            fmt_num(width),
            fmt_num(height),
            self.stroke,
            fmt_num(self.line_width),
            self.opacity_attr()
        ));
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
        let fill = self.fill_ref();
        let element = format!(
            r#"<path d="{}" fill="{fill}"{}/>"#,
            path_data(&self.path),
            self.opacity_attr()
        );
        self.body.push(element);
    }

    fn stroke(&mut self) {
        self.body.push(format!(
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}"{}/>"#,
            path_data(&self.path),
            self.stroke,
            fmt_num(self.line_width),
            self.opacity_attr()
        ));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let fill = self.fill_ref();
        let anchor = match self.align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
            TextAlign::Right => "end",
        };
        let baseline = match self.baseline {
            TextBaseline::Alphabetic => "",
            TextBaseline::Middle => r#" dominant-baseline="middle""#,
        };
        let family = match self.font.family {
            FontFamily::Sans => "Arial, sans-serif",
            FontFamily::Monospace => "monospace",
        };
        let weight = if self.font.bold {
            r#" font-weight="bold""#
        } else {
            ""
        };
        let element = format!(
            r#"<text x="{}" y="{}" font-family="{family}" font-size="{}"{weight} text-anchor="{anchor}"{baseline} fill="{fill}"{}>{}</text>"#,
            fmt_num(x),
            fmt_num(y),
            fmt_num(self.font.size),
            self.opacity_attr(),
            escape_xml(text)
        );
        self.body.push(element);
    }
}

/// Compact number formatting: integers without a fraction, otherwise two
/// decimals with trailing zeros trimmed.
fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let s = format!("{value:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn gradient_def(id: &str, gradient: &LinearGradient) -> String {
    let mut def = format!(
        r#"<linearGradient id="{id}" gradientUnits="userSpaceOnUse" x1="{}" y1="{}" x2="{}" y2="{}">"#,
        fmt_num(gradient.start.0),
        fmt_num(gradient.start.1),
        fmt_num(gradient.end.0),
        fmt_num(gradient.end.1)
    );
    for (offset, color) in &gradient.stops {
        let _ = write!(
            def,
            r#"<stop offset="{}" stop-color="{color}"/>"#,
            fmt_num(*offset)
        );
    }
    def.push_str("</linearGradient>");
    def
}

/// Convert recorded path commands into SVG path data.
fn path_data(path: &[PathCmd]) -> String {
    let mut d = String::new();
    for cmd in path {
        match *cmd {
            PathCmd::MoveTo(x, y) => {
                let _ = write!(d, "M{} {} ", fmt_num(x), fmt_num(y));
            }
            PathCmd::LineTo(x, y) => {
                let _ = write!(d, "L{} {} ", fmt_num(x), fmt_num(y));
            }
            PathCmd::Arc {
                cx,
                cy,
                radius,
                start,
                end,
            } => {
                let point = |angle: f64| (cx + radius * angle.cos(), cy + radius * angle.sin());
                let (sx, sy) = point(start);
                let cmd = if d.is_empty() { 'M' } else { 'L' };
                let _ = write!(d, "{cmd}{} {} ", fmt_num(sx), fmt_num(sy));
                let sweep = end - start;
                if sweep.abs() >= 2.0 * PI {
                    // A single SVG arc cannot close on itself; split into halves.
                    let (mx, my) = point(start + PI);
                    let r = fmt_num(radius);
                    let _ = write!(
                        d,
                        "A{r} {r} 0 1 1 {} {} A{r} {r} 0 1 1 {} {} ",
                        fmt_num(mx),
                        fmt_num(my),
                        fmt_num(sx),
                        fmt_num(sy)
                    );
                } else {
                    let (ex, ey) = point(end);
                    let large = if sweep.abs() > PI { 1 } else { 0 };
                    let dir = if sweep >= 0.0 { 1 } else { 0 };
                    let r = fmt_num(radius);
                    let _ = write!(
                        d,
                        "A{r} {r} 0 {large} {dir} {} {} ",
                        fmt_num(ex),
                        fmt_num(ey)
                    );
                }
            }
            PathCmd::Close => d.push_str("Z "),
        }
    }
    d.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_clear_discards_frame() {
        let mut svg = SvgSurface::new(200.0, 100.0);
        svg.fill_rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(svg.element_count(), 1);
        svg.clear();
        assert_eq!(svg.element_count(), 0);
    }

    #[test]
    fn test_text_is_escaped_and_anchored() {
        let mut svg = SvgSurface::new(200.0, 100.0);
        svg.set_text_align(TextAlign::Center);
        svg.fill_text("Resize & <Normalize>", 100.0, 50.0);
        let doc = svg.to_svg_string();
        assert!(doc.contains("Resize &amp; &lt;Normalize&gt;"));
        assert!(doc.contains(r#"text-anchor="middle""#));
    }

    #[test]
    fn test_gradient_fill_emits_def() {
        let mut svg = SvgSurface::new(200.0, 100.0);
        let gradient = svg
            .create_linear_gradient(0.0, 0.0, 50.0, 0.0)
            .with_stop(0.0, Color::GREEN)
            .with_stop(1.0, Color::GREEN_DARK);
        svg.set_fill(gradient.into());
        svg.fill_rect(0.0, 0.0, 50.0, 20.0);
        let doc = svg.to_svg_string();
        assert!(doc.contains("<linearGradient id=\"g0\""));
        assert!(doc.contains("fill=\"url(#g0)\""));
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(12.0), "12");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(1.0 / 3.0), "0.33");
    }
}
