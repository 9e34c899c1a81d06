//! Terminal UI: boxed stage panels, progress bars and a control legend.

use std::io::{self, Stdout, Write};

use chrono::{Local, NaiveDate};
use tracing::warn;

use super::{ScrollAnchor, StagePanel, UiSink};
use crate::controller::Affordances;
use crate::model::StageId;

/// Default box width in columns.
pub const DEFAULT_WIDTH: usize = 72;

/// Writes UI updates as plain text.
pub struct TerminalUi<W: Write = Stdout> {
    out: W,
    width: usize,
    show_glossary: bool,
}

impl TerminalUi<Stdout> {
    /// A UI printing to stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalUi<W> {
    /// A UI writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            width: DEFAULT_WIDTH,
            show_glossary: true,
        }
    }

    /// Set the box width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// List glossary terms under each panel.
    pub fn with_glossary(mut self, enable: bool) -> Self {
        self.show_glossary = enable;
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            warn!(error = %e, "terminal write failed");
        }
    }
}

impl<W: Write> UiSink for TerminalUi<W> {
    fn set_stage_info(&mut self, panel: &StagePanel) {
        let mut text = boxed(&panel.body(), &panel.title, self.width);

        let terms = panel.terms();
        if self.show_glossary && !terms.is_empty() {
            text.push_str("\nKey terms:");
            for entry in terms {
                text.push_str(&format!("\n  {}: {}", entry.term, entry.definition));
            }
        }
        self.emit(&text);
    }

    fn set_progress(&mut self, stage: StageId, total: StageId, percent: f64) {
        let bar = progress_bar(percent, 40);
        self.emit(&format!("Step {stage} of {total}  {bar} {percent:3.0}%"));
    }

    fn set_affordances(&mut self, affordances: &Affordances) {
        let mut controls = Vec::new();
        if affordances.start {
            controls.push("[space] Start".to_string());
        }
        if affordances.retreat {
            controls.push("[p] Previous".to_string());
        }
        if affordances.advance {
            controls.push(format!("[n] {}", affordances.advance_label));
        } else if affordances.reset {
            controls.push(format!("({})", affordances.advance_label));
        }
        if affordances.reset {
            controls.push("[r] Reset".to_string());
        }
        self.emit(&format!("Controls: {}", controls.join("  ")));
    }

    fn scroll_into_view(&mut self, anchor: ScrollAnchor) {
        match anchor {
            ScrollAnchor::Top => {
                let banner = format!(
                    "AlexNet Interactive Visualization | {}",
                    date_banner(Local::now().date_naive())
                );
                let rule = "═".repeat(self.width.saturating_sub(2));
                let inner = self.width.saturating_sub(4);
                self.emit(&format!("╔{rule}╗\n║ {banner:^inner$} ║\n╚{rule}╝"));
            }
            ScrollAnchor::Center => {
                let rule = "─".repeat(self.width);
                self.emit(&rule);
            }
        }
    }
}

/// "October 16, 2026".
pub fn date_banner(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// A `width`-cell bar filled to `percent`.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64) as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Draw a titled box around `text`, word-wrapped to fit `width` columns.
pub fn boxed(text: &str, title: &str, width: usize) -> String {
    let width = width.max(title.chars().count() + 6).max(8);
    let content_width = width - 4;
    let mut result = Vec::new();

    if title.is_empty() {
        result.push(format!("┌{}┐", "─".repeat(width - 2)));
    } else {
        let title_part = format!(" {title} ");
        let remaining = width - 2 - title_part.chars().count();
        let left = remaining / 2;
        let right = remaining - left;
        result.push(format!(
            "┌{}{}{}┐",
            "─".repeat(left),
            title_part,
            "─".repeat(right)
        ));
    }

    for line in text.lines() {
        for chunk in wrap(line, content_width) {
            result.push(format!("│ {chunk:content_width$} │"));
        }
    }

    result.push(format!("└{}┘", "─".repeat(width - 2)));
    result.join("\n")
}

/// Word-wrap one line, keeping its leading indent on continuation lines.
fn wrap(line: &str, width: usize) -> Vec<String> {
    if line.trim().is_empty() {
        return vec![String::new()];
    }

    let indent: String = line.chars().take_while(|c| *c == ' ').collect();
    let indent_len = indent.chars().count();
    let avail = width.saturating_sub(indent_len).max(1);

    let mut out = Vec::new();
    let mut current = indent.clone();
    for word in line.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        for piece in chars.chunks(avail) {
            let piece: String = piece.iter().collect();
            let current_len = current.chars().count();
            if current_len > indent_len && current_len + 1 + piece.chars().count() > width {
                out.push(std::mem::replace(&mut current, indent.clone()));
            }
            if current.chars().count() > indent_len {
                current.push(' ');
            }
            current.push_str(&piece);
        }
    }
    out.push(current);
    out
}
