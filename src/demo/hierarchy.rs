//! What each layer group learns, with the current stage's group outlined.

use super::{Demo, label};
use crate::model::StageId;
use crate::surface::shapes::{ArrowStyle, draw_arrow};
use crate::surface::{Color, DrawingSurface, Font, TextAlign};

/// One box of the hierarchy.
#[derive(Debug, Clone, Copy)]
pub struct LayerGroup {
    pub name: &'static str,
    pub features: [&'static str; 2],
    pub size: f64,
    pub color: Color,
}

pub const GROUPS: [LayerGroup; 5] = [
    LayerGroup {
        name: "Input",
        features: ["Raw Pixels", "Colors"],
        size: 80.0,
        color: Color::BLUE,
    },
    LayerGroup {
        name: "Conv1",
        features: ["Edges", "Corners"],
        size: 70.0,
        color: Color::GREEN,
    },
    LayerGroup {
        name: "Conv2",
        features: ["Textures", "Patterns"],
        size: 70.0,
        color: Color::AMBER,
    },
    LayerGroup {
        name: "Conv3-5",
        features: ["Object Parts", "Shapes"],
        size: 70.0,
        color: Color::hex(0x8b5cf6),
    },
    LayerGroup {
        name: "FC",
        features: ["Objects", "Semantics"],
        size: 70.0,
        color: Color::hex(0xec4899),
    },
];

const LEFT: f64 = 30.0;
const TOP: f64 = 80.0;
const GAP: f64 = 40.0;

/// Index into [`GROUPS`] to outline for `stage`.
pub fn highlight_index(stage: StageId) -> Option<usize> {
    match stage {
        1..=2 => Some(1),
        3..=4 => Some(2),
        5..=6 => Some(3),
        7..=9 => Some(4),
        _ => None,
    }
}

fn group_x(index: usize) -> f64 {
    LEFT + GROUPS[..index].iter().map(|g| g.size + GAP).sum::<f64>()
}

/// Single-frame feature hierarchy diagram.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureHierarchyDemo {
    stage: Option<StageId>,
}

impl FeatureHierarchyDemo {
    pub fn new(stage: Option<StageId>) -> Self {
        Self { stage }
    }
}

impl Demo for FeatureHierarchyDemo {
    fn name(&self) -> &'static str {
        "feature-hierarchy"
    }

    fn canvas_size(&self) -> (f64, f64) {
        (800.0, 200.0)
    }

    fn render_frame(&mut self, surface: &mut dyn DrawingSurface) {
        surface.clear();
        surface.set_global_alpha(1.0);

        label(
            surface,
            "What Each Layer Learns (Feature Hierarchy)",
            20.0,
            25.0,
            Font::bold(14.0),
            Color::INK,
            TextAlign::Left,
        );

        for (i, group) in GROUPS.iter().enumerate() {
            let x = group_x(i);

            surface.set_fill(group.color.into());
            surface.set_global_alpha(0.2);
            surface.fill_rect(x, TOP, group.size, group.size);
            surface.set_global_alpha(1.0);
            surface.set_stroke(group.color);
            surface.set_line_width(3.0);
            surface.stroke_rect(x, TOP, group.size, group.size);

            let mid = x + group.size / 2.0;
            label(surface, group.name, mid, TOP - 10.0, Font::bold(12.0), Color::INK, TextAlign::Center);
            for (j, feature) in group.features.iter().enumerate() {
                label(
                    surface,
                    feature,
                    mid,
                    TOP + group.size + 15.0 + j as f64 * 13.0,
                    Font::new(10.0),
                    Color::MUTED,
                    TextAlign::Center,
                );
            }

            if i + 1 < GROUPS.len() {
                let y = TOP + group.size / 2.0;
                draw_arrow(
                    surface,
                    (x + group.size + 5.0, y),
                    (x + group.size + 35.0, y),
                    ArrowStyle {
                        color: Color::MUTED,
                        ..ArrowStyle::default()
                    },
                );
            }
        }
        surface.set_text_align(TextAlign::Left);

        if let Some(index) = self.stage.and_then(highlight_index) {
            let group = &GROUPS[index];
            surface.set_stroke(Color::AMBER);
            surface.set_line_width(4.0);
            surface.stroke_rect(
                group_x(index) - 3.0,
                TOP - 3.0,
                group.size + 6.0,
                group.size + 6.0,
            );
        }
    }

    fn is_animated(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};

    #[test]
    fn test_highlight_index_groups_stages() {
        let groups: Vec<Option<usize>> = (0..=10).map(highlight_index).collect();
        assert_eq!(
            groups,
            vec![
                None,
                Some(1),
                Some(1),
                Some(2),
                Some(2),
                Some(3),
                Some(3),
                Some(4),
                Some(4),
                Some(4),
                None
            ]
        );
    }

    #[test]
    fn test_group_positions() {
        assert_eq!(group_x(0), 30.0);
        assert_eq!(group_x(1), 150.0);
        assert_eq!(group_x(2), 260.0);
    }

    #[test]
    fn test_highlight_outline_drawn_only_with_stage() {
        let outline = |ops: &[DrawOp]| {
            ops.iter()
                .filter(|op| matches!(op, DrawOp::StrokeRect { color, .. } if *color == Color::AMBER))
                .count()
        };

        let mut surface = RecordingSurface::new(800.0, 200.0);
        FeatureHierarchyDemo::new(Some(5)).render_frame(&mut surface);
        // Conv2's own border is amber too.
        assert_eq!(outline(surface.ops()), 2);

        let mut surface = RecordingSurface::new(800.0, 200.0);
        FeatureHierarchyDemo::new(None).render_frame(&mut surface);
        assert_eq!(outline(surface.ops()), 1);
    }
}
