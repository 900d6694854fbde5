use crate::chart::WheelLayout;
use crate::geometry::Arc;
use crate::labels::{LABEL_FONT_SIZE, LabelPlacement};
use crate::segment::Segment;
use crate::svg::SvgWriter;
use crate::theme::{Color, Theme};
use std::iter::zip;

pub const OPACITY_NORMAL: f64 = 0.85;
pub const OPACITY_DISABLED: f64 = 0.5;
pub const STROKE_NORMAL: f64 = 2.0;
pub const STROKE_HIGHLIGHTED: f64 = 3.0;
pub const LABEL_FAINT_OPACITY: f64 = 0.65;
pub const TITLE_FONT_SIZE: f64 = 14.0;
const LEADER_DASH: [f64; 2] = [2.0, 2.0];
const ADVANCED_MARKER: &str = " ✦";

/// Resolved appearance of one surviving (segment, layer) pair.
#[derive(Debug, Clone, PartialEq)]
struct LayerStyle<'a> {
    color: Color,
    opacity: f64,
    stroke_width: f64,
    dash: &'a [f64],
}

struct SectorRenderer<'a> {
    segment: &'a Segment,
    sector: &'a [Arc],
    hovered: bool,
}

impl<'a> SectorRenderer<'a> {
    fn new(segment: &'a Segment, sector: &'a [Arc], hovered: bool) -> Self {
        Self {
            segment,
            sector,
            hovered,
        }
    }

    /// Visibility and style resolution for one layer; `None` means the
    /// layer is not rendered for this segment.
    fn layer_style(&self, layer: usize, theme: &Theme) -> Option<LayerStyle<'a>> {
        if !self.segment.draws_layer(layer) {
            return None;
        }

        let color = if self.segment.is_grayed(layer) {
            theme.neutral_gray
        } else {
            self.segment.color
        };
        let opacity = if self.segment.disabled {
            OPACITY_DISABLED
        } else {
            OPACITY_NORMAL
        };
        let stroke_width = if self.hovered {
            STROKE_HIGHLIGHTED
        } else {
            STROKE_NORMAL
        };

        Some(LayerStyle {
            color,
            opacity,
            stroke_width,
            dash: self.segment.dash.for_layer(layer),
        })
    }

    fn draw(&self, w: &mut SvgWriter, theme: &Theme, large_arc: bool) {
        w.open_group("sector");
        for (layer, arc) in self.sector.iter().enumerate() {
            let Some(style) = self.layer_style(layer, theme) else {
                continue;
            };
            if arc.is_degenerate() {
                log::trace!("skipping degenerate arc for '{}' layer {layer}", self.segment.id);
                continue;
            }
            w.stroke_path(
                &stroke_arc_d(arc, large_arc),
                style.color,
                style.stroke_width,
                style.opacity,
                style.dash,
            );
        }
        w.close_group();
    }
}

/// Arc command for the stroked ring path. The kernel emits start/end in
/// plain trigonometric convention with increasing angles, which is the
/// positive sweep direction in SVG's y-down coordinates.
fn stroke_arc_d(arc: &Arc, large_arc: bool) -> String {
    format!(
        "M {:.2} {:.2} A {:.2} {:.2} 0 {} 1 {:.2} {:.2}",
        arc.start.x,
        arc.start.y,
        arc.radius,
        arc.radius,
        if large_arc { 1 } else { 0 },
        arc.end.x,
        arc.end.y
    )
}

fn draw_label(
    w: &mut SvgWriter,
    segment: &Segment,
    placement: &LabelPlacement,
    hovered: bool,
    theme: &Theme,
) {
    if segment.hidden_label {
        return;
    }

    let mut text = segment.label.clone();
    if segment.advanced {
        text.push_str(ADVANCED_MARKER);
    }

    let (ink, opacity) = if hovered {
        (theme.label_ink, 1.0)
    } else {
        (theme.label_faint, LABEL_FAINT_OPACITY)
    };
    let (leader_ink, leader_dash): (Color, &[f64]) = if hovered {
        (theme.leader_strong, &[])
    } else {
        (theme.leader_faint, &LEADER_DASH)
    };

    w.open_group("label");
    w.line(placement.leader.0, placement.leader.1, leader_ink, 1.0, opacity, leader_dash);
    w.text(
        placement.text_pos,
        &text,
        placement.side.text_anchor(),
        ink,
        LABEL_FONT_SIZE,
        hovered,
        opacity,
    );
    w.close_group();
}

pub(crate) fn draw(
    w: &mut SvgWriter,
    layout: &WheelLayout,
    segments: &[Segment],
    hover: Option<usize>,
    theme: &Theme,
    title: Option<&str>,
) {
    if let Some(color) = theme.background {
        w.background(color);
    }

    if theme.draw_separators {
        w.open_group("separators");
        for (from, to) in &layout.separators {
            w.line(*from, *to, theme.separator_ink, 1.0, 1.0, &[]);
        }
        w.close_group();
    }

    // only a lone, near-full-circle sector spans past half a turn
    let large_arc = layout.params.sector_step() - layout.params.sector_spacing > 180.0;

    for (i, (segment, sector)) in zip(segments, &layout.sectors).enumerate() {
        SectorRenderer::new(segment, sector, hover == Some(i)).draw(w, theme, large_arc);
    }

    for (i, (segment, placement)) in zip(segments, &layout.labels).enumerate() {
        draw_label(w, segment, placement, hover == Some(i), theme);
    }

    if let Some(title) = title {
        w.text(
            layout.params.center,
            title,
            "middle",
            theme.title_ink,
            TITLE_FONT_SIZE,
            true,
            1.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::DashSpec;

    #[test]
    fn style_resolution_follows_the_priority_table() {
        let theme = Theme::default();
        let mut segment = Segment::new("a", "Alpha")
            .with_layer_count(3)
            .with_dash(DashSpec::PerLayer(vec![vec![], vec![4.0, 2.0], vec![2.0, 4.0]]));
        segment.grayed_layers = vec![1];

        let sector = Vec::new();
        let r = SectorRenderer::new(&segment, &sector, false);

        let l0 = r.layer_style(0, &theme).unwrap();
        assert_eq!(l0.color, segment.color);
        assert_eq!(l0.dash, &[] as &[f64]);
        assert!((l0.opacity - OPACITY_NORMAL).abs() < 1e-12);
        assert!((l0.stroke_width - STROKE_NORMAL).abs() < 1e-12);

        let l1 = r.layer_style(1, &theme).unwrap();
        assert_eq!(l1.color, theme.neutral_gray);
        assert_eq!(l1.dash, &[4.0, 2.0]);

        let l2 = r.layer_style(2, &theme).unwrap();
        assert_eq!(l2.dash, &[2.0, 4.0]);

        // truncated by layer_count even when the wheel is deeper
        assert!(r.layer_style(3, &theme).is_none());
    }

    #[test]
    fn hover_and_disabled_change_stroke_and_opacity() {
        let theme = Theme::default();
        let mut segment = Segment::new("a", "Alpha");
        segment.disabled = true;

        let sector = Vec::new();
        let r = SectorRenderer::new(&segment, &sector, true);
        let style = r.layer_style(0, &theme).unwrap();
        assert!((style.opacity - OPACITY_DISABLED).abs() < 1e-12);
        assert!((style.stroke_width - STROKE_HIGHLIGHTED).abs() < 1e-12);
    }

    #[test]
    fn hidden_layers_resolve_to_none() {
        let theme = Theme::default();
        let mut segment = Segment::new("a", "Alpha");
        segment.visible_layers = vec![0, 2];

        let sector = Vec::new();
        let r = SectorRenderer::new(&segment, &sector, false);
        assert!(r.layer_style(0, &theme).is_some());
        assert!(r.layer_style(1, &theme).is_none());
        assert!(r.layer_style(2, &theme).is_some());
    }
}
