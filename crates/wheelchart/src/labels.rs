use crate::geometry::Point;

/// Horizontal length of the leader-line stub next to a label.
pub const LEADER_STUB: f64 = 5.0;
/// Gap between the stub end and the text itself.
pub const TEXT_GAP: f64 = 3.0;
/// Rough glyph advance used for headless hit boxes; SVG consumers get the
/// real metrics from their text engine.
pub const APPROX_CHAR_WIDTH: f64 = 7.0;
pub const LABEL_FONT_SIZE: f64 = 12.0;

/// Which half of the circle the anchor fell in; decides text alignment
/// and leader direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSide {
    Left,
    Right,
}

impl LabelSide {
    pub fn of(anchor: Point, center_x: f64) -> Self {
        if anchor.x < center_x {
            Self::Left
        } else {
            Self::Right
        }
    }

    /// SVG `text-anchor` value: left-half labels end at the diagram,
    /// right-half labels start away from it.
    pub fn text_anchor(&self) -> &'static str {
        match self {
            Self::Left => "end",
            Self::Right => "start",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    pub anchor: Point,
    pub side: LabelSide,
    /// Leader runs from the outer stub point to the anchor.
    pub leader: (Point, Point),
    pub text_pos: Point,
}

impl LabelPlacement {
    fn at(anchor: Point, center_x: f64) -> Self {
        let side = LabelSide::of(anchor, center_x);
        let stub = match side {
            LabelSide::Left => Point::new(anchor.x - LEADER_STUB, anchor.y),
            LabelSide::Right => Point::new(anchor.x + LEADER_STUB, anchor.y),
        };
        let text_pos = match side {
            LabelSide::Left => Point::new(stub.x - TEXT_GAP, anchor.y),
            LabelSide::Right => Point::new(stub.x + TEXT_GAP, anchor.y),
        };
        Self {
            anchor,
            side,
            leader: (stub, anchor),
            text_pos,
        }
    }

    /// Approximate pointer-target rectangle for `text` rendered at this
    /// placement: `(min, max)` corners.
    pub fn hit_box(&self, text: &str) -> (Point, Point) {
        let width = text.chars().count() as f64 * APPROX_CHAR_WIDTH;
        let half_height = LABEL_FONT_SIZE * 0.7;
        let (x0, x1) = match self.side {
            LabelSide::Left => (self.text_pos.x - width, self.text_pos.x),
            LabelSide::Right => (self.text_pos.x, self.text_pos.x + width),
        };
        (
            Point::new(x0, self.text_pos.y - half_height),
            Point::new(x1, self.text_pos.y + half_height),
        )
    }

    pub fn contains(&self, text: &str, p: Point) -> bool {
        let (min, max) = self.hit_box(text);
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }
}

/// One placement per anchor, index-aligned with the segment order.
pub fn place_labels(anchors: &[Point], center_x: f64) -> Vec<LabelPlacement> {
    anchors
        .iter()
        .map(|anchor| LabelPlacement::at(*anchor, center_x))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_half_anchors_lead_outward_left() {
        let placement = &place_labels(&[Point::new(40.0, 80.0)], 100.0)[0];
        assert_eq!(placement.side, LabelSide::Left);
        assert_eq!(placement.side.text_anchor(), "end");
        assert_eq!(placement.leader.0, Point::new(35.0, 80.0));
        assert_eq!(placement.leader.1, Point::new(40.0, 80.0));
        assert!(placement.text_pos.x < placement.leader.0.x);
    }

    #[test]
    fn right_half_anchors_mirror() {
        let placement = &place_labels(&[Point::new(160.0, 80.0)], 100.0)[0];
        assert_eq!(placement.side, LabelSide::Right);
        assert_eq!(placement.side.text_anchor(), "start");
        assert_eq!(placement.leader.0, Point::new(165.0, 80.0));
        assert!(placement.text_pos.x > placement.leader.0.x);
    }

    #[test]
    fn dead_center_counts_as_right() {
        let placement = &place_labels(&[Point::new(100.0, 20.0)], 100.0)[0];
        assert_eq!(placement.side, LabelSide::Right);
    }

    #[test]
    fn hit_box_extends_away_from_the_wheel() {
        let placement = &place_labels(&[Point::new(160.0, 80.0)], 100.0)[0];
        let text = "Systems";
        assert!(placement.contains(text, Point::new(placement.text_pos.x + 10.0, 80.0)));
        assert!(!placement.contains(text, Point::new(placement.text_pos.x - 10.0, 80.0)));
        assert!(!placement.contains(text, Point::new(placement.text_pos.x + 10.0, 120.0)));
    }
}
