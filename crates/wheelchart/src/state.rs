use crate::segment::{Segment, SegmentId};

/// How many rings the wheel lays out: the deepest segment wins, the
/// caller's default is the floor, and there is always at least one ring.
pub fn effective_layer_count(segments: &[Segment], default_layers: usize) -> usize {
    segments
        .iter()
        .filter_map(|s| s.layer_count)
        .fold(default_layers, usize::max)
        .max(1)
}

/// Transient hover state plus the selection-follows-hover bookkeeping.
///
/// Selection itself is owned by the caller; this only mirrors it into a
/// highlight index when the selected id changes to one present in the
/// segment list.
#[derive(Debug, Clone, Default)]
pub struct HighlightState {
    hover: Option<usize>,
    synced: Option<SegmentId>,
}

impl HighlightState {
    pub fn hover(&self) -> Option<usize> {
        self.hover
    }

    /// Returns whether the visible state changed.
    pub fn highlight(&mut self, index: usize) -> bool {
        let changed = self.hover != Some(index);
        self.hover = Some(index);
        changed
    }

    pub fn clear(&mut self) -> bool {
        let changed = self.hover.is_some();
        self.hover = None;
        changed
    }

    /// Snaps the highlight to the selected segment when the selection
    /// changes to an id present in `segments`.
    pub fn sync_selection(
        &mut self,
        segments: &[Segment],
        selected: Option<&SegmentId>,
    ) -> bool {
        if self.synced.as_ref() == selected {
            return false;
        }
        self.synced = selected.cloned();

        match selected.and_then(|id| segments.iter().position(|s| &s.id == id)) {
            Some(index) => self.highlight(index),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(layer_counts: &[Option<usize>]) -> Vec<Segment> {
        layer_counts
            .iter()
            .enumerate()
            .map(|(i, count)| {
                let mut s = Segment::new(format!("s{i}"), format!("Segment {i}"));
                s.layer_count = *count;
                s
            })
            .collect()
    }

    #[test]
    fn deepest_segment_wins_over_default() {
        let segs = segments(&[Some(2), Some(3), Some(1), Some(4)]);
        assert_eq!(effective_layer_count(&segs, 1), 4);
        assert_eq!(effective_layer_count(&segs, 6), 6);
    }

    #[test]
    fn empty_segments_fall_back_to_default_floored_at_one() {
        assert_eq!(effective_layer_count(&[], 3), 3);
        assert_eq!(effective_layer_count(&[], 0), 1);
        let unspecified = segments(&[None, None]);
        assert_eq!(effective_layer_count(&unspecified, 2), 2);
    }

    #[test]
    fn highlight_set_and_clear_round_trip() {
        let mut state = HighlightState::default();
        assert_eq!(state.hover(), None);

        assert!(state.highlight(2));
        assert_eq!(state.hover(), Some(2));
        assert!(!state.highlight(2));

        assert!(state.clear());
        assert_eq!(state.hover(), None);
        assert!(!state.clear());
    }

    #[test]
    fn selection_drives_highlight() {
        let segs = segments(&[None, None, None]);
        let mut state = HighlightState::default();

        let id = SegmentId::from("s1");
        assert!(state.sync_selection(&segs, Some(&id)));
        assert_eq!(state.hover(), Some(1));

        // same selection again is a no-op even after a manual clear
        state.clear();
        assert!(!state.sync_selection(&segs, Some(&id)));
        assert_eq!(state.hover(), None);

        // re-selecting after a change resynchronizes
        state.sync_selection(&segs, None);
        assert!(state.sync_selection(&segs, Some(&id)));
        assert_eq!(state.hover(), Some(1));
    }

    #[test]
    fn unknown_selection_leaves_hover_alone() {
        let segs = segments(&[None, None]);
        let mut state = HighlightState::default();
        state.highlight(0);

        let ghost = SegmentId::from("missing");
        assert!(!state.sync_selection(&segs, Some(&ghost)));
        assert_eq!(state.hover(), Some(0));
    }
}
