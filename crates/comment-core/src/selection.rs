use crate::snapshot::Snapshot;
use crate::span::{Version, VirtualPoint, VirtualSpan};

/// Which end of a selection the caret is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionDirection {
    /// The caret (active point) is at or after the anchor.
    #[default]
    Forward,
    /// The caret is before the anchor.
    Backward,
}

/// A user selection: an anchor and an active (caret) point in one snapshot version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    /// Snapshot version the points refer to.
    pub version: Version,
    /// Where the selection started.
    pub anchor: VirtualPoint,
    /// Where the caret is.
    pub active: VirtualPoint,
}

impl Selection {
    /// Create a selection from `anchor` to `active`.
    pub fn new(version: Version, anchor: VirtualPoint, active: VirtualPoint) -> Self {
        Self {
            version,
            anchor,
            active,
        }
    }

    /// A collapsed selection.
    pub fn caret(version: Version, point: VirtualPoint) -> Self {
        Self::new(version, point, point)
    }

    /// Rebuild a selection over `span`, keeping the caret on the side `direction` names.
    pub fn from_span(span: VirtualSpan, direction: SelectionDirection) -> Self {
        match direction {
            SelectionDirection::Forward => Self::new(span.version, span.start, span.end),
            SelectionDirection::Backward => Self::new(span.version, span.end, span.start),
        }
    }

    /// Forward unless the caret is before the anchor.
    pub fn direction(&self) -> SelectionDirection {
        selection_direction(self.anchor, self.active)
    }

    /// Returns `true` for a backward selection.
    pub fn is_reversed(&self) -> bool {
        self.direction() == SelectionDirection::Backward
    }

    /// Returns `true` if anchor and caret coincide.
    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    /// The ordered span between anchor and caret.
    pub fn span(&self) -> VirtualSpan {
        let (start, end) = selection_min_max(self);
        VirtualSpan::new(self.version, start, end)
    }
}

/// Direction of a selection from `anchor` to `active`.
pub fn selection_direction(anchor: VirtualPoint, active: VirtualPoint) -> SelectionDirection {
    if anchor <= active {
        SelectionDirection::Forward
    } else {
        SelectionDirection::Backward
    }
}

/// The selection's endpoints in document order.
pub fn selection_min_max(selection: &Selection) -> (VirtualPoint, VirtualPoint) {
    if selection.anchor <= selection.active {
        (selection.anchor, selection.active)
    } else {
        (selection.active, selection.anchor)
    }
}

/// Returns `true` if `point` lies within the selection, endpoints included.
pub fn selection_contains_point_inclusive(selection: &Selection, point: VirtualPoint) -> bool {
    let (min, max) = selection_min_max(selection);
    min <= point && point <= max
}

/// Sort `selections`, merge overlapping ones and drop exact duplicates.
///
/// All selections must refer to the same version. Returns the normalized list and the new
/// index of the selection holding the primary caret.
pub fn normalize_selections(
    mut selections: Vec<Selection>,
    primary_index: usize,
) -> (Vec<Selection>, usize) {
    let Some(first) = selections.first() else {
        return (selections, 0);
    };

    let primary_active = selections
        .get(primary_index)
        .map_or(first.active, |s| s.active);

    selections.sort_by(|a, b| {
        let (a_min, a_max) = selection_min_max(a);
        let (b_min, b_max) = selection_min_max(b);
        a_min
            .cmp(&b_min)
            .then_with(|| a_max.cmp(&b_max))
            .then_with(|| a.active.cmp(&b.active))
    });

    // Touching selections stay separate: a caret at the end of one selection is its own span.
    let mut merged: Vec<Selection> = Vec::with_capacity(selections.len());
    for selection in selections {
        let Some(last) = merged.last_mut() else {
            merged.push(selection);
            continue;
        };

        let (last_min, last_max) = selection_min_max(last);
        let (min, max) = selection_min_max(&selection);

        if min < last_max {
            // The union keeps the direction of the earlier selection.
            let union = VirtualSpan::new(last.version, last_min, last_max.max(max));
            *last = Selection::from_span(union, last.direction());
        } else if min == last_min && max == last_max {
            continue;
        } else {
            merged.push(selection);
        }
    }

    let primary_index = merged
        .iter()
        .position(|s| selection_contains_point_inclusive(s, primary_active))
        .unwrap_or_else(|| merged.len().saturating_sub(1));

    (merged, primary_index)
}

/// One selection per line between two `(line, column)` corners.
///
/// Columns past a line's end land in virtual space. The primary selection is the one on the
/// active corner's line.
pub fn box_selections(
    snapshot: &Snapshot,
    anchor: (usize, usize),
    active: (usize, usize),
) -> (Vec<Selection>, usize) {
    let last_line = snapshot.line_count().saturating_sub(1);
    let start_line = anchor.0.min(active.0).min(last_line);
    let end_line = anchor.0.max(active.0).min(last_line);

    let selections: Vec<Selection> = (start_line..=end_line)
        .map(|line| {
            Selection::new(
                snapshot.version(),
                snapshot.virtual_point(line, anchor.1),
                snapshot.virtual_point(line, active.1),
            )
        })
        .collect();

    let primary_index = active.0.min(last_line) - start_line;
    normalize_selections(selections, primary_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(anchor: usize, active: usize) -> Selection {
        Selection::new(Version(0), VirtualPoint::new(anchor), VirtualPoint::new(active))
    }

    #[test]
    fn test_span_orders_endpoints() {
        let backward = sel(9, 3);
        assert!(backward.is_reversed());
        assert_eq!(backward.span(), VirtualSpan::from_offsets(Version(0), 3, 9));

        let rebuilt = Selection::from_span(backward.span(), SelectionDirection::Backward);
        assert_eq!(rebuilt, backward);
    }

    #[test]
    fn test_normalize_merges_overlaps() {
        let (merged, primary) = normalize_selections(vec![sel(6, 10), sel(0, 4), sel(2, 8)], 1);
        assert_eq!(merged, vec![sel(0, 10)]);
        assert_eq!(primary, 0);
    }

    #[test]
    fn test_normalize_keeps_touching_and_drops_duplicates() {
        let (merged, primary) = normalize_selections(vec![sel(4, 4), sel(0, 4), sel(4, 4)], 0);
        assert_eq!(merged, vec![sel(0, 4), sel(4, 4)]);
        // The primary caret at 4 is inside the first selection, inclusively.
        assert_eq!(primary, 0);
    }

    #[test]
    fn test_normalize_empty() {
        let (merged, primary) = normalize_selections(Vec::new(), 3);
        assert!(merged.is_empty());
        assert_eq!(primary, 0);
    }

    #[test]
    fn test_box_selections_use_virtual_space() {
        let snapshot = Snapshot::from_text("abcdef\nab\nabcdef");
        let (selections, primary) = box_selections(&snapshot, (0, 1), (2, 4));

        assert_eq!(selections.len(), 3);
        assert_eq!(primary, 2);
        assert_eq!(selections[0], sel(1, 4));
        assert_eq!(
            selections[1],
            Selection::new(
                Version(0),
                VirtualPoint::new(8),
                VirtualPoint::with_virtual_spaces(9, 2),
            )
        );
        assert_eq!(selections[2], sel(11, 14));
    }
}
