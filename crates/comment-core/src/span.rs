//! Points and spans over a versioned snapshot.
//!
//! Spans do not borrow their snapshot. They carry the [`Version`] they were computed against
//! and must be translated (see [`crate::TextHost::translate_span`]) before being used with a
//! newer snapshot.

use crate::snapshot::Snapshot;
use std::cmp::Ordering;
use std::fmt;

/// Generation number of a snapshot within one text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version(pub u64);

impl Version {
    /// The following generation.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Which side of text inserted exactly at a point the point ends up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointTrackingMode {
    /// The point moves to after the inserted text.
    Positive,
    /// The point stays before the inserted text.
    Negative,
}

/// How span edges react to text inserted exactly at them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanTrackingMode {
    /// Text inserted at either edge becomes part of the span.
    EdgeInclusive,
    /// Text inserted at either edge stays outside the span.
    EdgeExclusive,
}

impl SpanTrackingMode {
    pub(crate) fn start_mode(self) -> PointTrackingMode {
        match self {
            Self::EdgeInclusive => PointTrackingMode::Negative,
            Self::EdgeExclusive => PointTrackingMode::Positive,
        }
    }

    pub(crate) fn end_mode(self) -> PointTrackingMode {
        match self {
            Self::EdgeInclusive => PointTrackingMode::Positive,
            Self::EdgeExclusive => PointTrackingMode::Negative,
        }
    }
}

/// A character offset plus optional virtual space past the end of its line.
///
/// `virtual_spaces > 0` is only meaningful when `position` is the physical end of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VirtualPoint {
    /// Absolute character offset.
    pub position: usize,
    /// Columns of virtual space past `position`.
    pub virtual_spaces: usize,
}

impl VirtualPoint {
    /// A point without virtual space.
    pub fn new(position: usize) -> Self {
        Self {
            position,
            virtual_spaces: 0,
        }
    }

    /// A point `virtual_spaces` columns past `position`.
    pub fn with_virtual_spaces(position: usize, virtual_spaces: usize) -> Self {
        Self {
            position,
            virtual_spaces,
        }
    }

    /// Returns `true` if the point lies in virtual space.
    pub fn is_in_virtual_space(&self) -> bool {
        self.virtual_spaces > 0
    }
}

impl Ord for VirtualPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.position
            .cmp(&other.position)
            .then_with(|| self.virtual_spaces.cmp(&other.virtual_spaces))
    }
}

impl PartialOrd for VirtualPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<usize> for VirtualPoint {
    fn from(position: usize) -> Self {
        Self::new(position)
    }
}

/// A physical range of character offsets (`start <= end`) within one snapshot version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Snapshot version the offsets refer to.
    pub version: Version,
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl Span {
    /// Create a span; `start` and `end` are swapped if given out of order.
    pub fn new(version: Version, start: usize, end: usize) -> Self {
        Self {
            version,
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The covered text.
    pub fn text(&self, snapshot: &Snapshot) -> String {
        snapshot.text_range(self.start, self.end)
    }
}

/// A span whose endpoints may lie in virtual space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VirtualSpan {
    /// Snapshot version the points refer to.
    pub version: Version,
    /// Start point (`start <= end`).
    pub start: VirtualPoint,
    /// End point.
    pub end: VirtualPoint,
}

impl VirtualSpan {
    /// Create a span from two points.
    pub fn new(version: Version, start: VirtualPoint, end: VirtualPoint) -> Self {
        Self {
            version,
            start,
            end,
        }
    }

    /// An empty span (caret) at `point`.
    pub fn caret(version: Version, point: VirtualPoint) -> Self {
        Self::new(version, point, point)
    }

    /// A span over physical offsets `start..end`, without virtual space.
    pub fn from_offsets(version: Version, start: usize, end: usize) -> Self {
        Self::new(version, VirtualPoint::new(start), VirtualPoint::new(end))
    }

    /// Returns `true` if both endpoints are equal, including their virtual space.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if either endpoint lies in virtual space.
    pub fn is_in_virtual_space(&self) -> bool {
        self.start.is_in_virtual_space() || self.end.is_in_virtual_space()
    }

    /// The physical span, dropping virtual space.
    pub fn span(&self) -> Span {
        Span::new(self.version, self.start.position, self.end.position)
    }

    /// Physical length in characters.
    pub fn len(&self) -> usize {
        self.span().len()
    }

    /// The covered physical text.
    pub fn text(&self, snapshot: &Snapshot) -> String {
        self.span().text(snapshot)
    }
}

impl From<Span> for VirtualSpan {
    fn from(span: Span) -> Self {
        Self::from_offsets(span.version, span.start, span.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_virtual_point_ordering() {
        let a = VirtualPoint::new(4);
        let b = VirtualPoint::with_virtual_spaces(4, 2);
        let c = VirtualPoint::new(5);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_virtual_span_emptiness_counts_virtual_space() {
        let v = Version(0);
        let caret = VirtualSpan::caret(v, VirtualPoint::with_virtual_spaces(16, 2));
        assert!(caret.is_empty());
        assert!(caret.is_in_virtual_space());
        assert_eq!(caret.len(), 0);

        let virtual_only = VirtualSpan::new(
            v,
            VirtualPoint::new(16),
            VirtualPoint::with_virtual_spaces(16, 3),
        );
        assert!(!virtual_only.is_empty());
        assert!(virtual_only.span().is_empty());
    }

    #[test]
    fn test_span_new_orders_endpoints() {
        let span = Span::new(Version(3), 9, 2);
        assert_eq!((span.start, span.end), (2, 9));
        assert_eq!(span.len(), 7);
    }
}
