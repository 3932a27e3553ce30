//! Character spans over document text
//!
//! Pure interval arithmetic with no annotation knowledge. All offsets are
//! Unicode code point offsets into the document text.

use serde::{Deserialize, Serialize};

/// A half-open character range `[begin, end)`, `begin <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    pub begin: usize,
    pub end: usize,
}

impl Span {
    pub fn new(begin: usize, end: usize) -> Self {
        debug_assert!(begin <= end, "span begin must not exceed end");
        Self { begin, end }
    }

    /// Create a zero-width span at a single offset
    pub fn point(offset: usize) -> Self {
        Self {
            begin: offset,
            end: offset,
        }
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    /// Check if this span is zero-width
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Check if an offset lies within this span (end exclusive)
    pub fn contains_offset(&self, offset: usize) -> bool {
        offset >= self.begin && offset < self.end
    }

    /// Check if an offset lies strictly inside this span (both ends exclusive)
    pub fn contains_offset_strictly(&self, offset: usize) -> bool {
        offset > self.begin && offset < self.end
    }

    /// Check if `other` is fully contained in this span
    pub fn covers(&self, other: Span) -> bool {
        other.begin >= self.begin && other.end <= self.end
    }

    /// Check if two spans share at least one character
    pub fn overlaps(&self, other: Span) -> bool {
        self.begin < other.end && other.begin < self.end
    }

    /// Check if two spans cover exactly the same range (stacking)
    pub fn stacks_on(&self, other: Span) -> bool {
        self == &other
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.begin, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_contains_offset() {
        let span = Span::new(2, 5);

        assert!(span.contains_offset(2));
        assert!(span.contains_offset(4));
        assert!(!span.contains_offset(5)); // Exclusive end
        assert!(!span.contains_offset(1));
    }

    #[test]
    fn test_span_strict_interior() {
        let span = Span::new(2, 5);

        assert!(!span.contains_offset_strictly(2));
        assert!(span.contains_offset_strictly(3));
        assert!(span.contains_offset_strictly(4));
        assert!(!span.contains_offset_strictly(5));
    }

    #[test]
    fn test_span_overlap() {
        let a = Span::new(0, 4);
        let b = Span::new(3, 6);
        let c = Span::new(4, 6);

        assert!(a.overlaps(b));
        assert!(b.overlaps(a));
        assert!(!a.overlaps(c)); // Touching spans do not overlap
        assert!(!c.overlaps(a));
    }

    #[test]
    fn test_zero_width_span_never_overlaps() {
        let point = Span::point(3);
        let span = Span::new(0, 6);

        assert!(!point.overlaps(span));
        assert!(span.contains_offset(3));
    }

    #[test]
    fn test_span_covers() {
        let outer = Span::new(0, 10);

        assert!(outer.covers(Span::new(0, 10)));
        assert!(outer.covers(Span::new(3, 7)));
        assert!(!outer.covers(Span::new(3, 11)));
    }
}
