//! Source positions for tokens, nodes and diagnostics.

use std::fmt;

/// Where a token or node starts, plus how many bytes it covers.
///
/// Lines and columns are 1-indexed. Columns count bytes, so a tab or a
/// multi-byte character advances them by its encoded width.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed, byte-based).
    pub col: u32,
    /// Length in bytes.
    pub len: u32,
}

impl Span {
    #[inline]
    pub fn new(line: u32, col: u32, len: u32) -> Self {
        Self { line, col, len }
    }

    /// A zero-length span, used for end of input and synthesized markers.
    #[inline]
    pub fn point(line: u32, col: u32) -> Self {
        Self { line, col, len: 0 }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Whether `self` starts strictly before `other`.
    #[inline]
    pub fn precedes(&self, other: &Span) -> bool {
        (self.line, self.col) < (other.line, other.col)
    }

    /// Span from the earlier start of the two to the end of the later one.
    ///
    /// Spans on different lines keep the start of the earlier span; the
    /// length then only approximates the covered text, which is enough to
    /// point a caret at the construct.
    pub fn merge(self, other: Span) -> Span {
        let (first, last) = if other.precedes(&self) {
            (other, self)
        } else {
            (self, other)
        };

        if first.line == last.line {
            let end = (first.col + first.len).max(last.col + last.len);
            Span::new(first.line, first.col, end - first.col)
        } else {
            Span::new(first.line, first.col, first.len + last.len)
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_is_empty() {
        assert!(Span::point(4, 2).is_empty());
        assert_eq!(Span::new(1, 1, 6).len(), 6);
    }

    #[test]
    fn display_is_line_col() {
        assert_eq!(Span::new(12, 7, 3).to_string(), "12:7");
        assert_eq!(format!("{:?}", Span::new(2, 1, 0)), "2:1");
    }

    #[test]
    fn merge_on_one_line() {
        // `a + b` with `a` at 1:3 and `b` at 1:7
        let merged = Span::new(1, 3, 1).merge(Span::new(1, 7, 1));
        assert_eq!(merged, Span::new(1, 3, 5));
    }

    #[test]
    fn merge_is_order_independent() {
        let a = Span::new(2, 10, 4);
        let b = Span::new(2, 1, 3);
        assert_eq!(a.merge(b), b.merge(a));
        assert_eq!(a.merge(b), Span::new(2, 1, 13));
    }

    #[test]
    fn merge_contained_span() {
        let outer = Span::new(1, 1, 20);
        assert_eq!(outer.merge(Span::new(1, 5, 2)), outer);
    }

    #[test]
    fn merge_across_lines_keeps_earliest_start() {
        let merged = Span::new(3, 5, 2).merge(Span::new(1, 9, 4));
        assert_eq!(merged.line, 1);
        assert_eq!(merged.col, 9);
        assert_eq!(merged.len, 6);
    }
}
