use std::fmt::{Display, Formatter};
use std::ops::{Range, Shr};

use derive_getters::Dissolve;
use eyre::{eyre, Report, Result};

/// Span is a half-open run of genome positions [start, start + len) occupied by a transposable
/// element. Spans are stored as start + length rather than as a Rust-native Range:
/// - Empty spans (len == 0) are prohibited, every TE occupies at least one position.
/// - Spans never wrap around the end of a circular genome, so start + len is always a valid
///   exclusive end in the linear coordinates of the genome.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Dissolve)]
pub struct Span {
    start: usize,
    len: usize,
}

#[allow(clippy::len_without_is_empty)]
impl Span {
    pub fn new(start: usize, len: usize) -> Result<Self> {
        if len == 0 {
            return Err(eyre!("Invalid span: length must be positive"));
        }
        match start.checked_add(len) {
            Some(_) => Ok(Self { start, len }),
            None => Err(eyre!("Invalid span: {start} + {len} overflows")),
        }
    }

    /// First position covered by the span.
    #[inline(always)]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Exclusive end position of the span.
    #[inline(always)]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Number of positions covered by the span.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the span covers a given position.
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end()
    }

    /// Check if the span shares at least one position with another span.
    /// Touching spans don't intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// Move the span downstream by `shift` positions.
    pub fn shift(&mut self, shift: usize) -> &mut Self {
        self.start += shift;
        self
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

impl TryFrom<Range<usize>> for Span {
    type Error = Report;

    fn try_from(value: Range<usize>) -> Result<Self, Self::Error> {
        if value.start >= value.end {
            return Err(eyre!("Invalid span: start >= end"));
        }
        Self::new(value.start, value.end - value.start)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.range()
    }
}

impl PartialEq<Range<usize>> for Span {
    fn eq(&self, other: &Range<usize>) -> bool {
        self.start == other.start && self.end() == other.end
    }
}

impl Shr<usize> for Span {
    type Output = Self;

    fn shr(mut self, shift: usize) -> Self::Output {
        self.start += shift;
        self
    }
}
