use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("page numbers start at 1")]
    ZeroPage,
    #[error("invalid page range {0:?}, expected FIRST-LAST or a single page number")]
    Malformed(String),
}

/// Zero-based, inclusive range of page indices.
///
/// A range whose `start` is past its `end` is valid and selects nothing.
/// Indices are not checked against any document here; out-of-bounds
/// indices are skipped at extraction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: usize,
    pub end: usize,
}

impl PageRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Build a range from physical (one-based) page numbers, as shown by
    /// PDF viewers.
    pub fn from_one_based(first: usize, last: usize) -> Result<Self, RangeError> {
        if first == 0 || last == 0 {
            return Err(RangeError::ZeroPage);
        }
        Ok(Self::new(first - 1, last - 1))
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Number of indices requested, regardless of document length.
    /// Saturates at `usize::MAX` for `0..=usize::MAX`.
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start).saturating_add(1)
        }
    }

    /// Requested indices that exist in a document of `page_count` pages,
    /// ascending.
    pub fn indices_within(&self, page_count: usize) -> RangeInclusive<usize> {
        match self.in_bounds(page_count) {
            0 => RangeInclusive::new(1, 0),
            n => self.start..=self.start + (n - 1),
        }
    }

    /// Number of requested indices that fall inside a document of
    /// `page_count` pages.
    pub fn in_bounds(&self, page_count: usize) -> usize {
        if self.is_empty() || self.start >= page_count {
            return 0;
        }
        self.end.min(page_count - 1) - self.start + 1
    }
}

/// One-based page number of a zero-based index. Widened so that
/// `usize::MAX` still has a successor.
pub fn page_number(index: usize) -> u128 {
    index as u128 + 1
}

/// Displays the range in one-based page numbers, e.g. `154-164`.
impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", page_number(self.start), page_number(self.end))
    }
}

/// Parses one-based page numbers: `"154-164"` or `"154"`.
impl FromStr for PageRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| RangeError::Malformed(s.to_string()))
        };

        match s.split_once('-') {
            Some((first, last)) => Self::from_one_based(parse(first)?, parse(last)?),
            None => {
                let page = parse(s)?;
                Self::from_one_based(page, page)
            }
        }
    }
}
