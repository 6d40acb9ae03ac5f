use std::ops::Range;

use crate::ConfigError;

/// Half-open range of listing page numbers, `[first, end)`.
///
/// Page numbers are 1-based, so `first` is never zero. An empty range
/// (`first == end`) is valid and yields no pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    first: u32,
    end: u32,
}

impl PageRange {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPageRange`] when `first` is `0` or
    /// `end < first`.
    pub fn new(first: u32, end: u32) -> Result<Self, ConfigError> {
        if first == 0 || end < first {
            return Err(ConfigError::InvalidPageRange { first, end });
        }
        Ok(Self { first, end })
    }

    #[must_use]
    pub fn first(&self) -> u32 {
        self.first
    }

    #[must_use]
    pub fn end(&self) -> u32 {
        self.end
    }

    #[must_use]
    pub fn len(&self) -> usize {
        (self.end - self.first) as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first == self.end
    }

    /// Page numbers in ascending order.
    #[must_use]
    pub fn pages(&self) -> Range<u32> {
        self.first..self.end
    }
}

impl IntoIterator for PageRange {
    type Item = u32;
    type IntoIter = Range<u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages()
    }
}
