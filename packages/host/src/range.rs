use crate::error::{HostError, HostResult};

/// A pair of child offsets inside one container.
///
/// Ranges are plain values: they do not follow later mutations of the container.
/// Host operations that take `&mut HostRange` adjust only the range they were
/// handed, the same way a browser range adjusts itself for that one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRange<N> {
    container: N,
    start: usize,
    end: usize,
}

impl<N> HostRange<N> {
    /// Build a range without checking it against the container's child count.
    ///
    /// Prefer [`crate::HostTree::range`], which validates the offsets.
    pub fn new(container: N, start: usize, end: usize) -> HostResult<Self> {
        if start > end {
            return Err(HostError::InvertedRange { start, end });
        }
        Ok(Self {
            container,
            start,
            end,
        })
    }

    pub fn container(&self) -> &N {
        &self.container
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of children the range delimits.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Move the start boundary. Moving it past the end drags the end along.
    pub fn set_start(&mut self, offset: usize) {
        self.start = offset;
        if self.end < offset {
            self.end = offset;
        }
    }

    /// Move the end boundary. Moving it before the start drags the start along.
    pub fn set_end(&mut self, offset: usize) {
        self.end = offset;
        if self.start > offset {
            self.start = offset;
        }
    }

    pub fn collapse_to_start(&mut self) {
        self.end = self.start;
    }

    pub fn collapse_to_end(&mut self) {
        self.start = self.end;
    }
}

impl<N: Clone> HostRange<N> {
    /// A zero-width range sitting at this range's start.
    pub fn collapsed_at_start(&self) -> Self {
        Self {
            container: self.container.clone(),
            start: self.start,
            end: self.start,
        }
    }
}
