//! Element size tracking for resize suppression.

use stormdeck_core::Size;

/// Result of observing an element's size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measurement {
    /// First observation after mount; recorded, never acted on.
    Primed,
    Unchanged,
    Changed,
}

/// The last measurement stored on an element, in `<width>x<height>` form.
#[derive(Debug, Default, Clone)]
pub struct MeasuredElement {
    last: Option<String>,
}

impl MeasuredElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, size: Size<u32>) -> Measurement {
        let current = size.to_string();
        match self.last.replace(current.clone()) {
            None => Measurement::Primed,
            Some(previous) if previous == current => Measurement::Unchanged,
            Some(_) => Measurement::Changed,
        }
    }

    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Forget the stored measurement so the next observation primes again.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
