//! Versioned store entries.

/// A value paired with a change counter.
///
/// The version only moves when the value actually changes, which is what lets
/// the store drop redundant writes without notifying anyone.
///
/// ```
/// use stormdeck_store::Versioned;
///
/// let mut entry = Versioned::new(1u64);
/// assert!(entry.set(2));
/// assert!(!entry.set(2));
/// assert_eq!(entry.version(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    value: T,
    version: u32,
}

impl<T> Versioned<T> {
    pub fn new(value: T) -> Self {
        Self { value, version: 0 }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Check if this value is newer than a version a reader saw earlier.
    pub fn is_newer_than(&self, seen_version: u32) -> bool {
        self.version != seen_version
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: PartialEq> Versioned<T> {
    /// Replace the value, bumping the version only on change.
    ///
    /// Returns `true` if the value changed.
    pub fn set(&mut self, new_value: T) -> bool {
        if self.value != new_value {
            self.value = new_value;
            self.version = self.version.wrapping_add(1);
            true
        } else {
            false
        }
    }
}

impl<T: Default> Default for Versioned<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versioned_string() {
        let mut value = Versioned::new("{}".to_string());
        assert_eq!(value.version(), 0);

        assert!(value.set("{\"time\":1}".to_string()));
        assert_eq!(value.version(), 1);

        assert!(!value.set("{\"time\":1}".to_string()));
        assert_eq!(value.version(), 1);
    }

    #[test]
    fn test_versioned_is_newer() {
        let mut value = Versioned::new(0u64);
        assert!(!value.is_newer_than(0));

        value.set(1);
        assert!(value.is_newer_than(0));
        assert!(!value.is_newer_than(1));
    }
}
