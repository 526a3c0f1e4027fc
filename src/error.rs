//! Error types for the memokit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when a structure is configured with invalid
//!   parameters (e.g. zero cache capacity).
//! - [`BoundsError`]: Returned when a range-sum query or update names an
//!   index outside the backing array.
//!
//! Lookup misses are not errors: `get`/`search` return `Option` throughout.
//!
//! ## Example Usage
//!
//! ```
//! use memokit::error::ConfigError;
//! use memokit::policy::lru::LruCache;
//!
//! // Fallible constructor for user-configurable parameters
//! let cache: Result<LruCache<u64, u64>, ConfigError> = LruCache::try_new(100);
//! assert!(cache.is_ok());
//!
//! // Zero capacity is caught without panicking
//! let bad = LruCache::<u64, u64>::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`LruCache::try_new`](crate::policy::lru::LruCache::try_new) and
/// [`RangeSumCache::try_new`](crate::range_sum::RangeSumCache::try_new).
/// Carries a human-readable description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use memokit::policy::lru::LruCache;
///
/// let err = LruCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// BoundsError
// ---------------------------------------------------------------------------

/// Error returned when a query names an index outside the backing array.
///
/// Produced by the range-sum driver
/// ([`RangeSumCache::sum`](crate::range_sum::RangeSumCache::sum),
/// [`RangeSumCache::update`](crate::range_sum::RangeSumCache::update)), which
/// is the one place that knows the array length. The cache and tree types
/// themselves do not bounds-check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundsError(String);

impl BoundsError {
    /// Creates a new `BoundsError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for BoundsError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("capacity must be > 0");
        assert_eq!(err.to_string(), "capacity must be > 0");
    }

    #[test]
    fn config_debug_includes_message() {
        let err = ConfigError::new("bad capacity");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("bad capacity"));
    }

    #[test]
    fn config_message_accessor() {
        let err = ConfigError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
    }

    // -- BoundsError ------------------------------------------------------

    #[test]
    fn bounds_display_shows_message() {
        let err = BoundsError::new("index 9 out of range for length 5");
        assert_eq!(err.to_string(), "index 9 out of range for length 5");
    }

    #[test]
    fn bounds_debug_includes_message() {
        let err = BoundsError::new("bad index");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("bad index"));
    }

    #[test]
    fn bounds_message_accessor() {
        let err = BoundsError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn bounds_clone_and_eq() {
        let a = BoundsError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn bounds_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<BoundsError>();
    }
}
