use std::fmt;

use thiserror::Error;

/// Heading level (1-6).
///
/// Marker runs longer than six characters are legal input; they clamp to the
/// deepest level instead of producing an invalid one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    /// Deepest representable level.
    pub const MAX: HeadingLevel = HeadingLevel(6);

    /// Create a heading level, validating it's in the range 1-6.
    pub fn new(level: u8) -> Result<Self, HeadingLevelError> {
        if (1..=Self::MAX.0).contains(&level) {
            Ok(Self(level))
        } else {
            Err(HeadingLevelError(level))
        }
    }

    /// Level for a run of `count` markers: `min(count, 6)`, never below 1.
    pub fn clamped(count: usize) -> Self {
        Self(count.clamp(1, Self::MAX.0 as usize) as u8)
    }

    /// Get the underlying level value (1-6).
    pub fn get(self) -> u8 {
        self.0
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl Default for HeadingLevel {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = HeadingLevelError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

/// A heading level outside 1-6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("heading level must be between 1 and 6, got {0}")]
pub struct HeadingLevelError(pub u8);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn valid_levels() {
        for level in 1..=6 {
            assert_eq!(HeadingLevel::new(level).unwrap().get(), level);
        }
    }

    #[test]
    fn invalid_levels() {
        for level in [0, 7, 8, 255] {
            assert_eq!(HeadingLevel::new(level), Err(HeadingLevelError(level)));
        }
    }

    #[rstest]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(6, 6)]
    #[case(7, 6)]
    #[case(11, 6)]
    #[case(10_000, 6)]
    fn clamps_marker_counts(#[case] count: usize, #[case] expected: u8) {
        assert_eq!(HeadingLevel::clamped(count).get(), expected);
    }

    #[test]
    fn zero_count_clamps_up() {
        assert_eq!(HeadingLevel::clamped(0), HeadingLevel::default());
    }

    #[test]
    fn error_message_names_the_level() {
        let err = HeadingLevel::try_from(9).unwrap_err();
        assert_eq!(
            err.to_string(),
            "heading level must be between 1 and 6, got 9"
        );
    }
}
