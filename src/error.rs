//! Errors returned by [`BiMap`](crate::BiMap) accessors.

/// One of the two views of a [`BiMap`](crate::BiMap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The view ordered by left keys.
    Left,
    /// The view ordered by right keys.
    Right,
}

impl Side {
    /// Returns the opposite side.
    pub fn flip(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl core::fmt::Display for Side {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Failure of a lookup that must find its key.
///
/// Only [`BiMap::at_left`](crate::BiMap::at_left) and
/// [`BiMap::at_right`](crate::BiMap::at_right) produce this; every other
/// lookup reports absence through an end cursor, `Option`, or `bool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The requested key is not present on the given side.
    #[error("key not found on the {0} side")]
    KeyNotFound(Side),
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_side_flip() {
        assert_eq!(Side::Left.flip(), Side::Right);
        assert_eq!(Side::Right.flip(), Side::Left);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::KeyNotFound(Side::Left).to_string(),
            "key not found on the left side"
        );
        assert_eq!(
            Error::KeyNotFound(Side::Right).to_string(),
            "key not found on the right side"
        );
    }
}
