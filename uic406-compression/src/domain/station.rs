//! Station identifier and station record.

use std::fmt;

/// A non-empty station identifier as it appears in the data files.
///
/// Identifiers are opaque: the only validation is that they are non-empty
/// once surrounding whitespace is trimmed.
///
/// # Examples
///
/// ```
/// use uic406_compression::domain::StationId;
///
/// let id = StationId::new("BJN").unwrap();
/// assert_eq!(id.as_str(), "BJN");
///
/// // Whitespace is trimmed, empty strings are rejected
/// assert_eq!(StationId::new("  BJN ").unwrap().as_str(), "BJN");
/// assert!(StationId::new("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(String);

impl StationId {
    /// Create a station identifier, rejecting empty input.
    pub fn new(s: impl AsRef<str>) -> Result<Self, super::DomainError> {
        let trimmed = s.as_ref().trim();
        if trimmed.is_empty() {
            return Err(super::DomainError::EmptyId("station"));
        }
        Ok(StationId(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A station of the infrastructure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
}

impl Station {
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_valid_id() {
        assert!(StationId::new("A").is_ok());
        assert!(StationId::new("Beijing South").is_ok());
        assert!(StationId::new("123").is_ok());
    }

    #[test]
    fn reject_empty() {
        assert!(StationId::new("").is_err());
        assert!(StationId::new(" \t").is_err());
    }

    #[test]
    fn display_and_debug() {
        let id = StationId::new("TJN").unwrap();
        assert_eq!(format!("{}", id), "TJN");
        assert_eq!(format!("{:?}", id), "StationId(TJN)");
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = StationId::new("A").unwrap();
        let b = StationId::new("B").unwrap();
        assert!(a < b);
    }
}
