//! Validated primitive types shared by the ward crates.

/// Errors that can occur when creating validated identifier types.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// The input was empty or contained only whitespace
    #[error("identifier cannot be empty")]
    Empty,
    /// The input contained control characters such as an embedded newline
    #[error("identifier contains control characters: {0:?}")]
    ControlCharacters(String),
}

/// Identifier of an OpenMRS location.
///
/// The value is opaque: OpenMRS issues 36-character UUIDs, while locations configured by hand
/// (and test fixtures) often use slugs such as `loc-1`. Anything non-empty without control
/// characters is accepted. Consumers that embed the identifier in a path must check it
/// themselves.
///
/// The input is trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocationUuid(String);

impl LocationUuid {
    /// Creates a new `LocationUuid` from the given input.
    ///
    /// # Errors
    ///
    /// Returns an [`IdentifierError`] if the trimmed input is empty or contains control
    /// characters.
    pub fn new(input: impl AsRef<str>) -> Result<Self, IdentifierError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IdentifierError::Empty);
        }

        if trimmed.chars().any(char::is_control) {
            return Err(IdentifierError::ControlCharacters(trimmed.to_owned()));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LocationUuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for LocationUuid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for LocationUuid {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl PartialEq<str> for LocationUuid {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LocationUuid {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl serde::Serialize for LocationUuid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for LocationUuid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LocationUuid::new(&s).map_err(serde::de::Error::custom)
    }
}
