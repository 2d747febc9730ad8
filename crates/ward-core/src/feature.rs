//! Feature flags.

use std::collections::BTreeSet;

/// Feature-flag lookup collaborator.
pub trait FeatureGate: Send + Sync {
    fn is_enabled(&self, key: &str) -> bool;
}

/// Fixed set of enabled feature keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    enabled: BTreeSet<String>,
}

impl FeatureFlags {
    pub fn new<I, S>(enabled: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled: enabled.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a comma-separated list of keys. Blank entries are ignored.
    pub fn from_env_value(value: Option<String>) -> Self {
        let value = value.unwrap_or_default();
        Self::new(
            value
                .split(',')
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_owned),
        )
    }

    pub fn enable(&mut self, key: impl Into<String>) {
        self.enabled.insert(key.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.enabled.iter().map(String::as_str)
    }
}

impl FeatureGate for FeatureFlags {
    fn is_enabled(&self, key: &str) -> bool {
        self.enabled.contains(key)
    }
}
