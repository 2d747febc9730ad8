//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services. Nothing
//! in this crate reads environment variables while rendering; the `*_from_env_value` helpers take
//! the raw value so binaries decide where it comes from.

use crate::beds::BedFilter;
use crate::constants::DEFAULT_FETCH_TIMEOUT_MS;
use crate::feature::FeatureFlags;
use crate::{WardError, WardResult};
use openmrs::LocationUuid;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    ward_data_dir: PathBuf,
    session_location: Option<LocationUuid>,
    feature_flags: FeatureFlags,
    bed_filter: BedFilter,
    fetch_timeout: Duration,
    messages_file: Option<PathBuf>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `WardError::InvalidInput` if:
    /// - `ward_data_dir` is not a directory,
    /// - `fetch_timeout` is zero,
    /// - `messages_file` is given but is not a file.
    pub fn new(
        ward_data_dir: PathBuf,
        session_location: Option<LocationUuid>,
        feature_flags: FeatureFlags,
        bed_filter: BedFilter,
        fetch_timeout: Duration,
        messages_file: Option<PathBuf>,
    ) -> WardResult<Self> {
        if !ward_data_dir.is_dir() {
            return Err(WardError::InvalidInput(format!(
                "ward data directory does not exist: {}",
                ward_data_dir.display()
            )));
        }

        if fetch_timeout.is_zero() {
            return Err(WardError::InvalidInput(
                "fetch timeout must be greater than zero".into(),
            ));
        }

        if let Some(path) = &messages_file {
            if !path.is_file() {
                return Err(WardError::InvalidInput(format!(
                    "messages file does not exist: {}",
                    path.display()
                )));
            }
        }

        Ok(Self {
            ward_data_dir,
            session_location,
            feature_flags,
            bed_filter,
            fetch_timeout,
            messages_file,
        })
    }

    pub fn ward_data_dir(&self) -> &Path {
        &self.ward_data_dir
    }

    /// Explicitly configured session location; `None` means "first known location".
    pub fn session_location(&self) -> Option<&LocationUuid> {
        self.session_location.as_ref()
    }

    pub fn feature_flags(&self) -> &FeatureFlags {
        &self.feature_flags
    }

    pub fn bed_filter(&self) -> BedFilter {
        self.bed_filter
    }

    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    pub fn messages_file(&self) -> Option<&Path> {
        self.messages_file.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the bed filter policy. Missing or blank means [`BedFilter::RetainAll`].
pub fn bed_filter_from_env_value(value: Option<String>) -> WardResult<BedFilter> {
    match non_blank(value) {
        Some(v) => v.parse().map_err(WardError::InvalidInput),
        None => Ok(BedFilter::default()),
    }
}

/// Parse the fetch timeout in milliseconds. Missing or blank means the default.
pub fn fetch_timeout_from_env_value(value: Option<String>) -> WardResult<Duration> {
    let millis = match non_blank(value) {
        Some(v) => v.parse::<u64>().map_err(|e| {
            WardError::InvalidInput(format!("invalid fetch timeout '{v}': {e}"))
        })?,
        None => DEFAULT_FETCH_TIMEOUT_MS,
    };

    Ok(Duration::from_millis(millis))
}

/// Parse the configured session location uuid. Missing or blank means none.
pub fn session_location_from_env_value(value: Option<String>) -> WardResult<Option<LocationUuid>> {
    Ok(non_blank(value).map(LocationUuid::new).transpose()?)
}
