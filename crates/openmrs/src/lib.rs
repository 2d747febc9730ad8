//! OpenMRS wire/boundary support for the ward view.
//!
//! This crate provides **wire models** and **translation helpers** for the JSON payloads served by
//! the OpenMRS REST API that the ward view consumes:
//! - locations (`/ws/rest/v1/location`)
//! - admission locations with their bed layouts (`/ws/rest/emr/admissionLocation/{uuid}`)
//!
//! This crate focuses on:
//! - strict-enough deserialisation with field paths in error messages
//! - translation between the wire structs and domain-level types
//!
//! Transport (HTTP, caching, retries) is deliberately absent.

pub mod admission;
pub mod location;

// Re-export facades
pub use admission::Admission;
pub use location::Locations;

// Re-export public domain-level types
pub use admission::{AdmissionLocation, BedLayout, BedStatus, BedType, PatientRef};
pub use location::Location;

pub use ward_types::LocationUuid;

/// Errors returned by the `openmrs` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum OpenmrsError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("invalid location uuid: {0}")]
    InvalidUuid(String),
}

/// Type alias for Results that can fail with an [`OpenmrsError`].
pub type OpenmrsResult<T> = Result<T, OpenmrsError>;

/// Deserialise `json_text` into `T`, reporting the failing field path on schema mismatch.
///
/// Malformed JSON is reported as [`OpenmrsError::InvalidJson`]; well-formed JSON of the wrong
/// shape as [`OpenmrsError::Translation`].
pub(crate) fn deserialize_with_path<T>(json_text: &str, what: &str) -> OpenmrsResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let mut deserializer = serde_json::Deserializer::from_str(json_text);

    let parsed = serde_path_to_error::deserialize::<_, T>(&mut deserializer)
        .map_err(|err| path_error(err, what))?;
    deserializer.end()?;

    Ok(parsed)
}

/// Deserialise an already-parsed JSON value into `T`, reporting the failing field path.
pub(crate) fn deserialize_value_with_path<T>(value: serde_json::Value, what: &str) -> OpenmrsResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| path_error(err, what))
}

fn path_error(err: serde_path_to_error::Error<serde_json::Error>, what: &str) -> OpenmrsError {
    let path = err.path().to_string();
    let source = err.into_inner();

    if source.is_syntax() || source.is_eof() {
        return OpenmrsError::InvalidJson(source);
    }

    let path = if path.is_empty() || path == "." {
        "<root>"
    } else {
        path.as_str()
    };
    OpenmrsError::Translation(format!("{what} schema mismatch at {path}: {source}"))
}
