//! OpenMRS admission-location wire models and translation helpers.
//!
//! An admission location is the bed-management view of a ward: the ward location itself, bed
//! counts, and one bed layout entry per grid position. Each layout entry describes the bed at
//! that position (if any) and the patients currently assigned to it.
//!
//! Responsibilities:
//! - Define domain-level types for the admission location and its bed layouts
//! - Deserialise the `v=full` REST representation
//! - Validate the ward location and report schema mismatches with the failing field path
//!
//! Notes:
//! - Grid positions without a physical bed carry `null` bed fields; they are kept as-is here and
//!   any exclusion policy belongs to the caller
//! - Patient objects are opaque apart from their `uuid` and `display`

use crate::location::{self, Location, LocationWire};
use crate::{deserialize_with_path, OpenmrsResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Public domain-level types
// ============================================================================

/// Bed occupancy aggregate for one ward location.
#[derive(Clone, Debug, PartialEq)]
pub struct AdmissionLocation {
    /// The ward this admission location describes.
    pub ward: Location,

    /// Number of beds configured for the ward, as reported by the server.
    pub total_beds: u32,

    /// Number of occupied beds, as reported by the server.
    pub occupied_beds: u32,

    /// Bed layout entries in server order.
    pub bed_layouts: Vec<BedLayout>,
}

/// Raw description of one bed grid position and its occupants.
#[derive(Clone, Debug, PartialEq)]
pub struct BedLayout {
    pub row_number: Option<u32>,
    pub column_number: Option<u32>,
    pub bed_number: Option<String>,
    pub bed_id: Option<u64>,
    pub bed_uuid: Option<String>,
    pub status: Option<BedStatus>,
    pub bed_type: Option<BedType>,
    /// Display name of the location the bed belongs to.
    pub location: Option<String>,
    /// Patients assigned to the bed; empty for an available bed.
    pub patients: Vec<PatientRef>,
}

/// Occupancy status reported for a bed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BedStatus {
    Available,
    Occupied,
    /// Any status this crate does not know about.
    #[serde(other)]
    Unknown,
}

impl BedStatus {
    /// Wire spelling of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            BedStatus::Available => "AVAILABLE",
            BedStatus::Occupied => "OCCUPIED",
            BedStatus::Unknown => "UNKNOWN",
        }
    }
}

/// Bed type (e.g. "Adult bed", "Cot").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedType {
    #[serde(default)]
    pub uuid: Option<String>,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub resource_version: Option<String>,
}

/// Reference to a patient occupying a bed.
///
/// Only `uuid` and `display` are interpreted; the rest of the patient representation is carried
/// through untouched so it can be handed to whatever renders the bed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientRef {
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

// ============================================================================
// Public Admission operations
// ============================================================================

/// Admission location operations.
///
/// Zero-sized namespace for parsing admission-location payloads.
pub struct Admission;

impl Admission {
    /// Parse an admission location from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::OpenmrsError`] if:
    /// - the JSON does not match the admission-location schema (the error names the failing
    ///   field, e.g. `bedLayouts[0].patients`),
    /// - the ward location uuid is invalid.
    pub fn parse(json_text: &str) -> OpenmrsResult<AdmissionLocation> {
        let wire: AdmissionLocationWire = deserialize_with_path(json_text, "Admission location")?;
        wire_to_domain(wire)
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdmissionLocationWire {
    ward: LocationWire,
    #[serde(default)]
    total_beds: u32,
    #[serde(default)]
    occupied_beds: u32,
    #[serde(default)]
    bed_layouts: Vec<BedLayoutWire>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BedLayoutWire {
    #[serde(default)]
    row_number: Option<u32>,
    #[serde(default)]
    column_number: Option<u32>,
    #[serde(default)]
    bed_number: Option<String>,
    #[serde(default)]
    bed_id: Option<u64>,
    #[serde(default)]
    bed_uuid: Option<String>,
    #[serde(default)]
    status: Option<BedStatus>,
    #[serde(default)]
    bed_type: Option<BedType>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    patients: Vec<PatientRef>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn wire_to_domain(wire: AdmissionLocationWire) -> OpenmrsResult<AdmissionLocation> {
    let ward = location::wire_to_domain(wire.ward)?;

    let bed_layouts = wire
        .bed_layouts
        .into_iter()
        .map(|layout| BedLayout {
            row_number: layout.row_number,
            column_number: layout.column_number,
            bed_number: layout.bed_number,
            bed_id: layout.bed_id,
            bed_uuid: layout.bed_uuid,
            status: layout.status,
            bed_type: layout.bed_type,
            location: layout.location,
            patients: layout.patients,
        })
        .collect();

    Ok(AdmissionLocation {
        ward,
        total_beds: wire.total_beds,
        occupied_beds: wire.occupied_beds,
        bed_layouts,
    })
}
