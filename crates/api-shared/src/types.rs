//! JSON response types.
//!
//! Field names follow the OpenMRS front-end conventions (camelCase) so a bed cell renderer can
//! consume `beds[].bed` and `beds[].patientInfos` as-is.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use ward_core::{Bed, BedOccupancy, Location, Notification, PatientRef, Presentation, WardPatient};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LocationRes {
    pub uuid: String,
    pub display: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListLocationsRes {
    pub locations: Vec<LocationRes>,
}

/// Inline notification banner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NotificationRes {
    /// `error` or `warning`.
    pub kind: String,
    pub title: String,
    pub subtitle: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BedTypeRes {
    pub name: String,
    pub display_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BedRes {
    pub id: Option<u64>,
    pub uuid: Option<String>,
    pub bed_number: Option<String>,
    pub bed_type: Option<BedTypeRes>,
    pub row: Option<u32>,
    pub column: Option<u32>,
    /// `AVAILABLE`, `OCCUPIED` or `UNKNOWN`.
    pub status: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WardPatientRes {
    /// OpenMRS patient representation.
    #[schema(value_type = Object)]
    pub patient: Value,
    #[schema(value_type = Option<Object>)]
    pub visit: Option<Value>,
    pub admitted: bool,
    #[schema(value_type = Option<Object>)]
    pub current_location: Option<Value>,
    pub time_since_admission_in_minutes: Option<u32>,
    pub time_at_inpatient_location_in_minutes: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BedOccupancyRes {
    pub bed: BedRes,
    pub patient_infos: Vec<WardPatientRes>,
}

/// Everything needed to draw the ward view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WardViewRes {
    /// One of `hidden`, `invalid-location`, `loading`, `populated`, `empty-beds`,
    /// `fetch-error`.
    pub mode: String,
    pub header: Option<String>,
    pub notification: Option<NotificationRes>,
    /// Number of skeleton beds to draw.
    pub placeholders: usize,
    pub beds: Vec<BedOccupancyRes>,
    /// Context key of the patient workspace side panel, when mounted.
    pub side_panel: Option<String>,
}

impl From<&Location> for LocationRes {
    fn from(location: &Location) -> Self {
        Self {
            uuid: location.uuid.to_string(),
            display: location.display.clone(),
        }
    }
}

impl From<&Notification> for NotificationRes {
    fn from(notification: &Notification) -> Self {
        Self {
            kind: notification.kind.as_str().to_owned(),
            title: notification.title.clone(),
            subtitle: notification.subtitle.clone(),
        }
    }
}

impl From<&Bed> for BedRes {
    fn from(bed: &Bed) -> Self {
        Self {
            id: bed.id,
            uuid: bed.uuid.clone(),
            bed_number: bed.bed_number.clone(),
            bed_type: bed.bed_type.as_ref().map(|bed_type| BedTypeRes {
                name: bed_type.name.clone(),
                display_name: bed_type.display_name.clone(),
            }),
            row: bed.row,
            column: bed.column,
            status: bed.status.map(|status| status.as_str().to_owned()),
        }
    }
}

fn patient_json(patient: &PatientRef) -> Value {
    let mut object: Map<String, Value> = patient.attributes.clone();
    object.insert("uuid".into(), Value::String(patient.uuid.clone()));
    if let Some(display) = &patient.display {
        object.insert("display".into(), Value::String(display.clone()));
    }
    Value::Object(object)
}

impl From<&WardPatient> for WardPatientRes {
    fn from(info: &WardPatient) -> Self {
        Self {
            patient: patient_json(&info.patient),
            visit: info.visit.clone(),
            admitted: info.admitted,
            current_location: info.current_location.clone(),
            time_since_admission_in_minutes: info.time_since_admission_in_minutes,
            time_at_inpatient_location_in_minutes: info.time_at_inpatient_location_in_minutes,
        }
    }
}

impl From<&BedOccupancy> for BedOccupancyRes {
    fn from(occupancy: &BedOccupancy) -> Self {
        Self {
            bed: BedRes::from(&occupancy.bed),
            patient_infos: occupancy.patient_infos.iter().map(Into::into).collect(),
        }
    }
}

impl From<&Presentation> for WardViewRes {
    fn from(presentation: &Presentation) -> Self {
        Self {
            mode: presentation.mode.as_str().to_owned(),
            header: presentation.header.clone(),
            notification: presentation.notification.as_ref().map(Into::into),
            placeholders: presentation.placeholders,
            beds: presentation.beds.iter().map(Into::into).collect(),
            side_panel: presentation.side_panel.map(str::to_owned),
        }
    }
}
