//! Bed layout transformation.
//!
//! Pure functions turning the raw bed layouts of an admission location into what the ward view
//! displays: one [`Bed`] per retained layout and one [`WardPatient`] per occupying patient.
//! Display order is the order of the layouts in the admission location; nothing is re-sorted.

use openmrs::{AdmissionLocation, BedLayout, BedStatus, BedType, PatientRef};

/// Which bed layout entries are displayed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BedFilter {
    /// Display every layout entry.
    #[default]
    RetainAll,
    /// Drop grid positions that carry no physical bed (no bed id).
    WithBed,
}

impl BedFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            BedFilter::RetainAll => "retain-all",
            BedFilter::WithBed => "with-bed",
        }
    }

    fn retains(self, layout: &BedLayout) -> bool {
        match self {
            BedFilter::RetainAll => true,
            BedFilter::WithBed => layout.bed_id.is_some(),
        }
    }
}

impl std::str::FromStr for BedFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "retain-all" => Ok(BedFilter::RetainAll),
            "with-bed" => Ok(BedFilter::WithBed),
            other => Err(format!(
                "unknown bed filter '{other}' (expected 'retain-all' or 'with-bed')"
            )),
        }
    }
}

/// View-ready bed, a projection of [`BedLayout`] without its patients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bed {
    pub id: Option<u64>,
    pub uuid: Option<String>,
    pub bed_number: Option<String>,
    pub bed_type: Option<BedType>,
    pub row: Option<u32>,
    pub column: Option<u32>,
    pub status: Option<BedStatus>,
}

/// Occupancy record for one patient in one bed.
///
/// Only `patient` and `admitted` carry information today. The visit, current location and the
/// two timing fields have no data source yet and are always `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct WardPatient {
    pub patient: PatientRef,
    pub visit: Option<serde_json::Value>,
    pub admitted: bool,
    pub current_location: Option<serde_json::Value>,
    pub time_since_admission_in_minutes: Option<u32>,
    pub time_at_inpatient_location_in_minutes: Option<u32>,
}

impl WardPatient {
    /// Occupancy record for an admitted patient with no further details.
    pub fn admitted(patient: PatientRef) -> Self {
        Self {
            patient,
            visit: None,
            admitted: true,
            current_location: None,
            time_since_admission_in_minutes: None,
            time_at_inpatient_location_in_minutes: None,
        }
    }
}

/// One displayed bed with its occupants.
#[derive(Clone, Debug, PartialEq)]
pub struct BedOccupancy {
    pub bed: Bed,
    pub patient_infos: Vec<WardPatient>,
}

/// Select the bed layouts to display, in input order.
pub fn filter_beds(admission_location: &AdmissionLocation, filter: BedFilter) -> Vec<&BedLayout> {
    admission_location
        .bed_layouts
        .iter()
        .filter(|layout| filter.retains(layout))
        .collect()
}

/// Project a bed layout onto a [`Bed`].
pub fn bed_layout_to_bed(bed_layout: &BedLayout) -> Bed {
    Bed {
        id: bed_layout.bed_id,
        uuid: bed_layout.bed_uuid.clone(),
        bed_number: bed_layout.bed_number.clone(),
        bed_type: bed_layout.bed_type.clone(),
        row: bed_layout.row_number,
        column: bed_layout.column_number,
        status: bed_layout.status,
    }
}

/// One [`WardPatient`] per patient in the layout; empty for an unoccupied bed.
pub fn ward_patients(bed_layout: &BedLayout) -> Vec<WardPatient> {
    bed_layout
        .patients
        .iter()
        .cloned()
        .map(WardPatient::admitted)
        .collect()
}

/// Filter and transform every bed of an admission location.
pub fn bed_occupancy(admission_location: &AdmissionLocation, filter: BedFilter) -> Vec<BedOccupancy> {
    filter_beds(admission_location, filter)
        .into_iter()
        .map(|layout| BedOccupancy {
            bed: bed_layout_to_bed(layout),
            patient_infos: ward_patients(layout),
        })
        .collect()
}
