//! Render mode selection.
//!
//! [`select_render_mode`] maps (feature gate, location resolution, fetch lifecycle) to exactly one
//! [`RenderMode`]. It is re-evaluated on every render and keeps no state of its own.

use crate::admission::{AdmissionFetchError, Lifecycle};
use crate::beds::{bed_occupancy, BedFilter, BedOccupancy};
use crate::constants::LOADING_PLACEHOLDER_COUNT;
use crate::location::LocationResolution;
use openmrs::{AdmissionLocation, Location};

/// The single presentation outcome of the ward view.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderMode {
    /// Bed management is not installed; render nothing.
    Hidden,
    /// The route named an unknown location.
    InvalidLocation { location_uuid: String },
    /// The admission location is being fetched.
    Loading {
        location: Location,
        placeholders: usize,
    },
    /// At least one bed to show.
    Populated {
        location: Location,
        beds: Vec<BedOccupancy>,
    },
    /// Fetched successfully but no bed survived filtering.
    EmptyBeds { location: Location },
    /// The fetch failed.
    FetchError {
        location: Location,
        error: AdmissionFetchError,
    },
}

/// Short machine-readable name of a [`RenderMode`] variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderModeKind {
    Hidden,
    InvalidLocation,
    Loading,
    Populated,
    EmptyBeds,
    FetchError,
}

impl RenderModeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderModeKind::Hidden => "hidden",
            RenderModeKind::InvalidLocation => "invalid-location",
            RenderModeKind::Loading => "loading",
            RenderModeKind::Populated => "populated",
            RenderModeKind::EmptyBeds => "empty-beds",
            RenderModeKind::FetchError => "fetch-error",
        }
    }
}

impl RenderMode {
    pub fn kind(&self) -> RenderModeKind {
        match self {
            RenderMode::Hidden => RenderModeKind::Hidden,
            RenderMode::InvalidLocation { .. } => RenderModeKind::InvalidLocation,
            RenderMode::Loading { .. } => RenderModeKind::Loading,
            RenderMode::Populated { .. } => RenderModeKind::Populated,
            RenderMode::EmptyBeds { .. } => RenderModeKind::EmptyBeds,
            RenderMode::FetchError { .. } => RenderModeKind::FetchError,
        }
    }

    /// The location being displayed, when there is one.
    pub fn location(&self) -> Option<&Location> {
        match self {
            RenderMode::Hidden | RenderMode::InvalidLocation { .. } => None,
            RenderMode::Loading { location, .. }
            | RenderMode::Populated { location, .. }
            | RenderMode::EmptyBeds { location }
            | RenderMode::FetchError { location, .. } => Some(location),
        }
    }
}

/// Pick the render mode. Precedence: gate, resolution, then lifecycle.
pub fn select_render_mode(
    bed_management_enabled: bool,
    resolution: &LocationResolution,
    lifecycle: &Lifecycle<AdmissionLocation>,
    bed_filter: BedFilter,
) -> RenderMode {
    match (bed_management_enabled, resolution, lifecycle) {
        (false, _, _) => RenderMode::Hidden,
        (true, LocationResolution::Invalid { location_uuid }, _) => RenderMode::InvalidLocation {
            location_uuid: location_uuid.clone(),
        },
        (true, LocationResolution::Resolved(location), Lifecycle::Success(admission)) => {
            let beds = bed_occupancy(admission, bed_filter);
            if beds.is_empty() {
                RenderMode::EmptyBeds {
                    location: location.clone(),
                }
            } else {
                RenderMode::Populated {
                    location: location.clone(),
                    beds,
                }
            }
        }
        (true, LocationResolution::Resolved(location), Lifecycle::Pending) => RenderMode::Loading {
            location: location.clone(),
            placeholders: LOADING_PLACEHOLDER_COUNT,
        },
        (true, LocationResolution::Resolved(location), Lifecycle::Failure(error)) => {
            RenderMode::FetchError {
                location: location.clone(),
                error: error.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beds::fixtures::{admission, layout, patient};
    use openmrs::LocationUuid;

    fn loc1() -> Location {
        Location::new(LocationUuid::new("loc-1").unwrap(), "Inpatient Ward")
    }

    fn resolved() -> LocationResolution {
        LocationResolution::Resolved(loc1())
    }

    fn invalid() -> LocationResolution {
        LocationResolution::Invalid {
            location_uuid: "bad-uuid".into(),
        }
    }

    fn lifecycles() -> Vec<Lifecycle<AdmissionLocation>> {
        vec![
            Lifecycle::Pending,
            Lifecycle::Success(admission("loc-1", vec![])),
            Lifecycle::Success(admission("loc-1", vec![layout(Some(1), "A", vec![])])),
            Lifecycle::Failure(AdmissionFetchError::with_message("network down")),
            Lifecycle::Failure(AdmissionFetchError::without_message()),
        ]
    }

    #[test]
    fn gate_off_hides_everything() {
        for resolution in [resolved(), invalid()] {
            for lifecycle in lifecycles() {
                assert_eq!(
                    select_render_mode(false, &resolution, &lifecycle, BedFilter::RetainAll),
                    RenderMode::Hidden
                );
            }
        }
    }

    #[test]
    fn invalid_location_wins_over_any_lifecycle() {
        for lifecycle in lifecycles() {
            assert_eq!(
                select_render_mode(true, &invalid(), &lifecycle, BedFilter::RetainAll),
                RenderMode::InvalidLocation {
                    location_uuid: "bad-uuid".into()
                }
            );
        }
    }

    #[test]
    fn pending_is_loading_with_fixed_placeholders() {
        let mode = select_render_mode(true, &resolved(), &Lifecycle::Pending, BedFilter::RetainAll);
        assert_eq!(
            mode,
            RenderMode::Loading {
                location: loc1(),
                placeholders: 20
            }
        );
    }

    #[test]
    fn success_with_beds_is_populated() {
        let lifecycle = Lifecycle::Success(admission(
            "loc-1",
            vec![
                layout(Some(1), "A", vec![patient("pat-1")]),
                layout(Some(2), "B", vec![patient("pat-2")]),
            ],
        ));

        let RenderMode::Populated { location, beds } =
            select_render_mode(true, &resolved(), &lifecycle, BedFilter::RetainAll)
        else {
            panic!("expected populated");
        };

        assert_eq!(location, loc1());
        assert_eq!(beds.len(), 2);
        for occupancy in &beds {
            assert_eq!(occupancy.patient_infos.len(), 1);
            let info = &occupancy.patient_infos[0];
            assert!(info.admitted);
            assert_eq!(info.visit, None);
            assert_eq!(info.current_location, None);
            assert_eq!(info.time_since_admission_in_minutes, None);
            assert_eq!(info.time_at_inpatient_location_in_minutes, None);
        }
    }

    #[test]
    fn success_without_beds_is_empty_not_error() {
        let lifecycle = Lifecycle::Success(admission("loc-1", vec![]));
        assert_eq!(
            select_render_mode(true, &resolved(), &lifecycle, BedFilter::RetainAll).kind(),
            RenderModeKind::EmptyBeds
        );
    }

    #[test]
    fn filter_emptying_the_list_is_empty_beds() {
        let lifecycle = Lifecycle::Success(admission("loc-1", vec![layout(None, "", vec![])]));

        assert_eq!(
            select_render_mode(true, &resolved(), &lifecycle, BedFilter::RetainAll).kind(),
            RenderModeKind::Populated
        );
        assert_eq!(
            select_render_mode(true, &resolved(), &lifecycle, BedFilter::WithBed).kind(),
            RenderModeKind::EmptyBeds
        );
    }

    #[test]
    fn failure_is_fetch_error_with_detail() {
        let error = AdmissionFetchError::with_message("network down");
        let mode = select_render_mode(
            true,
            &resolved(),
            &Lifecycle::Failure(error.clone()),
            BedFilter::RetainAll,
        );
        assert_eq!(
            mode,
            RenderMode::FetchError {
                location: loc1(),
                error
            }
        );
        assert_eq!(mode.location(), Some(&loc1()));
    }

    #[test]
    fn kind_names_are_stable() {
        assert_eq!(RenderModeKind::InvalidLocation.as_str(), "invalid-location");
        assert_eq!(RenderModeKind::EmptyBeds.as_str(), "empty-beds");
        assert_eq!(RenderMode::Hidden.kind().as_str(), "hidden");
    }
}
