//! Location resolution.
//!
//! The ward view can be opened for a location named in the route (`/ward/{locationUuid}`) or,
//! when the route names none, for the session's default location. A route location must be a
//! known location; an unknown one is reported as invalid and the session default is *not* used
//! in its place.

use openmrs::Location;

/// Outcome of resolving the location to display.
#[derive(Clone, Debug, PartialEq)]
pub enum LocationResolution {
    /// A single authoritative location.
    Resolved(Location),
    /// The route named a location uuid that matches no known location.
    Invalid { location_uuid: String },
}

impl LocationResolution {
    /// The resolved location, if resolution succeeded.
    pub fn location(&self) -> Option<&Location> {
        match self {
            LocationResolution::Resolved(location) => Some(location),
            LocationResolution::Invalid { .. } => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, LocationResolution::Invalid { .. })
    }
}

/// Pick the location to display.
///
/// - No route uuid: the session default, never invalid.
/// - Route uuid matching a known location by `uuid`: that location.
/// - Route uuid matching nothing: [`LocationResolution::Invalid`] carrying the uuid verbatim.
///
/// An empty route segment counts as absent.
pub fn resolve_location(
    route_location_uuid: Option<&str>,
    known_locations: &[Location],
    session_location: &Location,
) -> LocationResolution {
    let Some(route_uuid) = route_location_uuid.filter(|uuid| !uuid.is_empty()) else {
        return LocationResolution::Resolved(session_location.clone());
    };

    match known_locations
        .iter()
        .find(|location| location.uuid == route_uuid)
    {
        Some(location) => LocationResolution::Resolved(location.clone()),
        None => LocationResolution::Invalid {
            location_uuid: route_uuid.to_owned(),
        },
    }
}
