//! Ward view controller.
//!
//! Ties the location resolver, the admission layout fetcher and the render mode selector to the
//! three events a ward view reacts to:
//!
//! - mount ([`WardViewController::mount`])
//! - a change of the route location ([`WardViewController::route_changed`])
//! - completion of an admission fetch ([`WardViewController::fetch_completed`])
//!
//! The first two may return a [`FetchTicket`]; the caller then runs the fetch (for example with
//! [`WardViewController::run_fetch`]) and reports the result. The controller never awaits on its
//! own and the render mode is recomputed from scratch on each call to
//! [`WardViewController::render_mode`].

use crate::admission::{
    AdmissionFetchError, AdmissionLayoutFetcher, AdmissionSource, FetchTicket, Lifecycle,
};
use crate::beds::BedFilter;
use crate::constants::BED_MANAGEMENT_FEATURE;
use crate::feature::FeatureGate;
use crate::location::{resolve_location, LocationResolution};
use crate::view::{select_render_mode, RenderMode};
use openmrs::{AdmissionLocation, Location};
use std::sync::Arc;

/// Explicit inputs of the ward view.
#[derive(Clone, Debug)]
pub struct ViewContext {
    /// Location uuid taken from the route, if any.
    pub route_location_uuid: Option<String>,
    /// All known locations.
    pub known_locations: Arc<[Location]>,
    /// The session's default location.
    pub session_location: Location,
    /// Whether the bed management module is installed.
    pub bed_management_enabled: bool,
}

impl ViewContext {
    /// Build a context, reading the bed management flag from `gate`.
    pub fn new(
        route_location_uuid: Option<String>,
        known_locations: Arc<[Location]>,
        session_location: Location,
        gate: &dyn FeatureGate,
    ) -> Self {
        Self {
            route_location_uuid,
            known_locations,
            session_location,
            bed_management_enabled: gate.is_enabled(BED_MANAGEMENT_FEATURE),
        }
    }
}

pub struct WardViewController {
    context: ViewContext,
    bed_filter: BedFilter,
    fetcher: AdmissionLayoutFetcher,
}

impl WardViewController {
    pub fn new(context: ViewContext, bed_filter: BedFilter) -> Self {
        Self {
            context,
            bed_filter,
            fetcher: AdmissionLayoutFetcher::new(),
        }
    }

    /// The view was mounted. Returns the fetch to issue, if any.
    pub fn mount(&mut self) -> Option<FetchTicket> {
        self.sync_fetch()
    }

    /// The route location changed. Returns the fetch to issue, if any.
    ///
    /// Any fetch still outstanding for a previous location becomes stale.
    pub fn route_changed(&mut self, route_location_uuid: Option<String>) -> Option<FetchTicket> {
        self.context.route_location_uuid = route_location_uuid;
        self.sync_fetch()
    }

    /// A fetch finished. Returns whether its result was applied.
    pub fn fetch_completed(
        &mut self,
        ticket: &FetchTicket,
        result: Result<AdmissionLocation, AdmissionFetchError>,
    ) -> bool {
        self.fetcher.complete(ticket, result)
    }

    /// Run the fetch for `ticket` against `source` and apply its result.
    pub async fn run_fetch(&mut self, source: &dyn AdmissionSource, ticket: &FetchTicket) -> bool {
        let result = source.admission_location(ticket.location_uuid()).await;
        self.fetch_completed(ticket, result)
    }

    pub fn resolution(&self) -> LocationResolution {
        resolve_location(
            self.context.route_location_uuid.as_deref(),
            &self.context.known_locations,
            &self.context.session_location,
        )
    }

    pub fn render_mode(&self) -> RenderMode {
        let resolution = self.resolution();
        let lifecycle = match resolution.location() {
            Some(location) => self.fetcher.lifecycle(&location.uuid).clone(),
            // not consulted by the selector for an invalid location
            None => Lifecycle::Pending,
        };

        select_render_mode(
            self.context.bed_management_enabled,
            &resolution,
            &lifecycle,
            self.bed_filter,
        )
    }

    fn sync_fetch(&mut self) -> Option<FetchTicket> {
        if !self.context.bed_management_enabled {
            self.fetcher.reset();
            return None;
        }

        match self.resolution() {
            LocationResolution::Resolved(location) => self.fetcher.request(&location.uuid),
            LocationResolution::Invalid { location_uuid } => {
                tracing::info!(location = %location_uuid, "route names an unknown location");
                self.fetcher.reset();
                None
            }
        }
    }
}
