//! # Ward Core
//!
//! Core logic of the ward view: which location is being viewed, what its beds look like and
//! which single presentation state to show.
//!
//! Pipeline:
//! - [`location`]: resolve the location from the route and the session default
//! - [`admission`]: lifecycle of the admission location fetch, with stale results discarded
//! - [`beds`]: filter bed layouts and project them onto beds and ward patients
//! - [`view`]: select the render mode from feature gate, resolution and lifecycle
//!
//! [`controller`] drives that pipeline from mount/route/fetch events, [`presenter`] turns a render
//! mode into banners and placeholders, and [`service`] hosts it all behind file-backed
//! collaborators for the REST server and the CLI.
//!
//! **No API concerns**: HTTP servers and CLIs belong in `api-rest`, `cli` and `api-shared`.

pub mod admission;
pub mod beds;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod feature;
pub mod location;
pub mod messages;
pub mod presenter;
pub mod service;
pub mod sources;
pub mod view;

pub use admission::{
    AdmissionFetchError, AdmissionFuture, AdmissionLayoutFetcher, AdmissionSource, FetchTicket,
    Lifecycle,
};
pub use beds::{
    bed_layout_to_bed, bed_occupancy, filter_beds, ward_patients, Bed, BedFilter, BedOccupancy,
    WardPatient,
};
pub use config::CoreConfig;
pub use constants::*;
pub use controller::{ViewContext, WardViewController};
pub use error::{WardError, WardResult};
pub use feature::{FeatureFlags, FeatureGate};
pub use location::{resolve_location, LocationResolution};
pub use messages::{MessageCatalog, Translator};
pub use presenter::{present, Notification, NotificationKind, Presentation};
pub use service::WardViewService;
pub use sources::{FileAdmissionSource, FileLocationDirectory, LocationDirectory};
pub use view::{select_render_mode, RenderMode, RenderModeKind};

pub use openmrs::{AdmissionLocation, BedLayout, BedStatus, BedType, Location, PatientRef};
pub use ward_types::LocationUuid;
