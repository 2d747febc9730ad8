//! Ward view service.
//!
//! Bundles the collaborators a host needs to render a ward view on demand: the location
//! directory, the admission source, the feature gate and the message lookup. Each render runs
//! its own [`WardViewController`] through mount and, if one was issued, the admission fetch.
//! When the fetch outlives the configured timeout the render answers with the loading
//! placeholders instead of waiting.

use crate::admission::AdmissionSource;
use crate::beds::BedFilter;
use crate::config::CoreConfig;
use crate::controller::{ViewContext, WardViewController};
use crate::feature::FeatureGate;
use crate::messages::{MessageCatalog, Translator};
use crate::presenter::{present, Presentation};
use crate::sources::{FileAdmissionSource, FileLocationDirectory, LocationDirectory};
use crate::view::RenderMode;
use crate::WardResult;
use openmrs::Location;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct WardViewService {
    directory: Arc<dyn LocationDirectory>,
    source: Arc<dyn AdmissionSource>,
    gate: Arc<dyn FeatureGate>,
    messages: Arc<dyn Translator>,
    bed_filter: BedFilter,
    fetch_timeout: Duration,
}

impl WardViewService {
    pub fn new(
        directory: Arc<dyn LocationDirectory>,
        source: Arc<dyn AdmissionSource>,
        gate: Arc<dyn FeatureGate>,
        messages: Arc<dyn Translator>,
        bed_filter: BedFilter,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            directory,
            source,
            gate,
            messages,
            bed_filter,
            fetch_timeout,
        }
    }

    /// Build the service from file-backed collaborators described by `cfg`.
    ///
    /// # Errors
    ///
    /// Returns an error if the location directory or the message overrides cannot be loaded.
    pub fn from_config(cfg: &CoreConfig) -> WardResult<Self> {
        let directory = FileLocationDirectory::load(cfg.ward_data_dir(), cfg.session_location())?;
        let messages = match cfg.messages_file() {
            Some(path) => MessageCatalog::load(path)?,
            None => MessageCatalog::new(),
        };

        Ok(Self::new(
            Arc::new(directory),
            Arc::new(FileAdmissionSource::new(cfg.ward_data_dir())),
            Arc::new(cfg.feature_flags().clone()),
            Arc::new(messages),
            cfg.bed_filter(),
            cfg.fetch_timeout(),
        ))
    }

    pub fn locations(&self) -> Arc<[Location]> {
        self.directory.locations()
    }

    /// The session location: `session_override` when it names a known location, otherwise the
    /// directory default.
    pub fn session_location(&self, session_override: Option<&str>) -> Location {
        session_override
            .and_then(|uuid| self.directory.find(uuid))
            .unwrap_or_else(|| self.directory.session_location().clone())
    }

    pub fn view_context(
        &self,
        route_location_uuid: Option<String>,
        session_override: Option<&str>,
    ) -> ViewContext {
        ViewContext::new(
            route_location_uuid,
            self.directory.locations(),
            self.session_location(session_override),
            self.gate.as_ref(),
        )
    }

    /// Mount a fresh view and drive its fetch, waiting at most the configured timeout.
    pub async fn render_mode(
        &self,
        route_location_uuid: Option<String>,
        session_override: Option<&str>,
    ) -> RenderMode {
        let context = self.view_context(route_location_uuid, session_override);
        let mut controller = WardViewController::new(context, self.bed_filter);

        if let Some(ticket) = controller.mount() {
            let fetch = self.source.admission_location(ticket.location_uuid());
            match tokio::time::timeout(self.fetch_timeout, fetch).await {
                Ok(result) => {
                    controller.fetch_completed(&ticket, result);
                }
                Err(_) => {
                    tracing::warn!(
                        location = %ticket.location_uuid(),
                        timeout_ms = self.fetch_timeout.as_millis() as u64,
                        "admission location still loading, answering with placeholders"
                    );
                }
            }
        }

        controller.render_mode()
    }

    pub async fn render(
        &self,
        route_location_uuid: Option<String>,
        session_override: Option<&str>,
    ) -> Presentation {
        let mode = self
            .render_mode(route_location_uuid, session_override)
            .await;
        present(&mode, self.messages.as_ref())
    }
}
