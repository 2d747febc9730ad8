//! Admission layout fetching.
//!
//! The fetch itself is delegated to an [`AdmissionSource`]. This module owns the lifecycle of that
//! fetch for the location currently on screen:
//!
//! ```text
//! request(uuid) ──► Pending ──complete(ticket, Ok)──► Success
//!                          └─complete(ticket, Err)──► Failure
//! ```
//!
//! Every request is tagged with a [`FetchTicket`] carrying a generation number. Requesting a
//! different location (or resetting) bumps the generation, so a result that arrives late for a
//! location that is no longer displayed is discarded instead of overwriting the current state.

use openmrs::{AdmissionLocation, LocationUuid};
use std::future::Future;
use std::pin::Pin;

/// Failure reported by an [`AdmissionSource`].
///
/// `message` is shown to the user verbatim when present.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{}", .message.as_deref().unwrap_or("admission location fetch failed"))]
pub struct AdmissionFetchError {
    pub message: Option<String>,
}

impl AdmissionFetchError {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    pub fn without_message() -> Self {
        Self { message: None }
    }
}

/// Status of an asynchronous fetch.
#[derive(Clone, Debug, PartialEq)]
pub enum Lifecycle<T> {
    Pending,
    Success(T),
    Failure(AdmissionFetchError),
}

impl<T> Lifecycle<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Lifecycle::Pending)
    }
}

/// Boxed future returned by [`AdmissionSource::admission_location`].
pub type AdmissionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<AdmissionLocation, AdmissionFetchError>> + Send + 'a>>;

/// Anything that can yield the admission location of a ward.
pub trait AdmissionSource: Send + Sync {
    fn admission_location<'a>(&'a self, location_uuid: &'a LocationUuid) -> AdmissionFuture<'a>;
}

/// Identifies one issued fetch. Hand it back to [`AdmissionLayoutFetcher::complete`] together
/// with the fetch result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    location_uuid: LocationUuid,
    generation: u64,
}

impl FetchTicket {
    pub fn location_uuid(&self) -> &LocationUuid {
        &self.location_uuid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Clone, Debug)]
struct TrackedFetch {
    location_uuid: LocationUuid,
    generation: u64,
    lifecycle: Lifecycle<AdmissionLocation>,
}

static PENDING: Lifecycle<AdmissionLocation> = Lifecycle::Pending;

/// Lifecycle state machine for the admission location of the displayed ward.
#[derive(Clone, Debug, Default)]
pub struct AdmissionLayoutFetcher {
    generation: u64,
    current: Option<TrackedFetch>,
}

impl AdmissionLayoutFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `location_uuid`.
    ///
    /// Returns a ticket for the fetch the caller must now issue, or `None` when this location is
    /// already tracked (its lifecycle is not restarted).
    pub fn request(&mut self, location_uuid: &LocationUuid) -> Option<FetchTicket> {
        if let Some(current) = &self.current {
            if &current.location_uuid == location_uuid {
                return None;
            }
        }

        self.generation += 1;
        self.current = Some(TrackedFetch {
            location_uuid: location_uuid.clone(),
            generation: self.generation,
            lifecycle: Lifecycle::Pending,
        });

        tracing::debug!(
            location = %location_uuid,
            generation = self.generation,
            "admission location fetch requested"
        );

        Some(FetchTicket {
            location_uuid: location_uuid.clone(),
            generation: self.generation,
        })
    }

    /// Apply the result of the fetch identified by `ticket`.
    ///
    /// Returns `true` when the result was applied. A result is discarded when the ticket is
    /// stale (another location was requested since, or the fetcher was reset) or when this fetch
    /// has already completed.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<AdmissionLocation, AdmissionFetchError>,
    ) -> bool {
        let Some(current) = self.current.as_mut() else {
            tracing::debug!(location = %ticket.location_uuid, "discarding result: nothing tracked");
            return false;
        };

        if current.generation != ticket.generation || current.location_uuid != ticket.location_uuid
        {
            tracing::debug!(
                location = %ticket.location_uuid,
                stale_generation = ticket.generation,
                current_generation = current.generation,
                "discarding stale admission location result"
            );
            return false;
        }

        if !current.lifecycle.is_pending() {
            tracing::debug!(location = %ticket.location_uuid, "discarding duplicate completion");
            return false;
        }

        current.lifecycle = match result {
            Ok(admission) => {
                tracing::info!(
                    location = %ticket.location_uuid,
                    bed_layouts = admission.bed_layouts.len(),
                    "admission location loaded"
                );
                Lifecycle::Success(admission)
            }
            Err(error) => {
                tracing::warn!(location = %ticket.location_uuid, error = %error, "admission location fetch failed");
                Lifecycle::Failure(error)
            }
        };

        true
    }

    /// Lifecycle for `location_uuid`; `Pending` unless that location is the tracked one.
    pub fn lifecycle(&self, location_uuid: &LocationUuid) -> &Lifecycle<AdmissionLocation> {
        match &self.current {
            Some(current) if &current.location_uuid == location_uuid => &current.lifecycle,
            _ => &PENDING,
        }
    }

    pub fn current_location(&self) -> Option<&LocationUuid> {
        self.current.as_ref().map(|current| &current.location_uuid)
    }

    /// Stop tracking. Outstanding tickets become stale.
    pub fn reset(&mut self) {
        if self.current.take().is_some() {
            self.generation += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openmrs::Location;

    fn uuid(s: &str) -> LocationUuid {
        LocationUuid::new(s).unwrap()
    }

    fn admission(ward: &str) -> AdmissionLocation {
        AdmissionLocation {
            ward: Location::new(uuid(ward), "Ward"),
            total_beds: 0,
            occupied_beds: 0,
            bed_layouts: vec![],
        }
    }

    #[test]
    fn request_enters_pending_and_success_is_applied() {
        let mut fetcher = AdmissionLayoutFetcher::new();
        let ticket = fetcher.request(&uuid("loc-1")).expect("ticket");

        assert_eq!(ticket.location_uuid(), &uuid("loc-1"));
        assert!(fetcher.lifecycle(&uuid("loc-1")).is_pending());

        assert!(fetcher.complete(&ticket, Ok(admission("loc-1"))));
        assert_eq!(
            fetcher.lifecycle(&uuid("loc-1")),
            &Lifecycle::Success(admission("loc-1"))
        );
    }

    #[test]
    fn failure_is_applied_once() {
        let mut fetcher = AdmissionLayoutFetcher::new();
        let ticket = fetcher.request(&uuid("loc-1")).expect("ticket");

        let error = AdmissionFetchError::with_message("network down");
        assert!(fetcher.complete(&ticket, Err(error.clone())));
        assert!(!fetcher.complete(&ticket, Ok(admission("loc-1"))));
        assert_eq!(fetcher.lifecycle(&uuid("loc-1")), &Lifecycle::Failure(error));
    }

    #[test]
    fn re_requesting_same_location_keeps_lifecycle() {
        let mut fetcher = AdmissionLayoutFetcher::new();
        let ticket = fetcher.request(&uuid("loc-1")).expect("ticket");
        fetcher.complete(&ticket, Ok(admission("loc-1")));

        assert_eq!(fetcher.request(&uuid("loc-1")), None);
        assert!(matches!(
            fetcher.lifecycle(&uuid("loc-1")),
            Lifecycle::Success(_)
        ));
    }

    #[test]
    fn stale_result_is_discarded_after_location_change() {
        let mut fetcher = AdmissionLayoutFetcher::new();
        let first = fetcher.request(&uuid("loc-1")).expect("first ticket");
        let second = fetcher.request(&uuid("loc-2")).expect("second ticket");
        assert!(second.generation() > first.generation());

        // loc-1 resolves after the view already moved to loc-2
        assert!(!fetcher.complete(&first, Ok(admission("loc-1"))));
        assert!(fetcher.lifecycle(&uuid("loc-2")).is_pending());

        assert!(fetcher.complete(&second, Ok(admission("loc-2"))));
        assert!(matches!(
            fetcher.lifecycle(&uuid("loc-2")),
            Lifecycle::Success(_)
        ));
    }

    #[test]
    fn returning_to_a_location_issues_a_fresh_ticket() {
        let mut fetcher = AdmissionLayoutFetcher::new();
        let first = fetcher.request(&uuid("loc-1")).expect("first");
        fetcher.request(&uuid("loc-2")).expect("second");
        let third = fetcher.request(&uuid("loc-1")).expect("third");

        // same location, older generation: still stale
        assert!(!fetcher.complete(&first, Err(AdmissionFetchError::without_message())));
        assert!(fetcher.lifecycle(&uuid("loc-1")).is_pending());
        assert!(fetcher.complete(&third, Ok(admission("loc-1"))));
    }

    #[test]
    fn reset_makes_outstanding_tickets_stale() {
        let mut fetcher = AdmissionLayoutFetcher::new();
        let ticket = fetcher.request(&uuid("loc-1")).expect("ticket");
        fetcher.reset();

        assert_eq!(fetcher.current_location(), None);
        assert!(!fetcher.complete(&ticket, Ok(admission("loc-1"))));
    }

    #[test]
    fn untracked_location_reads_as_pending() {
        let fetcher = AdmissionLayoutFetcher::new();
        assert!(fetcher.lifecycle(&uuid("loc-9")).is_pending());
    }

    #[test]
    fn error_display_falls_back_without_message() {
        assert_eq!(
            AdmissionFetchError::with_message("network down").to_string(),
            "network down"
        );
        assert_eq!(
            AdmissionFetchError::without_message().to_string(),
            "admission location fetch failed"
        );
    }
}
