//! File-backed collaborators.
//!
//! ## Storage Layout
//!
//! ```text
//! <ward_data_dir>/
//!   locations.json          # array of OpenMRS locations (or the REST envelope)
//!   admission/
//!     <location uuid>.json  # OpenMRS admission location, v=full representation
//! ```

use crate::admission::{AdmissionFetchError, AdmissionFuture, AdmissionSource};
use crate::constants::{ADMISSION_DIR_NAME, LOCATIONS_FILENAME};
use crate::{WardError, WardResult};
use openmrs::{Admission, Location, LocationUuid, Locations};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const MAX_FILE_STEM_LEN: usize = 128;

/// Location directory collaborator: the known locations and the session default.
pub trait LocationDirectory: Send + Sync {
    fn locations(&self) -> Arc<[Location]>;

    fn session_location(&self) -> &Location;

    fn find(&self, location_uuid: &str) -> Option<Location> {
        self.locations()
            .iter()
            .find(|location| location.uuid == location_uuid)
            .cloned()
    }
}

/// Location directory loaded once from `locations.json`.
#[derive(Clone, Debug)]
pub struct FileLocationDirectory {
    locations: Arc<[Location]>,
    session_location: Location,
}

impl FileLocationDirectory {
    /// Load `<ward_data_dir>/locations.json`.
    ///
    /// The session location is `session_location` when given, otherwise the first location in
    /// the file.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `WardError::FileRead` if the file cannot be read,
    /// - `WardError::Openmrs` if it is not a valid location list,
    /// - `WardError::NoLocations` if the list is empty,
    /// - `WardError::UnknownSessionLocation` if `session_location` is not in the list.
    pub fn load(ward_data_dir: &Path, session_location: Option<&LocationUuid>) -> WardResult<Self> {
        let path = ward_data_dir.join(LOCATIONS_FILENAME);
        let text = std::fs::read_to_string(&path).map_err(|source| WardError::FileRead {
            path: path.clone(),
            source,
        })?;
        let locations = Locations::parse_list(&text)?;

        let directory = Self::new(locations, session_location, &path)?;
        tracing::info!(
            path = %path.display(),
            locations = directory.locations.len(),
            session_location = %directory.session_location.uuid,
            "loaded location directory"
        );
        Ok(directory)
    }

    fn new(
        locations: Vec<Location>,
        session_location: Option<&LocationUuid>,
        path: &Path,
    ) -> WardResult<Self> {
        let session_location = match session_location {
            Some(uuid) => locations
                .iter()
                .find(|location| &location.uuid == uuid)
                .cloned()
                .ok_or_else(|| WardError::UnknownSessionLocation(uuid.to_string()))?,
            None => locations
                .first()
                .cloned()
                .ok_or_else(|| WardError::NoLocations {
                    path: path.to_path_buf(),
                })?,
        };

        Ok(Self {
            locations: locations.into(),
            session_location,
        })
    }
}

impl LocationDirectory for FileLocationDirectory {
    fn locations(&self) -> Arc<[Location]> {
        Arc::clone(&self.locations)
    }

    fn session_location(&self) -> &Location {
        &self.session_location
    }
}

/// Admission source reading `<ward_data_dir>/admission/<uuid>.json`.
#[derive(Clone, Debug)]
pub struct FileAdmissionSource {
    admission_dir: PathBuf,
}

impl FileAdmissionSource {
    pub fn new(ward_data_dir: &Path) -> Self {
        Self {
            admission_dir: ward_data_dir.join(ADMISSION_DIR_NAME),
        }
    }

    /// File holding the admission location of `location_uuid`.
    ///
    /// Location identifiers are opaque, so only those usable as a single file name map to a file.
    fn path_for(&self, location_uuid: &LocationUuid) -> Result<PathBuf, AdmissionFetchError> {
        let name = location_uuid.as_str();
        let safe = name.len() <= MAX_FILE_STEM_LEN
            && name
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'.' | b'-' | b'_'))
            // "." and ".." would escape the admission directory
            && !name.bytes().all(|b| b == b'.');

        if !safe {
            return Err(AdmissionFetchError::with_message(format!(
                "Location uuid {location_uuid} cannot name an admission location file"
            )));
        }

        Ok(self.admission_dir.join(format!("{name}.json")))
    }

    async fn read(&self, location_uuid: &LocationUuid) -> Result<openmrs::AdmissionLocation, AdmissionFetchError> {
        let path = self.path_for(location_uuid)?;

        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AdmissionFetchError::with_message(format!(
                    "No admission location found for {location_uuid}"
                )));
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to read admission location");
                // io errors carry no message fit for users
                return Err(AdmissionFetchError::without_message());
            }
        };

        let admission = Admission::parse(&text)
            .map_err(|e| AdmissionFetchError::with_message(e.to_string()))?;

        if admission.ward.uuid != *location_uuid {
            return Err(AdmissionFetchError::with_message(format!(
                "Admission location file for {location_uuid} describes ward {}",
                admission.ward.uuid
            )));
        }

        Ok(admission)
    }
}

impl AdmissionSource for FileAdmissionSource {
    fn admission_location<'a>(&'a self, location_uuid: &'a LocationUuid) -> AdmissionFuture<'a> {
        Box::pin(self.read(location_uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const LOCATIONS: &str = r#"[
        {"uuid": "loc-1", "display": "Inpatient Ward"},
        {"uuid": "loc-2", "display": "Maternity Ward"}
    ]"#;

    const ADMISSION_LOC_1: &str = r#"{
        "ward": {"uuid": "loc-1", "display": "Inpatient Ward"},
        "totalBeds": 1,
        "occupiedBeds": 0,
        "bedLayouts": [{"bedId": 1, "bedUuid": "bed-1", "bedNumber": "A1", "status": "AVAILABLE", "patients": []}]
    }"#;

    fn setup_data_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(LOCATIONS_FILENAME), LOCATIONS).unwrap();
        std::fs::create_dir(dir.path().join(ADMISSION_DIR_NAME)).unwrap();
        std::fs::write(
            dir.path().join(ADMISSION_DIR_NAME).join("loc-1.json"),
            ADMISSION_LOC_1,
        )
        .unwrap();
        dir
    }

    fn uuid(s: &str) -> LocationUuid {
        LocationUuid::new(s).unwrap()
    }

    #[test]
    fn directory_defaults_session_to_first_location() {
        let dir = setup_data_dir();

        let directory = FileLocationDirectory::load(dir.path(), None).expect("load");
        assert_eq!(directory.locations().len(), 2);
        assert_eq!(directory.session_location().uuid, "loc-1");
        assert_eq!(
            directory.find("loc-2").map(|l| l.display),
            Some("Maternity Ward".to_string())
        );
        assert_eq!(directory.find("loc-3"), None);
    }

    #[test]
    fn directory_honours_configured_session_location() {
        let dir = setup_data_dir();

        let directory = FileLocationDirectory::load(dir.path(), Some(&uuid("loc-2"))).expect("load");
        assert_eq!(directory.session_location().display, "Maternity Ward");
    }

    #[test]
    fn directory_rejects_unknown_session_location() {
        let dir = setup_data_dir();

        let err = FileLocationDirectory::load(dir.path(), Some(&uuid("loc-9"))).expect_err("reject");
        assert!(matches!(err, WardError::UnknownSessionLocation(_)));
    }

    #[test]
    fn directory_rejects_empty_and_missing_files() {
        let dir = TempDir::new().unwrap();

        let err = FileLocationDirectory::load(dir.path(), None).expect_err("missing file");
        assert!(matches!(err, WardError::FileRead { .. }));

        std::fs::write(dir.path().join(LOCATIONS_FILENAME), "[]").unwrap();
        let err = FileLocationDirectory::load(dir.path(), None).expect_err("empty list");
        assert!(matches!(err, WardError::NoLocations { .. }));
    }

    #[tokio::test]
    async fn admission_source_reads_location_file() {
        let dir = setup_data_dir();
        let source = FileAdmissionSource::new(dir.path());

        let admission = source
            .admission_location(&uuid("loc-1"))
            .await
            .expect("admission");
        assert_eq!(admission.bed_layouts.len(), 1);
    }

    #[tokio::test]
    async fn admission_source_reports_missing_file_with_message() {
        let dir = setup_data_dir();
        let source = FileAdmissionSource::new(dir.path());

        let err = source
            .admission_location(&uuid("loc-2"))
            .await
            .expect_err("missing");
        assert_eq!(
            err.message.as_deref(),
            Some("No admission location found for loc-2")
        );
    }

    #[tokio::test]
    async fn admission_source_reports_schema_mismatch() {
        let dir = setup_data_dir();
        std::fs::write(
            dir.path().join(ADMISSION_DIR_NAME).join("loc-2.json"),
            r#"{"ward": {"uuid": "loc-2", "display": "Maternity Ward"}, "bedLayouts": {}}"#,
        )
        .unwrap();
        let source = FileAdmissionSource::new(dir.path());

        let err = source
            .admission_location(&uuid("loc-2"))
            .await
            .expect_err("mismatch");
        assert!(err.message.unwrap_or_default().contains("bedLayouts"));
    }

    #[tokio::test]
    async fn admission_source_rejects_file_for_another_ward() {
        let dir = setup_data_dir();
        std::fs::write(
            dir.path().join(ADMISSION_DIR_NAME).join("loc-2.json"),
            ADMISSION_LOC_1,
        )
        .unwrap();
        let source = FileAdmissionSource::new(dir.path());

        let err = source
            .admission_location(&uuid("loc-2"))
            .await
            .expect_err("wrong ward");
        assert!(err.message.unwrap_or_default().contains("describes ward loc-1"));
    }

    #[tokio::test]
    async fn admission_source_hides_io_errors_behind_fallback() {
        let dir = setup_data_dir();
        // a directory where the file should be fails with something other than NotFound
        std::fs::create_dir(dir.path().join(ADMISSION_DIR_NAME).join("loc-2.json")).unwrap();
        let source = FileAdmissionSource::new(dir.path());

        let err = source
            .admission_location(&uuid("loc-2"))
            .await
            .expect_err("unreadable");
        assert_eq!(err.message, None);
    }

    #[tokio::test]
    async fn admission_source_refuses_path_like_uuids() {
        let dir = setup_data_dir();
        let source = FileAdmissionSource::new(dir.path());

        for id in ["../locations", "..", "Ward 7 (east)"] {
            let err = source
                .admission_location(&uuid(id))
                .await
                .expect_err("not a file name");
            assert!(
                err.message.unwrap_or_default().contains("cannot name an admission location file"),
                "{id}"
            );
        }
    }

    #[test]
    fn directory_accepts_free_form_location_ids() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(LOCATIONS_FILENAME),
            r#"[{"uuid": "Ward 7 (east)", "display": "East Wing"}]"#,
        )
        .unwrap();

        let directory = FileLocationDirectory::load(dir.path(), None).expect("load");
        assert_eq!(directory.session_location().uuid, "Ward 7 (east)");
    }
}
