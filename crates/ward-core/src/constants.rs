//! Constants used throughout the ward core crate.

/// Feature flag that must be enabled for the ward view to render anything.
pub const BED_MANAGEMENT_FEATURE: &str = "bedmanagement-module";

/// Number of skeleton bed placeholders shown while the admission location is loading.
///
/// The real bed count is unknown until the data arrives, so this is fixed.
pub const LOADING_PLACEHOLDER_COUNT: usize = 20;

/// Context key of the patient workspace side panel mounted beside the ward view.
pub const WORKSPACE_CONTEXT_KEY: &str = "ward";

/// Default directory for ward data when no explicit directory is configured.
pub const DEFAULT_WARD_DATA_DIR: &str = "ward_data";

/// Filename of the known-locations list inside the ward data directory.
pub const LOCATIONS_FILENAME: &str = "locations.json";

/// Directory (inside the ward data directory) holding one admission location file per ward.
pub const ADMISSION_DIR_NAME: &str = "admission";

/// Default time a render waits for the admission location before answering with placeholders.
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 2_000;
