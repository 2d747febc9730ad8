#[derive(Debug, thiserror::Error)]
pub enum WardError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read ward data file {path}: {source}", path = path.display())]
    FileRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to deserialize YAML: {0}")]
    YamlDeserialization(serde_yaml::Error),
    #[error("OpenMRS payload error: {0}")]
    Openmrs(#[from] openmrs::OpenmrsError),
    #[error("invalid location uuid: {0}")]
    InvalidLocationUuid(#[from] ward_types::IdentifierError),
    #[error("no locations configured in {path}", path = path.display())]
    NoLocations { path: std::path::PathBuf },
    #[error("session location {0} is not a known location")]
    UnknownSessionLocation(String),
}

pub type WardResult<T> = std::result::Result<T, WardError>;
