use thiserror::Error;

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("step {index} is out of range (catalog has {step_count} steps)")]
    OutOfRange { index: usize, step_count: usize },
    #[error("step catalog must contain at least one step")]
    EmptyCatalog,
    #[error("failed to parse step catalog: {0}")]
    Catalog(#[from] toml::de::Error),
    #[error("failed to load settings: {0}")]
    Config(#[from] Box<figment::Error>),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for WizardError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, WizardError>;
