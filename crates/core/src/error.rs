use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
  #[error("Validation: {field}: {message}")]
  Validation { field: String, message: String },

  #[error("Config parse: {0}")]
  ConfigParse(#[from] toml::de::Error),

  #[error("Config serialize: {0}")]
  ConfigSerialize(#[from] toml::ser::Error),

  #[error("IO: {0}")]
  Io(#[from] std::io::Error),
}

impl Error {
  pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self::Validation {
      field: field.into(),
      message: message.into(),
    }
  }
}

pub type Result<T> = std::result::Result<T, Error>;
