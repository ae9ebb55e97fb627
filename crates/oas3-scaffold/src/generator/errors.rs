use thiserror::Error;

/// Conditions that abort a generation run.
///
/// Every variant is fatal: the driver stops at the first one and nothing is erased or written.
/// Files that already exist are reported through `EmissionMessage`, never through this type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
  #[error("invalid OpenAPI contract: {reason}")]
  ContractInvalid { reason: String },

  #[error("operation '{operation}': query parameter '{parameter}' has unmappable type '{schema_type}'")]
  UnmappableType {
    operation: String,
    parameter: String,
    schema_type: String,
  },

  #[error("operation '{operation}' has no success response (expected one of 200, 201, 204)")]
  MissingResponse { operation: String },

  #[error("'{name}' does not match any configured namespace root")]
  NamespaceUnresolvable { name: String },

  #[error("collection already contains artifact '{name}'")]
  NameCollision { name: String },
}

impl GenerationError {
  pub(crate) fn contract(reason: impl std::fmt::Display) -> Self {
    Self::ContractInvalid {
      reason: reason.to_string(),
    }
  }
}

pub(crate) type GenerationResult<T> = Result<T, GenerationError>;
