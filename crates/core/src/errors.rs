use thiserror::Error;

use crate::config::ConfigError;
use crate::dispatch::DispatchError;
use crate::domain::catalog::CatalogError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("item index {index} is out of range for a catalog of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Configuration(#[from] ConfigError),
}

impl ApplicationError {
    /// Stable class name used in structured command output.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(DomainError::IndexOutOfRange { .. })
            | Self::Dispatch(DispatchError::Domain(DomainError::IndexOutOfRange { .. })) => {
                "index_out_of_range"
            }
            Self::Dispatch(_) => "invalid_event",
            Self::Catalog(_) => "catalog",
            Self::Configuration(_) => "config_validation",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Domain(_) | Self::Dispatch(DispatchError::Domain(_)) => {
                "That item does not exist in the catalog."
            }
            Self::Dispatch(_) => "Cart events look like +N, -N, inc:N or dec:N.",
            Self::Catalog(_) => "The catalog could not be loaded. Check the catalog file.",
            Self::Configuration(_) => "The configuration is invalid. Check goodscart.toml.",
        }
    }
}
