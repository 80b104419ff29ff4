use thiserror::Error;

use crate::lifecycle::LifecycleError;
use crate::store::StoreError;

/// Top-level error for service operations and startup.
///
/// Lifecycle rejections are ordinary validation results relayed to the
/// caller; store and IO failures are infrastructure problems.
#[derive(Debug, Error)]
pub enum DetailOpsError {
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
