//! Build errors for machine cores.

use thiserror::Error;

/// Errors that can occur when building a machine core.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Machine name is empty. Omit .name() to use the type name")]
    EmptyName,
}
