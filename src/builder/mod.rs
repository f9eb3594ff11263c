//! Builder API for machine cores.
//!
//! [`CoreBuilder`] configures the core a machine embeds; the
//! [`state!`](crate::state) macro names states after their behavior methods.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::CoreBuilder;
