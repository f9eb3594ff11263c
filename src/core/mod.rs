//! Core building blocks of the dispatch runtime.
//!
//! - `TypeIdentity`: comparable per-type token with a display name
//! - `Envelope`: type-erased, single-owner message container
//! - `State`: selector naming the machine's current behavior
//! - `Violation`: fatal contract violations

mod envelope;
mod identity;
mod state;
mod violation;

pub use envelope::Envelope;
pub use identity::TypeIdentity;
pub use state::{Behavior, State};
pub use violation::Violation;

pub(crate) use violation::fatal;
