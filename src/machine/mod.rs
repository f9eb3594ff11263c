//! State machine runtime.
//!
//! A concrete machine embeds a [`Core`] and implements [`StateMachine`]. Each
//! [`send`](StateMachine::send) runs the current state behavior, which builds a
//! [`Dispatch`] for the message and resolves it to exactly one handler.

mod dispatch;
mod runtime;

pub use dispatch::{Dispatch, Fallback};
pub use runtime::{Core, StateMachine};
