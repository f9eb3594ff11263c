//! Switchboard: a state machine runtime with typed message dispatch
//!
//! A machine's states are its own behavior methods. Messages of any `'static`
//! type are sent one at a time; the current state binds a handler per message
//! type and exactly one handler (or the fallback) receives each message by
//! value. Handlers move the machine to another state by replacing the
//! current-state selector.
//!
//! # Core Concepts
//!
//! - **TypeIdentity**: comparable per-type token used for routing
//! - **Envelope**: type-erased holder of the message being delivered
//! - **State**: selector naming the behavior that handles the next message
//! - **Dispatch**: per-state handler bindings, resolved most recent first
//!
//! # Example
//!
//! ```rust
//! use switchboard::machine::{Core, StateMachine};
//! use switchboard::state;
//!
//! struct Coin;
//! struct Push;
//!
//! struct Turnstile {
//!     core: Core<Self>,
//!     unhandled: Vec<&'static str>,
//! }
//!
//! impl StateMachine for Turnstile {
//!     fn core(&self) -> &Core<Self> {
//!         &self.core
//!     }
//!
//!     fn core_mut(&mut self) -> &mut Core<Self> {
//!         &mut self.core
//!     }
//! }
//!
//! impl Turnstile {
//!     fn locked(&mut self) {
//!         self.dispatch_or(|m, envelope| m.unhandled.push(envelope.type_name()))
//!             .on_signal::<Coin>(|m| m.transition(state!(Turnstile::unlocked)))
//!             .on::<Push>(|_, _push| {})
//!             .resolve();
//!     }
//!
//!     fn unlocked(&mut self) {
//!         self.dispatch()
//!             .on::<Coin>(|_, _coin| {})
//!             .on_signal::<Push>(|m| m.transition(state!(Turnstile::locked)))
//!             .resolve();
//!     }
//! }
//!
//! let mut turnstile = Turnstile {
//!     core: Core::new(state!(Turnstile::locked)),
//!     unhandled: Vec::new(),
//! };
//!
//! turnstile.send(Coin);
//! assert_eq!(turnstile.current_state().name(), "unlocked");
//!
//! turnstile.send(Push);
//! assert_eq!(turnstile.current_state().name(), "locked");
//!
//! turnstile.send(42);
//! assert_eq!(turnstile.unhandled, vec!["i32"]);
//! assert_eq!(turnstile.current_state().name(), "locked");
//! ```

pub mod builder;
pub mod core;
pub mod diagram;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, CoreBuilder};
pub use crate::core::{Envelope, State, TypeIdentity, Violation};
pub use diagram::Diagram;
pub use machine::{Core, Dispatch, StateMachine};
