//! State machine core: current state, pending message, and delivery.

use crate::builder::CoreBuilder;
use crate::core::{fatal, Envelope, State, Violation};
use crate::machine::dispatch::{Dispatch, Fallback};

/// Runtime state embedded in every concrete machine.
///
/// Holds the current-state selector and the slot for the message being
/// delivered. The slot is empty between calls to [`StateMachine::send`].
pub struct Core<M> {
    name: &'static str,
    state: State<M>,
    pending: Option<Envelope>,
    in_flight: bool,
}

impl<M> Core<M> {
    /// Create a core starting in `initial`, named after the machine type.
    pub fn new(initial: State<M>) -> Self {
        Self::from_parts(short_type_name::<M>(), initial)
    }

    /// Builder for a core with a custom name.
    pub fn builder() -> CoreBuilder<M> {
        CoreBuilder::new()
    }

    pub(crate) fn from_parts(name: &'static str, initial: State<M>) -> Self {
        Self {
            name,
            state: initial,
            pending: None,
            in_flight: false,
        }
    }

    /// Name used in logs and violation messages.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Currently selected state.
    pub fn state(&self) -> State<M> {
        self.state
    }

    /// True when no message is pending or being delivered.
    pub fn is_idle(&self) -> bool {
        self.pending.is_none() && !self.in_flight
    }

    pub(crate) fn set_state(&mut self, to: State<M>) {
        tracing::debug!(
            machine = self.name,
            from = self.state.name(),
            to = to.name(),
            "transition"
        );
        self.state = to;
    }

    pub(crate) fn take_pending(&mut self) -> Option<Envelope> {
        self.pending.take()
    }

    pub(crate) fn restore_pending(&mut self, envelope: Envelope) {
        self.pending = Some(envelope);
    }
}

/// A machine whose states are its own behavior methods.
///
/// Implementors embed a [`Core`] and expose it through `core`/`core_mut`.
/// Each behavior starts exactly one dispatch with [`dispatch`](Self::dispatch)
/// or [`dispatch_or`](Self::dispatch_or), binds handlers, and resolves it.
///
/// # Example
///
/// ```rust
/// use switchboard::machine::{Core, StateMachine};
/// use switchboard::state;
///
/// struct Coin;
/// struct Push;
///
/// struct Turnstile {
///     core: Core<Self>,
/// }
///
/// impl StateMachine for Turnstile {
///     fn core(&self) -> &Core<Self> {
///         &self.core
///     }
///
///     fn core_mut(&mut self) -> &mut Core<Self> {
///         &mut self.core
///     }
/// }
///
/// impl Turnstile {
///     fn new() -> Self {
///         Self {
///             core: Core::new(state!(Turnstile::locked)),
///         }
///     }
///
///     fn locked(&mut self) {
///         self.dispatch()
///             .on_signal::<Coin>(|m| m.transition(state!(Turnstile::unlocked)))
///             .on::<Push>(|_, _push| {})
///             .resolve();
///     }
///
///     fn unlocked(&mut self) {
///         self.dispatch()
///             .on::<Coin>(|_, _coin| {})
///             .on_signal::<Push>(|m| m.transition(state!(Turnstile::locked)))
///             .resolve();
///     }
/// }
///
/// let mut turnstile = Turnstile::new();
/// turnstile.send(Coin);
/// assert_eq!(turnstile.current_state().name(), "unlocked");
/// turnstile.send(Push);
/// assert_eq!(turnstile.current_state().name(), "locked");
/// ```
pub trait StateMachine: Sized {
    /// Shared access to the embedded core.
    fn core(&self) -> &Core<Self>;

    /// Exclusive access to the embedded core.
    fn core_mut(&mut self) -> &mut Core<Self>;

    /// Deliver `message` to the current state and run it to completion.
    ///
    /// # Panics
    ///
    /// Panics if called from inside a handler of the same machine, or if the
    /// current state returns without resolving its dispatch.
    fn send<T: 'static>(&mut self, message: T) {
        deliver(self, Envelope::new(message));
    }

    /// Currently selected state.
    fn current_state(&self) -> State<Self> {
        self.core().state()
    }

    /// Select `to` as the state for the next message.
    fn transition(&mut self, to: State<Self>) {
        self.core_mut().set_state(to);
    }

    /// Start the dispatch for the pending message with the default fallback,
    /// which logs the message type as unhandled.
    fn dispatch(&mut self) -> Dispatch<'_, Self> {
        Dispatch::begin(self, None)
    }

    /// Start the dispatch for the pending message with a custom fallback.
    ///
    /// The fallback sees the envelope by reference: it can read the message
    /// type but not take the payload.
    fn dispatch_or<'a, F>(&'a mut self, fallback: F) -> Dispatch<'a, Self>
    where
        F: FnOnce(&mut Self, &Envelope) + 'a,
    {
        let fallback: Fallback<'a, Self> = Box::new(fallback);
        Dispatch::begin(self, Some(fallback))
    }
}

/// Run one message through the current state of `machine`.
fn deliver<M: StateMachine>(machine: &mut M, envelope: Envelope) {
    let core = machine.core_mut();
    if core.in_flight {
        fatal(Violation::MessageInFlight {
            machine: core.name,
            message: envelope.type_name(),
        });
    }

    let state = core.state;
    tracing::trace!(
        machine = core.name,
        state = state.name(),
        message_type = envelope.type_name(),
        "delivering message"
    );
    core.in_flight = true;
    core.pending = Some(envelope);

    (state.behavior())(machine);

    let core = machine.core_mut();
    core.in_flight = false;
    if let Some(leftover) = core.pending.take() {
        fatal(Violation::Unconsumed {
            state: state.name(),
            message: leftover.type_name(),
        });
    }
}

/// Last path segment of `M`'s type name, ignoring generic arguments.
fn short_type_name<M>() -> &'static str {
    let full = std::any::type_name::<M>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
