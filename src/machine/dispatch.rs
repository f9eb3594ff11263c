//! Dispatch chain: per-state handler bindings resolved against one message.
//!
//! A state behavior opens a [`Dispatch`], binds one handler per message type,
//! and calls [`Dispatch::resolve`]. Resolution walks the bindings from the most
//! recently bound to the oldest and runs the first one whose type matches the
//! pending message. If none matches, the fallback runs instead. Exactly one
//! handler runs per message.

use crate::core::{fatal, Envelope, TypeIdentity, Violation};
use crate::machine::runtime::StateMachine;

/// Handler invoked when no binding matches.
pub type Fallback<'a, M> = Box<dyn FnOnce(&mut M, &Envelope) + 'a>;

type Handler<'a, M> = Box<dyn FnOnce(&mut M, Envelope) + 'a>;

struct Binding<'a, M> {
    identity: TypeIdentity,
    handler: Handler<'a, M>,
}

/// Builder for the handlers of one state, holding the pending message.
///
/// Obtained from [`StateMachine::dispatch`] or [`StateMachine::dispatch_or`].
/// Dropping it without calling [`resolve`](Self::resolve) hands the message
/// back to the machine, which then reports it as unconsumed.
#[must_use = "a dispatch runs no handler until `resolve` is called"]
pub struct Dispatch<'a, M: StateMachine> {
    machine: &'a mut M,
    envelope: Option<Envelope>,
    fallback: Option<Fallback<'a, M>>,
    bindings: Vec<Binding<'a, M>>,
}

impl<'a, M: StateMachine> Dispatch<'a, M> {
    pub(crate) fn begin(machine: &'a mut M, fallback: Option<Fallback<'a, M>>) -> Self {
        let Some(envelope) = machine.core_mut().take_pending() else {
            fatal(Violation::NoPendingMessage {
                state: machine.core().state().name(),
            });
        };

        Self {
            machine,
            envelope: Some(envelope),
            fallback,
            bindings: Vec::new(),
        }
    }

    /// Bind `handler` to messages of type `T`; it receives the message by value.
    ///
    /// # Panics
    ///
    /// Binding a type that is already bound in this dispatch panics, before
    /// the dispatch is resolved.
    #[track_caller]
    pub fn on<T: 'static>(self, handler: impl FnOnce(&mut M, T) + 'a) -> Self {
        self.bind(
            TypeIdentity::of::<T>(),
            Box::new(move |machine: &mut M, envelope: Envelope| {
                handler(machine, envelope.into_inner::<T>())
            }),
        )
    }

    /// Bind `handler` to messages of type `T` without passing the message.
    ///
    /// The payload is dropped when the handler is selected.
    ///
    /// # Panics
    ///
    /// Same as [`on`](Self::on).
    #[track_caller]
    pub fn on_signal<T: 'static>(self, handler: impl FnOnce(&mut M) + 'a) -> Self {
        self.bind(
            TypeIdentity::of::<T>(),
            Box::new(move |machine: &mut M, _envelope: Envelope| handler(machine)),
        )
    }

    /// Types bound so far, oldest first.
    pub fn bound(&self) -> impl Iterator<Item = TypeIdentity> + '_ {
        self.bindings.iter().map(|binding| binding.identity)
    }

    /// Run the handler matching the pending message, or the fallback.
    pub fn resolve(mut self) {
        let Some(envelope) = self.envelope.take() else {
            return;
        };
        let bindings = std::mem::take(&mut self.bindings);
        let fallback = self.fallback.take();
        let machine = &mut *self.machine;

        let identity = envelope.identity();
        match bindings.into_iter().rev().find(|binding| binding.identity == identity) {
            Some(binding) => {
                tracing::trace!(
                    machine = machine.core().name(),
                    state = machine.core().state().name(),
                    message_type = identity.name(),
                    "handling message"
                );
                (binding.handler)(machine, envelope);
            }
            None => match fallback {
                Some(fallback) => fallback(machine, &envelope),
                None => unhandled(machine, &envelope),
            },
        }
    }

    #[track_caller]
    fn bind(mut self, identity: TypeIdentity, handler: Handler<'a, M>) -> Self {
        if self.bindings.iter().any(|binding| binding.identity == identity) {
            fatal(Violation::DuplicateBinding {
                state: self.machine.core().state().name(),
                message: identity.name(),
            });
        }

        self.bindings.push(Binding { identity, handler });
        self
    }
}

impl<M: StateMachine> Drop for Dispatch<'_, M> {
    fn drop(&mut self) {
        if let Some(envelope) = self.envelope.take() {
            self.machine.core_mut().restore_pending(envelope);
        }
    }
}

/// Default fallback.
fn unhandled<M: StateMachine>(machine: &M, envelope: &Envelope) {
    tracing::warn!(
        machine = machine.core().name(),
        state = machine.core().state().name(),
        message_type = envelope.type_name(),
        "unhandled message of type {}",
        envelope.type_name()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::runtime::Core;
    use crate::state;
    use std::rc::Rc;
    use tracing_test::traced_test;

    struct Coin;
    struct Push;

    #[derive(Debug, PartialEq)]
    struct Text(Box<String>);

    struct Recorder {
        core: Core<Self>,
        calls: Vec<String>,
    }

    impl StateMachine for Recorder {
        fn core(&self) -> &Core<Self> {
            &self.core
        }

        fn core_mut(&mut self) -> &mut Core<Self> {
            &mut self.core
        }
    }

    impl Recorder {
        fn new(initial: crate::core::State<Self>) -> Self {
            Self {
                core: Core::new(initial),
                calls: Vec::new(),
            }
        }

        fn two_bindings(&mut self) {
            self.dispatch_or(|m, envelope| {
                m.calls.push(format!("fallback:{}", envelope.type_name()))
            })
            .on_signal::<Coin>(|m| m.calls.push("coin".into()))
            .on::<Push>(|m, _push| m.calls.push("push".into()))
            .resolve();
        }

        fn with_payload(&mut self) {
            self.dispatch()
                .on::<Text>(|m, text| m.calls.push(format!("text:{}", text.0)))
                .resolve();
        }

        fn default_fallback(&mut self) {
            self.dispatch().on_signal::<Coin>(|_| {}).resolve();
        }

        fn duplicated(&mut self) {
            self.dispatch()
                .on_signal::<Coin>(|m| m.calls.push("first".into()))
                .on::<Coin>(|m, _| m.calls.push("second".into()))
                .resolve();
        }

        fn shared_signal(&mut self) {
            self.dispatch()
                .on_signal::<Rc<()>>(|m| m.calls.push("rc".into()))
                .resolve();
        }

        fn recovering(&mut self) {
            self.dispatch_or(|m, envelope| {
                m.calls.push(format!("recover:{}", envelope.type_name()));
                m.transition(state!(Recorder::two_bindings));
            })
            .on_signal::<Coin>(|m| m.calls.push("coin".into()))
            .resolve();
        }

        fn empty(&mut self) {
            self.dispatch_or(|m, _| m.calls.push("fallback".into()))
                .resolve();
        }
    }

    #[test]
    fn matching_binding_runs_exactly_once() {
        let mut recorder = Recorder::new(state!(Recorder::two_bindings));

        recorder.send(Coin);
        recorder.send(Push);

        assert_eq!(recorder.calls, vec!["coin", "push"]);
    }

    #[test]
    fn fallback_receives_type_name() {
        let mut recorder = Recorder::new(state!(Recorder::two_bindings));

        recorder.send(42_i32);

        assert_eq!(recorder.calls, vec!["fallback:i32"]);
        assert_eq!(recorder.current_state().name(), "two_bindings");
    }

    #[test]
    fn handler_receives_payload_by_value() {
        let mut recorder = Recorder::new(state!(Recorder::with_payload));

        recorder.send(Text(Box::new("hello".to_string())));

        assert_eq!(recorder.calls, vec!["text:hello"]);
    }

    #[test]
    fn chain_without_bindings_runs_fallback() {
        let mut recorder = Recorder::new(state!(Recorder::empty));

        recorder.send(Coin);

        assert_eq!(recorder.calls, vec!["fallback"]);
    }

    #[test]
    fn custom_fallback_can_transition() {
        let mut recorder = Recorder::new(state!(Recorder::recovering));

        recorder.send(7_u8);

        assert_eq!(recorder.current_state(), state!(Recorder::two_bindings));
        assert!(recorder.core().is_idle());

        recorder.send(Push);
        assert_eq!(recorder.calls, vec!["recover:u8", "push"]);
    }

    #[test]
    fn unmatched_payload_is_dropped_after_fallback() {
        let shared = Rc::new(());
        let mut recorder = Recorder::new(state!(Recorder::two_bindings));

        recorder.send(Rc::clone(&shared));

        assert_eq!(Rc::strong_count(&shared), 1);
        assert!(recorder.core().is_idle());
    }

    #[test]
    fn signal_handler_drops_payload() {
        let shared = Rc::new(());
        let mut recorder = Recorder::new(state!(Recorder::shared_signal));

        recorder.send(Rc::clone(&shared));

        assert_eq!(recorder.calls, vec!["rc"]);
        assert_eq!(Rc::strong_count(&shared), 1);
    }

    #[test]
    fn bound_lists_types_in_binding_order() {
        let mut recorder = Recorder::new(state!(Recorder::empty));
        recorder.core_mut().restore_pending(Envelope::new(Coin));

        let dispatch = recorder
            .dispatch()
            .on_signal::<Coin>(|_| {})
            .on_signal::<Push>(|_| {});
        let bound: Vec<_> = dispatch.bound().collect();
        dispatch.resolve();

        assert_eq!(
            bound,
            vec![TypeIdentity::of::<Coin>(), TypeIdentity::of::<Push>()]
        );
        assert!(recorder.core().is_idle());
    }

    #[test]
    fn dropped_dispatch_returns_message() {
        let mut recorder = Recorder::new(state!(Recorder::empty));
        recorder.core_mut().restore_pending(Envelope::new(Coin));

        drop(recorder.dispatch().on_signal::<Coin>(|_| {}));

        let pending = recorder.core_mut().take_pending();
        assert!(pending.is_some_and(|envelope| envelope.is::<Coin>()));
        assert!(recorder.calls.is_empty());
    }

    #[test]
    #[traced_test]
    fn default_fallback_logs_unhandled_type() {
        let mut recorder = Recorder::new(state!(Recorder::default_fallback));

        recorder.send(42_i32);

        assert!(logs_contain("unhandled message of type i32"));
        assert!(logs_contain("message_type=\"i32\""));
        assert!(recorder.calls.is_empty());
        assert_eq!(recorder.current_state().name(), "default_fallback");
    }

    #[test]
    #[should_panic(expected = "is bound more than once in state `duplicated`")]
    fn duplicate_binding_is_fatal_before_dispatch() {
        let mut recorder = Recorder::new(state!(Recorder::duplicated));
        recorder.send(Push);
    }
}
