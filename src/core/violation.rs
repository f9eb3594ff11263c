//! Contract violations raised by the dispatch runtime.
//!
//! None of these are recoverable. They are logged and then raised as a panic
//! carrying the violation's message.

use thiserror::Error;

/// Ways a state machine can break the single-message dispatch contract.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Violation {
    #[error("message type `{message}` is bound more than once in state `{state}`")]
    DuplicateBinding {
        state: &'static str,
        message: &'static str,
    },

    #[error("cannot extract `{expected}` from an envelope holding `{found}`")]
    IdentityMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("state `{state}` returned without consuming a `{message}` message")]
    Unconsumed {
        state: &'static str,
        message: &'static str,
    },

    #[error("`{message}` sent to `{machine}` while another message is in flight")]
    MessageInFlight {
        machine: &'static str,
        message: &'static str,
    },

    #[error("state `{state}` started a dispatch with no message pending")]
    NoPendingMessage { state: &'static str },
}

/// Log `violation` and abort the current call.
#[track_caller]
pub(crate) fn fatal(violation: Violation) -> ! {
    tracing::error!(%violation, "state machine contract violated");
    panic!("{violation}")
}
