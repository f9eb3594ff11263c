//! Type-erased, single-owner message container.

use super::identity::TypeIdentity;
use super::violation::{fatal, Violation};
use std::any::Any;
use std::fmt;

/// Holds exactly one message of any `'static` type.
///
/// The envelope exposes the [`TypeIdentity`] of its payload. The payload itself
/// can only be taken out by value, which consumes the envelope, so it can be
/// extracted at most once. Payloads do not need to be `Clone`.
///
/// # Example
///
/// ```rust
/// use switchboard::core::{Envelope, TypeIdentity};
///
/// let envelope = Envelope::new(Box::new(String::from("move-only")));
/// assert_eq!(envelope.identity(), TypeIdentity::of::<Box<String>>());
///
/// let text: Box<String> = envelope.into_inner();
/// assert_eq!(*text, "move-only");
/// ```
pub struct Envelope {
    identity: TypeIdentity,
    payload: Box<dyn Any>,
}

impl Envelope {
    /// Wrap `message`, tagging it with the identity of `T`.
    pub fn new<T: 'static>(message: T) -> Self {
        Self {
            identity: TypeIdentity::of::<T>(),
            payload: Box::new(message),
        }
    }

    /// Identity of the payload type.
    pub fn identity(&self) -> TypeIdentity {
        self.identity
    }

    /// Human-readable name of the payload type.
    pub fn type_name(&self) -> &'static str {
        self.identity.name()
    }

    /// Whether the payload is a `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.identity == TypeIdentity::of::<T>()
    }

    /// Take the payload out, or get the envelope back if it does not hold a `T`.
    pub fn try_into_inner<T: 'static>(self) -> Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }

        let identity = self.identity;
        match self.payload.downcast::<T>() {
            Ok(message) => Ok(*message),
            Err(payload) => Err(Self { identity, payload }),
        }
    }

    /// Take the payload out as a `T`.
    ///
    /// # Panics
    ///
    /// Extracting a type other than the one the envelope was built from is a
    /// contract violation and panics.
    #[track_caller]
    pub fn into_inner<T: 'static>(self) -> T {
        match self.try_into_inner::<T>() {
            Ok(message) => message,
            Err(envelope) => fatal(Violation::IdentityMismatch {
                expected: TypeIdentity::of::<T>().name(),
                found: envelope.type_name(),
            }),
        }
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}
