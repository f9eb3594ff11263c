//! Per-type identity tokens used to route messages.
//!
//! A `TypeIdentity` pairs the compiler-assigned [`TypeId`] of a type with its
//! human-readable name. Equality and hashing only look at the `TypeId`, so two
//! distinct types never compare equal even if their names happen to collide.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Comparable identity of a message type.
///
/// # Example
///
/// ```rust
/// use switchboard::core::TypeIdentity;
///
/// struct Coin;
/// struct Push;
///
/// assert_eq!(TypeIdentity::of::<Coin>(), TypeIdentity::of::<Coin>());
/// assert_ne!(TypeIdentity::of::<Coin>(), TypeIdentity::of::<Push>());
/// assert_eq!(TypeIdentity::of::<i32>().name(), "i32");
/// assert_eq!(TypeIdentity::of::<Box<String>>().short_name(), "Box<String>");
/// ```
#[derive(Clone, Copy)]
pub struct TypeIdentity {
    id: TypeId,
    name: &'static str,
}

impl TypeIdentity {
    /// Identity of `T`.
    ///
    /// Pure and infallible: calling it twice for the same type yields equal
    /// identities.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Human-readable name of the type, for diagnostics only.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name with module paths stripped from every segment.
    ///
    /// Generic arguments are kept, so `alloc::boxed::Box<alloc::string::String>`
    /// becomes `Box<String>`.
    pub fn short_name(&self) -> String {
        strip_paths(self.name)
    }
}

fn strip_paths(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = 0;
    let mut chars = full.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            out.truncate(segment);
            continue;
        }
        out.push(c);
        if !(c.is_alphanumeric() || c == '_') {
            segment = out.len();
        }
    }
    out
}

impl PartialEq for TypeIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeIdentity {}

impl Hash for TypeIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeIdentity").field(&self.name).finish()
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
