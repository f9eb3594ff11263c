//! The current-state selector.
//!
//! A state is one behavior method of the concrete machine. The selector stores
//! that method together with its name so transitions can be logged and
//! compared without inspecting function addresses.

use std::fmt;

/// Signature of a state behavior: a method on the machine taking `&mut self`.
pub type Behavior<M> = fn(&mut M);

/// Selector pointing at one behavior of machine `M`.
///
/// Built with the [`state!`](crate::state) macro, which takes the name from
/// the method identifier. Two selectors are equal when their names are equal.
///
/// # Example
///
/// ```rust
/// use switchboard::state;
///
/// struct Door;
///
/// impl Door {
///     fn open(&mut self) {}
///     fn closed(&mut self) {}
/// }
///
/// let open = state!(Door::open);
/// let closed = state!(Door::closed);
///
/// assert_eq!(open.name(), "open");
/// assert_ne!(open, closed);
/// ```
pub struct State<M> {
    name: &'static str,
    behavior: Behavior<M>,
}

impl<M> State<M> {
    /// Create a selector for `behavior`, displayed as `name`.
    ///
    /// `name` must be the method name of `behavior`: equality only looks at
    /// the name. Expanded by [`state!`](crate::state); call the macro instead.
    #[doc(hidden)]
    pub const fn new(name: &'static str, behavior: Behavior<M>) -> Self {
        Self { name, behavior }
    }

    /// Name of the behavior.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn behavior(&self) -> Behavior<M> {
        self.behavior
    }
}

// Manual impls: deriving would require `M: Clone` and friends.
impl<M> Clone for State<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for State<M> {}

/// States compare by name; behavior names are unique within a machine.
impl<M> PartialEq for State<M> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<M> Eq for State<M> {}

impl<M> fmt::Debug for State<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("State").field(&self.name).finish()
    }
}

impl<M> fmt::Display for State<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
