//! Macros for ergonomic state construction.

/// Build a [`State`](crate::core::State) from a behavior method path.
///
/// The state's name is the method identifier, so `state!(Turnstile::locked)`
/// is named `"locked"`. Inside an `impl` block, `state!(Self::locked)` works
/// as well.
///
/// # Example
///
/// ```
/// use switchboard::state;
///
/// struct Valve;
///
/// impl Valve {
///     fn open(&mut self) {}
/// }
///
/// let open = state!(Valve::open);
/// assert_eq!(open.name(), "open");
/// ```
#[macro_export]
macro_rules! state {
    ($machine:ident :: $behavior:ident) => {
        $crate::core::State::<$machine>::new(stringify!($behavior), $machine::$behavior)
    };
}
