//! Builder for machine cores.

use crate::builder::error::BuildError;
use crate::core::State;
use crate::machine::Core;

/// Builder for a [`Core`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use switchboard::machine::Core;
/// use switchboard::state;
///
/// struct Lamp;
///
/// impl Lamp {
///     fn off(&mut self) {}
/// }
///
/// let core = Core::builder()
///     .name("hall-lamp")
///     .initial(state!(Lamp::off))
///     .build()
///     .unwrap();
///
/// assert_eq!(core.name(), "hall-lamp");
/// assert_eq!(core.state().name(), "off");
/// ```
pub struct CoreBuilder<M> {
    name: Option<&'static str>,
    initial: Option<State<M>>,
}

impl<M> CoreBuilder<M> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            name: None,
            initial: None,
        }
    }

    /// Name shown in logs and violation messages (optional).
    pub fn name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: State<M>) -> Self {
        self.initial = Some(state);
        self
    }

    /// Build the core.
    /// Returns an error if the initial state is missing or the name is empty.
    pub fn build(self) -> Result<Core<M>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        match self.name {
            Some("") => Err(BuildError::EmptyName),
            Some(name) => Ok(Core::from_parts(name, initial)),
            None => Ok(Core::new(initial)),
        }
    }
}

impl<M> Default for CoreBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}
