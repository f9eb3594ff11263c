//! Mermaid state diagrams for message-driven machines.
//!
//! A [`Diagram`] lists, per state, the message types it binds and the state
//! each handler moves to. Rendering produces a `stateDiagram-v2` document where
//! nodes are state names and edge labels are message type names.

use crate::core::TypeIdentity;
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::DiagramError;

/// One line of the diagram.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    /// A state with no bound messages.
    State { name: String },

    /// A message bound in `from` whose handler selects `to`.
    Transition {
        from: String,
        to: String,
        message: String,
    },
}

/// Declarative description of a machine's states and transitions.
///
/// # Example
///
/// ```rust
/// use switchboard::diagram::Diagram;
///
/// struct Coin;
/// struct Push;
///
/// let diagram = Diagram::new("Turnstile")
///     .transition::<Coin>("Locked", "Unlocked")
///     .self_loop::<Push>("Locked");
///
/// let text = diagram.render();
/// assert!(text.starts_with("---\ntitle: Turnstile\n---\nstateDiagram-v2\n"));
/// assert!(text.contains("Locked --> Unlocked: Coin\n"));
/// assert!(text.contains("Locked --> Locked: Push\n"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagram {
    title: String,
    entries: Vec<Entry>,
}

impl Diagram {
    /// Create an empty diagram.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    /// Add a state that binds no messages.
    pub fn state(mut self, name: impl Into<String>) -> Self {
        self.entries.push(Entry::State { name: name.into() });
        self
    }

    /// Add an edge labelled with the name of message type `T`, without
    /// module paths.
    pub fn transition<T: ?Sized + 'static>(
        self,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.edge(from, to, TypeIdentity::of::<T>().short_name())
    }

    /// Add an edge for a handler of `T` that keeps the current state.
    pub fn self_loop<T: ?Sized + 'static>(self, state: impl Into<String>) -> Self {
        let state = state.into();
        self.transition::<T>(state.clone(), state)
    }

    /// Add an edge with an explicit label.
    pub fn edge(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.entries.push(Entry::Transition {
            from: from.into(),
            to: to.into(),
            message: message.into(),
        });
        self
    }

    /// Title shown above the diagram.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Render as Mermaid text.
    pub fn render(&self) -> String {
        let mut out = format!("---\ntitle: {}\n---\nstateDiagram-v2\n", self.title);
        for entry in &self.entries {
            match entry {
                Entry::State { name } => out.push_str(name),
                Entry::Transition { from, to, message } => {
                    out.push_str(from);
                    out.push_str(" --> ");
                    out.push_str(to);
                    out.push_str(": ");
                    out.push_str(&escape(message));
                }
            }
            out.push('\n');
        }
        out
    }

    /// Render wrapped in a fenced `mermaid` code block.
    pub fn render_markdown(&self) -> String {
        format!("```mermaid\n{}```\n", self.render())
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, DiagramError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DiagramError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, DiagramError> {
        serde_json::from_str(json).map_err(|e| DiagramError::DeserializationFailed(e.to_string()))
    }
}

/// Replace characters Mermaid reserves in labels with entity codes.
pub fn escape(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            ':' => escaped.push_str("#colon;"),
            '<' => escaped.push_str("#lt;"),
            '>' => escaped.push_str("#gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_replaces_reserved_characters() {
        assert_eq!(escape("Coin"), "Coin");
        assert_eq!(escape("a::B"), "a#colon;#colon;B");
        assert_eq!(escape("Box<String>"), "Box#lt;String#gt;");
    }

    #[test]
    fn render_lists_entries_in_order() {
        let diagram = Diagram::new("Turnstile")
            .edge("Locked", "Unlocked", "Coin")
            .edge("Locked", "Locked", "Push")
            .edge("Unlocked", "Locked", "Push")
            .state("Broken");

        assert_eq!(
            diagram.render(),
            "---\n\
             title: Turnstile\n\
             ---\n\
             stateDiagram-v2\n\
             Locked --> Unlocked: Coin\n\
             Locked --> Locked: Push\n\
             Unlocked --> Locked: Push\n\
             Broken\n"
        );
    }

    struct Coin;

    #[test]
    fn transition_labels_with_bare_type_name() {
        let diagram = Diagram::new("Turnstile").transition::<Coin>("Locked", "Unlocked");

        assert_eq!(diagram.render().lines().last(), Some("Locked --> Unlocked: Coin"));
    }

    #[test]
    fn transition_keeps_generic_arguments() {
        let diagram = Diagram::new("Inbox")
            .transition::<Vec<u8>>("Idle", "Busy")
            .transition::<Box<String>>("Busy", "Idle");

        assert_eq!(
            diagram.entries()[1],
            Entry::Transition {
                from: "Busy".into(),
                to: "Idle".into(),
                message: "Box<String>".into(),
            }
        );
        let rendered = diagram.render();
        assert!(rendered.contains("Idle --> Busy: Vec#lt;u8#gt;\n"));
        assert!(rendered.contains("Busy --> Idle: Box#lt;String#gt;\n"));
    }

    #[test]
    fn self_loop_targets_source_state() {
        let diagram = Diagram::new("Counter").self_loop::<u32>("Counting");

        assert_eq!(
            diagram.entries(),
            &[Entry::Transition {
                from: "Counting".into(),
                to: "Counting".into(),
                message: "u32".into(),
            }]
        );
    }

    #[test]
    fn render_markdown_wraps_in_fence() {
        let markdown = Diagram::new("Empty").render_markdown();

        assert_eq!(
            markdown,
            "```mermaid\n---\ntitle: Empty\n---\nstateDiagram-v2\n```\n"
        );
    }

    #[test]
    fn diagram_serializes_correctly() {
        let diagram = Diagram::new("Turnstile")
            .edge("Locked", "Unlocked", "Coin")
            .state("Broken");

        let json = diagram.to_json().unwrap();
        let restored = Diagram::from_json(&json).unwrap();

        assert_eq!(restored, diagram);
        assert_eq!(restored.title(), "Turnstile");
    }

    #[test]
    fn from_json_reports_invalid_input() {
        let result = Diagram::from_json("{\"title\": 3}");

        assert!(matches!(result, Err(DiagramError::DeserializationFailed(_))));
    }
}
