//! Ferret host interface definition.
//!
//! This file defines the contract between the search core and the embedding
//! shell. It acts as the source of truth for shared types: the shell
//! forwards raw input events and applies the declarative view the
//! controller pushes back; it never owns widget state of its own.

use std::time::Duration;

use serde::Serialize;

// ═══════════════════════════════════════════════════════════════════════════════
// ROLES
// ═══════════════════════════════════════════════════════════════════════════════

/// Accessibility role strings the shell applies to its elements.
pub mod roles {
    /// The text input.
    pub const COMBOBOX: &str = "combobox";
    /// The dropdown list container.
    pub const LISTBOX: &str = "listbox";
    /// Each result entry.
    pub const OPTION: &str = "option";
    /// The "No results" announcement.
    pub const STATUS: &str = "status";
}

/// Text announced when a query yields nothing.
pub const NO_RESULTS_STATUS: &str = "No results";

// ═══════════════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Keyboard events the widget cares about. The shell maps its native key
/// representation into this and forwards everything else unfiltered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// Whether the controller used a key. `Consumed` means the shell must
/// suppress the default behavior (caret movement, form submission).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Consumed,
    Ignored,
}

// ═══════════════════════════════════════════════════════════════════════════════
// VIEW MODEL
// ═══════════════════════════════════════════════════════════════════════════════

/// One ranked result as the controller hands it to the view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub title: String,
    /// Escaped title markup with the first query occurrence marked.
    pub title_markup: String,
    pub url: String,
}

/// A rendered option row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionView {
    /// Element id, `"{input}-option-{i}"`, referenced by
    /// `aria-activedescendant`.
    pub id: String,
    pub markup: String,
    /// Mirrors `aria-selected`.
    pub selected: bool,
}

/// The dropdown list. `entries` empty means the status line is shown
/// instead of options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListView {
    /// Element id, `"{input}-autocomplete-list"`.
    pub id: String,
    pub entries: Vec<OptionView>,
    /// Announcement for the empty-results state (role `status`, polite).
    pub status: Option<String>,
}

/// The complete widget state, pushed wholesale on every change. The shell
/// replaces what it previously rendered; it never patches increments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetView {
    /// `aria-expanded` on the input.
    pub expanded: bool,
    /// `aria-controls`: the list id while open.
    pub controls: Option<String>,
    /// `aria-activedescendant`: the focused option id, if any.
    pub active_descendant: Option<String>,
    /// The dropdown, absent while closed.
    pub list: Option<ListView>,
}

impl WidgetView {
    pub(crate) fn closed() -> Self {
        Self {
            expanded: false,
            controls: None,
            active_descendant: None,
            list: None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SERVICE INTERFACE
// ═══════════════════════════════════════════════════════════════════════════════

/// The environment-facing half of the widget, implemented by the shell.
pub trait SearchSurface: Send {
    /// Render the given widget state, replacing the previous one.
    fn apply(&mut self, view: &WidgetView);

    /// Commit a selection: leave the page for `destination`.
    fn navigate(&mut self, destination: &str);
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Per-widget knobs. The defaults match the shipped widget; hosts override
/// field-by-field.
#[derive(Debug, Clone)]
pub struct AutocompleteConfig {
    /// Id of the bound input element; list and option ids derive from it.
    pub input_id: String,
    /// Quiet window between the last keystroke and the render.
    pub debounce: Duration,
    /// Maximum options in the dropdown.
    pub max_results: usize,
    /// Name of the query parameter carried to the destination.
    pub query_param: String,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            input_id: "search".to_string(),
            debounce: Duration::from_millis(200),
            max_results: crate::search::DEFAULT_LIMIT,
            query_param: "q".to_string(),
        }
    }
}

impl AutocompleteConfig {
    pub(crate) fn list_id(&self) -> String {
        format!("{}-autocomplete-list", self.input_id)
    }

    pub(crate) fn option_id(&self, index: usize) -> String {
        format!("{}-option-{}", self.input_id, index)
    }
}
