//! Autocomplete controller: the interaction state machine behind one input.
//!
//! The controller owns the dropdown lifecycle (`closed` / `open`), the
//! bounded focus index, debounced render scheduling, and the accessibility
//! attributes, and pushes every state change through the host's
//! [`SearchSurface`] as a complete [`WidgetView`]. What is *focused* lives
//! apart from what is *rendered*: focus moves rebuild the view from state,
//! renders rebuild the state wholesale.
//!
//! Concurrency model: keyboard and pointer events mutate state under a lock
//! on the caller's thread; query renders run as a single debounced task
//! where cancel-and-replace guarantees a superseded render never reaches
//! the surface.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::debounce::Debouncer;
use crate::highlight::highlight;
use crate::interface::{
    AutocompleteConfig, Key, KeyOutcome, ListView, OptionView, SearchHit, SearchSurface,
    WidgetView, NO_RESULTS_STATUS,
};
use crate::navigation;
use crate::search::find_matches;
use crate::store::IndexStore;

/// Fallback runtime for hosts that drive the widget from plain threads.
/// Shared across all controllers and never dropped.
static FALLBACK_RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to create fallback tokio runtime")
});

fn runtime_handle() -> tokio::runtime::Handle {
    tokio::runtime::Handle::try_current().unwrap_or_else(|_| FALLBACK_RUNTIME.handle().clone())
}

/// Direction of an arrow-key focus move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusStep {
    Down,
    Up,
}

/// The per-input session state. Pure: no environment access, fully
/// unit-testable.
#[derive(Debug, Default)]
struct ListState {
    open: bool,
    hits: Vec<SearchHit>,
    focus: Option<usize>,
    /// The query that produced `hits`; carried into the destination.
    query: String,
}

impl ListState {
    /// Replace the list wholesale. Focus always resets: the new list has no
    /// relation to the old indices.
    fn open_with(&mut self, hits: Vec<SearchHit>, query: String) {
        self.open = true;
        self.hits = hits;
        self.focus = None;
        self.query = query;
    }

    fn close(&mut self) {
        *self = ListState::default();
    }

    /// Move the focus one step with wraparound. An empty (or absent) list
    /// clamps the focus back to none.
    fn move_focus(&mut self, step: FocusStep) {
        let len = self.hits.len();
        if !self.open || len == 0 {
            self.focus = None;
            return;
        }
        self.focus = Some(match (step, self.focus) {
            (FocusStep::Down, None) => 0,
            (FocusStep::Down, Some(i)) => (i + 1) % len,
            (FocusStep::Up, None) => len - 1,
            (FocusStep::Up, Some(i)) => (i + len - 1) % len,
        });
    }

    /// What Enter activates: the focused option, else the first option of a
    /// non-empty list.
    fn activation_target(&self) -> Option<&SearchHit> {
        if !self.open {
            return None;
        }
        self.focus
            .and_then(|i| self.hits.get(i))
            .or_else(|| self.hits.first())
    }

    /// Project the state into the declarative view the surface renders.
    fn view(&self, config: &AutocompleteConfig) -> WidgetView {
        if !self.open {
            return WidgetView::closed();
        }
        let list_id = config.list_id();
        let entries: Vec<OptionView> = self
            .hits
            .iter()
            .enumerate()
            .map(|(i, hit)| OptionView {
                id: config.option_id(i),
                markup: hit.title_markup.clone(),
                selected: self.focus == Some(i),
            })
            .collect();
        let status = entries
            .is_empty()
            .then(|| NO_RESULTS_STATUS.to_string());
        WidgetView {
            expanded: true,
            controls: Some(list_id.clone()),
            active_descendant: self.focus.map(|i| config.option_id(i)),
            list: Some(ListView {
                id: list_id,
                entries,
                status,
            }),
        }
    }
}

/// The autocomplete widget bound to one input element.
pub struct Autocomplete<S: SearchSurface> {
    inner: Arc<Inner<S>>,
}

struct Inner<S> {
    config: AutocompleteConfig,
    store: Arc<IndexStore>,
    surface: Mutex<S>,
    list: Mutex<ListState>,
    debounce: Debouncer,
}

impl<S: SearchSurface + 'static> Autocomplete<S> {
    pub fn new(store: Arc<IndexStore>, surface: S) -> Self {
        Self::with_config(AutocompleteConfig::default(), store, surface)
    }

    pub fn with_config(config: AutocompleteConfig, store: Arc<IndexStore>, surface: S) -> Self {
        let debounce = Debouncer::new(config.debounce);
        Self {
            inner: Arc::new(Inner {
                config,
                store,
                surface: Mutex::new(surface),
                list: Mutex::new(ListState::default()),
                debounce,
            }),
        }
    }

    /// Push the initial closed view so the shell can set up the combobox
    /// role attributes before the first keystroke.
    pub fn attach(&self) {
        self.inner.apply_view();
    }

    /// The input's value changed. Schedules a debounced render: only the
    /// most recent pending value survives the quiet window.
    pub fn input_changed(&self, value: &str) {
        let inner = Arc::clone(&self.inner);
        let value = value.to_string();
        self.inner
            .debounce
            .schedule(&runtime_handle(), async move {
                inner.render_query(&value).await;
            });
    }

    /// Focus or click landed on the input: start loading the index so the
    /// first real query renders from cache. No render happens here.
    pub fn pointer_focus(&self) {
        self.inner.preload();
    }

    /// A keyboard event on the input. `Consumed` means the shell must
    /// suppress the default behavior.
    pub fn handle_key(&self, key: Key) -> KeyOutcome {
        match key {
            Key::ArrowDown => self.inner.move_focus(FocusStep::Down),
            Key::ArrowUp => self.inner.move_focus(FocusStep::Up),
            Key::Enter => {
                self.inner.activate_current();
                KeyOutcome::Consumed
            }
            Key::Escape => self.inner.close(),
        }
    }

    /// An option was activated by pointer.
    pub fn option_clicked(&self, index: usize) {
        let pending = {
            let list = self.inner.list.lock();
            list.hits.get(index).cloned().map(|hit| (hit, list.query.clone()))
        };
        if let Some((hit, query)) = pending {
            self.inner.activate(&hit, &query);
        }
    }

    /// A pointer event landed outside the input and its list.
    pub fn outside_click(&self) {
        self.inner.close();
    }

    /// Page load: returns the pre-fill value from the page address's query
    /// parameter (the shell writes it into the input without triggering a
    /// search) and starts the index load proactively.
    pub fn on_page_ready(&self, location: &str) -> Option<String> {
        self.inner.preload();
        navigation::query_from_location(location, &self.inner.config.query_param)
    }

    /// Await any pending debounced render. Teardown/test aid.
    pub async fn settle(&self) {
        self.inner.debounce.settle().await;
    }
}

impl<S: SearchSurface + 'static> Inner<S> {
    async fn render_query(&self, value: &str) {
        if value.is_empty() {
            self.close();
            return;
        }
        let docs = self.store.ensure_loaded().await;
        let hits: Vec<SearchHit> = find_matches(value, &docs, self.config.max_results)
            .into_iter()
            .map(|doc| SearchHit {
                title: doc.title.clone(),
                title_markup: highlight(&doc.title, value),
                url: doc.url.clone(),
            })
            .collect();
        {
            let mut list = self.list.lock();
            list.open_with(hits, value.to_string());
        }
        self.apply_view();
    }

    fn preload(&self) {
        let store = Arc::clone(&self.store);
        runtime_handle().spawn(async move {
            store.ensure_loaded().await;
        });
    }

    fn move_focus(&self, step: FocusStep) -> KeyOutcome {
        let open = {
            let mut list = self.list.lock();
            list.move_focus(step);
            list.open
        };
        if open {
            self.apply_view();
        }
        // Consumed even when closed: hosts suppress caret movement for
        // arrows unconditionally.
        KeyOutcome::Consumed
    }

    fn activate_current(&self) {
        let pending = {
            let list = self.list.lock();
            list.activation_target()
                .cloned()
                .map(|hit| (hit, list.query.clone()))
        };
        if let Some((hit, query)) = pending {
            self.activate(&hit, &query);
        }
    }

    fn activate(&self, hit: &SearchHit, query: &str) {
        let destination = navigation::destination(&hit.url, query, &self.config.query_param);
        {
            self.list.lock().close();
        }
        let view = self.current_view();
        let mut surface = self.surface.lock();
        surface.apply(&view);
        surface.navigate(&destination);
    }

    fn close(&self) -> KeyOutcome {
        let was_open = {
            let mut list = self.list.lock();
            let was_open = list.open;
            list.close();
            was_open
        };
        if was_open {
            self.apply_view();
            KeyOutcome::Consumed
        } else {
            KeyOutcome::Ignored
        }
    }

    fn current_view(&self) -> WidgetView {
        self.list.lock().view(&self.config)
    }

    fn apply_view(&self) {
        let view = self.current_view();
        self.surface.lock().apply(&view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(url: &str) -> SearchHit {
        SearchHit {
            title: url.to_string(),
            title_markup: url.to_string(),
            url: url.to_string(),
        }
    }

    fn open_state(count: usize) -> ListState {
        let mut state = ListState::default();
        let hits = (0..count).map(|i| hit(&format!("/{i}"))).collect();
        state.open_with(hits, "query".to_string());
        state
    }

    #[test]
    fn test_focus_wraps_down() {
        let mut state = open_state(3);
        let mut visited = Vec::new();
        for _ in 0..4 {
            state.move_focus(FocusStep::Down);
            visited.push(state.focus.unwrap());
        }
        assert_eq!(visited, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_focus_up_from_none_lands_on_last() {
        let mut state = open_state(3);
        state.move_focus(FocusStep::Up);
        assert_eq!(state.focus, Some(2));
        state.move_focus(FocusStep::Up);
        assert_eq!(state.focus, Some(1));
    }

    #[test]
    fn test_focus_clamps_to_none_on_empty_list() {
        let mut state = open_state(0);
        state.move_focus(FocusStep::Down);
        assert_eq!(state.focus, None);
        state.move_focus(FocusStep::Up);
        assert_eq!(state.focus, None);
    }

    #[test]
    fn test_replacing_list_resets_focus() {
        let mut state = open_state(3);
        state.move_focus(FocusStep::Down);
        assert_eq!(state.focus, Some(0));
        state.open_with(vec![hit("/new")], "query".to_string());
        assert_eq!(state.focus, None);
    }

    #[test]
    fn test_activation_target_prefers_focus_then_first() {
        let mut state = open_state(3);
        assert_eq!(state.activation_target().unwrap().url, "/0");
        state.move_focus(FocusStep::Down);
        state.move_focus(FocusStep::Down);
        assert_eq!(state.activation_target().unwrap().url, "/1");
    }

    #[test]
    fn test_activation_target_none_when_empty_or_closed() {
        let state = open_state(0);
        assert!(state.activation_target().is_none());
        let mut closed = open_state(3);
        closed.close();
        assert!(closed.activation_target().is_none());
    }

    #[test]
    fn test_view_carries_aria_state() {
        let config = AutocompleteConfig::default();
        let mut state = open_state(2);
        state.move_focus(FocusStep::Down);
        let view = state.view(&config);
        assert!(view.expanded);
        assert_eq!(view.controls.as_deref(), Some("search-autocomplete-list"));
        assert_eq!(view.active_descendant.as_deref(), Some("search-option-0"));
        let list = view.list.unwrap();
        assert_eq!(list.entries.len(), 2);
        assert!(list.entries[0].selected);
        assert!(!list.entries[1].selected);
        assert!(list.status.is_none());
    }

    #[test]
    fn test_view_announces_empty_results() {
        let config = AutocompleteConfig::default();
        let state = open_state(0);
        let view = state.view(&config);
        assert!(view.expanded);
        let list = view.list.unwrap();
        assert!(list.entries.is_empty());
        assert_eq!(list.status.as_deref(), Some(NO_RESULTS_STATUS));
    }

    #[test]
    fn test_closed_view_is_reset() {
        let mut state = open_state(2);
        state.close();
        assert_eq!(state.view(&AutocompleteConfig::default()), WidgetView::closed());
    }
}
