//! In-memory element tree.
//!
//! Backs the terminal monitor and the dashboard tests. Clones share the
//! same tree, so a test can keep one copy to inspect what the dashboard
//! wrote through its handles.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::view::{CheckboxHandle, DisplayMode, ElementLookup, PanelHandle, TextHandle, ids};

#[derive(Debug, Clone, Default)]
struct ElementState {
    display: DisplayMode,
    text: String,
    checked: bool,
}

type Tree = Arc<Mutex<BTreeMap<String, ElementState>>>;

fn lock(tree: &Tree) -> MutexGuard<'_, BTreeMap<String, ElementState>> {
    tree.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared in-memory document.
#[derive(Debug, Clone, Default)]
pub struct MemoryDom {
    tree: Tree,
}

impl MemoryDom {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document holding every element the dashboard binds to.
    #[must_use]
    pub fn dashboard() -> Self {
        let dom = Self::new();
        for id in [
            ids::ADVANCED_FORM,
            ids::ADVANCED_MODE_CHECKBOX,
            ids::CONTENT_PANEL,
            ids::STATUS_TEXT,
            ids::ALTITUDE,
            ids::AZIMUTH,
            ids::TARGET,
        ] {
            dom.insert(id);
        }
        dom
    }

    /// Adds an element with default state. Existing elements are kept.
    pub fn insert(&self, id: &str) {
        lock(&self.tree).entry(id.to_string()).or_default();
    }

    /// Removes an element.
    pub fn remove(&self, id: &str) {
        lock(&self.tree).remove(id);
    }

    /// Sets the checked state of an element, as a user click would.
    pub fn set_checked(&self, id: &str, checked: bool) {
        if let Some(element) = lock(&self.tree).get_mut(id) {
            element.checked = checked;
        }
    }

    /// Display mode of an element, if present.
    #[must_use]
    pub fn display_of(&self, id: &str) -> Option<DisplayMode> {
        lock(&self.tree).get(id).map(|e| e.display)
    }

    /// Text content of an element, if present.
    #[must_use]
    pub fn text_of(&self, id: &str) -> Option<String> {
        lock(&self.tree).get(id).map(|e| e.text.clone())
    }

    fn handle(&self, id: &str) -> Option<MemoryElement> {
        lock(&self.tree).contains_key(id).then(|| MemoryElement {
            tree: Arc::clone(&self.tree),
            id: id.to_string(),
        })
    }
}

/// Handle to one element of a [`MemoryDom`].
#[derive(Debug, Clone)]
pub struct MemoryElement {
    tree: Tree,
    id: String,
}

impl MemoryElement {
    fn update(&self, f: impl FnOnce(&mut ElementState)) {
        if let Some(element) = lock(&self.tree).get_mut(&self.id) {
            f(element);
        }
    }

    fn read<T>(&self, f: impl FnOnce(&ElementState) -> T) -> Option<T> {
        lock(&self.tree).get(&self.id).map(f)
    }
}

impl PanelHandle for MemoryElement {
    fn set_display(&self, mode: DisplayMode) {
        self.update(|e| e.display = mode);
    }

    fn display(&self) -> DisplayMode {
        self.read(|e| e.display).unwrap_or(DisplayMode::None)
    }
}

impl TextHandle for MemoryElement {
    fn set_text(&self, text: &str) {
        self.update(|e| e.text = text.to_string());
    }
}

impl CheckboxHandle for MemoryElement {
    fn is_checked(&self) -> bool {
        self.read(|e| e.checked).unwrap_or(false)
    }
}

impl ElementLookup for MemoryDom {
    type Panel = MemoryElement;
    type Text = MemoryElement;
    type Checkbox = MemoryElement;

    fn panel(&self, id: &str) -> Option<MemoryElement> {
        self.handle(id)
    }

    fn text(&self, id: &str) -> Option<MemoryElement> {
        self.handle(id)
    }

    fn checkbox(&self, id: &str) -> Option<MemoryElement> {
        self.handle(id)
    }
}
