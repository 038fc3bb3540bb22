use crate::types::{Anchor, SelectionState};
use serde::Deserialize;
use std::cell::Cell;
use std::fmt;

/// Selections must be strictly longer than this (trimmed, in chars).
pub const MIN_SELECTION_CHARS: usize = 10;
/// ...and strictly shorter than this.
pub const MAX_SELECTION_CHARS: usize = 2000;

const BUTTON_HALF_WIDTH: f64 = 60.0;
const BUTTON_LIFT: f64 = 40.0;

/// What the page reports on pointer release: the selection text plus the
/// bounding rect of its first range and the current scroll offsets.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawSelection {
    pub text: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

pub fn qualifies(text: &str) -> bool {
    let len = text.trim().chars().count();
    len > MIN_SELECTION_CHARS && len < MAX_SELECTION_CHARS
}

/// Centered horizontally over the selection, lifted above it.
pub fn anchor_for(raw: &RawSelection) -> Anchor {
    Anchor {
        x: raw.left + raw.scroll_x + raw.width / 2.0 - BUTTON_HALF_WIDTH,
        y: raw.top + raw.scroll_y - BUTTON_LIFT,
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionWatcher {
    current: Option<SelectionState>,
}

impl SelectionWatcher {
    /// Publish a qualifying selection. Anything else leaves the previous
    /// state alone so a button that is already showing stays clickable.
    pub fn observe(&mut self, raw: &RawSelection) -> bool {
        if !qualifies(&raw.text) {
            return false;
        }
        self.current = Some(SelectionState {
            text: raw.text.trim().to_string(),
            anchor: anchor_for(raw),
        });
        true
    }

    pub fn current(&self) -> Option<&SelectionState> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Hand the selected text to a consumer (the chat overlay) and forget it.
    pub fn take(&mut self) -> Option<String> {
        self.current.take().map(|state| state.text)
    }
}

/// A registered set of document listeners. The teardown closure runs exactly
/// once: on the first explicit `teardown` call or on drop.
pub struct Subscription {
    teardown: Cell<Option<Box<dyn FnOnce()>>>,
}

impl Subscription {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Cell::new(Some(Box::new(teardown))),
        }
    }

    pub fn is_active(&self) -> bool {
        let remove = self.teardown.take();
        let active = remove.is_some();
        self.teardown.set(remove);
        active
    }

    pub fn teardown(&self) {
        if let Some(remove) = self.teardown.take() {
            remove();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn raw(text: &str) -> RawSelection {
        RawSelection {
            text: text.to_string(),
            left: 100.0,
            top: 300.0,
            width: 200.0,
            scroll_x: 0.0,
            scroll_y: 50.0,
        }
    }

    #[test]
    fn length_bounds_are_exclusive() {
        assert!(!qualifies(&"a".repeat(10)));
        assert!(qualifies(&"a".repeat(11)));
        assert!(qualifies(&"a".repeat(1999)));
        assert!(!qualifies(&"a".repeat(2000)));
        assert!(!qualifies(""));
        assert!(!qualifies("   short    "));
    }

    #[test]
    fn measures_trimmed_chars_not_bytes() {
        // 11 Urdu letters, well over 11 bytes
        let text = format!("  {}  ", "ب".repeat(11));
        assert!(qualifies(&text));
        assert!(!qualifies(&"ب".repeat(10)));
    }

    #[test]
    fn anchor_is_centered_and_lifted() {
        let anchor = anchor_for(&raw("robots move efficiently"));
        assert_eq!(anchor, Anchor { x: 140.0, y: 310.0 });
    }

    #[test]
    fn invalid_selection_keeps_previous_state() {
        let mut watcher = SelectionWatcher::default();
        assert!(watcher.observe(&raw("robots move efficiently")));
        assert!(!watcher.observe(&raw("")));
        assert!(!watcher.observe(&raw("tiny")));
        assert_eq!(
            watcher.current().map(|s| s.text.as_str()),
            Some("robots move efficiently")
        );
    }

    #[test]
    fn newer_selection_replaces_older() {
        let mut watcher = SelectionWatcher::default();
        watcher.observe(&raw("robots move efficiently"));
        watcher.observe(&raw("  actuators convert energy  "));
        assert_eq!(
            watcher.current().map(|s| s.text.as_str()),
            Some("actuators convert energy")
        );
    }

    #[test]
    fn take_consumes_state() {
        let mut watcher = SelectionWatcher::default();
        watcher.observe(&raw("robots move efficiently"));
        assert_eq!(watcher.take().as_deref(), Some("robots move efficiently"));
        assert!(watcher.current().is_none());
        assert!(watcher.take().is_none());
    }

    #[test]
    fn subscription_tears_down_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let subscription = Subscription::new(move || counter.set(counter.get() + 1));

        assert!(subscription.is_active());
        subscription.teardown();
        subscription.teardown();
        assert!(!subscription.is_active());
        drop(subscription);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn subscription_tears_down_on_drop() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        drop(Subscription::new(move || counter.set(counter.get() + 1)));
        assert_eq!(calls.get(), 1);
    }
}
