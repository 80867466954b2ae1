//! Global keyboard shortcuts controlling the tracker.
//!
//! The OS hook lives on its own thread and talks to the engine only through a
//! [TrackerHandle], so it neither waits for the poll loop nor holds it up.

pub mod keys;
#[cfg(feature = "shortcuts")]
mod rdev_hook;

use std::{
    collections::BTreeMap,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use keys::{Key, KeyCombination};

use super::control::TrackerHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Stop,
    TogglePause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Press(Key),
    Release(Key),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutBindings {
    pub stop: Vec<KeyCombination>,
    pub toggle_pause: Vec<KeyCombination>,
}

impl Default for ShortcutBindings {
    fn default() -> Self {
        let parse = |v: &str| v.parse::<KeyCombination>().into_iter();
        Self {
            stop: parse("ctrl+shift+q").collect(),
            toggle_pause: parse("ctrl+p").chain(parse("ctrl+r")).collect(),
        }
    }
}

/// A key reported as held for this long without a repeat is assumed released. Hooks miss
/// releases when, for example, the screen locks while a combination is down.
pub const STALE_KEY_AFTER: Duration = Duration::from_secs(10);

/// Tracks held keys and reports an action once its combination becomes exactly the held set.
/// Auto-repeated presses of a held key don't fire again.
pub struct ShortcutMatcher {
    bindings: Vec<(KeyCombination, ShortcutAction)>,
    /// Held keys with the time of their last press or repeat.
    pressed: BTreeMap<Key, Instant>,
}

impl ShortcutMatcher {
    pub fn new(bindings: &ShortcutBindings) -> Self {
        let stop = bindings
            .stop
            .iter()
            .map(|v| (v.clone(), ShortcutAction::Stop));
        let toggle = bindings
            .toggle_pause
            .iter()
            .map(|v| (v.clone(), ShortcutAction::TogglePause));
        Self {
            bindings: stop.chain(toggle).collect(),
            pressed: BTreeMap::new(),
        }
    }

    pub fn process(&mut self, event: KeyEvent) -> Option<ShortcutAction> {
        self.process_at(event, Instant::now())
    }

    pub fn process_at(&mut self, event: KeyEvent, now: Instant) -> Option<ShortcutAction> {
        match event {
            KeyEvent::Press(key) => {
                self.pressed
                    .retain(|_, since| now.saturating_duration_since(*since) < STALE_KEY_AFTER);
                if self.pressed.insert(key, now).is_some() {
                    return None;
                }
                self.bindings
                    .iter()
                    .find(|(combination, _)| combination.keys().iter().eq(self.pressed.keys()))
                    .map(|(_, action)| *action)
            }
            KeyEvent::Release(key) if key.is_modifier() => {
                self.pressed.remove(&key);
                None
            }
            KeyEvent::Release(_) => {
                // Only one non-modifier takes part in a combination, so any other still listed
                // lost its release.
                self.pressed.retain(|k, _| k.is_modifier());
                None
            }
        }
    }
}

/// Translates key events into tracker transitions.
pub struct ShortcutListener {
    handle: TrackerHandle,
    matcher: ShortcutMatcher,
}

impl ShortcutListener {
    pub fn new(handle: TrackerHandle, bindings: &ShortcutBindings) -> Self {
        Self {
            handle,
            matcher: ShortcutMatcher::new(bindings),
        }
    }

    pub fn on_key(&mut self, event: KeyEvent) {
        let Some(action) = self.matcher.process(event) else {
            return;
        };
        debug!("Shortcut {action:?} triggered");
        match action {
            ShortcutAction::Stop => self.handle.stop(),
            ShortcutAction::TogglePause => {
                let status = self.handle.toggle_pause();
                info!("Tracker is {status} after shortcut");
            }
        }
    }

    /// Starts listening on a dedicated thread. If the hook can't be installed tracking goes on
    /// without shortcuts.
    pub fn spawn(self) {
        cfg_if::cfg_if! {
            if #[cfg(feature = "shortcuts")] {
                rdev_hook::spawn(self);
            } else {
                tracing::warn!("Built without the `shortcuts` feature, global shortcuts are disabled");
                drop(self);
            }
        }
    }
}
