//! Player preferences: hi-score, mute and theme
//!
//! Each value lives under its own key in a [`PreferenceStore`]. Missing or
//! malformed values fall back to defaults without surfacing an error.

use crate::consts::{HI_SCORE_KEY, LIGHT_THEME_KEY, MUTED_KEY};
use crate::persistence::PreferenceStore;

/// Read the persisted hi-score, defaulting to 0
pub fn load_hi_score<S: PreferenceStore + ?Sized>(store: &S) -> u32 {
    match store.get_string(HI_SCORE_KEY) {
        None => 0,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring malformed hi-score {raw:?}");
            0
        }),
    }
}

/// Persist a hi-score as a decimal string
pub fn save_hi_score<S: PreferenceStore + ?Sized>(store: &S, hi_score: u32) {
    store.set_string(HI_SCORE_KEY, &hi_score.to_string());
}

/// Boolean preferences persisted as `"true"` / `"false"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolPreference {
    Muted,
    LightTheme,
}

impl BoolPreference {
    pub fn key(&self) -> &'static str {
        match self {
            BoolPreference::Muted => MUTED_KEY,
            BoolPreference::LightTheme => LIGHT_THEME_KEY,
        }
    }

    /// CSS class applied while the preference is on
    pub fn active_class(&self) -> &'static str {
        match self {
            BoolPreference::Muted => "muted",
            BoolPreference::LightTheme => "light-mode",
        }
    }

    /// Read from the store; absent or unparsable values read as `false`
    pub fn load<S: PreferenceStore + ?Sized>(&self, store: &S) -> bool {
        match store.get_string(self.key()).as_deref() {
            None | Some("false") => false,
            Some("true") => true,
            Some(other) => {
                log::warn!("Ignoring malformed {} value {other:?}", self.key());
                false
            }
        }
    }

    pub fn save<S: PreferenceStore + ?Sized>(&self, store: &S, value: bool) {
        store.set_string(self.key(), if value { "true" } else { "false" });
    }
}

/// Snapshot of every persisted preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub muted: bool,
    pub light_theme: bool,
    pub hi_score: u32,
}

impl Preferences {
    /// Load all preferences, applying defaults for anything missing
    pub fn load<S: PreferenceStore + ?Sized>(store: &S) -> Self {
        Self {
            muted: BoolPreference::Muted.load(store),
            light_theme: BoolPreference::LightTheme.load(store),
            hi_score: load_hi_score(store),
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::from_light(self.light_theme)
    }
}

/// Colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn from_light(light: bool) -> Self {
        if light { Theme::Light } else { Theme::Dark }
    }

    /// Class for `<body>`
    pub fn body_class(&self) -> &'static str {
        match self {
            Theme::Dark => "",
            Theme::Light => "light-mode",
        }
    }

    /// Icon on the toggle button: the mode a click switches to
    pub fn toggle_icon(&self) -> &'static str {
        match self {
            Theme::Dark => "☀️",
            Theme::Light => "🌙",
        }
    }
}

type Listener = Box<dyn FnMut(bool)>;

/// A persisted on/off switch (mute button, theme button)
///
/// Reads its value once on construction and writes on every change.
/// Listeners run synchronously inside the call that changed the value.
pub struct Toggle<S: PreferenceStore> {
    store: S,
    preference: BoolPreference,
    value: bool,
    listeners: Vec<Listener>,
}

impl<S: PreferenceStore> Toggle<S> {
    pub fn new(store: S, preference: BoolPreference) -> Self {
        let value = preference.load(&store);
        log::debug!("{} restored as {value}", preference.key());
        Self {
            store,
            preference,
            value,
            listeners: Vec::new(),
        }
    }

    pub fn mute(store: S) -> Self {
        Self::new(store, BoolPreference::Muted)
    }

    pub fn theme(store: S) -> Self {
        Self::new(store, BoolPreference::LightTheme)
    }

    pub fn value(&self) -> bool {
        self.value
    }

    /// Current theme (always dark for a non-theme toggle)
    pub fn current_theme(&self) -> Theme {
        Theme::from_light(self.preference == BoolPreference::LightTheme && self.value)
    }

    /// Class to apply to the bound element (`""` while off)
    pub fn css_class(&self) -> &'static str {
        if self.value {
            self.preference.active_class()
        } else {
            ""
        }
    }

    /// Flip the value, persist it and notify listeners. Returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.apply(!self.value);
        self.value
    }

    /// Force a value. No write or notification if unchanged.
    pub fn set(&mut self, value: bool) {
        if value != self.value {
            self.apply(value);
        }
    }

    /// Register a listener called with the new value after each change
    pub fn subscribe(&mut self, listener: impl FnMut(bool) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn apply(&mut self, value: bool) {
        self.value = value;
        self.preference.save(&self.store, value);
        log::info!("{} set to {value}", self.preference.key());
        for listener in &mut self.listeners {
            listener(value);
        }
    }
}
