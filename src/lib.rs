//! Guess the Airline - IATA code trivia
//!
//! Core modules:
//! - `catalog`: Airline records and catalog validation
//! - `quiz`: Question sampling and the round state machine
//! - `preferences`: Hi-score, mute and theme preferences
//! - `persistence`: Key-value preference storage (LocalStorage on web)

pub mod catalog;
pub mod error;
pub mod persistence;
pub mod preferences;
pub mod quiz;

pub use catalog::{Airline, Catalog};
pub use error::{QuizError, QuizResult};
pub use persistence::{MemoryStore, PreferenceStore};
pub use preferences::{BoolPreference, Preferences, Theme, Toggle};
pub use quiz::{AnswerOutcome, Question, RoundEngine, RoundPhase, RoundSnapshot};

/// Game configuration constants
pub mod consts {
    /// Options shown per question
    pub const OPTION_COUNT: usize = 4;
    /// Wrong options per question
    pub const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;
    /// Smallest catalog that can fill a question
    pub const MIN_CATALOG_SIZE: usize = OPTION_COUNT;

    /// Storage keys
    pub const HI_SCORE_KEY: &str = "airline-hi-score";
    pub const MUTED_KEY: &str = "airline-muted";
    pub const LIGHT_THEME_KEY: &str = "airline-light-mode";
}
