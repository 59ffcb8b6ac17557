//! Quiz core
//!
//! Everything random goes through an explicit RNG argument so a seeded
//! session replays the same questions:
//! - `sampler`: shuffles and subset draws
//! - `question`: one prompt with four options
//! - `round`: scoring state machine

pub mod question;
pub mod round;
pub mod sampler;

pub use question::{Question, generate};
pub use round::{
    AnswerOutcome, Feedback, FeedbackKind, OptionMark, OptionView, RoundEngine, RoundPhase,
    RoundSnapshot,
};
pub use sampler::{sample, shuffle};
