//! Round state machine
//!
//! A round is either awaiting an answer or answered. `answer` moves
//! forward, `next` deals a fresh question and moves back. Score, streak and
//! hi-score carry across rounds; the hi-score is written to the store the
//! moment it is beaten.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::question::{Question, generate};
use crate::catalog::{Airline, Catalog};
use crate::error::QuizResult;
use crate::persistence::PreferenceStore;
use crate::preferences::{load_hi_score, save_hi_score};

/// Where the current round stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Options are live, waiting for a pick
    AwaitingAnswer,
    /// A pick was scored; only `next` does anything
    Answered,
}

/// Whether the last answer was right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Correct,
    Incorrect,
}

impl FeedbackKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            FeedbackKind::Correct => "correct",
            FeedbackKind::Incorrect => "incorrect",
        }
    }
}

/// Banner shown after answering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

/// Highlight for one option button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionMark {
    None,
    Correct,
    Incorrect,
}

impl OptionMark {
    pub fn css_class(&self) -> &'static str {
        match self {
            OptionMark::None => "",
            OptionMark::Correct => "correct",
            OptionMark::Incorrect => "incorrect",
        }
    }
}

/// Render data for one option button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub airline: Airline,
    pub mark: OptionMark,
    pub enabled: bool,
}

/// Immutable copy of everything the page renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSnapshot {
    pub correct_count: u32,
    pub total_count: u32,
    pub streak: u32,
    pub hi_score: u32,
    pub iata_code: String,
    pub options: Vec<OptionView>,
    pub selected_id: Option<String>,
    pub answered: bool,
    pub feedback: Option<Feedback>,
}

/// Result of an `answer` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Scored as correct
    Correct {
        /// Streak including this answer
        streak: u32,
        /// This answer set a new hi-score
        new_hi_score: bool,
    },
    /// Scored as wrong
    Wrong {
        /// The airline that was being asked for
        correct: Airline,
    },
    /// Round already answered (or the pick wasn't an option); nothing changed
    Ignored,
}

type Listener = Box<dyn FnMut(&RoundSnapshot)>;

/// Owns the current question and the running score for one session
pub struct RoundEngine<S: PreferenceStore> {
    catalog: Catalog,
    store: S,
    rng: Pcg32,
    question: Question,
    correct_count: u32,
    total_count: u32,
    streak: u32,
    hi_score: u32,
    /// Set exactly while the round is answered
    selected_id: Option<String>,
    feedback: Option<Feedback>,
    listeners: Vec<Listener>,
}

impl<S: PreferenceStore> RoundEngine<S> {
    /// Start a session with an entropy-seeded RNG
    pub fn new(catalog: Catalog, store: S) -> QuizResult<Self> {
        let seed = rand::rng().random();
        Self::with_seed(catalog, store, seed)
    }

    /// Start a session with a fixed seed (reproducible question sequence).
    ///
    /// Loads the hi-score from `store` and deals the first question. A
    /// catalog with fewer than four airlines fails here and is not retried.
    pub fn with_seed(catalog: Catalog, store: S, seed: u64) -> QuizResult<Self> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let question = generate(catalog.airlines(), &mut rng)?;
        let hi_score = load_hi_score(&store);
        log::info!(
            "Session started: {} airlines, hi-score {hi_score}",
            catalog.len()
        );

        Ok(Self {
            catalog,
            store,
            rng,
            question,
            correct_count: 0,
            total_count: 0,
            streak: 0,
            hi_score,
            selected_id: None,
            feedback: None,
            listeners: Vec::new(),
        })
    }

    /// Score a pick. Only the first call per question has any effect, and
    /// the pick must be one of the current options (matched by id).
    pub fn answer(&mut self, selected: &Airline) -> AnswerOutcome {
        self.answer_id(&selected.id)
    }

    /// Score the option with this id, as a button click would.
    ///
    /// Ids that are not among the current options are ignored.
    pub fn answer_id(&mut self, id: &str) -> AnswerOutcome {
        if self.is_answered() {
            log::debug!("Ignoring duplicate answer {id}");
            return AnswerOutcome::Ignored;
        }
        match self.question.option(id).cloned() {
            Some(airline) => self.score(&airline),
            None => {
                log::warn!("Ignoring answer for unknown option {id}");
                AnswerOutcome::Ignored
            }
        }
    }

    fn score(&mut self, selected: &Airline) -> AnswerOutcome {
        self.selected_id = Some(selected.id.clone());
        self.total_count += 1;

        let outcome = if self.question.is_correct(selected) {
            self.correct_count += 1;
            self.streak += 1;

            let new_hi_score = self.correct_count > self.hi_score;
            if new_hi_score {
                self.hi_score = self.correct_count;
                save_hi_score(&self.store, self.hi_score);
                log::info!("New hi-score: {}", self.hi_score);
            }

            let message = if self.streak == 1 {
                "CORRECT!".to_string()
            } else {
                format!("CORRECT! {}x COMBO!", self.streak)
            };
            self.feedback = Some(Feedback {
                kind: FeedbackKind::Correct,
                message,
            });
            AnswerOutcome::Correct {
                streak: self.streak,
                new_hi_score,
            }
        } else {
            self.streak = 0;
            let correct = self.question.correct().clone();
            self.feedback = Some(Feedback {
                kind: FeedbackKind::Incorrect,
                message: format!("WRONG! IT WAS {}", correct.name.to_uppercase()),
            });
            AnswerOutcome::Wrong { correct }
        };

        log::debug!(
            "Answered {} -> {:?}, score {}/{}",
            selected.id,
            outcome,
            self.correct_count,
            self.total_count
        );
        self.emit();
        outcome
    }

    /// Deal the next question. Returns `Ok(false)` without changing anything
    /// while the current question is still unanswered.
    pub fn next(&mut self) -> QuizResult<bool> {
        if !self.is_answered() {
            return Ok(false);
        }

        self.question = generate(self.catalog.airlines(), &mut self.rng)?;
        self.selected_id = None;
        self.feedback = None;
        self.emit();
        Ok(true)
    }

    /// Register an observer. It receives the current snapshot immediately
    /// and a new one after every committed `answer` or `next`.
    pub fn subscribe(&mut self, mut listener: impl FnMut(&RoundSnapshot) + 'static) {
        listener(&self.snapshot());
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self) {
        let snapshot = self.snapshot();
        for listener in &mut self.listeners {
            listener(&snapshot);
        }
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let answered = self.is_answered();
        let options = self
            .question
            .options()
            .iter()
            .map(|airline| OptionView {
                airline: airline.clone(),
                mark: self.mark_for(airline),
                enabled: !answered,
            })
            .collect();

        RoundSnapshot {
            correct_count: self.correct_count,
            total_count: self.total_count,
            streak: self.streak,
            hi_score: self.hi_score,
            iata_code: self.question.iata_code().to_string(),
            options,
            selected_id: self.selected_id.clone(),
            answered,
            feedback: self.feedback.clone(),
        }
    }

    /// Correct takes precedence when the pick was right
    fn mark_for(&self, airline: &Airline) -> OptionMark {
        match &self.selected_id {
            None => OptionMark::None,
            Some(_) if self.question.is_correct(airline) => OptionMark::Correct,
            Some(selected) if *selected == airline.id => OptionMark::Incorrect,
            Some(_) => OptionMark::None,
        }
    }

    /// The airline the active question wants. Read-only; for observers
    /// such as automated UI tests.
    pub fn correct_answer(&self) -> &Airline {
        self.question.correct()
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn phase(&self) -> RoundPhase {
        if self.is_answered() {
            RoundPhase::Answered
        } else {
            RoundPhase::AwaitingAnswer
        }
    }

    pub fn is_answered(&self) -> bool {
        self.selected_id.is_some()
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn total_count(&self) -> u32 {
        self.total_count
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn hi_score(&self) -> u32 {
        self.hi_score
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Scoreboard text, e.g. `SCORE: 2 / 3`
    pub fn score_line(&self) -> String {
        format!("SCORE: {} / {}", self.correct_count, self.total_count)
    }
}
