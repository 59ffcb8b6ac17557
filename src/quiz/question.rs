//! Question generation
//!
//! One correct airline plus three distractors, presented in random order.

use std::collections::HashSet;

use rand::Rng;
use super::sampler::{sample, shuffle};
use crate::catalog::Airline;
use crate::consts::{DISTRACTOR_COUNT, MIN_CATALOG_SIZE};
use crate::error::{QuizError, QuizResult};

/// A single round's prompt and answer options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    correct: Airline,
    options: Vec<Airline>,
}

impl Question {
    /// The airline whose IATA code is being asked about
    pub fn correct(&self) -> &Airline {
        &self.correct
    }

    /// The four options, in display order
    pub fn options(&self) -> &[Airline] {
        &self.options
    }

    /// The IATA code shown as the prompt
    pub fn iata_code(&self) -> &str {
        &self.correct.iata_code
    }

    /// Display position of the correct airline
    pub fn correct_index(&self) -> usize {
        self.options
            .iter()
            .position(|a| a.id == self.correct.id)
            .unwrap_or_default()
    }

    pub fn is_correct(&self, airline: &Airline) -> bool {
        airline.id == self.correct.id
    }

    /// Find an option by airline id
    pub fn option(&self, id: &str) -> Option<&Airline> {
        self.options.iter().find(|a| a.id == id)
    }
}

/// Build a fresh question from `airlines`.
///
/// Records are distinct by id: a repeated id keeps its first record only.
/// Fails with [`QuizError::InsufficientCatalog`] for fewer than four
/// distinct airlines.
pub fn generate<R: Rng + ?Sized>(airlines: &[Airline], rng: &mut R) -> QuizResult<Question> {
    let mut seen = HashSet::with_capacity(airlines.len());
    let distinct: Vec<&Airline> = airlines
        .iter()
        .filter(|&a| seen.insert(a.id.as_str()))
        .collect();
    if distinct.len() < airlines.len() {
        log::warn!(
            "Skipping {} airline records with repeated ids",
            airlines.len() - distinct.len()
        );
    }

    if distinct.len() < MIN_CATALOG_SIZE {
        return Err(QuizError::InsufficientCatalog {
            available: distinct.len(),
            required: MIN_CATALOG_SIZE,
        });
    }

    let correct = distinct[rng.random_range(0..distinct.len())];
    // Ids are unique in `distinct`, so excluding `correct` removes exactly one record
    let mut options = sample(&distinct, DISTRACTOR_COUNT, Some(&correct), rng)?;
    options.push(correct);
    let options: Vec<Airline> = shuffle(&options, rng).into_iter().cloned().collect();

    log::debug!(
        "New question: {} ({}) at position {}",
        correct.iata_code,
        correct.id,
        options.iter().position(|a| a.id == correct.id).unwrap_or_default()
    );

    Ok(Question {
        correct: correct.clone(),
        options,
    })
}
