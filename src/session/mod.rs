//! Evaluation session state machine.
//!
//! A [`Session`] owns the randomized traversal over the catalog and the
//! ratings collected so far. It is `Active` while `cursor < order.len()` and
//! terminally `Complete` once the cursor walks off the end (immediately so
//! for an empty catalog). All mutation goes through [`Session::advance`] and
//! [`Session::retreat`]; both commit the rater's current scores for the item
//! being left, so slider state survives back/forward navigation.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::{Condition, Sample};

pub mod order;

pub const SCORE_MIN: i32 = 1;
pub const SCORE_MAX: i32 = 5;
/// Pre-populated score for never-rated samples.
pub const NEUTRAL_SCORE: i32 = 3;

/// One rater judgment for one sample. Category and condition are denormalized
/// from the Sample so a persisted record stands alone for analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rating {
    pub sample_id: String,
    pub category: String,
    pub condition: Condition,
    pub quality: i32,
    #[serde(rename = "match")]
    pub text_match: i32,
    pub order_presented: usize,
}

/// The two Likert judgments submitted with a navigation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingInput {
    pub quality: i32,
    pub text_match: i32,
}

impl RatingInput {
    pub fn neutral() -> Self {
        Self {
            quality: NEUTRAL_SCORE,
            text_match: NEUTRAL_SCORE,
        }
    }

    fn validate(self) -> Result<(), SessionError> {
        let in_range = |v| (SCORE_MIN..=SCORE_MAX).contains(&v);
        if in_range(self.quality) && in_range(self.text_match) {
            Ok(())
        } else {
            Err(SessionError::InvalidRating {
                quality: self.quality,
                text_match: self.text_match,
            })
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error(
        "rating scores must be integers in {SCORE_MIN}..={SCORE_MAX} \
         (got quality={quality}, match={text_match})"
    )]
    InvalidRating { quality: i32, text_match: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active(usize),
    Complete,
}

/// Outcome of a successful transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Cursor moved and the session is still active.
    Moved,
    /// Cursor reached the end; the session is now complete.
    Completed,
    /// Disabled navigation (retreat at position 0); nothing changed.
    Stayed,
}

/// One continuous rater run: immutable catalog, the permutation fixed at
/// construction, the cursor into it, and the ratings keyed by sample id.
#[derive(Debug)]
pub struct Session {
    catalog: Vec<Sample>,
    order: Vec<usize>,
    cursor: usize,
    ratings: HashMap<String, Rating>,
}

impl Session {
    /// `order` must be a permutation of the catalog's indices; it is fixed
    /// for the session's lifetime (re-randomizing mid-session would
    /// invalidate recorded presentation indices).
    pub fn new(catalog: Vec<Sample>, order: Vec<usize>) -> Self {
        assert_eq!(
            order.len(),
            catalog.len(),
            "presentation order must cover the catalog exactly"
        );
        Self {
            catalog,
            order,
            cursor: 0,
            ratings: HashMap::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        if self.cursor < self.order.len() {
            SessionState::Active(self.cursor)
        } else {
            SessionState::Complete
        }
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.order.len()
    }

    /// `(cursor, total)` progress signal for display.
    pub fn progress(&self) -> (usize, usize) {
        (self.cursor, self.order.len())
    }

    pub fn catalog(&self) -> &[Sample] {
        &self.catalog
    }

    pub fn ratings(&self) -> &HashMap<String, Rating> {
        &self.ratings
    }

    /// The sample at the current presentation position, `None` once complete.
    pub fn current_sample(&self) -> Option<&Sample> {
        let idx = *self.order.get(self.cursor)?;
        Some(&self.catalog[idx])
    }

    /// Scores to pre-populate the controls with: the stored rating for the
    /// current sample, or the neutral midpoint if it was never rated. Makes
    /// repeated navigation idempotent absent new input.
    pub fn current_scores(&self) -> RatingInput {
        match self.current_sample().and_then(|s| self.ratings.get(&s.id)) {
            Some(r) => RatingInput {
                quality: r.quality,
                text_match: r.text_match,
            },
            None => RatingInput::neutral(),
        }
    }

    pub fn can_retreat(&self) -> bool {
        self.cursor > 0
    }

    /// Commit `input` for the current sample and move forward one position.
    ///
    /// Rejects out-of-range scores without any state change. Returns
    /// [`Transition::Completed`] when this step walked off the end of the
    /// order; the caller is responsible for persisting the finished session.
    ///
    /// # Panics
    /// Panics if the session is already complete; the terminal state disables
    /// further input, so reaching this is a programming error.
    pub fn advance(&mut self, input: RatingInput) -> Result<Transition, SessionError> {
        if self.is_complete() {
            panic!("advance called on a completed session");
        }
        input.validate()?;
        self.record_current(input);
        self.cursor += 1;
        if self.is_complete() {
            Ok(Transition::Completed)
        } else {
            Ok(Transition::Moved)
        }
    }

    /// Commit `input` for the current (about-to-be-left) sample and move back
    /// one position. Disabled at position 0: a stray call validates its input
    /// but changes nothing.
    ///
    /// # Panics
    /// Panics if the session is already complete, as for [`Session::advance`].
    pub fn retreat(&mut self, input: RatingInput) -> Result<Transition, SessionError> {
        if self.is_complete() {
            panic!("retreat called on a completed session");
        }
        input.validate()?;
        if self.cursor == 0 {
            return Ok(Transition::Stayed);
        }
        self.record_current(input);
        self.cursor -= 1;
        Ok(Transition::Moved)
    }

    /// Last-write-wins rating for the sample under the cursor. At most one
    /// rating per sample id ever exists.
    fn record_current(&mut self, input: RatingInput) {
        let sample = &self.catalog[self.order[self.cursor]];
        self.ratings.insert(
            sample.id.clone(),
            Rating {
                sample_id: sample.id.clone(),
                category: sample.category.clone(),
                condition: sample.condition,
                quality: input.quality,
                text_match: input.text_match,
                order_presented: self.cursor,
            },
        );
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/session/tests.rs"]
mod tests;
