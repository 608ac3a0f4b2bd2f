// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A study session: a shuffled queue of cards, walked through one card at a
//! time.
//!
//! Each card goes through the same steps. The question is shown, the user
//! either types an answer to be checked or just reveals the back, then rates
//! how hard it was to recall, then moves on to the next card. After the last
//! card (or when the user ends early) the session is finished.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::db::SessionRecord;
use crate::error::Fallible;
use crate::error::fail;
use crate::review::apply_feedback;
use crate::similarity;
use crate::types::card::Card;
use crate::types::card_id::CardId;
use crate::types::response::Response;
use crate::types::session::SessionStats;
use crate::types::timestamp::Timestamp;

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    /// The front is shown; waiting for an answer.
    Question,
    /// The back is shown, with the typed answer's score if there was one;
    /// waiting for a self-assessment.
    Answered(Option<AnswerCheck>),
    /// The card has been rated; waiting to move on.
    Rated(Response),
    Finished(Timestamp),
}

/// The result of comparing a typed answer to the back of the card.
#[derive(Clone, Debug, PartialEq)]
pub struct AnswerCheck {
    pub answer: String,
    pub score: f64,
}

/// A computed but not yet applied self-assessment.
pub struct Rating {
    pub card: Card,
    pub stats: SessionStats,
    response: Response,
}

pub struct Session {
    queue: Vec<CardId>,
    index: usize,
    phase: Phase,
    stats: SessionStats,
    /// XP at the start of the session.
    initial_xp: u32,
    started_at: Timestamp,
    /// A message to show the user on the next render.
    notice: Option<String>,
}

impl Session {
    /// Start a session over the given cards, shuffled. `progress` carries the
    /// XP and focus score from earlier sessions.
    pub fn start<R: Rng + ?Sized>(
        cards: Vec<CardId>,
        progress: &SessionStats,
        rng: &mut R,
        now: Timestamp,
    ) -> Fallible<Self> {
        if cards.is_empty() {
            return fail("No cards to study. Add some cards first!");
        }
        let mut queue = cards;
        queue.shuffle(rng);
        let stats = progress.next_session();
        Ok(Self {
            queue,
            index: 0,
            phase: Phase::Question,
            stats,
            initial_xp: stats.xp,
            started_at: now,
            notice: None,
        })
    }

    /// The card currently being studied, unless the session is finished.
    pub fn current(&self) -> Option<CardId> {
        match self.phase {
            Phase::Finished(_) => None,
            _ => self.queue.get(self.index).copied(),
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// One-based position of the current card, and the queue length.
    pub fn position(&self) -> (usize, usize) {
        ((self.index + 1).min(self.queue.len()), self.queue.len())
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    pub fn xp_earned(&self) -> u32 {
        self.stats.xp - self.initial_xp
    }

    /// Score a typed answer against the card's back. A blank answer leaves
    /// the card on the question and sets a notice instead.
    pub fn check(&mut self, answer: &str, card: &Card) -> Fallible<()> {
        self.expect_current(card)?;
        if self.phase != Phase::Question {
            return fail("The answer has already been shown.");
        }
        let answer = answer.trim();
        if answer.is_empty() {
            self.notice = Some("Please type your answer first".to_string());
            return Ok(());
        }
        let score = similarity::score(answer, &card.back);
        log::debug!("Checked answer for {}: {:.2}", card.id, score);
        self.phase = Phase::Answered(Some(AnswerCheck {
            answer: answer.to_string(),
            score,
        }));
        Ok(())
    }

    /// Show the back without typing an answer.
    pub fn reveal(&mut self) -> Fallible<()> {
        if self.phase != Phase::Question {
            return fail("The answer has already been shown.");
        }
        self.phase = Phase::Answered(None);
        Ok(())
    }

    /// Compute the effect of a self-assessment on the current card without
    /// changing the session.
    pub fn rating(&self, card: Card, response: Response, now: Timestamp) -> Fallible<Rating> {
        self.expect_current(&card)?;
        if !matches!(self.phase, Phase::Answered(_)) {
            return fail("Cannot rate a card before its answer is shown.");
        }
        let (card, stats) = apply_feedback(card, self.stats, response, now);
        Ok(Rating {
            card,
            stats,
            response,
        })
    }

    /// Commit a rating from [`Session::rating`]. Returns the updated card.
    pub fn apply(&mut self, rating: Rating) -> Card {
        let Rating {
            card,
            stats,
            response,
        } = rating;
        log::debug!(
            "{} {} confidence={} status={}",
            card.id,
            response,
            card.confidence,
            card.status
        );
        self.stats = stats;
        self.phase = Phase::Rated(response);
        card
    }

    /// Move on to the next card, finishing the session after the last one.
    pub fn next(&mut self, now: Timestamp) -> Fallible<()> {
        if !matches!(self.phase, Phase::Rated(_)) {
            return fail("Cannot move on before rating the card.");
        }
        self.index += 1;
        if self.index >= self.queue.len() {
            log::debug!("Session completed");
            self.phase = Phase::Finished(now);
        } else {
            self.phase = Phase::Question;
        }
        Ok(())
    }

    /// End the session early. Ending a finished session does nothing.
    pub fn end(&mut self, now: Timestamp) {
        if !self.is_finished() {
            log::debug!("Session ended");
            self.phase = Phase::Finished(now);
        }
    }

    /// The stored form of a finished session.
    pub fn record(&self) -> Fallible<SessionRecord> {
        let Phase::Finished(ended_at) = self.phase else {
            return fail("The session has not finished.");
        };
        Ok(SessionRecord {
            started_at: self.started_at,
            ended_at,
            correct: self.stats.correct,
            total: self.stats.total,
            max_streak: self.stats.max_streak,
            xp_earned: self.xp_earned(),
        })
    }

    fn expect_current(&self, card: &Card) -> Fallible<()> {
        if self.current() != Some(card.id) {
            return fail("That card is not the one being studied.");
        }
        Ok(())
    }
}
