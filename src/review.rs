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

//! Applying a self-assessment to a card and to the running session.

use crate::types::card::Card;
use crate::types::card::Status;
use crate::types::response::Response;
use crate::types::session::SessionStats;
use crate::types::timestamp::Timestamp;

/// An `instant` response only masters a card above this confidence.
const MASTERY_THRESHOLD: u8 = 80;

/// Apply a self-assessment to a card and the session stats. The caller is
/// responsible for persisting the returned values.
pub fn apply_feedback(
    card: Card,
    stats: SessionStats,
    response: Response,
    now: Timestamp,
) -> (Card, SessionStats) {
    let mut card = card;
    let mut stats = stats;

    card.confidence = card.confidence.adjust(response.confidence_delta());
    card.review_count += 1;
    card.last_reviewed = Some(now);

    stats.total += 1;
    if response.is_correct() {
        stats.correct += 1;
        stats.streak += 1;
        stats.max_streak = stats.max_streak.max(stats.streak);
    } else {
        stats.streak = 0;
    }
    stats.xp += response.xp();

    card.status = match response {
        Response::Instant if card.confidence.value() > MASTERY_THRESHOLD => Status::Mastered,
        Response::Struggle => Status::Learning,
        _ => Status::Review,
    };

    (card, stats)
}
