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

/// The focus score a new collection starts with.
pub const INITIAL_FOCUS_SCORE: u32 = 85;

/// Counters for one study session. XP and focus score carry over from one
/// session to the next; everything else starts at zero.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SessionStats {
    pub correct: u32,
    pub total: u32,
    pub streak: u32,
    pub max_streak: u32,
    pub xp: u32,
    pub focus_score: u32,
}

impl SessionStats {
    /// Stats for a brand-new collection.
    pub fn new() -> Self {
        Self::resume(0, INITIAL_FOCUS_SCORE)
    }

    /// Stats for a session starting with the given persistent counters.
    pub fn resume(xp: u32, focus_score: u32) -> Self {
        Self {
            correct: 0,
            total: 0,
            streak: 0,
            max_streak: 0,
            xp,
            focus_score,
        }
    }

    /// Start the next session: reset everything except XP and focus score.
    pub fn next_session(&self) -> Self {
        Self::resume(self.xp, self.focus_score)
    }

    /// Percentage of correct answers, rounded. Zero if nothing was answered.
    pub fn accuracy(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            (self.correct as f64 / self.total as f64 * 100.0).round() as u32
        }
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}
