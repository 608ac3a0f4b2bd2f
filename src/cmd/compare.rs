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

use crate::similarity::Band;
use crate::similarity::percent;
use crate::similarity::score;

/// Score a typed answer against the correct one, the way the study server
/// does, and print the result.
pub fn compare_answers(user: &str, correct: &str) {
    println!("{}", describe(user, correct));
}

fn describe(user: &str, correct: &str) -> String {
    let score = score(user, correct);
    let band = Band::of(score);
    format!(
        "{} ({}% match) - {}",
        band.label(),
        percent(score),
        band.encouragement()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_exact() {
        assert_eq!(
            describe("Spaced repetition", "spaced repetition."),
            "Excellent match! (100% match) - Great job!"
        );
    }

    #[test]
    fn test_describe_unrelated() {
        assert_eq!(
            describe("banana", "metacognition"),
            format!(
                "Low similarity ({}% match) - Keep practicing!",
                percent(score("banana", "metacognition"))
            )
        );
    }
}
