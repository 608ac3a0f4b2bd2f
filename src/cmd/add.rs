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

use crate::collection::Collection;
use crate::error::Fallible;
use crate::types::card::Difficulty;
use crate::types::deck::DeckId;
use crate::types::timestamp::Timestamp;

pub fn add_card(
    directory: Option<String>,
    front: &str,
    back: &str,
    deck: Option<String>,
    difficulty: Difficulty,
) -> Fallible<()> {
    let mut coll = Collection::new(directory)?;
    let deck_id = match deck {
        Some(deck) => coll.library.resolve_deck(&deck),
        None => DeckId::default_deck(),
    };
    let card = coll
        .library
        .add_card(&deck_id, front, back, difficulty, Timestamp::now())?;
    coll.db.insert_card(&card)?;
    println!("{}", card.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::deck::create_deck;
    use crate::helper::create_tmp_directory;
    use crate::types::card::Status;

    #[test]
    fn test_add_card() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let directory = Some(dir.display().to_string());
        create_deck(directory.clone(), "Rust")?;
        add_card(
            directory.clone(),
            " What is a borrow? ",
            "A reference to a value",
            Some("rust".to_string()),
            Difficulty::Hard,
        )?;
        let coll = Collection::new(directory)?;
        let cards = coll.library.cards_in(&DeckId::new("rust"))?;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].front, "What is a borrow?");
        assert_eq!(cards[0].difficulty, Difficulty::Hard);
        assert_eq!(cards[0].status, Status::New);
        assert_eq!(cards[0].review_count, 0);
        Ok(())
    }

    #[test]
    fn test_add_card_by_deck_name() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let directory = Some(dir.display().to_string());
        create_deck(directory.clone(), "Rust Basics")?;
        add_card(
            directory.clone(),
            "What is a slice?",
            "A view into a sequence",
            Some("Rust Basics".to_string()),
            Difficulty::Medium,
        )?;
        add_card(
            directory.clone(),
            "What is a trait?",
            "A set of methods",
            Some("rust-basics".to_string()),
            Difficulty::Medium,
        )?;
        add_card(
            directory.clone(),
            "What is a crate?",
            "A compilation unit",
            Some("Default Deck".to_string()),
            Difficulty::Medium,
        )?;
        let coll = Collection::new(directory)?;
        let cards = coll.library.cards_in(&DeckId::new("rust-basics"))?;
        assert_eq!(cards.len(), 2);
        let cards = coll.library.cards_in(&DeckId::default_deck())?;
        assert_eq!(cards.len(), 1);
        Ok(())
    }

    #[test]
    fn test_add_card_validation() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let directory = Some(dir.display().to_string());
        let result = add_card(directory.clone(), "Q", "  ", None, Difficulty::Medium);
        assert_eq!(
            result.err().unwrap().message(),
            "Please fill in both question and answer"
        );
        let result = add_card(
            directory,
            "Q",
            "A",
            Some("herp-derp".to_string()),
            Difficulty::Medium,
        );
        assert_eq!(result.err().unwrap().message(), "No such deck: herp-derp");
        Ok(())
    }
}
