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

use std::collections::BTreeMap;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;
use crate::types::card::Difficulty;
use crate::types::card::Status;
use crate::types::card_id::CardId;
use crate::types::deck::DEFAULT_DECK_NAME;
use crate::types::deck::Deck;
use crate::types::deck::DeckId;
use crate::types::timestamp::Timestamp;

/// Cards every fresh collection starts with.
const SAMPLE_CARDS: [(&str, &str); 5] = [
    (
        "What is a flashcard?",
        "A card bearing information on both sides, used for studying and memorization",
    ),
    (
        "What is spaced repetition?",
        "A learning technique that incorporates increasing intervals of time between reviews",
    ),
    (
        "What is active recall?",
        "A principle of efficient learning that claims retrieving information from memory strengthens memory",
    ),
    (
        "What is the testing effect?",
        "The finding that long-term memory is enhanced when some of the learning period is devoted to retrieving information",
    ),
    (
        "What is metacognition?",
        "Awareness and understanding of one's own thought processes",
    ),
];

/// All decks and their cards. The default deck is always present, and every
/// card lives in the deck named by its `deck` field.
#[derive(Clone, Debug, PartialEq)]
pub struct Library {
    decks: BTreeMap<DeckId, Deck>,
}

/// Card counts by status, for display.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct StatusCounts {
    pub total: usize,
    pub new: usize,
    pub learning: usize,
    /// Cards in review or mastered.
    pub review: usize,
}

impl Library {
    pub fn new() -> Self {
        let mut decks = BTreeMap::new();
        decks.insert(DeckId::default_deck(), Deck::new(DEFAULT_DECK_NAME));
        Self { decks }
    }

    pub fn with_sample_cards(now: Timestamp) -> Self {
        let mut library = Self::new();
        let deck_id = DeckId::default_deck();
        for (front, back) in SAMPLE_CARDS {
            let card = Card::new(deck_id.clone(), front, back, Difficulty::Medium, now);
            library.insert_card(card);
        }
        library
    }

    /// Build a library from stored decks and cards. Cards whose deck is
    /// missing are an error; the default deck is added if absent.
    pub fn from_parts(decks: Vec<(DeckId, String)>, cards: Vec<Card>) -> Fallible<Self> {
        let mut library = Self::new();
        for (id, name) in decks {
            library.decks.insert(id, Deck::new(name));
        }
        for card in cards {
            if !library.decks.contains_key(&card.deck) {
                return fail(format!(
                    "card {} refers to missing deck {}",
                    card.id, card.deck
                ));
            }
            library.insert_card(card);
        }
        Ok(library)
    }

    pub fn decks(&self) -> &BTreeMap<DeckId, Deck> {
        &self.decks
    }

    pub fn deck(&self, deck_id: &DeckId) -> Option<&Deck> {
        self.decks.get(deck_id)
    }

    /// The id of the deck a user typed, given either as an id or as a
    /// display name. Unknown decks resolve to the id their name would get.
    pub fn resolve_deck(&self, raw: &str) -> DeckId {
        let id = DeckId::from_name(raw);
        if self.decks.contains_key(&id) {
            return id;
        }
        let raw = raw.trim();
        self.decks
            .iter()
            .find(|(_, deck)| deck.name.eq_ignore_ascii_case(raw))
            .map(|(id, _)| id.clone())
            .unwrap_or(id)
    }

    pub fn create_deck(&mut self, name: &str) -> Fallible<(DeckId, &Deck)> {
        let name = name.trim();
        if name.is_empty() {
            return fail("Please enter a deck name");
        }
        let id = DeckId::from_name(name);
        if self.decks.contains_key(&id) {
            return fail("Deck already exists");
        }
        log::debug!("Creating deck {id}");
        self.decks.insert(id.clone(), Deck::new(name));
        let deck = &self.decks[&id];
        Ok((id, deck))
    }

    pub fn add_card(
        &mut self,
        deck_id: &DeckId,
        front: &str,
        back: &str,
        difficulty: Difficulty,
        now: Timestamp,
    ) -> Fallible<Card> {
        let (front, back) = validate_text(front, back)?;
        if !self.decks.contains_key(deck_id) {
            return fail(format!("No such deck: {deck_id}"));
        }
        let card = Card::new(deck_id.clone(), front, back, difficulty, now);
        log::debug!("Adding card {} to deck {deck_id}", card.id);
        self.insert_card(card.clone());
        Ok(card)
    }

    pub fn edit_card(
        &mut self,
        card_id: CardId,
        front: &str,
        back: &str,
        difficulty: Difficulty,
    ) -> Fallible<Card> {
        let (front, back) = validate_text(front, back)?;
        let Some(card) = self.card_mut(card_id) else {
            return fail(format!("No such card: {card_id}"));
        };
        card.front = front;
        card.back = back;
        card.difficulty = difficulty;
        Ok(card.clone())
    }

    pub fn delete_card(&mut self, card_id: CardId) -> Fallible<Card> {
        for deck in self.decks.values_mut() {
            if let Some(pos) = deck.cards.iter().position(|c| c.id == card_id) {
                return Ok(deck.cards.remove(pos));
            }
        }
        fail(format!("No such card: {card_id}"))
    }

    /// Store a new version of an existing card, e.g. after a review.
    pub fn replace_card(&mut self, card: Card) -> Fallible<()> {
        let Some(existing) = self.card_mut(card.id) else {
            return fail(format!("No such card: {}", card.id));
        };
        if existing.deck != card.deck {
            return fail("a card cannot change decks when it is reviewed");
        }
        *existing = card;
        Ok(())
    }

    pub fn card(&self, card_id: CardId) -> Option<&Card> {
        self.all_cards().find(|c| c.id == card_id)
    }

    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        self.decks.values().flat_map(|deck| deck.cards.iter())
    }

    pub fn card_count(&self) -> usize {
        self.decks.values().map(|deck| deck.cards.len()).sum()
    }

    pub fn cards_in(&self, deck_id: &DeckId) -> Fallible<&[Card]> {
        match self.decks.get(deck_id) {
            Some(deck) => Ok(&deck.cards),
            None => fail(format!("No such deck: {deck_id}")),
        }
    }

    /// Cards in one deck, or all decks, whose front or back contains the
    /// search term, ignoring case.
    pub fn filter(&self, deck_id: Option<&DeckId>, search: Option<&str>) -> Fallible<Vec<&Card>> {
        let cards: Vec<&Card> = match deck_id {
            Some(deck_id) => self.cards_in(deck_id)?.iter().collect(),
            None => self.all_cards().collect(),
        };
        let term = search.map(str::to_lowercase).unwrap_or_default();
        if term.is_empty() {
            return Ok(cards);
        }
        Ok(cards
            .into_iter()
            .filter(|card| {
                card.front.to_lowercase().contains(&term) || card.back.to_lowercase().contains(&term)
            })
            .collect())
    }

    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for card in self.all_cards() {
            counts.total += 1;
            match card.status {
                Status::New => counts.new += 1,
                Status::Learning => counts.learning += 1,
                Status::Review | Status::Mastered => counts.review += 1,
            }
        }
        counts
    }

    fn insert_card(&mut self, card: Card) {
        if let Some(deck) = self.decks.get_mut(&card.deck) {
            deck.cards.push(card);
        }
    }

    fn card_mut(&mut self, card_id: CardId) -> Option<&mut Card> {
        self.decks
            .values_mut()
            .flat_map(|deck| deck.cards.iter_mut())
            .find(|c| c.id == card_id)
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_text(front: &str, back: &str) -> Fallible<(String, String)> {
    let front = front.trim();
    let back = back.trim();
    if front.is_empty() || back.is_empty() {
        return fail("Please fill in both question and answer");
    }
    Ok((front.to_string(), back.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::card::Confidence;

    #[test]
    fn test_resolve_deck() -> Fallible<()> {
        let mut library = Library::new();
        library.create_deck("Rust Basics")?;
        assert_eq!(library.resolve_deck("rust-basics"), DeckId::new("rust-basics"));
        assert_eq!(library.resolve_deck(" Rust  Basics "), DeckId::new("rust-basics"));
        assert_eq!(library.resolve_deck("Default Deck"), DeckId::default_deck());
        assert_eq!(library.resolve_deck("default"), DeckId::default_deck());
        assert_eq!(library.resolve_deck("Herp Derp"), DeckId::new("herp-derp"));
        Ok(())
    }

    #[test]
    fn test_new_has_default_deck() {
        let library = Library::new();
        let deck = library.deck(&DeckId::default_deck()).unwrap();
        assert_eq!(deck.name, "Default Deck");
        assert_eq!(library.card_count(), 0);
    }

    #[test]
    fn test_sample_cards() {
        let library = Library::with_sample_cards(Timestamp::now());
        assert_eq!(library.card_count(), 5);
        assert!(library.all_cards().all(|c| c.deck.is_default()));
        assert_eq!(library.status_counts().new, 5);
    }

    #[test]
    fn test_create_deck() -> Fallible<()> {
        let mut library = Library::new();
        let (id, deck) = library.create_deck("  Organic Chemistry ")?;
        assert_eq!(deck.name, "Organic Chemistry");
        assert_eq!(id.as_str(), "organic-chemistry");
        assert_eq!(
            library.create_deck("organic   chemistry").unwrap_err().message(),
            "Deck already exists"
        );
        assert!(library.create_deck("   ").is_err());
        assert!(library.create_deck("Default Deck").is_ok());
        assert!(library.create_deck("default").is_err());
        Ok(())
    }

    #[test]
    fn test_add_card() -> Fallible<()> {
        let mut library = Library::new();
        let (spanish, _) = library.create_deck("Spanish")?;
        let card = library.add_card(&spanish, " hola ", " hello ", Difficulty::Easy, Timestamp::now())?;
        assert_eq!(card.front, "hola");
        assert_eq!(card.back, "hello");
        assert_eq!(library.cards_in(&spanish)?.len(), 1);
        assert_eq!(library.card(card.id), Some(&card));
        Ok(())
    }

    #[test]
    fn test_add_card_validation() {
        let mut library = Library::new();
        let default = DeckId::default_deck();
        let err = library
            .add_card(&default, "  ", "answer", Difficulty::Medium, Timestamp::now())
            .unwrap_err();
        assert_eq!(err.message(), "Please fill in both question and answer");
        assert!(
            library
                .add_card(&DeckId::new("nope"), "q", "a", Difficulty::Medium, Timestamp::now())
                .is_err()
        );
        assert_eq!(library.card_count(), 0);
    }

    #[test]
    fn test_edit_card() -> Fallible<()> {
        let mut library = Library::with_sample_cards(Timestamp::now());
        let id = library.all_cards().next().unwrap().id;
        let edited = library.edit_card(id, "Front", "Back", Difficulty::Hard)?;
        assert_eq!(edited.front, "Front");
        assert_eq!(library.card(id).unwrap().difficulty, Difficulty::Hard);
        assert!(library.edit_card(id, "Front", "", Difficulty::Hard).is_err());
        assert!(library.edit_card(CardId::random(), "a", "b", Difficulty::Hard).is_err());
        Ok(())
    }

    #[test]
    fn test_delete_card() -> Fallible<()> {
        let mut library = Library::with_sample_cards(Timestamp::now());
        let id = library.all_cards().next().unwrap().id;
        library.delete_card(id)?;
        assert_eq!(library.card_count(), 4);
        assert!(library.card(id).is_none());
        assert!(library.delete_card(id).is_err());
        Ok(())
    }

    #[test]
    fn test_replace_card() -> Fallible<()> {
        let mut library = Library::with_sample_cards(Timestamp::now());
        let mut card = library.all_cards().next().unwrap().clone();
        card.confidence = Confidence::new(40);
        card.status = Status::Review;
        library.replace_card(card.clone())?;
        assert_eq!(library.card(card.id), Some(&card));
        let mut moved = card.clone();
        moved.deck = DeckId::new("elsewhere");
        assert!(library.replace_card(moved).is_err());
        Ok(())
    }

    #[test]
    fn test_filter() -> Fallible<()> {
        let mut library = Library::with_sample_cards(Timestamp::now());
        let (spanish, _) = library.create_deck("Spanish")?;
        library.add_card(&spanish, "hola", "hello", Difficulty::Easy, Timestamp::now())?;
        assert_eq!(library.filter(None, None)?.len(), 6);
        assert_eq!(library.filter(Some(&spanish), None)?.len(), 1);
        assert_eq!(library.filter(None, Some("MEMORY"))?.len(), 2);
        assert_eq!(library.filter(Some(&spanish), Some("memory"))?.len(), 0);
        assert_eq!(library.filter(None, Some(""))?.len(), 6);
        assert!(library.filter(Some(&DeckId::new("nope")), None).is_err());
        Ok(())
    }

    #[test]
    fn test_status_counts() -> Fallible<()> {
        let mut library = Library::with_sample_cards(Timestamp::now());
        let ids: Vec<CardId> = library.all_cards().map(|c| c.id).collect();
        let statuses = [Status::Learning, Status::Review, Status::Mastered];
        for (id, status) in ids.iter().zip(statuses) {
            let mut card = library.card(*id).unwrap().clone();
            card.status = status;
            library.replace_card(card)?;
        }
        let counts = library.status_counts();
        assert_eq!(
            counts,
            StatusCounts {
                total: 5,
                new: 2,
                learning: 1,
                review: 2,
            }
        );
        Ok(())
    }

    #[test]
    fn test_from_parts() -> Fallible<()> {
        let card = Card::new(
            DeckId::new("spanish"),
            "hola",
            "hello",
            Difficulty::Easy,
            Timestamp::now(),
        );
        let library = Library::from_parts(
            vec![(DeckId::new("spanish"), "Spanish".to_string())],
            vec![card.clone()],
        )?;
        assert!(library.deck(&DeckId::default_deck()).is_some());
        assert_eq!(library.card(card.id), Some(&card));
        assert!(Library::from_parts(vec![], vec![card]).is_err());
        Ok(())
    }
}
