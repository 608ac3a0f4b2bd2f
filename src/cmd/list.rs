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
use crate::types::card::Card;

const FRONT_WIDTH: usize = 80;
const BACK_WIDTH: usize = 100;

pub fn list_cards(
    directory: Option<String>,
    deck: Option<String>,
    search: Option<String>,
) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let deck_id = deck.map(|deck| coll.library.resolve_deck(&deck));
    let cards = coll.library.filter(deck_id.as_ref(), search.as_deref())?;
    if cards.is_empty() {
        println!("No cards found.");
        return Ok(());
    }
    for card in cards {
        let deck_name = coll
            .library
            .deck(&card.deck)
            .map(|deck| deck.name.as_str())
            .unwrap_or(card.deck.as_str());
        println!("{}", render_card(card, deck_name));
    }
    Ok(())
}

fn render_card(card: &Card, deck_name: &str) -> String {
    format!(
        "{}\nQ: {}\nA: {}\n{} | {} | {} confidence | {}\n",
        card.id,
        truncate(&card.front, FRONT_WIDTH),
        truncate(&card.back, BACK_WIDTH),
        card.status,
        card.difficulty,
        card.confidence,
        deck_name
    )
}

/// Cut text down to `max` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((end, _)) => format!("{}...", &text[..end]),
    }
}
