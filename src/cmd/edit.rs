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
use crate::error::fail;
use crate::types::card::Difficulty;
use crate::types::card_id::CardId;

/// Change a card's text or difficulty. Fields left as `None` keep their
/// current value.
pub fn edit_card(
    directory: Option<String>,
    card_id: &str,
    front: Option<String>,
    back: Option<String>,
    difficulty: Option<Difficulty>,
) -> Fallible<()> {
    let card_id: CardId = card_id.parse()?;
    let mut coll = Collection::new(directory)?;
    let Some(existing) = coll.library.card(card_id) else {
        return fail(format!("No such card: {card_id}"));
    };
    let front = front.unwrap_or_else(|| existing.front.clone());
    let back = back.unwrap_or_else(|| existing.back.clone());
    let difficulty = difficulty.unwrap_or(existing.difficulty);
    let card = coll.library.edit_card(card_id, &front, &back, difficulty)?;
    coll.db.update_card(&card)?;
    println!("Updated {card_id}.");
    Ok(())
}
