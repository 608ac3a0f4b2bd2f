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

pub fn create_deck(directory: Option<String>, name: &str) -> Fallible<()> {
    let mut coll = Collection::new(directory)?;
    let (deck_id, deck) = coll.library.create_deck(name)?;
    coll.db.insert_deck(&deck_id, &deck.name)?;
    println!("Created deck \"{}\" ({deck_id}).", deck.name);
    Ok(())
}

pub fn list_decks(directory: Option<String>) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    for (deck_id, deck) in coll.library.decks() {
        let marker = if deck_id.is_default() { " (default)" } else { "" };
        println!(
            "{deck_id}\t{}{marker}\t{} cards",
            deck.name,
            deck.cards.len()
        );
    }
    Ok(())
}
