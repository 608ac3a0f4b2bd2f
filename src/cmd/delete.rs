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
use crate::types::card_id::CardId;

pub fn delete_card(directory: Option<String>, card_id: &str) -> Fallible<()> {
    let card_id: CardId = card_id.parse()?;
    let mut coll = Collection::new(directory)?;
    let card = coll.library.delete_card(card_id)?;
    coll.db.delete_card(card.id)?;
    println!("Deleted {card_id}.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_delete_card() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let directory = Some(dir.display().to_string());
        let coll = Collection::new(directory.clone())?;
        let card_id = coll.library.all_cards().next().unwrap().id;
        drop(coll);
        delete_card(directory.clone(), &card_id.to_string())?;
        let coll = Collection::new(directory.clone())?;
        assert_eq!(coll.library.card_count(), 4);
        assert!(coll.library.card(card_id).is_none());
        // Deleting it again fails.
        assert!(delete_card(directory, &card_id.to_string()).is_err());
        Ok(())
    }
}
