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
use std::fs::write;
use std::path::PathBuf;

use serde::Serialize;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::library::Library;
use crate::types::deck::Deck;
use crate::types::deck::DeckId;
use crate::types::timestamp::Timestamp;

const EXPORT_VERSION: &str = "1.0";

pub fn export_collection(directory: Option<String>, output: Option<PathBuf>) -> Fallible<()> {
    let coll: Collection = Collection::new(directory)?;
    let export: Export = get_export(&coll.library, Timestamp::now());
    let json: String = serde_json::to_string_pretty(&export)?;
    match output {
        Some(path) => {
            write(&path, format!("{json}\n"))?;
            log::debug!("Wrote {} cards to {}", export.total_cards, path.display());
        }
        None => {
            println!("{json}");
        }
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Export<'a> {
    version: &'static str,
    export_date: Timestamp,
    total_cards: usize,
    decks: &'a BTreeMap<DeckId, Deck>,
}

fn get_export(library: &Library, now: Timestamp) -> Export<'_> {
    Export {
        version: EXPORT_VERSION,
        export_date: now,
        total_cards: library.card_count(),
        decks: library.decks(),
    }
}
