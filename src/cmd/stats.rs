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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde::Serialize;

use crate::collection::Collection;
use crate::error::Fallible;

#[derive(ValueEnum, Clone)]
pub enum StatsFormat {
    /// Plain text output.
    Text,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_collection_stats(directory: Option<String>, format: StatsFormat) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let stats = get_stats(&coll)?;
    match format {
        StatsFormat::Text => {
            print!("{}", render_text(&stats));
        }
        StatsFormat::Json => {
            let stats_json = serde_json::to_string_pretty(&stats)?;
            println!("{stats_json}");
        }
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Stats {
    deck_count: usize,
    total_cards: usize,
    new_cards: usize,
    learning_cards: usize,
    review_cards: usize,
    xp: u32,
    focus_score: u32,
    session_count: usize,
    cards_studied: u32,
}

fn get_stats(coll: &Collection) -> Fallible<Stats> {
    let counts = coll.library.status_counts();
    let progress = coll.db.load_progress()?;
    let sessions = coll.db.sessions()?;
    Ok(Stats {
        deck_count: coll.library.decks().len(),
        total_cards: counts.total,
        new_cards: counts.new,
        learning_cards: counts.learning,
        review_cards: counts.review,
        xp: progress.xp,
        focus_score: progress.focus_score,
        session_count: sessions.len(),
        cards_studied: sessions.iter().map(|s| s.total).sum(),
    })
}

fn render_text(stats: &Stats) -> String {
    let mut out = String::new();
    out.push_str(&format!("Decks:         {}\n", stats.deck_count));
    out.push_str(&format!("Total cards:   {}\n", stats.total_cards));
    out.push_str(&format!("  New:         {}\n", stats.new_cards));
    out.push_str(&format!("  Learning:    {}\n", stats.learning_cards));
    out.push_str(&format!("  Review:      {}\n", stats.review_cards));
    out.push_str(&format!("XP:            {}\n", stats.xp));
    out.push_str(&format!("Focus score:   {}\n", stats.focus_score));
    out.push_str(&format!("Sessions:      {}\n", stats.session_count));
    out.push_str(&format!("Cards studied: {}\n", stats.cards_studied));
    out
}
