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

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::Transaction;
use rusqlite::config::DbConfig;

use crate::error::Fallible;
use crate::error::fail;
use crate::library::Library;
use crate::types::card::Card;
use crate::types::card_id::CardId;
use crate::types::deck::DeckId;
use crate::types::session::SessionStats;
use crate::types::timestamp::Timestamp;

pub struct Database {
    conn: Connection,
}

/// A completed study session, as stored.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionRecord {
    pub started_at: Timestamp,
    pub ended_at: Timestamp,
    pub correct: u32,
    pub total: u32,
    pub max_streak: u32,
    pub xp_earned: u32,
}

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        conn.set_db_config(DbConfig::SQLITE_DBCONFIG_ENABLE_FKEY, true)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating database schema");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }

    /// True if nothing has ever been stored: no decks at all.
    pub fn is_empty(&self) -> Fallible<bool> {
        let count: i64 = self
            .conn
            .query_row("select count(*) from decks;", [], |row| row.get(0))?;
        Ok(count == 0)
    }

    /// Load every deck and card.
    pub fn load_library(&self) -> Fallible<Library> {
        let mut decks = Vec::new();
        let mut stmt = self
            .conn
            .prepare("select deck_id, name from decks order by deck_id;")?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let id: DeckId = row.get(0)?;
            let name: String = row.get(1)?;
            decks.push((id, name));
        }

        let mut cards = Vec::new();
        let sql = "select card_id, deck_id, front, back, difficulty, status, confidence, created_at, last_reviewed_at, review_count from cards order by rowid;";
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            cards.push(card_from_row(row)?);
        }
        log::debug!("Loaded {} decks and {} cards", decks.len(), cards.len());
        Library::from_parts(decks, cards)
    }

    /// Store a whole library. Used to seed a fresh collection.
    pub fn save_library(&mut self, library: &Library) -> Fallible<()> {
        let tx = self.conn.transaction()?;
        for (deck_id, deck) in library.decks() {
            insert_deck(&tx, deck_id, &deck.name)?;
            for card in &deck.cards {
                insert_card(&tx, card)?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn insert_deck(&mut self, deck_id: &DeckId, name: &str) -> Fallible<()> {
        let tx = self.conn.transaction()?;
        insert_deck(&tx, deck_id, name)?;
        tx.commit()?;
        Ok(())
    }

    pub fn insert_card(&mut self, card: &Card) -> Fallible<()> {
        log::debug!("Inserting card {}", card.id);
        let tx = self.conn.transaction()?;
        insert_card(&tx, card)?;
        tx.commit()?;
        Ok(())
    }

    /// Overwrite a card's stored fields. If no card with the given id
    /// exists, returns an error.
    pub fn update_card(&mut self, card: &Card) -> Fallible<()> {
        let tx = self.conn.transaction()?;
        update_card(&tx, card)?;
        tx.commit()?;
        Ok(())
    }

    /// Store a reviewed card together with the persistent counters.
    pub fn record_review(&mut self, card: &Card, stats: &SessionStats) -> Fallible<()> {
        let tx = self.conn.transaction()?;
        update_card(&tx, card)?;
        save_progress(&tx, stats)?;
        tx.commit()?;
        Ok(())
    }

    /// Delete a card. If no card with the given id exists, returns an error.
    pub fn delete_card(&mut self, card_id: CardId) -> Fallible<()> {
        let changed = self
            .conn
            .execute("delete from cards where card_id = ?;", [card_id])?;
        if changed == 0 {
            return fail(format!("No such card: {card_id}"));
        }
        Ok(())
    }

    /// The XP and focus score carried between sessions, as the stats a new
    /// session starts from.
    pub fn load_progress(&self) -> Fallible<SessionStats> {
        let sql = "select xp, focus_score from progress where progress_id = 0;";
        let progress: Option<(u32, u32)> = self
            .conn
            .query_row(sql, [], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()?;
        Ok(match progress {
            Some((xp, focus_score)) => SessionStats::resume(xp, focus_score),
            None => SessionStats::new(),
        })
    }

    /// Save a finished session along with the persistent counters.
    pub fn save_session(&mut self, record: &SessionRecord, stats: &SessionStats) -> Fallible<()> {
        let tx = self.conn.transaction()?;
        let sql = "insert into sessions (started_at, ended_at, correct, total, max_streak, xp_earned) values (?, ?, ?, ?, ?, ?);";
        tx.execute(
            sql,
            (
                record.started_at,
                record.ended_at,
                record.correct,
                record.total,
                record.max_streak,
                record.xp_earned,
            ),
        )?;
        save_progress(&tx, stats)?;
        tx.commit()?;
        Ok(())
    }

    pub fn sessions(&self) -> Fallible<Vec<SessionRecord>> {
        let sql = "select started_at, ended_at, correct, total, max_streak, xp_earned from sessions order by started_at;";
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut sessions = Vec::new();
        while let Some(row) = rows.next()? {
            sessions.push(SessionRecord {
                started_at: row.get(0)?,
                ended_at: row.get(1)?,
                correct: row.get(2)?,
                total: row.get(3)?,
                max_streak: row.get(4)?,
                xp_earned: row.get(5)?,
            });
        }
        Ok(sessions)
    }
}

fn card_from_row(row: &Row<'_>) -> rusqlite::Result<Card> {
    Ok(Card {
        id: row.get(0)?,
        deck: row.get(1)?,
        front: row.get(2)?,
        back: row.get(3)?,
        difficulty: row.get(4)?,
        status: row.get(5)?,
        confidence: row.get(6)?,
        created: row.get(7)?,
        last_reviewed: row.get(8)?,
        review_count: row.get(9)?,
    })
}

fn insert_deck(tx: &Transaction, deck_id: &DeckId, name: &str) -> Fallible<()> {
    let sql = "insert into decks (deck_id, name) values (?, ?);";
    tx.execute(sql, (deck_id, name))?;
    Ok(())
}

fn update_card(tx: &Transaction, card: &Card) -> Fallible<()> {
    let sql = "update cards set deck_id = ?, front = ?, back = ?, difficulty = ?, status = ?, confidence = ?, last_reviewed_at = ?, review_count = ? where card_id = ?;";
    let changed = tx.execute(
        sql,
        (
            &card.deck,
            &card.front,
            &card.back,
            card.difficulty,
            card.status,
            card.confidence,
            card.last_reviewed,
            card.review_count,
            card.id,
        ),
    )?;
    if changed == 0 {
        return fail(format!("No such card: {}", card.id));
    }
    Ok(())
}

fn save_progress(tx: &Transaction, stats: &SessionStats) -> Fallible<()> {
    let sql = "insert into progress (progress_id, xp, focus_score) values (0, ?, ?) on conflict (progress_id) do update set xp = excluded.xp, focus_score = excluded.focus_score;";
    tx.execute(sql, (stats.xp, stats.focus_score))?;
    Ok(())
}

fn insert_card(tx: &Transaction, card: &Card) -> Fallible<()> {
    let sql = "insert into cards (card_id, deck_id, front, back, difficulty, status, confidence, created_at, last_reviewed_at, review_count) values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?);";
    tx.execute(
        sql,
        (
            card.id,
            &card.deck,
            &card.front,
            &card.back,
            card.difficulty,
            card.status,
            card.confidence,
            card.created,
            card.last_reviewed,
            card.review_count,
        ),
    )?;
    Ok(())
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["cards"], |row| row.get(0))?;
    Ok(count > 0)
}
