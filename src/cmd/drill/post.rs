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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::cmd::drill::state::MutableState;
use crate::cmd::drill::state::ServerState;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;
use crate::types::response::Response;
use crate::types::timestamp::Timestamp;

#[derive(Debug, Deserialize)]
enum Action {
    Check,
    Reveal,
    Struggle,
    Think,
    Flow,
    Instant,
    Next,
    End,
}

impl Action {
    fn response(&self) -> Option<Response> {
        match self {
            Action::Struggle => Some(Response::Struggle),
            Action::Think => Some(Response::Think),
            Action::Flow => Some(Response::Flow),
            Action::Instant => Some(Response::Instant),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    #[serde(default)]
    answer: String,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Redirect {
    match action_handler(state, form).await {
        Ok(_) => {}
        Err(e) => {
            log::error!("{e}");
        }
    }
    Redirect::to("/")
}

async fn action_handler(state: ServerState, form: FormData) -> Fallible<()> {
    let mut mutable = state.acquire();
    if mutable.session.is_finished() {
        return Ok(());
    }
    let now = Timestamp::now();
    match form.action {
        Action::Check => {
            let card = current_card(&mutable)?;
            mutable.session.check(&form.answer, &card)?;
        }
        Action::Reveal => {
            mutable.session.reveal()?;
        }
        Action::Struggle | Action::Think | Action::Flow | Action::Instant => {
            let card = current_card(&mutable)?;
            let response = match form.action.response() {
                Some(response) => response,
                None => return fail("Action does not correspond to a response."),
            };
            // Saved before the session moves on, so a failed write leaves
            // the card ready to rate again.
            let rating = mutable.session.rating(card, response, now)?;
            mutable.db.record_review(&rating.card, &rating.stats)?;
            let card = mutable.session.apply(rating);
            mutable.library.replace_card(card)?;
        }
        Action::Next => {
            mutable.session.next(now)?;
            if mutable.session.is_finished() {
                finish(&mut mutable)?;
            }
        }
        Action::End => {
            mutable.session.end(now);
            finish(&mut mutable)?;
        }
    }
    Ok(())
}

fn current_card(mutable: &MutableState) -> Fallible<Card> {
    let Some(id) = mutable.session.current() else {
        return fail("No card is being studied.");
    };
    match mutable.library.card(id) {
        Some(card) => Ok(card.clone()),
        None => fail(format!("Card {id} is missing from the library.")),
    }
}

fn finish(mutable: &mut MutableState) -> Fallible<()> {
    let record = mutable.session.record()?;
    let stats = *mutable.session.stats();
    mutable.db.save_session(&record, &stats)?;
    log::debug!(
        "Saved session: {}/{} correct, {} XP",
        record.correct,
        record.total,
        record.xp_earned
    );
    Ok(())
}
