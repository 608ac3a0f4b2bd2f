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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::PreEscaped;
use maud::html;

use crate::cmd::drill::state::ServerState;
use crate::cmd::drill::template::page_template;
use crate::markdown::markdown_to_html;
use crate::markdown::markdown_to_html_inline;
use crate::similarity::Band;
use crate::similarity::percent;
use crate::study::AnswerCheck;
use crate::study::Phase;
use crate::study::Session;
use crate::types::card::Card;
use crate::types::response::Response;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut mutable = state.acquire();
    let notice = mutable.session.take_notice();
    let card: Option<Card> = mutable
        .session
        .current()
        .and_then(|id| mutable.library.card(id))
        .cloned();
    let html = match card {
        None => page_template("Session Complete", render_completed(&mutable.session)),
        Some(card) => {
            let deck_name = mutable
                .library
                .deck(&card.deck)
                .map(|deck| deck.name.clone())
                .unwrap_or_else(|| card.deck.to_string());
            let body = render_card(&mutable.session, &card, &deck_name, notice);
            page_template(&deck_name, body)
        }
    };
    (StatusCode::OK, Html(html.into_string()))
}

fn render_completed(session: &Session) -> Markup {
    let stats = session.stats();
    html! {
        div.finished {
            h1 {
                "Session Complete!"
            }
            ul.summary {
                li { "Cards studied: " (stats.total) }
                li { "Accuracy: " (stats.accuracy()) "%" }
                li { "Best streak: " (stats.max_streak) }
                li { "XP earned: " (session.xp_earned()) }
                li { "Total XP: " (stats.xp) }
            }
        }
    }
}

fn render_card(session: &Session, card: &Card, deck_name: &str, notice: Option<String>) -> Markup {
    let (position, total) = session.position();
    let stats = session.stats();
    let front = markdown_to_html(&card.front);
    let back = markdown_to_html(&card.back);
    let content: Markup = match session.phase() {
        Phase::Question => html! {
            div.content {
                div.question.rich-text {
                    (PreEscaped(front))
                }
            }
        },
        Phase::Answered(Some(check)) => html! {
            div.content {
                div.question.rich-text {
                    (PreEscaped(front))
                }
                (render_comparison(check, &markdown_to_html_inline(&card.back)))
            }
        },
        Phase::Answered(None) | Phase::Rated(_) | Phase::Finished(_) => html! {
            div.content {
                div.question.rich-text {
                    (PreEscaped(front))
                }
                div.answer.rich-text {
                    (PreEscaped(back))
                }
            }
        },
    };
    let controls: Markup = match session.phase() {
        Phase::Question => html! {
            form action="/" method="post" {
                textarea id="answer" name="answer" rows="3" placeholder="Type your answer" autofocus {}
                div.buttons {
                    input id="check" type="submit" name="action" value="Check";
                    input id="reveal" type="submit" name="action" value="Reveal";
                    div.spacer {}
                    input id="end" type="submit" name="action" value="End";
                }
            }
        },
        Phase::Answered(_) => html! {
            form action="/" method="post" {
                div.buttons {
                    @for response in Response::ALL {
                        input id=(response.as_str()) type="submit" name="action" value=(button_label(response));
                    }
                    div.spacer {}
                    input id="end" type="submit" name="action" value="End";
                }
            }
        },
        Phase::Rated(_) | Phase::Finished(_) => html! {
            form action="/" method="post" {
                div.buttons {
                    input id="next" type="submit" name="action" value="Next";
                    div.spacer {}
                    input id="end" type="submit" name="action" value="End";
                }
            }
        },
    };
    html! {
        div.root {
            @if let Some(notice) = notice {
                div.notice {
                    (notice)
                }
            }
            div.card {
                div.header {
                    h1 {
                        (deck_name)
                    }
                    div.progress {
                        (format!("{position} / {total}"))
                    }
                    div.counters {
                        span.streak { "Streak: " (stats.streak) }
                        span.xp { "XP: " (stats.xp) }
                        span.focus { "Focus: " (stats.focus_score) }
                    }
                }
                (content)
                div.controls {
                    (controls)
                }
            }
        }
    }
}

fn render_comparison(check: &AnswerCheck, back: &str) -> Markup {
    let band = Band::of(check.score);
    html! {
        div.comparison {
            div.user-answer {
                div.label { "Your Answer:" }
                div.text { (check.answer) }
            }
            div.correct-answer {
                div.label { "Correct Answer:" }
                div.text.rich-text { (PreEscaped(back)) }
            }
            div class=(format!("similarity {}", band.css_class())) {
                (format!(
                    "{} ({}% match) - {}",
                    band.label(),
                    percent(check.score),
                    band.encouragement()
                ))
            }
        }
    }
}

fn button_label(response: Response) -> &'static str {
    match response {
        Response::Struggle => "Struggle",
        Response::Think => "Think",
        Response::Flow => "Flow",
        Response::Instant => "Instant",
    }
}
