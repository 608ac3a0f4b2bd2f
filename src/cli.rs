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

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use tokio::runtime::Runtime;

use crate::cmd::add::add_card;
use crate::cmd::check::check_collection;
use crate::cmd::compare::compare_answers;
use crate::cmd::deck::create_deck;
use crate::cmd::deck::list_decks;
use crate::cmd::delete::delete_card;
use crate::cmd::drill::server::ServerConfig;
use crate::cmd::drill::server::start_server;
use crate::cmd::edit::edit_card;
use crate::cmd::export::export_collection;
use crate::cmd::list::list_cards;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_collection_stats;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::types::card::Difficulty;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Study cards in the browser.
    Drill {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Only study cards from this deck, given by name or id.
        #[arg(long)]
        deck: Option<String>,
        /// The port to serve on. Overrides the config file.
        #[arg(long)]
        port: Option<u16>,
        /// Don't open the browser.
        #[arg(long)]
        no_open: bool,
    },
    /// Create or list decks.
    Deck {
        #[command(subcommand)]
        command: DeckCommand,
    },
    /// Add a card.
    Add {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// The question.
        #[arg(long)]
        front: String,
        /// The answer.
        #[arg(long)]
        back: String,
        /// The deck to add the card to, given by name or id. By default, the default deck.
        #[arg(long)]
        deck: Option<String>,
        #[arg(long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
    },
    /// Edit a card.
    Edit {
        /// The card's ID.
        id: String,
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        #[arg(long)]
        front: Option<String>,
        #[arg(long)]
        back: Option<String>,
        #[arg(long)]
        difficulty: Option<Difficulty>,
    },
    /// Delete a card.
    Delete {
        /// The card's ID.
        id: String,
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// List cards.
    List {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Only list cards from this deck, given by name or id.
        #[arg(long)]
        deck: Option<String>,
        /// Only list cards whose question or answer contains this text.
        #[arg(long)]
        search: Option<String>,
    },
    /// Print collection statistics.
    Stats {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// Export the collection as JSON.
    Export {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Write to this file instead of standard output.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Score an answer against the correct one.
    Compare {
        /// The typed answer.
        user: String,
        /// The correct answer.
        correct: String,
    },
    /// Check that a collection directory can be opened.
    Check {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
}

#[derive(Subcommand)]
enum DeckCommand {
    /// Create a deck.
    Create {
        /// The deck's display name.
        name: String,
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// List decks.
    List {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            directory,
            deck,
            port,
            no_open,
        } => {
            let coll = Collection::new(directory)?;
            let config = ServerConfig {
                port: port.unwrap_or(coll.config.port),
                open_browser: coll.config.open_browser && !no_open,
            };
            let deck = deck.map(|deck| coll.library.resolve_deck(&deck));
            let runtime = Runtime::new()?;
            runtime.block_on(start_server(coll, deck, config))
        }
        Command::Deck { command } => match command {
            DeckCommand::Create { name, directory } => create_deck(directory, &name),
            DeckCommand::List { directory } => list_decks(directory),
        },
        Command::Add {
            directory,
            front,
            back,
            deck,
            difficulty,
        } => add_card(directory, &front, &back, deck, difficulty),
        Command::Edit {
            id,
            directory,
            front,
            back,
            difficulty,
        } => edit_card(directory, &id, front, back, difficulty),
        Command::Delete { id, directory } => delete_card(directory, &id),
        Command::List {
            directory,
            deck,
            search,
        } => list_cards(directory, deck, search),
        Command::Stats { directory, format } => print_collection_stats(directory, format),
        Command::Export { directory, output } => export_collection(directory, output),
        Command::Compare { user, correct } => {
            compare_answers(&user, &correct);
            Ok(())
        }
        Command::Check { directory } => check_collection(directory),
    }
}
