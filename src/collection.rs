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

use std::env::current_dir;
use std::path::PathBuf;

use crate::config::Config;
use crate::db::Database;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::library::Library;
use crate::types::timestamp::Timestamp;

pub const DATABASE_FILE_NAME: &str = "zerocard.db";

/// An opened collection directory: its settings, database, and the decks
/// loaded from it.
pub struct Collection {
    pub directory: PathBuf,
    pub config: Config,
    pub db: Database,
    pub library: Library,
}

impl Collection {
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        let directory = if directory.exists() {
            directory.canonicalize()?
        } else {
            return fail("directory does not exist.");
        };

        let config = Config::load(&directory)?;

        let db_path: PathBuf = directory.join(DATABASE_FILE_NAME);
        let db_path: &str = db_path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?;
        let mut db: Database = Database::new(db_path)?;

        if db.is_empty()? {
            let library = if config.seed_sample_cards {
                log::debug!("Seeding new collection with sample cards.");
                Library::with_sample_cards(Timestamp::now())
            } else {
                Library::new()
            };
            db.save_library(&library)?;
        }

        let library = db.load_library()?;

        Ok(Self {
            directory,
            config,
            db,
            library,
        })
    }
}
