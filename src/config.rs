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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;

pub const CONFIG_FILE_NAME: &str = "zerocard.toml";

/// Collection settings, read from `zerocard.toml` in the collection
/// directory. Every field is optional.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The port the study server listens on.
    pub port: u16,
    /// Whether to open a browser when a study session starts.
    pub open_browser: bool,
    /// Whether a fresh collection starts with the sample cards.
    pub seed_sample_cards: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            open_browser: true,
            seed_sample_cards: true,
        }
    }
}

impl Config {
    /// Load the config from a collection directory, falling back to the
    /// defaults if there is no config file.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::debug!("No {CONFIG_FILE_NAME}, using defaults.");
            return Ok(Self::default());
        }
        let content = read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        log::debug!("Loaded config: {config:?}");
        Ok(config)
    }
}
