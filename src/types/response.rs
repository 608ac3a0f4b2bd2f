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
use std::str::FromStr;

use crate::error::ErrorReport;
use crate::error::fail;

/// How hard it was to recall a card, as reported by the user.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Response {
    /// Could not recall, or recalled with great effort.
    Struggle,
    /// Recalled after thinking about it.
    Think,
    /// Recalled smoothly.
    Flow,
    /// Recalled immediately.
    Instant,
}

impl Response {
    pub const ALL: [Response; 4] = [
        Response::Struggle,
        Response::Think,
        Response::Flow,
        Response::Instant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Response::Struggle => "struggle",
            Response::Think => "think",
            Response::Flow => "flow",
            Response::Instant => "instant",
        }
    }

    /// Whether the response counts as a correct answer.
    pub fn is_correct(&self) -> bool {
        matches!(self, Response::Flow | Response::Instant)
    }

    pub fn confidence_delta(&self) -> i64 {
        match self {
            Response::Struggle => -15,
            Response::Think => -5,
            Response::Flow => 10,
            Response::Instant => 20,
        }
    }

    pub fn xp(&self) -> u32 {
        match self {
            Response::Struggle => 2,
            Response::Think => 5,
            Response::Flow => 10,
            Response::Instant => 15,
        }
    }
}

impl Display for Response {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Response {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "struggle" => Ok(Response::Struggle),
            "think" => Ok(Response::Think),
            "flow" => Ok(Response::Flow),
            "instant" => Ok(Response::Instant),
            _ => fail(format!("Invalid response: {s}")),
        }
    }
}
