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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::db::Database;
use crate::library::Library;
use crate::study::Session;

#[derive(Clone)]
pub struct ServerState {
    pub mutable: Arc<Mutex<MutableState>>,
}

pub struct MutableState {
    pub db: Database,
    pub library: Library,
    pub session: Session,
}

impl ServerState {
    pub fn acquire(&self) -> MutexGuard<'_, MutableState> {
        // A handler that panicked leaves the session as it was; keep serving.
        self.mutable.lock().unwrap_or_else(|e| e.into_inner())
    }
}
