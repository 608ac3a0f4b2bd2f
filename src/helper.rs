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

use std::fs::create_dir_all;
use std::path::PathBuf;

use tempfile::tempdir;

use crate::error::Fallible;

/// Create an empty directory to use as a collection in tests.
pub fn create_tmp_directory() -> Fallible<PathBuf> {
    let target: PathBuf = tempdir()?.path().to_path_buf();
    create_dir_all(&target)?;
    let target = target.canonicalize()?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tmp_directory() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        assert!(dir.is_dir());
        assert_eq!(dir.read_dir()?.count(), 0);
        Ok(())
    }
}
