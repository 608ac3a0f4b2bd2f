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

mod get;
mod post;
pub mod server;
mod state;
mod template;

#[cfg(test)]
mod tests {
    use std::fs::write;
    use std::time::Duration;

    use reqwest::StatusCode;
    use tokio::net::TcpStream;
    use tokio::spawn;
    use tokio::time::sleep;

    use crate::cmd::drill::server::ServerConfig;
    use crate::cmd::drill::server::start_server;
    use crate::collection::Collection;
    use crate::collection::DATABASE_FILE_NAME;
    use crate::config::CONFIG_FILE_NAME;
    use crate::db::Database;
    use crate::error::Fallible;
    use crate::helper::create_tmp_directory;
    use crate::types::card::Difficulty;
    use crate::types::card::Status;
    use crate::types::deck::DeckId;
    use crate::types::timestamp::Timestamp;

    /// A collection with a single card in the default deck.
    fn single_card_collection() -> Fallible<Collection> {
        let dir = create_tmp_directory()?;
        write(dir.join(CONFIG_FILE_NAME), "seed_sample_cards = false\n")?;
        let mut coll = Collection::new(Some(dir.display().to_string()))?;
        let card = coll.library.add_card(
            &DeckId::default_deck(),
            "What is **Rust**?",
            "A systems programming language",
            Difficulty::Medium,
            Timestamp::now(),
        )?;
        coll.db.insert_card(&card)?;
        Ok(coll)
    }

    async fn wait_for(port: u16) {
        loop {
            if let Ok(stream) = TcpStream::connect(("127.0.0.1", port)).await {
                drop(stream);
                break;
            }
            sleep(Duration::from_millis(1)).await;
        }
    }

    async fn post(port: u16, form: &[(&str, &str)]) -> Fallible<String> {
        let response = reqwest::Client::new()
            .post(format!("http://127.0.0.1:{port}/"))
            .form(form)
            .send()
            .await?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        let html = response.text().await?;
        Ok(html)
    }

    #[tokio::test]
    async fn test_start_server_with_no_cards() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        write(dir.join(CONFIG_FILE_NAME), "seed_sample_cards = false\n")?;
        let coll = Collection::new(Some(dir.display().to_string()))?;
        let config = ServerConfig {
            port: portpicker::pick_unused_port().unwrap(),
            open_browser: false,
        };
        // Returns immediately instead of serving an empty session.
        start_server(coll, None, config).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_start_server_on_unknown_deck() -> Fallible<()> {
        let coll = single_card_collection()?;
        let config = ServerConfig {
            port: portpicker::pick_unused_port().unwrap(),
            open_browser: false,
        };
        let result = start_server(coll, Some(DeckId::new("herp-derp")), config).await;
        assert_eq!(
            result.err().unwrap().to_string(),
            "error: No such deck: herp-derp"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_e2e() -> Fallible<()> {
        let coll = single_card_collection()?;
        let db_path = coll.directory.join(DATABASE_FILE_NAME);
        let port = portpicker::pick_unused_port().unwrap();
        let config = ServerConfig {
            port,
            open_browser: false,
        };
        spawn(async move { start_server(coll, None, config).await });
        wait_for(port).await;

        // Hit the `style.css` endpoint.
        let response = reqwest::get(format!("http://127.0.0.1:{port}/style.css")).await?;
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        // Hit the not found endpoint.
        let response = reqwest::get(format!("http://127.0.0.1:{port}/herp-derp")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // Hit the root endpoint.
        let response = reqwest::get(format!("http://127.0.0.1:{port}/")).await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("What is <strong>Rust</strong>?"));
        assert!(html.contains("Default Deck"));
        assert!(html.contains("1 / 1"));
        assert!(!html.contains("A systems programming language"));

        // Check without typing anything.
        let html = post(port, &[("action", "Check"), ("answer", "  ")]).await?;
        assert!(html.contains("Please type your answer first"));
        assert!(!html.contains("A systems programming language"));

        // Check a matching answer.
        let html = post(
            port,
            &[("action", "Check"), ("answer", "a systems programming language!")],
        )
        .await?;
        assert!(html.contains("Excellent match! (100% match) - Great job!"));
        assert!(html.contains("A systems programming language"));
        assert!(html.contains("Instant"));

        // Rate it.
        let html = post(port, &[("action", "Flow")]).await?;
        assert!(html.contains("Next"));
        assert!(html.contains("Streak: 1"));
        assert!(html.contains("XP: 10"));

        // Rating twice does nothing.
        let html = post(port, &[("action", "Flow")]).await?;
        assert!(html.contains("XP: 10"));

        // Move on past the last card.
        let html = post(port, &[("action", "Next")]).await?;
        assert!(html.contains("Session Complete!"));
        assert!(html.contains("Cards studied: 1"));
        assert!(html.contains("Accuracy: 100%"));
        assert!(html.contains("XP earned: 10"));

        // The review and the session were saved.
        let db = Database::new(db_path.to_str().unwrap())?;
        let library = db.load_library()?;
        let card = library.all_cards().next().unwrap();
        assert_eq!(card.review_count, 1);
        assert_eq!(card.confidence.value(), 10);
        assert_eq!(card.status, Status::Review);
        assert!(card.last_reviewed.is_some());
        let sessions = db.sessions()?;
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].correct, 1);
        assert_eq!(db.load_progress()?.xp, 10);

        Ok(())
    }

    #[tokio::test]
    async fn test_reveal_and_end() -> Fallible<()> {
        let coll = single_card_collection()?;
        let db_path = coll.directory.join(DATABASE_FILE_NAME);
        let port = portpicker::pick_unused_port().unwrap();
        let config = ServerConfig {
            port,
            open_browser: false,
        };
        spawn(async move { start_server(coll, None, config).await });
        wait_for(port).await;

        // Reveal without typing an answer.
        let html = post(port, &[("action", "Reveal")]).await?;
        assert!(html.contains("A systems programming language"));
        assert!(!html.contains("match)"));

        // End before rating.
        let html = post(port, &[("action", "End")]).await?;
        assert!(html.contains("Session Complete!"));
        assert!(html.contains("Cards studied: 0"));

        let db = Database::new(db_path.to_str().unwrap())?;
        let card = db.load_library()?.all_cards().next().unwrap().clone();
        assert_eq!(card.review_count, 0);
        assert_eq!(card.status, Status::New);
        assert_eq!(db.sessions()?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_rating_survives_server_stop() -> Fallible<()> {
        let coll = single_card_collection()?;
        let db_path = coll.directory.join(DATABASE_FILE_NAME);
        let port = portpicker::pick_unused_port().unwrap();
        let config = ServerConfig {
            port,
            open_browser: false,
        };
        let handle = spawn(async move { start_server(coll, None, config).await });
        wait_for(port).await;

        post(port, &[("action", "Reveal")]).await?;
        let html = post(port, &[("action", "Instant")]).await?;
        assert!(html.contains("XP: 15"));

        // Stop the server without finishing the session.
        handle.abort();
        let _ = handle.await;

        let db = Database::new(db_path.to_str().unwrap())?;
        assert_eq!(db.load_progress()?.xp, 15);
        assert!(db.sessions()?.is_empty());
        let card = db.load_library()?.all_cards().next().unwrap().clone();
        assert_eq!(card.review_count, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_failed_save_keeps_card_unrated() -> Fallible<()> {
        let coll = single_card_collection()?;
        let db_path = coll.directory.join(DATABASE_FILE_NAME);
        let card_id = coll.library.all_cards().next().unwrap().id;
        let port = portpicker::pick_unused_port().unwrap();
        let config = ServerConfig {
            port,
            open_browser: false,
        };
        spawn(async move { start_server(coll, None, config).await });
        wait_for(port).await;

        post(port, &[("action", "Reveal")]).await?;

        // Remove the card behind the server's back so the save fails.
        let mut db = Database::new(db_path.to_str().unwrap())?;
        db.delete_card(card_id)?;

        let html = post(port, &[("action", "Flow")]).await?;
        assert!(html.contains("Instant"));
        assert!(!html.contains("id=\"next\""));
        assert!(html.contains("Streak: 0"));
        assert!(html.contains("XP: 0"));
        assert_eq!(db.load_progress()?.xp, 0);

        Ok(())
    }
}
