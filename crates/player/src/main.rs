//! Echoes Player - Main entry point.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use echoes_player::infrastructure::resolver::HttpResolverClient;
use echoes_player::{GameSession, Turn};
use echoes_store::SqlitePlayerRepo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "echoes_player=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let store_db = std::env::var("STORE_DB").unwrap_or_else(|_| "player_data.db".into());
    let player_id =
        std::env::var("PLAYER_ID").unwrap_or_else(|_| echoes_domain::DEFAULT_PLAYER_ID.into());

    tracing::info!("Opening player store at {}", store_db);
    let store = Arc::new(SqlitePlayerRepo::new(&store_db).await?);
    let resolver = Arc::new(HttpResolverClient::from_env());

    let (mut session, intro) = GameSession::start(&player_id, store, resolver).await;
    println!("{intro}");

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            // stdin closed, treat it like quit so nothing is lost
            match session.handle_line("quit").await {
                Turn::Say(text) | Turn::Quit(text) => println!("{text}"),
            }
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match session.handle_line(&line).await {
            Turn::Say(text) => println!("{text}"),
            Turn::Quit(text) => {
                println!("{text}");
                break;
            }
        }
    }

    Ok(())
}
