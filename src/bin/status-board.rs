// Terminal status board: polls the subway status API and redraws the cards.
// Press Enter to refresh right away.

use anyhow::Context;
use chrono::Local;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;

use subway_status::poller::{StatusPoller, POLL_INTERVAL};
use subway_status::render::StatusBoard;
use subway_status::settings::BoardSettings;
use subway_status::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let settings = BoardSettings::load().context("Failed to load board settings")?;
    info!(
        "🚇 Polling {} every {}s",
        settings.status_board_endpoint,
        POLL_INTERVAL.as_secs()
    );

    let (manual_tx, manual_rx) = mpsc::channel(1);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(_)) = lines.next_line().await {
            // A refresh is already queued when the channel is full
            let _ = manual_tx.try_send(());
        }
    });

    let poller = StatusPoller::new(settings.status_board_endpoint);
    let mut board = StatusBoard::new();

    poller
        .run(&mut board, manual_rx, |board| {
            println!("\n═══ Subway status (polled {}) ═══", Local::now().format("%H:%M:%S"));
            print!("{}", board.to_text());
        })
        .await;

    Ok(())
}
