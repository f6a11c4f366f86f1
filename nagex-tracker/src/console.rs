//! Operator command console.
//!
//! Reads line-oriented commands from stdin and feeds them into the
//! pipeline:
//!
//! ```text
//! status <order> <code>   request a status change
//! track <order>           start polling an order
//! untrack <order>         stop polling an order
//! quit                    shut the tracker down
//! ```

use std::str::FromStr;

use tokio::io::{AsyncBufReadExt, BufReader};

use nagex_core::events::{TrackerCommand, TrackerCommandSender, UpdateRequest, UpdateRequestSender};
use nagex_sdk::objects::{OrderId, OrderStatus};

/// A parsed console command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Update(UpdateRequest),
    Tracker(TrackerCommand),
    Quit,
}

/// Parse one console line.
///
/// Empty lines parse to `None`; anything else either becomes a command
/// or an error message for the operator.
pub fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };

    let command = match verb {
        "status" => {
            let order_id = parts.next().ok_or("usage: status <order> <code>")?;
            let code = parts.next().ok_or("usage: status <order> <code>")?;
            let new_status = OrderStatus::from_str(code).map_err(|e| e.to_string())?;
            Command::Update(UpdateRequest {
                order_id: OrderId::new(order_id),
                new_status,
            })
        }
        "track" => {
            let order_id = parts.next().ok_or("usage: track <order>")?;
            Command::Tracker(TrackerCommand::Track(OrderId::new(order_id)))
        }
        "untrack" => {
            let order_id = parts.next().ok_or("usage: untrack <order>")?;
            Command::Tracker(TrackerCommand::Untrack(OrderId::new(order_id)))
        }
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {other}")),
    };

    if parts.next().is_some() {
        return Err(format!("trailing input after {verb}"));
    }
    Ok(Some(command))
}

/// Read operator commands from stdin until `quit` or end of input.
pub async fn run_console(update_tx: UpdateRequestSender, tracker_tx: TrackerCommandSender) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                tracing::info!("Console input closed");
                break;
            }
            Err(e) => {
                tracing::error!("Failed to read console input: {}", e);
                break;
            }
        };

        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(Command::Update(request))) => {
                if update_tx.send(request).await.is_err() {
                    break;
                }
            }
            Ok(Some(Command::Tracker(command))) => {
                if tracker_tx.send(command).await.is_err() {
                    break;
                }
            }
            Ok(Some(Command::Quit)) => {
                tracing::info!("Operator requested shutdown");
                break;
            }
            Err(message) => {
                tracing::warn!("{}", message);
            }
        }
    }
}
