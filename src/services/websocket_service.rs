use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use tokio::{
    sync::{broadcast::error::RecvError, mpsc},
    task::JoinHandle,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    dto::ws::{BoardEvent, BoardInboundMessage},
    state::SharedState,
};

/// How long a fresh connection may take to send its join frame.
const JOIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Handle the full lifecycle of one board viewer's WebSocket connection.
///
/// The first frame must scope the connection to a board room; every later
/// event frame is relayed verbatim to that room, including back to the
/// sender. Nothing is persisted and no per-cell state is kept server side.
pub async fn handle_socket(state: SharedState, socket: WebSocket) {
    let (mut sender, mut receiver) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();

    // Dedicated writer task keeps outbound messages flowing even while we await inbound frames.
    let writer_task = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            if sender.send(message).await.is_err() {
                break;
            }
        }
    });

    let initial_message = match tokio::time::timeout(JOIN_TIMEOUT, receiver.next()).await {
        Ok(Some(Ok(Message::Text(text)))) => text,
        Ok(Some(Ok(Message::Close(_)))) => {
            finalize(writer_task, outbound_tx).await;
            return;
        }
        Ok(Some(Ok(_))) => {
            let _ = outbound_tx.send(Message::Close(None));
            finalize(writer_task, outbound_tx).await;
            return;
        }
        Ok(Some(Err(err))) => {
            warn!(error = %err, "websocket receive error");
            finalize(writer_task, outbound_tx).await;
            return;
        }
        Ok(None) => {
            debug!("websocket closed before joining");
            finalize(writer_task, outbound_tx).await;
            return;
        }
        Err(_) => {
            warn!("websocket join timed out");
            finalize(writer_task, outbound_tx).await;
            return;
        }
    };

    let inbound = match BoardInboundMessage::from_json_str(&initial_message) {
        Ok(message) => message,
        Err(err) => {
            warn!(error = %err, "failed to parse board message");
            let _ = outbound_tx.send(Message::Close(None));
            finalize(writer_task, outbound_tx).await;
            return;
        }
    };

    let BoardInboundMessage::Join { board_id } = inbound else {
        warn!("first message was not a join");
        let _ = outbound_tx.send(Message::Close(None));
        finalize(writer_task, outbound_tx).await;
        return;
    };

    let room_rx = state.rooms().subscribe(board_id);
    let forward_task = spawn_room_forwarder(room_rx, outbound_tx.clone(), board_id);

    if send_event(&outbound_tx, &BoardEvent::Joined { board_id }).is_err() {
        info!(%board_id, "connection closed during join acknowledgement");
        stop_forwarder(forward_task).await;
        state.rooms().prune(board_id);
        finalize(writer_task, outbound_tx).await;
        return;
    }

    info!(%board_id, "viewer joined board room");

    while let Some(message) = receiver.next().await {
        match message {
            Ok(Message::Text(text)) => match BoardInboundMessage::from_json_str(&text) {
                Ok(BoardInboundMessage::Join { .. }) => {
                    warn!(%board_id, "ignoring duplicate join message");
                }
                Ok(message) => {
                    if let Some(event) = relay_event(message) {
                        let delivered = state.rooms().publish(board_id, event.clone());
                        debug!(%board_id, kind = event.kind(), delivered, "relayed board event");
                    }
                }
                Err(err) => {
                    warn!(%board_id, error = %err, "failed to parse board message");
                }
            },
            Ok(Message::Ping(payload)) => {
                let _ = outbound_tx.send(Message::Pong(payload));
            }
            Ok(Message::Close(frame)) => {
                info!(%board_id, "viewer closed");
                let _ = outbound_tx.send(Message::Close(frame));
                break;
            }
            Ok(Message::Binary(_)) => {}
            Ok(Message::Pong(_)) => {}
            Err(err) => {
                warn!(%board_id, error = %err, "websocket error");
                break;
            }
        }
    }

    stop_forwarder(forward_task).await;
    state.rooms().prune(board_id);
    info!(%board_id, "viewer left board room");

    finalize(writer_task, outbound_tx).await;
}

/// Stop the room forwarder and wait until it has released its subscription.
///
/// The forwarder owns the room receiver; pruning before the task has fully
/// wound down would still count it as a subscriber and leave the room
/// registered.
async fn stop_forwarder(forward_task: JoinHandle<()>) {
    forward_task.abort();
    let _ = forward_task.await;
}

/// Forward room events to this connection's writer until either side closes.
fn spawn_room_forwarder(
    mut room_rx: tokio::sync::broadcast::Receiver<BoardEvent>,
    outbound_tx: mpsc::UnboundedSender<Message>,
    board_id: Uuid,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match room_rx.recv().await {
                Ok(event) => {
                    if send_event(&outbound_tx, &event).is_err() {
                        break;
                    }
                }
                Err(RecvError::Closed) => break,
                Err(RecvError::Lagged(skipped)) => {
                    // Best-effort relay: a slow viewer just misses events.
                    warn!(%board_id, skipped, "room subscriber lagging; events dropped");
                }
            }
        }
    })
}

/// Map an inbound frame to the event it should fan out as, if any.
fn relay_event(message: BoardInboundMessage) -> Option<BoardEvent> {
    match message {
        BoardInboundMessage::ToggleCell { cell_id } => Some(BoardEvent::ToggleCell { cell_id }),
        BoardInboundMessage::SelectCell { cell_id } => Some(BoardEvent::SelectCell { cell_id }),
        BoardInboundMessage::ResetBoard => Some(BoardEvent::ResetBoard),
        BoardInboundMessage::ToggleVisibility => Some(BoardEvent::ToggleVisibility),
        BoardInboundMessage::Join { .. } => None,
    }
}

/// Serialize an event and push it onto the connection's writer channel.
///
/// Serialization failure is a permanent error (bug in code), logged and
/// swallowed; a closed writer channel is reported so callers can tear the
/// connection down.
fn send_event(
    tx: &mpsc::UnboundedSender<Message>,
    event: &BoardEvent,
) -> Result<(), mpsc::error::SendError<Message>> {
    let payload = match serde_json::to_string(event) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(error = %err, kind = event.kind(), "failed to serialize board event");
            return Ok(());
        }
    };

    tx.send(Message::Text(payload.into()))
}

async fn finalize(writer_task: JoinHandle<()>, outbound_tx: mpsc::UnboundedSender<Message>) {
    drop(outbound_tx);
    let _ = writer_task.await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, state::AppState};

    #[tokio::test]
    async fn stopping_the_forwarder_releases_the_room() {
        let state = AppState::new(AppConfig::default());
        let board_id = Uuid::new_v4();
        let (outbound_tx, _outbound_rx) = mpsc::unbounded_channel();

        let room_rx = state.rooms().subscribe(board_id);
        let forward_task = spawn_room_forwarder(room_rx, outbound_tx, board_id);

        stop_forwarder(forward_task).await;
        state.rooms().prune(board_id);

        assert_eq!(state.rooms().room_count(), 0);
    }

    #[test]
    fn join_frames_never_fan_out() {
        assert!(relay_event(BoardInboundMessage::Join {
            board_id: Uuid::new_v4()
        })
        .is_none());
    }

    #[test]
    fn event_frames_relay_verbatim() {
        let relayed = relay_event(BoardInboundMessage::ToggleCell {
            cell_id: "r1-c2".into(),
        })
        .unwrap();
        assert_eq!(
            relayed,
            BoardEvent::ToggleCell {
                cell_id: "r1-c2".into()
            }
        );
        assert_eq!(
            relay_event(BoardInboundMessage::ResetBoard).unwrap(),
            BoardEvent::ResetBoard
        );
        assert_eq!(
            relay_event(BoardInboundMessage::ToggleVisibility).unwrap(),
            BoardEvent::ToggleVisibility
        );
    }
}
