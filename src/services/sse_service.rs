use std::{convert::Infallible, time::Duration};

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dto::{sse::ServerEvent, ws::BoardEvent},
    state::SharedState,
};

/// Subscribe to the event stream of one board's room.
pub fn subscribe_room(state: &SharedState, board_id: Uuid) -> broadcast::Receiver<BoardEvent> {
    state.rooms().subscribe(board_id)
}

/// Convert a room subscription into an SSE response, mirroring relay events
/// and cleaning the room up once the client disconnects.
pub fn to_sse_stream(
    mut receiver: broadcast::Receiver<BoardEvent>,
    state: SharedState,
    board_id: Uuid,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // small bounded channel between forwarder and response
    let (tx, rx) = mpsc::channel::<Result<Event, Infallible>>(8);

    // forwarder task: reads from the room and pushes into the mpsc
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = tx.closed() => break,
                recv_result = receiver.recv() => {
                    match recv_result {
                        Ok(payload) => {
                            let event = match ServerEvent::from_board_event(&payload) {
                                Ok(server_event) => {
                                    let mut event = Event::default().data(server_event.data);
                                    if let Some(name) = server_event.event {
                                        event = event.event(name);
                                    }
                                    event
                                }
                                Err(err) => {
                                    warn!(%board_id, error = %err, "failed to serialize SSE event");
                                    continue;
                                }
                            };

                            if tx.send(Ok(event)).await.is_err() {
                                break;
                            }
                        }
                        Err(RecvError::Closed) => break,
                        Err(RecvError::Lagged(_)) => {
                            // Skip lagged messages but keep the stream alive.
                            continue;
                        }
                    }
                }
            }
        }

        // Receiver must go before pruning, otherwise the room still counts
        // this stream as a subscriber.
        drop(receiver);
        state.rooms().prune(board_id);
        info!(%board_id, "board SSE stream disconnected");
    });

    Sse::new(ReceiverStream::new(rx)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
