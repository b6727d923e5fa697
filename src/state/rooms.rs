use dashmap::DashMap;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::dto::ws::BoardEvent;

/// Registry of per-board broadcast channels.
///
/// Delivery is always scoped: an event published to one board reaches only
/// that board's subscribers. The relay is a stateless fan-out with no
/// ordering or delivery guarantees; subscribers that join after an event was
/// published never see it.
pub struct RoomHub {
    capacity: usize,
    rooms: DashMap<Uuid, broadcast::Sender<BoardEvent>>,
}

impl RoomHub {
    /// Create a hub whose room channels buffer up to `capacity` events per
    /// subscriber before lagging.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            rooms: DashMap::new(),
        }
    }

    /// Register a subscriber on a board's room, creating the room lazily.
    pub fn subscribe(&self, board_id: Uuid) -> broadcast::Receiver<BoardEvent> {
        self.rooms
            .entry(board_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    /// Fan an event out to the current subscribers of one board's room.
    ///
    /// Returns the number of subscribers the event was handed to; zero when
    /// the room does not exist or is empty.
    pub fn publish(&self, board_id: Uuid, event: BoardEvent) -> usize {
        match self.rooms.get(&board_id) {
            Some(sender) => sender.send(event).unwrap_or(0),
            None => 0,
        }
    }

    /// Drop a room's channel once its last subscriber is gone.
    pub fn prune(&self, board_id: Uuid) {
        self.rooms
            .remove_if(&board_id, |_, sender| sender.receiver_count() == 0);
    }

    /// Number of rooms currently held open.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    fn toggle(cell: &str) -> BoardEvent {
        BoardEvent::ToggleCell {
            cell_id: cell.into(),
        }
    }

    #[tokio::test]
    async fn events_stay_inside_their_room() {
        let hub = RoomHub::new(8);
        let board_a = Uuid::new_v4();
        let board_b = Uuid::new_v4();

        let mut rx_a = hub.subscribe(board_a);
        let mut rx_b = hub.subscribe(board_b);

        assert_eq!(hub.publish(board_a, toggle("r0-c1")), 1);

        assert_eq!(rx_a.try_recv().unwrap(), toggle("r0-c1"));
        assert!(matches!(rx_b.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn all_subscribers_of_a_room_receive_the_event() {
        let hub = RoomHub::new(8);
        let board = Uuid::new_v4();

        let mut first = hub.subscribe(board);
        let mut second = hub.subscribe(board);

        assert_eq!(hub.publish(board, BoardEvent::ResetBoard), 2);
        assert_eq!(first.try_recv().unwrap(), BoardEvent::ResetBoard);
        assert_eq!(second.try_recv().unwrap(), BoardEvent::ResetBoard);
    }

    #[tokio::test]
    async fn late_subscribers_miss_earlier_events() {
        let hub = RoomHub::new(8);
        let board = Uuid::new_v4();

        let _early = hub.subscribe(board);
        hub.publish(board, BoardEvent::ToggleVisibility);

        let mut late = hub.subscribe(board);
        assert!(matches!(late.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn publish_without_room_reaches_nobody() {
        let hub = RoomHub::new(8);
        assert_eq!(hub.publish(Uuid::new_v4(), BoardEvent::ResetBoard), 0);
        assert_eq!(hub.room_count(), 0);
    }

    #[tokio::test]
    async fn prune_removes_only_empty_rooms() {
        let hub = RoomHub::new(8);
        let board = Uuid::new_v4();

        let rx = hub.subscribe(board);
        hub.prune(board);
        assert_eq!(hub.room_count(), 1);

        drop(rx);
        hub.prune(board);
        assert_eq!(hub.room_count(), 0);
    }
}
