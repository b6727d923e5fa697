use serde::Serialize;

use crate::dto::ws::BoardEvent;

#[derive(Clone, Debug)]
/// Dispatched payload carried on the SSE mirror of a board room.
pub struct ServerEvent {
    pub event: Option<String>,
    pub data: String,
}

impl ServerEvent {
    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }

    /// Mirror a relayed board event, using its kind as the SSE event name.
    pub fn from_board_event(event: &BoardEvent) -> serde_json::Result<Self> {
        Self::json(event.kind().to_owned(), event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_events_carry_kind_and_tagged_json() {
        let event = ServerEvent::from_board_event(&BoardEvent::ResetBoard).unwrap();
        assert_eq!(event.event.as_deref(), Some("resetBoard"));
        assert_eq!(event.data, r#"{"type":"resetBoard"}"#);
    }
}
