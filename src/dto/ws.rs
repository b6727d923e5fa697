use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::validation::validate_cell_id;

/// Failure modes when decoding an inbound WebSocket frame.
#[derive(Debug, Error)]
pub enum MessageParseError {
    /// Payload was not valid JSON for any known message shape.
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
    /// Payload decoded but carries a cell id outside the grid.
    #[error("invalid cell id `{0}`")]
    InvalidCellId(String),
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
/// Messages accepted from board WebSocket clients.
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BoardInboundMessage {
    /// Scope this connection to one board's room. Must be the first frame.
    #[serde(rename_all = "camelCase")]
    Join { board_id: Uuid },
    /// A viewer toggled the marked state of a cell.
    #[serde(rename_all = "camelCase")]
    ToggleCell { cell_id: String },
    /// A viewer highlighted a cell without toggling it.
    #[serde(rename_all = "camelCase")]
    SelectCell { cell_id: String },
    /// Clear every marked cell on the board.
    ResetBoard,
    /// Show or hide the board for everyone in the room.
    ToggleVisibility,
}

impl BoardInboundMessage {
    /// Parse and validate an inbound frame.
    pub fn from_json_str(payload: &str) -> Result<Self, MessageParseError> {
        let message: Self = serde_json::from_str(payload)?;
        if let Some(cell_id) = message.cell_id()
            && validate_cell_id(cell_id).is_err()
        {
            return Err(MessageParseError::InvalidCellId(cell_id.to_owned()));
        }
        Ok(message)
    }

    /// The cell id carried by this message, if any.
    pub fn cell_id(&self) -> Option<&str> {
        match self {
            Self::ToggleCell { cell_id } | Self::SelectCell { cell_id } => Some(cell_id.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
/// Events fanned out to every subscriber of a board room.
///
/// The relay forwards these verbatim; no toggle state is kept server-side
/// and subscribers maintain their own view of the board.
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BoardEvent {
    /// Acknowledgement sent to a single client after a successful join.
    #[serde(rename_all = "camelCase")]
    Joined { board_id: Uuid },
    /// A cell's marked state flipped.
    #[serde(rename_all = "camelCase")]
    ToggleCell { cell_id: String },
    /// A cell was highlighted.
    #[serde(rename_all = "camelCase")]
    SelectCell { cell_id: String },
    /// All marks cleared.
    ResetBoard,
    /// Board visibility flipped.
    ToggleVisibility,
}

impl BoardEvent {
    /// Stable event name used for SSE event fields and logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Joined { .. } => "joined",
            Self::ToggleCell { .. } => "toggleCell",
            Self::SelectCell { .. } => "selectCell",
            Self::ResetBoard => "resetBoard",
            Self::ToggleVisibility => "toggleVisibility",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_frame_parses() {
        let board_id = Uuid::new_v4();
        let payload = format!(r#"{{"type":"join","boardId":"{board_id}"}}"#);
        match BoardInboundMessage::from_json_str(&payload).unwrap() {
            BoardInboundMessage::Join { board_id: parsed } => assert_eq!(parsed, board_id),
            other => panic!("expected join, got {other:?}"),
        }
    }

    #[test]
    fn toggle_frame_parses_and_validates_cell_id() {
        let message =
            BoardInboundMessage::from_json_str(r#"{"type":"toggleCell","cellId":"r1-c3"}"#)
                .unwrap();
        assert_eq!(message.cell_id(), Some("r1-c3"));

        let err =
            BoardInboundMessage::from_json_str(r#"{"type":"toggleCell","cellId":"r7-c3"}"#)
                .unwrap_err();
        assert!(matches!(err, MessageParseError::InvalidCellId(id) if id == "r7-c3"));
    }

    #[test]
    fn payload_free_frames_parse() {
        assert!(matches!(
            BoardInboundMessage::from_json_str(r#"{"type":"resetBoard"}"#).unwrap(),
            BoardInboundMessage::ResetBoard
        ));
        assert!(matches!(
            BoardInboundMessage::from_json_str(r#"{"type":"toggleVisibility"}"#).unwrap(),
            BoardInboundMessage::ToggleVisibility
        ));
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(matches!(
            BoardInboundMessage::from_json_str(r#"{"type":"shout"}"#),
            Err(MessageParseError::Json(_))
        ));
    }

    #[test]
    fn events_serialize_with_camel_case_tags() {
        let event = BoardEvent::ToggleCell {
            cell_id: "r0-c4".into(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"toggleCell","cellId":"r0-c4"}"#);
        assert_eq!(event.kind(), "toggleCell");
    }
}
