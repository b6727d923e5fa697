/// Board derivation and persistent board management.
pub mod board_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Item CRUD pass-through.
pub mod item_service;
/// Server-Sent Events mirror of board rooms.
pub mod sse_service;
/// WebSocket connection and relay handling.
pub mod websocket_service;
