use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Bingo Board Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::board::fresh_board,
        crate::routes::board::create_board,
        crate::routes::board::list_boards,
        crate::routes::board::get_board,
        crate::routes::board::toggle_cell,
        crate::routes::board::select_cell,
        crate::routes::board::reset_board,
        crate::routes::board::toggle_visibility,
        crate::routes::item::list_items,
        crate::routes::item::create_item,
        crate::routes::item::update_item,
        crate::routes::item::delete_item,
        crate::routes::sse::board_stream,
        crate::routes::websocket::ws_handler,
    ),
    components(
        schemas(
            crate::board::Board,
            crate::board::Cell,
            crate::dto::health::HealthResponse,
            crate::dto::board::FreshBoardResponse,
            crate::dto::board::CreateBoardRequest,
            crate::dto::board::BoardSummary,
            crate::dto::board::BoardDetail,
            crate::dto::board::EventAck,
            crate::dto::item::ItemDto,
            crate::dto::item::CreateItemRequest,
            crate::dto::item::UpdateItemRequest,
            crate::dto::ws::BoardInboundMessage,
            crate::dto::ws::BoardEvent,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "board", description = "Board derivation and persistence"),
        (name = "item", description = "Item CRUD"),
        (name = "events", description = "Board room event relay"),
    )
)]
pub struct ApiDoc;
