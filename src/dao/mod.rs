/// Item and board persistence behind the [`board_store::BingoStore`] trait.
pub mod board_store;
/// Database model definitions.
pub mod models;
/// Storage abstraction layer shared by all backends.
pub mod storage;
