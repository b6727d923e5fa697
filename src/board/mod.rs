//! Pure board construction and seeded shuffling.
//!
//! Everything in this module is deterministic and side-effect free; the
//! service layer feeds it item texts from whichever store is installed.

pub mod builder;
pub mod shuffle;

pub use builder::{BOARD_SIZE, Board, Cell, FREE_TEXT, ITEM_CELLS, build_board};
pub use shuffle::{SEED_LENGTH, generate_seed, seeded_shuffle};
