use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Number of rows and columns in a board.
pub const BOARD_SIZE: usize = 5;
/// Display text of the fixed center cell.
pub const FREE_TEXT: &str = "Free";
/// Number of cells filled from the item list (every cell but the center).
pub const ITEM_CELLS: usize = BOARD_SIZE * BOARD_SIZE - 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
/// One grid position of a board.
pub struct Cell {
    /// Position identifier of the form `r{row}-c{col}`.
    pub id: String,
    /// Display text shown in this cell.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
/// A 5x5 grid of cells, row-major, with the fixed "Free" cell at the center.
pub struct Board {
    rows: Vec<Vec<Cell>>,
}

impl Board {
    /// Borrow the rows of the grid in row-major order.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Look up a single cell by coordinates.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(col)
    }

    /// Iterate over all cells in row-major scan order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }
}

/// Lay an ordered item list out into a 5x5 board.
///
/// The center cell is always `Free` and consumes no item. Every other cell
/// takes the next item in scan order; once the input runs out (or an item is
/// blank) the cell falls back to `Square {n}` where `n` is the 1-based
/// consumption index. Extra items past the 24th are ignored. The input is
/// borrowed and never mutated, so building is safe to repeat with the same
/// list.
pub fn build_board<T: AsRef<str>>(items: &[T]) -> Board {
    let mut item_index = 0;
    let mut rows = Vec::with_capacity(BOARD_SIZE);

    for r in 0..BOARD_SIZE {
        let mut row = Vec::with_capacity(BOARD_SIZE);
        for c in 0..BOARD_SIZE {
            let id = format!("r{r}-c{c}");
            if r == BOARD_SIZE / 2 && c == BOARD_SIZE / 2 {
                row.push(Cell {
                    id,
                    text: FREE_TEXT.to_owned(),
                });
                continue;
            }

            let text = match items.get(item_index).map(AsRef::as_ref) {
                Some(text) if !text.is_empty() => text.to_owned(),
                _ => format!("Square {}", item_index + 1),
            };
            row.push(Cell { id, text });
            item_index += 1;
        }
        rows.push(row);
    }

    Board { rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(count: usize) -> Vec<String> {
        (0..count)
            .map(|i| char::from(b'A' + (i % 26) as u8).to_string())
            .collect()
    }

    #[test]
    fn board_is_five_by_five() {
        let board = build_board(&letters(24));
        assert_eq!(board.rows().len(), BOARD_SIZE);
        for row in board.rows() {
            assert_eq!(row.len(), BOARD_SIZE);
        }
    }

    #[test]
    fn center_cell_is_free_regardless_of_input() {
        for input in [letters(0), letters(3), letters(24), letters(40)] {
            let board = build_board(&input);
            let center = board.cell(2, 2).unwrap();
            assert_eq!(center.id, "r2-c2");
            assert_eq!(center.text, FREE_TEXT);
        }
    }

    #[test]
    fn full_input_fills_cells_in_scan_order() {
        let items = letters(24);
        let board = build_board(&items);

        let filled: Vec<&str> = board
            .cells()
            .filter(|cell| cell.id != "r2-c2")
            .map(|cell| cell.text.as_str())
            .collect();
        let expected: Vec<&str> = items.iter().map(String::as_str).collect();
        assert_eq!(filled, expected);
    }

    #[test]
    fn cell_ids_follow_coordinates_and_are_unique() {
        let board = build_board(&letters(24));
        let mut seen = std::collections::HashSet::new();
        for (r, row) in board.rows().iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                assert_eq!(cell.id, format!("r{r}-c{c}"));
                assert!(seen.insert(cell.id.clone()));
            }
        }
        assert_eq!(seen.len(), BOARD_SIZE * BOARD_SIZE);
    }

    #[test]
    fn short_input_falls_back_to_placeholders() {
        let board = build_board(&letters(3));

        let texts: Vec<&str> = board
            .cells()
            .filter(|cell| cell.id != "r2-c2")
            .map(|cell| cell.text.as_str())
            .collect();
        assert_eq!(&texts[..3], &["A", "B", "C"]);
        for (offset, text) in texts[3..].iter().enumerate() {
            assert_eq!(*text, format!("Square {}", offset + 4));
        }
        assert_eq!(texts.last().copied(), Some("Square 24"));
    }

    #[test]
    fn empty_input_yields_all_placeholders() {
        let board = build_board::<String>(&[]);

        let texts: Vec<&str> = board
            .cells()
            .filter(|cell| cell.id != "r2-c2")
            .map(|cell| cell.text.as_str())
            .collect();
        assert_eq!(texts.len(), ITEM_CELLS);
        for (offset, text) in texts.iter().enumerate() {
            assert_eq!(*text, format!("Square {}", offset + 1));
        }
    }

    #[test]
    fn blank_item_consumes_its_slot_but_shows_placeholder() {
        let items = vec!["A".to_owned(), String::new(), "C".to_owned()];
        let board = build_board(&items);

        let texts: Vec<&str> = board
            .cells()
            .filter(|cell| cell.id != "r2-c2")
            .map(|cell| cell.text.as_str())
            .collect();
        assert_eq!(&texts[..3], &["A", "Square 2", "C"]);
    }

    #[test]
    fn extra_items_are_ignored() {
        let items = letters(30);
        let board = build_board(&items);

        let filled: Vec<&str> = board
            .cells()
            .filter(|cell| cell.id != "r2-c2")
            .map(|cell| cell.text.as_str())
            .collect();
        assert_eq!(filled.len(), ITEM_CELLS);
        assert_eq!(filled.last().copied(), Some("X"));
    }

    #[test]
    fn input_is_left_untouched() {
        let items = letters(10);
        let snapshot = items.clone();
        let _ = build_board(&items);
        assert_eq!(items, snapshot);
    }
}
