//! Grid geometry and packed encoding for 3x3 boards.
//!
//! Cells are stored as a flat row-major array: index `row * SIDE + col`.
//! Each cell holds a tile number 1-8, or 0 for the blank.

/// Cells per side of the grid.
pub const SIDE: usize = 3;

/// Total number of cells in the grid.
pub const CELLS: usize = SIDE * SIDE;

/// Bits used per cell in a packed key. Tile values fit in a nibble.
const BITS_PER_CELL: u32 = 4;

const CELL_MASK: u64 = (1 << BITS_PER_CELL) - 1;

/// Converts (row, col) to a flat cell index.
#[inline(always)]
pub const fn cell_to_idx(row: usize, col: usize) -> usize {
    row * SIDE + col
}

/// Converts a flat cell index to (row, col).
#[inline(always)]
pub const fn idx_to_cell(cell_index: usize) -> (usize, usize) {
    (cell_index / SIDE, cell_index % SIDE)
}

/// A board packed into a single integer, 4 bits per cell.
///
/// Cell 0 sits in the lowest nibble. Two boards have the same key exactly
/// when their cells are equal, so the key can stand in for the board in
/// hash maps without hashing the whole array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardKey(u64);

impl BoardKey {
    /// Packs a cell array into a key.
    #[inline]
    pub fn pack(cells: &[u8; CELLS]) -> Self {
        let packed = cells
            .iter()
            .enumerate()
            .fold(0u64, |acc, (cell_index, &tile)| {
                acc | (tile as u64) << (cell_index as u32 * BITS_PER_CELL)
            });
        Self(packed)
    }

    /// Recovers the cell array this key was packed from.
    #[inline]
    pub fn unpack(self) -> [u8; CELLS] {
        let mut cells = [0u8; CELLS];
        for (cell_index, tile) in cells.iter_mut().enumerate() {
            *tile = ((self.0 >> (cell_index as u32 * BITS_PER_CELL)) & CELL_MASK) as u8;
        }
        cells
    }
}

/// Formats cells as a 3x3 grid, one row per line, `.` for the blank.
pub fn format_grid(cells: &[u8; CELLS]) -> String {
    let mut output = String::with_capacity(CELLS * 2);
    for row in 0..SIDE {
        for col in 0..SIDE {
            if col > 0 {
                output.push(' ');
            }
            output.push(tile_char(cells[cell_to_idx(row, col)]));
        }
        output.push('\n');
    }
    output
}

/// Formats cells on a single line, e.g. `123456780`.
pub fn format_compact(cells: &[u8; CELLS]) -> String {
    cells.iter().map(|&tile| char::from(b'0' + tile)).collect()
}

#[inline]
fn tile_char(tile: u8) -> char {
    if tile == 0 {
        '.'
    } else {
        char::from(b'0' + tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_conversion_roundtrip() {
        for idx in 0..CELLS {
            let (row, col) = idx_to_cell(idx);
            assert!(row < SIDE && col < SIDE, "idx {idx} out of grid");
            assert_eq!(cell_to_idx(row, col), idx, "Roundtrip failed for index {idx}");
        }
    }

    #[test]
    fn test_key_unpacks_to_original_cells() {
        let cells = [8, 6, 7, 2, 5, 4, 3, 0, 1];
        assert_eq!(BoardKey::pack(&cells).unpack(), cells);
    }

    #[test]
    fn test_key_distinguishes_single_swaps() {
        let goal = [1, 2, 3, 4, 5, 6, 7, 8, 0];
        let goal_key = BoardKey::pack(&goal);
        for a in 0..CELLS {
            for b in (a + 1)..CELLS {
                let mut swapped = goal;
                swapped.swap(a, b);
                assert_ne!(
                    BoardKey::pack(&swapped),
                    goal_key,
                    "swap of cells {a} and {b} collides with goal"
                );
            }
        }
    }

    #[test]
    fn test_format_grid_marks_blank() {
        let cells = [1, 2, 3, 4, 5, 6, 0, 7, 8];
        assert_eq!(format_grid(&cells), "1 2 3\n4 5 6\n. 7 8\n");
        assert_eq!(format_compact(&cells), "123456078");
    }
}
