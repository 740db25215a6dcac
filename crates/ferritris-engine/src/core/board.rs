use super::{
    BOARD_HEIGHT, BOARD_WIDTH,
    piece::{BlockOffsets, PieceKind, Point},
};

/// One board row; `None` is an empty cell, `Some(kind)` a locked block.
pub type Row = [Option<PieceKind>; BOARD_WIDTH];

/// The fixed 10×20 occupancy grid of locked, settled blocks.
///
/// The grid only ever changes through [`place`](Self::place) and
/// [`remove_lines`](Self::remove_lines); collision checks and line
/// detection are read-only. The active falling piece is *not* part of the
/// board — it is merged in by `place` when it locks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [Row; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const EMPTY: Self = Self {
        rows: [[None; BOARD_WIDTH]; BOARD_HEIGHT],
    };

    /// Converts a point to grid indices, or `None` when outside the board.
    fn cell_index(p: Point) -> Option<(usize, usize)> {
        let x = usize::try_from(p.x).ok()?;
        let y = usize::try_from(p.y).ok()?;
        (x < BOARD_WIDTH && y < BOARD_HEIGHT).then_some((y, x))
    }

    #[must_use]
    pub fn is_inside(p: Point) -> bool {
        Self::cell_index(p).is_some()
    }

    /// Whether `p` blocks movement. Positions outside the board count as
    /// occupied.
    #[must_use]
    pub fn is_occupied(&self, p: Point) -> bool {
        match Self::cell_index(p) {
            Some((y, x)) => self.rows[y][x].is_some(),
            None => true,
        }
    }

    /// Collision check for a full piece footprint.
    ///
    /// Rejects any block with X outside the board or Y at or below the
    /// floor. Negative Y is valid — it is a piece still entering from
    /// above — as long as the column is in range.
    #[must_use]
    pub fn is_valid_position(&self, blocks: &BlockOffsets) -> bool {
        blocks.iter().all(|&p| {
            let Ok(x) = usize::try_from(p.x) else {
                return false;
            };
            if x >= BOARD_WIDTH {
                return false;
            }
            if p.y < 0 {
                return true;
            }
            match usize::try_from(p.y) {
                Ok(y) if y < BOARD_HEIGHT => self.rows[y][x].is_none(),
                _ => false,
            }
        })
    }

    /// Writes `kind` into every in-bounds cell covered by the piece.
    ///
    /// Cells above the board (negative Y) are skipped; a legally locked
    /// piece never has any.
    pub fn place(&mut self, blocks: &BlockOffsets, kind: PieceKind) {
        for &p in blocks {
            if let Some((y, x)) = Self::cell_index(p) {
                self.rows[y][x] = Some(kind);
            }
        }
    }

    /// Returns the row indices (top to bottom) where every cell is
    /// occupied. Does not mutate the board.
    #[must_use]
    pub fn full_lines(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.iter().all(Option::is_some))
            .map(|(y, _)| y)
            .collect()
    }

    /// Removes exactly the given rows, shifting the rows above each
    /// removed row down and leaving that many empty rows at the top.
    ///
    /// The rows may be given in any order and need not be contiguous;
    /// out-of-range indices are ignored. Relative order and content of
    /// the surviving rows is preserved.
    pub fn remove_lines(&mut self, lines: &[usize]) {
        let mut removed = [false; BOARD_HEIGHT];
        for &y in lines {
            if y < BOARD_HEIGHT {
                removed[y] = true;
            }
        }

        let mut write = BOARD_HEIGHT;
        for y in (0..BOARD_HEIGHT).rev() {
            if removed[y] {
                continue;
            }
            write -= 1;
            if write != y {
                self.rows[write] = self.rows[y];
            }
        }
        for row in &mut self.rows[..write] {
            *row = [None; BOARD_WIDTH];
        }
    }

    /// Read-only cell accessor for rendering.
    ///
    /// Indices must be in range; there is no bounds guarantee beyond
    /// caller discipline.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<PieceKind> {
        self.rows[y][x]
    }

    /// Iterates the rows top to bottom, for the renderer.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }
}
