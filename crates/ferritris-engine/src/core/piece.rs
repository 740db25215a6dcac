use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use super::BOARD_WIDTH;

/// Number of cells every piece covers.
pub const PIECE_BLOCKS: usize = 4;

/// Integer cell coordinates.
///
/// X increases rightward, Y increases downward. Coordinates are signed
/// because a freshly spawned piece sits partially above the visible board
/// (negative Y) while it enters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Enum representing the type of piece.
///
/// The discriminant doubles as the color index used by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// J-piece.
    J = 3,
    /// L-piece.
    L = 4,
    /// S-piece.
    S = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(0..=6) {
            0 => PieceKind::I,
            1 => PieceKind::O,
            2 => PieceKind::T,
            3 => PieceKind::J,
            4 => PieceKind::L,
            5 => PieceKind::S,
            _ => PieceKind::Z,
        }
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece types, in color-index order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Returns the four block offsets of this piece at `rotation`,
    /// relative to the piece origin.
    ///
    /// This is a table lookup; all 28 offset sets are computed at compile
    /// time.
    #[must_use]
    pub fn block_offsets(self, rotation: Rotation) -> BlockOffsets {
        BLOCK_OFFSETS[self as usize][rotation.as_usize()]
    }
}

/// Rotation state of a piece.
///
/// One of four states (0°, 90°, 180°, 270° clockwise); stepping wraps
/// around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rotation(u8);

impl Rotation {
    /// Number of rotation states (4).
    pub const COUNT: usize = 4;

    /// All rotation states.
    pub const ALL: [Self; Self::COUNT] = [Self(0), Self(1), Self(2), Self(3)];

    #[must_use]
    pub const fn rotated(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    pub(crate) const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// The four cell offsets of one (kind, rotation) pair.
pub type BlockOffsets = [Point; PIECE_BLOCKS];

/// Rotates a block offset 90° clockwise around the `(1, 1)` pivot:
/// `(x, y) → (-y, x)` relative to the pivot.
const fn rotated_offset(p: Point) -> Point {
    let rx = p.x - 1;
    let ry = p.y - 1;
    Point::new(-ry + 1, rx + 1)
}

/// Generates all 4 rotation states from a base shape by repeatedly
/// applying the pivot rotation.
const fn offset_rotations(base: BlockOffsets) -> [BlockOffsets; Rotation::COUNT] {
    let mut rotations = [base; Rotation::COUNT];
    let mut r = 1;
    while r < Rotation::COUNT {
        let mut blocks = rotations[r - 1];
        let mut i = 0;
        while i < PIECE_BLOCKS {
            blocks[i] = rotated_offset(blocks[i]);
            i += 1;
        }
        rotations[r] = blocks;
        r += 1;
    }
    rotations
}

const BLOCK_OFFSETS: [[BlockOffsets; Rotation::COUNT]; PieceKind::LEN] = {
    const fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    [
        // I-piece
        offset_rotations([p(0, 1), p(1, 1), p(2, 1), p(3, 1)]),
        // O-piece
        offset_rotations([p(1, 0), p(2, 0), p(1, 1), p(2, 1)]),
        // T-piece
        offset_rotations([p(1, 0), p(0, 1), p(1, 1), p(2, 1)]),
        // J-piece
        offset_rotations([p(0, 0), p(0, 1), p(1, 1), p(2, 1)]),
        // L-piece
        offset_rotations([p(2, 0), p(0, 1), p(1, 1), p(2, 1)]),
        // S-piece
        offset_rotations([p(1, 0), p(2, 0), p(0, 1), p(1, 1)]),
        // Z-piece
        offset_rotations([p(0, 0), p(1, 0), p(1, 1), p(2, 1)]),
    ]
};

/// The active falling piece: a type, a rotation state, and an origin in
/// board coordinates.
///
/// Pieces are immutable; movement and rotation return new `Piece` values.
/// Validity against the board is the caller's concern — see
/// [`Board::is_valid_position`](super::Board::is_valid_position).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    rotation: Rotation,
    origin: Point,
}

impl Piece {
    /// Spawn origin: horizontally centered, one row above the board so
    /// wide pieces enter without clipping.
    #[expect(clippy::cast_possible_wrap)]
    pub const SPAWN_ORIGIN: Point = Point::new(BOARD_WIDTH as i32 / 2 - 2, -1);

    #[must_use]
    pub const fn new(kind: PieceKind, rotation: Rotation, origin: Point) -> Self {
        Self {
            kind,
            rotation,
            origin,
        }
    }

    /// Creates a piece of `kind` at the spawn position, rotation 0.
    #[must_use]
    pub const fn spawn(kind: PieceKind) -> Self {
        Self::new(kind, Rotation(0), Self::SPAWN_ORIGIN)
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub const fn origin(&self) -> Point {
        self.origin
    }

    /// Returns the four absolute cell positions covered by the piece.
    #[must_use]
    pub fn blocks(&self) -> BlockOffsets {
        self.kind
            .block_offsets(self.rotation)
            .map(|offset| self.origin.translated(offset.x, offset.y))
    }

    #[must_use]
    pub const fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.kind, self.rotation, self.origin.translated(dx, dy))
    }

    #[must_use]
    pub const fn left(&self) -> Self {
        self.shifted(-1, 0)
    }

    #[must_use]
    pub const fn right(&self) -> Self {
        self.shifted(1, 0)
    }

    #[must_use]
    pub const fn down(&self) -> Self {
        self.shifted(0, 1)
    }

    #[must_use]
    pub const fn rotated(&self) -> Self {
        Self::new(self.kind, self.rotation.rotated(), self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset_set(blocks: BlockOffsets) -> Vec<(i32, i32)> {
        let mut set: Vec<_> = blocks.iter().map(|p| (p.x, p.y)).collect();
        set.sort_unstable();
        set
    }

    #[test]
    fn test_every_shape_has_four_distinct_cells() {
        for kind in PieceKind::ALL {
            for rotation in Rotation::ALL {
                let set = offset_set(kind.block_offsets(rotation));
                let mut deduped = set.clone();
                deduped.dedup();
                assert_eq!(
                    deduped.len(),
                    PIECE_BLOCKS,
                    "{kind:?} at {rotation:?} has duplicate cells: {set:?}",
                );
            }
        }
    }

    #[test]
    fn test_base_shapes_match_rotation_zero() {
        let i_blocks = PieceKind::I.block_offsets(Rotation::default());
        assert_eq!(
            offset_set(i_blocks),
            vec![(0, 1), (1, 1), (2, 1), (3, 1)],
        );

        let o_blocks = PieceKind::O.block_offsets(Rotation::default());
        assert_eq!(
            offset_set(o_blocks),
            vec![(1, 0), (1, 1), (2, 0), (2, 1)],
        );
    }

    #[test]
    fn test_t_piece_clockwise_rotation() {
        // T base {(1,0),(0,1),(1,1),(2,1)} rotated once around (1,1)
        // becomes {(2,1),(1,0),(1,1),(1,2)}.
        let rotated = PieceKind::T.block_offsets(Rotation(1));
        assert_eq!(
            offset_set(rotated),
            vec![(1, 0), (1, 1), (1, 2), (2, 1)],
        );
    }

    #[test]
    fn test_rotation_wraps_modulo_four() {
        let mut rotation = Rotation::default();
        for _ in 0..4 {
            rotation = rotation.rotated();
        }
        assert_eq!(rotation, Rotation::default());
    }

    #[test]
    fn test_four_rotations_return_to_base_shape() {
        for kind in PieceKind::ALL {
            let base = offset_set(kind.block_offsets(Rotation(0)));
            let mut piece = Piece::spawn(kind);
            for _ in 0..4 {
                piece = piece.rotated();
            }
            assert_eq!(piece.rotation(), Rotation(0));
            assert_eq!(offset_set(kind.block_offsets(piece.rotation())), base);
        }
    }

    #[test]
    fn test_spawn_position() {
        let piece = Piece::spawn(PieceKind::O);
        assert_eq!(piece.origin(), Point::new(3, -1));
        assert_eq!(piece.rotation(), Rotation::default());

        // Spawn blocks straddle the top edge of the board.
        let blocks = piece.blocks();
        assert!(blocks.iter().any(|p| p.y < 0));
        assert!(blocks.iter().all(|p| p.y < 2));
    }

    #[test]
    fn test_movement_shifts_origin_by_one_cell() {
        let piece = Piece::spawn(PieceKind::T);
        assert_eq!(piece.left().origin(), Point::new(2, -1));
        assert_eq!(piece.right().origin(), Point::new(4, -1));
        assert_eq!(piece.down().origin(), Point::new(3, 0));
    }
}
