//! Provides [`Position`]: a static arrangement of pieces on the board stored as
//! [piece-centric] bitboards and queried square by square.
//!
//! [piece-centric]: https://www.chessprogramming.org/Pieces_versus_Squares

use std::fmt::{self, Write};

use anyhow::bail;
use itertools::Itertools;
use log::debug;
use strum::IntoEnumIterator;

use crate::chess::bitboard::Bitboard;
use crate::chess::core::{glyph, File, Piece, PieceKind, Player, Rank, Square, BOARD_WIDTH};

/// Snapshot of the board: two occupancy sets (one per color) and six piece
/// kind sets shared by both colors. The identity of a square is the
/// intersection of its color and its kind.
///
/// A [`Position`] is immutable: it is produced by [`Position::starting`],
/// [`Position::empty`] or [`Position::new`] and then only queried. Every
/// constructor upholds these invariants:
///
/// - No square belongs to both occupancy sets.
/// - No square belongs to two piece kind sets.
/// - A square is in some occupancy set if and only if it is in some piece kind
///   set.
///
/// ```
/// use boardstate::chess::core::{Piece, PieceKind, Player, Square};
/// use boardstate::chess::position::Position;
///
/// let position = Position::starting();
/// assert_eq!(
///     position.piece_at(Square::D1),
///     Some(Piece::new(Player::White, PieceKind::Queen))
/// );
/// assert!(position.is_empty_at(Square::E4));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    white: Bitboard,
    black: Bitboard,
    pawns: Bitboard,
    knights: Bitboard,
    bishops: Bitboard,
    rooks: Bitboard,
    queens: Bitboard,
    kings: Bitboard,
}

impl Position {
    /// Creates the starting position of the standard chess variant. Each call
    /// returns a fresh value.
    ///
    /// ```
    /// use boardstate::chess::position::Position;
    ///
    /// assert_eq!(
    ///     format!("{:?}", Position::starting()),
    ///     "r n b q k b n r\n\
    ///      p p p p p p p p\n\
    ///      . . . . . . . .\n\
    ///      . . . . . . . .\n\
    ///      . . . . . . . .\n\
    ///      . . . . . . . .\n\
    ///      P P P P P P P P\n\
    ///      R N B Q K B N R"
    /// );
    /// ```
    #[must_use]
    pub const fn starting() -> Self {
        Self {
            white: Bitboard::from_bits(0x0000_0000_0000_FFFF),
            black: Bitboard::from_bits(0xFFFF_0000_0000_0000),
            pawns: Bitboard::from_bits(0x00FF_0000_0000_FF00),
            knights: Bitboard::from_bits(0x4200_0000_0000_0042),
            bishops: Bitboard::from_bits(0x2400_0000_0000_0024),
            rooks: Bitboard::from_bits(0x8100_0000_0000_0081),
            queens: Bitboard::from_bits(0x0800_0000_0000_0008),
            kings: Bitboard::from_bits(0x1000_0000_0000_0010),
        }
    }

    /// Creates a board without any pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            white: Bitboard::empty(),
            black: Bitboard::empty(),
            pawns: Bitboard::empty(),
            knights: Bitboard::empty(),
            bishops: Bitboard::empty(),
            rooks: Bitboard::empty(),
            queens: Bitboard::empty(),
            kings: Bitboard::empty(),
        }
    }

    /// Assembles a position from the occupancy sets of both players and the
    /// squares of each piece kind.
    ///
    /// # Errors
    ///
    /// Reports the first square that breaks one of the [`Position`]
    /// invariants.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        white: Bitboard,
        black: Bitboard,
        pawns: Bitboard,
        knights: Bitboard,
        bishops: Bitboard,
        rooks: Bitboard,
        queens: Bitboard,
        kings: Bitboard,
    ) -> anyhow::Result<Self> {
        let position = Self {
            white,
            black,
            pawns,
            knights,
            bishops,
            rooks,
            queens,
            kings,
        };
        position
            .validate()
            .inspect_err(|error| debug!("rejected position: {error}"))?;
        Ok(position)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let kinds = PieceKind::iter().fold(Bitboard::empty(), |all, kind| all | self.pieces(kind));
        // Kind sets are pairwise disjoint iff their sizes add up to the size of
        // their union.
        let kinds_disjoint =
            PieceKind::iter().map(|kind| self.pieces(kind).count()).sum::<u32>() == kinds.count();
        if self.white.is_disjoint(self.black) && kinds_disjoint && kinds == self.occupied() {
            return Ok(());
        }
        if let Some(square) = (self.white & self.black).iter().next() {
            bail!("square {square} is occupied by both players");
        }
        for (first, second) in PieceKind::iter().tuple_combinations() {
            if let Some(square) = (self.pieces(first) & self.pieces(second)).iter().next() {
                bail!("square {square} holds both a {first} and a {second}");
            }
        }
        for kind in PieceKind::iter() {
            if let Some(square) = (self.pieces(kind) - self.occupied()).iter().next() {
                bail!("square {square} holds a {kind} without an owner");
            }
        }
        for player in Player::iter() {
            if let Some(square) = (self.occupancy(player) - kinds).iter().next() {
                bail!("square {square} is occupied by {player} but holds no piece");
            }
        }
        Ok(())
    }

    /// Squares occupied by pieces of the given player.
    #[must_use]
    pub const fn occupancy(&self, player: Player) -> Bitboard {
        match player {
            Player::White => self.white,
            Player::Black => self.black,
        }
    }

    /// Squares occupied by pieces of the given kind, regardless of their
    /// owner.
    #[must_use]
    pub const fn pieces(&self, kind: PieceKind) -> Bitboard {
        match kind {
            PieceKind::Pawn => self.pawns,
            PieceKind::Knight => self.knights,
            PieceKind::Bishop => self.bishops,
            PieceKind::Rook => self.rooks,
            PieceKind::Queen => self.queens,
            PieceKind::King => self.kings,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.white | self.black
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn empty_squares(&self) -> Bitboard {
        !self.occupied()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_white_at(&self, square: Square) -> bool {
        self.white.contains(square)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_black_at(&self, square: Square) -> bool {
        self.black.contains(square)
    }

    /// Returns true if neither player has a piece on the square.
    #[must_use]
    pub const fn is_empty_at(&self, square: Square) -> bool {
        !self.is_white_at(square) && !self.is_black_at(square)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_kind_at(&self, kind: PieceKind, square: Square) -> bool {
        self.pieces(kind).contains(square)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_pawn_at(&self, square: Square) -> bool {
        self.pawns.contains(square)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_knight_at(&self, square: Square) -> bool {
        self.knights.contains(square)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_bishop_at(&self, square: Square) -> bool {
        self.bishops.contains(square)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_rook_at(&self, square: Square) -> bool {
        self.rooks.contains(square)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_queen_at(&self, square: Square) -> bool {
        self.queens.contains(square)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_king_at(&self, square: Square) -> bool {
        self.kings.contains(square)
    }

    /// Color of the piece on the square: White is checked first.
    #[must_use]
    pub const fn owner_at(&self, square: Square) -> Option<Player> {
        if self.is_white_at(square) {
            Some(Player::White)
        } else if self.is_black_at(square) {
            Some(Player::Black)
        } else {
            None
        }
    }

    /// Kind of the piece on the square. Kinds are tested in [`PieceKind`]
    /// declaration order and the first match wins.
    #[must_use]
    pub fn kind_at(&self, square: Square) -> Option<PieceKind> {
        PieceKind::iter().find(|kind| self.is_kind_at(*kind, square))
    }

    /// Returns the piece on the square or `None` if it is empty.
    ///
    /// This is a scan over the occupancy and piece kind sets, which is
    /// slower than lookups in a square-centric board. Prefer the set
    /// accessors for bulk operations.
    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        match (self.owner_at(square), self.kind_at(square)) {
            (Some(owner), Some(kind)) => Some(Piece::new(owner, kind)),
            (None, _) => None,
            (Some(owner), None) => {
                unreachable!("square {square} is occupied by {owner} but holds no piece")
            },
        }
    }

    /// Iterates over occupied squares (from A1 to H8) and the pieces on them.
    pub fn squares(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied()
            .iter()
            .filter_map(move |square| self.piece_at(square).map(|piece| (square, piece)))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

impl fmt::Display for Position {
    /// Draws the board with chess glyphs, one line per rank. Squares are
    /// written in index order, so the first line is rank 1 and the board is
    /// seen from Black's side.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for square in Square::iter() {
            if square.index() != 0 && square.index() % BOARD_WIDTH == 0 {
                f.write_str(LINE_SEPARATOR)?;
            }
            f.write_char(glyph(self.piece_at(square)))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Position {
    /// Dumps the board in a simple format ('.' for empty square, FEN algebraic
    /// symbol for piece) a-la Stockfish "debug" command in UCI mode.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{piece}"),
                    None => f.write_char('.'),
                }?;
                if file != File::H {
                    f.write_str(SQUARE_SEPARATOR)?;
                }
            }
            if rank != Rank::One {
                f.write_str(LINE_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";
