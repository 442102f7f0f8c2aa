//! Chess primitives commonly used within [`crate::chess`]: board geometry,
//! players, piece kinds and the glyph table used to render them.

use std::fmt::{self, Write};
use std::mem;

use anyhow::{anyhow, bail};
use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::chess::bitboard::Bitboard;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// Board squares: from left to right, from bottom to the top ([Little-Endian
/// Rank-File Mapping]):
///
/// ```
/// use boardstate::chess::core::Square;
///
/// assert_eq!(Square::A1 as u8, 0);
/// assert_eq!(Square::E1 as u8, 4);
/// assert_eq!(Square::H1 as u8, 7);
/// assert_eq!(Square::A4 as u8, 8 * 3);
/// assert_eq!(Square::H8 as u8, 63);
/// ```
///
/// Square is a compact representation using only one byte.
///
/// ```
/// use boardstate::chess::core::Square;
///
/// assert_eq!(std::mem::size_of::<Square>(), 1);
/// ```
///
/// [Little-Endian Rank-File Mapping]: https://www.chessprogramming.org/Square_Mapping_Considerations#LittleEndianRankFileMapping
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter)]
#[rustfmt::skip]
#[allow(missing_docs)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    /// Connects file (column) and rank (row) to form a full square.
    #[must_use]
    pub const fn new(file: File, rank: Rank) -> Self {
        unsafe { mem::transmute(file as u8 + (rank as u8) * BOARD_WIDTH) }
    }

    /// Returns file (column) on which the square is located.
    #[must_use]
    pub const fn file(self) -> File {
        unsafe { mem::transmute(self as u8 % BOARD_WIDTH) }
    }

    /// Returns rank (row) on which the square is located.
    #[must_use]
    pub const fn rank(self) -> Rank {
        unsafe { mem::transmute(self as u8 / BOARD_WIDTH) }
    }

    /// Index of the square in 0..[`BOARD_SIZE`], which is also the index of
    /// the corresponding bit in a [`Bitboard`].
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Square {
    type Error = anyhow::Error;

    /// Creates a square given its position on the board.
    ///
    /// # Errors
    ///
    /// If given square index is outside 0..[`BOARD_SIZE`] range.
    fn try_from(square_index: u8) -> anyhow::Result<Self> {
        // Exclusive range patterns are not allowed:
        // https://github.com/rust-lang/rust/issues/37854
        const MAX_INDEX: u8 = BOARD_SIZE - 1;
        match square_index {
            0..=MAX_INDEX => Ok(unsafe { mem::transmute::<u8, Self>(square_index) }),
            _ => bail!("square index should be in 0..BOARD_SIZE, got {square_index}"),
        }
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    fn try_from(square: &str) -> anyhow::Result<Self> {
        let Some((file, rank)) = square.chars().collect_tuple() else {
            bail!(
                "square should be two-char, got {square} with {} chars",
                square.chars().count()
            );
        };
        Ok(Self::new(file.try_into()?, rank.try_into()?))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// Represents a column (vertical row) of the chessboard. In chess notation, it
/// is normally represented with a lowercase letter.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, strum::EnumIter)]
#[allow(missing_docs)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    /// Returns a bitboard with all squares of this file set.
    #[must_use]
    pub const fn mask(self) -> Bitboard {
        Bitboard::from_bits(0x0101_0101_0101_0101 << self as u8)
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char((b'a' + *self as u8) as char)
    }
}

impl TryFrom<char> for File {
    type Error = anyhow::Error;

    fn try_from(file: char) -> anyhow::Result<Self> {
        match file {
            'a'..='h' => Ok(unsafe { mem::transmute::<u8, Self>(file as u8 - b'a') }),
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        }
    }
}

/// Represents a horizontal row of the chessboard. In chess notation, it is
/// represented with a number. The implementation assumes zero-based values
/// (i.e. rank 1 would be 0).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, strum::EnumIter)]
#[allow(missing_docs)]
pub enum Rank {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
}

impl Rank {
    /// Returns a bitboard with all squares of this rank set.
    #[must_use]
    pub const fn mask(self) -> Bitboard {
        Bitboard::from_bits(0xFF << (self as u8 * BOARD_WIDTH))
    }
}

impl TryFrom<char> for Rank {
    type Error = anyhow::Error;

    fn try_from(rank: char) -> anyhow::Result<Self> {
        match rank {
            '1'..='8' => Ok(unsafe { mem::transmute::<u8, Self>(rank as u8 - b'1') }),
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8 + 1)
    }
}

/// A standard game of chess is played between two players: White and Black.
/// The player owning a piece is its color.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Player {
    White,
    Black,
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::White => "white",
            Self::Black => "black",
        })
    }
}

/// Standard [chess pieces].
///
/// The declaration order is the order in which the kind of a square is
/// classified: pawn first, king last.
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter)]
pub enum PieceKind {
    Pawn = 1,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Lowercase algebraic symbol of the piece kind.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        })
    }
}

/// Represents a specific piece owned by a player: the identity of an occupied
/// square. An empty square has no piece, so the full identity of a square is
/// `Option<Piece>` with exactly 13 possible values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    #[allow(missing_docs)]
    pub owner: Player,
    #[allow(missing_docs)]
    pub kind: PieceKind,
}

impl Piece {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(owner: Player, kind: PieceKind) -> Self {
        Self { owner, kind }
    }

    /// Returns the Unicode chess symbol of the piece.
    ///
    /// ```
    /// use boardstate::chess::core::{Piece, PieceKind, Player};
    ///
    /// assert_eq!(Piece::new(Player::White, PieceKind::King).glyph(), '♔');
    /// assert_eq!(Piece::new(Player::Black, PieceKind::Pawn).glyph(), '♟');
    /// ```
    #[must_use]
    pub const fn glyph(self) -> char {
        match (self.owner, self.kind) {
            (Player::White, PieceKind::Pawn) => '♙',
            (Player::White, PieceKind::Knight) => '♘',
            (Player::White, PieceKind::Bishop) => '♗',
            (Player::White, PieceKind::Rook) => '♖',
            (Player::White, PieceKind::Queen) => '♕',
            (Player::White, PieceKind::King) => '♔',
            (Player::Black, PieceKind::Pawn) => '♟',
            (Player::Black, PieceKind::Knight) => '♞',
            (Player::Black, PieceKind::Bishop) => '♝',
            (Player::Black, PieceKind::Rook) => '♜',
            (Player::Black, PieceKind::Queen) => '♛',
            (Player::Black, PieceKind::King) => '♚',
        }
    }
}

impl fmt::Display for Piece {
    /// Algebraic symbol: uppercase for White, lowercase for Black.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.kind.symbol();
        f.write_char(match self.owner {
            Player::White => symbol.to_ascii_uppercase(),
            Player::Black => symbol,
        })
    }
}

/// Glyph of a square with no piece on it.
pub const EMPTY_SQUARE_GLYPH: char = '□';

/// Maps the identity of a square to its display glyph.
#[must_use]
pub const fn glyph(piece: Option<Piece>) -> char {
    match piece {
        Some(piece) => piece.glyph(),
        None => EMPTY_SQUARE_GLYPH,
    }
}

bitflags::bitflags! {
    /// Byte-sized flag vocabulary for piece identities: one bit per color and
    /// one bit per kind. A well-formed piece has exactly one color bit and
    /// exactly one kind bit set; the flags alone can also express
    /// combinations no square can hold (e.g. both colors), which is why
    /// [`Piece`] is the type used for queries and the flags are only a
    /// conversion target.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PieceFlags: u8 {
        /// Piece owned by White.
        const WHITE = 0b1000_0000;
        /// Piece owned by Black.
        const BLACK = 0b0100_0000;
        /// Pawn.
        const PAWN = 0b0010_0000;
        /// Knight.
        const KNIGHT = 0b0001_0000;
        /// Bishop.
        const BISHOP = 0b0000_1000;
        /// Rook.
        const ROOK = 0b0000_0100;
        /// Queen.
        const QUEEN = 0b0000_0010;
        /// King.
        const KING = 0b0000_0001;
    }
}

impl From<Player> for PieceFlags {
    fn from(player: Player) -> Self {
        match player {
            Player::White => Self::WHITE,
            Player::Black => Self::BLACK,
        }
    }
}

impl From<PieceKind> for PieceFlags {
    fn from(kind: PieceKind) -> Self {
        match kind {
            PieceKind::Pawn => Self::PAWN,
            PieceKind::Knight => Self::KNIGHT,
            PieceKind::Bishop => Self::BISHOP,
            PieceKind::Rook => Self::ROOK,
            PieceKind::Queen => Self::QUEEN,
            PieceKind::King => Self::KING,
        }
    }
}

impl From<Piece> for PieceFlags {
    fn from(piece: Piece) -> Self {
        Self::from(piece.owner) | Self::from(piece.kind)
    }
}

impl TryFrom<PieceFlags> for Piece {
    type Error = anyhow::Error;

    /// Interprets the flags as a piece.
    ///
    /// # Errors
    ///
    /// Unless exactly one color flag and exactly one kind flag are set.
    fn try_from(flags: PieceFlags) -> anyhow::Result<Self> {
        let owner = Player::iter()
            .filter(|player| flags.contains(PieceFlags::from(*player)))
            .exactly_one()
            .map_err(|owners| {
                anyhow!(
                    "piece flags {flags:?} should have exactly one color, got {}",
                    owners.count()
                )
            })?;
        let kind = PieceKind::iter()
            .filter(|kind| flags.contains(PieceFlags::from(*kind)))
            .exactly_one()
            .map_err(|kinds| {
                anyhow!(
                    "piece flags {flags:?} should have exactly one kind, got {}",
                    kinds.count()
                )
            })?;
        Ok(Self::new(owner, kind))
    }
}
