//! [`Bitboard`] is the storage of [`crate::chess::position::Position`]: one
//! 64-bit integer per set of squares. Bitboard utilizes the fact that modern
//! processors operate on 64 bit integers, so set operations over all squares
//! of the board are performed simultaneously. The disadvantage is
//! inefficiency of some operations like "get piece type on given square"
//! (efficiently handled by Square-centric board implementations), which
//! requires testing the square against every set.
//!
//! [Bitboard]: https://www.chessprogramming.org/Bitboards

use std::fmt::{self, Write};
use std::mem;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not, Sub};

use anyhow::{bail, Context};
use itertools::Itertools;
use log::trace;
use strum::IntoEnumIterator;

use crate::chess::core::{File, Rank, Square, BOARD_SIZE, BOARD_WIDTH};

/// Represents a set of squares and provides common operations (e.g. AND, OR,
/// difference) over these sets. Each bit corresponds to one of 64 squares of
/// the chess board.
///
/// Mirroring [`Square`] semantics, the least significant bit corresponds to
/// A1, and the most significant bit - to H8.
///
/// Bitboard is a thin wrapper around [u64].
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bitboard {
    bits: u64,
}

impl Bitboard {
    /// Constructs Bitboard from pre-calculated bits.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    /// Constructs a bitboard representing empty set of squares.
    #[must_use]
    pub const fn empty() -> Self {
        Self::from_bits(0)
    }

    /// Returns raw bits.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.bits
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn from_squares(squares: &[Square]) -> Self {
        let mut result = Self::empty();
        for square in squares {
            result |= Self::from(*square);
        }
        result
    }

    /// Returns true if this bitboard contains given square.
    #[must_use]
    pub const fn contains(self, square: Square) -> bool {
        (self.bits & (1u64 << square as u8)) != 0
    }

    /// Number of squares in the set.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }

    /// Returns true if no square belongs to both sets.
    #[must_use]
    pub const fn is_disjoint(self, other: Self) -> bool {
        self.bits & other.bits == 0
    }

    /// An efficient way to iterate over the set squares.
    #[must_use]
    pub const fn iter(self) -> BitboardIterator {
        BitboardIterator { bits: self.bits }
    }
}

impl fmt::Debug for Bitboard {
    /// Dumps the set as an 8x8 grid of `1` (member) and `.` (not a member)
    /// with rank 8 on top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            format!("{:#066b}", self.bits)
                .chars()
                .rev()
                .take(BOARD_SIZE as usize)
                .chunks(BOARD_WIDTH as usize)
                .into_iter()
                .map(|chunk| chunk
                    .map(|ch| match ch {
                        '1' => '1',
                        '0' => '.',
                        _ => unreachable!(),
                    })
                    .join(SQUARE_SEPARATOR))
                .collect::<Vec<String>>()
                .iter()
                .rev()
                .join(LINE_SEPARATOR)
        )
    }
}

impl fmt::Display for Bitboard {
    /// Draws the set as a diagram of filled (member) and hollow squares with
    /// rank 8 on top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                f.write_char(if self.contains(Square::new(file, rank)) {
                    OCCUPIED_GLYPH
                } else {
                    VACANT_GLYPH
                })?;
            }
            if rank != Rank::One {
                f.write_str(LINE_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

impl TryFrom<&str> for Bitboard {
    type Error = anyhow::Error;

    /// Parses a bitboard literal: `0x`-prefixed hexadecimal, `0b`-prefixed
    /// binary or `0d`-prefixed decimal. Digits can be grouped with `_`.
    ///
    /// ```
    /// use boardstate::chess::bitboard::Bitboard;
    ///
    /// assert_eq!(Bitboard::try_from("0xFF00").unwrap().bits(), 0xFF00);
    /// assert_eq!(Bitboard::try_from("0b1000_0001").unwrap().bits(), 0x81);
    /// assert_eq!(Bitboard::try_from("0d65280").unwrap().bits(), 0xFF00);
    /// ```
    ///
    /// # Errors
    ///
    /// If the prefix is missing, a character is not a digit of the radix or
    /// the digits do not form a 64-bit number.
    fn try_from(input: &str) -> anyhow::Result<Self> {
        let input = input.trim();
        let (digits, radix) = if let Some(digits) = input.strip_prefix("0x") {
            (digits, 16)
        } else if let Some(digits) = input.strip_prefix("0b") {
            (digits, 2)
        } else if let Some(digits) = input.strip_prefix("0d") {
            (digits, 10)
        } else {
            bail!("bitboard should start with '0x', '0b' or '0d', got '{input}'");
        };
        let digits = digits.replace('_', "");
        // from_str_radix would also accept a leading sign.
        if digits.is_empty() || !digits.chars().all(|ch| ch.is_digit(radix)) {
            bail!("invalid bitboard literal '{input}': expected base {radix} digits");
        }
        trace!("parsing bitboard digits '{digits}' with radix {radix}");
        let bits = u64::from_str_radix(&digits, radix)
            .with_context(|| format!("invalid bitboard literal '{input}'"))?;
        Ok(Self::from_bits(bits))
    }
}

impl fmt::Binary for Bitboard {
    /// Writes a `0b` literal of all 64 bits grouped by ranks (rank 8 first),
    /// in the same format the literal parser reads back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0b{}",
            format!("{:064b}", self.bits)
                .chars()
                .chunks(BOARD_WIDTH as usize)
                .into_iter()
                .map(|mut rank| rank.join(""))
                .join(LITERAL_SEPARATOR)
        )
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.bits.bitor(rhs.bits))
    }
}

impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits.bitor_assign(rhs.bits);
    }
}

impl BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.bits.bitand(rhs.bits))
    }
}

impl Sub for Bitboard {
    type Output = Self;

    /// [Relative component], i.e. Result = LHS \ RHS.
    ///
    /// [Relative component]: https://en.wikipedia.org/wiki/Complement_%28set_theory%29#Relative_complement
    fn sub(self, rhs: Self) -> Self::Output {
        self & !rhs
    }
}

impl Not for Bitboard {
    type Output = Self;

    /// Returns [complement
    /// set](https://en.wikipedia.org/wiki/Complement_%28set_theory%29) of Self,
    /// i.e. flipping the set squares to unset and vice versa.
    fn not(self) -> Self::Output {
        Self::from_bits(!self.bits)
    }
}

impl From<Square> for Bitboard {
    fn from(square: Square) -> Self {
        Self::from_bits(1u64 << square as u8)
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIterator;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterates over set squares in a given [Bitboard] from least significant 1
/// bits (LS1B) to most significant 1 bits (MS1B) through implementing
/// [`BitScan`] forward operation.
///
/// [BitScan]: https://www.chessprogramming.org/BitScan
#[derive(Clone, Debug)]
pub struct BitboardIterator {
    bits: u64,
}

impl Iterator for BitboardIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        // Get the LS1B and consume it from the iterator.
        let next_index = self.bits.trailing_zeros();
        self.bits ^= 1 << next_index;
        // trailing_zeros() of a non-zero u64 is always in 0..64 range.
        Some(unsafe { mem::transmute::<u8, Square>(next_index as u8) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits.count_ones() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitboardIterator {}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";
const LITERAL_SEPARATOR: &str = "_";
const OCCUPIED_GLYPH: char = '■';
const VACANT_GLYPH: char = '□';

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::Bitboard;
    use crate::chess::core::{File, Rank, Square};

    #[test]
    fn basics() {
        assert_eq!(std::mem::size_of::<Bitboard>(), 8);
        assert_eq!(Bitboard::empty().bits, u64::MIN);
        assert_eq!(Bitboard::default(), Bitboard::empty());

        assert_eq!(Bitboard::from(Square::A1).bits, 1);
        assert_eq!(Bitboard::from(Square::B1).bits, 2);
        assert_eq!(Bitboard::from(Square::D1).bits, 8);
        assert_eq!(Bitboard::from(Square::H8).bits, 1u64 << 63);

        assert_eq!(
            Bitboard::from(Square::D1) | Bitboard::from(Square::B1),
            Bitboard::from_bits(0b10 | 0b1000)
        );
        assert!(Bitboard::from_bits(0b1000).contains(Square::D1));
        assert!(!Bitboard::from_bits(0b1000).contains(Square::E1));
        assert_eq!(Rank::Two.mask().count(), 8);
        assert!(Rank::Two.mask().is_disjoint(Rank::Three.mask()));
        assert!(!File::C.mask().is_disjoint(Rank::Three.mask()));
        assert_eq!(File::C.mask() & Rank::Three.mask(), Square::C3.into());
    }

    #[test]
    fn iterator() {
        let bishops = Bitboard::from_squares(&[Square::F1, Square::C1]);

        let mut it = bishops.iter();
        assert_eq!(it.len(), 2);
        assert_eq!(it.next(), Some(Square::C1));
        assert_eq!(it.next(), Some(Square::F1));
        assert_eq!(it.next(), None);

        // The order is important here: we are iterating from least significant
        // bits to most significant bits.
        assert_eq!(
            Rank::Seven.mask().into_iter().collect::<Vec<_>>(),
            vec![
                Square::A7,
                Square::B7,
                Square::C7,
                Square::D7,
                Square::E7,
                Square::F7,
                Square::G7,
                Square::H7,
            ]
        );
        assert_eq!(Bitboard::empty().iter().next(), None);
    }

    #[test]
    fn set_ops() {
        let bitboard = Bitboard::from_squares(&[
            Square::A1,
            Square::B1,
            Square::C1,
            Square::D1,
            Square::E1,
            Square::F1,
            Square::H1,
            Square::A2,
            Square::B2,
            Square::C2,
            Square::D2,
            Square::G2,
            Square::F2,
            Square::H2,
            Square::F3,
            Square::E4,
            Square::E5,
            Square::C6,
            Square::A7,
            Square::B7,
            Square::C7,
            Square::D7,
            Square::F7,
            Square::G7,
            Square::H7,
            Square::A8,
            Square::C8,
            Square::D8,
            Square::E8,
            Square::F8,
            Square::G8,
            Square::H8,
        ]);
        assert_eq!(
            format!("{bitboard:?}"),
            "1 . 1 1 1 1 1 1\n\
            1 1 1 1 . 1 1 1\n\
            . . 1 . . . . .\n\
            . . . . 1 . . .\n\
            . . . . 1 . . .\n\
            . . . . . 1 . .\n\
            1 1 1 1 . 1 1 1\n\
            1 1 1 1 1 1 . 1"
        );
        assert_eq!(
            format!(
                "{:?}",
                bitboard - Bitboard::from_squares(&[Square::A1, Square::E4, Square::G8])
            ),
            "1 . 1 1 1 1 . 1\n\
            1 1 1 1 . 1 1 1\n\
            . . 1 . . . . .\n\
            . . . . 1 . . .\n\
            . . . . . . . .\n\
            . . . . . 1 . .\n\
            1 1 1 1 . 1 1 1\n\
            . 1 1 1 1 1 . 1"
        );
        assert_eq!(!!bitboard, bitboard);
        assert_eq!(bitboard - !bitboard, bitboard);
        assert_eq!(bitboard.count(), 32);
    }

    #[test]
    fn diagram() {
        assert_eq!(
            (Bitboard::from(Square::G5) | Bitboard::from(Square::B8)).to_string(),
            "□■□□□□□□\n\
             □□□□□□□□\n\
             □□□□□□□□\n\
             □□□□□□■□\n\
             □□□□□□□□\n\
             □□□□□□□□\n\
             □□□□□□□□\n\
             □□□□□□□□"
        );
        assert_eq!(
            (Rank::One.mask() | File::A.mask()).to_string(),
            "■□□□□□□□\n\
             ■□□□□□□□\n\
             ■□□□□□□□\n\
             ■□□□□□□□\n\
             ■□□□□□□□\n\
             ■□□□□□□□\n\
             ■□□□□□□□\n\
             ■■■■■■■■"
        );
    }

    #[test]
    fn parse() {
        assert_eq!(
            Bitboard::try_from("0x00FF_0000_0000_FF00").unwrap(),
            Rank::Two.mask() | Rank::Seven.mask()
        );
        assert_eq!(
            Bitboard::try_from("0b10000001_00000000_00000000_00000000_00000000_00000000_00000000_10000001")
                .unwrap(),
            Bitboard::from_squares(&[Square::A1, Square::H1, Square::A8, Square::H8])
        );
        assert_eq!(Bitboard::try_from(" 0x0\n").unwrap(), Bitboard::empty());
        assert_eq!(
            Bitboard::try_from("0d18446744073709551615").unwrap(),
            !Bitboard::empty()
        );
    }

    #[test]
    fn binary_literal() {
        let corners = Bitboard::from_squares(&[Square::A1, Square::H1, Square::A8, Square::H8]);
        assert_eq!(
            format!("{corners:b}"),
            "0b10000001_00000000_00000000_00000000_00000000_00000000_00000000_10000001"
        );
        assert_eq!(
            format!("{:b}", Bitboard::from(Square::B1)),
            "0b00000000_00000000_00000000_00000000_00000000_00000000_00000000_00000010"
        );
        let pawns = Rank::Two.mask() | Rank::Seven.mask();
        assert_eq!(Bitboard::try_from(format!("{pawns:b}").as_str()).unwrap(), pawns);
    }

    #[test]
    #[should_panic(expected = "bitboard should start with '0x', '0b' or '0d', got '255'")]
    fn parse_without_prefix() {
        let _ = Bitboard::try_from("255").unwrap();
    }

    #[test]
    #[should_panic(expected = "invalid bitboard literal '0b102': expected base 2 digits")]
    fn parse_wrong_digit() {
        let _ = Bitboard::try_from("0b102").unwrap();
    }

    #[test]
    #[should_panic(expected = "invalid bitboard literal '0x+FF': expected base 16 digits")]
    fn parse_sign() {
        let _ = Bitboard::try_from("0x+FF").unwrap();
    }

    #[test]
    #[should_panic(expected = "invalid bitboard literal '0b__': expected base 2 digits")]
    fn parse_no_digits() {
        let _ = Bitboard::try_from("0b__").unwrap();
    }

    #[test]
    #[should_panic(expected = "invalid bitboard literal '0x1_0000_0000_0000_0000'")]
    fn parse_overflow() {
        let _ = Bitboard::try_from("0x1_0000_0000_0000_0000").unwrap();
    }
}
