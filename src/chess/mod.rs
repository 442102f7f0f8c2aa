//! Implementation of the chess board: square geometry, piece identities and
//! the bitboard-backed [`position::Position`].

pub mod bitboard;
pub mod core;
pub mod position;
