#![no_main]
use boardstate::chess::bitboard::Bitboard;
use boardstate::chess::core::Square;
use boardstate::chess::position::Position;
use libfuzzer_sys::fuzz_target;
use strum::IntoEnumIterator;

fuzz_target!(|sets: [u64; 8]| {
    let [white, black, pawns, knights, bishops, rooks, queens, kings] = sets.map(Bitboard::from_bits);
    // Accepted positions must classify every square without panicking.
    if let Ok(position) = Position::new(white, black, pawns, knights, bishops, rooks, queens, kings) {
        for square in Square::iter() {
            assert_eq!(position.is_empty_at(square), position.piece_at(square).is_none());
        }
    }
});
