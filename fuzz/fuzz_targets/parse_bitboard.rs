#![no_main]
use boardstate::chess::bitboard::Bitboard;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(bitboard) = Bitboard::try_from(s) {
            let hex = format!("{:#x}", bitboard.bits());
            assert_eq!(Bitboard::try_from(hex.as_str()).unwrap(), bitboard);
            assert_eq!(bitboard.iter().count(), bitboard.count() as usize);
        }
    }
});
