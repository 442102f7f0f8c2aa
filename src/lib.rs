//! Static chess board representation built on [bitboards]: where the pieces
//! are and what occupies any given square.
//!
//! ```
//! use boardstate::chess::core::Square;
//! use boardstate::chess::position::Position;
//!
//! let position = Position::starting();
//! let square = Square::try_from(60u8).unwrap();
//! assert_eq!(position.piece_at(square).unwrap().to_string(), "k");
//! ```
//!
//! [bitboards]: https://www.chessprogramming.org/Bitboards

pub mod chess;

use shadow_rs::shadow;

shadow!(build);

/// Build type and target. Produced by `build.rs`.
const FEATURES: &str = include_str!(concat!(env!("OUT_DIR"), "/features"));

/// Returns the full version that can be used to identify how the binary was
/// built in the first place.
fn version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints the version and the features the binary was built with.
pub fn print_build_info() {
    println!("boardstate {}", version());
    println!("Release build: {}", !cfg!(debug_assertions));
    println!("Features: {FEATURES}");
    println!();
}
