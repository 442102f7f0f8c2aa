//! Collects square names into a bitboard and prints it as a binary literal
//! that `printboard` accepts.

use anyhow::Context;
use boardstate::chess::bitboard::Bitboard;
use boardstate::chess::core::Square;
use clap::Parser;

/// Prints the bitboard holding the given squares, e.g. `readboard e2 E4`.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Config {
    /// Square names, file letters are case-insensitive.
    #[arg(required = true, num_args = 1..)]
    squares: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = Config::parse();
    let squares = config
        .squares
        .iter()
        .map(|name| {
            Square::try_from(name.to_ascii_lowercase().as_str())
                .with_context(|| format!("invalid square: {name}"))
        })
        .collect::<anyhow::Result<Vec<Square>>>()?;
    let bitboard = Bitboard::from_squares(&squares);
    log::debug!("read {} distinct squares", bitboard.count());
    println!("{bitboard:b}");
    Ok(())
}
