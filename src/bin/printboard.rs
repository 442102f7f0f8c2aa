//! Draws a single bitboard given as a hexadecimal, binary or decimal literal.

use anyhow::Context;
use boardstate::chess::bitboard::Bitboard;
use clap::Parser;

/// Draws a bitboard: filled squares are members of the set, rank 8 is on top.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Config {
    /// Bitboard literal, e.g. 0x00FF_0000_0000_FF00, 0b1000_0001 or 0d255.
    board: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = Config::parse();
    let bitboard = Bitboard::try_from(config.board.as_str())
        .with_context(|| format!("can not draw '{}'", config.board))?;
    println!("{bitboard}");
    Ok(())
}
