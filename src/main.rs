//! Renders the standard starting position.

use boardstate::chess::position::Position;
use clap::Parser;

/// Prints the standard starting arrangement of the pieces.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Config {
    /// Draw pieces with algebraic letters instead of chess glyphs.
    #[arg(long)]
    letters: bool,
}

fn main() {
    env_logger::init();
    let config = Config::parse();
    log::debug!("{config:?}");
    boardstate::print_build_info();
    let position = Position::starting();
    if config.letters {
        println!("{position:?}");
    } else {
        println!("{position}");
    }
}
