use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"), version = env!("BITCHESS_VERSION"), about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    /// Config file [default: ./bitchess.toml if present]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Console log level, overrides the config file
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Also write debug logs to a file in the temp directory
    #[arg(long, global = true, default_value = "false")]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a board layout
    Show {
        /// Layout keyword: classic, r, pawns, randompawns, slide, empty
        #[arg(short = 'L', long)]
        layout: Option<String>,
    },

    /// Print the destinations of the piece on a square
    Moves {
        #[arg(short = 'L', long)]
        layout: Option<String>,
        /// Algebraic square, e.g. e2
        #[arg(short, long)]
        square: String,
        /// Pawn plane of the previous position, in hex, for en passant
        #[arg(short, long)]
        previous_pawns: Option<String>,
    },

    /// Print one ray quantity from a square
    Ray {
        #[arg(short, long)]
        square: String,
        /// n, ne, e, se, s, sw, w, nw
        #[arg(short, long)]
        direction: String,
        #[arg(short = 'L', long)]
        layout: Option<String>,
        #[arg(short, long, value_enum, default_value_t = RayKind::Attack)]
        kind: RayKind,
    },

    /// Move pieces around interactively
    Play {
        #[arg(short = 'L', long)]
        layout: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RayKind {
    /// The square and everything beyond it, ignoring pieces
    Fill,
    /// Everything beyond the square, ignoring pieces
    Span,
    /// The nearest piece along the ray
    Block,
    /// Where a slider on the square could go
    Attack,
}

#[derive(Parser, Debug)]
#[command(name = "game_cmd", no_binary_name = true)]
pub struct GameCommand {
    #[command(subcommand)]
    pub cmd: GameSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum GameSubcommand {
    /// Make a move on the board
    #[clap(visible_alias = "m")]
    Move { from: String, to: String },

    /// Show where the piece on a square can go
    #[clap(visible_alias = "g")]
    Moves { square: String },

    /// Show every move of one side [default: white]
    #[clap(visible_alias = "a")]
    All { side: Option<String> },

    /// Print the current board state
    #[clap(visible_alias = "p")]
    Print,

    /// Undo the last move
    #[clap(visible_alias = "u")]
    Undo,

    /// Redo an undone move
    #[clap(visible_alias = "r")]
    Redo,

    /// Save the game history to a TOML file
    #[clap(visible_alias = "s")]
    Save { filename: String },

    /// Load a game history from a TOML file
    #[clap(visible_alias = "l")]
    Load { filename: String },

    /// Change the console log level
    #[clap(visible_alias = "v")]
    Log { level: String },

    /// Clear screen
    #[clap(visible_alias = "c")]
    Clear,

    /// Quit game
    #[clap(visible_alias = "q")]
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_command_parsing() {
        let cmd = GameCommand::try_parse_from(["m", "e2", "e4"]).unwrap();
        assert!(matches!(cmd.cmd, GameSubcommand::Move { ref from, ref to } if from == "e2" && to == "e4"));
        let cmd = GameCommand::try_parse_from(["undo"]).unwrap();
        assert!(matches!(cmd.cmd, GameSubcommand::Undo));
        assert!(GameCommand::try_parse_from(["castle"]).is_err());
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["bitchess", "ray", "-s", "e4", "-d", "ne", "-k", "fill"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Ray {
                kind: RayKind::Fill,
                ..
            })
        ));
        let cli = Cli::try_parse_from(["bitchess", "show", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }
}
