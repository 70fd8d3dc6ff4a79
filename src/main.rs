use std::io::{BufRead, Write};

use bitchess::prelude::*;
use clap::Parser;
use tracing::{Level, span};

fn main() -> miette::Result<()> {
    init();

    let main_span = span!(Level::DEBUG, "main");
    let _guard = main_span.enter();

    let cli = Cli::parse();
    let config = Config::discover(cli.config.as_deref())?;

    if let Some(level) = config.effective_level(cli.log_level.as_deref())? {
        set_log_level(level)?;
    }
    if cli.log_file || config.file_logging {
        toggle_file_logging(true)?;
        if let Some(path) = log_file_path() {
            info!("Writing debug logs to {}", path.display());
        }
    }

    match cli.command {
        Some(Commands::Show { layout }) => {
            let board = board_for(&config, layout.as_deref())?;
            print!("{board}");
        }
        Some(Commands::Moves {
            layout,
            square,
            previous_pawns,
        }) => {
            let board = board_for(&config, layout.as_deref())?;
            let square = Square::from_str(&square)?;
            let previous = match previous_pawns {
                Some(hex) => parse_hex(&hex)?,
                None => board.piece_bb(Piece::Pawn),
            };
            let moves = generate_moves(&board, square, previous)?;
            print_moves(&board, square, moves);
        }
        Some(Commands::Ray {
            square,
            direction,
            layout,
            kind,
        }) => {
            let board = board_for(&config, layout.as_deref())?;
            let square = Square::from_str(&square)?;
            let direction = Direction::from_str(&direction)?;
            let result = match kind {
                RayKind::Fill => fill(square.mask(), direction),
                RayKind::Span => span(square.mask(), direction),
                RayKind::Block => {
                    let occupants = span(square.mask(), direction) & board.occupancy();
                    block(occupants, direction)
                }
                RayKind::Attack => move_gen::sliding_attack(&board, square, direction),
            };
            println!("{kind:?} {direction} from {square}: {result}");
            print!("{}", result.print_bitboard());
        }
        Some(Commands::Play { layout }) => {
            let board = board_for(&config, layout.as_deref())?;
            game_loop(board)?;
        }
        None => {
            println!("Starting default game");
            game_loop(config.board()?)?;
        }
    }
    Ok(())
}

fn board_for(config: &Config, layout: Option<&str>) -> miette::Result<Board> {
    match layout {
        Some(keyword) => Ok(config.board_for(Layout::from_str(keyword)?)),
        None => config.board(),
    }
}

fn parse_hex(raw: &str) -> miette::Result<BitBoard> {
    let digits = raw.trim_start_matches("0x").trim_start_matches("0X");
    u64::from_str_radix(digits, 16)
        .map(BitBoard)
        .into_diagnostic()
        .with_context(|| format!("{raw:?} is not a hex bitboard"))
}

fn print_moves(board: &Board, square: Square, moves: BitBoard) {
    if let Some((piece, side)) = board.piece_info_at(square) {
        println!("{side} {piece} on {square}: {moves}");
    }
    print!("{}", moves.print_bitboard());
    let targets: Vec<String> = moves.squares().map(|s| s.to_string()).collect();
    println!("{}", targets.join(" "));
}

fn game_loop(board: Board) -> miette::Result<()> {
    let mut history = GameHistory::new(board);
    println!("{}", history.current());

    let stdin = std::io::stdin();
    let mut input = String::new();
    loop {
        print!("> ");
        std::io::stdout().flush().into_diagnostic()?;
        input.clear();
        if stdin.lock().read_line(&mut input).into_diagnostic()? == 0 {
            break;
        }

        let args = match shell_words::split(input.trim()) {
            Ok(args) if args.is_empty() => continue,
            Ok(args) => args,
            Err(e) => {
                error!("Could not parse input: {e}");
                continue;
            }
        };
        let command = match GameCommand::try_parse_from(args) {
            Ok(command) => command,
            Err(e) => {
                // Covers `help` as well as genuine mistakes
                let _ = e.print();
                continue;
            }
        };

        match run_command(&mut history, command.cmd) {
            Ok(true) => break,
            Ok(false) => {}
            Err(report) => eprintln!("{report:?}"),
        }
    }
    Ok(())
}

/// Runs one interactive command. Returns `true` when the loop should end.
fn run_command(history: &mut GameHistory, cmd: GameSubcommand) -> miette::Result<bool> {
    match cmd {
        GameSubcommand::Move { from, to } => {
            let from = Square::from_str(&from)?;
            let to = Square::from_str(&to)?;
            let board = history.apply_move(from, to)?;
            println!("{board}");
        }
        GameSubcommand::Moves { square } => {
            let square = Square::from_str(&square)?;
            let moves = history.moves_from(square)?;
            print_moves(history.current(), square, moves);
        }
        GameSubcommand::All { side } => {
            let side = match side {
                Some(name) => Side::from_str(&name)?,
                None => Side::White,
            };
            let board = history.current();
            let previous = history.previous_pawns();
            for (square, moves) in move_gen::moves_for_side(board, side, previous)? {
                let targets: Vec<String> = moves.squares().map(|s| s.to_string()).collect();
                println!("{square}: {}", targets.join(" "));
            }
        }
        GameSubcommand::Print => println!("{}", history.current()),
        GameSubcommand::Undo => println!("{}", history.undo()?),
        GameSubcommand::Redo => println!("{}", history.redo()?),
        GameSubcommand::Save { filename } => history.save(filename)?,
        GameSubcommand::Load { filename } => {
            *history = GameHistory::load(filename)?;
            println!("{}", history.current());
        }
        GameSubcommand::Log { level } => {
            set_log_level(parse_level(&level)?)?;
        }
        GameSubcommand::Clear => utils::clear_screen()?,
        GameSubcommand::Quit => return Ok(true),
    }
    Ok(false)
}
