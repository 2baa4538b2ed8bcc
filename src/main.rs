//! 8-Puzzle Solver
//!
//! Builds the distance map for every board reachable from the solved
//! configuration, then answers queries against it: shortest solutions,
//! distances, and summary statistics.

use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use eight_puzzle::{Board, DistanceMap, Move, Solution, Solver};

/// Solves the 8-puzzle exactly, with shortest move sequences.
#[derive(Parser)]
#[command(name = "eight-puzzle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log propagation and reconstruction details to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a shortest move sequence that solves BOARD.
    ///
    /// BOARD is nine tiles in row-major order, 0 or _ for the blank,
    /// e.g. 123456078 or 1,2,3,4,5,6,0,7,8.
    Solve {
        board: Board,
        /// Also print the board after every move.
        #[arg(long)]
        steps: bool,
    },
    /// Print the number of moves BOARD needs.
    Distance { board: Board },
    /// Apply MOVES to BOARD and report whether the result is solved.
    ///
    /// MOVES are up, down, left, right (or u, d, l, r) for the blank.
    Check { board: Board, moves: Vec<Move> },
    /// Show how many boards sit at each distance from the goal.
    Stats,
    /// List the boards furthest from the goal.
    Hardest,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command, Solver::new) {
        Ok(text) => {
            print!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs one subcommand and returns its output.
///
/// `build_solver` is only called when the answer needs the distance map;
/// boards with odd parity are answered without it.
fn run(command: Command, build_solver: impl FnOnce() -> Solver) -> anyhow::Result<String> {
    match command {
        Command::Solve { board, steps } => {
            if !board.is_solvable() {
                debug!(board = ?board, "odd parity, skipping propagation");
                return Ok(render_solution(&board, &Solution::Unsolvable, steps));
            }
            let solution = build_solver().solve(&board)?;
            Ok(render_solution(&board, &solution, steps))
        }
        Command::Distance { board } => {
            if !board.is_solvable() {
                debug!(board = ?board, "odd parity, skipping propagation");
                return Ok(UNSOLVABLE.to_string());
            }
            Ok(render_distance(&build_solver(), &board))
        }
        Command::Check { board, moves } => {
            let end = board
                .replay(&moves)
                .with_context(|| format!("replaying {} moves", moves.len()))?;
            Ok(render_check(&end, moves.len()))
        }
        Command::Stats => Ok(render_stats(build_solver().map())),
        Command::Hardest => Ok(render_hardest(build_solver().map())),
    }
}

const UNSOLVABLE: &str = "unsolvable\n";

/// `--verbose` forces debug output; otherwise `RUST_LOG` decides, defaulting to warnings.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn render_solution(start: &Board, solution: &Solution, steps: bool) -> String {
    let mut output = format!("Start:\n{}\n", start);

    let moves = match solution {
        Solution::Moves(moves) => moves,
        Solution::Unsolvable => {
            output.push_str("unsolvable: the board has the wrong tile parity\n");
            return output;
        }
    };

    if moves.is_empty() {
        output.push_str("Already solved\n");
        return output;
    }

    let names: Vec<&str> = moves.iter().map(|mv| mv.name()).collect();
    output.push_str(&format!(
        "Solved in {} moves: {}\n",
        moves.len(),
        names.join(" ")
    ));

    if steps {
        let mut board = *start;
        for (i, &mv) in moves.iter().enumerate() {
            board = board.apply(mv);
            output.push_str(&format!("\nMove {}: {}\n{}", i + 1, mv, board));
        }
    }

    output
}

fn render_distance(solver: &Solver, board: &Board) -> String {
    match solver.distance(board) {
        Some(distance) => format!("{}\n", distance),
        None => UNSOLVABLE.to_string(),
    }
}

fn render_check(end: &Board, applied: usize) -> String {
    let verdict = if end.is_goal() { "solved" } else { "not solved" };
    format!("After {} moves:\n{}{}\n", applied, end, verdict)
}

fn render_stats(map: &DistanceMap) -> String {
    let mut output = format!("Reachable boards: {}\n", map.len());
    output.push_str(&format!("Maximum distance: {}\n\n", map.max_distance()));
    output.push_str("distance  boards\n");
    for (distance, count) in map.histogram().iter().enumerate() {
        output.push_str(&format!("{:>8}  {:>6}\n", distance, count));
    }
    output
}

fn render_hardest(map: &DistanceMap) -> String {
    let max_distance = map.max_distance();
    let boards = map.boards_at(max_distance);

    let mut output = format!("{} boards at distance {}:\n", boards.len(), max_distance);
    for board in boards {
        output.push('\n');
        output.push_str(&board.to_string());
    }
    output
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use super::*;

    fn shared_solver() -> &'static Solver {
        static SOLVER: OnceLock<Solver> = OnceLock::new();
        SOLVER.get_or_init(Solver::new)
    }

    fn no_solver() -> Solver {
        panic!("distance map built for a board that parity already rules out")
    }

    #[test]
    fn test_stats_snapshot() {
        let solver = shared_solver();
        insta::assert_snapshot!("distance_histogram", render_stats(solver.map()));
    }

    #[test]
    fn test_hardest_lists_both_boards() {
        let solver = shared_solver();
        let output = render_hardest(solver.map());
        assert!(output.starts_with("2 boards at distance 31:\n"));
        assert!(output.contains("8 6 7\n2 5 4\n3 . 1\n"));
        assert!(output.contains("6 4 7\n8 5 .\n3 2 1\n"));
    }

    #[test]
    fn test_render_solution_with_steps() {
        let start: Board = "123456078".parse().unwrap();
        let solution = Solution::Moves(vec![Move::Right, Move::Right]);
        assert_eq!(
            render_solution(&start, &solution, true),
            "Start:\n1 2 3\n4 5 6\n. 7 8\n\n\
             Solved in 2 moves: right right\n\
             \nMove 1: right\n1 2 3\n4 5 6\n7 . 8\n\
             \nMove 2: right\n1 2 3\n4 5 6\n7 8 .\n"
        );
    }

    #[test]
    fn test_render_unsolvable_and_goal() {
        let unsolvable: Board = "123456870".parse().unwrap();
        assert!(render_solution(&unsolvable, &Solution::Unsolvable, false)
            .ends_with("unsolvable: the board has the wrong tile parity\n"));

        let output = render_solution(&Board::GOAL, &Solution::Moves(vec![]), false);
        assert!(output.ends_with("Already solved\n"));
    }

    #[test]
    fn test_cli_parses_board_argument() {
        let cli = Cli::try_parse_from(["eight-puzzle", "solve", "1,2,3,4,5,6,0,7,8", "--steps"])
            .unwrap();
        match cli.command {
            Command::Solve { board, steps } => {
                assert_eq!(board.cells(), &[1, 2, 3, 4, 5, 6, 0, 7, 8]);
                assert!(steps);
            }
            _ => panic!("expected solve command"),
        }

        assert!(Cli::try_parse_from(["eight-puzzle", "distance", "12345678"]).is_err());
    }

    #[test]
    fn test_render_distance() {
        let solver = shared_solver();
        let start: Board = "123456078".parse().unwrap();
        let unsolvable: Board = "123456870".parse().unwrap();

        assert_eq!(render_distance(solver, &start), "2\n");
        assert_eq!(render_distance(solver, &Board::GOAL), "0\n");
        assert_eq!(render_distance(solver, &unsolvable), "unsolvable\n");
    }

    #[test]
    fn test_odd_parity_answers_without_distance_map() {
        let unsolvable: Board = "123456870".parse().unwrap();

        let output = run(Command::Distance { board: unsolvable }, no_solver).unwrap();
        assert_eq!(output, "unsolvable\n");

        let output = run(
            Command::Solve {
                board: unsolvable,
                steps: true,
            },
            no_solver,
        )
        .unwrap();
        assert!(output.ends_with("unsolvable: the board has the wrong tile parity\n"));
    }

    #[test]
    fn test_even_parity_builds_distance_map() {
        let start: Board = "123456078".parse().unwrap();
        let output = run(Command::Distance { board: start }, || shared_solver().clone()).unwrap();
        assert_eq!(output, "2\n");

        let output = run(
            Command::Solve {
                board: start,
                steps: false,
            },
            || shared_solver().clone(),
        )
        .unwrap();
        assert!(output.ends_with("Solved in 2 moves: right right\n"));
    }

    #[test]
    fn test_check_replays_user_moves() {
        let start: Board = "123456078".parse().unwrap();

        let output = run(
            Command::Check {
                board: start,
                moves: vec![Move::Right, Move::Right],
            },
            no_solver,
        )
        .unwrap();
        assert_eq!(output, "After 2 moves:\n1 2 3\n4 5 6\n7 8 .\nsolved\n");

        let output = run(
            Command::Check {
                board: start,
                moves: vec![Move::Up],
            },
            no_solver,
        )
        .unwrap();
        assert!(output.ends_with("not solved\n"));

        let error = run(
            Command::Check {
                board: start,
                moves: vec![Move::Right, Move::Right, Move::Right],
            },
            no_solver,
        )
        .unwrap_err();
        let message = format!("{:#}", error);
        assert!(message.starts_with("replaying 3 moves: move 2 (right) is not legal"), "{message}");
    }

    #[test]
    fn test_cli_parses_move_list() {
        let cli = Cli::try_parse_from(["eight-puzzle", "check", "123456078", "right", "R"]).unwrap();
        match cli.command {
            Command::Check { board, moves } => {
                assert_eq!(board.cells(), &[1, 2, 3, 4, 5, 6, 0, 7, 8]);
                assert_eq!(moves, vec![Move::Right, Move::Right]);
            }
            _ => panic!("expected check command"),
        }

        assert!(Cli::try_parse_from(["eight-puzzle", "check", "123456078", "north"]).is_err());
    }
}
