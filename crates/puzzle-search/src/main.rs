//! CLI entry point for the puzzle search engine.
//!
//! Usage:
//!   puzzle-search solve <puzzle.txt> [options]
//!   puzzle-search solve --stdin [options]
//!
//! Options:
//!   --domain <name>          pipes, sudoku or flow (default: pipes)
//!   --algorithm <name>       bfs, dfs, astar or hill-climbing (default: astar)
//!   --max-depth <n>          DFS depth bound (default: 1000)
//!   --max-iterations <n>     Hill-climbing iteration cap (default: 10000)
//!   --reopen <policy>        A* reopening: never or if-cheaper (default: if-cheaper)
//!   --cell-order <order>     Sudoku cell selection: first-empty or mrv
//!   --heuristic <name>       Domain heuristic (pipes: open-ends, half-open-ends;
//!                            flow: distance, empty-cells, combined)
//!   --exhaustive             Pipes: consider every tile, not just those near open ends
//!   --max-nodes <n>          Stop after generating this many nodes
//!   --timeout <seconds>      Stop after this much wall-clock time
//!   --blind-limit <n>        Sudoku: skip BFS/DFS above this many empty cells (default: 50)
//!   --show-path              Include every state on the path in the output
//!
//! Set `RUST_LOG=debug` for progress lines.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use puzzle_search::adapter::DEFAULT_BLIND_LIMIT;
use puzzle_search::domain::sudoku::CellOrder;
use puzzle_search::search::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_ITERATIONS};
use puzzle_search::{run, AlgorithmKind, Budget, Domain, ReopenPolicy, SolveOptions};

#[derive(Parser)]
#[command(name = "puzzle-search")]
#[command(about = "BFS, DFS, A* and hill-climbing over pipe, Sudoku and flow puzzles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a solution to one puzzle
    Solve {
        /// Path to a puzzle text file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read the puzzle from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Puzzle domain
        #[arg(long, default_value = "pipes")]
        domain: Domain,

        /// Search algorithm
        #[arg(long, default_value = "astar")]
        algorithm: AlgorithmKind,

        /// DFS depth bound
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Hill-climbing iteration cap
        #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
        max_iterations: usize,

        /// What A* does on a cheaper path to a seen state
        #[arg(long, default_value = "if-cheaper")]
        reopen: ReopenPolicy,

        /// Sudoku cell selection (default: first-empty for BFS/DFS, mrv otherwise)
        #[arg(long)]
        cell_order: Option<CellOrder>,

        /// Heuristic name for the chosen domain
        #[arg(long)]
        heuristic: Option<String>,

        /// Pipes: rotate any tile, not only those near open ends
        #[arg(long)]
        exhaustive: bool,

        /// Stop after generating this many nodes
        #[arg(long)]
        max_nodes: Option<usize>,

        /// Maximum search time in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Sudoku: skip BFS/DFS above this many empty cells
        #[arg(long, default_value_t = DEFAULT_BLIND_LIMIT)]
        blind_limit: usize,

        /// Include every state on the solution path
        #[arg(long)]
        show_path: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            file,
            stdin,
            domain,
            algorithm,
            max_depth,
            max_iterations,
            reopen,
            cell_order,
            heuristic,
            exhaustive,
            max_nodes,
            timeout,
            blind_limit,
            show_path,
        } => {
            // Read puzzle text
            let text = if stdin {
                let mut buffer = String::new();
                if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
                buffer
            } else if let Some(path) = file {
                match fs::read_to_string(&path) {
                    Ok(text) => text,
                    Err(e) => {
                        eprintln!("Error reading file {:?}: {}", path, e);
                        std::process::exit(1);
                    }
                }
            } else {
                eprintln!("Error: Must provide either a file path or --stdin");
                std::process::exit(1);
            };

            let budget = Budget {
                max_nodes,
                timeout: timeout.map(Duration::from_secs),
            };
            let options = SolveOptions {
                domain,
                algorithm,
                max_depth,
                max_iterations,
                reopen,
                cell_order,
                heuristic,
                exhaustive,
                budget,
                blind_limit,
                include_path: show_path,
            };

            // Run search
            let report = match run(&text, &options) {
                Ok(report) => report,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            // Print JSON output
            match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error serializing report: {}", e);
                    std::process::exit(1);
                }
            }

            // Exit with appropriate code
            if report.found {
                std::process::exit(0);
            } else {
                std::process::exit(1);
            }
        }
    }
}
