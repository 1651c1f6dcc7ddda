//! Puzzle text in, serializable report out.
//!
//! The adapter is the only place that knows all three domains: it parses
//! the initial state, picks the per-domain knobs from [`SolveOptions`], runs
//! the chosen algorithm, and flattens the result into a [`RunReport`].

use log::{info, warn};
use serde::Serialize;

use crate::domain::flow::{FlowBoard, FlowHeuristic, FlowProblem};
use crate::domain::pipes::{PipeGrid, PipeHeuristic, PipesProblem, SuccessorMode};
use crate::domain::sudoku::{Board, CellOrder, SudokuProblem};
use crate::error::RunError;
use crate::search::{
    self, Algorithm, Budget, Outcome, Problem, ReopenPolicy, SearchStats, DEFAULT_MAX_DEPTH,
    DEFAULT_MAX_ITERATIONS,
};

/// Largest number of empty Sudoku cells handed to BFS or DFS.
pub const DEFAULT_BLIND_LIMIT: usize = 50;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Domain {
    #[default]
    Pipes,
    Sudoku,
    Flow,
}

/// Algorithm names as given on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum AlgorithmKind {
    Bfs,
    Dfs,
    #[default]
    #[strum(to_string = "astar", serialize = "a-star")]
    AStar,
    HillClimbing,
}

/// Everything a run can be tuned with.
#[derive(Debug, Clone)]
pub struct SolveOptions {
    pub domain: Domain,
    pub algorithm: AlgorithmKind,
    pub max_depth: usize,
    pub max_iterations: usize,
    pub reopen: ReopenPolicy,
    /// Sudoku only. `None` uses first-empty for blind search and MRV
    /// otherwise.
    pub cell_order: Option<CellOrder>,
    /// Parsed against the domain's heuristic names; `None` uses its default.
    pub heuristic: Option<String>,
    /// Pipes only: turn every tile instead of the pruned candidate set
    pub exhaustive: bool,
    pub budget: Budget,
    /// Sudoku only: skip BFS/DFS above this many empty cells
    pub blind_limit: usize,
    /// Include every state on the path in the report
    pub include_path: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            domain: Domain::default(),
            algorithm: AlgorithmKind::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            reopen: ReopenPolicy::default(),
            cell_order: None,
            heuristic: None,
            exhaustive: false,
            budget: Budget::unlimited(),
            blind_limit: DEFAULT_BLIND_LIMIT,
            include_path: false,
        }
    }
}

impl SolveOptions {
    pub fn algorithm(&self) -> Algorithm {
        match self.algorithm {
            AlgorithmKind::Bfs => Algorithm::Bfs,
            AlgorithmKind::Dfs => Algorithm::Dfs {
                max_depth: self.max_depth,
            },
            AlgorithmKind::AStar => Algorithm::AStar {
                reopen: self.reopen,
            },
            AlgorithmKind::HillClimbing => Algorithm::HillClimbing {
                max_iterations: self.max_iterations,
            },
        }
    }

    fn heuristic_or_default<H>(
        &self,
        domain: &'static str,
        expected: &'static str,
    ) -> Result<H, RunError>
    where
        H: Default + std::str::FromStr,
    {
        match &self.heuristic {
            None => Ok(H::default()),
            Some(name) => name.parse().map_err(|_| RunError::UnknownHeuristic {
                domain,
                name: name.clone(),
                expected,
            }),
        }
    }
}

/// Per-domain knobs a run actually used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DomainSettings {
    Pipes {
        mode: SuccessorMode,
        heuristic: PipeHeuristic,
    },
    Sudoku {
        #[serde(rename = "cellOrder")]
        cell_order: CellOrder,
    },
    Flow {
        heuristic: FlowHeuristic,
    },
}

/// Result of one run, shaped for JSON output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub domain: Domain,
    pub algorithm: &'static str,
    /// The algorithm with its knobs, tagged by `name`
    pub search: Algorithm,
    pub settings: DomainSettings,
    /// `found`, `exhausted`, `stuck`, `budget-exceeded` or `skipped`
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub found: bool,
    pub skipped: bool,
    pub initial: Vec<String>,
    pub initial_heuristic: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<SearchStats>,
}

fn outcome_name(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Found => "found",
        Outcome::Exhausted => "exhausted",
        Outcome::Stuck(_) => "stuck",
        Outcome::BudgetExceeded => "budget-exceeded",
    }
}

/// Parse `text` as a puzzle of `options.domain` and search it.
pub fn run(text: &str, options: &SolveOptions) -> Result<RunReport, RunError> {
    let algorithm = options.algorithm();
    info!("{} on {} puzzle", algorithm.name(), options.domain);

    match options.domain {
        Domain::Pipes => {
            let grid: PipeGrid = text.parse()?;
            let problem = PipesProblem {
                mode: if options.exhaustive {
                    SuccessorMode::Exhaustive
                } else {
                    SuccessorMode::Pruned
                },
                heuristic: options
                    .heuristic_or_default::<PipeHeuristic>("pipes", "open-ends, half-open-ends")?,
            };
            let settings = DomainSettings::Pipes {
                mode: problem.mode,
                heuristic: problem.heuristic,
            };
            Ok(search_and_report(&problem, grid, options, settings, |grid| {
                grid.to_compact_string().split('/').map(str::to_owned).collect()
            }))
        }
        Domain::Sudoku => {
            let board: Board = text.parse()?;
            let cell_order = options.cell_order.unwrap_or(if algorithm.is_blind() {
                CellOrder::FirstEmpty
            } else {
                CellOrder::Mrv
            });
            let problem = SudokuProblem { cell_order };
            let settings = DomainSettings::Sudoku { cell_order };

            let empty = board.empty_count();
            if algorithm.is_blind() && empty > options.blind_limit {
                warn!(
                    "skipping {}: {empty} empty cells exceed the blind-search limit of {}",
                    algorithm.name(),
                    options.blind_limit
                );
                return Ok(RunReport {
                    domain: options.domain,
                    algorithm: algorithm.name(),
                    search: algorithm,
                    settings,
                    outcome: "skipped",
                    reason: Some(format!(
                        "{empty} empty cells exceed the blind-search limit of {}",
                        options.blind_limit
                    )),
                    found: false,
                    skipped: true,
                    initial_heuristic: problem.heuristic(&board),
                    initial: board.rows(),
                    solution: None,
                    path: None,
                    stats: None,
                });
            }
            Ok(search_and_report(&problem, board, options, settings, Board::rows))
        }
        Domain::Flow => {
            let board: FlowBoard = text.parse()?;
            let problem = FlowProblem {
                heuristic: options.heuristic_or_default::<FlowHeuristic>(
                    "flow",
                    "distance, empty-cells, combined",
                )?,
            };
            let settings = DomainSettings::Flow {
                heuristic: problem.heuristic,
            };
            Ok(search_and_report(&problem, board, options, settings, FlowBoard::rows))
        }
    }
}

fn search_and_report<P, R>(
    problem: &P,
    initial: P::State,
    options: &SolveOptions,
    settings: DomainSettings,
    render: R,
) -> RunReport
where
    P: Problem,
    R: Fn(&P::State) -> Vec<String>,
{
    let algorithm = options.algorithm();
    let initial_rows = render(&initial);
    let initial_heuristic = problem.heuristic(&initial);

    let result = search::solve(problem, initial, algorithm, &options.budget);

    let solution = result.goal.as_ref().map(|goal| render(&goal.state));
    let path = if options.include_path {
        result
            .path
            .as_ref()
            .map(|states| states.iter().map(&render).collect())
    } else {
        None
    };

    RunReport {
        domain: options.domain,
        algorithm: algorithm.name(),
        search: algorithm,
        settings,
        outcome: outcome_name(&result.outcome),
        reason: result.outcome.stuck_reason().map(|reason| reason.to_string()),
        found: result.is_found(),
        skipped: false,
        initial: initial_rows,
        initial_heuristic,
        solution,
        path,
        stats: Some(result.stats),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(domain: Domain, algorithm: AlgorithmKind) -> SolveOptions {
        SolveOptions {
            domain,
            algorithm,
            ..Default::default()
        }
    }

    #[test]
    fn test_solved_pipes_report() {
        let report = run("L-7/|.|/r-J", &options(Domain::Pipes, AlgorithmKind::AStar)).unwrap();

        assert!(report.found);
        assert_eq!(report.outcome, "found");
        assert_eq!(report.initial_heuristic, 0);
        assert_eq!(report.solution, Some(vec!["L-7".into(), "|.|".into(), "r-J".into()]));
        let stats = report.stats.unwrap();
        assert_eq!(stats.nodes_explored, 0);
        assert_eq!(stats.path_length, Some(1));
    }

    #[test]
    fn test_dfs_with_zero_depth_on_pipes() {
        let mut opts = options(Domain::Pipes, AlgorithmKind::Dfs);
        opts.max_depth = 0;
        let report = run("r-7/|.|/r-J", &opts).unwrap();

        assert!(!report.found);
        assert_eq!(report.outcome, "exhausted");
        let stats = report.stats.unwrap();
        assert_eq!(stats.nodes_explored, 1);
        assert_eq!(stats.nodes_generated, 0);
    }

    #[test]
    fn test_path_is_included_on_request() {
        let mut opts = options(Domain::Pipes, AlgorithmKind::Bfs);
        opts.include_path = true;
        let report = run("r-7/|.|/r-J", &opts).unwrap();

        let path = report.path.unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path[0], report.initial);
        assert_eq!(Some(&path[1]), report.solution.as_ref());
    }

    #[test]
    fn test_sudoku_blind_search_is_skipped_above_limit() {
        let text = format!("123456789{}", "0".repeat(72));
        let report = run(&text, &options(Domain::Sudoku, AlgorithmKind::Bfs)).unwrap();

        assert!(report.skipped);
        assert!(!report.found);
        assert_eq!(report.outcome, "skipped");
        assert_eq!(report.initial_heuristic, 72);
        assert!(report.stats.is_none());
        assert!(report.reason.unwrap().contains("limit of 50"));
    }

    #[test]
    fn test_sudoku_astar_defaults_to_mrv() {
        let text = format!("123456789{}", "0".repeat(72));
        let report = run(&text, &options(Domain::Sudoku, AlgorithmKind::AStar)).unwrap();

        assert!(report.found);
        assert_eq!(report.stats.unwrap().path_cost, Some(72));
        assert!(report
            .solution
            .unwrap()
            .iter()
            .all(|row| !row.contains('.')));
    }

    #[test]
    fn test_flow_heuristic_by_name() {
        let mut opts = options(Domain::Flow, AlgorithmKind::AStar);
        opts.heuristic = Some("distance".into());
        let report = run("A.A/B.B/C.C", &opts).unwrap();
        assert_eq!(report.initial_heuristic, 3);
        assert!(report.found);

        opts.heuristic = Some("manhattan".into());
        assert!(matches!(
            run("A.A/B.B/C.C", &opts),
            Err(RunError::UnknownHeuristic { domain: "flow", .. })
        ));
    }

    #[test]
    fn test_hill_climbing_reports_stuck_reason() {
        // A lone straight has two open ends whichever way it faces
        let opts = options(Domain::Pipes, AlgorithmKind::HillClimbing);
        let report = run("...|/..../..../....", &opts).unwrap();

        assert_eq!(report.outcome, "stuck");
        assert!(report.reason.is_some());
        assert!(!report.found);
    }

    #[test]
    fn test_space_marked_pipes_keep_their_size() {
        let report = run("-  \n   \n   ", &options(Domain::Pipes, AlgorithmKind::AStar)).unwrap();

        assert_eq!(report.initial, vec!["-..", "...", "..."]);
        assert_eq!(report.initial_heuristic, 1);
        assert!(!report.found);
        assert_eq!(report.outcome, "exhausted");
    }

    #[test]
    fn test_parse_errors_surface() {
        let err = run("L-7/|x|/r-J", &options(Domain::Pipes, AlgorithmKind::Bfs)).unwrap_err();
        assert!(matches!(err, RunError::Parse(_)));
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = run("L-7/|.|/r-J", &options(Domain::Pipes, AlgorithmKind::Bfs)).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["domain"], "pipes");
        assert_eq!(json["algorithm"], "BFS");
        assert_eq!(json["initialHeuristic"], 0);
        assert_eq!(json["stats"]["pathLength"], 1);
        assert!(json.get("path").is_none());
        assert!(json["stats"].get("pathCost").is_none());
    }

    #[test]
    fn test_report_records_effective_settings() {
        let mut opts = options(Domain::Pipes, AlgorithmKind::AStar);
        opts.exhaustive = true;
        opts.reopen = ReopenPolicy::Never;
        let json = serde_json::to_value(run("L-7/|.|/r-J", &opts).unwrap()).unwrap();
        assert_eq!(json["search"]["name"], "aStar");
        assert_eq!(json["search"]["reopen"], "never");
        assert_eq!(json["settings"]["mode"], "exhaustive");
        assert_eq!(json["settings"]["heuristic"], "half-open-ends");

        let mut opts = options(Domain::Sudoku, AlgorithmKind::Dfs);
        opts.max_depth = 90;
        let json = serde_json::to_value(run(&"0".repeat(81), &opts).unwrap()).unwrap();
        assert_eq!(json["outcome"], "skipped");
        assert_eq!(json["search"]["name"], "dfs");
        assert_eq!(json["search"]["maxDepth"], 90);
        assert_eq!(json["settings"]["cellOrder"], "first-empty");

        let report = run("A.A/B.B/C.C", &options(Domain::Flow, AlgorithmKind::Bfs)).unwrap();
        assert_eq!(
            report.settings,
            DomainSettings::Flow {
                heuristic: FlowHeuristic::Combined
            }
        );
    }

    #[test]
    fn test_sample_puzzles() {
        let samples = [
            (Domain::Pipes, include_str!("../../../puzzles/pipes/easy_tiny.txt")),
            (Domain::Pipes, include_str!("../../../puzzles/pipes/easy_frame.txt")),
            (Domain::Pipes, include_str!("../../../puzzles/pipes/easy_two.txt")),
            (Domain::Pipes, include_str!("../../../puzzles/pipes/solved_box.txt")),
            (Domain::Sudoku, include_str!("../../../puzzles/sudoku/classic.txt")),
            (Domain::Sudoku, include_str!("../../../puzzles/sudoku/nearly_solved.txt")),
            (Domain::Flow, include_str!("../../../puzzles/flow/three_rows.txt")),
            (Domain::Flow, include_str!("../../../puzzles/flow/snake.txt")),
        ];
        for (domain, text) in samples {
            let report = run(text, &options(domain, AlgorithmKind::AStar)).unwrap();
            assert!(report.found, "{domain}: {:?}", report.initial);
        }
    }

    #[test]
    fn test_algorithm_names_parse() {
        assert_eq!("astar".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::AStar);
        assert_eq!("a-star".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::AStar);
        assert_eq!(
            "hill-climbing".parse::<AlgorithmKind>().unwrap(),
            AlgorithmKind::HillClimbing
        );
        assert_eq!("flow".parse::<Domain>().unwrap(), Domain::Flow);
    }
}
