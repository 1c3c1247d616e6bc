use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::SolverError;
use crate::problem::{Problem, Sense};
use crate::rational::Rational;
use crate::solution::{Notice, Solution, SolutionStatus};
use crate::tableau::{Canonical, Tableau};
use crate::trace::StepTrace;
use crate::validate;

/// Tableau simplex solver over exact rationals
#[derive(Debug, Clone)]
pub struct Solver {
    /// Maximum pivot-selection rounds before giving up
    max_iterations: usize,
}

impl Default for Solver {
    fn default() -> Self {
        Self { max_iterations: 1000 }
    }
}

/// What the selection rules say to do with a tableau.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Pivot at `(row, col)`, `col >= 1`.
    Pivot { row: usize, col: usize },
    /// Stop. `skipped` lists positive objective columns that had no
    /// eligible row; when non-empty, optimality is not actually proven.
    Optimal { skipped: Vec<usize> },
    /// `row` has a negative `Si` and no negative entry to repair it with.
    Infeasible { row: usize },
}

/// Outcome of the pivot loop alone, before extraction and validation.
#[derive(Debug, Clone)]
pub struct Run {
    pub status: SolutionStatus,
    pub trace: StepTrace,
    pub notices: Vec<Notice>,
}

impl Run {
    pub fn final_tableau(&self) -> Option<&Tableau> {
        self.trace.last().map(|step| step.tableau())
    }
}

/// Applies the selection rules to `tableau`.
///
/// First repairs primal feasibility: the topmost row with a negative `Si` is
/// pivoted on its leftmost negative entry. Once every `Si` is non-negative,
/// the leftmost positive objective entry that has a row with a positive
/// entry is pivoted on by the minimum-ratio rule (earliest row on ties).
pub fn select_pivot(tableau: &Tableau) -> Decision {
    let n_constraints = tableau.num_constraints();
    let n_cols = tableau.cols();

    if let Some(row) = (0..n_constraints).find(|&i| tableau.si(i).is_negative()) {
        return match (1..n_cols).find(|&j| tableau.get(row, j).is_negative()) {
            Some(col) => Decision::Pivot { row, col },
            None => Decision::Infeasible { row },
        };
    }

    let objective = tableau.objective_row();
    let mut skipped = Vec::new();
    for col in (1..n_cols).filter(|&j| objective[j].is_positive()) {
        match find_pivot_row(tableau, col) {
            Some(row) => return Decision::Pivot { row, col },
            None => skipped.push(col),
        }
    }

    Decision::Optimal { skipped }
}

/// Row with the smallest `Si / entry` among rows with a positive entry in `col`.
fn find_pivot_row(tableau: &Tableau, col: usize) -> Option<usize> {
    let mut best: Option<(usize, Rational)> = None;

    for i in 0..tableau.num_constraints() {
        let entry = tableau.get(i, col);
        if !entry.is_positive() {
            continue;
        }
        let ratio = tableau.si(i) / entry;
        if best.as_ref().is_none_or(|(_, min)| ratio < *min) {
            best = Some((i, ratio));
        }
    }

    best.map(|(row, _)| row)
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Validates, canonicalizes and solves `problem`.
    ///
    /// Errors only for malformed input. Infeasibility and the iteration cap
    /// are reported through [`Solution::status`].
    pub fn solve(&self, problem: &Problem) -> Result<(StepTrace, Solution), SolverError> {
        let start = Instant::now();
        problem.validate()?;

        let Canonical { tableau, mut notices } = Tableau::build(problem);
        let run = self.run(tableau);
        notices.extend(run.notices.iter().cloned());

        let iterations = run.trace.pivots();
        let mut solution = match (run.status, run.final_tableau()) {
            (SolutionStatus::Optimal, Some(tableau)) => self.extract_solution(tableau, problem),
            (status, _) => unsolved(status),
        };
        solution.notices = notices;
        solution.iterations = iterations;
        solution.elapsed = start.elapsed();

        info!(
            status = ?solution.status,
            iterations,
            elapsed_us = solution.elapsed.as_micros() as u64,
            "solve finished"
        );
        Ok((run.trace, solution))
    }

    /// Runs the pivot loop from `initial` until a terminal decision or the
    /// iteration cap.
    pub fn run(&self, initial: Tableau) -> Run {
        let mut trace = StepTrace::new(initial.clone());
        let mut current = initial;
        let mut notices = Vec::new();

        for iteration in 0..self.max_iterations {
            match select_pivot(&current) {
                Decision::Pivot { row, col } => {
                    debug!(
                        iteration,
                        row,
                        col,
                        entering = %current.non_basic_vars()[col - 1],
                        leaving = %current.basic_vars()[row],
                        "pivot"
                    );
                    let next = current.pivot(row, col);
                    trace.record_pivot((row, col), next.clone());
                    current = next;
                }
                Decision::Optimal { skipped } => {
                    if !skipped.is_empty() {
                        let columns: Vec<_> = skipped.iter().map(|&j| current.non_basic_vars()[j - 1]).collect();
                        warn!(?columns, "declared optimal with improving columns lacking a pivot row");
                        notices.push(Notice::ImprovingColumnsSkipped { columns });
                    }
                    return Run {
                        status: SolutionStatus::Optimal,
                        trace,
                        notices,
                    };
                }
                Decision::Infeasible { row } => {
                    let variable = current.basic_vars()[row];
                    debug!(row, %variable, "row cannot be made non-negative");
                    notices.push(Notice::InfeasibleRow { row, variable });
                    return Run {
                        status: SolutionStatus::Infeasible,
                        trace,
                        notices,
                    };
                }
            }
        }

        warn!(max_iterations = self.max_iterations, "iteration limit reached");
        Run {
            status: SolutionStatus::IterationLimit,
            trace,
            notices,
        }
    }

    fn extract_solution(&self, tableau: &Tableau, problem: &Problem) -> Solution {
        let assignment = validate::assignment(tableau);
        let values = validate::decision_values(&assignment, problem.num_variables());

        let objective_value = match problem.objective.sense {
            Sense::Minimize => tableau.objective_value().clone(),
            Sense::Maximize => -tableau.objective_value(),
        };

        let violations = validate::check(problem, &values);
        for v in &violations {
            warn!(constraint = v.constraint + 1, "{}", v.description());
        }

        let (status, objective_value) = if violations.is_empty() {
            (SolutionStatus::Optimal, Some(objective_value))
        } else {
            (SolutionStatus::Infeasible, None)
        };

        Solution {
            objective_value,
            values,
            assignment,
            violations,
            ..unsolved(status)
        }
    }
}

fn unsolved(status: SolutionStatus) -> Solution {
    Solution {
        status,
        objective_value: None,
        values: Vec::new(),
        assignment: Vec::new(),
        violations: Vec::new(),
        notices: Vec::new(),
        iterations: 0,
        elapsed: Default::default(),
    }
}

/// Solves `problem` with the default [`Solver`].
pub fn solve(problem: &Problem) -> Result<(StepTrace, Solution), SolverError> {
    Solver::new().solve(problem)
}
