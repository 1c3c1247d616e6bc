//! Property-based tests for the tableau solver
//!
//! - termination within the iteration cap
//! - pivoting twice at the same position is the identity
//! - optimal assignments satisfy the original constraints
//! - the objective `Si` never increases outside the repair pass

use exact_simplex::{Problem, Rational, Relation, Sense, SolutionStatus, Solver, Tableau, Variable};
use proptest::prelude::*;

const CAP: usize = 64;

fn rat(n: i64) -> Rational {
    Rational::from(n)
}

fn relation_strategy() -> impl Strategy<Value = Relation> {
    prop_oneof![Just(Relation::Le), Just(Relation::Ge), Just(Relation::Eq)]
}

fn sense_strategy() -> impl Strategy<Value = Sense> {
    prop_oneof![Just(Sense::Minimize), Just(Sense::Maximize)]
}

/// Small problems with every relation and arbitrary signs.
fn problem_strategy() -> impl Strategy<Value = Problem> {
    (1usize..=3, 1usize..=4).prop_flat_map(|(n, m)| {
        (
            prop::collection::vec(-5i64..=5, n),
            sense_strategy(),
            prop::collection::vec((prop::collection::vec(-5i64..=5, n), relation_strategy(), -6i64..=10), m),
        )
            .prop_map(move |(objective, sense, rows)| {
                let mut problem = Problem::new(n);
                problem.set_objective(objective.into_iter().map(rat).collect(), sense);
                for (coeffs, relation, rhs) in rows {
                    problem.add_constraint(coeffs.into_iter().map(rat).collect(), relation, rhs);
                }
                problem
            })
    })
}

/// `≤` rows with non-negative right-hand sides: the origin is feasible.
fn packing_strategy() -> impl Strategy<Value = Problem> {
    (1usize..=3, 1usize..=4).prop_flat_map(|(n, m)| {
        (
            prop::collection::vec(-5i64..=5, n),
            sense_strategy(),
            prop::collection::vec((prop::collection::vec(-5i64..=5, n), 0i64..=10), m),
        )
            .prop_map(move |(objective, sense, rows)| {
                let mut problem = Problem::new(n);
                problem.set_objective(objective.into_iter().map(rat).collect(), sense);
                for (coeffs, rhs) in rows {
                    problem.add_constraint(coeffs.into_iter().map(rat).collect(), Relation::Le, rhs);
                }
                problem
            })
    })
}

/// Random tableau plus a position whose entry is non-zero.
fn pivotable_strategy() -> impl Strategy<Value = (Tableau, usize, usize)> {
    (2usize..=4, 2usize..=4)
        .prop_flat_map(|(rows, cols)| {
            (
                prop::collection::vec(prop::collection::vec((-9i64..=9, 1i64..=4), cols), rows),
                0..rows - 1,
                1..cols,
            )
        })
        .prop_filter("pivot entry must be non-zero", |(cells, r, c)| cells[*r][*c].0 != 0)
        .prop_map(|(cells, r, c)| {
            let rows = cells.len();
            let cols = cells[0].len();
            let data = cells
                .into_iter()
                .map(|row| row.into_iter().map(|(n, d)| Rational::new(n, d).unwrap()).collect())
                .collect();
            let non_basic = (0..cols - 1).map(Variable).collect();
            let basic = (cols - 1..cols - 1 + rows - 1).map(Variable).collect();
            (Tableau::from_rows(data, basic, non_basic), r, c)
        })
}

proptest! {
    #[test]
    fn solve_terminates_within_cap(problem in problem_strategy()) {
        let (trace, solution) = Solver::new().with_max_iterations(CAP).solve(&problem).unwrap();

        prop_assert!(trace.len() <= CAP + 1);
        prop_assert_eq!(solution.iterations, trace.len() - 1);
        prop_assert!(matches!(
            solution.status,
            SolutionStatus::Optimal | SolutionStatus::Infeasible | SolutionStatus::IterationLimit
        ));
    }

    #[test]
    fn optimal_assignment_satisfies_original_constraints(problem in problem_strategy()) {
        let (_, solution) = Solver::new().with_max_iterations(CAP).solve(&problem).unwrap();

        if solution.status == SolutionStatus::Optimal {
            prop_assert!(solution.violations.is_empty());
            for c in &problem.constraints {
                let lhs = c.evaluate(&solution.values);
                prop_assert!(c.is_satisfied_by(&lhs), "{:?} violated by {:?}", c, solution.values);
            }
            for value in &solution.values {
                prop_assert!(!value.is_negative());
            }
        }
    }

    #[test]
    fn pivot_twice_restores_tableau((tableau, row, col) in pivotable_strategy()) {
        let once = tableau.pivot(row, col);
        prop_assert_eq!(once.basic_vars()[row], tableau.non_basic_vars()[col - 1]);
        prop_assert_eq!(once.pivot(row, col), tableau);
    }

    #[test]
    fn objective_si_never_increases_without_repair(problem in packing_strategy()) {
        let (trace, solution) = Solver::new().with_max_iterations(CAP).solve(&problem).unwrap();

        prop_assert_ne!(solution.status, SolutionStatus::Infeasible);
        let f: Vec<&Rational> = trace.iter().map(|s| s.tableau().objective_value()).collect();
        for pair in f.windows(2) {
            prop_assert!(pair[1] <= pair[0]);
        }
    }

    #[test]
    fn solving_is_deterministic(problem in problem_strategy()) {
        let solver = Solver::new().with_max_iterations(CAP);
        let (first_trace, first) = solver.solve(&problem).unwrap();
        let (second_trace, second) = solver.solve(&problem).unwrap();

        prop_assert_eq!(first_trace, second_trace);
        prop_assert_eq!(first.status, second.status);
        prop_assert_eq!(first.values, second.values);
        prop_assert_eq!(first.objective_value, second.objective_value);
    }
}
