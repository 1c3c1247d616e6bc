//! Re-checks a final assignment against the caller's original constraints.
//!
//! The builder's basis heuristics can produce a tableau that is optimal for
//! the transformed system but not for the problem that was asked. Comparisons
//! here are exact, with no tolerance.

use crate::problem::{Problem, Variable};
use crate::rational::Rational;
use crate::solution::ConstraintViolation;
use crate::tableau::Tableau;

/// Value of every variable the tableau knows about, in ordinal order.
///
/// Basic variables take their row's `Si`, non-basic ones are zero.
pub fn assignment(tableau: &Tableau) -> Vec<(Variable, Rational)> {
    let mut values: Vec<(Variable, Rational)> = tableau
        .basic_vars()
        .iter()
        .enumerate()
        .map(|(row, &v)| (v, tableau.si(row).clone()))
        .chain(tableau.non_basic_vars().iter().map(|&v| (v, Rational::zero())))
        .collect();
    values.sort_by_key(|(v, _)| *v);
    values
}

/// Decision variable values taken from a full assignment.
///
/// A decision variable missing from the assignment reads as zero.
pub fn decision_values(assignment: &[(Variable, Rational)], num_variables: usize) -> Vec<Rational> {
    let mut values = vec![Rational::zero(); num_variables];
    for (v, value) in assignment {
        if v.index() < num_variables {
            values[v.index()] = value.clone();
        }
    }
    values
}

/// Every constraint of `problem` that `values` does not satisfy, in order.
pub fn check(problem: &Problem, values: &[Rational]) -> Vec<ConstraintViolation> {
    problem
        .constraints
        .iter()
        .enumerate()
        .filter_map(|(i, c)| {
            let lhs = c.evaluate(values);
            (!c.is_satisfied_by(&lhs)).then(|| ConstraintViolation {
                constraint: i,
                relation: c.relation,
                required: c.rhs.clone(),
                actual: lhs,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{Relation, Sense, coefficients};

    #[test]
    fn test_assignment_reads_si_and_zeroes() {
        let tableau = Tableau::from_rows(
            vec![
                vec![Rational::from(2), Rational::from(1)],
                vec![Rational::from(6), Rational::from(3)],
                vec![Rational::from(-36), Rational::from(-1)],
            ],
            vec![Variable(2), Variable(0)],
            vec![Variable(1)],
        );

        let assignment = assignment(&tableau);
        assert_eq!(
            assignment,
            vec![
                (Variable(0), Rational::from(6)),
                (Variable(1), Rational::zero()),
                (Variable(2), Rational::from(2)),
            ]
        );
        assert_eq!(decision_values(&assignment, 2), coefficients([6, 0]));
    }

    #[test]
    fn test_check_is_exact() {
        let mut problem = Problem::new(2);
        problem.set_objective(coefficients([1, 1]), Sense::Maximize);
        problem.add_constraint(coefficients([1, 1]), Relation::Le, 1);
        problem.add_constraint(coefficients([3, 0]), Relation::Eq, 1);
        problem.add_constraint(coefficients([0, 1]), Relation::Ge, 1);

        let third = Rational::new(1, 3).unwrap();
        let two_thirds = Rational::new(2, 3).unwrap();
        let violations = check(&problem, &[third.clone(), two_thirds.clone()]);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].actual, two_thirds);

        let nudged = two_thirds + Rational::new(1, 1_000_000).unwrap();
        let violations = check(&problem, &[third, nudged]);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].constraint, 0);
        assert_eq!(violations[1].constraint, 2);
    }
}
