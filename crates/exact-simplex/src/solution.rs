use std::time::Duration;

use crate::problem::{Relation, Variable};
use crate::rational::Rational;

/// The result of solving an LP problem
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Solution status
    pub status: SolutionStatus,
    /// Optimal objective value in the caller's sense, when optimal
    pub objective_value: Option<Rational>,
    /// Value of each decision variable (empty unless the pivoting reached optimality)
    pub values: Vec<Rational>,
    /// Every variable, decision and introduced, in ordinal order
    pub assignment: Vec<(Variable, Rational)>,
    /// Original constraints the final assignment violates
    pub violations: Vec<ConstraintViolation>,
    /// Decisions the solver took on its own
    pub notices: Vec<Notice>,
    /// Pivots applied
    pub iterations: usize,
    /// Wall time spent building, pivoting and validating
    pub elapsed: Duration,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// An optimal solution was found
    Optimal,
    /// No assignment satisfies all constraints
    Infeasible,
    /// The iteration cap was hit first
    IterationLimit,
}

/// Something the solver decided without asking. None of these are errors.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Several decision variables could own an equality row; the first was taken.
    BasisAutoSelected {
        constraint: usize,
        chosen: Variable,
        candidates: Vec<Variable>,
    },
    /// An equality row had no usable decision variable, so a new one was added.
    BasisIntroduced { constraint: usize, variable: Variable },
    /// Decision variables that became basic and left the objective row.
    ObjectiveReduced { variables: Vec<Variable> },
    /// Optimality was declared while these objective columns were still
    /// positive but had no eligible pivot row.
    ImprovingColumnsSkipped { columns: Vec<Variable> },
    /// Pivoting stopped at this row: negative `Si` and no negative entry.
    InfeasibleRow { row: usize, variable: Variable },
}

/// Information about a violated constraint
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintViolation {
    /// Index of the constraint in the problem
    pub constraint: usize,
    pub relation: Relation,
    /// Required value (from constraint RHS)
    pub required: Rational,
    /// Actual left-hand side
    pub actual: Rational,
}

impl ConstraintViolation {
    /// How far the left-hand side is from the right-hand side.
    pub fn amount(&self) -> Rational {
        (&self.actual - &self.required).abs()
    }

    pub fn description(&self) -> String {
        let name = format!("constraint {}", self.constraint + 1);
        match self.relation {
            Relation::Le => format!("{} exceeds maximum of {} by {}", name, self.required, self.amount()),
            Relation::Ge => format!("{} is below minimum of {} by {}", name, self.required, self.amount()),
            Relation::Eq => format!("{} requires exactly {} but got {}", name, self.required, self.actual),
        }
    }
}

impl Solution {
    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }

    /// Value of any variable in the final assignment.
    pub fn value_of(&self, variable: Variable) -> Option<&Rational> {
        self.assignment
            .iter()
            .find(|(v, _)| *v == variable)
            .map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_description() {
        let v = ConstraintViolation {
            constraint: 1,
            relation: Relation::Ge,
            required: Rational::from(5),
            actual: Rational::new(7, 2).unwrap(),
        };
        assert_eq!(v.amount(), Rational::new(3, 2).unwrap());
        assert_eq!(v.description(), "constraint 2 is below minimum of 5 by 3/2");

        let v = ConstraintViolation {
            constraint: 0,
            relation: Relation::Eq,
            required: Rational::from(6),
            actual: Rational::zero(),
        };
        assert_eq!(v.description(), "constraint 1 requires exactly 6 but got 0");
    }
}
