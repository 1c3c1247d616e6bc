use std::fmt;
use std::str::FromStr;

use crate::error::SolverError;
use crate::rational::Rational;

/// Ordinal identity of a variable.
///
/// Decision variables occupy `0..n`. Variables introduced while building the
/// tableau take the next unused ordinals, in constraint order.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(pub usize);

impl Variable {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X{}", self.0 + 1)
    }
}

/// Represents a linear programming problem over exact rationals
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    /// Number of decision variables
    pub num_variables: usize,
    /// Objective function
    pub objective: Objective,
    /// Constraints, in the order they were added
    pub constraints: Vec<Constraint>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    /// Coefficients for each decision variable
    pub coefficients: Vec<Rational>,
    /// Whether to minimize or maximize
    pub sense: Sense,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Coefficients for each decision variable
    pub coefficients: Vec<Rational>,
    /// Comparison operator
    pub relation: Relation,
    /// Right-hand side value
    pub rhs: Rational,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Less than or equal (<=)
    Le,
    /// Greater than or equal (>=)
    Ge,
    /// Equal (=)
    Eq,
}

impl FromStr for Relation {
    type Err = SolverError;

    /// Strict inequalities are read as their non-strict counterparts.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<=" | "<" | "≤" => Ok(Relation::Le),
            ">=" | ">" | "≥" => Ok(Relation::Ge),
            "=" => Ok(Relation::Eq),
            other => Err(SolverError::UnsupportedRelation(other.to_string())),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Relation::Le => "≤",
            Relation::Ge => "≥",
            Relation::Eq => "=",
        };
        f.write_str(symbol)
    }
}

impl Constraint {
    /// Exact left-hand side for the given decision variable values.
    pub fn evaluate(&self, values: &[Rational]) -> Rational {
        self.coefficients
            .iter()
            .zip(values)
            .map(|(coef, value)| coef * value)
            .sum()
    }

    pub fn is_satisfied_by(&self, lhs: &Rational) -> bool {
        match self.relation {
            Relation::Le => *lhs <= self.rhs,
            Relation::Ge => *lhs >= self.rhs,
            Relation::Eq => *lhs == self.rhs,
        }
    }
}

impl Problem {
    pub fn new(num_variables: usize) -> Self {
        Self {
            num_variables,
            objective: Objective {
                coefficients: vec![Rational::zero(); num_variables],
                sense: Sense::Minimize,
            },
            constraints: Vec::new(),
        }
    }

    pub fn set_objective(&mut self, coefficients: Vec<Rational>, sense: Sense) {
        self.objective = Objective { coefficients, sense };
    }

    pub fn add_constraint(&mut self, coefficients: Vec<Rational>, relation: Relation, rhs: impl Into<Rational>) {
        self.constraints.push(Constraint {
            coefficients,
            relation,
            rhs: rhs.into(),
        });
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn decision_variables(&self) -> impl Iterator<Item = Variable> + use<> {
        (0..self.num_variables).map(Variable)
    }

    /// Checks that every coefficient vector matches the variable count.
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.num_variables == 0 {
            return Err(SolverError::NoVariables);
        }
        if self.objective.coefficients.len() != self.num_variables {
            return Err(SolverError::DimensionMismatch {
                context: "objective".to_string(),
                expected: self.num_variables,
                found: self.objective.coefficients.len(),
            });
        }
        for (i, c) in self.constraints.iter().enumerate() {
            if c.coefficients.len() != self.num_variables {
                return Err(SolverError::DimensionMismatch {
                    context: format!("constraint {}", i + 1),
                    expected: self.num_variables,
                    found: c.coefficients.len(),
                });
            }
        }
        Ok(())
    }
}

/// Converts a row of integers into rationals.
pub fn coefficients<I>(values: I) -> Vec<Rational>
where
    I: IntoIterator,
    I::Item: Into<Rational>,
{
    values.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_from_str() {
        assert_eq!("<=".parse::<Relation>().unwrap(), Relation::Le);
        assert_eq!("<".parse::<Relation>().unwrap(), Relation::Le);
        assert_eq!("≥".parse::<Relation>().unwrap(), Relation::Ge);
        assert_eq!(" = ".parse::<Relation>().unwrap(), Relation::Eq);
        assert_eq!(
            "!=".parse::<Relation>(),
            Err(SolverError::UnsupportedRelation("!=".to_string()))
        );
    }

    #[test]
    fn test_validate_dimensions() {
        let mut problem = Problem::new(2);
        problem.set_objective(coefficients([1, 1]), Sense::Maximize);
        problem.add_constraint(coefficients([1, 2]), Relation::Le, 4);
        assert!(problem.validate().is_ok());

        problem.add_constraint(coefficients([1]), Relation::Ge, 1);
        assert_eq!(
            problem.validate(),
            Err(SolverError::DimensionMismatch {
                context: "constraint 2".to_string(),
                expected: 2,
                found: 1,
            })
        );

        let mut problem = Problem::new(2);
        problem.set_objective(coefficients([1, 1, 1]), Sense::Minimize);
        assert!(matches!(
            problem.validate(),
            Err(SolverError::DimensionMismatch { expected: 2, found: 3, .. })
        ));

        assert_eq!(Problem::new(0).validate(), Err(SolverError::NoVariables));
    }

    #[test]
    fn test_constraint_evaluation() {
        let c = Constraint {
            coefficients: coefficients([3, 2]),
            relation: Relation::Le,
            rhs: Rational::from(18),
        };
        let lhs = c.evaluate(&coefficients([2, 6]));
        assert_eq!(lhs, Rational::from(18));
        assert!(c.is_satisfied_by(&lhs));
        assert!(!c.is_satisfied_by(&Rational::from(19)));
    }

    #[test]
    fn test_variable_display() {
        assert_eq!(Variable(0).to_string(), "X1");
        assert_eq!(Variable(4).to_string(), "X5");
    }
}
