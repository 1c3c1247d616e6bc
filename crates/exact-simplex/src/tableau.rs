//! Tableau storage, canonicalization and the pivot operation.
//!
//! Layout: row `i < rows - 1` belongs to `basic_vars[i]`, the last row is the
//! objective row `F`. Column 0 is `Si` (the current value of each row), column
//! `j >= 1` belongs to `non_basic_vars[j - 1]`. Every row reads as
//! `basic = Si - sum(entry_j * non_basic_j)`.

use tracing::info;

use crate::problem::{Problem, Relation, Sense, Variable};
use crate::rational::Rational;
use crate::solution::Notice;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Tableau {
    rows: usize,
    cols: usize,
    /// Row-major cells
    data: Vec<Rational>,
    basic_vars: Vec<Variable>,
    non_basic_vars: Vec<Variable>,
}

/// Initial tableau together with everything the builder decided on its own.
#[derive(Debug, Clone)]
pub struct Canonical {
    pub tableau: Tableau,
    pub notices: Vec<Notice>,
}

impl Tableau {
    /// Assembles a tableau from explicit rows (objective row last).
    ///
    /// # Panics
    ///
    /// If the rows are ragged, the labels do not match the shape, or a
    /// variable is both basic and non-basic.
    pub fn from_rows(rows: Vec<Vec<Rational>>, basic_vars: Vec<Variable>, non_basic_vars: Vec<Variable>) -> Self {
        let n_rows = rows.len();
        assert!(n_rows >= 1, "tableau needs an objective row");
        let n_cols = rows[0].len();
        assert!(rows.iter().all(|r| r.len() == n_cols), "ragged tableau rows");
        assert_eq!(basic_vars.len(), n_rows - 1, "one basic variable per constraint row");
        assert_eq!(non_basic_vars.len(), n_cols - 1, "one non-basic variable per column");
        assert!(
            basic_vars.iter().all(|v| !non_basic_vars.contains(v)),
            "variable is both basic and non-basic"
        );

        Self {
            rows: n_rows,
            cols: n_cols,
            data: rows.into_iter().flatten().collect(),
            basic_vars,
            non_basic_vars,
        }
    }

    /// Canonicalizes `problem` into its initial tableau.
    ///
    /// Each `≤`/`≥` row gets a fresh basic variable. An `=` row reuses a
    /// decision variable whose coefficient is ±1 there and 0 in every other
    /// constraint; with several such candidates the first one wins, with none
    /// a fresh variable is introduced. `≥` rows are negated.
    ///
    /// Never fails: problems the heuristics cannot really express surface as
    /// infeasible later on. The problem is assumed to be validated.
    pub fn build(problem: &Problem) -> Canonical {
        let n = problem.num_variables();
        let constraints = &problem.constraints;
        let mut next_ordinal = n;
        let mut introduce = || {
            let v = Variable(next_ordinal);
            next_ordinal += 1;
            v
        };

        let mut notices = Vec::new();
        let mut basic_vars = Vec::with_capacity(constraints.len());

        for (idx, c) in constraints.iter().enumerate() {
            let basic = match c.relation {
                Relation::Le | Relation::Ge => introduce(),
                Relation::Eq => {
                    let candidates: Vec<Variable> = (0..n)
                        .filter(|&j| {
                            c.coefficients[j].abs() == Rational::one()
                                && constraints
                                    .iter()
                                    .enumerate()
                                    .all(|(k, other)| k == idx || other.coefficients[j].is_zero())
                        })
                        .map(Variable)
                        .collect();

                    match candidates.as_slice() {
                        [] => {
                            let variable = introduce();
                            info!(constraint = idx + 1, %variable, "introduced basic variable for equality row");
                            notices.push(Notice::BasisIntroduced { constraint: idx, variable });
                            variable
                        }
                        [only] => *only,
                        [first, ..] => {
                            let chosen = *first;
                            info!(constraint = idx + 1, %chosen, "picked first of several basic candidates");
                            notices.push(Notice::BasisAutoSelected {
                                constraint: idx,
                                chosen,
                                candidates: candidates.clone(),
                            });
                            chosen
                        }
                    }
                }
            };
            basic_vars.push(basic);
        }

        let non_basic_vars: Vec<Variable> = problem
            .decision_variables()
            .filter(|v| !basic_vars.contains(v))
            .collect();

        let reduced: Vec<Variable> = basic_vars.iter().copied().filter(|v| v.index() < n).collect();
        if !reduced.is_empty() {
            info!(count = reduced.len(), "basic decision variables dropped from the objective row");
            notices.push(Notice::ObjectiveReduced { variables: reduced });
        }

        let mut rows = Vec::with_capacity(constraints.len() + 1);
        for c in constraints {
            let flip = c.relation == Relation::Ge;
            let signed = |value: &Rational| if flip { -value } else { value.clone() };

            let mut row = Vec::with_capacity(non_basic_vars.len() + 1);
            row.push(signed(&c.rhs));
            row.extend(non_basic_vars.iter().map(|v| signed(&c.coefficients[v.index()])));
            rows.push(row);
        }

        let mut objective = Vec::with_capacity(non_basic_vars.len() + 1);
        objective.push(Rational::zero());
        objective.extend(non_basic_vars.iter().map(|v| {
            let coef = &problem.objective.coefficients[v.index()];
            match problem.objective.sense {
                Sense::Minimize => -coef,
                Sense::Maximize => coef.clone(),
            }
        }));
        rows.push(objective);

        Canonical {
            tableau: Tableau::from_rows(rows, basic_vars, non_basic_vars),
            notices,
        }
    }

    /// Total rows, objective row included.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total columns, `Si` included.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn num_constraints(&self) -> usize {
        self.rows - 1
    }

    pub fn objective_index(&self) -> usize {
        self.rows - 1
    }

    pub fn get(&self, row: usize, col: usize) -> &Rational {
        &self.data[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[Rational] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn si(&self, row: usize) -> &Rational {
        self.get(row, 0)
    }

    pub fn objective_row(&self) -> &[Rational] {
        self.row(self.objective_index())
    }

    /// `Si` of the objective row, in the internal minimize-oriented form.
    pub fn objective_value(&self) -> &Rational {
        self.si(self.objective_index())
    }

    pub fn basic_vars(&self) -> &[Variable] {
        &self.basic_vars
    }

    pub fn non_basic_vars(&self) -> &[Variable] {
        &self.non_basic_vars
    }

    /// Exchanges `basic_vars[row]` with `non_basic_vars[col - 1]` and returns
    /// the resulting tableau. `self` is left untouched.
    ///
    /// # Panics
    ///
    /// If `(row, col)` is not a constraint row and variable column, or the
    /// pivot entry is zero. Both mean the selection rules were violated.
    pub fn pivot(&self, row: usize, col: usize) -> Tableau {
        assert!(row < self.objective_index(), "pivot row {row} is not a constraint row");
        assert!(col >= 1 && col < self.cols, "pivot column {col} is not a variable column");
        let y = self.get(row, col);
        assert!(!y.is_zero(), "zero pivot at ({row}, {col})");

        let mut data = Vec::with_capacity(self.data.len());
        for i in 0..self.rows {
            for j in 0..self.cols {
                let old = self.get(i, j);
                let new = match (i == row, j == col) {
                    (true, true) => Rational::one() / y,
                    (true, false) => old / y,
                    (false, true) => -(old / y),
                    (false, false) => old - self.get(i, col) * self.get(row, j) / y,
                };
                data.push(new);
            }
        }

        let mut basic_vars = self.basic_vars.clone();
        let mut non_basic_vars = self.non_basic_vars.clone();
        std::mem::swap(&mut basic_vars[row], &mut non_basic_vars[col - 1]);

        Tableau {
            rows: self.rows,
            cols: self.cols,
            data,
            basic_vars,
            non_basic_vars,
        }
    }
}
