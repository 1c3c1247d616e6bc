use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Dimension mismatch in {context}: expected {expected} coefficients, found {found}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        found: usize,
    },
    #[error("Problem has no decision variables")]
    NoVariables,
    #[error("Unsupported relation: {0}")]
    UnsupportedRelation(String),
}
