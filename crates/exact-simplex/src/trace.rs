//! Ordered record of every tableau the solver passed through.

use crate::problem::Variable;
use crate::rational::Rational;
use crate::tableau::Tableau;

/// Grid position of a pivot: `(row, col)` with `col >= 1`.
pub type PivotPosition = (usize, usize);

/// Snapshot of one tableau. `pivot` is the pivot that was taken from it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    tableau: Tableau,
    pivot: Option<PivotPosition>,
}

impl Step {
    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    pub fn basic_vars(&self) -> &[Variable] {
        self.tableau.basic_vars()
    }

    pub fn non_basic_vars(&self) -> &[Variable] {
        self.tableau.non_basic_vars()
    }

    pub fn pivot(&self) -> Option<PivotPosition> {
        self.pivot
    }

    /// Pivot entry, if a pivot was taken from this step.
    pub fn pivot_value(&self) -> Option<&Rational> {
        self.pivot.map(|(row, col)| self.tableau.get(row, col))
    }
}

/// Append-only sequence of [`Step`]s.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepTrace {
    steps: Vec<Step>,
}

impl StepTrace {
    pub(crate) fn new(initial: Tableau) -> Self {
        Self {
            steps: vec![Step { tableau: initial, pivot: None }],
        }
    }

    /// Marks the pivot taken from the latest step and appends its result.
    pub(crate) fn record_pivot(&mut self, pivot: PivotPosition, next: Tableau) {
        if let Some(last) = self.steps.last_mut() {
            last.pivot = Some(pivot);
        }
        self.steps.push(Step { tableau: next, pivot: None });
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn first(&self) -> Option<&Step> {
        self.steps.first()
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Number of pivots applied.
    pub fn pivots(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn cursor(&self) -> StepCursor<'_> {
        StepCursor { trace: self, index: 0 }
    }
}

impl<'a> IntoIterator for &'a StepTrace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Bounded position in a [`StepTrace`] for stepwise display. Never wraps.
#[derive(Debug, Clone, Copy)]
pub struct StepCursor<'a> {
    trace: &'a StepTrace,
    index: usize,
}

impl<'a> StepCursor<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&'a Step> {
        self.trace.get(self.index)
    }

    pub fn peek_next(&self) -> Option<&'a Step> {
        self.trace.get(self.index + 1)
    }

    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.trace.len()
    }

    /// Current step and the one it leads to.
    pub fn pair(&self) -> Option<(&'a Step, Option<&'a Step>)> {
        self.current().map(|step| (step, self.peek_next()))
    }

    /// Moves forward; returns `false` at the last step.
    pub fn advance(&mut self) -> bool {
        if self.has_next() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Moves back; returns `false` at the first step.
    pub fn retreat(&mut self) -> bool {
        if self.has_previous() {
            self.index -= 1;
            true
        } else {
            false
        }
    }
}
