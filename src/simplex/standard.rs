//! Conversion of a [`LinearProgram`] to equality form with nonnegative
//! variables and a nonnegative right-hand side.

use std::cmp::Ordering;

use malachite::num::arithmetic::traits::Sign;
use malachite::num::basic::traits::{One, Zero};
use malachite::Rational;

use crate::lp::{Domain, LinearProgram, Relation, RowTag, Variable};

/// The origin of a standard-form column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    /// The nonnegative part of a variable.
    Positive(Variable),
    /// The nonpositive part of a free variable, negated.
    Negative(Variable),
    Slack(usize),
    Surplus(usize),
    Artificial(usize),
}

impl Column {
    pub fn is_artificial(&self) -> bool {
        matches!(self, Column::Artificial(_))
    }

    pub fn variable(&self) -> Option<Variable> {
        match *self {
            Column::Positive(var) | Column::Negative(var) => Some(var),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct StandardForm {
    /// Constraint matrix, stored by column.
    pub columns: Vec<Vec<Rational>>,
    pub kinds: Vec<Column>,
    pub rhs: Vec<Rational>,
    pub cost: Vec<Rational>,
    /// Initial basic column of each row, a slack or an artificial.
    pub basis: Vec<usize>,
    pub tags: Vec<Option<RowTag>>,
}

impl StandardForm {
    pub fn new(lp: &LinearProgram) -> StandardForm {
        let rows = lp.num_constraints();

        let mut columns = Vec::new();
        let mut kinds = Vec::new();
        let mut cost = Vec::new();

        // Standard-form columns of each variable.
        let mut parts = Vec::with_capacity(lp.num_vars());

        let structural = lp.objective().iter().zip(lp.domains());

        for (j, (c, domain)) in structural.enumerate() {
            let var = Variable(j);
            let positive = kinds.len();

            kinds.push(Column::Positive(var));
            cost.push(c.clone());

            let negative = (*domain == Domain::Free).then(|| {
                kinds.push(Column::Negative(var));
                cost.push(-c);
                positive + 1
            });

            parts.push((positive, negative));
        }

        columns.resize(kinds.len(), vec![Rational::ZERO; rows]);

        let mut rhs = Vec::with_capacity(rows);
        let mut relations = Vec::with_capacity(rows);

        for (i, constraint) in lp.constraints().iter().enumerate() {
            let flip = match constraint.rhs.sign() {
                Ordering::Less => true,
                Ordering::Equal => constraint.relation == Relation::Ge,
                Ordering::Greater => false,
            };

            for (var, coeff) in &constraint.terms {
                let coeff = if flip { -coeff } else { coeff.clone() };
                let (positive, negative) = parts[var.0];

                if let Some(negative) = negative {
                    columns[negative][i] -= &coeff;
                }

                columns[positive][i] += coeff;
            }

            let relation = match (flip, constraint.relation) {
                (true, Relation::Le) => Relation::Ge,
                (true, Relation::Ge) => Relation::Le,
                (_, relation) => relation,
            };

            rhs.push(if flip {
                -&constraint.rhs
            } else {
                constraint.rhs.clone()
            });
            relations.push(relation);
        }

        let mut basis = vec![0; rows];

        for (i, relation) in relations.iter().enumerate() {
            let (kind, entry) = match relation {
                Relation::Le => (Column::Slack(i), Rational::ONE),
                Relation::Ge => (Column::Surplus(i), -Rational::ONE),
                Relation::Eq => continue,
            };

            if *relation == Relation::Le {
                basis[i] = kinds.len();
            }

            let mut column = vec![Rational::ZERO; rows];
            column[i] = entry;

            columns.push(column);
            kinds.push(kind);
            cost.push(Rational::ZERO);
        }

        for (i, relation) in relations.iter().enumerate() {
            if *relation == Relation::Le {
                continue;
            }

            let mut column = vec![Rational::ZERO; rows];
            column[i] = Rational::ONE;

            basis[i] = kinds.len();
            columns.push(column);
            kinds.push(Column::Artificial(i));
            cost.push(Rational::ZERO);
        }

        StandardForm {
            columns,
            kinds,
            rhs,
            cost,
            basis,
            tags: lp.constraints().iter().map(|c| c.tag).collect(),
        }
    }

    pub fn num_rows(&self) -> usize {
        self.rhs.len()
    }

    pub fn num_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn has_artificials(&self) -> bool {
        self.kinds.iter().any(Column::is_artificial)
    }

    /// Recovers the value of every structural variable from the column
    /// values.
    pub fn recover(
        &self,
        values: &[Rational],
        num_vars: usize,
    ) -> Vec<Rational> {
        let mut result = vec![Rational::ZERO; num_vars];

        for (kind, value) in self.kinds.iter().zip(values) {
            match kind {
                Column::Positive(var) => result[var.0] += value,
                Column::Negative(var) => result[var.0] -= value,
                _ => {}
            }
        }

        result
    }
}
