//! Position weight matrices.
//!
//! Each row holds the scores of A, C, G and T at one binding-site position.
//! Derived scores are cached and must be recomputed after every edit.

use crate::document::ConfigNode;
use crate::error::{ParamError, ParamResult};
use crate::sequence::Base;

/// Every matrix cell is bounded to `[-PWM_CELL_LIMIT, PWM_CELL_LIMIT]`.
pub const PWM_CELL_LIMIT: f64 = 10.0;

/// Tag of the per-row child entries of a matrix node.
pub const POSITION_TAG: &str = "position";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pwm {
    rows: Vec<[f64; 4]>,
    n_scores: Vec<f64>,
    max_score: f64,
    min_score: f64,
}

impl Pwm {
    pub fn from_rows(rows: Vec<[f64; 4]>) -> Self {
        let mut pwm = Self {
            rows,
            ..Self::default()
        };
        pwm.recompute();
        pwm
    }

    /// Decode the `position` children of a matrix node, each holding
    /// four semicolon-separated scores.
    pub fn from_position_node(node: &ConfigNode) -> ParamResult<Self> {
        let rows = node
            .children_named(POSITION_TAG)
            .iter()
            .map(|entry| parse_row(entry.borrow().text().unwrap_or_default()))
            .collect::<ParamResult<Vec<_>>>()?;
        Ok(Self::from_rows(rows))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[[f64; 4]] {
        &self.rows
    }

    /// One cell, `None` when `row` or `col` is out of range.
    pub fn cell(&self, row: usize, col: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Add `delta` to one cell and refresh the derived scores.
    ///
    /// Panics if `row` or `col` is out of range.
    pub fn add_to_cell(&mut self, row: usize, col: usize, delta: f64) -> f64 {
        self.rows[row][col] += delta;
        self.recompute();
        self.rows[row][col]
    }

    /// Score assigned to an ambiguous base at each position.
    pub fn n_scores(&self) -> &[f64] {
        &self.n_scores
    }

    /// Highest attainable site score.
    pub fn max_score(&self) -> f64 {
        self.max_score
    }

    /// Lowest attainable site score.
    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    pub fn recompute(&mut self) {
        self.n_scores = self
            .rows
            .iter()
            .map(|row| row.iter().sum::<f64>() / 4.0)
            .collect();
        self.max_score = self
            .rows
            .iter()
            .map(|row| row.iter().copied().fold(f64::NEG_INFINITY, f64::max))
            .sum();
        self.min_score = self
            .rows
            .iter()
            .map(|row| row.iter().copied().fold(f64::INFINITY, f64::min))
            .sum();
    }

    pub fn is_out_of_range(&self) -> bool {
        self.rows.iter().flatten().any(|&v| !cell_in_range(v))
    }

    /// Score one site. `None` if the site length differs from the matrix.
    pub fn score(&self, site: &[Base]) -> Option<f64> {
        if site.len() != self.rows.len() {
            return None;
        }
        let total = site
            .iter()
            .enumerate()
            .map(|(i, base)| match base {
                Base::N => self.n_scores[i],
                b => self.rows[i][b.index()],
            })
            .sum();
        Some(total)
    }
}

pub(crate) fn cell_in_range(v: f64) -> bool {
    (-PWM_CELL_LIMIT..=PWM_CELL_LIMIT).contains(&v)
}

fn parse_row(text: &str) -> ParamResult<[f64; 4]> {
    let cells = text
        .split(';')
        .map(|c| c.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ParamError::MalformedRow(text.to_string()))?;
    <[f64; 4]>::try_from(cells).map_err(|_| ParamError::MalformedRow(text.to_string()))
}
