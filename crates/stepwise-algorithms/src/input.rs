//! Parsing and validation of user-supplied input.
//!
//! Everything here runs before an algorithm is instrumented. The
//! instrumented families assume their input already passed these checks.

use std::collections::HashSet;

use crate::error::{Error, Result};

/// Parse a list of integers such as `"5, 3 8"` or `"[1,2,3]"`.
///
/// Commas and whitespace both separate values.
pub fn parse_values(raw: &str) -> Result<Vec<i64>> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(trimmed);

    let values = inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(position, token)| {
            token.parse::<i64>().map_err(|_| Error::InvalidNumber {
                token: token.to_string(),
                position,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if values.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(values)
}

/// Parse a single integer (a search target).
pub fn parse_target(raw: &str) -> Result<i64> {
    let token = raw.trim();
    if token.is_empty() {
        return Err(Error::EmptyInput);
    }
    token.parse().map_err(|_| Error::InvalidNumber {
        token: token.to_string(),
        position: 0,
    })
}

/// Parse a list that must already be in non-decreasing order.
pub fn parse_sorted(raw: &str) -> Result<Vec<i64>> {
    let values = parse_values(raw)?;
    ensure_sorted(&values)?;
    Ok(values)
}

pub fn ensure_sorted(values: &[i64]) -> Result<()> {
    match values.windows(2).position(|pair| pair[0] > pair[1]) {
        Some(i) => Err(Error::Unsorted { position: i + 1 }),
        None => Ok(()),
    }
}

/// A validated preorder/inorder pair of one binary tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversals {
    preorder: Vec<i64>,
    inorder: Vec<i64>,
}

impl Traversals {
    /// Check that the two sequences describe one tree with distinct values.
    pub fn new(preorder: Vec<i64>, inorder: Vec<i64>) -> Result<Self> {
        if preorder.is_empty() || inorder.is_empty() {
            return Err(Error::EmptyInput);
        }
        if preorder.len() != inorder.len() {
            return Err(Error::LengthMismatch {
                preorder: preorder.len(),
                inorder: inorder.len(),
            });
        }

        let pre_set = distinct(&preorder)?;
        let in_set = distinct(&inorder)?;
        if pre_set != in_set {
            return Err(Error::ValueSetMismatch);
        }
        if !describes_one_tree(&preorder, &inorder) {
            return Err(Error::InconsistentTraversals);
        }

        Ok(Self { preorder, inorder })
    }

    /// Skip validation, for exercising the instrumentation's own checks.
    #[cfg(test)]
    pub(crate) fn new_unchecked(preorder: Vec<i64>, inorder: Vec<i64>) -> Self {
        Self { preorder, inorder }
    }

    pub fn preorder(&self) -> &[i64] {
        &self.preorder
    }

    pub fn inorder(&self) -> &[i64] {
        &self.inorder
    }

    pub fn len(&self) -> usize {
        self.preorder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.preorder.is_empty()
    }
}

/// Parse and validate a preorder/inorder pair.
pub fn parse_traversals(preorder: &str, inorder: &str) -> Result<Traversals> {
    Traversals::new(parse_values(preorder)?, parse_values(inorder)?)
}

fn distinct(values: &[i64]) -> Result<HashSet<i64>> {
    let mut seen = HashSet::with_capacity(values.len());
    for &value in values {
        if !seen.insert(value) {
            return Err(Error::DuplicateValue(value));
        }
    }
    Ok(seen)
}

/// Dry-run the reconstruction split without recording anything.
fn describes_one_tree(preorder: &[i64], inorder: &[i64]) -> bool {
    let Some((&root, rest)) = preorder.split_first() else {
        return true;
    };
    match inorder.iter().position(|&v| v == root) {
        Some(left_size) => {
            let (left_pre, right_pre) = rest.split_at(left_size);
            describes_one_tree(left_pre, &inorder[..left_size])
                && describes_one_tree(right_pre, &inorder[left_size + 1..])
        }
        None => false,
    }
}
