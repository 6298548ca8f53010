//! Action and observation space descriptors
//!
//! Lets a generic agent introspect valid actions and observation shapes
//! without hard-coding them.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Space {
    /// Integers `0..n`
    Discrete { n: usize },
    /// Real tensor of `shape` with every element in `[low, high]`
    Box {
        shape: Vec<usize>,
        low: f64,
        high: f64,
    },
}

impl Space {
    pub fn discrete(n: usize) -> Self {
        Self::Discrete { n }
    }

    pub fn bounded(shape: Vec<usize>, low: f64, high: f64) -> Self {
        Self::Box { shape, low, high }
    }

    pub fn unbounded(shape: Vec<usize>) -> Self {
        Self::Box {
            shape,
            low: f64::NEG_INFINITY,
            high: f64::INFINITY,
        }
    }

    pub fn is_discrete(&self) -> bool {
        matches!(self, Self::Discrete { .. })
    }

    /// Shape of one element; discrete spaces are scalars
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Discrete { .. } => &[],
            Self::Box { shape, .. } => shape.as_slice(),
        }
    }

    /// Number of scalar entries in one element
    pub fn flat_size(&self) -> usize {
        self.shape().iter().product()
    }

    /// Number of choices of a discrete space
    pub fn n(&self) -> Option<usize> {
        match self {
            Self::Discrete { n } => Some(*n),
            Self::Box { .. } => None,
        }
    }

    /// Element bounds of a box space
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self {
            Self::Discrete { .. } => None,
            Self::Box { low, high, .. } => Some((*low, *high)),
        }
    }

    /// Whether a discrete index is a valid action
    pub fn contains_index(&self, index: usize) -> bool {
        matches!(self, Self::Discrete { n } if index < *n)
    }

    /// Whether a flat vector matches the box's size and bounds
    pub fn contains_values(&self, values: &[f64]) -> bool {
        match self {
            Self::Discrete { .. } => false,
            Self::Box { low, high, .. } => {
                values.len() == self.flat_size()
                    && values.iter().all(|v| *v >= *low && *v <= *high)
            }
        }
    }
}
