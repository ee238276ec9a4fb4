//! Index range algebra backing array slices and index lists.
//!
//! A slice `[start:end:step]` is folded into an inclusive `[left, right]`
//! window plus the signed step, so containment reasoning does not care
//! about the direction of iteration.

use thiserror::Error;

/// Reasons a slice has no computable index range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("slice step must not be zero")]
    ZeroStep,
    #[error("negative slice bound {0} is relative to the array end")]
    NegativeBound(isize),
    #[error("descending slice without a start has no fixed first index")]
    OpenDescending,
    #[error("slice step {0} has no absolute value")]
    StepOverflow(isize),
    #[error("slice end {0} is past the largest index")]
    EndOverflow(isize),
}

/// Canonical `(left, right, step)` form of an array slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexRange {
    left: isize,
    /// Inclusive upper bound, `None` when unbounded.
    right: Option<isize>,
    step: isize,
    /// First index produced when iterating in step direction.
    start: isize,
}

impl IndexRange {
    /// Builds a range from raw slice parts, `end` being exclusive.
    pub fn new(start: Option<isize>, end: Option<isize>, step: isize) -> Result<Self, RangeError> {
        if step == 0 {
            return Err(RangeError::ZeroStep);
        }
        if step.checked_abs().is_none() {
            return Err(RangeError::StepOverflow(step));
        }
        if let Some(bound) = start.filter(|s| *s < 0).or(end.filter(|e| *e < 0)) {
            return Err(RangeError::NegativeBound(bound));
        }

        if step > 0 {
            let left = start.unwrap_or(0);
            return Ok(Self {
                left,
                right: end.map(|e| e - 1),
                step,
                start: left,
            });
        }

        let left = match end {
            Some(e) => e.checked_add(1).ok_or(RangeError::EndOverflow(e))?,
            None => 0,
        };
        match start {
            Some(right) => Ok(Self {
                left,
                right: Some(right),
                step,
                start: right,
            }),
            // Every index from `left` up, whatever the array length.
            None if step == -1 => Ok(Self {
                left,
                right: None,
                step: 1,
                start: left,
            }),
            None => Err(RangeError::OpenDescending),
        }
    }

    pub fn left(&self) -> isize {
        self.left
    }

    pub fn right(&self) -> Option<isize> {
        self.right
    }

    pub fn step(&self) -> isize {
        self.step
    }

    pub fn start(&self) -> isize {
        self.start
    }

    /// True for `[0:∞)` with step 1, i.e. every array index.
    pub fn contains_all_indexes(&self) -> bool {
        self.left == 0 && self.right.is_none() && self.step == 1
    }

    /// Number of indexes in the range, `None` when unbounded.
    pub fn index_count(&self) -> Option<usize> {
        let right = self.right?;
        if right < self.left {
            return Some(0);
        }
        Some(((right - self.left) / self.step.abs()) as usize + 1)
    }

    pub fn contains(&self, index: usize) -> bool {
        let Ok(index) = isize::try_from(index) else {
            return false;
        };
        index >= self.left
            && self.right.map_or(true, |right| index <= right)
            && (index - self.start) % self.step == 0
    }

    /// Whether every index of `other` is also an index of this range.
    pub fn contains_range(&self, other: &IndexRange) -> bool {
        match other.index_count() {
            Some(0) => return true,
            Some(1) => {
                return other
                    .indexes()
                    .next()
                    .map_or(true, |index| self.contains(index))
            }
            _ => {}
        }

        if other.step.abs() % self.step.abs() != 0 {
            return false;
        }

        if other.left < self.left {
            // Only a descending range can stop short of its left bound.
            if other.step > 0 {
                return false;
            }
            let Some(other_right) = other.right else {
                return false;
            };
            let period = other.step.abs();
            let lowest = other_right - (other_right - other.left) / period * period;
            if lowest < self.left {
                return false;
            }
        }

        let exceeds_right = match (self.right, other.right) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(right), Some(other_right)) => other_right > right,
        };
        if exceeds_right {
            let (Some(right), Some(other_right)) = (self.right, other.right) else {
                return false;
            };
            // Only an ascending range can stop short of its right bound.
            if other.step < 0 {
                return false;
            }
            let highest = other.left + (other_right - other.left) / other.step * other.step;
            if highest > right {
                return false;
            }
        }

        (other.start - self.start) % self.step == 0
    }

    /// Lazily enumerates the indexes in step direction.
    ///
    /// Infinite when the range is unbounded; callers must cap it.
    pub fn indexes(&self) -> Indexes {
        Indexes {
            next: Some(self.start),
            left: self.left,
            right: self.right,
            step: self.step,
        }
    }
}

/// Iterator returned by [`IndexRange::indexes`].
#[derive(Debug, Clone)]
pub struct Indexes {
    next: Option<isize>,
    left: isize,
    right: Option<isize>,
    step: isize,
}

impl Iterator for Indexes {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let current = self.next?;
        let in_range = current >= self.left && self.right.map_or(true, |right| current <= right);
        if !in_range {
            self.next = None;
            return None;
        }
        self.next = current.checked_add(self.step);
        usize::try_from(current).ok()
    }
}
