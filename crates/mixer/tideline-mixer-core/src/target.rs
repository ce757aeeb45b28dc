//! Target arrays produced by the mixer.
//!
//! A slot holding [`UNCLAIMED`] means no clip referenced it this tick and the
//! host keeps whatever value it already had. Claims are also tracked
//! explicitly so that a blended result which happens to equal the sentinel is
//! still written.

use serde::{Deserialize, Serialize};

use crate::targets::BlendTarget;

/// Sentinel for "no opinion this tick".
pub const UNCLAIMED: f32 = -1.0;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTargetArray")]
pub struct TargetArray {
    values: Vec<f32>,
    claimed: Vec<bool>,
}

#[derive(Deserialize)]
struct RawTargetArray {
    values: Vec<f32>,
    claimed: Vec<bool>,
}

impl TryFrom<RawTargetArray> for TargetArray {
    type Error = String;

    fn try_from(raw: RawTargetArray) -> Result<Self, Self::Error> {
        if raw.values.len() != raw.claimed.len() {
            return Err(format!(
                "target array has {} values but {} claim flags",
                raw.values.len(),
                raw.claimed.len()
            ));
        }
        Ok(Self {
            values: raw.values,
            claimed: raw.claimed,
        })
    }
}

impl TargetArray {
    /// A fresh array with every slot unclaimed.
    pub fn unclaimed(target_count: usize) -> Self {
        Self {
            values: vec![UNCLAIMED; target_count],
            claimed: vec![false; target_count],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in host order, with [`UNCLAIMED`] in untouched slots.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn is_claimed(&self, index: usize) -> bool {
        self.claimed.get(index).copied().unwrap_or(false)
    }

    /// Value for a claimed slot; `None` if the slot is out of range or unclaimed.
    pub fn get(&self, index: usize) -> Option<f32> {
        if self.is_claimed(index) {
            self.values.get(index).copied()
        } else {
            None
        }
    }

    /// Iterate `(index, value)` over claimed slots only.
    pub fn claimed(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.values
            .iter()
            .zip(self.claimed.iter())
            .enumerate()
            .filter_map(|(i, (v, c))| c.then_some((i, *v)))
    }

    pub fn claimed_count(&self) -> usize {
        self.claimed.iter().filter(|c| **c).count()
    }

    /// Mark a slot authoritative with the given value. Out-of-range indices
    /// are ignored.
    pub fn set(&mut self, index: usize, value: f32) {
        if let (Some(slot), Some(claimed)) =
            (self.values.get_mut(index), self.claimed.get_mut(index))
        {
            *slot = value;
            *claimed = true;
        }
    }

    /// Write claimed slots onto the host target, leaving the rest untouched.
    /// Returns how many slots were written.
    pub fn apply_to<T: BlendTarget + ?Sized>(&self, target: &mut T) -> usize {
        let count = target.target_count();
        let mut written = 0;
        for (i, v) in self.claimed() {
            if i < count {
                target.set_value(i, v);
                written += 1;
            }
        }
        written
    }

    /// Apply onto a plain slice of host values.
    pub fn apply_to_slice(&self, host: &mut [f32]) -> usize {
        let mut written = 0;
        for (i, v) in self.claimed() {
            if let Some(slot) = host.get_mut(i) {
                *slot = v;
                written += 1;
            }
        }
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claimed_sentinel_value_is_still_applied() {
        let mut arr = TargetArray::unclaimed(2);
        arr.set(1, UNCLAIMED);
        let mut host = [0.5, 0.5];
        assert_eq!(arr.apply_to_slice(&mut host), 1);
        assert_eq!(host, [0.5, -1.0]);
    }

    #[test]
    fn set_out_of_range_is_ignored() {
        let mut arr = TargetArray::unclaimed(1);
        arr.set(5, 1.0);
        assert_eq!(arr.claimed_count(), 0);
    }
}
