//! Per-slot accumulators used by the generic mixing pass.
//!
//! A slot accumulator is created when the first valid contribution claims a
//! slot, receives every later contribution for that slot in input order, and
//! is finalized once the pass is done. Finalizing to `None` leaves the slot
//! unclaimed.

/// Accumulation strategy for a single target slot.
pub trait SlotAccumulator<P> {
    type Output;

    /// Start a slot from its first contribution.
    fn claim(weight: f32, payload: P) -> Self;

    /// Fold in a later contribution to the same slot.
    fn add(&mut self, weight: f32, payload: P);

    fn finalize(self) -> Option<Self::Output>;
}

/// Sums `weight * intensity`; a claimed slot always produces a value, even
/// when every contributing clip currently has zero weight.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AdditiveSlot {
    sum: f32,
}

impl SlotAccumulator<f32> for AdditiveSlot {
    type Output = f32;

    #[inline]
    fn claim(weight: f32, intensity: f32) -> Self {
        let mut slot = AdditiveSlot { sum: 0.0 };
        slot.add(weight, intensity);
        slot
    }

    #[inline]
    fn add(&mut self, weight: f32, intensity: f32) {
        self.sum += weight * intensity;
    }

    #[inline]
    fn finalize(self) -> Option<f32> {
        Some(self.sum)
    }
}

/// Keeps the payload of the contribution with the strictly greatest weight.
/// Ties keep the earlier contribution; weights `<= 0` never win.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WinnerSlot<P> {
    best_weight: f32,
    winner: Option<P>,
}

impl<P> Default for WinnerSlot<P> {
    fn default() -> Self {
        Self {
            best_weight: 0.0,
            winner: None,
        }
    }
}

impl<P> WinnerSlot<P> {
    pub fn best_weight(&self) -> f32 {
        self.best_weight
    }
}

impl<P> SlotAccumulator<P> for WinnerSlot<P> {
    type Output = P;

    fn claim(weight: f32, payload: P) -> Self {
        let mut slot = WinnerSlot::default();
        slot.add(weight, payload);
        slot
    }

    fn add(&mut self, weight: f32, payload: P) {
        if weight > self.best_weight {
            self.best_weight = weight;
            self.winner = Some(payload);
        }
    }

    fn finalize(self) -> Option<P> {
        self.winner
    }
}
