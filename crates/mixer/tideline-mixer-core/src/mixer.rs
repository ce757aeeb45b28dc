//! Generic weighted mixing over an index → accumulator mapping.
//!
//! Every call recomputes from scratch; nothing is carried between ticks.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::accumulate::{AdditiveSlot, SlotAccumulator, WinnerSlot};
use crate::contribution::ClipContribution;
use crate::target::TargetArray;
use crate::targets::WheelOverride;

/// How overlapping contributions to the same slot combine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendStrategy {
    /// Sum of `weight * intensity` (blend shapes, look-at rig weights).
    #[default]
    Additive,
    /// Intensity of the clip with the strictly highest weight.
    WinnerTakeAll,
}

/// Run one mixing pass over `(target_index, weight, payload)` items.
///
/// Items whose index falls outside `[0, target_count)` are skipped. The first
/// valid item for a slot claims it; later items are folded in input order.
/// Slots nobody claimed, or whose accumulator finalizes to `None`, come back
/// as `None`.
pub fn mix_slots<P, A, I>(
    target_count: usize,
    items: I,
) -> Vec<Option<<A as SlotAccumulator<P>>::Output>>
where
    A: SlotAccumulator<P>,
    I: IntoIterator<Item = (i32, f32, P)>,
{
    let mut slots: Vec<Option<A>> = (0..target_count).map(|_| None).collect();

    for (index, weight, payload) in items {
        let Some(i) = usize::try_from(index).ok().filter(|&i| i < target_count) else {
            trace!("dropping contribution for index {index} (target count {target_count})");
            continue;
        };
        if let Some(acc) = slots[i].as_mut() {
            acc.add(weight, payload);
        } else {
            slots[i] = Some(<A as SlotAccumulator<P>>::claim(weight, payload));
        }
    }

    slots
        .into_iter()
        .map(|slot| slot.and_then(|acc| <A as SlotAccumulator<P>>::finalize(acc)))
        .collect()
}

/// Mix clip contributions into a target array of `target_count` slots.
pub fn mix(
    strategy: BlendStrategy,
    target_count: usize,
    clips: &[ClipContribution],
) -> TargetArray {
    let items = clips
        .iter()
        .map(|c| (c.target_index, c.weight, c.intensity));
    let resolved = match strategy {
        BlendStrategy::Additive => mix_slots::<f32, AdditiveSlot, _>(target_count, items),
        BlendStrategy::WinnerTakeAll => {
            mix_slots::<f32, WinnerSlot<f32>, _>(target_count, items)
        }
    };

    let mut out = TargetArray::unclaimed(target_count);
    for (i, value) in resolved.into_iter().enumerate() {
        if let Some(v) = value {
            out.set(i, v);
        }
    }
    out
}

/// Highest-weight-wins steering override.
///
/// Starts from `(active = false, value = 0)` with a best weight of zero; a clip
/// replaces the current winner only when its weight is strictly greater.
pub fn mix_wheel_override<I>(clips: I) -> WheelOverride
where
    I: IntoIterator<Item = (f32, WheelOverride)>,
{
    let items = clips.into_iter().map(|(w, ov)| (0, w, ov));
    mix_slots::<WheelOverride, WinnerSlot<WheelOverride>, _>(1, items)
        .into_iter()
        .next()
        .flatten()
        .unwrap_or_default()
}
