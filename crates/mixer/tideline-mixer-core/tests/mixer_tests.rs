use tideline_mixer_core::{
    mix, mix_slots, mix_wheel_override, AdditiveSlot, BlendShapeSet, BlendStrategy, BlendTarget,
    ClipContribution, LookAtRig, RigSlot, TargetArray, WheelOverride, WheelState, UNCLAIMED,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn c(target_index: i32, weight: f32, intensity: f32) -> ClipContribution {
    ClipContribution::new(target_index, weight, intensity)
}

/// it should return identical arrays for repeated calls with the same inputs
#[test]
fn additive_mix_is_deterministic() {
    let clips = [c(0, 0.25, 40.0), c(2, 0.75, 100.0), c(0, 0.5, 10.0)];
    let a = mix(BlendStrategy::Additive, 4, &clips);
    let b = mix(BlendStrategy::Additive, 4, &clips);
    assert_eq!(a, b);
}

/// it should leave every slot no clip references at exactly -1
#[test]
fn unreferenced_slots_stay_unclaimed() {
    let out = mix(BlendStrategy::Additive, 5, &[c(1, 1.0, 0.3), c(3, 0.0, 1.0)]);
    assert_eq!(out.len(), 5);
    for k in [0usize, 2, 4] {
        assert_eq!(out.as_slice()[k], UNCLAIMED);
        assert!(!out.is_claimed(k));
    }
    // present but silent clip is an authoritative zero
    assert_eq!(out.get(3), Some(0.0));
}

/// it should sum overlapping clips instead of taking the max or the last write
#[test]
fn overlapping_clips_add() {
    let out = mix(BlendStrategy::Additive, 2, &[c(1, 0.4, 50.0), c(1, 0.6, 20.0)]);
    approx(out.get(1).unwrap(), 0.4 * 50.0 + 0.6 * 20.0, 1e-5);
}

/// it should drop contributions one past the end or negative without panicking
#[test]
fn out_of_bounds_contributions_are_ignored() {
    let out = mix(BlendStrategy::Additive, 3, &[c(3, 1.0, 1.0), c(-2, 1.0, 1.0)]);
    assert_eq!(out.claimed_count(), 0);
    assert!(out.as_slice().iter().all(|v| *v == UNCLAIMED));

    let empty = mix(BlendStrategy::Additive, 0, &[c(0, 1.0, 1.0)]);
    assert!(empty.is_empty());
}

/// it should pick the strictly heaviest clip per slot in winner-take-all mode
#[test]
fn winner_take_all_per_slot() {
    let clips = [c(0, 0.3, 1.0), c(0, 0.7, 2.0), c(0, 0.5, 3.0), c(1, 0.0, 9.0)];
    let out = mix(BlendStrategy::WinnerTakeAll, 2, &clips);
    assert_eq!(out.get(0), Some(2.0));
    // zero weight never beats the initial best weight of zero
    assert_eq!(out.get(1), None);
}

/// it should resolve the wheel override with the strict-greater rule
#[test]
fn wheel_override_highest_weight_wins() {
    let a = WheelOverride::new(true, -0.5);
    let b = WheelOverride::new(true, 0.8);
    let cc = WheelOverride::new(true, 0.1);
    let out = mix_wheel_override([(0.3, a), (0.7, b), (0.5, cc)]);
    assert_eq!(out, WheelOverride::new(true, 0.8));
}

/// it should keep the earlier clip when weights tie
#[test]
fn wheel_override_tie_keeps_first() {
    let first = WheelOverride::new(true, 1.0);
    let second = WheelOverride::new(false, 2.0);
    let out = mix_wheel_override([(0.5, first), (0.5, second)]);
    assert_eq!(out, first);
}

/// it should emit an inactive zero override when nothing has positive weight
#[test]
fn wheel_override_defaults_inactive() {
    assert_eq!(
        mix_wheel_override(Vec::<(f32, WheelOverride)>::new()),
        WheelOverride::new(false, 0.0)
    );
    let out = mix_wheel_override([(0.0, WheelOverride::new(true, 3.0))]);
    assert!(!out.active);
    assert_eq!(out.value, 0.0);
}

/// it should let an inactive clip with the highest weight turn the override off
#[test]
fn wheel_override_winner_can_be_inactive() {
    let on = WheelOverride::new(true, 0.4);
    let off = WheelOverride::new(false, 0.0);
    let out = mix_wheel_override([(0.2, on), (0.9, off)]);
    assert!(!out.active);

    let mut wheel = WheelState {
        input: 0.25,
        ..Default::default()
    };
    wheel.apply_override(out);
    approx(wheel.effective(), 0.25, 1e-6);
    wheel.apply_override(on);
    approx(wheel.effective(), 0.4, 1e-6);
}

/// it should only write claimed slots onto a bound blend-shape set
#[test]
fn apply_leaves_host_values_for_unclaimed_slots() {
    let mut mesh = BlendShapeSet::new(["smile", "frown", "blink"]).unwrap();
    mesh.set_value(0, 30.0);
    mesh.set_value(1, 45.0);
    let count = mesh.target_count();
    let blink = mesh.index_of("blink").unwrap() as i32;

    let out = mix(BlendStrategy::Additive, count, &[c(blink, 1.0, 100.0), c(0, 0.0, 80.0)]);
    assert_eq!(out.apply_to(&mut mesh), 2);
    assert_eq!(mesh.weight("smile"), Some(0.0));
    assert_eq!(mesh.weight("frown"), Some(45.0));
    assert_eq!(mesh.weight("blink"), Some(100.0));
}

/// it should drive look-at rig weights through the same routine
#[test]
fn look_at_rig_uses_enum_cardinality() {
    let mut rig = LookAtRig::new([0.2; RigSlot::COUNT]);
    let clips = [
        c(RigSlot::Head.index() as i32, 0.5, 1.0),
        c(RigSlot::Head.index() as i32, 0.5, 0.5),
        c(RigSlot::COUNT as i32, 1.0, 1.0),
    ];
    let out = mix(BlendStrategy::Additive, rig.target_count(), &clips);
    out.apply_to(&mut rig);
    approx(rig.weight(RigSlot::Head), 0.75, 1e-6);
    approx(rig.weight(RigSlot::Body), 0.2, 1e-6);
    approx(rig.weight(RigSlot::Aim), 0.2, 1e-6);
}

/// it should expose the raw slot pass for custom payloads
#[test]
fn mix_slots_reports_claims_per_index() {
    let items = vec![(1, 0.5, 2.0), (5, 1.0, 1.0), (1, 0.5, 4.0)];
    let slots = mix_slots::<f32, AdditiveSlot, _>(3, items);
    assert_eq!(slots, vec![None, Some(3.0), None]);
}

/// it should apply to plain slices and ignore host slots beyond its length
#[test]
fn apply_to_short_host_slice() {
    let mut arr = TargetArray::unclaimed(3);
    arr.set(2, 0.9);
    arr.set(0, 0.1);
    let mut host = vec![0.5, 0.5];
    assert_eq!(arr.apply_to_slice(&mut host), 1);
    assert_eq!(host, vec![0.1, 0.5]);
}

/// it should serialize strategies in snake_case
#[test]
fn strategy_serde_names() {
    let s = serde_json::to_string(&BlendStrategy::WinnerTakeAll).unwrap();
    assert_eq!(s, "\"winner_take_all\"");
    let back: BlendStrategy = serde_json::from_str("\"additive\"").unwrap();
    assert_eq!(back, BlendStrategy::Additive);
}

/// it should refuse a serialized array whose claim flags do not line up
#[test]
fn target_array_json_must_be_consistent() {
    let bad = serde_json::from_str::<TargetArray>(r#"{"values":[0.5],"claimed":[true,true]}"#);
    assert!(bad.is_err());

    let arr: TargetArray =
        serde_json::from_str(r#"{"values":[0.5,-1.0],"claimed":[true,false]}"#).unwrap();
    assert_eq!(arr.get(0), Some(0.5));
    assert_eq!(arr.get(1), None);
    assert_eq!(arr.get(7), None);
    let back = serde_json::to_string(&arr).unwrap();
    assert_eq!(serde_json::from_str::<TargetArray>(&back).unwrap(), arr);
}

/// it should read back and name blend-shape and rig slots through the target trait
#[test]
fn blend_targets_report_their_slots() {
    let mut mesh = BlendShapeSet::new(["smile", "frown"]).unwrap();
    mesh.set_value(1, 12.0);
    assert_eq!(mesh.names(), ["smile".to_string(), "frown".to_string()]);
    assert_eq!(mesh.weights(), [0.0, 12.0]);
    assert_eq!(mesh.value(1), Some(12.0));
    assert_eq!(mesh.value(2), None);

    let mut rig = LookAtRig::default();
    rig.set_weight(RigSlot::Eyes, 0.6);
    assert_eq!(rig.value(RigSlot::Eyes.index()), Some(0.6));
    assert_eq!(rig.value(RigSlot::COUNT), None);

    let host = vec![0.25, 0.5];
    assert_eq!(host.value(0), Some(0.25));
    assert_eq!(host.as_slice().value(1), Some(0.5));
}
