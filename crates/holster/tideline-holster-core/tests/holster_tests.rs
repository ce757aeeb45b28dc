use tideline_holster_core::{
    AxisMotion, GrabEvent, Holster, HolsterConfig, HolsterError, HolsterEvent, HolsterInput,
    HolsterPhase, HolsterSample, JointConstraints,
};

fn holster(freeze_frame_count: u32) -> Holster {
    Holster::new(HolsterConfig {
        freeze_frame_count,
        ..Default::default()
    })
    .unwrap()
}

fn at(h: &Holster, offset: [f32; 3]) -> HolsterInput {
    HolsterInput::new(h.sample(offset))
}

/// Grab the docked prop and let go of it at `offset`.
fn grab_and_drop(h: &mut Holster, offset: [f32; 3]) {
    let grab = at(h, [0.0; 3]).with_event(GrabEvent::Grab);
    h.tick(&grab);
    let release = at(h, offset).with_event(GrabEvent::Release);
    h.tick(&release);
}

/// it should start docked with every axis locked
#[test]
fn starts_holstered() {
    let h = holster(10);
    assert_eq!(h.phase(), HolsterPhase::Holstered);
    assert!(h.joints().is_locked());
    assert!(!h.is_kinematic());
}

/// it should dock on the next tick once a loose prop is within 0.1 of rest
#[test]
fn docks_when_close_and_not_grabbed() {
    let mut h = holster(10);
    grab_and_drop(&mut h, [0.5, 0.0, 0.0]);
    assert_eq!(h.phase(), HolsterPhase::Free);
    assert_eq!(h.grab_count(), 0);

    let out = h.tick(&at(&h, [0.05, 0.0, 0.0]));
    assert_eq!(out.phase, HolsterPhase::Holstered);
    assert_eq!(out.events, vec![HolsterEvent::Docked]);
    assert!(out.joints.axes().iter().all(|a| *a == AxisMotion::Locked));
    assert_eq!(h.freeze_counter(), 0);
}

/// it should dock in the same tick as a release close to rest
#[test]
fn release_near_rest_docks_immediately() {
    let mut h = holster(10);
    h.tick(&at(&h, [0.0; 3]).with_event(GrabEvent::Grab));
    let out = h.tick(&at(&h, [0.0, 0.02, 0.03]).with_event(GrabEvent::Release));
    assert_eq!(
        out.events,
        vec![HolsterEvent::Released, HolsterEvent::Docked]
    );
    assert!(h.is_holstered());
}

/// it should free all six axes on grab
#[test]
fn grab_frees_joint() {
    let mut h = holster(10);
    let out = h.tick(&at(&h, [0.0; 3]).with_event(GrabEvent::Grab));
    assert_eq!(out.phase, HolsterPhase::Free);
    assert_eq!(out.joints, JointConstraints::FREE);
    assert!(!h.is_holstered());
    assert_eq!(out.events, vec![HolsterEvent::Grabbed]);
}

/// it should freeze for freeze_frame_count ticks after a drop, then release bodies
/// while keeping the joint locked
#[test]
fn force_return_after_drop() {
    let mut h = holster(3);
    let dropped = [0.3, -0.2, 0.0];
    grab_and_drop(&mut h, dropped);

    assert!(h.is_force_returning());
    assert_eq!(h.freeze_counter(), 3);
    assert!(h.is_kinematic());
    assert_eq!(h.phase(), HolsterPhase::Frozen);

    for remaining in [2u32, 1] {
        let out = h.tick(&at(&h, dropped));
        assert!(out.kinematic);
        assert_eq!(out.reposition, Some([0.0; 3]));
        assert_eq!(h.freeze_counter(), remaining);
    }

    let out = h.tick(&at(&h, dropped));
    assert!(!out.kinematic);
    assert!(out.joints.is_locked());
    assert_eq!(out.phase, HolsterPhase::ForceReturning);
    assert_eq!(out.events, vec![HolsterEvent::FreezeReleased]);

    // still far away: keeps the joint locked every tick
    let out = h.tick(&at(&h, [0.2, -0.1, 0.0]));
    assert_eq!(out.phase, HolsterPhase::ForceReturning);
    assert!(out.joints.is_locked());

    let out = h.tick(&at(&h, [0.01, 0.0, 0.0]));
    assert_eq!(out.phase, HolsterPhase::Holstered);
    assert!(!h.is_force_returning());
}

/// it should also force-return a prop carried out of range
#[test]
fn out_of_range_triggers_force_return() {
    let mut h = holster(2);
    grab_and_drop(&mut h, [1.5, 0.0, 0.0]);
    assert!(h.is_force_returning());
    assert_eq!(h.phase(), HolsterPhase::Frozen);
}

/// it should let a grab cancel a freeze and force-return immediately
#[test]
fn grab_overrides_freeze() {
    let mut h = holster(30);
    grab_and_drop(&mut h, [0.0, -0.5, 0.0]);
    assert_eq!(h.phase(), HolsterPhase::Frozen);

    let out = h.tick(&at(&h, [0.0, -0.5, 0.0]).with_event(GrabEvent::Grab));
    assert_eq!(h.freeze_counter(), 0);
    assert!(!h.is_force_returning());
    assert!(!h.is_holstered());
    assert!(!out.kinematic);
    assert!(out.joints.is_free());
}

/// it should stay idle while held, even when below the drop height
#[test]
fn held_prop_is_idle() {
    let mut h = holster(5);
    h.tick(&at(&h, [0.0; 3]).with_event(GrabEvent::Grab));
    let out = h.tick(&at(&h, [0.0, -0.4, 0.0]));
    assert_eq!(out.phase, HolsterPhase::Free);
    assert!(out.events.is_empty());
    assert!(out.joints.is_free());
}

/// it should only dock when the last of two hands lets go
#[test]
fn two_handed_grab_needs_both_releases() {
    let mut h = holster(5);
    h.tick(&at(&h, [0.0; 3]).with_event(GrabEvent::Grab));
    h.tick(&at(&h, [0.0; 3]).with_event(GrabEvent::Grab));
    assert_eq!(h.grab_count(), 2);

    h.tick(&at(&h, [0.0; 3]).with_event(GrabEvent::Release));
    assert!(!h.is_holstered());
    h.tick(&at(&h, [0.0; 3]).with_event(GrabEvent::Release));
    assert!(h.is_holstered());
}

/// it should tolerate grab bookkeeping errors without panicking
#[test]
fn grab_count_violations_are_tolerated() {
    let mut h = holster(5);
    for _ in 0..3 {
        h.tick(&at(&h, [0.0; 3]).with_event(GrabEvent::Grab));
    }
    assert_eq!(h.grab_count(), 3);

    let mut h = holster(5);
    let out = h.tick(&at(&h, [0.0; 3]).with_event(GrabEvent::Release));
    assert_eq!(h.grab_count(), 0);
    assert!(out.events.is_empty());
    assert!(h.is_holstered());
}

/// it should snap back into the holster on a scripted dock
#[test]
fn force_dock_from_anywhere() {
    let mut h = holster(5);
    h.tick(&at(&h, [0.0; 3]).with_event(GrabEvent::Grab));
    let out = h.force_dock();
    assert_eq!(out.phase, HolsterPhase::Holstered);
    assert_eq!(h.grab_count(), 0);
    assert!(out.joints.is_locked());
}

/// it should derive distance, height and range from an offset
#[test]
fn sample_from_offset() {
    let s = HolsterSample::from_offset([3.0, -4.0, 0.0], 4.0);
    assert_eq!(s.distance_from_rest, 5.0);
    assert_eq!(s.vertical_offset, -4.0);
    assert!(s.out_of_range);
}

/// it should reject invalid configs and load partial JSON configs with defaults
#[test]
fn config_validation_and_json() {
    let bad = HolsterConfig {
        dock_distance: -1.0,
        ..Default::default()
    };
    assert_eq!(
        Holster::new(bad).unwrap_err(),
        HolsterError::InvalidConfig {
            field: "dock_distance",
            value: -1.0
        }
    );

    let cfg: HolsterConfig = serde_json::from_str(r#"{ "freeze_frame_count": 4 }"#).unwrap();
    assert_eq!(cfg.freeze_frame_count, 4);
    assert_eq!(cfg.dock_distance, 0.1);
}

/// it should stay idle while held even when carried out of range
#[test]
fn held_prop_out_of_range_is_idle() {
    let mut h = holster(5);
    h.tick(&at(&h, [0.0; 3]).with_event(GrabEvent::Grab));
    let out = h.tick(&at(&h, [3.0, -2.0, 0.0]));
    assert_eq!(out.phase, HolsterPhase::Free);
    assert!(out.events.is_empty());
    assert_eq!(out.reposition, None);
    assert!(!h.is_force_returning());
}

/// it should return a dropped prop to the rest offset it had when first grabbed
#[test]
fn first_tick_grab_keeps_rest_offset() {
    let mut h = holster(3);
    h.tick(&at(&h, [0.02, 0.01, 0.0]).with_event(GrabEvent::Grab));
    let out = h.tick(&at(&h, [0.0, -0.5, 0.0]).with_event(GrabEvent::Release));
    assert_eq!(out.phase, HolsterPhase::Frozen);
    assert_eq!(out.reposition, Some([0.02, 0.01, 0.0]));
}
