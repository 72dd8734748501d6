use lightcone_core::{Matrix4, Vec3, Velocity3};
use lightcone_frame::ObservationState;
use proptest::prelude::*;

// Golden: at beta = 0.6 one second of proper time is 1.25 seconds of world
// time, and the position advances by v * world-time.
#[test]
fn golden_time_dilation() {
    let mut state = ObservationState::new(100.0).unwrap();
    state.set_velocity(Velocity3::new(Vec3::new(60.0, 0.0, 0.0), 100.0).unwrap());
    state.tick(0.5);
    assert!((state.proper_time - 0.5).abs() < 1e-12);
    assert!((state.world_time - 0.625).abs() < 1e-12);
    assert!((state.position.x - 37.5).abs() < 1e-9);
    assert_eq!(state.position.y, 0.0);
    assert_eq!(state.position.z, 0.0);
}

#[test]
fn golden_rest_state_is_trivial() {
    let mut state = ObservationState::new(100.0).unwrap();
    state.tick(1.0);
    assert_eq!(state.boost, Matrix4::IDENTITY);
    assert_eq!(state.inv_boost, Matrix4::IDENTITY);
    assert!((state.world_time - 1.0).abs() < 1e-12);
    assert_eq!(state.position, Vec3::ZERO);
}

// A drifted superluminal velocity is pulled back to the clamp at the top of
// the tick, before any of it reaches the clocks.
#[test]
fn clamps_drifted_speed() {
    let mut state = ObservationState::new(100.0).unwrap();
    state.velocity = Vec3::new(150.0, 0.0, 0.0);
    state.tick(0.1);
    assert!((state.velocity.norm() - state.max_speed).abs() < 1e-9);
    assert!(state.world_time.is_finite());
    assert!(state.position.is_finite());
}

// A NaN velocity makes the time-dilation factor NaN; the tick must leave the
// clocks and position untouched instead of poisoning them.
#[test]
fn nan_velocity_suppresses_accumulation() {
    let mut state = ObservationState::new(100.0).unwrap();
    state.position = Vec3::new(1.0, 2.0, 3.0);
    state.velocity = Vec3::new(f64::NAN, 0.0, 0.0);
    state.tick(1.0);
    assert_eq!(state.proper_time, 0.0);
    assert_eq!(state.world_time, 0.0);
    assert_eq!(state.position, Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn invalid_dt_is_ignored() {
    let mut state = ObservationState::new(100.0).unwrap();
    state.tick(-1.0);
    state.tick(f64::NAN);
    assert_eq!(state.proper_time, 0.0);
    assert_eq!(state.world_time, 0.0);
}

// Golden: a quarter-turn about +y carries +z forward onto +x, and the
// derived angular velocity reports that turn rate.
#[test]
fn golden_quarter_turn() {
    let mut state = ObservationState::new(100.0).unwrap();
    state.queue_rotation(Vec3::new(0.0, std::f64::consts::FRAC_PI_2, 0.0));
    state.tick(1.0);
    assert!((state.forward.x - 1.0).abs() < 1e-12);
    assert!(state.forward.y.abs() < 1e-12);
    assert!(state.forward.z.abs() < 1e-12);
    assert!((state.angular_velocity.y - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
}

// Rotation deltas queued within one tick accumulate; the queue drains after.
#[test]
fn queued_rotations_accumulate_and_drain() {
    let mut state = ObservationState::new(100.0).unwrap();
    state.queue_rotation(Vec3::new(0.0, std::f64::consts::FRAC_PI_4, 0.0));
    state.queue_rotation(Vec3::new(0.0, std::f64::consts::FRAC_PI_4, 0.0));
    state.tick(1.0);
    assert!((state.forward.x - 1.0).abs() < 1e-12);
    state.tick(1.0);
    assert!((state.forward.x - 1.0).abs() < 1e-12);
    assert_eq!(state.angular_velocity, Vec3::ZERO);
}

#[test]
fn rejects_invalid_speed_of_light() {
    assert!(ObservationState::new(0.0).is_err());
    assert!(ObservationState::new(f64::NAN).is_err());
}

#[test]
fn set_max_speed_validates() {
    let mut state = ObservationState::new(100.0).unwrap();
    assert!(state.set_max_speed(100.0).is_err());
    assert!(state.set_max_speed(50.0).is_ok());
    assert!((state.max_speed - 50.0).abs() < 1e-12);
}

proptest! {
    // Sustained proper acceleration never pushes the stored speed to c: the
    // velocity update goes through the rapidity map and relativistic
    // composition, both bounded below c.
    #[test]
    fn prop_sustained_acceleration_stays_subluminal(
        ax in -20.0_f64..20.0, ay in -20.0_f64..20.0, az in -20.0_f64..20.0,
        ticks in 1_usize..200
    ) {
        let mut state = ObservationState::new(100.0).unwrap();
        state.proper_accel = Vec3::new(ax, ay, az);
        for _ in 0..ticks {
            state.tick(0.05);
        }
        prop_assert!(state.velocity.norm() < 100.0);
        prop_assert!(state.world_time >= state.proper_time);
        prop_assert!(state.position.is_finite());
    }

    // The boost caches stay mutual inverses as the state evolves.
    #[test]
    fn prop_boost_caches_are_inverse(
        vx in -70.0_f64..70.0, vy in -40.0_f64..40.0, vz in -40.0_f64..40.0
    ) {
        let mut state = ObservationState::new(100.0).unwrap();
        if let Ok(v) = Velocity3::new(Vec3::new(vx, vy, vz), 100.0) {
            state.set_velocity(v);
        }
        state.tick(0.1);
        let product = state.boost * state.inv_boost;
        for i in 0..4 {
            for j in 0..4 {
                let expect = if i == j { 1.0 } else { 0.0 };
                prop_assert!((product.m[i][j] - expect).abs() < 1e-9);
            }
        }
    }
}
