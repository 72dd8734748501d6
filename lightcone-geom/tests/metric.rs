use lightcone_core::{FourVector, Metric, Vec3};
use lightcone_geom::{rindler_metric, BackgroundMetric, FlatBackground};
use proptest::prelude::*;

// Golden: no acceleration, no rotation -> exactly Minkowski, anywhere.
#[test]
fn golden_flat_at_rest() {
    let r = FourVector::new(123.0, -45.0, 6.7, 89.0);
    let m = rindler_metric(r, Vec3::ZERO, Vec3::ZERO, 100.0);
    assert_eq!(m, Metric::minkowski());
}

// Golden: the linear factor shows up in the time-time entry.
#[test]
fn golden_linear_factor() {
    let c = 10.0;
    let a = Vec3::new(2.0, 0.0, 0.0);
    let r = FourVector::new(5.0, 0.0, 0.0, 0.0);
    let m = rindler_metric(r, a, Vec3::ZERO, c);
    // lin = 1 + (2*5)/100 = 1.1
    assert!((m.g.m[3][3] - 1.21).abs() < 1e-12);
    // spatial block untouched
    for i in 0..3 {
        assert!((m.g.m[i][i] + 1.0).abs() < 1e-12);
        assert!(m.g.m[i][3].abs() < 1e-12);
    }
}

#[test]
fn flat_background_is_minkowski_everywhere() {
    let bg = FlatBackground;
    assert_eq!(bg.metric_at(Vec3::new(1.0, 2.0, 3.0)), Metric::minkowski());
}

proptest! {
    // The metric is symmetric for any acceleration/rotation combination.
    #[test]
    fn prop_metric_symmetric(
        rx in -50.0_f64..50.0, ry in -50.0_f64..50.0, rz in -50.0_f64..50.0,
        ax in -5.0_f64..5.0, ay in -5.0_f64..5.0, az in -5.0_f64..5.0,
        wx in -2.0_f64..2.0, wy in -2.0_f64..2.0, wz in -2.0_f64..2.0
    ) {
        let m = rindler_metric(
            FourVector::new(rx, ry, rz, 0.0),
            Vec3::new(ax, ay, az),
            Vec3::new(wx, wy, wz),
            100.0,
        );
        for i in 0..4 {
            for j in 0..4 {
                prop_assert!((m.g.m[i][j] - m.g.m[j][i]).abs() < 1e-12);
            }
        }
    }

    // Metric-weighted dot with the Minkowski tensor matches minkowski_dot.
    #[test]
    fn prop_minkowski_dot_agrees(
        x in -10.0_f64..10.0, y in -10.0_f64..10.0,
        z in -10.0_f64..10.0, t in -10.0_f64..10.0
    ) {
        let v = FourVector::new(x, y, z, t);
        let flat = Metric::minkowski();
        prop_assert!((flat.dot(v, v) - v.minkowski_dot(v)).abs() < 1e-9);
    }
}
