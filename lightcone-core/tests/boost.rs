use lightcone_core::{lorentz_boost, FourVector, Matrix4, Vec3};
use proptest::prelude::*;

fn assert_matrix_close(a: &Matrix4, b: &Matrix4, tol: f64) {
    for i in 0..4 {
        for j in 0..4 {
            assert!(
                (a.m[i][j] - b.m[i][j]).abs() < tol,
                "entry ({i},{j}) differs: {} vs {}",
                a.m[i][j],
                b.m[i][j]
            );
        }
    }
}

// Golden: zero velocity produces exactly the identity.
#[test]
fn golden_identity_at_rest() {
    assert_eq!(lorentz_boost(Vec3::ZERO), Matrix4::IDENTITY);
}

// Golden: 1D boost entries match gamma for beta = 0.6.
#[test]
fn golden_axis_boost_entries() {
    let m = lorentz_boost(Vec3::new(0.6, 0.0, 0.0)).m;
    let gamma = 1.25;
    assert!((m[0][0] - gamma).abs() < 1e-12);
    assert!((m[0][3] + gamma * 0.6).abs() < 1e-12);
    assert!((m[3][0] + gamma * 0.6).abs() < 1e-12);
    assert!((m[3][3] - gamma).abs() < 1e-12);
    assert!((m[1][1] - 1.0).abs() < 1e-12 && (m[2][2] - 1.0).abs() < 1e-12);
}

// Golden: negated velocity is the structural inverse.
#[test]
fn golden_negated_velocity_inverts() {
    let v = Vec3::new(0.4, -0.3, 0.5);
    let product = lorentz_boost(v) * lorentz_boost(-v);
    assert_matrix_close(&product, &Matrix4::IDENTITY, 1e-9);
}

proptest! {
    // Boost times its matrix inverse is the identity up to 0.999c.
    #[test]
    fn prop_boost_inverse(
        speed in 0.0_f64..0.999,
        polar in 0.0_f64..std::f64::consts::PI,
        azimuth in 0.0_f64..std::f64::consts::TAU
    ) {
        let v = Vec3::new(
            polar.sin() * azimuth.cos(),
            polar.sin() * azimuth.sin(),
            polar.cos(),
        ) * speed;
        let m = lorentz_boost(v);
        let inv = m.inverse().expect("boost is invertible");
        let product = m * inv;
        for i in 0..4 {
            for j in 0..4 {
                let expect = if i == j { 1.0 } else { 0.0 };
                prop_assert!((product.m[i][j] - expect).abs() < 1e-6);
            }
        }
    }

    // The boost preserves the Minkowski inner product.
    #[test]
    fn prop_minkowski_preserved(
        vx in -0.5_f64..0.5, vy in -0.5_f64..0.5, vz in -0.5_f64..0.5,
        ax in -10.0_f64..10.0, ay in -10.0_f64..10.0,
        az in -10.0_f64..10.0, at in -10.0_f64..10.0,
        bx in -10.0_f64..10.0, by in -10.0_f64..10.0,
        bz in -10.0_f64..10.0, bt in -10.0_f64..10.0
    ) {
        let m = lorentz_boost(Vec3::new(vx, vy, vz));
        let a = FourVector::new(ax, ay, az, at);
        let b = FourVector::new(bx, by, bz, bt);
        let before = a.minkowski_dot(b);
        let after = m.mul_vec(a).minkowski_dot(m.mul_vec(b));
        prop_assert!((before - after).abs() < 1e-8, "dot not preserved: {before} vs {after}");
    }
}
