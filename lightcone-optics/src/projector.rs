use lightcone_core::{lorentz_boost, FourVector, Metric, Scalar, Vec3};
use lightcone_frame::ObservationState;
use lightcone_geom::{rindler_metric, BackgroundMetric};
use log::warn;

/// Iteration cap for each refinement stage of the high-precision inverse.
/// The emission-time secant and the forward-residual polish each get this
/// many steps; past that the residual is dominated by the degenerate
/// configurations the closed form already handles.
pub const REFINE_MAX_ITERS: usize = 5;

/// Squared optical-distance tolerance at which the polish stage stops.
pub const REFINE_TOLERANCE: Scalar = 1e-4;

const DIV_EPSILON: Scalar = 1e-12;

/// Emission-time self-consistency (seconds) below which the inverse is
/// treated as converged.
const TIME_EPSILON: Scalar = 1e-9;

/// Motion of the object that owns a world point, in world units.
///
/// `accel` is the object's proper acceleration as a four-vector (temporal
/// component last); a zero value means inertial motion.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ObjectKinematics {
    pub velocity: Vec3,
    pub accel: FourVector,
}

/// A world point carried into the object's instantaneous rest frame, with
/// the solved emission time.
struct ObjectFrame {
    /// Observer-relative position, viw-boosted, temporal component cleared.
    riw: FourVector,
    /// Object proper acceleration, viw-boosted.
    aiw: FourVector,
    viw: Vec3,
    /// Emission time in the object frame, seconds, <= 0.
    tisw: Scalar,
}

/// Local metric for dot products against object-frame vectors: the Rindler
/// tensor sampled at the observer-frame boost of the world-relative point,
/// folded back to the world frame, through the optional background, and
/// finally into the object's frame.
fn local_metric(
    state: &ObservationState,
    rel_world: Vec3,
    viw: Vec3,
    background: Option<&dyn BackgroundMetric>,
    bg_point: Vec3,
) -> Metric {
    let c = state.c;
    let local = rindler_metric(
        state.boost.mul_vec(FourVector::from_spatial(rel_world, 0.0)),
        state.proper_accel,
        state.angular_velocity,
        c,
    );
    let mut metric = local.boosted(&state.inv_boost);
    if let Some(bg) = background {
        metric = fold_background(metric, bg.metric_at(bg_point));
    }
    metric.boosted(&lorentz_boost(viw * (-1.0 / c)))
}

/// Fold a background metric around the local one, bg^-1 * g * bg. Skipped
/// when the background tensor is singular.
fn fold_background(local: Metric, background: Metric) -> Metric {
    match background.g.inverse() {
        Some(inv) => Metric { g: inv * local.g * background.g },
        None => {
            warn!("singular background metric ignored");
            local
        }
    }
}

/// Closed-form emission-time solve: the small root of the light-contact
/// quadratic for a hyperbolically accelerating source.
fn solve_emission_time(metric: &Metric, riw: FourVector, aiw: FourVector, c: Scalar) -> Scalar {
    let c_sqrd = c * c;

    // The squared terms are magnitudes (spatial signature is negative, so
    // negate); the cross term stays signed so the light-contact quadratic
    // keeps its orientation along the acceleration axis.
    let riw_dot_riw = -metric.dot(riw, riw);
    let aiw_dot_aiw = -metric.dot(aiw, aiw);
    let riw_dot_aiw = metric.dot(riw, aiw);

    let denom = c_sqrd - riw_dot_aiw;
    if denom.abs() > DIV_EPSILON {
        let sqrt_arg = riw_dot_riw
            * (c_sqrd - riw_dot_aiw + aiw_dot_aiw * riw_dot_riw / (4.0 * c_sqrd))
            / (denom * denom);
        if sqrt_arg > 0.0 {
            return -sqrt_arg.sqrt();
        }
        // Degenerate light-cone intersection: drop the acceleration
        // correction and keep the inertial delay.
        warn!("degenerate emission-time radicand {sqrt_arg}; using inertial delay");
    } else {
        warn!("near-singular emission-time denominator; using inertial delay");
    }
    -riw_dot_riw.max(0.0).sqrt() / c
}

/// Carry `world_point` into the object's rest frame and solve for the
/// metric-weighted emission time there.
fn object_frame(
    state: &ObservationState,
    world_point: Vec3,
    kin: &ObjectKinematics,
    background: Option<&dyn BackgroundMetric>,
) -> ObjectFrame {
    let c = state.c;
    let rel = world_point - state.position;

    let viw = kin.velocity;
    let viw_boost = lorentz_boost(viw * (1.0 / c));

    let mut riw = viw_boost.mul_vec(FourVector::from_spatial(rel, 0.0));
    riw.t = 0.0;
    let aiw = viw_boost.mul_vec(kin.accel);

    let metric = local_metric(state, rel, viw, background, world_point);
    let tisw = solve_emission_time(&metric, riw, aiw, c);

    ObjectFrame { riw, aiw, viw, tisw }
}

/// Hyperbolic-motion displacement along the acceleration axis at object-frame
/// time `t`: where an accelerating worldline sits relative to its t = 0
/// position, x(t) = (c^2/a)(sqrt(1 + (a t / c)^2) - 1).
fn hyperbolic_offset(aiw: FourVector, t: Scalar, c: Scalar) -> Vec3 {
    let a = aiw.spatial();
    let a_mag = a.norm();
    if a_mag <= DIV_EPSILON {
        return Vec3::ZERO;
    }
    let at_over_c = a_mag * t / c;
    a * ((c * c) / (a_mag * a_mag) * ((1.0 + at_over_c * at_over_c).sqrt() - 1.0))
}

/// Where (relative to the observer, world orientation) and when the light
/// now arriving from the object frame actually left it.
fn emission_event(frame: &ObjectFrame, c: Scalar) -> FourVector {
    let offset = hyperbolic_offset(frame.aiw, frame.tisw, c);
    let mut riw = frame.riw - FourVector::from_spatial(offset, 0.0);
    riw.t = c * frame.tisw;
    lorentz_boost(frame.viw * (-1.0 / c)).mul_vec(riw)
}

/// Aberration skew along the observer's motion axis. Forward direction:
/// world-frame emission offset to optical position.
fn skew_optical(state: &ObservationState, spatial: Vec3, tisw_world: Scalar) -> Vec3 {
    let vpc = state.velocity * (-1.0 / state.c);
    let speed = vpc.norm();
    if speed <= DIV_EPSILON {
        return spatial;
    }
    let uhat = vpc * (1.0 / speed);
    let along = spatial.dot(uhat);
    let newz = (along + speed * state.c * tisw_world) / (1.0 - speed * speed).sqrt();
    spatial + uhat * (newz - along)
}

/// Inverse of [`skew_optical`] for a given world-frame emission time.
fn unskew_optical(state: &ObservationState, spatial: Vec3, tisw: Scalar) -> Vec3 {
    let vpc = state.velocity * (-1.0 / state.c);
    let speed = vpc.norm();
    if speed <= DIV_EPSILON {
        return spatial;
    }
    let uhat = vpc * (1.0 / speed);
    let along = spatial.dot(uhat);
    let newz = along * (1.0 - speed * speed).sqrt() - speed * state.c * tisw;
    spatial + uhat * (newz - along)
}

/// Project a world point into optical space: the position where the observer
/// visually perceives it right now. The retarded time is discarded here;
/// [`retarded_time`] exposes it.
pub fn world_to_optical(
    state: &ObservationState,
    world_point: Vec3,
    kin: &ObjectKinematics,
    background: Option<&dyn BackgroundMetric>,
) -> Vec3 {
    let frame = object_frame(state, world_point, kin, background);
    let ev = emission_event(&frame, state.c);
    skew_optical(state, ev.spatial(), ev.t / state.c) + state.position
}

/// The world-frame retarded time of the image of a world point: how long ago
/// (negative seconds) the light now arriving left it.
pub fn retarded_time(
    state: &ObservationState,
    world_point: Vec3,
    kin: &ObjectKinematics,
    background: Option<&dyn BackgroundMetric>,
) -> Scalar {
    let frame = object_frame(state, world_point, kin, background);
    emission_event(&frame, state.c).t / state.c
}

/// One closed-form inverse pass for a candidate world-frame emission time,
/// plus the self-consistency residual of that candidate.
struct InverseEstimate {
    /// Reconstructed world position; `t` carries c times the candidate
    /// emission time.
    world: FourVector,
    /// Re-solved object-frame emission time minus the candidate's. Zero at
    /// the true emission time, where the reconstruction is exact.
    time_mismatch: Scalar,
}

fn closed_form_inverse(
    state: &ObservationState,
    optical_point: Vec3,
    kin: &ObjectKinematics,
    background: Option<&dyn BackgroundMetric>,
    world_time: Scalar,
) -> InverseEstimate {
    let c = state.c;
    let rel = unskew_optical(state, optical_point - state.position, world_time);

    let viw_boost = lorentz_boost(kin.velocity * (1.0 / c));
    let ev = viw_boost.mul_vec(FourVector::from_spatial(rel, c * world_time));
    let aiw = viw_boost.mul_vec(kin.accel);

    // Undo the hyperbolic displacement at the object-frame emission time,
    // then return to coordinate time zero on the object's worldline.
    let t_obj = ev.t / c;
    let riw = FourVector::from_spatial(ev.spatial() + hyperbolic_offset(aiw, t_obj, c), 0.0);
    let back = lorentz_boost(kin.velocity * (-1.0 / c)).mul_vec(riw);
    let world = state.position + back.spatial() - kin.velocity * (back.t / c);

    // How far the candidate emission time is from the one the forward solve
    // would produce at the reconstructed point.
    let metric = local_metric(state, world - state.position, kin.velocity, background, world);
    let time_mismatch = solve_emission_time(&metric, riw, aiw, c) - t_obj;

    InverseEstimate {
        world: FourVector::from_spatial(world, c * world_time),
        time_mismatch,
    }
}

/// Closed-form inverse of [`world_to_optical`], seeded with the optical
/// light-distance emission time `-|optical - observer|/c`. Exact for an
/// observer at rest and an inertial object; approximate otherwise — the
/// high-precision variant refines the emission time until the two agree.
pub fn optical_to_world(
    state: &ObservationState,
    optical_point: Vec3,
    kin: &ObjectKinematics,
    background: Option<&dyn BackgroundMetric>,
) -> FourVector {
    let t = -(optical_point - state.position).norm() / state.c;
    closed_form_inverse(state, optical_point, kin, background, t).world
}

/// Inverse projection with refinement. Two bounded stages:
///
/// 1. a secant iteration on the emission-time mismatch — the closed form is
///    exact at the true emission time, so driving the mismatch to zero
///    recovers the world point even for fast accelerating objects;
/// 2. a forward-projection polish that steps by half the optical residual
///    while the error improves.
///
/// Always returns the best evaluated candidate, converged or not.
pub fn optical_to_world_high_precision(
    state: &ObservationState,
    optical_point: Vec3,
    kin: &ObjectKinematics,
    background: Option<&dyn BackgroundMetric>,
) -> FourVector {
    let c = state.c;
    let mut t_prev = -(optical_point - state.position).norm() / c;
    let mut best = closed_form_inverse(state, optical_point, kin, background, t_prev);

    let mut psi_prev = best.time_mismatch;
    if psi_prev.is_finite() && psi_prev.abs() > TIME_EPSILON {
        let mut t = t_prev + psi_prev;
        for _ in 0..REFINE_MAX_ITERS {
            let est = closed_form_inverse(state, optical_point, kin, background, t);
            let psi = est.time_mismatch;
            if !psi.is_finite() {
                break;
            }
            if psi.abs() < best.time_mismatch.abs() {
                best = est;
            }
            let dpsi = psi - psi_prev;
            if psi.abs() <= TIME_EPSILON || dpsi.abs() <= DIV_EPSILON {
                break;
            }
            let t_next = t - psi * (t - t_prev) / dpsi;
            t_prev = t;
            psi_prev = psi;
            t = t_next;
        }
    }

    let refined_t = best.world.t;
    let mut estimate = best.world.spatial();
    let mut best_spatial = estimate;
    let mut best_err = Scalar::INFINITY;
    for _ in 0..REFINE_MAX_ITERS {
        let residual = optical_point - world_to_optical(state, estimate, kin, background);
        let err = residual.norm_sqr();
        if !err.is_finite() {
            break;
        }
        if err < best_err {
            best_err = err;
            best_spatial = estimate;
        } else {
            break;
        }
        if err < REFINE_TOLERANCE {
            break;
        }
        estimate += residual * 0.5;
    }

    FourVector::from_spatial(best_spatial, refined_t)
}
