//! Motion planning: turns an animation command and its target's current
//! state into a playable `AnimationPlan`, and evaluates plans at a given
//! progress.

use std::f64::consts::TAU;

use glam::{DVec2, DVec3};
use log::warn;

use super::command::Command;
use super::symbols;
use crate::types::{Animation, AnimationPlan, RateFunc, SceneObject, Transform};

const SPIN_TIME: f64 = 2.0;
const GLIDE_TIME: f64 = 2.0;
const ORBIT_TIME: f64 = 4.0;

pub fn spin_duration(speed: f64) -> f64 {
    SPIN_TIME / speed
}

pub fn glide_duration(speed: f64) -> f64 {
    GLIDE_TIME / speed
}

pub fn orbit_duration(speed: f64) -> f64 {
    ORBIT_TIME / speed
}

/// Position along one full counter-clockwise turn around the origin.
///
/// Pure in `(radius, initial_angle, t)`: `t = 0` and `t = 1` both give the
/// starting point, `t = 0.5` the antipode.
pub fn orbit_position(radius: f64, initial_angle: f64, t: f64) -> DVec3 {
    let angle = initial_angle + t * TAU;
    DVec3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
}

pub struct MotionPlanner;

impl MotionPlanner {
    /// Plan an animation-phase command against its resolved target.
    ///
    /// `speed` must already be validated as positive. Returns `None` when the
    /// command resolves to nothing playable (a glide to an unknown position).
    pub fn plan(command: &Command, target: &SceneObject, speed: f64) -> Option<AnimationPlan> {
        match command {
            Command::Spin { .. } => Some(AnimationPlan {
                target: target.id,
                animation: Animation::Rotate {
                    angle: TAU,
                    about: target.center,
                },
                duration: spin_duration(speed),
                rate: RateFunc::Linear,
            }),
            Command::Glide { destination, .. } => {
                let Some(dest) = destination.as_deref().and_then(symbols::position) else {
                    warn!(
                        "glide on {:?}: unknown destination {:?}, skipped",
                        target.key, destination
                    );
                    return None;
                };
                Some(AnimationPlan {
                    target: target.id,
                    animation: Animation::MoveTo {
                        from: target.center,
                        destination: dest,
                    },
                    duration: glide_duration(speed),
                    rate: RateFunc::Smooth,
                })
            }
            _ => Some(Self::orbit(target, speed)),
        }
    }

    fn orbit(target: &SceneObject, speed: f64) -> AnimationPlan {
        let DVec2 { x, y } = target.center.truncate();
        AnimationPlan {
            target: target.id,
            animation: Animation::Orbit {
                radius: (x * x + y * y).sqrt(),
                initial_angle: y.atan2(x),
            },
            duration: orbit_duration(speed),
            rate: RateFunc::Linear,
        }
    }

    /// Transform of the target once the plan has fully played.
    pub fn finish(plan: &AnimationPlan, start: Transform) -> Transform {
        Self::sample(&plan.animation, start, 1.0)
    }

    /// Evaluate an animation at eased progress `t` from its starting transform.
    pub fn sample(animation: &Animation, start: Transform, t: f64) -> Transform {
        match animation {
            Animation::Rotate { angle, about } => {
                let turn = DVec2::from_angle(angle * t);
                let offset = turn.rotate((start.center - *about).truncate());
                let rotation = start.rotation + angle * t;
                Transform {
                    center: *about + offset.extend(start.center.z - about.z),
                    rotation: if t >= 1.0 { rotation.rem_euclid(TAU) } else { rotation },
                }
            }
            Animation::MoveTo { from, destination } => Transform {
                center: from.lerp(*destination, t),
                rotation: start.rotation,
            },
            Animation::Orbit {
                radius,
                initial_angle,
            } => Transform {
                center: orbit_position(*radius, *initial_angle, t),
                rotation: start.rotation,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::types::{Geometry, NamedColor, ObjectId};

    fn object_at(center: DVec3) -> SceneObject {
        SceneObject {
            id: ObjectId(0),
            key: "a".into(),
            geometry: Geometry::Circle { radius: 1.0 },
            color: NamedColor::White,
            rgb: NamedColor::White.rgb(),
            center,
        }
    }

    fn assert_point(actual: DVec3, expected: DVec3) {
        assert_abs_diff_eq!(actual.x, expected.x, epsilon = 1e-9);
        assert_abs_diff_eq!(actual.y, expected.y, epsilon = 1e-9);
        assert_abs_diff_eq!(actual.z, expected.z, epsilon = 1e-9);
    }

    #[test]
    fn orbit_closes_and_passes_the_antipode() {
        let start = DVec3::new(1.0, 1.0, 0.0);
        let radius = 2f64.sqrt();
        let theta = 1f64.atan2(1.0);

        assert_point(orbit_position(radius, theta, 0.0), start);
        assert_point(orbit_position(radius, theta, 1.0), start);
        assert_point(orbit_position(radius, theta, 0.5), -start);
        assert_point(
            orbit_position(radius, theta, 0.25),
            DVec3::new(-1.0, 1.0, 0.0),
        );
    }

    #[test]
    fn orbit_plan_uses_distance_from_origin() {
        let plan = MotionPlanner::plan(
            &Command::Orbit {
                target: Some("a".into()),
                speed: Some(2.0),
            },
            &object_at(DVec3::new(0.0, -3.0, 0.0)),
            2.0,
        )
        .unwrap();

        assert_eq!(plan.duration, 2.0);
        assert_eq!(plan.rate, RateFunc::Linear);
        match plan.animation {
            Animation::Orbit {
                radius,
                initial_angle,
            } => {
                assert_abs_diff_eq!(radius, 3.0);
                assert_abs_diff_eq!(initial_angle, -PI / 2.0);
            }
            other => panic!("expected orbit, got {other:?}"),
        }
    }

    #[test]
    fn durations_shrink_with_speed() {
        assert_eq!(spin_duration(2.0), 1.0);
        assert_eq!(glide_duration(4.0), 0.5);
        assert_eq!(orbit_duration(1.0), 4.0);
        assert!(orbit_duration(3.0) < orbit_duration(2.0));
    }

    #[test]
    fn glide_to_unknown_position_is_skipped() {
        let plan = MotionPlanner::plan(
            &Command::Glide {
                target: Some("a".into()),
                destination: Some("upstairs".into()),
                speed: Some(1.0),
            },
            &object_at(DVec3::ZERO),
            1.0,
        );
        assert!(plan.is_none());
    }

    #[test]
    fn spin_keeps_center_and_completes_a_turn() {
        let center = DVec3::new(1.0, -1.0, 0.0);
        let animation = Animation::Rotate {
            angle: TAU,
            about: center,
        };
        let start = Transform {
            center,
            rotation: 0.0,
        };

        let half = MotionPlanner::sample(&animation, start, 0.5);
        assert_point(half.center, center);
        assert_abs_diff_eq!(half.rotation, PI);

        let done = MotionPlanner::sample(&animation, start, 1.0);
        assert_abs_diff_eq!(done.rotation, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn glide_ends_on_destination() {
        let plan = MotionPlanner::plan(
            &Command::Glide {
                target: Some("a".into()),
                destination: Some("topRight".into()),
                speed: Some(1.0),
            },
            &object_at(DVec3::ZERO),
            1.0,
        )
        .unwrap();

        assert_eq!(plan.rate, RateFunc::Smooth);
        let end = MotionPlanner::finish(
            &plan,
            Transform {
                center: DVec3::ZERO,
                rotation: 0.0,
            },
        );
        assert_point(end.center, DVec3::new(1.0, 1.0, 0.0));
    }
}
