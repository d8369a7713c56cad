//! Sampler — the per-frame update mechanism.
//!
//! Takes a `Program` (from the engine) and produces a `SampledTimeline`
//! (serializable, for a renderer).
//!
//! The sampler is pure and stateless. Given the same input, it always
//! produces the same output. It computes object transforms only; drawing
//! them is left to whoever consumes the timeline.

use log::debug;

use crate::engine::motion::MotionPlanner;
use crate::error::InterpretError;
use crate::types::{Frame, ObjectId, Program, SampledTimeline, Step, Transform, TransformChange};

pub struct Sampler;

impl Sampler {
    /// Sample a program at `fps` frames per second.
    ///
    /// The first frame is always a full snapshot taken when the objects are
    /// added. Subsequent frames are diffs against the previous frame.
    ///
    /// Fails before producing anything when the program would need more than
    /// `max_frames` frames.
    pub fn sample(
        program: &Program,
        fps: u32,
        max_frames: usize,
    ) -> Result<SampledTimeline, InterpretError> {
        let fps = fps.max(1);
        let needed = Self::total_frames(program, fps);
        if needed.is_nan() || needed > max_frames as f64 {
            return Err(InterpretError::TooManyFrames {
                frames: needed,
                limit: max_frames,
            });
        }

        let mut state: Vec<Transform> = program
            .objects
            .iter()
            .map(|o| Transform {
                center: o.center,
                rotation: 0.0,
            })
            .collect();

        let mut frames = vec![Frame::Full {
            transforms: state.clone(),
        }];

        for step in &program.steps {
            match step {
                Step::Add { .. } => {}
                Step::Wait { duration } => {
                    let n = Self::frame_count(*duration, fps);
                    frames.extend((0..n).map(|_| Frame::Diff {
                        changes: Vec::new(),
                    }));
                }
                Step::Play(plan) => {
                    let Some(&start) = state.get(plan.target.0) else {
                        continue;
                    };
                    let n = Self::frame_count(plan.duration, fps).max(1);
                    for k in 1..=n {
                        let alpha = k as f64 / n as f64;
                        let next = MotionPlanner::sample(&plan.animation, start, plan.rate.apply(alpha));
                        let prev = state[plan.target.0];
                        state[plan.target.0] = next;
                        frames.push(Frame::Diff {
                            changes: Self::diff(plan.target, &prev, &next),
                        });
                    }
                }
            }
        }

        debug!("sampled {} frames at {fps} fps", frames.len());

        Ok(SampledTimeline {
            fps,
            objects: program.objects.clone(),
            frames,
        })
    }

    /// Frames `sample` would produce, counted in `f64` so that huge or
    /// infinite durations cannot overflow.
    pub fn total_frames(program: &Program, fps: u32) -> f64 {
        let fps = fps.max(1) as f64;
        1.0 + program
            .steps
            .iter()
            .map(|step| match step {
                Step::Add { .. } => 0.0,
                Step::Wait { duration } => (duration * fps).round().max(0.0),
                Step::Play(plan) => (plan.duration * fps).round().max(1.0),
            })
            .sum::<f64>()
    }

    /// Replay frames up to and including `index` into full transforms.
    pub fn transforms_at(timeline: &SampledTimeline, index: usize) -> Vec<Transform> {
        let mut transforms = Vec::new();
        for frame in timeline.frames.iter().take(index + 1) {
            match frame {
                Frame::Full { transforms: full } => transforms = full.clone(),
                Frame::Diff { changes } => {
                    for change in changes {
                        if let Some(slot) = transforms.get_mut(change.id.0) {
                            *slot = change.transform;
                        }
                    }
                }
            }
        }
        transforms
    }

    fn frame_count(duration: f64, fps: u32) -> usize {
        (duration * fps as f64).round().max(0.0) as usize
    }

    fn diff(id: ObjectId, prev: &Transform, next: &Transform) -> Vec<TransformChange> {
        if prev == next {
            Vec::new()
        } else {
            vec![TransformChange {
                id,
                transform: *next,
            }]
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use glam::DVec3;

    use super::*;
    use crate::types::{Animation, AnimationPlan, Geometry, NamedColor, RateFunc, SceneObject};

    fn program(steps: Vec<Step>) -> Program {
        Program {
            objects: vec![SceneObject {
                id: ObjectId(0),
                key: "a".into(),
                geometry: Geometry::Circle { radius: 1.0 },
                color: NamedColor::Red,
                rgb: NamedColor::Red.rgb(),
                center: DVec3::new(2.0, 0.0, 0.0),
            }],
            steps,
        }
    }

    #[test]
    fn waits_emit_empty_diffs() {
        let timeline = Sampler::sample(
            &program(vec![
                Step::Add {
                    objects: vec![ObjectId(0)],
                },
                Step::Wait { duration: 0.5 },
            ]),
            10,
            100,
        )
        .unwrap();
        assert_eq!(timeline.frames.len(), 1 + 5);
        assert!(matches!(timeline.frames[0], Frame::Full { .. }));
    }

    #[test]
    fn orbit_is_evaluated_every_frame() {
        let timeline = Sampler::sample(
            &program(vec![Step::Play(AnimationPlan {
                target: ObjectId(0),
                animation: Animation::Orbit {
                    radius: 2.0,
                    initial_angle: 0.0,
                },
                duration: 1.0,
                rate: RateFunc::Linear,
            })]),
            4,
            100,
        )
        .unwrap();
        assert_eq!(timeline.frames.len(), 5);

        let half = Sampler::transforms_at(&timeline, 2);
        assert_abs_diff_eq!(half[0].center.x, -2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(half[0].center.y, 0.0, epsilon = 1e-9);

        let end = Sampler::transforms_at(&timeline, 4);
        assert_abs_diff_eq!(end[0].center.x, 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(end[0].center.y, 0.0, epsilon = 1e-9);
    }

    fn orbit_lasting(duration: f64) -> Program {
        program(vec![Step::Play(AnimationPlan {
            target: ObjectId(0),
            animation: Animation::Orbit {
                radius: 2.0,
                initial_angle: 0.0,
            },
            duration,
            rate: RateFunc::Linear,
        })])
    }

    #[test]
    fn frame_limit_is_enforced_up_front() {
        let err = Sampler::sample(&orbit_lasting(4e9), 60, 1_000_000).unwrap_err();
        assert!(matches!(err, InterpretError::TooManyFrames { limit: 1_000_000, .. }));

        let err = Sampler::sample(&orbit_lasting(4e300), 60, usize::MAX).unwrap_err();
        assert!(matches!(err, InterpretError::TooManyFrames { .. }));

        let err = Sampler::sample(&orbit_lasting(f64::INFINITY), 60, usize::MAX).unwrap_err();
        assert!(matches!(err, InterpretError::TooManyFrames { .. }));
    }

    #[test]
    fn exact_limit_is_accepted() {
        let program = orbit_lasting(1.0);
        assert_eq!(Sampler::total_frames(&program, 10), 11.0);
        assert_eq!(Sampler::sample(&program, 10, 11).unwrap().frames.len(), 11);
        assert!(Sampler::sample(&program, 10, 10).is_err());
    }
}
