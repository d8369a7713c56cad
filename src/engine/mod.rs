//! Engine — the command interpreter and animation scheduler.
//!
//! Turns a `CommandList` (intent) into a `Program` (an ordered list of add,
//! wait and play steps with exact durations).
//!
//! The engine understands naming, geometry, motion and ordering.
//! It never deals with frames, pixels or output devices.

pub mod command;
pub mod geometry;
pub mod motion;
pub mod registry;
pub mod symbols;

use log::{debug, warn};

use crate::config::Config;
use crate::error::InterpretError;
use crate::types::{Program, Step, Transform};
use command::{Command, CommandList, Phase};
use motion::MotionPlanner;
use registry::ObjectRegistry;

/// Hold after the objects appear, before the first animation.
pub const INTRO_PAUSE: f64 = 0.5;
/// Hold after the last animation so the final frame stays visible.
pub const OUTRO_PAUSE: f64 = 1.0;

/// Commands split by phase, each list in original order.
#[derive(Debug, Default)]
pub struct Classified<'a> {
    pub creation: Vec<&'a Command>,
    /// Animation commands with their index in the original list.
    pub animation: Vec<(usize, &'a Command)>,
}

pub struct Engine;

impl Engine {
    /// Compile a command list into a program.
    ///
    /// Every creation command is materialized before any animation is
    /// planned, so animations may reference objects created later in the
    /// list.
    pub fn compile(list: &CommandList, config: &Config) -> Result<Program, InterpretError> {
        let classified = Self::classify(&list.commands);
        Self::validate(&classified, config)?;

        let mut registry = ObjectRegistry::new();
        for command in &classified.creation {
            registry.create(command);
        }
        let objects = registry.objects().to_vec();

        let mut steps = Vec::with_capacity(classified.animation.len() + 3);
        steps.push(Step::Add {
            objects: registry.ids(),
        });
        steps.push(Step::Wait {
            duration: INTRO_PAUSE,
        });

        for (index, command) in classified.animation {
            let (Some(key), Some(speed)) = (command.target(), command.speed()) else {
                continue;
            };
            let Some(target) = registry.lookup(key) else {
                warn!("command {index} ({}): unknown target {key:?}, skipped", command.kind());
                continue;
            };
            let Some(plan) = MotionPlanner::plan(command, target, speed) else {
                continue;
            };

            let end = MotionPlanner::finish(
                &plan,
                Transform {
                    center: target.center,
                    rotation: 0.0,
                },
            );
            debug!(
                "command {index}: {:?} on {key:?} for {:.3}s",
                plan.animation, plan.duration
            );
            registry.set_center(plan.target, end.center);
            steps.push(Step::Play(plan));
        }

        steps.push(Step::Wait {
            duration: OUTRO_PAUSE,
        });

        Ok(Program { objects, steps })
    }

    /// Partition commands by structural phase: a command is an animation iff
    /// it exposes both a target and a speed.
    pub fn classify(commands: &[Command]) -> Classified<'_> {
        let mut classified = Classified::default();
        for (index, command) in commands.iter().enumerate() {
            match command.phase() {
                Phase::Creation => classified.creation.push(command),
                Phase::Animation => classified.animation.push((index, command)),
            }
        }
        debug!(
            "{} creation and {} animation commands",
            classified.creation.len(),
            classified.animation.len()
        );
        classified
    }

    /// Reject animation commands whose duration cannot be computed, before
    /// any step is produced.
    fn validate(classified: &Classified<'_>, config: &Config) -> Result<(), InterpretError> {
        for &(index, command) in &classified.animation {
            let target = command.target().unwrap_or_default().to_string();
            let speed = command.speed().unwrap_or_default();
            if !(speed.is_finite() && speed > 0.0) {
                return Err(InterpretError::InvalidSpeed {
                    index,
                    kind: command.kind().to_string(),
                    target,
                    speed,
                });
            }
            if let Command::Other { kind, .. } = command {
                if config.strict_animation_kinds {
                    return Err(InterpretError::UnknownAnimationKind {
                        index,
                        kind: kind.clone(),
                        target,
                    });
                }
                warn!("command {index}: unknown animation kind {kind:?}, playing as orbit");
            }
        }
        Ok(())
    }
}
