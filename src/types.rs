//! Shared boundary types for the scene interpreter.
//!
//! This module defines the two key data contracts:
//! - Engine → Renderer: `Program` containing `Step`s
//! - Sampler → Renderer: `SampledTimeline` containing `Frame`s

use glam::DVec3;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shared style primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Red,
    Blue,
    Green,
    Yellow,
    #[default]
    White,
    Black,
    Purple,
    Orange,
}

impl NamedColor {
    pub fn rgb(self) -> Rgb {
        let (r, g, b) = match self {
            NamedColor::Red => (0xFC, 0x62, 0x55),
            NamedColor::Blue => (0x58, 0xC4, 0xDD),
            NamedColor::Green => (0x83, 0xC1, 0x67),
            NamedColor::Yellow => (0xFF, 0xFF, 0x00),
            NamedColor::White => (0xFF, 0xFF, 0xFF),
            NamedColor::Black => (0x00, 0x00, 0x00),
            NamedColor::Purple => (0x9A, 0x72, 0xAC),
            NamedColor::Orange => (0xFF, 0x86, 0x2F),
        };
        Rgb { r, g, b }
    }
}

// ---------------------------------------------------------------------------
// Scene objects
// ---------------------------------------------------------------------------

/// Stable handle of a scene object: its slot in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub usize);

/// Exact boundary of a drawable, in object-local coordinates around its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Geometry {
    Circle { radius: f64 },
    Square { side_length: f64 },
    Rectangle { width: f64, height: f64 },
    /// Closed polygon; the last vertex connects back to the first.
    Polygon { vertices: Vec<DVec3> },
    Text { content: String, scale: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    pub key: String,
    pub geometry: Geometry,
    pub color: NamedColor,
    /// Resolved value of `color`, for renderers without the named palette.
    pub rgb: Rgb,
    pub center: DVec3,
}

// ---------------------------------------------------------------------------
// Engine → Renderer boundary
// ---------------------------------------------------------------------------

/// Timing curve mapping linear progress to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateFunc {
    Linear,
    Smooth,
}

impl RateFunc {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            RateFunc::Linear => t,
            RateFunc::Smooth => {
                const INFLECTION: f64 = 10.0;
                let error = sigmoid(-INFLECTION / 2.0);
                ((sigmoid(INFLECTION * (t - 0.5)) - error) / (1.0 - 2.0 * error)).clamp(0.0, 1.0)
            }
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Animation {
    /// Rotate in place about `about` by `angle` radians.
    Rotate { angle: f64, about: DVec3 },
    /// Translate the object's center to `destination`.
    MoveTo { from: DVec3, destination: DVec3 },
    /// Per-frame position function: one full turn around the origin.
    Orbit { radius: f64, initial_angle: f64 },
}

/// One playback step's derived parameters. Consumed immediately by the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationPlan {
    pub target: ObjectId,
    pub animation: Animation,
    pub duration: f64,
    pub rate: RateFunc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Surface objects for initial display, in creation order.
    Add { objects: Vec<ObjectId> },
    Wait { duration: f64 },
    Play(AnimationPlan),
}

impl Step {
    pub fn duration(&self) -> f64 {
        match self {
            Step::Add { .. } => 0.0,
            Step::Wait { duration } => *duration,
            Step::Play(plan) => plan.duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Every registered object, in creation order, in its initial state.
    pub objects: Vec<SceneObject>,
    pub steps: Vec<Step>,
}

impl Program {
    pub fn duration(&self) -> f64 {
        self.steps.iter().map(Step::duration).sum()
    }

    pub fn object(&self, key: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.key == key)
    }

    pub fn plays(&self) -> impl Iterator<Item = &AnimationPlan> {
        self.steps.iter().filter_map(|step| match step {
            Step::Play(plan) => Some(plan),
            _ => None,
        })
    }
}

// ---------------------------------------------------------------------------
// Sampler → Renderer boundary (serialized to the frames file)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub center: DVec3,
    /// Accumulated in-place rotation in radians, normalized to `[0, 2π)`
    /// once a rotation completes.
    pub rotation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformChange {
    pub id: ObjectId,
    pub transform: Transform,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Frame {
    Full { transforms: Vec<Transform> },
    Diff { changes: Vec<TransformChange> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampledTimeline {
    pub fps: u32,
    pub objects: Vec<SceneObject>,
    pub frames: Vec<Frame>,
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn smooth_pins_endpoints_and_midpoint() {
        assert_abs_diff_eq!(RateFunc::Smooth.apply(0.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(RateFunc::Smooth.apply(0.5), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(RateFunc::Smooth.apply(1.0), 1.0, epsilon = 1e-12);
        assert!(RateFunc::Smooth.apply(0.1) < 0.1);
    }

    #[test]
    fn white_is_the_default_color() {
        assert_eq!(NamedColor::default(), NamedColor::White);
        assert_eq!(NamedColor::White.rgb(), Rgb { r: 255, g: 255, b: 255 });
    }
}
