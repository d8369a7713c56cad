//! Object registry: materializes creation commands into keyed scene objects.

use std::collections::HashMap;

use glam::DVec3;
use log::{debug, warn};

use super::command::Command;
use super::geometry::{DEFAULT_SIZE, GeometryBuilder};
use super::symbols;
use crate::types::{Geometry, NamedColor, ObjectId, SceneObject};

/// Text objects are shown at this fraction of their natural size.
pub const TEXT_SCALE: f64 = 0.75;

#[derive(Debug, Default)]
pub struct ObjectRegistry {
    objects: Vec<SceneObject>,
    index: HashMap<String, ObjectId>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one creation-phase command. Commands that create nothing
    /// (animation kinds missing a target or speed, unknown shapes) are inert.
    pub fn create(&mut self, command: &Command) -> Option<ObjectId> {
        match command {
            Command::CreateText { content, position } => {
                let content = strip_quotes(content);
                let center = resolve_position(position.as_deref());
                Some(self.insert(
                    content.to_string(),
                    GeometryBuilder::text(content, TEXT_SCALE),
                    NamedColor::White,
                    center,
                ))
            }
            Command::CreateShape {
                name,
                shape,
                color,
                size,
                position,
            } => {
                let Some(kind) = symbols::shape(shape) else {
                    warn!("shape {name:?}: unknown shape {shape:?}, skipped");
                    return None;
                };
                let geometry = GeometryBuilder::shape(kind, size.unwrap_or(DEFAULT_SIZE));
                let color = symbols::color(color.as_deref());
                let center = resolve_position(position.as_deref());
                Some(self.insert(name.clone(), geometry, color, center))
            }
            other => {
                debug!("{} command without target and speed is inert", other.kind());
                None
            }
        }
    }

    /// Register an object under `key`. A key that already exists keeps its
    /// creation slot and the new object replaces the old one.
    pub fn insert(
        &mut self,
        key: String,
        geometry: Geometry,
        color: NamedColor,
        center: DVec3,
    ) -> ObjectId {
        if let Some(&id) = self.index.get(&key) {
            warn!("object {key:?} registered twice, replacing the earlier one");
            self.objects[id.0] = SceneObject {
                id,
                key,
                geometry,
                color,
                rgb: color.rgb(),
                center,
            };
            return id;
        }

        let id = ObjectId(self.objects.len());
        self.index.insert(key.clone(), id);
        self.objects.push(SceneObject {
            id,
            key,
            geometry,
            color,
            rgb: color.rgb(),
            center,
        });
        id
    }

    pub fn lookup(&self, key: &str) -> Option<&SceneObject> {
        self.index.get(key).map(|id| &self.objects[id.0])
    }

    /// Record where an animation left an object.
    pub fn set_center(&mut self, id: ObjectId, center: DVec3) {
        if let Some(object) = self.objects.get_mut(id.0) {
            object.center = center;
        }
    }

    pub fn ids(&self) -> Vec<ObjectId> {
        self.objects.iter().map(|o| o.id).collect()
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Unknown or missing position tokens leave the object at the origin.
fn resolve_position(token: Option<&str>) -> DVec3 {
    match token {
        None => symbols::ORIGIN,
        Some(token) => symbols::position(token).unwrap_or_else(|| {
            warn!("unknown position {token:?}, leaving object unplaced");
            symbols::ORIGIN
        }),
    }
}

/// Drop every leading and trailing double quote the parser left on.
fn strip_quotes(content: &str) -> &str {
    content.trim_matches('"')
}
