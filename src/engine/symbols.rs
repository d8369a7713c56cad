//! Fixed token vocabularies: positions, colors and shape kinds.

use glam::DVec3;

use crate::types::NamedColor;

pub const UP: DVec3 = DVec3::new(0.0, 1.0, 0.0);
pub const DOWN: DVec3 = DVec3::new(0.0, -1.0, 0.0);
pub const LEFT: DVec3 = DVec3::new(-1.0, 0.0, 0.0);
pub const RIGHT: DVec3 = DVec3::new(1.0, 0.0, 0.0);
pub const ORIGIN: DVec3 = DVec3::ZERO;

pub static POSITIONS: [(&str, DVec3); 9] = [
    ("topLeft", DVec3::new(-1.0, 1.0, 0.0)),
    ("topCenter", UP),
    ("topRight", DVec3::new(1.0, 1.0, 0.0)),
    ("left", LEFT),
    ("center", ORIGIN),
    ("right", RIGHT),
    ("bottomLeft", DVec3::new(-1.0, -1.0, 0.0)),
    ("bottomCenter", DOWN),
    ("bottomRight", DVec3::new(1.0, -1.0, 0.0)),
];

pub static COLORS: [(&str, NamedColor); 8] = [
    ("red", NamedColor::Red),
    ("blue", NamedColor::Blue),
    ("green", NamedColor::Green),
    ("yellow", NamedColor::Yellow),
    ("white", NamedColor::White),
    ("black", NamedColor::Black),
    ("purple", NamedColor::Purple),
    ("orange", NamedColor::Orange),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Square,
    Rectangle,
    Triangle,
    Star,
}

pub static SHAPES: [(&str, ShapeKind); 5] = [
    ("circle", ShapeKind::Circle),
    ("square", ShapeKind::Square),
    ("rectangle", ShapeKind::Rectangle),
    ("triangle", ShapeKind::Triangle),
    ("star", ShapeKind::Star),
];

fn lookup<T: Copy>(table: &[(&str, T)], token: &str) -> Option<T> {
    table
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, value)| *value)
}

pub fn position(token: &str) -> Option<DVec3> {
    lookup(&POSITIONS, token)
}

/// Resolve a color token, falling back to white when absent or unknown.
pub fn color(token: Option<&str>) -> NamedColor {
    token
        .and_then(|t| lookup(&COLORS, t))
        .unwrap_or_default()
}

pub fn shape(token: &str) -> Option<ShapeKind> {
    lookup(&SHAPES, token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_positions_combine_unit_offsets() {
        assert_eq!(position("topLeft"), Some(UP + LEFT));
        assert_eq!(position("bottomRight"), Some(DOWN + RIGHT));
        assert_eq!(position("center"), Some(ORIGIN));
        assert_eq!(position("middle"), None);
    }

    #[test]
    fn unknown_colors_fall_back_to_white() {
        assert_eq!(color(Some("purple")), NamedColor::Purple);
        assert_eq!(color(Some("magenta")), NamedColor::White);
        assert_eq!(color(None), NamedColor::White);
    }

    #[test]
    fn tokens_are_case_sensitive() {
        assert_eq!(shape("star"), Some(ShapeKind::Star));
        assert_eq!(shape("Star"), None);
        assert_eq!(position("topleft"), None);
    }
}
