//! Command types — the structured output of the external script parser.
//!
//! Commands describe *what exists* and *how it moves*, not how it is drawn.
//! The engine classifies them structurally and never mutates them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandList {
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl CommandList {
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    /// Parse a command list from JSON, accepting either `{"commands": [...]}`
    /// or a bare array of commands.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Document {
            Bare(Vec<Command>),
            Wrapped(CommandList),
        }

        Ok(match serde_json::from_str(json)? {
            Document::Bare(commands) => CommandList { commands },
            Document::Wrapped(list) => list,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCommand", into = "RawCommand")]
pub enum Command {
    CreateText {
        content: String,
        position: Option<String>,
    },
    CreateShape {
        name: String,
        shape: String,
        color: Option<String>,
        size: Option<f64>,
        position: Option<String>,
    },
    Spin {
        target: Option<String>,
        speed: Option<f64>,
    },
    Glide {
        target: Option<String>,
        destination: Option<String>,
        speed: Option<f64>,
    },
    Orbit {
        target: Option<String>,
        speed: Option<f64>,
    },
    /// A command whose tag this interpreter does not know.
    Other {
        kind: String,
        target: Option<String>,
        speed: Option<f64>,
    },
}

/// Which phase a command runs in, decided by field presence alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Creation,
    Animation,
}

impl Command {
    pub fn target(&self) -> Option<&str> {
        match self {
            Command::Spin { target, .. }
            | Command::Glide { target, .. }
            | Command::Orbit { target, .. }
            | Command::Other { target, .. } => target.as_deref(),
            Command::CreateText { .. } | Command::CreateShape { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self {
            Command::Spin { speed, .. }
            | Command::Glide { speed, .. }
            | Command::Orbit { speed, .. }
            | Command::Other { speed, .. } => *speed,
            Command::CreateText { .. } | Command::CreateShape { .. } => None,
        }
    }

    /// A command exposing both a target and a speed is an animation command,
    /// whatever its kind. Everything else belongs to the creation phase.
    pub fn phase(&self) -> Phase {
        if self.target().is_some() && self.speed().is_some() {
            Phase::Animation
        } else {
            Phase::Creation
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Command::CreateText { .. } => "create_text",
            Command::CreateShape { .. } => "create_shape",
            Command::Spin { .. } => "spin",
            Command::Glide { .. } => "glide",
            Command::Orbit { .. } => "orbit",
            Command::Other { kind, .. } => kind,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// Flat wire shape of a command. Every field but the tag may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawCommand {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    shape: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    speed: Option<f64>,
}

/// Any command carrying both a target and a speed decodes as an animation:
/// a destination makes it a glide, otherwise the tag picks spin or orbit and
/// any other tag is kept as `Other`. Only the remaining commands decode by tag
/// alone.
impl From<RawCommand> for Command {
    fn from(raw: RawCommand) -> Self {
        let RawCommand {
            kind,
            content,
            name,
            shape,
            color,
            size,
            position,
            target,
            destination,
            speed,
        } = raw;

        if target.is_some() && speed.is_some() {
            return match kind.as_str() {
                _ if destination.is_some() => Command::Glide {
                    target,
                    destination,
                    speed,
                },
                "glide" => Command::Glide {
                    target,
                    destination,
                    speed,
                },
                "spin" => Command::Spin { target, speed },
                "orbit" | "rotate" => Command::Orbit { target, speed },
                _ => Command::Other {
                    kind,
                    target,
                    speed,
                },
            };
        }

        match kind.as_str() {
            "create_text" => Command::CreateText {
                content: content.unwrap_or_default(),
                position,
            },
            "create_shape" => Command::CreateShape {
                name: name.unwrap_or_default(),
                shape: shape.unwrap_or_default(),
                color,
                size,
                position,
            },
            "spin" => Command::Spin { target, speed },
            "glide" => Command::Glide {
                target,
                destination,
                speed,
            },
            "orbit" | "rotate" => Command::Orbit { target, speed },
            _ => Command::Other {
                kind,
                target,
                speed,
            },
        }
    }
}

impl From<Command> for RawCommand {
    fn from(command: Command) -> Self {
        let kind = command.kind().to_string();
        match command {
            Command::CreateText { content, position } => RawCommand {
                kind,
                content: Some(content),
                position,
                ..Default::default()
            },
            Command::CreateShape {
                name,
                shape,
                color,
                size,
                position,
            } => RawCommand {
                kind,
                name: Some(name),
                shape: Some(shape),
                color,
                size,
                position,
                ..Default::default()
            },
            Command::Spin { target, speed }
            | Command::Orbit { target, speed }
            | Command::Other { target, speed, .. } => RawCommand {
                kind,
                target,
                speed,
                ..Default::default()
            },
            Command::Glide {
                target,
                destination,
                speed,
            } => RawCommand {
                kind,
                target,
                destination,
                speed,
                ..Default::default()
            },
        }
    }
}
