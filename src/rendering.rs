//! Declarative draw list handed to the host surface each frame.

use crate::theme::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Line {
        points: Vec<(f32, f32)>,
        color: Color,
        width: f32,
        opacity: f32,
    },
    /// Filled polygon between `points` and the horizontal `baseline`.
    Area {
        points: Vec<(f32, f32)>,
        baseline: f32,
        color: Color,
        opacity: f32,
    },
    Marker {
        x: f32,
        y: f32,
        radius: f32,
        color: Color,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Color>,
        stroke: Option<Color>,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        color: Color,
        size: f32,
        anchor: TextAnchor,
    },
    /// Box anchored at the hovered pixel.
    Tooltip {
        x: f32,
        y: f32,
        lines: Vec<String>,
        background: Color,
        color: Color,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn extend(&mut self, other: DrawList) {
        self.commands.extend(other.commands);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    pub fn lines(&self) -> impl Iterator<Item = &Vec<(f32, f32)>> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { points, .. } => Some(points),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn tooltip(&self) -> Option<&[String]> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::Tooltip { lines, .. } => Some(lines.as_slice()),
            _ => None,
        })
    }
}
