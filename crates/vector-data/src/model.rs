use serde::{de::SeqAccess, ser::SerializeSeq, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use crate::structural::StructuralEq;

// ================================================================================================
// Color
// ================================================================================================

/// Straight (non-premultiplied) RGBA color, each channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Scales the intrinsic alpha channel, keeping the color channels.
    pub fn multiply_alpha(self, factor: f32) -> Self {
        self.with_alpha(self.a * factor)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parses `#RRGGBB` or `#AARRGGBB`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        let channel = |shift: u32| ((value >> shift) & 0xff) as f32 / 255.0;
        match digits.len() {
            6 => Some(Self::rgb(channel(16), channel(8), channel(0))),
            8 => Some(Self::new(channel(16), channel(8), channel(0), channel(24))),
            _ => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::TRANSPARENT
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.structural_eq(other)
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.structural_hash(state);
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(4))?;
        for c in self.to_array() {
            seq.serialize_element(&c)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ColorVisitor;
        impl<'de> serde::de::Visitor<'de> for ColorVisitor {
            type Value = Color;
            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a hex color string or a sequence of 3 or 4 floats")
            }
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Color::from_hex(v)
                    .ok_or_else(|| E::invalid_value(serde::de::Unexpected::Str(v), &self))
            }
            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let r = seq.next_element()?.unwrap_or(0.0);
                let g = seq.next_element()?.unwrap_or(0.0);
                let b = seq.next_element()?.unwrap_or(0.0);
                let a = seq.next_element()?.unwrap_or(1.0);
                while let Some(_) = seq.next_element::<f32>()? {}
                Ok(Color::new(r, g, b, a))
            }
        }
        deserializer.deserialize_any(ColorVisitor)
    }
}

// ================================================================================================
// Path data
// ================================================================================================

pub type Point = [f32; 2];

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CubicTo(Point, Point, Point),
    Close,
}

impl PathCommand {
    pub fn same_kind(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl PartialEq for PathCommand {
    fn eq(&self, other: &Self) -> bool {
        self.structural_eq(other)
    }
}

impl Eq for PathCommand {}

impl Hash for PathCommand {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.structural_hash(state);
    }
}

/// An immutable list of path commands. Compared and hashed structurally.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PathData {
    #[serde(default)]
    pub commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::MoveTo([x, y]));
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::LineTo([x, y]));
        self
    }

    pub fn quad_to(mut self, x1: f32, y1: f32, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::QuadTo([x1, y1], [x, y]));
        self
    }

    pub fn cubic_to(mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) -> Self {
        self.commands
            .push(PathCommand::CubicTo([x1, y1], [x2, y2], [x, y]));
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Two paths can be morphed point by point when their command lists have the same shape.
    pub fn is_morphable_with(&self, other: &PathData) -> bool {
        self.commands.len() == other.commands.len()
            && self
                .commands
                .iter()
                .zip(&other.commands)
                .all(|(a, b)| a.same_kind(b))
    }
}

impl FromIterator<PathCommand> for PathData {
    fn from_iter<I: IntoIterator<Item = PathCommand>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

// ================================================================================================
// Stroke styles
// ================================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StrokeJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

// ================================================================================================
// Timelines
// ================================================================================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    /// Holds the start value for the whole interval.
    Step,
    Accelerate,
    Decelerate,
    AccelerateDecelerate,
    FastOutSlowIn,
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl PartialEq for Easing {
    fn eq(&self, other: &Self) -> bool {
        self.structural_eq(other)
    }
}

impl Eq for Easing {}

impl Hash for Easing {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.structural_hash(state);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyframe<T> {
    /// Position inside the owning timeline's window, `0.0..=1.0`.
    pub fraction: f32,
    pub value: T,
    /// Shapes the interval from this keyframe to the next one.
    #[serde(default)]
    pub easing: Easing,
}

impl<T> Keyframe<T> {
    pub fn new(fraction: f32, value: T) -> Self {
        Self {
            fraction,
            value,
            easing: Easing::Linear,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

impl<T: StructuralEq> PartialEq for Keyframe<T> {
    fn eq(&self, other: &Self) -> bool {
        self.fraction.structural_eq(&other.fraction)
            && self.value.structural_eq(&other.value)
            && self.easing == other.easing
    }
}

impl<T: StructuralEq> Eq for Keyframe<T> {}

impl<T: StructuralEq> Hash for Keyframe<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fraction.structural_hash(state);
        self.value.structural_hash(state);
        self.easing.hash(state);
    }
}

/// The animation of a single attribute.
///
/// The timeline is active over `[start, start + duration]` of the scene; a `duration` of `None`
/// runs until the end of the scene. Keyframe fractions are relative to that window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline<T> {
    #[serde(default)]
    pub start: Duration,
    #[serde(default)]
    pub duration: Option<Duration>,
    #[serde(default)]
    pub easing: Easing,
    pub keyframes: Vec<Keyframe<T>>,
}

impl<T> Timeline<T> {
    /// A timeline spanning the whole scene.
    pub fn new(keyframes: Vec<Keyframe<T>>) -> Self {
        Self {
            start: Duration::ZERO,
            duration: None,
            easing: Easing::Linear,
            keyframes,
        }
    }

    pub fn window(start: Duration, duration: Duration, keyframes: Vec<Keyframe<T>>) -> Self {
        Self {
            start,
            duration: Some(duration),
            easing: Easing::Linear,
            keyframes,
        }
    }

    /// A two keyframe timeline from `from` to `to` over the whole scene.
    pub fn between(from: T, to: T) -> Self {
        Self::new(vec![Keyframe::new(0.0, from), Keyframe::new(1.0, to)])
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }
}

impl<T: StructuralEq> PartialEq for Timeline<T> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.duration == other.duration
            && self.easing == other.easing
            && self.keyframes == other.keyframes
    }
}

impl<T: StructuralEq> Eq for Timeline<T> {}

impl<T: StructuralEq> Hash for Timeline<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.duration.hash(state);
        self.easing.hash(state);
        self.keyframes.hash(state);
    }
}
