//! Bit-level equality and hashing for float-carrying values.
//!
//! Floats are compared by bit pattern after folding `-0.0` into `0.0` and every NaN into one
//! canonical NaN, which makes the relation reflexive and consistent with the hash.

use std::hash::{Hash, Hasher};
use std::time::Duration;

use crate::model::{Color, Easing, PathCommand, PathData, Point, StrokeCap, StrokeJoin, Timeline};

pub trait StructuralEq {
    fn structural_eq(&self, other: &Self) -> bool;
    fn structural_hash<H: Hasher>(&self, state: &mut H);
}

/// Canonical bit pattern of a float.
pub fn float_key(v: f32) -> u32 {
    if v == 0.0 {
        0
    } else if v.is_nan() {
        f32::NAN.to_bits()
    } else {
        v.to_bits()
    }
}

impl StructuralEq for f32 {
    fn structural_eq(&self, other: &Self) -> bool {
        float_key(*self) == float_key(*other)
    }

    fn structural_hash<H: Hasher>(&self, state: &mut H) {
        float_key(*self).hash(state);
    }
}

impl StructuralEq for f64 {
    fn structural_eq(&self, other: &Self) -> bool {
        float_key64(*self) == float_key64(*other)
    }

    fn structural_hash<H: Hasher>(&self, state: &mut H) {
        float_key64(*self).hash(state);
    }
}

fn float_key64(v: f64) -> u64 {
    if v == 0.0 {
        0
    } else if v.is_nan() {
        f64::NAN.to_bits()
    } else {
        v.to_bits()
    }
}

impl StructuralEq for Point {
    fn structural_eq(&self, other: &Self) -> bool {
        self[0].structural_eq(&other[0]) && self[1].structural_eq(&other[1])
    }

    fn structural_hash<H: Hasher>(&self, state: &mut H) {
        self[0].structural_hash(state);
        self[1].structural_hash(state);
    }
}

impl<T: StructuralEq> StructuralEq for Option<T> {
    fn structural_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.structural_eq(b),
            (None, None) => true,
            _ => false,
        }
    }

    fn structural_hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Some(v) => {
                1u8.hash(state);
                v.structural_hash(state);
            }
            None => 0u8.hash(state),
        }
    }
}

impl StructuralEq for Color {
    fn structural_eq(&self, other: &Self) -> bool {
        self.r.structural_eq(&other.r)
            && self.g.structural_eq(&other.g)
            && self.b.structural_eq(&other.b)
            && self.a.structural_eq(&other.a)
    }

    fn structural_hash<H: Hasher>(&self, state: &mut H) {
        for c in self.to_array() {
            c.structural_hash(state);
        }
    }
}

impl StructuralEq for PathCommand {
    fn structural_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PathCommand::MoveTo(a), PathCommand::MoveTo(b))
            | (PathCommand::LineTo(a), PathCommand::LineTo(b)) => a.structural_eq(b),
            (PathCommand::QuadTo(a1, a2), PathCommand::QuadTo(b1, b2)) => {
                a1.structural_eq(b1) && a2.structural_eq(b2)
            }
            (PathCommand::CubicTo(a1, a2, a3), PathCommand::CubicTo(b1, b2, b3)) => {
                a1.structural_eq(b1) && a2.structural_eq(b2) && a3.structural_eq(b3)
            }
            (PathCommand::Close, PathCommand::Close) => true,
            _ => false,
        }
    }

    fn structural_hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p.structural_hash(state),
            PathCommand::QuadTo(p1, p2) => {
                p1.structural_hash(state);
                p2.structural_hash(state);
            }
            PathCommand::CubicTo(p1, p2, p3) => {
                p1.structural_hash(state);
                p2.structural_hash(state);
                p3.structural_hash(state);
            }
            PathCommand::Close => {}
        }
    }
}

impl<T: StructuralEq> StructuralEq for Vec<T> {
    fn structural_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.structural_eq(b))
    }

    fn structural_hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for v in self {
            v.structural_hash(state);
        }
    }
}

/// Implements [`StructuralEq`] for a type that already has exact `Eq` and `Hash`.
macro_rules! delegate_to_eq {
    ($($ty:ty),* $(,)?) => {
        $(
            impl StructuralEq for $ty {
                fn structural_eq(&self, other: &Self) -> bool {
                    self == other
                }

                fn structural_hash<H: Hasher>(&self, state: &mut H) {
                    self.hash(state);
                }
            }
        )*
    };
}

delegate_to_eq!(Duration, StrokeCap, StrokeJoin, PathData);

impl<T: StructuralEq> StructuralEq for Timeline<T> {
    fn structural_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn structural_hash<H: Hasher>(&self, state: &mut H) {
        self.hash(state);
    }
}

/// Derives `StructuralEq`, `PartialEq`, `Eq` and `Hash` for a struct from the listed fields,
/// compared and hashed in declaration order.
#[macro_export]
macro_rules! impl_structural {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::structural::StructuralEq for $ty {
            fn structural_eq(&self, other: &Self) -> bool {
                use $crate::structural::StructuralEq as _Structural;
                true $(&& _Structural::structural_eq(&self.$field, &other.$field))*
            }

            fn structural_hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                $($crate::structural::StructuralEq::structural_hash(&self.$field, state);)*
            }
        }

        impl ::std::cmp::PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                $crate::structural::StructuralEq::structural_eq(self, other)
            }
        }

        impl ::std::cmp::Eq for $ty {}

        impl ::std::hash::Hash for $ty {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                $crate::structural::StructuralEq::structural_hash(self, state);
            }
        }
    };
}

impl StructuralEq for Easing {
    fn structural_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Easing::CubicBezier { x1, y1, x2, y2 },
                Easing::CubicBezier {
                    x1: ox1,
                    y1: oy1,
                    x2: ox2,
                    y2: oy2,
                },
            ) => {
                x1.structural_eq(ox1)
                    && y1.structural_eq(oy1)
                    && x2.structural_eq(ox2)
                    && y2.structural_eq(oy2)
            }
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }

    fn structural_hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        if let Easing::CubicBezier { x1, y1, x2, y2 } = self {
            for v in [x1, y1, x2, y2] {
                v.structural_hash(state);
            }
        }
    }
}
