//! Dynamically typed result of a coercion.

use crate::coerce::PrimitiveKind;

/// A single coerced field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Int128(i128),
    Int(isize),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    UInt128(u128),
    UInt(usize),
    Float32(f32),
    Float64(f64),
    Char(char),
    String(String),
    /// An empty or whitespace-only field
    Nil,
}

impl Value {
    /// The primitive kind this value was coerced into.
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Value::Bool(_) => PrimitiveKind::Bool,
            Value::Int8(_) => PrimitiveKind::Int8,
            Value::Int16(_) => PrimitiveKind::Int16,
            Value::Int32(_) => PrimitiveKind::Int32,
            Value::Int64(_) => PrimitiveKind::Int64,
            Value::Int128(_) => PrimitiveKind::Int128,
            Value::Int(_) => PrimitiveKind::Int,
            Value::UInt8(_) => PrimitiveKind::UInt8,
            Value::UInt16(_) => PrimitiveKind::UInt16,
            Value::UInt32(_) => PrimitiveKind::UInt32,
            Value::UInt64(_) => PrimitiveKind::UInt64,
            Value::UInt128(_) => PrimitiveKind::UInt128,
            Value::UInt(_) => PrimitiveKind::UInt,
            Value::Float32(_) => PrimitiveKind::Float32,
            Value::Float64(_) => PrimitiveKind::Float64,
            Value::Char(_) => PrimitiveKind::Char,
            Value::String(_) => PrimitiveKind::String,
            Value::Nil => PrimitiveKind::Nil,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Try to get this value as a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get this value as an i64 (works for integer types that fit).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int8(v) => Some(*v as i64),
            Value::Int16(v) => Some(*v as i64),
            Value::Int32(v) => Some(*v as i64),
            Value::Int64(v) => Some(*v),
            Value::Int128(v) => i64::try_from(*v).ok(),
            Value::Int(v) => i64::try_from(*v).ok(),
            Value::UInt8(v) => Some(*v as i64),
            Value::UInt16(v) => Some(*v as i64),
            Value::UInt32(v) => Some(*v as i64),
            Value::UInt64(v) => i64::try_from(*v).ok(),
            Value::UInt128(v) => i64::try_from(*v).ok(),
            Value::UInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Try to get this value as a u64 (works for unsigned integer types that fit).
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::UInt8(v) => Some(*v as u64),
            Value::UInt16(v) => Some(*v as u64),
            Value::UInt32(v) => Some(*v as u64),
            Value::UInt64(v) => Some(*v),
            Value::UInt128(v) => u64::try_from(*v).ok(),
            Value::UInt(v) => u64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Try to get this value as an f64 (works for float types).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float32(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }
}
