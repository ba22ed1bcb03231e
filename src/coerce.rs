//! Conversion of a single raw field into a primitive value.
//!
//! Every primitive target goes through one generic function, [`coerce`],
//! parameterized over the [`Coerce`] capability. Integer and float widths
//! use their own `FromStr` parser so that a value never silently widens or
//! truncates: `"256"` fails for `u8` and succeeds for `u16`.

use std::fmt;

use crate::error::DecodeError;
use crate::path::DecodePath;
use crate::value::Value;

/// The primitive kinds a single field can be coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    Int,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    UInt128,
    UInt,
    Float32,
    Float64,
    Char,
    String,
    /// The absent value: an empty or whitespace-only field.
    Nil,
}

impl PrimitiveKind {
    /// Look up a primitive kind by its display name.
    pub fn from_name(s: &str) -> Option<PrimitiveKind> {
        match s {
            "bool" => Some(PrimitiveKind::Bool),
            "int8" => Some(PrimitiveKind::Int8),
            "int16" => Some(PrimitiveKind::Int16),
            "int32" => Some(PrimitiveKind::Int32),
            "int64" => Some(PrimitiveKind::Int64),
            "int128" => Some(PrimitiveKind::Int128),
            "int" => Some(PrimitiveKind::Int),
            "uint8" => Some(PrimitiveKind::UInt8),
            "uint16" => Some(PrimitiveKind::UInt16),
            "uint32" => Some(PrimitiveKind::UInt32),
            "uint64" => Some(PrimitiveKind::UInt64),
            "uint128" => Some(PrimitiveKind::UInt128),
            "uint" => Some(PrimitiveKind::UInt),
            "float32" => Some(PrimitiveKind::Float32),
            "float64" => Some(PrimitiveKind::Float64),
            "char" => Some(PrimitiveKind::Char),
            "string" => Some(PrimitiveKind::String),
            "nil" => Some(PrimitiveKind::Nil),
            _ => None,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            PrimitiveKind::Int8
                | PrimitiveKind::Int16
                | PrimitiveKind::Int32
                | PrimitiveKind::Int64
                | PrimitiveKind::Int128
                | PrimitiveKind::Int
                | PrimitiveKind::UInt8
                | PrimitiveKind::UInt16
                | PrimitiveKind::UInt32
                | PrimitiveKind::UInt64
                | PrimitiveKind::UInt128
                | PrimitiveKind::UInt
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, PrimitiveKind::Float32 | PrimitiveKind::Float64)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Int8 => "int8",
            PrimitiveKind::Int16 => "int16",
            PrimitiveKind::Int32 => "int32",
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::Int128 => "int128",
            PrimitiveKind::Int => "int",
            PrimitiveKind::UInt8 => "uint8",
            PrimitiveKind::UInt16 => "uint16",
            PrimitiveKind::UInt32 => "uint32",
            PrimitiveKind::UInt64 => "uint64",
            PrimitiveKind::UInt128 => "uint128",
            PrimitiveKind::UInt => "uint",
            PrimitiveKind::Float32 => "float32",
            PrimitiveKind::Float64 => "float64",
            PrimitiveKind::Char => "char",
            PrimitiveKind::String => "string",
            PrimitiveKind::Nil => "nil",
        };
        write!(f, "{}", s)
    }
}

/// A primitive type that can be parsed from one raw field.
pub trait Coerce: Sized {
    const KIND: PrimitiveKind;

    /// Parse the raw text, or `None` if it is not a valid `Self`.
    fn parse(raw: &str) -> Option<Self>;
}

macro_rules! impl_coerce_from_str {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Coerce for $ty {
                const KIND: PrimitiveKind = PrimitiveKind::$kind;

                fn parse(raw: &str) -> Option<Self> {
                    raw.parse().ok()
                }
            }
        )*
    };
}

impl_coerce_from_str! {
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    i128 => Int128,
    isize => Int,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    u128 => UInt128,
    usize => UInt,
    f32 => Float32,
    f64 => Float64,
}

impl Coerce for bool {
    const KIND: PrimitiveKind = PrimitiveKind::Bool;

    fn parse(raw: &str) -> Option<Self> {
        parse_bool(raw)
    }
}

impl Coerce for char {
    const KIND: PrimitiveKind = PrimitiveKind::Char;

    fn parse(raw: &str) -> Option<Self> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

impl Coerce for String {
    const KIND: PrimitiveKind = PrimitiveKind::String;

    fn parse(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

/// True if the field is empty once surrounding blanks are trimmed.
///
/// Blanks are tabs and Unicode space separators. Line breaks are content, so
/// a cell holding only `"\n"` is present.
pub fn is_absent(raw: &str) -> bool {
    raw.trim_matches(is_blank).is_empty()
}

fn is_blank(c: char) -> bool {
    c.is_whitespace()
        && !matches!(
            c,
            '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
        )
}

/// Parse a boolean token: `TRUE`/`YES`/`1` or `FALSE`/`NO`/`0`, any case.
pub fn parse_bool(raw: &str) -> Option<bool> {
    const TRUE_TOKENS: [&str; 3] = ["TRUE", "YES", "1"];
    const FALSE_TOKENS: [&str; 3] = ["FALSE", "NO", "0"];

    if TRUE_TOKENS.iter().any(|t| raw.eq_ignore_ascii_case(t)) {
        Some(true)
    } else if FALSE_TOKENS.iter().any(|t| raw.eq_ignore_ascii_case(t)) {
        Some(false)
    } else {
        None
    }
}

/// Coerce one raw field into `T`.
pub fn coerce<T: Coerce>(raw: &str, path: &DecodePath) -> Result<T, DecodeError> {
    T::parse(raw).ok_or_else(|| DecodeError::type_mismatch(raw, T::KIND, path))
}

/// Coerce one raw field into a dynamically chosen primitive kind.
pub fn coerce_value(
    raw: &str,
    kind: PrimitiveKind,
    path: &DecodePath,
) -> Result<Value, DecodeError> {
    let value = match kind {
        PrimitiveKind::Bool => Value::Bool(coerce(raw, path)?),
        PrimitiveKind::Int8 => Value::Int8(coerce(raw, path)?),
        PrimitiveKind::Int16 => Value::Int16(coerce(raw, path)?),
        PrimitiveKind::Int32 => Value::Int32(coerce(raw, path)?),
        PrimitiveKind::Int64 => Value::Int64(coerce(raw, path)?),
        PrimitiveKind::Int128 => Value::Int128(coerce(raw, path)?),
        PrimitiveKind::Int => Value::Int(coerce(raw, path)?),
        PrimitiveKind::UInt8 => Value::UInt8(coerce(raw, path)?),
        PrimitiveKind::UInt16 => Value::UInt16(coerce(raw, path)?),
        PrimitiveKind::UInt32 => Value::UInt32(coerce(raw, path)?),
        PrimitiveKind::UInt64 => Value::UInt64(coerce(raw, path)?),
        PrimitiveKind::UInt128 => Value::UInt128(coerce(raw, path)?),
        PrimitiveKind::UInt => Value::UInt(coerce(raw, path)?),
        PrimitiveKind::Float32 => Value::Float32(coerce(raw, path)?),
        PrimitiveKind::Float64 => Value::Float64(coerce(raw, path)?),
        PrimitiveKind::Char => Value::Char(coerce(raw, path)?),
        PrimitiveKind::String => Value::String(raw.to_string()),
        PrimitiveKind::Nil => {
            if !is_absent(raw) {
                return Err(DecodeError::type_mismatch(raw, PrimitiveKind::Nil, path));
            }
            Value::Nil
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> DecodePath {
        DecodePath::root()
    }

    mod absence {
        use super::*;

        #[test]
        fn test_empty_is_absent() {
            assert!(is_absent(""));
        }

        #[test]
        fn test_whitespace_is_absent() {
            assert!(is_absent("  \t "));
        }

        #[test]
        fn test_unicode_space_is_absent() {
            assert!(is_absent("\u{A0}\u{3000}"));
        }

        #[test]
        fn test_line_break_is_present() {
            assert!(!is_absent("\n"));
            assert!(!is_absent(" \r\n "));
        }

        #[test]
        fn test_text_is_present() {
            assert!(!is_absent(" 0 "));
        }
    }

    mod booleans {
        use super::*;

        #[test]
        fn test_true_tokens_any_case() {
            for raw in ["TRUE", "true", "True", "YES", "yes", "yEs", "1"] {
                assert_eq!(coerce::<bool>(raw, &root()), Ok(true), "{}", raw);
            }
        }

        #[test]
        fn test_false_tokens_any_case() {
            for raw in ["FALSE", "false", "NO", "no", "No", "0"] {
                assert_eq!(coerce::<bool>(raw, &root()), Ok(false), "{}", raw);
            }
        }

        #[test]
        fn test_other_text_fails() {
            for raw in ["", "y", "2", "on", " true", "truee"] {
                let err = coerce::<bool>(raw, &root()).unwrap_err();
                assert_eq!(
                    err,
                    DecodeError::TypeMismatch {
                        raw: raw.to_string(),
                        expected: PrimitiveKind::Bool,
                        path: root(),
                    }
                );
            }
        }
    }

    mod numbers {
        use super::*;

        #[test]
        fn test_u8_overflow_fails() {
            let err = coerce::<u8>("256", &root()).unwrap_err();
            assert!(matches!(
                err,
                DecodeError::TypeMismatch {
                    expected: PrimitiveKind::UInt8,
                    ..
                }
            ));
        }

        #[test]
        fn test_u16_accepts_256() {
            assert_eq!(coerce::<u16>("256", &root()), Ok(256));
        }

        #[test]
        fn test_signed_bounds() {
            assert_eq!(coerce::<i8>("-128", &root()), Ok(-128));
            assert!(coerce::<i8>("128", &root()).is_err());
            assert!(coerce::<u32>("-1", &root()).is_err());
        }

        #[test]
        fn test_no_trimming_for_numbers() {
            assert!(coerce::<i32>(" 5", &root()).is_err());
        }

        #[test]
        fn test_wide_integers() {
            assert_eq!(coerce::<i64>("-9000000000", &root()), Ok(-9_000_000_000));
            assert_eq!(
                coerce::<u64>("18446744073709551615", &root()),
                Ok(u64::MAX)
            );
            assert_eq!(
                coerce::<u128>("340282366920938463463374607431768211455", &root()),
                Ok(u128::MAX)
            );
        }

        #[test]
        fn test_floats() {
            assert_eq!(coerce::<f64>("2.5", &root()), Ok(2.5));
            assert_eq!(coerce::<f32>("-0.75", &root()), Ok(-0.75));
            assert!(coerce::<f64>("1.2.3", &root()).is_err());
        }

        #[test]
        fn test_error_carries_path() {
            let path = root().join("price");
            let err = coerce::<f64>("cheap", &path).unwrap_err();
            assert_eq!(err.path(), Some(&path));
        }
    }

    mod text {
        use super::*;

        #[test]
        fn test_string_unchanged() {
            assert_eq!(
                coerce::<String>("  padded  ", &root()),
                Ok("  padded  ".to_string())
            );
        }

        #[test]
        fn test_char() {
            assert_eq!(coerce::<char>("é", &root()), Ok('é'));
            assert!(coerce::<char>("ab", &root()).is_err());
            assert!(coerce::<char>("", &root()).is_err());
        }
    }

    mod dynamic {
        use super::*;

        #[test]
        fn test_coerce_value_int() {
            let value = coerce_value("42", PrimitiveKind::Int32, &root()).unwrap();
            assert_eq!(value, Value::Int32(42));
        }

        #[test]
        fn test_coerce_value_nil() {
            assert_eq!(coerce_value(" ", PrimitiveKind::Nil, &root()), Ok(Value::Nil));
            assert!(coerce_value("x", PrimitiveKind::Nil, &root()).is_err());
        }

        #[test]
        fn test_kind_names_round_trip() {
            for kind in [
                PrimitiveKind::Bool,
                PrimitiveKind::Int,
                PrimitiveKind::UInt64,
                PrimitiveKind::Float32,
                PrimitiveKind::String,
                PrimitiveKind::Nil,
            ] {
                assert_eq!(PrimitiveKind::from_name(&kind.to_string()), Some(kind));
            }
            assert_eq!(PrimitiveKind::from_name("time"), None);
        }

        #[test]
        fn test_kind_classes() {
            assert!(PrimitiveKind::UInt.is_integer());
            assert!(!PrimitiveKind::Float64.is_integer());
            assert!(PrimitiveKind::Float64.is_float());
        }
    }
}
