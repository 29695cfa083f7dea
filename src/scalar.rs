//! Scalar leaf access: the closed set of field types that defaults and
//! environment values can be parsed into.
//!
//! Every leaf type implements [`ScalarValue`], which gives visitors three
//! capabilities: zero-detection, string parsing into the field's static type,
//! and a type name for diagnostics. Parsing is strict per type; the descriptor
//! already knows what the field is, so there is no cross-type guessing.

use std::path::PathBuf;
use std::time::Duration;

/// A string could not be parsed as the field's static type.
///
/// Carries only the expected type name; the caller owns the field path and the
/// raw input and wraps this into [`StackfigError::TypeMismatch`](crate::StackfigError::TypeMismatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub expected: &'static str,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot parse as {}", self.expected)
    }
}

impl std::error::Error for ParseError {}

/// Mutable view over one scalar leaf of a config object.
///
/// Implemented for bool, every integer width, floats, `String`, `PathBuf`,
/// [`Duration`], and comma-separated lists of the parseable element types.
pub trait ScalarValue {
    /// Type name used in diagnostics, e.g. `"u16"` or `"duration"`.
    fn type_name(&self) -> &'static str;

    /// Whether the current value equals the type's natural zero
    /// (0, 0.0, false, "", empty list, zero duration, empty path).
    fn is_zero(&self) -> bool;

    /// Parse `raw` into the field's static type and assign it.
    fn assign_str(&mut self, raw: &str) -> Result<(), ParseError>;
}

macro_rules! numeric_scalar {
    ($($ty:ty => $zero:expr),* $(,)?) => {$(
        impl ScalarValue for $ty {
            fn type_name(&self) -> &'static str {
                stringify!($ty)
            }

            fn is_zero(&self) -> bool {
                *self == $zero
            }

            fn assign_str(&mut self, raw: &str) -> Result<(), ParseError> {
                *self = raw.trim().parse().map_err(|_| ParseError {
                    expected: stringify!($ty),
                })?;
                Ok(())
            }
        }
    )*};
}

numeric_scalar! {
    i8 => 0, i16 => 0, i32 => 0, i64 => 0, isize => 0,
    u8 => 0, u16 => 0, u32 => 0, u64 => 0, usize => 0,
    f32 => 0.0, f64 => 0.0,
}

impl ScalarValue for bool {
    fn type_name(&self) -> &'static str {
        "bool"
    }

    fn is_zero(&self) -> bool {
        !*self
    }

    fn assign_str(&mut self, raw: &str) -> Result<(), ParseError> {
        let raw = raw.trim();
        *self = if raw.eq_ignore_ascii_case("true") || raw == "1" {
            true
        } else if raw.eq_ignore_ascii_case("false") || raw == "0" {
            false
        } else {
            return Err(ParseError { expected: "bool" });
        };
        Ok(())
    }
}

impl ScalarValue for String {
    fn type_name(&self) -> &'static str {
        "string"
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn assign_str(&mut self, raw: &str) -> Result<(), ParseError> {
        *self = raw.to_string();
        Ok(())
    }
}

impl ScalarValue for PathBuf {
    fn type_name(&self) -> &'static str {
        "path"
    }

    fn is_zero(&self) -> bool {
        self.as_os_str().is_empty()
    }

    fn assign_str(&mut self, raw: &str) -> Result<(), ParseError> {
        *self = PathBuf::from(raw);
        Ok(())
    }
}

impl ScalarValue for Duration {
    fn type_name(&self) -> &'static str {
        "duration"
    }

    fn is_zero(&self) -> bool {
        *self == Duration::ZERO
    }

    fn assign_str(&mut self, raw: &str) -> Result<(), ParseError> {
        *self = humantime::parse_duration(raw.trim())
            .map_err(|_| ParseError { expected: "duration" })?;
        Ok(())
    }
}

macro_rules! list_scalar {
    ($($elem:ty => $name:literal),* $(,)?) => {$(
        impl ScalarValue for Vec<$elem> {
            fn type_name(&self) -> &'static str {
                $name
            }

            fn is_zero(&self) -> bool {
                self.is_empty()
            }

            fn assign_str(&mut self, raw: &str) -> Result<(), ParseError> {
                if raw.trim().is_empty() {
                    self.clear();
                    return Ok(());
                }
                *self = raw
                    .split(',')
                    .map(|item| {
                        item.trim()
                            .parse()
                            .map_err(|_| ParseError { expected: $name })
                    })
                    .collect::<Result<_, _>>()?;
                Ok(())
            }
        }
    )*};
}

list_scalar! {
    String => "string list",
    i64 => "i64 list",
    u64 => "u64 list",
    f64 => "f64 list",
}
