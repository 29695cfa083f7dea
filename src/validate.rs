//! Required-field validation over the assembled config object.

use crate::error::StackfigError;
use crate::schema::{FieldValue, Introspect};
use crate::walk::walk;

/// Checks an assembled config object against predefined rules.
///
/// [`RequiredValidator`] is the built-in implementation; additional rule sets
/// compose through this trait the same way loaders compose through
/// [`Loader`](crate::Loader).
///
/// Validation takes `&mut` because it runs over the same descriptor traversal
/// the loaders use, which requires mutable field access; validators do not
/// change observable state.
pub trait Validator<T> {
    fn validate(&self, object: &mut T) -> Result<(), StackfigError>;
}

/// Fails when a field marked required still holds its type's zero value.
///
/// A leaf participates only when its annotation under the configured name
/// equals the configured value exactly (defaults: `required = "true"`). The
/// first zero-valued required leaf in traversal order is reported with its
/// qualified path; there is no aggregation of further violations.
///
/// Zero means zero: a field a source explicitly set to `0`, `false`, or `""`
/// is indistinguishable from one nothing ever set. Fields whose zero value is
/// legitimate should not carry the required annotation.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    annotation: &'static str,
    expected: &'static str,
}

impl RequiredValidator {
    pub fn new() -> Self {
        Self {
            annotation: "required",
            expected: "true",
        }
    }

    /// Use a different annotation name and match value.
    pub fn with_annotation(annotation: &'static str, expected: &'static str) -> Self {
        Self {
            annotation,
            expected,
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Introspect> Validator<T> for RequiredValidator {
    fn validate(&self, object: &mut T) -> Result<(), StackfigError> {
        walk(object, |path, field| {
            if field.annotation(self.annotation) != Some(self.expected) {
                return Ok(());
            }
            match field.value_mut() {
                FieldValue::Scalar(scalar) if scalar.is_zero() => {
                    Err(StackfigError::MissingRequired {
                        path: path.to_string(),
                    })
                }
                // Non-zero scalars pass; opaque leaves have no zero to check.
                _ => Ok(()),
            }
        })
    }
}
