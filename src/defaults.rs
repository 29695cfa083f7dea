//! Default injection: populate fields from their `default` annotations.

use crate::chain::Loader;
use crate::error::StackfigError;
use crate::schema::{FieldValue, Introspect};
use crate::walk::walk;

/// Default annotation name consulted by [`DefaultLoader`].
pub const DEFAULT_ANNOTATION: &str = "default";

/// A [`Loader`] that fills fields from their default annotations.
///
/// For every leaf whose annotation is present and non-empty, the annotation
/// string is parsed into the field's static type and assigned. A field with
/// no default annotation is simply left alone.
///
/// Assignment is **unconditional**: the loader does not check whether the
/// field already holds a non-zero value, so re-running it always re-applies
/// the annotated defaults. Order your chain accordingly — defaults placed
/// after another source will clobber what that source loaded. The convenience
/// chains in [`Chain`](crate::Chain) run defaults first so explicit sources
/// win.
#[derive(Debug, Clone)]
pub struct DefaultLoader {
    annotation: &'static str,
}

impl DefaultLoader {
    pub fn new() -> Self {
        Self {
            annotation: DEFAULT_ANNOTATION,
        }
    }

    /// Use a different annotation name (e.g. `"fallback"`).
    pub fn with_annotation(annotation: &'static str) -> Self {
        Self { annotation }
    }
}

impl Default for DefaultLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Introspect> Loader<T> for DefaultLoader {
    fn load(&self, object: &mut T) -> Result<(), StackfigError> {
        walk(object, |path, field| {
            let Some(raw) = field.annotation(self.annotation) else {
                return Ok(());
            };
            if raw.is_empty() {
                return Ok(());
            }
            match field.value_mut() {
                FieldValue::Scalar(scalar) => {
                    scalar
                        .assign_str(raw)
                        .map_err(|err| StackfigError::TypeMismatch {
                            path: path.to_string(),
                            expected: err.expected,
                            raw: raw.to_string(),
                        })
                }
                // An annotated opaque leaf is not ours to parse.
                _ => Ok(()),
            }
        })
    }
}
