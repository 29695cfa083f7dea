//! Environment variable adapter.
//!
//! Variable names derive from field paths: with prefix `MYAPP`, the field
//! `database.pool_size` reads `MYAPP__DATABASE__POOL_SIZE`. Double underscore
//! `__` separates nesting levels; a single `_` within a segment is literal
//! (part of the field name). Values parse through the field's own scalar
//! type, so a malformed value is a [`TypeMismatch`](crate::StackfigError::TypeMismatch)
//! rather than a silently mistyped string.
//!
//! Sequence element leaves derive bracketed names (`APP__THREADS[0]__NAME`)
//! that no real environment variable can carry, so they are unreachable from
//! the environment by construction.

use std::collections::HashMap;

use tracing::debug;

use crate::chain::Loader;
use crate::error::StackfigError;
use crate::schema::{FieldValue, Introspect};
use crate::walk::walk;

/// A [`Loader`] that overlays `{PREFIX}__*` environment variables onto
/// scalar fields.
#[derive(Debug, Clone)]
pub struct EnvLoader {
    prefix: String,
}

impl EnvLoader {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Overlay from an explicit variable set instead of the process
    /// environment. Tests pass synthetic data here.
    pub fn load_from<T: Introspect>(
        &self,
        object: &mut T,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<(), StackfigError> {
        let vars: HashMap<String, String> = vars.into_iter().collect();
        let mut applied = 0usize;

        walk(object, |path, field| {
            let Some(raw) = vars.get(&self.var_name(path)) else {
                return Ok(());
            };
            match field.value_mut() {
                FieldValue::Scalar(scalar) => {
                    scalar
                        .assign_str(raw)
                        .map_err(|err| StackfigError::TypeMismatch {
                            path: path.to_string(),
                            expected: err.expected,
                            raw: raw.clone(),
                        })?;
                    applied += 1;
                    Ok(())
                }
                _ => Ok(()),
            }
        })?;

        debug!(prefix = %self.prefix, applied, "environment variables applied");
        Ok(())
    }

    fn var_name(&self, path: &str) -> String {
        format!(
            "{}__{}",
            self.prefix,
            path.replace('.', "__").to_uppercase()
        )
    }
}

impl<T: Introspect> Loader<T> for EnvLoader {
    fn load(&self, object: &mut T) -> Result<(), StackfigError> {
        self.load_from(object, std::env::vars())
    }
}
