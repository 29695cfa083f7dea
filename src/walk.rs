//! Depth-first traversal of a config record's field descriptors.
//!
//! One walk drives one visitor over every leaf of the object, in declaration
//! order, building a qualified path (`postgres.db_name`, `threads[2].name`)
//! as it descends. Default injection and required-field validation are both
//! visitors over this single traversal, so they are guaranteed identical path
//! naming and identical sequence semantics.

use crate::error::StackfigError;
use crate::schema::{Field, FieldValue, Introspect};

/// Walk every leaf field of `object`, depth-first in declaration order.
///
/// `visitor` receives the leaf's qualified path and its descriptor. Nested
/// records are recursed into without a leaf invocation of their own. Sequence
/// elements recurse with an indexed path segment; value-sequence elements are
/// visited through a scratch copy that is written back into the slot, and
/// unset reference-sequence elements are skipped.
///
/// The first error returned by the visitor aborts the remaining traversal.
pub fn walk<T: Introspect>(
    object: &mut T,
    mut visitor: impl FnMut(&str, &mut Field<'_>) -> Result<(), StackfigError>,
) -> Result<(), StackfigError> {
    visit_fields(object, "", &mut visitor)
}

fn visit_fields(
    object: &mut dyn Introspect,
    prefix: &str,
    visitor: &mut dyn FnMut(&str, &mut Field<'_>) -> Result<(), StackfigError>,
) -> Result<(), StackfigError> {
    for field in object.fields() {
        let Field {
            name,
            annotations,
            value,
        } = field;
        let path = join_path(prefix, name);

        match value {
            FieldValue::Record(record) => visit_fields(record, &path, visitor)?,
            FieldValue::RecordSeq(elements) => {
                for index in 0..elements.len() {
                    let slot = format!("{path}[{index}]");
                    elements.visit(index, &mut |record| {
                        visit_fields(record, &slot, &mut *visitor)
                    })?;
                }
            }
            FieldValue::RecordRefSeq(elements) => {
                for index in 0..elements.len() {
                    let slot = format!("{path}[{index}]");
                    elements.visit(index, &mut |record| {
                        visit_fields(record, &slot, &mut *visitor)
                    })?;
                }
            }
            value => {
                // Scalar or Opaque: a leaf. Reassemble the descriptor so the
                // visitor sees name, annotations, and access together.
                let mut leaf = Field {
                    name,
                    annotations,
                    value,
                };
                visitor(&path, &mut leaf)?;
            }
        }
    }
    Ok(())
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}
