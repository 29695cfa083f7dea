//! Field descriptors: the capability interface that makes a config record
//! traversable.
//!
//! Rust has no runtime reflection, so every record type that wants defaults
//! injected or required fields validated implements [`Introspect`]: one method
//! returning a descriptor per field, in declaration order. A descriptor pairs
//! the field's name and annotation table with a [`FieldValue`] access view, and
//! the walker (see [`walk()`](crate::walk())) drives visitors over those views.
//!
//! Descriptors are ephemeral — they borrow from the object and live only for
//! the duration of one traversal call.

use crate::error::StackfigError;
use crate::scalar::ScalarValue;

/// A config record type whose fields can be enumerated and accessed.
///
/// Implementations list every field, in declaration order, with its annotations:
///
/// ```ignore
/// impl Introspect for Server {
///     fn fields(&mut self) -> Vec<Field<'_>> {
///         vec![
///             Field::scalar("name", &mut self.name),
///             Field::scalar("port", &mut self.port).annotated(&[("default", "6060")]),
///             Field::record("postgres", &mut self.postgres),
///             Field::records("threads", &mut self.threads),
///         ]
///     }
/// }
/// ```
pub trait Introspect {
    /// Descriptors for every field of this record, in declaration order.
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// A field's annotation table: `(name, value)` pairs, typically a `&'static`
/// slice written next to the field list.
pub type Annotations = &'static [(&'static str, &'static str)];

/// How a field is shaped, without the access machinery. Derived from the
/// field's [`FieldValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Scalar,
    Record,
    RecordSeq,
    RecordRefSeq,
    Opaque,
}

/// Mutable access to one field of a record.
pub enum FieldValue<'a> {
    /// A leaf the scalar dispatch understands.
    Scalar(&'a mut dyn ScalarValue),
    /// A nested record; the walker recurses into it.
    Record(&'a mut dyn Introspect),
    /// A sequence of records stored by value (`Vec<T>`).
    RecordSeq(&'a mut dyn RecordSlice),
    /// A sequence of records stored by reference (`Vec<Option<Box<T>>>`,
    /// `Vec<Box<T>>`).
    RecordRefSeq(&'a mut dyn RecordRefSlice),
    /// A shape the core does not classify (maps, exotic containers). Passed to
    /// visitors as an unparsed leaf; visitors that don't understand it no-op.
    Opaque,
}

impl FieldValue<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            FieldValue::Scalar(_) => Kind::Scalar,
            FieldValue::Record(_) => Kind::Record,
            FieldValue::RecordSeq(_) => Kind::RecordSeq,
            FieldValue::RecordRefSeq(_) => Kind::RecordRefSeq,
            FieldValue::Opaque => Kind::Opaque,
        }
    }
}

/// One field of a record instance: name, annotations, and mutable access.
pub struct Field<'a> {
    pub(crate) name: &'static str,
    pub(crate) annotations: Annotations,
    pub(crate) value: FieldValue<'a>,
}

impl<'a> Field<'a> {
    pub fn scalar(name: &'static str, value: &'a mut dyn ScalarValue) -> Self {
        Self::new(name, FieldValue::Scalar(value))
    }

    pub fn record(name: &'static str, value: &'a mut dyn Introspect) -> Self {
        Self::new(name, FieldValue::Record(value))
    }

    pub fn records(name: &'static str, value: &'a mut dyn RecordSlice) -> Self {
        Self::new(name, FieldValue::RecordSeq(value))
    }

    pub fn record_refs(name: &'static str, value: &'a mut dyn RecordRefSlice) -> Self {
        Self::new(name, FieldValue::RecordRefSeq(value))
    }

    pub fn opaque(name: &'static str) -> Self {
        Self::new(name, FieldValue::Opaque)
    }

    fn new(name: &'static str, value: FieldValue<'a>) -> Self {
        Field {
            name,
            annotations: &[],
            value,
        }
    }

    /// Attach the field's annotation table.
    pub fn annotated(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> Kind {
        self.value.kind()
    }

    /// Look up an annotation by name.
    ///
    /// `None` means the annotation is not present, which is distinct from
    /// `Some("")` — an annotation present with an empty value.
    pub fn annotation(&self, name: &str) -> Option<&'static str> {
        self.annotations
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    pub fn value_mut(&mut self) -> &mut FieldValue<'a> {
        &mut self.value
    }
}

/// Per-element visitor used by the slice traits.
pub type ElementVisitor<'v> = dyn FnMut(&mut dyn Introspect) -> Result<(), StackfigError> + 'v;

/// A sequence of records stored by value.
///
/// Element access goes through a scratch copy: the element is cloned out,
/// the visitor runs against the scratch, and the scratch is written back into
/// the slot. The write-back is unconditional on success, whether or not the
/// visitor mutated anything.
pub trait RecordSlice {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `visit` against element `index` via the scratch copy, then write the
    /// scratch back. An error from `visit` propagates without writing back.
    fn visit(&mut self, index: usize, visit: &mut ElementVisitor<'_>)
    -> Result<(), StackfigError>;
}

impl<T: Introspect + Clone> RecordSlice for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn visit(
        &mut self,
        index: usize,
        visit: &mut ElementVisitor<'_>,
    ) -> Result<(), StackfigError> {
        let mut scratch = self[index].clone();
        visit(&mut scratch)?;
        self[index] = scratch;
        Ok(())
    }
}

/// A sequence of records stored by reference. Mutation is in place; an unset
/// (`None`) element is silently skipped, never dereferenced.
pub trait RecordRefSlice {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `visit` against element `index` in place, or skip it if unset.
    fn visit(&mut self, index: usize, visit: &mut ElementVisitor<'_>)
    -> Result<(), StackfigError>;
}

impl<T: Introspect> RecordRefSlice for Vec<Option<Box<T>>> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn visit(
        &mut self,
        index: usize,
        visit: &mut ElementVisitor<'_>,
    ) -> Result<(), StackfigError> {
        match &mut self[index] {
            Some(element) => visit(element.as_mut()),
            None => Ok(()),
        }
    }
}

impl<T: Introspect> RecordRefSlice for Vec<Box<T>> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn visit(
        &mut self,
        index: usize,
        visit: &mut ElementVisitor<'_>,
    ) -> Result<(), StackfigError> {
        visit(self[index].as_mut())
    }
}
