//! Layered, multi-source configuration for Rust applications. Define a
//! struct, describe its fields, and stack your sources.
//!
//! Stackfig assembles one strongly-typed configuration object from several
//! optional inputs — annotated defaults, config files (TOML/JSON/YAML),
//! environment variables — applied in a defined order, then validates the
//! result against required-field rules.
//!
//! ```ignore
//! let mut config = ServerConfig::default();
//! Chain::standard_with_path("/etc/myapp/myapp.toml", "MYAPP").load(&mut config)?;
//! RequiredValidator::new().validate(&mut config)?;
//! ```
//!
//! # Design: one traversal, many behaviors
//!
//! The core of stackfig is a generic schema walker. Each config record type
//! implements [`Introspect`], a small capability interface that lists the
//! record's fields — name, shape, annotations, mutable access — in
//! declaration order:
//!
//! ```ignore
//! impl Introspect for ServerConfig {
//!     fn fields(&mut self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::scalar("host", &mut self.host),
//!             Field::scalar("port", &mut self.port).annotated(&[("default", "6060")]),
//!             Field::record("database", &mut self.database),
//!             Field::records("workers", &mut self.workers),
//!         ]
//!     }
//! }
//! ```
//!
//! [`walk`] drives a visitor over that view depth-first, building a qualified
//! path (`database.url`, `workers[2].name`) at every leaf. Default injection
//! ([`DefaultLoader`]) and required-field validation ([`RequiredValidator`])
//! are both visitors over this one traversal, which guarantees they agree on
//! path naming and on sequence semantics — there is no second tree-walking
//! code path to drift.
//!
//! Two sequence shapes are distinguished deliberately. Elements stored by
//! value (`Vec<T>`) are visited through a scratch copy that is written back
//! into its slot afterwards, so mutations never vanish into a temporary.
//! Elements stored by reference (`Vec<Option<Box<T>>>`) mutate in place, and
//! unset elements are skipped, never dereferenced. Field shapes the walker
//! does not classify (maps, exotic containers) are passed through as opaque
//! leaves that visitors ignore.
//!
//! # Annotations
//!
//! Annotations are `(name, value)` string pairs attached to a field
//! descriptor. The core consumes two:
//!
//! | Annotation | Consumed by | Meaning |
//! |------------|-------------|---------|
//! | `default`  | [`DefaultLoader`] | string form of the default, parsed per field type |
//! | `required` | [`RequiredValidator`] | exact-match marker, `"true"` by default |
//!
//! Both names are configurable, and any other annotation is ignored by the
//! core — adapters and applications may define their own.
//!
//! Default strings parse through a closed set of scalar types: bool, every
//! integer width, floats, `String`, `PathBuf`, humantime durations
//! (`"90s"`, `"1m30s"`), and comma-separated lists. A default that does not
//! parse as its field's type fails loading with
//! [`TypeMismatch`](StackfigError::TypeMismatch).
//!
//! # Sources and ordering
//!
//! Every source implements [`Loader`] and a [`Chain`] runs them in order,
//! stopping at the first error. Sources are sparse overlays: each one only
//! touches the fields its input mentions.
//!
//! The one exception is [`DefaultLoader`]: it assigns its annotation values
//! **unconditionally**, without checking whether a field already holds
//! something. Run it first — a defaults pass placed after a file or env
//! source silently overwrites what that source loaded. The convenience
//! stacks [`Chain::standard`] and [`Chain::standard_with_path`] encode the
//! safe order (defaults, then file, then environment).
//!
//! # Environment variables
//!
//! With prefix `MYAPP`, variables map onto scalar fields via
//! double-underscore nesting:
//!
//! | Env var | Field path |
//! |---------|------------|
//! | `MYAPP__HOST` | `host` |
//! | `MYAPP__DATABASE__POOL_SIZE` | `database.pool_size` |
//!
//! `__` separates nesting levels; single `_` within a segment is literal.
//! Values parse as the target field's static type, so `MYAPP__PORT=abc`
//! is a [`TypeMismatch`](StackfigError::TypeMismatch), not a string smuggled
//! into a port number.
//!
//! # Required fields and zero values
//!
//! [`RequiredValidator`] fails on the first required leaf whose value is its
//! type's zero (0, `false`, `""`, empty list, zero duration), reporting the
//! qualified path. Zero-ness is all it can see: a port explicitly set to `0`
//! by a source is indistinguishable from a port nothing ever set. Fields for
//! which zero is a legitimate value should not be marked required.
//!
//! # File formats
//!
//! [`TomlLoader`], [`JsonLoader`], and [`YamlLoader`] each accept a path or
//! an already-open reader; [`FileLoader`] picks the adapter from the file
//! extension. JSON and YAML sit behind the `json` and `yaml` Cargo features
//! (both on by default):
//!
//! ```toml
//! stackfig = { version = "...", default-features = false }  # TOML only
//! ```
//!
//! # Error handling
//!
//! All fallible operations return [`StackfigError`]. Propagation is
//! fail-fast everywhere: the first visitor error aborts a traversal, the
//! first failing loader aborts its chain, and nothing is rolled back or
//! retried. [`Chain::must_load`] panics on error for callers that treat a
//! broken configuration as fatal at startup; everything else composes on the
//! fallible forms.

pub mod error;

mod chain;
mod defaults;
mod env;
mod file;
pub(crate) mod merge;
mod scalar;
mod schema;
mod validate;
mod walk;

#[cfg(test)]
mod fixtures;

pub use chain::{Chain, Loader};
pub use defaults::{DEFAULT_ANNOTATION, DefaultLoader};
pub use env::EnvLoader;
pub use error::StackfigError;
#[cfg(feature = "json")]
pub use file::JsonLoader;
#[cfg(feature = "yaml")]
pub use file::YamlLoader;
pub use file::{FileLoader, TomlLoader};
pub use scalar::{ParseError, ScalarValue};
pub use schema::{
    Annotations, ElementVisitor, Field, FieldValue, Introspect, Kind, RecordRefSlice, RecordSlice,
};
pub use validate::{RequiredValidator, Validator};
pub use walk::walk;
