//! Source chaining: ordered, fail-fast composition of loaders.

use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::defaults::DefaultLoader;
use crate::env::EnvLoader;
use crate::error::StackfigError;
use crate::file::FileLoader;
use crate::schema::Introspect;

/// A configuration source that populates fields of a caller-owned object.
///
/// Implemented by [`DefaultLoader`], [`EnvLoader`], the file adapters, and
/// [`Chain`] itself. Closures implement it too, which keeps one-off sources
/// and tests free of ceremony:
///
/// ```ignore
/// chain.with(|config: &mut AppConfig| {
///     config.port = 4000;
///     Ok(())
/// })
/// ```
pub trait Loader<T> {
    fn load(&self, object: &mut T) -> Result<(), StackfigError>;
}

impl<T, F> Loader<T> for F
where
    F: Fn(&mut T) -> Result<(), StackfigError>,
{
    fn load(&self, object: &mut T) -> Result<(), StackfigError> {
        self(object)
    }
}

/// An ordered list of loaders applied in sequence to the same object.
///
/// The first failing loader aborts the chain and its error is returned
/// unchanged; later loaders never run. There is no rollback — whatever
/// earlier loaders already wrote stays written.
///
/// Each layer is sparse: a loader only touches the fields its source
/// mentions, so unmentioned fields fall through to whatever an earlier
/// loader (or the annotated defaults) put there. Put [`DefaultLoader`]
/// first — it assigns unconditionally, and running it after another source
/// overwrites that source's values.
pub struct Chain<T> {
    loaders: Vec<Box<dyn Loader<T>>>,
}

impl<T> Chain<T> {
    pub fn new() -> Self {
        Self {
            loaders: Vec::new(),
        }
    }

    /// Append a loader. Later loaders see (and may overwrite) the effects of
    /// earlier ones.
    pub fn with(mut self, loader: impl Loader<T> + 'static) -> Self {
        self.loaders.push(Box::new(loader));
        self
    }

    /// Run every loader in order against `object`, stopping at the first
    /// error.
    pub fn load(&self, object: &mut T) -> Result<(), StackfigError> {
        debug!(loaders = self.loaders.len(), "running source chain");
        for (index, loader) in self.loaders.iter().enumerate() {
            loader.load(object).inspect_err(|_| {
                debug!(aborted_at = index, "source chain aborted");
            })?;
        }
        Ok(())
    }

    /// Like [`load`](Self::load), but panics on error.
    ///
    /// For program startup where a broken configuration is unrecoverable and
    /// a fatal stop is the desired behavior. Everything else should use the
    /// fallible form.
    pub fn must_load(&self, object: &mut T) {
        if let Err(err) = self.load(object) {
            panic!("configuration failed: {err}");
        }
    }
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Loader<T> for Chain<T> {
    fn load(&self, object: &mut T) -> Result<(), StackfigError> {
        Chain::load(self, object)
    }
}

impl<T> Chain<T>
where
    T: Introspect + Serialize + DeserializeOwned + 'static,
{
    /// The common two-source stack: annotated defaults, then environment
    /// variables under `prefix`.
    pub fn standard(prefix: impl Into<String>) -> Self {
        Chain::new()
            .with(DefaultLoader::new())
            .with(EnvLoader::new(prefix))
    }

    /// The common three-source stack: annotated defaults, then a config file
    /// (format picked by extension), then environment variables under
    /// `prefix`.
    pub fn standard_with_path(path: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Chain::new()
            .with(DefaultLoader::new())
            .with(FileLoader::from_path(path))
            .with(EnvLoader::new(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::Server;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn failing(reason: &str) -> impl Fn(&mut Server) -> Result<(), StackfigError> {
        let reason = reason.to_string();
        move |_: &mut Server| {
            Err(StackfigError::Merge {
                reason: reason.clone(),
            })
        }
    }

    #[test]
    fn loaders_run_in_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (order.clone(), order.clone());
        let chain = Chain::new()
            .with(move |_: &mut Server| {
                a.borrow_mut().push("first");
                Ok(())
            })
            .with(move |_: &mut Server| {
                b.borrow_mut().push("second");
                Ok(())
            });
        chain.load(&mut Server::default()).unwrap();
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn first_failure_short_circuits_and_is_returned_unchanged() {
        let later_ran = Rc::new(RefCell::new(false));
        let flag = later_ran.clone();
        let chain = Chain::new()
            .with(|_: &mut Server| Ok(()))
            .with(failing("middle broke"))
            .with(move |_: &mut Server| {
                *flag.borrow_mut() = true;
                Ok(())
            });
        let err = chain.load(&mut Server::default()).unwrap_err();
        match err {
            StackfigError::Merge { reason } => assert_eq!(reason, "middle broke"),
            other => panic!("Expected the middle loader's error, got: {other:?}"),
        }
        assert!(!*later_ran.borrow());
    }

    #[test]
    fn no_rollback_after_partial_application() {
        let chain = Chain::new()
            .with(|server: &mut Server| {
                server.port = 1234;
                Ok(())
            })
            .with(failing("late failure"));
        let mut server = Server::default();
        assert!(chain.load(&mut server).is_err());
        assert_eq!(server.port, 1234);
    }

    #[test]
    fn later_loader_overwrites_earlier() {
        let chain = Chain::new()
            .with(|server: &mut Server| {
                server.name = "early".into();
                Ok(())
            })
            .with(|server: &mut Server| {
                server.name = "late".into();
                Ok(())
            });
        let mut server = Server::default();
        chain.load(&mut server).unwrap();
        assert_eq!(server.name, "late");
    }

    #[test]
    fn explicit_source_after_defaults_wins() {
        let chain = Chain::new()
            .with(DefaultLoader::new())
            .with(|server: &mut Server| {
                server.port = 3000;
                Ok(())
            });
        let mut server = Server::default();
        chain.load(&mut server).unwrap();
        assert_eq!(server.port, 3000);
    }

    #[test]
    fn defaults_after_a_source_clobber_it() {
        // The documented footgun: unconditional defaults overwrite whatever
        // an earlier loader set.
        let chain = Chain::new()
            .with(|server: &mut Server| {
                server.port = 3000;
                Ok(())
            })
            .with(DefaultLoader::new());
        let mut server = Server::default();
        chain.load(&mut server).unwrap();
        assert_eq!(server.port, 6060);
    }

    #[test]
    fn a_chain_is_itself_a_loader() {
        let inner: Chain<Server> = Chain::new().with(|server: &mut Server| {
            server.name = "nested".into();
            Ok(())
        });
        let outer = Chain::new().with(inner);
        let mut server = Server::default();
        outer.load(&mut server).unwrap();
        assert_eq!(server.name, "nested");
    }

    #[test]
    fn empty_chain_is_a_no_op() {
        let chain: Chain<Server> = Chain::new();
        let mut server = Server::default();
        chain.load(&mut server).unwrap();
        assert_eq!(server, Server::default());
    }

    #[test]
    #[should_panic(expected = "configuration failed")]
    fn must_load_panics_on_error() {
        let chain = Chain::new().with(failing("fatal"));
        chain.must_load(&mut Server::default());
    }

    #[test]
    fn must_load_passes_through_on_success() {
        let chain = Chain::new().with(DefaultLoader::new());
        let mut server = Server::default();
        chain.must_load(&mut server);
        assert_eq!(server.port, 6060);
    }

    #[test]
    fn standard_with_path_layers_defaults_file_env() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("server.toml");
        std::fs::write(&path, "port = 8181\nname = \"from-file\"\n").unwrap();

        // No STACKFIG_TEST__* variables exist, so the env layer is a no-op.
        let chain = Chain::<Server>::standard_with_path(&path, "STACKFIG_TEST");
        let mut server = Server::default();
        chain.load(&mut server).unwrap();
        assert_eq!(server.port, 8181); // file overrides the default
        assert_eq!(server.name, "from-file");
        assert_eq!(server.postgres.db_name, "configdb"); // default preserved
    }

    #[test]
    fn standard_chain_applies_defaults_then_env() {
        use crate::env::EnvLoader;
        // Synthetic env vars stand in for the process environment.
        let chain = Chain::new()
            .with(DefaultLoader::new())
            .with(|server: &mut Server| {
                EnvLoader::new("APP").load_from(
                    server,
                    [("APP__PORT".to_string(), "7070".to_string())],
                )
            });
        let mut server = Server::default();
        chain.load(&mut server).unwrap();
        assert_eq!(server.port, 7070); // env wins over default
        assert_eq!(server.postgres.db_name, "configdb"); // default preserved
    }
}
