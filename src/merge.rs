//! Table merging: the sparse-overlay step behind every format adapter.

use serde::Serialize;
use serde::de::DeserializeOwned;
use toml::Table;

use crate::error::StackfigError;

/// Deep-merge `overlay` on top of `base`.
/// If both sides have a Table for the same key, recurse.
/// Otherwise, `overlay`'s value wins.
pub(crate) fn deep_merge(mut base: Table, overlay: Table) -> Table {
    for (key, overlay_val) in overlay {
        match (base.remove(&key), overlay_val) {
            (Some(toml::Value::Table(base_tbl)), toml::Value::Table(overlay_tbl)) => {
                base.insert(key, toml::Value::Table(deep_merge(base_tbl, overlay_tbl)));
            }
            (_, overlay_val) => {
                base.insert(key, overlay_val);
            }
        }
    }
    base
}

/// Overlay a decoded document onto a live config object.
///
/// The object's current state is serialized to a [`Table`], the overlay is
/// deep-merged on top, and the merged table is deserialized back into the
/// object. Keys the overlay does not mention therefore keep their current
/// values — each source stays sparse.
pub(crate) fn merge_into<T>(object: &mut T, overlay: Table) -> Result<(), StackfigError>
where
    T: Serialize + DeserializeOwned,
{
    let current = toml::Value::try_from(&*object).map_err(|err| StackfigError::Merge {
        reason: err.to_string(),
    })?;
    let toml::Value::Table(current) = current else {
        return Err(StackfigError::Merge {
            reason: "config object did not serialize to a table".into(),
        });
    };

    let merged = deep_merge(current, overlay);
    *object = toml::Value::Table(merged)
        .try_into()
        .map_err(|err: toml::de::Error| StackfigError::Merge {
            reason: err.to_string(),
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{DbConfig, HttpConfig};

    fn table(toml_str: &str) -> Table {
        toml_str.parse::<Table>().unwrap()
    }

    #[test]
    fn disjoint_keys_merge() {
        let merged = deep_merge(table(r#"host = "localhost""#), table("port = 3000"));
        assert_eq!(merged["host"].as_str().unwrap(), "localhost");
        assert_eq!(merged["port"].as_integer().unwrap(), 3000);
    }

    #[test]
    fn same_scalar_key_overlay_wins() {
        let merged = deep_merge(table("port = 8080"), table("port = 3000"));
        assert_eq!(merged["port"].as_integer().unwrap(), 3000);
    }

    #[test]
    fn nested_tables_recurse() {
        let base = table("[database]\nurl = \"postgres://old\"\npool_size = 5\n");
        let overlay = table("[database]\npool_size = 20\n");
        let merged = deep_merge(base, overlay);
        let db = merged["database"].as_table().unwrap();
        assert_eq!(db["url"].as_str().unwrap(), "postgres://old");
        assert_eq!(db["pool_size"].as_integer().unwrap(), 20);
    }

    #[test]
    fn overlay_scalar_replaces_table() {
        let base = table("[database]\nurl = \"x\"\n");
        let overlay = table(r#"database = "flat_string""#);
        let merged = deep_merge(base, overlay);
        assert_eq!(merged["database"].as_str().unwrap(), "flat_string");
    }

    #[test]
    fn empty_overlay_returns_base() {
        let base = table("port = 8080");
        assert_eq!(deep_merge(base.clone(), Table::new()), base);
    }

    #[test]
    fn sequential_merges_stack() {
        let merged = deep_merge(
            deep_merge(table(r#"host = "a""#), table("port = 1000")),
            table(r#"host = "c""#),
        );
        assert_eq!(merged["host"].as_str().unwrap(), "c");
        assert_eq!(merged["port"].as_integer().unwrap(), 1000);
    }

    // --- merge_into ---

    fn http_config() -> HttpConfig {
        HttpConfig {
            host: "localhost".into(),
            port: 8080,
            debug: false,
            database: DbConfig {
                url: None,
                pool_size: 5,
            },
        }
    }

    #[test]
    fn overlay_touches_only_mentioned_fields() {
        let mut config = http_config();
        merge_into(&mut config, table("port = 3000")).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "localhost");
        assert_eq!(config.database.pool_size, 5);
    }

    #[test]
    fn nested_overlay_reaches_nested_fields() {
        let mut config = http_config();
        merge_into(&mut config, table("[database]\nurl = \"pg://db\"\n")).unwrap();
        assert_eq!(config.database.url.as_deref(), Some("pg://db"));
        assert_eq!(config.database.pool_size, 5);
    }

    #[test]
    fn unset_option_survives_the_round_trip() {
        let mut config = http_config();
        merge_into(&mut config, table("debug = true")).unwrap();
        assert_eq!(config.database.url, None);
        assert!(config.debug);
    }

    #[test]
    fn wrongly_typed_overlay_value_is_an_error() {
        let mut config = http_config();
        let result = merge_into(&mut config, table("port = \"not a number\""));
        assert!(matches!(result, Err(StackfigError::Merge { .. })));
    }

    #[test]
    fn empty_overlay_preserves_everything() {
        let mut config = http_config();
        merge_into(&mut config, Table::new()).unwrap();
        assert_eq!(config, http_config());
    }
}
