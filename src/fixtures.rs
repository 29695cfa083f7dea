#[cfg(test)]
pub mod test {
    use std::collections::HashMap;
    use std::time::Duration;

    use serde::{Deserialize, Serialize};

    use crate::schema::{Field, Introspect};

    /// The walker-family fixture: every field shape the core classifies.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Server {
        pub name: String,
        pub port: u16,
        pub enabled: bool,
        pub users: Vec<String>,
        pub interval: Duration,
        pub postgres: Postgres,
        pub threads: Vec<Thread>,
        pub backends: Vec<Option<Box<Backend>>>,
        pub metadata: HashMap<String, String>,
    }

    impl Introspect for Server {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::scalar("name", &mut self.name),
                Field::scalar("port", &mut self.port).annotated(&[("default", "6060")]),
                Field::scalar("enabled", &mut self.enabled).annotated(&[("default", "true")]),
                Field::scalar("users", &mut self.users).annotated(&[("default", "alpha,beta")]),
                Field::scalar("interval", &mut self.interval).annotated(&[("default", "30s")]),
                Field::record("postgres", &mut self.postgres),
                Field::records("threads", &mut self.threads),
                Field::record_refs("backends", &mut self.backends),
                Field::opaque("metadata"),
            ]
        }
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Postgres {
        pub enabled: bool,
        pub port: u16,
        pub db_name: String,
        pub password: String,
    }

    impl Introspect for Postgres {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::scalar("enabled", &mut self.enabled),
                Field::scalar("port", &mut self.port)
                    .annotated(&[("default", "5432"), ("required", "true")]),
                Field::scalar("db_name", &mut self.db_name)
                    .annotated(&[("default", "configdb"), ("required", "true")]),
                Field::scalar("password", &mut self.password),
            ]
        }
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Thread {
        pub name: String,
        pub priority: i64,
    }

    impl Introspect for Thread {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::scalar("name", &mut self.name)
                    .annotated(&[("default", "worker"), ("required", "true")]),
                Field::scalar("priority", &mut self.priority).annotated(&[("default", "10")]),
            ]
        }
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Backend {
        pub host: String,
        pub weight: i64,
    }

    impl Introspect for Backend {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::scalar("host", &mut self.host).annotated(&[("required", "true")]),
                Field::scalar("weight", &mut self.weight).annotated(&[("default", "1")]),
            ]
        }
    }

    // -- Serde-only fixture for the format adapters ------------------------

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct HttpConfig {
        pub host: String,
        pub port: u16,
        pub debug: bool,
        pub database: DbConfig,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct DbConfig {
        pub url: Option<String>,
        pub pool_size: u32,
    }

    #[test]
    fn server_fixture_round_trips_through_the_interchange_table() {
        let server = Server::default();
        let table = toml::Value::try_from(&server).unwrap();
        let back: Server = table.try_into().unwrap();
        assert_eq!(back, server);
    }
}
