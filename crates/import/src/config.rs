use crate::error::ConfigError;

/// Import configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub database_url: String,
    /// Pool size (default: `5`).
    pub max_connections: u32,
    /// Created plus updated rows per committed batch (default: `10`).
    pub batch_size: usize,
    /// Audit actor recorded when none is given on the command line
    /// (default: `import`).
    pub actor: String,
}

impl ImportConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default    |
    /// |----------------------|------------|
    /// | `DATABASE_URL`       | (required) |
    /// | `DB_MAX_CONNECTIONS` | `5`        |
    /// | `IMPORT_BATCH_SIZE`  | `10`       |
    /// | `IMPORT_ACTOR`       | `import`   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let max_connections = parse_or(&get, "DB_MAX_CONNECTIONS", 5u32, "a valid u32")?;

        let batch_size = parse_or(&get, "IMPORT_BATCH_SIZE", 10usize, "a positive integer")?;
        if batch_size == 0 {
            return Err(ConfigError::Invalid {
                name: "IMPORT_BATCH_SIZE",
                expected: "a positive integer",
                value: "0".into(),
            });
        }

        let actor = get("IMPORT_ACTOR")
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| "import".into());

        Ok(Self {
            database_url,
            max_connections,
            batch_size,
            actor,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match get(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
    }
}
