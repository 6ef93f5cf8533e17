use figment::{providers::Env, Figment};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::{str::FromStr, time::Duration};

#[derive(serde::Deserialize, Debug, Clone)]
/// The configuration of the function, read from the environment once per
/// container start.
///
/// All variables are prefixed with `LEADS_`; nested fields are joined with
/// a double underscore, e.g. `LEADS_DATABASE__URL` for [`DatabaseConfig::url`].
pub struct Config {
    pub database: DatabaseConfig,
}

impl Config {
    /// The configuration sources, in priority order.
    pub fn figment() -> Figment {
        Figment::new().merge(Env::prefixed("LEADS_").split("__"))
    }

    pub fn load() -> Result<Config, figment::Error> {
        Self::figment().extract()
    }
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct DatabaseConfig {
    /// The `sqlx` connection string, e.g. `sqlite:///var/task/leads.db`.
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// How long an invocation waits for a free connection before giving up.
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
    /// Create the database file if it does not exist yet.
    #[serde(default)]
    pub create_if_missing: bool,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<SqliteConnectOptions, sqlx::Error> {
        Ok(SqliteConnectOptions::from_str(&self.url)?.create_if_missing(self.create_if_missing))
    }

    pub async fn pool(&self) -> Result<SqlitePool, sqlx::Error> {
        SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .connect_with(self.connect_options()?)
            .await
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    3
}

#[cfg(test)]
mod tests {
    use super::Config;
    use figment::Jail;

    #[test]
    fn database_settings_come_from_the_environment() {
        Jail::expect_with(|jail| {
            jail.set_env("LEADS_DATABASE__URL", "sqlite://leads.db");
            jail.set_env("LEADS_DATABASE__MAX_CONNECTIONS", "2");
            jail.set_env("LEADS_DATABASE__CREATE_IF_MISSING", "true");

            let config = Config::load()?;
            assert_eq!(config.database.url, "sqlite://leads.db");
            assert_eq!(config.database.max_connections, 2);
            assert_eq!(config.database.acquire_timeout_secs, 3);
            assert!(config.database.create_if_missing);
            Ok(())
        });
    }

    #[test]
    fn defaults_apply_when_only_the_url_is_set() {
        Jail::expect_with(|jail| {
            jail.set_env("LEADS_DATABASE__URL", "sqlite::memory:");

            let config = Config::load()?;
            assert_eq!(config.database.max_connections, 5);
            assert!(!config.database.create_if_missing);
            Ok(())
        });
    }

    #[test]
    fn the_database_url_is_required() {
        Jail::expect_with(|_| {
            assert!(Config::load().is_err());
            Ok(())
        });
    }
}
