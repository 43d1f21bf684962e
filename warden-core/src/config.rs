use argon2::Params;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL (e.g. sqlite://warden.db, postgres://...)
    pub database_url: String,

    /// Environment: development, production, test
    pub environment: String,

    /// Answer yes to every stage prompt without reading stdin.
    ///
    /// Equivalent to the `--yes` CLI flag; useful for provisioning
    /// pipelines where no terminal is attached.
    pub assume_yes: bool,

    /// Argon2 memory cost in KiB (default: crate default, ~19 MiB)
    pub hash_memory_kib: u32,

    /// Argon2 iteration count (default: crate default)
    pub hash_time_cost: u32,

    /// Argon2 lane count (default: crate default)
    pub hash_parallelism: u32,
}

impl Config {
    /// Load configuration from environment variables (with .env support).
    pub fn from_env() -> Self {
        // Load .env file if present (ignore errors if missing)
        let _ = dotenvy::dotenv();

        Config {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://warden.db?mode=rwc".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            assume_yes: std::env::var("SEED_ASSUME_YES")
                .map(|v| flag(&v))
                .unwrap_or(false),
            hash_memory_kib: env_u32("HASH_MEMORY_KIB", Params::DEFAULT_M_COST),
            hash_time_cost: env_u32("HASH_TIME_COST", Params::DEFAULT_T_COST),
            hash_parallelism: env_u32("HASH_PARALLELISM", Params::DEFAULT_P_COST),
        }
    }

    /// Check if running in development mode.
    pub fn is_dev(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: "sqlite::memory:".to_string(),
            environment: "test".to_string(),
            assume_yes: false,
            hash_memory_kib: Params::DEFAULT_M_COST,
            hash_time_cost: Params::DEFAULT_T_COST,
            hash_parallelism: Params::DEFAULT_P_COST,
        }
    }
}

fn flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

fn env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_parsing() {
        assert!(flag("true"));
        assert!(flag("TRUE"));
        assert!(flag("1"));
        assert!(flag("yes"));
        assert!(!flag("no"));
        assert!(!flag("0"));
        assert!(!flag(""));
    }

    #[test]
    fn test_is_dev() {
        let mut config = Config::default();
        assert!(!config.is_dev());
        config.environment = "development".to_string();
        assert!(config.is_dev());
    }

    #[test]
    fn test_default_hash_costs_match_argon2_defaults() {
        let config = Config::default();
        assert_eq!(config.hash_memory_kib, Params::DEFAULT_M_COST);
        assert_eq!(config.hash_time_cost, Params::DEFAULT_T_COST);
        assert_eq!(config.hash_parallelism, Params::DEFAULT_P_COST);
    }
}
