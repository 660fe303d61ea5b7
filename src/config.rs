//! Service configuration.
//!
//! Layered, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. an optional TOML file
//! 3. `ARITH_*` environment variables, `__` between nesting levels
//!    (`ARITH_SERVER__PORT=9000`, `ARITH_LIMITS__MAX_FACTORIAL=5000`)

use std::net::SocketAddr;

use serde::Deserialize;

use crate::error::Error;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

/// Upper bounds on attacker-controlled input sizes. Unset means unbounded.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub struct LimitsConfig {
    /// Largest accepted `n` for `/factorial`.
    #[serde(default)]
    pub max_factorial: Option<u64>,
    /// Largest accepted `limit` for `/fibonacci`.
    #[serde(default)]
    pub max_fibonacci: Option<u64>,
}

impl Config {
    /// Loads configuration from `path` (extension optional, file optional)
    /// layered under the environment.
    pub fn load_from(path: &str) -> Result<Self, Error> {
        let settings = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("ARITH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, Error> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|source| Error::Addr { addr, source })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig { host: "127.0.0.1".to_owned(), port: 8000 },
            logging: LoggingConfig { level: "info".to_owned(), json: false },
            limits: LimitsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::{Mutex, MutexGuard};

    use super::*;

    /// Serialises tests that read or mutate `ARITH_*` variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write_config(name: &str, contents: &str) -> (PathBuf, PathBuf) {
        let dir = std::env::temp_dir().join(format!("arith-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let file = dir.join("arith.toml");
        std::fs::write(&file, contents).expect("write config");
        (dir, file)
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let _env = env_lock();
        let cfg = Config::load_from("does/not/exist/arith").expect("defaults load");
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.logging.level, "info");
        assert!(!cfg.logging.json);
    }

    #[test]
    fn file_overrides_defaults() {
        let _env = env_lock();
        let (dir, file) = write_config(
            "file",
            "[server]\nport = 9123\n\n[limits]\nmax_factorial = 500\n",
        );

        let cfg = Config::load_from(file.to_str().expect("utf-8 path")).expect("load");
        assert_eq!(cfg.server.port, 9123);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.limits.max_factorial, Some(500));
        assert_eq!(cfg.limits.max_fibonacci, None);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn environment_overrides_file() {
        let _env = env_lock();
        let (dir, file) = write_config(
            "env",
            "[server]\nport = 9123\n\n[limits]\nmax_factorial = 500\nmax_fibonacci = 40\n",
        );

        // SAFETY: every test touching ARITH_* holds ENV_LOCK.
        unsafe {
            std::env::set_var("ARITH_SERVER__PORT", "9555");
            std::env::set_var("ARITH_LIMITS__MAX_FACTORIAL", "77");
        }
        let loaded = Config::load_from(file.to_str().expect("utf-8 path"));
        unsafe {
            std::env::remove_var("ARITH_SERVER__PORT");
            std::env::remove_var("ARITH_LIMITS__MAX_FACTORIAL");
        }
        std::fs::remove_dir_all(&dir).ok();

        let cfg = loaded.expect("load");
        assert_eq!(cfg.server.port, 9555);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.limits.max_factorial, Some(77));
        assert_eq!(cfg.limits.max_fibonacci, Some(40));
    }

    #[test]
    fn socket_addr_rejects_bad_host() {
        let mut cfg = Config::default();
        assert_eq!(cfg.socket_addr().expect("valid").port(), 8000);
        cfg.server.host = "not a host".to_owned();
        assert!(matches!(cfg.socket_addr(), Err(Error::Addr { .. })));
    }
}
