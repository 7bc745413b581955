//! Mock configuration.
//!
//! Controls where fixtures live and how missing fixtures are treated. A process-wide
//! copy is used by [`Fixture::new`](crate::Fixture::new); tests that need isolation
//! pass their own config to [`Fixture::with_config`](crate::Fixture::with_config).

use parking_lot::RwLock;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Environment variable overriding [`MockConfig::fixture_path`]
pub const FIXTURE_PATH_ENV: &str = "TAVERN_FIXTURE_PATH";

/// Environment variable overriding [`MockConfig::throw_on_missing_fixtures`]
pub const THROW_ON_MISSING_FIXTURES_ENV: &str = "TAVERN_THROW_ON_MISSING_FIXTURES";

/// Default fixture directory, relative to the working directory
pub const DEFAULT_FIXTURE_PATH: &str = "tests/fixtures/http";

/// Configuration for fixtures and mock dispatch
///
/// # Examples
///
/// ```
/// use tavern_http::MockConfig;
///
/// let config = MockConfig {
///     fixture_path: "fixtures".into(),
///     throw_on_missing_fixtures: true,
///     ..Default::default()
/// };
/// assert!(!config.create_missing_fixture_directory);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Directory holding `{name}.json` fixture files
    pub fixture_path: PathBuf,
    /// Create the fixture directory instead of failing when it is missing
    pub create_missing_fixture_directory: bool,
    /// Fail with `FixtureMissing` instead of returning nothing for unrecorded fixtures
    pub throw_on_missing_fixtures: bool,
    /// Emit tracing events for fixture and dispatch activity
    pub enable_logging: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        MockConfig {
            fixture_path: PathBuf::from(DEFAULT_FIXTURE_PATH),
            create_missing_fixture_directory: false,
            throw_on_missing_fixtures: false,
            enable_logging: true,
        }
    }
}

fn global_cell() -> &'static RwLock<MockConfig> {
    static GLOBAL: OnceLock<RwLock<MockConfig>> = OnceLock::new();
    GLOBAL.get_or_init(|| RwLock::new(MockConfig::from_env()))
}

impl MockConfig {
    /// Defaults overridden by the `TAVERN_*` environment variables
    pub fn from_env() -> Self {
        let mut config = MockConfig::default();
        if let Ok(path) = std::env::var(FIXTURE_PATH_ENV) {
            if !path.trim().is_empty() {
                config.fixture_path = PathBuf::from(path);
            }
        }
        if let Ok(flag) = std::env::var(THROW_ON_MISSING_FIXTURES_ENV) {
            config.throw_on_missing_fixtures = parse_flag(&flag);
        }
        config
    }

    /// A copy of the process-wide config
    pub fn global() -> MockConfig {
        global_cell().read().clone()
    }

    /// Replace the process-wide config
    pub fn set_global(config: MockConfig) {
        *global_cell().write() = config;
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
