use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::env;
use std::time::Duration;

const DEFAULT_ADVANCE_DELAY_MS: u64 = 2000;
const DEFAULT_CELEBRATION_MS: u64 = 2000;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Pause between answer feedback and the next (or retried) question
    pub advance_delay_ms: u64,
    /// How long the level-up banner stays active
    pub celebration_ms: u64,
    /// When false, questions are announced without a speech phrase
    pub sound_enabled: bool,
    /// Fixed seed for replayable sessions
    pub rng_seed: Option<u64>,
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            advance_delay_ms: DEFAULT_ADVANCE_DELAY_MS,
            celebration_ms: DEFAULT_CELEBRATION_MS,
            sound_enabled: true,
            rng_seed: None,
            log_json: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            // e.g. APP__QUIZ__ADVANCE_DELAY_MS=500
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let defaults = Config::default();

        let advance_delay_ms = or_default(
            settings.get::<u64>("quiz.advance_delay_ms"),
            defaults.advance_delay_ms,
        )?;
        let celebration_ms = or_default(
            settings.get::<u64>("quiz.celebration_ms"),
            defaults.celebration_ms,
        )?;
        let sound_enabled =
            or_default(settings.get_bool("quiz.sound_enabled"), defaults.sound_enabled)?;
        let rng_seed = or_default(settings.get::<Option<u64>>("quiz.rng_seed"), None)?;
        let log_json = or_default(settings.get_bool("logging.json"), defaults.log_json)?;

        Ok(Config {
            advance_delay_ms,
            celebration_ms,
            sound_enabled,
            rng_seed,
            log_json,
        })
    }

    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }

    pub fn celebration_duration(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(i64::try_from(self.celebration_ms).unwrap_or(i64::MAX))
    }

    /// Random source for a new session: seeded when `rng_seed` is set, OS entropy otherwise
    pub fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Missing keys take the default; malformed values are still errors
fn or_default<T>(
    value: Result<T, config::ConfigError>,
    default: T,
) -> Result<T, config::ConfigError> {
    match value {
        Ok(value) => Ok(value),
        Err(config::ConfigError::NotFound(_)) => Ok(default),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "APP__QUIZ__ADVANCE_DELAY_MS",
            "APP__QUIZ__CELEBRATION_MS",
            "APP__QUIZ__SOUND_ENABLED",
            "APP__QUIZ__RNG_SEED",
            "APP__LOGGING__JSON",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn load_falls_back_to_defaults() {
        clear_env();
        let config = Config::load().unwrap();
        assert_eq!(config.advance_delay_ms, 2000);
        assert_eq!(config.celebration_ms, 2000);
        assert!(config.sound_enabled);
        assert_eq!(config.rng_seed, None);
    }

    #[test]
    #[serial]
    fn env_overrides_quiz_settings() {
        clear_env();
        env::set_var("APP__QUIZ__ADVANCE_DELAY_MS", "500");
        env::set_var("APP__QUIZ__SOUND_ENABLED", "false");
        env::set_var("APP__QUIZ__RNG_SEED", "42");

        let config = Config::load().unwrap();
        assert_eq!(config.advance_delay(), Duration::from_millis(500));
        assert!(!config.sound_enabled);
        assert_eq!(config.rng_seed, Some(42));

        clear_env();
    }

    #[test]
    #[serial]
    fn malformed_value_is_an_error() {
        clear_env();
        env::set_var("APP__QUIZ__ADVANCE_DELAY_MS", "soon");

        let result = Config::load();
        clear_env();
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn malformed_flag_is_an_error() {
        clear_env();
        env::set_var("APP__QUIZ__SOUND_ENABLED", "maybe");

        let result = Config::load();
        clear_env();
        assert!(result.is_err());
    }

    #[test]
    fn seeded_rng_is_replayable() {
        let config = Config {
            rng_seed: Some(7),
            ..Config::default()
        };
        let a: u64 = config.rng().random();
        let b: u64 = config.rng().random();
        assert_eq!(a, b);
    }
}
