use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::prompt::ExamTrack;

/// Trait for clients that read their API key from the environment
pub trait KeyFromEnv {
    /// The environment variable name for this client's API key
    const KEY_NAME: &'static str;

    /// Alternate variable names accepted when `KEY_NAME` is unset
    const KEY_ALIASES: &'static [&'static str] = &[];

    /// Find the API key by checking environment variables, after loading .env
    fn find_key() -> Option<String> {
        // Missing .env is fine
        let _ = dotenvy::dotenv();

        std::iter::once(Self::KEY_NAME)
            .chain(Self::KEY_ALIASES.iter().copied())
            .filter_map(|name| env::var(name).ok())
            .find(|value| !value.trim().is_empty())
    }

    /// Whether a key is available without reading it
    fn has_key() -> bool {
        Self::find_key().is_some()
    }
}

/// Process-level settings, read once at start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizConfig {
    pub primary_model: String,
    /// `None` disables the fallback attempt
    pub fallback_model: Option<String>,
    pub deepseek_model: String,
    pub temperature: f32,
    pub timeout: Duration,
    pub exam_track: ExamTrack,
    pub transcript_dir: Option<PathBuf>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            primary_model: "llama3-70b-8192".to_string(),
            fallback_model: Some("llama3-8b-8192".to_string()),
            deepseek_model: "deepseek-chat".to_string(),
            temperature: 0.9,
            timeout: Duration::from_secs(60),
            exam_track: ExamTrack::default(),
            transcript_dir: None,
        }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    lookup(name).and_then(|v| v.trim().parse().ok())
}

impl QuizConfig {
    /// Read overrides from the environment; unparseable values keep their defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty()).map(|v| v.trim().to_string());

        Self {
            primary_model: non_blank("QUIZ_PRIMARY_MODEL").unwrap_or(default.primary_model),
            fallback_model: match lookup("QUIZ_FALLBACK_MODEL") {
                Some(v) if v.trim().is_empty() => None,
                Some(v) => Some(v.trim().to_string()),
                None => default.fallback_model,
            },
            deepseek_model: non_blank("QUIZ_DEEPSEEK_MODEL").unwrap_or(default.deepseek_model),
            temperature: parsed(&lookup, "QUIZ_TEMPERATURE").unwrap_or(default.temperature),
            timeout: parsed(&lookup, "QUIZ_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(default.timeout),
            exam_track: parsed(&lookup, "QUIZ_EXAM_TRACK").unwrap_or(default.exam_track),
            transcript_dir: non_blank("QUIZ_TRANSCRIPT_DIR").map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct AliasedKey;

    impl KeyFromEnv for AliasedKey {
        const KEY_NAME: &'static str = "EXAM_QUIZ_TEST_PRIMARY_KEY";
        const KEY_ALIASES: &'static [&'static str] = &["EXAM_QUIZ_TEST_ALIAS_KEY"];
    }

    struct BlankKey;

    impl KeyFromEnv for BlankKey {
        const KEY_NAME: &'static str = "EXAM_QUIZ_TEST_BLANK_KEY";
    }

    fn config_from(vars: &[(&str, &str)]) -> QuizConfig {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        QuizConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn alias_is_used_when_the_primary_name_is_unset() {
        env::remove_var(AliasedKey::KEY_NAME);
        env::set_var("EXAM_QUIZ_TEST_ALIAS_KEY", "alias-secret");
        assert_eq!(AliasedKey::find_key().as_deref(), Some("alias-secret"));

        env::set_var(AliasedKey::KEY_NAME, "primary-secret");
        assert_eq!(AliasedKey::find_key().as_deref(), Some("primary-secret"));
    }

    #[test]
    fn blank_key_counts_as_absent() {
        env::set_var(BlankKey::KEY_NAME, "   ");
        assert!(!BlankKey::has_key());
        assert_eq!(BlankKey::find_key(), None);
    }

    #[test]
    fn defaults_apply_without_overrides() {
        assert_eq!(config_from(&[]), QuizConfig::default());
    }

    #[test]
    fn empty_fallback_model_disables_the_fallback() {
        assert_eq!(config_from(&[("QUIZ_FALLBACK_MODEL", "")]).fallback_model, None);
        assert_eq!(
            config_from(&[("QUIZ_FALLBACK_MODEL", " gemma-7b-it ")]).fallback_model.as_deref(),
            Some("gemma-7b-it")
        );
    }

    #[test]
    fn unparseable_numbers_keep_their_defaults() {
        let config = config_from(&[("QUIZ_TEMPERATURE", "warm"), ("QUIZ_TIMEOUT_SECS", "-5")]);
        assert_eq!(config.temperature, 0.9);
        assert_eq!(config.timeout, Duration::from_secs(60));

        let config = config_from(&[("QUIZ_TEMPERATURE", "0.4"), ("QUIZ_TIMEOUT_SECS", " 15 ")]);
        assert_eq!(config.temperature, 0.4);
        assert_eq!(config.timeout, Duration::from_secs(15));
    }

    #[test]
    fn blank_model_and_track_fall_back() {
        let config = config_from(&[("QUIZ_PRIMARY_MODEL", "  "), ("QUIZ_EXAM_TRACK", "nonsense")]);
        assert_eq!(config.primary_model, "llama3-70b-8192");
        assert_eq!(config.exam_track, ExamTrack::default());
    }
}
