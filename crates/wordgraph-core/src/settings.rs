//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

use crate::regexp::RegexpOptions;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Hard ceiling for `search.max_word_length` and `regexp.max_length`.
pub const MAX_WORD_LENGTH_LIMIT: usize = 64;

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub search: SearchSettings,
    pub regexp: RegexpSettings,
    pub builder: BuilderSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    pub max_word_length: usize,
    pub plus1_max_results: usize,
    pub racc_max_results: usize,
    pub benj_max_results: usize,
    pub cross_max_results: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegexpSettings {
    pub min_length: usize,
    pub max_length: usize,
    pub max_results: usize,
    #[serde(default)]
    pub user_list_1: String,
    #[serde(default)]
    pub user_list_2: String,
}

impl RegexpSettings {
    /// Search options seeded from these settings.
    pub fn options(&self) -> RegexpOptions {
        RegexpOptions {
            min_length: self.min_length,
            max_length: self.max_length,
            max_results: self.max_results,
            user_list_1: self.user_list_1.clone(),
            user_list_2: self.user_list_2.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuilderSettings {
    pub max_siblings: usize,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }
    macro_rules! check_word_length {
        ($section:ident . $field:ident) => {
            if s.$section.$field > MAX_WORD_LENGTH_LIMIT {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: format!("must be at most {MAX_WORD_LENGTH_LIMIT}"),
                });
            }
        };
    }

    check_positive_usize!(search.max_word_length);
    check_word_length!(search.max_word_length);
    check_positive_usize!(search.plus1_max_results);
    check_positive_usize!(search.racc_max_results);
    check_positive_usize!(search.benj_max_results);
    check_positive_usize!(search.cross_max_results);

    check_positive_usize!(regexp.max_length);
    check_word_length!(regexp.max_length);
    check_positive_usize!(regexp.max_results);
    if s.regexp.min_length > s.regexp.max_length {
        return Err(SettingsError::InvalidValue {
            field: "regexp.min_length".to_string(),
            reason: "must not exceed regexp.max_length".to_string(),
        });
    }

    check_positive_usize!(builder.max_siblings);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.search.max_word_length, 15);
        assert_eq!(s.search.plus1_max_results, 200);
        assert_eq!(s.search.racc_max_results, 100);
        assert_eq!(s.search.benj_max_results, 100);
        assert_eq!(s.search.cross_max_results, 200);
        assert_eq!(s.regexp.min_length, 1);
        assert_eq!(s.regexp.max_length, 15);
        assert_eq!(s.regexp.max_results, 200);
        assert!(s.regexp.user_list_1.is_empty());
        assert_eq!(s.builder.max_siblings, 2000);
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[search]
max_word_length = 8
plus1_max_results = 10
racc_max_results = 10
benj_max_results = 10
cross_max_results = 10

[regexp]
min_length = 2
max_length = 8
max_results = 50
user_list_1 = "AEIOU"

[builder]
max_siblings = 64
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.search.max_word_length, 8);
        assert_eq!(s.regexp.user_list_1, "AEIOU");
        assert_eq!(s.regexp.user_list_2, "");
        let opts = s.regexp.options();
        assert_eq!(opts.min_length, 2);
        assert_eq!(opts.max_results, 50);
        assert_eq!(s.builder.max_siblings, 64);
    }

    #[test]
    fn reject_zero_limit() {
        let toml = DEFAULT_SETTINGS_TOML.replace("cross_max_results = 200", "cross_max_results = 0");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("search.cross_max_results"));
    }

    #[test]
    fn reject_inverted_length_bounds() {
        let toml = DEFAULT_SETTINGS_TOML.replace("min_length = 1", "min_length = 20");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { ref field, .. } if field == "regexp.min_length"));
    }

    #[test]
    fn reject_oversized_word_length() {
        let toml = DEFAULT_SETTINGS_TOML.replace("max_word_length = 15", "max_word_length = 100");
        assert!(parse_settings_toml(&toml).is_err());
    }

    #[test]
    fn reject_missing_section() {
        let err = parse_settings_toml("[search]\nmax_word_length = 3\n").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
