//! File-backed defaults for a digest run.
//!
//! The config file is line-oriented `key = value` text. Blank lines and lines
//! starting with `#` are ignored; an empty value leaves its key unset. List
//! values (`category`, `title`, `author`, `abstract`) are whitespace-separated.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// Parsed configuration file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Recipient of the update mail.
    pub email: Option<String>,
    /// Categories to search in.
    pub category: Option<Vec<String>>,
    /// Keywords to search for in titles.
    pub title: Option<Vec<String>>,
    /// Author ids to search for.
    pub author: Option<Vec<String>>,
    /// Keywords to search for in abstracts.
    pub abstract_terms: Option<Vec<String>>,
    /// Whether to skip sending mails with no new entries.
    pub suppress: Option<bool>,
    /// How many days to go back.
    pub last_n_days: Option<u32>,
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
    /// Indicates whether configuration was loaded from disk.
    pub loaded_from_file: bool,
}

/// Resolves the default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/arxiv-digest/config`
/// 2. `$HOME/.config/arxiv-digest/config`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("arxiv-digest")
                .join("config"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("arxiv-digest")
            .join("config"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads the config from the default path if one exists there.
///
/// # Errors
///
/// Fails only when a file is present but unreadable or invalid; a missing
/// file simply yields no config.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let Some(path_ref) = path.as_deref() else {
        return Ok(LoadedConfig {
            path,
            config: None,
            loaded_from_file: false,
        });
    };

    if !path_ref.exists() {
        return Ok(LoadedConfig {
            path,
            config: None,
            loaded_from_file: false,
        });
    }

    let config = load_file_config(path_ref)?;
    Ok(LoadedConfig {
        path,
        config: Some(config),
        loaded_from_file: true,
    })
}

/// Loads and validates the config file at an explicit path.
///
/// # Errors
///
/// Fails when the file cannot be read or contains invalid syntax, unknown
/// keys, or malformed values.
pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!(
                "Invalid config syntax on line {}: expected key = value",
                line_index + 1
            );
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        if value.is_empty() {
            // An empty value leaves the key unset.
            continue;
        }

        match key {
            "email" => cfg.email = Some(value.to_string()),
            "category" => cfg.category = Some(split_list(value)),
            "title" => cfg.title = Some(split_list(value)),
            "author" => cfg.author = Some(split_list(value)),
            "abstract" => cfg.abstract_terms = Some(split_list(value)),
            "suppress" => {
                let parsed = parse_boolean(value).with_context(|| {
                    format!("Invalid `suppress` value on line {}", line_index + 1)
                })?;
                cfg.suppress = Some(parsed);
            }
            "lastNDays" => {
                let parsed = value.parse::<u32>().with_context(|| {
                    format!("Invalid `lastNDays` value on line {}", line_index + 1)
                })?;
                cfg.last_n_days = Some(parsed);
            }
            unknown => {
                bail!(
                    "Unknown configuration key: '{}' on line {}",
                    unknown,
                    line_index + 1
                );
            }
        }
    }
    Ok(cfg)
}

fn split_list(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}

fn parse_boolean(raw_value: &str) -> Result<bool> {
    if raw_value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw_value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        bail!("Expected 'true' or 'false'")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_all_keys() {
        let cfg = parse_config_str(
            r"
# email the results should be send to
email     = someone@example.org

# category in which should be searched (space separated list)
category  = cond-mat cond-mat.soft

# keywords in the title (space separated list)
title     = Awesome

# authors that should be searched (space separated list)
author    = Testfrau_T Muster_M

# keywords in abstract that should be searched (space separated list)
abstract  = active matter

# whether to suppress empty emails or not (True/False)
suppress  = True

# the amount of days the you want your results to go back
lastNDays = 7
",
        )
        .expect("full config should parse");
        assert_eq!(cfg.email.as_deref(), Some("someone@example.org"));
        assert_eq!(
            cfg.category,
            Some(vec!["cond-mat".to_string(), "cond-mat.soft".to_string()])
        );
        assert_eq!(cfg.title, Some(vec!["Awesome".to_string()]));
        assert_eq!(
            cfg.author,
            Some(vec!["Testfrau_T".to_string(), "Muster_M".to_string()])
        );
        assert_eq!(
            cfg.abstract_terms,
            Some(vec!["active".to_string(), "matter".to_string()])
        );
        assert_eq!(cfg.suppress, Some(true));
        assert_eq!(cfg.last_n_days, Some(7));
    }

    #[test]
    fn test_parse_config_partial_fields() {
        let cfg = parse_config_str("email = someone@example.org\n")
            .expect("partial config should parse");
        assert_eq!(cfg.email.as_deref(), Some("someone@example.org"));
        assert!(cfg.category.is_none());
        assert!(cfg.suppress.is_none());
        assert!(cfg.last_n_days.is_none());
    }

    #[test]
    fn test_parse_config_empty_value_leaves_key_unset() {
        let cfg = parse_config_str("email =\ntitle =   \n").expect("empty values should parse");
        assert!(cfg.email.is_none());
        assert!(cfg.title.is_none());
    }

    #[test]
    fn test_parse_config_ignores_comments_and_blank_lines() {
        let cfg = parse_config_str("\n# a comment\n\nsuppress = false\n")
            .expect("commented config should parse");
        assert_eq!(cfg.suppress, Some(false));
    }

    #[test]
    fn test_parse_config_boolean_is_case_insensitive() {
        assert_eq!(
            parse_config_str("suppress = True").unwrap().suppress,
            Some(true)
        );
        assert_eq!(
            parse_config_str("suppress = FALSE").unwrap().suppress,
            Some(false)
        );
    }

    #[test]
    fn test_parse_config_rejects_invalid_boolean() {
        let err = parse_config_str("suppress = yes").expect_err("invalid boolean expected");
        assert!(err.to_string().contains("suppress"));
    }

    #[test]
    fn test_parse_config_rejects_invalid_last_n_days() {
        let err = parse_config_str("lastNDays = soon").expect_err("invalid integer expected");
        assert!(err.to_string().contains("lastNDays"));
    }

    #[test]
    fn test_parse_config_rejects_negative_last_n_days() {
        let err = parse_config_str("lastNDays = -2").expect_err("negative integer expected");
        assert!(err.to_string().contains("lastNDays"));
    }

    #[test]
    fn test_parse_config_rejects_unknown_keys() {
        let err = parse_config_str("unknown_key = 123").expect_err("unknown key error expected");
        assert!(err.to_string().contains("Unknown configuration key"));
        assert!(err.to_string().contains("unknown_key"));
    }

    #[test]
    fn test_parse_config_rejects_line_without_assignment() {
        let err = parse_config_str("just some words").expect_err("syntax error expected");
        assert!(err.to_string().contains("expected key = value"));
    }

    #[test]
    fn test_load_file_config_missing_file_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let result = load_file_config(&temp.path().join("config"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_file_config_reads_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config");
        fs::write(&path, "email = someone@example.org\n").unwrap();
        let cfg = load_file_config(&path).unwrap();
        assert_eq!(cfg.email.as_deref(), Some("someone@example.org"));
    }
}
