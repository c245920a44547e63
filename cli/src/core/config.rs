//! # CyberChat Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module loads, merges and validates CyberChat's configuration. The most
//! important setting is the trigger table: a configured list of triggers
//! replaces the built-in cybersecurity table entirely, so the order written in
//! the file is exactly the order the responder checks.
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit file given with `--config` or `CYBERCHAT_CONFIG` (only that file is read)
//! 2. Project-specific `.cyberchat.toml` in the current directory or ancestors
//! 3. User-specific `config.toml` in the platform config directory
//! 4. Default values defined in the code
//!
//! ## Examples
//!
//! ```toml
//! [responder]
//! default_response = "Sorry, I can only talk about security."
//!
//! [[responder.triggers]]
//! keyword = "phishing"
//! response = "Never click links in unexpected emails."
//!
//! [chat]
//! bot_name = "Sentinel"
//! reply_delay_ms = 400
//!
//! [server]
//! port = 9000
//! directory = "~/sites/cyber-demo"
//!
//! [client]
//! base_url = "http://127.0.0.1:9000"
//! timeout_secs = 5
//! ```
//!
//! ```rust
//! let cfg = config::load_config(None)?;
//! let table = cfg.trigger_table()?;
//! let delay = cfg.chat.reply_delay();
//! ```
//!
use crate::core::error::{CyberchatError, Result};
use crate::core::responder::{Trigger, TriggerTable};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub responder: ResponderConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub server: ServerDefaults,
    #[serde(default)]
    pub client: ClientConfig,
}

/// Trigger table settings.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ResponderConfig {
    /// Reply used when no keyword matches. Falls back to the built-in default.
    pub default_response: Option<String>,
    /// Ordered triggers. When non-empty, replaces the built-in list.
    #[serde(default)]
    pub triggers: Vec<Trigger>,
}

/// Settings for the interactive `cyberchat chat` session.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Name shown in front of replies.
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
    /// Artificial "thinking" pause before each reply is shown, in milliseconds.
    #[serde(default)]
    pub reply_delay_ms: u64,
}

/// Defaults for `cyberchat srv`; command-line flags override them.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerDefaults {
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_server_host")]
    pub host: IpAddr,
    #[serde(default = "default_true")]
    pub enable_cors: bool,
    /// Static site directory (can use ~). Will be expanded.
    pub directory: Option<String>,
}

/// Settings for talking to a remote `cyberchat srv` instance.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL used when `--server` is given without a value in config-driven flows.
    pub base_url: Option<String>,
    #[serde(default = "default_client_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            bot_name: default_bot_name(),
            reply_delay_ms: 0,
        }
    }
}

impl Default for ServerDefaults {
    fn default() -> Self {
        Self {
            port: default_server_port(),
            host: default_server_host(),
            enable_cors: true,
            directory: None,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_client_timeout_secs(),
        }
    }
}

impl ChatConfig {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// # Build Trigger Table (`trigger_table`)
    ///
    /// Produces the effective, validated trigger table:
    /// - configured triggers, if any, replace the built-in list;
    /// - a configured default response replaces the built-in default.
    pub fn trigger_table(&self) -> Result<TriggerTable> {
        let builtin = TriggerTable::builtin();
        let default_response = self
            .responder
            .default_response
            .clone()
            .unwrap_or_else(|| builtin.default_response().to_string());

        let triggers = if self.responder.triggers.is_empty() {
            builtin.triggers().to_vec()
        } else {
            self.responder.triggers.clone()
        };

        TriggerTable::new(triggers, default_response)
            .context("Invalid [responder] configuration")
    }
}

fn default_bot_name() -> String {
    "Sentinel".to_string()
}
fn default_server_port() -> u16 {
    8000
}
fn default_server_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}
fn default_true() -> bool {
    true
}
fn default_client_timeout_secs() -> u64 {
    10
}

const PROJECT_CONFIG_FILENAME: &str = ".cyberchat.toml";

/// # Load Configuration (`load_config`)
///
/// Loads the effective configuration. With an explicit path only that file is
/// read (and it must exist); otherwise user and project files are merged, the
/// project file winning field by field.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(anyhow!(CyberchatError::FileSystem(format!(
                    "Configuration file '{}' does not exist or is not a file.",
                    path.display()
                ))));
            }
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config, project_config)?
        }
    };
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<toml::Table>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "CyberChat", "cyberchat") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_table_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<toml::Table>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_table_from_path(&project_config_path).map(Some)
    } else {
        debug!(
            "No project configuration file ({}) found in current directory or ancestors.",
            PROJECT_CONFIG_FILENAME
        );
        Ok(None)
    }
}

/// Walks from `start` towards the filesystem root looking for
/// `.cyberchat.toml`. The search stops at the first directory holding `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Reads a config file as a raw TOML table, checking that it also
/// deserializes into `Config` so errors point at the offending file.
fn load_table_from_path(path: &Path) -> Result<toml::Table> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    let table: toml::Table = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))?;
    toml::Value::Table(table.clone())
        .try_into::<Config>()
        .with_context(|| format!("Invalid configuration in file: {}", path.display()))?;
    Ok(table)
}

/// Overlays the project table on the user table key by key, then applies
/// defaults to whatever neither file set. Arrays such as
/// `[[responder.triggers]]` are replaced whole, never concatenated.
fn merge_configs(user: Option<toml::Table>, project: Option<toml::Table>) -> Result<Config> {
    let mut merged = user.unwrap_or_default();
    if let Some(project) = project {
        overlay_table(&mut merged, project);
    }
    toml::Value::Table(merged)
        .try_into::<Config>()
        .context("Failed to combine user and project configuration")
}

fn overlay_table(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(section) => {
                if let Some(toml::Value::Table(base_section)) = base.get_mut(&key) {
                    overlay_table(base_section, section);
                    continue;
                }
                base.insert(key, toml::Value::Table(section));
            }
            value => {
                base.insert(key, value);
            }
        }
    }
}

fn expand_config_paths(config: &mut Config) {
    if let Some(directory) = config.server.directory.as_mut() {
        *directory = shellexpand::tilde(directory.as_str()).into_owned();
        debug!("Expanded server directory: {}", directory);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");

    let table = config.trigger_table()?;
    for shadowed in table.shadowed() {
        let hidden = &table.triggers()[shadowed.index];
        let winner = &table.triggers()[shadowed.shadowed_by];
        warn!(
            "Trigger #{} ('{}') can never match: earlier trigger #{} ('{}') always wins.",
            shadowed.index + 1,
            hidden.keyword,
            shadowed.shadowed_by + 1,
            winner.keyword
        );
    }

    if config.chat.bot_name.trim().is_empty() {
        return Err(anyhow!(CyberchatError::Config(
            "[chat] bot_name cannot be empty.".to_string()
        )));
    }

    if let Some(directory) = &config.server.directory {
        let dir = PathBuf::from(directory);
        if !dir.exists() {
            warn!(
                "Configured site directory '{}' does not exist.",
                dir.display()
            );
        } else if !dir.is_dir() {
            return Err(anyhow!(CyberchatError::Config(format!(
                "Configured site path '{}' exists but is not a directory.",
                dir.display()
            ))));
        }
    }

    if config.client.timeout_secs == 0 {
        return Err(anyhow!(CyberchatError::Config(
            "[client] timeout_secs must be greater than zero.".to_string()
        )));
    }
    if let Some(url) = &config.client.base_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow!(CyberchatError::Config(format!(
                "Invalid [client] base_url '{}'. Expected an http:// or https:// URL.",
                url
            ))));
        }
    }

    debug!("Configuration validation successful.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [responder]
            default_response = "Ask me about security."

            [[responder.triggers]]
            keyword = "hello"
            response = "A"

            [[responder.triggers]]
            keyword = "help"
            response = "B"

            [chat]
            reply_delay_ms = 250

            [server]
            port = 9000
            host = "0.0.0.0"
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(
            config.responder.default_response.as_deref(),
            Some("Ask me about security.")
        );
        assert_eq!(
            config.responder.triggers,
            vec![Trigger::new("hello", "A"), Trigger::new("help", "B")]
        );
        assert_eq!(config.chat.bot_name, "Sentinel"); // Default
        assert_eq!(config.chat.reply_delay(), Duration::from_millis(250));
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert!(config.server.enable_cors); // Default
        assert_eq!(config.client.timeout_secs, 10); // Default
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let result: std::result::Result<Config, _> = toml::from_str(
            r#"
            [responder]
            fallback = "oops"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_config_uses_builtin_table() {
        let table = Config::default().trigger_table().unwrap();
        assert_eq!(table, TriggerTable::builtin());
    }

    #[test]
    fn test_configured_triggers_replace_builtin() {
        let mut config = Config::default();
        config.responder.triggers = vec![Trigger::new("vpn", "Tunnel")];
        let table = config.trigger_table().unwrap();

        assert_eq!(table.triggers(), &[Trigger::new("vpn", "Tunnel")]);
        assert_eq!(
            table.default_response(),
            TriggerTable::builtin().default_response()
        );
    }

    #[test]
    fn test_configured_default_keeps_builtin_triggers() {
        let mut config = Config::default();
        config.responder.default_response = Some("Nope.".into());
        let table = config.trigger_table().unwrap();

        assert_eq!(table.triggers(), TriggerTable::builtin().triggers());
        assert_eq!(table.default_response(), "Nope.");
    }

    fn table(content: &str) -> toml::Table {
        toml::from_str(content).expect("Failed to parse TOML")
    }

    #[test]
    fn test_merge_project_overrides_user() {
        let user = table(
            r#"
            [[responder.triggers]]
            keyword = "user"
            response = "from user"

            [chat]
            bot_name = "UserBot"

            [client]
            timeout_secs = 30
            "#,
        );
        let project = table(
            r#"
            [[responder.triggers]]
            keyword = "project"
            response = "from project"

            [server]
            port = 9100
            "#,
        );

        let merged = merge_configs(Some(user), Some(project)).unwrap();
        assert_eq!(
            merged.responder.triggers,
            vec![Trigger::new("project", "from project")]
        );
        assert_eq!(merged.chat.bot_name, "UserBot"); // Project left it unset
        assert_eq!(merged.server.port, 9100);
        assert_eq!(merged.client.timeout_secs, 30);
    }

    #[test]
    fn test_merge_project_values_equal_to_defaults_still_win() {
        let user = table(
            r#"
            [chat]
            bot_name = "UserBot"
            reply_delay_ms = 400

            [server]
            port = 9000
            enable_cors = false

            [client]
            timeout_secs = 30
            "#,
        );
        let project = table(
            r#"
            [chat]
            bot_name = "Sentinel"
            reply_delay_ms = 0

            [server]
            port = 8000
            enable_cors = true

            [client]
            timeout_secs = 10
            "#,
        );

        let merged = merge_configs(Some(user), Some(project)).unwrap();
        assert!(merged.server.enable_cors);
        assert_eq!(merged.server.port, 8000);
        assert_eq!(merged.chat.reply_delay_ms, 0);
        assert_eq!(merged.chat.bot_name, "Sentinel");
        assert_eq!(merged.client.timeout_secs, 10);
    }

    #[test]
    fn test_merge_keeps_user_triggers_when_project_has_none() {
        let user = table(
            r#"
            [[responder.triggers]]
            keyword = "vpn"
            response = "Tunnel"
            "#,
        );
        let project = table(
            r#"
            [responder]
            default_response = "Project default"
            "#,
        );

        let merged = merge_configs(Some(user), Some(project)).unwrap();
        assert_eq!(merged.responder.triggers, vec![Trigger::new("vpn", "Tunnel")]);
        assert_eq!(
            merged.responder.default_response.as_deref(),
            Some("Project default")
        );
    }

    #[test]
    fn test_merge_without_files_uses_defaults() {
        let merged = merge_configs(None, None).unwrap();
        assert_eq!(merged, Config::default());
    }

    #[test]
    fn test_merge_without_project_returns_user() {
        let user = table("[chat]\nreply_delay_ms = 99\n");
        let merged = merge_configs(Some(user), None).unwrap();
        assert_eq!(merged.chat.reply_delay_ms, 99);
        assert_eq!(merged.server, ServerDefaults::default());
    }

    #[test]
    fn test_load_table_rejects_unknown_fields() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join(PROJECT_CONFIG_FILENAME);
        fs::write(&path, "[server]\nprot = 9000\n").unwrap();
        let err = load_table_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration in file"));
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config::default();
        config.server.directory = Some("~/site".into());
        expand_config_paths(&mut config);

        let home_dir = dirs::home_dir().unwrap();
        assert_eq!(
            config.server.directory.as_deref(),
            Some(home_dir.join("site").to_string_lossy().as_ref())
        );
    }

    #[test]
    fn test_validate_config_valid() {
        let temp_dir = tempdir().unwrap();
        let mut config = Config::default();
        config.server.directory = Some(temp_dir.path().to_string_lossy().to_string());
        config.client.base_url = Some("http://127.0.0.1:8000".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_invalid_trigger() {
        let mut config = Config::default();
        config.responder.triggers = vec![Trigger::new("Phishing", "x")];
        let err = validate_config(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("must be lowercase"));
    }

    #[test]
    fn test_validate_config_site_path_is_file() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("not_a_dir");
        fs::write(&file_path, "").unwrap();

        let mut config = Config::default();
        config.server.directory = Some(file_path.to_string_lossy().to_string());
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
    }

    #[test]
    fn test_validate_config_client_settings() {
        let mut config = Config::default();
        config.client.timeout_secs = 0;
        assert!(validate_config(&config)
            .unwrap_err()
            .to_string()
            .contains("timeout_secs"));

        let mut config = Config::default();
        config.client.base_url = Some("ftp://example.com".into());
        assert!(validate_config(&config)
            .unwrap_err()
            .to_string()
            .contains("Invalid [client] base_url"));
    }

    #[test]
    fn test_load_config_explicit_path() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("custom.toml");
        fs::write(
            &path,
            r#"
            [[responder.triggers]]
            keyword = "scan"
            response = "Scanning..."
            "#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        let table = config.trigger_table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.triggers()[0].keyword, "scan");
    }

    #[test]
    fn test_load_config_explicit_path_missing() {
        let temp_dir = tempdir().unwrap();
        let err = load_config(Some(&temp_dir.path().join("missing.toml"))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_load_config_explicit_path_bad_toml() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("broken.toml");
        fs::write(&path, "[responder\n").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }

    #[test]
    fn test_find_project_config_in_ancestor() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(temp_dir.path().join(".git")).unwrap();
        fs::write(temp_dir.path().join("a").join(PROJECT_CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            find_project_config_path(&nested),
            Some(temp_dir.path().join("a").join(PROJECT_CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_find_project_config_stops_at_git_root() {
        let temp_dir = tempdir().unwrap();
        let repo = temp_dir.path().join("repo");
        let nested = repo.join("src");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(repo.join(".git")).unwrap();
        // Above the repository root, so it must not be found.
        fs::write(temp_dir.path().join(PROJECT_CONFIG_FILENAME), "").unwrap();

        assert_eq!(find_project_config_path(&nested), None);
    }
}
