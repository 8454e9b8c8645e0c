//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `source.base_url`
//! - `server.host`
//!
//! ## Example
//!
//! ```toml
//! [source]
//! dir = "public"
//!
//! [docs]
//! index_path = "index.json"
//! docs_dir = "docs"
//! language = "es"
//!
//! [router]
//! variant = "embedded"
//! route_base = "/app/docs"
//! ```

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use folio_browser::{LocationScheme, Variant};
use folio_site::{Language, SiteConfig};
use folio_source::validate_path;
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override the local source directory.
    pub source_dir: Option<PathBuf>,
    /// Override the remote source base URL.
    pub base_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Default HTTP source timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source configuration (paths are relative strings from TOML).
    source: SourceConfigRaw,
    /// Documentation layout configuration.
    pub docs: DocsConfig,
    /// View router configuration.
    pub router: RouterConfig,
    /// Preview server configuration.
    pub server: ServerConfig,

    /// Resolved source configuration (set after loading).
    #[serde(skip)]
    pub source_resolved: SourceConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw source configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SourceConfigRaw {
    dir: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

/// Where documentation resources come from.
#[derive(Debug)]
pub struct SourceConfig {
    /// Local directory holding the index and documents.
    pub dir: PathBuf,
    /// Remote base URL; takes precedence over `dir` when set.
    pub base_url: Option<String>,
    /// Timeout for remote fetches.
    pub timeout: Duration,
}

impl SourceConfig {
    fn with_base(base: &Path) -> Self {
        Self {
            dir: base.join("public"),
            base_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Whether resources are fetched over HTTP.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.base_url.is_some()
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::with_base(Path::new("."))
    }
}

/// Documentation layout configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Resource path of the index JSON.
    pub index_path: String,
    /// Directory holding markup files, relative to the source.
    pub docs_dir: String,
    /// Markup file extension.
    pub extension: String,
    /// Pass raw HTML in markup through.
    pub allow_raw_html: bool,
    /// Language for user-facing messages.
    pub language: Language,
}

impl Default for DocsConfig {
    fn default() -> Self {
        let site = SiteConfig::default();
        Self {
            index_path: site.index_path,
            docs_dir: site.docs_dir,
            extension: site.extension,
            allow_raw_html: site.allow_raw_html,
            language: site.language,
        }
    }
}

/// View router configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Deployment variant.
    pub variant: Variant,
    /// Hash prefix for the standalone variant.
    pub hash_prefix: String,
    /// Route base for the embedded variant.
    pub route_base: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            hash_prefix: "docs".to_owned(),
            route_base: "/app/docs".to_owned(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`source.base_url`").
        field: String,
        /// Error message.
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(source_dir) = &settings.source_dir {
            self.source_resolved.dir.clone_from(source_dir);
            // An explicit directory wins over a configured URL.
            self.source_resolved.base_url = None;
        }
        if let Some(base_url) = &settings.base_url {
            self.source_resolved.base_url = Some(base_url.clone());
        }
    }

    /// Settings for the documentation site.
    #[must_use]
    pub fn site_config(&self) -> SiteConfig {
        SiteConfig {
            index_path: self.docs.index_path.clone(),
            docs_dir: self.docs.docs_dir.clone(),
            extension: self.docs.extension.clone(),
            allow_raw_html: self.docs.allow_raw_html,
            language: self.docs.language,
        }
    }

    /// Location scheme for the configured router variant.
    #[must_use]
    pub fn location_scheme(&self) -> LocationScheme {
        match self.router.variant {
            Variant::Standalone => LocationScheme::hash(&self.router.hash_prefix),
            Variant::Embedded => LocationScheme::route(&self.router.route_base),
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            source: SourceConfigRaw::default(),
            docs: DocsConfig::default(),
            router: RouterConfig::default(),
            server: ServerConfig::default(),
            source_resolved: SourceConfig::with_base(base),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI settings
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_source()?;
        self.validate_docs()?;
        self.validate_router()?;
        self.validate_server()?;
        Ok(())
    }

    fn validate_source(&self) -> Result<(), ConfigError> {
        if let Some(base_url) = &self.source_resolved.base_url {
            require_non_empty(base_url, "source.base_url")?;
            require_http_url(base_url, "source.base_url")?;
        }
        if self.source_resolved.timeout.is_zero() {
            return Err(ConfigError::Validation(
                "source.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_docs(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.docs.index_path, "docs.index_path")?;

        let extension = self.docs.extension.trim_start_matches('.');
        require_non_empty(extension, "docs.extension")?;
        if extension.contains(['/', '.']) {
            return Err(ConfigError::Validation(format!(
                "docs.extension must be a single suffix, got {:?}",
                self.docs.extension
            )));
        }

        require_resource_path(&self.docs.index_path, "docs.index_path")?;

        let sample = if self.docs.docs_dir.is_empty() {
            format!("page.{extension}")
        } else {
            format!("{}/page.{extension}", self.docs.docs_dir)
        };
        require_resource_path(&sample, "docs.docs_dir")?;

        Ok(())
    }

    fn validate_router(&self) -> Result<(), ConfigError> {
        match self.router.variant {
            Variant::Standalone => require_non_empty(
                self.router.hash_prefix.trim_matches(['#', '/']),
                "router.hash_prefix",
            ),
            Variant::Embedded => require_non_empty(
                self.router.route_base.trim_matches('/'),
                "router.route_base",
            ),
        }
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref url) = self.source.base_url {
            self.source.base_url = Some(expand::expand_env(url, "source.base_url")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    ///
    /// Resource paths under `[docs]` are relative to the source root, so
    /// `./` prefixes and doubled slashes are dropped here.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.docs.index_path = normalize_resource_path(&self.docs.index_path);
        self.docs.docs_dir = normalize_resource_path(&self.docs.docs_dir);
        self.source_resolved = SourceConfig {
            dir: config_dir.join(self.source.dir.as_deref().unwrap_or("public")),
            base_url: self
                .source
                .base_url
                .as_deref()
                .map(|url| url.trim_end_matches('/').to_owned()),
            timeout: Duration::from_secs(self.source.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        };
    }
}

/// Drop empty and `.` segments from a source-relative path.
fn normalize_resource_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

fn require_resource_path(path: &str, field: &str) -> Result<(), ConfigError> {
    validate_path(path).map_err(|_| {
        ConfigError::Validation(format!(
            "{field} is not a valid source-relative path: {path:?}"
        ))
    })
}
