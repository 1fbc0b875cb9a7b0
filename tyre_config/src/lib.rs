use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{File, FileFormat};
use serde::Deserialize;
use tyre_models::email_address::EmailAddress;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of config files, later files take precedence.
pub const CONFIG_PATH_ENV: &str = "TYRE_CONFIG";

/// Environment variables that override individual config keys.
///
/// Empty values are ignored.
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("PORT", "http.port"),
    ("STATIC_DIR", "http.static_dir"),
    ("DATABASE_URL", "database.url"),
    ("SMTP_HOST", "smtp.host"),
    ("SMTP_PORT", "smtp.port"),
    ("SMTP_SECURE", "smtp.secure"),
    ("SMTP_USER", "smtp.username"),
    ("SMTP_PASS", "smtp.password"),
    ("CONTACT_TO_EMAIL", "contact.recipient"),
    ("MAIL_FROM", "contact.from"),
];

/// Returns the config files named in [`CONFIG_PATH_ENV`] or the default
/// config file.
pub fn config_paths() -> Vec<PathBuf> {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(paths) if !paths.is_empty() => std::env::split_paths(&paths).collect(),
        _ => vec![DEFAULT_CONFIG_PATH.into()],
    }
}

/// Loads the config files and applies the [`ENV_OVERRIDES`] from the process
/// environment.
pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    load_with_env(paths, |var| std::env::var(var).ok())
}

pub fn load_with_env(
    paths: &[impl AsRef<Path>],
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    ENV_OVERRIDES
        .iter()
        .filter_map(|&(var, key)| Some((var, key, env(var).filter(|x| !x.is_empty())?)))
        .try_fold(builder, |builder, (var, key, value)| {
            match key {
                // only the literal "true" enables implicit tls
                "smtp.secure" => builder.set_override(key, value == "true"),
                // an unparsable port leaves smtp unconfigured
                "smtp.port" => {
                    builder.set_override(key, i64::from(value.parse::<u16>().unwrap_or(0)))
                }
                _ => builder.set_override(key, value),
            }
            .with_context(|| format!("Failed to apply {var}"))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub smtp: SmtpConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    pub static_dir: PathBuf,
    /// Maximum request body size in bytes.
    pub body_limit: usize,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub busy_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

#[derive(Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Implicit tls if `true`, otherwise opportunistic `STARTTLS`.
    pub secure: bool,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let password = if self.password.is_empty() { "" } else { "[redacted]" };
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("username", &self.username)
            .field("password", &password)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SmtpConfig {
    /// Whether enough settings are present to open an authenticated smtp
    /// connection.
    pub fn is_complete(&self) -> bool {
        !self.host.is_empty()
            && self.port != 0
            && !self.username.is_empty()
            && !self.password.is_empty()
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Recipient of notification emails, may be empty.
    pub recipient: String,
    pub from: EmailAddress,
    pub notification_timeout: Duration,
}

impl ContactConfig {
    /// Returns `None` if no recipient is configured.
    pub fn recipient(&self) -> anyhow::Result<Option<EmailAddress>> {
        let recipient = self.recipient.trim();
        if recipient.is_empty() {
            return Ok(None);
        }
        recipient
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid contact recipient {recipient:?}"))
    }
}
