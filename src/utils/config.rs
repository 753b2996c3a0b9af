use dotenvy::{dotenv, from_filename};
use secrecy::{ExposeSecret, Secret};
use sqlx::mysql::MySqlConnectOptions;
use std::{io, path::Path, str::FromStr};

use super::constants::{env, APP_PROFILE};
use crate::domain::{ConfigError, SchemaMode};

/// Connection parameters for the member database.
///
/// `username` and `password`, when present, override any user info embedded
/// in `url`.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: Secret<String>,
    pub username: Option<String>,
    pub password: Option<Secret<String>>,
    pub schema_mode: SchemaMode,
}

impl DatabaseSettings {
    pub fn new(
        url: Secret<String>,
        username: Option<String>,
        password: Option<Secret<String>>,
        schema_mode: SchemaMode,
    ) -> Self {
        Self {
            url,
            username,
            password,
            schema_mode,
        }
    }

    /// Settings for a server discovered at runtime, e.g. a freshly started
    /// container whose port is only known once it is listening.
    pub fn for_endpoint(
        host: &str,
        port: u16,
        database: &str,
        username: &str,
        password: Secret<String>,
        schema_mode: SchemaMode,
    ) -> Self {
        Self::new(
            Secret::new(format!("mysql://{host}:{port}/{database}")),
            Some(username.to_owned()),
            Some(password),
            schema_mode,
        )
    }

    /// Loads `.env.<APP_PROFILE>` (when a profile is active), then `.env`,
    /// then reads the process environment.
    #[tracing::instrument(name = "Loading database settings", skip_all)]
    pub fn load() -> Result<Self, ConfigError> {
        match APP_PROFILE.as_deref() {
            Some(profile) => Self::for_profile(profile),
            None => Self::from_env(),
        }
    }

    pub fn for_profile(profile: &str) -> Result<Self, ConfigError> {
        load_profile_file(format!(".env.{profile}"))?;
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(env::DATABASE_URL_ENV_VAR)
            .ok_or(ConfigError::MissingVariable(env::DATABASE_URL_ENV_VAR))?;
        let url = url.trim();
        if url.is_empty() {
            return Err(ConfigError::EmptyVariable(env::DATABASE_URL_ENV_VAR));
        }
        let url = url.strip_prefix("jdbc:").unwrap_or(url).to_owned();

        let username = lookup(env::DATABASE_USERNAME_ENV_VAR)
            .filter(|username| !username.is_empty());
        let password = lookup(env::DATABASE_PASSWORD_ENV_VAR)
            .filter(|password| !password.is_empty())
            .map(Secret::new);

        let schema_mode = match lookup(env::DATABASE_SCHEMA_MODE_ENV_VAR) {
            Some(mode) if !mode.trim().is_empty() => mode.parse()?,
            _ => SchemaMode::default(),
        };

        Ok(Self::new(Secret::new(url), username, password, schema_mode))
    }

    pub fn connect_options(
        &self,
    ) -> Result<MySqlConnectOptions, ConfigError> {
        let mut options =
            MySqlConnectOptions::from_str(self.url.expose_secret())
                .map_err(ConfigError::InvalidUrl)?;
        if let Some(username) = &self.username {
            options = options.username(username);
        }
        if let Some(password) = &self.password {
            options = options.password(password.expose_secret());
        }
        Ok(options)
    }
}

/// A missing profile file is fine; one that exists but cannot be read or
/// parsed is not.
fn load_profile_file<P: AsRef<Path>>(path: P) -> Result<(), ConfigError> {
    let path = path.as_ref();
    match from_filename(path) {
        Ok(_) => Ok(()),
        Err(dotenvy::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No .env file for profile");
            Ok(())
        }
        Err(e) => Err(ConfigError::InvalidProfileFile(
            path.display().to_string(),
            e,
        )),
    }
}
