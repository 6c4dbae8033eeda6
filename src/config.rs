use std::{env, time::Duration};

use reqwest::Url;

use crate::errors::ConfigurationError;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct CommerceConfig {
    pub project_key: String,
    pub client_id: String,
    pub client_secret: String,
    pub api_url: Url,
    pub auth_url: Url,
    pub scopes: Option<String>,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub commerce: CommerceConfig,
    pub port: u16,
    pub log_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &'static str| optional(key).ok_or(ConfigurationError::Missing(key));

        let commerce = CommerceConfig {
            project_key: required("projectKey")?,
            client_id: required("clientId")?,
            client_secret: required("clientSecret")?,
            api_url: parse_url("apiUrl", &required("apiUrl")?)?,
            auth_url: parse_url("authUrl", &required("authUrl")?)?,
            scopes: optional("scopes"),
            request_timeout: match optional("REQUEST_TIMEOUT_SECS") {
                Some(raw) => match raw.parse::<u64>() {
                    Ok(secs) if secs > 0 => Duration::from_secs(secs),
                    Ok(_) => {
                        return Err(ConfigurationError::Invalid {
                            key: "REQUEST_TIMEOUT_SECS",
                            reason: String::from("must be greater than zero"),
                        })
                    }
                    Err(e) => {
                        return Err(ConfigurationError::Invalid {
                            key: "REQUEST_TIMEOUT_SECS",
                            reason: e.to_string(),
                        })
                    }
                },
                None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            },
        };

        let port = match optional("AXUM_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigurationError::Invalid {
                key: "AXUM_PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            commerce: commerce,
            port: port,
            log_path: optional("LOG_PATH"),
        })
    }
}

fn parse_url(key: &'static str, raw: &str) -> Result<Url, ConfigurationError> {
    let url = Url::parse(raw).map_err(|e| ConfigurationError::Invalid {
        key: key,
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigurationError::Invalid {
            key: key,
            reason: format!("{} is not an http(s) base url", raw),
        });
    }

    Ok(url)
}
