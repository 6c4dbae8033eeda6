use serde::Deserialize;
use tracing::{event, Level};

use crate::{config::CommerceConfig, errors::UpstreamError};

#[derive(Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Client credentials grant against `{authUrl}/oauth/token`.
pub async fn fetch_access_token(http: &reqwest::Client, config: &CommerceConfig) -> Result<AccessToken, UpstreamError> {
    let mut token_url = config.auth_url.clone();
    if let Ok(mut segments) = token_url.path_segments_mut() {
        segments.pop_if_empty().push("oauth").push("token");
    }

    let mut form = vec![("grant_type", "client_credentials")];
    if let Some(scopes) = config.scopes.as_deref() {
        form.push(("scope", scopes));
    }

    let response = http
        .post(token_url)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(&form)
        .send()
        .await
        .map_err(UpstreamError::Transport)?;

    let status = response.status();
    if !status.is_success() {
        event!(Level::WARN, status = status.as_u16(), "Token request was rejected");
        return Err(UpstreamError::Auth { status: status });
    }

    let token = response.json::<AccessToken>().await.map_err(UpstreamError::Decode)?;
    event!(Level::DEBUG, expires_in = ?token.expires_in, scope = ?token.scope, "Acquired access token");

    Ok(token)
}
