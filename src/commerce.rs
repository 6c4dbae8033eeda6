use async_trait::async_trait;
use reqwest::header::ACCEPT;
use tracing::{event, Level};

use crate::{auth::fetch_access_token, config::CommerceConfig, domain::Cart, errors::UpstreamError, mutations::CartMutationRequest};

#[async_trait]
pub trait CartApi {
    async fn execute(&self, request: &CartMutationRequest) -> Result<Cart, UpstreamError>;
}

pub struct CommercetoolsCartApi {
    config: CommerceConfig,
}

impl CommercetoolsCartApi {
    pub fn new(config: CommerceConfig) -> Self {
        CommercetoolsCartApi {
            config: config
        }
    }
}

#[async_trait]
impl CartApi for CommercetoolsCartApi {
    // A fresh client and token per invocation; nothing is kept between webhook calls.
    async fn execute(&self, request: &CartMutationRequest) -> Result<Cart, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(self.config.request_timeout)
            .build()
            .map_err(UpstreamError::Transport)?;
        let token = fetch_access_token(&http, &self.config).await?;

        let endpoint = request.endpoint(&self.config.api_url, &self.config.project_key);
        event!(Level::DEBUG, kind = request.kind(), endpoint = %endpoint, "Sending cart mutation");

        let response = http
            .post(endpoint)
            .bearer_auth(&token.access_token)
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            event!(Level::WARN, kind = request.kind(), status = status.as_u16(), "Cart mutation was rejected");
            event!(Level::DEBUG, kind = request.kind(), status = status.as_u16(), body = %body, "Rejected cart mutation body");
            return Err(UpstreamError::Rejected { status: status, body: body });
        }

        response.json::<Cart>().await.map_err(UpstreamError::Decode)
    }
}
