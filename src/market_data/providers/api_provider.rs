use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::holdings::{AssetClass, Holding};
use crate::market_data::market_data_errors::MarketDataError;
use crate::market_data::market_data_model::{PriceQuote, QuoteSummary};
use crate::market_data::market_data_traits::RemoteApiTrait;

/// Backend API client: JSON endpoints behind bearer authentication.
pub struct ApiProvider {
    client: Client,
    base_url: String,
    token: String,
}

#[derive(Deserialize)]
struct CreatedPortfolio {
    id: String,
}

impl ApiProvider {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        ApiProvider {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn check_status(&self, response: Response) -> Result<Response, MarketDataError> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(MarketDataError::Unauthorized(
                "API key rejected".to_string(),
            )),
            StatusCode::NOT_FOUND => {
                Err(MarketDataError::NotFound(response.url().path().to_string()))
            }
            StatusCode::TOO_MANY_REQUESTS => Err(MarketDataError::RateLimitExceeded),
            status => Err(MarketDataError::ProviderError(format!(
                "Unexpected status {} from {}",
                status,
                response.url()
            ))),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, MarketDataError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await?;
        let response = self.check_status(response)?;
        response
            .json::<T>()
            .await
            .map_err(|e| MarketDataError::ParsingError(e.to_string()))
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<T, MarketDataError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await?;
        let response = self.check_status(response)?;
        response
            .json::<T>()
            .await
            .map_err(|e| MarketDataError::ParsingError(e.to_string()))
    }
}

#[async_trait::async_trait]
impl RemoteApiTrait for ApiProvider {
    async fn create_portfolio(&self, name: &str) -> Result<String, MarketDataError> {
        let url = format!("{}/portfolios", self.base_url);
        let created: CreatedPortfolio = self.post_json(&url, &json!({ "name": name })).await?;
        Ok(created.id)
    }

    async fn push_holding(
        &self,
        portfolio_id: &str,
        holding: &Holding,
    ) -> Result<(), MarketDataError> {
        let url = format!("{}/portfolios/{}/holdings", self.base_url, portfolio_id);
        let body = serde_json::to_value(holding)?;
        let response = self
            .client
            .post(&url)
            .json(&body)
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await?;
        self.check_status(response)?;
        Ok(())
    }

    async fn search_assets(
        &self,
        query: &str,
        classes: Option<&[AssetClass]>,
    ) -> Result<Vec<QuoteSummary>, MarketDataError> {
        let url = format!("{}/assets/search", self.base_url);
        let mut params = vec![("query", query.to_string())];
        if let Some(classes) = classes {
            let types = classes
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(",");
            params.push(("types", types));
        }
        self.get_json(&url, &params).await
    }

    async fn get_latest_quote(&self, symbol: &str) -> Result<PriceQuote, MarketDataError> {
        let url = format!("{}/assets/{}/price", self.base_url, symbol);
        self.get_json(&url, &[]).await
    }
}
