//! [Residential Electrification Model](https://www.rewiringamerica.org/api) client.

mod models;

use std::time::Duration;

use async_trait::async_trait;
use bon::Builder;
use reqwest::{
    Client,
    Url,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};

pub use self::models::*;
use crate::prelude::*;

/// Remote Residential Electrification Model.
#[async_trait]
pub trait ElectrificationModel: Sync {
    /// Model the upgrade for the home at the specified address.
    async fn get_by_address(&self, request: &AddressRequest) -> Result<ModelResponse>;
}

#[must_use]
#[derive(Builder)]
pub struct Configuration {
    #[builder(into)]
    access_token: String,

    base_url: Url,

    #[builder(default = Duration::from_secs(60))]
    timeout: Duration,
}

/// Open client session.
///
/// The underlying connection pool is released when the session gets dropped.
pub struct Session {
    client: Client,
    address_url: Url,
}

impl Session {
    #[instrument(skip_all, fields(base_url = %configuration.base_url))]
    pub fn open(configuration: &Configuration) -> Result<Self> {
        let mut authorization =
            HeaderValue::from_str(&format!("Bearer {}", configuration.access_token))
                .context("the access token is not a valid header value")?;
        authorization.set_sensitive(true);
        let headers = HeaderMap::from_iter([(AUTHORIZATION, authorization)]);
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(configuration.timeout)
            .build()
            .context("failed to build the HTTP client")?;
        let address_url = join_path(&configuration.base_url, &["rem", "address"])?;
        debug!("session opened");
        Ok(Self { client, address_url })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!("session closed");
    }
}

#[async_trait]
impl ElectrificationModel for Session {
    #[instrument(skip_all, fields(upgrade = ?request.upgrade, heating_fuel = ?request.heating_fuel))]
    async fn get_by_address(&self, request: &AddressRequest) -> Result<ModelResponse> {
        info!("modeling…");
        let response = self
            .client
            .get(self.address_url.clone())
            .query(request)
            .send()
            .await
            .with_context(|| format!("failed to call `{}`", self.address_url))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|error| {
                warn!("failed to read the error response body: {error:#}");
                String::new()
            });
            bail!("`{}` responded with {status}: {body}", self.address_url);
        }
        let response = response
            .json::<ModelResponse>()
            .await
            .context("failed to deserialize the model response")?;
        info!(n_fuel_results = response.fuel_results.0.len(), "modeled");
        Ok(response)
    }
}

fn join_path(base_url: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| anyhow!("`{base_url}` cannot be a base URL"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
