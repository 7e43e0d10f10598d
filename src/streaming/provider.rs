use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::content::Platform;
use crate::error::Result;

const USER_AGENT: &str = concat!("mantis/", env!("CARGO_PKG_VERSION"));

/// What is being searched for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LookupKind {
    Track,
    Album,
}

/// A streaming catalog that can be searched for the artist's releases.
pub trait CatalogProvider {
    fn platform(&self) -> Platform;

    /// Catalogs that throttle anonymous clients get a pause after each query.
    fn rate_limited(&self) -> bool {
        false
    }

    /// Search for `title` by `artist`. `Ok(None)` means no acceptable match.
    fn lookup(&self, kind: LookupKind, title: &str, artist: &str) -> Result<Option<String>>;
}

/// Blocking HTTP client shared by the catalog providers.
#[derive(Clone)]
pub struct CatalogHttp {
    client: Client,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

impl CatalogHttp {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    pub fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        bearer: Option<&str>,
    ) -> Result<T> {
        tracing::debug!(%url, ?query, "catalog request");
        let mut request = self.client.get(url).query(query);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = request.send()?.error_for_status()?;
        Ok(response.json()?)
    }

    /// OAuth2 client-credentials grant.
    pub fn client_credentials_token(
        &self,
        url: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Option<String>> {
        let response = self
            .client
            .post(url)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()?
            .error_for_status()?;
        let token: TokenResponse = response.json()?;
        Ok(token.access_token.filter(|t| !t.is_empty()))
    }
}
