//! Async client for the Koios REST API.

use std::sync::Arc;

use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::middleware::{BearerAuth, Middleware, Next};
use crate::network::Network;
use crate::transport::{ReqwestTransport, Request, Response, Transport};
use crate::types::*;

/// Injected environment capability, so credential resolution can be tested
/// without touching real process state.
type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Builder for [`KoiosClient`].
///
/// Construction is synchronous and performs no I/O; it either returns a
/// fully usable client or fails with one configuration [`Error`].
pub struct ClientBuilder {
    network: Network,
    api_key: Option<String>,
    api_key_env: Option<String>,
    base_url: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    middleware: Vec<Arc<dyn Middleware>>,
    env_lookup: EnvLookup,
}

impl ClientBuilder {
    fn new(network: Network) -> Self {
        Self {
            network,
            api_key: None,
            api_key_env: None,
            base_url: None,
            transport: None,
            middleware: Vec::new(),
            env_lookup: Box::new(|name| std::env::var(name).ok()),
        }
    }

    /// Authenticate with an explicit API key.
    ///
    /// Takes precedence over [`api_key_from_env`](Self::api_key_from_env).
    /// An empty string counts as not provided.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Source the API key from the named environment variable.
    ///
    /// If the variable is unset or empty, [`build`](Self::build) fails with
    /// [`Error::MissingApiKey`] rather than silently producing an
    /// unauthenticated client. Leave both this and
    /// [`api_key`](Self::api_key) out for deliberate unauthenticated access.
    pub fn api_key_from_env(mut self, var_name: impl Into<String>) -> Self {
        self.api_key_env = Some(var_name.into());
        self
    }

    /// Override the network-derived base URL.
    ///
    /// Must parse as an absolute URL or [`build`](Self::build) fails with
    /// [`Error::InvalidBasePath`].
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Substitute the transport (test doubles, custom HTTP stacks).
    ///
    /// The middleware chain still runs in front of it, so a double observes
    /// requests exactly as the network would.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Append a middleware to the chain.
    ///
    /// Entries run in the order they were added. When a credential is
    /// resolved, [`BearerAuth`] is placed ahead of all of them.
    pub fn middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Replace the environment lookup used by
    /// [`api_key_from_env`](Self::api_key_from_env). Intended for tests.
    pub fn env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env_lookup = Box::new(lookup);
        self
    }

    /// Assemble the client.
    pub fn build(self) -> Result<KoiosClient> {
        let api_key = resolve_api_key(self.api_key, self.api_key_env, &self.env_lookup)?;

        let base_url = match self.base_url {
            Some(raw) => parse_base_url(&raw)?,
            None => parse_base_url(self.network.base_url())?,
        };

        let mut middleware = self.middleware;
        if let Some(key) = &api_key {
            middleware.insert(0, Arc::new(BearerAuth::new(key)?));
        }

        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(ReqwestTransport::default()));

        Ok(KoiosClient {
            network: self.network,
            base_url,
            api_key,
            middleware,
            transport,
        })
    }
}

/// Effective API key, by priority: explicit value, then environment
/// variable, then none. A configured-but-missing variable is an error; a
/// variable that was never configured is not.
fn resolve_api_key(
    explicit: Option<String>,
    env_var: Option<String>,
    lookup: &EnvLookup,
) -> Result<Option<String>> {
    if let Some(key) = explicit.filter(|k| !k.is_empty()) {
        return Ok(Some(key));
    }
    if let Some(name) = env_var {
        return match lookup(&name).filter(|v| !v.is_empty()) {
            Some(value) => Ok(Some(value)),
            None => Err(Error::MissingApiKey(name)),
        };
    }
    Ok(None)
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|_| Error::InvalidBasePath(raw.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidBasePath(raw.to_string()));
    }
    Ok(url)
}

/// Async client for the Koios Cardano REST API.
///
/// Immutable once built: share it by reference (or in an [`Arc`]) and issue
/// any number of concurrent operations through it.
///
/// # Example
///
/// ```no_run
/// use koios_client::{KoiosClient, Network};
///
/// #[tokio::main]
/// async fn main() -> koios_client::Result<()> {
///     let client = KoiosClient::builder(Network::Mainnet)
///         .api_key_from_env("KOIOS_API_TOKEN")
///         .build()?;
///     let tip = client.tip().await?;
///     println!("epoch {} at block {}", tip[0].epoch_no, tip[0].block_no);
///     Ok(())
/// }
/// ```
pub struct KoiosClient {
    network: Network,
    base_url: Url,
    api_key: Option<String>,
    middleware: Vec<Arc<dyn Middleware>>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for KoiosClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KoiosClient")
            .field("network", &self.network)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl KoiosClient {
    /// Start building a client for `network`.
    pub fn builder(network: Network) -> ClientBuilder {
        ClientBuilder::new(network)
    }

    /// An unauthenticated client for `network` with default settings.
    pub fn new(network: Network) -> Result<Self> {
        Self::builder(network).build()
    }

    /// The network this client was built for.
    pub fn network(&self) -> Network {
        self.network
    }

    /// The effective base URL all operation paths resolve against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The resolved API key, if the client authenticates.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut raw = self.base_url.as_str().trim_end_matches('/').to_string();
        raw.push('/');
        raw.push_str(path.trim_start_matches('/'));
        Url::parse(&raw).map_err(|_| Error::InvalidValue(format!("invalid endpoint path: {path:?}")))
    }

    /// Run a request through the middleware chain and the transport.
    async fn execute(&self, request: Request) -> Result<Response> {
        tracing::debug!(method = %request.method, url = %request.url, "dispatching request");
        let response = Next::new(self.transport.as_ref(), &self.middleware)
            .run(request)
            .await?;
        tracing::debug!(status = %response.status, "received response");
        Ok(response)
    }

    /// Issue a GET against any Koios endpoint and decode the JSON response.
    ///
    /// Escape hatch for endpoints without a typed wrapper; `query` pairs are
    /// appended verbatim (PostgREST-style filters included).
    pub async fn get<R>(&self, path: &str, query: &[(&str, &str)]) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let mut url = self.endpoint(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter().copied());
        }
        let response = self.execute(Request::get(url)).await?;
        decode(response)
    }

    /// Issue a POST with a JSON body against any Koios endpoint and decode
    /// the JSON response.
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let response = self
            .execute(Request::post(url, serde_json::to_vec(body)?))
            .await?;
        decode(response)
    }

    // ── Network ──────────────────────────────────────────────────

    /// The tip of the chain.
    pub async fn tip(&self) -> Result<Vec<Tip>> {
        self.get("tip", &[]).await
    }

    /// Genesis parameters of the network.
    pub async fn genesis(&self) -> Result<Vec<Genesis>> {
        self.get("genesis", &[]).await
    }

    /// Supply figures, for one epoch or the whole history.
    pub async fn totals(&self, epoch_no: Option<u64>) -> Result<Vec<Totals>> {
        let epoch = epoch_no.map(|e| e.to_string());
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(epoch) = &epoch {
            query.push(("_epoch_no", epoch));
        }
        self.get("totals", &query).await
    }

    // ── Epoch ────────────────────────────────────────────────────

    /// Epoch summaries, for one epoch or the whole history.
    pub async fn epoch_info(&self, epoch_no: Option<u64>) -> Result<Vec<EpochInfo>> {
        let epoch = epoch_no.map(|e| e.to_string());
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(epoch) = &epoch {
            query.push(("_epoch_no", epoch));
        }
        self.get("epoch_info", &query).await
    }

    // ── Block ────────────────────────────────────────────────────

    /// Recent blocks, newest first.
    pub async fn blocks(&self, limit: Option<u64>) -> Result<Vec<Block>> {
        let limit = limit.map(|l| l.to_string());
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(limit) = &limit {
            query.push(("limit", limit));
        }
        self.get("blocks", &query).await
    }

    /// Detailed information for specific blocks.
    pub async fn block_info(&self, block_hashes: &[&str]) -> Result<Vec<BlockInfo>> {
        self.post(
            "block_info",
            &serde_json::json!({ "_block_hashes": block_hashes }),
        )
        .await
    }

    // ── Address / Account ────────────────────────────────────────

    /// Balance and UTxO set for payment addresses.
    pub async fn address_info(&self, addresses: &[&str]) -> Result<Vec<AddressInfo>> {
        self.post("address_info", &serde_json::json!({ "_addresses": addresses }))
            .await
    }

    /// Stake account summaries.
    pub async fn account_info(&self, stake_addresses: &[&str]) -> Result<Vec<AccountInfo>> {
        self.post(
            "account_info",
            &serde_json::json!({ "_stake_addresses": stake_addresses }),
        )
        .await
    }

    // ── Transaction ──────────────────────────────────────────────

    /// Core details for specific transactions.
    pub async fn tx_info(&self, tx_hashes: &[&str]) -> Result<Vec<TxInfo>> {
        self.post("tx_info", &serde_json::json!({ "_tx_hashes": tx_hashes }))
            .await
    }

    /// Confirmation status for specific transactions.
    pub async fn tx_status(&self, tx_hashes: &[&str]) -> Result<Vec<TxStatus>> {
        self.post("tx_status", &serde_json::json!({ "_tx_hashes": tx_hashes }))
            .await
    }

    // ── Pool ─────────────────────────────────────────────────────

    /// All registered stake pools.
    pub async fn pool_list(&self) -> Result<Vec<PoolListItem>> {
        self.get("pool_list", &[]).await
    }
}

fn decode<R: DeserializeOwned>(response: Response) -> Result<R> {
    if !response.status.is_success() {
        return Err(Error::Api {
            status: response.status.as_u16(),
            message: String::from_utf8_lossy(&response.body).into_owned(),
        });
    }
    Ok(serde_json::from_slice(&response.body)?)
}
