//! HTTP access to the three cart endpoints.

use std::future::Future;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response, Url};

use crate::cart::error::{CartError, CartOperation};
use crate::cart::model::{CartSnapshot, VariantId};
use crate::config::StoreConfig;

const REQUESTED_WITH: &str = "X-Requested-With";

/// Server cart operations.
///
/// Every operation resolves to a complete snapshot of the cart after the
/// call, or to an error carrying a user-facing message.
pub trait CartApi: Send + Sync + 'static {
    /// Read the current cart. No server-side effects.
    fn fetch_cart(&self) -> impl Future<Output = Result<CartSnapshot, CartError>> + Send;

    /// Set one line's quantity. Quantity 0 removes the line.
    fn set_variant_quantity(
        &self,
        variant_id: &VariantId,
        quantity: u32,
    ) -> impl Future<Output = Result<CartSnapshot, CartError>> + Send;

    /// Remove every line.
    fn clear_cart(&self) -> impl Future<Output = Result<CartSnapshot, CartError>> + Send;
}

/// Endpoint URLs resolved once against the store origin and root prefix.
#[derive(Debug, Clone)]
struct Endpoints {
    cart: Url,
    update: Url,
    clear: Url,
}

impl Endpoints {
    fn resolve(store: &StoreConfig) -> Result<Self, CartError> {
        let invalid = |reason: String| CartError::InvalidEndpoint {
            url: store.base_url.clone(),
            reason,
        };

        let base = Url::parse(&store.base_url).map_err(|e| invalid(e.to_string()))?;
        let root = base
            .join(&store.normalized_root())
            .map_err(|e| invalid(e.to_string()))?;
        let join = |path: &str| root.join(path).map_err(|e| invalid(e.to_string()));

        Ok(Self {
            cart: join("cart.js")?,
            update: join("cart/update.js")?,
            clear: join("cart/clear.js")?,
        })
    }
}

/// `CartApi` over the storefront's AJAX cart endpoints.
///
/// Session cookies are kept in the client's cookie store so that every call
/// targets the same server cart, the way same-origin credentials do in a
/// browser.
#[derive(Debug, Clone)]
pub struct HttpCartClient {
    client: Client,
    endpoints: Endpoints,
}

impl HttpCartClient {
    pub fn new(store: &StoreConfig) -> Result<Self, CartError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .build()
            .map_err(CartError::Client)?;

        Ok(Self {
            client,
            endpoints: Endpoints::resolve(store)?,
        })
    }

    pub fn cart_url(&self) -> &Url {
        &self.endpoints.cart
    }
}

impl CartApi for HttpCartClient {
    async fn fetch_cart(&self) -> Result<CartSnapshot, CartError> {
        let operation = CartOperation::Fetch;
        tracing::debug!(url = %self.endpoints.cart, "Fetching cart");

        let response = self
            .client
            .get(self.endpoints.cart.clone())
            .send()
            .await
            .map_err(|source| CartError::Transport { operation, source })?;

        read_snapshot(operation, response).await
    }

    async fn set_variant_quantity(
        &self,
        variant_id: &VariantId,
        quantity: u32,
    ) -> Result<CartSnapshot, CartError> {
        let operation = CartOperation::Update;
        tracing::debug!(variant = %variant_id, quantity, "Updating cart line");

        let key = format!("updates[{}]", variant_id);
        let value = quantity.to_string();
        let response = self
            .client
            .post(self.endpoints.update.clone())
            .header(REQUESTED_WITH, "XMLHttpRequest")
            .form(&[(key.as_str(), value.as_str())])
            .send()
            .await
            .map_err(|source| CartError::Transport { operation, source })?;

        read_snapshot(operation, response).await
    }

    async fn clear_cart(&self) -> Result<CartSnapshot, CartError> {
        let operation = CartOperation::Clear;
        tracing::debug!(url = %self.endpoints.clear, "Clearing cart");

        let response = self
            .client
            .post(self.endpoints.clear.clone())
            .header(REQUESTED_WITH, "XMLHttpRequest")
            .send()
            .await
            .map_err(|source| CartError::Transport { operation, source })?;

        read_snapshot(operation, response).await
    }
}

async fn read_snapshot(
    operation: CartOperation,
    response: Response,
) -> Result<CartSnapshot, CartError> {
    let status = response.status();

    if !status.is_success() {
        let status = status.as_u16();
        // Only quantity updates report a reason worth showing (stock limits etc.).
        if operation == CartOperation::Update {
            if let Some(message) = response.text().await.ok().and_then(|b| error_message(&b)) {
                return Err(CartError::Rejected {
                    operation,
                    status,
                    message,
                });
            }
        }
        return Err(CartError::Status { operation, status });
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| CartError::Transport { operation, source })?;

    serde_json::from_slice(&body).map_err(|e| CartError::Decode {
        operation,
        reason: e.to_string(),
    })
}

/// Pull `message`, then `description`, out of a JSON error body.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "description"]
        .iter()
        .filter_map(|field| value.get(*field).and_then(|v| v.as_str()))
        .find(|text| !text.trim().is_empty())
        .map(str::to_string)
}
