//! Medusa Store API client implementation.
//!
//! Plain REST with `reqwest` against `{backend}/store`, authenticated with
//! the `x-publishable-api-key` header. Catalog responses are cached using
//! `moka` (60-second TTL); carts are mutable state and never cached.

mod cache;
mod conversions;
mod regions;
mod wire;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::Method;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::sync::OnceCell;
use tracing::{debug, instrument, warn};

use mero_closet_core::{
    Cart, CartLineInput, CartLineUpdateInput, Collection, Image, Product, Region,
};

use crate::config::MedusaConfig;
use crate::medusa::MedusaError;

use cache::CacheValue;
use conversions::{
    CollectionRef, map_cart, map_category, map_collection, map_product, merge_collections,
};

/// Fixed timeout for every backend request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Upper bound for catalog product queries.
const CATALOG_PAGE_SIZE: i64 = 100;

/// Upper bound for collection/category queries.
const COLLECTION_PAGE_SIZE: i64 = 20;

/// Maximum number of product recommendations returned.
const RECOMMENDATION_LIMIT: usize = 8;

/// Field projection for full product payloads.
const PRODUCT_FIELDS: &str =
    "id,handle,title,description,metadata,updated_at,*images,*variants,*variants.prices,*options";

/// Field projection for rich cart payloads.
const CART_FIELDS: &str = "*items,*items.variant,*items.variant.product,\
     *items.variant.options,*items.variant.prices,total,subtotal,tax_total,currency_code";

/// Cart fields plus the payment collection, for checkout.
const PAYMENT_CART_FIELDS: &str = "*items,*items.variant,*items.variant.product,\
     *items.variant.options,*items.variant.prices,total,subtotal,tax_total,currency_code,\
     *payment_collection,*payment_collection.payment_sessions";

/// Whether a payment provider id is a Stripe provider.
///
/// Medusa registers Stripe as `pp_stripe_stripe` (or plain `stripe` in older
/// setups); match by substring to cover both.
fn is_stripe_provider(provider_id: &str) -> bool {
    provider_id.to_lowercase().contains("stripe")
}

// =============================================================================
// Result types for cart mutations and payment bootstrap
// =============================================================================

/// Outcome of a multi-step cart mutation.
///
/// The backend accepts one line item per request, so adds, updates, and
/// removals are issued sequentially in input order. Steps already applied
/// are not rolled back when a later one fails; the caller decides retry vs.
/// abort from this record.
#[derive(Debug)]
pub struct CartMutation {
    /// Id of the cart the mutation ran against (newly created when the
    /// caller had none). `None` when cart creation itself failed.
    pub cart_id: Option<String>,
    /// Cart state after the last applied step, if any request succeeded.
    pub cart: Option<Cart>,
    /// Input ids applied, in order.
    pub applied: Vec<String>,
    /// First failing step; steps after it were not attempted.
    pub failed: Option<CartStepFailure>,
}

/// A failed step within a cart mutation.
#[derive(Debug)]
pub struct CartStepFailure {
    /// Input id of the failing step: the variant id for adds, the line id
    /// for updates and removals, or `"create-cart"` when no cart could be
    /// created.
    pub id: String,
    /// Why the step failed.
    pub error: MedusaError,
}

/// Id recorded in [`CartStepFailure`] when cart creation failed.
pub const CREATE_CART_STEP: &str = "create-cart";

/// Outcome of payment session initialization.
///
/// Distinguishes "feature not available" from "temporarily broken" so the
/// UI can react to each.
#[derive(Debug)]
pub enum PaymentInit {
    /// A Stripe session was requested; the cart's `payment_session` carries
    /// the client secret when the provider issued one.
    Ready(Cart),
    /// No payment provider is configured for the cart's region.
    NoProvider(Cart),
    /// A step failed; carries the best-effort plain cart.
    Unavailable {
        /// Plain cart state, when one could still be fetched.
        cart: Option<Cart>,
        /// The failing step's error.
        error: MedusaError,
    },
}

// =============================================================================
// Query parameters
// =============================================================================

/// Query parameter builder. Values are strings, numbers, booleans, or
/// repeated array keys; absent optionals are dropped.
#[derive(Debug, Default)]
struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    fn new() -> Self {
        Self::default()
    }

    fn set(mut self, key: &str, value: impl ToString) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    fn set_opt(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.pairs.push((key.to_string(), value.to_string()));
        }
        self
    }

    fn append_each(mut self, key: &str, values: &[String]) -> Self {
        for value in values {
            self.pairs.push((key.to_string(), value.clone()));
        }
        self
    }

    fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

// =============================================================================
// StoreClient
// =============================================================================

/// Client for the Medusa Store API.
///
/// Provides access to products, collections, carts, and payment sessions.
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<StoreClientInner>,
}

struct StoreClientInner {
    http: reqwest::Client,
    store_base: Option<String>,
    publishable_key: Option<String>,
    region_name_hint: String,
    default_currency: String,
    region_cell: OnceCell<Region>,
    cache: Cache<String, CacheValue>,
}

impl StoreClient {
    /// Create a new Store API client.
    ///
    /// A missing backend URL or publishable key is not an error: the client
    /// degrades every read to an empty result so pages render with empty
    /// catalogs instead of crashing.
    #[must_use]
    pub fn new(config: &MedusaConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(60))
            .build();

        if config.store_base().is_none() || config.publishable_key.is_none() {
            warn!("Medusa backend not fully configured; storefront will serve empty data");
        }

        Self {
            inner: Arc::new(StoreClientInner {
                http: reqwest::Client::new(),
                store_base: config.store_base(),
                publishable_key: config
                    .publishable_key
                    .as_ref()
                    .map(|key| key.expose_secret().to_string()),
                region_name_hint: config.region_name_hint.clone(),
                default_currency: config.default_currency.clone(),
                region_cell: OnceCell::new(),
                cache,
            }),
        }
    }

    // =========================================================================
    // HTTP plumbing
    // =========================================================================

    /// Execute a request and parse the JSON body.
    ///
    /// The strict layer: every failure class is surfaced as a typed
    /// [`MedusaError`]. Cart mutations call this directly so each step's
    /// failure cause is preserved.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<serde_json::Value>,
    ) -> Result<T, MedusaError> {
        let (Some(base), Some(key)) = (&self.inner.store_base, &self.inner.publishable_key)
        else {
            return Err(MedusaError::Unconfigured);
        };

        let mut request = self
            .inner
            .http
            .request(method, format!("{base}{path}"))
            .timeout(REQUEST_TIMEOUT)
            .header("x-publishable-api-key", key.as_str())
            .header(reqwest::header::ACCEPT, "application/json");
        if !query.pairs().is_empty() {
            request = request.query(query.pairs());
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(MedusaError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(MedusaError::Parse)
    }

    /// Execute a request with the fail-soft read contract.
    ///
    /// This is the single chokepoint deciding soft-fail vs. propagate:
    /// 404 is an expected, routine "not found" and returns `None` silently;
    /// other HTTP errors, network failures, and missing configuration are
    /// logged and return `None` so callers render empty data. Only parse
    /// errors propagate - a malformed body means the contract is broken,
    /// not that the resource is missing.
    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<serde_json::Value>,
    ) -> Result<Option<T>, MedusaError> {
        match self.request(method, path, query, body).await {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.is_not_found() => Ok(None),
            Err(MedusaError::Status { status, path }) => {
                tracing::error!(status, path = %path, "Medusa returned non-success status");
                Ok(None)
            }
            Err(MedusaError::Network(error)) => {
                warn!(error = %error, path, "Medusa request failed");
                Ok(None)
            }
            Err(MedusaError::Unconfigured) => {
                warn!(path, "Medusa backend not configured; returning empty result");
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    // =========================================================================
    // Region
    // =========================================================================

    /// The store's operating region, resolved once per client and reused.
    ///
    /// Prefers a region matching the configured name hint or default
    /// currency; falls back to a hardcoded region when the backend has none
    /// so rendering against an unseeded backend still works.
    pub async fn region(&self) -> Region {
        self.inner
            .region_cell
            .get_or_init(|| self.resolve_region())
            .await
            .clone()
    }

    async fn resolve_region(&self) -> Region {
        let data: Option<wire::RegionsResponse> = match self
            .fetch(Method::GET, "/regions", &Query::new().set("limit", 50), None)
            .await
        {
            Ok(data) => data,
            Err(error) => {
                warn!(error = %error, "failed to read regions response");
                None
            }
        };

        let regions = data.map(|d| d.regions).unwrap_or_default();
        match regions::select_region(
            &regions,
            &self.inner.region_name_hint,
            &self.inner.default_currency,
        ) {
            Some(region) => {
                debug!(region_id = %region.id, currency = %region.currency_code, "resolved store region");
                region
            }
            None => {
                warn!("no regions configured in backend; using fallback region");
                regions::fallback_region()
            }
        }
    }

    // =========================================================================
    // Product methods
    // =========================================================================

    /// Get the product catalog, optionally filtered by a search query.
    ///
    /// # Errors
    ///
    /// Returns an error only for malformed backend responses; an
    /// unavailable backend yields an empty list.
    #[instrument(skip(self))]
    pub async fn get_products(&self, query: Option<&str>) -> Result<Vec<Product>, MedusaError> {
        let cache_key = format!("products:{}", query.unwrap_or(""));

        // Check cache (only for default queries without search)
        if query.is_none()
            && let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let region = self.region().await;
        let data: Option<wire::ProductsResponse> = self
            .fetch(
                Method::GET,
                "/products",
                &Query::new()
                    .set("limit", CATALOG_PAGE_SIZE)
                    .set("fields", PRODUCT_FIELDS)
                    .set_opt("q", query),
                None,
            )
            .await?;

        let products: Vec<Product> = data
            .map(|d| {
                d.products
                    .iter()
                    .map(|p| map_product(p, &region.currency_code))
                    .collect()
            })
            .unwrap_or_default();

        if query.is_none() {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Products(products.clone()))
                .await;
        }

        Ok(products)
    }

    /// Get a product by its handle.
    ///
    /// # Errors
    ///
    /// Returns an error only for malformed backend responses; an unknown
    /// handle yields `None`.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_product(&self, handle: &str) -> Result<Option<Product>, MedusaError> {
        let cache_key = format!("product:{handle}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(Some(*product));
        }

        let region = self.region().await;
        let data: Option<wire::ProductsResponse> = self
            .fetch(
                Method::GET,
                "/products",
                &Query::new()
                    .set("limit", 1)
                    .set("handle", handle)
                    .set("fields", PRODUCT_FIELDS),
                None,
            )
            .await?;

        let product = match data.and_then(|d| d.products.into_iter().next()) {
            Some(raw) => Some(map_product(&raw, &region.currency_code)),
            // Fallback when the backend ignores the handle filter.
            None => self
                .get_products(None)
                .await?
                .into_iter()
                .find(|p| p.handle == handle),
        };

        if let Some(product) = &product {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
                .await;
        }

        Ok(product)
    }

    /// Get product recommendations for a product.
    ///
    /// Medusa has no native recommendations; returns a small slice of the
    /// catalog excluding the product itself.
    ///
    /// # Errors
    ///
    /// Returns an error only for malformed backend responses.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product_recommendations(
        &self,
        product_id: &str,
    ) -> Result<Vec<Product>, MedusaError> {
        let all = self.get_products(None).await?;
        Ok(all
            .into_iter()
            .filter(|p| p.id != product_id)
            .take(RECOMMENDATION_LIMIT)
            .collect())
    }

    // =========================================================================
    // Collection methods
    // =========================================================================

    /// Get all storefront collections.
    ///
    /// Merges explicit collections with root product categories,
    /// de-duplicated by handle with collections taking precedence. Each
    /// collection's card image comes from one of its products; collections
    /// without products get no image.
    ///
    /// # Errors
    ///
    /// Returns an error only for malformed backend responses.
    #[instrument(skip(self))]
    pub async fn get_collections(&self) -> Result<Vec<Collection>, MedusaError> {
        let cache_key = "collections".to_string();

        if let Some(CacheValue::Collections(collections)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for collections");
            return Ok(collections);
        }

        let collections: Option<wire::CollectionsResponse> = self
            .fetch(
                Method::GET,
                "/collections",
                &Query::new().set("limit", COLLECTION_PAGE_SIZE),
                None,
            )
            .await?;
        let categories: Option<wire::CategoriesResponse> = self
            .fetch(
                Method::GET,
                "/product-categories",
                &Query::new()
                    .set("parent_category_id", "null")
                    .set("include_descendants_tree", false)
                    .set("limit", COLLECTION_PAGE_SIZE),
                None,
            )
            .await?;

        let merged = merge_collections(
            collections
                .map(|d| d.collections.iter().map(map_collection).collect())
                .unwrap_or_default(),
            categories
                .map(|d| d.product_categories.iter().map(map_category).collect())
                .unwrap_or_default(),
        );

        let mut result = Vec::with_capacity(merged.len());
        for resolved in merged {
            let mut collection = resolved.collection;
            collection.image = self
                .collection_card_image(&resolved.source, &collection.title)
                .await?;
            result.push(collection);
        }

        self.inner
            .cache
            .insert(cache_key, CacheValue::Collections(result.clone()))
            .await;

        Ok(result)
    }

    /// Get a collection by its handle, checking collections then categories.
    ///
    /// # Errors
    ///
    /// Returns an error only for malformed backend responses; an unknown
    /// handle yields `None`.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_collection(&self, handle: &str) -> Result<Option<Collection>, MedusaError> {
        let cache_key = format!("collection:{handle}");

        if let Some(CacheValue::Collection(collection)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for collection");
            return Ok(Some(*collection));
        }

        let Some(resolved) = self.resolve_collection(handle).await? else {
            return Ok(None);
        };

        self.inner
            .cache
            .insert(
                cache_key,
                CacheValue::Collection(Box::new(resolved.collection.clone())),
            )
            .await;

        Ok(Some(resolved.collection))
    }

    /// Get the products of a collection, optionally filtered by a search
    /// query.
    ///
    /// When the handle matches neither a collection nor a category the query
    /// is unfiltered, bounded by the page cap.
    ///
    /// # Errors
    ///
    /// Returns an error only for malformed backend responses.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_collection_products(
        &self,
        handle: &str,
        query: Option<&str>,
    ) -> Result<Vec<Product>, MedusaError> {
        let resolved = self.resolve_collection(handle).await?;

        let mut params = Query::new()
            .set("limit", CATALOG_PAGE_SIZE)
            .set("fields", PRODUCT_FIELDS)
            .set_opt("q", query);
        match resolved.map(|r| r.source) {
            Some(CollectionRef::Collection(id)) => {
                params = params.append_each("collection_id[]", std::slice::from_ref(&id));
            }
            Some(CollectionRef::Category(id)) => {
                params = params.append_each("category_id[]", std::slice::from_ref(&id));
            }
            None => {}
        }

        let region = self.region().await;
        let data: Option<wire::ProductsResponse> =
            self.fetch(Method::GET, "/products", &params, None).await?;

        Ok(data
            .map(|d| {
                d.products
                    .iter()
                    .map(|p| map_product(p, &region.currency_code))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Resolve a handle against collections first, then categories.
    async fn resolve_collection(
        &self,
        handle: &str,
    ) -> Result<Option<conversions::ResolvedCollection>, MedusaError> {
        let collections: Option<wire::CollectionsResponse> = self
            .fetch(
                Method::GET,
                "/collections",
                &Query::new().set("handle", handle),
                None,
            )
            .await?;
        if let Some(collection) = collections.and_then(|d| d.collections.into_iter().next()) {
            return Ok(Some(map_collection(&collection)));
        }

        let categories: Option<wire::CategoriesResponse> = self
            .fetch(
                Method::GET,
                "/product-categories",
                &Query::new().set("handle", handle),
                None,
            )
            .await?;
        Ok(categories
            .and_then(|d| d.product_categories.into_iter().next())
            .map(|c| map_category(&c)))
    }

    /// One bounded product query for a collection's card image.
    async fn collection_card_image(
        &self,
        source: &CollectionRef,
        alt_text: &str,
    ) -> Result<Option<Image>, MedusaError> {
        let params = Query::new().set("limit", 1).set("fields", "*images,thumbnail");
        let params = match source {
            CollectionRef::Collection(id) => {
                params.append_each("collection_id[]", std::slice::from_ref(id))
            }
            CollectionRef::Category(id) => {
                params.append_each("category_id[]", std::slice::from_ref(id))
            }
        };

        let data: Option<wire::ProductImagesResponse> =
            self.fetch(Method::GET, "/products", &params, None).await?;

        Ok(data
            .and_then(|d| d.products.into_iter().next())
            .and_then(|p| {
                p.images
                    .first()
                    .and_then(|i| i.url.clone())
                    .or(p.thumbnail)
                    .filter(|url| !url.is_empty())
            })
            .map(|url| Image::with_url(url, alt_text)))
    }

    // =========================================================================
    // Cart methods (not cached - mutable state)
    // =========================================================================

    /// Create a new cart bound to the resolved region.
    ///
    /// # Errors
    ///
    /// Returns an error only for malformed backend responses; an
    /// unavailable backend yields `None`.
    #[instrument(skip(self))]
    pub async fn create_cart(&self) -> Result<Option<Cart>, MedusaError> {
        let region = self.region().await;
        let data: Option<wire::CartResponse> = self
            .fetch(
                Method::POST,
                "/carts",
                &Query::new(),
                Some(json!({ "region_id": region.id })),
            )
            .await?;
        Ok(data.map(|d| map_cart(&d.cart, &region.currency_code)))
    }

    /// Get the cart for a session token.
    ///
    /// A stale or unknown cart id yields `None`, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error only for malformed backend responses.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn get_cart(&self, cart_id: &str) -> Result<Option<Cart>, MedusaError> {
        let region = self.region().await;
        let data: Option<wire::CartResponse> = self
            .fetch(
                Method::GET,
                &format!("/carts/{cart_id}"),
                &Query::new().set("fields", CART_FIELDS),
                None,
            )
            .await?;
        Ok(data.map(|d| map_cart(&d.cart, &region.currency_code)))
    }

    /// Add lines to the session cart, creating a cart first when the caller
    /// has none. The backend accepts one line item per request; lines are
    /// added sequentially in input order.
    #[instrument(skip(self, lines), fields(line_count = lines.len()))]
    pub async fn add_to_cart(
        &self,
        cart_id: Option<&str>,
        lines: &[CartLineInput],
    ) -> CartMutation {
        let region = self.region().await;

        let cart_id = match cart_id {
            Some(id) => id.to_string(),
            None => {
                let created: Result<wire::CartResponse, MedusaError> = self
                    .request(
                        Method::POST,
                        "/carts",
                        &Query::new(),
                        Some(json!({ "region_id": region.id })),
                    )
                    .await;
                match created {
                    Ok(data) => data.cart.id,
                    Err(error) => {
                        warn!(error = %error, "failed to create cart");
                        return CartMutation {
                            cart_id: None,
                            cart: None,
                            applied: Vec::new(),
                            failed: Some(CartStepFailure {
                                id: CREATE_CART_STEP.to_string(),
                                error,
                            }),
                        };
                    }
                }
            }
        };

        let mut applied = Vec::new();
        let mut last_cart: Option<wire::Cart> = None;
        let mut failed = None;

        for line in lines {
            let result: Result<wire::CartResponse, MedusaError> = self
                .request(
                    Method::POST,
                    &format!("/carts/{cart_id}/line-items"),
                    &Query::new(),
                    Some(json!({
                        "variant_id": line.merchandise_id,
                        "quantity": line.quantity,
                    })),
                )
                .await;
            match result {
                Ok(data) => {
                    last_cart = Some(data.cart);
                    applied.push(line.merchandise_id.clone());
                }
                Err(error) => {
                    warn!(error = %error, variant_id = %line.merchandise_id, "add to cart step failed");
                    failed = Some(CartStepFailure {
                        id: line.merchandise_id.clone(),
                        error,
                    });
                    break;
                }
            }
        }

        CartMutation {
            cart_id: Some(cart_id),
            cart: last_cart.map(|c| map_cart(&c, &region.currency_code)),
            applied,
            failed,
        }
    }

    /// Update line quantities, one backend request per line, in input order.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id, line_count = lines.len()))]
    pub async fn update_cart(
        &self,
        cart_id: &str,
        lines: &[CartLineUpdateInput],
    ) -> CartMutation {
        let region = self.region().await;

        let mut applied = Vec::new();
        let mut last_cart: Option<wire::Cart> = None;
        let mut failed = None;

        for line in lines {
            let result: Result<wire::CartResponse, MedusaError> = self
                .request(
                    Method::POST,
                    &format!("/carts/{cart_id}/line-items/{}", line.id),
                    &Query::new(),
                    Some(json!({ "quantity": line.quantity })),
                )
                .await;
            match result {
                Ok(data) => {
                    last_cart = Some(data.cart);
                    applied.push(line.id.clone());
                }
                Err(error) => {
                    warn!(error = %error, line_id = %line.id, "cart update step failed");
                    failed = Some(CartStepFailure {
                        id: line.id.clone(),
                        error,
                    });
                    break;
                }
            }
        }

        CartMutation {
            cart_id: Some(cart_id.to_string()),
            cart: last_cart.map(|c| map_cart(&c, &region.currency_code)),
            applied,
            failed,
        }
    }

    /// Remove lines, one backend request per id, in input order.
    #[instrument(skip(self, line_ids), fields(cart_id = %cart_id, line_count = line_ids.len()))]
    pub async fn remove_from_cart(&self, cart_id: &str, line_ids: &[String]) -> CartMutation {
        let region = self.region().await;

        let mut applied = Vec::new();
        let mut last_cart: Option<wire::Cart> = None;
        let mut failed = None;

        for line_id in line_ids {
            let result: Result<wire::RemovedLineResponse, MedusaError> = self
                .request(
                    Method::DELETE,
                    &format!("/carts/{cart_id}/line-items/{line_id}"),
                    &Query::new(),
                    None,
                )
                .await;
            match result {
                Ok(data) => {
                    // The updated cart arrives under `parent` (or `cart` on
                    // older backends).
                    if let Some(cart) = data.parent.or(data.cart) {
                        last_cart = Some(cart);
                    }
                    applied.push(line_id.clone());
                }
                Err(error) => {
                    warn!(error = %error, line_id = %line_id, "cart removal step failed");
                    failed = Some(CartStepFailure {
                        id: line_id.clone(),
                        error,
                    });
                    break;
                }
            }
        }

        CartMutation {
            cart_id: Some(cart_id.to_string()),
            cart: last_cart.map(|c| map_cart(&c, &region.currency_code)),
            applied,
            failed,
        }
    }

    // =========================================================================
    // Payment session bootstrap
    // =========================================================================

    /// Initialize a Stripe payment session for a cart.
    ///
    /// Fetches the cart with its payment collection, selects a Stripe
    /// provider for the region, reuses or creates the payment collection,
    /// requests a payment session against it, and returns the re-fetched
    /// cart. Every step degrades through the typed [`PaymentInit`] result;
    /// nothing propagates past this function.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn initialize_payment_session(&self, cart_id: &str) -> PaymentInit {
        let region = self.region().await;
        let currency = region.currency_code.clone();

        // (1) Cart with payment collection fields.
        let cart_wire = match self
            .request::<wire::CartResponse>(
                Method::GET,
                &format!("/carts/{cart_id}"),
                &Query::new().set("fields", PAYMENT_CART_FIELDS),
                None,
            )
            .await
        {
            Ok(data) => data.cart,
            Err(error) => {
                warn!(error = %error, "could not load cart for payment init");
                let cart = self.get_cart(cart_id).await.ok().flatten();
                return PaymentInit::Unavailable { cart, error };
            }
        };

        // (2) Providers available for the region.
        let providers = match self
            .request::<wire::PaymentProvidersResponse>(
                Method::GET,
                "/payment-providers",
                &Query::new().set("region_id", region.id.clone()),
                None,
            )
            .await
        {
            Ok(data) => data.payment_providers,
            Err(error) => {
                warn!(error = %error, "could not list payment providers");
                return PaymentInit::Unavailable {
                    cart: Some(map_cart(&cart_wire, &currency)),
                    error,
                };
            }
        };
        if providers.is_empty() {
            debug!("no payment providers for region; returning plain cart");
            return PaymentInit::NoProvider(map_cart(&cart_wire, &currency));
        }

        // (3) Select a Stripe provider.
        let Some(provider) = providers
            .iter()
            .find(|p| p.is_enabled.unwrap_or(true) && is_stripe_provider(&p.id))
        else {
            debug!("no Stripe provider for region; returning plain cart");
            return PaymentInit::NoProvider(map_cart(&cart_wire, &currency));
        };

        // (4) Reuse the cart's payment collection or create one.
        let collection_id = match cart_wire.payment_collection.as_ref().map(|pc| pc.id.clone())
        {
            Some(id) => id,
            None => {
                let created = self
                    .request::<wire::PaymentCollectionResponse>(
                        Method::POST,
                        "/payment-collections",
                        &Query::new(),
                        Some(json!({ "cart_id": cart_id })),
                    )
                    .await;
                match created {
                    Ok(data) => data.payment_collection.id,
                    Err(error) => {
                        warn!(error = %error, "could not create payment collection");
                        return PaymentInit::Unavailable {
                            cart: Some(map_cart(&cart_wire, &currency)),
                            error,
                        };
                    }
                }
            }
        };

        // (5) Request a payment session with the selected provider.
        if let Err(error) = self
            .request::<wire::PaymentCollectionResponse>(
                Method::POST,
                &format!("/payment-collections/{collection_id}/payment-sessions"),
                &Query::new(),
                Some(json!({ "provider_id": provider.id })),
            )
            .await
        {
            warn!(error = %error, provider_id = %provider.id, "could not create payment session");
            return PaymentInit::Unavailable {
                cart: Some(map_cart(&cart_wire, &currency)),
                error,
            };
        }

        // (6) Re-fetch the cart; the UI handles an absent client secret.
        match self
            .request::<wire::CartResponse>(
                Method::GET,
                &format!("/carts/{cart_id}"),
                &Query::new().set("fields", PAYMENT_CART_FIELDS),
                None,
            )
            .await
        {
            Ok(data) => PaymentInit::Ready(map_cart(&data.cart, &currency)),
            Err(error) => {
                warn!(error = %error, "could not re-fetch cart after payment init");
                PaymentInit::Unavailable {
                    cart: Some(map_cart(&cart_wire, &currency)),
                    error,
                }
            }
        }
    }

    // =========================================================================
    // Cache management
    // =========================================================================

    /// Invalidate all cached catalog data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::MedusaConfig;

    fn unconfigured_client() -> StoreClient {
        StoreClient::new(&MedusaConfig {
            backend_url: None,
            publishable_key: None,
            region_name_hint: "gulf".to_string(),
            default_currency: "bhd".to_string(),
        })
    }

    #[test]
    fn test_query_builder_drops_absent_values() {
        let query = Query::new()
            .set("limit", 100)
            .set("include_descendants_tree", false)
            .set_opt("q", None)
            .set_opt("handle", Some("abayas"));

        assert_eq!(
            query.pairs(),
            &[
                ("limit".to_string(), "100".to_string()),
                ("include_descendants_tree".to_string(), "false".to_string()),
                ("handle".to_string(), "abayas".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_builder_repeats_array_keys() {
        let ids = vec!["pcat_01".to_string(), "pcat_02".to_string()];
        let query = Query::new().append_each("category_id[]", &ids);
        assert_eq!(
            query.pairs(),
            &[
                ("category_id[]".to_string(), "pcat_01".to_string()),
                ("category_id[]".to_string(), "pcat_02".to_string()),
            ]
        );
    }

    #[test]
    fn test_stripe_provider_matching() {
        assert!(is_stripe_provider("pp_stripe_stripe"));
        assert!(is_stripe_provider("stripe"));
        assert!(is_stripe_provider("pp_stripe-blik_stripe"));
        assert!(!is_stripe_provider("pp_system_default"));
    }

    #[tokio::test]
    async fn test_unconfigured_client_region_falls_back() {
        let client = unconfigured_client();
        let region = client.region().await;
        assert_eq!(region.id, regions::FALLBACK_REGION_ID);
        assert_eq!(region.currency_code, regions::FALLBACK_CURRENCY);
    }

    #[tokio::test]
    async fn test_unconfigured_client_reads_are_empty() {
        let client = unconfigured_client();
        assert!(client.get_products(None).await.unwrap().is_empty());
        assert!(client.get_product("any-handle").await.unwrap().is_none());
        assert!(client.get_collections().await.unwrap().is_empty());
        assert!(client.get_collection("abayas").await.unwrap().is_none());
        assert!(
            client
                .get_collection_products("abayas", None)
                .await
                .unwrap()
                .is_empty()
        );
        assert!(client.create_cart().await.unwrap().is_none());
        assert!(client.get_cart("cart_01").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unconfigured_add_to_cart_reports_create_failure() {
        let client = unconfigured_client();
        let mutation = client
            .add_to_cart(
                None,
                &[CartLineInput {
                    merchandise_id: "variant_01".to_string(),
                    quantity: 1,
                }],
            )
            .await;

        assert!(mutation.cart_id.is_none());
        assert!(mutation.cart.is_none());
        assert!(mutation.applied.is_empty());
        let failure = mutation.failed.unwrap();
        assert_eq!(failure.id, CREATE_CART_STEP);
        assert!(matches!(failure.error, MedusaError::Unconfigured));
    }

    #[tokio::test]
    async fn test_unconfigured_update_stops_at_first_step() {
        let client = unconfigured_client();
        let mutation = client
            .update_cart(
                "cart_01",
                &[
                    CartLineUpdateInput {
                        id: "line_a".to_string(),
                        quantity: 2,
                    },
                    CartLineUpdateInput {
                        id: "line_b".to_string(),
                        quantity: 1,
                    },
                ],
            )
            .await;

        assert_eq!(mutation.cart_id.as_deref(), Some("cart_01"));
        assert!(mutation.applied.is_empty());
        assert_eq!(mutation.failed.unwrap().id, "line_a");
    }

    #[tokio::test]
    async fn test_unconfigured_payment_init_is_unavailable() {
        let client = unconfigured_client();
        match client.initialize_payment_session("cart_01").await {
            PaymentInit::Unavailable { cart, error } => {
                assert!(cart.is_none());
                assert!(matches!(error, MedusaError::Unconfigured));
            }
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }
}
