//! Raw wire types for Medusa Store API responses.
//!
//! The Store API's response shape has drifted across backend versions, so
//! these types are deliberately permissive: optional fields default rather
//! than fail, and the historical field names for cart totals are accepted as
//! serde aliases. The Medusa v2 names (`total`, `subtotal`, `tax_total`,
//! `items`) are authoritative; the aliases are deprecated compatibility
//! shims. Structurally required identifiers (cart id, line id, product id
//! and handle) are non-optional, so their absence is a parse error at this
//! boundary instead of a half-formed entity downstream.

use rust_decimal::Decimal;
use serde::Deserialize;

use mero_closet_core::SelectedOption;

/// A JSON amount that may arrive as a number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawAmount {
    Number(serde_json::Number),
    Text(String),
}

impl RawAmount {
    pub(crate) fn as_amount_string(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    pub(crate) fn decimal(&self) -> Decimal {
        self.as_amount_string().parse().unwrap_or_default()
    }
}

// =============================================================================
// Regions
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RegionsResponse {
    #[serde(default)]
    pub regions: Vec<Region>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Region {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub currency_code: String,
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Product {
    pub id: String,
    pub handle: String,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub updated_at: Option<String>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    pub variants: Option<Vec<Variant>>,
    pub options: Option<Vec<ProductOptionDef>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductImage {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductOptionDef {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub values: Vec<OptionValue>,
}

/// Option values arrive either as bare strings or as `{value}` objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum OptionValue {
    Text(String),
    Object { value: String },
}

impl OptionValue {
    pub(crate) fn text(&self) -> String {
        match self {
            Self::Text(s) | Self::Object { value: s } => s.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Variant {
    pub id: Option<String>,
    pub title: Option<String>,
    pub prices: Option<Vec<Price>>,
    pub price_set: Option<PriceSet>,
    pub calculated_price: Option<CalculatedPrice>,
    pub options: Option<VariantOptions>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PriceSet {
    #[serde(default)]
    pub prices: Vec<Price>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Price {
    pub amount: Option<RawAmount>,
    #[serde(default)]
    pub currency_code: String,
}

/// `calculated_price` is an object with `calculated_amount` in Medusa v2,
/// but older payloads carry the bare amount.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CalculatedPrice {
    Detailed { calculated_amount: Option<RawAmount> },
    Bare(RawAmount),
}

impl CalculatedPrice {
    pub(crate) fn amount_string(&self) -> Option<String> {
        match self {
            Self::Detailed { calculated_amount } => {
                calculated_amount.as_ref().map(RawAmount::as_amount_string)
            }
            Self::Bare(amount) => Some(amount.as_amount_string()),
        }
    }
}

/// The two wire shapes of variant options: a list of option entries, or a
/// flat `{name: value}` map (seed-created variants).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum VariantOptions {
    List(Vec<VariantOptionEntry>),
    Map(serde_json::Map<String, serde_json::Value>),
}

#[derive(Debug, Deserialize)]
pub(crate) struct VariantOptionEntry {
    pub value: Option<String>,
    pub option: Option<OptionRef>,
    pub option_title: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OptionRef {
    pub title: Option<String>,
}

/// Normalize either option shape into ordered `{name, value}` pairs.
///
/// List entries without a resolvable name or value are skipped; both shapes
/// absent yields an empty list, never an error.
pub(crate) fn selected_options(options: Option<&VariantOptions>) -> Vec<SelectedOption> {
    match options {
        Some(VariantOptions::List(entries)) => entries
            .iter()
            .filter_map(|entry| {
                let name = entry
                    .option
                    .as_ref()
                    .and_then(|o| o.title.clone())
                    .or_else(|| entry.option_title.clone())
                    .or_else(|| entry.title.clone())?;
                let value = entry.value.clone()?;
                Some(SelectedOption { name, value })
            })
            .collect(),
        Some(VariantOptions::Map(map)) => map
            .iter()
            .map(|(name, value)| SelectedOption {
                name: name.clone(),
                value: match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                },
            })
            .collect(),
        None => Vec::new(),
    }
}

/// Lightweight projection for the per-collection featured image probe.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProductImagesResponse {
    #[serde(default)]
    pub products: Vec<ProductImages>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductImages {
    #[serde(default)]
    pub images: Vec<ProductImage>,
    pub thumbnail: Option<String>,
}

// =============================================================================
// Carts
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct CartResponse {
    pub cart: Cart,
}

/// `DELETE /carts/{id}/line-items/{line}` returns the updated cart under
/// `parent` (or `cart` on older backends).
#[derive(Debug, Deserialize)]
pub(crate) struct RemovedLineResponse {
    pub parent: Option<Cart>,
    pub cart: Option<Cart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Cart {
    pub id: String,
    pub currency_code: Option<String>,
    #[serde(default, alias = "line_items")]
    pub items: Vec<LineItem>,
    #[serde(alias = "total_amount")]
    pub total: Option<RawAmount>,
    #[serde(alias = "subtotal_amount")]
    pub subtotal: Option<RawAmount>,
    #[serde(alias = "tax_amount")]
    pub tax_total: Option<RawAmount>,
    pub payment_collection: Option<PaymentCollection>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LineItem {
    pub id: String,
    pub quantity: Option<i64>,
    pub unit_price: Option<RawAmount>,
    pub total: Option<RawAmount>,
    pub subtotal: Option<RawAmount>,
    pub currency_code: Option<String>,
    pub variant_id: Option<String>,
    pub variant: Option<CartVariant>,
    pub product: Option<CartProduct>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CartVariant {
    pub id: Option<String>,
    pub title: Option<String>,
    pub options: Option<VariantOptions>,
    pub product: Option<CartProduct>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CartProduct {
    pub id: Option<String>,
    pub handle: Option<String>,
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

// =============================================================================
// Payments
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PaymentProvidersResponse {
    #[serde(default)]
    pub payment_providers: Vec<PaymentProvider>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaymentProvider {
    pub id: String,
    pub is_enabled: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaymentCollectionResponse {
    pub payment_collection: PaymentCollection,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaymentCollection {
    pub id: String,
    #[serde(default)]
    pub payment_sessions: Vec<PaymentSessionEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaymentSessionEntry {
    pub provider_id: Option<String>,
    pub data: Option<PaymentSessionData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaymentSessionData {
    pub client_secret: Option<String>,
}

// =============================================================================
// Collections & categories
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CollectionsResponse {
    #[serde(default)]
    pub collections: Vec<Collection>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Collection {
    pub id: String,
    pub handle: String,
    #[serde(default)]
    pub title: String,
    pub updated_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CategoriesResponse {
    #[serde(default)]
    pub product_categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Category {
    pub id: String,
    pub handle: String,
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub updated_at: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_selected_options_from_list_shape() {
        let options: VariantOptions = serde_json::from_value(json!([
            {"option": {"title": "Size"}, "value": "M"},
            {"option_title": "Color", "value": "Black"}
        ]))
        .unwrap();

        let selected = selected_options(Some(&options));
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].name, "Size");
        assert_eq!(selected[0].value, "M");
        assert_eq!(selected[1].name, "Color");
        assert_eq!(selected[1].value, "Black");
    }

    #[test]
    fn test_selected_options_from_map_shape() {
        let options: VariantOptions =
            serde_json::from_value(json!({"Size": "M"})).unwrap();

        let selected = selected_options(Some(&options));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "Size");
        assert_eq!(selected[0].value, "M");
    }

    #[test]
    fn test_selected_options_absent_is_empty() {
        assert!(selected_options(None).is_empty());
    }

    #[test]
    fn test_selected_options_skips_nameless_entries() {
        let options: VariantOptions = serde_json::from_value(json!([
            {"value": "M"},
            {"option": {"title": "Size"}}
        ]))
        .unwrap();

        assert!(selected_options(Some(&options)).is_empty());
    }

    #[test]
    fn test_calculated_price_shapes() {
        let detailed: CalculatedPrice =
            serde_json::from_value(json!({"calculated_amount": 12.5})).unwrap();
        assert_eq!(detailed.amount_string().unwrap(), "12.5");

        let bare: CalculatedPrice = serde_json::from_value(json!(10)).unwrap();
        assert_eq!(bare.amount_string().unwrap(), "10");
    }

    #[test]
    fn test_raw_amount_number_or_string() {
        let number: RawAmount = serde_json::from_value(json!(12.5)).unwrap();
        assert_eq!(number.as_amount_string(), "12.5");

        let text: RawAmount = serde_json::from_value(json!("12.500")).unwrap();
        assert_eq!(text.as_amount_string(), "12.500");
        assert_eq!(text.decimal(), "12.500".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_cart_accepts_deprecated_total_aliases() {
        let cart: Cart = serde_json::from_value(json!({
            "id": "cart_01",
            "currency_code": "bhd",
            "line_items": [],
            "total_amount": 25,
            "subtotal_amount": 25,
            "tax_amount": 0
        }))
        .unwrap();

        assert_eq!(cart.total.unwrap().as_amount_string(), "25");
        assert_eq!(cart.subtotal.unwrap().as_amount_string(), "25");
        assert_eq!(cart.tax_total.unwrap().as_amount_string(), "0");
        assert!(cart.items.is_empty());
    }

    #[test]
    fn test_removed_line_response_parent_wrapping() {
        let response: RemovedLineResponse = serde_json::from_value(json!({
            "parent": {"id": "cart_01", "items": []}
        }))
        .unwrap();
        assert_eq!(response.parent.unwrap().id, "cart_01");
        assert!(response.cart.is_none());
    }

    #[test]
    fn test_line_item_without_id_is_a_parse_error() {
        let result: Result<LineItem, _> =
            serde_json::from_value(json!({"quantity": 1}));
        assert!(result.is_err());
    }

    #[test]
    fn test_option_value_shapes() {
        let text: OptionValue = serde_json::from_value(json!("M")).unwrap();
        assert_eq!(text.text(), "M");

        let object: OptionValue = serde_json::from_value(json!({"value": "L"})).unwrap();
        assert_eq!(object.text(), "L");
    }
}
