//! Product, variant, and image types.

use serde::{Deserialize, Serialize};

use super::money::{Money, PriceRange};

/// Product or collection image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL. Empty string when the source had no usable image.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: String,
    /// Image width in pixels.
    pub width: i64,
    /// Image height in pixels.
    pub height: i64,
}

impl Image {
    /// Standard catalog image dimensions used when the backend supplies none.
    pub const DEFAULT_SIZE: i64 = 1024;

    /// Image with a URL and default dimensions.
    #[must_use]
    pub fn with_url(url: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt_text: alt_text.into(),
            width: Self::DEFAULT_SIZE,
            height: Self::DEFAULT_SIZE,
        }
    }

    /// Placeholder image with an empty URL.
    #[must_use]
    pub fn placeholder(alt_text: impl Into<String>) -> Self {
        Self::with_url("", alt_text)
    }
}

/// SEO metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seo {
    /// Page title for search engines.
    pub title: String,
    /// Meta description.
    pub description: String,
}

/// Selected option on a product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    /// Option name (e.g., "Size", "Color").
    pub name: String,
    /// Selected value (e.g., "M", "Black").
    pub value: String,
}

/// Product option definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    /// Option ID (falls back to the name when the backend has none).
    pub id: String,
    /// Option name.
    pub name: String,
    /// Available values, first-seen order, duplicates collapsed.
    pub values: Vec<String>,
}

/// A product variant (specific combination of options).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Variant ID.
    pub id: String,
    /// Variant title.
    pub title: String,
    /// Whether this variant is available for sale.
    pub available_for_sale: bool,
    /// Selected options for this variant; names unique within the variant.
    pub selected_options: Vec<SelectedOption>,
    /// Current price in the resolved region currency.
    pub price: Money,
}

/// A product in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: String,
    /// URL handle (unique slug).
    pub handle: String,
    /// Product title.
    pub title: String,
    /// Plain text description.
    pub description: String,
    /// HTML description.
    pub description_html: String,
    /// Whether any variant is available.
    pub available_for_sale: bool,
    /// Product options; derived from variants when the backend has none.
    pub options: Vec<ProductOption>,
    /// Price range across variants.
    pub price_range: PriceRange,
    /// Product variants.
    pub variants: Vec<ProductVariant>,
    /// Featured image (placeholder with empty URL when there are none).
    pub featured_image: Image,
    /// All product images.
    pub images: Vec<Image>,
    /// SEO metadata.
    pub seo: Seo,
    /// Product tags.
    pub tags: Vec<String>,
    /// Last update timestamp.
    pub updated_at: Option<String>,
    /// Backend metadata blob (used for collection filtering).
    pub metadata: serde_json::Value,
}
