//! Collection type.

use serde::{Deserialize, Serialize};

use super::product::{Image, Seo};

/// A browsable grouping of products.
///
/// Backed by either a Medusa collection or a product category; the adapter
/// merges the two with collections taking precedence on handle collision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// URL handle (unique slug).
    pub handle: String,
    /// Collection title.
    pub title: String,
    /// Plain text description.
    pub description: String,
    /// Storefront path for this collection.
    pub path: String,
    /// Card image, taken from one of the collection's products.
    pub image: Option<Image>,
    /// Last update timestamp.
    pub updated_at: Option<String>,
    /// SEO metadata.
    pub seo: Seo,
}
