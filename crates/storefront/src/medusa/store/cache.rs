//! Cache types for Store API responses.

use mero_closet_core::{Collection, Product};

/// Cached value types.
#[derive(Debug, Clone)]
pub(crate) enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
    Collection(Box<Collection>),
    Collections(Vec<Collection>),
}
