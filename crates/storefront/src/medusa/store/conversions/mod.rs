//! Conversions from Medusa wire payloads to canonical storefront types.

mod cart;
mod collections;
mod products;

pub(crate) use cart::map_cart;
pub(crate) use collections::{
    CollectionRef, ResolvedCollection, map_category, map_collection, merge_collections,
};
pub(crate) use products::map_product;
