//! Collection type conversion functions.
//!
//! Storefront collections are backed by two disjoint backend concepts: an
//! explicit collection grouping and the product-category tree. Both map to
//! the same canonical shape; the merge de-duplicates by handle with
//! collections taking precedence.

use mero_closet_core::{Collection, Seo};

use super::super::wire;

/// Which backend concept a collection resolved from, with its id. Needed to
/// filter product queries and to probe for a card image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CollectionRef {
    Collection(String),
    Category(String),
}

/// A canonical collection paired with its backend source.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedCollection {
    pub source: CollectionRef,
    pub collection: Collection,
}

pub(crate) fn map_collection(collection: &wire::Collection) -> ResolvedCollection {
    ResolvedCollection {
        source: CollectionRef::Collection(collection.id.clone()),
        collection: Collection {
            handle: collection.handle.clone(),
            title: collection.title.clone(),
            description: collection.title.clone(),
            path: format!("/search/{}", collection.handle),
            image: None,
            updated_at: collection.updated_at.clone(),
            seo: Seo {
                title: collection.title.clone(),
                description: collection.title.clone(),
            },
        },
    }
}

pub(crate) fn map_category(category: &wire::Category) -> ResolvedCollection {
    let description = category
        .description
        .clone()
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| category.name.clone());

    ResolvedCollection {
        source: CollectionRef::Category(category.id.clone()),
        collection: Collection {
            handle: category.handle.clone(),
            title: category.name.clone(),
            description: description.clone(),
            path: format!("/search/{}", category.handle),
            image: None,
            updated_at: category.updated_at.clone(),
            seo: Seo {
                title: category.name.clone(),
                description,
            },
        },
    }
}

/// Merge collections and categories, de-duplicating by handle.
///
/// Collection entries win on handle collision; within each source the
/// backend order is preserved.
pub(crate) fn merge_collections(
    collections: Vec<ResolvedCollection>,
    categories: Vec<ResolvedCollection>,
) -> Vec<ResolvedCollection> {
    let mut merged = collections;
    for category in categories {
        if !merged
            .iter()
            .any(|entry| entry.collection.handle == category.collection.handle)
        {
            merged.push(category);
        }
    }
    merged
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn collection(id: &str, handle: &str, title: &str) -> wire::Collection {
        wire::Collection {
            id: id.to_string(),
            handle: handle.to_string(),
            title: title.to_string(),
            updated_at: None,
        }
    }

    fn category(id: &str, handle: &str, name: &str) -> wire::Category {
        wire::Category {
            id: id.to_string(),
            handle: handle.to_string(),
            name: name.to_string(),
            description: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_merge_dedupes_by_handle_with_collection_precedence() {
        let collections = vec![map_collection(&collection(
            "pcol_01",
            "new-arrivals",
            "New Arrivals",
        ))];
        let categories = vec![
            map_category(&category("pcat_01", "new-arrivals", "New arrivals (category)")),
            map_category(&category("pcat_02", "abayas", "Abayas")),
        ];

        let merged = merge_collections(collections, categories);
        assert_eq!(merged.len(), 2);

        let new_arrivals = merged
            .iter()
            .find(|c| c.collection.handle == "new-arrivals")
            .unwrap();
        assert_eq!(
            new_arrivals.source,
            CollectionRef::Collection("pcol_01".to_string())
        );
        assert_eq!(new_arrivals.collection.title, "New Arrivals");
    }

    #[test]
    fn test_category_maps_path_and_description() {
        let mapped = map_category(&category("pcat_01", "abayas", "Abayas"));
        assert_eq!(mapped.collection.path, "/search/abayas");
        // Description falls back to the name.
        assert_eq!(mapped.collection.description, "Abayas");
    }

    #[test]
    fn test_category_keeps_explicit_description() {
        let mut raw = category("pcat_01", "abayas", "Abayas");
        raw.description = Some("Gulf luxury abayas".to_string());
        let mapped = map_category(&raw);
        assert_eq!(mapped.collection.description, "Gulf luxury abayas");
    }
}
