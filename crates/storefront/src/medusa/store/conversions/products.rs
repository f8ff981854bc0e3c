//! Product type conversion functions.

use rust_decimal::Decimal;

use mero_closet_core::{
    Image, Money, PriceRange, Product, ProductOption, ProductVariant, Seo,
};

use super::super::wire;

/// Maximum length of the derived SEO description.
const SEO_DESCRIPTION_LENGTH: usize = 150;

/// Pick a variant's price for the requested currency.
///
/// Searches the variant's price list (falling back to `price_set.prices`)
/// for a currency match, case-insensitively; when none matches, falls back
/// to the pre-calculated price, defaulting to zero. The result is always
/// stamped with the resolved currency code.
pub(crate) fn pick_variant_price(variant: &wire::Variant, currency_code: &str) -> Money {
    let prices: &[wire::Price] = variant
        .prices
        .as_deref()
        .or_else(|| variant.price_set.as_ref().map(|set| set.prices.as_slice()))
        .unwrap_or(&[]);

    let matched = prices
        .iter()
        .find(|p| p.currency_code.eq_ignore_ascii_case(currency_code));

    let amount = matched
        .and_then(|p| p.amount.as_ref().map(wire::RawAmount::as_amount_string))
        .or_else(|| {
            variant
                .calculated_price
                .as_ref()
                .and_then(wire::CalculatedPrice::amount_string)
        });

    let code = matched
        .map(|p| p.currency_code.clone())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| currency_code.to_string());

    Money::new(amount.as_deref(), &code)
}

/// Map a raw variant into the canonical shape.
pub(crate) fn map_variant(variant: &wire::Variant, currency_code: &str) -> ProductVariant {
    ProductVariant {
        id: variant.id.clone().unwrap_or_default(),
        title: variant
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Default".to_string()),
        available_for_sale: true,
        selected_options: wire::selected_options(variant.options.as_ref()),
        price: pick_variant_price(variant, currency_code),
    }
}

/// Min/max of variant prices as decimal strings; no variants yields zeros.
fn price_bounds(variants: &[ProductVariant]) -> (String, String) {
    let mut bounds: Option<(Decimal, Decimal)> = None;
    for variant in variants {
        let amount = variant.price.decimal();
        bounds = Some(match bounds {
            None => (amount, amount),
            Some((lo, hi)) => (lo.min(amount), hi.max(amount)),
        });
    }
    bounds.map_or_else(
        || ("0".to_string(), "0".to_string()),
        |(lo, hi)| (lo.to_string(), hi.to_string()),
    )
}

/// Derive the product option set from the variants' selected options.
///
/// Variants are walked in their given order; option names and values keep
/// first-seen insertion order, with duplicate values collapsed.
fn derive_options(variants: &[ProductVariant]) -> Vec<ProductOption> {
    let mut options: Vec<ProductOption> = Vec::new();
    for variant in variants {
        for selected in &variant.selected_options {
            match options.iter_mut().find(|o| o.name == selected.name) {
                Some(existing) => {
                    if !existing.values.contains(&selected.value) {
                        existing.values.push(selected.value.clone());
                    }
                }
                None => options.push(ProductOption {
                    id: selected.name.clone(),
                    name: selected.name.clone(),
                    values: vec![selected.value.clone()],
                }),
            }
        }
    }
    options
}

/// Map a raw product into the canonical shape.
pub(crate) fn map_product(product: &wire::Product, currency_code: &str) -> Product {
    let images: Vec<Image> = product
        .images
        .iter()
        .filter_map(|img| img.url.clone())
        .map(|url| Image::with_url(url, product.title.clone()))
        .collect();

    let variants: Vec<ProductVariant> = product
        .variants
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(|v| map_variant(v, currency_code))
        .collect();

    let (min, max) = price_bounds(&variants);

    // Explicit product-level options win; otherwise derive from variants.
    let mut options: Vec<ProductOption> = product
        .options
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .filter_map(|o| {
            let name = o.title.clone()?;
            Some(ProductOption {
                id: o.id.clone().unwrap_or_else(|| name.clone()),
                name,
                values: o.values.iter().map(wire::OptionValue::text).collect(),
            })
        })
        .collect();
    if options.is_empty() && !variants.is_empty() {
        options = derive_options(&variants);
    }

    let description = product.description.clone().unwrap_or_default();
    let featured_image = images
        .first()
        .cloned()
        .unwrap_or_else(|| Image::placeholder(product.title.clone()));

    Product {
        id: product.id.clone(),
        handle: product.handle.clone(),
        title: product.title.clone(),
        description: description.clone(),
        description_html: description.clone(),
        available_for_sale: true,
        options,
        price_range: PriceRange {
            min_variant_price: Money::new(Some(&min), currency_code),
            max_variant_price: Money::new(Some(&max), currency_code),
        },
        variants,
        featured_image,
        images,
        seo: Seo {
            title: product.title.clone(),
            description: description.chars().take(SEO_DESCRIPTION_LENGTH).collect(),
        },
        tags: Vec::new(),
        updated_at: product.updated_at.clone(),
        metadata: product
            .metadata
            .clone()
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn variant_from(value: serde_json::Value) -> wire::Variant {
        serde_json::from_value(value).unwrap()
    }

    fn product_from(value: serde_json::Value) -> wire::Product {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_pick_price_matches_currency_case_insensitively() {
        let variant = variant_from(json!({
            "id": "variant_01",
            "prices": [
                {"amount": 40, "currency_code": "usd"},
                {"amount": "12.500", "currency_code": "BHD"}
            ]
        }));

        let price = pick_variant_price(&variant, "bhd");
        assert_eq!(price.amount, "12.500");
        assert_eq!(price.currency_code, "BHD");
    }

    #[test]
    fn test_pick_price_falls_back_to_calculated() {
        let variant = variant_from(json!({
            "id": "variant_01",
            "prices": [{"amount": 40, "currency_code": "usd"}],
            "calculated_price": {"calculated_amount": 15}
        }));

        let price = pick_variant_price(&variant, "bhd");
        assert_eq!(price.amount, "15");
        assert_eq!(price.currency_code, "BHD");
    }

    #[test]
    fn test_pick_price_defaults_to_zero() {
        let variant = variant_from(json!({"id": "variant_01"}));
        let price = pick_variant_price(&variant, "bhd");
        assert_eq!(price.amount, "0");
        assert_eq!(price.currency_code, "BHD");
    }

    #[test]
    fn test_pick_price_reads_price_set() {
        let variant = variant_from(json!({
            "id": "variant_01",
            "price_set": {"prices": [{"amount": 9, "currency_code": "bhd"}]}
        }));
        assert_eq!(pick_variant_price(&variant, "bhd").amount, "9");
    }

    #[test]
    fn test_map_variant_without_options_never_throws() {
        let variant = variant_from(json!({"id": "variant_01", "title": "Default"}));
        let mapped = map_variant(&variant, "bhd");
        assert!(mapped.selected_options.is_empty());
        assert!(mapped.available_for_sale);
    }

    #[test]
    fn test_map_variant_defaults_title() {
        let variant = variant_from(json!({"id": "variant_01"}));
        assert_eq!(map_variant(&variant, "bhd").title, "Default");
    }

    #[test]
    fn test_price_range_zero_variants() {
        let product = product_from(json!({
            "id": "prod_01",
            "handle": "empty",
            "title": "Empty"
        }));

        let mapped = map_product(&product, "bhd");
        assert_eq!(mapped.price_range.min_variant_price.amount, "0");
        assert_eq!(mapped.price_range.max_variant_price.amount, "0");
    }

    #[test]
    fn test_price_range_min_le_max() {
        let product = product_from(json!({
            "id": "prod_01",
            "handle": "abaya",
            "title": "Abaya",
            "variants": [
                {"id": "v1", "prices": [{"amount": "18.5", "currency_code": "bhd"}]},
                {"id": "v2", "prices": [{"amount": "12.5", "currency_code": "bhd"}]},
                {"id": "v3", "prices": [{"amount": "25", "currency_code": "bhd"}]}
            ]
        }));

        let mapped = map_product(&product, "bhd");
        assert_eq!(mapped.price_range.min_variant_price.amount, "12.5");
        assert_eq!(mapped.price_range.max_variant_price.amount, "25");
        assert!(
            mapped.price_range.min_variant_price.decimal()
                <= mapped.price_range.max_variant_price.decimal()
        );
        assert_eq!(
            mapped.price_range.min_variant_price.currency_code,
            mapped.price_range.max_variant_price.currency_code
        );
    }

    #[test]
    fn test_options_derived_from_variants_preserve_order() {
        let product = product_from(json!({
            "id": "prod_01",
            "handle": "abaya",
            "title": "Abaya",
            "variants": [
                {"id": "v1", "options": {"Size": "S"}},
                {"id": "v2", "options": {"Size": "M"}},
                {"id": "v3", "options": {"Size": "S"}}
            ]
        }));

        let mapped = map_product(&product, "bhd");
        assert_eq!(mapped.options.len(), 1);
        assert_eq!(mapped.options[0].name, "Size");
        // Duplicates collapse, first-seen order preserved.
        assert_eq!(mapped.options[0].values, vec!["S", "M"]);
    }

    #[test]
    fn test_explicit_options_win_over_derivation() {
        let product = product_from(json!({
            "id": "prod_01",
            "handle": "abaya",
            "title": "Abaya",
            "options": [
                {"id": "opt_01", "title": "Size", "values": [{"value": "S"}, {"value": "M"}]}
            ],
            "variants": [
                {"id": "v1", "options": {"Color": "Black"}}
            ]
        }));

        let mapped = map_product(&product, "bhd");
        assert_eq!(mapped.options.len(), 1);
        assert_eq!(mapped.options[0].id, "opt_01");
        assert_eq!(mapped.options[0].values, vec!["S", "M"]);
    }

    #[test]
    fn test_featured_image_falls_back_to_placeholder() {
        let product = product_from(json!({
            "id": "prod_01",
            "handle": "abaya",
            "title": "Abaya"
        }));

        let mapped = map_product(&product, "bhd");
        assert_eq!(mapped.featured_image.url, "");
        assert_eq!(mapped.featured_image.alt_text, "Abaya");
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let product = product_from(json!({
            "id": "prod_01",
            "handle": "abaya",
            "title": "Abaya",
            "description": "Classic black abaya",
            "images": [{"url": "https://cdn.test/abaya.jpg"}],
            "variants": [
                {
                    "id": "v1",
                    "title": "S",
                    "options": [{"option": {"title": "Size"}, "value": "S"}],
                    "prices": [{"amount": "12.500", "currency_code": "bhd"}]
                }
            ]
        }));

        let first = map_product(&product, "bhd");
        let second = map_product(&product, "bhd");
        assert_eq!(first, second);
    }
}
