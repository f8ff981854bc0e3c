//! Cart type conversion functions.

use rust_decimal::Decimal;

use mero_closet_core::{
    Cart, CartCost, CartLine, CartLineCost, CartMerchandise, CartMerchandiseProduct, Image, Money,
    PaymentSession,
};

use super::super::wire;

/// Map a raw cart into the canonical shape.
///
/// `currency_code` is the resolved region currency; the cart's own currency
/// wins when the backend reports one.
pub(crate) fn map_cart(cart: &wire::Cart, currency_code: &str) -> Cart {
    let cart_currency = cart
        .currency_code
        .clone()
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| currency_code.to_string());

    let lines: Vec<CartLine> = cart
        .items
        .iter()
        .map(|item| map_cart_line(item, &cart_currency))
        .collect();
    let total_quantity = lines.iter().map(|line| line.quantity).sum();

    let total = cart.total.as_ref().map(wire::RawAmount::as_amount_string);
    let subtotal = cart
        .subtotal
        .as_ref()
        .map(wire::RawAmount::as_amount_string)
        .or_else(|| total.clone());
    let tax = cart
        .tax_total
        .as_ref()
        .map(wire::RawAmount::as_amount_string);

    Cart {
        id: cart.id.clone(),
        checkout_url: format!("/checkout?cart_id={}", urlencoding::encode(&cart.id)),
        cost: CartCost {
            subtotal_amount: Money::new(subtotal.as_deref(), &cart_currency),
            total_amount: Money::new(total.as_deref(), &cart_currency),
            total_tax_amount: Money::new(tax.as_deref(), &cart_currency),
        },
        lines,
        total_quantity,
        payment_session: map_payment_session(cart.payment_collection.as_ref()),
    }
}

fn map_payment_session(
    collection: Option<&wire::PaymentCollection>,
) -> Option<PaymentSession> {
    collection
        .and_then(|pc| pc.payment_sessions.first())
        .map(|session| PaymentSession {
            provider_id: session.provider_id.clone().unwrap_or_default(),
            client_secret: session
                .data
                .as_ref()
                .and_then(|data| data.client_secret.clone()),
        })
}

fn map_cart_line(item: &wire::LineItem, cart_currency: &str) -> CartLine {
    let variant = item.variant.as_ref();
    let product = variant
        .and_then(|v| v.product.as_ref())
        .or(item.product.as_ref());

    // Display image: product thumbnail, then the product's first image, then
    // the variant-embedded product's first image, else empty.
    let image_url = product
        .and_then(|p| p.thumbnail.clone())
        .filter(|url| !url.is_empty())
        .or_else(|| product.and_then(|p| p.images.first().and_then(|i| i.url.clone())))
        .or_else(|| {
            variant
                .and_then(|v| v.product.as_ref())
                .and_then(|p| p.images.first().and_then(|i| i.url.clone()))
        })
        .unwrap_or_default();

    let quantity = item.quantity.unwrap_or(0);

    // Line total: explicit total, then explicit subtotal, else unit price
    // times quantity.
    let total_amount = item
        .total
        .as_ref()
        .map(wire::RawAmount::as_amount_string)
        .or_else(|| item.subtotal.as_ref().map(wire::RawAmount::as_amount_string))
        .unwrap_or_else(|| {
            let unit = item
                .unit_price
                .as_ref()
                .map(wire::RawAmount::decimal)
                .unwrap_or_default();
            (unit * Decimal::from(quantity)).to_string()
        });

    let line_currency = item
        .currency_code
        .clone()
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| cart_currency.to_string());

    let product_title = product
        .and_then(|p| p.title.clone())
        .unwrap_or_default();

    CartLine {
        id: item.id.clone(),
        quantity,
        cost: CartLineCost {
            total_amount: Money::new(Some(&total_amount), &line_currency),
        },
        merchandise: CartMerchandise {
            id: variant
                .and_then(|v| v.id.clone())
                .or_else(|| item.variant_id.clone())
                .unwrap_or_default(),
            title: variant
                .and_then(|v| v.title.clone())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Default".to_string()),
            selected_options: variant
                .map(|v| wire::selected_options(v.options.as_ref()))
                .unwrap_or_default(),
            product: CartMerchandiseProduct {
                id: product.and_then(|p| p.id.clone()).unwrap_or_default(),
                handle: product.and_then(|p| p.handle.clone()).unwrap_or_default(),
                title: product_title.clone(),
                featured_image: Image::with_url(image_url, product_title),
            },
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cart_from(value: serde_json::Value) -> wire::Cart {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_line_totals_fall_back_to_unit_price_times_quantity() {
        let cart = cart_from(json!({
            "id": "cart_01",
            "currency_code": "bhd",
            "items": [
                {"id": "line_a", "quantity": 2, "unit_price": 10,
                 "variant": {"id": "var_a", "title": "S"}},
                {"id": "line_b", "quantity": 1, "unit_price": 5,
                 "variant": {"id": "var_b", "title": "M"}}
            ]
        }));

        let mapped = map_cart(&cart, "bhd");
        assert_eq!(mapped.total_quantity, 3);
        assert_eq!(mapped.lines[0].cost.total_amount.amount, "20");
        assert_eq!(mapped.lines[1].cost.total_amount.amount, "5");
    }

    #[test]
    fn test_explicit_line_total_wins() {
        let cart = cart_from(json!({
            "id": "cart_01",
            "items": [
                {"id": "line_a", "quantity": 2, "unit_price": 10, "total": 18}
            ]
        }));

        let mapped = map_cart(&cart, "bhd");
        assert_eq!(mapped.lines[0].cost.total_amount.amount, "18");
    }

    #[test]
    fn test_cart_totals_and_subtotal_default() {
        let cart = cart_from(json!({
            "id": "cart_01",
            "currency_code": "bhd",
            "items": [],
            "total": "25.000",
            "tax_total": "1.250"
        }));

        let mapped = map_cart(&cart, "usd");
        assert_eq!(mapped.cost.total_amount.amount, "25.000");
        // Subtotal defaults to the total when the backend omits it.
        assert_eq!(mapped.cost.subtotal_amount.amount, "25.000");
        assert_eq!(mapped.cost.total_tax_amount.amount, "1.250");
        // The cart's own currency wins over the region currency.
        assert_eq!(mapped.cost.total_amount.currency_code, "BHD");
    }

    #[test]
    fn test_empty_cart_maps_to_zero_totals() {
        let cart = cart_from(json!({"id": "cart_01"}));
        let mapped = map_cart(&cart, "bhd");
        assert_eq!(mapped.total_quantity, 0);
        assert!(mapped.lines.is_empty());
        assert_eq!(mapped.cost.total_amount.amount, "0");
        assert_eq!(mapped.checkout_url, "/checkout?cart_id=cart_01");
    }

    #[test]
    fn test_line_image_fallback_chain() {
        let cart = cart_from(json!({
            "id": "cart_01",
            "items": [
                {"id": "l1", "quantity": 1,
                 "variant": {"id": "v1", "product": {"thumbnail": "https://cdn.test/thumb.jpg",
                     "images": [{"url": "https://cdn.test/first.jpg"}]}}},
                {"id": "l2", "quantity": 1,
                 "variant": {"id": "v2", "product": {"images": [{"url": "https://cdn.test/first.jpg"}]}}},
                {"id": "l3", "quantity": 1, "variant": {"id": "v3"}}
            ]
        }));

        let mapped = map_cart(&cart, "bhd");
        let urls: Vec<&str> = mapped
            .lines
            .iter()
            .map(|l| l.merchandise.product.featured_image.url.as_str())
            .collect();
        assert_eq!(
            urls,
            vec!["https://cdn.test/thumb.jpg", "https://cdn.test/first.jpg", ""]
        );
    }

    #[test]
    fn test_merchandise_falls_back_to_variant_id_field() {
        let cart = cart_from(json!({
            "id": "cart_01",
            "items": [{"id": "l1", "quantity": 1, "variant_id": "var_flat"}]
        }));

        let mapped = map_cart(&cart, "bhd");
        assert_eq!(mapped.lines[0].merchandise.id, "var_flat");
        assert_eq!(mapped.lines[0].merchandise.title, "Default");
    }

    #[test]
    fn test_payment_session_extraction() {
        let cart = cart_from(json!({
            "id": "cart_01",
            "payment_collection": {
                "id": "paycol_01",
                "payment_sessions": [
                    {"provider_id": "pp_stripe_stripe",
                     "data": {"client_secret": "pi_secret_123"}}
                ]
            }
        }));

        let session = map_cart(&cart, "bhd").payment_session.unwrap();
        assert_eq!(session.provider_id, "pp_stripe_stripe");
        assert_eq!(session.client_secret.unwrap(), "pi_secret_123");
    }

    #[test]
    fn test_checkout_url_is_percent_encoded() {
        let cart = cart_from(json!({"id": "cart 01"}));
        assert_eq!(
            map_cart(&cart, "bhd").checkout_url,
            "/checkout?cart_id=cart%2001"
        );
    }
}
