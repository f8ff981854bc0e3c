//! Region selection.
//!
//! The store operates in a single region resolved once per client instance
//! and reused for every request; a new client starts with a fresh cache.

use mero_closet_core::Region;

use super::wire;

/// Region used when the backend has no regions at all, so build-time
/// rendering against an unseeded backend does not crash.
pub(crate) const FALLBACK_REGION_ID: &str = "reg_fallback_gulf";

/// Currency of the fallback region.
pub(crate) const FALLBACK_CURRENCY: &str = "bhd";

pub(crate) fn fallback_region() -> Region {
    Region {
        id: FALLBACK_REGION_ID.to_string(),
        currency_code: FALLBACK_CURRENCY.to_string(),
    }
}

/// Pick the store's operating region.
///
/// Prefers a region whose name contains `name_hint` (case-insensitive) or
/// whose currency equals `default_currency`; otherwise the first region in
/// backend order. Returns `None` only when the list is empty.
pub(crate) fn select_region(
    regions: &[wire::Region],
    name_hint: &str,
    default_currency: &str,
) -> Option<Region> {
    let hint = name_hint.to_lowercase();
    let currency = default_currency.to_lowercase();

    let preferred = regions.iter().find(|r| {
        r.name.to_lowercase().contains(&hint) || r.currency_code.eq_ignore_ascii_case(&currency)
    });

    preferred.or_else(|| regions.first()).map(|r| Region {
        id: r.id.clone(),
        currency_code: if r.currency_code.is_empty() {
            FALLBACK_CURRENCY.to_string()
        } else {
            r.currency_code.to_lowercase()
        },
    })
}
