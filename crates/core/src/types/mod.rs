//! Canonical storefront types for Mero Closet.
//!
//! These are the UI-facing shapes, independent of the backend's wire
//! representation.

pub mod cart;
pub mod collection;
pub mod content;
pub mod money;
pub mod product;
pub mod region;

pub use cart::*;
pub use collection::Collection;
pub use content::{Menu, Page};
pub use money::{Money, PriceRange};
pub use product::*;
pub use region::Region;
