//! Mero Closet Core - Shared types library.
//!
//! This crate provides the canonical storefront shapes consumed by the UI
//! layer: products, carts, collections, and the money type they share. The
//! Medusa adapter in the `storefront` crate maps raw backend payloads into
//! these types; nothing in here performs I/O.
//!
//! # Modules
//!
//! - [`types`] - Canonical entities (`Money`, `Product`, `Cart`, ...)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
