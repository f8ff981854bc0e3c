//! Request plumbing shared across routes.

pub mod cart_cookie;
