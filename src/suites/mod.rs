//! The Fake Store checks, one suite per resource.

pub mod carts;
pub mod products;

use crate::testing::Suite;

/// The expected status for every store call.
pub const OK: u16 = 200;

pub use carts::carts;
pub use products::products;

pub fn all() -> Vec<Suite> {
    vec![products(), carts()]
}
