//! Key encoding utilities for `RocksDB`.

use rzp_subs_core::ProductId;

/// Create a product plan key from a product ID.
///
/// Big-endian encoding keeps keys in numeric order.
#[must_use]
pub fn product_plan_key(product_id: &ProductId) -> [u8; 8] {
    product_id.to_be_bytes()
}
