//! # Cart Snapshots
//!
//! Every ledger record carries a self-describing copy of the cart it was
//! created from. The encoding is JSON:
//!
//! ```json
//! [{"product":{"id":"p1","name":"Gözleme","category":"food","price":500,"in_stock":true},"quantity":2}]
//! ```
//!
//! Only the round trip is load-bearing: `decode(encode(items)) == items`
//! field for field. Category statistics depend on `category` surviving it.

use crate::error::{CoreError, CoreResult};
use crate::types::CartItem;

/// Serializes cart items into the snapshot text stored with a transaction.
pub fn encode(items: &[CartItem]) -> CoreResult<String> {
    serde_json::to_string(items).map_err(|e| CoreError::SnapshotEncoding(e.to_string()))
}

/// Parses a stored snapshot. `id` is the owning transaction, used only
/// for the error message.
pub fn decode(id: i64, snapshot: &str) -> CoreResult<Vec<CartItem>> {
    serde_json::from_str(snapshot).map_err(|e| CoreError::CorruptSnapshot {
        id,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::Product;

    #[test]
    fn test_round_trip_preserves_every_field() {
        let mut sold_out = Product::new("p-2", "Ayran", "drink", Money::from_cents(150));
        sold_out.in_stock = false;

        let items = vec![
            CartItem::new(
                Product::new("p-1", "Gözleme \"Spinat\"", "food", Money::from_cents(500)),
                2,
            ),
            CartItem::new(sold_out, 1),
        ];

        let text = encode(&items).unwrap();
        let decoded = decode(1, &text).unwrap();
        assert_eq!(decoded, items);
        assert!(!decoded[1].product.in_stock);
    }

    #[test]
    fn test_empty_cart_round_trips() {
        let text = encode(&[]).unwrap();
        assert_eq!(text, "[]");
        assert!(decode(1, &text).unwrap().is_empty());
    }

    #[test]
    fn test_category_kept_verbatim() {
        let items = vec![CartItem::new(
            Product::new("p", "Tea", "  Drink ", Money::from_cents(100)),
            1,
        )];
        let decoded = decode(1, &encode(&items).unwrap()).unwrap();
        assert_eq!(decoded[0].product.category, "  Drink ");
    }

    #[test]
    fn test_corrupt_snapshot_names_record() {
        let err = decode(42, "{not json").unwrap_err();
        assert!(matches!(err, CoreError::CorruptSnapshot { id: 42, .. }));
    }
}
