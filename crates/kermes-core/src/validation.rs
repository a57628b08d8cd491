//! # Validation Module
//!
//! Input validation for carts and transactions.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI                                                            │
//! │  └── Quantity steppers never go below 1                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── validate_cart()         before encoding a receipt                 │
//! │  └── validate_transaction()  before appending to the ledger            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SQLite                                                        │
//! │  └── CHECK (total_cents >= 0), CHECK (items_count >= 0)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{checked_cart_total, checked_cart_units, CartItem};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Line Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be at least 1
///
/// ## Example
/// ```rust
/// use kermes_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1).is_ok());
/// assert!(validate_quantity(0).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates every line of a cart.
///
/// ## Rules
/// - Every line passes [`validate_quantity`] and [`validate_price`]
/// - Every line total, the cart total and the unit count fit in an i64
///
/// An empty cart is valid; it prints nothing but the final reset.
pub fn validate_cart(items: &[CartItem]) -> ValidationResult<()> {
    for item in items {
        validate_quantity(item.quantity)?;
        validate_price(item.product.price)?;
    }

    cart_total_checked(items)?;
    if checked_cart_units(items).is_none() {
        return Err(ValidationError::Overflow {
            field: "items_count".to_string(),
        });
    }

    Ok(())
}

fn cart_total_checked(items: &[CartItem]) -> ValidationResult<Money> {
    checked_cart_total(items).ok_or_else(|| ValidationError::Overflow {
        field: "total_amount".to_string(),
    })
}

// =============================================================================
// Transaction Validators
// =============================================================================

/// Validates a payment method tag.
///
/// ## Rules
/// - Must not be blank
pub fn validate_payment_method(method: &str) -> ValidationResult<()> {
    if method.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "payment_method".to_string(),
        });
    }

    Ok(())
}

/// Validates everything the ledger needs before it writes a record.
///
/// ## Rules
/// - Every line passes [`validate_cart`]
/// - `total` is not negative
/// - `total` equals the sum of `price × quantity` (so an empty cart
///   must declare a zero total)
/// - `payment_method` is not blank
pub fn validate_transaction(
    items: &[CartItem],
    total: Money,
    payment_method: &str,
) -> ValidationResult<()> {
    validate_cart(items)?;

    if total.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "total_amount".to_string(),
        });
    }

    let computed = cart_total_checked(items)?;
    if computed != total {
        return Err(ValidationError::TotalMismatch {
            declared: total.cents(),
            computed: computed.cents(),
        });
    }

    validate_payment_method(payment_method)
}

// =============================================================================
// Unit Tests
// =============================================================================
