//! Store-side records read from the commerce platform.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{BillingError, Result};
use crate::ids::{OrderId, ProductId};

/// An order placed at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// The order id.
    pub id: OrderId,
    /// Cart line items.
    pub line_items: Vec<LineItem>,
    /// Billing details of the buyer.
    pub customer: CustomerInfo,
}

impl Order {
    /// The single subscription line item of this order.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::UnsupportedCartComposition` unless the order has
    /// exactly one line item bought once. The reported count is the summed
    /// quantity of all lines.
    pub fn subscription_item(&self) -> Result<&LineItem> {
        match self.line_items.as_slice() {
            [item] if item.quantity <= 1 => Ok(item),
            _ => Err(BillingError::UnsupportedCartComposition {
                item_count: self.item_count(),
            }),
        }
    }

    /// Total number of items in the cart, summed over line quantities.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.line_items
            .iter()
            .map(|item| item.quantity as usize)
            .sum()
    }
}

/// One product line in an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// The product bought.
    pub product_id: ProductId,
    /// Product display name.
    pub name: String,
    /// Quantity bought.
    pub quantity: u32,
}

/// Buyer details used to create the gateway customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    #[serde(default)]
    pub contact: Option<String>,
}

/// The store subscription record associated with an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    /// Store period word (`day`, `week`, `month`, `year`).
    pub billing_period: String,
    /// Number of periods between charges.
    pub billing_interval: u32,
    /// Recurring total charged every period.
    pub total: Decimal,
}

/// Subscription settings of a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductTerms {
    /// One-time fee charged at sign-up.
    #[serde(default)]
    pub sign_up_fee: Decimal,
    /// Number of recurring charges; 0 means until cancelled.
    #[serde(default)]
    pub length: u32,
    /// Day of month recurring charges are pinned to, if configured.
    #[serde(default)]
    pub start_day: Option<u32>,
}
