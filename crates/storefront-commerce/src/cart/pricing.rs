//! Order summary calculations.

use crate::cart::CartState;
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Shipping and tax rules for the order summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingRules {
    /// Orders strictly above this ship free.
    pub free_shipping_threshold: Money,
    /// Shipping charged otherwise.
    pub flat_shipping: Money,
    /// Sales tax, in percent of the subtotal.
    pub tax_rate_percent: f64,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Money::new(5000),
            flat_shipping: Money::new(499),
            tax_rate_percent: 7.0,
        }
    }
}

/// Totals shown next to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    /// subtotal + shipping + tax.
    pub grand_total: Money,
    /// Units in the cart.
    pub item_count: i64,
}

impl OrderSummary {
    /// Summarize a cart. An empty cart has no shipping charge.
    pub fn calculate(cart: &CartState, rules: &PricingRules) -> Result<Self, CommerceError> {
        let subtotal = cart.total_amount();
        let shipping = if cart.is_empty() || subtotal > rules.free_shipping_threshold {
            Money::zero()
        } else {
            rules.flat_shipping
        };
        let tax = subtotal.percentage(rules.tax_rate_percent);
        let grand_total =
            Money::try_sum([subtotal, shipping, tax]).ok_or(CommerceError::Overflow)?;

        Ok(Self {
            subtotal,
            shipping,
            tax,
            grand_total,
            item_count: cart.item_count()?,
        })
    }

    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}
