use serde::Serialize;

use super::{Amount, PriceType, ValidationError};

/// One row of the ingredient list.
///
/// `computed_price` is derived from the other fields and cannot be set directly.
/// Records held by the ledger keep it at zero; only copies returned by a pricing
/// pass (see [`IngredientRecord::priced`]) carry a real value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientRecord {
    pub name: String,
    /// Grams for `PerKilogram`, item count for `PerUnit`
    pub quantity: Amount,
    /// Price per kilogram or per unit
    pub unit_price: Amount,
    pub price_type: PriceType,
    computed_price: Amount,
}

impl IngredientRecord {
    /// Build a validated record with a zero price placeholder.
    pub fn new(
        name: impl Into<String>,
        quantity: Amount,
        unit_price: Amount,
        price_type: PriceType,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(ValidationError::InvalidQuantity(quantity));
        }
        if !unit_price.is_finite() || unit_price < 0.0 {
            return Err(ValidationError::InvalidUnitPrice(unit_price));
        }

        Ok(Self {
            name,
            quantity,
            unit_price,
            price_type,
            computed_price: 0.0,
        })
    }

    pub fn computed_price(&self) -> Amount {
        self.computed_price
    }

    /// Copy of this record with `computed_price` recomputed from its fields.
    pub fn priced(&self) -> Self {
        Self {
            computed_price: compute_price(self.quantity, self.unit_price, self.price_type),
            ..self.clone()
        }
    }
}

/// Cost of one ingredient.
/// PerKilogram: unit price is per kg and quantity in grams, so the price is scaled by 1/1000.
/// PerUnit: unit price times item count.
pub fn compute_price(quantity: Amount, unit_price: Amount, price_type: PriceType) -> Amount {
    match price_type {
        PriceType::PerKilogram => (unit_price / 1000.0) * quantity,
        PriceType::PerUnit => unit_price * quantity,
    }
}

/// Sum of the computed prices of all records, ignoring any stored price.
pub fn compute_total(records: &[IngredientRecord]) -> Amount {
    records
        .iter()
        .map(|r| compute_price(r.quantity, r.unit_price, r.price_type))
        .sum()
}
