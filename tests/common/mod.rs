// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use recipe_cost::IngredientLedger;
use recipe_cost::domain::PriceType;

/// Float comparison for computed prices
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Test fixture: the flour and egg example recipe
pub struct SampleRecipe;

impl SampleRecipe {
    /// 500 g of flour at 2.00/kg and 3 eggs at 0.50 each
    pub fn flour_and_eggs() -> IngredientLedger {
        let mut ledger = IngredientLedger::new();
        ledger
            .add("Flour", 500.0, 2.00, PriceType::PerKilogram)
            .unwrap();
        ledger.add("Egg", 3.0, 0.50, PriceType::PerUnit).unwrap();
        ledger
    }

    /// CSV input equivalent to `flour_and_eggs`
    pub fn csv() -> &'static str {
        "name,quantity,unit_price,type\nFlour,500,2.00,kg\nEgg,3,0.50,unit\n"
    }
}
