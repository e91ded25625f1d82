mod amount;
mod ingredient;
mod price_type;
mod validation;

pub use amount::*;
pub use ingredient::*;
pub use price_type::*;
pub use validation::*;
