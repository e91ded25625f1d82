// Application layer - the session ledger and what is derived from it.
// Clients (the interactive session, batch pricing, exporters) only talk to
// `IngredientLedger`; pricing rules live in the domain.

pub mod error;
pub mod ledger;
pub mod reporting;

pub use error::*;
pub use ledger::*;
pub use reporting::*;
