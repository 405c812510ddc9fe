//! Multi-currency handling and exchange rates.
//!
//! The conversion path is: a cached rate from the rate store when one is
//! fresh, otherwise a cross-rate through USD computed from the injected
//! static table and written back to the store. Conversion never fails a
//! calculation; unknown currencies degrade to an identity rate.

pub mod conversion;
pub mod error;
pub mod exchange;
pub mod registry;
pub mod service;
pub mod store;
pub mod table;

pub use conversion::{convert_amount, round_presentation};
pub use error::RateError;
pub use exchange::{RateRecord, RateSource};
pub use registry::{CurrencyEntity, CurrencyRegistry};
pub use service::RateService;
pub use store::RateStore;
pub use table::RateTable;
