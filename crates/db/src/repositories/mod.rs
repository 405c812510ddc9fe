//! Repository implementations of the core collaborator traits.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Each one implements the corresponding trait from
//! `zakath-core`, so the engine never sees a `DatabaseConnection`.

pub mod calculation;
pub mod currency;
pub mod exchange_rate;
pub mod records;

pub use calculation::CalculationRepository;
pub use currency::CurrencyRepository;
pub use exchange_rate::ExchangeRateRepository;
pub use records::{
    CreateAssetInput, CreateExpenseInput, CreateIncomeInput, FinancialRecordRepository,
};
