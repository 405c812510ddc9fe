//! Initial database migration.
//!
//! Creates the currency, financial record, madhab rule, and calculation
//! snapshot tables, and seeds the currency master and default madhab
//! rules.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(CURRENCIES_SQL).await?;
        db.execute_unprepared(EXCHANGE_RATES_SQL).await?;
        db.execute_unprepared(CURRENT_ASSETS_SQL).await?;
        db.execute_unprepared(INCOME_DETAILS_SQL).await?;
        db.execute_unprepared(EXPENSE_DETAILS_SQL).await?;
        db.execute_unprepared(MADHAB_RULES_SQL).await?;
        db.execute_unprepared(ZAKATH_CALCULATIONS_SQL).await?;

        db.execute_unprepared(SEED_CURRENCIES_SQL).await?;
        db.execute_unprepared(SEED_MADHAB_RULES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared("DROP TABLE IF EXISTS zakath_calculations").await?;
        db.execute_unprepared("DROP TABLE IF EXISTS madhab_rules").await?;
        db.execute_unprepared("DROP TABLE IF EXISTS expense_details").await?;
        db.execute_unprepared("DROP TABLE IF EXISTS income_details").await?;
        db.execute_unprepared("DROP TABLE IF EXISTS current_assets").await?;
        db.execute_unprepared("DROP TABLE IF EXISTS exchange_rates").await?;
        db.execute_unprepared("DROP TABLE IF EXISTS currencies").await?;

        Ok(())
    }
}

const CURRENCIES_SQL: &str = r"
CREATE TABLE currencies (
    id SERIAL PRIMARY KEY,
    code CHAR(3) NOT NULL UNIQUE,
    name VARCHAR(100) NOT NULL,
    symbol VARCHAR(10) NOT NULL,
    decimal_places INTEGER NOT NULL DEFAULT 2,
    is_active BOOLEAN NOT NULL DEFAULT TRUE
);
";

const EXCHANGE_RATES_SQL: &str = r"
CREATE TABLE exchange_rates (
    id SERIAL PRIMARY KEY,
    from_currency CHAR(3) NOT NULL,
    to_currency CHAR(3) NOT NULL,
    rate NUMERIC(19, 6) NOT NULL CHECK (rate > 0),
    effective_at TIMESTAMPTZ NOT NULL,
    source VARCHAR(20) NOT NULL DEFAULT 'System',
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    CHECK (from_currency <> to_currency)
);

CREATE INDEX idx_exchange_rates_pair
    ON exchange_rates (from_currency, to_currency, effective_at DESC)
    WHERE is_active;
";

const CURRENT_ASSETS_SQL: &str = r"
CREATE TABLE current_assets (
    id SERIAL PRIMARY KEY,
    user_id INTEGER NOT NULL,
    item_name VARCHAR(200) NOT NULL,
    category_name VARCHAR(100) NOT NULL,
    category_tag VARCHAR(20),
    current_value NUMERIC(19, 4) NOT NULL,
    quantity NUMERIC(19, 4) NOT NULL DEFAULT 1,
    currency_code CHAR(3),
    acquired_at TIMESTAMPTZ NOT NULL,
    hijri_acquired VARCHAR(50),
    is_zakath_applicable BOOLEAN NOT NULL DEFAULT TRUE
);

CREATE INDEX idx_current_assets_user ON current_assets (user_id);
";

const INCOME_DETAILS_SQL: &str = r"
CREATE TABLE income_details (
    id SERIAL PRIMARY KEY,
    user_id INTEGER NOT NULL,
    amount NUMERIC(19, 4) NOT NULL,
    currency_code CHAR(3),
    received_at TIMESTAMPTZ NOT NULL,
    hijri_received VARCHAR(50),
    source_name VARCHAR(200),
    is_zakath_eligible BOOLEAN NOT NULL DEFAULT TRUE
);

CREATE INDEX idx_income_details_user_received
    ON income_details (user_id, received_at);
";

const EXPENSE_DETAILS_SQL: &str = r"
CREATE TABLE expense_details (
    id SERIAL PRIMARY KEY,
    user_id INTEGER NOT NULL,
    amount NUMERIC(19, 4) NOT NULL,
    currency_code CHAR(3),
    transacted_at TIMESTAMPTZ NOT NULL,
    hijri_transacted VARCHAR(50)
);

CREATE INDEX idx_expense_details_user_transacted
    ON expense_details (user_id, transacted_at);
";

const MADHAB_RULES_SQL: &str = r"
CREATE TABLE madhab_rules (
    id SERIAL PRIMARY KEY,
    madhab_id INTEGER NOT NULL,
    rule_type VARCHAR(20) NOT NULL,
    nisab_value NUMERIC(19, 4) NOT NULL,
    zakath_percentage NUMERIC(7, 4) NOT NULL,
    hawl_period_days INTEGER NOT NULL DEFAULT 354,
    is_active BOOLEAN NOT NULL DEFAULT TRUE
);

CREATE INDEX idx_madhab_rules_madhab ON madhab_rules (madhab_id) WHERE is_active;
";

const ZAKATH_CALCULATIONS_SQL: &str = r"
CREATE TABLE zakath_calculations (
    id SERIAL PRIMARY KEY,
    user_id INTEGER NOT NULL,
    calculated_at TIMESTAMPTZ NOT NULL,
    hijri_label VARCHAR(50),
    total_assets NUMERIC(19, 4) NOT NULL,
    total_liabilities NUMERIC(19, 4) NOT NULL,
    nisab_threshold NUMERIC(19, 4) NOT NULL,
    zakath_amount NUMERIC(19, 4) NOT NULL,
    zakath_percentage NUMERIC(7, 4) NOT NULL,
    cash_total NUMERIC(19, 4) NOT NULL DEFAULT 0,
    gold_total NUMERIC(19, 4) NOT NULL DEFAULT 0,
    silver_total NUMERIC(19, 4) NOT NULL DEFAULT 0,
    investments_total NUMERIC(19, 4) NOT NULL DEFAULT 0,
    other_total NUMERIC(19, 4) NOT NULL DEFAULT 0,
    base_currency CHAR(3) NOT NULL,
    notes TEXT
);

CREATE INDEX idx_zakath_calculations_user_calculated
    ON zakath_calculations (user_id, calculated_at DESC);
";

const SEED_CURRENCIES_SQL: &str = r"
INSERT INTO currencies (code, name, symbol, decimal_places) VALUES
    ('USD', 'United States Dollar', '$', 2),
    ('SAR', 'Saudi Riyal', 'SR', 2),
    ('AED', 'UAE Dirham', 'AED', 2),
    ('INR', 'Indian Rupee', 'Rs', 2),
    ('EUR', 'Euro', 'EUR', 2),
    ('GBP', 'Pound Sterling', 'GBP', 2),
    ('KWD', 'Kuwaiti Dinar', 'KD', 3),
    ('QAR', 'Qatari Riyal', 'QR', 2),
    ('OMR', 'Omani Rial', 'OMR', 3),
    ('BHD', 'Bahraini Dinar', 'BD', 3),
    ('MYR', 'Malaysian Ringgit', 'RM', 2),
    ('SGD', 'Singapore Dollar', 'S$', 2)
ON CONFLICT (code) DO NOTHING;
";

const SEED_MADHAB_RULES_SQL: &str = r"
INSERT INTO madhab_rules (madhab_id, rule_type, nisab_value, zakath_percentage, hawl_period_days) VALUES
    (1, 'Silver', 595, 2.5, 354),
    (1, 'Gold', 85, 2.5, 354);
";
