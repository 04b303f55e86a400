//! Initial database migration.
//!
//! Creates the eight Spesa tables and their seed rows. The schema follows
//! the layout the deployed system already uses: serial integer keys except
//! where a natural key exists (unit and expense_category are keyed by name,
//! budget by its unit/category/year triple), `timestamp` columns without
//! time zone, and no foreign-key constraints between tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: DIRECTORY TABLES
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(UNIT_SQL).await?;
        db.execute_unprepared(EXPENSE_CATEGORY_SQL).await?;

        // ============================================================
        // PART 2: EXPENSE FLOW
        // ============================================================
        db.execute_unprepared(EXPENSE_REQUEST_SQL).await?;
        db.execute_unprepared(EXPENSE_ACTIVITY_SQL).await?;
        db.execute_unprepared(PAID_EXPENSE_SQL).await?;

        // ============================================================
        // PART 3: BUDGETS & ANNOUNCEMENTS
        // ============================================================
        db.execute_unprepared(BUDGET_SQL).await?;
        db.execute_unprepared(ANNOUNCEMENT_SQL).await?;

        // ============================================================
        // PART 4: SEED DATA
        // ============================================================
        db.execute_unprepared(SEED_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const USERS_SQL: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    name VARCHAR(256) NOT NULL,
    unit_id VARCHAR(256) NOT NULL,
    role_id VARCHAR(64) NOT NULL,
    password VARCHAR(256) NOT NULL
);
";

const UNIT_SQL: &str = r"
CREATE TABLE IF NOT EXISTS unit (
    name VARCHAR(256) PRIMARY KEY,
    manager_id INT
);
";

const EXPENSE_CATEGORY_SQL: &str = r"
CREATE TABLE IF NOT EXISTS expense_category (
    name VARCHAR(256) PRIMARY KEY
);
";

const EXPENSE_REQUEST_SQL: &str = r"
CREATE TABLE IF NOT EXISTS expense_request (
    id SERIAL PRIMARY KEY,
    user_id INT NOT NULL,
    unit_id VARCHAR(256) NOT NULL,
    amount NUMERIC(7,2) NOT NULL,
    category VARCHAR(256) NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT NOW(),
    is_finalized BOOLEAN NOT NULL DEFAULT FALSE
);
";

const EXPENSE_ACTIVITY_SQL: &str = r"
CREATE TABLE IF NOT EXISTS expense_activity (
    id SERIAL PRIMARY KEY,
    expense_id INT NOT NULL,
    current_state VARCHAR(256) NOT NULL,
    feedback TEXT NOT NULL,
    created_by INT NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT NOW()
);
";

const PAID_EXPENSE_SQL: &str = r"
CREATE TABLE IF NOT EXISTS paid_expense (
    id SERIAL PRIMARY KEY,
    expense_id INT NOT NULL,
    unit_id VARCHAR(256) NOT NULL,
    category VARCHAR(256) NOT NULL,
    amount NUMERIC(7,2) NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT NOW()
);
";

const BUDGET_SQL: &str = r"
CREATE TABLE IF NOT EXISTS budget (
    unit_id VARCHAR(256) NOT NULL,
    expense_category VARCHAR(256) NOT NULL,
    year INT NOT NULL,
    budget_limit NUMERIC NOT NULL,
    threshold_ratio NUMERIC NOT NULL,

    PRIMARY KEY (unit_id, expense_category, year)
);
";

const ANNOUNCEMENT_SQL: &str = r"
CREATE TABLE IF NOT EXISTS announcement (
    id SERIAL PRIMARY KEY,
    message TEXT NOT NULL,
    receiver_id INT,
    created_by INT NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT NOW()
);
";

const SEED_SQL: &str = r"
INSERT INTO unit (name, manager_id)
SELECT 'Executive Management', 0
WHERE NOT EXISTS (SELECT 1 FROM unit WHERE name = 'Executive Management');

INSERT INTO users (name, unit_id, role_id, password)
SELECT 'admin', 'ExecutiveManagement', 'admin', 'password'
WHERE NOT EXISTS (
    SELECT 1 FROM users WHERE name = 'admin' AND role_id = 'admin'
);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS announcement;
DROP TABLE IF EXISTS budget;
DROP TABLE IF EXISTS paid_expense;
DROP TABLE IF EXISTS expense_activity;
DROP TABLE IF EXISTS expense_request;
DROP TABLE IF EXISTS expense_category;
DROP TABLE IF EXISTS unit;
DROP TABLE IF EXISTS users;
";
