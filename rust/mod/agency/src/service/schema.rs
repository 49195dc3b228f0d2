use agency_core::ServiceError;
use agency_sql::SQLStore;
use tracing::debug;

/// SQL DDL statements to initialize the agency database schema.
///
/// Each table stores the full JSON document in a `data` TEXT column,
/// with columns extracted for uniqueness, foreign keys, ordering and search.
/// Foreign keys are RESTRICT: the service checks dependents itself first,
/// these only back that check up.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS topic_pages (
        id TEXT PRIMARY KEY,
        data TEXT NOT NULL,
        name TEXT NOT NULL UNIQUE,
        description TEXT
    )",
    "CREATE TABLE IF NOT EXISTS categories (
        id TEXT PRIMARY KEY,
        data TEXT NOT NULL,
        name TEXT NOT NULL UNIQUE,
        description TEXT
    )",
    "CREATE TABLE IF NOT EXISTS ad_types (
        id TEXT PRIMARY KEY,
        data TEXT NOT NULL,
        name TEXT NOT NULL UNIQUE,
        description TEXT
    )",
    "CREATE TABLE IF NOT EXISTS campaigns (
        id TEXT PRIMARY KEY,
        data TEXT NOT NULL,
        name TEXT NOT NULL UNIQUE,
        start_at TEXT NOT NULL,
        end_at TEXT,
        CHECK (end_at IS NULL OR end_at > start_at)
    )",
    "CREATE TABLE IF NOT EXISTS ads (
        id TEXT PRIMARY KEY,
        data TEXT NOT NULL,
        name TEXT NOT NULL,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        price TEXT NOT NULL,
        type_id TEXT NOT NULL REFERENCES ad_types(id) ON DELETE RESTRICT,
        campaign_id TEXT NOT NULL REFERENCES campaigns(id) ON DELETE RESTRICT,
        category_id TEXT NOT NULL REFERENCES categories(id) ON DELETE RESTRICT
    )",
    "CREATE TABLE IF NOT EXISTS web_pages (
        id TEXT PRIMARY KEY,
        data TEXT NOT NULL,
        url TEXT NOT NULL,
        name TEXT NOT NULL,
        topic_id TEXT NOT NULL REFERENCES topic_pages(id) ON DELETE RESTRICT
    )",
    "CREATE TABLE IF NOT EXISTS appearances (
        id TEXT PRIMARY KEY,
        data TEXT NOT NULL,
        ad_id TEXT NOT NULL REFERENCES ads(id) ON DELETE RESTRICT,
        web_page_id TEXT NOT NULL REFERENCES web_pages(id) ON DELETE RESTRICT,
        start_at TEXT NOT NULL,
        end_at TEXT,
        CHECK (end_at IS NULL OR end_at > start_at)
    )",
    "CREATE TABLE IF NOT EXISTS clients (
        id TEXT PRIMARY KEY,
        data TEXT NOT NULL,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT,
        phone TEXT
    )",
    "CREATE TABLE IF NOT EXISTS hirings (
        id TEXT PRIMARY KEY,
        data TEXT NOT NULL,
        ad_id TEXT NOT NULL REFERENCES ads(id) ON DELETE RESTRICT,
        client_id TEXT NOT NULL REFERENCES clients(id) ON DELETE RESTRICT,
        contracted_at TEXT NOT NULL,
        price TEXT NOT NULL
    )",
    // Indexes
    "CREATE INDEX IF NOT EXISTS idx_ad_type ON ads(type_id)",
    "CREATE INDEX IF NOT EXISTS idx_ad_campaign ON ads(campaign_id)",
    "CREATE INDEX IF NOT EXISTS idx_ad_category ON ads(category_id)",
    "CREATE INDEX IF NOT EXISTS idx_page_topic ON web_pages(topic_id)",
    "CREATE INDEX IF NOT EXISTS idx_appearance_ad ON appearances(ad_id)",
    "CREATE INDEX IF NOT EXISTS idx_appearance_page ON appearances(web_page_id)",
    "CREATE INDEX IF NOT EXISTS idx_appearance_start ON appearances(start_at)",
    "CREATE INDEX IF NOT EXISTS idx_client_name ON clients(last_name, first_name)",
    "CREATE INDEX IF NOT EXISTS idx_hiring_ad ON hirings(ad_id)",
    "CREATE INDEX IF NOT EXISTS idx_hiring_client ON hirings(client_id)",
    "CREATE INDEX IF NOT EXISTS idx_hiring_contracted ON hirings(contracted_at)",
];

pub fn init_schema(sql: &dyn SQLStore) -> Result<(), ServiceError> {
    for stmt in SCHEMA {
        sql.exec(stmt, &[])
            .map_err(|e| ServiceError::Storage(format!("schema init failed: {}", e)))?;
    }
    debug!(statements = SCHEMA.len(), "agency schema ready");
    Ok(())
}
