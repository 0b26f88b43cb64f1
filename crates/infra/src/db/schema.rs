//! Items table definition.
//!
//! Every statement is guarded with `IF NOT EXISTS`, so applying the schema to
//! a populated database is a no-op. The CHECK constraints mirror the domain
//! rules and only fire if a writer bypasses `ItemFields::validate`.

pub const CREATE_ITEMS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS items (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL CHECK (length(trim(name)) > 0),
    category    TEXT    NOT NULL CHECK (length(trim(category)) > 0),
    quantity    INTEGER NOT NULL CHECK (quantity >= 0),
    price       REAL    NOT NULL CHECK (price >= 0),
    description TEXT    NOT NULL DEFAULT '',
    created_at  TEXT    NOT NULL,
    updated_at  TEXT    NOT NULL
)
"#;

pub const CREATE_CATEGORY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_items_category ON items(category)";

pub const CREATE_NAME_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_items_name ON items(name)";

/// Statements applied in order by `InventoryStore::initialize`.
pub const SCHEMA: &[&str] = &[CREATE_ITEMS_TABLE, CREATE_CATEGORY_INDEX, CREATE_NAME_INDEX];

/// Column list shared by every item query.
pub const ITEM_COLUMNS: &str =
    "id, name, category, quantity, price, description, created_at, updated_at";
