//! SQLite-backed inventory store.
//!
//! `InventoryStore` owns the `items` table. It is the single writer of item
//! state and the only place item invariants are enforced: every mutating
//! operation validates its input before anything is written, and each write
//! is atomic.

use std::str::FromStr;

use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use stockroom_core::{DomainError, ItemId};
use stockroom_inventory::{InventoryStats, Item, ItemFields, ItemFilter};

use super::error::{StoreError, StoreResult};
use super::schema::{ITEM_COLUMNS, SCHEMA};

/// Inventory store over an SQLite connection pool.
///
/// ## Thread Safety
///
/// `SqlitePool` is `Send + Sync` and cheap to clone; share the store behind an
/// `Arc` (or clone it) across tasks. Concurrent writers are serialized by
/// SQLite's own locking, no extra locking happens here.
///
/// ## Ordering and matching
///
/// - listings are ordered by `name` with SQLite's `BINARY` collation
///   (byte order, so upper case sorts before lower case), ties broken by id
/// - the category filter is an exact, case-sensitive comparison
/// - the search filter is a substring match over name and description that
///   ignores ASCII case
#[derive(Debug, Clone)]
pub struct InventoryStore {
    pool: SqlitePool,
}

impl InventoryStore {
    /// Open (creating if missing) the database at `url`, e.g.
    /// `sqlite://inventory.db` or `sqlite::memory:`.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = if is_memory_url(url) {
            // An in-memory database lives as long as its connection; pin one.
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options.journal_mode(SqliteJournalMode::Wal))
                .await?
        };

        tracing::debug!(url, "opened inventory database");
        Ok(Self { pool })
    }

    /// [`connect`](Self::connect) followed by [`initialize`](Self::initialize).
    pub async fn open(url: &str) -> StoreResult<Self> {
        let store = Self::connect(url).await?;
        store.initialize().await?;
        Ok(store)
    }

    /// Fresh, initialized, private in-memory store.
    pub async fn in_memory() -> StoreResult<Self> {
        Self::open("sqlite::memory:").await
    }

    /// Ensure the items table and its indexes exist. Idempotent; never
    /// touches existing rows.
    pub async fn initialize(&self) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;
        for statement in SCHEMA {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;

        tracing::info!("inventory schema ready");
        Ok(())
    }

    /// Validate and insert a new item. Returns the stored record, including
    /// its freshly assigned id.
    #[tracing::instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_item(&self, input: ItemFields) -> StoreResult<Item> {
        let fields = input.validate()?;
        let now = now();
        let stamp = format_timestamp(now);

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO items (name, category, quantity, price, description, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.category)
        .bind(fields.quantity)
        .bind(fields.price)
        .bind(&fields.description)
        .bind(&stamp)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        let id = ItemId::new(result.last_insert_rowid());
        tracing::info!(%id, category = %fields.category, "item created");

        Ok(assemble(id, fields, now, now))
    }

    /// List items matching `filter`, ordered by name. No match yields an
    /// empty vector.
    pub async fn get_all_items(&self, filter: &ItemFilter) -> StoreResult<Vec<Item>> {
        let mut query =
            QueryBuilder::<Sqlite>::new(format!("SELECT {ITEM_COLUMNS} FROM items WHERE 1 = 1"));

        if let Some(category) = &filter.category {
            query.push(" AND category = ").push_bind(category.clone());
        }

        if let Some(term) = &filter.search {
            let pattern = like_pattern(term);
            query
                .push(" AND (name LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR description LIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\')");
        }

        query.push(" ORDER BY name COLLATE BINARY, id");

        let rows = query.build().fetch_all(&self.pool).await?;
        let items = rows.iter().map(item_from_row).collect::<StoreResult<Vec<_>>>()?;

        tracing::debug!(
            category = filter.category.as_deref(),
            search = filter.search.as_deref(),
            count = items.len(),
            "listed items"
        );
        Ok(items)
    }

    /// Fetch one item. A missing id is `Ok(None)`, not an error.
    pub async fn get_item_by_id(&self, id: ItemId) -> StoreResult<Option<Item>> {
        let row = sqlx::query(&format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(item_from_row).transpose()
    }

    /// Overwrite every mutable field of an existing item.
    ///
    /// `id` and `created_at` are preserved; `updated_at` always moves forward,
    /// even when two updates land within the same clock tick. Fails with
    /// `DomainError::NotFound` when no item has this id.
    ///
    /// The write is a single `UPDATE` guarded by the `updated_at` value read
    /// just before it. If another writer got in between, the row is read again
    /// and the write retried, so concurrent updates never hold a read snapshot
    /// across the write lock.
    #[tracing::instrument(skip(self, input), fields(name = %input.name))]
    pub async fn update_item(&self, id: ItemId, input: ItemFields) -> StoreResult<Item> {
        let fields = input.validate()?;

        loop {
            let row = sqlx::query("SELECT created_at, updated_at FROM items WHERE id = ?1")
                .bind(id.get())
                .fetch_optional(&self.pool)
                .await?;

            let Some(row) = row else {
                tracing::debug!(%id, "update of missing item");
                return Err(DomainError::not_found().into());
            };

            let created_at = parse_timestamp(&row.try_get::<String, _>("created_at")?)?;
            let previous: String = row.try_get("updated_at")?;
            let updated_at = next_timestamp(parse_timestamp(&previous)?);

            let result = sqlx::query(
                r#"
                UPDATE items
                SET name = ?1,
                    category = ?2,
                    quantity = ?3,
                    price = ?4,
                    description = ?5,
                    updated_at = ?6
                WHERE id = ?7 AND updated_at = ?8
                "#,
            )
            .bind(&fields.name)
            .bind(&fields.category)
            .bind(fields.quantity)
            .bind(fields.price)
            .bind(&fields.description)
            .bind(format_timestamp(updated_at))
            .bind(id.get())
            .bind(&previous)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 1 {
                tracing::info!(%id, "item updated");
                return Ok(assemble(id, fields, created_at, updated_at));
            }

            // Changed or deleted since the read; the next pass tells which.
            tracing::debug!(%id, "concurrent update, retrying");
        }
    }

    /// Permanently remove an item. Returns `false` when no row matched; the
    /// caller decides whether that is an error.
    pub async fn delete_item(&self, id: ItemId) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id.get())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        let removed = result.rows_affected() > 0;
        tracing::info!(%id, removed, "item delete");
        Ok(removed)
    }

    /// Distinct categories currently in use, sorted.
    pub async fn get_categories(&self) -> StoreResult<Vec<String>> {
        let rows = sqlx::query(
            "SELECT DISTINCT category FROM items ORDER BY category COLLATE BINARY",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("category").map_err(StoreError::from))
            .collect()
    }

    /// Totals across all items. All fields are zero on an empty store.
    pub async fn get_summary_stats(&self) -> StoreResult<InventoryStats> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*)                   AS total_items,
                COALESCE(SUM(quantity), 0) AS total_quantity,
                TOTAL(quantity * price)    AS total_value,
                COUNT(DISTINCT category)   AS total_categories
            FROM items
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(InventoryStats {
            total_items: row.try_get("total_items")?,
            total_quantity: row.try_get("total_quantity")?,
            total_value: row.try_get("total_value")?,
            total_categories: row.try_get("total_categories")?,
        })
    }

    pub async fn is_empty(&self) -> StoreResult<bool> {
        let row = sqlx::query("SELECT EXISTS (SELECT 1 FROM items) AS populated")
            .fetch_one(&self.pool)
            .await?;
        let populated: i64 = row.try_get("populated")?;
        Ok(populated == 0)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Current time at the precision the store persists.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// A timestamp strictly after `previous`, normally the current time.
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    now().max(previous + Duration::microseconds(1))
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::CorruptRow(format!("invalid timestamp {raw:?}: {e}")))
}

/// `%term%` with LIKE wildcards in `term` escaped by `\`.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn assemble(
    id: ItemId,
    fields: ItemFields,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Item {
    Item {
        id,
        name: fields.name,
        category: fields.category,
        quantity: fields.quantity,
        price: fields.price,
        description: fields.description,
        created_at,
        updated_at,
    }
}

fn item_from_row(row: &SqliteRow) -> StoreResult<Item> {
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(Item {
        id: ItemId::new(row.try_get("id")?),
        name: row.try_get("name")?,
        category: row.try_get("category")?,
        quantity: row.try_get("quantity")?,
        price: row.try_get("price")?,
        description: row.try_get::<Option<String>, _>("description")?.unwrap_or_default(),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use stockroom_inventory::MAX_QUANTITY;

    use super::*;

    async fn store() -> InventoryStore {
        InventoryStore::in_memory().await.unwrap()
    }

    fn fields(name: &str, category: &str, quantity: i64, price: f64) -> ItemFields {
        ItemFields::new(name, category, quantity, price)
    }

    async fn count(store: &InventoryStore) -> i64 {
        store.get_summary_stats().await.unwrap().total_items
    }

    #[tokio::test]
    async fn initialize_is_idempotent_and_keeps_rows() {
        let store = store().await;
        store.create_item(fields("Hammer", "Tools", 1, 9.5)).await.unwrap();

        store.initialize().await.unwrap();
        store.initialize().await.unwrap();

        assert_eq!(count(&store).await, 1);
    }

    #[tokio::test]
    async fn create_then_get_returns_same_fields() {
        let store = store().await;
        let input = fields("Hammer", "Tools", 4, 12.25).with_description("claw");

        let created = store.create_item(input.clone()).await.unwrap();
        let fetched = store.get_item_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.fields(), input);
        assert_eq!(fetched.created_at, fetched.updated_at);
    }

    #[tokio::test]
    async fn create_keeps_text_exactly_as_given() {
        let store = store().await;
        let input = fields(" Hammer ", "Tools", 1, 1.0).with_description("  padded  ");

        let created = store.create_item(input.clone()).await.unwrap();
        let fetched = store.get_item_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(fetched.fields(), input);
    }

    #[tokio::test]
    async fn invalid_create_leaves_store_unchanged() {
        let store = store().await;
        store.create_item(fields("Hammer", "Tools", 1, 1.0)).await.unwrap();

        let rejected = [
            fields("", "Tools", 1, 1.0),
            fields("   ", "Tools", 1, 1.0),
            fields("Saw", "", 1, 1.0),
            fields("Saw", "Tools", -1, 1.0),
            fields("Saw", "Tools", 1, -1.0),
        ];

        for input in rejected {
            let err = store.create_item(input).await.unwrap_err();
            assert!(matches!(err, StoreError::Domain(DomainError::Validation(_))));
        }

        assert_eq!(count(&store).await, 1);
    }

    #[tokio::test]
    async fn missing_item_is_none() {
        let store = store().await;
        assert!(store.get_item_by_id(ItemId::new(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_advances_updated_at() {
        let store = store().await;
        let created = store.create_item(fields("Hammer", "Tools", 1, 1.0)).await.unwrap();

        let changed = fields("Mallet", "Carpentry", 7, 3.5).with_description("rubber");
        let updated = store.update_item(created.id, changed.clone()).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.fields(), changed);

        let fetched = store.get_item_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn back_to_back_updates_keep_advancing() {
        let store = store().await;
        let item = store.create_item(fields("Hammer", "Tools", 1, 1.0)).await.unwrap();

        let mut last = item.updated_at;
        for quantity in 2..6 {
            let updated = store
                .update_item(item.id, fields("Hammer", "Tools", quantity, 1.0))
                .await
                .unwrap();
            assert!(updated.updated_at > last);
            last = updated.updated_at;
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_updates_on_a_file_database_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("inventory.db").display());
        let store = InventoryStore::open(&url).await.unwrap();
        let item = store.create_item(fields("Hammer", "Tools", 0, 1.0)).await.unwrap();

        let mut handles = Vec::new();
        for quantity in 1..=40 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.update_item(item.id, fields("Hammer", "Tools", quantity, 1.0)).await
            }));
        }

        let mut stamps = Vec::new();
        for handle in handles {
            let updated = handle.await.unwrap().unwrap();
            assert!(updated.updated_at > item.updated_at);
            stamps.push(updated.updated_at);
        }

        // Every update got its own strictly later timestamp.
        stamps.sort();
        stamps.dedup();
        assert_eq!(stamps.len(), 40);

        let fetched = store.get_item_by_id(item.id).await.unwrap().unwrap();
        assert_eq!(Some(&fetched.updated_at), stamps.last());
        assert_eq!(count(&store).await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn update_racing_a_delete_is_not_found_or_lands_first() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("inventory.db").display());
        let store = InventoryStore::open(&url).await.unwrap();
        let item = store.create_item(fields("Hammer", "Tools", 1, 1.0)).await.unwrap();

        let updater = {
            let store = store.clone();
            tokio::spawn(async move {
                store.update_item(item.id, fields("Hammer", "Tools", 2, 1.0)).await
            })
        };
        let deleted = store.delete_item(item.id).await.unwrap();

        assert!(deleted);
        match updater.await.unwrap() {
            Ok(updated) => assert_eq!(updated.quantity, 2),
            Err(err) => assert!(matches!(err, StoreError::Domain(DomainError::NotFound))),
        }
        assert!(store.get_item_by_id(item.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_of_missing_item_is_not_found() {
        let store = store().await;
        let existing = store.create_item(fields("Hammer", "Tools", 1, 1.0)).await.unwrap();

        let err = store
            .update_item(ItemId::new(existing.id.get() + 100), fields("Saw", "Tools", 1, 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Domain(DomainError::NotFound)));

        let untouched = store.get_item_by_id(existing.id).await.unwrap().unwrap();
        assert_eq!(untouched, existing);
        assert_eq!(count(&store).await, 1);
    }

    #[tokio::test]
    async fn invalid_update_changes_nothing() {
        let store = store().await;
        let existing = store.create_item(fields("Hammer", "Tools", 1, 1.0)).await.unwrap();

        let err = store
            .update_item(existing.id, fields("Hammer", " ", 1, 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Domain(DomainError::Validation(_))));

        let untouched = store.get_item_by_id(existing.id).await.unwrap().unwrap();
        assert_eq!(untouched, existing);
    }

    #[tokio::test]
    async fn delete_removes_and_is_safe_to_repeat() {
        let store = store().await;
        let item = store.create_item(fields("Hammer", "Tools", 1, 1.0)).await.unwrap();

        assert!(store.delete_item(item.id).await.unwrap());
        assert!(store.get_item_by_id(item.id).await.unwrap().is_none());
        assert!(!store.delete_item(item.id).await.unwrap());
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = store().await;
        let first = store.create_item(fields("A", "X", 1, 1.0)).await.unwrap();
        let second = store.create_item(fields("B", "X", 1, 1.0)).await.unwrap();
        assert!(second.id > first.id);

        store.delete_item(second.id).await.unwrap();
        let third = store.create_item(fields("C", "X", 1, 1.0)).await.unwrap();
        assert!(third.id > second.id);
    }

    #[tokio::test]
    async fn listing_is_ordered_by_name() {
        let store = store().await;
        for name in ["pliers", "Wrench", "Anvil", "hammer"] {
            store.create_item(fields(name, "Tools", 1, 1.0)).await.unwrap();
        }

        let names: Vec<String> = store
            .get_all_items(&ItemFilter::all())
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();

        assert_eq!(names, ["Anvil", "Wrench", "hammer", "pliers"]);
    }

    #[tokio::test]
    async fn category_filter_is_exact_and_partitions_items() {
        let store = store().await;
        store.create_item(fields("Hammer", "Tools", 1, 1.0)).await.unwrap();
        store.create_item(fields("Saw", "Tools", 1, 1.0)).await.unwrap();
        store.create_item(fields("Apple", "Food", 1, 1.0)).await.unwrap();
        store.create_item(fields("Axe", "tools", 1, 1.0)).await.unwrap();

        let tools = store.get_all_items(&ItemFilter::all().category("Tools")).await.unwrap();
        assert_eq!(tools.len(), 2);
        assert!(tools.iter().all(|i| i.category == "Tools"));

        let mut union = Vec::new();
        for category in store.get_categories().await.unwrap() {
            let subset = store
                .get_all_items(&ItemFilter::all().category(category.clone()))
                .await
                .unwrap();
            assert!(subset.iter().all(|i| i.category == category));
            union.extend(subset.into_iter().map(|i| i.id));
        }
        union.sort();

        let mut all: Vec<ItemId> = store
            .get_all_items(&ItemFilter::all())
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect();
        all.sort();
        assert_eq!(union, all);
    }

    #[tokio::test]
    async fn search_matches_name_or_description_ignoring_case() {
        let store = store().await;
        store.create_item(fields("Claw Hammer", "Tools", 1, 1.0)).await.unwrap();
        store
            .create_item(fields("Mallet", "Tools", 1, 1.0).with_description("a soft HAMMER"))
            .await
            .unwrap();
        store.create_item(fields("Saw", "Tools", 1, 1.0)).await.unwrap();

        let found = store.get_all_items(&ItemFilter::all().search("hammer")).await.unwrap();
        let names: Vec<&str> = found.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Claw Hammer", "Mallet"]);

        let none = store.get_all_items(&ItemFilter::all().search("drill")).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() {
        let store = store().await;
        store.create_item(fields("100% cotton", "Fabric", 1, 1.0)).await.unwrap();
        store.create_item(fields("1000 cotton", "Fabric", 1, 1.0)).await.unwrap();
        store.create_item(fields("snake_case", "Misc", 1, 1.0)).await.unwrap();
        store.create_item(fields("snakeXcase", "Misc", 1, 1.0)).await.unwrap();

        let percent = store.get_all_items(&ItemFilter::all().search("0%")).await.unwrap();
        assert_eq!(percent.len(), 1);
        assert_eq!(percent[0].name, "100% cotton");

        let underscore = store.get_all_items(&ItemFilter::all().search("e_c")).await.unwrap();
        assert_eq!(underscore.len(), 1);
        assert_eq!(underscore[0].name, "snake_case");
    }

    #[tokio::test]
    async fn filters_combine_with_and() {
        let store = store().await;
        store.create_item(fields("Steel Hammer", "Tools", 1, 1.0)).await.unwrap();
        store.create_item(fields("Steel Beam", "Building", 1, 1.0)).await.unwrap();
        store.create_item(fields("Saw", "Tools", 1, 1.0)).await.unwrap();

        let filter = ItemFilter::new(Some("Tools".into()), Some("steel".into()));
        let found = store.get_all_items(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Steel Hammer");
    }

    #[tokio::test]
    async fn categories_are_distinct_and_sorted() {
        let store = store().await;
        assert!(store.get_categories().await.unwrap().is_empty());

        for (name, category) in [("a", "Tools"), ("b", "Food"), ("c", "Tools"), ("d", "Books")] {
            store.create_item(fields(name, category, 1, 1.0)).await.unwrap();
        }

        assert_eq!(store.get_categories().await.unwrap(), ["Books", "Food", "Tools"]);
    }

    #[tokio::test]
    async fn stats_on_empty_store_are_zero() {
        let store = store().await;
        let stats = store.get_summary_stats().await.unwrap();
        assert_eq!(stats, InventoryStats::default());
        assert!(store.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn stats_sum_quantity_and_value() {
        let store = store().await;
        store.create_item(fields("Hammer", "Tools", 2, 10.0)).await.unwrap();
        store.create_item(fields("Apple", "Food", 3, 5.0)).await.unwrap();

        let stats = store.get_summary_stats().await.unwrap();
        assert_eq!(stats.total_items, 2);
        assert_eq!(stats.total_quantity, 5);
        assert_eq!(stats.total_value, 35.0);
        assert_eq!(stats.total_categories, 2);
        assert!(!store.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn stats_hold_quantities_at_the_cap() {
        let store = store().await;
        store.create_item(fields("Bolts", "Hardware", MAX_QUANTITY, 0.0)).await.unwrap();
        store.create_item(fields("Nuts", "Hardware", MAX_QUANTITY, 0.0)).await.unwrap();
        store.create_item(fields("Washer", "Hardware", 1, 0.0)).await.unwrap();

        let err = store
            .create_item(fields("Rivets", "Hardware", MAX_QUANTITY + 1, 0.0))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Domain(DomainError::Validation(_))));

        let stats = store.get_summary_stats().await.unwrap();
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.total_quantity, 2 * MAX_QUANTITY + 1);
    }

    #[tokio::test]
    async fn file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("inventory.db").display());

        let store = InventoryStore::open(&url).await.unwrap();
        let item = store.create_item(fields("Hammer", "Tools", 1, 1.0)).await.unwrap();
        store.close().await;

        let reopened = InventoryStore::open(&url).await.unwrap();
        let fetched = reopened.get_item_by_id(item.id).await.unwrap().unwrap();
        assert_eq!(fetched, item);
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("a%b_c\\d"), "%a\\%b\\_c\\\\d%");
    }

    #[test]
    fn timestamps_round_trip_at_microsecond_precision() {
        let ts = now();
        assert_eq!(parse_timestamp(&format_timestamp(ts)).unwrap(), ts);
        assert!(matches!(parse_timestamp("yesterday"), Err(StoreError::CorruptRow(_))));
    }
}
