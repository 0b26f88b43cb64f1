//! CSV export and import of inventory items.
//!
//! Export writes every item with its full field set, timestamps included.
//! Import feeds each row through [`InventoryStore::create_item`], so rows get
//! exactly the same validation as any other write. Bad rows are counted and
//! skipped; they never stop the rest of the batch.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockroom_core::DomainError;
use stockroom_inventory::{Item, ItemFields, ItemFilter};

use crate::db::{InventoryStore, StoreError};

/// Header row of exported files.
pub const EXPORT_HEADER: [&str; 9] = [
    "ID",
    "Name",
    "Category",
    "Quantity",
    "Price",
    "Total Value",
    "Description",
    "Created",
    "Updated",
];

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One rejected import row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    /// 1-based line in the source file.
    pub line: u64,
    pub reason: String,
}

/// Outcome of an import batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub failures: Vec<RowFailure>,
}

impl ImportReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    fn reject(&mut self, line: u64, reason: impl Into<String>) {
        self.failures.push(RowFailure {
            line,
            reason: reason.into(),
        });
    }
}

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    id: i64,
    name: &'a str,
    category: &'a str,
    quantity: i64,
    price: f64,
    total_value: f64,
    description: &'a str,
    created: String,
    updated: String,
}

impl<'a> From<&'a Item> for ExportRow<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            id: item.id.get(),
            name: &item.name,
            category: &item.category,
            quantity: item.quantity,
            price: item.price,
            total_value: item.total_value(),
            description: &item.description,
            created: item.created_at.to_rfc3339(),
            updated: item.updated_at.to_rfc3339(),
        }
    }
}

/// Columns read on import, matched by header name. Anything else (ID, Total
/// Value, timestamps) is ignored, so an export file imports as-is. Missing
/// text columns read as empty, missing numeric columns as zero. Fields are
/// whitespace-trimmed by the reader.
#[derive(Debug, Deserialize)]
struct ImportRow {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Category", default)]
    category: String,
    #[serde(rename = "Quantity", default)]
    quantity: i64,
    #[serde(rename = "Price", default)]
    price: f64,
    #[serde(rename = "Description", default)]
    description: String,
}

impl From<ImportRow> for ItemFields {
    fn from(row: ImportRow) -> Self {
        ItemFields::new(row.name, row.category, row.quantity, row.price)
            .with_description(row.description)
    }
}

/// Write `items` as CSV, header first. Returns the number of data rows.
pub fn write_items<W: io::Write>(items: &[Item], out: W) -> Result<usize, CsvError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(EXPORT_HEADER)?;
    for item in items {
        writer.serialize(ExportRow::from(item))?;
    }
    writer.flush()?;
    Ok(items.len())
}

/// Export every item in the store.
pub async fn export_items<W: io::Write>(store: &InventoryStore, out: W) -> Result<usize, CsvError> {
    let items = store.get_all_items(&ItemFilter::all()).await?;
    let written = write_items(&items, out)?;
    tracing::info!(items = written, "exported inventory to csv");
    Ok(written)
}

/// Parse every data row up front. Rows that cannot be read or typed become
/// `Err(reason)` entries; only I/O failures abort.
fn read_rows<R: io::Read>(input: R) -> Result<Vec<(u64, Result<ItemFields, String>)>, CsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();
    loop {
        match reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                let parsed = record
                    .deserialize::<ImportRow>(Some(&headers))
                    .map(ItemFields::from)
                    .map_err(|e| e.to_string());
                rows.push((line, parsed));
            }
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                rows.push((line, Err(e.to_string())));
            }
        }
    }
    Ok(rows)
}

/// Import CSV rows as new items.
///
/// Unparseable or invalid rows are recorded in the report and skipped. A
/// storage failure aborts the import; rows created before it stay created.
pub async fn import_items<R: io::Read>(
    store: &InventoryStore,
    input: R,
) -> Result<ImportReport, CsvError> {
    let rows = read_rows(input)?;
    let mut report = ImportReport::default();

    for (line, row) in rows {
        let fields = match row {
            Ok(fields) => fields,
            Err(reason) => {
                tracing::warn!(line, %reason, "skipping unreadable csv row");
                report.reject(line, reason);
                continue;
            }
        };

        match store.create_item(fields).await {
            Ok(_) => report.imported += 1,
            Err(StoreError::Domain(e @ DomainError::Validation(_))) => {
                tracing::warn!(line, error = %e, "skipping invalid csv row");
                report.reject(line, e.to_string());
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(
        imported = report.imported,
        failed = report.failed(),
        "imported inventory from csv"
    );
    Ok(report)
}

/// Import `path` only when the store holds no items yet. Returns `None` when
/// the store was already populated.
pub async fn seed_from_csv(
    store: &InventoryStore,
    path: &Path,
) -> Result<Option<ImportReport>, CsvError> {
    if !store.is_empty().await? {
        tracing::debug!(path = %path.display(), "store already populated, skipping seed");
        return Ok(None);
    }

    let file = std::fs::File::open(path)?;
    let report = import_items(store, io::BufReader::new(file)).await?;
    Ok(Some(report))
}
