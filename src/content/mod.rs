//! Records behind the blog, portfolio and self-narrative lists.
//!
//! The real backend is a managed service; this module only fixes the
//! interface ([`RecordStore`]) plus an in-memory implementation used by the
//! CLI and tests.

mod date;
mod excerpt;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub use date::{compare_stamps, format_date, now_stamp, parse_timestamp};
pub use excerpt::{CardView, excerpt, parse_tags, strip_markdown, truncate_text};

/// Backend tables the admin screen manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Table {
    BlogPosts,
    PortfolioItems,
    JikatarPosts,
}

impl Table {
    pub const ALL: [Self; 3] = [Self::BlogPosts, Self::PortfolioItems, Self::JikatarPosts];

    /// Card layout the public pages use for this table by default.
    pub const fn default_view(self) -> CardView {
        match self {
            Self::BlogPosts | Self::JikatarPosts => CardView::Blog,
            Self::PortfolioItems => CardView::Grid,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BlogPosts => "blog_posts",
            Self::PortfolioItems => "portfolio_items",
            Self::JikatarPosts => "jikatar_posts",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Table {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| StoreError::Rejected(format!("unknown table `{s}`")))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no record `{id}` in {table}")]
    NotFound { table: Table, id: String },
    #[error("rejected: {0}")]
    Rejected(String),
    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// One row: an id plus arbitrary JSON columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn field_str(&self, column: &str) -> Option<&str> {
        self.fields.get(column).and_then(Value::as_str)
    }

    pub fn title(&self) -> &str {
        self.field_str("title").unwrap_or("Untitled")
    }

    /// `created_at` as a long date, blank when missing or unparseable.
    pub fn created_date(&self) -> String {
        format_date(self.field_str("created_at"))
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Sort key for [`RecordStore::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub descending: bool,
}

impl OrderBy {
    pub fn desc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            descending: true,
        }
    }

    pub fn asc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            descending: false,
        }
    }
}

impl Default for OrderBy {
    /// Newest first.
    fn default() -> Self {
        Self::desc("created_at")
    }
}

/// The operations the list and admin screens need from the backend.
pub trait RecordStore {
    fn list(
        &self,
        table: Table,
        order_by: &OrderBy,
        limit: Option<usize>,
    ) -> Result<Vec<Record>, StoreError>;

    fn insert(&mut self, table: Table, fields: Map<String, Value>) -> Result<Record, StoreError>;

    fn delete(&mut self, table: Table, id: &str) -> Result<(), StoreError>;
}

/// Volatile [`RecordStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: HashMap<Table, Vec<Record>>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot of the form `{ "blog_posts": [ { "id": .., .. } ] }`.
    pub fn from_snapshot_json(json: &str) -> Result<Self, StoreError> {
        let tables: HashMap<Table, Vec<Record>> = serde_json::from_str(json)?;
        let next_id = tables
            .values()
            .flatten()
            .filter_map(|r| r.id.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);
        Ok(Self { tables, next_id })
    }

    pub fn len(&self, table: Table) -> usize {
        self.tables.get(&table).map_or(0, Vec::len)
    }

    fn allocate_id(&mut self) -> String {
        self.next_id = self.next_id.max(1);
        let id = self.next_id;
        self.next_id += 1;
        id.to_string()
    }
}

impl RecordStore for MemoryStore {
    fn list(
        &self,
        table: Table,
        order_by: &OrderBy,
        limit: Option<usize>,
    ) -> Result<Vec<Record>, StoreError> {
        let mut rows = self.tables.get(&table).cloned().unwrap_or_default();
        rows.sort_by(|a, b| {
            let ord = compare_values(
                a.fields.get(&order_by.column),
                b.fields.get(&order_by.column),
            );
            if order_by.descending { ord.reverse() } else { ord }
        });
        if let Some(limit) = limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    fn insert(
        &mut self,
        table: Table,
        mut fields: Map<String, Value>,
    ) -> Result<Record, StoreError> {
        if fields.is_empty() {
            return Err(StoreError::Rejected(format!("empty insert into {table}")));
        }
        fields
            .entry("created_at")
            .or_insert_with(|| Value::String(now_stamp()));
        let record = Record {
            id: self.allocate_id(),
            fields,
        };
        tracing::debug!(%table, id = %record.id, "inserted record");
        self.tables.entry(table).or_default().push(record.clone());
        Ok(record)
    }

    fn delete(&mut self, table: Table, id: &str) -> Result<(), StoreError> {
        let rows = self.tables.entry(table).or_default();
        let Some(pos) = rows.iter().position(|r| r.id == id) else {
            return Err(StoreError::NotFound {
                table,
                id: id.to_string(),
            });
        };
        rows.remove(pos);
        tracing::debug!(%table, id, "deleted record");
        Ok(())
    }
}

/// Missing values sort lowest. Strings compare as timestamps when both
/// parse; mixed types fall back to their JSON text.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => compare_stamps(x, y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

/// Blog post form.
#[derive(Debug, Clone, Default)]
pub struct NewBlogPost {
    pub title: String,
    pub content: String,
}

impl NewBlogPost {
    pub fn into_fields(self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("title".into(), Value::String(self.title));
        fields.insert("content".into(), Value::String(self.content));
        fields
    }
}

/// Portfolio item form. Blank URLs are stored as `null`.
#[derive(Debug, Clone, Default)]
pub struct NewPortfolioItem {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub link_url: String,
}

impl NewPortfolioItem {
    pub fn into_fields(self) -> Map<String, Value> {
        let optional = |s: String| {
            if s.is_empty() {
                Value::Null
            } else {
                Value::String(s)
            }
        };
        let mut fields = Map::new();
        fields.insert("title".into(), Value::String(self.title));
        fields.insert("description".into(), Value::String(self.description));
        fields.insert("image_url".into(), optional(self.image_url));
        fields.insert("link_url".into(), optional(self.link_url));
        fields
    }
}

/// Self-narrative post form. Tags are kept as a JSON-encoded string column.
#[derive(Debug, Clone, Default)]
pub struct NewJikatarPost {
    pub title: String,
    pub content: String,
    /// Raw comma-separated tag field.
    pub tags: String,
}

impl NewJikatarPost {
    pub fn into_fields(self) -> Map<String, Value> {
        let tags = Value::from(parse_tags(&self.tags)).to_string();
        let mut fields = Map::new();
        fields.insert("title".into(), Value::String(self.title));
        fields.insert("content".into(), Value::String(self.content));
        fields.insert("tags".into(), Value::String(tags));
        fields
    }
}
