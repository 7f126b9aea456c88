use std::collections::HashSet;

use color_eyre::eyre::bail;
use ratatui::layout::Constraint;

use super::value::Value;
use crate::ui::Result;

/// A record that can be displayed as a table row.
///
/// The table never knows a record's shape; it only asks for fields by name.
/// Unknown fields should return [`Value::Missing`].
pub trait TableRecord {
    fn field(&self, name: &str) -> Value;
}

impl TableRecord for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Value {
        self.get(name).map_or(Value::Missing, Value::from)
    }
}

impl TableRecord for serde_json::Value {
    fn field(&self, name: &str) -> Value {
        self.as_object()
            .map_or(Value::Missing, |object| object.field(name))
    }
}

/// Describes how one column labels and projects a record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    key: String,
    title: String,
    field: String,
    sortable: bool,
    width: Constraint,
}

impl Column {
    /// Create a column whose field reference defaults to its key.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            field: key.clone(),
            key,
            title: title.into(),
            sortable: false,
            width: Constraint::Fill(1),
        }
    }

    #[must_use]
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    #[must_use]
    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    #[must_use]
    pub const fn width(mut self, width: Constraint) -> Self {
        self.width = width;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn field_ref(&self) -> &str {
        &self.field
    }

    pub const fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub const fn constraint(&self) -> Constraint {
        self.width
    }
}

/// Reject column sets with duplicate keys.
pub fn validate_columns(columns: &[Column]) -> Result<()> {
    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if !seen.insert(column.key()) {
            bail!("duplicate column key `{}`", column.key());
        }
    }
    Ok(())
}

/// Infer one sortable column per key of the first JSON object.
pub fn infer_columns(records: &[serde_json::Value]) -> Vec<Column> {
    records
        .first()
        .and_then(serde_json::Value::as_object)
        .map(|object| {
            object
                .keys()
                .map(|key| Column::new(key.as_str(), key.as_str()).sortable())
                .collect()
        })
        .unwrap_or_default()
}
