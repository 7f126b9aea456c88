//! Sort engine: derives a display order without touching the source rows.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::column::TableRecord;
use super::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// What a column header shows for its sort affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

impl SortIndicator {
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Unsorted => "↕",
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// Active sort field and direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    field: Option<String>,
    direction: SortDirection,
}

impl SortState {
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub const fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Sort by `field`, flipping the direction if it is already active.
    ///
    /// Once a field is active there is no way back to the unsorted state.
    pub fn toggle(&mut self, field: &str) {
        if self.field.as_deref() == Some(field) {
            self.direction = self.direction.toggled();
        } else {
            self.field = Some(field.to_string());
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn indicator(&self, field: &str) -> SortIndicator {
        match (self.field(), self.direction) {
            (Some(active), SortDirection::Ascending) if active == field => SortIndicator::Ascending,
            (Some(active), SortDirection::Descending) if active == field => {
                SortIndicator::Descending
            }
            _ => SortIndicator::Unsorted,
        }
    }
}

/// Compute the display order as indices into `records`.
///
/// The sort is stable, so records with equal keys keep their source order in
/// both directions.
pub fn sorted_order<R: TableRecord>(records: &[Arc<R>], sort: &SortState) -> Vec<usize> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    let Some(field) = sort.field() else {
        return order;
    };

    let keys: Vec<Value> = records.iter().map(|record| record.field(field)).collect();
    order.sort_by(|&a, &b| sort.direction().apply(keys[a].compare(&keys[b])));
    order
}

/// Memoised display order keyed on collection generation and sort state.
#[derive(Debug, Default)]
pub struct SortCache {
    key: Option<(u64, SortState)>,
    order: Vec<usize>,
}

impl SortCache {
    pub fn order<R: TableRecord>(
        &mut self,
        generation: u64,
        records: &[Arc<R>],
        sort: &SortState,
    ) -> &[usize] {
        let fresh = self
            .key
            .as_ref()
            .is_some_and(|(g, s)| *g == generation && s == sort);
        if !fresh {
            self.order = sorted_order(records, sort);
            self.key = Some((generation, sort.clone()));
        }
        &self.order
    }

    #[cfg(test)]
    const fn is_cached(&self) -> bool {
        self.key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        id: i64,
        name: &'static str,
    }

    impl TableRecord for Row {
        fn field(&self, name: &str) -> Value {
            match name {
                "id" => self.id.into(),
                "name" => self.name.into(),
                _ => Value::Missing,
            }
        }
    }

    fn rows(items: &[(i64, &'static str)]) -> Vec<Arc<Row>> {
        items
            .iter()
            .map(|&(id, name)| Arc::new(Row { id, name }))
            .collect()
    }

    fn names(records: &[Arc<Row>], order: &[usize]) -> Vec<&'static str> {
        order.iter().map(|&i| records[i].name).collect()
    }

    #[test]
    fn test_toggle_cycle_on_one_field() {
        let mut sort = SortState::default();
        assert_eq!(sort.field(), None);

        sort.toggle("name");
        assert_eq!((sort.field(), sort.direction()), (Some("name"), SortDirection::Ascending));
        sort.toggle("name");
        assert_eq!((sort.field(), sort.direction()), (Some("name"), SortDirection::Descending));
        sort.toggle("name");
        assert_eq!((sort.field(), sort.direction()), (Some("name"), SortDirection::Ascending));
    }

    #[test]
    fn test_large_json_ids_sort_next_to_floats() {
        let records: Vec<Arc<serde_json::Value>> = [
            serde_json::json!({ "id": 9_007_199_254_740_993_i64 }),
            serde_json::json!({ "id": 9_007_199_254_740_992.0 }),
            serde_json::json!({ "id": 9_007_199_254_740_992_i64 }),
        ]
        .into_iter()
        .map(Arc::new)
        .collect();
        let mut sort = SortState::default();
        sort.toggle("id");

        assert_eq!(sorted_order(&records, &sort), [1, 2, 0]);
        sort.toggle("id");
        assert_eq!(sorted_order(&records, &sort), [0, 1, 2]);
    }

    #[test]
    fn test_switching_field_resets_to_ascending() {
        let mut sort = SortState::default();
        sort.toggle("name");
        sort.toggle("name");
        sort.toggle("id");
        assert_eq!((sort.field(), sort.direction()), (Some("id"), SortDirection::Ascending));
    }

    #[test]
    fn test_indicator() {
        let mut sort = SortState::default();
        assert_eq!(sort.indicator("name"), SortIndicator::Unsorted);
        sort.toggle("name");
        assert_eq!(sort.indicator("name"), SortIndicator::Ascending);
        assert_eq!(sort.indicator("id"), SortIndicator::Unsorted);
        sort.toggle("name");
        assert_eq!(sort.indicator("name"), SortIndicator::Descending);
    }

    #[test]
    fn test_sort_by_name_then_reverse() {
        let records = rows(&[(3, "C"), (1, "A"), (2, "B")]);
        let mut sort = SortState::default();

        assert_eq!(names(&records, &sorted_order(&records, &sort)), ["C", "A", "B"]);
        sort.toggle("name");
        assert_eq!(names(&records, &sorted_order(&records, &sort)), ["A", "B", "C"]);
        sort.toggle("name");
        assert_eq!(names(&records, &sorted_order(&records, &sort)), ["C", "B", "A"]);
        // Source is untouched.
        assert_eq!(records.iter().map(|r| r.name).collect::<Vec<_>>(), ["C", "A", "B"]);
    }

    #[test]
    fn test_numeric_sort() {
        let records = rows(&[(10, "ten"), (2, "two"), (33, "thirty-three")]);
        let mut sort = SortState::default();
        sort.toggle("id");
        assert_eq!(
            names(&records, &sorted_order(&records, &sort)),
            ["two", "ten", "thirty-three"]
        );
    }

    #[test]
    fn test_stable_for_duplicates_in_both_directions() {
        let records = rows(&[(1, "a"), (0, "b"), (1, "c"), (0, "d"), (1, "e")]);
        let mut sort = SortState::default();

        sort.toggle("id");
        assert_eq!(
            names(&records, &sorted_order(&records, &sort)),
            ["b", "d", "a", "c", "e"]
        );
        sort.toggle("id");
        assert_eq!(
            names(&records, &sorted_order(&records, &sort)),
            ["a", "c", "e", "b", "d"]
        );
    }

    #[test]
    fn test_missing_field_keeps_source_order() {
        let records = rows(&[(2, "x"), (1, "y")]);
        let mut sort = SortState::default();
        sort.toggle("unknown");
        assert_eq!(sorted_order(&records, &sort), [0, 1]);
    }

    #[test]
    fn test_cache_recomputes_on_key_change() {
        let records = rows(&[(2, "b"), (1, "a")]);
        let mut cache = SortCache::default();
        let mut sort = SortState::default();

        assert!(!cache.is_cached());
        assert_eq!(cache.order(0, &records, &sort), [0, 1]);
        sort.toggle("id");
        assert_eq!(cache.order(0, &records, &sort), [1, 0]);

        let replaced = rows(&[(5, "e"), (3, "c"), (4, "d")]);
        assert_eq!(cache.order(1, &replaced, &sort), [1, 2, 0]);
    }
}
