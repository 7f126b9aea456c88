mod data_table;
mod input_field;
mod list;

pub use data_table::{
    Column, DataTable, HeaderCell, ReconcilePolicy, RowView, SortDirection, SortIndicator,
    SortState, TableBody, TableEvent, TableRecord, Value, infer_columns, validate_columns,
};
pub use input_field::{
    Appearance, FieldMessage, InputEvent, InputField, InputKind, InputSize, InputVariant,
};
pub use list::{List, ListRow};
