//! Sample records shown by the table stories.

use std::sync::Arc;

use ratatui::layout::Constraint;
use serde::Serialize;

use crate::ui::{Column, TableRecord, Value};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: &'static str,
    pub email: &'static str,
    pub role: &'static str,
    pub last_login: &'static str,
    pub status: &'static str,
}

impl TableRecord for User {
    fn field(&self, name: &str) -> Value {
        match name {
            "id" => self.id.into(),
            "name" => self.name.into(),
            "email" => self.email.into(),
            "role" => self.role.into(),
            "lastLogin" => self.last_login.into(),
            "status" => self.status.into(),
            _ => Value::Missing,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Product {
    pub id: i64,
    pub name: &'static str,
    pub price: i64,
    pub category: &'static str,
    pub stock: i64,
}

impl TableRecord for Product {
    fn field(&self, name: &str) -> Value {
        match name {
            "id" => self.id.into(),
            "name" => self.name.into(),
            "price" => self.price.into(),
            "category" => self.category.into(),
            "stock" => self.stock.into(),
            _ => Value::Missing,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SimpleItem {
    pub id: i64,
    pub name: &'static str,
    pub value: &'static str,
}

impl TableRecord for SimpleItem {
    fn field(&self, name: &str) -> Value {
        match name {
            "id" => self.id.into(),
            "name" => self.name.into(),
            "value" => self.value.into(),
            _ => Value::Missing,
        }
    }
}

const USERS: [(i64, &str, &str, &str, &str, &str); 6] = [
    (1, "Alice Johnson", "alice@company.com", "Admin", "2025-08-17 09:30", "Active"),
    (2, "Bob Smith", "bob@company.com", "Developer", "2025-08-16 14:22", "Active"),
    (3, "Charlie Brown", "charlie@company.com", "Designer", "2025-08-15 11:45", "Inactive"),
    (4, "Diana Prince", "diana@company.com", "Manager", "2025-08-17 08:15", "Active"),
    (5, "Edward Norton", "edward@company.com", "Developer", "2025-08-14 16:30", "Active"),
    (6, "Fiona Apple", "fiona@company.com", "Analyst", "2025-08-13 10:20", "Inactive"),
];

fn user_records(count: usize) -> Vec<Arc<User>> {
    USERS
        .iter()
        .take(count)
        .map(|&(id, name, email, role, last_login, status)| {
            Arc::new(User {
                id,
                name,
                email,
                role,
                last_login,
                status,
            })
        })
        .collect()
}

/// The five users of the table stories.
pub fn users() -> Vec<Arc<User>> {
    user_records(5)
}

/// The demo page also lists a sixth, inactive user.
pub fn demo_users() -> Vec<Arc<User>> {
    user_records(USERS.len())
}

pub fn products() -> Vec<Arc<Product>> {
    [
        (1, "MacBook Pro", 2499, "Electronics", 12),
        (2, "iPhone 15", 999, "Electronics", 25),
        (3, "Coffee Mug", 15, "Office", 100),
        (4, "Wireless Mouse", 79, "Electronics", 45),
        (5, "Notebook", 5, "Office", 200),
    ]
    .into_iter()
    .map(|(id, name, price, category, stock)| {
        Arc::new(Product {
            id,
            name,
            price,
            category,
            stock,
        })
    })
    .collect()
}

pub fn simple_items() -> Vec<Arc<SimpleItem>> {
    [(1, "Item A", "Value 1"), (2, "Item B", "Value 2"), (3, "Item C", "Value 3")]
        .into_iter()
        .map(|(id, name, value)| Arc::new(SimpleItem { id, name, value }))
        .collect()
}

pub fn user_columns() -> Vec<Column> {
    vec![
        Column::new("id", "ID").sortable().width(Constraint::Length(5)),
        Column::new("name", "Name").sortable(),
        Column::new("email", "Email").sortable().width(Constraint::Fill(2)),
        Column::new("role", "Role").sortable(),
        Column::new("lastLogin", "Last Login").sortable(),
        Column::new("status", "Status").sortable(),
    ]
}

pub fn product_columns() -> Vec<Column> {
    vec![
        Column::new("id", "ID").sortable().width(Constraint::Length(5)),
        Column::new("name", "Product Name").sortable().width(Constraint::Fill(2)),
        Column::new("price", "Price ($)").sortable(),
        Column::new("category", "Category").sortable(),
        Column::new("stock", "Stock").sortable(),
    ]
}

/// Plain columns: no sort affordances.
pub fn simple_columns() -> Vec<Column> {
    vec![
        Column::new("id", "ID").width(Constraint::Length(5)),
        Column::new("name", "Name"),
        Column::new("value", "Value"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::validate_columns;

    #[test]
    fn test_fixture_columns_resolve() {
        for columns in [user_columns(), product_columns(), simple_columns()] {
            validate_columns(&columns).unwrap();
        }
        let user = &users()[0];
        for column in user_columns() {
            assert!(!user.field(column.field_ref()).is_missing(), "{}", column.key());
        }
        let product = &products()[0];
        for column in product_columns() {
            assert!(!product.field(column.field_ref()).is_missing(), "{}", column.key());
        }
    }

    #[test]
    fn test_demo_has_extra_user() {
        assert_eq!(users().len(), 5);
        let demo = demo_users();
        assert_eq!(demo.len(), 6);
        assert_eq!(demo[5].name, "Fiona Apple");
    }

    #[test]
    fn test_user_serializes_like_source_data() {
        let json = serde_json::to_value(&*users()[1]).unwrap();
        assert_eq!(json["lastLogin"], "2025-08-16 14:22");
        assert_eq!(json["id"], 2);
    }
}
