//! Field values projected out of table records.

use std::cmp::Ordering;
use std::fmt;

/// Placeholder rendered for fields a record does not have.
pub const MISSING_PLACEHOLDER: &str = "-";

/// A single field value as seen by the table.
///
/// Ordering between values of different kinds is deterministic: integers and
/// floats compare numerically with each other, every other pair of kinds is
/// ordered by rank (`Missing < Bool < number < Text`).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Missing,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    const fn rank(&self) -> u8 {
        match self {
            Self::Missing => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::Text(_) => 3,
        }
    }

    /// Total order used by the sort engine.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Int(a), Self::Float(b)) => compare_int_float(*a, *b),
            (Self::Float(a), Self::Int(b)) => compare_int_float(*b, *a).reverse(),
            (Self::Float(a), Self::Float(b)) => compare_floats(*a, *b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    #[cfg(test)]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// `total_cmp`, except that both zeros are equal, matching `Int(0)`.
fn compare_floats(a: f64, b: f64) -> Ordering {
    if a == 0.0 && b == 0.0 {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

/// Exact comparison without rounding `a` through `f64`.
///
/// NaN sorts like it does under `total_cmp`: positive NaN above every
/// number, negative NaN below.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn compare_int_float(a: i64, b: f64) -> Ordering {
    // 2^63, the first float past i64::MAX. Exactly representable.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if b.is_nan() {
        return if b.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if b >= LIMIT {
        return Ordering::Less;
    }
    if b < -LIMIT {
        return Ordering::Greater;
    }
    // In range and integral, so the cast is exact.
    let whole = b.floor();
    match a.cmp(&(whole as i64)) {
        Ordering::Equal if b > whole => Ordering::Less,
        ordering => ordering,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str(MISSING_PLACEHOLDER),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Missing,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or(Self::Missing),
            serde_json::Value::String(s) => Self::Text(s.clone()),
            // Nested structures are displayed and compared as their JSON text.
            other => Self::Text(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_kind_ordering() {
        assert_eq!(Value::Int(1).compare(&Value::Int(2)), Ordering::Less);
        assert_eq!(
            Value::from("Bob").compare(&Value::from("Alice")),
            Ordering::Greater
        );
        assert_eq!(Value::Bool(false).compare(&Value::Bool(true)), Ordering::Less);
    }

    #[test]
    fn test_numbers_compare_across_kinds() {
        assert_eq!(Value::Int(2).compare(&Value::Float(1.5)), Ordering::Greater);
        assert_eq!(Value::Float(2.0).compare(&Value::Int(2)), Ordering::Equal);
    }

    #[test]
    fn test_large_ints_against_floats_stay_ordered() {
        let two_53: i64 = 1 << 53;
        let big = Value::Int(two_53 + 1);
        let float = Value::Float(9_007_199_254_740_992.0);
        let exact = Value::Int(two_53);
        assert_eq!(big.compare(&float), Ordering::Greater);
        assert_eq!(exact.compare(&float), Ordering::Equal);
        assert_eq!(float.compare(&big), Ordering::Less);

        let mut values = vec![big.clone(), float.clone(), exact.clone()];
        values.sort_by(Value::compare);
        assert_eq!(values, [float, exact, big]);
    }

    #[test]
    fn test_int_against_fractions_and_extremes() {
        assert_eq!(Value::Int(-2).compare(&Value::Float(-1.5)), Ordering::Less);
        assert_eq!(Value::Int(-1).compare(&Value::Float(-1.5)), Ordering::Greater);
        assert_eq!(Value::Int(1).compare(&Value::Float(1.5)), Ordering::Less);
        assert_eq!(Value::Int(0).compare(&Value::Float(-0.0)), Ordering::Equal);
        assert_eq!(Value::Float(-0.0).compare(&Value::Float(0.0)), Ordering::Equal);
        assert_eq!(
            Value::Int(i64::MAX).compare(&Value::Float(f64::INFINITY)),
            Ordering::Less
        );
        assert_eq!(
            Value::Int(i64::MIN).compare(&Value::Float(f64::NEG_INFINITY)),
            Ordering::Greater
        );
        assert_eq!(
            Value::Int(i64::MIN).compare(&Value::Float(-9_223_372_036_854_775_808.0)),
            Ordering::Equal
        );
        assert_eq!(Value::Int(i64::MAX).compare(&Value::Float(f64::NAN)), Ordering::Less);
        assert_eq!(Value::Float(f64::NAN).compare(&Value::Int(0)), Ordering::Greater);
    }

    #[test]
    fn test_mixed_kinds_order_by_rank() {
        assert_eq!(Value::Int(99).compare(&Value::from("1")), Ordering::Less);
        assert_eq!(Value::Missing.compare(&Value::Bool(false)), Ordering::Less);
        assert_eq!(Value::from("a").compare(&Value::Missing), Ordering::Greater);
    }

    #[test]
    fn test_nan_does_not_break_ordering() {
        let nan = Value::Float(f64::NAN);
        assert_eq!(nan.compare(&nan), Ordering::Equal);
        assert_ne!(nan.compare(&Value::Float(1.0)), Ordering::Equal);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Missing.to_string(), MISSING_PLACEHOLDER);
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::from("x").to_string(), "x");
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({ "n": 3, "f": 2.5, "s": "hi", "z": null, "a": [1] });
        assert_eq!(Value::from(&json["n"]), Value::Int(3));
        assert_eq!(Value::from(&json["f"]), Value::Float(2.5));
        assert_eq!(Value::from(&json["s"]), Value::from("hi"));
        assert_eq!(Value::from(&json["z"]), Value::Missing);
        assert_eq!(Value::from(&json["a"]), Value::from("[1]"));
    }
}
