//! Decoded document values.

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::fmt;

use crate::error::LookupError;

/// A decoded document value.
///
/// Scalars are never coerced while parsing: `420` is the text `"420"`. The
/// typed accessors below convert on demand.
#[derive(Clone, PartialEq, Eq)]
pub enum Value {
    /// Missing value, as in `key:` or a bare `-`.
    Empty,
    /// Verbatim scalar text.
    Scalar(String),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Ordered key/value pairs. Duplicate keys are kept in source order.
    Map(Vec<(String, Value)>),
}

impl Value {
    /// Short name of the variant, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Empty => "empty",
            Value::Scalar(_) => "scalar",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Returns `true` if this is the `Empty` value.
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Returns the text if this is a `Scalar`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items if this is a `List`.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this is a `Map`.
    pub fn as_map(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Number of items or entries; zero for scalars and `Empty`.
    pub fn len(&self) -> usize {
        match self {
            Value::List(items) => items.len(),
            Value::Map(entries) => entries.len(),
            _ => 0,
        }
    }

    /// Keys of a map in source order, duplicates included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.as_map()
            .unwrap_or_default()
            .iter()
            .map(|(k, _)| k.as_str())
    }

    /// Look up a key in a map. The first entry with an equal key wins.
    pub fn lookup(&self, key: &str) -> Result<&Value, LookupError> {
        let entries = self.as_map().ok_or(LookupError::WrongShape {
            expected: "map",
            found: self.kind_name(),
        })?;
        entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .ok_or_else(|| LookupError::NotFound(key.to_string()))
    }

    /// Follow a path of keys through nested maps.
    ///
    /// An empty path returns `self`.
    pub fn lookup_path<K: AsRef<str>>(&self, keys: &[K]) -> Result<&Value, LookupError> {
        keys.iter()
            .try_fold(self, |value, key| value.lookup(key.as_ref()))
    }

    /// Item `i` of a list.
    pub fn index(&self, i: usize) -> Result<&Value, LookupError> {
        let items = self.as_list().ok_or(LookupError::WrongShape {
            expected: "list",
            found: self.kind_name(),
        })?;
        items.get(i).ok_or(LookupError::OutOfRange {
            index: i,
            len: items.len(),
        })
    }

    /// Parse a scalar as a decimal integer with an optional sign.
    pub fn as_integer(&self) -> Option<BigInt> {
        let s = self.as_str()?;
        let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        BigInt::parse_bytes(s.as_bytes(), 10)
    }

    /// Parse a scalar as an unsigned 64-bit integer.
    pub fn as_u64(&self) -> Option<u64> {
        self.as_integer()?.to_u64()
    }

    /// Parse a scalar as a signed 64-bit integer.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_integer()?.to_i64()
    }

    /// Parse a scalar as a float.
    pub fn as_float(&self) -> Option<f64> {
        self.as_str()?.parse().ok()
    }

    /// `true` or `false`, spelled exactly.
    pub fn as_bool(&self) -> Option<bool> {
        match self.as_str()? {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => write!(f, "null"),
            Value::Scalar(s) => write!(f, "{:?}", s),
            Value::List(items) => f.debug_list().entries(items).finish(),
            Value::Map(entries) => f
                .debug_map()
                .entries(entries.iter().map(|(k, v)| (k, v)))
                .finish(),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Vec<(String, Value)>> for Value {
    fn from(entries: Vec<(String, Value)>) -> Self {
        Value::Map(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, Value)]) -> Value {
        Value::Map(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_lookup_first_wins() {
        let v = map(&[("a", "1".into()), ("b", "2".into()), ("a", "3".into())]);
        assert_eq!(v.lookup("a"), Ok(&Value::from("1")));
        assert_eq!(v.keys().collect::<Vec<_>>(), vec!["a", "b", "a"]);
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn test_lookup_errors() {
        let v = map(&[("a", "1".into())]);
        assert_eq!(v.lookup("A"), Err(LookupError::NotFound("A".to_string())));
        assert_eq!(
            Value::from("x").lookup("a"),
            Err(LookupError::WrongShape {
                expected: "map",
                found: "scalar"
            })
        );
    }

    #[test]
    fn test_lookup_path() {
        let v = map(&[("a", map(&[("x", "99".into())])), ("b", "2".into())]);
        assert_eq!(v.lookup_path(&["a", "x"]), Ok(&Value::from("99")));
        assert_eq!(v.lookup_path::<&str>(&[]), Ok(&v));
        assert_eq!(
            v.lookup_path(&["b", "x"]),
            Err(LookupError::WrongShape {
                expected: "map",
                found: "scalar"
            })
        );
        assert_eq!(
            v.lookup_path(&["a", "z"]),
            Err(LookupError::NotFound("z".to_string()))
        );
    }

    #[test]
    fn test_index() {
        let v = Value::from(vec![Value::from("a"), Value::Empty]);
        assert_eq!(v.index(1), Ok(&Value::Empty));
        assert_eq!(v.index(2), Err(LookupError::OutOfRange { index: 2, len: 2 }));
        assert!(matches!(
            Value::Empty.index(0),
            Err(LookupError::WrongShape { .. })
        ));
    }

    #[test]
    fn test_typed_accessors() {
        assert_eq!(Value::from("420").as_u64(), Some(420));
        assert_eq!(Value::from("-7").as_i64(), Some(-7));
        assert_eq!(Value::from("-7").as_u64(), None);
        assert_eq!(
            Value::from("123456789012345678901234567890").as_integer(),
            BigInt::parse_bytes(b"123456789012345678901234567890", 10)
        );
        assert_eq!(Value::from("5.1").as_integer(), None);
        assert_eq!(Value::from("5.1").as_float(), Some(5.1));
        assert_eq!(Value::from("true").as_bool(), Some(true));
        assert_eq!(Value::from("True").as_bool(), None);
        assert_eq!(Value::Empty.as_str(), None);
    }

    #[test]
    fn test_debug_format() {
        let v = map(&[
            ("a", Value::from(vec!["4".into(), Value::Empty])),
            ("b", "x y".into()),
        ]);
        assert_eq!(format!("{:?}", v), r#"{"a": ["4", null], "b": "x y"}"#);
    }
}
