//! Typed select values and the placeholder-aware selection

/// A value a select can emit. Menu keys are strings, so each value type
/// defines its own lossless key form.
pub trait SelectValue: Clone + PartialEq + 'static {
    fn to_key(&self) -> String;
    fn from_key(key: &str) -> Option<Self>;
}

macro_rules! select_value_int {
    ($($ty:ty),*) => {
        $(
            impl SelectValue for $ty {
                fn to_key(&self) -> String {
                    self.to_string()
                }

                fn from_key(key: &str) -> Option<Self> {
                    key.parse().ok()
                }
            }
        )*
    };
}

select_value_int!(i64, i32, u32, u64);

impl SelectValue for String {
    fn to_key(&self) -> String {
        self.clone()
    }

    fn from_key(key: &str) -> Option<Self> {
        Some(key.to_string())
    }
}

/// Current choice of a select. `Empty` is the placeholder and never equals
/// a domain value, including `0` and `""`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection<V> {
    #[default]
    Empty,
    Value(V),
}

/// Prefix that keeps value keys apart from the placeholder key
const VALUE_KEY_PREFIX: char = '=';

impl<V: SelectValue> Selection<V> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }

    pub fn value(&self) -> Option<&V> {
        match self {
            Selection::Empty => None,
            Selection::Value(v) => Some(v),
        }
    }

    pub fn into_option(self) -> Option<V> {
        match self {
            Selection::Empty => None,
            Selection::Value(v) => Some(v),
        }
    }

    /// Menu key: empty for the placeholder, prefixed value key otherwise
    pub fn to_key(&self) -> String {
        match self {
            Selection::Empty => String::new(),
            Selection::Value(v) => format!("{VALUE_KEY_PREFIX}{}", v.to_key()),
        }
    }

    /// Inverse of [`to_key`](Self::to_key); `None` for keys no value produces
    pub fn from_key(key: &str) -> Option<Self> {
        if key.is_empty() {
            return Some(Selection::Empty);
        }
        key.strip_prefix(VALUE_KEY_PREFIX)
            .and_then(V::from_key)
            .map(Selection::Value)
    }
}

impl<V> From<Option<V>> for Selection<V> {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(v) => Selection::Value(v),
            None => Selection::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_keys() {
        let cases: Vec<Selection<i64>> = vec![
            Selection::Empty,
            Selection::Value(0),
            Selection::Value(-4),
            Selection::Value(1234),
        ];
        for sel in cases {
            assert_eq!(Selection::from_key(&sel.to_key()), Some(sel.clone()));
        }

        let text: Vec<Selection<String>> = vec![
            Selection::Empty,
            Selection::Value(String::new()),
            Selection::Value("ACTIVO".to_string()),
        ];
        for sel in text {
            assert_eq!(Selection::from_key(&sel.to_key()), Some(sel.clone()));
        }
    }

    #[test]
    fn test_placeholder_is_distinct() {
        assert_ne!(Selection::<i64>::Empty, Selection::Value(0));
        assert_ne!(
            Selection::<String>::Empty.to_key(),
            Selection::Value(String::new()).to_key()
        );
        assert!(Selection::<u32>::default().is_empty());
    }

    #[test]
    fn test_bad_keys() {
        assert_eq!(Selection::<i64>::from_key("=abc"), None);
        assert_eq!(Selection::<i64>::from_key("12"), None);
        assert_eq!(Selection::<u32>::from_key("=-1"), None);
    }
}
