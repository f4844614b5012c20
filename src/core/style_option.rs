use serde::{Deserialize, Serialize};

/// Per-bar style value: one value for every stacked bar, or a list cycled by
/// bar index.
///
/// JSON shape is a plain scalar or `{"v": [...]}` (`{"list": [...]}` is
/// accepted as well).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleOption<T> {
    Fixed(T),
    Cycling {
        #[serde(rename = "v", alias = "list")]
        values: Vec<T>,
    },
}

impl<T: Clone> StyleOption<T> {
    #[must_use]
    pub fn cycling(values: impl Into<Vec<T>>) -> Self {
        Self::Cycling {
            values: values.into(),
        }
    }

    /// Value for bar `index`; `None` only for an empty cycling list.
    #[must_use]
    pub fn resolve(&self, index: usize) -> Option<T> {
        match self {
            Self::Fixed(value) => Some(value.clone()),
            Self::Cycling { values } if values.is_empty() => None,
            Self::Cycling { values } => Some(values[index % values.len()].clone()),
        }
    }

    /// Like `resolve`, with a fallback for empty lists.
    #[must_use]
    pub fn resolve_or(&self, index: usize, fallback: T) -> T {
        self.resolve(index).unwrap_or(fallback)
    }
}

impl<T> From<T> for StyleOption<T> {
    fn from(value: T) -> Self {
        Self::Fixed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::StyleOption;

    #[test]
    fn fixed_value_ignores_index() {
        let option = StyleOption::Fixed(3.0);
        for index in 0..5 {
            assert_eq!(option.resolve(index), Some(3.0));
        }
    }

    #[test]
    fn cycling_list_wraps_by_index() {
        let option = StyleOption::cycling(vec![1.0, 3.0]);
        assert_eq!(option.resolve(0), Some(1.0));
        assert_eq!(option.resolve(1), Some(3.0));
        assert_eq!(option.resolve(2), Some(1.0));
    }

    #[test]
    fn empty_list_falls_back() {
        let option: StyleOption<f64> = StyleOption::cycling(Vec::new());
        assert_eq!(option.resolve(0), None);
        assert_eq!(option.resolve_or(0, 2.0), 2.0);
    }

    #[test]
    fn json_accepts_scalar_and_wrapped_list() {
        let fixed: StyleOption<f64> = serde_json::from_str("4").expect("scalar");
        assert_eq!(fixed, StyleOption::Fixed(4.0));
        let list: StyleOption<f64> = serde_json::from_str(r#"{"v":[1,3]}"#).expect("list");
        assert_eq!(list, StyleOption::cycling(vec![1.0, 3.0]));
        let alias: StyleOption<f64> = serde_json::from_str(r#"{"list":[2]}"#).expect("alias");
        assert_eq!(alias, StyleOption::cycling(vec![2.0]));
    }
}
