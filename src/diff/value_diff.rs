//! Before/after pairs for scalar attributes.

use serde::Serialize;

/// A changed scalar value.
///
/// Only built through [`ValueDiff::of`], which refuses equal inputs, so a
/// `ValueDiff` always records a real change. For optional attributes `T` is an
/// `Option`, which keeps "unset" distinct from every concrete value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = "T: Serialize + ZeroValue"))]
pub struct ValueDiff<T> {
    #[serde(skip_serializing_if = "ZeroValue::is_zero")]
    pub before: T,
    #[serde(skip_serializing_if = "ZeroValue::is_zero")]
    pub after: T,
}

impl<T: PartialEq + Clone> ValueDiff<T> {
    /// `Some` when the two values differ.
    #[must_use]
    pub fn of(before: &T, after: &T) -> Option<Self> {
        (before != after).then(|| Self {
            before: before.clone(),
            after: after.clone(),
        })
    }
}

/// Values omitted from serialized output: `false`, `None`, empty strings.
pub trait ZeroValue {
    fn is_zero(&self) -> bool;
}

impl ZeroValue for bool {
    fn is_zero(&self) -> bool {
        !*self
    }
}

impl ZeroValue for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T> ZeroValue for Option<T> {
    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_values_produce_nothing() {
        assert!(ValueDiff::of(&true, &true).is_none());
        assert!(ValueDiff::<Option<f64>>::of(&None, &None).is_none());
        assert!(ValueDiff::of(&Some(1.5), &Some(1.5)).is_none());
    }

    #[test]
    fn test_absent_differs_from_zero() {
        let diff = ValueDiff::of(&None, &Some(0_u64)).expect("absent vs zero");
        assert_eq!(diff.before, None);
        assert_eq!(diff.after, Some(0));
    }

    #[test]
    fn test_serialization_omits_zero_side() {
        let diff = ValueDiff::of(&false, &true).expect("changed");
        assert_eq!(
            serde_json::to_value(&diff).expect("serializes"),
            serde_json::json!({"after": true})
        );

        let diff = ValueDiff::of(&Some("int32".to_string()), &None).expect("changed");
        assert_eq!(
            serde_json::to_value(&diff).expect("serializes"),
            serde_json::json!({"before": "int32"})
        );
    }
}
