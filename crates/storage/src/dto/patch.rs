use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::ValidationError;

use crate::error::{Result, StorageError};

/// A field of a partial update payload.
///
/// Deserialize with `#[serde(default)]` so that an omitted key stays `Absent`
/// while an explicit JSON `null` becomes `Null`.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Self::Value(value),
            None => Self::Null,
        })
    }
}

/// Writes the present value, or `null` when there is none.
impl<T> Serialize for Patch<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.as_value().serialize(serializer)
    }
}

impl<T> Patch<T> {
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Merges into a NOT NULL column: absent keeps `current`, a value replaces
    /// it and null is rejected.
    pub fn merge(&self, field: &'static str, current: &T) -> Result<T>
    where
        T: Clone,
    {
        match self {
            Self::Absent => Ok(current.clone()),
            Self::Null => Err(StorageError::NullField(field)),
            Self::Value(value) => Ok(value.clone()),
        }
    }

    /// Runs `check` on a present value and rejects null.
    pub fn validate_with<F>(&self, check: F) -> std::result::Result<(), ValidationError>
    where
        F: FnOnce(&T) -> std::result::Result<(), ValidationError>,
    {
        match self {
            Self::Absent => Ok(()),
            Self::Null => Err(validation_error("null", "may not be null".into())),
            Self::Value(value) => check(value),
        }
    }
}

pub(crate) fn validation_error(code: &'static str, message: Cow<'static, str>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message);
    err
}

pub(crate) fn check_length(
    value: &str,
    min: usize,
    max: usize,
) -> std::result::Result<(), ValidationError> {
    let len = value.chars().count();
    if (min..=max).contains(&len) {
        Ok(())
    } else if min == max {
        Err(validation_error(
            "length",
            format!("must be exactly {} characters", min).into(),
        ))
    } else {
        Err(validation_error(
            "length",
            format!("must be between {} and {} characters", min, max).into(),
        ))
    }
}

#[cfg(test)]
pub(crate) fn error_codes(errors: &validator::ValidationErrors) -> Vec<String> {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter().map(|e| e.code.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default)]
        name: Patch<String>,
        #[serde(default)]
        age: Patch<i32>,
    }

    #[test]
    fn test_omitted_field_is_absent() {
        let payload: Payload = serde_json::from_str(r#"{"age": 30}"#).unwrap();
        assert_eq!(payload.name, Patch::Absent);
        assert_eq!(payload.age, Patch::Value(30));
    }

    #[test]
    fn test_explicit_null_is_null() {
        let payload: Payload = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(payload.name, Patch::Null);
        assert_eq!(payload.age, Patch::Absent);
    }

    #[test]
    fn test_serializes_like_an_option() {
        assert_eq!(serde_json::to_string(&Patch::Value(3)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&Patch::<i32>::Null).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Patch::<i32>::Absent).unwrap(), "null");
    }

    #[test]
    fn test_merge() {
        let current = "old".to_string();
        assert_eq!(Patch::Absent.merge("nome", &current).unwrap(), "old");
        assert_eq!(
            Patch::Value("new".to_string())
                .merge("nome", &current)
                .unwrap(),
            "new"
        );
        assert!(matches!(
            Patch::<String>::Null.merge("nome", &current),
            Err(StorageError::NullField("nome"))
        ));
    }

    #[test]
    fn test_validate_with() {
        let check = |v: &String| check_length(v, 1, 3);
        assert!(Patch::Absent.validate_with(check).is_ok());
        assert!(Patch::Value("abc".to_string()).validate_with(check).is_ok());
        assert!(Patch::Value("abcd".to_string()).validate_with(check).is_err());

        let err = Patch::<String>::Null.validate_with(check).unwrap_err();
        assert_eq!(err.code, "null");
    }

    #[test]
    fn test_check_length_counts_characters() {
        assert!(check_length("ação", 4, 4).is_ok());
        assert!(check_length("", 1, 50).is_err());
    }
}
