use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Three-state update for a nullable field in a partial update.
///
/// On the wire `NoChange` is an omitted key, `Clear` is `null` and
/// `Set(value)` is the value itself.
///
/// # Example
///
/// ```
/// use taskboard_domain::FieldUpdate;
///
/// let mut field = Some("old value".to_string());
/// FieldUpdate::Set("new value".to_string()).apply_to(&mut field);
/// assert_eq!(field, Some("new value".to_string()));
///
/// FieldUpdate::Clear.apply_to(&mut field);
/// assert_eq!(field, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Keep the existing value
    NoChange,
    /// Replace the value
    Set(T),
    /// Set the field to null
    Clear,
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::NoChange
    }
}

impl<T> FieldUpdate<T> {
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = Some(value),
            FieldUpdate::Clear => *field = None,
        }
    }

    pub fn is_change(&self) -> bool {
        !self.is_no_change()
    }

    pub fn is_no_change(&self) -> bool {
        matches!(self, FieldUpdate::NoChange)
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        }
    }
}

impl<T: Serialize> Serialize for FieldUpdate<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldUpdate::Set(value) => serializer.serialize_some(value),
            FieldUpdate::NoChange | FieldUpdate::Clear => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldUpdate<T> {
    /// Only called for keys that are present, so a missing key falls back to
    /// `NoChange` through `#[serde(default)]`.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(FieldUpdate::from)
    }
}
