use serde::{Serialize, Serializer};

/// A partial update of an optional field.
///
/// - `NoChange`: leave the stored value alone (omitted from the request body)
/// - `Set(value)`: replace it
/// - `Clear`: remove it (sent as `null`)
///
/// # Example
///
/// ```
/// use backlog_domain::FieldUpdate;
///
/// let mut points = Some(3);
/// FieldUpdate::Set(5).apply_to(&mut points);
/// assert_eq!(points, Some(5));
///
/// FieldUpdate::<u32>::Clear.apply_to(&mut points);
/// assert_eq!(points, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    #[default]
    NoChange,
    Set(T),
    Clear,
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
        !matches!(self, FieldUpdate::NoChange)
    }

    pub fn is_no_change(&self) -> bool {
        !self.is_change()
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

// Pair with `skip_serializing_if = "FieldUpdate::is_no_change"`.
impl<T: Serialize> Serialize for FieldUpdate<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldUpdate::Set(value) => value.serialize(serializer),
            FieldUpdate::Clear | FieldUpdate::NoChange => serializer.serialize_none(),
        }
    }
}
