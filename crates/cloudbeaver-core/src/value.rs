// ── Tri-state attribute values ──
//
// Every declared attribute is Known, Null or Unknown. Null means the
// caller declared absence (or said nothing); Unknown means an earlier
// step has not computed the value yet. The two must never collapse.

use std::fmt;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Error as _, Serialize, Serializer};

/// A declared attribute value.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Value<T> {
    /// A concrete value.
    Known(T),
    /// Explicitly absent.
    Null,
    /// Not yet computed; must never be read as a usable value.
    Unknown,
}

impl<T> Default for Value<T> {
    fn default() -> Self {
        Self::Null
    }
}

impl<T> Value<T> {
    pub fn known(value: impl Into<T>) -> Self {
        Self::Known(value.into())
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// The value, only when Known.
    pub fn as_known(&self) -> Option<&T> {
        match self {
            Self::Known(v) => Some(v),
            Self::Null | Self::Unknown => None,
        }
    }

    pub fn into_known(self) -> Option<T> {
        match self {
            Self::Known(v) => Some(v),
            Self::Null | Self::Unknown => None,
        }
    }

    pub fn as_ref(&self) -> Value<&T> {
        match self {
            Self::Known(v) => Value::Known(v),
            Self::Null => Value::Null,
            Self::Unknown => Value::Unknown,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Value<U> {
        match self {
            Self::Known(v) => Value::Known(f(v)),
            Self::Null => Value::Null,
            Self::Unknown => Value::Unknown,
        }
    }

    /// Replace Null with `fallback`. Unknown stays Unknown: defaults and
    /// environment fallbacks never stand in for a value still being computed.
    pub fn or_if_null(self, fallback: impl FnOnce() -> Option<T>) -> Self {
        match self {
            Self::Null => fallback().map_or(Self::Null, Self::Known),
            other => other,
        }
    }
}

impl Value<String> {
    /// The known string, or `""` for Null and Unknown.
    pub fn value_str(&self) -> &str {
        self.as_known().map_or("", String::as_str)
    }

    /// Known and not the empty string.
    pub fn is_non_empty(&self) -> bool {
        !self.value_str().is_empty()
    }
}

impl<T> From<T> for Value<T> {
    fn from(value: T) -> Self {
        Self::Known(value)
    }
}

impl<T> From<Option<T>> for Value<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Known)
    }
}

impl From<&str> for Value<String> {
    fn from(value: &str) -> Self {
        Self::Known(value.to_owned())
    }
}

impl<T: fmt::Debug> fmt::Debug for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(v) => f.debug_tuple("Known").field(v).finish(),
            Self::Null => f.write_str("Null"),
            Self::Unknown => f.write_str("Unknown"),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(v) => write!(f, "{v}"),
            Self::Null => f.write_str("(null)"),
            Self::Unknown => f.write_str("(known after apply)"),
        }
    }
}

// ── Serde ───────────────────────────────────────────────────────────
//
// Known serializes as the bare value, Null as `null`. Unknown has no
// persisted form: state is only written after a remote round trip.

impl<T: Serialize> Serialize for Value<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(v) => serializer.serialize_some(v),
            Self::Null => serializer.serialize_none(),
            Self::Unknown => Err(S::Error::custom("cannot persist an unknown value")),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Value<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<T>::deserialize(deserializer)?.into())
    }
}
