//! Typed symbolic field types.
//!
//! A model struct declares its fields with these types; each converts to
//! and from the dynamic [`AttrValue`] and reports its static [`AttrType`].

use std::collections::BTreeMap;

use crate::error::FlexError;
use crate::schema::AttrType;
use crate::value::{same_elements, AttrValue, Payload};

/// Any type usable as a symbolic field or container element.
pub trait Symbolic: Sized {
    fn attr_type() -> AttrType;
    fn to_value(&self) -> AttrValue;
    fn from_value(value: AttrValue) -> Result<Self, FlexError>;
}

/// Payload types: what a `Known` value can carry.
pub trait Known: Sized {
    fn known_type() -> AttrType;
    fn to_payload(&self) -> Payload;
    fn from_payload(payload: Payload) -> Result<Self, FlexError>;
}

/// Tri-state symbolic value of a statically known payload type.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Attr<T> {
    #[default]
    Null,
    Unknown,
    Known(T),
}

impl<T> Attr<T> {
    pub fn known(value: impl Into<T>) -> Self {
        Attr::Known(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Attr::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Attr::Unknown)
    }

    pub fn as_known(&self) -> Option<&T> {
        match self {
            Attr::Known(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_known(self) -> Option<T> {
        match self {
            Attr::Known(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> From<T> for Attr<T> {
    fn from(value: T) -> Self {
        Attr::Known(value)
    }
}

impl From<&str> for Attr<String> {
    fn from(value: &str) -> Self {
        Attr::Known(value.to_string())
    }
}

impl<T: Known> Symbolic for Attr<T> {
    fn attr_type() -> AttrType {
        T::known_type()
    }

    fn to_value(&self) -> AttrValue {
        match self {
            Attr::Null => AttrValue::Null,
            Attr::Unknown => AttrValue::Unknown,
            Attr::Known(v) => AttrValue::Known(v.to_payload()),
        }
    }

    fn from_value(value: AttrValue) -> Result<Self, FlexError> {
        match value {
            AttrValue::Null => Ok(Attr::Null),
            AttrValue::Unknown => Ok(Attr::Unknown),
            AttrValue::Known(p) => T::from_payload(p).map(Attr::Known),
        }
    }
}

pub type StringValue = Attr<String>;
pub type Int64Value = Attr<i64>;
pub type Float64Value = Attr<f64>;
pub type BoolValue = Attr<bool>;
pub type ListValue<E> = Attr<List<E>>;
pub type SetValue<E> = Attr<Set<E>>;
pub type MapValue<E> = Attr<Map<E>>;
/// Single nested object, nullable.
pub type NestedObject<M> = Attr<M>;
pub type ListNestedObject<M> = Attr<List<M>>;
pub type SetNestedObject<M> = Attr<Set<M>>;

/// Read a `Known` payload into `T`, rejecting `Null`/`Unknown`.
///
/// Used by element types that have no absent state of their own.
pub fn require_known<T: Known>(value: AttrValue) -> Result<T, FlexError> {
    match value {
        AttrValue::Known(p) => T::from_payload(p),
        other => Err(FlexError::type_mismatch(format!(
            "expected known {}, got {}",
            T::known_type(),
            other.describe()
        ))),
    }
}

fn payload_mismatch(expected: &AttrType, got: &Payload) -> FlexError {
    FlexError::type_mismatch(format!("expected {expected}, got {}", got.describe()))
}

macro_rules! scalar_known {
    ($ty:ty, $variant:ident, $attr:ident) => {
        impl Known for $ty {
            fn known_type() -> AttrType {
                AttrType::$attr
            }

            fn to_payload(&self) -> Payload {
                Payload::$variant(self.clone())
            }

            fn from_payload(payload: Payload) -> Result<Self, FlexError> {
                match payload {
                    Payload::$variant(v) => Ok(v),
                    other => Err(payload_mismatch(&AttrType::$attr, &other)),
                }
            }
        }

        impl Symbolic for $ty {
            fn attr_type() -> AttrType {
                AttrType::$attr
            }

            fn to_value(&self) -> AttrValue {
                AttrValue::Known(self.to_payload())
            }

            fn from_value(value: AttrValue) -> Result<Self, FlexError> {
                require_known(value)
            }
        }
    };
}

scalar_known!(String, String, String);
scalar_known!(i64, Int64, Int64);
scalar_known!(f64, Float64, Float64);
scalar_known!(bool, Bool, Bool);

/// Ordered list payload.
#[derive(Debug, Clone, PartialEq)]
pub struct List<E>(pub Vec<E>);

impl<E> Default for List<E> {
    fn default() -> Self {
        List(Vec::new())
    }
}

impl<E> From<Vec<E>> for List<E> {
    fn from(items: Vec<E>) -> Self {
        List(items)
    }
}

impl<E: Symbolic> Known for List<E> {
    fn known_type() -> AttrType {
        AttrType::List(Box::new(E::attr_type()))
    }

    fn to_payload(&self) -> Payload {
        Payload::List(self.0.iter().map(E::to_value).collect())
    }

    fn from_payload(payload: Payload) -> Result<Self, FlexError> {
        match payload {
            Payload::List(items) => from_elements(items).map(List),
            other => Err(payload_mismatch(&Self::known_type(), &other)),
        }
    }
}

/// Unordered set payload. Elements are unique by symbolic value.
#[derive(Debug, Clone)]
pub struct Set<E>(Vec<E>);

impl<E: PartialEq> PartialEq for Set<E> {
    fn eq(&self, other: &Self) -> bool {
        same_elements(&self.0, &other.0)
    }
}

impl<E: Symbolic> Set<E> {
    /// Build a set; later duplicates of an element are dropped.
    pub fn new(items: impl IntoIterator<Item = E>) -> Self {
        let mut seen: Vec<AttrValue> = Vec::new();
        let mut unique = Vec::new();
        for item in items {
            let value = item.to_value();
            if !seen.contains(&value) {
                seen.push(value);
                unique.push(item);
            }
        }
        Set(unique)
    }
}

impl<E> Set<E> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<E> {
        self.0
    }
}

impl<E> Default for Set<E> {
    fn default() -> Self {
        Set(Vec::new())
    }
}

impl<E: Symbolic> From<Vec<E>> for Set<E> {
    fn from(items: Vec<E>) -> Self {
        Set::new(items)
    }
}

impl<E: Symbolic> Known for Set<E> {
    fn known_type() -> AttrType {
        AttrType::Set(Box::new(E::attr_type()))
    }

    fn to_payload(&self) -> Payload {
        Payload::set(self.0.iter().map(E::to_value))
    }

    fn from_payload(payload: Payload) -> Result<Self, FlexError> {
        match payload {
            Payload::Set(items) => from_elements(items).map(Set::new),
            other => Err(payload_mismatch(&Self::known_type(), &other)),
        }
    }
}

/// String-keyed map payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Map<E>(pub BTreeMap<String, E>);

impl<E> Default for Map<E> {
    fn default() -> Self {
        Map(BTreeMap::new())
    }
}

impl<E, K: Into<String>> FromIterator<(K, E)> for Map<E> {
    fn from_iter<I: IntoIterator<Item = (K, E)>>(iter: I) -> Self {
        Map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<E: Symbolic> Known for Map<E> {
    fn known_type() -> AttrType {
        AttrType::Map(Box::new(E::attr_type()))
    }

    fn to_payload(&self) -> Payload {
        Payload::Map(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }

    fn from_payload(payload: Payload) -> Result<Self, FlexError> {
        match payload {
            Payload::Map(entries) => entries
                .into_iter()
                .map(|(k, v)| match E::from_value(v) {
                    Ok(v) => Ok((k, v)),
                    Err(e) => Err(e.at_key(&k)),
                })
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(Map),
            other => Err(payload_mismatch(&Self::known_type(), &other)),
        }
    }
}

fn from_elements<E: Symbolic>(items: Vec<AttrValue>) -> Result<Vec<E>, FlexError> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| E::from_value(item).map_err(|e| e.at_index(i)))
        .collect()
}
