use std::collections::BTreeMap;

use serde::Serialize;

/// Symbolic attribute value, in exactly one of three states.
///
/// `Unknown` is "not yet resolved" and has no native counterpart.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrValue {
    #[default]
    Null,
    Unknown,
    Known(Payload),
}

impl AttrValue {
    pub fn string(v: impl Into<String>) -> Self {
        AttrValue::Known(Payload::String(v.into()))
    }

    pub fn int64(v: i64) -> Self {
        AttrValue::Known(Payload::Int64(v))
    }

    pub fn float64(v: f64) -> Self {
        AttrValue::Known(Payload::Float64(v))
    }

    pub fn bool(v: bool) -> Self {
        AttrValue::Known(Payload::Bool(v))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, AttrValue::Unknown)
    }

    pub fn payload(&self) -> Option<&Payload> {
        match self {
            AttrValue::Known(p) => Some(p),
            _ => None,
        }
    }

    /// Short kind name for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            AttrValue::Null => "null",
            AttrValue::Unknown => "unknown",
            AttrValue::Known(p) => p.describe(),
        }
    }
}

/// Payload of a `Known` symbolic value.
///
/// Sets compare without regard to element order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    String(String),
    Int64(i64),
    Float64(f64),
    Bool(bool),
    /// Ordered; element order is significant.
    List(Vec<AttrValue>),
    /// Unordered; build with [`Payload::set`] to keep elements unique.
    Set(Vec<AttrValue>),
    Map(BTreeMap<String, AttrValue>),
    Object(ObjectValue),
}

impl Payload {
    /// Canonical set construction: duplicates are dropped, first occurrence wins.
    pub fn set(elems: impl IntoIterator<Item = AttrValue>) -> Self {
        let mut unique: Vec<AttrValue> = Vec::new();
        for elem in elems {
            if !unique.contains(&elem) {
                unique.push(elem);
            }
        }
        Payload::Set(unique)
    }

    /// Elements of a list or set.
    pub fn elements(&self) -> Option<&[AttrValue]> {
        match self {
            Payload::List(items) | Payload::Set(items) => Some(items),
            _ => None,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Payload::String(_) => "string",
            Payload::Int64(_) => "int64",
            Payload::Float64(_) => "float64",
            Payload::Bool(_) => "bool",
            Payload::List(_) => "list",
            Payload::Set(_) => "set",
            Payload::Map(_) => "map",
            Payload::Object(_) => "object",
        }
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Payload::String(a), Payload::String(b)) => a == b,
            (Payload::Int64(a), Payload::Int64(b)) => a == b,
            (Payload::Float64(a), Payload::Float64(b)) => a == b,
            (Payload::Bool(a), Payload::Bool(b)) => a == b,
            (Payload::List(a), Payload::List(b)) => a == b,
            (Payload::Set(a), Payload::Set(b)) => same_elements(a, b),
            (Payload::Map(a), Payload::Map(b)) => a == b,
            (Payload::Object(a), Payload::Object(b)) => a == b,
            _ => false,
        }
    }
}

/// Multiset equality over two slices.
pub(crate) fn same_elements<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    let count = |items: &[T], x: &T| items.iter().filter(|y| *y == x).count();
    a.len() == b.len() && a.iter().all(|x| count(a, x) == count(b, x))
}

/// Attributes of a nested symbolic object, keyed by correspondence tag.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ObjectValue {
    attrs: BTreeMap<String, AttrValue>,
}

impl ObjectValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: AttrValue) {
        self.attrs.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.attrs.remove(key)
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, AttrValue)> for ObjectValue {
    fn from_iter<I: IntoIterator<Item = (K, AttrValue)>>(iter: I) -> Self {
        Self {
            attrs: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Native value. Binary state space: `Nil` or present.
///
/// `Nil` reads back as `None` through an optional field and as the zero
/// value through a bare one.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeValue {
    #[default]
    Nil,
    String(String),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Bool(bool),
    Seq(Vec<NativeValue>),
    Map(BTreeMap<String, NativeValue>),
    Struct(StructValue),
}

impl NativeValue {
    pub fn is_nil(&self) -> bool {
        matches!(self, NativeValue::Nil)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            NativeValue::Nil => "nil",
            NativeValue::String(_) => "string",
            NativeValue::Int32(_) => "int32",
            NativeValue::Int64(_) => "int64",
            NativeValue::Float32(_) => "float32",
            NativeValue::Float64(_) => "float64",
            NativeValue::Bool(_) => "bool",
            NativeValue::Seq(_) => "sequence",
            NativeValue::Map(_) => "map",
            NativeValue::Struct(_) => "struct",
        }
    }
}

/// Field values of a native struct, keyed by field name.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct StructValue {
    fields: BTreeMap<String, NativeValue>,
}

impl StructValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: NativeValue) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&NativeValue> {
        self.fields.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<NativeValue> {
        self.fields.remove(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NativeValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, NativeValue)> for StructValue {
    fn from_iter<I: IntoIterator<Item = (K, NativeValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
