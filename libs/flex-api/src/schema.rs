use std::fmt;

use serde::Serialize;

/// Primitive kind shared by both representation classes.
///
/// The symbolic side only ever uses the 64-bit kinds; the native side
/// may use any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    String,
    Int32,
    Int64,
    Float32,
    Float64,
    Bool,
}

/// Kinds that convert into each other modulo width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarFamily {
    Text,
    Integer,
    Float,
    Bool,
}

impl ScalarKind {
    pub fn family(self) -> ScalarFamily {
        match self {
            ScalarKind::String => ScalarFamily::Text,
            ScalarKind::Int32 | ScalarKind::Int64 => ScalarFamily::Integer,
            ScalarKind::Float32 | ScalarKind::Float64 => ScalarFamily::Float,
            ScalarKind::Bool => ScalarFamily::Bool,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Int32 => "int32",
            ScalarKind::Int64 => "int64",
            ScalarKind::Float32 => "float32",
            ScalarKind::Float64 => "float64",
            ScalarKind::Bool => "bool",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared type of a symbolic-model field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrType {
    String,
    Int64,
    Float64,
    Bool,
    List(Box<AttrType>),
    Set(Box<AttrType>),
    Map(Box<AttrType>),
    Object(StructShape),
}

impl AttrType {
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            AttrType::String => Some(ScalarKind::String),
            AttrType::Int64 => Some(ScalarKind::Int64),
            AttrType::Float64 => Some(ScalarKind::Float64),
            AttrType::Bool => Some(ScalarKind::Bool),
            _ => None,
        }
    }

    /// Element type of a list or set.
    pub fn collection_element(&self) -> Option<&AttrType> {
        match self {
            AttrType::List(elem) | AttrType::Set(elem) => Some(elem),
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, AttrType::Object(_))
    }
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrType::String => f.write_str("string"),
            AttrType::Int64 => f.write_str("int64"),
            AttrType::Float64 => f.write_str("float64"),
            AttrType::Bool => f.write_str("bool"),
            AttrType::List(elem) => write!(f, "list<{elem}>"),
            AttrType::Set(elem) => write!(f, "set<{elem}>"),
            AttrType::Map(elem) => write!(f, "map<{elem}>"),
            AttrType::Object(shape) => write!(f, "object {}", shape.name),
        }
    }
}

/// Declared type of a native field.
///
/// `Ptr` is the optional wrapper (`Option<T>`); `Box<T>` does not show up here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeType {
    String,
    Int32,
    Int64,
    Float32,
    Float64,
    Bool,
    Ptr(Box<NativeType>),
    Seq(Box<NativeType>),
    Map(Box<NativeType>),
    Struct(StructShape),
}

impl NativeType {
    /// Strip every optional wrapper.
    pub fn pointee(&self) -> &NativeType {
        let mut ty = self;
        while let NativeType::Ptr(inner) = ty {
            ty = inner;
        }
        ty
    }

    pub fn is_ptr(&self) -> bool {
        matches!(self, NativeType::Ptr(_))
    }

    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            NativeType::String => Some(ScalarKind::String),
            NativeType::Int32 => Some(ScalarKind::Int32),
            NativeType::Int64 => Some(ScalarKind::Int64),
            NativeType::Float32 => Some(ScalarKind::Float32),
            NativeType::Float64 => Some(ScalarKind::Float64),
            NativeType::Bool => Some(ScalarKind::Bool),
            _ => None,
        }
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeType::Ptr(inner) => write!(f, "*{inner}"),
            NativeType::Seq(elem) => write!(f, "[]{elem}"),
            NativeType::Map(elem) => write!(f, "map[string]{elem}"),
            NativeType::Struct(shape) => write!(f, "struct {}", shape.name),
            other => match other.scalar_kind() {
                Some(kind) => f.write_str(kind.name()),
                None => Ok(()),
            },
        }
    }
}

/// Declared type of a struct field: either representation class.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Attr(AttrType),
    Native(NativeType),
}

/// A single field of a struct.
///
/// `tag` is the correspondence identifier; symbolic models carry one per
/// field, native structs usually don't.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldShape {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<&'static str>,
    pub ty: FieldType,
}

impl FieldShape {
    /// Logical attribute name: the tag when declared, the field name otherwise.
    pub fn key(&self) -> &'static str {
        self.tag.unwrap_or(self.name)
    }
}

/// Field layout of a struct, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructShape {
    pub name: &'static str,
    pub fields: Vec<FieldShape>,
}

impl StructShape {
    pub fn field(&self, name: &str) -> Option<&FieldShape> {
        self.fields.iter().find(|f| f.name == name)
    }
}
