use crate::attr::{Known, Symbolic};
use crate::error::FlexError;
use crate::native::Native;
use crate::schema::StructShape;
use crate::value::{AttrValue, NativeValue};

/// Value of a single struct field, tagged with its representation class.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Attr(AttrValue),
    Native(NativeValue),
}

impl FieldValue {
    pub fn into_attr(self) -> Result<AttrValue, FlexError> {
        match self {
            FieldValue::Attr(v) => Ok(v),
            FieldValue::Native(v) => Err(FlexError::type_mismatch(format!(
                "expected symbolic value, got native {}",
                v.describe()
            ))),
        }
    }

    pub fn into_native(self) -> Result<NativeValue, FlexError> {
        match self {
            FieldValue::Native(v) => Ok(v),
            FieldValue::Attr(v) => Err(FlexError::type_mismatch(format!(
                "expected native value, got symbolic {}",
                v.describe()
            ))),
        }
    }
}

/// Field access on a struct of either representation class.
///
/// Implemented by `#[derive(Model)]` and `#[derive(Native)]`.
pub trait Struct {
    fn type_name(&self) -> &'static str;
    fn shape(&self) -> StructShape;
    /// `None` when the struct has no field called `field`.
    fn get(&self, field: &str) -> Option<FieldValue>;
    fn set(&mut self, field: &str, value: FieldValue) -> Result<(), FlexError>;
}

/// Symbolic model struct.
pub trait Model: Struct + Symbolic + Known + Default {
    fn struct_shape() -> StructShape;
}

/// Native struct.
pub trait NativeStruct: Struct + Native + Default {
    fn struct_shape() -> StructShape;
}

/// Top-level classification of a conversion operand.
pub enum Reflected<'a> {
    Struct(&'a dyn Struct),
    /// Absent optional (`None`).
    Nil,
    /// Anything that is not a struct; carries its kind name.
    Value(&'static str),
}

pub enum ReflectedMut<'a> {
    Struct(&'a mut dyn Struct),
    Nil,
    Value(&'static str),
}

/// Entry-point operand. Object-safe so callers can pass any value.
pub trait Reflect {
    fn reflect(&self) -> Reflected<'_>;
    fn reflect_mut(&mut self) -> ReflectedMut<'_>;
}

impl<T: Reflect> Reflect for Option<T> {
    fn reflect(&self) -> Reflected<'_> {
        match self {
            Some(v) => v.reflect(),
            None => Reflected::Nil,
        }
    }

    fn reflect_mut(&mut self) -> ReflectedMut<'_> {
        match self {
            Some(v) => v.reflect_mut(),
            None => ReflectedMut::Nil,
        }
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn reflect(&self) -> Reflected<'_> {
        (**self).reflect()
    }

    fn reflect_mut(&mut self) -> ReflectedMut<'_> {
        (**self).reflect_mut()
    }
}

macro_rules! non_struct {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn reflect(&self) -> Reflected<'_> {
                    Reflected::Value($name)
                }

                fn reflect_mut(&mut self) -> ReflectedMut<'_> {
                    ReflectedMut::Value($name)
                }
            }
        )*
    };
}

non_struct! {
    String => "string",
    i32 => "int32",
    i64 => "int64",
    f32 => "float32",
    f64 => "float64",
    bool => "bool",
}

impl<T> Reflect for Vec<T> {
    fn reflect(&self) -> Reflected<'_> {
        Reflected::Value("sequence")
    }

    fn reflect_mut(&mut self) -> ReflectedMut<'_> {
        ReflectedMut::Value("sequence")
    }
}
