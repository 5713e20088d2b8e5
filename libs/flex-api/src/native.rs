//! Native field types.
//!
//! `Option<T>` is the optional (pointer) encoding: `None` ⇔ `Nil`.
//! Bare types read `Nil` as their zero value.

use std::collections::{BTreeMap, HashMap};

use crate::error::FlexError;
use crate::schema::NativeType;
use crate::value::NativeValue;

/// Any type usable as a native struct field or container element.
pub trait Native: Sized {
    fn native_type() -> NativeType;
    fn to_native(&self) -> NativeValue;
    fn from_native(value: NativeValue) -> Result<Self, FlexError>;
}

fn native_mismatch(expected: &NativeType, got: &NativeValue) -> FlexError {
    FlexError::type_mismatch(format!("expected {expected}, got {}", got.describe()))
}

macro_rules! scalar_native {
    ($ty:ty, $variant:ident) => {
        impl Native for $ty {
            fn native_type() -> NativeType {
                NativeType::$variant
            }

            fn to_native(&self) -> NativeValue {
                NativeValue::$variant(self.clone())
            }

            fn from_native(value: NativeValue) -> Result<Self, FlexError> {
                match value {
                    NativeValue::$variant(v) => Ok(v),
                    NativeValue::Nil => Ok(<$ty>::default()),
                    other => Err(native_mismatch(&NativeType::$variant, &other)),
                }
            }
        }
    };
}

scalar_native!(String, String);
scalar_native!(i32, Int32);
scalar_native!(i64, Int64);
scalar_native!(f32, Float32);
scalar_native!(f64, Float64);
scalar_native!(bool, Bool);

impl<T: Native> Native for Option<T> {
    fn native_type() -> NativeType {
        NativeType::Ptr(Box::new(T::native_type()))
    }

    fn to_native(&self) -> NativeValue {
        match self {
            Some(v) => v.to_native(),
            None => NativeValue::Nil,
        }
    }

    fn from_native(value: NativeValue) -> Result<Self, FlexError> {
        match value {
            NativeValue::Nil => Ok(None),
            present => T::from_native(present).map(Some),
        }
    }
}

impl<T: Native> Native for Box<T> {
    fn native_type() -> NativeType {
        T::native_type()
    }

    fn to_native(&self) -> NativeValue {
        (**self).to_native()
    }

    fn from_native(value: NativeValue) -> Result<Self, FlexError> {
        T::from_native(value).map(Box::new)
    }
}

impl<T: Native> Native for Vec<T> {
    fn native_type() -> NativeType {
        NativeType::Seq(Box::new(T::native_type()))
    }

    fn to_native(&self) -> NativeValue {
        NativeValue::Seq(self.iter().map(T::to_native).collect())
    }

    fn from_native(value: NativeValue) -> Result<Self, FlexError> {
        match value {
            NativeValue::Seq(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| T::from_native(item).map_err(|e| e.at_index(i)))
                .collect(),
            NativeValue::Nil => Ok(Vec::new()),
            other => Err(native_mismatch(&Self::native_type(), &other)),
        }
    }
}

fn entries_from_native<T: Native, M>(value: NativeValue, expected: NativeType) -> Result<M, FlexError>
where
    M: FromIterator<(String, T)>,
{
    match value {
        NativeValue::Map(entries) => entries
            .into_iter()
            .map(|(k, v)| match T::from_native(v) {
                Ok(v) => Ok((k, v)),
                Err(e) => Err(e.at_key(&k)),
            })
            .collect(),
        NativeValue::Nil => Ok(std::iter::empty().collect()),
        other => Err(native_mismatch(&expected, &other)),
    }
}

impl<T: Native> Native for BTreeMap<String, T> {
    fn native_type() -> NativeType {
        NativeType::Map(Box::new(T::native_type()))
    }

    fn to_native(&self) -> NativeValue {
        NativeValue::Map(self.iter().map(|(k, v)| (k.clone(), v.to_native())).collect())
    }

    fn from_native(value: NativeValue) -> Result<Self, FlexError> {
        entries_from_native(value, Self::native_type())
    }
}

impl<T: Native> Native for HashMap<String, T> {
    fn native_type() -> NativeType {
        NativeType::Map(Box::new(T::native_type()))
    }

    fn to_native(&self) -> NativeValue {
        NativeValue::Map(self.iter().map(|(k, v)| (k.clone(), v.to_native())).collect())
    }

    fn from_native(value: NativeValue) -> Result<Self, FlexError> {
        entries_from_native(value, Self::native_type())
    }
}
