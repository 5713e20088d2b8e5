// Derived impls refer to `::flex_api`, also from inside this crate's tests.
extern crate self as flex_api;

pub mod attr;
pub mod error;
pub mod native;
pub mod reflect;
pub mod schema;
pub mod value;

pub use flex_api_derive::{Model, Native};

pub use attr::{
    Attr, BoolValue, Float64Value, Int64Value, List, ListNestedObject, ListValue, Map, MapValue,
    NestedObject, Set, SetNestedObject, SetValue, StringValue, Symbolic,
};
pub use error::{ErrorKind, FlexError};
pub use native::Native;
pub use reflect::{FieldValue, Model, NativeStruct, Reflect, Struct};
pub use value::{AttrValue, NativeValue, Payload};
