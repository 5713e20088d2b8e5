//! Nested objects: a single object, or a list/set of them, against a
//! native struct, pointer-to-struct, or sequence of either.
//!
//! Every object pair re-enters the dispatch core with its own field lists.

use flex_api::error::FlexError;
use flex_api::schema::{AttrType, NativeType, StructShape};
use flex_api::value::{AttrValue, NativeValue, ObjectValue, Payload, StructValue};

use crate::config::ConversionOptions;
use crate::dispatch::{self, SourceField, SourceValue};

static NULL: AttrValue = AttrValue::Null;
static NIL: NativeValue = NativeValue::Nil;

pub(crate) fn expand(
    value: &AttrValue,
    attr: &AttrType,
    native: &NativeType,
    options: &ConversionOptions,
) -> Result<NativeValue, FlexError> {
    let Some(payload) = dispatch::known(value, options)? else {
        return Ok(NativeValue::Nil);
    };
    let target = native.pointee();

    match (attr, payload, target) {
        (AttrType::Object(source), Payload::Object(object), NativeType::Struct(shape)) => {
            expand_object(object, source, shape, options)
        }
        (
            AttrType::List(elem) | AttrType::Set(elem),
            Payload::List(items) | Payload::Set(items),
            NativeType::Seq(native_elem),
        ) => dispatch::expand_elements(items, elem, native_elem, options).map(NativeValue::Seq),
        // A single native struct fed from a collection takes its first element.
        (
            AttrType::List(elem) | AttrType::Set(elem),
            Payload::List(items) | Payload::Set(items),
            NativeType::Struct(_),
        ) => match items.first() {
            Some(first) => {
                if items.len() > 1 {
                    tracing::trace!(dropped = items.len() - 1, into = %target, "keeping first nested object");
                }
                dispatch::expand_value(first, elem, target, options).map_err(|e| e.at_index(0))
            }
            None => Ok(NativeValue::Nil),
        },
        (_, payload, target) => Err(FlexError::type_mismatch(format!(
            "cannot expand {} into {target}",
            payload.describe()
        ))),
    }
}

fn expand_object(
    object: &ObjectValue,
    source: &StructShape,
    target: &StructShape,
    options: &ConversionOptions,
) -> Result<NativeValue, FlexError> {
    let fields: Vec<SourceField<'_>> = source
        .fields
        .iter()
        .map(|shape| SourceField {
            shape,
            value: SourceValue::Attr(object.get(shape.key()).unwrap_or(&NULL)),
        })
        .collect();

    let mut out = StructValue::new();
    dispatch::expand_fields(&fields, target, options, &mut |field, value| {
        out.insert(field.name, value);
        Ok(())
    })?;
    Ok(NativeValue::Struct(out))
}

pub(crate) fn flatten(
    value: &NativeValue,
    native: &NativeType,
    attr: &AttrType,
) -> Result<AttrValue, FlexError> {
    let source = native.pointee();

    let payload = match (value, source, attr) {
        (NativeValue::Nil, _, _) => return Ok(AttrValue::Null),
        (NativeValue::Struct(fields), NativeType::Struct(shape), AttrType::Object(target)) => {
            Payload::Object(flatten_object(fields, shape, target)?)
        }
        (NativeValue::Struct(_), NativeType::Struct(_), AttrType::List(elem)) => {
            Payload::List(vec![dispatch::flatten_value(value, source, elem)?])
        }
        (NativeValue::Struct(_), NativeType::Struct(_), AttrType::Set(elem)) => {
            Payload::set([dispatch::flatten_value(value, source, elem)?])
        }
        (NativeValue::Seq(items), NativeType::Seq(native_elem), AttrType::List(elem)) => {
            Payload::List(dispatch::flatten_elements(items, native_elem, elem)?)
        }
        (NativeValue::Seq(items), NativeType::Seq(native_elem), AttrType::Set(elem)) => {
            Payload::set(dispatch::flatten_elements(items, native_elem, elem)?)
        }
        (value, _, attr) => {
            return Err(FlexError::type_mismatch(format!(
                "cannot flatten {} into {attr}",
                value.describe()
            )))
        }
    };
    Ok(AttrValue::Known(payload))
}

fn flatten_object(
    fields: &StructValue,
    source: &StructShape,
    target: &StructShape,
) -> Result<ObjectValue, FlexError> {
    let source_fields: Vec<SourceField<'_>> = source
        .fields
        .iter()
        .map(|shape| SourceField {
            shape,
            value: SourceValue::Native(fields.get(shape.name).unwrap_or(&NIL)),
        })
        .collect();

    let mut out = ObjectValue::new();
    dispatch::flatten_fields(&source_fields, target, &mut |field, value| {
        out.insert(field.key(), value);
        Ok(())
    })?;
    Ok(out)
}
