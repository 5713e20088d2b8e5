//! Lists, sets and string-keyed maps of primitives (or of anything the
//! dispatch core can convert element-wise).
//!
//! Present-but-empty stays present-but-empty in both directions; only a
//! null/nil container becomes nil/null.

use std::collections::BTreeMap;

use flex_api::error::FlexError;
use flex_api::schema::{AttrType, NativeType};
use flex_api::value::{AttrValue, NativeValue, Payload};

use crate::config::ConversionOptions;
use crate::dispatch;

pub(crate) fn expand(
    value: &AttrValue,
    attr: &AttrType,
    native: &NativeType,
    options: &ConversionOptions,
) -> Result<NativeValue, FlexError> {
    let Some(payload) = dispatch::known(value, options)? else {
        return Ok(NativeValue::Nil);
    };

    match (attr, payload, native.pointee()) {
        (
            AttrType::List(elem) | AttrType::Set(elem),
            Payload::List(items) | Payload::Set(items),
            NativeType::Seq(native_elem),
        ) => dispatch::expand_elements(items, elem, native_elem, options).map(NativeValue::Seq),
        (AttrType::Map(elem), Payload::Map(entries), NativeType::Map(native_elem)) => {
            let mut out = BTreeMap::new();
            for (key, item) in entries {
                let v = dispatch::expand_value(item, elem, native_elem, options)
                    .map_err(|e| e.at_key(key))?;
                out.insert(key.clone(), v);
            }
            Ok(NativeValue::Map(out))
        }
        (_, payload, target) => Err(FlexError::type_mismatch(format!(
            "cannot expand {} into {target}",
            payload.describe()
        ))),
    }
}

pub(crate) fn flatten(
    value: &NativeValue,
    native: &NativeType,
    attr: &AttrType,
) -> Result<AttrValue, FlexError> {
    let payload = match (value, native.pointee(), attr) {
        (NativeValue::Nil, _, _) => return Ok(AttrValue::Null),
        (NativeValue::Seq(items), NativeType::Seq(native_elem), AttrType::List(elem)) => {
            Payload::List(dispatch::flatten_elements(items, native_elem, elem)?)
        }
        // Set semantics (deduplication) come from the symbolic side.
        (NativeValue::Seq(items), NativeType::Seq(native_elem), AttrType::Set(elem)) => {
            Payload::set(dispatch::flatten_elements(items, native_elem, elem)?)
        }
        (NativeValue::Map(entries), NativeType::Map(native_elem), AttrType::Map(elem)) => {
            let mut out = BTreeMap::new();
            for (key, item) in entries {
                let v = dispatch::flatten_value(item, native_elem, elem).map_err(|e| e.at_key(key))?;
                out.insert(key.clone(), v);
            }
            Payload::Map(out)
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
