use flex_api::error::FlexError;
use flex_api::schema::{AttrType, NativeType, ScalarKind};
use flex_api::value::{AttrValue, NativeValue, Payload};

use crate::config::{ConversionOptions, NarrowingPolicy};
use crate::dispatch;

/// Symbolic scalar → native scalar.
///
/// Null yields nil: a pointer field stays `None`, a bare field gets its
/// zero value. Kinds must agree up to width; there is no coercion.
pub(crate) fn expand(
    value: &AttrValue,
    native: &NativeType,
    options: &ConversionOptions,
) -> Result<NativeValue, FlexError> {
    let Some(payload) = dispatch::known(value, options)? else {
        return Ok(NativeValue::Nil);
    };
    let kind = native
        .pointee()
        .scalar_kind()
        .ok_or_else(|| FlexError::type_mismatch(format!("{native} is not a scalar")))?;

    match (payload, kind) {
        (Payload::String(v), ScalarKind::String) => Ok(NativeValue::String(v.clone())),
        (Payload::Int64(v), ScalarKind::Int64) => Ok(NativeValue::Int64(*v)),
        (Payload::Int64(v), ScalarKind::Int32) => narrow_int(*v, options.narrowing),
        (Payload::Float64(v), ScalarKind::Float64) => Ok(NativeValue::Float64(*v)),
        (Payload::Float64(v), ScalarKind::Float32) => narrow_float(*v, options.narrowing),
        (Payload::Bool(v), ScalarKind::Bool) => Ok(NativeValue::Bool(*v)),
        (payload, kind) => Err(FlexError::type_mismatch(format!(
            "cannot convert {} into {kind}",
            payload.describe()
        ))),
    }
}

// TODO: make `Checked` the default once callers have audited their int32 fields.
fn narrow_int(v: i64, policy: NarrowingPolicy) -> Result<NativeValue, FlexError> {
    match policy {
        NarrowingPolicy::Truncate => Ok(NativeValue::Int32(v as i32)),
        NarrowingPolicy::Checked => i32::try_from(v)
            .map(NativeValue::Int32)
            .map_err(|_| FlexError::type_mismatch(format!("{v} overflows int32"))),
    }
}

fn narrow_float(v: f64, policy: NarrowingPolicy) -> Result<NativeValue, FlexError> {
    let narrowed = v as f32;
    if policy == NarrowingPolicy::Checked && v.is_finite() && narrowed.is_infinite() {
        return Err(FlexError::type_mismatch(format!("{v} overflows float32")));
    }
    Ok(NativeValue::Float32(narrowed))
}

/// Native scalar → symbolic scalar. Nil reads as Null.
pub(crate) fn flatten(value: &NativeValue, attr: &AttrType) -> Result<AttrValue, FlexError> {
    let kind = attr
        .scalar_kind()
        .ok_or_else(|| FlexError::type_mismatch(format!("{attr} is not a scalar")))?;

    let payload = match (value, kind) {
        (NativeValue::Nil, _) => return Ok(AttrValue::Null),
        (NativeValue::String(v), ScalarKind::String) => Payload::String(v.clone()),
        (NativeValue::Int32(v), ScalarKind::Int64) => Payload::Int64(i64::from(*v)),
        (NativeValue::Int64(v), ScalarKind::Int64) => Payload::Int64(*v),
        (NativeValue::Float32(v), ScalarKind::Float64) => Payload::Float64(f64::from(*v)),
        (NativeValue::Float64(v), ScalarKind::Float64) => Payload::Float64(*v),
        (NativeValue::Bool(v), ScalarKind::Bool) => Payload::Bool(*v),
        (value, kind) => {
            return Err(FlexError::type_mismatch(format!(
                "cannot convert {} into {kind}",
                value.describe()
            )))
        }
    };
    Ok(AttrValue::Known(payload))
}
