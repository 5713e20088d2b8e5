//! Dispatch core: one pass over the target's fields.
//!
//! Each target field is resolved against the source, the (source type,
//! target type) pair is classified into a [`Route`], and the matching
//! converter handles it. Nested objects and collections come back here
//! through [`expand_value`] / [`flatten_value`].

use flex_api::error::FlexError;
use flex_api::reflect::FieldValue;
use flex_api::schema::{AttrType, FieldShape, FieldType, NativeType, StructShape};
use flex_api::value::{AttrValue, NativeValue, Payload};

use crate::config::{ConversionOptions, UnknownPolicy};
use crate::{container, nested, resolver, scalar};

/// A source field and its value, borrowed for one traversal.
pub(crate) struct SourceField<'a> {
    pub shape: &'a FieldShape,
    pub value: SourceValue<'a>,
}

#[derive(Clone, Copy)]
pub(crate) enum SourceValue<'a> {
    Attr(&'a AttrValue),
    Native(&'a NativeValue),
}

impl<'a> From<&'a FieldValue> for SourceValue<'a> {
    fn from(value: &'a FieldValue) -> Self {
        match value {
            FieldValue::Attr(v) => SourceValue::Attr(v),
            FieldValue::Native(v) => SourceValue::Native(v),
        }
    }
}

/// Which converter handles a field pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Route {
    Scalar,
    Container,
    Nested,
}

/// Classify a symbolic/native type pair. Optional wrappers are ignored.
///
/// `None` when no converter can handle the pair.
pub(crate) fn classify(attr: &AttrType, native: &NativeType) -> Option<Route> {
    let native = native.pointee();
    if attr.scalar_kind().is_some() && native.scalar_kind().is_some() {
        return Some(Route::Scalar);
    }
    let object_collection = attr.collection_element().is_some_and(AttrType::is_object);
    match (attr, native) {
        (AttrType::Object(_), NativeType::Struct(_)) => Some(Route::Nested),
        (_, NativeType::Seq(_) | NativeType::Struct(_)) if object_collection => Some(Route::Nested),
        (AttrType::List(_) | AttrType::Set(_), NativeType::Seq(_))
        | (AttrType::Map(_), NativeType::Map(_)) => Some(Route::Container),
        _ => None,
    }
}

/// Payload of a known value; `None` when the converter should emit nil.
///
/// `Unknown` either fails or counts as nil, per `options.unknown`.
pub(crate) fn known<'v>(
    value: &'v AttrValue,
    options: &ConversionOptions,
) -> Result<Option<&'v Payload>, FlexError> {
    match value {
        AttrValue::Known(p) => Ok(Some(p)),
        AttrValue::Null => Ok(None),
        AttrValue::Unknown => match options.unknown {
            UnknownPolicy::Fail => Err(FlexError::unknown_value(
                "value is unknown and has no native representation",
            )),
            UnknownPolicy::Zero => Ok(None),
        },
    }
}

// ---------------------------------------------------------------------------
// Expand: symbolic → native
// ---------------------------------------------------------------------------

pub(crate) fn expand_fields(
    source: &[SourceField<'_>],
    target: &StructShape,
    options: &ConversionOptions,
    write: &mut dyn FnMut(&FieldShape, NativeValue) -> Result<(), FlexError>,
) -> Result<(), FlexError> {
    for field in &target.fields {
        let Some(src) = resolver::resolve(field, source) else {
            tracing::trace!(attribute = field.key(), into = target.name, "no source field, skipping");
            continue;
        };
        let FieldType::Native(native) = &field.ty else {
            return Err(FlexError::type_mismatch(format!(
                "target field of {} is not a native field",
                target.name
            ))
            .at_field(field.name));
        };
        let (SourceValue::Attr(value), FieldType::Attr(attr)) = (src.value, &src.shape.ty) else {
            return Err(FlexError::unsupported_source(format!(
                "source field '{}' does not hold a symbolic value",
                src.shape.name
            ))
            .at_field(field.name));
        };

        let out = expand_value(value, attr, native, options).map_err(|e| e.at_field(field.name))?;
        write(field, out).map_err(|e| e.at_field(field.name))?;
    }
    Ok(())
}

pub(crate) fn expand_value(
    value: &AttrValue,
    attr: &AttrType,
    native: &NativeType,
    options: &ConversionOptions,
) -> Result<NativeValue, FlexError> {
    let route = classify(attr, native)
        .ok_or_else(|| FlexError::type_mismatch(format!("cannot expand {attr} into {native}")))?;
    tracing::trace!(from = %attr, into = %native, ?route, "expand");
    match route {
        Route::Scalar => scalar::expand(value, native, options),
        Route::Container => container::expand(value, attr, native, options),
        Route::Nested => nested::expand(value, attr, native, options),
    }
}

pub(crate) fn expand_elements(
    items: &[AttrValue],
    attr: &AttrType,
    native: &NativeType,
    options: &ConversionOptions,
) -> Result<Vec<NativeValue>, FlexError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| expand_value(item, attr, native, options).map_err(|e| e.at_index(i)))
        .collect()
}

// ---------------------------------------------------------------------------
// Flatten: native → symbolic
// ---------------------------------------------------------------------------

pub(crate) fn flatten_fields(
    source: &[SourceField<'_>],
    target: &StructShape,
    write: &mut dyn FnMut(&FieldShape, AttrValue) -> Result<(), FlexError>,
) -> Result<(), FlexError> {
    for field in &target.fields {
        let Some(src) = resolver::resolve(field, source) else {
            tracing::trace!(attribute = field.key(), into = target.name, "no source field, skipping");
            continue;
        };
        let FieldType::Attr(attr) = &field.ty else {
            return Err(FlexError::type_mismatch(format!(
                "target field of {} is not a symbolic field",
                target.name
            ))
            .at_field(field.name));
        };
        let (SourceValue::Native(value), FieldType::Native(native)) = (src.value, &src.shape.ty)
        else {
            return Err(FlexError::unsupported_source(format!(
                "source field '{}' does not hold a native value",
                src.shape.name
            ))
            .at_field(field.name));
        };

        let out = flatten_value(value, native, attr).map_err(|e| e.at_field(field.name))?;
        write(field, out).map_err(|e| e.at_field(field.name))?;
    }
    Ok(())
}

pub(crate) fn flatten_value(
    value: &NativeValue,
    native: &NativeType,
    attr: &AttrType,
) -> Result<AttrValue, FlexError> {
    let route = classify(attr, native)
        .ok_or_else(|| FlexError::type_mismatch(format!("cannot flatten {native} into {attr}")))?;
    tracing::trace!(from = %native, into = %attr, ?route, "flatten");
    match route {
        Route::Scalar => scalar::flatten(value, attr),
        Route::Container => container::flatten(value, native, attr),
        Route::Nested => nested::flatten(value, native, attr),
    }
}

pub(crate) fn flatten_elements(
    items: &[NativeValue],
    native: &NativeType,
    attr: &AttrType,
) -> Result<Vec<AttrValue>, FlexError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| flatten_value(item, native, attr).map_err(|e| e.at_index(i)))
        .collect()
}
