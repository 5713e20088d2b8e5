use flex_api::error::FlexError;
use flex_api::reflect::{FieldValue, Reflect, Reflected, ReflectedMut, Struct};
use flex_api::schema::{FieldShape, StructShape};

use crate::config::{ConversionOptions, FlexConfig};
use crate::context::Context;
use crate::dispatch::{self, SourceField};

/// Bidirectional converter between symbolic models and native structs.
///
/// Stateless across calls; one engine can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: ConversionOptions,
}

impl Engine {
    pub fn new(options: ConversionOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &FlexConfig) -> Self {
        Self::new(config.conversion)
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Symbolic model → native struct.
    ///
    /// `target` must be a present struct. A nil `source` leaves the target
    /// untouched. On error, fields written before the failing one stay
    /// written.
    pub fn expand(
        &self,
        _ctx: &Context,
        source: &dyn Reflect,
        target: &mut dyn Reflect,
    ) -> Result<(), FlexError> {
        let Some((source, target)) = operands(source, target)? else {
            return Ok(());
        };
        tracing::trace!(from = source.type_name(), into = target.type_name(), "expand");

        let source_shape = source.shape();
        let values = read_fields(source, &source_shape);
        let fields = source_fields(&values);
        let target_shape = target.shape();

        dispatch::expand_fields(&fields, &target_shape, &self.options, &mut |field, value| {
            target.set(field.name, FieldValue::Native(value))
        })
    }

    /// Native struct → symbolic model. Same operand rules as [`Engine::expand`].
    pub fn flatten(
        &self,
        _ctx: &Context,
        source: &dyn Reflect,
        target: &mut dyn Reflect,
    ) -> Result<(), FlexError> {
        let Some((source, target)) = operands(source, target)? else {
            return Ok(());
        };
        tracing::trace!(from = source.type_name(), into = target.type_name(), "flatten");

        let source_shape = source.shape();
        let values = read_fields(source, &source_shape);
        let fields = source_fields(&values);
        let target_shape = target.shape();

        dispatch::flatten_fields(&fields, &target_shape, &mut |field, value| {
            target.set(field.name, FieldValue::Attr(value))
        })
    }
}

/// Symbolic model → native struct with default options.
pub fn expand(ctx: &Context, source: &dyn Reflect, target: &mut dyn Reflect) -> Result<(), FlexError> {
    Engine::default().expand(ctx, source, target)
}

/// Native struct → symbolic model with default options.
pub fn flatten(ctx: &Context, source: &dyn Reflect, target: &mut dyn Reflect) -> Result<(), FlexError> {
    Engine::default().flatten(ctx, source, target)
}

/// Validate the top-level operands. `None` for a nil source.
fn operands<'s, 't>(
    source: &'s dyn Reflect,
    target: &'t mut dyn Reflect,
) -> Result<Option<(&'s dyn Struct, &'t mut dyn Struct)>, FlexError> {
    let target = match target.reflect_mut() {
        ReflectedMut::Struct(s) => s,
        ReflectedMut::Nil => return Err(FlexError::invalid_input("target is nil")),
        ReflectedMut::Value(kind) => {
            return Err(FlexError::invalid_input(format!(
                "target must be a struct, got {kind}"
            )))
        }
    };
    match source.reflect() {
        Reflected::Struct(s) => Ok(Some((s, target))),
        Reflected::Nil => {
            tracing::trace!(into = target.type_name(), "nil source, nothing to convert");
            Ok(None)
        }
        Reflected::Value(kind) => Err(FlexError::invalid_input(format!(
            "source must be a struct, got {kind}"
        ))),
    }
}

fn read_fields<'s>(source: &dyn Struct, shape: &'s StructShape) -> Vec<(&'s FieldShape, FieldValue)> {
    shape
        .fields
        .iter()
        .filter_map(|field| source.get(field.name).map(|value| (field, value)))
        .collect()
}

fn source_fields<'a>(values: &'a [(&'a FieldShape, FieldValue)]) -> Vec<SourceField<'a>> {
    values
        .iter()
        .map(|(shape, value)| SourceField {
            shape: *shape,
            value: value.into(),
        })
        .collect()
}
