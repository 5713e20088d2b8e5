#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};

use flex_api::{
    BoolValue, Float64Value, Int64Value, ListNestedObject, ListValue, MapValue, Model, Native,
    NestedObject, SetNestedObject, SetValue, StringValue,
};

// ---------------------------------------------------------------------------
// Symbolic models
// ---------------------------------------------------------------------------

#[derive(Model, Debug, Default, Clone, PartialEq)]
pub struct EmptyModel {}

#[derive(Model, Debug, Default, Clone, PartialEq)]
pub struct NameModel {
    #[flex(tag = "name")]
    pub name: StringValue,
}

#[derive(Model, Debug, Default, Clone, PartialEq)]
pub struct NameIntModel {
    #[flex(tag = "name")]
    pub name: Int64Value,
}

/// Every primitive kind, paired with a required and an optional native field.
#[derive(Model, Debug, Default, Clone, PartialEq)]
pub struct ScalarsModel {
    #[flex(tag = "field1")]
    pub field1: StringValue,
    #[flex(tag = "field2")]
    pub field2: StringValue,
    #[flex(tag = "field3")]
    pub field3: Int64Value,
    #[flex(tag = "field4")]
    pub field4: Int64Value,
    #[flex(tag = "field5")]
    pub field5: Int64Value,
    #[flex(tag = "field6")]
    pub field6: Int64Value,
    #[flex(tag = "field7")]
    pub field7: Float64Value,
    #[flex(tag = "field8")]
    pub field8: Float64Value,
    #[flex(tag = "field9")]
    pub field9: Float64Value,
    #[flex(tag = "field10")]
    pub field10: Float64Value,
    #[flex(tag = "field11")]
    pub field11: BoolValue,
    #[flex(tag = "field12")]
    pub field12: BoolValue,
}

/// Same attributes as `ScalarsModel`, declared in reverse.
#[derive(Model, Debug, Default, Clone, PartialEq)]
pub struct ScalarsReversedModel {
    #[flex(tag = "field12")]
    pub field12: BoolValue,
    #[flex(tag = "field11")]
    pub field11: BoolValue,
    #[flex(tag = "field10")]
    pub field10: Float64Value,
    #[flex(tag = "field9")]
    pub field9: Float64Value,
    #[flex(tag = "field8")]
    pub field8: Float64Value,
    #[flex(tag = "field7")]
    pub field7: Float64Value,
    #[flex(tag = "field6")]
    pub field6: Int64Value,
    #[flex(tag = "field5")]
    pub field5: Int64Value,
    #[flex(tag = "field4")]
    pub field4: Int64Value,
    #[flex(tag = "field3")]
    pub field3: Int64Value,
    #[flex(tag = "field2")]
    pub field2: StringValue,
    #[flex(tag = "field1")]
    pub field1: StringValue,
}

#[derive(Model, Debug, Default, Clone, PartialEq)]
pub struct CollectionsModel {
    #[flex(tag = "field1")]
    pub field1: ListValue<String>,
    #[flex(tag = "field2")]
    pub field2: ListValue<StringValue>,
    #[flex(tag = "field3")]
    pub field3: SetValue<String>,
    #[flex(tag = "field4")]
    pub field4: SetValue<StringValue>,
    #[flex(tag = "field5")]
    pub field5: MapValue<String>,
    #[flex(tag = "field6")]
    pub field6: MapValue<StringValue>,
}

#[derive(Model, Debug, Default, Clone, PartialEq)]
pub struct ListDataModel {
    #[flex(tag = "data")]
    pub data: ListNestedObject<NameModel>,
}

#[derive(Model, Debug, Default, Clone, PartialEq)]
pub struct SetDataModel {
    #[flex(tag = "data")]
    pub data: SetNestedObject<NameModel>,
}

#[derive(Model, Debug, Default, Clone, PartialEq)]
pub struct ObjectDataModel {
    #[flex(tag = "data")]
    pub data: NestedObject<NameModel>,
}

#[derive(Model, Debug, Default, Clone, PartialEq)]
pub struct MapDataModel {
    #[flex(tag = "data")]
    pub data: MapValue<NameModel>,
}

// ---------------------------------------------------------------------------
// Native structs
// ---------------------------------------------------------------------------

#[derive(Native, Debug, Default, Clone, PartialEq)]
pub struct EmptyNative {}

#[derive(Native, Debug, Default, Clone, PartialEq)]
pub struct NameNative {
    pub name: String,
}

#[derive(Native, Debug, Default, Clone, PartialEq)]
pub struct NamePtrNative {
    pub name: Option<String>,
}

#[derive(Native, Debug, Default, Clone, PartialEq)]
pub struct NameIntNative {
    pub name: i64,
}

#[derive(Native, Debug, Default, Clone, PartialEq)]
pub struct ScalarsNative {
    pub field1: String,
    pub field2: Option<String>,
    pub field3: i32,
    pub field4: Option<i32>,
    pub field5: i64,
    pub field6: Option<i64>,
    pub field7: f32,
    pub field8: Option<f32>,
    pub field9: f64,
    pub field10: Option<f64>,
    pub field11: bool,
    pub field12: Option<bool>,
}

#[derive(Native, Debug, Default, Clone, PartialEq)]
pub struct ScalarsReversedNative {
    pub field12: Option<bool>,
    pub field11: bool,
    pub field10: Option<f64>,
    pub field9: f64,
    pub field8: Option<f32>,
    pub field7: f32,
    pub field6: Option<i64>,
    pub field5: i64,
    pub field4: Option<i32>,
    pub field3: i32,
    pub field2: Option<String>,
    pub field1: String,
}

#[derive(Native, Debug, Default, Clone, PartialEq)]
pub struct CollectionsNative {
    pub field1: Vec<String>,
    pub field2: Vec<Option<String>>,
    pub field3: Vec<String>,
    pub field4: Vec<Option<String>>,
    pub field5: BTreeMap<String, String>,
    pub field6: BTreeMap<String, Option<String>>,
}

/// Collections that can be absent as well as empty.
#[derive(Native, Debug, Default, Clone, PartialEq)]
pub struct OptionalCollectionsNative {
    pub field1: Option<Vec<String>>,
    pub field3: Option<Vec<String>>,
    pub field5: Option<HashMap<String, String>>,
}

#[derive(Native, Debug, Default, Clone, PartialEq)]
pub struct PtrDataNative {
    pub data: Option<Box<NameNative>>,
}

#[derive(Native, Debug, Default, Clone, PartialEq)]
pub struct SliceDataNative {
    pub data: Option<Vec<NameNative>>,
}

#[derive(Native, Debug, Default, Clone, PartialEq)]
pub struct PtrSliceDataNative {
    pub data: Option<Vec<Option<Box<NameNative>>>>,
}

#[derive(Native, Debug, Default, Clone, PartialEq)]
pub struct MapDataNative {
    pub data: Option<BTreeMap<String, NameNative>>,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn name(v: &str) -> NameModel {
    NameModel {
        name: StringValue::known(v),
    }
}

pub fn native_name(v: &str) -> NameNative {
    NameNative { name: v.to_string() }
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Float payloads are exact in `f32`, so they survive narrowing and back.
pub fn scalars_model() -> ScalarsModel {
    ScalarsModel {
        field1: StringValue::known("field1"),
        field2: StringValue::known("field2"),
        field3: Int64Value::known(3),
        field4: Int64Value::known(-4),
        field5: Int64Value::known(5),
        field6: Int64Value::known(-6),
        field7: Float64Value::known(7.5),
        field8: Float64Value::known(-8.25),
        field9: Float64Value::known(9.99),
        field10: Float64Value::known(-10.101),
        field11: BoolValue::known(true),
        field12: BoolValue::known(false),
    }
}

pub fn scalars_native() -> ScalarsNative {
    ScalarsNative {
        field1: "field1".to_string(),
        field2: Some("field2".to_string()),
        field3: 3,
        field4: Some(-4),
        field5: 5,
        field6: Some(-6),
        field7: 7.5,
        field8: Some(-8.25),
        field9: 9.99,
        field10: Some(-10.101),
        field11: true,
        field12: Some(false),
    }
}
