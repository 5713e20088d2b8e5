mod common;

use std::collections::{BTreeMap, HashMap};

use common::*;
use flex_api::{
    ErrorKind, Int64Value, List, ListValue, Map, MapValue, NestedObject, SetNestedObject, SetValue,
    StringValue,
};
use flex_engine::{flatten, Context};

fn ctx() -> Context {
    Context::background()
}

#[test]
fn bare_string_flattens_to_known() {
    let mut target = NameModel::default();
    flatten(&ctx(), &native_name("a"), &mut target).unwrap();
    assert_eq!(target, name("a"));
}

#[test]
fn optional_string_follows_presence() {
    let mut target = NameModel::default();
    flatten(&ctx(), &NamePtrNative { name: Some("a".to_string()) }, &mut target).unwrap();
    assert_eq!(target.name, StringValue::known("a"));

    flatten(&ctx(), &NamePtrNative { name: None }, &mut target).unwrap();
    assert_eq!(target.name, StringValue::Null);
}

#[test]
fn scalars_flatten_field_for_field() {
    let mut target = ScalarsModel::default();
    flatten(&ctx(), &scalars_native(), &mut target).unwrap();
    assert_eq!(target, scalars_model());
}

#[test]
fn int32_widens_to_int64() {
    let source = ScalarsNative {
        field3: i32::MIN,
        field4: None,
        ..scalars_native()
    };
    let mut target = ScalarsModel::default();
    flatten(&ctx(), &source, &mut target).unwrap();
    assert_eq!(target.field3, Int64Value::known(i64::from(i32::MIN)));
    assert_eq!(target.field4, Int64Value::Null);
}

#[test]
fn collections_flatten_element_wise() {
    let source = CollectionsNative {
        field1: strings(&["b", "a"]),
        field2: vec![Some("a".to_string()), None],
        field3: strings(&["a", "b", "a"]),
        field4: vec![],
        field5: BTreeMap::from([("A".to_string(), "a".to_string())]),
        field6: BTreeMap::from([("B".to_string(), None)]),
    };
    let mut target = CollectionsModel::default();
    flatten(&ctx(), &source, &mut target).unwrap();

    assert_eq!(target.field1, ListValue::known(strings(&["b", "a"])));
    assert_eq!(
        target.field2,
        ListValue::known(vec![StringValue::known("a"), StringValue::Null])
    );
    assert_eq!(target.field3.as_known().map(|s| s.len()), Some(2));
    assert_eq!(target.field4, SetValue::known(Vec::<StringValue>::new()));
    assert_eq!(
        target.field5,
        MapValue::known([("A", "a".to_string())].into_iter().collect::<Map<_>>())
    );
    assert_eq!(
        target.field6,
        MapValue::known([("B", StringValue::Null)].into_iter().collect::<Map<_>>())
    );
}

#[test]
fn absent_collections_flatten_to_null() {
    let mut target = CollectionsModel {
        field1: ListValue::known(strings(&["stale"])),
        ..CollectionsModel::default()
    };
    flatten(&ctx(), &OptionalCollectionsNative::default(), &mut target).unwrap();
    assert_eq!(target.field1, ListValue::Null);
    assert_eq!(target.field3, SetValue::Null);
    assert_eq!(target.field5, MapValue::Null);
}

#[test]
fn empty_collections_flatten_to_known_empty() {
    let source = OptionalCollectionsNative {
        field1: Some(vec![]),
        field3: Some(vec![]),
        field5: Some(HashMap::new()),
    };
    let mut target = CollectionsModel::default();
    flatten(&ctx(), &source, &mut target).unwrap();
    assert_eq!(target.field1, ListValue::known(Vec::<String>::new()));
    assert_eq!(target.field3, SetValue::known(Vec::<String>::new()));
    assert_eq!(target.field5, MapValue::known(Map::<String>::default()));
}

#[test]
fn pointer_to_struct_flattens_to_nested_object() {
    let mut target = ObjectDataModel::default();
    let source = PtrDataNative {
        data: Some(Box::new(native_name("a"))),
    };
    flatten(&ctx(), &source, &mut target).unwrap();
    assert_eq!(target.data, NestedObject::known(name("a")));

    flatten(&ctx(), &PtrDataNative::default(), &mut target).unwrap();
    assert_eq!(target.data, NestedObject::Null);
}

#[test]
fn pointer_to_struct_flattens_to_one_element_list() {
    let source = PtrDataNative {
        data: Some(Box::new(native_name("a"))),
    };
    let mut target = ListDataModel::default();
    flatten(&ctx(), &source, &mut target).unwrap();
    assert_eq!(target.data, ListValue::known(vec![name("a")]));

    flatten(&ctx(), &PtrDataNative::default(), &mut target).unwrap();
    assert_eq!(target.data, ListValue::Null);
}

#[test]
fn struct_sequences_flatten_in_order() {
    let source = SliceDataNative {
        data: Some(vec![native_name("b"), native_name("a")]),
    };
    let mut target = ListDataModel::default();
    flatten(&ctx(), &source, &mut target).unwrap();
    assert_eq!(target.data, ListValue::known(vec![name("b"), name("a")]));

    let empty = SliceDataNative { data: Some(vec![]) };
    flatten(&ctx(), &empty, &mut target).unwrap();
    assert_eq!(target.data, ListValue::known(List::<NameModel>::default()));

    flatten(&ctx(), &SliceDataNative::default(), &mut target).unwrap();
    assert_eq!(target.data, ListValue::Null);
}

#[test]
fn struct_sequences_flatten_into_deduplicated_sets() {
    let source = SliceDataNative {
        data: Some(vec![native_name("a"), native_name("b"), native_name("a")]),
    };
    let mut target = SetDataModel::default();
    flatten(&ctx(), &source, &mut target).unwrap();
    assert_eq!(target.data, SetNestedObject::known(vec![name("b"), name("a")]));

    let set = target.data.into_known().unwrap_or_default();
    let names: Vec<_> = set.iter().map(|m| m.name.clone()).collect();
    assert_eq!(names, vec![StringValue::known("a"), StringValue::known("b")]);
}

#[test]
fn absent_pointer_element_cannot_fill_a_bare_model() {
    let source = PtrSliceDataNative {
        data: Some(vec![Some(Box::new(native_name("a"))), None]),
    };
    let mut target = ListDataModel::default();
    let err = flatten(&ctx(), &source, &mut target).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TypeMismatch);
    assert_eq!(err.path, "data[1]");
    assert_eq!(err.message, "expected known object NameModel, got null");
}

#[test]
fn symbolic_source_is_unsupported() {
    let mut target = NameModel::default();
    let err = flatten(&ctx(), &name("a"), &mut target).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnsupportedSourceType);
    assert_eq!(err.path, "name");
}

#[test]
fn operands_are_validated() {
    let mut target: Option<NameModel> = None;
    let err = flatten(&ctx(), &native_name("a"), &mut target).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidInput);

    let err = flatten(&ctx(), &native_name("a"), &mut String::new()).unwrap_err();
    assert_eq!(err.message, "target must be a struct, got string");

    let mut target = name("kept");
    flatten(&ctx(), &None::<NameNative>, &mut target).unwrap();
    assert_eq!(target, name("kept"));
}

#[test]
fn boxed_operands_unwrap() {
    let mut target = Box::new(NameModel::default());
    flatten(&ctx(), &Box::new(native_name("a")), &mut target).unwrap();
    assert_eq!(*target, name("a"));
}

#[test]
fn cross_kind_scalar_is_a_mismatch() {
    let mut target = NameModel::default();
    let err = flatten(&ctx(), &NameIntNative { name: 1 }, &mut target).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TypeMismatch);
    assert_eq!(err.to_string(), "TypeMismatch: name: cannot convert int64 into string");
}

#[test]
fn unmatched_target_fields_are_left_alone() {
    let mut target = name("kept");
    flatten(&ctx(), &scalars_native(), &mut target).unwrap();
    assert_eq!(target, name("kept"));
}
