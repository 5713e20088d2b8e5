use flex_api::schema::FieldShape;

use crate::dispatch::SourceField;

/// Find the source field corresponding to `target`.
///
/// Keys (tag, or name when untagged) are compared first. An untagged source
/// field may also match on its exact Rust name; a tagged one is only reachable
/// through its tag. Declaration order does not matter.
pub(crate) fn resolve<'s, 'a>(
    target: &FieldShape,
    source: &'s [SourceField<'a>],
) -> Option<&'s SourceField<'a>> {
    let key = target.key();
    source
        .iter()
        .find(|s| s.shape.key() == key)
        .or_else(|| {
            source
                .iter()
                .find(|s| s.shape.tag.is_none() && s.shape.name == target.name)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::SourceValue;
    use flex_api::schema::{AttrType, FieldType, NativeType};
    use flex_api::value::AttrValue;

    static NULL: AttrValue = AttrValue::Null;

    fn attr_field(name: &'static str, tag: Option<&'static str>) -> FieldShape {
        FieldShape {
            name,
            tag,
            ty: FieldType::Attr(AttrType::String),
        }
    }

    fn native_field(name: &'static str) -> FieldShape {
        FieldShape {
            name,
            tag: None,
            ty: FieldType::Native(NativeType::String),
        }
    }

    fn sources(shapes: &[FieldShape]) -> Vec<SourceField<'_>> {
        shapes
            .iter()
            .map(|shape| SourceField {
                shape,
                value: SourceValue::Attr(&NULL),
            })
            .collect()
    }

    #[test]
    fn tag_matches_native_field_name() {
        let shapes = [attr_field("title", Some("name")), attr_field("name", Some("label"))];
        let fields = sources(&shapes);
        let found = resolve(&native_field("name"), &fields).unwrap();
        assert_eq!(found.shape.name, "title");
    }

    #[test]
    fn tagged_source_is_not_matched_by_name() {
        let shapes = [attr_field("size", Some("volume_size"))];
        let fields = sources(&shapes);
        assert!(resolve(&native_field("size"), &fields).is_none());
        assert_eq!(resolve(&native_field("volume_size"), &fields).unwrap().shape.name, "size");
    }

    #[test]
    fn untagged_source_falls_back_to_exact_name() {
        let shapes = [native_field("size")];
        let fields = sources(&shapes);
        let found = resolve(&attr_field("size", Some("volume_size")), &fields).unwrap();
        assert_eq!(found.shape.name, "size");
        assert!(resolve(&attr_field("Size", Some("volume_size")), &fields).is_none());
    }

    #[test]
    fn untagged_fields_match_by_name() {
        let shapes = [native_field("a"), native_field("b")];
        let fields = sources(&shapes);
        assert_eq!(resolve(&attr_field("b", None), &fields).unwrap().shape.name, "b");
        assert_eq!(resolve(&attr_field("x", Some("a")), &fields).unwrap().shape.name, "a");
    }

    #[test]
    fn order_does_not_matter() {
        let forward = [attr_field("a", Some("a")), attr_field("b", Some("b"))];
        let backward = [attr_field("b", Some("b")), attr_field("a", Some("a"))];
        for shapes in [&forward, &backward] {
            let fields = sources(shapes);
            assert_eq!(resolve(&native_field("a"), &fields).unwrap().shape.key(), "a");
            assert_eq!(resolve(&native_field("b"), &fields).unwrap().shape.key(), "b");
        }
    }
}
