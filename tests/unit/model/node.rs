use super::*;

fn px(v: u8) -> Node {
    Node::pixel(v)
}

#[test]
fn pixel_rejects_out_of_range_ints() {
    assert_eq!(Pixel::try_from_int(0).unwrap(), BLACK);
    assert_eq!(Pixel::try_from_int(255).unwrap(), WHITE);
    assert!(matches!(Pixel::try_from_int(256), Err(PixrleError::Range(_))));
    assert!(matches!(Pixel::try_from(-1i32), Err(PixrleError::Range(_))));
    assert!(matches!(Pixel::try_from(1000i64), Err(PixrleError::Range(_))));
}

#[test]
fn repeat_rejects_too_many_children() {
    let ok = Repeat::new(1, vec![px(1); MAX_CHILDREN]).unwrap();
    assert_eq!(ok.children().len(), 255);

    let err = Repeat::new(1, vec![px(1); MAX_CHILDREN + 1]).unwrap_err();
    assert!(matches!(err, PixrleError::Validation(_)));
}

#[test]
fn repeat_try_new_checks_count_bounds() {
    assert_eq!(Repeat::try_new(65535, vec![]).unwrap().count(), u16::MAX);
    assert!(matches!(
        Repeat::try_new(65536, vec![]),
        Err(PixrleError::Validation(_))
    ));
    assert!(matches!(
        Repeat::try_new(-1, vec![]),
        Err(PixrleError::Validation(_))
    ));
}

#[test]
fn structural_equality_is_recursive() {
    let a = Node::repeat(2, vec![px(1), Node::repeat(3, vec![px(2)]).unwrap()]).unwrap();
    let b = Node::repeat(2, vec![px(1), Node::repeat(3, vec![px(2)]).unwrap()]).unwrap();
    let c = Node::repeat(2, vec![px(1), Node::repeat(4, vec![px(2)]).unwrap()]).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(px(0), Node::repeat(1, vec![px(0)]).unwrap());
}

#[test]
fn debug_reads_like_constructor_calls() {
    let n = Node::repeat(3, vec![px(1), px(10)]).unwrap();
    assert_eq!(format!("{n:?}"), "Repeat(3, [Pixel(1), Pixel(10)])");
    assert_eq!(format!("{:?}", Node::repeat(1, vec![]).unwrap()), "Repeat(1, [])");
}

#[test]
fn depth_counts_repeat_nesting() {
    assert_eq!(px(3).depth(), 0);
    assert_eq!(Node::repeat(1, vec![]).unwrap().depth(), 1);
    let nested = Node::repeat(
        1,
        vec![px(0), Node::repeat(2, vec![Node::repeat(3, vec![px(1)]).unwrap()]).unwrap()],
    )
    .unwrap();
    assert_eq!(nested.depth(), 3);
}

#[test]
fn json_shape_is_externally_tagged() {
    let n = Node::repeat(2, vec![px(16)]).unwrap();
    let json = serde_json::to_string(&n).unwrap();
    assert_eq!(json, r#"{"repeat":{"count":2,"children":[{"pixel":16}]}}"#);

    let back: Node = serde_json::from_str(&json).unwrap();
    assert_eq!(back, n);
}

#[test]
fn json_deserialize_enforces_child_limit() {
    let children = vec![r#"{"pixel":1}"#; MAX_CHILDREN + 1].join(",");
    let json = format!(r#"{{"repeat":{{"count":1,"children":[{children}]}}}}"#);
    assert!(serde_json::from_str::<Node>(&json).is_err());

    assert!(serde_json::from_str::<Node>(r#"{"pixel":256}"#).is_err());
    assert!(serde_json::from_str::<Node>(r#"{"repeat":{"count":70000}}"#).is_err());
}
