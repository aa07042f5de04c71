use super::*;

fn px(v: u8) -> Node {
    Node::pixel(v)
}

fn rep(count: u16, children: Vec<Node>) -> Node {
    Node::repeat(count, children).unwrap()
}

#[test]
fn concrete_leaves_are_returned_unchanged() {
    let t: Template<i64> = Template::from(Pixel::new(1));
    assert_eq!(t.evaluate(1).unwrap(), px(1));

    let t: Template<i64> = Template::from(rep(1, vec![px(1)]));
    assert_eq!(t.evaluate(1).unwrap(), rep(1, vec![px(1)]));
}

#[test]
fn placeholder_result_is_used_directly() {
    let f: Template<i64> = Template::placeholder(|t: i64| Ok(Node::Pixel(Pixel::try_from(t)?)));
    assert_eq!(f.evaluate(5).unwrap(), px(5));
    assert_eq!(f.evaluate(10).unwrap(), px(10));
    assert!(matches!(f.evaluate(300), Err(PixrleError::Range(_))));
}

#[test]
fn count_placeholder_follows_context() {
    let g: Template<i64> = Template::repeat_with(|t: i64| 10 - t, vec![px(1)]);
    assert_eq!(g.evaluate(1).unwrap(), rep(9, vec![px(1)]));
    assert_eq!(g.evaluate(9).unwrap(), rep(1, vec![px(1)]));
}

#[test]
fn nested_templates_are_resolved_top_down() {
    let h: Template<i64> = Template::repeat_with(
        |t: i64| 10 - t,
        vec![
            Template::repeat_with(|t: i64| 10 + t, vec![px(1)]),
            Template::from(Pixel::new(2)),
        ],
    );
    assert_eq!(
        h.evaluate(1).unwrap(),
        rep(9, vec![rep(11, vec![px(1)]), px(2)])
    );
    assert_eq!(
        h.evaluate(5).unwrap(),
        rep(5, vec![rep(15, vec![px(1)]), px(2)])
    );
}

#[test]
fn templates_without_placeholders_evaluate_to_themselves() {
    let tree = rep(3, vec![rep(2, vec![px(4), px(5)]), px(6)]);
    let structural: Template<u32> = Template::repeat(
        3u16,
        vec![
            Template::repeat(2u16, vec![px(4), px(5)]),
            Template::from(px(6)),
        ],
    );
    assert!(structural.is_concrete());
    for ctx in [0u32, 1, 1000, u32::MAX] {
        assert_eq!(structural.evaluate(ctx).unwrap(), tree);
    }
}

#[test]
fn out_of_range_counts_are_validation_errors() {
    let g: Template<i64> = Template::repeat_with(|t: i64| 10 - t, vec![px(1)]);
    assert!(matches!(g.evaluate(11), Err(PixrleError::Validation(_))));

    let big: Template<i64> = Template::repeat_with(|t: i64| t, vec![px(1)]);
    assert!(matches!(big.evaluate(65536), Err(PixrleError::Validation(_))));
    assert_eq!(big.evaluate(65535).unwrap().pixel_count(), Some(65535));
}

#[test]
fn children_placeholder_supplies_whole_list() {
    let t: Template<u8> = Template::repeat(
        2u16,
        ChildrenTemplate::with(|n: u8| Ok((0..n).map(Node::pixel).collect())),
    );
    assert!(!t.is_concrete());
    assert_eq!(t.evaluate(3).unwrap(), rep(2, vec![px(0), px(1), px(2)]));
    assert_eq!(t.evaluate(0).unwrap(), rep(2, vec![]));
}

#[test]
fn evaluated_child_lists_still_respect_the_limit() {
    let t: Template<usize> = Template::repeat(
        1u16,
        ChildrenTemplate::with(|n: usize| Ok(vec![Node::pixel(0); n])),
    );
    assert!(t.evaluate(255).is_ok());
    assert!(matches!(t.evaluate(256), Err(PixrleError::Validation(_))));
}

#[test]
fn placeholder_errors_propagate() {
    let t: Template<i64> = Template::repeat(
        1u16,
        vec![
            Template::from(px(1)),
            Template::placeholder(|_| Err(PixrleError::evaluation("no frame"))),
        ],
    );
    assert!(matches!(t.evaluate(0), Err(PixrleError::Evaluation(_))));
}

#[test]
fn clones_share_the_same_functions() {
    let g: Template<i64> = Template::repeat_with(|t: i64| t * 2, vec![px(7)]);
    let h = g.clone();
    assert_eq!(g.evaluate(4).unwrap(), h.evaluate(4).unwrap());
    assert!(format!("{h:?}").contains("Placeholder"));
}

#[test]
fn deeply_nested_templates_evaluate_level_by_level() {
    let mut tpl: Template<i64> = Template::from(px(3));
    let mut expected = px(3);
    for _ in 0..200 {
        tpl = Template::repeat_with(|t: i64| t + 1, vec![tpl]);
        expected = rep(2, vec![expected]);
    }
    assert_eq!(tpl.evaluate(1).unwrap(), expected);
    assert_eq!(expected.depth(), 200);
}
