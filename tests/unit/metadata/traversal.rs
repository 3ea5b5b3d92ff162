use super::*;

fn tree() -> MetaNode {
    MetaNode::nested(
        &XMP_DESCRIPTION_ATTRIBUTES,
        MetaNode::map([
            (GPANO_POSE_PITCH, MetaNode::text("3")),
            (GIMAGE_DATA, MetaNode::text("QUJD")),
        ]),
    )
}

#[test]
fn absent_root_is_absent() {
    assert_eq!(lookup(&["x:xmpmeta"], None), Lookup::Absent);
    assert_eq!(lookup::<&str>(&[], None), Lookup::Absent);
}

#[test]
fn empty_path_is_root() {
    let root = tree();
    assert_eq!(lookup::<&str>(&[], Some(&root)), Lookup::Found(&root));
}

#[test]
fn full_path_resolves_leaf() {
    let root = tree();
    let mut path = XMP_DESCRIPTION_ATTRIBUTES.to_vec();
    path.push(GPANO_POSE_PITCH);
    assert_eq!(lookup(&path, Some(&root)).text(), Some("3"));
    assert_eq!(lookup(&path, Some(&root)).number(), Some(3.0));
}

#[test]
fn missing_key_is_absent() {
    let root = tree();
    assert!(lookup(&["x:xmpmeta", "rdf:Bag"], Some(&root)).is_absent());
    assert!(description_attribute(Some(&root), GPANO_POSE_ROLL).is_absent());
}

#[test]
fn path_past_a_leaf_is_absent() {
    let root = tree();
    let mut path = XMP_DESCRIPTION_ATTRIBUTES.to_vec();
    path.extend([GIMAGE_DATA, "deeper", "still"]);
    assert_eq!(lookup(&path, Some(&root)), Lookup::Absent);

    let leaf = MetaNode::text("x");
    assert_eq!(lookup(&["a"], Some(&leaf)), Lookup::Absent);
}

#[test]
fn description_attribute_reads_attributes() {
    let root = tree();
    assert_eq!(description_attribute(Some(&root), GIMAGE_DATA).text(), Some("QUJD"));
    assert!(description_attribute(None, GIMAGE_DATA).is_absent());
}

#[test]
fn non_text_leaf_has_no_text() {
    let root = MetaNode::nested(
        &XMP_DESCRIPTION_ATTRIBUTES,
        MetaNode::map([(GIMAGE_DATA, MetaNode::Number(1.0))]),
    );
    let found = description_attribute(Some(&root), GIMAGE_DATA);
    assert!(!found.is_absent());
    assert_eq!(found.text(), None);
}
