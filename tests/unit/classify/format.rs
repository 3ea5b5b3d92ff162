use crate::metadata::{
    traversal::{GPANO_POSE_ROLL, XMP_DESCRIPTION_ATTRIBUTES},
    tree::MetaNode,
};

use super::*;

fn with_attributes(attrs: Vec<(&str, MetaNode)>) -> MetaNode {
    MetaNode::nested(&XMP_DESCRIPTION_ATTRIBUTES, MetaNode::map(attrs))
}

#[test]
fn no_metadata_is_side_by_side() {
    assert_eq!(classify_format(&MetadataTree::empty()), StereoFormat::SideBySide);
}

#[test]
fn xmp_without_extended_xmp_is_side_by_side() {
    let meta = MetadataTree {
        exif: Some(MetaNode::map([("Make", MetaNode::text("Lenovo"))])),
        xmp: Some(with_attributes(vec![(GIMAGE_DATA, MetaNode::text("QUJD"))])),
        extendedxmp: None,
    };
    assert_eq!(classify_format(&meta), StereoFormat::SideBySide);
}

#[test]
fn gimage_data_is_vr180_regardless_of_other_leaves() {
    let meta = MetadataTree {
        exif: None,
        xmp: Some(with_attributes(vec![(GPANO_POSE_ROLL, MetaNode::text("2"))])),
        extendedxmp: Some(with_attributes(vec![
            (GIMAGE_DATA, MetaNode::text("QUJD")),
            (GIMAGE_MIME, MetaNode::text("image/jpeg")),
            ("GAudio:Data", MetaNode::text("AAAA")),
        ])),
    };

    assert_eq!(
        classify(&meta),
        StereoLayout::Vr180 {
            payload: "QUJD",
            mime: Some("image/jpeg"),
        }
    );
    assert_eq!(classify_format(&meta), StereoFormat::Vr180);
}

#[test]
fn empty_or_non_text_payload_is_side_by_side() {
    let leaves = [
        MetaNode::text(""),
        MetaNode::text(" \n "),
        MetaNode::Number(5.0),
        MetaNode::Null,
    ];
    for leaf in leaves {
        let meta = MetadataTree {
            extendedxmp: Some(with_attributes(vec![(GIMAGE_DATA, leaf)])),
            ..MetadataTree::default()
        };
        assert_eq!(classify_format(&meta), StereoFormat::SideBySide);
    }
}

#[test]
fn extended_xmp_without_payload_is_side_by_side() {
    let meta = MetadataTree {
        extendedxmp: Some(with_attributes(vec![(GIMAGE_MIME, MetaNode::text("image/jpeg"))])),
        ..MetadataTree::default()
    };
    assert_eq!(classify(&meta), StereoLayout::SideBySide);
}

#[test]
fn missing_mime_is_none() {
    let meta = MetadataTree {
        extendedxmp: Some(with_attributes(vec![(GIMAGE_DATA, MetaNode::text("QUJD"))])),
        ..MetadataTree::default()
    };
    assert_eq!(
        classify(&meta),
        StereoLayout::Vr180 {
            payload: "QUJD",
            mime: None,
        }
    );
}
