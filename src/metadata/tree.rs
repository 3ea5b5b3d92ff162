use std::{collections::BTreeMap, io::Read};

use anyhow::Context;

use crate::foundation::error::StereoResult;

/// One node of a parsed EXIF/XMP tree.
///
/// Trees arrive from an external parser (typically as JSON), so leaves may be text, numbers or
/// booleans depending on the parser's conventions.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum MetaNode {
    /// Explicit null leaf.
    Null,
    /// Boolean leaf.
    Bool(bool),
    /// Numeric leaf.
    Number(f64),
    /// Text leaf (XMP attributes are always text).
    Text(String),
    /// Repeated element.
    List(Vec<MetaNode>),
    /// Keyed children.
    Map(BTreeMap<String, MetaNode>),
}

impl MetaNode {
    /// Build a text leaf.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Build a mapping node from `(key, child)` pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, MetaNode)>,
    {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Wrap `leaf` in one single-key mapping per path element, outermost first.
    pub fn nested<S: AsRef<str>>(path: &[S], leaf: MetaNode) -> Self {
        path.iter().rev().fold(leaf, |child, key| {
            Self::map([(key.as_ref().to_string(), child)])
        })
    }

    /// Child under `key`, if this is a mapping that has one.
    pub fn get(&self, key: &str) -> Option<&MetaNode> {
        match self {
            Self::Map(children) => children.get(key),
            _ => None,
        }
    }

    /// Text content, if this is a text leaf.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Signed decimal value of a numeric or numeric-text leaf.
    ///
    /// Returns `None` for non-numeric text and non-finite values.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        v.is_finite().then_some(v)
    }

    /// Whether the node carries no usable content.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(_) | Self::Number(_) => false,
            Self::Text(s) => s.trim().is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Map(children) => children.is_empty(),
        }
    }
}

/// The three metadata trees extracted from one JPEG.
///
/// Any of them may be missing; that is a normal state, not an error.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MetadataTree {
    /// Flat EXIF tag map.
    #[serde(default, alias = "exifdata", skip_serializing_if = "Option::is_none")]
    pub exif: Option<MetaNode>,
    /// Standard XMP packet tree.
    #[serde(default, alias = "xmpdata", skip_serializing_if = "Option::is_none")]
    pub xmp: Option<MetaNode>,
    /// Extended XMP tree, reassembled from all same-GUID segments.
    #[serde(
        default,
        alias = "extendedxmpdata",
        skip_serializing_if = "Option::is_none"
    )]
    pub extendedxmp: Option<MetaNode>,
}

impl MetadataTree {
    /// A tree with no metadata at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the JSON emitted by the metadata parser.
    pub fn from_json_str(json: &str) -> StereoResult<Self> {
        let tree = serde_json::from_str(json).context("parse metadata JSON")?;
        Ok(tree)
    }

    /// Parse metadata JSON from a reader.
    pub fn from_reader(reader: impl Read) -> StereoResult<Self> {
        let tree = serde_json::from_reader(reader).context("parse metadata JSON")?;
        Ok(tree)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/metadata/tree.rs"]
mod tests;
