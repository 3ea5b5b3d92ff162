use crate::metadata::tree::MetaNode;

/// Path from the XMP root to the attribute map of the main `rdf:Description`.
pub const XMP_DESCRIPTION_ATTRIBUTES: [&str; 4] =
    ["x:xmpmeta", "rdf:RDF", "rdf:Description", "@attributes"];

/// Attribute holding the base64 right-eye JPEG (Extended XMP).
pub const GIMAGE_DATA: &str = "GImage:Data";
/// Attribute holding the mime type of [`GIMAGE_DATA`].
pub const GIMAGE_MIME: &str = "GImage:Mime";
/// Camera pitch recorded at capture time, in degrees.
pub const GPANO_POSE_PITCH: &str = "GPano:PosePitchDegrees";
/// Camera roll recorded at capture time, in degrees.
pub const GPANO_POSE_ROLL: &str = "GPano:PoseRollDegrees";

/// Result of walking a metadata tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Lookup<'a> {
    /// The full path resolved to this node.
    Found(&'a MetaNode),
    /// Some part of the path (or the root itself) is missing.
    Absent,
}

impl<'a> Lookup<'a> {
    /// The resolved node, if any.
    pub fn found(self) -> Option<&'a MetaNode> {
        match self {
            Lookup::Found(node) => Some(node),
            Lookup::Absent => None,
        }
    }

    /// Whether the path did not resolve.
    pub fn is_absent(self) -> bool {
        matches!(self, Lookup::Absent)
    }

    /// Resolved text leaf, treating non-text nodes as absent.
    pub fn text(self) -> Option<&'a str> {
        self.found().and_then(MetaNode::as_text)
    }

    /// Resolved numeric value, treating non-numeric nodes as absent.
    pub fn number(self) -> Option<f64> {
        self.found().and_then(MetaNode::as_f64)
    }
}

/// Walk `root` by `path`, left to right.
///
/// Total: a missing root, a missing key or a non-mapping intermediate node all yield
/// [`Lookup::Absent`]. An empty path resolves to the root itself.
pub fn lookup<'a, S: AsRef<str>>(path: &[S], root: Option<&'a MetaNode>) -> Lookup<'a> {
    let Some(mut node) = root else {
        return Lookup::Absent;
    };
    for key in path {
        match node.get(key.as_ref()) {
            Some(child) => node = child,
            None => return Lookup::Absent,
        }
    }
    Lookup::Found(node)
}

/// Look up one attribute of the main XMP `rdf:Description`.
pub fn description_attribute<'a>(root: Option<&'a MetaNode>, attribute: &str) -> Lookup<'a> {
    match lookup(&XMP_DESCRIPTION_ATTRIBUTES, root) {
        Lookup::Found(attrs) => lookup(&[attribute], Some(attrs)),
        Lookup::Absent => Lookup::Absent,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/metadata/traversal.rs"]
mod tests;
