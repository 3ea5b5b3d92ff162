use crate::metadata::{
    traversal::{GIMAGE_DATA, GIMAGE_MIME, description_attribute},
    tree::MetadataTree,
};

/// Stereo layout of a photo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StereoFormat {
    /// Primary frame is the left eye; the right eye is embedded in Extended XMP.
    Vr180,
    /// Both eyes side by side in one frame, left eye first.
    SideBySide,
}

/// Classification result carrying what the extractor needs for each layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StereoLayout<'a> {
    /// VR180 with its base64 right-eye payload.
    Vr180 {
        /// Raw `GImage:Data` text (base64, possibly wrapped).
        payload: &'a str,
        /// Declared `GImage:Mime`, if any.
        mime: Option<&'a str>,
    },
    /// Side-by-side frame to be split down the middle.
    SideBySide,
}

impl StereoLayout<'_> {
    /// The plain format tag.
    pub fn format(&self) -> StereoFormat {
        match self {
            StereoLayout::Vr180 { .. } => StereoFormat::Vr180,
            StereoLayout::SideBySide => StereoFormat::SideBySide,
        }
    }
}

/// Decide the stereo layout from metadata alone.
///
/// A non-empty `GImage:Data` attribute in Extended XMP means VR180. Everything else, including a
/// tree with no metadata at all, is treated as side-by-side.
pub fn classify(meta: &MetadataTree) -> StereoLayout<'_> {
    let root = meta.extendedxmp.as_ref();
    match description_attribute(root, GIMAGE_DATA).text() {
        Some(payload) if !payload.trim().is_empty() => StereoLayout::Vr180 {
            payload,
            mime: description_attribute(root, GIMAGE_MIME).text(),
        },
        _ => StereoLayout::SideBySide,
    }
}

/// Shorthand for `classify(meta).format()`.
pub fn classify_format(meta: &MetadataTree) -> StereoFormat {
    classify(meta).format()
}

#[cfg(test)]
#[path = "../../tests/unit/classify/format.rs"]
mod tests;
