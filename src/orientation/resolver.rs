use crate::metadata::{
    traversal::{GPANO_POSE_PITCH, GPANO_POSE_ROLL, description_attribute},
    tree::{MetaNode, MetadataTree},
};

/// Rotation applied to both hemispheres so the scene's horizon is level.
///
/// Yaw is never corrected; recentering is left to the viewer.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct OrientationCorrection {
    /// Rotation about the x axis, in degrees.
    pub pitch_degrees: f64,
    /// Rotation about the z axis, in degrees (already sign-inverted from the recorded roll).
    pub roll_degrees: f64,
}

impl OrientationCorrection {
    /// No correction.
    pub const IDENTITY: Self = Self {
        pitch_degrees: 0.0,
        roll_degrees: 0.0,
    };

    /// Yaw component, always zero.
    pub fn yaw_degrees(&self) -> f64 {
        0.0
    }

    /// `[x, y, z]` Euler rotation in degrees, as applied to each hemisphere.
    pub fn euler_degrees(&self) -> [f64; 3] {
        [self.pitch_degrees, self.yaw_degrees(), self.roll_degrees]
    }
}

/// Resolve the horizon correction from the photo's XMP.
///
/// Missing XMP, a missing attribute or a non-numeric attribute all fall back to zero for that
/// axis. The recorded roll is negated so the correction counters it.
pub fn resolve_orientation(meta: &MetadataTree) -> OrientationCorrection {
    resolve_from_xmp(meta.xmp.as_ref())
}

/// Same as [`resolve_orientation`], starting from the XMP tree alone.
pub fn resolve_from_xmp(xmp: Option<&MetaNode>) -> OrientationCorrection {
    if xmp.is_none() {
        return OrientationCorrection::IDENTITY;
    }

    let pitch = pose_degrees(xmp, GPANO_POSE_PITCH);
    let roll = pose_degrees(xmp, GPANO_POSE_ROLL);

    OrientationCorrection {
        pitch_degrees: pitch,
        // 0.0 - x keeps an absent roll at +0.0 rather than -0.0.
        roll_degrees: 0.0 - roll,
    }
}

fn pose_degrees(xmp: Option<&MetaNode>, attribute: &str) -> f64 {
    let found = description_attribute(xmp, attribute);
    match found.number() {
        Some(v) => v,
        None => {
            if !found.is_absent() {
                tracing::debug!(attribute, "ignoring non-numeric pose attribute");
            }
            0.0
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orientation/resolver.rs"]
mod tests;
