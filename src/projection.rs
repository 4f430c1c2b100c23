//! Video projection descriptors.

/// How a video source maps onto scene geometry.
///
/// A closed set: every streamed source carries exactly one of these, and the
/// [`ScreenController`](crate::ScreenController) dispatches on it to pick the
/// screen representation. Descriptors are immutable values supplied fresh on
/// each update; the controller never stores one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VideoProjection {
    /// Spherical or partial-spherical (equirectangular) video, viewed from
    /// inside the sphere.
    ///
    /// The field-of-view values describe the source's angular coverage in
    /// degrees (e.g. 180×180 for VR180, 360×180 for full equirectangular).
    /// The controller passes them through untouched; the mesh it builds is
    /// sized from the playback handle's decoded metadata instead, which is
    /// authoritative once available.
    Spherical {
        /// Horizontal angular coverage in degrees.
        horizontal_fov: f32,
        /// Vertical angular coverage in degrees.
        vertical_fov: f32,
    },
    /// Flat rectangular video on a virtual screen pushed back into the scene.
    Rectangular,
    /// Format-native immersive video (stereoscopic, full-surround).
    ///
    /// Always occupies the coordinate frame's default pose and is not
    /// user-resizable.
    Immersive,
}

impl VideoProjection {
    /// Returns `true` for the flat rectangular variant, the only one that
    /// shows the backdrop occlusion plane.
    pub fn is_rectangular(&self) -> bool {
        matches!(self, VideoProjection::Rectangular)
    }
}
