//! Spherical video mesh generation.
//!
//! Converts a source's angular coverage into an inward-facing sphere patch:
//! full equirectangular sources (360°×180°) get a complete sphere, partial
//! sources (VR180 and friends) get just the covered band, centered on the
//! viewer's forward axis (-Z). The video frame maps across the patch with
//! one UV square, left-to-right and top-to-bottom.

use glam::Vec3;

use crate::mesh::{Transform, Vertex3d, VideoGeometry};

/// Screen width, in scene units, that generated meshes are sized for.
///
/// [`make_video_mesh`] bakes this into its output; callers wanting a
/// different on-screen width scale the base transform by
/// `width / REFERENCE_WIDTH`.
pub const REFERENCE_WIDTH: f32 = 100.0;

/// Longitudinal segments for a full 360° sweep; partial coverage gets a
/// proportional share.
const FULL_SEGMENTS: f32 = 96.0;
/// Latitudinal rings for a full 180° sweep.
const FULL_RINGS: f32 = 48.0;

/// Generates an inward-facing sphere patch covering the given field of view.
///
/// `h_fov_deg` is clamped to (0, 360] and `v_fov_deg` to (0, 180]; degenerate
/// inputs produce a sliver rather than failing. The patch has radius
/// `REFERENCE_WIDTH / 2`, is centered on -Z at the equator, and its normals
/// point at the sphere center where the viewer sits. Triangles are wound to
/// face that interior viewpoint.
///
/// Returns the geometry plus its base transform (identity pose at unit
/// scale). The two travel together so callers can rescale without touching
/// vertices.
///
/// Pure function: same FOV in, same mesh out.
pub fn make_video_mesh(h_fov_deg: f32, v_fov_deg: f32) -> (VideoGeometry, Transform) {
    let h_fov = h_fov_deg.clamp(1.0, 360.0).to_radians();
    let v_fov = v_fov_deg.clamp(1.0, 180.0).to_radians();
    let radius = REFERENCE_WIDTH / 2.0;

    let segments = ((h_fov_deg / 360.0) * FULL_SEGMENTS).round().max(3.0) as u32;
    let rings = ((v_fov_deg / 180.0) * FULL_RINGS).round().max(2.0) as u32;

    let mut vertices = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
    let mut indices = Vec::with_capacity((segments * rings * 6) as usize);

    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        // Polar angle from +Y, with the covered band centered on the equator.
        let phi = (std::f32::consts::PI - v_fov) / 2.0 + v * v_fov;
        let y = phi.cos();
        let ring_radius = phi.sin();

        for seg in 0..=segments {
            let u = seg as f32 / segments as f32;
            // Longitude centered on the -Z forward axis.
            let theta = -h_fov / 2.0 + u * h_fov;
            let x = ring_radius * theta.sin();
            let z = -ring_radius * theta.cos();

            let position = [x * radius, y * radius, z * radius];
            let normal = (-Vec3::new(x, y, z)).normalize_or_zero();
            // u runs right-to-left across the frame as seen from inside.
            let uv = [1.0 - u, v];

            vertices.push(Vertex3d::new(position, normal.into(), uv));
        }
    }

    for ring in 0..rings {
        for seg in 0..segments {
            let current = ring * (segments + 1) + seg;
            let next = current + segments + 1;

            indices.push(current);
            indices.push(current + 1);
            indices.push(next);

            indices.push(current + 1);
            indices.push(next + 1);
            indices.push(next);
        }
    }

    (VideoGeometry::new(vertices, indices), Transform::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_sphere_covers_all_axes() {
        let (geom, _) = make_video_mesh(360.0, 180.0);

        let (min, max) = geom.bounds();
        let r = REFERENCE_WIDTH / 2.0;
        assert!((min.y + r).abs() < 0.5);
        assert!((max.y - r).abs() < 0.5);
        assert!((min.x + r).abs() < 0.5);
        assert!((max.x - r).abs() < 0.5);
    }

    #[test]
    fn vertices_sit_on_the_reference_radius() {
        let (geom, _) = make_video_mesh(180.0, 180.0);

        let r = REFERENCE_WIDTH / 2.0;
        for v in &geom.vertices {
            let len = glam::Vec3::from(v.position).length();
            assert!((len - r).abs() < 1e-3, "vertex off the sphere: {len}");
        }
    }

    #[test]
    fn half_sphere_stays_in_front_of_the_viewer() {
        let (geom, _) = make_video_mesh(180.0, 180.0);

        // Coverage centered on -Z: nothing should sit behind the XY plane.
        for v in &geom.vertices {
            assert!(v.position[2] <= 1e-3, "vertex behind viewer: {:?}", v.position);
        }
    }

    #[test]
    fn normals_point_inward() {
        let (geom, _) = make_video_mesh(360.0, 180.0);

        for v in &geom.vertices {
            let pos = glam::Vec3::from(v.position);
            let normal = glam::Vec3::from(v.normal);
            if pos.length() > 1e-3 {
                assert!(pos.dot(normal) < 0.0, "outward normal at {:?}", v.position);
            }
        }
    }

    #[test]
    fn base_transform_is_identity_at_unit_scale() {
        let (_, base) = make_video_mesh(360.0, 180.0);

        assert_eq!(base.scale, glam::Vec3::ONE);
        assert_eq!(base.position, glam::Vec3::ZERO);
        assert_eq!(base.rotation, glam::Quat::IDENTITY);
    }

    #[test]
    fn partial_coverage_uses_fewer_segments() {
        let (full, _) = make_video_mesh(360.0, 180.0);
        let (half, _) = make_video_mesh(180.0, 180.0);

        assert!(half.vertices.len() < full.vertices.len());
        assert!(half.triangle_count() < full.triangle_count());
    }

    #[test]
    fn degenerate_fov_is_clamped_not_rejected() {
        let (geom, _) = make_video_mesh(0.0, -5.0);

        assert!(!geom.vertices.is_empty());
        assert!(geom.triangle_count() > 0);
    }
}
