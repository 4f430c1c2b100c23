//! Geometry, transforms, and the GPU upload bridge.
//!
//! This module provides the building blocks the screen controller assembles:
//!
//! - [`Vertex3d`] — The vertex format used by all screen geometry, containing
//!   position, normal, and UV data
//! - [`VideoGeometry`] — CPU-side geometry (vertices + indices) attached to a
//!   screen node, ready for upload
//! - [`Transform`] — Position, rotation, and scale for placing the screen in
//!   3D space
//! - [`Mesh`] — GPU-resident geometry produced by uploading a [`VideoGeometry`]
//!
//! The controller itself never touches the GPU: it mutates nodes carrying
//! `VideoGeometry` payloads, and the rendering layer uploads them with
//! [`Mesh::upload`] when it realizes the scene. [`Vertex3d::LAYOUT`] is the
//! vertex buffer layout that layer should feed its pipelines.
//!
//! # Transforms
//!
//! [`Transform`] uses a builder pattern:
//!
//! ```
//! use proscenium::{Transform, Vec3};
//!
//! let transform = Transform::new()
//!     .position(Vec3::new(0.0, 0.0, -200.0))
//!     .scale(Vec3::new(50.0, 50.0, -50.0));
//! ```

use crate::gpu::GpuContext;
use glam::{Mat4, Vec3};

/// A vertex for screen geometry with position, normal, and texture coordinates.
///
/// Uses `#[repr(C)]` for a predictable memory layout and derives
/// [`bytemuck::Pod`] and [`bytemuck::Zeroable`] for safe casting to byte
/// slices at upload time. Each vertex occupies 32 bytes:
/// position (12) + normal (12) + uv (8).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3d {
    /// The 3D position of this vertex in model space.
    pub position: [f32; 3],
    /// The surface normal vector (normalized; points toward the viewer for
    /// video surfaces, which are seen from inside or in front).
    pub normal: [f32; 3],
    /// Texture coordinates mapping the video frame onto the surface, in [0, 1].
    pub uv: [f32; 2],
}

impl Vertex3d {
    /// The wgpu vertex buffer layout descriptor for this vertex type.
    ///
    /// The rendering layer uses this when creating pipelines that consume
    /// uploaded screen meshes: position at location 0, normal at location 1,
    /// uv at location 2, 32-byte stride, per-vertex stepping.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex3d>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // normal
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
            // uv
            wgpu::VertexAttribute {
                offset: 24,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    };

    /// Creates a new vertex with the given position, normal, and UV coordinates.
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// CPU-side screen geometry before GPU upload.
///
/// This is the payload form the screen controller attaches to nodes. It stays
/// on the CPU so node mutation never requires a GPU device; the rendering
/// layer uploads it via [`Mesh::upload`] when drawing the scene.
#[derive(Clone, Debug)]
pub struct VideoGeometry {
    /// Vertex positions, normals, and UVs.
    pub vertices: Vec<Vertex3d>,
    /// Triangle indices.
    pub indices: Vec<u32>,
}

impl VideoGeometry {
    /// Creates geometry from vertices and indices.
    pub fn new(vertices: Vec<Vertex3d>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// A 1×1 quad on the XY plane, centered at the origin, facing +Z.
    ///
    /// Used for the backdrop occlusion plane; its extent comes entirely from
    /// the owning node's transform.
    pub fn unit_plane() -> Self {
        let vertices = vec![
            Vertex3d::new([-0.5, -0.5, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
            Vertex3d::new([0.5, -0.5, 0.0], [0.0, 0.0, 1.0], [1.0, 1.0]),
            Vertex3d::new([0.5, 0.5, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
            Vertex3d::new([-0.5, 0.5, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
        ];
        let indices = vec![0, 1, 2, 2, 3, 0];

        Self::new(vertices, indices)
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns `(min, max)` corners of the bounding box.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);

        for v in &self.vertices {
            let p = Vec3::from(v.position);
            min = min.min(p);
            max = max.max(p);
        }

        (min, max)
    }

    /// Returns the center point of the geometry.
    pub fn center(&self) -> Vec3 {
        let (min, max) = self.bounds();
        (min + max) * 0.5
    }

    /// Returns the size of the bounding box.
    pub fn size(&self) -> Vec3 {
        let (min, max) = self.bounds();
        max - min
    }

    /// Number of triangles described by the index list.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// GPU-resident screen geometry with vertex and index buffers.
///
/// Produced by uploading a [`VideoGeometry`]; immutable after creation. The
/// rendering layer binds these buffers with [`Vertex3d::LAYOUT`] to draw the
/// screen surface.
#[derive(Debug)]
pub struct Mesh {
    /// The GPU buffer containing vertex data.
    pub vertex_buffer: wgpu::Buffer,
    /// The GPU buffer containing index data (u32 indices).
    pub index_buffer: wgpu::Buffer,
    /// The number of indices in the mesh (determines draw call size).
    pub index_count: u32,
}

impl Mesh {
    /// Uploads CPU-side geometry to GPU buffers.
    ///
    /// The mesh is ready to render immediately after creation. An empty
    /// geometry uploads fine but draws nothing.
    pub fn upload(gpu: &GpuContext, geometry: &VideoGeometry) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Screen Vertex Buffer"),
                contents: bytemuck::cast_slice(&geometry.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Screen Index Buffer"),
                contents: bytemuck::cast_slice(&geometry.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: geometry.indices.len() as u32,
        }
    }
}

/// A 3D transformation representing position, rotation, and scale.
///
/// `Transform` stores translation, rotation (as a quaternion), and scale
/// separately, then combines them into a 4×4 matrix for rendering via
/// [`Transform::matrix()`] in standard SRT order (Scale → Rotate → Translate).
///
/// A default transform is the identity: origin position, no rotation, unit
/// scale. The immersive screen representation always uses exactly this pose.
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    /// World-space position (translation).
    pub position: Vec3,
    /// Rotation as a unit quaternion.
    pub rotation: glam::Quat,
    /// Scale factors for each axis.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: glam::Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Creates a new identity transform (origin, no rotation, unit scale).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transform positioned at the given location.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Sets the position (translation) component.
    pub fn position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Sets the rotation component using a quaternion.
    pub fn rotation(mut self, rotation: glam::Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets non-uniform scale factors for each axis.
    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Sets uniform scale on all axes.
    pub fn uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Multiplies the scale component uniformly on all three axes, leaving
    /// rotation and translation untouched.
    ///
    /// This is how a base transform from
    /// [`make_video_mesh`](crate::make_video_mesh) is normalized to a
    /// requested screen width.
    pub fn scaled_by(mut self, factor: f32) -> Self {
        self.scale *= factor;
        self
    }

    /// Converts this transform to a 4×4 transformation matrix (SRT order).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_bounds() {
        let vertices = vec![
            Vertex3d::new([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
            Vertex3d::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
            Vertex3d::new([-1.0, -1.0, -1.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
        ];
        let indices = vec![0, 1, 2];
        let geom = VideoGeometry::new(vertices, indices);

        let (min, max) = geom.bounds();
        assert_eq!(min, Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn unit_plane_is_unit_sized_and_flat() {
        let plane = VideoGeometry::unit_plane();

        assert_eq!(plane.size(), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(plane.center(), Vec3::ZERO);
        assert_eq!(plane.triangle_count(), 2);
    }

    #[test]
    fn scaled_by_leaves_position_and_rotation_alone() {
        let base = Transform::new()
            .position(Vec3::new(0.0, 1.0, -2.0))
            .scale(Vec3::new(2.0, 2.0, 2.0));

        let scaled = base.scaled_by(0.5);

        assert_eq!(scaled.scale, Vec3::ONE);
        assert_eq!(scaled.position, base.position);
        assert_eq!(scaled.rotation, base.rotation);
    }
}
