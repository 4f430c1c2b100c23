//! Headless GPU context for uploading screen geometry.
//!
//! The screen controller is a scene-side component and never talks to the GPU
//! itself; this context exists for the rendering layer (and the demos) to
//! upload [`VideoGeometry`](crate::VideoGeometry) payloads into GPU buffers
//! via [`Mesh::upload`](crate::Mesh::upload). It is surface-free: no window,
//! no swapchain, just a device and a queue.

/// Core GPU context holding the wgpu device and queue.
///
/// Fields are public to allow direct access to wgpu APIs when needed.
pub struct GpuContext {
    /// The logical GPU device for creating resources.
    pub device: wgpu::Device,
    /// The command queue for submitting work to the GPU.
    pub queue: wgpu::Queue,
}

impl GpuContext {
    /// Create a headless GPU context.
    ///
    /// Requests an adapter with no surface constraint, then a default device
    /// and queue. Suitable for buffer uploads and compute; presentation is the
    /// embedding renderer's concern.
    ///
    /// # Panics
    ///
    /// Panics if no suitable GPU adapter is found or device creation fails.
    pub fn headless() -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .expect("Failed to find a suitable GPU adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("Proscenium Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
            trace: Default::default(),
            experimental_features: Default::default(),
        }))
        .expect("Failed to create device");

        Self { device, queue }
    }

    /// Wrap an existing device and queue.
    ///
    /// Use this when the embedding renderer already owns the GPU and the
    /// screen meshes should live on the same device.
    pub fn from_device(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self { device, queue }
    }
}
