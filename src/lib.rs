//! # Proscenium
//!
//! **Projection-aware video screen construction for 3D scenes.**
//!
//! A streamed video source arrives with a projection format — flat
//! rectangular, spherical/partial-spherical (equirectangular), or
//! format-native immersive — and the scene needs matching geometry: a screen
//! plane pushed back into the room, an inward-facing sphere patch around the
//! viewer, or the engine's native immersive surface. Proscenium's
//! [`ScreenController`] owns that decision, builds or reconfigures the screen
//! node on every update, and keeps a backdrop occlusion plane in step.
//!
//! ## Quick Start
//!
//! ```
//! use proscenium::{ScreenController, TaskQueue, VideoPlayback, VideoProjection};
//!
//! // One queue per rendering thread; drain it once per frame.
//! let queue = TaskQueue::new();
//! let controller = ScreenController::new(queue.clone());
//! let playback = VideoPlayback::new();
//!
//! // Attach controller.screen_node() into your scene graph, then:
//! controller.update(&playback, &VideoProjection::Rectangular, 50.0);
//!
//! // Spherical sources build once decoded metadata arrives:
//! let spherical = VideoProjection::Spherical { horizontal_fov: 180.0, vertical_fov: 180.0 };
//! controller.update(&playback, &spherical, 100.0);
//! playback.set_metadata(2.0, 180.0, 180.0); // decoder side
//! queue.run_pending();                      // designated thread, next frame
//! ```
//!
//! ## Design
//!
//! - **One payload slot** — a screen node shows mesh+material geometry *or*
//!   the native player surface; the [`ScreenPayload`] enum makes the mutual
//!   exclusion structural.
//! - **Expensive work exactly once** — the spherical mesh and its video
//!   material are built on a one-shot, edge-triggered aspect-ratio
//!   observation, never per `update` call.
//! - **One thread, no locks** — nodes and the [`TaskQueue`] are `Rc`-backed
//!   and `!Send`; all mutation stays on the designated rendering thread.

mod controller;
mod gpu;
mod mesh;
mod node;
mod playback;
mod projection;
mod schedule;
mod video_mesh;

pub use controller::{
    BACKDROP_NAME, DEFAULT_SCREEN_WIDTH, NATIVE_SCREEN_NAME, SPHERE_SCREEN_NAME, ScreenController,
};
pub use gpu::GpuContext;
pub use mesh::{Mesh, Transform, Vertex3d, VideoGeometry};
pub use node::{ImmersionMode, Material, NativeSurface, Node, NodeRef, ScreenPayload, ViewingMode};
pub use playback::{PlayerOutput, VideoPlayback};
pub use projection::VideoProjection;
pub use schedule::TaskQueue;
pub use video_mesh::{REFERENCE_WIDTH, make_video_mesh};

// Re-export glam math types for convenience
pub use glam::{Mat4, Quat, Vec3};
