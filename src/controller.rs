//! The screen controller: projection-dependent screen construction.
//!
//! [`ScreenController`] owns two nodes: the screen node the scene layer
//! attaches into its graph, and a backdrop occlusion plane parented under it.
//! Each [`update`](ScreenController::update) call reshapes both to match the
//! requested projection and width:
//!
//! - **Spherical** sources need decoded field-of-view metadata that may not
//!   exist yet, so the build is deferred behind a one-shot aspect-ratio
//!   observation and runs later on the designated thread's task queue.
//!   Constructing the video material duplicates the player's render target,
//!   so the deferral also guarantees it happens once per metadata transition,
//!   not once per `update` call.
//! - **Rectangular** sources get the native player surface on a plane pushed
//!   back into the scene, scaled by the requested width. Synchronous.
//! - **Immersive** sources get the native player surface at the identity
//!   pose; the format owns the whole coordinate frame and is not resizable.
//!
//! The backdrop is synchronized after every branch: visible only behind the
//! rectangular screen, sized half again as wide so nothing pokes out around
//! the edges.
//!
//! # Example
//!
//! ```
//! use proscenium::{ScreenController, TaskQueue, VideoPlayback, VideoProjection};
//!
//! let queue = TaskQueue::new();
//! let controller = ScreenController::new(queue.clone());
//! let playback = VideoPlayback::new();
//!
//! controller.update(&playback, &VideoProjection::Rectangular, 50.0);
//!
//! let screen = controller.screen_node();
//! assert_eq!(screen.borrow().transform.scale.x, 50.0);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use tracing::{debug, trace};

use crate::mesh::{Transform, VideoGeometry};
use crate::node::{Material, NativeSurface, Node, NodeRef, ScreenPayload};
use crate::playback::VideoPlayback;
use crate::projection::VideoProjection;
use crate::schedule::TaskQueue;
use crate::video_mesh::{REFERENCE_WIDTH, make_video_mesh};

/// Width passed by callers that have no sizing preference, in scene units.
///
/// Matches [`REFERENCE_WIDTH`], so the default rectangular screen and the
/// default sphere both come out at the mesh generator's native size.
pub const DEFAULT_SCREEN_WIDTH: f32 = 100.0;

/// Node label while the sphere representation is active.
pub const SPHERE_SCREEN_NAME: &str = "sphere-screen";
/// Node label while the native player representation is active.
pub const NATIVE_SCREEN_NAME: &str = "native-player-screen";
/// Node label of the backdrop occlusion plane.
pub const BACKDROP_NAME: &str = "screen-backdrop";

/// Depth the rectangular screen is pushed back to, in scene units.
const RECTANGULAR_DEPTH: f32 = -200.0;
/// Floor applied to the width before sizing the backdrop, so a zero-width
/// request never produces degenerate geometry.
const BACKDROP_MIN_WIDTH: f32 = 0.1;
/// Depth offset of the freshly constructed (still hidden) backdrop.
const BACKDROP_REST_OFFSET: f32 = -0.001;

struct ControllerState {
    screen: NodeRef,
    backdrop: NodeRef,
    /// Width of the most recent spherical request, present while a deferred
    /// build is waiting on metadata. `Some` also means an observation is
    /// already registered, so further spherical updates only refresh the
    /// width.
    pending_sphere_width: Option<f32>,
}

/// Builds and reconfigures the on-screen video surface for one video source.
///
/// Construction creates the screen node (no payload) and the backdrop
/// (disabled, unit occlusion plane) parented under it; both live as long as
/// the controller's internals do. All mutation happens on the thread that
/// owns the [`TaskQueue`] — the controller is `!Send` by construction.
pub struct ScreenController {
    state: Rc<RefCell<ControllerState>>,
    queue: TaskQueue,
}

impl ScreenController {
    /// Creates a controller whose deferred work runs on `queue`.
    pub fn new(queue: TaskQueue) -> Self {
        let screen = Node::new("video-screen");

        let backdrop = Node::new(BACKDROP_NAME);
        {
            let mut backdrop = backdrop.borrow_mut();
            backdrop.enabled = false;
            backdrop.payload = ScreenPayload::MeshMaterial {
                geometry: VideoGeometry::unit_plane(),
                material: Material::Occlusion,
            };
            backdrop.transform =
                Transform::from_position(Vec3::new(0.0, 0.0, BACKDROP_REST_OFFSET));
        }
        screen.borrow_mut().add_child(Rc::clone(&backdrop));

        Self {
            state: Rc::new(RefCell::new(ControllerState {
                screen,
                backdrop,
                pending_sphere_width: None,
            })),
            queue,
        }
    }

    /// The owned screen node, for attachment into the scene graph.
    pub fn screen_node(&self) -> NodeRef {
        Rc::clone(&self.state.borrow().screen)
    }

    /// The backdrop occlusion node (already a child of the screen node).
    pub fn backdrop_node(&self) -> NodeRef {
        Rc::clone(&self.state.borrow().backdrop)
    }

    /// Reshapes the screen for `projection` at the requested on-screen
    /// `width` (scene units; see [`DEFAULT_SCREEN_WIDTH`]).
    ///
    /// Call whenever playback starts, the projection changes, or the desired
    /// width changes. Rectangular and immersive requests take effect
    /// synchronously; a spherical request defers the mesh build until the
    /// playback handle's aspect ratio changes, signalling that field-of-view
    /// metadata is valid. Degenerate widths are clamped where they matter,
    /// never rejected.
    pub fn update(&self, playback: &VideoPlayback, projection: &VideoProjection, width: f32) {
        match projection {
            VideoProjection::Spherical { .. } => self.request_sphere(playback, width),
            VideoProjection::Rectangular => {
                let transform = Transform::new()
                    // Negated depth scale per the native surface's coordinate
                    // handling.
                    .scale(Vec3::new(width, width, -width))
                    .position(Vec3::new(0.0, 0.0, RECTANGULAR_DEPTH));
                self.apply_native_surface(playback, transform);
            }
            VideoProjection::Immersive => {
                // Immersive video owns the default pose; width is ignored.
                self.apply_native_surface(playback, Transform::default());
            }
        }

        self.sync_backdrop(projection, width);
    }

    /// Arranges for the sphere to be built once metadata is available.
    ///
    /// Only the first spherical request registers an observation; repeated
    /// requests before it fires just refresh the pending width, so exactly
    /// one mesh/material construction happens per metadata transition.
    fn request_sphere(&self, playback: &VideoPlayback, width: f32) {
        let already_pending = {
            let mut state = self.state.borrow_mut();
            let pending = state.pending_sphere_width.is_some();
            state.pending_sphere_width = Some(width);
            pending
        };

        if already_pending {
            trace!(width, "sphere build already pending, refreshed width");
            return;
        }

        // The task holds only a weak reference: a controller dropped before
        // the metadata arrives must not be kept alive by its own callback,
        // and the build must degrade to a no-op.
        let state = Rc::downgrade(&self.state);
        let handle = playback.clone();
        playback.observe_aspect_ratio(&self.queue, move || {
            let Some(state) = state.upgrade() else {
                debug!("controller dropped before sphere build, skipping");
                return;
            };
            Self::build_sphere(&state, &handle);
        });
        trace!(width, "registered deferred sphere build");
    }

    /// The deferred spherical build. Runs on the task queue after the
    /// aspect-ratio transition.
    fn build_sphere(state: &Rc<RefCell<ControllerState>>, playback: &VideoPlayback) {
        let width = state
            .borrow_mut()
            .pending_sphere_width
            .take()
            .unwrap_or(DEFAULT_SCREEN_WIDTH);

        let h_fov = playback.horizontal_fov();
        let v_fov = playback.vertical_fov();
        let (geometry, base_transform) = make_video_mesh(h_fov, v_fov);

        let screen = Rc::clone(&state.borrow().screen);
        let mut screen = screen.borrow_mut();
        screen.name = SPHERE_SCREEN_NAME.to_string();
        screen.payload = ScreenPayload::MeshMaterial {
            geometry,
            material: Material::Video(playback.output()),
        };
        screen.transform = base_transform.scaled_by(width / REFERENCE_WIDTH);

        debug!(h_fov, v_fov, width, "built sphere screen");
    }

    /// Points the screen node at the engine's native player surface.
    ///
    /// Requests stereoscopic viewing and full immersion as fixed defaults.
    /// Idempotent: repeating with the same handle just replaces the payload.
    fn apply_native_surface(&self, playback: &VideoPlayback, transform: Transform) {
        let state = self.state.borrow();
        let mut screen = state.screen.borrow_mut();
        screen.name = NATIVE_SCREEN_NAME.to_string();
        screen.payload = ScreenPayload::NativePlayer(NativeSurface::new(playback.output()));
        screen.transform = transform;

        debug!("applied native player surface");
    }

    /// Shows the backdrop behind the rectangular screen and hides it
    /// otherwise.
    fn sync_backdrop(&self, projection: &VideoProjection, width: f32) {
        let should_show = projection.is_rectangular();

        let state = self.state.borrow();
        let mut backdrop = state.backdrop.borrow_mut();
        backdrop.enabled = should_show;
        if !should_show {
            // A stale transform is harmless while disabled.
            return;
        }

        let base = width.max(BACKDROP_MIN_WIDTH);
        backdrop.transform = Transform::new()
            // 50% wider than the screen on both lateral axes; thin but
            // non-zero depth to avoid z-fighting.
            .scale(Vec3::new(base * 1.5, base * 1.5, (base * 0.01).max(0.01)))
            .position(Vec3::new(0.0, 0.0, base * 0.05));
    }
}
