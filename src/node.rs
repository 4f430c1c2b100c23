//! Scene nodes and screen payloads.
//!
//! A [`Node`] is the minimal visual-entity contract the screen controller
//! mutates: a name label, a transform, an enabled flag, one payload slot, and
//! children. The embedding scene layer attaches the controller's screen node
//! into its own graph and realizes payloads however its renderer likes.
//!
//! The payload is a tagged variant rather than a pair of nullable fields:
//! a node shows mesh+material geometry *or* a native player surface, never
//! both, and the enum makes that mutual exclusion structural.

use std::cell::RefCell;
use std::rc::Rc;

use crate::mesh::{Transform, VideoGeometry};
use crate::playback::PlayerOutput;

/// Shared handle to a node.
///
/// Nodes are single-threaded scene state; `Rc<RefCell<_>>` gives the
/// controller and the scene layer shared mutable access on the one designated
/// thread.
pub type NodeRef = Rc<RefCell<Node>>;

/// A visual entity in the scene.
pub struct Node {
    /// Name label; the controller tags it with the active screen
    /// representation.
    pub name: String,
    /// Local transform (scale, rotation, translation).
    pub transform: Transform,
    /// Whether the node is rendered. Disabled nodes keep their state.
    pub enabled: bool,
    /// The single payload slot.
    pub payload: ScreenPayload,
    /// Child nodes, rendered relative to this node's transform.
    pub children: Vec<NodeRef>,
}

impl Node {
    /// Creates an enabled, payload-free node at the identity transform.
    pub fn new(name: impl Into<String>) -> NodeRef {
        Rc::new(RefCell::new(Self {
            name: name.into(),
            transform: Transform::default(),
            enabled: true,
            payload: ScreenPayload::Empty,
            children: Vec::new(),
        }))
    }

    /// Parents `child` under this node.
    pub fn add_child(&mut self, child: NodeRef) {
        self.children.push(child);
    }
}

/// What a node displays.
///
/// Exactly one variant is ever attached; assigning a new one replaces the old,
/// so a mesh payload can never linger behind a native player surface or vice
/// versa.
#[derive(Clone, Debug)]
pub enum ScreenPayload {
    /// Nothing attached yet (freshly constructed, or spherical build still
    /// pending).
    Empty,
    /// Explicit geometry with a material.
    MeshMaterial {
        /// CPU-side geometry for the rendering layer to upload.
        geometry: VideoGeometry,
        /// How the surface is shaded.
        material: Material,
    },
    /// The rendering engine's native video player surface.
    NativePlayer(NativeSurface),
}

impl ScreenPayload {
    /// Returns `true` if no payload is attached.
    pub fn is_empty(&self) -> bool {
        matches!(self, ScreenPayload::Empty)
    }
}

/// Surface shading for a [`ScreenPayload::MeshMaterial`] payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    /// Maps a playback handle's output onto the geometry.
    Video(PlayerOutput),
    /// Opaque occluder; hides geometry behind the surface.
    Occlusion,
}

/// Configuration of the engine-native video player surface.
///
/// Built via [`NativeSurface::new`], which applies the fixed defaults the
/// screen controller always requests: stereoscopic viewing and full immersion.
#[derive(Clone, Debug, PartialEq)]
pub struct NativeSurface {
    /// The playable output the surface presents.
    pub output: PlayerOutput,
    /// Mono or stereo presentation.
    pub viewing: ViewingMode,
    /// Windowed or full-surround presentation.
    pub immersion: ImmersionMode,
}

impl NativeSurface {
    /// Wraps a playable output with the controller's fixed viewing defaults.
    pub fn new(output: PlayerOutput) -> Self {
        Self {
            output,
            viewing: ViewingMode::Stereoscopic,
            immersion: ImmersionMode::Full,
        }
    }
}

/// Eye presentation mode for the native surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewingMode {
    /// Single view for both eyes.
    Monoscopic,
    /// Per-eye views.
    Stereoscopic,
}

/// Immersion level for the native surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImmersionMode {
    /// Bounded window in the scene.
    Windowed,
    /// Full-surround presentation.
    Full,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::VideoPlayback;

    #[test]
    fn native_surface_defaults_are_stereo_full() {
        let playback = VideoPlayback::new();
        let surface = NativeSurface::new(playback.output());

        assert_eq!(surface.viewing, ViewingMode::Stereoscopic);
        assert_eq!(surface.immersion, ImmersionMode::Full);
    }

    #[test]
    fn new_node_is_enabled_and_empty() {
        let node = Node::new("screen");
        let node = node.borrow();

        assert!(node.enabled);
        assert!(node.payload.is_empty());
        assert!(node.children.is_empty());
    }
}
