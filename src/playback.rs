//! Playback handles and aspect-ratio change observation.
//!
//! [`VideoPlayback`] is the long-lived handle the decoder side keeps updated
//! and the screen controller reads. Its aspect ratio starts out unknown and
//! becomes valid only once the decoder has seen enough of the stream; the
//! spherical screen build has to wait for that moment, so the handle supports
//! explicit one-shot subscriptions on the aspect-ratio value.
//!
//! Observation is edge-triggered: a subscription snapshots the value at
//! registration time, fires exactly once when a *different* value is set, and
//! unregisters itself. Firing means scheduling the callback onto the
//! subscriber's [`TaskQueue`], never invoking it inline, so node mutation
//! stays on the designated thread's drain.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::schedule::TaskQueue;

static NEXT_OUTPUT_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque handle to a playback object's renderable output.
///
/// The rendering layer resolves this to its actual video render target; the
/// controller only threads it through materials and native surfaces. Equality
/// identifies the underlying output, so duplicating a render target by
/// accident is detectable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlayerOutput(u64);

struct AspectObserver {
    /// Aspect ratio at registration time; the observer fires only when the
    /// value moves away from this.
    seen: Option<f32>,
    queue: TaskQueue,
    on_change: Box<dyn FnOnce()>,
}

struct PlaybackState {
    aspect_ratio: Option<f32>,
    horizontal_fov: f32,
    vertical_fov: f32,
    output: PlayerOutput,
    observers: Vec<AspectObserver>,
}

/// A handle onto one video playback object.
///
/// Cloning shares the same underlying state; the decoder side holds one clone
/// and feeds it metadata via [`set_metadata`](VideoPlayback::set_metadata),
/// scene-side code holds another and reads it.
#[derive(Clone)]
pub struct VideoPlayback {
    state: Rc<RefCell<PlaybackState>>,
}

impl VideoPlayback {
    /// Creates a handle with no decoded metadata yet.
    ///
    /// Field-of-view values default to full equirectangular coverage
    /// (360°×180°) until the decoder reports otherwise; the aspect ratio is
    /// unknown (`None`).
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(PlaybackState {
                aspect_ratio: None,
                horizontal_fov: 360.0,
                vertical_fov: 180.0,
                output: PlayerOutput(NEXT_OUTPUT_ID.fetch_add(1, Ordering::Relaxed)),
                observers: Vec::new(),
            })),
        }
    }

    /// Current aspect ratio, or `None` until decoded metadata arrives.
    pub fn aspect_ratio(&self) -> Option<f32> {
        self.state.borrow().aspect_ratio
    }

    /// Horizontal field of view of the source, in degrees.
    pub fn horizontal_fov(&self) -> f32 {
        self.state.borrow().horizontal_fov
    }

    /// Vertical field of view of the source, in degrees.
    pub fn vertical_fov(&self) -> f32 {
        self.state.borrow().vertical_fov
    }

    /// The playable output handle materials and native surfaces wrap.
    pub fn output(&self) -> PlayerOutput {
        self.state.borrow().output
    }

    /// Registers a one-shot observation on the aspect-ratio value.
    ///
    /// The current value is snapshotted now; when a different value is later
    /// set, `on_change` is scheduled onto `queue` exactly once and the
    /// subscription is removed. If the value never changes, the callback
    /// never runs and is dropped with the handle.
    pub fn observe_aspect_ratio(&self, queue: &TaskQueue, on_change: impl FnOnce() + 'static) {
        let mut state = self.state.borrow_mut();
        let seen = state.aspect_ratio;
        state.observers.push(AspectObserver {
            seen,
            queue: queue.clone(),
            on_change: Box::new(on_change),
        });
    }

    /// Number of registered aspect-ratio subscriptions (diagnostic).
    pub fn observer_count(&self) -> usize {
        self.state.borrow().observers.len()
    }

    /// Decoder-side entry point: stream metadata became available or changed.
    pub fn set_metadata(&self, aspect_ratio: f32, horizontal_fov: f32, vertical_fov: f32) {
        {
            let mut state = self.state.borrow_mut();
            state.horizontal_fov = horizontal_fov;
            state.vertical_fov = vertical_fov;
        }
        self.set_aspect_ratio(aspect_ratio);
    }

    /// Sets the aspect ratio, firing observers whose snapshot differs.
    ///
    /// Fired observers are removed first and scheduled after the state borrow
    /// is released, so a callback registering a fresh observation sees the new
    /// value as its baseline.
    pub fn set_aspect_ratio(&self, aspect_ratio: f32) {
        let fired: Vec<AspectObserver> = {
            let mut state = self.state.borrow_mut();
            state.aspect_ratio = Some(aspect_ratio);

            let new = Some(aspect_ratio);
            let (fire, keep) = state
                .observers
                .drain(..)
                .partition(|observer| observer.seen != new);
            state.observers = keep;
            fire
        };

        for observer in fired {
            let on_change = observer.on_change;
            observer.queue.push(on_change);
        }
    }
}

impl Default for VideoPlayback {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn observer_fires_once_via_queue() {
        let queue = TaskQueue::new();
        let playback = VideoPlayback::new();
        let fired = Rc::new(Cell::new(0));

        let counter = Rc::clone(&fired);
        playback.observe_aspect_ratio(&queue, move || counter.set(counter.get() + 1));

        playback.set_aspect_ratio(1.78);
        // Scheduled, not invoked inline.
        assert_eq!(fired.get(), 0);
        assert_eq!(queue.len(), 1);

        queue.run_pending();
        assert_eq!(fired.get(), 1);
        assert_eq!(playback.observer_count(), 0);

        // One-shot: a second change finds no subscription.
        playback.set_aspect_ratio(2.39);
        assert!(queue.is_empty());
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn setting_the_same_value_does_not_fire() {
        let queue = TaskQueue::new();
        let playback = VideoPlayback::new();
        playback.set_aspect_ratio(1.78);

        playback.observe_aspect_ratio(&queue, || panic!("must not fire"));

        playback.set_aspect_ratio(1.78);
        assert!(queue.is_empty());
        assert_eq!(playback.observer_count(), 1);

        // A real change still fires the subscription registered above.
        playback.set_aspect_ratio(2.0);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn distinct_playbacks_have_distinct_outputs() {
        let a = VideoPlayback::new();
        let b = VideoPlayback::new();

        assert_ne!(a.output(), b.output());
        assert_eq!(a.output(), a.clone().output());
    }

    #[test]
    fn set_metadata_updates_fov_before_observers_run() {
        let queue = TaskQueue::new();
        let playback = VideoPlayback::new();

        let handle = playback.clone();
        let seen = Rc::new(Cell::new((0.0f32, 0.0f32)));
        let seen_in_task = Rc::clone(&seen);
        playback.observe_aspect_ratio(&queue, move || {
            seen_in_task.set((handle.horizontal_fov(), handle.vertical_fov()));
        });

        playback.set_metadata(1.0, 180.0, 180.0);
        queue.run_pending();

        assert_eq!(seen.get(), (180.0, 180.0));
    }
}
