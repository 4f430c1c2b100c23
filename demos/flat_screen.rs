//! Rectangular screen walkthrough - shows transforms and backdrop sync.

use proscenium::{ScreenController, TaskQueue, VideoPlayback, VideoProjection};

fn main() {
    let queue = TaskQueue::new();
    let controller = ScreenController::new(queue.clone());
    let playback = VideoPlayback::new();

    controller.update(&playback, &VideoProjection::Rectangular, 50.0);

    let screen = controller.screen_node();
    let backdrop = controller.backdrop_node();
    {
        let screen = screen.borrow();
        let backdrop = backdrop.borrow();
        println!("screen   '{}'", screen.name);
        println!("  scale    {}", screen.transform.scale);
        println!("  position {}", screen.transform.position);
        println!("backdrop enabled={}", backdrop.enabled);
        println!("  scale    {}", backdrop.transform.scale);
        println!("  position {}", backdrop.transform.position);
    }

    // Switching to immersive snaps the screen to the default pose and hides
    // the backdrop.
    controller.update(&playback, &VideoProjection::Immersive, 50.0);
    {
        let screen = screen.borrow();
        let backdrop = backdrop.borrow();
        println!("\nafter immersive switch:");
        println!("screen   '{}' scale {}", screen.name, screen.transform.scale);
        println!("backdrop enabled={}", backdrop.enabled);
    }
}
