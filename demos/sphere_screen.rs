//! Deferred spherical build, end to end: update, metadata arrival, queue
//! drain, GPU upload.

use proscenium::{
    GpuContext, Mesh, ScreenController, ScreenPayload, TaskQueue, VideoPlayback, VideoProjection,
};

fn main() {
    let queue = TaskQueue::new();
    let controller = ScreenController::new(queue.clone());
    let playback = VideoPlayback::new();

    let projection = VideoProjection::Spherical {
        horizontal_fov: 180.0,
        vertical_fov: 180.0,
    };
    controller.update(&playback, &projection, 100.0);
    println!("after update: payload empty, build deferred");

    // The decoder reports stream metadata; the aspect-ratio change triggers
    // the one-shot observation.
    playback.set_metadata(2.0, 180.0, 180.0);
    let ran = queue.run_pending();
    println!("drained queue: {ran} task(s) ran");

    let screen = controller.screen_node();
    let screen = screen.borrow();
    let ScreenPayload::MeshMaterial { geometry, .. } = &screen.payload else {
        panic!("expected a mesh payload after the deferred build");
    };
    println!(
        "screen '{}': {} vertices, {} triangles, scale {}",
        screen.name,
        geometry.vertices.len(),
        geometry.triangle_count(),
        screen.transform.scale,
    );

    // Hand the geometry to the GPU the way a rendering layer would.
    let gpu = GpuContext::headless();
    let mesh = Mesh::upload(&gpu, geometry);
    println!("uploaded: {} indices on the GPU", mesh.index_count);
}
