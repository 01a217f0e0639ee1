//! Showcase demo: a checkerboard tiled image next to a synthetic animated
//! video surface.
//!
//! Run with `cargo run --example showcase`.

use std::sync::{Arc, Mutex};

use glam::Vec3;
use tessera::{App, Axes, ImageData, Node, TiledImageNode, VideoSource, VideoSurfaceNode};

/// Procedural stand-in for a live decoded-video surface: every frame is a
/// scrolling color gradient.
struct GradientSource {
    width: u32,
    height: u32,
    frame: Mutex<u32>,
}

impl GradientSource {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frame: Mutex::new(0),
        }
    }
}

impl VideoSource for GradientSource {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn copy_frame_into(&self, dst: &mut Vec<u8>) {
        let mut frame = self.frame.lock().expect("gradient frame counter poisoned");
        *frame = frame.wrapping_add(1);
        let shift = *frame;

        dst.clear();
        dst.reserve((self.width * self.height * 4) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                dst.push(((x + shift) % 256) as u8);
                dst.push(((y + shift / 2) % 256) as u8);
                dst.push(128);
                dst.push(255);
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut app = App::new().with_title("Tessera Showcase");

    // The tiled mesh spans [0,1]; scale it down and move it into the left
    // half of the view, inside the 0.1..1.0 depth range.
    let image = ImageData::checkerboard(512, 512, 32)?;
    let mut checkerboard = TiledImageNode::new(image, 4)?;
    checkerboard.transform.translate(Vec3::new(-0.9, -0.4, -0.5));
    checkerboard.transform.scale(0.8);
    app.enqueue(checkerboard);

    // The video quad spans [-1,1]; shrink it into the right half.
    let source = Arc::new(GradientSource::new(256, 256));
    let mut video = VideoSurfaceNode::new(source);
    video.transform.translate(Vec3::new(0.5, 0.0, -0.5));
    video.transform.scale(0.4);
    app.enqueue(video);

    // Spin the video surface a little every frame.
    app.set_update_fn(|viewer, _elapsed| {
        for node in viewer.registry_mut().active_mut() {
            if matches!(node, Node::VideoSurface(_)) {
                node.rotate(0.01, Axes::Z);
            }
        }
    });

    app.run()?;
    Ok(())
}
