//! Shared test doubles: a recording, fault-injecting graphics context and
//! a scripted video source.
#![allow(dead_code)]

use std::sync::Mutex;

use glam::Mat4;
use tessera::{
    BufferHandle, DrawCall, GraphicsContext, Result, TextureDesc, TextureHandle, VideoSource,
    ViewerError,
};

/// One recorded context operation.
#[derive(Debug, Clone, PartialEq)]
pub enum GfxOp {
    CreateTexture { handle: u64, width: u32, height: u32 },
    WriteTexture { handle: u64, bytes: usize },
    CreateBuffer { handle: u64, bytes: usize, index: bool },
    BeginFrame,
    Clear([f64; 4]),
    Draw { texture: u64, element_count: u32, indexed: bool },
    EndFrame,
}

/// Graphics-context double that records every call and can be told to fail
/// upcoming allocations or uploads.
#[derive(Default)]
pub struct RecordingContext {
    pub ops: Vec<GfxOp>,
    fail_allocations: u32,
    fail_writes: u32,
    next_handle: u64,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `n` create_* calls fail with
    /// `ResourceAllocationFailed`.
    pub fn fail_next_allocations(&mut self, n: u32) {
        self.fail_allocations = n;
    }

    /// Makes the next `n` write_texture calls fail.
    pub fn fail_next_writes(&mut self, n: u32) {
        self.fail_writes = n;
    }

    fn alloc_handle(&mut self) -> u64 {
        let id = self.next_handle;
        self.next_handle += 1;
        id
    }

    fn take_allocation_failure(&mut self) -> bool {
        if self.fail_allocations > 0 {
            self.fail_allocations -= 1;
            true
        } else {
            false
        }
    }

    pub fn texture_creates(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, GfxOp::CreateTexture { .. }))
            .count()
    }

    pub fn texture_writes(&self, handle: TextureHandle) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, GfxOp::WriteTexture { handle: h, .. } if *h == handle.0))
            .count()
    }

    pub fn draw_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, GfxOp::Draw { .. }))
            .count()
    }

    /// Element counts of every draw, in submission order.
    pub fn drawn_counts(&self) -> Vec<u32> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                GfxOp::Draw { element_count, .. } => Some(*element_count),
                _ => None,
            })
            .collect()
    }
}

impl GraphicsContext for RecordingContext {
    fn create_texture(&mut self, desc: &TextureDesc) -> Result<TextureHandle> {
        if self.take_allocation_failure() {
            return Err(ViewerError::ResourceAllocationFailed(
                "injected texture allocation failure".into(),
            ));
        }
        let handle = self.alloc_handle();
        self.ops.push(GfxOp::CreateTexture {
            handle,
            width: desc.width,
            height: desc.height,
        });
        Ok(TextureHandle(handle))
    }

    fn write_texture(&mut self, texture: TextureHandle, pixels: &[u8]) -> Result<()> {
        if self.fail_writes > 0 {
            self.fail_writes -= 1;
            return Err(ViewerError::ResourceAllocationFailed(
                "injected texture upload failure".into(),
            ));
        }
        self.ops.push(GfxOp::WriteTexture {
            handle: texture.0,
            bytes: pixels.len(),
        });
        Ok(())
    }

    fn create_vertex_buffer(&mut self, _label: &'static str, data: &[u8]) -> Result<BufferHandle> {
        if self.take_allocation_failure() {
            return Err(ViewerError::ResourceAllocationFailed(
                "injected buffer allocation failure".into(),
            ));
        }
        let handle = self.alloc_handle();
        self.ops.push(GfxOp::CreateBuffer {
            handle,
            bytes: data.len(),
            index: false,
        });
        Ok(BufferHandle(handle))
    }

    fn create_index_buffer(&mut self, _label: &'static str, data: &[u8]) -> Result<BufferHandle> {
        if self.take_allocation_failure() {
            return Err(ViewerError::ResourceAllocationFailed(
                "injected buffer allocation failure".into(),
            ));
        }
        let handle = self.alloc_handle();
        self.ops.push(GfxOp::CreateBuffer {
            handle,
            bytes: data.len(),
            index: true,
        });
        Ok(BufferHandle(handle))
    }

    fn begin_frame(&mut self, _view_proj: Mat4) {
        self.ops.push(GfxOp::BeginFrame);
    }

    fn clear(&mut self, color: [f64; 4]) {
        self.ops.push(GfxOp::Clear(color));
    }

    fn draw(&mut self, call: &DrawCall) {
        self.ops.push(GfxOp::Draw {
            texture: call.texture.0,
            element_count: call.element_count,
            indexed: call.indices.is_some(),
        });
    }

    fn end_frame(&mut self) {
        self.ops.push(GfxOp::EndFrame);
    }
}

/// Video source that serves solid-color frames and counts how often it was
/// asked for one.
pub struct ScriptedVideoSource {
    width: u32,
    height: u32,
    frames_served: Mutex<u32>,
}

impl ScriptedVideoSource {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frames_served: Mutex::new(0),
        }
    }

    pub fn frames_served(&self) -> u32 {
        *self.frames_served.lock().unwrap()
    }
}

impl VideoSource for ScriptedVideoSource {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn copy_frame_into(&self, dst: &mut Vec<u8>) {
        let mut served = self.frames_served.lock().unwrap();
        *served += 1;
        dst.clear();
        dst.resize((self.width * self.height * 4) as usize, *served as u8);
    }
}
