//! Error Types
//!
//! This module defines the error types used throughout the viewer.
//!
//! # Overview
//!
//! The main error type [`ViewerError`] covers all failure modes:
//! - Tiling geometry and node lifecycle misuse
//! - Graphics resource allocation and upload failures
//! - GPU backend and window system setup failures
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, ViewerError>`.

use thiserror::Error;

/// The main error type for the viewer.
#[derive(Error, Debug)]
pub enum ViewerError {
    // ========================================================================
    // Geometry & Lifecycle Errors
    // ========================================================================
    /// Tiling input that cannot produce a valid grid (zero dimension or
    /// zero divisor), or a pixel buffer that disagrees with its dimensions.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A node's `init` was called more than once.
    #[error("Node is already initialized")]
    AlreadyInitialized,

    /// The graphics context failed to create or upload a resource during
    /// node initialization or a per-frame texture refresh.
    #[error("Graphics resource allocation failed: {0}")]
    ResourceAllocationFailed(String),

    // ========================================================================
    // GPU Backend Errors
    // ========================================================================
    /// Failed to request a compatible GPU adapter.
    #[error("Failed to request WGPU adapter: {0}")]
    AdapterRequestFailed(String),

    /// Failed to create the GPU device.
    #[error("Failed to create WGPU device: {0}")]
    DeviceCreateFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create the window surface.
    #[error("Failed to create window surface: {0}")]
    SurfaceCreateFailed(#[from] wgpu::CreateSurfaceError),

    /// Event loop error (winit).
    #[error("Event loop error: {0}")]
    EventLoopError(#[from] winit::error::EventLoopError),
}

/// Alias for `Result<T, ViewerError>`.
pub type Result<T> = std::result::Result<T, ViewerError>;
