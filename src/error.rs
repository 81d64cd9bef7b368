//! Error types.
//!
//! Failure here is environmental absence (no GPU, no window), not
//! operation failure: if setup fails the frame loop is never started and
//! the error is surfaced to the caller.

use std::fmt;

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(
                f,
                "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."
            ),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when running the visualization.
#[derive(Debug)]
pub enum VizError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
}

impl fmt::Display for VizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VizError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            VizError::Window(e) => write!(f, "Failed to create window: {}", e),
            VizError::Gpu(e) => write!(f, "GPU error: {}", e),
        }
    }
}

impl std::error::Error for VizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VizError::EventLoop(e) => Some(e),
            VizError::Window(e) => Some(e),
            VizError::Gpu(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for VizError {
    fn from(e: winit::error::EventLoopError) -> Self {
        VizError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for VizError {
    fn from(e: winit::error::OsError) -> Self {
        VizError::Window(e)
    }
}

impl From<GpuError> for VizError {
    fn from(e: GpuError) -> Self {
        VizError::Gpu(e)
    }
}
