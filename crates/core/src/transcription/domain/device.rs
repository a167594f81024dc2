use crate::shared::constants::{CPU_DEVICE, CUDA_DEVICE};

/// Domain interface for accelerator availability probing.
pub trait AcceleratorProbe: Send {
    fn accelerator_available(&self) -> bool;
}

/// Resolve the compute device for a run.
///
/// An explicit request wins verbatim; otherwise the probe decides
/// between the accelerator and the CPU fallback.
pub fn resolve_device(requested: Option<&str>, probe: &dyn AcceleratorProbe) -> String {
    match requested {
        Some(device) => device.to_string(),
        None if probe.accelerator_available() => CUDA_DEVICE.to_string(),
        None => CPU_DEVICE.to_string(),
    }
}
