use std::process::{Command, Stdio};

use crate::transcription::domain::device::AcceleratorProbe;

/// Probe for a usable NVIDIA GPU.
///
/// Checks the kernel driver interface where one exists, then falls back
/// to asking `nvidia-smi`.
pub struct SystemAcceleratorProbe;

impl AcceleratorProbe for SystemAcceleratorProbe {
    fn accelerator_available(&self) -> bool {
        #[cfg(target_os = "linux")]
        {
            if std::path::Path::new("/proc/driver/nvidia/version").exists() {
                return true;
            }
        }
        Command::new("nvidia-smi")
            .arg("-L")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }
}
