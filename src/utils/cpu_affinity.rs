//! Thread pinning for the sweep.
//!
//! Keeps the measuring thread on one core for the whole run so timings
//! aren't mixed across cores. Linux uses `sched_setaffinity` through libc;
//! elsewhere pinning is a no-op and the guard reports no core.

// ============================================================================
// Linux implementation using libc
// ============================================================================

#[cfg(target_os = "linux")]
mod platform {
    use std::mem::{size_of, zeroed};

    pub type Mask = libc::cpu_set_t;

    pub fn current_cpu() -> Option<usize> {
        let cpu = unsafe { libc::sched_getcpu() };
        usize::try_from(cpu).ok()
    }

    pub fn online_cpus() -> usize {
        let n = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
        usize::try_from(n).unwrap_or(0)
    }

    pub fn get_mask() -> Option<Mask> {
        unsafe {
            let mut set: libc::cpu_set_t = zeroed();
            (libc::sched_getaffinity(0, size_of::<libc::cpu_set_t>(), &mut set) == 0).then_some(set)
        }
    }

    pub fn set_mask(set: &Mask) -> bool {
        unsafe { libc::sched_setaffinity(0, size_of::<libc::cpu_set_t>(), set) == 0 }
    }

    pub fn single_core_mask(core: usize) -> Mask {
        unsafe {
            let mut set: libc::cpu_set_t = zeroed();
            libc::CPU_ZERO(&mut set);
            libc::CPU_SET(core, &mut set);
            set
        }
    }
}

// ============================================================================
// Fallback: no pinning
// ============================================================================

#[cfg(not(target_os = "linux"))]
mod platform {
    pub type Mask = ();

    pub fn current_cpu() -> Option<usize> {
        None
    }

    pub fn online_cpus() -> usize {
        std::thread::available_parallelism().map_or(0, usize::from)
    }

    pub fn get_mask() -> Option<Mask> {
        None
    }

    pub fn set_mask(_set: &Mask) -> bool {
        false
    }

    pub fn single_core_mask(_core: usize) -> Mask {}
}

/// Number of online CPU cores (0 if unknown).
pub fn online_cpus() -> usize {
    platform::online_cpus()
}

// ============================================================================
// RAII Guard
// ============================================================================

/// Pins the current thread on creation and restores the previous affinity
/// on drop.
///
/// # Example
/// ```ignore
/// {
///     let _pin = CpuPinGuard::new(); // thread pinned
///     // ... timed sweep ...
/// } // original affinity restored
/// ```
pub struct CpuPinGuard {
    pinned_core: Option<usize>,
    original: Option<platform::Mask>,
}

impl CpuPinGuard {
    /// Pin to the core the thread is running on now, or core 0 if unknown.
    pub fn new() -> Self {
        let core = platform::current_cpu().unwrap_or(0);
        Self::with_core(core)
    }

    /// Pin to a specific core.
    pub fn with_core(core: usize) -> Self {
        let original = platform::get_mask();
        if original.is_none() {
            return Self {
                pinned_core: None,
                original: None,
            };
        }

        let pinned = platform::set_mask(&platform::single_core_mask(core));
        Self {
            pinned_core: pinned.then_some(core),
            original: if pinned { original } else { None },
        }
    }

    /// Core this thread is pinned to, if any.
    pub fn core_id(&self) -> Option<usize> {
        self.pinned_core
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned_core.is_some()
    }

    /// Put back the affinity saved at pin time.
    ///
    /// Returns `false` only if a saved mask could not be reapplied. Later
    /// calls (and the eventual drop) do nothing.
    pub fn restore(&mut self) -> bool {
        let Some(original) = self.original.take() else {
            return true;
        };
        self.pinned_core = None;
        platform::set_mask(&original)
    }
}

impl Default for CpuPinGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CpuPinGuard {
    fn drop(&mut self) {
        if !self.restore() {
            eprintln!("warning: failed to restore the original CPU affinity");
        }
    }
}
