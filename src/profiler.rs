//! Measureme-based instrumentation, enabled with the `profiler` feature.
//!
//! When the feature is disabled every call site compiles down to nothing.

#![allow(missing_copy_implementations, unused_results)]

#[cfg(feature = "profiler")]
use measureme::{EventId, Profiler as MeasuremeProfiler, TimingGuard};
#[cfg(feature = "profiler")]
use once_cell::sync::OnceCell;
#[cfg(feature = "profiler")]
use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    path::Path,
    thread::ThreadId,
};

/// Process-wide profiler, started lazily on first use.
#[cfg(feature = "profiler")]
pub(crate) struct Profiler {
    profiler: MeasuremeProfiler,
}

#[cfg(feature = "profiler")]
impl Profiler {
    /// Starts a timed event, ended when the returned guard is dropped.
    pub(crate) fn start_event(&self, label: &str, category: &str) -> TimingGuard<'_> {
        let kind = self.profiler.alloc_string(category);
        let id = EventId::from_label(self.profiler.alloc_string(label));
        let thread_id = Self::thread_id_to_u32(std::thread::current().id());
        self.profiler
            .start_recording_interval_event(kind, id, thread_id)
    }

    pub(crate) fn global() -> &'static Self {
        static INSTANCE: OnceCell<Profiler> = OnceCell::new();
        INSTANCE.get_or_init(|| Self {
            profiler: MeasuremeProfiler::new(Path::new("./krait_trace"))
                .expect("failed to create profiler"),
        })
    }

    fn thread_id_to_u32(tid: ThreadId) -> u32 {
        let mut hasher = DefaultHasher::new();
        tid.hash(&mut hasher);
        hasher.finish() as u32
    }
}

/// No-op profiler used when the `profiler` feature is disabled.
#[cfg(not(feature = "profiler"))]
#[derive(Debug)]
pub(crate) struct Profiler;

#[cfg(not(feature = "profiler"))]
impl Profiler {
    #[inline]
    pub(crate) fn start_event(&self, _label: &str, _category: &str) {}

    #[inline]
    pub(crate) fn global() -> &'static Self {
        &Self
    }
}
