//! Interrupt and timeout handling for the read loop.
//!
//! Handlers here only touch atomics and `kill(2)`. Anything user-visible is
//! reported later by the main loop after it observes the recorded state.

use std::io;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;

use libc::{pid_t, SIGALRM, SIGINT, SIGKILL};
use signal_hook::SigId;

use super::ProcessError;

const NO_PROCESS: pid_t = 0;

/// The one foreground child the shell may be waiting on.
///
/// Holds either no pid or the pid of a child that has not been reaped yet.
/// Shared between the main loop and the SIGALRM handler, so every field is a
/// single lock-free word.
#[derive(Debug, Default)]
pub struct ForegroundHandle {
    pid: AtomicI32,
    timed_out: AtomicI32,
}

impl ForegroundHandle {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn current(&self) -> Option<pid_t> {
        match self.pid.load(Ordering::SeqCst) {
            NO_PROCESS => None,
            pid => Some(pid),
        }
    }

    /// Records `pid` as the foreground child and starts the countdown.
    /// `timeout_secs == 0` leaves the countdown disarmed.
    ///
    /// The returned guard disarms the countdown and clears the handle when
    /// dropped, whichever way the wait ends.
    pub fn arm(&self, pid: pid_t, timeout_secs: u32) -> ForegroundGuard<'_> {
        self.timed_out.store(NO_PROCESS, Ordering::SeqCst);
        self.pid.store(pid, Ordering::SeqCst);
        // SAFETY: alarm(2) has no memory-safety preconditions.
        unsafe {
            libc::alarm(timeout_secs);
        }
        ForegroundGuard { handle: self }
    }

    /// Countdown expiry. Runs in signal context.
    ///
    /// Known hazard: if the wait has already reaped the child but the guard
    /// has not cleared the pid yet, the kill targets a pid the kernel may
    /// have handed to an unrelated process.
    pub fn expire(&self) {
        let pid = self.pid.swap(NO_PROCESS, Ordering::SeqCst);
        if pid > 0 {
            // SAFETY: kill(2) is async-signal-safe and takes plain integers.
            unsafe {
                libc::kill(pid, SIGKILL);
            }
            self.timed_out.store(pid, Ordering::SeqCst);
        }
    }

    /// The pid killed by the last expiry, reported at most once.
    pub fn take_timed_out(&self) -> Option<pid_t> {
        match self.timed_out.swap(NO_PROCESS, Ordering::SeqCst) {
            NO_PROCESS => None,
            pid => Some(pid),
        }
    }
}

#[must_use = "dropping the guard immediately disarms the countdown"]
pub struct ForegroundGuard<'a> {
    handle: &'a ForegroundHandle,
}

impl Drop for ForegroundGuard<'_> {
    fn drop(&mut self) {
        // Disarm first so expiry cannot fire after the pid is cleared.
        // SAFETY: see `ForegroundHandle::arm`.
        unsafe {
            libc::alarm(0);
        }
        self.handle.pid.store(NO_PROCESS, Ordering::SeqCst);
    }
}

/// Process-wide SIGINT/SIGALRM routing, installed once per session.
pub struct SignalRouter {
    interrupted: Arc<AtomicBool>,
    ids: Vec<SigId>,
}

impl SignalRouter {
    pub fn install(foreground: Arc<ForegroundHandle>) -> Result<Self, ProcessError> {
        let interrupted = Arc::new(AtomicBool::new(false));

        let interrupt_id = signal_hook::flag::register(SIGINT, Arc::clone(&interrupted))
            .map_err(ProcessError::Signal)?;

        // SAFETY: the action only performs atomic operations and kill(2),
        // all of which are async-signal-safe. It never allocates or locks.
        let alarm_id = unsafe {
            signal_hook::low_level::register(SIGALRM, move || foreground.expire())
        }
        .map_err(ProcessError::Signal)?;

        tracing::debug!("installed SIGINT and SIGALRM handlers");
        Ok(Self {
            interrupted,
            ids: vec![interrupt_id, alarm_id],
        })
    }

    /// Whether SIGINT arrived since the last call.
    pub fn take_interrupt(&self) -> bool {
        self.interrupted.swap(false, Ordering::SeqCst)
    }
}

impl Drop for SignalRouter {
    fn drop(&mut self) {
        for id in self.ids.drain(..) {
            signal_hook::low_level::unregister(id);
        }
    }
}

/// Put SIGINT back to its default action. Called in the child between fork
/// and exec, so it must stay async-signal-safe.
pub(crate) fn restore_default_interrupt() -> io::Result<()> {
    // SAFETY: signal(2) is async-signal-safe and SIG_DFL is always valid.
    if unsafe { libc::signal(SIGINT, libc::SIG_DFL) } == libc::SIG_ERR {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;
    use std::process::Command;

    #[test]
    fn test_guard_clears_handle() {
        let handle = ForegroundHandle::new();
        assert_eq!(handle.current(), None);
        {
            let _guard = handle.arm(4242, 0);
            assert_eq!(handle.current(), Some(4242));
        }
        assert_eq!(handle.current(), None);
        assert_eq!(handle.take_timed_out(), None);
    }

    #[test]
    fn test_expire_without_foreground_does_nothing() {
        let handle = ForegroundHandle::new();
        handle.expire();
        assert_eq!(handle.take_timed_out(), None);
    }

    #[test]
    fn test_expire_kills_foreground_child() {
        let mut child = Command::new("sleep").arg("30").spawn().unwrap();
        let pid = child.id() as pid_t;

        let handle = ForegroundHandle::new();
        let status = {
            let _guard = handle.arm(pid, 0);
            handle.expire();
            assert_eq!(handle.current(), None);
            child.wait().unwrap()
        };

        assert_eq!(status.signal(), Some(SIGKILL));
        assert_eq!(handle.take_timed_out(), Some(pid));
        // Reported once.
        assert_eq!(handle.take_timed_out(), None);
    }

    #[test]
    fn test_router_records_interrupt() {
        let router = SignalRouter::install(Arc::new(ForegroundHandle::new())).unwrap();
        assert!(!router.take_interrupt());

        // SAFETY: the router has replaced the default SIGINT action.
        unsafe {
            libc::raise(SIGINT);
        }
        assert!(router.take_interrupt());
        assert!(!router.take_interrupt());
    }
}
