//! System color scheme watcher
//!
//! Desktop platforms don't push appearance changes to us, so a background
//! thread re-probes [`SystemAppearance`] on an interval. Listeners fire on
//! the watcher thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::appearance::SystemAppearance;

/// Watcher settings
#[derive(Clone, Debug)]
pub struct WatcherConfig {
    /// Delay between OS probes
    pub poll_interval: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
        }
    }
}

#[derive(Default)]
struct StopSignal {
    stopped: Mutex<bool>,
    cvar: Condvar,
}

/// Polls the OS appearance until dropped
pub struct SystemSchemeWatcher {
    signal: Arc<StopSignal>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SystemSchemeWatcher {
    /// Start polling `source` on a background thread
    pub fn spawn(source: Arc<SystemAppearance>, config: WatcherConfig) -> std::io::Result<Self> {
        let signal = Arc::new(StopSignal::default());
        let running = Arc::new(AtomicBool::new(true));

        let thread_signal = Arc::clone(&signal);
        let thread_running = Arc::clone(&running);
        let handle = std::thread::Builder::new()
            .name("pulse-scheme-watcher".into())
            .spawn(move || {
                tracing::debug!(
                    "scheme watcher started (interval {:?})",
                    config.poll_interval
                );
                loop {
                    let stopped = thread_signal
                        .stopped
                        .lock()
                        .unwrap_or_else(|e| e.into_inner());
                    let (stopped, _) = thread_signal
                        .cvar
                        .wait_timeout_while(stopped, config.poll_interval, |s| !*s)
                        .unwrap_or_else(|e| e.into_inner());
                    if *stopped {
                        break;
                    }
                    drop(stopped);
                    source.poll();
                }
                thread_running.store(false, Ordering::SeqCst);
                tracing::debug!("scheme watcher stopped");
            })?;

        Ok(Self {
            signal,
            running,
            handle: Some(handle),
        })
    }

    /// Whether the polling thread is still alive
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop polling and wait for the thread to exit
    pub fn stop(&mut self) {
        *self.signal.stopped.lock().unwrap_or_else(|e| e.into_inner()) = true;
        self.signal.cvar.notify_all();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SystemSchemeWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}
