#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! Diagnostic recording for the scan driver
//!
//! [`DiagnosticLog`] keeps the most recent diagnostics in a fixed ring and
//! counts every diagnostic by kind. It implements
//! [`DiagnosticHook`](adc_scan_hal::DiagnosticHook) so it can be handed
//! straight to a driver. [`SharedDiagnosticLog`] wraps a log in a critical
//! section mutex so it can live in a `static` and be drained from thread
//! context while the conversion interrupt records into it.
//!
//! ```rust,ignore
//! use adc_scan_trace::SharedDiagnosticLog;
//!
//! static DIAG: SharedDiagnosticLog<16> = SharedDiagnosticLog::new();
//!
//! let driver = ScanDriver::with_hook(board_adc, DIAG.hook(), ScanConfig::default());
//! // ...
//! DIAG.drain_into(|d| report(d.code()));
//! ```

use core::cell::RefCell;
use critical_section::Mutex;
use heapless::Deque;
use adc_scan_core::Diagnostic;
use adc_scan_hal::DiagnosticHook;

/// Per-kind diagnostic counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticCounters {
    pub malformed: u32,
    pub mismatch: u32,
    pub aborted: u32,
}

impl DiagnosticCounters {
    /// Create zeroed counters
    pub const fn new() -> Self {
        Self {
            malformed: 0,
            mismatch: 0,
            aborted: 0,
        }
    }

    /// Count one diagnostic
    pub fn on_diagnostic(&mut self, diagnostic: &Diagnostic) {
        let counter = match diagnostic {
            Diagnostic::Malformed => &mut self.malformed,
            Diagnostic::Mismatch { .. } => &mut self.mismatch,
            Diagnostic::Aborted { .. } => &mut self.aborted,
        };
        *counter = counter.saturating_add(1);
    }

    /// Total diagnostics counted
    pub fn total(&self) -> u32 {
        self.malformed
            .saturating_add(self.mismatch)
            .saturating_add(self.aborted)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DiagnosticCounters {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "malformed={} mismatch={} aborted={}",
            self.malformed,
            self.mismatch,
            self.aborted
        );
    }
}

/// Ring of the most recent `N` diagnostics plus running counters
#[derive(Debug)]
pub struct DiagnosticLog<const N: usize> {
    recent: Deque<Diagnostic, N>,
    counters: DiagnosticCounters,
    dropped: u32,
}

impl<const N: usize> DiagnosticLog<N> {
    /// Create an empty log
    pub const fn new() -> Self {
        Self {
            recent: Deque::new(),
            counters: DiagnosticCounters::new(),
            dropped: 0,
        }
    }

    /// Record a diagnostic, evicting the oldest when full
    pub fn record(&mut self, diagnostic: Diagnostic) {
        self.counters.on_diagnostic(&diagnostic);

        if self.recent.is_full() {
            self.recent.pop_front();
            self.dropped = self.dropped.saturating_add(1);
        }
        // Room was made above
        let _ = self.recent.push_back(diagnostic);
    }

    /// Counters since creation or the last [`clear`](Self::clear)
    pub fn counters(&self) -> DiagnosticCounters {
        self.counters
    }

    /// Diagnostics evicted before being drained
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Number of retained diagnostics
    pub fn len(&self) -> usize {
        self.recent.len()
    }

    /// Check if no diagnostics are retained
    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    /// Most recent diagnostic
    pub fn last(&self) -> Option<&Diagnostic> {
        self.recent.back()
    }

    /// Retained diagnostics, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.recent.iter()
    }

    /// Remove and return the oldest retained diagnostic
    pub fn pop(&mut self) -> Option<Diagnostic> {
        self.recent.pop_front()
    }

    /// Forget retained diagnostics and reset counters
    pub fn clear(&mut self) {
        self.recent.clear();
        self.counters = DiagnosticCounters::new();
        self.dropped = 0;
    }
}

impl<const N: usize> Default for DiagnosticLog<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> DiagnosticHook for DiagnosticLog<N> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.record(diagnostic);
    }
}

/// [`DiagnosticLog`] that can live in a `static`
pub struct SharedDiagnosticLog<const N: usize> {
    inner: Mutex<RefCell<DiagnosticLog<N>>>,
}

impl<const N: usize> SharedDiagnosticLog<N> {
    /// Create an empty log
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(DiagnosticLog::new())),
        }
    }

    /// Record a diagnostic
    pub fn record(&self, diagnostic: Diagnostic) {
        critical_section::with(|cs| {
            self.inner.borrow_ref_mut(cs).record(diagnostic);
        });
    }

    /// Snapshot of the counters
    pub fn counters(&self) -> DiagnosticCounters {
        critical_section::with(|cs| self.inner.borrow_ref(cs).counters())
    }

    /// Snapshot of the number of evicted diagnostics
    pub fn dropped(&self) -> u32 {
        critical_section::with(|cs| self.inner.borrow_ref(cs).dropped())
    }

    /// Hand every retained diagnostic to `f`, oldest first, and remove it.
    ///
    /// Each diagnostic is taken in its own critical section so `f` runs with
    /// interrupts enabled. Returns the number drained.
    pub fn drain_into(&self, mut f: impl FnMut(Diagnostic)) -> usize {
        let mut drained = 0;
        while let Some(diagnostic) = critical_section::with(|cs| self.inner.borrow_ref_mut(cs).pop()) {
            f(diagnostic);
            drained += 1;
        }
        drained
    }

    /// Forget retained diagnostics and reset counters
    pub fn clear(&self) {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).clear());
    }

    /// Hook recording into this log
    pub fn hook(&self) -> LogHook<'_, N> {
        LogHook { log: self }
    }
}

impl<const N: usize> Default for SharedDiagnosticLog<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// [`DiagnosticHook`] handle onto a [`SharedDiagnosticLog`]
#[derive(Clone, Copy)]
pub struct LogHook<'a, const N: usize> {
    log: &'a SharedDiagnosticLog<N>,
}

impl<const N: usize> DiagnosticHook for LogHook<'_, N> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.log.record(diagnostic);
    }
}
