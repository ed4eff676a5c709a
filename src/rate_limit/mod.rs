//! Per-client request admission
//!
//! Fixed-window counters keyed by client identity. A client's window opens on
//! its first request and lasts one rate period; the check and the increment
//! happen under one lock so two concurrent requests can never both take the
//! last slot. Counters idle for `idle_windows` periods are swept, both
//! opportunistically during admission and by [`RateLimiter::spawn_sweeper`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::types::{McpError, McpResult};

/// Admissions between two inline sweeps
const SWEEP_EVERY: u64 = 1024;

/// Length of a rate period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateWindow {
    Second,
    Minute,
    Hour,
}

impl RateWindow {
    pub fn duration(&self) -> Duration {
        match self {
            RateWindow::Second => Duration::from_secs(1),
            RateWindow::Minute => Duration::from_secs(60),
            RateWindow::Hour => Duration::from_secs(3600),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RateWindow::Second => "second",
            RateWindow::Minute => "minute",
            RateWindow::Hour => "hour",
        }
    }
}

/// `N` requests per window, written `N/minute` or `N per minute`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub max_requests: u32,
    pub window: RateWindow,
}

impl RateLimit {
    pub fn new(max_requests: u32, window: RateWindow) -> Self {
        Self {
            max_requests,
            window,
        }
    }
}

impl Default for RateLimit {
    fn default() -> Self {
        Self::new(100, RateWindow::Minute)
    }
}

impl FromStr for RateLimit {
    type Err = McpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            McpError::invalid_input(format!(
                "Invalid rate limit '{}'. Expected e.g. 100/minute or 10 per second",
                s
            ))
        };

        let lowered = s.trim().to_lowercase();
        let (count, unit) = match lowered.split_once('/') {
            Some(parts) => parts,
            None => lowered.split_once(" per ").ok_or_else(invalid)?,
        };

        let max_requests: u32 = count.trim().parse().map_err(|_| invalid())?;
        if max_requests == 0 {
            return Err(invalid());
        }

        let window = match unit.trim() {
            "s" | "sec" | "second" | "seconds" => RateWindow::Second,
            "m" | "min" | "minute" | "minutes" => RateWindow::Minute,
            "h" | "hr" | "hour" | "hours" => RateWindow::Hour,
            _ => return Err(invalid()),
        };

        Ok(Self::new(max_requests, window))
    }
}

impl fmt::Display for RateLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.max_requests, self.window.as_str())
    }
}

/// Outcome of an admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allow { remaining: u32 },
    Deny { retry_after: Duration },
}

#[derive(Debug, Clone, Copy)]
struct WindowCounter {
    window_start: Instant,
    count: u32,
}

#[derive(Default)]
struct LimiterState {
    clients: HashMap<String, WindowCounter>,
    admits_since_sweep: u64,
}

pub struct RateLimiter {
    limit: RateLimit,
    idle_windows: u32,
    state: Mutex<LimiterState>,
}

impl RateLimiter {
    pub fn new(limit: RateLimit) -> Self {
        Self::with_idle_windows(limit, 2)
    }

    /// `idle_windows` is how many full periods a client may stay silent
    /// before its counter is dropped (minimum 1)
    pub fn with_idle_windows(limit: RateLimit, idle_windows: u32) -> Self {
        Self {
            limit,
            idle_windows: idle_windows.max(1),
            state: Mutex::new(LimiterState::default()),
        }
    }

    pub fn limit(&self) -> RateLimit {
        self.limit
    }

    pub fn admit(&self, identity: &str) -> Admission {
        self.admit_at(identity, Instant::now())
    }

    /// Admission decision for a request arriving at `now`
    pub fn admit_at(&self, identity: &str, now: Instant) -> Admission {
        let window = self.limit.window.duration();
        let mut state = self.state.lock();

        state.admits_since_sweep += 1;
        if state.admits_since_sweep >= SWEEP_EVERY {
            state.admits_since_sweep = 0;
            self.sweep_locked(&mut state, now);
        }

        let counter = state
            .clients
            .entry(identity.to_string())
            .or_insert(WindowCounter {
                window_start: now,
                count: 0,
            });

        let elapsed = now.saturating_duration_since(counter.window_start);
        if elapsed >= window {
            counter.window_start = now;
            counter.count = 0;
        }

        if counter.count < self.limit.max_requests {
            counter.count += 1;
            Admission::Allow {
                remaining: self.limit.max_requests - counter.count,
            }
        } else {
            let elapsed = now.saturating_duration_since(counter.window_start);
            Admission::Deny {
                retry_after: window.saturating_sub(elapsed),
            }
        }
    }

    /// Like [`admit`](Self::admit) but reports a denial as `RateLimited`
    pub fn check(&self, identity: &str) -> McpResult<()> {
        match self.admit(identity) {
            Admission::Allow { .. } => Ok(()),
            Admission::Deny { retry_after } => {
                debug!(identity, "Rate limit exceeded");
                Err(McpError::RateLimited {
                    limit: self.limit.to_string(),
                    retry_after_secs: retry_after.as_secs_f64().ceil() as u64,
                })
            }
        }
    }

    /// Drop counters idle for `idle_windows` periods; returns how many went
    pub fn sweep_at(&self, now: Instant) -> usize {
        let mut state = self.state.lock();
        self.sweep_locked(&mut state, now)
    }

    fn sweep_locked(&self, state: &mut LimiterState, now: Instant) -> usize {
        let horizon = self.limit.window.duration() * self.idle_windows;
        let before = state.clients.len();
        state
            .clients
            .retain(|_, c| now.saturating_duration_since(c.window_start) < horizon);
        let removed = before - state.clients.len();
        if removed > 0 {
            debug!(removed, "Swept idle rate limit counters");
        }
        removed
    }

    /// Number of identities currently tracked
    pub fn tracked_clients(&self) -> usize {
        self.state.lock().clients.len()
    }

    /// Sweep once per window on the tokio runtime until the handle is aborted
    pub fn spawn_sweeper(self: Arc<Self>) -> JoinHandle<()> {
        let period = self.limit.window.duration();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                self.sweep_at(Instant::now());
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rate_limits() {
        assert_eq!(
            "100/minute".parse::<RateLimit>().unwrap(),
            RateLimit::new(100, RateWindow::Minute)
        );
        assert_eq!(
            "10 per second".parse::<RateLimit>().unwrap(),
            RateLimit::new(10, RateWindow::Second)
        );
        assert_eq!(
            "5/Hour".parse::<RateLimit>().unwrap(),
            RateLimit::new(5, RateWindow::Hour)
        );
        assert!("0/minute".parse::<RateLimit>().is_err());
        assert!("ten/minute".parse::<RateLimit>().is_err());
        assert!("10/fortnight".parse::<RateLimit>().is_err());
        assert!("10".parse::<RateLimit>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(RateLimit::new(3, RateWindow::Minute).to_string(), "3/minute");
    }

    #[test]
    fn test_fourth_request_denied_other_identity_admitted() {
        let limiter = RateLimiter::new(RateLimit::new(3, RateWindow::Minute));
        let now = Instant::now();

        for expected_remaining in [2, 1, 0] {
            assert_eq!(
                limiter.admit_at("10.0.0.1", now),
                Admission::Allow {
                    remaining: expected_remaining
                }
            );
        }
        assert!(matches!(
            limiter.admit_at("10.0.0.1", now + Duration::from_secs(1)),
            Admission::Deny { .. }
        ));
        assert!(matches!(
            limiter.admit_at("10.0.0.2", now + Duration::from_secs(1)),
            Admission::Allow { .. }
        ));
    }

    #[test]
    fn test_no_refill_inside_window() {
        let limiter = RateLimiter::new(RateLimit::new(3, RateWindow::Minute));
        let now = Instant::now();

        for _ in 0..3 {
            assert!(matches!(limiter.admit_at("x", now), Admission::Allow { .. }));
        }
        for secs in [20, 40, 59] {
            assert!(matches!(
                limiter.admit_at("x", now + Duration::from_secs(secs)),
                Admission::Deny { .. }
            ));
        }
        assert!(matches!(
            limiter.admit_at("x", now + Duration::from_secs(60)),
            Admission::Allow { .. }
        ));
    }

    #[test]
    fn test_window_resets() {
        let limiter = RateLimiter::new(RateLimit::new(1, RateWindow::Second));
        let now = Instant::now();

        assert!(matches!(limiter.admit_at("x", now), Admission::Allow { .. }));
        match limiter.admit_at("x", now + Duration::from_millis(400)) {
            Admission::Deny { retry_after } => {
                assert_eq!(retry_after, Duration::from_millis(600))
            }
            other => panic!("expected deny, got {:?}", other),
        }
        assert!(matches!(
            limiter.admit_at("x", now + Duration::from_secs(1)),
            Admission::Allow { .. }
        ));
    }

    #[test]
    fn test_check_reports_configured_limit() {
        let limiter = RateLimiter::new(RateLimit::new(1, RateWindow::Hour));
        limiter.check("client").unwrap();

        match limiter.check("client") {
            Err(McpError::RateLimited {
                limit,
                retry_after_secs,
            }) => {
                assert_eq!(limit, "1/hour");
                assert!(retry_after_secs > 0 && retry_after_secs <= 3600);
            }
            other => panic!("expected RateLimited, got {:?}", other),
        }
    }

    #[test]
    fn test_sweep_evicts_idle_clients() {
        let limiter = RateLimiter::with_idle_windows(RateLimit::new(5, RateWindow::Second), 2);
        let now = Instant::now();

        limiter.admit_at("old", now);
        limiter.admit_at("fresh", now + Duration::from_millis(1900));
        assert_eq!(limiter.tracked_clients(), 2);

        let removed = limiter.sweep_at(now + Duration::from_millis(2100));
        assert_eq!(removed, 1);
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn test_concurrent_admission_never_exceeds_limit() {
        let limiter = Arc::new(RateLimiter::new(RateLimit::new(50, RateWindow::Hour)));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = limiter.clone();
                std::thread::spawn(move || {
                    (0..20)
                        .filter(|_| matches!(limiter.admit("shared"), Admission::Allow { .. }))
                        .count()
                })
            })
            .collect();

        let admitted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(admitted, 50);
    }
}
