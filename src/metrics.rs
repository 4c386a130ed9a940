use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::domain::invite_request::InviteRejection;

/// Counts events inside a sliding window. Used for the homepage
/// hits-per-minute gauge.
#[derive(Debug)]
pub struct RateCounter {
    window: Duration,
    hits: Mutex<VecDeque<Instant>>,
}

impl RateCounter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            hits: Mutex::new(VecDeque::new()),
        }
    }

    pub fn incr(&self) {
        let now = Instant::now();
        let mut hits = self.hits.lock().expect("rate counter lock poisoned");
        Self::prune(&mut hits, now, self.window);
        hits.push_back(now);
    }

    pub fn rate(&self) -> i64 {
        let now = Instant::now();
        let mut hits = self.hits.lock().expect("rate counter lock poisoned");
        Self::prune(&mut hits, now, self.window);
        hits.len() as i64
    }

    fn prune(hits: &mut VecDeque<Instant>, now: Instant, window: Duration) {
        while let Some(oldest) = hits.front() {
            if now.duration_since(*oldest) > window {
                hits.pop_front();
            } else {
                break;
            }
        }
    }
}

impl Default for RateCounter {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

/// Service counters, exposed as JSON by `GET /debug/vars`.
///
/// Shared across handlers and the background poller; every field is a plain
/// atomic so recording never blocks a request.
#[derive(Debug, Default)]
pub struct Metrics {
    hits: RateCounter,
    hits_per_minute: AtomicI64,
    requests: AtomicI64,
    invite_errors: AtomicI64,
    missing_first_name: AtomicI64,
    missing_last_name: AtomicI64,
    missing_email: AtomicI64,
    missing_coc: AtomicI64,
    failed_captcha: AtomicI64,
    invalid_captcha: AtomicI64,
    successful_captcha: AtomicI64,
    successful_invites: AtomicI64,
    user_count: AtomicI64,
    active_user_count: AtomicI64,
}

#[derive(Debug, serde::Serialize, PartialEq)]
pub struct MetricsSnapshot {
    pub hits_per_minute: i64,
    pub requests: i64,
    pub invite_errors: i64,
    pub missing_first_name: i64,
    pub missing_last_name: i64,
    pub missing_email: i64,
    pub missing_coc: i64,
    pub failed_captcha: i64,
    pub invalid_captcha: i64,
    pub successful_captcha: i64,
    pub successful_invites: i64,
    pub user_count: i64,
    pub active_user_count: i64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// One homepage render: bumps the request total and refreshes the
    /// per-minute rate gauge.
    pub fn record_homepage_hit(&self) {
        self.hits.incr();
        self.hits_per_minute
            .store(self.hits.rate(), Ordering::Relaxed);
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejection(&self, rejection: &InviteRejection) {
        let counter = match rejection {
            InviteRejection::MissingEmail => &self.missing_email,
            InviteRejection::MissingFirstName => &self.missing_first_name,
            InviteRejection::MissingLastName => &self.missing_last_name,
            InviteRejection::CodeOfConductNotAccepted => &self.missing_coc,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed_captcha(&self) {
        self.failed_captcha.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalid_captcha(&self) {
        self.invalid_captcha.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_successful_captcha(&self) {
        self.successful_captcha.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invite_error(&self) {
        self.invite_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_successful_invite(&self) {
        self.successful_invites.fetch_add(1, Ordering::Relaxed);
    }

    /// Written by the poller after a full pass over the Slack member list.
    pub fn set_user_counts(&self, total: i64, active: i64) {
        self.user_count.store(total, Ordering::Relaxed);
        self.active_user_count.store(active, Ordering::Relaxed);
    }

    pub fn user_counts(&self) -> (i64, i64) {
        (
            self.user_count.load(Ordering::Relaxed),
            self.active_user_count.load(Ordering::Relaxed),
        )
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            hits_per_minute: self.hits_per_minute.load(Ordering::Relaxed),
            requests: self.requests.load(Ordering::Relaxed),
            invite_errors: self.invite_errors.load(Ordering::Relaxed),
            missing_first_name: self.missing_first_name.load(Ordering::Relaxed),
            missing_last_name: self.missing_last_name.load(Ordering::Relaxed),
            missing_email: self.missing_email.load(Ordering::Relaxed),
            missing_coc: self.missing_coc.load(Ordering::Relaxed),
            failed_captcha: self.failed_captcha.load(Ordering::Relaxed),
            invalid_captcha: self.invalid_captcha.load(Ordering::Relaxed),
            successful_captcha: self.successful_captcha.load(Ordering::Relaxed),
            successful_invites: self.successful_invites.load(Ordering::Relaxed),
            user_count: self.user_count.load(Ordering::Relaxed),
            active_user_count: self.active_user_count.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use quickcheck_macros::quickcheck;

    use crate::domain::invite_request::InviteRejection;

    use super::{Metrics, RateCounter};

    #[test]
    fn homepage_hits_move_the_request_total_and_the_rate() {
        let metrics = Metrics::new();

        metrics.record_homepage_hit();
        metrics.record_homepage_hit();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.requests, 2);
        assert_eq!(snapshot.hits_per_minute, 2);
    }

    #[test]
    fn each_rejection_kind_bumps_its_own_counter() {
        let metrics = Metrics::new();

        metrics.record_rejection(&InviteRejection::MissingEmail);
        metrics.record_rejection(&InviteRejection::MissingEmail);
        metrics.record_rejection(&InviteRejection::CodeOfConductNotAccepted);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.missing_email, 2);
        assert_eq!(snapshot.missing_coc, 1);
        assert_eq!(snapshot.missing_first_name, 0);
        assert_eq!(snapshot.missing_last_name, 0);
    }

    #[test]
    fn user_counts_are_gauges_not_counters() {
        let metrics = Metrics::new();

        metrics.set_user_counts(1234, 56);
        metrics.set_user_counts(1200, 40);

        assert_eq!(metrics.user_counts(), (1200, 40));
    }

    #[test]
    fn hits_outside_the_window_stop_counting() {
        let counter = RateCounter::new(Duration::from_millis(20));

        counter.incr();
        counter.incr();
        assert_eq!(counter.rate(), 2);

        std::thread::sleep(Duration::from_millis(40));
        assert_eq!(counter.rate(), 0);
    }

    #[quickcheck]
    fn every_hit_inside_the_window_is_counted(hits: u8) -> bool {
        let counter = RateCounter::new(Duration::from_secs(60));
        for _ in 0..hits {
            counter.incr();
        }
        counter.rate() == i64::from(hits)
    }
}
