//! Routing metrics: counters for validations, navigations and language
//! switches.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct RoutingMetrics {
    /// Incoming URLs that were already canonical
    validations_ok: AtomicUsize,

    /// Incoming URLs redirected to their canonical form
    validations_corrected: AtomicUsize,

    /// Incoming URLs redirected to the landing section
    validations_fallback: AtomicUsize,

    /// Navigations that changed the path
    navigations_full: AtomicUsize,

    /// Navigations that only changed the fragment
    navigations_fragment_only: AtomicUsize,

    /// Requests whose target was already displayed
    navigations_skipped: AtomicUsize,

    /// Navigation calls that were rejected
    navigation_failures: AtomicUsize,

    /// Language switches that completed
    language_switches: AtomicUsize,

    /// Language switches abandoned before the language changed
    language_switches_aborted: AtomicUsize,

    /// Catalog keys missing from loaded translation tables
    missing_translation_keys: AtomicUsize,
}

impl RoutingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_validation_ok(&self) {
        self.validations_ok.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation_corrected(&self) {
        self.validations_corrected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation_fallback(&self) {
        self.validations_fallback.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_full_navigation(&self) {
        self.navigations_full.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fragment_navigation(&self) {
        self.navigations_fragment_only.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skipped_navigation(&self) {
        self.navigations_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_navigation_failure(&self) {
        self.navigation_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_language_switch(&self) {
        self.language_switches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_aborted_switch(&self) {
        self.language_switches_aborted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_missing_keys(&self, count: usize) {
        self.missing_translation_keys
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn report(&self) -> MetricsReport {
        let ok = self.validations_ok.load(Ordering::Relaxed);
        let corrected = self.validations_corrected.load(Ordering::Relaxed);
        let fallback = self.validations_fallback.load(Ordering::Relaxed);
        let total_validations = ok + corrected + fallback;
        let redirect_rate = if total_validations > 0 {
            ((corrected + fallback) as f64 / total_validations as f64) * 100.0
        } else {
            0.0
        };

        let full = self.navigations_full.load(Ordering::Relaxed);
        let fragment_only = self.navigations_fragment_only.load(Ordering::Relaxed);
        let failures = self.navigation_failures.load(Ordering::Relaxed);
        let attempted = full + fragment_only + failures;
        let navigation_success_rate = if attempted > 0 {
            ((attempted - failures) as f64 / attempted as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            validations_ok: ok,
            validations_corrected: corrected,
            validations_fallback: fallback,
            redirect_rate,
            navigations_full: full,
            navigations_fragment_only: fragment_only,
            navigations_skipped: self.navigations_skipped.load(Ordering::Relaxed),
            navigation_failures: failures,
            navigation_success_rate,
            language_switches: self.language_switches.load(Ordering::Relaxed),
            language_switches_aborted: self.language_switches_aborted.load(Ordering::Relaxed),
            missing_translation_keys: self.missing_translation_keys.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of the routing counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub validations_ok: usize,
    pub validations_corrected: usize,
    pub validations_fallback: usize,

    /// Share of validated URLs that needed a redirect, as a percentage (0-100)
    pub redirect_rate: f64,

    pub navigations_full: usize,
    pub navigations_fragment_only: usize,
    pub navigations_skipped: usize,
    pub navigation_failures: usize,

    /// Share of attempted navigations that succeeded, as a percentage (0-100)
    pub navigation_success_rate: f64,

    pub language_switches: usize,
    pub language_switches_aborted: usize,
    pub missing_translation_keys: usize,
}
