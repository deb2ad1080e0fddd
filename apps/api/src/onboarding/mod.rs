//! First-visit onboarding: a welcome flag read once at mount, written once on dismiss.

pub mod handlers;
pub mod store;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

pub use store::{FilePreferenceStore, InMemoryPreferenceStore, PreferenceError, PreferenceStore};

pub const HAS_SEEN_WELCOME_KEY: &str = "dreamSimulator_hasSeenWelcome";

#[derive(Debug, Clone, Copy, Serialize)]
pub struct OnboardingStep {
    pub title: &'static str,
    pub highlights: &'static [&'static str],
}

pub const ONBOARDING_STEPS: [OnboardingStep; 4] = [
    OnboardingStep {
        title: "Welcome to the Dream Scenario Simulator!",
        highlights: &[
            "Turn your wildest \"what if\" scenarios into realistic simulations powered by AI.",
            "This tool helps you explore potential life changes and see how they might realistically unfold.",
        ],
    },
    OnboardingStep {
        title: "Step 1: Describe Your Scenario",
        highlights: &[
            "Choose a category: select the area of life your scenario relates to.",
            "Describe your dream: tell us what you're wondering about.",
        ],
    },
    OnboardingStep {
        title: "Step 2: Review Your Results",
        highlights: &[
            "Feasibility Score: see how likely your scenario is to succeed.",
            "Advantages & Challenges: understand the pros and cons.",
        ],
    },
    OnboardingStep {
        title: "Step 3: Explore Your Timeline",
        highlights: &["See how your scenario might unfold over time with a detailed timeline."],
    },
];

/// Owns the welcome flag for the lifetime of the service.
pub struct OnboardingGate {
    store: Arc<dyn PreferenceStore>,
    show_welcome: AtomicBool,
}

impl OnboardingGate {
    /// Reads the flag exactly once. Any stored value counts as "seen".
    pub fn mount(store: Arc<dyn PreferenceStore>) -> Result<Self, PreferenceError> {
        let seen = store.get(HAS_SEEN_WELCOME_KEY)?.is_some();
        debug!(seen, "Onboarding flag loaded");
        Ok(Self {
            store,
            show_welcome: AtomicBool::new(!seen),
        })
    }

    pub fn should_show_welcome(&self) -> bool {
        self.show_welcome.load(Ordering::SeqCst)
    }

    pub fn steps(&self) -> &'static [OnboardingStep] {
        &ONBOARDING_STEPS
    }

    /// Hides the welcome and persists the flag. Returns `true` if this call wrote
    /// the flag; repeat dismissals are no-ops.
    pub fn dismiss(&self) -> Result<bool, PreferenceError> {
        if self
            .show_welcome
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(false);
        }

        if let Err(e) = self.store.set(HAS_SEEN_WELCOME_KEY, "true") {
            self.show_welcome.store(true, Ordering::SeqCst);
            return Err(e);
        }
        info!("Onboarding dismissed");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    /// Counts reads and writes; optionally fails writes.
    #[derive(Default)]
    struct CountingStore {
        inner: InMemoryPreferenceStore,
        gets: AtomicUsize,
        sets: AtomicUsize,
        fail_writes: AtomicBool,
    }

    impl PreferenceStore for CountingStore {
        fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
            self.sets.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(PreferenceError::Poisoned);
            }
            self.inner.set(key, value)
        }
    }

    #[test]
    fn test_fresh_store_shows_welcome() {
        let gate = OnboardingGate::mount(Arc::new(InMemoryPreferenceStore::new())).unwrap();
        assert!(gate.should_show_welcome());
        assert_eq!(gate.steps().len(), 4);
    }

    #[test]
    fn test_seen_flag_hides_welcome() {
        let store = Arc::new(InMemoryPreferenceStore::new());
        store.set(HAS_SEEN_WELCOME_KEY, "true").unwrap();
        let gate = OnboardingGate::mount(store).unwrap();
        assert!(!gate.should_show_welcome());
    }

    #[test]
    fn test_reads_once_and_writes_once() {
        let store = Arc::new(CountingStore::default());
        let gate = OnboardingGate::mount(store.clone()).unwrap();

        gate.should_show_welcome();
        gate.should_show_welcome();
        assert!(gate.dismiss().unwrap());
        assert!(!gate.dismiss().unwrap());
        assert!(!gate.should_show_welcome());

        assert_eq!(store.gets.load(Ordering::SeqCst), 1);
        assert_eq!(store.sets.load(Ordering::SeqCst), 1);
        assert_eq!(
            store.inner.get(HAS_SEEN_WELCOME_KEY).unwrap().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_failed_write_keeps_welcome_visible() {
        let store = Arc::new(CountingStore::default());
        store.fail_writes.store(true, Ordering::SeqCst);
        let gate = OnboardingGate::mount(store.clone()).unwrap();

        assert!(gate.dismiss().is_err());
        assert!(gate.should_show_welcome());

        store.fail_writes.store(false, Ordering::SeqCst);
        assert!(gate.dismiss().unwrap());
        assert_eq!(store.sets.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_step_titles_in_order() {
        let titles: Vec<&str> = ONBOARDING_STEPS.iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec![
                "Welcome to the Dream Scenario Simulator!",
                "Step 1: Describe Your Scenario",
                "Step 2: Review Your Results",
                "Step 3: Explore Your Timeline",
            ]
        );
    }
}
