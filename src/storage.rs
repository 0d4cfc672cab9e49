//! Durable run counters
//!
//! Two scalars survive across runs: the best score ever achieved and the
//! lifetime count of treats collected. Both live in LocalStorage as plain
//! string-encoded integers; absent or unparsable values read as zero and are
//! never fatal.

/// LocalStorage keys (used only in wasm32)
#[allow(dead_code)]
const HIGH_SCORE_KEY: &str = "cookie_dash_high_score";
#[allow(dead_code)]
const LIFETIME_TREATS_KEY: &str = "cookie_dash_lifetime_treats";

/// The persisted counters, read once at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub high_score: u64,
    pub lifetime_treats: u64,
}

impl Counters {
    /// Fold a finished run into the counters.
    ///
    /// The high score moves only on strict improvement; lifetime treats
    /// always accumulate. Returns whether the high score improved.
    pub fn record_run(&mut self, score: u64, treats: u32) -> bool {
        let improved = score > self.high_score;
        if improved {
            self.high_score = score;
        }
        self.lifetime_treats += u64::from(treats);
        improved
    }

    /// Load counters from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::warn!("LocalStorage unavailable, counters start at zero");
            return Self::default();
        };

        let counters = Self {
            high_score: read_counter(&storage, HIGH_SCORE_KEY),
            lifetime_treats: read_counter(&storage, LIFETIME_TREATS_KEY),
        };
        log::info!(
            "Loaded counters: high score {}, lifetime treats {}",
            counters.high_score,
            counters.lifetime_treats
        );
        counters
    }

    /// Save counters to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(HIGH_SCORE_KEY, &self.high_score.to_string());
            let _ = storage.set_item(LIFETIME_TREATS_KEY, &self.lifetime_treats.to_string());
            log::info!("Counters saved");
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

/// Read one string-encoded integer; anything malformed counts as zero
#[cfg(target_arch = "wasm32")]
fn read_counter(storage: &web_sys::Storage, key: &str) -> u64 {
    storage
        .get_item(key)
        .ok()
        .flatten()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(0)
}
