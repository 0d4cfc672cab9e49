//! End-of-run narrator
//!
//! Turns a finished run's stats into one short cozy line for the game-over
//! overlay. Two interchangeable strategies implement the same capability: a
//! curated message table and a remote generative service. Session code only
//! sees the [`FlavorText`] trait; lines arrive through a one-shot callback
//! that may fire immediately (static pool) or after a network round-trip
//! (remote narrator).

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::Theme;

/// What the narrator gets to work with
#[derive(Debug, Clone, Copy)]
pub struct RunStats {
    pub score: u64,
    pub treats: u32,
    pub theme: Theme,
}

/// One-shot delivery for a narrator line
pub type Deliver = Box<dyn FnOnce(String) + 'static>;

/// The narrator capability
pub trait FlavorText {
    /// Produce a line for the finished run. `deliver` may run before this
    /// returns or later; callers must not rely on either.
    fn narrate(&mut self, stats: RunStats, deliver: Deliver);
}

/// Pick the configured strategy: the remote narrator when a credential was
/// baked in at build time, otherwise the static table.
pub fn default_provider(seed: u64) -> Box<dyn FlavorText> {
    if RemoteNarrator::configured() {
        Box::new(RemoteNarrator::from_env())
    } else {
        Box::new(StaticPool::new(seed))
    }
}

// ---------------------------------------------------------------------------
// Strategy (a): curated table
// ---------------------------------------------------------------------------

/// Lines every run qualifies for
const DEFAULT_POOL: &[&str] = &[
    "Cookie is tired but happy. Good run!",
    "Cookie wagged the whole way home.",
    "So many smells, so little time. Cookie had a day!",
    "Cookie flopped over for a well-earned belly rub.",
];

/// Included once the score strictly exceeds this
pub const HIGH_SCORE_THRESHOLD: u64 = 1000;
const HIGH_SCORE_POOL: &[&str] = &[
    "What a zoomie legend! Cookie ran farther than ever.",
    "Cookie's little legs carried her an astonishing distance today!",
];

/// Included once the treat count strictly exceeds this
pub const HIGH_TREATS_THRESHOLD: u32 = 8;
const HIGH_TREATS_POOL: &[&str] = &[
    "Cookie's cheeks are absolutely stuffed with treats!",
    "A true gourmet: Cookie snagged every snack on the route.",
];

/// All candidate lines for a run: the default pool, plus the high-score and
/// high-treats pools when earned, plus the final theme's own pool.
pub fn candidates(stats: &RunStats) -> Vec<&'static str> {
    let mut pool: Vec<&'static str> = DEFAULT_POOL.to_vec();
    if stats.score > HIGH_SCORE_THRESHOLD {
        pool.extend_from_slice(HIGH_SCORE_POOL);
    }
    if stats.treats > HIGH_TREATS_THRESHOLD {
        pool.extend_from_slice(HIGH_TREATS_POOL);
    }
    pool.extend_from_slice(stats.theme.messages());
    pool
}

/// Uniform draw from the curated pools; always resolves synchronously
pub struct StaticPool {
    rng: Pcg32,
}

impl StaticPool {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl FlavorText for StaticPool {
    fn narrate(&mut self, stats: RunStats, deliver: Deliver) {
        let pool = candidates(&stats);
        let line = pool[self.rng.random_range(0..pool.len())];
        deliver(line.to_string());
    }
}

// ---------------------------------------------------------------------------
// Strategy (b): remote generative service
// ---------------------------------------------------------------------------

const NARRATOR_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

/// Shown when no credential was configured; no network attempt is made
const NO_KEY_MESSAGE: &str = "Great run, Cookie! (Set NARRATOR_API_KEY for custom stories.)";
/// Shown when the service call or its response goes wrong
const FAILURE_MESSAGE: &str = "Cookie is resting by the fireplace.";

/// Asks a generative text service to narrate the run.
///
/// Failures never reach the session: every path resolves to some string.
pub struct RemoteNarrator {
    api_key: Option<String>,
}

impl RemoteNarrator {
    /// Credential baked in at build time via `NARRATOR_API_KEY`
    pub fn from_env() -> Self {
        Self {
            api_key: option_env!("NARRATOR_API_KEY").map(str::to_owned),
        }
    }

    pub fn configured() -> bool {
        option_env!("NARRATOR_API_KEY").is_some()
    }

    #[cfg(test)]
    fn with_key(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    fn prompt(stats: &RunStats) -> String {
        format!(
            "You are the narrator for a cozy video game about a Cavalier King \
             Charles Spaniel named Cookie. The dog just finished a run with a \
             distance score of {}, {} treats collected, and was last seen at \
             the {}. Write one very short, cute, encouraging sentence about \
             what Cookie did. Tone: whimsical, supportive, adorable.",
            stats.score,
            stats.treats,
            stats.theme.label()
        )
    }

    fn request_body(stats: &RunStats) -> String {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Self::prompt(stats),
                }],
            }],
        };
        serde_json::to_string(&request).unwrap_or_default()
    }
}

impl FlavorText for RemoteNarrator {
    fn narrate(&mut self, stats: RunStats, deliver: Deliver) {
        let Some(key) = self.api_key.clone() else {
            log::warn!("no narrator credential configured, using canned line");
            deliver(NO_KEY_MESSAGE.to_string());
            return;
        };
        request_remote(key, Self::request_body(&stats), deliver);
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

/// Pull the first text block out of a service response
fn extract_text(body: &str) -> Option<String> {
    let response: GenerateResponse = serde_json::from_str(body).ok()?;
    response
        .candidates?
        .into_iter()
        .next()?
        .content
        .parts
        .into_iter()
        .next()
        .map(|part| part.text)
}

/// Fire the request through the browser's fetch and deliver whenever it
/// resolves. The session has already moved on; delivery order relative to
/// anything else is not guaranteed.
#[cfg(target_arch = "wasm32")]
fn request_remote(key: String, body: String, deliver: Deliver) {
    wasm_bindgen_futures::spawn_local(async move {
        let line = match fetch_line(&key, &body).await {
            Ok(text) => text,
            Err(err) => {
                log::warn!("narrator request failed: {:?}", err);
                FAILURE_MESSAGE.to_string()
            }
        };
        deliver(line);
    });
}

#[cfg(target_arch = "wasm32")]
async fn fetch_line(key: &str, body: &str) -> Result<String, wasm_bindgen::JsValue> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(NARRATOR_ENDPOINT, &opts)?;
    request.headers().set("Content-Type", "application/json")?;
    request.headers().set("x-goog-api-key", key)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
    }

    let text = JsFuture::from(response.text()?).await?;
    let body = text.as_string().unwrap_or_default();
    extract_text(&body).ok_or_else(|| JsValue::from_str("malformed narrator response"))
}

/// Native path: blocking request, same degradation rules
#[cfg(not(target_arch = "wasm32"))]
fn request_remote(key: String, body: String, deliver: Deliver) {
    let line = match ureq::post(NARRATOR_ENDPOINT)
        .set("Content-Type", "application/json")
        .set("x-goog-api-key", &key)
        .send_string(&body)
    {
        Ok(response) => response
            .into_string()
            .ok()
            .and_then(|text| extract_text(&text))
            .unwrap_or_else(|| FAILURE_MESSAGE.to_string()),
        Err(err) => {
            log::warn!("narrator request failed: {}", err);
            FAILURE_MESSAGE.to_string()
        }
    };
    deliver(line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn stats(score: u64, treats: u32, theme: Theme) -> RunStats {
        RunStats {
            score,
            treats,
            theme,
        }
    }

    #[test]
    fn test_big_run_draws_from_all_four_pools() {
        // 1200 points and 9 treats clear both thresholds
        let pool = candidates(&stats(1200, 9, Theme::Lakeside));

        assert_eq!(
            pool.len(),
            DEFAULT_POOL.len()
                + HIGH_SCORE_POOL.len()
                + HIGH_TREATS_POOL.len()
                + Theme::Lakeside.messages().len()
        );
        assert!(pool.contains(&DEFAULT_POOL[0]));
        assert!(pool.contains(&HIGH_SCORE_POOL[0]));
        assert!(pool.contains(&HIGH_TREATS_POOL[0]));
        assert!(pool.contains(&Theme::Lakeside.messages()[0]));
    }

    #[test]
    fn test_modest_run_gets_default_and_theme_only() {
        let pool = candidates(&stats(200, 2, Theme::Neighborhood));
        assert_eq!(
            pool.len(),
            DEFAULT_POOL.len() + Theme::Neighborhood.messages().len()
        );
        assert!(!pool.contains(&HIGH_SCORE_POOL[0]));
        assert!(!pool.contains(&HIGH_TREATS_POOL[0]));
    }

    #[test]
    fn test_thresholds_are_strict() {
        let pool = candidates(&stats(HIGH_SCORE_THRESHOLD, HIGH_TREATS_THRESHOLD, Theme::DogPark));
        assert!(!pool.contains(&HIGH_SCORE_POOL[0]));
        assert!(!pool.contains(&HIGH_TREATS_POOL[0]));
    }

    #[test]
    fn test_static_pool_delivers_a_candidate() {
        let mut provider = StaticPool::new(1234);
        let run = stats(700, 3, Theme::DogPark);
        let pool = candidates(&run);

        for _ in 0..50 {
            let delivered = Rc::new(RefCell::new(None));
            let slot = delivered.clone();
            provider.narrate(run, Box::new(move |line| *slot.borrow_mut() = Some(line)));

            let line = delivered.borrow_mut().take().expect("delivery is synchronous");
            assert!(pool.contains(&line.as_str()));
        }
    }

    #[test]
    fn test_remote_without_credential_short_circuits() {
        let mut provider = RemoteNarrator::with_key(None);
        let delivered = Rc::new(RefCell::new(None));
        let slot = delivered.clone();

        provider.narrate(
            stats(100, 1, Theme::Neighborhood),
            Box::new(move |line| *slot.borrow_mut() = Some(line)),
        );

        assert_eq!(delivered.borrow_mut().take().as_deref(), Some(NO_KEY_MESSAGE));
    }

    #[test]
    fn test_extract_text_happy_path() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Cookie zoomed!"}],"role":"model"}}]}"#;
        assert_eq!(extract_text(body).as_deref(), Some("Cookie zoomed!"));
    }

    #[test]
    fn test_extract_text_rejects_malformed_bodies() {
        assert_eq!(extract_text("not json"), None);
        assert_eq!(extract_text("{}"), None);
        assert_eq!(extract_text(r#"{"candidates":[]}"#), None);
    }

    #[test]
    fn test_prompt_embeds_all_three_inputs() {
        let prompt = RemoteNarrator::prompt(&stats(420, 7, Theme::Lakeside));
        assert!(prompt.contains("420"));
        assert!(prompt.contains('7'));
        assert!(prompt.contains("Lakeside"));
    }
}
