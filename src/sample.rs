use std::fs;
use std::path::Path;

use chrono::{Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::json;
use tracing::info;

use crate::error::Result;

const POSITIVE_PHRASES: &[&str] = &[
    "Absolutely love this, works perfectly every time!",
    "Great value and the support team was really helpful",
    "Setup was easy and the interface is intuitive",
    "This is the best purchase I've made all year!!",
    "Very reliable, very fast shipping, very happy",
    "The new update is fantastic, everything feels smooth now",
    "GREAT product, would recommend to anyone",
    "Exceeded my expectations, truly excellent quality",
    "So glad I switched, this is exactly what I needed",
    "Works like a charm and looks beautiful on the desk",
    "Customer service was friendly and sorted it out in minutes",
    "Impressive battery life and a lovely screen",
];

const NEGATIVE_PHRASES: &[&str] = &[
    "Terrible. Would not recommend.",
    "Arrived broken and support never answered my emails",
    "The app crashes every time I open settings",
    "Not good, not even close to what was advertised",
    "Worst experience I've had with any vendor",
    "Completely useless after the latest update!!",
    "I don't like the new layout, it's confusing and slow",
    "Overpriced junk, save your money",
    "The handle broke within a week, very disappointing",
    "Why does it keep logging me out??",
    "HORRIBLE packaging, the box was a damaged mess",
    "Refund process was a nightmare, still waiting",
];

const NEUTRAL_PHRASES: &[&str] = &[
    "It arrived on a Tuesday",
    "The package contains a manual and two cables",
    "I ordered the grey one in medium",
    "Installed it on the second floor",
    "Comes in three colours apparently",
    "Delivery took five days",
    "It is what it is",
    "The firmware version is 2.4.1",
    "My order number is 55823",
    "Replaced the older model we had",
];

/// Generate a synthetic feedback dataset so a fresh checkout can exercise
/// the whole pipeline without real data.
///
/// Roughly one line in twenty-five is deliberately defective (malformed
/// JSON, missing text, or blank text) so the screening paths stay covered.
/// The same seed always produces the same file.
pub fn generate_sample(path: &Path, count: usize, seed: Option<u64>) -> Result<usize> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // Fixed base instant keeps seeded output byte-for-byte reproducible.
    let base = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();

    let mut out = String::new();
    for index in 0..count {
        let id = format!("fb-{:04}", index + 1);
        let timestamp = (base + Duration::minutes(index as i64 * 3)).to_rfc3339();

        let line = if (index + 1) % 25 == 0 {
            match rng.gen_range(0..3) {
                0 => format!("{{\"id\": \"{}\", \"text\": unterminated", id),
                1 => json!({ "id": id, "timestamp": timestamp }).to_string(),
                _ => json!({ "id": id, "timestamp": timestamp, "text": "   " }).to_string(),
            }
        } else {
            json!({
                "id": id,
                "timestamp": timestamp,
                "text": random_feedback(&mut rng),
            })
            .to_string()
        };

        out.push_str(&line);
        out.push('\n');
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, out)?;

    info!(path = %path.display(), lines = count, "generated sample dataset");
    Ok(count)
}

fn random_feedback(rng: &mut StdRng) -> String {
    let pool = match rng.gen_range(0..10) {
        0..=3 => POSITIVE_PHRASES,
        4..=6 => NEGATIVE_PHRASES,
        _ => NEUTRAL_PHRASES,
    };
    pool.choose(rng).copied().unwrap_or_default().to_string()
}
