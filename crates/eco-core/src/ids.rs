//! Document id generation.

use uuid::Uuid;

/// Generate a document id for a point captured at `timestamp`.
///
/// Format is `"<timestamp>-<random-nonce>"`. There is no global sequence;
/// uniqueness is probabilistic, which is acceptable because the collision
/// window is a single float timestamp combined with a 128-bit nonce.
pub fn generate_doc_id(timestamp: f64) -> String {
    format!("{}-{}", timestamp, Uuid::new_v4().simple())
}
