use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A variant's share of traffic, in whole percent. Variants are walked in
/// creation order when assigning, so the slice passed to [`assign`] must be
/// ordered oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantWeight {
    pub id: String,
    pub weight: u32,
}

/// Which experience a visitor sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Assignment {
    /// The original configuration's implicit remainder share.
    Control,
    Variant { id: String },
}

/// Assign a visitor to a variant or the control.
///
/// The visitor's bucket in [0, 100) is derived by hashing
/// `{config_id}:{visitor_id}`, so the same visitor lands in the same bucket
/// on every request for the lifetime of the configuration, so assignment
/// is sticky without any stored state. Variants occupy contiguous ranges in
/// creation order; the bucket falls into the first range containing it, and
/// anything past the summed weights is control.
pub fn assign(config_id: &str, visitor_id: &str, variants: &[VariantWeight]) -> Assignment {
    let bucket = visitor_bucket(config_id, visitor_id);
    let mut cumulative = 0u32;
    for variant in variants {
        cumulative = cumulative.saturating_add(variant.weight);
        if bucket < cumulative {
            return Assignment::Variant {
                id: variant.id.clone(),
            };
        }
    }
    Assignment::Control
}

/// Stable bucket in [0, 100) for one visitor against one configuration.
pub fn visitor_bucket(config_id: &str, visitor_id: &str) -> u32 {
    let mut hasher = Sha256::new();
    hasher.update(config_id.as_bytes());
    hasher.update(b":");
    hasher.update(visitor_id.as_bytes());
    let digest = hasher.finalize();
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(prefix) % 100) as u32
}
