use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::Image;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Picks the URL of the smallest image by pixel area. Images without
/// dimensions sort last, so a sized thumbnail wins over an unsized one.
pub fn smallest_image(images: &[Image]) -> Option<String> {
    images
        .iter()
        .min_by_key(|image| match (image.width, image.height) {
            (Some(width), Some(height)) => u64::from(width) * u64::from(height),
            _ => u64::MAX,
        })
        .map(|image| image.url.clone())
}
