//! The three hash levels (§4.D).

use memoria_core::constants::SEMANTIC_QUANTIZE_BUCKETS;

/// Level 1: blake3 of the raw bytes. True duplicates, confidence 1.0.
pub fn exact_hash(content: &str) -> String {
    blake3::hash(content.as_bytes()).to_hex().to_string()
}

/// Level 2: lowercase, strip punctuation, collapse whitespace, then hash.
/// Formatting variants, confidence 0.9.
pub fn normalize(content: &str) -> String {
    let lower = content.to_lowercase();
    let stripped: String = lower
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn normalized_hash(content: &str) -> String {
    blake3::hash(normalize(content).as_bytes()).to_hex().to_string()
}

/// Level 3: min-max scale an embedding to [0,1], quantize each dimension
/// into one of `buckets` buckets, hash the bucket byte-array. Paraphrase
/// candidates, confidence 0.6. Absent a vector, callers skip this level
/// entirely (§9).
pub fn semantic_hash(vector: &[f32], buckets: usize) -> String {
    let buckets = buckets.max(1);
    if vector.is_empty() {
        return String::new();
    }
    let min = vector.iter().cloned().fold(f32::INFINITY, f32::min);
    let max = vector.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let range = (max - min).max(f32::EPSILON);

    let quantized: Vec<u8> = vector
        .iter()
        .map(|v| {
            let scaled = ((v - min) / range).clamp(0.0, 1.0);
            (scaled * (buckets - 1) as f32).round() as u8
        })
        .collect();

    blake3::hash(&quantized).to_hex().to_string()
}

pub fn default_semantic_hash(vector: &[f32]) -> String {
    semantic_hash(vector, SEMANTIC_QUANTIZE_BUCKETS)
}
