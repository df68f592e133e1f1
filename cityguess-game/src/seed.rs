//! Reversible share-code scheme for session seeds, plus domain-separated
//! stream-seed derivation.
//! Code format: GG-<WORD><NN>, e.g., GG-PARIS42, GG-ATLAS07

use hmac::{Hmac, Mac};
use sha2::Sha256;

fn fnv1a64(bytes: &[u8]) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0100_0000_01b3;
    let mut hash = FNV_OFFSET;
    for b in bytes {
        hash = (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME);
    }
    hash
}

fn sanitize_word(word: &str) -> String {
    word.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

// Word list for share codes
pub const WORD_LIST: [&str; 64] = [
    "PARIS", "LONDON", "MADRID", "BERLIN", "NAPLES", "OSLO", "TOKYO", "SEOUL", "CAIRO", "LIMA",
    "KYIV", "DELHI", "DUBLIN", "VIENNA", "PRAGUE", "ATHENS", "LISBON", "WARSAW", "TIRANA", "RIGA",
    "QUITO", "BOGOTA", "HAVANA", "DAKAR", "ACCRA", "LAGOS", "NAIROBI", "PERTH", "SYDNEY", "AKLND",
    "TAIPEI", "HANOI", "MANILA", "MUMBAI", "TBILISI", "YEREVAN", "BAKU", "MINSK", "SOFIA", "SKOPJE",
    "ZAGREB", "GLOBE", "ATLAS", "COMPASS", "PIN", "MARKER", "STREAK", "POSTER", "REEL", "SCENE",
    "CAMERA", "SCRIPT", "STUDIO", "SERIES", "SEASON", "GUESS", "SCORE", "TIMER", "HEARTS", "BONUS",
    "ROUND", "DECK", "SHARE", "CODE",
];

#[inline]
fn pack(word_index: u16, nn: u8) -> u16 {
    word_index & 0x003F | ((u16::from(nn) & 0x7F) << 6)
}

#[inline]
fn unpack(packed: u16) -> (u16, u8) {
    (packed & 0x003F, ((packed >> 6) & 0x7F) as u8)
}

fn compose_seed(word_index: u16, nn: u8) -> u64 {
    let packed = pack(word_index, nn);
    // Domain-separated FNV input
    let mut buf = [0u8; 9];
    buf[..6].copy_from_slice(b"CTYGS-");
    buf[6] = (packed & 0xFF) as u8;
    buf[7] = (packed >> 8) as u8;
    buf[8] = 0x5A;
    let h = fnv1a64(&buf);
    (h & 0xFFFF_FFFF_FFFF_0000) | u64::from(packed)
}

#[must_use]
pub fn encode_friendly(seed: u64) -> String {
    let packed = (seed & 0xFFFF) as u16;
    let (wi, mut nn) = unpack(packed);
    let word = WORD_LIST.get(wi as usize).copied().unwrap_or("PARIS");
    if nn > 99 {
        nn %= 100;
    }
    format!("GG-{word}{nn:02}")
}

#[must_use]
pub fn decode_to_seed(code: &str) -> Option<u64> {
    let s = code.trim();
    let (prefix, rest) = s.split_once('-')?;
    if !prefix.eq_ignore_ascii_case("GG") {
        return None;
    }
    if rest.len() < 3 || !rest.is_char_boundary(rest.len() - 2) {
        return None;
    }
    let (word_part, nn_part) = rest.split_at(rest.len() - 2);
    let nn: u8 = nn_part.parse().ok()?;
    let word = sanitize_word(word_part);
    let idx = WORD_LIST.iter().position(|w| sanitize_word(w) == word)?;
    let wi = u16::try_from(idx).ok()?;
    Some(compose_seed(wi, nn))
}

#[must_use]
pub fn generate_code_from_entropy(entropy: u64) -> String {
    let wi = u16::try_from(entropy % WORD_LIST.len() as u64).unwrap_or(0);
    let nn = ((entropy >> 17) % 100) as u8;
    let seed = compose_seed(wi, nn);
    encode_friendly(seed)
}

/// Derive a per-stream seed from the user-visible session seed so that
/// adding RNG consumers later cannot perturb the deck order.
pub(crate) fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()).expect("64-bit seed is valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let seed_bytes: [u8; 8] = digest[..8].try_into().expect("digest slice length");
    u64::from_le_bytes(seed_bytes)
}
