//! Canned phrases for the local generator. Read-only, fixed at compile time.

/// Used in normal mode on low draws, and in awakened mode.
pub const ROAST_POOL: &[&str] = &[
    "Nice try. Next time bring better excuses.",
    "You mad? Cute.",
    "Leave the drama to Gotham.",
    "That's adorable. Truly.",
];

/// Used in normal mode on middle draws, and behind the echo phrase.
pub const CHILL_POOL: &[&str] = &[
    "I hear you. Short answer: no.",
    "Do not test me.",
    "Got it. Move along.",
];

/// Only reachable in awakened mode.
pub const DARK_POOL: &[&str] = &[
    "Night decides. I obey.",
    "Shadows have votes, and they voted you off.",
];

/// Openers for the echo phrase.
pub const LEAD_INS: &[&str] = &["I hear you", "Look", "Listen up"];

pub const EMOJI_BANK: &[&str] = &["🦇", "😏", "💀", "🔥", "😎", "🙄", "🤡", "👀"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pools_are_disjoint() {
        let pools = [ROAST_POOL, CHILL_POOL, DARK_POOL, LEAD_INS];
        for (i, a) in pools.iter().enumerate() {
            for b in pools.iter().skip(i + 1) {
                assert!(a.iter().all(|phrase| !b.contains(phrase)));
            }
        }
    }

    #[test]
    fn test_emoji_bank_has_eight_entries() {
        assert_eq!(EMOJI_BANK.len(), 8);
    }
}
