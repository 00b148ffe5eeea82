//! Randomized offline reply generator.
//!
//! Picks a phrase pool from an explicit threshold table (or the awakened
//! pool when the mode is active), draws a phrase, and optionally decorates
//! it with a recall of the user's recent messages and an emoji.

use std::borrow::Cow;

use batbot_types::constants::{CHAR_LIMIT, RECALL_DELIMITER, RECALL_DEPTH};

use crate::memory::MemoryStore;
use crate::text::truncate_chars;

use super::pools::{CHILL_POOL, DARK_POOL, EMOJI_BANK, LEAD_INS, ROAST_POOL};
use super::random::RandomSource;

/// Probability that a reply gets an emoji.
const EMOJI_PROBABILITY: f64 = 0.6;

/// Probability that a reply quotes the recall string back.
const RECALL_PROBABILITY: f64 = 0.2;

/// Words of the user's message repeated in the echo phrase.
const ECHO_WORDS: usize = 5;

/// Which phrase pool a reply is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolSelector {
    /// Dark pool followed by the roast pool (awakened mode only).
    Awakened,
    Roast,
    Chill,
    /// A synthesized echo of the message in front of the chill pool.
    Echo,
}

/// Normal-mode branch table: the first entry whose threshold is above the
/// draw wins; draws past every threshold select `NORMAL_FALLBACK`.
const NORMAL_BRANCHES: &[(f64, PoolSelector)] =
    &[(0.25, PoolSelector::Roast), (0.60, PoolSelector::Chill)];

const NORMAL_FALLBACK: PoolSelector = PoolSelector::Echo;

/// Map a branch draw to a pool.
pub fn select_pool(draw: f64, awakened: bool) -> PoolSelector {
    if awakened {
        return PoolSelector::Awakened;
    }
    NORMAL_BRANCHES
        .iter()
        .find(|(threshold, _)| draw < *threshold)
        .map(|(_, selector)| *selector)
        .unwrap_or(NORMAL_FALLBACK)
}

fn borrowed(pool: &[&'static str]) -> Vec<Cow<'static, str>> {
    pool.iter().map(|phrase| Cow::Borrowed(*phrase)).collect()
}

/// `"<lead>: <first five words>"`, or just the lead for an empty message.
fn echo_phrase(lead: &str, message: &str) -> String {
    let words: Vec<&str> = message.split_whitespace().take(ECHO_WORDS).collect();
    if words.is_empty() {
        lead.to_string()
    } else {
        format!("{lead}: {}", words.join(" "))
    }
}

/// Offline generator drawing from the curated pools.
#[derive(Debug, Clone)]
pub struct LocalReplyGenerator {
    recall_depth: usize,
    char_limit: usize,
}

impl Default for LocalReplyGenerator {
    fn default() -> Self {
        Self {
            recall_depth: RECALL_DEPTH,
            char_limit: CHAR_LIMIT,
        }
    }
}

impl LocalReplyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce a reply for `message`, recording it into `memory` first.
    ///
    /// Draw order: branch, lead-in (echo branch only), phrase, emoji gate,
    /// emoji (only when the gate passes), recall gate.
    pub fn generate(
        &self,
        memory: &MemoryStore,
        rng: &mut dyn RandomSource,
        user_id: &str,
        message: &str,
        awakened: bool,
    ) -> String {
        memory.record(user_id, message);
        let recall = memory
            .recent(user_id, self.recall_depth)
            .join(RECALL_DELIMITER);

        let selector = select_pool(rng.next_unit(), awakened);
        let pool = Self::build_pool(selector, rng, message);
        let base = pool[rng.pick_index(pool.len())].clone();

        let emoji = if rng.next_unit() < EMOJI_PROBABILITY {
            Some(EMOJI_BANK[rng.pick_index(EMOJI_BANK.len())])
        } else {
            None
        };
        let with_recall = rng.next_unit() < RECALL_PROBABILITY && !recall.is_empty();

        tracing::trace!(?selector, with_recall, emoji = emoji.is_some(), "Local reply drawn");

        let mut reply = base.into_owned();
        if with_recall {
            reply.push_str(" — ");
            reply.push_str(&recall);
        }
        if let Some(emoji) = emoji {
            reply.push(' ');
            reply.push_str(emoji);
        }
        truncate_chars(&reply, self.char_limit)
    }

    fn build_pool(
        selector: PoolSelector,
        rng: &mut dyn RandomSource,
        message: &str,
    ) -> Vec<Cow<'static, str>> {
        match selector {
            PoolSelector::Awakened => {
                let mut pool = borrowed(DARK_POOL);
                pool.extend(borrowed(ROAST_POOL));
                pool
            }
            PoolSelector::Roast => borrowed(ROAST_POOL),
            PoolSelector::Chill => borrowed(CHILL_POOL),
            PoolSelector::Echo => {
                let lead = LEAD_INS[rng.pick_index(LEAD_INS.len())];
                let mut pool = vec![Cow::Owned(echo_phrase(lead, message))];
                pool.extend(borrowed(CHILL_POOL));
                pool
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::random::{RngSource, ScriptedRandom};

    fn generate(draws: Vec<f64>, message: &str, awakened: bool) -> String {
        let memory = MemoryStore::new();
        let mut rng = ScriptedRandom::new(draws);
        LocalReplyGenerator::new().generate(&memory, &mut rng, "u1", message, awakened)
    }

    #[test]
    fn test_branch_table_thresholds() {
        assert_eq!(select_pool(0.0, false), PoolSelector::Roast);
        assert_eq!(select_pool(0.2499, false), PoolSelector::Roast);
        assert_eq!(select_pool(0.25, false), PoolSelector::Chill);
        assert_eq!(select_pool(0.5999, false), PoolSelector::Chill);
        assert_eq!(select_pool(0.60, false), PoolSelector::Echo);
        assert_eq!(select_pool(0.99, false), PoolSelector::Echo);
    }

    #[test]
    fn test_awakened_ignores_draw() {
        assert_eq!(select_pool(0.1, true), PoolSelector::Awakened);
        assert_eq!(select_pool(0.9, true), PoolSelector::Awakened);
    }

    #[test]
    fn test_constant_low_draw_gives_roast_with_recall_and_emoji() {
        let reply = generate(vec![0.1], "are you there batman", false);
        assert_eq!(
            reply,
            "Nice try. Next time bring better excuses. — are you there batman 🦇"
        );
    }

    #[test]
    fn test_chill_branch_without_decorations() {
        let reply = generate(vec![0.3, 0.0, 0.9, 0.9], "hello", false);
        assert_eq!(reply, "I hear you. Short answer: no.");
    }

    #[test]
    fn test_echo_branch_repeats_first_five_words() {
        // branch=echo, lead-in=0 ("I hear you"), phrase=0 (the echo), no emoji, no recall
        let reply = generate(
            vec![0.9, 0.0, 0.0, 0.9, 0.9],
            "one two three four five six seven",
            false,
        );
        assert_eq!(reply, "I hear you: one two three four five");
    }

    #[test]
    fn test_echo_branch_can_pick_chill_line() {
        // lead-in=2 ("Listen up"), phrase index 3 of 4 -> last chill line
        let reply = generate(vec![0.7, 0.99, 0.8, 0.9, 0.9], "anything", false);
        assert_eq!(reply, "Got it. Move along.");
    }

    #[test]
    fn test_awakened_pool_starts_with_dark_lines() {
        let reply = generate(vec![0.99, 0.0, 0.9, 0.9], "hi", true);
        assert_eq!(reply, "Night decides. I obey.");

        // Index 5 of 6 -> last roast line
        let reply = generate(vec![0.5, 0.95, 0.9, 0.9], "hi", true);
        assert_eq!(reply, "That's adorable. Truly.");
    }

    #[test]
    fn test_emoji_is_drawn_from_bank() {
        let reply = generate(vec![0.1, 0.0, 0.5, 0.99, 0.9], "hi", false);
        assert_eq!(reply, "Nice try. Next time bring better excuses. 👀");
    }

    #[test]
    fn test_recall_joins_last_three_fragments() {
        let memory = MemoryStore::new();
        memory.record("u1", "first");
        memory.record("u1", "second");
        memory.record("u1", "third");

        let mut rng = ScriptedRandom::new(vec![0.1, 0.0, 0.9, 0.1]);
        let reply = LocalReplyGenerator::new().generate(&memory, &mut rng, "u1", "fourth", false);
        assert_eq!(
            reply,
            "Nice try. Next time bring better excuses. — second | third | fourth"
        );
    }

    #[test]
    fn test_empty_message_never_adds_recall() {
        let reply = generate(vec![0.1, 0.0, 0.9, 0.0], "", false);
        assert_eq!(reply, "Nice try. Next time bring better excuses.");
    }

    #[test]
    fn test_records_message_into_memory() {
        let memory = MemoryStore::new();
        let mut rng = ScriptedRandom::constant(0.5);
        LocalReplyGenerator::new().generate(&memory, &mut rng, "u1", "remember me", false);
        assert_eq!(memory.recent("u1", 1), vec!["remember me"]);
    }

    #[test]
    fn test_long_recall_is_truncated_to_budget() {
        let long = "z".repeat(500);
        let reply = generate(vec![0.1], &long, false);
        assert_eq!(reply.chars().count(), CHAR_LIMIT);
        assert!(reply.starts_with("Nice try."));
    }

    #[test]
    fn test_output_bound_holds_for_random_draws() {
        let memory = MemoryStore::new();
        let generator = LocalReplyGenerator::new();
        let mut rng = RngSource::seeded(1234);
        let long = "long words ".repeat(60);
        let messages: [&str; 3] = ["", "batman?", long.as_str()];
        for i in 0..500 {
            let message = messages[i % messages.len()];
            let reply = generator.generate(&memory, &mut rng, "u1", message, i % 2 == 0);
            assert!(!reply.is_empty());
            assert!(reply.chars().count() <= CHAR_LIMIT);
        }
    }
}
