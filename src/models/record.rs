//! Extracted game record.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Sentiment class the site renders a score with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Mixed,
    Negative,
}

/// One game/platform combination extracted from a detail page.
///
/// Score buckets mirror the page: at most one of the three `*_score_*`
/// fields per audience is populated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameRecord {
    /// Stable key derived from (title, platform)
    pub id: String,

    /// Detail page the record was extracted from
    pub url: String,

    pub rank: u32,
    pub title: Option<String>,
    pub platform: String,

    pub critic_score_pos: Option<String>,
    pub critic_score_mix: Option<String>,
    pub critic_score_neg: Option<String>,
    pub critic_consensus: String,
    pub num_critic_reviews: u32,

    pub user_score_pos: Option<String>,
    pub user_score_mix: Option<String>,
    pub user_score_neg: Option<String>,
    pub user_consensus: Option<String>,
    pub num_user_reviews: u32,

    pub game_summary: Option<String>,
    pub game_summary_long: Option<String>,

    pub release_date: Option<String>,
    pub developer: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub num_players: Option<String>,
    pub esrb_rating: Option<String>,
}

impl GameRecord {
    /// Compute the identity key for a (title, platform) pair.
    ///
    /// The key is the first 16 hex chars of SHA-256 over
    /// `title \0 platform`; a missing title hashes as empty.
    pub fn identity_key(title: Option<&str>, platform: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(title.unwrap_or("").as_bytes());
        hasher.update([0u8]);
        hasher.update(platform.as_bytes());
        let digest = hex::encode(hasher.finalize());
        digest[..16].to_string()
    }

    /// The populated critic score and its sentiment, if any.
    pub fn critic_score(&self) -> Option<(Sentiment, &str)> {
        pick_bucket(
            &self.critic_score_pos,
            &self.critic_score_mix,
            &self.critic_score_neg,
        )
    }

    /// The populated user score and its sentiment, if any.
    pub fn user_score(&self) -> Option<(Sentiment, &str)> {
        pick_bucket(
            &self.user_score_pos,
            &self.user_score_mix,
            &self.user_score_neg,
        )
    }
}

fn pick_bucket<'a>(
    pos: &'a Option<String>,
    mix: &'a Option<String>,
    neg: &'a Option<String>,
) -> Option<(Sentiment, &'a str)> {
    [
        (Sentiment::Positive, pos),
        (Sentiment::Mixed, mix),
        (Sentiment::Negative, neg),
    ]
    .into_iter()
    .find_map(|(sentiment, value)| value.as_deref().map(|v| (sentiment, v)))
}
