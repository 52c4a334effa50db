// src/services/detail.rs

//! Detail page extractor.
//!
//! Every field is located and extracted on its own. Most fields are
//! optional; the critic consensus and both review counts are mandatory and
//! their absence rejects the whole record.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{DetailSelectors, GameRecord, RequestContext};
use crate::utils::html::{all_own_text, all_text, first_own_text, first_text, parse_selector};
use crate::utils::text::{collapse_whitespace, first_number, non_empty};

/// Compiled detail page selectors.
struct FieldSelectors {
    title: Selector,
    critic_score_pos: Selector,
    critic_score_mix: Selector,
    critic_score_neg: Selector,
    critic_consensus: Selector,
    critic_count: Selector,
    user_score_pos: Selector,
    user_score_mix: Selector,
    user_score_neg: Selector,
    user_consensus: Selector,
    user_count: Selector,
    summary_long: Selector,
    summary_fragments: Selector,
    release_date: Selector,
    developer: Selector,
    genres: Selector,
    num_players: Selector,
    esrb_rating: Selector,
}

impl FieldSelectors {
    fn compile(s: &DetailSelectors) -> Result<Self> {
        Ok(Self {
            title: parse_selector(&s.title)?,
            critic_score_pos: parse_selector(&s.critic_score_pos)?,
            critic_score_mix: parse_selector(&s.critic_score_mix)?,
            critic_score_neg: parse_selector(&s.critic_score_neg)?,
            critic_consensus: parse_selector(&s.critic_consensus)?,
            critic_count: parse_selector(&s.critic_count)?,
            user_score_pos: parse_selector(&s.user_score_pos)?,
            user_score_mix: parse_selector(&s.user_score_mix)?,
            user_score_neg: parse_selector(&s.user_score_neg)?,
            user_consensus: parse_selector(&s.user_consensus)?,
            user_count: parse_selector(&s.user_count)?,
            summary_long: parse_selector(&s.summary_long)?,
            summary_fragments: parse_selector(&s.summary_fragments)?,
            release_date: parse_selector(&s.release_date)?,
            developer: parse_selector(&s.developer)?,
            genres: parse_selector(&s.genres)?,
            num_players: parse_selector(&s.num_players)?,
            esrb_rating: parse_selector(&s.esrb_rating)?,
        })
    }
}

/// Extracts a `GameRecord` from a detail page.
pub struct DetailExtractor {
    selectors: FieldSelectors,
}

impl DetailExtractor {
    /// Compile the configured selectors.
    pub fn new(selectors: &DetailSelectors) -> Result<Self> {
        Ok(Self {
            selectors: FieldSelectors::compile(selectors)?,
        })
    }

    /// Extract the record for the detail page at `url`.
    ///
    /// The listing context is consumed: rank and platform move into the
    /// record.
    pub fn extract(&self, html: &str, url: &str, context: RequestContext) -> Result<GameRecord> {
        let document = Html::parse_document(html);
        let page = document.root_element();
        let s = &self.selectors;

        // Mandatory fields first, so a rejected page does no further work.
        let critic_consensus = first_own_text(page, &s.critic_consensus)
            .and_then(non_empty)
            .ok_or_else(|| AppError::missing("critic_consensus", url))?;
        let num_critic_reviews = first_own_text(page, &s.critic_count)
            .and_then(first_number)
            .ok_or_else(|| AppError::missing("num_critic_reviews", url))?;
        let num_user_reviews = first_own_text(page, &s.user_count)
            .and_then(first_number)
            .ok_or_else(|| AppError::missing("num_user_reviews", url))?;

        let title = trimmed(page, &s.title);
        let RequestContext { rank, platform } = context;

        Ok(GameRecord {
            id: GameRecord::identity_key(title.as_deref(), &platform),
            url: url.to_string(),
            rank,
            title,
            platform,

            critic_score_pos: trimmed(page, &s.critic_score_pos),
            critic_score_mix: trimmed(page, &s.critic_score_mix),
            critic_score_neg: trimmed(page, &s.critic_score_neg),
            critic_consensus,
            num_critic_reviews,

            user_score_pos: trimmed(page, &s.user_score_pos),
            user_score_mix: trimmed(page, &s.user_score_mix),
            user_score_neg: trimmed(page, &s.user_score_neg),
            user_consensus: trimmed(page, &s.user_consensus),
            num_user_reviews,

            game_summary: short_summary(page, &s.summary_fragments),
            game_summary_long: first_own_text(page, &s.summary_long).map(str::to_string),

            release_date: trimmed(page, &s.release_date),
            developer: trimmed(page, &s.developer),
            genres: all_text(page, &s.genres),
            num_players: first_text(page, &s.num_players).and_then(non_empty),
            esrb_rating: first_text(page, &s.esrb_rating).and_then(non_empty),
        })
    }
}

/// First own text of the match, trimmed.
fn trimmed(page: ElementRef<'_>, selector: &Selector) -> Option<String> {
    first_own_text(page, selector).and_then(non_empty)
}

/// Short summary: every fragment after the leading label, concatenated,
/// whitespace-collapsed and trimmed.
fn short_summary(page: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let joined: String = all_own_text(page, selector).into_iter().skip(1).collect();
    non_empty(&collapse_whitespace(&joined))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sentiment;

    const URL: &str = "https://www.metacritic.com/game/pc/portal-2";

    struct Page {
        critic_class: Option<&'static str>,
        consensus: Option<&'static str>,
        critic_count: &'static str,
        user_block: bool,
    }

    impl Default for Page {
        fn default() -> Self {
            Self {
                critic_class: Some("positive"),
                consensus: Some("\n  Universal acclaim  \n"),
                critic_count: "\n  52 Critic Reviews",
                user_block: true,
            }
        }
    }

    impl Page {
        fn html(&self) -> String {
            let critic_score = self
                .critic_class
                .map(|class| {
                    format!(
                        r#"<div class="metascore_w xlarge game {class}"><span>95</span></div>"#
                    )
                })
                .unwrap_or_default();
            let consensus = self
                .consensus
                .map(|c| format!(r#"<span class="desc">{c}</span>"#))
                .unwrap_or_default();
            let user = if self.user_block {
                r#"<div class="userscore_wrap feature_userscore">
                    <div class="metascore_w user large game positive">8.8</div>
                    <span class="desc">Universal acclaim</span>
                    <span class="count"><a href="/user-reviews">4321 Ratings</a></span>
                </div>"#
            } else {
                ""
            };

            format!(
                r#"<html><body>
                <div class="product_title"><a href="/game/pc/portal-2"><h1>Portal 2</h1></a></div>
                <div class="score_summary metascore_summary">
                    {critic_score}
                    <div class="summary">
                        <p>{consensus}
                        <span class="count">based on <a href="/critic-reviews"><span>{count}</span></a></span></p>
                    </div>
                </div>
                {user}
                <ul class="summary_details">
                    <li class="summary_detail product_summary">
                        <span class="label">Summary:</span>
                        <span class="data">
                            <span class="blurb blurb_collapsed">Portal 2 draws from   the award-winning</span><span class="blurb blurb_expanded">Portal 2 draws from the award-winning formula.
  Full text.</span>
                        </span>
                    </li>
                    <li class="summary_detail release_data"><span class="label">Release Date:</span><span class="data"> Apr 18, 2011 </span></li>
                    <li class="summary_detail developer"><span class="label">Developer:</span><span class="data"><a class="button" href="/company/valve">Valve Software</a></span></li>
                    <li class="summary_detail product_genre"><span class="label">Genre(s): </span><span class="data">Action</span>, <span class="data">Puzzle</span></li>
                    <li class="summary_detail product_players"><span class="label"># of players:</span><span class="data"> Up to 2 </span></li>
                    <li class="summary_detail product_rating"><span class="label">Rating:</span><span class="data">E10+</span></li>
                </ul>
                </body></html>"#,
                count = self.critic_count,
            )
        }
    }

    fn extractor() -> DetailExtractor {
        DetailExtractor::new(&DetailSelectors::default()).unwrap()
    }

    fn context() -> RequestContext {
        RequestContext {
            rank: 3,
            platform: "PC".to_string(),
        }
    }

    #[test]
    fn extracts_full_record() {
        let record = extractor()
            .extract(&Page::default().html(), URL, context())
            .unwrap();

        assert_eq!(record.url, URL);
        assert_eq!(record.rank, 3);
        assert_eq!(record.platform, "PC");
        assert_eq!(record.title.as_deref(), Some("Portal 2"));
        assert_eq!(record.id, GameRecord::identity_key(Some("Portal 2"), "PC"));

        assert_eq!(record.critic_consensus, "Universal acclaim");
        assert_eq!(record.num_critic_reviews, 52);
        assert_eq!(record.user_score(), Some((Sentiment::Positive, "8.8")));
        assert_eq!(record.user_consensus.as_deref(), Some("Universal acclaim"));
        assert_eq!(record.num_user_reviews, 4321);

        assert_eq!(record.release_date.as_deref(), Some("Apr 18, 2011"));
        assert_eq!(record.developer.as_deref(), Some("Valve Software"));
        assert_eq!(record.genres, vec!["Action", "Puzzle"]);
        assert_eq!(record.num_players.as_deref(), Some("Up to 2"));
        assert_eq!(record.esrb_rating.as_deref(), Some("E10+"));
    }

    #[test]
    fn positive_critic_score_leaves_other_buckets_empty() {
        let record = extractor()
            .extract(&Page::default().html(), URL, context())
            .unwrap();

        assert_eq!(record.critic_score_pos.as_deref(), Some("95"));
        assert_eq!(record.critic_score_mix, None);
        assert_eq!(record.critic_score_neg, None);
    }

    #[test]
    fn mixed_critic_score_lands_in_mixed_bucket() {
        let page = Page {
            critic_class: Some("mixed"),
            ..Page::default()
        };
        let record = extractor().extract(&page.html(), URL, context()).unwrap();

        assert_eq!(record.critic_score(), Some((Sentiment::Mixed, "95")));
        assert_eq!(record.critic_score_pos, None);
    }

    #[test]
    fn missing_critic_score_is_not_an_error() {
        let page = Page {
            critic_class: None,
            ..Page::default()
        };
        let record = extractor().extract(&page.html(), URL, context()).unwrap();
        assert_eq!(record.critic_score(), None);
    }

    #[test]
    fn missing_consensus_rejects_record() {
        let page = Page {
            consensus: None,
            ..Page::default()
        };
        let result = extractor().extract(&page.html(), URL, context());
        assert!(matches!(
            result,
            Err(AppError::MissingField {
                field: "critic_consensus",
                ..
            })
        ));
    }

    #[test]
    fn count_without_digits_rejects_record() {
        let page = Page {
            critic_count: "Critic Reviews",
            ..Page::default()
        };
        let result = extractor().extract(&page.html(), URL, context());
        assert!(matches!(
            result,
            Err(AppError::MissingField {
                field: "num_critic_reviews",
                ..
            })
        ));
    }

    #[test]
    fn missing_user_block_rejects_record() {
        let page = Page {
            user_block: false,
            ..Page::default()
        };
        let result = extractor().extract(&page.html(), URL, context());
        assert!(matches!(
            result,
            Err(AppError::MissingField {
                field: "num_user_reviews",
                ..
            })
        ));
    }

    #[test]
    fn summaries_follow_their_rules() {
        let record = extractor()
            .extract(&Page::default().html(), URL, context())
            .unwrap();

        assert_eq!(
            record.game_summary_long.as_deref(),
            Some("Portal 2 draws from the award-winning formula.\n  Full text.")
        );

        let short = record.game_summary.unwrap();
        assert_eq!(
            short,
            "Portal 2 draws from the award-winning\
             Portal 2 draws from the award-winning formula. Full text."
        );
        assert_eq!(collapse_whitespace(&short), short);
    }
}
