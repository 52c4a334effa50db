// src/models/selectors.rs

//! CSS selectors for scraping listing and detail pages.

use serde::{Deserialize, Serialize};

/// All selectors used by the extractors, grouped by page kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Selectors {
    #[serde(default)]
    pub pagination: PaginationSelectors,

    #[serde(default)]
    pub listing: ListingSelectors,

    #[serde(default)]
    pub detail: DetailSelectors,
}

/// Selectors on listing page 0 used to discover the page count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationSelectors {
    /// Element whose text is the last page index
    #[serde(default = "defaults::last_page")]
    pub last_page: String,
}

impl Default for PaginationSelectors {
    fn default() -> Self {
        Self {
            last_page: defaults::last_page(),
        }
    }
}

/// Selectors for listing pages. All but `row` are scoped to one row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSelectors {
    /// Selector for each row in the listing table
    #[serde(default = "defaults::row")]
    pub row: String,

    /// Link to the detail page within a row
    #[serde(default = "defaults::link")]
    pub link: String,

    /// Platform label within a row
    #[serde(default = "defaults::platform")]
    pub platform: String,

    /// Numbered title carrying the rank within a row
    #[serde(default = "defaults::rank")]
    pub rank: String,

    /// HTML attribute holding the detail link
    #[serde(default = "defaults::attr_name")]
    pub attr_name: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            row: defaults::row(),
            link: defaults::link(),
            platform: defaults::platform(),
            rank: defaults::rank(),
            attr_name: defaults::attr_name(),
        }
    }
}

/// Selectors for detail pages, one per extracted field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailSelectors {
    #[serde(default = "defaults::title")]
    pub title: String,

    #[serde(default = "defaults::critic_score_pos")]
    pub critic_score_pos: String,
    #[serde(default = "defaults::critic_score_mix")]
    pub critic_score_mix: String,
    #[serde(default = "defaults::critic_score_neg")]
    pub critic_score_neg: String,
    #[serde(default = "defaults::critic_consensus")]
    pub critic_consensus: String,
    #[serde(default = "defaults::critic_count")]
    pub critic_count: String,

    #[serde(default = "defaults::user_score_pos")]
    pub user_score_pos: String,
    #[serde(default = "defaults::user_score_mix")]
    pub user_score_mix: String,
    #[serde(default = "defaults::user_score_neg")]
    pub user_score_neg: String,
    #[serde(default = "defaults::user_consensus")]
    pub user_consensus: String,
    #[serde(default = "defaults::user_count")]
    pub user_count: String,

    /// Expanded blurb, taken verbatim
    #[serde(default = "defaults::summary_long")]
    pub summary_long: String,
    /// Every span under the summary item; the first fragment is the label
    #[serde(default = "defaults::summary_fragments")]
    pub summary_fragments: String,

    #[serde(default = "defaults::release_date")]
    pub release_date: String,
    #[serde(default = "defaults::developer")]
    pub developer: String,
    #[serde(default = "defaults::genres")]
    pub genres: String,
    #[serde(default = "defaults::num_players")]
    pub num_players: String,
    #[serde(default = "defaults::esrb_rating")]
    pub esrb_rating: String,
}

impl Default for DetailSelectors {
    fn default() -> Self {
        Self {
            title: defaults::title(),
            critic_score_pos: defaults::critic_score_pos(),
            critic_score_mix: defaults::critic_score_mix(),
            critic_score_neg: defaults::critic_score_neg(),
            critic_consensus: defaults::critic_consensus(),
            critic_count: defaults::critic_count(),
            user_score_pos: defaults::user_score_pos(),
            user_score_mix: defaults::user_score_mix(),
            user_score_neg: defaults::user_score_neg(),
            user_consensus: defaults::user_consensus(),
            user_count: defaults::user_count(),
            summary_long: defaults::summary_long(),
            summary_fragments: defaults::summary_fragments(),
            release_date: defaults::release_date(),
            developer: defaults::developer(),
            genres: defaults::genres(),
            num_players: defaults::num_players(),
            esrb_rating: defaults::esrb_rating(),
        }
    }
}

mod defaults {
    pub fn last_page() -> String {
        "li.page.last_page a".into()
    }

    pub fn row() -> String {
        "table.clamp-list tr".into()
    }
    pub fn link() -> String {
        "td.clamp-summary-wrap > a".into()
    }
    pub fn platform() -> String {
        "div.platform span.data".into()
    }
    pub fn rank() -> String {
        "span.title.numbered".into()
    }
    pub fn attr_name() -> String {
        "href".into()
    }

    pub fn title() -> String {
        "div.product_title h1".into()
    }
    pub fn critic_score_pos() -> String {
        "div.metascore_w.xlarge.game.positive span".into()
    }
    pub fn critic_score_mix() -> String {
        "div.metascore_w.xlarge.game.mixed span".into()
    }
    pub fn critic_score_neg() -> String {
        "div.metascore_w.xlarge.game.negative span".into()
    }
    pub fn critic_consensus() -> String {
        "div.score_summary.metascore_summary div.summary span.desc".into()
    }
    pub fn critic_count() -> String {
        "div.score_summary.metascore_summary div.summary span.count a span".into()
    }
    pub fn user_score_pos() -> String {
        "div.metascore_w.user.large.game.positive".into()
    }
    pub fn user_score_mix() -> String {
        "div.metascore_w.user.large.game.mixed".into()
    }
    pub fn user_score_neg() -> String {
        "div.metascore_w.user.large.game.negative".into()
    }
    pub fn user_consensus() -> String {
        "div.userscore_wrap.feature_userscore span.desc".into()
    }
    pub fn user_count() -> String {
        "div.userscore_wrap.feature_userscore span.count a".into()
    }
    pub fn summary_long() -> String {
        "li.summary_detail.product_summary span.blurb.blurb_expanded".into()
    }
    pub fn summary_fragments() -> String {
        "li.summary_detail.product_summary span".into()
    }
    pub fn release_date() -> String {
        "li.summary_detail.release_data span.data".into()
    }
    pub fn developer() -> String {
        "li.summary_detail.developer > span.data > a.button".into()
    }
    pub fn genres() -> String {
        "li.summary_detail.product_genre span.data".into()
    }
    pub fn num_players() -> String {
        "li.summary_detail.product_players span.data".into()
    }
    pub fn esrb_rating() -> String {
        "li.summary_detail.product_rating span.data".into()
    }
}
