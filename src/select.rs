//! Response disambiguation
//!
//! Narrows a candidate set to the single record a reply is built from.
//! Titles use nearest edit distance; authors use first-unbanned scan with
//! an optional exact-rank constraint. "No match" is a value, never an
//! error.

use crate::config::FilterPolicy;
use crate::intent::RankSelector;
use crate::matcher;
use crate::response::{ArticleRecord, AuthorRankRecord};
use itertools::Itertools;

/// Pick the article whose title is nearest the query by edit distance
/// (first occurrence wins ties), then apply the ban check to that single
/// winner. A banned best match yields `None` even when an unbanned,
/// worse-scoring candidate exists.
pub fn select_article(
    query: &str,
    articles: &[ArticleRecord],
    policy: &FilterPolicy,
) -> Option<ArticleRecord> {
    let best = articles
        .iter()
        .position_min_by_key(|article| matcher::distance(query, &article.title))?;
    let article = &articles[best];

    let banned_author = article
        .author
        .as_deref()
        .map_or(false, |name| policy.is_banned_author(name));
    if policy.is_banned_title(&article.title) || banned_author {
        return None;
    }

    Some(article.clone())
}

/// Scan author records in reply order, skipping banned names; when a
/// selector is present the record must also carry exactly that rank. The
/// first record passing every predicate wins.
pub fn select_author(
    records: &[AuthorRankRecord],
    policy: &FilterPolicy,
    selector: Option<RankSelector>,
) -> Option<AuthorRankRecord> {
    records
        .iter()
        .filter(|record| !policy.is_banned_author(&record.name))
        .find(|record| selector.map_or(true, |s| record.rank == s.rank))
        .cloned()
}
