//! Query intents
//!
//! The four query shapes the engine knows how to build and interpret, each
//! owning its GraphQL document and variable mapping. The builder performs
//! no I/O.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{json, Value};

const TITLE_QUERY: &str = r#"
query titleQuery($anyBaseUrl: [String], $query: String) {
  articles(wiki: $anyBaseUrl, titleKeyword: $query, page: 1, pageSize: 10) {
    nodes {
      title
      url
      author
      rating
    }
    pageInfo {
      total
      page
      pageSize
      hasNextPage
    }
  }
}
"#;

const USER_QUERY: &str = r#"
query userQuery($query: String!, $baseUrl: String!) {
  authorWikiRank(
    wiki: $baseUrl
    name: $query
    by: RATING
  ) {
    rank
    name
    value
  }
}
"#;

const USER_RANK_QUERY: &str = r#"
query userRankQuery($baseUrl: String) {
  authorRanking(wiki: $baseUrl, by: RATING) {
    rank
    name
    value
  }
}
"#;

const USER_GLOBAL_QUERY: &str = r#"
query userGlobalQuery($query: String!) {
  authorGlobalRank(name: $query, by: RATING) {
    rank
    name
    value
  }
  articles(authorName: $query, page: 1, pageSize: 1) {
    pageInfo {
      total
    }
  }
}
"#;

/// A logical query shape. Determines the GraphQL document, the required
/// variables, and the response shape to expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryIntent {
    /// Article search by title keyword; branch optional.
    TitleSearch,
    /// Author statistics by name within one branch.
    AuthorByNameInBranch,
    /// Full ranking of a branch (or global when unscoped); selection by
    /// rank happens post-hoc.
    AuthorRankInBranch,
    /// Author statistics by name across all branches, with a sibling
    /// article-count block.
    AuthorByNameGlobal,
}

impl QueryIntent {
    pub fn document(&self) -> &'static str {
        match self {
            QueryIntent::TitleSearch => TITLE_QUERY,
            QueryIntent::AuthorByNameInBranch => USER_QUERY,
            QueryIntent::AuthorRankInBranch => USER_RANK_QUERY,
            QueryIntent::AuthorByNameGlobal => USER_GLOBAL_QUERY,
        }
    }

    /// Variable mapping for this intent. `canonical_branch` is the resolved
    /// wiki name; `None` serializes as null, which the remote service
    /// rejects or ignores for branch-required intents.
    pub fn variables(&self, param: &str, canonical_branch: Option<&str>) -> Value {
        match self {
            QueryIntent::TitleSearch => json!({
                "query": param,
                "anyBaseUrl": canonical_branch.map(|wiki| vec![wiki]),
            }),
            QueryIntent::AuthorByNameInBranch => json!({
                "query": param,
                "baseUrl": canonical_branch,
            }),
            QueryIntent::AuthorRankInBranch => json!({
                "baseUrl": canonical_branch,
            }),
            QueryIntent::AuthorByNameGlobal => json!({
                "query": param,
            }),
        }
    }
}

lazy_static! {
    static ref RANK_PATTERN: Regex = Regex::new(r"^#[0-9]{1,15}$").unwrap();
}

/// Exact-rank constraint parsed from a `#<digits>` input token. Absent
/// selector means "first unfiltered record".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankSelector {
    pub rank: u64,
}

impl RankSelector {
    pub fn parse(input: &str) -> Option<Self> {
        if !RANK_PATTERN.is_match(input) {
            return None;
        }
        input[1..].parse().ok().map(|rank| Self { rank })
    }
}
