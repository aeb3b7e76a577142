//! Response shapes
//!
//! Wire-level structs for the remote service's replies and the tagged
//! union the disambiguator normalizes before filtering. Author results
//! arrive in three container shapes: a single record, a ranking list, or a
//! record with a sibling article-count block.

use crate::error::{QuerierError, Result};
use crate::intent::QueryIntent;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One article hit from a title search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub url: String,
    /// Absent for deleted accounts.
    #[serde(default)]
    pub author: Option<String>,
    pub rating: f64,
}

/// One author's standing in a ranking. `total` is only known for shapes
/// that carry the sibling article count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRankRecord {
    pub rank: u64,
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub total: Option<u64>,
}

/// The `{data, errors}` envelope every endpoint replies with.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct TitleData {
    #[serde(default)]
    articles: Option<ArticlePage>,
}

#[derive(Debug, Deserialize)]
struct ArticlePage {
    #[serde(default)]
    nodes: Option<Vec<ArticleRecord>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserData {
    #[serde(default)]
    author_wiki_rank: Option<AuthorRankRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RankData {
    #[serde(default)]
    author_ranking: Option<Vec<AuthorRankRecord>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GlobalData {
    #[serde(default)]
    author_global_rank: Option<AuthorRankRecord>,
    #[serde(default)]
    articles: Option<CountPage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountPage {
    #[serde(default)]
    page_info: Option<PageCount>,
}

#[derive(Debug, Deserialize)]
struct PageCount {
    #[serde(default)]
    total: Option<u64>,
}

/// Decoded result for one intent, preserving the container shape the
/// remote replied with.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultSet {
    Articles(Vec<ArticleRecord>),
    AuthorSingle(Option<AuthorRankRecord>),
    AuthorList(Vec<AuthorRankRecord>),
    AuthorWithArticleCount {
        author: Option<AuthorRankRecord>,
        articles_total: Option<u64>,
    },
}

impl ResultSet {
    /// Decode the `data` block of a successful reply for the intent that
    /// produced it.
    pub fn decode(intent: QueryIntent, data: Option<Value>) -> Result<Self> {
        let data = data.ok_or_else(|| {
            QuerierError::UnsupportedIntent("response carried no data block".to_string())
        })?;

        match intent {
            QueryIntent::TitleSearch => {
                let decoded: TitleData = serde_json::from_value(data)?;
                let nodes = decoded
                    .articles
                    .and_then(|page| page.nodes)
                    .unwrap_or_default();
                Ok(ResultSet::Articles(nodes))
            }
            QueryIntent::AuthorByNameInBranch => {
                let decoded: UserData = serde_json::from_value(data)?;
                Ok(ResultSet::AuthorSingle(decoded.author_wiki_rank))
            }
            QueryIntent::AuthorRankInBranch => {
                let decoded: RankData = serde_json::from_value(data)?;
                Ok(ResultSet::AuthorList(
                    decoded.author_ranking.unwrap_or_default(),
                ))
            }
            QueryIntent::AuthorByNameGlobal => {
                let decoded: GlobalData = serde_json::from_value(data)?;
                let articles_total = decoded
                    .articles
                    .and_then(|page| page.page_info)
                    .and_then(|info| info.total);
                Ok(ResultSet::AuthorWithArticleCount {
                    author: decoded.author_global_rank,
                    articles_total,
                })
            }
        }
    }

    /// Article candidates in reply order.
    pub fn into_articles(self) -> Result<Vec<ArticleRecord>> {
        match self {
            ResultSet::Articles(articles) => Ok(articles),
            _ => Err(QuerierError::UnsupportedIntent(
                "expected article results, got author results".to_string(),
            )),
        }
    }

    /// Author candidates as one ordered sequence regardless of container
    /// shape. The sibling article count folds into the record.
    pub fn into_authors(self) -> Result<Vec<AuthorRankRecord>> {
        match self {
            ResultSet::AuthorSingle(record) => Ok(record.into_iter().collect()),
            ResultSet::AuthorList(records) => Ok(records),
            ResultSet::AuthorWithArticleCount {
                author,
                articles_total,
            } => Ok(author
                .map(|mut record| {
                    record.total = record.total.or(articles_total);
                    record
                })
                .into_iter()
                .collect()),
            ResultSet::Articles(_) => Err(QuerierError::UnsupportedIntent(
                "expected author results, got article results".to_string(),
            )),
        }
    }
}
