//! Resolution orchestrator
//!
//! Top-level entry point: classifies the input token, resolves the branch
//! scope, fetches through the failover client, runs the optional
//! enrichment fetch for rank lookups, and hands the result to the
//! disambiguator. A linear pipeline with one conditional branch and no
//! business-level retries.

use crate::branch::{BranchScope, BranchTable};
use crate::client::FailoverClient;
use crate::config::FilterPolicy;
use crate::error::Result;
use crate::intent::{QueryIntent, RankSelector};
use crate::response::{ArticleRecord, AuthorRankRecord};
use crate::select;
use tracing::{debug, info};
use uuid::Uuid;

/// What the host command layer is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Article,
    Author,
}

/// Terminal outcome of a resolution. `NotFound` is an empty answer, not a
/// failure; failures surface as `QuerierError`.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Article(ArticleRecord),
    Author(AuthorRankRecord),
    NotFound,
}

pub struct Resolver {
    client: FailoverClient,
    branches: BranchTable,
    policy: FilterPolicy,
}

impl Resolver {
    pub fn new(client: FailoverClient, branches: BranchTable, policy: FilterPolicy) -> Self {
        Self {
            client,
            branches,
            policy,
        }
    }

    /// Resolve one request. `explicit_branch` is the command's branch
    /// argument; `default_branch` is the host's stored per-channel default;
    /// with neither, scope is global.
    pub async fn resolve(
        &self,
        kind: LookupKind,
        raw_input: &str,
        explicit_branch: Option<&str>,
        default_branch: Option<&str>,
    ) -> Result<Resolution> {
        let request_id = Uuid::new_v4();
        let scope = BranchScope::resolve(&self.branches, explicit_branch.or(default_branch));
        info!(%request_id, input = raw_input, branch = scope.alias(), ?kind, "resolving");

        match kind {
            LookupKind::Article => self.resolve_article(raw_input, &scope).await,
            LookupKind::Author => match RankSelector::parse(raw_input) {
                Some(selector) => self.resolve_author_by_rank(selector, &scope).await,
                None => self.resolve_author_by_name(raw_input, &scope).await,
            },
        }
    }

    async fn resolve_article(&self, query: &str, scope: &BranchScope) -> Result<Resolution> {
        let variables = QueryIntent::TitleSearch.variables(query, scope.canonical(&self.branches));
        let result = self.client.request(QueryIntent::TitleSearch, variables).await?;
        let articles = result.into_articles()?;

        Ok(match select::select_article(query, &articles, &self.policy) {
            Some(article) => Resolution::Article(article),
            None => Resolution::NotFound,
        })
    }

    /// Name-lookup intent matching the branch scope (the global upgrade of
    /// the pipeline's classify step).
    fn name_intent(scope: &BranchScope) -> QueryIntent {
        if scope.is_global() {
            QueryIntent::AuthorByNameGlobal
        } else {
            QueryIntent::AuthorByNameInBranch
        }
    }

    async fn resolve_author_by_name(&self, name: &str, scope: &BranchScope) -> Result<Resolution> {
        let intent = Self::name_intent(scope);
        let variables = intent.variables(name, scope.canonical(&self.branches));
        let result = self.client.request(intent, variables).await?;
        let records = result.into_authors()?;

        Ok(match select::select_author(&records, &self.policy, None) {
            Some(record) => Resolution::Author(record),
            None => Resolution::NotFound,
        })
    }

    async fn resolve_author_by_rank(
        &self,
        selector: RankSelector,
        scope: &BranchScope,
    ) -> Result<Resolution> {
        let canonical = scope.canonical(&self.branches);
        let variables = QueryIntent::AuthorRankInBranch.variables("", canonical);
        let ranking = self
            .client
            .request(QueryIntent::AuthorRankInBranch, variables)
            .await?;
        let records = ranking.into_authors()?;

        let coarse = match select::select_author(&records, &self.policy, Some(selector)) {
            Some(record) => record,
            None => return Ok(Resolution::NotFound),
        };

        // Ranking rows carry no article statistics; refetch by name for the
        // full record. A failing second fetch surfaces instead of degrading
        // to the coarse row.
        debug!(name = %coarse.name, rank = coarse.rank, "enriching rank hit by name");
        let intent = Self::name_intent(scope);
        let variables = intent.variables(&coarse.name, canonical);
        let enriched = self.client.request(intent, variables).await?;
        let records = enriched.into_authors()?;

        Ok(
            match select::select_author(&records, &self.policy, Some(selector)) {
                Some(record) => Resolution::Author(record),
                None => Resolution::NotFound,
            },
        )
    }
}
