//! Branch alias table
//!
//! Maps short local aliases (e.g. "cloud") to the canonical wiki names the
//! remote service scopes queries by. The table is static, case-sensitive,
//! and shared read-only across requests.

/// Reserved alias meaning "no branch filter, query globally".
pub const GLOBAL_ALIAS: &str = "all";

/// Alias -> canonical wiki name, format: ("site shorthand", "wiki name").
const BUILTIN_BRANCHES: &[(&str, &str)] = &[
    ("ubmh", "ubmh"),
    ("scp-cloud", "scp-wiki-cloud"),
    ("cloud", "backroom-wiki-cn"),
    ("scr", "scr-wiki"),
    ("dfc", "deep-forest-club"),
    ("rule", "rule-wiki"),
    ("as", "asbackroom"),
    ("lm", "lostmedia"),
    ("if", "if-backrooms"),
    ("rpc", "rpc-wiki-cn"),
    ("warma", "warma-world"),
    ("fr", "backrooms-split-library"),
    ("f", "backrooms-f"),
];

#[derive(Debug, Clone)]
pub struct BranchTable {
    entries: Vec<(String, String)>,
}

impl BranchTable {
    /// The deployment's built-in branch set.
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_BRANCHES
                .iter()
                .map(|(alias, wiki)| (alias.to_string(), wiki.to_string()))
                .collect(),
        )
    }

    pub fn from_entries(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// Canonical wiki name for an alias. Case-sensitive; `None` for unknown
    /// aliases and for the reserved global alias.
    pub fn canonical(&self, alias: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(a, _)| a == alias)
            .map(|(_, wiki)| wiki.as_str())
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.entries.iter().any(|(a, _)| a == alias)
    }

    /// All (alias, wiki) pairs in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(alias, wiki)| (alias.as_str(), wiki.as_str()))
    }
}

/// Query scope derived from a branch argument before any variables are
/// built. Unknown aliases and the reserved global alias both collapse to
/// global scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchScope {
    Global,
    Branch(String),
}

impl BranchScope {
    pub fn resolve(table: &BranchTable, alias: Option<&str>) -> Self {
        match alias {
            Some(a) if a != GLOBAL_ALIAS && table.contains(a) => BranchScope::Branch(a.to_string()),
            _ => BranchScope::Global,
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self, BranchScope::Global)
    }

    /// Alias recorded for bookkeeping and logging.
    pub fn alias(&self) -> &str {
        match self {
            BranchScope::Global => GLOBAL_ALIAS,
            BranchScope::Branch(alias) => alias,
        }
    }

    /// Canonical wiki name for branch-scoped queries; `None` in global
    /// scope.
    pub fn canonical<'a>(&self, table: &'a BranchTable) -> Option<&'a str> {
        match self {
            BranchScope::Global => None,
            BranchScope::Branch(alias) => table.canonical(alias),
        }
    }
}

/// Splits host-layer command tokens into (query text, branch argument): the
/// trailing token is the branch argument only when it names a known branch
/// or the global alias and at least one query token remains.
pub fn split_branch_argument<'a>(
    table: &BranchTable,
    tokens: &'a [String],
) -> (String, Option<&'a str>) {
    match tokens.split_last() {
        Some((last, rest))
            if !rest.is_empty() && (last == GLOBAL_ALIAS || table.contains(last)) =>
        {
            (rest.join(" "), Some(last.as_str()))
        }
        _ => (tokens.join(" "), None),
    }
}

/// Public site address for a canonical wiki name.
pub fn site_url(wiki: &str) -> String {
    format!("https://{}.wikidot.com/", wiki)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_canonical_lookup() {
        let table = BranchTable::builtin();
        assert_eq!(table.canonical("cloud"), Some("backroom-wiki-cn"));
        assert_eq!(table.canonical("rpc"), Some("rpc-wiki-cn"));
        assert_eq!(table.canonical("nope"), None);
        assert_eq!(table.canonical(GLOBAL_ALIAS), None);
    }

    #[test]
    fn test_aliases_are_case_sensitive() {
        let table = BranchTable::builtin();
        assert!(table.contains("dfc"));
        assert!(!table.contains("DFC"));
    }

    #[test]
    fn test_scope_resolution() {
        let table = BranchTable::builtin();
        assert_eq!(
            BranchScope::resolve(&table, Some("scr")),
            BranchScope::Branch("scr".to_string())
        );
        assert_eq!(BranchScope::resolve(&table, Some("all")), BranchScope::Global);
        assert_eq!(BranchScope::resolve(&table, Some("unknown")), BranchScope::Global);
        assert_eq!(BranchScope::resolve(&table, None), BranchScope::Global);
    }

    #[test]
    fn test_split_branch_argument_takes_known_trailing_alias() {
        let table = BranchTable::builtin();
        let toks = tokens(&["Level", "0", "cloud"]);
        let (query, branch) = split_branch_argument(&table, &toks);
        assert_eq!(query, "Level 0");
        assert_eq!(branch, Some("cloud"));
    }

    #[test]
    fn test_split_branch_argument_keeps_unknown_trailing_token() {
        let table = BranchTable::builtin();
        let toks = tokens(&["Level", "0", "remix"]);
        let (query, branch) = split_branch_argument(&table, &toks);
        assert_eq!(query, "Level 0 remix");
        assert_eq!(branch, None);
    }

    #[test]
    fn test_split_branch_argument_never_empties_the_query() {
        let table = BranchTable::builtin();
        let toks = tokens(&["cloud"]);
        let (query, branch) = split_branch_argument(&table, &toks);
        assert_eq!(query, "cloud");
        assert_eq!(branch, None);
    }

    #[test]
    fn test_site_url() {
        assert_eq!(site_url("scr-wiki"), "https://scr-wiki.wikidot.com/");
    }
}
