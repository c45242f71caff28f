//! Partial-name search over venues and artists

use serde::Serialize;

use crate::models::{Artist, EntitySummary, Venue, VenueSummary};

/// Anything searchable by display name
pub trait Named {
    fn name(&self) -> &str;
}

impl<T: Named + ?Sized> Named for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
}

impl Named for EntitySummary {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for VenueSummary {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Venue {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Artist {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults<T> {
    pub count: usize,
    pub data: Vec<T>,
}

/// Case-insensitive substring match on `name`
///
/// Matches keep the candidates' relative order. The query is used as-is,
/// surrounding whitespace included; an empty query matches every candidate.
pub fn partial_match_search<T, I>(query: &str, candidates: I) -> SearchResults<T>
where
    T: Named,
    I: IntoIterator<Item = T>,
{
    let needle = query.to_lowercase();
    let data: Vec<T> = candidates
        .into_iter()
        .filter(|candidate| candidate.name().to_lowercase().contains(&needle))
        .collect();

    SearchResults {
        count: data.len(),
        data,
    }
}
