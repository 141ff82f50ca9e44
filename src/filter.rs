//! Year and free-text filtering over the sorted catalog.
//!
//! Filtering is a pure function of (full list, criteria): it never mutates
//! records and always returns references into the input slice, in input
//! order.

use tracing::trace;

use crate::record::Publication;

/// Parsed value of the year selector control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum YearSelection {
    /// Empty selector value: no year constraint.
    #[default]
    Any,
    /// Only records whose year renders as this exact text.
    Year(String),
}

impl YearSelection {
    /// Interprets a raw selector value; empty or blank means [`YearSelection::Any`].
    #[must_use]
    pub fn from_control(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            Self::Any
        } else {
            Self::Year(value.to_string())
        }
    }

    /// The control value this selection corresponds to.
    #[must_use]
    pub fn as_control_value(&self) -> &str {
        match self {
            Self::Any => "",
            Self::Year(year) => year,
        }
    }

    fn matches(&self, publication: &Publication) -> bool {
        match self {
            Self::Any => true,
            Self::Year(selected) => publication
                .year
                .is_some_and(|year| year.to_string() == *selected),
        }
    }
}

/// Current state of the filter controls.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    /// Year selector state.
    pub year: YearSelection,
    /// Free-text query as typed.
    pub query: String,
}

impl FilterCriteria {
    /// Builds criteria from raw control values.
    #[must_use]
    pub fn new(year: &str, query: impl Into<String>) -> Self {
        Self {
            year: YearSelection::from_control(year),
            query: query.into(),
        }
    }

    /// Returns true when neither control constrains the list.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.year == YearSelection::Any && self.normalized_query().is_empty()
    }

    fn normalized_query(&self) -> String {
        self.query.trim().to_lowercase()
    }

    /// Returns true when `publication` passes both predicates.
    #[must_use]
    pub fn matches(&self, publication: &Publication) -> bool {
        let query = self.normalized_query();
        self.year.matches(publication) && matches_query(publication, &query)
    }
}

fn matches_query(publication: &Publication, normalized_query: &str) -> bool {
    normalized_query.is_empty() || publication.search_text().contains(normalized_query)
}

/// Returns the records passing `criteria`, preserving relative order.
#[tracing::instrument(skip(publications), fields(total = publications.len()))]
#[must_use]
pub fn filter_publications<'a>(
    publications: &'a [Publication],
    criteria: &FilterCriteria,
) -> Vec<&'a Publication> {
    let query = criteria.normalized_query();
    let visible: Vec<&Publication> = publications
        .iter()
        .filter(|p| criteria.year.matches(p) && matches_query(p, &query))
        .collect();
    trace!(visible = visible.len(), "filter applied");
    visible
}
