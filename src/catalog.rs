//! Sorted, immutable publication list.

use std::cmp::Ordering;

use tracing::debug;

use crate::record::Publication;

/// Sorts records by year descending, then title ascending.
///
/// Titles compare case-insensitively first, so `alpha` precedes `Zeta`; the
/// exact title breaks ties between titles differing only in case.
///
/// Records without a year sort after every dated record. The sort is stable,
/// so records equal on both keys keep their source order.
#[must_use]
pub fn sort_publications(mut publications: Vec<Publication>) -> Vec<Publication> {
    publications.sort_by(compare_publications);
    publications
}

fn compare_publications(a: &Publication, b: &Publication) -> Ordering {
    // Option ordering puts None first; reverse so undated records land last.
    b.year
        .cmp(&a.year)
        .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        .then_with(|| a.title.cmp(&b.title))
}

/// The full publication list, sorted once at construction and immutable
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    publications: Vec<Publication>,
}

impl Catalog {
    /// Builds a catalog from freshly loaded records.
    #[must_use]
    pub fn new(publications: Vec<Publication>) -> Self {
        let publications = sort_publications(publications);
        debug!(count = publications.len(), "catalog built");
        Self { publications }
    }

    /// All records in display order.
    #[must_use]
    pub fn publications(&self) -> &[Publication] {
        &self.publications
    }

    /// Record at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Publication> {
        self.publications.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.publications.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.publications.is_empty()
    }

    /// Distinct years, newest first, for populating the year selector.
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.publications.iter().filter_map(|p| p.year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        years
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(list: &[Publication]) -> Vec<(&str, Option<i32>)> {
        list.iter().map(|p| (p.title.as_str(), p.year)).collect()
    }

    #[test]
    fn test_sort_year_desc_then_title_asc() {
        let sorted = sort_publications(vec![
            Publication::new("B", Some(2020)),
            Publication::new("A", Some(2020)),
            Publication::new("C", Some(2021)),
        ]);
        assert_eq!(
            titles(&sorted),
            vec![("C", Some(2021)), ("A", Some(2020)), ("B", Some(2020))]
        );
    }

    #[test]
    fn test_sort_titles_ignore_case() {
        let sorted = sort_publications(vec![
            Publication::new("Zeta", Some(2020)),
            Publication::new("beta", Some(2020)),
            Publication::new("alpha", Some(2020)),
            Publication::new("Alpha", Some(2020)),
        ]);
        assert_eq!(
            titles(&sorted),
            vec![
                ("Alpha", Some(2020)),
                ("alpha", Some(2020)),
                ("beta", Some(2020)),
                ("Zeta", Some(2020)),
            ]
        );
    }

    #[test]
    fn test_sort_undated_records_last() {
        let sorted = sort_publications(vec![
            Publication::new("Undated", None),
            Publication::new("Old", Some(1999)),
        ]);
        assert_eq!(titles(&sorted), vec![("Old", Some(1999)), ("Undated", None)]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut first = Publication::new("Same", Some(2020));
        first.venue = Some("first".to_string());
        let mut second = Publication::new("Same", Some(2020));
        second.venue = Some("second".to_string());

        let sorted = sort_publications(vec![first, second]);
        assert_eq!(sorted[0].venue.as_deref(), Some("first"));
        assert_eq!(sorted[1].venue.as_deref(), Some("second"));
    }

    #[test]
    fn test_sort_order_holds_for_mixed_input() {
        let sorted = sort_publications(vec![
            Publication::new("m", Some(2018)),
            Publication::new("z", Some(2022)),
            Publication::new("a", Some(2018)),
            Publication::new("k", Some(2022)),
            Publication::new("q", Some(2019)),
        ]);
        for pair in sorted.windows(2) {
            assert!(pair[0].year >= pair[1].year, "years must be non-increasing");
            if pair[0].year == pair[1].year {
                assert!(pair[0].title <= pair[1].title, "titles ascend within a year");
            }
        }
    }

    #[test]
    fn test_catalog_years_are_distinct_and_descending() {
        let catalog = Catalog::new(vec![
            Publication::new("a", Some(2019)),
            Publication::new("b", Some(2021)),
            Publication::new("c", Some(2019)),
            Publication::new("d", None),
        ]);
        assert_eq!(catalog.years(), vec![2021, 2019]);
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_catalog_empty() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.years().is_empty());
        assert!(catalog.get(0).is_none());
    }
}
