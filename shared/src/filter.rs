//! Catalog filtering
//!
//! Pure predicate chain over the in-memory catalog. Filters are
//! transient view state, never persisted.

use serde::{Deserialize, Serialize};

use crate::models::{Place, PriceRange, Status};

/// Active filter set.
///
/// Every field is optional; an inactive field imposes no constraint.
/// Text fields are also treated as inactive when blank, so a cleared
/// search box behaves the same as no search box.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    /// Case-insensitive substring on the place name
    pub name: Option<String>,
    /// Case-insensitive substring on the area
    pub area: Option<String>,
    /// Case-insensitive substring on the genre
    pub genre: Option<String>,
    /// Exact status match
    pub status: Option<Status>,
    /// Exact price tier match
    pub price_range: Option<PriceRange>,
}

impl Filters {
    /// Conjunction of every active predicate.
    pub fn matches(&self, place: &Place) -> bool {
        Self::text_matches(&self.name, Some(&place.name))
            && Self::text_matches(&self.area, place.area.as_deref())
            && Self::text_matches(&self.genre, place.genre.as_deref())
            && self.status.is_none_or(|s| place.status == s)
            && self.price_range.is_none_or(|p| place.price_range == p)
    }

    fn text_matches(needle: &Option<String>, haystack: Option<&str>) -> bool {
        match needle.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => haystack
                .unwrap_or("")
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }
}

/// Derive the filtered view from the live catalog.
///
/// Pure projection: the source is untouched and output order follows
/// input order, so the synchronizer's recency ordering is inherited.
pub fn apply_filters(places: &[Place], filters: &Filters) -> Vec<Place> {
    places
        .iter()
        .filter(|p| filters.matches(p))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str, name: &str, area: Option<&str>, status: Status, price: PriceRange) -> Place {
        Place {
            id: id.into(),
            name: name.into(),
            area: area.map(Into::into),
            genre: None,
            price_range: price,
            url: None,
            status,
            rating: None,
            note: None,
            photos: vec![],
            created_at: "2025-01-01T00:00:00.000Z".into(),
            updated_at: "2025-01-01T00:00:00.000Z".into(),
        }
    }

    fn catalog() -> Vec<Place> {
        vec![
            place("a", "Sushi Tengoku", Some("Ginza"), Status::Want, PriceRange::Tier3),
            place("b", "Ramen Ichi", Some("Shibuya"), Status::Done, PriceRange::Tier1),
            place("c", "Bistro Sud", None, Status::Booked, PriceRange::Tier3),
        ]
    }

    #[test]
    fn inactive_filters_return_full_catalog_in_order() {
        let catalog = catalog();
        let out = apply_filters(&catalog, &Filters::default());
        assert_eq!(out, catalog);
    }

    #[test]
    fn blank_text_filter_is_inactive() {
        let catalog = catalog();
        let filters = Filters {
            name: Some("   ".into()),
            ..Filters::default()
        };
        assert_eq!(apply_filters(&catalog, &filters).len(), 3);
    }

    #[test]
    fn name_filter_is_case_insensitive_substring() {
        let catalog = catalog();
        let filters = Filters {
            name: Some("sushi".into()),
            ..Filters::default()
        };
        let out = apply_filters(&catalog, &filters);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Sushi Tengoku");
    }

    #[test]
    fn missing_optional_field_never_matches_an_active_text_filter() {
        let catalog = catalog();
        let filters = Filters {
            area: Some("ginza".into()),
            ..Filters::default()
        };
        let out = apply_filters(&catalog, &filters);
        assert_eq!(out.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(), ["a"]);
    }

    #[test]
    fn active_filters_compose_conjunctively() {
        let catalog = catalog();
        let filters = Filters {
            price_range: Some(PriceRange::Tier3),
            status: Some(Status::Booked),
            ..Filters::default()
        };
        let out = apply_filters(&catalog, &filters);
        assert_eq!(out.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(), ["c"]);
    }

    #[test]
    fn filtered_output_preserves_input_order() {
        let catalog = catalog();
        let filters = Filters {
            price_range: Some(PriceRange::Tier3),
            ..Filters::default()
        };
        let out = apply_filters(&catalog, &filters);
        assert_eq!(
            out.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            ["a", "c"]
        );
    }
}
