//! Weighted relevance scoring for free-text queries.
//!
//! Each term is matched against every searchable field. An exact match adds
//! twice the field weight, a fuzzy prefix match adds the weight once. The
//! record's score is the sum over all terms and fields.

use crate::taxonomy::CategoryTaxonomy;
use crate::types::ProfessionalRecord;

use super::text_match::{match_field, FieldMatch};

/// Synthetic text searched when a professional takes emergency calls.
pub const EMERGENCY_TEXT: &str = "emergency hitno";

/// Synthetic text searched when a professional works nights and weekends.
pub const WEEKEND_TEXT: &str = "night weekend evening vikend navecer vece noc";

/// A searchable field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Categories,
    Subcategories,
    Bio,
    Location,
    ServiceArea,
    Emergency,
    Weekend,
}

impl SearchField {
    pub const ALL: [SearchField; 8] = [
        Self::Name,
        Self::Categories,
        Self::Subcategories,
        Self::Bio,
        Self::Location,
        Self::ServiceArea,
        Self::Emergency,
        Self::Weekend,
    ];

    pub fn weight(self) -> u32 {
        match self {
            Self::Name => 10,
            Self::Categories => 8,
            Self::Subcategories => 3,
            Self::Bio => 5,
            Self::Location => 4,
            Self::ServiceArea => 3,
            Self::Emergency => 2,
            Self::Weekend => 2,
        }
    }
}

/// Result of scoring one record against a set of terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Relevance {
    /// At least one term matched at least one field.
    pub matched: bool,
    pub score: u32,
}

/// Lowercased searchable text of one record.
///
/// Built per query run; subcategories are derived from the taxonomy each time.
#[derive(Debug, Clone)]
pub struct SearchableFields {
    fields: Vec<(SearchField, String)>,
}

impl SearchableFields {
    pub fn from_record(record: &ProfessionalRecord, taxonomy: &CategoryTaxonomy) -> Self {
        let subcategories = taxonomy.subcategories_for_all(&record.categories).join(" ");
        let fields = SearchField::ALL
            .iter()
            .map(|&field| {
                let text = match field {
                    SearchField::Name => record.name.to_lowercase(),
                    SearchField::Categories => record.categories.join(" ").to_lowercase(),
                    SearchField::Subcategories => subcategories.to_lowercase(),
                    SearchField::Bio => record.bio.to_lowercase(),
                    SearchField::Location => record.location.to_lowercase(),
                    SearchField::ServiceArea => record.service_area.to_lowercase(),
                    SearchField::Emergency => flag_text(record.emergency_available, EMERGENCY_TEXT),
                    SearchField::Weekend => flag_text(record.weekend_evening, WEEKEND_TEXT),
                };
                (field, text)
            })
            .collect();
        Self { fields }
    }

    /// Lowercased text of one field.
    #[cfg(test)]
    fn text(&self, field: SearchField) -> &str {
        self.fields
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map_or("", |(_, text)| text.as_str())
    }

    /// Scores lowercased terms against every field.
    pub fn score(&self, terms: &[String]) -> Relevance {
        let mut relevance = Relevance::default();
        for term in terms {
            for (field, text) in &self.fields {
                let contribution = match match_field(term, text) {
                    Some(FieldMatch::Exact) => field.weight() * 2,
                    Some(FieldMatch::Prefix) => field.weight(),
                    None => continue,
                };
                relevance.matched = true;
                relevance.score += contribution;
            }
        }
        relevance
    }
}

/// Scores one record against lowercased query terms.
pub fn score_record(
    record: &ProfessionalRecord,
    taxonomy: &CategoryTaxonomy,
    terms: &[String],
) -> Relevance {
    if terms.is_empty() {
        return Relevance::default();
    }
    SearchableFields::from_record(record, taxonomy).score(terms)
}

fn flag_text(enabled: bool, text: &str) -> String {
    if enabled {
        text.to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::search_terms;

    fn taxonomy() -> CategoryTaxonomy {
        CategoryTaxonomy::popravci()
    }

    #[test]
    fn exact_name_match_scores_double_weight() {
        let record = ProfessionalRecord {
            categories: vec!["Vodoinstalacije".to_string()],
            location: "Zagreb".to_string(),
            ..ProfessionalRecord::new("1", "Ivan Horvat")
        };
        let relevance = score_record(&record, &taxonomy(), &search_terms("Ivan"));
        assert_eq!(relevance, Relevance { matched: true, score: 20 });
    }

    #[test]
    fn prefix_match_scores_single_weight() {
        let record = ProfessionalRecord {
            location: "Zagreb".to_string(),
            ..ProfessionalRecord::new("1", "Ana")
        };
        // "zagrebački" is not in "zagreb", but "zag" is.
        let relevance = score_record(&record, &taxonomy(), &search_terms("zagrebački"));
        assert_eq!(relevance, Relevance { matched: true, score: 4 });
    }

    #[test]
    fn category_match_also_hits_subcategories_once() {
        let record = ProfessionalRecord {
            categories: vec!["2. Vodoinstalacije".to_string()],
            ..ProfessionalRecord::new("1", "Marko")
        };
        let fields = SearchableFields::from_record(&record, &taxonomy());
        assert!(fields.text(SearchField::Subcategories).contains("začepljenje odvoda"));

        // "odvoda" only appears in the subcategory text.
        let relevance = fields.score(&search_terms("odvoda"));
        assert_eq!(relevance.score, 3 * 2);

        // "vodoinstalacije" is exact in categories and a "vod" prefix hit in
        // subcategories ("curi voda", "odvoda").
        let relevance = fields.score(&search_terms("vodoinstalacije"));
        assert_eq!(relevance.score, 8 * 2 + 3);
    }

    #[test]
    fn flags_add_synthetic_text() {
        let record = ProfessionalRecord {
            emergency_available: true,
            weekend_evening: true,
            ..ProfessionalRecord::new("1", "Petar")
        };
        let relevance = score_record(&record, &taxonomy(), &search_terms("hitno vikend"));
        assert_eq!(relevance.score, 2 * 2 + 2 * 2);

        let off = ProfessionalRecord::new("2", "Petar");
        let relevance = score_record(&off, &taxonomy(), &search_terms("hitno vikend"));
        assert!(!relevance.matched);
        assert_eq!(relevance.score, 0);
    }

    #[test]
    fn scores_sum_over_terms() {
        let record = ProfessionalRecord {
            location: "Split".to_string(),
            bio: "<p>Električar sa 20 godina iskustva</p>".to_string(),
            ..ProfessionalRecord::new("1", "Ana Babić")
        };
        let relevance = score_record(&record, &taxonomy(), &search_terms("ana split"));
        // "ana": exact in name. "split": exact in location.
        assert_eq!(relevance.score, 10 * 2 + 4 * 2);
    }

    #[test]
    fn no_terms_means_no_match() {
        let record = ProfessionalRecord::new("1", "Ivan");
        assert_eq!(score_record(&record, &taxonomy(), &[]), Relevance::default());
    }
}
