use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};

use crate::taxonomy::CategoryTaxonomy;
use crate::types::ProfessionalRecord;

use super::sanitize::{description, sanitize_bio};

/// Page metadata for a professional's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical_path: String,
}

impl ProfileMetadata {
    fn for_record(record: &ProfessionalRecord, secondary_categories: &[String]) -> Self {
        let categories = record.categories.join(", ");
        let mut summary = format!(
            "{} is a professional for {} based in {}.",
            record.name, categories, record.location
        );
        if record.emergency_available {
            summary.push_str(" Available for emergency services.");
        }
        if record.weekend_evening {
            summary.push_str(" Works weekends and evenings.");
        }

        let mut keywords = vec![record.name.clone(), record.location.clone()];
        keywords.extend(record.categories.iter().cloned());
        keywords.extend(secondary_categories.iter().cloned());
        keywords.extend(record.languages.iter().cloned());
        keywords.push("professional".to_string());
        keywords.push("services".to_string());
        if record.emergency_available {
            keywords.push("emergency services".to_string());
        }
        if record.weekend_evening {
            keywords.push("weekend service".to_string());
        }

        Self {
            title: format!("{} - {}", record.name, categories),
            description: summary,
            keywords: dedup_non_empty(keywords),
            canonical_path: format!("/majstori/{}", record.id),
        }
    }
}

/// Everything a profile page renders for one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub record: Arc<ProfessionalRecord>,
    /// Bio with script content removed, still HTML.
    pub sanitized_bio: String,
    /// Plain-text excerpt of the sanitized bio.
    pub description: String,
    /// Subcategories of the record's categories, in taxonomy order.
    pub secondary_categories: Vec<String>,
    pub metadata: ProfileMetadata,
    /// schema.org `ProfessionalService` document.
    pub structured_data: Value,
}

impl ProfileView {
    pub fn build(record: Arc<ProfessionalRecord>, taxonomy: &CategoryTaxonomy) -> Self {
        let secondary_categories: Vec<String> = taxonomy
            .secondary_categories(&record.categories)
            .into_iter()
            .map(str::to_string)
            .collect();
        let sanitized_bio = sanitize_bio(&record.bio);
        let description = description(&sanitized_bio);
        let metadata = ProfileMetadata::for_record(&record, &secondary_categories);
        let structured_data = structured_data(&record, &description, &secondary_categories);

        Self {
            sanitized_bio,
            description,
            secondary_categories,
            metadata,
            structured_data,
            record,
        }
    }
}

fn structured_data(record: &ProfessionalRecord, description: &str, secondary: &[String]) -> Value {
    let description = if description.is_empty() {
        format!("Professional {} services", record.categories.join(", "))
    } else {
        description.to_string()
    };
    let services: Vec<Value> = record
        .categories
        .iter()
        .chain(secondary)
        .map(|service| json!({ "@type": "Service", "name": service }))
        .collect();

    let mut data = json!({
        "@context": "https://schema.org",
        "@type": "ProfessionalService",
        "name": record.name,
        "description": description,
        "address": {
            "@type": "PostalAddress",
            "addressLocality": record.location,
        },
        "telephone": record.contacts.first().cloned().unwrap_or_default(),
        "availableLanguage": record.languages,
        "hasOfferCatalog": {
            "@type": "OfferCatalog",
            "name": "Services",
            "itemListElement": services,
        },
    });
    if record.weekend_evening {
        data["openingHoursSpecification"] = json!({
            "@type": "OpeningHoursSpecification",
            "dayOfWeek": [
                "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"
            ],
            "opens": "00:00",
            "closes": "23:59",
        });
    }
    data
}

fn dedup_non_empty(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| !value.is_empty() && seen.insert(value.clone()))
        .collect()
}
