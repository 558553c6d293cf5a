use std::sync::Arc;

use super::*;
use crate::taxonomy::CategoryTaxonomy;
use crate::types::ProfessionalRecord;

fn electrician() -> ProfessionalRecord {
    ProfessionalRecord {
        location: "Split".to_string(),
        categories: vec!["1. Električne instalacije".to_string()],
        languages: vec!["hrvatski".to_string(), "engleski".to_string()],
        contacts: vec!["+385 91 000 0000".to_string()],
        bio: "<p>Električar s <b>20</b> godina iskustva.</p><script>steal()</script>".to_string(),
        emergency_available: true,
        ..ProfessionalRecord::new("e1", "Ana Babić")
    }
}

#[test]
fn metadata_describes_the_professional() {
    let view = ProfileView::build(Arc::new(electrician()), &CategoryTaxonomy::popravci());
    assert_eq!(view.metadata.title, "Ana Babić - 1. Električne instalacije");
    assert_eq!(
        view.metadata.description,
        "Ana Babić is a professional for 1. Električne instalacije based in Split. \
         Available for emergency services."
    );
    assert_eq!(view.metadata.canonical_path, "/majstori/e1");
}

#[test]
fn keywords_include_subcategories_without_blanks_or_repeats() {
    let record = ProfessionalRecord {
        languages: vec!["hrvatski".to_string(), "hrvatski".to_string()],
        location: String::new(),
        ..electrician()
    };
    let view = ProfileView::build(Arc::new(record), &CategoryTaxonomy::popravci());
    let keywords = &view.metadata.keywords;
    assert_eq!(keywords[0], "Ana Babić");
    assert_eq!(keywords[1], "1. Električne instalacije");
    assert!(keywords.contains(&"Ne radi utičnica".to_string()));
    assert_eq!(keywords.iter().filter(|k| *k == "hrvatski").count(), 1);
    assert!(keywords.contains(&"emergency services".to_string()));
    assert!(!keywords.contains(&"weekend service".to_string()));
    assert!(keywords.iter().all(|k| !k.is_empty()));
}

#[test]
fn bio_is_sanitized_and_summarized() {
    let view = ProfileView::build(Arc::new(electrician()), &CategoryTaxonomy::popravci());
    assert_eq!(
        view.sanitized_bio,
        "<p>Električar s <b>20</b> godina iskustva.</p>"
    );
    assert_eq!(view.description, "Električar s 20 godina iskustva.");
    assert_eq!(view.secondary_categories.len(), 5);
}

#[test]
fn structured_data_lists_services_and_hours() {
    let record = ProfessionalRecord {
        weekend_evening: true,
        bio: String::new(),
        ..electrician()
    };
    let view = ProfileView::build(Arc::new(record), &CategoryTaxonomy::popravci());
    let data = &view.structured_data;
    assert_eq!(data["@type"], "ProfessionalService");
    assert_eq!(data["telephone"], "+385 91 000 0000");
    assert_eq!(
        data["description"],
        "Professional 1. Električne instalacije services"
    );
    let services = data["hasOfferCatalog"]["itemListElement"]
        .as_array()
        .expect("service list");
    assert_eq!(services.len(), 1 + 5);
    assert_eq!(data["openingHoursSpecification"]["closes"], "23:59");
}

#[test]
fn unknown_categories_have_no_secondary_categories() {
    let record = ProfessionalRecord {
        categories: vec!["Vrtlarstvo".to_string()],
        ..ProfessionalRecord::new("x", "Netko")
    };
    let view = ProfileView::build(Arc::new(record), &CategoryTaxonomy::popravci());
    assert!(view.secondary_categories.is_empty());
    assert!(view.structured_data.get("openingHoursSpecification").is_none());
}

#[test]
fn repeated_categories_list_their_subcategories_once_in_taxonomy_order() {
    let record = ProfessionalRecord {
        categories: vec![
            "Kuhinja".to_string(),
            "Bravarija".to_string(),
            "6. Kuhinja".to_string(),
        ],
        ..electrician()
    };
    let taxonomy = CategoryTaxonomy::popravci();
    let view = ProfileView::build(Arc::new(record), &taxonomy);

    let mut expected: Vec<String> = taxonomy
        .subcategories_for("Bravarija")
        .into_iter()
        .map(str::to_string)
        .collect();
    expected.extend(taxonomy.subcategories_for("Kuhinja").into_iter().map(str::to_string));
    assert_eq!(view.secondary_categories, expected);
    assert_eq!(view.secondary_categories[0], "Otvaranje zaključanih vrata");
    assert_eq!(
        view.secondary_categories.last().map(String::as_str),
        Some("Sitne montaže i dorade")
    );

    let services = view.structured_data["hasOfferCatalog"]["itemListElement"]
        .as_array()
        .expect("offer catalog");
    assert_eq!(services.len(), 3 + expected.len());
}
