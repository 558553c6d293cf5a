//! Two-level service category taxonomy.
//!
//! The taxonomy is read-only reference data. Records only store top-level
//! category names; subcategories are derived from the taxonomy whenever a
//! query needs them.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DirectoryError, Result};

/// A second-level category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomySubcategory {
    pub id: String,
    pub name: String,
}

/// A top-level category with its ordered subcategories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyCategory {
    pub id: String,
    /// Display name, possibly carrying an ordinal prefix such as `"2. "`.
    pub name: String,
    pub subcategories: Vec<TaxonomySubcategory>,
}

/// The fixed category taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTaxonomy {
    categories: Vec<TaxonomyCategory>,
}

const POPRAVCI_CATEGORIES: &[(&str, &str, &[&str])] = &[
    (
        "1",
        "1. Električne instalacije",
        &[
            "Ne radi utičnica",
            "Ne radi svjetlo",
            "Zamjena prekidača ili utičnice",
            "Postavljanje rasvjete/lustre",
            "Problemi s osiguračima",
        ],
    ),
    (
        "2",
        "2. Vodoinstalacije",
        &[
            "Curi voda (sudoper, sifon, WC...)",
            "Začepljenje odvoda",
            "Zamjena slavine ili tuša",
            "Problemi s kotlićem",
            "Ugradnja perilice/sušilice",
        ],
    ),
    (
        "3",
        "3. Stolarija / Vrata / Prozori",
        &[
            "Podešavanje vrata/prozora",
            "Zamjena brava/kvaka",
            "Popravak namještaja",
            "Montaža kuhinje/ormara",
        ],
    ),
    (
        "4",
        "4. Bravarija",
        &[
            "Otvaranje zaključanih vrata",
            "Zamjena cilindara",
            "Popravak rešetki, ograda",
        ],
    ),
    (
        "5",
        "5. Kupaonica",
        &[
            "Silikoniranje tuša/kade",
            "Zamjena WC školjke",
            "Ugradnja tuš kabine",
        ],
    ),
    (
        "6",
        "6. Kuhinja",
        &[
            "Popravak ormarića",
            "Zamjena šarki / vodilica",
            "Sitne montaže i dorade",
        ],
    ),
    (
        "7",
        "7. Bijela tehnika (servis)",
        &["Perilica rublja", "Sušilica", "Perilica suđa", "Hladnjak"],
    ),
    (
        "8",
        "8. Klima / Grijanje",
        &["Servis klime", "Montaža klime", "Radijatori / grijanje"],
    ),
    (
        "9",
        "9. Zidovi / Strop",
        &[
            "Zakrpavanje rupa",
            "Krečenje manjih površina",
            "Postavljanje polica, slika",
        ],
    ),
    (
        "10",
        "10. Pomoć u kući / Sitni radovi",
        &[
            "Sastavljanje namještaja (IKEA i sl.)",
            "Vješanje TV-a na zid",
            "Montaža zavjesa, roleta",
        ],
    ),
];

impl CategoryTaxonomy {
    pub fn new(categories: Vec<TaxonomyCategory>) -> Self {
        Self { categories }
    }

    /// The built-in Popravci service taxonomy.
    pub fn popravci() -> Self {
        let categories = POPRAVCI_CATEGORIES
            .iter()
            .map(|(id, name, subcategories)| TaxonomyCategory {
                id: (*id).to_string(),
                name: (*name).to_string(),
                subcategories: subcategories
                    .iter()
                    .enumerate()
                    .map(|(index, sub)| TaxonomySubcategory {
                        id: format!("{id}.{}", index + 1),
                        name: (*sub).to_string(),
                    })
                    .collect(),
            })
            .collect();
        Self { categories }
    }

    /// Parses a taxonomy from a JSON array of categories.
    pub fn from_json(raw: &str) -> Result<Self> {
        let taxonomy: Self = serde_json::from_str(raw)?;
        if taxonomy.categories.is_empty() {
            return Err(DirectoryError::InvalidInput(
                "taxonomy must contain at least one category".to_string(),
            ));
        }
        Ok(taxonomy)
    }

    /// Loads a taxonomy JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DirectoryError::FileNotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn categories(&self) -> &[TaxonomyCategory] {
        &self.categories
    }

    /// Top-level category names without ordinal prefixes, in taxonomy order.
    pub fn top_level_names(&self) -> Vec<String> {
        self.categories
            .iter()
            .map(|category| strip_ordinal_prefix(&category.name).to_string())
            .collect()
    }

    /// Subcategory names for one top-level category.
    ///
    /// Names are compared with ordinal prefixes stripped on both sides, so
    /// `"Vodoinstalacije"` and `"2. Vodoinstalacije"` select the same entry.
    pub fn subcategories_for(&self, category: &str) -> Vec<&str> {
        let wanted = strip_ordinal_prefix(category);
        self.categories
            .iter()
            .filter(|entry| entry.name == category || strip_ordinal_prefix(&entry.name) == wanted)
            .flat_map(|entry| entry.subcategories.iter().map(|sub| sub.name.as_str()))
            .collect()
    }

    /// Subcategory names for every given category, in input order.
    pub fn subcategories_for_all<'a, I>(&self, categories: I) -> Vec<&str>
    where
        I: IntoIterator<Item = &'a String>,
    {
        categories
            .into_iter()
            .flat_map(|category| self.subcategories_for(category))
            .collect()
    }

    /// Subcategory names of every taxonomy entry the given categories name.
    ///
    /// Walks the taxonomy in its own order and includes each entry at most
    /// once, however many times (or in how many spellings) it is listed.
    pub fn secondary_categories<'a, I>(&self, categories: I) -> Vec<&str>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let wanted: HashSet<&str> = categories
            .into_iter()
            .map(|category| strip_ordinal_prefix(category))
            .collect();
        self.categories
            .iter()
            .filter(|entry| wanted.contains(strip_ordinal_prefix(&entry.name)))
            .flat_map(|entry| entry.subcategories.iter().map(|sub| sub.name.as_str()))
            .collect()
    }
}

impl Default for CategoryTaxonomy {
    fn default() -> Self {
        Self::popravci()
    }
}

/// Strips a leading `"<number>."` ordinal and any whitespace after it.
///
/// Names without such a prefix are returned unchanged.
pub fn strip_ordinal_prefix(name: &str) -> &str {
    let digits = name.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return name;
    }
    match name[digits..].strip_prefix('.') {
        Some(rest) => rest.trim_start(),
        None => name,
    }
}
