//! Term-against-field matching.

/// Shortest term prefix (in characters) considered for fuzzy matching.
pub const MIN_PREFIX_CHARS: usize = 3;

/// How a term matched a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMatch {
    /// The field contains the whole term.
    Exact,
    /// The field contains a prefix of the term of at least [`MIN_PREFIX_CHARS`].
    Prefix,
}

/// Matches a lowercased term against a lowercased field.
///
/// Exact containment wins over a prefix match. Empty fields never match.
pub fn match_field(term: &str, field: &str) -> Option<FieldMatch> {
    if term.is_empty() || field.is_empty() {
        return None;
    }
    if field.contains(term) {
        return Some(FieldMatch::Exact);
    }
    // Every longer prefix contains the shortest one, so testing it alone
    // decides whether any prefix of length MIN_PREFIX_CHARS..=len matches.
    let prefix = shortest_prefix(term)?;
    field.contains(prefix).then_some(FieldMatch::Prefix)
}

fn shortest_prefix(term: &str) -> Option<&str> {
    if term.chars().count() < MIN_PREFIX_CHARS {
        return None;
    }
    let end = term
        .char_indices()
        .nth(MIN_PREFIX_CHARS)
        .map_or(term.len(), |(index, _)| index);
    Some(&term[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_substring_matches() {
        assert_eq!(match_field("ivan", "ivan horvat"), Some(FieldMatch::Exact));
        assert_eq!(match_field("hor", "ivan horvat"), Some(FieldMatch::Exact));
    }

    #[test]
    fn prefix_matches_need_three_characters() {
        assert_eq!(match_field("vodoinstalater", "vodoinstalacije"), Some(FieldMatch::Prefix));
        assert_eq!(match_field("zagrebački", "zagreb"), Some(FieldMatch::Prefix));
        assert_eq!(match_field("ix", "ivan"), None);
        assert_eq!(match_field("ivx", "ivan"), None);
    }

    #[test]
    fn prefix_counts_characters_not_bytes() {
        // "čiš" is three characters but six bytes.
        assert_eq!(match_field("čišćenje", "čiš"), Some(FieldMatch::Prefix));
        assert_eq!(match_field("čišćenje", "či"), None);
    }

    #[test]
    fn name_without_shared_prefix_does_not_match() {
        assert_eq!(match_field("ivan", "marko ivić"), None);
    }

    #[test]
    fn empty_inputs_never_match() {
        assert_eq!(match_field("ivan", ""), None);
        assert_eq!(match_field("", "ivan"), None);
    }
}
