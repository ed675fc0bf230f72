use crate::resolve::ResolvedItem;

/// Narrows items to the ones a symbol pattern most likely means.
///
/// Algorithm:
/// 1. Find all items whose qualified name ends with the pattern (suffix match)
/// 2. If exactly 1 suffix match found -> return it
/// 3. Otherwise, find all items whose qualified name contains the pattern
/// 4. If exactly 1 substring match found -> return it
/// 5. Otherwise -> return all matches found (for list display)
///
/// A suffix only counts when it starts at a `::` boundary, so `new` does not
/// match `renew`.
pub fn match_items<'a>(items: Vec<ResolvedItem<'a>>, pattern: &str) -> Vec<ResolvedItem<'a>> {
    if pattern.is_empty() {
        return items;
    }

    let suffix_matches: Vec<ResolvedItem<'a>> = items
        .iter()
        .filter(|item| ends_with_segments(&item.qualified_name(), pattern))
        .copied()
        .collect();

    if suffix_matches.len() == 1 {
        return suffix_matches;
    }

    let substring_matches: Vec<ResolvedItem<'a>> = items
        .into_iter()
        .filter(|item| item.qualified_name().contains(pattern))
        .collect();

    if substring_matches.len() == 1 {
        return substring_matches;
    }

    if suffix_matches.len() > 1 {
        suffix_matches
    } else {
        substring_matches
    }
}

fn ends_with_segments(qualified: &str, pattern: &str) -> bool {
    qualified == pattern
        || qualified
            .strip_suffix(pattern)
            .is_some_and(|head| head.ends_with("::"))
}
