//! Variant clustering
//!
//! Groups detected strings into equivalence classes, one class per
//! real-world referent. Linkage is seed-only: a candidate joins a group
//! when it scores above the threshold against the group's first member,
//! never against later-added members. Transitive linkage would grow
//! chains of barely-similar strings into one giant group; seed-only
//! keeps groups anchored.
//!
//! Name clustering additionally runs an abbreviation post-merge that
//! absorbs short forms ("J. Doe") into their unique full form ("John
//! Doe"). Runtime is O(n^2) comparisons per category; detected variant
//! lists are small enough that this has never mattered.

use crate::core::normalize::{is_valid_name, normalize_name, normalize_number};
use crate::core::similarity;
use crate::domain::{EntityCategory, Grouping};

/// Groups detected strings of one category into variant clusters.
///
/// `threshold` overrides the category default when given. Verbatim
/// categories ignore it and map every string to its own cluster.
pub fn cluster_category(
    category: EntityCategory,
    strings: &[String],
    threshold: Option<f64>,
    denylist: &[String],
) -> Vec<Vec<String>> {
    let threshold = threshold
        .or_else(|| category.default_threshold())
        .unwrap_or(0.0);
    match category.grouping() {
        Grouping::NameVariants => cluster_name_variants(strings, threshold, denylist),
        Grouping::NumberVariants => cluster_number_variants(strings, threshold),
        Grouping::Verbatim => strings.iter().map(|s| vec![s.clone()]).collect(),
    }
}

/// Clusters person-name strings.
///
/// Strings failing [`is_valid_name`] are dropped before clustering, not
/// kept as singletons. After seed-linkage grouping the abbreviation
/// post-merge runs, so the returned order is post-merge order.
pub fn cluster_name_variants(
    names: &[String],
    threshold: f64,
    denylist: &[String],
) -> Vec<Vec<String>> {
    let valid: Vec<String> = names
        .iter()
        .filter(|name| is_valid_name(name, denylist))
        .cloned()
        .collect();
    let groups = seed_linkage(&valid, threshold, normalize_name);
    merge_abbreviations(groups)
}

/// Clusters numeric strings (phones, dates, ids, codes).
///
/// Same seed-linkage pass as names but over [`normalize_number`], with
/// no validity filter and no post-merge. Group order is first-seed
/// order over the input.
pub fn cluster_number_variants(numbers: &[String], threshold: f64) -> Vec<Vec<String>> {
    seed_linkage(numbers, threshold, normalize_number)
}

/// Seed-only single linkage over the input order.
///
/// The comparison is strictly greater-than: an item scoring exactly at
/// the threshold starts its own group.
fn seed_linkage(
    items: &[String],
    threshold: f64,
    normalize: fn(&str) -> String,
) -> Vec<Vec<String>> {
    let normalized: Vec<String> = items.iter().map(|item| normalize(item)).collect();
    let mut visited = vec![false; items.len()];
    let mut groups = Vec::new();

    for i in 0..items.len() {
        if visited[i] {
            continue;
        }
        visited[i] = true;
        let mut group = vec![items[i].clone()];
        for j in (i + 1)..items.len() {
            if visited[j] {
                continue;
            }
            if similarity::score(&normalized[i], &normalized[j]) > threshold {
                visited[j] = true;
                group.push(items[j].clone());
            }
        }
        groups.push(group);
    }
    groups
}

/// Absorbs abbreviation groups into their unique full-form group.
///
/// Groups are ordered by longest-member length descending (stable, so
/// equal-length groups keep their clustering order) and each is merged
/// into an earlier group exactly when its representative is a possible
/// variant of exactly one earlier representative. Two or more matches
/// are ambiguous and the group stays separate.
fn merge_abbreviations(groups: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let mut ordered = groups;
    ordered.sort_by(|a, b| {
        let len_a = longest_member(a).chars().count();
        let len_b = longest_member(b).chars().count();
        len_b.cmp(&len_a)
    });

    let mut merged: Vec<Vec<String>> = Vec::new();
    for group in ordered {
        let rep = longest_member(&group).to_string();
        let candidates: Vec<usize> = merged
            .iter()
            .enumerate()
            .filter(|(_, earlier)| is_possible_variant(&rep, longest_member(earlier)))
            .map(|(idx, _)| idx)
            .collect();
        if let [single] = candidates.as_slice() {
            merged[*single].extend(group);
        } else {
            merged.push(group);
        }
    }
    merged
}

/// The member with the most characters; ties go to the earlier member.
fn longest_member(group: &[String]) -> &str {
    group.iter().fold("", |best, item| {
        if item.chars().count() > best.chars().count() {
            item.as_str()
        } else {
            best
        }
    })
}

/// Whether `short` could be an abbreviated spelling of `long`.
///
/// `short` may not have more tokens than `long`, and every token of
/// `short` must match some token of `long` in order, either by
/// normalized equality or as an initial ("J." against "John").
fn is_possible_variant(short: &str, long: &str) -> bool {
    let short_tokens: Vec<&str> = short.split_whitespace().collect();
    let long_tokens: Vec<&str> = long.split_whitespace().collect();
    if short_tokens.is_empty() || short_tokens.len() > long_tokens.len() {
        return false;
    }

    let mut next = 0;
    'tokens: for token in &short_tokens {
        while next < long_tokens.len() {
            let candidate = long_tokens[next];
            next += 1;
            if token_matches(token, candidate) {
                continue 'tokens;
            }
        }
        return false;
    }
    true
}

/// Token-level match for the abbreviation test: normalized equality, or
/// an initial (trailing period, at most 4 characters, same first
/// normalized character as the candidate).
fn token_matches(token: &str, candidate: &str) -> bool {
    let token_norm = normalize_name(token);
    let candidate_norm = normalize_name(candidate);
    if token_norm == candidate_norm {
        return true;
    }
    token.ends_with('.')
        && token.chars().count() <= 4
        && token_norm.chars().next().is_some()
        && token_norm.chars().next() == candidate_norm.chars().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::normalize::default_name_denylist;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_spelling_variants_form_one_cluster() {
        let input = names(&["John Doe", "Jon Doe", "john doe"]);
        let clusters = cluster_name_variants(&input, 85.0, &default_name_denylist());
        assert_eq!(clusters, vec![names(&["John Doe", "Jon Doe", "john doe"])]);
    }

    #[test]
    fn test_dissimilar_names_stay_separate() {
        let input = names(&["John Doe", "Erik Hansen"]);
        let clusters = cluster_name_variants(&input, 85.0, &default_name_denylist());
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn test_invalid_names_are_dropped_not_singletons() {
        let input = names(&["12345"]);
        let clusters = cluster_name_variants(&input, 85.0, &default_name_denylist());
        assert!(clusters.is_empty());
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(cluster_name_variants(&[], 85.0, &default_name_denylist()).is_empty());
        assert!(cluster_number_variants(&[], 80.0).is_empty());
    }

    #[test]
    fn test_number_formatting_variants_group_together() {
        let input = names(&["1234567890", "1234567", "12 34 56 78"]);
        let clusters = cluster_number_variants(&input, 80.0);
        assert_eq!(
            clusters,
            vec![
                names(&["1234567890"]),
                names(&["1234567", "12 34 56 78"]),
            ]
        );
    }

    #[test]
    fn test_score_exactly_at_threshold_does_not_group() {
        // "1234567890" vs "12345678" scores 80; strictly greater-than
        // keeps them apart at threshold 80.
        let input = names(&["1234567890", "12345678"]);
        let clusters = cluster_number_variants(&input, 80.0);
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn test_linkage_is_seed_only() {
        // The third item scores 80 against the second but only 60
        // against the first seed, so it starts its own group instead of
        // chaining in through the second.
        let input = names(&["1111111111", "1111111122", "1111112222"]);
        let clusters = cluster_number_variants(&input, 75.0);
        assert_eq!(
            clusters,
            vec![
                names(&["1111111111", "1111111122"]),
                names(&["1111112222"]),
            ]
        );
    }

    #[test]
    fn test_abbreviation_merges_into_unique_full_form() {
        let input = names(&["John Doe", "J. Doe"]);
        let clusters = cluster_name_variants(&input, 85.0, &default_name_denylist());
        assert_eq!(clusters, vec![names(&["John Doe", "J. Doe"])]);
    }

    #[test]
    fn test_ambiguous_abbreviation_stays_separate() {
        let input = names(&["John Doe", "Jane Doe", "J. Doe"]);
        let clusters = cluster_name_variants(&input, 85.0, &default_name_denylist());
        assert_eq!(
            clusters,
            vec![
                names(&["John Doe"]),
                names(&["Jane Doe"]),
                names(&["J. Doe"]),
            ]
        );
    }

    #[test]
    fn test_initial_requires_trailing_period() {
        // "J Doe" has no period, so the initial rule does not apply.
        let input = names(&["John Doe", "J Doe"]);
        let clusters = cluster_name_variants(&input, 85.0, &default_name_denylist());
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn test_single_token_abbreviation_merges_into_longer_name() {
        let input = names(&["John Fitzgerald Doe", "Doe"]);
        let clusters = cluster_name_variants(&input, 85.0, &default_name_denylist());
        assert_eq!(clusters, vec![names(&["John Fitzgerald Doe", "Doe"])]);
    }

    #[test]
    fn test_merge_keeps_post_merge_order_for_ids() {
        // "Erik Hansen" seeds after "John Doe" but sorts first on
        // length; surviving order is the sorted order.
        let input = names(&["John Doe", "Erik Hansen", "J. Doe"]);
        let clusters = cluster_name_variants(&input, 85.0, &default_name_denylist());
        assert_eq!(
            clusters,
            vec![
                names(&["Erik Hansen"]),
                names(&["John Doe", "J. Doe"]),
            ]
        );
    }

    #[test]
    fn test_every_valid_item_lands_in_exactly_one_group() {
        let input = names(&[
            "John Doe",
            "Jon Doe",
            "Erik Hansen",
            "J. Doe",
            "Maria Garcia",
            "maria garcia",
        ]);
        let clusters = cluster_name_variants(&input, 85.0, &default_name_denylist());
        let mut flattened: Vec<String> = clusters.into_iter().flatten().collect();
        flattened.sort();
        let mut expected = input.clone();
        expected.sort();
        assert_eq!(flattened, expected);
    }

    #[test]
    fn test_clustering_is_deterministic() {
        let input = names(&["John Doe", "Jon Doe", "Erik Hansen", "J. Doe"]);
        let first = cluster_name_variants(&input, 85.0, &default_name_denylist());
        let second = cluster_name_variants(&input, 85.0, &default_name_denylist());
        assert_eq!(first, second);
    }

    #[test]
    fn test_cluster_category_verbatim_gives_singletons() {
        let input = names(&["a@b.com", "c@d.com", "a@b.com"]);
        let clusters = cluster_category(EntityCategory::Email, &input, None, &[]);
        assert_eq!(clusters.len(), 3);
        assert!(clusters.iter().all(|c| c.len() == 1));
    }

    #[test]
    fn test_cluster_category_uses_default_thresholds() {
        // At the date default of 95 these two stay apart; the phone
        // default of 80 would have grouped them.
        let input = names(&["01.02.2023", "01.03.2023"]);
        let as_dates = cluster_category(EntityCategory::DateNumber, &input, None, &[]);
        let as_phones = cluster_category(EntityCategory::PhoneNumber, &input, None, &[]);
        assert_eq!(as_dates.len(), 2);
        assert_eq!(as_phones.len(), 1);
    }

    #[test]
    fn test_cluster_category_threshold_override() {
        let input = names(&["01.02.2023", "01.03.2023"]);
        let clusters = cluster_category(EntityCategory::DateNumber, &input, Some(80.0), &[]);
        assert_eq!(clusters.len(), 1);
    }

    #[test]
    fn test_possible_variant_rejects_more_tokens_than_target() {
        assert!(!is_possible_variant("John Fitzgerald Doe", "John Doe"));
    }

    #[test]
    fn test_possible_variant_requires_in_order_match() {
        assert!(is_possible_variant("J. Doe", "John Fitzgerald Doe"));
        assert!(!is_possible_variant("Doe John", "John Doe"));
    }
}
