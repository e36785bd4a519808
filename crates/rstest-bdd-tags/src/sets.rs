//! Normalises and combines tag sets so scenario selection stays
//! deterministic regardless of tag ordering or raw tag formatting.
//!
//! A scenario is selected against the union of its feature, rule, and
//! scenario tags. Tags are compared without their leading `@`, so both
//! `@smoke` and `smoke` name the same tag.

use std::collections::HashSet;

/// Strip surrounding whitespace and one leading `@` from a raw tag.
///
/// # Examples
///
/// ```
/// use rstest_bdd_tags::normalise_tag;
/// assert_eq!(normalise_tag(" @smoke "), "smoke");
/// assert_eq!(normalise_tag("smoke"), "smoke");
/// ```
#[must_use]
pub fn normalise_tag(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_prefix('@').unwrap_or(trimmed)
}

/// Membership view over the tags of one candidate scenario.
///
/// Duplicates and ordering are irrelevant; every entry is stored in its
/// normalised form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagSet<'a> {
    tags: HashSet<&'a str>,
}

impl<'a> TagSet<'a> {
    /// Build a tag set, normalising each entry.
    #[must_use]
    pub fn new<I>(tags: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        tags.into_iter().collect()
    }

    /// Whether the exact tag is present. `tag` must already be normalised.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Iterate over the normalised tags in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.tags.iter().copied()
    }

    /// Number of distinct tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether no tags are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for TagSet<'a> {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            tags: iter
                .into_iter()
                .map(normalise_tag)
                .filter(|tag| !tag.is_empty())
                .collect(),
        }
    }
}

/// Extend the destination tag set with new values, preserving order and
/// removing duplicates.
///
/// Both `target` and `additions` may contain tags with a leading `@` or
/// repeated entries. Normalisation occurs in-place so callers do not need to
/// pre-sanitise their inputs.
pub fn extend_tag_set<I>(target: &mut Vec<String>, additions: I)
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    for tag in target.iter_mut() {
        let normalised = normalise_tag(tag).to_string();
        if normalised != *tag {
            *tag = normalised;
        }
    }

    let mut seen = HashSet::new();
    target.retain(|tag| !tag.is_empty() && seen.insert(tag.clone()));

    for tag in additions {
        let normalised = normalise_tag(tag.as_ref());
        if normalised.is_empty() {
            continue;
        }
        if seen.insert(normalised.to_string()) {
            target.push(normalised.to_string());
        }
    }
}

/// Merge two tag sets, preserving insertion order and de-duplicating values.
///
/// The returned collection never carries the leading `@` and omits
/// duplicates even if `base` or `additions` contain un-normalised values.
///
/// # Examples
///
/// ```
/// use rstest_bdd_tags::merge_tag_sets;
/// let feature = ["@fast", "slow"];
/// let scenario = ["@fast", "web"];
/// assert_eq!(merge_tag_sets(feature, scenario), ["fast", "slow", "web"]);
/// ```
#[must_use]
pub fn merge_tag_sets<B, A>(base: B, additions: A) -> Vec<String>
where
    B: IntoIterator,
    B::Item: AsRef<str>,
    A: IntoIterator,
    A::Item: AsRef<str>,
{
    let mut merged = Vec::new();
    extend_tag_set(&mut merged, base);
    extend_tag_set(&mut merged, additions);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_set_ignores_at_prefix_and_duplicates() {
        let set = TagSet::new(["@a", "a", "b"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("a"));
        assert!(set.contains("b"));
        assert!(!set.contains("@b"));
        assert!(!set.contains("c"));
    }

    #[test]
    fn tag_set_drops_blank_entries() {
        let set = TagSet::new(["", "@", "  "]);
        assert!(set.is_empty());
    }

    #[test]
    fn extend_normalises_existing_entries() {
        let mut target = vec!["@a".to_string(), "a".to_string(), "b".to_string()];
        extend_tag_set(&mut target, ["@c", "b"]);
        assert_eq!(target, ["a", "b", "c"]);
    }

    #[test]
    fn merge_keeps_feature_rule_scenario_order() {
        let feature_and_rule = merge_tag_sets(["@feature"], ["@rule", "@feature"]);
        let merged = merge_tag_sets(&feature_and_rule, ["scenario"]);
        assert_eq!(merged, ["feature", "rule", "scenario"]);
    }
}
