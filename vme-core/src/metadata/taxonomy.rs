//! Tag taxonomy: the fixed, ordered catalog of tag groups.
//!
//! Group order and key order within a group define the order of tags in
//! [`MovieInfo`](super::MovieInfo) and in the console report. A key belongs to
//! at most one group. The canonical table is checked for overlaps at compile
//! time; custom tables are checked by [`Taxonomy::new`].

use crate::error::{CoreError, CoreResult};

/// A named group of raw tag keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagGroup {
    pub name: &'static str,
    pub keys: &'static [&'static str],
}

impl TagGroup {
    pub const fn new(name: &'static str, keys: &'static [&'static str]) -> Self {
        Self { name, keys }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(&key)
    }
}

/// The canonical taxonomy used for every extraction.
pub const CANONICAL_GROUPS: &[TagGroup] = &[
    TagGroup::new("Temporal Information", &["creation_time", "date", "year"]),
    TagGroup::new(
        "Content Information",
        &["title", "description", "synopsis", "comment", "copyright"],
    ),
    TagGroup::new(
        "Creator Information",
        &["artist", "album_artist", "composer", "author", "director", "producer"],
    ),
    TagGroup::new(
        "Categorization",
        &[
            "genre",
            "album",
            "show",
            "episode_id",
            "network",
            "season_number",
            "episode_sort",
        ],
    ),
    TagGroup::new(
        "Technical Information",
        &[
            "encoder",
            "encoder_version",
            "compatible_brands",
            "major_brand",
            "minor_version",
        ],
    ),
    TagGroup::new("Location and Language", &["location", "language", "country"]),
    TagGroup::new(
        "Media Information",
        &["media_type", "rating", "purchase_date", "sort_name", "artwork_url"],
    ),
    TagGroup::new(
        "Distribution",
        &["publisher", "publisher_id", "content_id", "isrc"],
    ),
];

const _: () = assert!(
    !has_overlap(CANONICAL_GROUPS),
    "canonical tag taxonomy lists a key in more than one group"
);

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// True when any key appears twice anywhere in `groups`.
const fn has_overlap(groups: &[TagGroup]) -> bool {
    let mut g = 0;
    while g < groups.len() {
        let mut k = 0;
        while k < groups[g].keys.len() {
            let key = groups[g].keys[k];
            // Compare against every later position, same group included.
            let mut g2 = g;
            while g2 < groups.len() {
                let mut k2 = if g2 == g { k + 1 } else { 0 };
                while k2 < groups[g2].keys.len() {
                    if str_eq(key, groups[g2].keys[k2]) {
                        return true;
                    }
                    k2 += 1;
                }
                g2 += 1;
            }
            k += 1;
        }
        g += 1;
    }
    false
}

/// An ordered, overlap-free list of tag groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Taxonomy<'a> {
    groups: &'a [TagGroup],
}

impl Taxonomy<'static> {
    pub const fn canonical() -> Self {
        Self {
            groups: CANONICAL_GROUPS,
        }
    }
}

impl Default for Taxonomy<'static> {
    fn default() -> Self {
        Self::canonical()
    }
}

impl<'a> Taxonomy<'a> {
    /// Builds a taxonomy, rejecting any key claimed by two groups (or twice by one).
    pub fn new(groups: &'a [TagGroup]) -> CoreResult<Self> {
        let mut seen: Vec<(&str, &str)> = Vec::new();
        for group in groups {
            for key in group.keys {
                if let Some((_, first)) = seen.iter().find(|(k, _)| k == key) {
                    return Err(CoreError::TaxonomyOverlap {
                        key: (*key).to_string(),
                        first: (*first).to_string(),
                        second: group.name.to_string(),
                    });
                }
                seen.push((key, group.name));
            }
        }
        Ok(Self { groups })
    }

    pub fn groups(&self) -> &'a [TagGroup] {
        self.groups
    }

    /// Returns the group that claims `key`, if any.
    pub fn group_of(&self, key: &str) -> Option<&'a TagGroup> {
        self.groups.iter().find(|group| group.contains(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.group_of(key).is_some()
    }

    /// Every recognized key, group by group, in declared order.
    pub fn keys(self) -> impl Iterator<Item = &'static str> + 'a {
        self.groups.iter().flat_map(|group| group.keys.iter().copied())
    }
}
