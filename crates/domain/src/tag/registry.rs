use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{PhoneNumber, TagName};
use crate::error::{DomainError, Result};

/// Result of adding candidates to a tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdditionReport {
    pub added: Vec<PhoneNumber>,
    pub duplicates: Vec<PhoneNumber>,
    pub invalid: Vec<String>,
    /// Members under the tag after the operation
    pub total: usize,
}

impl AdditionReport {
    pub fn changed(&self) -> bool {
        !self.added.is_empty()
    }
}

/// Result of removing candidates from an existing tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalReport {
    pub removed: Vec<PhoneNumber>,
    pub not_found: Vec<String>,
    /// Members left under the tag; zero means the tag was deleted
    pub remaining: usize,
}

impl RemovalReport {
    pub fn changed(&self) -> bool {
        !self.removed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameReport {
    pub old: TagName,
    pub new: TagName,
    pub count: usize,
}

/// Registry aggregate root: tag name -> ordered, duplicate-free members
///
/// Invariants:
/// - A tag present in the map always has at least one member
/// - Members under a tag are unique
/// - Keys are normalized `TagName`s, so lookups are case-insensitive
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    tags: BTreeMap<TagName, Vec<PhoneNumber>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tag: &TagName) -> Option<&[PhoneNumber]> {
        self.tags
            .get(tag)
            .filter(|members| !members.is_empty())
            .map(Vec::as_slice)
    }

    /// Find the tag a `tag<name>!` invocation refers to.
    ///
    /// An exact name wins; otherwise the first stored tag whose compacted name
    /// equals the requested one, so `tag2ndyears!` reaches "2nd years".
    pub fn resolve(&self, requested: &TagName) -> Option<(&TagName, &[PhoneNumber])> {
        if let Some((name, members)) = self.tags.get_key_value(requested) {
            return (!members.is_empty()).then_some((name, members.as_slice()));
        }

        let compact = requested.compact();
        self.tags
            .iter()
            .find(|(name, members)| !members.is_empty() && name.compact() == compact)
            .map(|(name, members)| (name, members.as_slice()))
    }

    pub fn contains(&self, tag: &TagName) -> bool {
        self.get(tag).is_some()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Tag names with their member counts, in name order
    pub fn summary(&self) -> Vec<(TagName, usize)> {
        self.tags
            .iter()
            .map(|(name, members)| (name.clone(), members.len()))
            .collect()
    }

    /// Add candidates to a tag, creating it when at least one is accepted
    pub fn add_members<S: AsRef<str>>(&mut self, tag: &TagName, candidates: &[S]) -> AdditionReport {
        let mut report = AdditionReport::default();

        let mut valid = Vec::new();
        for candidate in candidates.iter().map(|c| c.as_ref().trim()) {
            if candidate.is_empty() {
                continue;
            }
            match PhoneNumber::parse(candidate) {
                // Repeats inside one request collapse into a single candidate
                Ok(number) if valid.contains(&number) => {}
                Ok(number) => valid.push(number),
                Err(_) => report.invalid.push(candidate.to_string()),
            }
        }

        if !valid.is_empty() {
            let members = self.tags.entry(tag.clone()).or_default();
            for number in valid {
                if members.contains(&number) {
                    report.duplicates.push(number);
                } else {
                    members.push(number.clone());
                    report.added.push(number);
                }
            }
        }

        report.total = self.tags.get(tag).map_or(0, Vec::len);
        report
    }

    /// Remove candidates from a tag, deleting the tag once it is empty
    pub fn remove_members<S: AsRef<str>>(
        &mut self,
        tag: &TagName,
        candidates: &[S],
    ) -> Result<RemovalReport> {
        let members = match self.tags.get_mut(tag) {
            Some(members) if !members.is_empty() => members,
            _ => return Err(DomainError::TagNotFound(tag.to_string())),
        };

        let mut report = RemovalReport::default();
        let mut seen: Vec<&str> = Vec::new();
        for candidate in candidates.iter().map(|c| c.as_ref().trim()) {
            if candidate.is_empty() || seen.contains(&candidate) {
                continue;
            }
            seen.push(candidate);
            match members.iter().position(|m| m.as_str() == candidate) {
                Some(index) => report.removed.push(members.remove(index)),
                None => report.not_found.push(candidate.to_string()),
            }
        }

        report.remaining = members.len();
        if members.is_empty() {
            self.tags.remove(tag);
        }

        Ok(report)
    }

    /// Move a tag's members to a new name
    pub fn rename(&mut self, old: &TagName, new: &TagName) -> Result<RenameReport> {
        if !self.contains(old) {
            return Err(DomainError::TagNotFound(old.to_string()));
        }
        if old == new {
            return Err(DomainError::SameTagName(old.to_string()));
        }
        if self.contains(new) {
            return Err(DomainError::TagAlreadyExists(new.to_string()));
        }

        let members = self
            .tags
            .remove(old)
            .ok_or_else(|| DomainError::TagNotFound(old.to_string()))?;
        let count = members.len();
        self.tags.insert(new.clone(), members);

        Ok(RenameReport {
            old: old.clone(),
            new: new.clone(),
            count,
        })
    }

    /// Drop repeated members (e.g. from a hand-edited file), keeping first occurrences.
    /// Returns how many were dropped.
    pub fn dedupe_members(&mut self) -> usize {
        let mut dropped = 0;
        for members in self.tags.values_mut() {
            let before = members.len();
            let mut seen: Vec<PhoneNumber> = Vec::with_capacity(before);
            members.retain(|m| {
                if seen.contains(m) {
                    false
                } else {
                    seen.push(m.clone());
                    true
                }
            });
            dropped += before - members.len();
        }
        dropped
    }

    /// Drop entries that violate the non-empty invariant (e.g. from a hand-edited file)
    pub fn prune_empty(&mut self) -> usize {
        let before = self.tags.len();
        self.tags.retain(|_, members| !members.is_empty());
        before - self.tags.len()
    }
}
