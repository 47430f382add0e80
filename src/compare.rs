//! Set-based comparison of two loaded configurations.

use std::collections::BTreeSet;

use crate::loader::{RawConfig, RawValue};
use crate::normalize::Normalizer;

/// One compared `(section, key)` pair. Carries the raw values so reports
/// show what the source files actually said, not the canonical forms.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRecord {
    pub section: String,
    pub key: String,
    /// Raw value on the left side, `None` when the key is absent there
    pub left: Option<RawValue>,
    /// Raw value on the right side, `None` when the key is absent there
    pub right: Option<RawValue>,
}

/// The partition produced by [`compare`], ordered by `(section, key)`.
#[derive(Debug, Default)]
pub struct DiffReport {
    pub differences: Vec<ComparisonRecord>,
    pub matches: Vec<ComparisonRecord>,
}

impl DiffReport {
    pub fn has_differences(&self) -> bool {
        !self.differences.is_empty()
    }
}

/// Compare two configurations, partitioning the union of their
/// `(section, key)` pairs into differences and matches.
///
/// A key present on only one side is an unconditional difference; the
/// missing side is never normalized. Keys present on both sides compare by
/// canonical form.
pub fn compare(left: &RawConfig, right: &RawConfig, normalizer: &Normalizer) -> DiffReport {
    let mut report = DiffReport::default();

    let sections: BTreeSet<&String> = left
        .sections
        .keys()
        .chain(right.sections.keys())
        .collect();

    for section in sections {
        let left_keys = left.sections.get(section.as_str());
        let right_keys = right.sections.get(section.as_str());

        let keys: BTreeSet<&String> = left_keys
            .into_iter()
            .flat_map(|m| m.keys())
            .chain(right_keys.into_iter().flat_map(|m| m.keys()))
            .collect();

        for key in keys {
            let left_value = left_keys.and_then(|m| m.get(key.as_str()));
            let right_value = right_keys.and_then(|m| m.get(key.as_str()));

            let record = ComparisonRecord {
                section: section.to_string(),
                key: key.to_string(),
                left: left_value.cloned(),
                right: right_value.cloned(),
            };

            match (left_value, right_value) {
                (Some(l), Some(r)) => {
                    if normalizer.normalize(key, l) == normalizer.normalize(key, r) {
                        report.matches.push(record);
                    } else {
                        report.differences.push(record);
                    }
                }
                // One side missing: always a difference
                _ => report.differences.push(record),
            }
        }
    }

    report
}
