//! Validated groups of numeric samples.
//!
//! A [`Dataset`] is the single input every analysis component reads. It is
//! built once from the ingested table and never mutated afterwards, so all
//! components invoked back-to-back observe the same snapshot.
//!
//! # Invariants
//!
//! - Group names are non-empty after trimming and unique
//! - Every group holds at least one sample
//! - Every sample is finite (no `NaN`, no infinities)
//! - Groups keep their insertion order, which is also the display order
//!
//! Groups may differ in length; only the correlation matrix requires equal
//! lengths and checks that itself.

use std::collections::HashSet;

use serde::Serialize;

use crate::{StatsError, descriptive};

/// A named sequence of samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    name: String,
    samples: Vec<f64>,
}

impl Group {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false` for groups owned by a [`Dataset`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// An ordered, immutable mapping from group name to samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    groups: Vec<Group>,
}

impl Dataset {
    /// Builds a dataset from `(name, samples)` pairs, validating every invariant.
    ///
    /// Names are trimmed before they are checked and stored.
    ///
    /// # Examples
    ///
    /// ```
    /// # use stratlab_stats::dataset::Dataset;
    /// let dataset = Dataset::new([(" a ", vec![1.0]), ("b", vec![2.0, 3.0])]).unwrap();
    /// assert_eq!(dataset.names().collect::<Vec<_>>(), ["a", "b"]);
    ///
    /// assert!(Dataset::new([("a", vec![1.0]), ("a", vec![2.0])]).is_err());
    /// assert!(Dataset::new([("a", vec![f64::NAN])]).is_err());
    /// ```
    pub fn new<I, S>(groups: I) -> Result<Self, StatsError>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut validated = vec![];
        for (index, (name, samples)) in groups.into_iter().enumerate() {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(StatsError::InvalidGroupName { index });
            }
            if !seen.insert(name.to_owned()) {
                return Err(StatsError::DuplicateGroup {
                    group: name.to_owned(),
                });
            }
            if samples.is_empty() {
                return Err(StatsError::EmptyInput {
                    group: Some(name.to_owned()),
                });
            }
            if let Some(index) = samples.iter().position(|v| !v.is_finite()) {
                return Err(StatsError::NonFiniteSample {
                    group: name.to_owned(),
                    index,
                });
            }
            validated.push(Group {
                name: name.to_owned(),
                samples,
            });
        }
        Ok(Self { groups: validated })
    }

    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.iter().map(Group::name)
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// All samples of all groups, group by group.
    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.groups.iter().flat_map(|g| g.samples.iter().copied())
    }

    #[must_use]
    pub fn total_samples(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Mean of every sample across all groups (the "critical mean").
    ///
    /// Returns `None` for a dataset without groups.
    #[must_use]
    pub fn grand_mean(&self) -> Option<f64> {
        let all = self.samples().collect::<Vec<_>>();
        descriptive::mean(&all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_insertion_order() {
        let dataset = Dataset::new([
            ("zeta", vec![1.0]),
            ("alpha", vec![2.0]),
            ("mid", vec![3.0]),
        ])
        .unwrap();
        assert_eq!(
            dataset.names().collect::<Vec<_>>(),
            ["zeta", "alpha", "mid"]
        );
        assert_eq!(dataset.get("alpha").unwrap().samples(), &[2.0]);
        assert!(dataset.get("missing").is_none());
    }

    #[test]
    fn test_rejects_blank_name() {
        let err = Dataset::new([("a", vec![1.0]), ("  ", vec![2.0])]).unwrap_err();
        assert_eq!(err, StatsError::InvalidGroupName { index: 1 });
    }

    #[test]
    fn test_rejects_duplicate_after_trim() {
        let err = Dataset::new([("a", vec![1.0]), ("a ", vec![2.0])]).unwrap_err();
        assert_eq!(
            err,
            StatsError::DuplicateGroup {
                group: "a".to_owned()
            }
        );
    }

    #[test]
    fn test_rejects_empty_group() {
        let err = Dataset::new([("a", vec![])]).unwrap_err();
        assert_eq!(
            err,
            StatsError::EmptyInput {
                group: Some("a".to_owned())
            }
        );
    }

    #[test]
    fn test_rejects_non_finite() {
        let err = Dataset::new([("a", vec![1.0, f64::INFINITY])]).unwrap_err();
        assert_eq!(
            err,
            StatsError::NonFiniteSample {
                group: "a".to_owned(),
                index: 1
            }
        );
    }

    #[test]
    fn test_grand_mean() {
        let dataset = Dataset::new([("a", vec![1.0, 2.0, 3.0]), ("b", vec![10.0])]).unwrap();
        assert_eq!(dataset.total_samples(), 4);
        assert_eq!(dataset.grand_mean(), Some(4.0));
        assert_eq!(Dataset::default().grand_mean(), None);
    }
}
