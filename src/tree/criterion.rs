//! Split-quality evaluation for growing the tree.
use rayon::prelude::*;

use std::cmp::Ordering;

use crate::dataset::{Attribute, AttributeKind, Dataset};
use super::split_rule::SplitRule;


/// Returns the Gini impurity `1 - Σ p²` of the given class counts.
#[inline]
pub(crate) fn gini_impurity(counts: &[usize]) -> f64 {
    let total = counts.iter().sum::<usize>();
    if total == 0 { return 0.0; }

    let total = total as f64;
    let correct = counts.iter()
        .map(|&c| (c as f64 / total).powi(2))
        .sum::<f64>();

    (1.0 - correct).max(0.0)
}


/// A scored candidate split.
/// `score` is the weighted impurity of the two partitions.
pub(super) struct Candidate {
    pub(super) score: f64,
    pub(super) attribute: usize,
    pub(super) rule: SplitRule,
}


/// Returns the candidate split minimizing the weighted Gini impurity
/// over all attributes, or `None` when no attribute admits a split
/// with two non-empty partitions.
///
/// Ties are broken by the lowest attribute index in declaration order,
/// then by the lowest threshold/category;
/// the reduction below is a total order,
/// so the parallel fan-out cannot change the winner.
pub(super) fn best_split(
    data: &Dataset,
    codes: &[usize],
    indices: &[usize],
    n_classes: usize,
) -> Option<Candidate>
{
    data.attributes()
        .par_iter()
        .enumerate()
        .filter_map(|(k, attribute)| {
            best_for_attribute(attribute, codes, indices, n_classes)
                .map(|(score, rule)| Candidate { score, attribute: k, rule })
        })
        .min_by(cmp_candidates)
}


#[inline]
fn cmp_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    a.score.total_cmp(&b.score)
        .then(a.attribute.cmp(&b.attribute))
}


/// The best candidate on a single attribute.
/// An attribute with a missing value among `indices`
/// admits no candidate at this node.
fn best_for_attribute(
    attribute: &Attribute,
    codes: &[usize],
    indices: &[usize],
    n_classes: usize,
) -> Option<(f64, SplitRule)>
{
    match attribute.kind() {
        AttributeKind::Nominal
            => best_membership(attribute, codes, indices, n_classes),
        _ => best_threshold(attribute, codes, indices, n_classes),
    }
}


/// Scan the midpoints between consecutive distinct sorted values.
/// Iterating in ascending order and updating on strict improvement
/// keeps the lowest threshold among ties.
fn best_threshold(
    attribute: &Attribute,
    codes: &[usize],
    indices: &[usize],
    n_classes: usize,
) -> Option<(f64, SplitRule)>
{
    let n = indices.len();
    if n < 2 { return None; }

    let mut sorted = Vec::with_capacity(n);
    for &i in indices {
        let value = attribute.ordered_value(i)?;
        sorted.push((value, codes[i]));
    }
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut left = vec![0_usize; n_classes];
    let mut right = vec![0_usize; n_classes];
    for &(_, y) in &sorted {
        right[y] += 1;
    }

    let mut best: Option<(f64, f64)> = None;

    for i in 0..n - 1 {
        let (value, y) = sorted[i];
        left[y] += 1;
        right[y] -= 1;

        // No boundary between equal values.
        let next = sorted[i + 1].0;
        if value == next { continue; }

        let lp = (i + 1) as f64 / n as f64;
        let rp = (1.0 - lp).max(0.0);
        let score = lp * gini_impurity(&left) + rp * gini_impurity(&right);

        if best.map_or(true, |(s, _)| score < s) {
            best = Some((score, 0.5 * (value + next)));
        }
    }

    best.map(|(score, threshold)| (score, SplitRule::Threshold(threshold)))
}


/// Scan the singleton membership sets, one per observed category,
/// in ascending category order.
/// A category covering the whole node would leave an empty partition
/// and is excluded.
fn best_membership(
    attribute: &Attribute,
    codes: &[usize],
    indices: &[usize],
    n_classes: usize,
) -> Option<(f64, SplitRule)>
{
    let categories = attribute.categories()?;
    let n = indices.len();
    if n < 2 { return None; }

    let mut table = vec![vec![0_usize; n_classes]; categories.len()];
    let mut sizes = vec![0_usize; categories.len()];
    let mut total = vec![0_usize; n_classes];

    for &i in indices {
        let c = attribute.code(i)?;
        table[c][codes[i]] += 1;
        sizes[c] += 1;
        total[codes[i]] += 1;
    }

    let mut best: Option<(f64, usize)> = None;

    for (c, counts) in table.iter().enumerate() {
        let n_left = sizes[c];
        if n_left == 0 || n_left == n { continue; }

        let right = total.iter()
            .zip(counts)
            .map(|(t, l)| t - l)
            .collect::<Vec<_>>();

        let lp = n_left as f64 / n as f64;
        let rp = (1.0 - lp).max(0.0);
        let score = lp * gini_impurity(counts) + rp * gini_impurity(&right);

        if best.map_or(true, |(s, _)| score < s) {
            best = Some((score, c));
        }
    }

    best.map(|(score, c)| {
        let members = vec![categories[c].clone()];
        (score, SplitRule::Membership(members))
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gini_of_balanced_counts() {
        assert_eq!(gini_impurity(&[2, 2]), 0.5);
        assert_eq!(gini_impurity(&[1, 1, 1, 1]), 0.75);
    }

    #[test]
    fn gini_of_pure_counts() {
        assert_eq!(gini_impurity(&[4, 0]), 0.0);
        assert_eq!(gini_impurity(&[]), 0.0);
    }

    #[test]
    fn ties_go_to_the_first_attribute() {
        // Both columns separate the classes perfectly.
        let a = Attribute::numeric("a", [0.0, 0.0, 1.0, 1.0]);
        let b = Attribute::numeric("b", [5.0, 5.0, 9.0, 9.0]);
        let data = Dataset::from_attributes(vec![a, b]).unwrap();
        let codes = [0, 0, 1, 1];
        let indices = [0, 1, 2, 3];

        let candidate = best_split(&data, &codes, &indices, 2).unwrap();
        assert_eq!(candidate.attribute, 0);
        assert_eq!(candidate.score, 0.0);
    }

    #[test]
    fn ties_go_to_the_lowest_threshold() {
        // Thresholds 0.5 and 2.5 score the same; 1.5 is worse.
        let a = Attribute::numeric("a", [0.0, 1.0, 2.0, 3.0]);
        let data = Dataset::from_attributes(vec![a]).unwrap();
        let codes = [0, 1, 0, 1];
        let indices = [0, 1, 2, 3];

        let candidate = best_split(&data, &codes, &indices, 2).unwrap();
        assert_eq!(candidate.rule, SplitRule::Threshold(0.5));
    }

    #[test]
    fn missing_value_blocks_the_attribute() {
        let a = Attribute::numeric_with_gaps(
            "a", vec![Some(0.0), None, Some(1.0), Some(1.0)],
        );
        let data = Dataset::from_attributes(vec![a]).unwrap();
        let codes = [0, 0, 1, 1];
        let indices = [0, 1, 2, 3];

        assert!(best_split(&data, &codes, &indices, 2).is_none());
    }

    #[test]
    fn constant_attribute_admits_no_candidate() {
        let a = Attribute::numeric("a", [7.0, 7.0, 7.0]);
        let data = Dataset::from_attributes(vec![a]).unwrap();
        let codes = [0, 1, 0];
        let indices = [0, 1, 2];

        assert!(best_split(&data, &codes, &indices, 2).is_none());
    }
}
