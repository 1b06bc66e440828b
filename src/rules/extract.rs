use crate::{
    error::{RangeError, Result},
    learner::{DecisionPath, PathStep},
    tree::LeftRight,
    Sample,
};
use super::{
    expression::{Comparison, Expression},
    rule_set::{Rule, RuleSet},
};


/// Decode the decision paths of the selected rows of `sample`
/// into a rule set.
///
/// A branch the row passed to the left becomes `feature <= threshold`,
/// one it passed to the right becomes `feature >= threshold`.
/// Paths with the same text form collapse to one rule,
/// kept at its first occurrence.
pub fn extract_rules<T>(tree: &T, sample: &Sample, selection: &[bool])
    -> Result<RuleSet>
    where T: DecisionPath + ?Sized
{
    let n_sample = sample.shape().0;
    if selection.len() != n_sample {
        return Err(RangeError::InputShape(format!(
            "the selection has {} entries, but the sample has {} rows",
            selection.len(),
            n_sample,
        )));
    }

    let rule_set = selection.iter()
        .enumerate()
        .filter_map(|(row, &selected)| selected.then_some(row))
        .map(|row| path_to_rule(tree.decision_path(sample, row)))
        .collect::<RuleSet>();

    log::debug!(
        "extracted {} distinct rules from {} selected rows",
        rule_set.len(),
        selection.iter().filter(|&&s| s).count(),
    );
    Ok(rule_set)
}


fn path_to_rule(path: Vec<PathStep<'_>>) -> Rule {
    path.into_iter()
        .filter_map(|step| match step {
            PathStep::Branch { feature, threshold, direction, .. } => {
                let comparison = match direction {
                    LeftRight::Left => Comparison::LessEq,
                    LeftRight::Right => Comparison::GreaterEq,
                };
                Some(Expression::new(feature, comparison, threshold))
            },
            PathStep::Leaf { .. } => None,
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecisionTreeBuilder, TreeLearner};
    use polars::prelude::*;

    fn fit(x: Vec<f64>, selection: &[bool])
        -> (Sample, crate::DecisionTreeClassifier)
    {
        let data = DataFrame::new(vec![Series::new("x", x)]).unwrap();
        let sample = Sample::from_dataframe(&data, &["x"], selection)
            .unwrap();
        let tree = DecisionTreeBuilder::new().build()
            .fit(&sample, None)
            .unwrap();
        (sample, tree)
    }

    #[test]
    fn test_extract_box() {
        let x = (0..10).map(|i| i as f64).collect::<Vec<_>>();
        let selection = x.iter()
            .map(|&v| (3.0..=6.0).contains(&v))
            .collect::<Vec<_>>();
        let (sample, tree) = fit(x, &selection);

        let rules = extract_rules(&tree, &sample, &selection).unwrap();
        let exp = vec![vec!["x >= 2.5".to_string(), "x <= 6.5".to_string()]];
        assert_eq!(rules.to_strings(), exp);
    }

    #[test]
    fn test_extract_keeps_first_seen_order() {
        // Two separate selected blocks: rows 0..2 and rows 8..10.
        let x = (0..10).map(|i| i as f64).collect::<Vec<_>>();
        let selection = x.iter()
            .map(|&v| v < 2.0 || v >= 8.0)
            .collect::<Vec<_>>();
        let (sample, tree) = fit(x, &selection);

        let rules = extract_rules(&tree, &sample, &selection).unwrap();
        assert_eq!(rules.len(), 2);
        let first = &rules.rules()[0];
        assert_eq!(first.to_strings(), vec!["x <= 1.5".to_string()]);
    }

    #[test]
    fn test_extract_from_single_leaf() {
        let (sample, tree) = fit(vec![1.0, 2.0, 3.0], &[true; 3]);
        let rules = extract_rules(&tree, &sample, &[true; 3]).unwrap();
        assert_eq!(rules.len(), 1);
        assert!(rules.rules()[0].is_empty());
    }

    #[test]
    fn test_extract_without_selected_rows() {
        let (sample, tree) = fit(vec![1.0, 2.0, 3.0], &[false; 3]);
        let rules = extract_rules(&tree, &sample, &[false; 3]).unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn test_extract_rejects_length_mismatch() {
        let (sample, tree) = fit(vec![1.0, 2.0, 3.0], &[true, false, true]);
        let err = extract_rules(&tree, &sample, &[true]).unwrap_err();
        assert!(matches!(err, RangeError::InputShape(_)), "got {err:?}");
    }
}
