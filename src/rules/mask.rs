//! Turns a rule set back into the membership it implies.
use polars::prelude::*;
use serde::{Serialize, Deserialize};

use crate::error::{RangeError, Result};
use super::{
    expression::Expression,
    rule_set::{Rule, RuleSet},
};


/// Which threshold a rule is evaluated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThresholdEvaluation {
    /// The threshold as the tree found it.
    #[default]
    Exact,
    /// The two-decimal threshold shown in the text form.
    Rounded,
}


/// OR the masks of the rules in `rule_set`.
///
/// Returns [`RangeError::EmptyRuleSet`] if `rule_set` has no rule.
pub fn build_mask(
    data: &DataFrame,
    rule_set: &RuleSet,
    evaluation: ThresholdEvaluation,
) -> Result<BooleanChunked>
{
    match evaluation {
        ThresholdEvaluation::Exact => union(data, rule_set.iter()),
        ThresholdEvaluation::Rounded => {
            build_mask_from_text(data, &rule_set.to_strings())
        },
    }
}


/// Parse every textual rule and OR their masks.
/// The expressions of one rule are AND-ed.
pub fn build_mask_from_text<S>(data: &DataFrame, rules: &[Vec<S>])
    -> Result<BooleanChunked>
    where S: AsRef<str>
{
    let rules = rules.iter()
        .map(|rule| {
            rule.iter()
                .map(|text| text.as_ref().parse::<Expression>())
                .collect::<Result<Rule>>()
        })
        .collect::<Result<Vec<_>>>()?;

    union(data, rules.iter())
}


fn union<'a, I>(data: &DataFrame, rules: I) -> Result<BooleanChunked>
    where I: Iterator<Item = &'a Rule>
{
    let mut mask: Option<BooleanChunked> = None;
    for rule in rules {
        let rule_mask = rule.mask(data)?;
        mask = Some(match mask {
            Some(acc) => &acc | &rule_mask,
            None => rule_mask,
        });
    }
    mask.ok_or(RangeError::EmptyRuleSet)
}
