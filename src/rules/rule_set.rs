//! Conjunctions and disjunctions of threshold expressions.
use polars::prelude::*;
use serde::{Serialize, Serializer};

use std::collections::HashSet;
use std::fmt;

use crate::{
    constants::MASK_NAME,
    error::Result,
};
use super::expression::Expression;


/// A conjunction of expressions in root-to-leaf order.
/// An empty rule holds for every row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rule(Vec<Expression>);


impl Rule {
    /// Construct a rule from its expressions.
    pub fn new(expressions: Vec<Expression>) -> Self {
        Self(expressions)
    }


    /// Returns the expressions of this rule.
    pub fn expressions(&self) -> &[Expression] {
        &self.0[..]
    }


    /// Returns the number of expressions.
    pub fn len(&self) -> usize {
        self.0.len()
    }


    /// Returns `true` if the rule has no expression.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }


    /// Returns the text form of every expression.
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }


    /// AND the masks of the expressions of this rule.
    pub fn mask(&self, data: &DataFrame) -> Result<BooleanChunked> {
        let all = BooleanChunked::full(MASK_NAME, true, data.height());
        self.0.iter()
            .try_fold(all, |acc, expr| -> Result<BooleanChunked> {
                let mask = expr.mask(data)?;
                Ok(&acc & &mask)
            })
    }
}


impl FromIterator<Expression> for Rule {
    fn from_iter<I: IntoIterator<Item = Expression>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}


impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_strings().join(" AND ");
        write!(f, "({text})")
    }
}


impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S)
        -> std::result::Result<S::Ok, S::Error>
    {
        serializer.collect_seq(self.0.iter().map(ToString::to_string))
    }
}


/// A disjunction of distinct rules in first-seen order.
/// Two rules are the same if their text forms are.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
    seen: HashSet<Vec<String>>,
}


impl RuleSet {
    /// Construct an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }


    /// Append `rule` unless a rule with the same text form
    /// is already present.
    /// Returns `true` if the rule was appended.
    pub fn insert(&mut self, rule: Rule) -> bool {
        if !self.seen.insert(rule.to_strings()) { return false; }
        self.rules.push(rule);
        true
    }


    /// Returns the rules in first-seen order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules[..]
    }


    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }


    /// Returns `true` if the set has no rule.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }


    /// Iterate over the rules in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }


    /// Returns the text form of every rule.
    pub fn to_strings(&self) -> Vec<Vec<String>> {
        self.rules.iter().map(Rule::to_strings).collect()
    }
}


impl PartialEq for RuleSet {
    fn eq(&self, other: &Self) -> bool {
        self.rules == other.rules
    }
}


impl Eq for RuleSet {}


impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut set = Self::new();
        iter.into_iter()
            .for_each(|rule| { set.insert(rule); });
        set
    }
}


impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.rules.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" OR ");
        write!(f, "{text}")
    }
}


impl Serialize for RuleSet {
    fn serialize<S: Serializer>(&self, serializer: S)
        -> std::result::Result<S::Ok, S::Error>
    {
        serializer.collect_seq(self.rules.iter())
    }
}
