use std::collections::HashSet;

use crate::error::CompileError;
use crate::rule::Rule;

/// A compiled, priority-ordered program. Construction is the only place
/// that validates a candidate rule list; once built, evaluation never
/// fails to make progress through the list.
pub struct RuleSet {
    /// Sorted descending by priority.
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Validate and sort `rules` into a ready-to-evaluate program.
    pub fn compile(mut rules: Vec<Rule>) -> Result<Self, CompileError> {
        if rules.is_empty() {
            return Err(CompileError::Empty);
        }
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.name.clone()) {
                return Err(CompileError::DuplicateName(rule.name.clone()));
            }
        }
        rules.sort_by(|a, b| b.priority.cmp(&a.priority));
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActionContext, ActionError};
    use autarch_core::rule::Category;
    use autarch_core::wire::OutboundCommand;
    use std::sync::Arc;

    fn dummy_rule(name: &str, priority: i32) -> Rule {
        Rule {
            name: name.to_string(),
            priority,
            category: Category::Core,
            exclusive: false,
            condition_source: "always true".to_string(),
            condition: Arc::new(|_env| true),
            action: Arc::new(|_ctx: &mut ActionContext| -> Result<Vec<OutboundCommand>, ActionError> {
                Ok(vec![])
            }),
        }
    }

    #[test]
    fn compile_sorts_by_descending_priority() {
        let rules = vec![dummy_rule("low", 1), dummy_rule("high", 100)];
        let set = RuleSet::compile(rules).unwrap();
        assert_eq!(set.rules()[0].name, "high");
        assert_eq!(set.rules()[1].name, "low");
    }

    #[test]
    fn compile_rejects_empty_rule_list() {
        assert!(matches!(RuleSet::compile(vec![]), Err(CompileError::Empty)));
    }

    #[test]
    fn compile_rejects_duplicate_names() {
        let rules = vec![dummy_rule("same", 1), dummy_rule("same", 2)];
        assert!(matches!(
            RuleSet::compile(rules),
            Err(CompileError::DuplicateName(_))
        ));
    }
}
