//! Translates a [`Doctrine`] weight vector into the [`Rule`] set a
//! [`RuleEngine`](autarch_rules::RuleEngine) compiles and runs. Compilation
//! is deterministic and infallible: every rule this crate emits is
//! well-formed by construction, so the only failure mode downstream is
//! [`autarch_rules::CompileError`] catching a duplicate name, which a
//! passing test suite here should never let through.

pub mod blocks;
pub mod builder;
pub mod cond;
pub mod priority;
pub mod queues;
pub mod roles;

use autarch_core::doctrine::Doctrine;
use autarch_core::role::RoleRegistry;
use autarch_rules::Rule;

/// Compile a doctrine into the full candidate rule set for
/// [`RuleEngine::swap`](autarch_rules::RuleEngine::swap). Blocks are
/// concatenated in priority order (core highest, recon lowest) though the
/// engine re-sorts by priority on compile regardless.
pub fn compile(doctrine: &Doctrine, registry: &RoleRegistry) -> Vec<Rule> {
    let mut rules = Vec::new();
    rules.extend(blocks::core::rules(doctrine, registry));
    rules.extend(blocks::support::rules(doctrine));
    rules.extend(blocks::economy::rules(doctrine));
    rules.extend(blocks::military::rules(doctrine));
    rules.extend(blocks::tech::rules(doctrine));
    rules.extend(blocks::defense::rules(doctrine));
    rules.extend(blocks::production::rules(doctrine));
    rules.extend(blocks::combat::rules(doctrine));
    rules.extend(blocks::micro::rules(doctrine));
    rules.extend(blocks::recon::rules(doctrine));
    rules
}
