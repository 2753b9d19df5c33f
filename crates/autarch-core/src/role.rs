//! Logical role registry: maps a game-agnostic role name (e.g. "barracks")
//! to a production queue and the set of concrete, possibly faction-variant,
//! type codes that satisfy it.
//!
//! Adding a new unit or building for a new faction is a data change to the
//! registry, never a code change to the rule engine or doctrine compiler.

use std::collections::{HashMap, HashSet};

/// A single role's definition.
#[derive(Debug, Clone)]
pub struct RoleDef {
    pub queue: String,
    pub type_codes: HashSet<String>,
}

/// Static table of role name -> definition, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct RoleRegistry {
    roles: HashMap<String, RoleDef>,
}

/// True if a concrete type code satisfies a role's code, allowing the
/// "code.faction" convention: a code suffixed with `.faction` still matches
/// the bare code.
pub fn code_matches(candidate: &str, wanted: &str) -> bool {
    if candidate.eq_ignore_ascii_case(wanted) {
        return true;
    }
    match candidate.split_once('.') {
        Some((base, _faction)) => base.eq_ignore_ascii_case(wanted),
        None => false,
    }
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, role: &str, queue: &str, type_codes: impl IntoIterator<Item = String>) {
        self.roles.insert(
            role.to_ascii_lowercase(),
            RoleDef {
                queue: queue.to_string(),
                type_codes: type_codes.into_iter().collect(),
            },
        );
    }

    pub fn get(&self, role: &str) -> Option<&RoleDef> {
        self.roles.get(&role.to_ascii_lowercase())
    }

    /// True if `type_code` satisfies the named role (faction-variant aware).
    pub fn type_has_role(&self, type_code: &str, role: &str) -> bool {
        match self.get(role) {
            Some(def) => def
                .type_codes
                .iter()
                .any(|wanted| code_matches(type_code, wanted)),
            None => false,
        }
    }

    /// First concrete buildable type code for a role, preferring an exact
    /// match for `faction` when one exists (e.g. `"powr.ukraine"` over
    /// `"powr"`), then falling back to any faction-suffixed variant, then
    /// the bare code.
    pub fn buildable_type<'a>(
        &'a self,
        role: &str,
        faction: &str,
        buildable: &'a HashSet<String>,
    ) -> Option<&'a str> {
        let def = self.get(role)?;
        let faction_suffixed: Vec<&str> = def
            .type_codes
            .iter()
            .filter(|code| code.ends_with(&format!(".{faction}")))
            .map(|s| s.as_str())
            .collect();

        faction_suffixed
            .iter()
            .find(|code| buildable.contains(**code))
            .copied()
            .or_else(|| {
                def.type_codes
                    .iter()
                    .map(|s| s.as_str())
                    .find(|code| buildable.iter().any(|b| code_matches(b, code)))
            })
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.roles.keys().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faction_suffix_matches_bare_code() {
        assert!(code_matches("powr.ukraine", "powr"));
        assert!(code_matches("powr", "powr"));
        assert!(!code_matches("apwr", "powr"));
    }

    #[test]
    fn case_insensitive_match() {
        assert!(code_matches("POWR.ukraine", "powr"));
    }

    #[test]
    fn registry_round_trips_role_lookup() {
        let mut reg = RoleRegistry::new();
        reg.insert(
            "barracks",
            "Building",
            ["tent".to_string(), "barr".to_string()],
        );
        assert!(reg.type_has_role("barr.soviet", "barracks"));
        assert!(reg.type_has_role("BARR", "Barracks"));
        assert!(!reg.type_has_role("weap", "barracks"));
    }
}
