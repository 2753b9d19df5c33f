//! The doctrine vector: a bounded set of strategic weights produced by the
//! LLM advisor and consumed by the doctrine compiler.

use serde::{Deserialize, Serialize};

use crate::constants::{
    AIR_GROUP_MAX, AIR_GROUP_MIN, GROUND_GROUP_MAX, GROUND_GROUP_MIN, NAVAL_GROUP_MAX,
    NAVAL_GROUP_MIN,
};

/// A bounded vector of continuous strategic weights plus a few discrete
/// group-size preferences. `name`/`rationale` are carried for logging only
/// and never influence compiled behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctrine {
    pub economy: f32,
    pub aggression: f32,
    pub ground_defense: f32,
    pub air_defense: f32,
    pub tech: f32,
    pub infantry: f32,
    pub vehicle: f32,
    pub air: f32,
    pub naval: f32,
    pub specialist_infantry: f32,
    pub scout: f32,
    pub superweapon: f32,
    pub capture: f32,

    pub ground_group_size: u32,
    pub air_group_size: u32,
    pub naval_group_size: u32,

    pub name: String,
    pub rationale: String,
}

impl Default for Doctrine {
    fn default() -> Self {
        Self {
            economy: 0.5,
            aggression: 0.3,
            ground_defense: 0.3,
            air_defense: 0.2,
            tech: 0.2,
            infantry: 0.4,
            vehicle: 0.4,
            air: 0.1,
            naval: 0.0,
            specialist_infantry: 0.1,
            scout: 0.2,
            superweapon: 0.0,
            capture: 0.1,
            ground_group_size: 6,
            air_group_size: 3,
            naval_group_size: 3,
            name: "default".to_string(),
            rationale: "initial balanced posture".to_string(),
        }
    }
}

impl Doctrine {
    /// Clamp every weight into `[0,1]` and every group size into its
    /// documented range. Idempotent: `validate(validate(d)) == validate(d)`.
    pub fn validate(mut self) -> Self {
        self.economy = self.economy.clamp(0.0, 1.0);
        self.aggression = self.aggression.clamp(0.0, 1.0);
        self.ground_defense = self.ground_defense.clamp(0.0, 1.0);
        self.air_defense = self.air_defense.clamp(0.0, 1.0);
        self.tech = self.tech.clamp(0.0, 1.0);
        self.infantry = self.infantry.clamp(0.0, 1.0);
        self.vehicle = self.vehicle.clamp(0.0, 1.0);
        self.air = self.air.clamp(0.0, 1.0);
        self.naval = self.naval.clamp(0.0, 1.0);
        self.specialist_infantry = self.specialist_infantry.clamp(0.0, 1.0);
        self.scout = self.scout.clamp(0.0, 1.0);
        self.superweapon = self.superweapon.clamp(0.0, 1.0);
        self.capture = self.capture.clamp(0.0, 1.0);

        self.ground_group_size = self.ground_group_size.clamp(GROUND_GROUP_MIN, GROUND_GROUP_MAX);
        self.air_group_size = self.air_group_size.clamp(AIR_GROUP_MIN, AIR_GROUP_MAX);
        self.naval_group_size = self.naval_group_size.clamp(NAVAL_GROUP_MIN, NAVAL_GROUP_MAX);

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_clamps_out_of_range_weights() {
        let mut d = Doctrine::default();
        d.economy = 4.0;
        d.aggression = -2.0;
        d.ground_group_size = 999;
        d.air_group_size = 0;
        d.naval_group_size = 1;
        let v = d.validate();
        assert_eq!(v.economy, 1.0);
        assert_eq!(v.aggression, 0.0);
        assert_eq!(v.ground_group_size, GROUND_GROUP_MAX);
        assert_eq!(v.air_group_size, AIR_GROUP_MIN);
        assert_eq!(v.naval_group_size, NAVAL_GROUP_MIN);
    }

    #[test]
    fn validate_is_idempotent() {
        let d = Doctrine {
            economy: 1.7,
            ground_group_size: 2,
            ..Doctrine::default()
        };
        let once = d.validate();
        let twice = once.clone().validate();
        assert_eq!(once, twice);
    }

    #[test]
    fn default_doctrine_is_already_valid() {
        let d = Doctrine::default();
        assert_eq!(d.clone().validate(), d);
    }
}
