//! The always-on core block: base upkeep that runs regardless of doctrine
//! weights. Most rules here are exclusive within `Category::Core` — at
//! most one of deploy/recover/place/capture/rebuild/scramble fires per
//! tick — except repair and harvester-return, which co-fire with whatever
//! wins.

use autarch_core::doctrine::Doctrine;
use autarch_core::memory::Domain;
use autarch_core::rule::Category;
use autarch_core::role::RoleRegistry;
use autarch_rules::Rule;

use crate::{cond, priority, queues, roles};

pub fn rules(_doctrine: &Doctrine, registry: &RoleRegistry) -> Vec<Rule> {
    let mut out = vec![
        crate::builder::rule(
            "core_deploy_mcv",
            priority::CORE_DEPLOY,
            Category::Core,
            true,
            "HasUnit(mcv)",
            cond::always(),
            autarch_actions::deploy_mcv(),
        ),
        crate::builder::rule(
            "core_recover_mcv",
            priority::CORE_RECOVER_MCV,
            Category::Core,
            true,
            "!HasRole(construction_yard) AND CanBuildRole(mcv_unit)",
            cond::and(cond::not(cond::has_role(roles::CONSTRUCTION_YARD)), cond::can_build_role(roles::MCV)),
            autarch_actions::produce_role(roles::MCV, 1),
        ),
        crate::builder::rule(
            "core_place_ready_building",
            priority::CORE_PLACE_BUILDING,
            Category::Core,
            true,
            "QueueReady(Building)",
            cond::queue_ready(queues::BUILDING),
            autarch_actions::place_ready_building(queues::BUILDING, false),
        ),
        crate::builder::rule(
            "core_place_ready_defense",
            priority::CORE_PLACE_DEFENSE,
            Category::Core,
            true,
            "QueueReady(Defense)",
            cond::queue_ready(queues::DEFENSE),
            autarch_actions::place_ready_building(queues::DEFENSE, true),
        ),
        crate::builder::rule(
            "core_cancel_stuck_aircraft",
            priority::CORE_CANCEL_STUCK_AIRCRAFT,
            Category::Core,
            true,
            "QueueReady(Aircraft) AND !CanBuildRole(aircraft)",
            cond::and(cond::queue_ready(queues::AIRCRAFT), cond::not(cond::can_build_role(roles::AIRCRAFT))),
            autarch_actions::cancel_stuck_production(queues::AIRCRAFT),
        ),
        crate::builder::rule(
            "core_capture_path",
            priority::CORE_CAPTURE,
            Category::Core,
            true,
            "HasCapturables()",
            cond::has_capturables(),
            autarch_actions::capture_action(),
        ),
        crate::builder::rule(
            "core_scramble_ground_defense",
            priority::CORE_SCRAMBLE_GROUND,
            Category::Core,
            true,
            "BaseUnderAttack()",
            cond::base_under_attack(),
            autarch_actions::scramble_defense(Domain::Ground),
        ),
        crate::builder::rule(
            "core_repair_damaged_buildings",
            priority::CORE_REPAIR_BUILDINGS,
            Category::Core,
            false,
            "HasDamagedBuildings()",
            cond::has_damaged_buildings(),
            autarch_actions::repair_damaged_buildings(),
        ),
        crate::builder::rule(
            "core_return_idle_harvesters",
            priority::CORE_RETURN_HARVESTERS,
            Category::Core,
            false,
            "HasIdleHarvesters()",
            cond::has_idle_harvesters(),
            autarch_actions::return_idle_harvesters(),
        ),
    ];

    if registry.get(roles::NAVAL_YARD).is_some() {
        out.push(crate::builder::rule(
            "core_scramble_naval_defense",
            priority::CORE_SCRAMBLE_NAVAL,
            Category::Core,
            true,
            "BaseUnderAttack() AND MapHasWater()",
            cond::and(cond::base_under_attack(), cond::map_has_water()),
            autarch_actions::scramble_defense(Domain::Naval),
        ));
    }

    for &role in roles::REBUILDABLE_BUILDING_ROLES {
        if registry.get(role).is_none() {
            continue;
        }
        out.push(crate::builder::rule(
            format!("core_rebuild_{role}"),
            priority::CORE_REBUILD_BASE,
            Category::Core,
            true,
            format!("LostRole({role})"),
            cond::lost_role(role),
            autarch_actions::produce_role(role, 1),
        ));
    }

    out
}
