//! Guard-table behavior through the public submission API.

use std::sync::Arc;

use combat_core::behavior::BehaviorProfile;
use combat_core::stats::{BaseStats, ClassKind};
use combat_core::{
    CombatAction, Combatant, EnemySnapshot, EngineConfig, EngineError, EntityId, GameState,
    PlayerCommand, SkillId, TameOutcome, TamingOracle,
};
use combat_content::ContentCatalog;
use runtime::{ActionOutcome, CombatService, PlayerId, RuntimeError};

const P1: PlayerId = PlayerId(7);

struct NeverTame;

impl TamingOracle for NeverTame {
    fn attempt(&self, _player: &Combatant, _target: &Combatant) -> TameOutcome {
        TameOutcome::Resisted
    }
}

fn service() -> CombatService {
    CombatService::new(
        EngineConfig::default(),
        Arc::new(ContentCatalog::new()),
        Arc::new(NeverTame),
    )
}

fn adventurer() -> Combatant {
    Combatant::new(
        EntityId(1),
        "adventurer",
        ClassKind::Ranger,
        3,
        BaseStats::even(12),
    )
}

fn rat() -> EnemySnapshot {
    EnemySnapshot::new(
        Combatant::new(EntityId(50), "sewer rat", ClassKind::Rogue, 1, BaseStats::even(4)),
        BehaviorProfile::Passive,
    )
}

async fn transitioned(service: &CombatService, command: PlayerCommand) -> GameState {
    match service.submit_action(P1, command).await.unwrap() {
        ActionOutcome::Transitioned(state) => state,
        ActionOutcome::Round(report) => panic!("expected a transition, got round {report:?}"),
    }
}

#[tokio::test]
async fn menu_commands_move_between_idle_states() {
    let service = service();
    service.connect(P1, adventurer()).unwrap();

    assert_eq!(
        transitioned(&service, PlayerCommand::Rest).await,
        GameState::Resting
    );
    assert_eq!(
        transitioned(&service, PlayerCommand::Return).await,
        GameState::Idle
    );
    assert_eq!(
        transitioned(&service, PlayerCommand::CraftMenu).await,
        GameState::Crafting
    );
    assert_eq!(
        transitioned(&service, PlayerCommand::Return).await,
        GameState::Idle
    );
    assert_eq!(
        transitioned(&service, PlayerCommand::Explore).await,
        GameState::Exploring
    );
    // Reading the sheet never moves the state.
    assert_eq!(
        transitioned(&service, PlayerCommand::Status).await,
        GameState::Exploring
    );
}

#[tokio::test]
async fn menus_are_rejected_mid_combat() {
    let service = service();
    service.connect(P1, adventurer()).unwrap();
    service.start_combat(P1, rat()).await.unwrap();

    for command in [
        PlayerCommand::CraftMenu,
        PlayerCommand::Rest,
        PlayerCommand::ShopMenu,
        PlayerCommand::EnterDungeon,
        PlayerCommand::Explore,
    ] {
        let err = service.submit_action(P1, command).await.unwrap_err();
        assert!(
            matches!(
                err,
                RuntimeError::Engine(EngineError::ActionNotAllowed {
                    state: GameState::InCombat,
                    ..
                })
            ),
            "{command} should be rejected in combat, got {err}"
        );
    }

    // Combat actions remain legal.
    let outcome = service
        .submit_action(P1, PlayerCommand::Combat(CombatAction::Observe))
        .await
        .unwrap();
    assert!(matches!(outcome, ActionOutcome::Round(_)));
}

#[tokio::test]
async fn combat_actions_are_rejected_while_idle() {
    let service = service();
    service.connect(P1, adventurer()).unwrap();

    let err = service
        .submit_action(P1, PlayerCommand::Combat(CombatAction::PhysicalAttack))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Engine(EngineError::ActionNotAllowed {
            state: GameState::Idle,
            ..
        })
    ));

    let err = service.submit_action(P1, PlayerCommand::Tame).await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Engine(EngineError::ActionNotAllowed { .. })
    ));
}

#[tokio::test]
async fn unknown_skill_is_a_typed_error_not_a_round() {
    let service = service();
    service.connect(P1, adventurer()).unwrap();
    service.start_combat(P1, rat()).await.unwrap();

    let err = service
        .submit_action(P1, PlayerCommand::Combat(CombatAction::Skill(SkillId(404))))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Engine(EngineError::UnknownSkill(404))
    ));

    // The failed lookup committed nothing; the fight goes on.
    assert!(service.current_state(P1).await.unwrap().is_in_combat());
}

#[tokio::test]
async fn dungeon_advance_requires_the_dungeon() {
    let service = service();
    service.connect(P1, adventurer()).unwrap();

    let err = service
        .submit_action(P1, PlayerCommand::DungeonAdvance)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Engine(EngineError::ActionNotAllowed { .. })
    ));

    transitioned(&service, PlayerCommand::EnterDungeon).await;
    assert_eq!(
        transitioned(&service, PlayerCommand::DungeonAdvance).await,
        GameState::InDungeon
    );
}
