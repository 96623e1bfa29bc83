//! Rules-level tests against the public engine API
//!
//! Matches are assembled from hand-built players so every scenario starts
//! from a known board.

use kukulcan_engine::core::{
    Card, CardInstance, CardKind, EntityId, PlayerState, RitualKind, Seat, STARTING_HP,
};
use kukulcan_engine::game::{
    ActionOutcome, AttackSource, GameAction, GameState, MatchConfig, MatchPhase, Rejection,
    Target,
};
use kukulcan_engine::zones::Zone;

fn common(id: u32, name: &str, attack: i32, health: i32) -> Card {
    Card::new(EntityId::new(id), name, CardKind::Common).with_stats(attack, health)
}

fn ritual(id: u32, kind: RitualKind) -> Card {
    Card::new(EntityId::new(id), format!("Ritual {id}"), CardKind::Ritual).with_ritual(kind)
}

fn instance(id: u32, card: Card) -> CardInstance {
    CardInstance::new(EntityId::new(id), card)
}

fn game(p1: PlayerState, p2: PlayerState) -> GameState {
    GameState::from_players(p1, p2, MatchConfig::default().with_seed(3))
}

#[test]
fn test_sacrifice_scenario() {
    let mut p1 = PlayerState::new("Ana");
    p1.hand = vec![common(0, "Frightened Villager", 1, 1)];
    let mut game = game(p1, PlayerState::new("Ixchel"));

    assert_eq!(game.sacrifice_common(0), Ok(ActionOutcome::Applied));

    let ana = game.player(Seat::One);
    assert_eq!(ana.blood, 1);
    assert!(ana.hand.is_empty());
    assert_eq!(ana.discard.len(), 1);
    assert_eq!(ana.discard[0].id, EntityId::new(0));
    let slot = ana.sacrifice_slot.as_ref().unwrap();
    assert_eq!(slot.base.name, "Frightened Villager");
    assert_eq!(slot.current_hp, 1);
    assert_eq!(ana.locate(EntityId::new(0)), Some(Zone::SacrificeSlot));
}

#[test]
fn test_sacrifice_yield_consumes_any_bonus() {
    for bonus in [0, 1, 4] {
        let mut p1 = PlayerState::new("Ana");
        p1.hand = vec![common(0, "Villager", 1, 1)];
        p1.blood = 2;
        p1.pending_bonus_blood = bonus;
        let mut game = game(p1, PlayerState::new("Ixchel"));

        game.sacrifice_common(0).unwrap();

        let ana = game.player(Seat::One);
        assert_eq!(ana.blood, 2 + 1 + bonus);
        assert_eq!(ana.pending_bonus_blood, 0);
    }
}

#[test]
fn test_end_turn_clears_unused_bonus_and_keeps_blood() {
    let mut p1 = PlayerState::new("Ana");
    p1.hand = vec![ritual(0, RitualKind::BloodBonus)];
    p1.blood = 3;
    let mut p2 = PlayerState::new("Ixchel");
    p2.blood = 5;
    let mut game = game(p1, p2);

    game.play_ritual(0, None).unwrap();
    assert_eq!(game.player(Seat::One).pending_bonus_blood, 1);

    for _ in 0..5 {
        game.end_turn().unwrap();
    }

    assert_eq!(game.player(Seat::One).pending_bonus_blood, 0);
    assert_eq!(game.player(Seat::One).blood, 3);
    assert_eq!(game.player(Seat::Two).blood, 5);
    assert_eq!(game.active_seat(), Seat::Two);
    assert_eq!(game.turn_number(), 6);
}

#[test]
fn test_attack_into_empty_lane_hits_player_without_retaliation() {
    let mut p1 = PlayerState::new("Ana");
    p1.board.place(0, instance(10, common(0, "Wounded Warrior", 2, 3)));
    let p2 = PlayerState::new("Ixchel");
    let hp_before = p2.hp;
    let mut game = game(p1, p2);

    let outcome = game.attack(AttackSource::Board(0), Target::BoardSlot(0));

    assert_eq!(outcome, Ok(ActionOutcome::Applied));
    assert_eq!(game.player(Seat::Two).hp, hp_before - 2);
    let warrior = game.player(Seat::One).board.get(0).unwrap();
    assert_eq!(warrior.id, EntityId::new(10));
    assert_eq!(warrior.current_hp, 3);
    assert_eq!(warrior.current_attack, 2);
}

#[test]
fn test_clash_is_simultaneous_and_dead_attackers_stay_dead() {
    let mut p1 = PlayerState::new("Ana");
    p1.board.place(1, instance(10, common(0, "Young Hunter", 2, 1)));
    let mut p2 = PlayerState::new("Ixchel");
    p2.board.place(1, instance(11, common(1, "Captive Prisoner", 1, 3)));
    let mut game = game(p1, p2);

    game.attack(AttackSource::Board(1), Target::BoardSlot(1)).unwrap();

    let ana = game.player(Seat::One);
    assert!(ana.board.get(1).is_none());
    assert_eq!(ana.discard.len(), 1);
    let prisoner = game.player(Seat::Two).board.get(1).unwrap();
    assert_eq!(prisoner.current_hp, 1);
    assert_eq!(game.player(Seat::Two).hp, STARTING_HP);
}

#[test]
fn test_clash_against_god_writes_survivor_back() {
    let mut p1 = PlayerState::new("Ana");
    p1.board.place(0, instance(10, common(0, "Clumsy Archer", 2, 2)));
    let mut p2 = PlayerState::new("Ixchel");
    let chaac = Card::new(EntityId::new(1), "Chaac", CardKind::God)
        .with_stats(6, 7)
        .with_blood_cost(7);
    p2.god_slot = Some(instance(11, chaac));
    let mut game = game(p1, p2);

    game.attack(AttackSource::Board(0), Target::God).unwrap();

    assert!(game.player(Seat::One).board.get(0).is_none());
    let god = game.player(Seat::Two).god_slot.as_ref().unwrap();
    assert_eq!(god.current_hp, 5);
}

#[test]
fn test_attack_on_missing_god_is_refused() {
    let mut p1 = PlayerState::new("Ana");
    p1.board.place(0, instance(10, common(0, "Wounded Warrior", 2, 3)));
    let mut game = game(p1, PlayerState::new("Ixchel"));
    let before = game.snapshot();

    assert_eq!(
        game.attack(AttackSource::Board(0), Target::God),
        Err(Rejection::NoOpposingGod)
    );
    assert_eq!(game.player(Seat::Two).hp, STARTING_HP);
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_dead_god_attacker_leaves_the_god_slot() {
    let kinich = Card::new(EntityId::new(0), "Kinich Ahau", CardKind::God)
        .with_stats(1, 1)
        .with_blood_cost(7);
    let mut p1 = PlayerState::new("Ana");
    p1.god_slot = Some(instance(10, kinich));
    let mut p2 = PlayerState::new("Ixchel");
    p2.board.place(3, instance(11, common(1, "Wounded Warrior", 2, 3)));
    let mut game = game(p1, p2);

    assert_eq!(
        game.attack(AttackSource::God, Target::BoardSlot(3)),
        Ok(ActionOutcome::Applied)
    );

    let ana = game.player(Seat::One);
    assert!(ana.god_slot.is_none());
    assert_eq!(ana.discard.len(), 1);
    assert_eq!(ana.locate(EntityId::new(0)), Some(Zone::Discard));
    let warrior = game.player(Seat::Two).board.get(3).unwrap();
    assert_eq!(warrior.current_hp, 2);
}

#[test]
fn test_playing_into_occupied_slot_changes_nothing() {
    let mut p1 = PlayerState::new("Ana");
    p1.hand = vec![common(0, "Lost Scout", 1, 2)];
    p1.board.place(2, instance(10, common(1, "Young Hunter", 2, 1)));
    let mut game = game(p1, PlayerState::new("Ixchel"));
    let before = game.snapshot();

    assert_eq!(game.play_common_to_board(0, 2), Err(Rejection::SlotOccupied(2)));
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_rejected_actions_never_mutate() {
    let mut p1 = PlayerState::new("Ana");
    p1.hand = vec![
        common(0, "Villager", 1, 1),
        Card::new(EntityId::new(1), "Kukulcan", CardKind::God)
            .with_stats(7, 8)
            .with_blood_cost(7),
    ];
    p1.blood = 2;
    p1.board.place(0, instance(10, common(2, "Lost Scout", 1, 2)));
    let mut game = game(p1, PlayerState::new("Ixchel"));
    let before = game.snapshot();

    let illegal = [
        GameAction::PlayCommon { hand_index: 0, slot: 9 },
        GameAction::PlayCommon { hand_index: 1, slot: 0 },
        GameAction::Sacrifice { hand_index: 7 },
        GameAction::Sacrifice { hand_index: 1 },
        GameAction::PlayRitual { hand_index: 0, target: None },
        GameAction::InvokeGod { hand_index: 1 },
        GameAction::Attack { from: AttackSource::Board(1), to: Target::Player },
        GameAction::Attack { from: AttackSource::God, to: Target::Player },
        GameAction::Attack { from: AttackSource::Board(0), to: Target::God },
    ];
    for action in &illegal {
        assert!(game.apply(action).is_err(), "{action} should be rejected");
        assert!(game.validate(action).is_err());
        assert_eq!(game.snapshot(), before, "{action} mutated the match");
    }
}

#[test]
fn test_invoking_a_god_needs_enough_blood() {
    let kukulcan = Card::new(EntityId::new(1), "Kukulcan", CardKind::God)
        .with_stats(7, 8)
        .with_blood_cost(7);
    let mut p1 = PlayerState::new("Ana");
    p1.hand = vec![kukulcan];
    p1.blood = 6;
    let mut game = game(p1, PlayerState::new("Ixchel"));

    assert_eq!(
        game.invoke_god(0),
        Err(Rejection::NotEnoughBlood { needed: 7, available: 6 })
    );
}

#[test]
fn test_defeat_ends_the_match_and_locks_the_engine() {
    let mut p1 = PlayerState::new("Ana");
    p1.board.place(0, instance(10, common(0, "Wounded Warrior", 2, 3)));
    p1.hand = vec![common(1, "Villager", 1, 1)];
    let p2 = PlayerState::new("Ixchel").with_hp(2);
    let mut game = game(p1, p2);

    let outcome = game.attack(AttackSource::Board(0), Target::Player);

    assert_eq!(outcome, Ok(ActionOutcome::MatchEnded { winner: Seat::One }));
    assert_eq!(game.phase(), MatchPhase::MatchOver { winner: Seat::One });
    assert_eq!(game.player(Seat::Two).hp, 0);
    assert!(game.legal_actions().is_empty());

    let before = game.snapshot();
    assert_eq!(game.sacrifice_common(0), Err(Rejection::MatchOver));
    assert_eq!(game.end_turn(), Err(Rejection::MatchOver));
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_opponent_turn_runs_through_the_engine() {
    let mut game = game(PlayerState::new("Ana"), PlayerState::new("Ixchel"));

    assert_eq!(game.perform_ai_turn(), Err(Rejection::NotOpponentsTurn));

    game.end_turn().unwrap();
    assert_eq!(game.perform_ai_turn(), Ok(ActionOutcome::Applied));
    assert_eq!(game.active_seat(), Seat::One);
}
