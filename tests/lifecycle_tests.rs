//! Жизненный цикл стола: посадка, докупка, sit out / sit in, выход,
//! мёртвый блайнд и сериализация состояния.

use holdem_core::domain::{Blinds, Chips, Game, Phase};
use holdem_core::engine::betting::call_amount;
use holdem_core::engine::{
    apply_action, buy_in, leave, sit, sit_in, sit_out, start_hand, ActionKind, EngineError,
};
use holdem_core::infra::DeterministicRng;

fn table(stacks: &[u64]) -> Game {
    let mut game = Game::new(6, Blinds::new(Chips::new(25), Chips::new(50)));
    for (i, &s) in stacks.iter().enumerate() {
        let idx = i as u8;
        sit(&mut game, idx, i as u64 + 1, format!("p{i}")).unwrap();
        buy_in(&mut game, idx, Chips::new(s)).unwrap();
    }
    game
}

#[test]
fn sit_rejects_taken_and_unknown_seats() {
    let mut game = table(&[1000]);
    assert_eq!(
        sit(&mut game, 0, 99, "intruder"),
        Err(EngineError::SeatOccupied(0))
    );
    assert_eq!(
        sit(&mut game, 42, 99, "ghost"),
        Err(EngineError::InvalidSeat(42))
    );
}

#[test]
fn sit_moves_player_between_seats() {
    let mut game = table(&[1000]);
    sit(&mut game, 3, 1, "p0").unwrap();
    assert!(game.seat(0).is_none());
    let moved = game.seat(3).unwrap();
    assert_eq!(moved.player_id, 1);
    assert_eq!(moved.stack, Chips::new(1000));
}

#[test]
fn joining_mid_hand_waits_for_next_deal() {
    let mut game = table(&[1000, 1000]);
    let mut rng = DeterministicRng::from_seed(20);
    start_hand(&mut game, &mut rng).unwrap();

    sit(&mut game, 4, 5, "late").unwrap();
    let late = game.seat(4).unwrap();
    assert!(late.folded);
    assert!(late.hole_cards.is_empty());
}

#[test]
fn buy_in_on_empty_seat_rejected() {
    let mut game = table(&[1000]);
    assert_eq!(
        buy_in(&mut game, 3, Chips::new(500)),
        Err(EngineError::SeatEmpty(3))
    );
}

#[test]
fn leave_requires_sit_out_first() {
    let mut game = table(&[1000, 1000]);
    assert_eq!(leave(&mut game, 0), Err(EngineError::MustSitOutFirst));

    sit_out(&mut game, 0).unwrap();
    let player = leave(&mut game, 0).unwrap();
    assert_eq!(player.player_id, 1);
    assert_eq!(player.stack, Chips::new(1000));
    assert!(game.seat(0).is_none());
}

#[test]
fn start_hand_needs_two_ready_players() {
    let mut game = table(&[1000]);
    let mut rng = DeterministicRng::from_seed(21);
    assert_eq!(
        start_hand(&mut game, &mut rng),
        Err(EngineError::NotEnoughPlayers)
    );

    sit(&mut game, 1, 2, "p1").unwrap();
    buy_in(&mut game, 1, Chips::new(1000)).unwrap();
    sit_out(&mut game, 1).unwrap();
    assert_eq!(
        start_hand(&mut game, &mut rng),
        Err(EngineError::NotEnoughPlayers)
    );
}

#[test]
fn start_hand_rejected_while_hand_runs() {
    let mut game = table(&[1000, 1000]);
    let mut rng = DeterministicRng::from_seed(22);
    start_hand(&mut game, &mut rng).unwrap();
    assert_eq!(
        start_hand(&mut game, &mut rng),
        Err(EngineError::HandInProgress)
    );
}

#[test]
fn sitting_out_player_skips_deal_and_posts_dead_blind_on_return() {
    let mut game = table(&[1000, 1000, 1000]);
    sit_out(&mut game, 2).unwrap();

    let mut rng = DeterministicRng::from_seed(23);
    start_hand(&mut game, &mut rng).unwrap();
    assert!(game.seat(2).unwrap().hole_cards.is_empty());
    assert!(game.seat(2).unwrap().missed_big_blind);

    // Быстрая раздача: кнопка сбрасывает.
    let acting = game.acting_seat.unwrap();
    apply_action(&mut game, &mut rng, acting, ActionKind::Fold).unwrap();
    assert_eq!(game.phase, Phase::Waiting);

    sit_in(&mut game, 2).unwrap();
    let returned = game.seat(2).unwrap();
    assert!(!returned.sitting_out);
    assert!(!returned.missed_big_blind);
    assert_eq!(returned.stack, Chips::new(950));
    // Мёртвый блайнд лежит в банке следующей раздачи.
    assert_eq!(game.pot, Chips::new(50));
}

#[test]
fn dead_blind_is_paid_out_at_next_showdown() {
    let mut game = table(&[1000, 1000, 1000]);
    sit_out(&mut game, 2).unwrap();

    let mut rng = DeterministicRng::from_seed(26);
    start_hand(&mut game, &mut rng).unwrap();
    let acting = game.acting_seat.unwrap();
    apply_action(&mut game, &mut rng, acting, ActionKind::Fold).unwrap();

    sit_in(&mut game, 2).unwrap();
    assert_eq!(game.pot, Chips::new(50));

    // Раздача без рейзов до вскрытия: мёртвый блайнд уходит победителям.
    start_hand(&mut game, &mut rng).unwrap();
    while game.phase.is_betting() {
        let seat = game.acting_seat.unwrap();
        let kind = if call_amount(&game, seat).is_zero() {
            ActionKind::Check
        } else {
            ActionKind::Call
        };
        apply_action(&mut game, &mut rng, seat, kind).unwrap();
    }

    assert_eq!(game.phase, Phase::Waiting);
    assert_eq!(game.pot, Chips::ZERO);
    assert_eq!(game.total_chips(), Chips::new(3000));
}

#[test]
fn sit_in_without_missed_blind_costs_nothing() {
    let mut game = table(&[1000, 1000]);
    sit_out(&mut game, 0).unwrap();
    sit_in(&mut game, 0).unwrap();
    assert_eq!(game.seat(0).unwrap().stack, Chips::new(1000));
    assert_eq!(game.pot, Chips::ZERO);
}

#[test]
fn button_advances_between_hands() {
    let mut game = table(&[1000, 1000, 1000]);
    let mut rng = DeterministicRng::from_seed(24);
    start_hand(&mut game, &mut rng).unwrap();
    assert_eq!(game.button, 0);

    let acting = game.acting_seat.unwrap();
    apply_action(&mut game, &mut rng, acting, ActionKind::Fold).unwrap();
    let acting = game.acting_seat.unwrap();
    apply_action(&mut game, &mut rng, acting, ActionKind::Fold).unwrap();

    assert_eq!(game.phase, Phase::Waiting);
    assert_eq!(game.button, 1);
}

#[test]
fn game_state_survives_serde_round_trip() {
    let mut game = table(&[1000, 1000, 1000]);
    let mut rng = DeterministicRng::from_seed(25);
    start_hand(&mut game, &mut rng).unwrap();
    apply_action(&mut game, &mut rng, 0, ActionKind::Raise(Chips::new(150))).unwrap();

    let json = serde_json::to_string(&game).unwrap();
    let restored: Game = serde_json::from_str(&json).unwrap();
    assert_eq!(game, restored);
}
