//! Тиковый контроллер: обратный отсчёт, дисконнекты, shot clock.

use holdem_core::domain::{Blinds, Chips, Game, Phase};
use holdem_core::engine::{
    apply_action, buy_in, call_clock, set_disconnected, sit, start_hand, ActionKind, EngineError,
};
use holdem_core::infra::DeterministicRng;
use holdem_core::time_ctrl::{apply_forced_action, tick, ForcedActionReason};

fn heads_up() -> (Game, DeterministicRng) {
    let mut game = Game::new(6, Blinds::new(Chips::new(25), Chips::new(50)));
    for i in 0..2u8 {
        sit(&mut game, i, i as u64 + 1, format!("p{i}")).unwrap();
        buy_in(&mut game, i, Chips::new(1000)).unwrap();
    }
    let mut rng = DeterministicRng::from_seed(30);
    start_hand(&mut game, &mut rng).unwrap();
    (game, rng)
}

#[test]
fn idle_table_stops_ticking() {
    let mut game = Game::new(6, Blinds::new(Chips::new(25), Chips::new(50)));
    let out = tick(&mut game);
    assert!(!out.keep_running);
    assert!(!out.broadcast);
    assert!(out.forced_action.is_none());
}

#[test]
fn countdown_counts_down_and_signals_start() {
    let mut game = Game::new(6, Blinds::new(Chips::new(25), Chips::new(50)));
    game.countdown = Some(2);

    let out = tick(&mut game);
    assert!(out.broadcast);
    assert!(!out.start_hand);
    assert_eq!(game.countdown, Some(1));

    let out = tick(&mut game);
    assert!(out.start_hand);
    assert!(out.broadcast);
    assert_eq!(game.countdown, None);
}

#[test]
fn finished_hand_schedules_next_one() {
    let (mut game, mut rng) = heads_up();
    apply_action(&mut game, &mut rng, 0, ActionKind::Fold).unwrap();
    assert_eq!(game.countdown, Some(5));

    let mut started = false;
    for _ in 0..5 {
        if tick(&mut game).start_hand {
            started = true;
        }
    }
    assert!(started);
}

#[test]
fn disconnected_actor_is_forced_after_five_ticks() {
    let (mut game, mut rng) = heads_up();
    assert_eq!(game.acting_seat, Some(0));
    set_disconnected(&mut game, 0, true).unwrap();

    for _ in 0..4 {
        assert!(tick(&mut game).forced_action.is_none());
    }
    let out = tick(&mut game);
    assert_eq!(
        out.forced_action,
        Some((0, ForcedActionReason::Disconnected))
    );

    // Кнопке нужно доплачивать до колла: форс превращается в фолд.
    let outcome = apply_forced_action(&mut game, &mut rng, 0).unwrap();
    assert!(outcome.hand_finished);
    assert_eq!(game.phase, Phase::Waiting);
}

#[test]
fn reconnect_clears_disconnect_timer() {
    let (mut game, _rng) = heads_up();
    set_disconnected(&mut game, 0, true).unwrap();
    for _ in 0..3 {
        tick(&mut game);
    }
    assert_eq!(game.disconnected_acting_ticks, 3);

    set_disconnected(&mut game, 0, false).unwrap();
    assert_eq!(game.disconnected_acting_ticks, 0);
    assert!(tick(&mut game).forced_action.is_none());
}

#[test]
fn forced_action_checks_when_call_is_free() {
    let (mut game, mut rng) = heads_up();
    apply_action(&mut game, &mut rng, 0, ActionKind::Call).unwrap();
    apply_action(&mut game, &mut rng, 1, ActionKind::Check).unwrap();
    assert_eq!(game.phase, Phase::Flop);
    assert_eq!(game.acting_seat, Some(1));

    let outcome = apply_forced_action(&mut game, &mut rng, 1).unwrap();
    assert!(!outcome.hand_finished);
    assert!(!game.seat(1).unwrap().folded);
    assert_eq!(game.acting_seat, Some(0));
}

#[test]
fn clock_requires_a_long_think_and_another_caller() {
    let (mut game, _rng) = heads_up();

    assert!(matches!(
        call_clock(&mut game, 1),
        Err(EngineError::ClockUnavailable(_))
    ));

    game.acting_ticks = 60;
    assert!(matches!(
        call_clock(&mut game, 0),
        Err(EngineError::ClockUnavailable(_))
    ));

    call_clock(&mut game, 1).unwrap();
    assert_eq!(game.clock_ticks, 1);
    assert!(matches!(
        call_clock(&mut game, 1),
        Err(EngineError::ClockUnavailable(_))
    ));
}

#[test]
fn expired_clock_forces_action() {
    let (mut game, _rng) = heads_up();
    game.acting_ticks = 60;
    call_clock(&mut game, 1).unwrap();

    let mut forced = None;
    let mut ticks = 0;
    while forced.is_none() && ticks < 100 {
        forced = tick(&mut game).forced_action;
        ticks += 1;
    }
    assert_eq!(forced, Some((0, ForcedActionReason::ClockExpired)));
    assert_eq!(ticks, 29);
}

#[test]
fn player_action_resets_think_timer() {
    let (mut game, mut rng) = heads_up();
    for _ in 0..10 {
        tick(&mut game);
    }
    assert_eq!(game.acting_ticks, 10);

    apply_action(&mut game, &mut rng, 0, ActionKind::Call).unwrap();
    assert_eq!(game.acting_ticks, 0);
    assert_eq!(game.clock_ticks, 0);
}
