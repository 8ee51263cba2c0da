//! Тесты расслоения банка и выплат: side pots, нечётная фишка, фолды.

use holdem_core::domain::{Blinds, Card, Chips, Game, SeatedPlayer};
use holdem_core::engine::showdown::run_showdown;
use holdem_core::engine::{apply_action, buy_in, calculate_pots, sit, start_hand, ActionKind};
use holdem_core::infra::DeterministicRng;

fn cards(s: &str) -> Vec<Card> {
    s.split_whitespace().map(|c| c.parse().unwrap()).collect()
}

/// Стол с заранее разложенными вкладами, картами и бордом — для проверки
/// выплат без зависимости от раздачи.
fn scripted_table(players: &[(u8, u64, &str, bool)], board: &str) -> Game {
    let mut game = Game::new(6, Blinds::new(Chips::new(25), Chips::new(50)));
    for &(idx, invested, hole, folded) in players {
        let mut p = SeatedPlayer::new(idx as u64 + 1, format!("p{idx}"));
        p.invested = Chips::new(invested);
        p.folded = folded;
        p.hole_cards = cards(hole);
        game.pot += Chips::new(invested);
        game.seats[idx as usize] = Some(p);
    }
    game.board = cards(board);
    game
}

#[test]
fn three_way_all_in_splits_into_three_layers() {
    let game = scripted_table(
        &[
            (0, 200, "2c 3d", false),
            (1, 500, "4h 5s", false),
            (2, 1000, "6d 7c", false),
        ],
        "Ah Kh Qc Js 9d",
    );
    let pots = calculate_pots(&game);
    let amounts: Vec<u64> = pots.iter().map(|p| p.amount.0).collect();
    assert_eq!(amounts, vec![600, 600, 500]);
    assert_eq!(pots[2].eligible, vec![2]);
}

#[test]
fn board_tie_gives_odd_chip_to_first_after_button() {
    // Борд играет за обоих, слой 153 не делится пополам.
    let mut game = scripted_table(
        &[
            (0, 51, "8c 8d", true),
            (1, 100, "2c 2d", false),
            (2, 100, "3c 3d", false),
        ],
        "Ah Kh Qh Jh Th",
    );
    game.button = 1;

    run_showdown(&mut game);

    // Слои: 153 (все трое по 51) + 98. Первым после кнопки идёт место 2.
    let s1 = game.seat(1).unwrap();
    let s2 = game.seat(2).unwrap();
    assert_eq!(s2.stack, Chips::new(126));
    assert_eq!(s1.stack, Chips::new(125));
    assert_eq!(game.pot, Chips::ZERO);
    assert!(s1.revealed && s2.revealed);
}

#[test]
fn folded_player_cannot_win_any_layer() {
    let mut game = scripted_table(
        &[
            (0, 300, "Ac Ad", true), // сбросил лучшую руку
            (1, 300, "2c 7d", false),
            (2, 300, "3c 8d", false),
        ],
        "Kh Qh Jc 5s 4d",
    );

    run_showdown(&mut game);

    assert_eq!(game.seat(0).unwrap().stack, Chips::ZERO);
    let s1 = game.seat(1).unwrap().stack.0;
    let s2 = game.seat(2).unwrap().stack.0;
    assert_eq!(s1 + s2, 900);
}

#[test]
fn side_pot_winner_differs_from_main_pot_winner() {
    // Короткий стек выигрывает главный банк, побочный уходит второму.
    let mut game = scripted_table(
        &[
            (0, 200, "Ac Ad", false),
            (1, 500, "Kc Kd", false),
            (2, 500, "2c 7d", false),
        ],
        "Qh Jh 9c 5s 4d",
    );

    run_showdown(&mut game);

    // Главный банк 600 — тузам, побочный 600 — королям.
    assert_eq!(game.seat(0).unwrap().stack, Chips::new(600));
    assert_eq!(game.seat(1).unwrap().stack, Chips::new(600));
    assert_eq!(game.seat(2).unwrap().stack, Chips::ZERO);
}

#[test]
fn dead_blind_money_joins_the_main_pot() {
    // Мёртвый блайнд лежит в банке поверх вкладов раздачи.
    let mut game = scripted_table(
        &[(1, 100, "2c 2d", false), (2, 100, "3c 3d", false)],
        "Ah Kh Qh Jh Th",
    );
    game.button = 1;
    game.pot += Chips::new(50);

    run_showdown(&mut game);

    // Борд играет за обоих: 250 делится пополам, ничего не сгорает.
    let s1 = game.seat(1).unwrap().stack.0;
    let s2 = game.seat(2).unwrap().stack.0;
    assert_eq!(s1 + s2, 250);
    assert_eq!(game.pot, Chips::ZERO);
}

#[test]
fn uncovered_chips_return_through_side_pot_in_real_hand() {
    let mut game = Game::new(6, Blinds::new(Chips::new(25), Chips::new(50)));
    for (i, stack) in [300u64, 1000, 1000].iter().enumerate() {
        let idx = i as u8;
        sit(&mut game, idx, i as u64 + 1, format!("p{i}")).unwrap();
        buy_in(&mut game, idx, Chips::new(*stack)).unwrap();
    }
    let mut rng = DeterministicRng::from_seed(77);
    start_hand(&mut game, &mut rng).unwrap();
    let total = game.total_chips();

    apply_action(&mut game, &mut rng, 0, ActionKind::AllIn).unwrap();
    apply_action(&mut game, &mut rng, 1, ActionKind::AllIn).unwrap();
    apply_action(&mut game, &mut rng, 2, ActionKind::Call).unwrap();

    assert_eq!(game.total_chips(), total);
    assert_eq!(game.pot, Chips::ZERO);
    // Короткий стек не может выиграть больше своего слоя: 300 * 3.
    assert!(game.seat(0).unwrap().stack.0 <= 900);
}
