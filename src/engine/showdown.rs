//! Шоудаун и выплаты.

use crate::domain::game::Game;
use crate::domain::seat::ActionLabel;
use crate::domain::{Chips, SeatIndex};
use crate::engine::events::HandEventKind;
use crate::engine::pots::{calculate_pots, payout_order, Pot};
use crate::eval::{best_of_seven, HandValue};

/// Вскрыть руки, расслоить банк и раздать выигрыши.
///
/// Вызывается после закрытия торговли на ривере. К этому моменту все
/// ставки уже собраны в `game.pot`.
pub fn run_showdown(game: &mut Game) {
    let contenders: Vec<SeatIndex> = game
        .occupied_seats()
        .filter(|(_, p)| !p.folded && p.hole_cards.len() == 2)
        .map(|(i, _)| i)
        .collect();

    let mut evaluated: Vec<(SeatIndex, HandValue, [crate::domain::Card; 5])> = Vec::new();
    for &idx in &contenders {
        let mut cards = game
            .seat(idx)
            .map(|p| p.hole_cards.clone())
            .unwrap_or_default();
        cards.extend(game.board.iter().copied());
        let (value, best_five) = best_of_seven(&cards);
        evaluated.push((idx, value, best_five));
    }

    for &(idx, value, _) in &evaluated {
        let hole = game
            .seat(idx)
            .map(|p| p.hole_cards.clone())
            .unwrap_or_default();
        if let Some(seat) = game.seat_mut(idx) {
            seat.revealed = true;
        }
        game.journal.push(HandEventKind::ShowdownReveal {
            seat: idx,
            hole_cards: hole,
            description: value.describe(),
        });
    }

    let mut pots = calculate_pots(game);

    // Мёртвые блайнды лежат в банке поверх вкладов раздачи: это мёртвые
    // деньги, они разыгрываются в главном банке.
    let layered: u64 = pots.iter().map(|p| p.amount.0).sum();
    let surplus = game.pot.0.saturating_sub(layered);
    if surplus > 0 {
        if let Some(main) = pots.first_mut() {
            main.amount += Chips::new(surplus);
        }
    }

    for pot in pots {
        award_pot(game, &pot, &evaluated);
    }
    game.pot = Chips::ZERO;
}

fn award_pot(
    game: &mut Game,
    pot: &Pot,
    evaluated: &[(SeatIndex, HandValue, [crate::domain::Card; 5])],
) {
    let in_pot: Vec<&(SeatIndex, HandValue, [crate::domain::Card; 5])> = evaluated
        .iter()
        .filter(|(idx, _, _)| pot.eligible.contains(idx))
        .collect();
    let best = match in_pot.iter().map(|(_, v, _)| *v).max() {
        Some(v) => v,
        None => return,
    };
    let winners: Vec<SeatIndex> = in_pot
        .iter()
        .filter(|(_, v, _)| *v == best)
        .map(|(idx, _, _)| *idx)
        .collect();

    let ordered = payout_order(game, &winners);
    let share = Chips::new(pot.amount.0 / ordered.len() as u64);
    let mut remainder = pot.amount.0 % ordered.len() as u64;
    let label = if ordered.len() > 1 {
        ActionLabel::Split
    } else {
        ActionLabel::Win
    };

    for idx in ordered {
        let mut amount = share;
        // Нечётная фишка первому после кнопки.
        if remainder > 0 {
            amount += Chips::new(remainder);
            remainder = 0;
        }
        let best_five = evaluated
            .iter()
            .find(|(i, _, _)| *i == idx)
            .map(|(_, _, cards)| cards.to_vec());
        let mut player_id = 0;
        if let Some(seat) = game.seat_mut(idx) {
            seat.stack += amount;
            seat.hand_result = Some(seat.hand_result.unwrap_or(Chips::ZERO) + amount);
            seat.winning_cards = best_five;
            seat.last_action = Some(label);
            player_id = seat.player_id;
        }
        game.journal.push(HandEventKind::PotAwarded {
            seat: idx,
            player_id,
            amount,
        });
    }
}

/// Все, кроме одного, сбросились: остаток получает банк без вскрытия.
pub fn award_to_last_player(game: &mut Game) {
    let winner = game
        .occupied_seats()
        .find(|(_, p)| !p.folded && p.hole_cards.len() == 2)
        .map(|(i, _)| i);
    let winner = match winner {
        Some(w) => w,
        None => return,
    };

    let amount = game.pot;
    game.pot = Chips::ZERO;
    let mut player_id = 0;
    if let Some(seat) = game.seat_mut(winner) {
        seat.stack += amount;
        seat.hand_result = Some(amount);
        seat.last_action = Some(ActionLabel::Win);
        player_id = seat.player_id;
    }
    game.journal.push(HandEventKind::PotAwarded {
        seat: winner,
        player_id,
        amount,
    });
}
