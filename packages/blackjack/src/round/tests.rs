use super::*;
use crate::{Outcome, Rank, Suit};

fn stacked(ranks: &[Rank]) -> Deck {
    let cards = ranks.iter().map(|r| Card::new(*r, Suit::Diamonds)).collect();
    Deck::stacked(cards, (38, 42))
}

fn dealt(ranks: &[Rank]) -> (RoundState, Deck) {
    let mut deck = stacked(ranks);
    let mut round = RoundState::new(17);
    round.deal(&mut deck, 100).unwrap();
    (round, deck)
}

fn ranks(hand: &Hand) -> Vec<Rank> {
    hand.cards().iter().map(|c| c.rank).collect()
}

#[test]
fn test_new_round_is_betting() {
    let round = RoundState::new(17);
    assert_eq!(round.phase(), Phase::Betting);
    assert_eq!(round.current_turn(), TurnOwner::None);
    assert!(round.player().is_empty());
    assert!(round.dealer().is_empty());
}

#[test]
fn test_deal_order_alternates() {
    let (round, deck) = dealt(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six]);
    assert_eq!(ranks(round.player()), vec![Rank::Two, Rank::Four]);
    assert_eq!(ranks(round.dealer()), vec![Rank::Three, Rank::Five]);
    assert_eq!(round.phase(), Phase::PlayerTurn);
    assert_eq!(round.current_turn(), TurnOwner::Player);
    assert_eq!(round.bet(), 100);
    assert_eq!(deck.remaining(), 1);
}

#[test]
fn test_hole_card_hidden_during_player_turn() {
    let (round, _) = dealt(&[Rank::Two, Rank::King, Rank::Four, Rank::Five]);
    assert!(!round.is_dealer_revealed());
    let visible = round.visible_dealer_cards();
    assert_eq!(visible.len(), 2);
    assert!(visible[0].is_some());
    assert!(visible[1].is_none());
    assert_eq!(round.visible_dealer_value(), 10);
}

#[test]
fn test_deal_outside_betting_rejected() {
    let (mut round, mut deck) = dealt(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five]);
    let err = round.deal(&mut deck, 100).unwrap_err();
    assert_eq!(
        err,
        GameError::InvalidAction {
            action: Action::Bet,
            phase: Phase::PlayerTurn
        }
    );
    assert_eq!(round.player().len(), 2);
}

#[test]
fn test_hit_appends_card() {
    let (mut round, mut deck) =
        dealt(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six]);
    let card = round.hit(&mut deck).unwrap();
    assert_eq!(card.rank, Rank::Six);
    assert_eq!(round.player().value(), 12);
    assert_eq!(round.phase(), Phase::PlayerTurn);
}

#[test]
fn test_bust_settles_without_dealer_draw() {
    let (mut round, mut deck) = dealt(&[
        Rank::Ten,
        Rank::Six,
        Rank::Nine,
        Rank::Five,
        Rank::Five,
        Rank::Two,
    ]);
    round.hit(&mut deck).unwrap();
    assert_eq!(round.player().value(), 24);
    assert_eq!(round.phase(), Phase::Settled);
    assert_eq!(round.dealer().len(), 2);
    assert_eq!(round.showdown().unwrap().outcome, Outcome::PlayerBust);
    assert!(round.is_dealer_revealed());
}

#[test]
fn test_natural_settles_immediately() {
    let (round, deck) = dealt(&[Rank::Ace, Rank::Nine, Rank::King, Rank::Seven, Rank::Two]);
    assert_eq!(round.phase(), Phase::Settled);
    assert!(round.is_dealer_revealed());
    assert_eq!(round.dealer().len(), 2);
    assert_eq!(deck.remaining(), 1);
    assert_eq!(round.showdown().unwrap().outcome, Outcome::PlayerBlackjack);
}

#[test]
fn test_natural_against_dealer_natural_pushes() {
    let (round, _) = dealt(&[Rank::Ace, Rank::Ace, Rank::King, Rank::Queen]);
    assert_eq!(round.phase(), Phase::Settled);
    let showdown = round.showdown().unwrap();
    assert_eq!(showdown.outcome, Outcome::Push);
    assert!(showdown.player_blackjack);
    assert!(showdown.dealer_blackjack);
}

#[test]
fn test_three_card_21_passes_to_dealer() {
    let (mut round, mut deck) = dealt(&[
        Rank::Seven,
        Rank::Ten,
        Rank::Seven,
        Rank::Eight,
        Rank::Seven,
    ]);
    round.hit(&mut deck).unwrap();
    assert_eq!(round.player().value(), 21);
    assert_eq!(round.phase(), Phase::DealerTurn);
    assert!(round.is_dealer_revealed());

    let err = round.hit(&mut deck).unwrap_err();
    assert!(matches!(err, GameError::InvalidAction { action: Action::Hit, .. }));
}

#[test]
fn test_dealer_peek_ends_player_turn() {
    let (round, _) = dealt(&[Rank::Ten, Rank::Ace, Rank::Five, Rank::King]);
    assert_eq!(round.phase(), Phase::DealerTurn);
    assert_eq!(round.current_turn(), TurnOwner::Dealer);
}

#[test]
fn test_dealer_peek_settles_as_dealer_blackjack() {
    let (mut round, mut deck) = dealt(&[Rank::Ten, Rank::Ace, Rank::Five, Rank::King]);
    assert_eq!(round.dealer_step(&mut deck).unwrap(), None);
    assert_eq!(round.phase(), Phase::Settled);
    assert_eq!(round.showdown().unwrap().outcome, Outcome::DealerBlackjack);
}

#[test]
fn test_stand_starts_dealer_turn() {
    let (mut round, _) = dealt(&[Rank::Ten, Rank::Six, Rank::Eight, Rank::Five]);
    round.stand().unwrap();
    assert_eq!(round.phase(), Phase::DealerTurn);
    assert!(round.is_dealer_revealed());
    assert_eq!(round.visible_dealer_value(), 11);
    assert!(round.stand().is_err());
}

#[test]
fn test_dealer_draws_to_17() {
    let (mut round, mut deck) = dealt(&[
        Rank::Ten,
        Rank::Six,
        Rank::Eight,
        Rank::Five,
        Rank::Six,
        Rank::Four,
    ]);
    round.stand().unwrap();

    let step = round.dealer_step(&mut deck).unwrap().unwrap();
    assert_eq!(step.card.rank, Rank::Six);
    assert_eq!(step.value, 17);
    assert_eq!(step.cards.len(), 3);
    assert_eq!(round.phase(), Phase::DealerTurn);

    assert_eq!(round.dealer_step(&mut deck).unwrap(), None);
    assert_eq!(round.phase(), Phase::Settled);
    assert_eq!(round.dealer().len(), 3);
    assert_eq!(round.showdown().unwrap().outcome, Outcome::PlayerHigher);

    // The dealer turn cannot be replayed once settled
    assert!(round.dealer_step(&mut deck).is_err());
    assert_eq!(deck.remaining(), 1);
}

#[test]
fn test_dealer_stands_on_soft_17() {
    let (mut round, mut deck) = dealt(&[Rank::Ten, Rank::Ace, Rank::Eight, Rank::Six]);
    round.stand().unwrap();
    assert!(!round.dealer_should_hit());
    assert_eq!(round.dealer_step(&mut deck).unwrap(), None);
    assert_eq!(round.dealer().len(), 2);
    assert_eq!(round.showdown().unwrap().outcome, Outcome::PlayerHigher);
}

#[test]
fn test_dealer_bust() {
    let (mut round, mut deck) = dealt(&[
        Rank::Ten,
        Rank::Ten,
        Rank::Two,
        Rank::Six,
        Rank::King,
    ]);
    round.stand().unwrap();
    let step = round.dealer_step(&mut deck).unwrap().unwrap();
    assert_eq!(step.value, 26);
    assert_eq!(round.dealer_step(&mut deck).unwrap(), None);
    assert_eq!(round.showdown().unwrap().outcome, Outcome::DealerBust);
}

#[test]
fn test_reset_only_after_settlement() {
    let (mut round, mut deck) = dealt(&[Rank::Ten, Rank::Six, Rank::Eight, Rank::Five, Rank::Six]);
    assert!(matches!(
        round.reset(),
        Err(GameError::InvalidAction {
            action: Action::NewRound,
            phase: Phase::PlayerTurn
        })
    ));
    round.stand().unwrap();
    round.dealer_step(&mut deck).unwrap();
    assert_eq!(round.dealer_step(&mut deck).unwrap(), None);

    round.reset().unwrap();
    assert_eq!(round.phase(), Phase::Betting);
    assert!(round.player().is_empty());
    assert!(round.dealer().is_empty());
    assert_eq!(round.bet(), 0);
    assert!(round.showdown().is_none());
}

#[test]
fn test_every_card_lands_in_one_hand() {
    let (mut round, mut deck) = dealt(&[
        Rank::Two,
        Rank::Three,
        Rank::Two,
        Rank::Four,
        Rank::Three,
        Rank::Two,
        Rank::Ten,
        Rank::Five,
    ]);
    let start = deck.remaining() + 4;
    round.hit(&mut deck).unwrap();
    round.hit(&mut deck).unwrap();
    round.stand().unwrap();
    while round.dealer_step(&mut deck).unwrap().is_some() {}
    let dealt = round.player().len() + round.dealer().len();
    assert_eq!(start - deck.remaining(), dealt);
}
