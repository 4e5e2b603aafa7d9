//! Scoring and hand tests.

use std::cmp::Ordering;

use bjengine::score::{best_score, compare_hands, is_blackjack, is_bust, is_soft};
use bjengine::{Card, GameOptions, Hand, HandError, HandStatus, Suit};

const fn card(rank: u8) -> Card {
    Card::new(Suit::Hearts, rank)
}

fn hand_of(ranks: &[u8]) -> Vec<Card> {
    ranks.iter().copied().map(card).collect()
}

/// Every hand of up to three cards, one rank per card.
fn small_hands() -> Vec<Vec<Card>> {
    let mut hands = Vec::new();
    for a in 1..=13 {
        for b in 1..=13 {
            hands.push(hand_of(&[a, b]));
            for c in 1..=13 {
                hands.push(hand_of(&[a, b, c]));
            }
        }
    }
    hands
}

/// Highest total reachable without busting, or the lowest total if every
/// assignment busts.
fn brute_force_score(cards: &[Card]) -> u8 {
    let hard: u8 = cards.iter().map(Card::value).sum();
    let aces = cards.iter().filter(|card| card.is_ace()).count() as u8;
    (0..=aces)
        .map(|high| hard + 10 * high)
        .filter(|total| *total <= 21)
        .max()
        .unwrap_or(hard)
}

#[test]
fn card_values() {
    assert_eq!(card(1).value(), 1);
    assert_eq!(card(7).value(), 7);
    assert_eq!(card(11).value(), 10);
    assert_eq!(card(13).value(), 10);
    assert!(card(1).is_ace());
    assert!(!card(10).is_ace());
}

#[test]
fn best_score_picks_best_ace_assignment() {
    for cards in small_hands() {
        let expected = brute_force_score(&cards);
        assert_eq!(best_score(&cards), expected, "{cards:?}");
        assert_eq!(is_bust(&cards), expected > 21, "{cards:?}");
    }

    assert_eq!(best_score(&hand_of(&[10, 1, 1])), 12);
    assert_eq!(best_score(&hand_of(&[1, 1, 9])), 21);
    assert_eq!(best_score(&hand_of(&[1, 1, 1, 1])), 14);
}

#[test]
fn soft_hands() {
    assert!(is_soft(&hand_of(&[1, 6])));
    assert!(!is_soft(&hand_of(&[1, 6, 10])));
    assert!(!is_soft(&hand_of(&[10, 7])));
    assert!(is_soft(&hand_of(&[1, 1])));
}

#[test]
fn ace_and_ten_is_blackjack() {
    for ten in 10..=13 {
        for cards in [hand_of(&[1, ten]), hand_of(&[ten, 1])] {
            assert!(is_blackjack(&cards));
            assert_eq!(best_score(&cards), 21);
        }
    }
    assert!(!is_blackjack(&hand_of(&[10, 5, 6])));
    assert!(!is_blackjack(&hand_of(&[1, 9])));
}

#[test]
fn compare_hands_is_antisymmetric() {
    let hands = small_hands();
    let sample: Vec<_> = hands.iter().step_by(7).collect();
    for a in &sample {
        for b in &sample {
            assert_eq!(compare_hands(a, b), compare_hands(b, a).reverse());
        }
    }
}

#[test]
fn compare_hands_rules() {
    let blackjack = hand_of(&[1, 13]);
    let three_card_21 = hand_of(&[10, 5, 6]);
    let bust = hand_of(&[10, 6, 10]);
    let seventeen = hand_of(&[10, 7]);

    assert_eq!(compare_hands(&blackjack, &three_card_21), Ordering::Greater);
    assert_eq!(compare_hands(&blackjack, &hand_of(&[12, 1])), Ordering::Equal);
    assert_eq!(compare_hands(&seventeen, &hand_of(&[9, 8])), Ordering::Equal);
    assert_eq!(compare_hands(&seventeen, &bust), Ordering::Greater);
    assert_eq!(compare_hands(&bust, &bust), Ordering::Equal);
    assert_eq!(compare_hands(&three_card_21, &seventeen), Ordering::Greater);
}

#[test]
fn finished_hand_is_frozen() {
    let mut hand = Hand::new();
    hand.add_card(card(10)).unwrap();
    hand.add_card(card(6)).unwrap();
    hand.add_card(card(9)).unwrap();
    assert_eq!(hand.status(), HandStatus::Bust);
    assert!(hand.status().is_terminal());

    assert_eq!(hand.add_card(card(2)).unwrap_err(), HandError::Bust);
    assert_eq!(hand.stand().unwrap_err(), HandError::Bust);
    assert_eq!(hand.len(), 3);

    let mut standing = Hand::new();
    standing.add_card(card(10)).unwrap();
    standing.add_card(card(8)).unwrap();
    standing.stand().unwrap();
    assert_eq!(standing.add_card(card(2)).unwrap_err(), HandError::Stand);
    assert_eq!(standing.stand().unwrap_err(), HandError::Stand);
    assert_eq!(standing.cards(), hand_of(&[10, 8]).as_slice());
}

#[test]
fn special_bet_eligibility() {
    let mut pair = Hand::new();
    pair.add_card(card(8)).unwrap();
    pair.add_card(Card::new(Suit::Clubs, 8)).unwrap();
    assert!(pair.can_split());
    assert!(pair.can_double_down());

    let mut mixed_tens = Hand::new();
    mixed_tens.add_card(card(10)).unwrap();
    mixed_tens.add_card(card(13)).unwrap();
    assert!(!mixed_tens.can_split());

    pair.add_card(card(2)).unwrap();
    assert!(!pair.can_split());
    assert!(!pair.can_double_down());
}

#[test]
fn options_builder_sets_fields() {
    let options = GameOptions::default()
        .with_decks(4)
        .with_reshuffle_threshold(40)
        .with_stand_on_soft_17(false)
        .with_special_bets(true)
        .with_insurance(false);

    assert_eq!(options.decks, 4);
    assert_eq!(options.reshuffle_threshold, 40);
    assert!(!options.stand_on_soft_17);
    assert!(options.special_bets);
    assert!(!options.insurance);

    let defaults = GameOptions::default();
    assert_eq!(defaults.decks, 6);
    assert_eq!(defaults.reshuffle_threshold, 75);
    assert!(defaults.stand_on_soft_17);
    assert!(!defaults.special_bets);
    assert!(defaults.insurance);
}
