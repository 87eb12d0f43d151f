use pokermind::cards::*;
use pokermind::hand_evaluator::*;

fn c(notation: &str) -> Card {
    parse_card(notation).unwrap()
}

#[test]
fn test_royal_flush() {
    let hole = vec![c("As"), c("Ks")];
    let board = parse_board("QsTsJs2h3d").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::RoyalFlush);
    assert_eq!(result.category.strength(), 10);
}

#[test]
fn test_straight_flush() {
    let hole = vec![c("9h"), c("8h")];
    let board = parse_board("7h6h5hAcKd").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::StraightFlush);
    assert_eq!(result.tiebreak, vec![9]);
}

#[test]
fn test_four_of_a_kind() {
    let hole = vec![c("Ks"), c("Kh")];
    let board = parse_board("KdKc5s2h3d").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::FourOfAKind);
    assert_eq!(result.tiebreak, vec![13, 5]);
}

#[test]
fn test_full_house() {
    let hole = vec![c("As"), c("Ah")];
    let board = parse_board("AdKsKh2c3d").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::FullHouse);
    assert_eq!(result.tiebreak, vec![14, 13]);
}

#[test]
fn test_flush() {
    let hole = vec![c("As"), c("Ts")];
    let board = parse_board("8s5s2sKdQh").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::Flush);
}

#[test]
fn test_straight() {
    let hole = vec![c("9s"), c("8h")];
    let board = parse_board("7d6c5sAhKd").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::Straight);
    assert_eq!(result.tiebreak, vec![9]);
}

#[test]
fn test_wheel_straight() {
    let hole = vec![c("As"), c("2h")];
    let board = parse_board("3d4c5sKhQd").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::Straight);
    assert_eq!(result.tiebreak, vec![5]);
}

#[test]
fn test_three_of_a_kind() {
    let hole = vec![c("Qs"), c("Qh")];
    let board = parse_board("Qd7s3h2cKd").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::ThreeOfAKind);
    assert_eq!(result.tiebreak[0], 12);
}

#[test]
fn test_two_pair() {
    let hole = vec![c("As"), c("Kh")];
    let board = parse_board("AdKs5c2h3d").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::TwoPair);
    assert_eq!(result.tiebreak, vec![14, 13, 5]);
}

#[test]
fn test_one_pair_of_kings() {
    // Hole 9♥K♦ on 3♥4♠5♦8♥K♥ pairs the kings.
    let hole = vec![c("9h"), c("Kd")];
    let board = parse_board("3h4s5d8hKh").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::OnePair);
    assert_eq!(result.tiebreak[0], 13);
}

#[test]
fn test_high_card() {
    let hole = vec![c("As"), c("Kh")];
    let board = parse_board("Qd9s3c2h5d").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::HighCard);
    assert_eq!(result.tiebreak, vec![14, 13, 12, 9, 5]);
}

#[test]
fn test_not_enough_cards() {
    assert!(evaluate_hand(&[c("As"), c("Kh")], &[c("Qd")]).is_err());
}

#[test]
fn test_permutation_invariance() {
    let cards = [
        c("9h"),
        c("Kd"),
        c("3h"),
        c("4s"),
        c("5d"),
        c("8h"),
        c("Kh"),
    ];
    let baseline = evaluate_hand(&cards[..2], &cards[2..]).unwrap();

    // Rotate the 7 cards through several different splits and orders.
    let mut rotated = cards.to_vec();
    for _ in 0..7 {
        rotated.rotate_left(1);
        let result = evaluate_hand(&rotated[..2], &rotated[2..]).unwrap();
        assert_eq!(result, baseline);
    }

    let mut reversed = cards.to_vec();
    reversed.reverse();
    let result = evaluate_hand(&reversed[..2], &reversed[2..]).unwrap();
    assert_eq!(result, baseline);
}

#[test]
fn test_category_total_order() {
    assert!(HandCategory::RoyalFlush > HandCategory::StraightFlush);
    assert!(HandCategory::StraightFlush > HandCategory::FourOfAKind);
    assert!(HandCategory::FourOfAKind > HandCategory::FullHouse);
    assert!(HandCategory::FullHouse > HandCategory::Flush);
    assert!(HandCategory::Flush > HandCategory::Straight);
    assert!(HandCategory::Straight > HandCategory::ThreeOfAKind);
    assert!(HandCategory::ThreeOfAKind > HandCategory::TwoPair);
    assert!(HandCategory::TwoPair > HandCategory::OnePair);
    assert!(HandCategory::OnePair > HandCategory::HighCard);
}

#[test]
fn test_flush_beats_straight() {
    let board = parse_board("7s6s5s4dAh").unwrap();
    assert_eq!(
        compare_hands(&[c("As"), c("2s")], &[c("8h"), c("9h")], &board).unwrap(),
        1
    );
}

#[test]
fn test_kicker_decides() {
    let board = parse_board("As5d8cTh3d").unwrap();
    assert_eq!(
        compare_hands(&[c("Ad"), c("Kh")], &[c("Ah"), c("Qd")], &board).unwrap(),
        1
    );
}

#[test]
fn test_board_plays_tie() {
    let board = parse_board("AsKdQhJsTs").unwrap();
    assert_eq!(
        compare_hands(&[c("2h"), c("3d")], &[c("4h"), c("5d")], &board).unwrap(),
        0
    );
}

#[test]
fn test_normalized_strength_bounds() {
    let hole = vec![c("As"), c("Ks")];
    let royal = evaluate_hand(&hole, &parse_board("QsTsJs2h3d").unwrap()).unwrap();
    assert!((normalized_strength(&royal) - 1.0).abs() < 1e-9);

    let high = evaluate_hand(&[c("As"), c("Kh")], &parse_board("Qd9s3c2h5d").unwrap()).unwrap();
    assert!(normalized_strength(&high).abs() < 1e-9);
}

#[test]
fn test_hand_rank_ordering() {
    let pair = HandRank::new(HandCategory::OnePair, vec![14, 13, 12, 11], vec![]);
    let high = HandRank::new(HandCategory::HighCard, vec![14, 13, 12, 11, 9], vec![]);
    assert!(pair > high);

    let better_kicker = HandRank::new(HandCategory::OnePair, vec![14, 13, 12, 11], vec![]);
    let worse_kicker = HandRank::new(HandCategory::OnePair, vec![14, 13, 12, 10], vec![]);
    assert!(better_kicker > worse_kicker);
}
