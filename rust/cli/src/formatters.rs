//! Card and hand formatters for terminal display.
//!
//! This module provides pure functions for formatting cards and dealt hands
//! for terminal output. It supports Unicode card symbols with ASCII fallback
//! for terminal environments that don't support Unicode rendering.
//!
//! ## Unicode vs ASCII Fallback
//!
//! The module automatically detects whether the terminal supports Unicode
//! symbols by checking environment variables on Windows (WT_SESSION, TERM_PROGRAM,
//! VSCODE_INJECTION) and assumes Unicode support on Unix-like systems.
//!
//! - **Unicode mode**: Uses ♥ ♦ ♣ ♠ symbols
//! - **ASCII mode**: Uses h d c s letters
//!
//! ## Example
//!
//! ```rust
//! use pokermachine_engine::cards::{Card, Rank, Suit};
//! use pokermachine_cli::formatters::{format_card, format_board};
//!
//! let ace_spades = Card { rank: Rank::Ace, suit: Suit::Spades, pack: 0 };
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//!
//! let hand = vec![ace_spades];
//! assert!(format_board(&hand).starts_with("[A"));
//! ```

use pokermachine_engine::cards::{Card, Rank, Suit};
use pokermachine_engine::session::HoldMask;

/// Check if the terminal supports Unicode card symbols by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
///
/// # Returns
///
/// `true` if Unicode symbols are supported, `false` for ASCII fallback
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

/// Format a Suit as a string using Unicode symbols with ASCII fallback.
///
/// # Unicode symbols
/// - Hearts: ♥
/// - Diamonds: ♦
/// - Clubs: ♣
/// - Spades: ♠
///
/// # ASCII fallback
/// - Hearts: h
/// - Diamonds: d
/// - Clubs: c
/// - Spades: s
///
/// # Arguments
///
/// * `suit` - The suit to format
///
/// # Returns
///
/// Formatted suit as a String
pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

/// Format a Rank as a string (A, 2-10, J, Q, K).
///
/// The Ten is written out as "10" rather than abbreviated, matching the
/// rank labels on the payout table.
///
/// # Arguments
///
/// * `rank` - The rank to format
///
/// # Returns
///
/// String representation of the rank
pub fn format_rank(rank: &Rank) -> String {
    match rank {
        Rank::Ace => "A",
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "10",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
    }
    .to_string()
}

/// Format a Card as a string combining rank and suit.
///
/// # Arguments
///
/// * `card` - The card to format
///
/// # Returns
///
/// String like "A♠" (Unicode) or "As" (ASCII)
///
/// # Example
///
/// ```rust
/// use pokermachine_engine::cards::{Card, Rank, Suit};
/// # use pokermachine_cli::formatters::format_card;
///
/// let ace_spades = Card { rank: Rank::Ace, suit: Suit::Spades, pack: 0 };
/// let formatted = format_card(&ace_spades);
/// assert!(formatted == "A♠" || formatted == "As");
/// ```
pub fn format_card(card: &Card) -> String {
    format!("{}{}", format_rank(&card.rank), format_suit(&card.suit))
}

/// Format a list of cards as a string in bracket notation.
///
/// # Arguments
///
/// * `cards` - Slice of cards to format
///
/// # Returns
///
/// Formatted string like "[A♠ K♥ Q♦]" or "[]" if empty
pub fn format_board(cards: &[Card]) -> String {
    if cards.is_empty() {
        "[]".to_string()
    } else {
        let formatted_cards: Vec<String> = cards.iter().map(format_card).collect();
        format!("[{}]", formatted_cards.join(" "))
    }
}

/// Format a dealt hand with the 1-based positions the hold prompt refers to.
///
/// # Returns
///
/// String like "1:A♠  2:K♥  3:Q♦  4:7♣  5:2♠"
pub fn format_hand_numbered(cards: &[Card]) -> String {
    cards
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}:{}", i + 1, format_card(c)))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Format a settled hand, bracketing the positions that were held through
/// the redraw.
///
/// # Returns
///
/// String like "[A♠] 9♥ [A♦] 4♣ 8♠"
pub fn format_hand_with_holds(cards: &[Card], held: HoldMask) -> String {
    cards
        .iter()
        .enumerate()
        .map(|(i, c)| {
            if held.is_held(i) {
                format!("[{}]", format_card(c))
            } else {
                format_card(c)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rank() {
        assert_eq!(format_rank(&Rank::Two), "2");
        assert_eq!(format_rank(&Rank::Ten), "10");
        assert_eq!(format_rank(&Rank::Jack), "J");
        assert_eq!(format_rank(&Rank::Queen), "Q");
        assert_eq!(format_rank(&Rank::King), "K");
        assert_eq!(format_rank(&Rank::Ace), "A");
    }

    #[test]
    fn test_format_suit_unicode_or_ascii() {
        let hearts = format_suit(&Suit::Hearts);
        assert!(hearts == "♥" || hearts == "h");

        let diamonds = format_suit(&Suit::Diamonds);
        assert!(diamonds == "♦" || diamonds == "d");

        let clubs = format_suit(&Suit::Clubs);
        assert!(clubs == "♣" || clubs == "c");

        let spades = format_suit(&Suit::Spades);
        assert!(spades == "♠" || spades == "s");
    }

    #[test]
    fn test_format_card() {
        let ten_spades = Card {
            rank: Rank::Ten,
            suit: Suit::Spades,
            pack: 0,
        };
        let formatted = format_card(&ten_spades);
        assert!(formatted == "10♠" || formatted == "10s");
    }

    #[test]
    fn test_format_board_empty() {
        let empty: Vec<Card> = vec![];
        assert_eq!(format_board(&empty), "[]");
    }

    #[test]
    fn test_format_board_with_cards() {
        let cards = vec![
            Card {
                rank: Rank::Ace,
                suit: Suit::Spades,
                pack: 0,
            },
            Card {
                rank: Rank::King,
                suit: Suit::Hearts,
                pack: 0,
            },
        ];
        let formatted = format_board(&cards);
        assert!(formatted.starts_with("[A"));
        assert!(formatted.contains("K"));
        assert!(formatted.ends_with("]"));
    }

    #[test]
    fn test_format_hand_numbered_positions() {
        let cards = vec![
            Card {
                rank: Rank::Ace,
                suit: Suit::Spades,
                pack: 0,
            },
            Card {
                rank: Rank::King,
                suit: Suit::Hearts,
                pack: 0,
            },
        ];
        let formatted = format_hand_numbered(&cards);
        assert!(formatted.starts_with("1:A"));
        assert!(formatted.contains("2:K"));
    }

    #[test]
    fn test_format_hand_with_holds_brackets_held_seats() {
        let cards = vec![
            Card {
                rank: Rank::Ace,
                suit: Suit::Spades,
                pack: 0,
            },
            Card {
                rank: Rank::King,
                suit: Suit::Hearts,
                pack: 0,
            },
            Card {
                rank: Rank::Queen,
                suit: Suit::Diamonds,
                pack: 0,
            },
        ];
        let formatted = format_hand_with_holds(&cards, HoldMask::from_positions([0, 2]));
        assert!(formatted.starts_with("[A"));
        assert!(formatted.contains("[Q"));
        assert!(!formatted.contains("[K"));
    }
}
