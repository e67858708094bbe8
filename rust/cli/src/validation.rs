//! Input parsing and validation for interactive commands.
//!
//! This module provides functions for parsing user input at the two prompts
//! of the play loop. It handles:
//! - Wager entry (amounts, percentage shortcuts, table minimum)
//! - Hold selection (1-based card positions)
//!
//! ## Error Handling
//!
//! Parsing functions return custom enums (like `WagerInput`) so the play
//! loop can reprompt with a clear message instead of aborting.

use pokermachine_engine::config::HAND_SIZE;
use pokermachine_engine::session::{HoldMask, WagerRequest};

/// Result type for parsing a wager prompt line.
///
/// This enum represents the possible outcomes when parsing what the player
/// typed at the wager prompt:
/// - A wager request ready for the engine
/// - A request for the shortcut listing
/// - A quit command (leave the table)
/// - Invalid input with error message
#[derive(Debug, PartialEq)]
pub enum WagerInput {
    /// Valid wager request parsed from input
    Request(WagerRequest),
    /// User asked for the shortcut listing (h, help, ?)
    Help,
    /// User wants to leave the table (empty line, q, quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse a wager prompt line into a request or special command.
///
/// Accepts the following input formats (case-insensitive):
/// - A plain chip amount, e.g. "50"
/// - Percentage shortcuts: "-" (10%), "," (25%), "." (50%), ";" (75%), "+" (100%)
/// - The same percentages spelled out: "10%", "25%", "50%", "75%", "100%"
/// - "m" or "min" for the table minimum
/// - "h", "help", or "?" for the shortcut listing
/// - An empty line, "q", or "quit" to leave the table
///
/// # Arguments
///
/// * `input` - User input string to parse
///
/// # Returns
///
/// `WagerInput` indicating a request, help, quit, or error with message
///
/// # Example
///
/// ```rust
/// # use pokermachine_cli::validation::{parse_wager_input, WagerInput};
/// use pokermachine_engine::session::WagerRequest;
///
/// assert_eq!(
///     parse_wager_input("50"),
///     WagerInput::Request(WagerRequest::Amount(50))
/// );
///
/// assert_eq!(
///     parse_wager_input("+"),
///     WagerInput::Request(WagerRequest::PercentOfBankroll(100))
/// );
///
/// assert_eq!(parse_wager_input(""), WagerInput::Quit);
///
/// match parse_wager_input("33%") {
///     WagerInput::Invalid(msg) => assert!(msg.contains("10%")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_wager_input(input: &str) -> WagerInput {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "" | "q" | "quit" => return WagerInput::Quit,
        "h" | "help" | "?" => return WagerInput::Help,
        "m" | "min" => return WagerInput::Request(WagerRequest::Minimum),
        "-" => return WagerInput::Request(WagerRequest::PercentOfBankroll(10)),
        "," => return WagerInput::Request(WagerRequest::PercentOfBankroll(25)),
        "." => return WagerInput::Request(WagerRequest::PercentOfBankroll(50)),
        ";" => return WagerInput::Request(WagerRequest::PercentOfBankroll(75)),
        "+" => return WagerInput::Request(WagerRequest::PercentOfBankroll(100)),
        _ => {}
    }

    if let Some(stripped) = input.strip_suffix('%') {
        return match stripped.parse::<u8>() {
            Ok(p) if matches!(p, 10 | 25 | 50 | 75 | 100) => {
                WagerInput::Request(WagerRequest::PercentOfBankroll(p))
            }
            Ok(_) | Err(_) => WagerInput::Invalid(
                "Only 10%, 25%, 50%, 75% and 100% are available as percentages".to_string(),
            ),
        };
    }

    match input.parse::<u64>() {
        Ok(amount) if amount > 0 => WagerInput::Request(WagerRequest::Amount(amount)),
        Ok(_) => WagerInput::Invalid("Wager must be at least one chip".to_string()),
        Err(_) => WagerInput::Invalid(format!(
            "Unrecognized wager '{}'. Enter an amount, a shortcut, m for the minimum, or h for help",
            input
        )),
    }
}

/// Result type for parsing a hold prompt line.
#[derive(Debug, PartialEq)]
pub enum HoldInput {
    /// Positions to keep, as a mask over the five seats
    Keep(HoldMask),
    /// Invalid input with error message
    Invalid(String),
}

/// Parse a hold prompt line into the set of card positions to keep.
///
/// Positions are 1-based, as printed next to the dealt cards. Accepts:
/// - Digits run together: "134" keeps cards 1, 3 and 4
/// - Digits separated by spaces or commas: "1 3 4", "1,3,4"
/// - An empty line to replace every card
///
/// Duplicate positions are harmless; they set the same bit twice.
///
/// # Example
///
/// ```rust
/// # use pokermachine_cli::validation::{parse_hold_input, HoldInput};
/// use pokermachine_engine::session::HoldMask;
///
/// assert_eq!(parse_hold_input(""), HoldInput::Keep(HoldMask::NONE));
/// assert_eq!(
///     parse_hold_input("12345"),
///     HoldInput::Keep(HoldMask::ALL)
/// );
///
/// match parse_hold_input("6") {
///     HoldInput::Invalid(msg) => assert!(msg.contains("1-5")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_hold_input(input: &str) -> HoldInput {
    let input = input.trim();
    if input.is_empty() {
        return HoldInput::Keep(HoldMask::NONE);
    }

    let mut positions = Vec::new();
    if input.contains([' ', ',']) {
        for token in input.split([' ', ',']).filter(|t| !t.is_empty()) {
            match token.parse::<usize>() {
                Ok(p) if (1..=HAND_SIZE).contains(&p) => positions.push(p - 1),
                _ => {
                    return HoldInput::Invalid(format!(
                        "Invalid position '{}'. Use digits 1-5",
                        token
                    ));
                }
            }
        }
    } else {
        for ch in input.chars() {
            match ch.to_digit(10) {
                Some(d) if (1..=HAND_SIZE as u32).contains(&d) => {
                    positions.push(d as usize - 1);
                }
                _ => {
                    return HoldInput::Invalid(format!(
                        "Invalid position '{}'. Use digits 1-5",
                        ch
                    ));
                }
            }
        }
    }
    HoldInput::Keep(HoldMask::from_positions(positions))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wager_amount() {
        assert_eq!(
            parse_wager_input("50"),
            WagerInput::Request(WagerRequest::Amount(50))
        );
        assert_eq!(
            parse_wager_input("  7  "),
            WagerInput::Request(WagerRequest::Amount(7))
        );
    }

    #[test]
    fn test_parse_wager_zero_rejected() {
        match parse_wager_input("0") {
            WagerInput::Invalid(msg) => assert!(msg.contains("at least one chip")),
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_wager_shortcut_symbols() {
        assert_eq!(
            parse_wager_input("-"),
            WagerInput::Request(WagerRequest::PercentOfBankroll(10))
        );
        assert_eq!(
            parse_wager_input(","),
            WagerInput::Request(WagerRequest::PercentOfBankroll(25))
        );
        assert_eq!(
            parse_wager_input("."),
            WagerInput::Request(WagerRequest::PercentOfBankroll(50))
        );
        assert_eq!(
            parse_wager_input(";"),
            WagerInput::Request(WagerRequest::PercentOfBankroll(75))
        );
        assert_eq!(
            parse_wager_input("+"),
            WagerInput::Request(WagerRequest::PercentOfBankroll(100))
        );
    }

    #[test]
    fn test_parse_wager_percent_spelled_out() {
        assert_eq!(
            parse_wager_input("25%"),
            WagerInput::Request(WagerRequest::PercentOfBankroll(25))
        );
        assert_eq!(
            parse_wager_input("100%"),
            WagerInput::Request(WagerRequest::PercentOfBankroll(100))
        );
    }

    #[test]
    fn test_parse_wager_percent_unsupported() {
        match parse_wager_input("33%") {
            WagerInput::Invalid(msg) => assert!(msg.contains("10%")),
            other => panic!("Expected Invalid, got {:?}", other),
        }
        match parse_wager_input("abc%") {
            WagerInput::Invalid(_) => {}
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_wager_minimum() {
        assert_eq!(
            parse_wager_input("m"),
            WagerInput::Request(WagerRequest::Minimum)
        );
        assert_eq!(
            parse_wager_input("MIN"),
            WagerInput::Request(WagerRequest::Minimum)
        );
    }

    #[test]
    fn test_parse_wager_help_variants() {
        assert_eq!(parse_wager_input("h"), WagerInput::Help);
        assert_eq!(parse_wager_input("help"), WagerInput::Help);
        assert_eq!(parse_wager_input("?"), WagerInput::Help);
    }

    #[test]
    fn test_parse_wager_quit_variants() {
        assert_eq!(parse_wager_input(""), WagerInput::Quit);
        assert_eq!(parse_wager_input("q"), WagerInput::Quit);
        assert_eq!(parse_wager_input("quit"), WagerInput::Quit);
        assert_eq!(parse_wager_input("Q"), WagerInput::Quit);
    }

    #[test]
    fn test_parse_wager_gibberish() {
        match parse_wager_input("fifty") {
            WagerInput::Invalid(msg) => assert!(msg.contains("Unrecognized")),
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_hold_empty_replaces_everything() {
        assert_eq!(parse_hold_input(""), HoldInput::Keep(HoldMask::NONE));
        assert_eq!(parse_hold_input("   "), HoldInput::Keep(HoldMask::NONE));
    }

    #[test]
    fn test_parse_hold_digit_run() {
        let HoldInput::Keep(mask) = parse_hold_input("134") else {
            panic!("Expected Keep");
        };
        assert!(mask.is_held(0));
        assert!(!mask.is_held(1));
        assert!(mask.is_held(2));
        assert!(mask.is_held(3));
        assert!(!mask.is_held(4));
    }

    #[test]
    fn test_parse_hold_separated_positions() {
        assert_eq!(parse_hold_input("1 3 4"), parse_hold_input("134"));
        assert_eq!(parse_hold_input("1,3,4"), parse_hold_input("134"));
        assert_eq!(parse_hold_input("1, 3, 4"), parse_hold_input("134"));
    }

    #[test]
    fn test_parse_hold_all_positions() {
        assert_eq!(parse_hold_input("12345"), HoldInput::Keep(HoldMask::ALL));
    }

    #[test]
    fn test_parse_hold_duplicates_are_harmless() {
        assert_eq!(parse_hold_input("113"), parse_hold_input("13"));
    }

    #[test]
    fn test_parse_hold_out_of_range() {
        match parse_hold_input("6") {
            HoldInput::Invalid(msg) => assert!(msg.contains("1-5")),
            other => panic!("Expected Invalid, got {:?}", other),
        }
        match parse_hold_input("1 0") {
            HoldInput::Invalid(_) => {}
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_hold_gibberish() {
        match parse_hold_input("abc") {
            HoldInput::Invalid(_) => {}
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }
}
