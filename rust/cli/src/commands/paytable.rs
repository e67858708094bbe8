//! Paytable command handler.
//!
//! Prints the twelve hand classifications and their payout multipliers,
//! best hand first.

use crate::error::CliError;
use pokermachine_engine::hand::HandRank;
use pokermachine_engine::payout;
use std::io::Write;

/// Handle the paytable command.
///
/// # Arguments
///
/// * `out` - Output stream for the table
///
/// # Returns
///
/// * `Ok(())` on success
/// * `Err(CliError)` if writing to the output stream fails
pub fn handle_paytable_command(out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "Payout table (returned per chip wagered)")?;
    for &rank in HandRank::ALL.iter().rev() {
        writeln!(out, "  {:<22} {:>4}:1", rank.name(), payout::multiplier(rank))?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "A Paid Pair is Jacks or better; at 1:1 it returns the wager exactly."
    )?;
    writeln!(out, "High Card and any lower pair forfeit the wager.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paytable_lists_every_classification() {
        let mut out = Vec::new();
        handle_paytable_command(&mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        for &rank in HandRank::ALL.iter() {
            assert!(
                output.contains(rank.name()),
                "paytable should list {}",
                rank.name()
            );
        }
        assert!(output.contains("250:1"), "royal payout should be shown");
    }

    #[test]
    fn test_paytable_puts_the_best_hand_first() {
        let mut out = Vec::new();
        handle_paytable_command(&mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        let royal = output.find("Royal Straight Flush").unwrap();
        let high_card = output.find("High Card").unwrap();
        assert!(royal < high_card);
    }
}
