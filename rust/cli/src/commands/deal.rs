//! Deal command handler for dealing a sample hand.
//!
//! This module provides the `deal` command, which builds a fresh shoe, deals
//! one five-card hand, and classifies it against the payout table. Nothing
//! is wagered and no statistics are touched; it exists for inspecting the
//! shuffle and the classifier. The command supports optional seeding for
//! deterministic dealing.

use crate::config;
use crate::error::CliError;
use crate::formatters::format_board;
use pokermachine_engine::config::{HAND_SIZE, PACK_SIZE};
use pokermachine_engine::hand::evaluate_hand;
use pokermachine_engine::payout;
use pokermachine_engine::shoe::Shoe;
use std::io::Write;

/// Handle the deal command.
///
/// # Arguments
///
/// * `seed` - Seed for the shuffle; the configured seed, then a random one,
///   when omitted
/// * `packs` - Shoe size in packs; the configured value when omitted
/// * `out` - Output stream for the dealt hand
///
/// # Returns
///
/// * `Ok(())` on success
/// * `Err(CliError)` if configuration loading fails or the shoe cannot
///   cover a hand
pub fn handle_deal_command(
    seed: Option<u64>,
    packs: Option<u8>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let packs = packs.unwrap_or(cfg.packs);
    if packs == 0 {
        return Err(CliError::InvalidInput("packs must be at least 1".into()));
    }
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let mut shoe = Shoe::new_with_seed(packs, seed);
    shoe.rebuild_and_shuffle();
    let cards = shoe.draw(HAND_SIZE)?;

    writeln!(out, "Seed: {}", seed)?;
    writeln!(
        out,
        "Shoe: {} pack(s), {} cards",
        packs,
        packs as usize * PACK_SIZE
    )?;
    writeln!(out, "Deal: {}", format_board(&cards))?;
    if let Some(rank) = evaluate_hand(&cards) {
        writeln!(
            out,
            "Classified: {} (pays {}:1)",
            rank.name(),
            payout::multiplier(rank)
        )?;
    }
    Ok(())
}
