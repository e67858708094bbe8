use crate::cards::Card;
use crate::config::{GameConfig, HAND_SIZE};
use crate::errors::GameError;
use crate::hand::{evaluate_hand, HandRank};
use crate::killer::{KillerOutcome, KillerPreview, KillerSchedule};
use crate::payout;
use crate::shoe::Shoe;
use crate::stats::{now_ts, StatsRecord, StatsStore};

/// Where the machine stands between calls. Every operation checks the phase
/// and refuses out-of-order use.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    /// A hand is open and the wager prompt is live
    AwaitingWager,
    /// The wager is booked and deducted; cards not yet dealt
    WagerAccepted,
    /// Five cards are on the table
    Dealt,
    /// The hold prompt is live; the machine blocks on the selection
    AwaitingHold,
    /// The hand is settled; the next one may begin
    Resolved,
    /// The player left the table
    VoluntaryExit,
    /// The bankroll hit zero and the session is over
    Busted,
}

/// Which of the five dealt positions to keep, one bit per position.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct HoldMask(u8);

impl HoldMask {
    /// Keep every card.
    pub const ALL: HoldMask = HoldMask(0b1_1111);
    /// Replace every card.
    pub const NONE: HoldMask = HoldMask(0);

    /// Builds a mask from 0-based positions; anything past the hand size
    /// is ignored.
    pub fn from_positions<I: IntoIterator<Item = usize>>(positions: I) -> HoldMask {
        let mut mask = 0u8;
        for p in positions {
            if p < HAND_SIZE {
                mask |= 1 << p;
            }
        }
        HoldMask(mask)
    }

    pub fn is_held(self, position: usize) -> bool {
        position < HAND_SIZE && self.0 & (1 << position) != 0
    }

    pub fn count(self) -> usize {
        (self.0 & Self::ALL.0).count_ones() as usize
    }
}

/// A wager as the player expressed it, before resolution against the
/// bankroll.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum WagerRequest {
    /// A literal number of chips
    Amount(u64),
    /// A percentage of the current bankroll, rounded down
    PercentOfBankroll(u8),
    /// Whatever the table minimum currently is
    Minimum,
}

/// The wager actually booked for the hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AcceptedWager {
    pub amount: u64,
    /// Set when the request was below the table minimum and got raised
    pub corrected_from: Option<u64>,
}

/// Everything the caller needs to run the wager prompt for the next hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandStart {
    /// 1-based hand number within this session
    pub session_hand: u64,
    /// 1-based hand number within the bust-free streak
    pub streak_hand: u64,
    pub bankroll: u64,
    pub min_wager: u64,
    /// True when the shoe fell below its safety threshold and was rebuilt
    pub reshuffled: bool,
    /// Present when this hand is a killer hand
    pub killer: Option<KillerPreview>,
}

/// A fully settled hand: what it scored and what it did to the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct HandOutcome {
    pub final_hand: Vec<Card>,
    /// How many cards the redraw replaced
    pub replaced: usize,
    pub rank: Option<HandRank>,
    pub wager: u64,
    /// Chips returned by the payout table, stake included
    pub gross_return: u64,
    /// Payout-table result alone, before any killer adjustment
    pub net: i64,
    pub killer: Option<KillerOutcome>,
    /// Chips recorded as won this hand, killer bonus included
    pub winnings: u64,
    /// Chips recorded as lost this hand, killer penalty included
    pub losses: u64,
    /// Bankroll after settlement (already refilled when `busted`)
    pub bankroll: u64,
    pub new_biggest_win: bool,
    pub new_biggest_loss: bool,
    pub new_longest_streak: bool,
    pub busted: bool,
    /// Set when checkpointing the record failed; play continues in memory
    pub persist_warning: Option<String>,
}

/// End-of-session accounting for the goodbye banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub starting_bankroll: u64,
    pub final_bankroll: u64,
    pub hands_played: u64,
    /// Set when the final checkpoint failed
    pub persist_warning: Option<String>,
}

/// One sitting at the machine: drives the shoe, the payout table, the killer
/// schedule and the persistent ledger through the phase cycle
/// wager -> deal -> hold -> resolve.
///
/// # Examples
///
/// ```
/// use pokermachine_engine::config::GameConfig;
/// use pokermachine_engine::session::{HoldMask, Session, WagerRequest};
/// use pokermachine_engine::stats::{MemoryStore, StatsRecord};
///
/// let mut session = Session::new(
///     GameConfig::default(),
///     StatsRecord::default(),
///     Box::new(MemoryStore::new()),
///     Some(7),
/// )
/// .unwrap();
///
/// let start = session.begin_hand().unwrap();
/// assert_eq!(start.session_hand, 1);
/// assert_eq!(start.bankroll, 200);
///
/// session.place_wager(WagerRequest::Amount(50)).unwrap();
/// let dealt = session.deal().unwrap();
/// session.offer_draw().unwrap();
///
/// // Keep everything: the final hand is the dealt hand
/// let outcome = session.resolve(HoldMask::ALL).unwrap();
/// assert_eq!(outcome.final_hand, dealt);
/// assert_eq!(outcome.replaced, 0);
/// ```
pub struct Session {
    config: GameConfig,
    schedule: KillerSchedule,
    shoe: Shoe,
    record: StatsRecord,
    store: Box<dyn StatsStore>,
    phase: Phase,
    /// Hands resolved this session
    session_hand: u64,
    starting_bankroll: u64,
    wager: u64,
    hand: Vec<Card>,
    killer: Option<KillerPreview>,
}

impl Session {
    pub fn new(
        config: GameConfig,
        record: StatsRecord,
        store: Box<dyn StatsStore>,
        seed: Option<u64>,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let seed = seed.unwrap_or(0x0DDC_A4D5);
        let mut shoe = Shoe::new_with_seed(config.packs, seed);
        shoe.rebuild_and_shuffle();
        let schedule = KillerSchedule::from_config(&config);
        let starting_bankroll = record.bankroll;
        Ok(Self {
            config,
            schedule,
            shoe,
            record,
            store,
            phase: Phase::AwaitingWager,
            session_hand: 0,
            starting_bankroll,
            wager: 0,
            hand: Vec::new(),
            killer: None,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn record(&self) -> &StatsRecord {
        &self.record
    }

    pub fn bankroll(&self) -> u64 {
        self.record.bankroll
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    pub fn cards_in_play(&self) -> usize {
        self.hand.len()
    }

    /// Opens the next hand: tops the shoe up if it fell below the safety
    /// threshold and works out whether the killer schedule fires.
    pub fn begin_hand(&mut self) -> Result<HandStart, GameError> {
        match self.phase {
            Phase::AwaitingWager => {}
            Phase::Resolved => self.phase = Phase::AwaitingWager,
            Phase::VoluntaryExit | Phase::Busted => return Err(GameError::SessionEnded),
            _ => return Err(GameError::HandInProgress),
        }
        let reshuffled = self
            .shoe
            .ensure_capacity(self.config.reshuffle_threshold());
        let streak_hand = self.record.hands_since_bust + 1;
        self.killer = self.schedule.preview(streak_hand, self.record.killer_count);
        let bankroll = self.record.bankroll;
        Ok(HandStart {
            session_hand: self.session_hand + 1,
            streak_hand,
            bankroll,
            min_wager: self.config.min_wager(bankroll),
            reshuffled,
            killer: self.killer,
        })
    }

    /// Books a wager and deducts it from the bankroll on the spot. Requests
    /// below the table minimum are raised to it rather than rejected, except
    /// on a one-chip bankroll where the whole chip rides as is.
    pub fn place_wager(&mut self, request: WagerRequest) -> Result<AcceptedWager, GameError> {
        match self.phase {
            Phase::AwaitingWager => {}
            Phase::VoluntaryExit | Phase::Busted => return Err(GameError::SessionEnded),
            _ => return Err(GameError::HandInProgress),
        }
        let bankroll = self.record.bankroll;
        let min_wager = self.config.min_wager(bankroll);
        let requested = match request {
            WagerRequest::Amount(n) => n,
            WagerRequest::PercentOfBankroll(p) => bankroll * u64::from(p) / 100,
            WagerRequest::Minimum => min_wager,
        };
        if requested < 1 {
            return Err(GameError::WagerTooSmall);
        }
        if requested > bankroll {
            return Err(GameError::WagerExceedsBankroll {
                amount: requested,
                bankroll,
            });
        }
        let (amount, corrected_from) = if requested < min_wager && bankroll > 1 {
            (min_wager, Some(requested))
        } else {
            (requested, None)
        };
        self.record.bankroll -= amount;
        self.wager = amount;
        self.phase = Phase::WagerAccepted;
        Ok(AcceptedWager {
            amount,
            corrected_from,
        })
    }

    /// Deals the five-card hand.
    pub fn deal(&mut self) -> Result<Vec<Card>, GameError> {
        match self.phase {
            Phase::WagerAccepted => {}
            Phase::VoluntaryExit | Phase::Busted => return Err(GameError::SessionEnded),
            _ => return Err(GameError::NoWagerAccepted),
        }
        let cards = match self.shoe.draw(HAND_SIZE) {
            Ok(c) => c,
            Err(e) => return Err(self.abort_hand(e)),
        };
        self.hand = cards;
        self.phase = Phase::Dealt;
        Ok(self.hand.clone())
    }

    /// Puts the machine on the hold prompt; it now blocks on a selection.
    pub fn offer_draw(&mut self) -> Result<&[Card], GameError> {
        match self.phase {
            Phase::Dealt => {}
            Phase::VoluntaryExit | Phase::Busted => return Err(GameError::SessionEnded),
            _ => return Err(GameError::NoHandDealt),
        }
        self.phase = Phase::AwaitingHold;
        Ok(&self.hand)
    }

    /// Runs the redraw, classifies the final hand and settles everything:
    /// payout, killer adjustment, records, streaks, bust handling and the
    /// checkpoint to the store.
    pub fn resolve(&mut self, hold: HoldMask) -> Result<HandOutcome, GameError> {
        match self.phase {
            Phase::AwaitingHold => {}
            Phase::VoluntaryExit | Phase::Busted => return Err(GameError::SessionEnded),
            _ => return Err(GameError::NotAwaitingHold),
        }

        // Replaced cards keep their seat so the prompt numbering stays true
        let mut discarded = Vec::new();
        let mut open_seats = Vec::new();
        for (i, &card) in self.hand.iter().enumerate() {
            if !hold.is_held(i) {
                discarded.push(card);
                open_seats.push(i);
            }
        }
        let replaced = open_seats.len();
        if replaced > 0 {
            self.shoe.discard(&discarded);
            let replacements = match self.shoe.draw(replaced) {
                Ok(c) => c,
                Err(e) => return Err(self.abort_hand(e)),
            };
            for (seat, card) in open_seats.into_iter().zip(replacements) {
                self.hand[seat] = card;
            }
        }

        let rank = evaluate_hand(&self.hand);
        let wager = self.wager;
        let gross = payout::gross_return(rank, wager);
        let net = payout::net_result(rank, wager);
        let now = now_ts();

        let mut killer_outcome = None;
        let mut winnings = 0u64;
        let mut losses = 0u64;
        let mut new_biggest_win = false;
        let mut new_biggest_loss = false;

        if net >= 0 {
            winnings = net as u64;
            if self.killer.is_some() && winnings > 0 {
                let extra = self.schedule.win_bonus(winnings);
                killer_outcome = Some(KillerOutcome::Bonus { extra });
                winnings += extra;
            }
            self.record.bankroll += gross;
            if let Some(KillerOutcome::Bonus { extra }) = killer_outcome {
                self.record.bankroll += extra;
            }
            self.record.total_won += winnings;
            if winnings > self.record.biggest_win {
                self.record.biggest_win = winnings;
                self.record.biggest_win_at = Some(now.clone());
                new_biggest_win = true;
            }
        } else {
            // The wager already left the bankroll at acceptance
            losses = wager;
            if let Some(k) = self.killer {
                let amount = self
                    .schedule
                    .loss_penalty(k.penalty_percent, self.record.bankroll);
                killer_outcome = Some(KillerOutcome::Penalty {
                    percent: k.penalty_percent,
                    amount,
                });
                self.record.bankroll -= amount;
                losses += amount;
            }
            self.record.total_lost += losses;
            if losses > self.record.biggest_loss {
                self.record.biggest_loss = losses;
                self.record.biggest_loss_at = Some(now.clone());
                new_biggest_loss = true;
            }
        }

        // The killer trigger becomes part of the streak only once the hand
        // actually resolved; a preview abandoned by quitting costs nothing
        if self.killer.take().is_some() {
            self.record.killer_count += 1;
        }

        self.record.hands_played += 1;
        self.record.hands_since_bust += 1;
        let mut new_longest_streak = false;
        if self.record.hands_since_bust > self.record.longest_streak {
            self.record.longest_streak = self.record.hands_since_bust;
            new_longest_streak = true;
        }

        if let Some(r) = rank {
            let tally = self.record.rank_totals.entry(r).or_default();
            tally.count += 1;
            tally.last_seen = Some(now.clone());
        }
        self.record.last_played_at = Some(now.clone());

        let busted = self.record.bankroll == 0;
        if busted {
            self.record.busts += 1;
            self.record.last_bust_at = Some(now);
            self.record.hands_since_bust = 0;
            self.record.killer_count = 0;
            self.record.bankroll = self.config.base_stake;
        }

        // The resolved hand goes back into circulation; every card stays
        // accounted for between hands
        self.shoe.discard(&self.hand);
        let final_hand = std::mem::take(&mut self.hand);
        self.wager = 0;
        self.session_hand += 1;

        let persist_warning = self.store.save(&self.record).err().map(|e| e.to_string());
        self.phase = if busted { Phase::Busted } else { Phase::Resolved };

        Ok(HandOutcome {
            final_hand,
            replaced,
            rank,
            wager,
            gross_return: gross,
            net,
            killer: killer_outcome,
            winnings,
            losses,
            bankroll: self.record.bankroll,
            new_biggest_win,
            new_biggest_loss,
            new_longest_streak,
            busted,
            persist_warning,
        })
    }

    /// Closes the session at the wager prompt, checkpointing the record one
    /// last time. Never available mid-hand.
    pub fn finish(&mut self) -> Result<SessionSummary, GameError> {
        match self.phase {
            Phase::AwaitingWager => {}
            Phase::VoluntaryExit | Phase::Busted => return Err(GameError::SessionEnded),
            _ => return Err(GameError::HandInProgress),
        }
        self.record.last_played_at = Some(now_ts());
        let persist_warning = self.store.save(&self.record).err().map(|e| e.to_string());
        self.phase = Phase::VoluntaryExit;
        Ok(SessionSummary {
            starting_bankroll: self.starting_bankroll,
            final_bankroll: self.record.bankroll,
            hands_played: self.session_hand,
            persist_warning,
        })
    }

    /// A draw failing after capacity was guaranteed means the shoe's
    /// bookkeeping is broken. Give the wager back, checkpoint, and let the
    /// error end the session.
    fn abort_hand(&mut self, err: GameError) -> GameError {
        self.record.bankroll += self.wager;
        self.wager = 0;
        self.hand.clear();
        let _ = self.store.save(&self.record);
        err
    }
}
