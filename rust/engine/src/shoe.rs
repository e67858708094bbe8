use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{pack_of_cards, Card};
use crate::config::PACK_SIZE;
use crate::errors::GameError;

/// Multi-pack shoe the hands are drawn from. Cards only move between the
/// active pile, the discard pile and the player's hand; the population
/// changes only through [`rebuild_and_shuffle`](Shoe::rebuild_and_shuffle).
#[derive(Debug)]
pub struct Shoe {
    active: Vec<Card>,
    discards: Vec<Card>,
    packs: u8,
    rng: ChaCha20Rng,
}

impl Shoe {
    pub fn new_with_seed(packs: u8, seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep pack order until a shuffle is requested explicitly
        Self {
            active: build_population(packs),
            discards: Vec::new(),
            packs,
            rng,
        }
    }

    pub fn packs(&self) -> u8 {
        self.packs
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn discard_len(&self) -> usize {
        self.discards.len()
    }

    /// Cards still in circulation: active pile plus discards.
    pub fn available(&self) -> usize {
        self.active.len() + self.discards.len()
    }

    /// Throws away both piles and rebuilds the full population, freshly
    /// shuffled. Also used between sessions.
    pub fn rebuild_and_shuffle(&mut self) {
        self.active = build_population(self.packs);
        self.active.shuffle(&mut self.rng);
        self.discards.clear();
    }

    /// Rebuilds the shoe when fewer than `need` cards remain in circulation,
    /// so every draw until the next check is guaranteed to succeed.
    /// Returns true when the rebuild happened.
    pub fn ensure_capacity(&mut self, need: usize) -> bool {
        if self.available() < need {
            self.rebuild_and_shuffle();
            true
        } else {
            false
        }
    }

    /// Draws `n` cards off the top of the active pile, shuffling the discard
    /// pile back underneath whenever the active pile runs dry mid-draw.
    /// Fails only when the whole circulation cannot cover the draw.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        let available = self.available();
        if available < n {
            return Err(GameError::ShoeExhausted {
                requested: n,
                available,
            });
        }
        let mut drawn = Vec::with_capacity(n);
        for _ in 0..n {
            if self.active.is_empty() {
                self.recycle_discards();
            }
            let card = self.active.pop().ok_or(GameError::ShoeExhausted {
                requested: n,
                available,
            })?;
            drawn.push(card);
        }
        Ok(drawn)
    }

    /// Returns cards from play to the discard pile.
    pub fn discard(&mut self, cards: &[Card]) {
        self.discards.extend_from_slice(cards);
    }

    fn recycle_discards(&mut self) {
        self.discards.shuffle(&mut self.rng);
        // Recycled cards go under whatever is left of the active pile
        let mut rest = std::mem::take(&mut self.active);
        self.active = std::mem::take(&mut self.discards);
        self.active.append(&mut rest);
    }
}

fn build_population(packs: u8) -> Vec<Card> {
    let mut v = Vec::with_capacity(packs as usize * PACK_SIZE);
    for p in 0..packs {
        v.extend(pack_of_cards(p));
    }
    v
}
