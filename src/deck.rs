use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("card {0} is not in the deck")]
    UnknownCard(Card),
    #[error("requested {requested} cards but only {remaining} remain")]
    InsufficientCards { requested: usize, remaining: usize },
}

/// A standard 52-card deck, thinned by whatever cards are already known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// ```
    /// use holdem_equity::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for s in Suit::ALL {
            for r in Rank::ALL {
                cards.push(Card::new(r, s));
            }
        }
        Self { cards }
    }

    /// A standard deck with `known` already taken out.
    pub fn without(known: &[Card]) -> Result<Self, DeckError> {
        let mut deck = Self::standard();
        deck.remove(known)?;
        Ok(deck)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Remove every card in `cards`. Fails without touching the deck if any card is
    /// absent, which includes a card listed twice.
    pub fn remove(&mut self, cards: &[Card]) -> Result<(), DeckError> {
        let mut present = [false; 52];
        for c in &self.cards {
            present[c.index()] = true;
        }
        for &c in cards {
            if !present[c.index()] {
                return Err(DeckError::UnknownCard(c));
            }
            present[c.index()] = false;
        }
        self.cards.retain(|c| present[c.index()]);
        Ok(())
    }

    /// Move `n` uniformly chosen cards into the tail of the deck and return them.
    ///
    /// Nothing is removed: the pool is re-sampled in place on every call, so one
    /// deck serves any number of independent trials. Within a single call the
    /// returned cards are distinct.
    pub fn sample<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> Result<&[Card], DeckError> {
        let len = self.cards.len();
        if n > len {
            return Err(DeckError::InsufficientCards { requested: n, remaining: len });
        }
        let (picked, _) = self.cards.partial_shuffle(rng, n);
        Ok(&*picked)
    }

    /// Draw `n` cards uniformly at random without replacement, shrinking the deck.
    pub fn draw<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> Result<Vec<Card>, DeckError> {
        self.sample(n, rng)?;
        let keep = self.cards.len() - n;
        Ok(self.cards.split_off(keep))
    }
}
