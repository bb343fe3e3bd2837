use crate::utils::error::{DrillError, Result};
use std::fmt;

pub const SUITS: [&str; 4] = ["Hearts", "Diamonds", "Clubs", "Spades"];
pub const VALUES: [&str; 13] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Card {
    pub suit: &'static str,
    pub value: &'static str,
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.value, self.suit)
    }
}

pub struct Deck {
    cards: Vec<Card>,
    rng: fastrand::Rng,
}

impl Deck {
    /// 牌組從呼叫端的亂數產生器分出自己的序列
    pub fn new(rng: &mut fastrand::Rng) -> Self {
        let mut deck = Self {
            cards: Vec::with_capacity(SUITS.len() * VALUES.len()),
            rng: rng.fork(),
        };
        deck.shuffle();
        deck
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

    /// 重新補滿 52 張後洗牌
    pub fn shuffle(&mut self) {
        self.cards = SUITS
            .iter()
            .flat_map(|&suit| VALUES.iter().map(move |&value| Card { suit, value }))
            .collect();
        self.rng.shuffle(&mut self.cards);
    }

    pub fn deal(&mut self) -> Result<Card> {
        if self.cards.is_empty() {
            return Err(DrillError::ProcessingError {
                message: "No cards left in the deck!".to_string(),
            });
        }
        let index = self.rng.usize(..self.cards.len());
        Ok(self.cards.swap_remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_full_deck_is_unique() {
        let deck = Deck::new(&mut fastrand::Rng::with_seed(11));
        assert_eq!(deck.len(), 52);
        let unique: HashSet<&Card> = deck.cards().iter().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn test_same_seed_deals_same_cards() {
        let mut first = Deck::new(&mut fastrand::Rng::with_seed(3));
        let mut second = Deck::new(&mut fastrand::Rng::with_seed(3));
        for _ in 0..5 {
            assert_eq!(first.deal().unwrap(), second.deal().unwrap());
        }
    }

    #[test]
    fn test_deal_until_empty() {
        let mut deck = Deck::new(&mut fastrand::Rng::with_seed(5));
        let card = deck.deal().unwrap();
        assert_eq!(deck.len(), 51);
        assert!(!deck.cards().contains(&card));

        deck.shuffle();
        assert_eq!(deck.len(), 52);

        for _ in 0..52 {
            deck.deal().unwrap();
        }
        assert!(deck.is_empty());
        let err = deck.deal().unwrap_err();
        assert!(err.to_string().contains("No cards left in the deck!"));
    }

    #[test]
    fn test_card_display() {
        let card = Card {
            suit: "Hearts",
            value: "A",
        };
        assert_eq!(card.to_string(), "A of Hearts");
    }
}
