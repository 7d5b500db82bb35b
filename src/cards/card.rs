use crate::Power;

/// The eight card kinds of a Love Letter deck.
///
/// Declaration order follows power, so the derived Ord is the
/// total order the Baron compares hands with. Copies of the same
/// kind are indistinguishable, so a kind is the whole card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Card {
    Guard,
    Priest,
    Baron,
    Handmaid,
    Prince,
    King,
    Countess,
    Princess,
}

impl Card {
    pub const ALL: [Card; 8] = [
        Card::Guard,
        Card::Priest,
        Card::Baron,
        Card::Handmaid,
        Card::Prince,
        Card::King,
        Card::Countess,
        Card::Princess,
    ];

    pub fn power(&self) -> Power {
        match self {
            Card::Guard => 1,
            Card::Priest => 2,
            Card::Baron => 3,
            Card::Handmaid => 4,
            Card::Prince => 5,
            Card::King => 6,
            Card::Countess => 7,
            Card::Princess => 8,
        }
    }

    /// How many copies of this kind a standard deck carries.
    pub fn copies(&self) -> usize {
        match self {
            Card::Guard => 5,
            Card::Priest => 2,
            Card::Baron => 2,
            Card::Handmaid => 2,
            Card::Prince => 2,
            Card::King => 1,
            Card::Countess => 1,
            Card::Princess => 1,
        }
    }

    /// Whether playing this card begins with naming a target player.
    pub fn targets(&self) -> bool {
        match self {
            Card::Guard | Card::Priest | Card::Baron | Card::Prince | Card::King => true,
            Card::Handmaid | Card::Countess | Card::Princess => false,
        }
    }

    /// Rules text shown by the /cards command.
    pub fn rules(&self) -> &'static str {
        match self {
            Card::Guard => {
                "1 - Guard: Guess the card of another target player. If you guessed right, that player is knocked out of the round."
            }
            Card::Priest => "2 - Priest: Look at the card of another target player.",
            Card::Baron => {
                "3 - Baron: Compare your card with the card of another target player. The player with the lower value card is knocked out of the round."
            }
            Card::Handmaid => {
                "4 - Handmaid: Until your next turn you are protected. Other players cannot target you."
            }
            Card::Prince => {
                "5 - Prince: Choose a player. That player has to discard his card and draw a new one."
            }
            Card::King => "6 - King: Exchange your card with the card of another target player.",
            Card::Countess => {
                "7 - Countess: If you have either King or Prince in your hand additionally to the Countess, you have to play the Countess."
            }
            Card::Princess => {
                "8 - Princess: If you discard the Princess for any reason, you are knocked out of the round. Playing the Princess counts as discarding."
            }
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Card::Guard => write!(f, "Guard"),
            Card::Priest => write!(f, "Priest"),
            Card::Baron => write!(f, "Baron"),
            Card::Handmaid => write!(f, "Handmaid"),
            Card::Prince => write!(f, "Prince"),
            Card::King => write!(f, "King"),
            Card::Countess => write!(f, "Countess"),
            Card::Princess => write!(f, "Princess"),
        }
    }
}

impl TryFrom<&str> for Card {
    type Error = &'static str;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "Guard" => Ok(Card::Guard),
            "Priest" => Ok(Card::Priest),
            "Baron" => Ok(Card::Baron),
            "Handmaid" => Ok(Card::Handmaid),
            "Prince" => Ok(Card::Prince),
            "King" => Ok(Card::King),
            "Countess" => Ok(Card::Countess),
            "Princess" => Ok(Card::Princess),
            _ => Err("not a card name"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_totals_sixteen() {
        let total = Card::ALL.iter().map(|c| c.copies()).sum::<usize>();
        assert!(total == crate::DECK_SIZE);
    }

    #[test]
    fn power_follows_declaration_order() {
        assert!(Card::Guard < Card::Priest);
        assert!(Card::Countess < Card::Princess);
        for pair in Card::ALL.windows(2) {
            assert!(pair[0].power() + 1 == pair[1].power());
        }
    }

    #[test]
    fn names_parse_exactly() {
        assert!(Card::try_from("Guard") == Ok(Card::Guard));
        assert!(Card::try_from("guard").is_err());
        assert!(Card::try_from("Queen").is_err());
        for card in Card::ALL {
            assert!(Card::try_from(card.to_string().as_str()) == Ok(card));
        }
    }
}
