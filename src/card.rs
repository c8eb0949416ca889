use ratatui::style::Color;

pub type CardId = u32;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Category {
    Creature,
    Trap,
    Spell,
}

impl Category {
    pub fn symbol(&self) -> &str {
        match self {
            Category::Creature => "⚔",
            Category::Trap => "☠",
            Category::Spell => "✦",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Category::Creature => Color::White,
            Category::Trap => Color::Magenta,
            Category::Spell => Color::LightBlue,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Category::Creature => "CREATURE",
            Category::Trap => "TRAP",
            Category::Spell => "SPELL",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub id: CardId,
    pub name: &'static str,
    pub cost: u8,
    pub attack: u8,
    pub defense: u8,
    pub description: &'static str,
    pub category: Category,
    pub image: &'static str,
}

impl Card {
    pub fn is_trap(&self) -> bool {
        self.category == Category::Trap
    }

    /// Stat line used on thumbnails: `E4 3/5`.
    pub fn stats(&self) -> String {
        format!("E{} {}/{}", self.cost, self.attack, self.defense)
    }

    pub fn display(&self) -> String {
        format!("{} {}", self.category.symbol(), self.name)
    }
}

/// The cards a fresh board deals into the hand, in hand order.
pub fn catalog() -> Vec<Card> {
    vec![
        Card {
            id: 1,
            name: "Retired Paladin",
            cost: 1,
            attack: 2,
            defense: 2,
            description: "A weary warrior who has seen too many battles.",
            category: Category::Creature,
            image: "retiredPaladin.webp",
        },
        Card {
            id: 2,
            name: "Blue Dragon",
            cost: 7,
            attack: 8,
            defense: 9,
            description: "A legendary blue dragon that breathes fire.",
            category: Category::Creature,
            image: "blueDragon.webp",
        },
        Card {
            id: 3,
            name: "Evy",
            cost: 4,
            attack: 3,
            defense: 5,
            description: "A mysterious sorceress who heals an ally for 4 at the start of each of your turns.",
            category: Category::Creature,
            image: "evy.webp",
        },
        Card {
            id: 4,
            name: "Yona",
            cost: 6,
            attack: 8,
            defense: 5,
            description: "A warrior who strikes with a magic sword.",
            category: Category::Creature,
            image: "yona.webp",
        },
        Card {
            id: 5,
            name: "Mimic",
            cost: 4,
            attack: 2,
            defense: 2,
            description: "Copies the last two cards your opponent played.",
            category: Category::Creature,
            image: "mimic.webp",
        },
        Card {
            id: 6,
            name: "Shield Man",
            cost: 2,
            attack: 1,
            defense: 6,
            description: "A warrior who defends with a shield.",
            category: Category::Creature,
            image: "shieldMan.webp",
        },
        Card {
            id: 7,
            name: "Hydra",
            cost: 9,
            attack: 9,
            defense: 9,
            description: "Destroy an enemy with less attack.",
            category: Category::Creature,
            image: "hydra.webp",
        },
        Card {
            id: 8,
            name: "Pitfall",
            cost: 3,
            attack: 0,
            defense: 0,
            description: "When an enemy attacks, it falls in and loses its turn.",
            category: Category::Trap,
            image: "pitfall.webp",
        },
        Card {
            id: 9,
            name: "Arcane Bolt",
            cost: 2,
            attack: 4,
            defense: 0,
            description: "Deal 4 damage to a target creature.",
            category: Category::Spell,
            image: "arcaneBolt.webp",
        },
    ]
}
