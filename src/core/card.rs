//! Card types and definitions

use crate::core::{CardId, InstanceId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Broad card category; decides which actions may play the card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Common,
    Ritual,
    God,
}

impl CardKind {
    /// Maximum copies of one card name a legal deck may hold
    pub fn copy_limit(&self) -> usize {
        match self {
            CardKind::God => 1,
            CardKind::Common | CardKind::Ritual => 3,
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CardKind::Common => "common",
            CardKind::Ritual => "ritual",
            CardKind::God => "god",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Scripted effect of a ritual card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RitualKind {
    /// Sacrifice an own board occupant: +1 blood (plus bonus), draw 2
    SacrificeForCards,
    /// Next sacrifice yields one extra blood
    BloodBonus,
    /// +1/+1 to an own board occupant
    StatBuff,
}

/// On-arrival effect of a god, resolved by `game::effects`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "amount")]
pub enum ArrivalEffect {
    #[default]
    None,
    /// Deal damage to every enemy board occupant
    DamageEnemyBoard(i32),
    /// Announcement only
    LunarVeil,
}

/// A card as it exists in a deck, hand or discard pile
///
/// Identity is the `id`: two cards with identical stats are still distinct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub kind: CardKind,
    pub rarity: Rarity,
    /// Opaque art reference, only meaningful to a renderer
    pub image: String,
    pub attack: i32,
    pub health: i32,
    /// Present only on ritual cards
    pub ritual: Option<RitualKind>,
    /// Invocation cost (gods only)
    pub blood_cost: u32,
    pub arrival: ArrivalEffect,
    pub effect: String,
    pub lore: Option<String>,
}

impl Card {
    pub fn new(id: CardId, name: impl Into<String>, kind: CardKind) -> Self {
        Card {
            id,
            name: name.into(),
            kind,
            rarity: Rarity::Common,
            image: String::new(),
            attack: 0,
            health: 0,
            ritual: None,
            blood_cost: 0,
            arrival: ArrivalEffect::None,
            effect: String::new(),
            lore: None,
        }
    }

    pub fn with_stats(mut self, attack: i32, health: i32) -> Self {
        self.attack = attack;
        self.health = health;
        self
    }

    pub fn with_ritual(mut self, ritual: RitualKind) -> Self {
        self.ritual = Some(ritual);
        self
    }

    pub fn with_blood_cost(mut self, cost: u32) -> Self {
        self.blood_cost = cost;
        self
    }

    pub fn with_arrival(mut self, arrival: ArrivalEffect) -> Self {
        self.arrival = arrival;
        self
    }

    pub fn is_common(&self) -> bool {
        self.kind == CardKind::Common
    }

    pub fn is_god(&self) -> bool {
        self.kind == CardKind::God
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A card in play (board lane, sacrifice slot or god slot)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    pub id: InstanceId,
    pub base: Card,
    pub current_hp: i32,
    pub current_attack: i32,
}

impl CardInstance {
    /// Fresh instance at full health; a card printed with 0 health still gets 1
    pub fn new(id: InstanceId, base: Card) -> Self {
        CardInstance {
            id,
            current_hp: base.health.max(1),
            current_attack: base.attack,
            base,
        }
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.current_hp -= amount;
    }

    pub fn is_destroyed(&self) -> bool {
        self.current_hp <= 0
    }

    pub fn buff(&mut self, attack: i32, health: i32) {
        self.current_attack += attack;
        self.current_hp += health;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityId;

    #[test]
    fn test_card_identity_is_not_structural() {
        let a = Card::new(EntityId::new(1), "Soldier", CardKind::Common).with_stats(1, 1);
        let b = Card::new(EntityId::new(2), "Soldier", CardKind::Common).with_stats(1, 1);

        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_instance_health_floor() {
        let card = Card::new(EntityId::new(1), "Ghost", CardKind::Common).with_stats(2, 0);
        let inst = CardInstance::new(EntityId::new(10), card);

        assert_eq!(inst.current_hp, 1);
        assert_eq!(inst.current_attack, 2);
        assert!(!inst.is_destroyed());
    }

    #[test]
    fn test_instance_damage_and_buff() {
        let card = Card::new(EntityId::new(1), "Warrior", CardKind::Common).with_stats(2, 3);
        let mut inst = CardInstance::new(EntityId::new(10), card);

        inst.buff(1, 1);
        assert_eq!(inst.current_attack, 3);
        assert_eq!(inst.current_hp, 4);
        assert_eq!(inst.base.attack, 2);

        inst.take_damage(4);
        assert!(inst.is_destroyed());
    }

    #[test]
    fn test_copy_limits() {
        assert_eq!(CardKind::Common.copy_limit(), 3);
        assert_eq!(CardKind::Ritual.copy_limit(), 3);
        assert_eq!(CardKind::God.copy_limit(), 1);
    }
}
