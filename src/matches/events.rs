use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use super::MatchError;
use crate::{
    lineup::PlayerId,
    template::{self, GameKind},
};

/// Highest score that can be checked out with three darts
pub const MAX_CHECKOUT: u32 = 170;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum EventType {
    /// Visit of 95 or more
    #[serde(rename = "high_95")]
    #[strum(serialize = "high_95")]
    High95,
    #[serde(rename = "high_133")]
    #[strum(serialize = "high_133")]
    High133,
    #[serde(rename = "high_170")]
    #[strum(serialize = "high_170")]
    High170,
    #[serde(rename = "miss")]
    #[strum(serialize = "miss")]
    Miss,
    /// Leg finished within 3 rounds
    #[serde(rename = "checkout_3")]
    #[strum(serialize = "checkout_3")]
    Checkout3,
    #[serde(rename = "checkout_4")]
    #[strum(serialize = "checkout_4")]
    Checkout4,
    #[serde(rename = "checkout_5")]
    #[strum(serialize = "checkout_5")]
    Checkout5,
    #[serde(rename = "checkout_6")]
    #[strum(serialize = "checkout_6")]
    Checkout6,
    #[serde(rename = "max_checkout")]
    #[strum(serialize = "max_checkout")]
    MaxCheckout,
}

/// Event counters of one player in one singles game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEventCounts {
    pub game_id: u8,
    pub player_id: PlayerId,
    pub high_95: u32,
    pub high_133: u32,
    pub high_170: u32,
    pub misses: u32,
    pub checkout_3: u32,
    pub checkout_4: u32,
    pub checkout_5: u32,
    pub checkout_6: u32,
    pub max_checkout: u32,
}

impl PlayerEventCounts {
    pub fn new(game_id: u8, player_id: &str) -> Self {
        Self {
            game_id,
            player_id: player_id.to_string(),
            ..Self::default()
        }
    }

    /// Adds `delta` to a counter, or raises the max checkout to `delta`.
    pub fn apply(&mut self, event: EventType, delta: i64) -> Result<(), MatchError> {
        if event == EventType::MaxCheckout {
            let checkout = u32::try_from(delta)
                .ok()
                .filter(|value| *value <= MAX_CHECKOUT)
                .ok_or_else(|| {
                    MatchError::InvalidAdjustment(format!("checkout {delta} is not possible"))
                })?;
            self.max_checkout = self.max_checkout.max(checkout);
            return Ok(());
        }

        let counter = self.counter_mut(event);
        let updated = i64::from(*counter) + delta;
        *counter = u32::try_from(updated).map_err(|_| {
            MatchError::InvalidAdjustment(format!("{event} cannot become {updated}"))
        })?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::new(self.game_id, &self.player_id)
    }

    fn counter_mut(&mut self, event: EventType) -> &mut u32 {
        match event {
            EventType::High95 => &mut self.high_95,
            EventType::High133 => &mut self.high_133,
            EventType::High170 => &mut self.high_170,
            EventType::Miss => &mut self.misses,
            EventType::Checkout3 => &mut self.checkout_3,
            EventType::Checkout4 => &mut self.checkout_4,
            EventType::Checkout5 => &mut self.checkout_5,
            EventType::Checkout6 => &mut self.checkout_6,
            EventType::MaxCheckout => &mut self.max_checkout,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEventLedger {
    entries: Vec<PlayerEventCounts>,
}

impl PlayerEventLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        game_id: u8,
        player_id: &str,
        event: EventType,
        delta: i64,
    ) -> Result<PlayerEventCounts, MatchError> {
        let game = template::game(game_id).ok_or(MatchError::UnknownGame(game_id))?;
        if game.kind != GameKind::Single {
            return Err(MatchError::NotASinglesGame(game_id));
        }

        let player_id = player_id.trim();
        if player_id.is_empty() {
            return Err(MatchError::EmptyPlayer);
        }

        let index = match self
            .entries
            .iter()
            .position(|entry| entry.game_id == game_id && entry.player_id == player_id)
        {
            Some(index) => index,
            None => {
                self.entries.push(PlayerEventCounts::new(game_id, player_id));
                self.entries.len() - 1
            }
        };

        // Work on a copy so a rejected adjustment leaves the ledger untouched
        let mut updated = self.entries[index].clone();
        let applied = updated.apply(event, delta);
        if applied.is_ok() {
            self.entries[index] = updated.clone();
        }
        // Counters back at zero leave no trace of the player in this game
        if self.entries[index].is_empty() {
            self.entries.remove(index);
        }
        applied.map(|_| updated)
    }

    /// Whether `player_id` has any non-zero counter in `game_id`
    pub fn has_events(&self, game_id: u8, player_id: &str) -> bool {
        self.get(game_id, player_id).is_some()
    }

    pub fn has_any_events(&self, player_id: &str) -> bool {
        self.entries.iter().any(|entry| entry.player_id == player_id)
    }

    pub fn get(&self, game_id: u8, player_id: &str) -> Option<&PlayerEventCounts> {
        self.entries
            .iter()
            .find(|entry| entry.game_id == game_id && entry.player_id == player_id)
    }

    pub fn entries(&self) -> &[PlayerEventCounts] {
        &self.entries
    }
}
