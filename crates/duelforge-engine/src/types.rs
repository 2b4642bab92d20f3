//! Duel creation options and per-call request types.

use duelforge_protocol::{DuelMode, QueryField, WireLocation, WirePosition};

/// Starting conditions for one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamConfig {
    pub starting_lp: u32,
    pub starting_draw_count: u32,
    pub draw_count_per_turn: u32,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            starting_lp: 8000,
            starting_draw_count: 5,
            draw_count_per_turn: 1,
        }
    }
}

/// Options for creating a duel.
#[derive(Debug, Clone, Default)]
pub struct DuelOptions {
    /// RNG seed. Zero lets the backend pick.
    pub seed: u32,
    /// Rule flags, usually one of the [`DuelMode`] presets.
    pub mode: DuelMode,
    pub teams: [TeamConfig; 2],
}

/// A card to add to the duel before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCardRequest {
    pub team: u8,
    pub duelist: u8,
    pub code: u32,
    pub controller: u8,
    pub location: WireLocation,
    pub sequence: u32,
    pub position: WirePosition,
}

/// A single-card query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryRequest {
    pub flags: QueryField,
    pub controller: u8,
    pub location: WireLocation,
    pub sequence: u32,
    /// Index into the overlay stack when querying a material.
    pub overlay_sequence: u32,
}

/// A whole-location query: one result slot per card in the location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationQueryRequest {
    pub flags: QueryField,
    pub controller: u8,
    pub location: WireLocation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_team_matches_standard_rules() {
        let team = TeamConfig::default();
        assert_eq!(team.starting_lp, 8000);
        assert_eq!(team.starting_draw_count, 5);
        assert_eq!(team.draw_count_per_turn, 1);
    }
}
