//! WASM bindings for frontend match replay

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;
use crate::{
    describe_strategy, run_round_robin, Match, MatchConfig, MatchReport, Player, PlayerRecord,
    StrategyConfig, TournamentConfig,
};

/// Play a match and return its report
///
/// # Arguments
/// * `config_json` - JSON serialized MatchConfig
///
/// # Returns
/// JSON serialized MatchReport
#[wasm_bindgen]
pub fn replay_match(config_json: &str) -> Result<JsValue, JsError> {
    let config = MatchConfig::from_json(config_json)
        .map_err(|e| JsError::new(&format!("Invalid match config: {}", e)))?;

    let game = Match::from_config(&config).map_err(|e| JsError::new(&e.to_string()))?;
    let report = MatchReport::from_match(&game).map_err(|e| JsError::new(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&report)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Get human-readable description of a strategy
#[wasm_bindgen]
pub fn get_strategy_description(strategy_json: &str) -> Result<String, JsError> {
    let config: StrategyConfig = serde_json::from_str(strategy_json)
        .map_err(|e| JsError::new(&format!("Invalid strategy: {}", e)))?;

    Ok(describe_strategy(&config))
}

#[derive(serde::Serialize)]
struct StrategyInfo {
    id: &'static str,
    default_config: StrategyConfig,
    description: String,
}

/// Get all available strategy variants with their default parameters
#[wasm_bindgen]
pub fn get_strategy_types() -> Result<JsValue, JsError> {
    let types: Vec<StrategyInfo> = StrategyConfig::all_defaults()
        .iter()
        .map(|config| StrategyInfo {
            id: config.name(),
            default_config: *config,
            description: describe_strategy(config),
        })
        .collect();

    serde_wasm_bindgen::to_value(&types)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Run a round robin between the given players
///
/// # Arguments
/// * `entrants_json` - JSON array of PlayerRecord
/// * `config_json` - JSON serialized TournamentConfig
#[wasm_bindgen]
pub fn run_tournament(entrants_json: &str, config_json: &str) -> Result<JsValue, JsError> {
    let records: Vec<PlayerRecord> = serde_json::from_str(entrants_json)
        .map_err(|e| JsError::new(&format!("Invalid entrants: {}", e)))?;
    let config: TournamentConfig = serde_json::from_str(config_json)
        .map_err(|e| JsError::new(&format!("Invalid tournament config: {}", e)))?;

    let entrants = records
        .iter()
        .map(Player::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| JsError::new(&e.to_string()))?;
    let result = run_round_robin(&entrants, &config).map_err(|e| JsError::new(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
