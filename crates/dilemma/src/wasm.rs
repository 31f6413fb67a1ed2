//! WASM bindings for browser match replay

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;
use crate::{run_match, Choice, Puppet, Registry, RoundResult, SeededRng};

#[derive(serde::Serialize)]
struct Replay {
    label: String,
    totals_a: [u32; 3],
    totals_b: [u32; 3],
    rounds: Vec<RoundResult>,
}

/// Replay a match with full round-by-round details
///
/// # Arguments
/// * `player_a` - Registry name of player A
/// * `player_b` - Registry name of player B
/// * `rounds` - Number of rounds to play
/// * `seed` - Seed for randomized strategies (A gets stream 0, B stream 1)
///
/// # Returns
/// `{label, totals_a, totals_b, rounds}`
#[wasm_bindgen]
pub fn replay_match(
    player_a: &str,
    player_b: &str,
    rounds: u32,
    seed: u64,
) -> Result<JsValue, JsError> {
    let registry = Registry::builtin();
    let mut a = registry
        .construct(player_a)
        .map_err(|e| JsError::new(&format!("Invalid player A: {}", e)))?;
    let mut b = registry
        .construct(player_b)
        .map_err(|e| JsError::new(&format!("Invalid player B: {}", e)))?;

    let master = SeededRng::new(seed);
    a.seed_rng(master.derive(0));
    b.seed_rng(master.derive(1));

    let result = run_match(a, b, rounds)
        .map_err(|e| JsError::new(&format!("Match aborted: {}", e)))?;
    to_js(&result)
}

/// Replay a registered strategy against a scripted opponent.
///
/// `script` holds one byte per round, 0 for Defect and anything else for
/// Cooperate; the puppet repeats its last choice once the script runs out.
#[wasm_bindgen]
pub fn replay_against_script(player: &str, script: &[u8], rounds: u32) -> Result<JsValue, JsError> {
    let strategy = Registry::builtin()
        .construct(player)
        .map_err(|e| JsError::new(&format!("Invalid player: {}", e)))?;
    let puppet = Puppet::from_bits(script);

    let result = run_match(strategy, Box::new(puppet), rounds)
        .map_err(|e| JsError::new(&format!("Match aborted: {}", e)))?;
    to_js(&result)
}

fn to_js(result: &crate::MatchResult) -> Result<JsValue, JsError> {
    let summary = result.summary();
    let replay = Replay {
        label: summary.label,
        totals_a: summary.totals_a,
        totals_b: summary.totals_b,
        rounds: result.rounds(),
    };
    serde_wasm_bindgen::to_value(&replay)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

#[derive(serde::Serialize)]
struct StrategyInfo {
    name: &'static str,
    description: &'static str,
}

/// Get all registered strategies with their descriptions
#[wasm_bindgen]
pub fn get_strategy_types() -> Result<JsValue, JsError> {
    let types: Vec<StrategyInfo> = Registry::builtin()
        .entries()
        .map(|e| StrategyInfo {
            name: e.name,
            description: e.description,
        })
        .collect();

    serde_wasm_bindgen::to_value(&types)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Get human-readable description of a strategy
#[wasm_bindgen]
pub fn get_strategy_description(name: &str) -> Result<String, JsError> {
    Registry::builtin()
        .entry(name)
        .map(|e| e.description.to_string())
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Payoff pair for two choices given as booleans (true = cooperate)
#[wasm_bindgen]
pub fn get_payoff(cooperate_a: bool, cooperate_b: bool) -> Vec<u8> {
    let choice = |c: bool| if c { Choice::Cooperate } else { Choice::Defect };
    let (a, b) = crate::payoff(choice(cooperate_a), choice(cooperate_b));
    vec![a, b]
}
