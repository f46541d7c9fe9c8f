//! Agent configuration strings.
//!
//! Each agent is configured by a whitespace-separated list of `key=value`
//! pairs such as `name=learner alpha=0.1 save=weights.bin`. The pairs are
//! applied on top of per-role defaults; a later pair overrides an earlier one
//! with the same key. Recognised keys are parsed into typed fields once, and
//! every pair (recognised or not) stays available through
//! [`AgentConfig::property`].

use std::{collections::BTreeMap, path::PathBuf, str::FromStr};

use tdl2048_engine::{Board, Cell, Role};
use tdl2048_evaluator::heuristic::HeuristicPreset;
use tdl2048_training::weights::WeightInit;

pub const PLAYER_DEFAULTS: &str = "name=dummy role=play";
pub const ENVIRONMENT_DEFAULTS: &str = "name=random role=environment";

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("unknown configuration key: {_0:?}")]
    UnknownKey(#[error(not(source))] String),
    #[display("malformed configuration entry {_0:?}, expected key=value")]
    Malformed(#[error(not(source))] String),
    #[display("invalid value {value:?} for configuration key {key:?}")]
    InvalidValue { key: String, value: String },
}

/// Move policy of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display)]
pub enum Policy {
    /// Learning value network.
    #[default]
    #[display("td")]
    Td,
    #[display("greedy")]
    Greedy,
    #[display("two-ply")]
    TwoPly,
    #[display("heuristic")]
    Heuristic,
    #[display("random")]
    Random,
}

impl Policy {
    pub const ALL: [Self; 5] = [
        Self::Td,
        Self::Greedy,
        Self::TwoPly,
        Self::Heuristic,
        Self::Random,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown policy: {_0:?}")]
pub struct ParsePolicyError(#[error(not(source))] pub String);

impl FromStr for Policy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParsePolicyError(s.to_owned()))
    }
}

/// Typed configuration of one agent.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    pub name: String,
    pub role: Role,
    pub seed: Option<u64>,
    pub alpha: f32,
    pub init: WeightInit,
    pub load: Option<PathBuf>,
    pub save: Option<PathBuf>,
    pub policy: Policy,
    pub preset: HeuristicPreset,
    /// Exponent of the tile that ends an episode as a win.
    pub win: Option<Cell>,
    properties: BTreeMap<String, String>,
}

impl AgentConfig {
    /// Parses `args` on top of `defaults`.
    pub fn with_defaults(defaults: &str, args: &str) -> Result<Self, ConfigError> {
        let mut properties = BTreeMap::new();
        for pair in defaults.split_whitespace().chain(args.split_whitespace()) {
            let (key, value) = split_pair(pair)?;
            properties.insert(key.to_owned(), value.to_owned());
        }
        Self::from_properties(properties)
    }

    pub fn player(args: &str) -> Result<Self, ConfigError> {
        Self::with_defaults(PLAYER_DEFAULTS, args)
    }

    pub fn environment(args: &str) -> Result<Self, ConfigError> {
        Self::with_defaults(ENVIRONMENT_DEFAULTS, args)
    }

    /// Raw value of `key` as it was given.
    pub fn property(&self, key: &str) -> Result<&str, ConfigError> {
        self.properties
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_owned()))
    }

    /// Applies one more `key=value` pair and re-parses the typed fields.
    pub fn notify(&mut self, message: &str) -> Result<(), ConfigError> {
        let (key, value) = split_pair(message)?;
        let mut properties = self.properties.clone();
        properties.insert(key.to_owned(), value.to_owned());
        *self = Self::from_properties(properties)?;
        Ok(())
    }

    /// Keys that no typed field consumes.
    pub fn extra_keys(&self) -> impl Iterator<Item = &str> {
        self.properties
            .keys()
            .map(String::as_str)
            .filter(|key| !KNOWN_KEYS.contains(key))
    }

    fn from_properties(properties: BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| properties.get(key).map(String::as_str);
        let name = get("name").unwrap_or("unknown").to_owned();
        let role = match get("role") {
            Some(value) => parse_value("role", value)?,
            None => Role::Player,
        };
        let seed = get("seed").map(|v| parse_value("seed", v)).transpose()?;
        let alpha = get("alpha")
            .map(|v| parse_value::<f32>("alpha", v))
            .transpose()?
            .unwrap_or(0.0);
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(invalid("alpha", get("alpha").unwrap_or_default()));
        }
        let init = get("init")
            .map(|v| parse_value("init", v))
            .transpose()?
            .unwrap_or_default();
        let load = get("load").map(PathBuf::from);
        let save = get("save").map(PathBuf::from);
        let policy = get("policy")
            .map(|v| parse_value("policy", v))
            .transpose()?
            .unwrap_or_default();
        let preset = get("preset")
            .map(|v| parse_value("preset", v))
            .transpose()?
            .unwrap_or_default();
        let win = get("win").map(parse_win_tile).transpose()?;

        Ok(Self {
            name,
            role,
            seed,
            alpha,
            init,
            load,
            save,
            policy,
            preset,
            win,
            properties,
        })
    }
}

impl FromStr for AgentConfig {
    type Err = ConfigError;

    /// Parses a configuration without role defaults.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::with_defaults("", s)
    }
}

const KNOWN_KEYS: [&str; 10] = [
    "name", "role", "seed", "alpha", "init", "load", "save", "policy", "preset", "win",
];

fn split_pair(pair: &str) -> Result<(&str, &str), ConfigError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => Err(ConfigError::Malformed(pair.to_owned())),
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_owned(),
        value: value.to_owned(),
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
{
    value.parse().map_err(|_| invalid(key, value))
}

/// Converts a tile value such as `2048` into its exponent.
fn parse_win_tile(value: &str) -> Result<Cell, ConfigError> {
    let tile: u32 = parse_value("win", value)?;
    let exponent = tile.trailing_zeros();
    if tile < 2 || !tile.is_power_of_two() || exponent >= u32::from(Board::EXPONENT_LIMIT) {
        return Err(invalid("win", value));
    }
    Cell::try_from(exponent).map_err(|_| invalid("win", value))
}
