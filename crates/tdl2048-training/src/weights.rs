//! Initial values of the network weights.
//!
//! The `init` key of a player configuration selects one of:
//!
//! - empty or `0`: all weights zero (the default)
//! - a float such as `0.5`: every weight set to that constant
//! - `normal:<sigma>`: independent samples of `N(0, sigma²)`, drawn from the
//!   player's seeded generator so that runs are reproducible

use std::{fmt, str::FromStr};

use rand::Rng;
use rand_distr::{Distribution as _, Normal};
use tdl2048_evaluator::network::NTupleNetwork;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WeightInit {
    #[default]
    Zero,
    Constant(f32),
    Normal { sigma: f32 },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid weight initialisation: {_0:?}")]
pub struct ParseWeightInitError(#[error(not(source))] pub String);

impl FromStr for WeightInit {
    type Err = ParseWeightInitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseWeightInitError(s.to_owned());
        let s = s.trim();
        if let Some(sigma) = s.strip_prefix("normal:") {
            let sigma: f32 = sigma.parse().map_err(|_| invalid())?;
            if !sigma.is_finite() || sigma < 0.0 {
                return Err(invalid());
            }
            return Ok(Self::Normal { sigma });
        }
        if s.is_empty() {
            return Ok(Self::Zero);
        }
        let value: f32 = s.parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        if value == 0.0 {
            Ok(Self::Zero)
        } else {
            Ok(Self::Constant(value))
        }
    }
}

impl fmt::Display for WeightInit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => write!(f, "0"),
            Self::Constant(value) => write!(f, "{value}"),
            Self::Normal { sigma } => write!(f, "normal:{sigma}"),
        }
    }
}

impl WeightInit {
    /// Overwrites every weight of `network`.
    ///
    /// A `Normal` with a negative or NaN sigma leaves all weights at zero.
    pub fn apply<R>(self, network: &mut NTupleNetwork, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let normal = match self {
            Self::Normal { sigma } => Normal::new(0.0, sigma).ok(),
            _ => None,
        };
        for table in network.tables_mut() {
            let weights = table.as_mut_slice();
            match (self, normal) {
                (Self::Constant(value), _) => weights.fill(value),
                (Self::Normal { .. }, Some(normal)) => {
                    for w in weights {
                        *w = normal.sample(rng);
                    }
                }
                _ => weights.fill(0.0),
            }
        }
    }
}
