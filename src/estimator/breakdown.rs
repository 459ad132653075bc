use std::fmt;

use serde::Serialize;

use crate::{config::ModelConfig, format::NumberFormat};

pub const MACS_FORMULA: &str = "2 × L × g × (E × H + H²)";
pub const PARAMS_FORMULA: &str = "(Vₛ + Vₜ) × E + 2 × g × (E × H + H² + H) + H × Vₜ + Vₜ";

/// A formula, the same formula with the config's numbers in place of its
/// symbols, and the result.
///
/// A pure function of the config and the number format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub quantity: &'static str,
    pub formula: &'static str,
    pub substituted: String,
    pub value: u128,
    pub formatted: String,
}

impl Breakdown {
    pub(super) fn macs(cfg: &ModelConfig, value: u128, format: NumberFormat) -> Self {
        let g = cfg.rnn_cell.gate_multiplier();
        let (e, h, l) = (cfg.emb_dim, cfg.hidden, cfg.max_len);
        Self {
            quantity: "MACs",
            formula: MACS_FORMULA,
            substituted: format!("2 × {l} × {g} × ({e} × {h} + {h}²)"),
            value,
            formatted: format.format(value),
        }
    }

    pub(super) fn params(cfg: &ModelConfig, value: u128, format: NumberFormat) -> Self {
        let g = cfg.rnn_cell.gate_multiplier();
        let (e, h) = (cfg.emb_dim, cfg.hidden);
        let (vs, vt) = (cfg.vocab_src, cfg.vocab_tgt);
        Self {
            quantity: "Params",
            formula: PARAMS_FORMULA,
            substituted: format!(
                "({vs} + {vt}) × {e} + 2 × {g} × ({e} × {h} + {h}² + {h}) + {h} × {vt} + {vt}"
            ),
            value,
            formatted: format.format(value),
        }
    }
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} = {}", self.quantity, self.formula)?;
        writeln!(f, "  = {}", self.substituted)?;
        write!(f, "  = {}", self.formatted)
    }
}
