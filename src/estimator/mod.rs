//! Closed-form cost estimates for an encoder-decoder RNN.
//!
//! With `g` the gate multiplier of the cell family:
//!
//! ```text
//! MACs   = 2 × L × g × (E × H + H²)
//! Params = (Vₛ + Vₜ) × E + 2 × g × (E × H + H² + H) + H × Vₜ + Vₜ
//! ```
//!
//! The MAC count covers one encoding and one decoding pass of length `L` and
//! ignores biases, activations and attention. The parameter count assumes a
//! single layer per stack with one bias vector per gate.
//!
//! Everything is computed in `u128` with checked arithmetic; a result that does
//! not fit saturates at `u128::MAX` and is logged.

mod breakdown;
mod stacked;

use serde::Serialize;

pub use breakdown::{Breakdown, MACS_FORMULA, PARAMS_FORMULA};

use crate::{config::ModelConfig, format::NumberFormat};

/// Everything derived from one [`ModelConfig`]. Recomputed on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplexityEstimate {
    pub gate_multiplier: u32,
    pub theoretical_params: u128,
    pub theoretical_macs: u128,
    /// Single-pass approximation `L × H × (E + H)`.
    pub simple_macs: u128,
    /// Exact count for the layered model, see [`stacked_params`].
    pub stacked_params: u128,
    pub params_breakdown: Breakdown,
    pub macs_breakdown: Breakdown,
}

/// Gate multiplier `g` of the config's cell family.
pub fn gate_multiplier(cfg: &ModelConfig) -> u32 {
    cfg.rnn_cell.gate_multiplier()
}

/// `2 × L × g × (E × H + H²)`
pub fn theoretical_macs(cfg: &ModelConfig) -> u128 {
    saturate("theoretical MACs", checked_macs(cfg))
}

/// `(Vₛ + Vₜ) × E + 2 × g × (E × H + H² + H) + H × Vₜ + Vₜ`
pub fn theoretical_params(cfg: &ModelConfig) -> u128 {
    saturate("theoretical params", checked_params(cfg))
}

/// `L × H × (E + H)`
pub fn simple_macs(cfg: &ModelConfig) -> u128 {
    let e = u128::from(cfg.emb_dim);
    let h = u128::from(cfg.hidden);
    let l = u128::from(cfg.max_len);
    let macs = l.checked_mul(h).and_then(|lh| lh.checked_mul(e + h));
    saturate("simple MACs", macs)
}

/// Parameter count of the model as actually stacked, honouring `num_layers`
/// and the second bias vector of each gate.
pub fn stacked_params(cfg: &ModelConfig) -> u128 {
    saturate("stacked params", stacked::checked_stacked_params(cfg))
}

/// Computes every estimate for `cfg`, formatting results with `format`.
pub fn estimate(cfg: &ModelConfig, format: NumberFormat) -> ComplexityEstimate {
    let theoretical_params = theoretical_params(cfg);
    let theoretical_macs = theoretical_macs(cfg);
    log::trace!(
        "estimated {} cell: params={theoretical_params} macs={theoretical_macs}",
        cfg.rnn_cell
    );

    ComplexityEstimate {
        gate_multiplier: gate_multiplier(cfg),
        theoretical_params,
        theoretical_macs,
        simple_macs: simple_macs(cfg),
        stacked_params: stacked_params(cfg),
        params_breakdown: Breakdown::params(cfg, theoretical_params, format),
        macs_breakdown: Breakdown::macs(cfg, theoretical_macs, format),
    }
}

fn checked_macs(cfg: &ModelConfig) -> Option<u128> {
    let g = u128::from(gate_multiplier(cfg));
    let e = u128::from(cfg.emb_dim);
    let h = u128::from(cfg.hidden);
    let l = u128::from(cfg.max_len);

    let per_gate = (e * h).checked_add(h * h)?;
    (2 * l).checked_mul(g)?.checked_mul(per_gate)
}

fn checked_params(cfg: &ModelConfig) -> Option<u128> {
    let g = u128::from(gate_multiplier(cfg));
    let e = u128::from(cfg.emb_dim);
    let h = u128::from(cfg.hidden);
    let vs = u128::from(cfg.vocab_src);
    let vt = u128::from(cfg.vocab_tgt);

    let embeddings = (vs + vt).checked_mul(e)?;
    let per_gate = (e * h).checked_add(h * h)?.checked_add(h)?;
    let recurrent = (2 * g).checked_mul(per_gate)?;
    let projection = (h * vt).checked_add(vt)?;

    embeddings.checked_add(recurrent)?.checked_add(projection)
}

fn saturate(quantity: &str, value: Option<u128>) -> u128 {
    value.unwrap_or_else(|| {
        log::warn!("{quantity} overflow u128, saturating");
        u128::MAX
    })
}
