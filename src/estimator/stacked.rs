//! Exact parameter count of the instantiated encoder-decoder.
//!
//! Unlike the closed-form estimate this follows the real layer stack: the
//! first layer maps `E -> H`, every further layer maps `H -> H`, and each gate
//! carries two bias vectors (input-to-hidden and hidden-to-hidden). A config
//! with `num_layers == 0` is counted as a single layer.

use crate::config::ModelConfig;

/// Trainable parameters of one recurrent stack, or `None` on overflow.
fn recurrent_stack(cfg: &ModelConfig) -> Option<u128> {
    let g = u128::from(cfg.rnn_cell.gate_multiplier());
    let e = u128::from(cfg.emb_dim);
    let h = u128::from(cfg.hidden);
    let layers = cfg.num_layers.max(1);

    let layer = |input: u128| -> Option<u128> {
        let weights = g.checked_mul(h)?.checked_mul(input.checked_add(h)?)?;
        let biases = 2 * g * h;
        weights.checked_add(biases)
    };

    let first = layer(e)?;
    let rest = layer(h)?.checked_mul(u128::from(layers - 1))?;
    first.checked_add(rest)
}

pub(super) fn checked_stacked_params(cfg: &ModelConfig) -> Option<u128> {
    let e = u128::from(cfg.emb_dim);
    let h = u128::from(cfg.hidden);
    let vs = u128::from(cfg.vocab_src);
    let vt = u128::from(cfg.vocab_tgt);

    let embeddings = (vs + vt).checked_mul(e)?;
    let stacks = recurrent_stack(cfg)?.checked_mul(2)?;
    let projection = h.checked_mul(vt)?.checked_add(vt)?;

    embeddings.checked_add(stacks)?.checked_add(projection)
}
