//! Turns the provider's loosely typed model-info record into a [`ModelConfig`].
//!
//! The record looks like
//! `{ config: { EMB_DIM, HIDDEN, MAX_LEN, NUM_LAYERS, RNN_CELL }, vocab_src,
//! vocab_tgt, torch_params: { count }, macs: { simple } }` and every field is
//! optional. Defaults:
//!
//! | field              | absent / malformed |
//! |--------------------|--------------------|
//! | numeric config     | `0`                |
//! | `RNN_CELL`         | `SimpleRNN` (g = 1)|
//! | `torch_params.count` | `None`           |
//! | `macs.simple`      | `None`             |
//!
//! A value counts as numeric when it is a JSON unsigned integer, an integral
//! non-negative finite float, or a string holding a `u64`.

use std::io::Read;

use serde_json::Value;

use super::{MeasuredStats, ModelConfig, RnnCell};
use crate::error::Result;

/// Normalizes a raw record. Never fails, only defaults.
pub fn normalize(val: &Value) -> (ModelConfig, MeasuredStats) {
    let cfg = &val["config"];

    let label = match &cfg["RNN_CELL"] {
        Value::String(s) => Some(s.clone()),
        Value::Null => {
            log::debug!("RNN_CELL missing, defaulting to {}", RnnCell::default());
            None
        }
        other => {
            log::debug!("RNN_CELL is not a string ({other}), defaulting to {}", RnnCell::default());
            None
        }
    };
    let rnn_cell = label
        .as_deref()
        .map(RnnCell::from_label)
        .unwrap_or_default();

    let config = ModelConfig {
        emb_dim: count_or_zero(cfg, "EMB_DIM"),
        hidden: count_or_zero(cfg, "HIDDEN"),
        max_len: count_or_zero(cfg, "MAX_LEN"),
        num_layers: count_or_zero(cfg, "NUM_LAYERS"),
        rnn_cell,
        cell_label: label,
        vocab_src: count_or_zero(val, "vocab_src"),
        vocab_tgt: count_or_zero(val, "vocab_tgt"),
    };

    let measured = MeasuredStats {
        param_count: measured(&val["torch_params"], "count"),
        mac_count: measured(&val["macs"], "simple"),
    };

    (config, measured)
}

/// Decodes a JSON document and normalizes it.
///
/// # Errors
/// Returns `ReportError::Json` if `content` is not JSON.
pub fn parse_record(content: &str) -> Result<(ModelConfig, MeasuredStats)> {
    let val: Value = serde_json::from_str(content)?;
    Ok(normalize(&val))
}

/// Reads a JSON document from `reader` and normalizes it.
///
/// # Errors
/// Returns `ReportError::Io` if reading fails or `ReportError::Json` if the
/// content is not JSON.
pub fn read_record<R: Read>(reader: R) -> Result<(ModelConfig, MeasuredStats)> {
    let val: Value = serde_json::from_reader(reader)?;
    Ok(normalize(&val))
}

fn count_or_zero(parent: &Value, key: &str) -> u64 {
    as_count(&parent[key]).unwrap_or_else(|| {
        log::debug!("{key} missing or malformed ({}), defaulting to 0", parent[key]);
        0
    })
}

fn measured(parent: &Value, key: &str) -> Option<u64> {
    let count = as_count(&parent[key]);
    if count.is_none() {
        log::debug!("measured {key} unavailable ({})", parent[key]);
    }
    count
}

fn as_count(val: &Value) -> Option<u64> {
    match val {
        Value::Number(n) => n.as_u64().or_else(|| {
            let f = n.as_f64()?;
            (f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64)
                .then_some(f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}
