//! The provider side of the exchange: builds the model-info record that the
//! serving process publishes for a loaded checkpoint.
//!
//! Serializing a [`ModelInfo`] yields exactly the shape [`crate::config::normalize`]
//! consumes, with counts pre-formatted in compact form.

use serde::Serialize;

use crate::{
    config::ModelConfig,
    estimator::{self, MACS_FORMULA, PARAMS_FORMULA},
    format::NumberFormat,
};

/// Hyperparameters as stored in the checkpoint, upper-case keys included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckpointConfig {
    #[serde(rename = "EMB_DIM")]
    pub emb_dim: u64,
    #[serde(rename = "HIDDEN")]
    pub hidden: u64,
    #[serde(rename = "MAX_LEN")]
    pub max_len: u64,
    #[serde(rename = "NUM_LAYERS")]
    pub num_layers: u64,
    #[serde(rename = "RNN_CELL")]
    pub rnn_cell: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamCount {
    pub count: u64,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormulaCount {
    pub count: u128,
    pub formatted: String,
    pub formula: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MacCount {
    pub simple: u128,
    pub theoretical: u128,
    pub formatted: String,
    pub formula: &'static str,
}

/// The published model-info record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub config: CheckpointConfig,
    pub vocab_src: u64,
    pub vocab_tgt: u64,
    pub torch_params: ParamCount,
    pub params_formula: FormulaCount,
    pub macs: MacCount,
    pub gate_multiplier: u32,
}

impl ModelInfo {
    /// Describes a loaded model.
    ///
    /// # Arguments
    /// * `cfg` - The checkpoint's hyperparameters and vocabulary sizes.
    /// * `torch_params` - The trainable parameter count of the loaded model.
    ///
    /// # Returns
    /// The record to publish.
    pub fn describe(cfg: &ModelConfig, torch_params: u64) -> Self {
        let fmt = NumberFormat::Compact;
        let theoretical_params = estimator::theoretical_params(cfg);
        let theoretical_macs = estimator::theoretical_macs(cfg);

        Self {
            config: CheckpointConfig {
                emb_dim: cfg.emb_dim,
                hidden: cfg.hidden,
                max_len: cfg.max_len,
                num_layers: cfg.num_layers,
                rnn_cell: cfg
                    .cell_label
                    .clone()
                    .unwrap_or_else(|| cfg.rnn_cell.to_string()),
            },
            vocab_src: cfg.vocab_src,
            vocab_tgt: cfg.vocab_tgt,
            torch_params: ParamCount {
                count: torch_params,
                formatted: fmt.format(torch_params.into()),
            },
            params_formula: FormulaCount {
                count: theoretical_params,
                formatted: fmt.format(theoretical_params),
                formula: PARAMS_FORMULA,
            },
            macs: MacCount {
                simple: estimator::simple_macs(cfg),
                theoretical: theoretical_macs,
                formatted: fmt.format(theoretical_macs),
                formula: MACS_FORMULA,
            },
            gate_multiplier: estimator::gate_multiplier(cfg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{normalize, RnnCell};

    #[test]
    fn test_describe() {
        let cfg = ModelConfig::new(256, 512, 20, 1, RnnCell::Lstm, 60, 70);
        let info = ModelInfo::describe(&cfg, 3_223_110);

        assert_eq!(info.config.rnn_cell, "LSTM");
        assert_eq!(info.torch_params.formatted, "3.22M");
        assert_eq!(info.params_formula.count, 3_219_014);
        assert_eq!(info.macs.simple, 7_864_320);
        assert_eq!(info.macs.theoretical, 62_914_560);
        assert_eq!(info.macs.formatted, "62.91M");
        assert_eq!(info.gate_multiplier, 4);
    }

    #[test]
    fn test_record_feeds_back_into_ingestor() {
        let cfg = ModelConfig::new(128, 256, 30, 2, RnnCell::Gru, 28, 66);
        let val = serde_json::to_value(ModelInfo::describe(&cfg, 1_000)).unwrap();
        let (back, measured) = normalize(&val);

        assert_eq!(back.with_cell(back.rnn_cell), cfg);
        assert_eq!(back.cell_label.as_deref(), Some("GRU"));
        assert_eq!(measured.param_count, Some(1_000));
        assert_eq!(measured.mac_count, Some(30 * 256 * (128 + 256)));
    }
}
