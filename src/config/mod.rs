pub mod ingest;

use std::fmt;

use serde::Serialize;

pub use ingest::{normalize, parse_record, read_record};

/// The recurrent cell family of both the encoder and the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum RnnCell {
    #[serde(rename = "LSTM")]
    Lstm,
    #[serde(rename = "GRU")]
    Gru,
    /// Vanilla RNN. Also the canonical fallback for absent or unknown labels.
    #[default]
    #[serde(rename = "SimpleRNN")]
    SimpleRnn,
}

impl RnnCell {
    /// Maps a provider label onto a cell family.
    ///
    /// Only the exact labels `"LSTM"` and `"GRU"` are recognized, everything
    /// else is a simple RNN.
    pub fn from_label(label: &str) -> Self {
        match label {
            "LSTM" => Self::Lstm,
            "GRU" => Self::Gru,
            _ => Self::SimpleRnn,
        }
    }

    /// Number of weight matrices per recurrent step that scale with
    /// `input + hidden`: one per gate.
    pub fn gate_multiplier(&self) -> u32 {
        match self {
            Self::Lstm => 4,
            Self::Gru => 3,
            Self::SimpleRnn => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lstm => "LSTM",
            Self::Gru => "GRU",
            Self::SimpleRnn => "SimpleRNN",
        }
    }
}

impl fmt::Display for RnnCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hyperparameters of a trained encoder-decoder RNN.
///
/// Built once per request by [`normalize`] and never mutated afterwards.
/// Every numeric field is a plain non-negative integer, missing data is 0.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ModelConfig {
    /// Embedding width (E).
    pub emb_dim: u64,
    /// Recurrent hidden size (H).
    pub hidden: u64,
    /// Maximum sequence length (L).
    pub max_len: u64,
    /// Stacked layer count. The closed-form estimates ignore it.
    pub num_layers: u64,
    pub rnn_cell: RnnCell,
    /// The cell label as the provider sent it, if it sent a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_label: Option<String>,
    /// Source vocabulary size (Vₛ).
    pub vocab_src: u64,
    /// Target vocabulary size (Vₜ).
    pub vocab_tgt: u64,
}

impl ModelConfig {
    /// Creates a config without a raw cell label.
    pub fn new(
        emb_dim: u64,
        hidden: u64,
        max_len: u64,
        num_layers: u64,
        rnn_cell: RnnCell,
        vocab_src: u64,
        vocab_tgt: u64,
    ) -> Self {
        Self {
            emb_dim,
            hidden,
            max_len,
            num_layers,
            rnn_cell,
            cell_label: None,
            vocab_src,
            vocab_tgt,
        }
    }

    /// Same config with a different cell family.
    pub fn with_cell(&self, rnn_cell: RnnCell) -> Self {
        Self {
            rnn_cell,
            cell_label: None,
            ..self.clone()
        }
    }
}

/// Counts measured on the instantiated model by the serving side.
///
/// Purely observational: shown next to the estimates, never fed back into them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MeasuredStats {
    /// Trainable parameter count of the loaded model.
    pub param_count: Option<u64>,
    /// MAC count for one sequence as reported by the provider.
    pub mac_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_labels() {
        assert_eq!(RnnCell::from_label("LSTM"), RnnCell::Lstm);
        assert_eq!(RnnCell::from_label("GRU"), RnnCell::Gru);
        assert_eq!(RnnCell::from_label("RNN"), RnnCell::SimpleRnn);
        assert_eq!(RnnCell::from_label("lstm"), RnnCell::SimpleRnn);
        assert_eq!(RnnCell::from_label(""), RnnCell::SimpleRnn);
    }

    #[test]
    fn test_gate_multiplier() {
        assert_eq!(RnnCell::Lstm.gate_multiplier(), 4);
        assert_eq!(RnnCell::Gru.gate_multiplier(), 3);
        assert_eq!(RnnCell::SimpleRnn.gate_multiplier(), 1);
        assert_eq!(RnnCell::default().gate_multiplier(), 1);
    }

    #[test]
    fn test_with_cell_keeps_dims() {
        let cfg = ModelConfig::new(256, 512, 20, 1, RnnCell::Lstm, 60, 70);
        let gru = cfg.with_cell(RnnCell::Gru);
        assert_eq!(gru.rnn_cell, RnnCell::Gru);
        assert_eq!(gru.emb_dim, 256);
        assert_eq!(gru.vocab_tgt, 70);
    }
}
