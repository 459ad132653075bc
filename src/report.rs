use std::fmt;

use serde::Serialize;

use crate::{
    config::{MeasuredStats, ModelConfig},
    estimator::{self, Breakdown},
    format::NumberFormat,
};

/// A measured count next to its closed-form estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reconciliation {
    pub measured: Option<u64>,
    pub theoretical: u128,
    /// `measured - theoretical`.
    pub difference: Option<i128>,
    /// `measured / theoretical`, absent when the estimate is 0.
    pub ratio: Option<f64>,
}

impl Reconciliation {
    pub fn new(measured: Option<u64>, theoretical: u128) -> Self {
        let difference = measured.map(|m| {
            let theoretical = i128::try_from(theoretical).unwrap_or(i128::MAX);
            i128::from(m) - theoretical
        });
        let ratio = measured
            .filter(|_| theoretical > 0)
            .map(|m| m as f64 / theoretical as f64);

        Self {
            measured,
            theoretical,
            difference,
            ratio,
        }
    }
}

/// The outbound record handed to a presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexityReport {
    pub config: ModelConfig,
    pub format: NumberFormat,
    pub gate_multiplier: u32,
    pub theoretical_params: u128,
    pub theoretical_macs: u128,
    pub simple_macs: u128,
    pub stacked_params: u128,
    /// Pass-through of the provider's measured parameter count.
    pub param_count: Option<u64>,
    /// Pass-through of the provider's measured MAC count.
    pub mac_count: Option<u64>,
    pub params: Reconciliation,
    pub macs: Reconciliation,
    pub params_breakdown: Breakdown,
    pub macs_breakdown: Breakdown,
}

impl ComplexityReport {
    /// Estimates `config` and lines the results up against `measured`.
    pub fn new(config: ModelConfig, measured: MeasuredStats, format: NumberFormat) -> Self {
        let est = estimator::estimate(&config, format);

        Self {
            gate_multiplier: est.gate_multiplier,
            theoretical_params: est.theoretical_params,
            theoretical_macs: est.theoretical_macs,
            simple_macs: est.simple_macs,
            stacked_params: est.stacked_params,
            param_count: measured.param_count,
            mac_count: measured.mac_count,
            params: Reconciliation::new(measured.param_count, est.theoretical_params),
            macs: Reconciliation::new(measured.mac_count, est.theoretical_macs),
            params_breakdown: est.params_breakdown,
            macs_breakdown: est.macs_breakdown,
            config,
            format,
        }
    }

    /// Cell name to show: the provider's label when it sent one.
    fn cell_name(&self) -> &str {
        self.config
            .cell_label
            .as_deref()
            .unwrap_or(self.config.rnn_cell.as_str())
    }

    /// Renders a difference with an explicit sign and the report's format.
    fn signed(&self, diff: i128) -> String {
        let sign = match diff.signum() {
            1 => "+",
            -1 => "-",
            _ => "",
        };
        format!("{sign}{}", self.format.format(diff.unsigned_abs()))
    }
}

impl fmt::Display for ComplexityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cfg = &self.config;
        let n = |v: u128| self.format.format(v);

        writeln!(f, "Model configuration")?;
        writeln!(
            f,
            "  RNN cell:            {} (g = {})",
            self.cell_name(),
            self.gate_multiplier
        )?;
        writeln!(f, "  Embedding dim (E):   {}", cfg.emb_dim)?;
        writeln!(f, "  Hidden units (H):    {}", cfg.hidden)?;
        writeln!(f, "  Sequence length (L): {}", cfg.max_len)?;
        writeln!(f, "  Layers:              {}", cfg.num_layers)?;
        writeln!(f, "  Source vocab (Vₛ):   {}", cfg.vocab_src)?;
        writeln!(f, "  Target vocab (Vₜ):   {}", cfg.vocab_tgt)?;
        writeln!(f)?;

        writeln!(f, "Parameter & compute summary")?;
        writeln!(f, "  Params (measured):    {}", self.format.format_opt(self.param_count))?;
        writeln!(f, "  Params (formula):   ≈ {}", n(self.theoretical_params))?;
        writeln!(f, "  Params (stacked):     {}", n(self.stacked_params))?;
        if let Some(diff) = self.params.difference {
            writeln!(f, "  Params difference:    {}", self.signed(diff))?;
        }
        if let Some(ratio) = self.params.ratio {
            writeln!(f, "  Params ratio:         {ratio:.4}")?;
        }
        writeln!(f, "  MACs (measured):      {}", self.format.format_opt(self.mac_count))?;
        writeln!(f, "  MACs (formula):     ≈ {}", n(self.theoretical_macs))?;
        writeln!(f, "  MACs (single pass):   {}", n(self.simple_macs))?;
        if let Some(diff) = self.macs.difference {
            writeln!(f, "  MACs difference:      {}", self.signed(diff))?;
        }
        if let Some(ratio) = self.macs.ratio {
            writeln!(f, "  MACs ratio:           {ratio:.4}")?;
        }
        writeln!(f)?;

        writeln!(f, "Formulas")?;
        writeln!(f, "{}", self.macs_breakdown)?;
        write!(f, "{}", self.params_breakdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RnnCell;

    fn config() -> ModelConfig {
        ModelConfig::new(256, 512, 20, 1, RnnCell::Lstm, 60, 70)
    }

    #[test]
    fn test_reconciliation() {
        let rec = Reconciliation::new(Some(3_223_110), 3_219_014);
        assert_eq!(rec.difference, Some(4096));
        let ratio = rec.ratio.unwrap();
        assert!(ratio > 1.0 && ratio < 1.01);
    }

    #[test]
    fn test_reconciliation_without_measurement() {
        let rec = Reconciliation::new(None, 10);
        assert_eq!(rec.difference, None);
        assert_eq!(rec.ratio, None);
    }

    #[test]
    fn test_reconciliation_zero_estimate() {
        let rec = Reconciliation::new(Some(5), 0);
        assert_eq!(rec.difference, Some(5));
        assert_eq!(rec.ratio, None);
    }

    #[test]
    fn test_reconciliation_saturated_estimate() {
        let rec = Reconciliation::new(Some(0), u128::MAX);
        assert_eq!(rec.difference, Some(-i128::MAX));
    }

    #[test]
    fn test_report_passes_measured_through() {
        let measured = MeasuredStats {
            param_count: Some(3_223_110),
            mac_count: Some(7_864_320),
        };
        let report = ComplexityReport::new(config(), measured, NumberFormat::Grouped);
        assert_eq!(report.param_count, Some(3_223_110));
        assert_eq!(report.mac_count, Some(7_864_320));
        assert_eq!(report.theoretical_params, 3_219_014);
        assert_eq!(report.theoretical_macs, 62_914_560);
        assert_eq!(report.stacked_params, 3_223_110);
        assert_eq!(report.params.difference, Some(4096));
    }

    #[test]
    fn test_display_uses_one_format() {
        let measured = MeasuredStats {
            param_count: Some(3_223_110),
            mac_count: None,
        };
        let text = ComplexityReport::new(config(), measured, NumberFormat::Indian).to_string();
        assert!(text.contains("LSTM (g = 4)"));
        assert!(text.contains("Params (measured):    32,23,110"));
        assert!(text.contains("Params (formula):   ≈ 32,19,014"));
        assert!(text.contains("MACs (measured):      N/A"));
        assert!(text.contains("  = 6,29,14,560"));
    }

    #[test]
    fn test_display_differences_use_report_format() {
        let measured = MeasuredStats {
            param_count: Some(3_223_110),
            mac_count: Some(7_864_320),
        };
        let text = ComplexityReport::new(config(), measured, NumberFormat::Grouped).to_string();
        assert!(text.contains("Params difference:    +4,096\n"));
        // 7,864,320 - 62,914,560
        assert!(text.contains("MACs difference:      -55,050,240\n"));
        assert!(text.contains("MACs ratio:           0.1250\n"));

        let text = ComplexityReport::new(config(), measured, NumberFormat::Indian).to_string();
        assert!(text.contains("MACs difference:      -5,50,50,240\n"));
    }

    #[test]
    fn test_display_zero_difference_has_no_sign() {
        let measured = MeasuredStats {
            param_count: Some(3_219_014),
            mac_count: None,
        };
        let text = ComplexityReport::new(config(), measured, NumberFormat::Plain).to_string();
        assert!(text.contains("Params difference:    0\n"));
        assert!(!text.contains("MACs difference"));
    }

    #[test]
    fn test_display_prefers_provider_label() {
        let mut cfg = ModelConfig::default();
        cfg.cell_label = Some("BiLSTM".into());
        let text = ComplexityReport::new(cfg, MeasuredStats::default(), NumberFormat::Plain)
            .to_string();
        assert!(text.contains("BiLSTM (g = 1)"));
    }

    #[test]
    fn test_serializes_outbound_record() {
        let report =
            ComplexityReport::new(config(), MeasuredStats::default(), NumberFormat::Grouped);
        let val = serde_json::to_value(&report).unwrap();
        assert_eq!(val["gate_multiplier"], 4);
        assert_eq!(val["theoretical_params"], 3_219_014);
        assert_eq!(val["theoretical_macs"], 62_914_560);
        assert_eq!(val["config"]["rnn_cell"], "LSTM");
        assert_eq!(val["format"], "grouped");
        assert!(val["param_count"].is_null());
        assert_eq!(val["macs_breakdown"]["formatted"], "62,914,560");
    }
}
