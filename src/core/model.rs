// model.rs - Pairwise distance models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::OutlierError;

/// Residues treated as alignment gaps by gap-excluding models
const GAP_SYMBOLS: &[u8] = b"-.";

/// Pairwise distance model used to fill the distance matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceModel {
    /// Fraction of aligned positions that differ; gaps are ordinary symbols
    #[default]
    Identity,
    /// Fraction of differing positions among columns where neither residue is a gap
    #[serde(rename = "identity-nogap")]
    IdentityNoGap,
}

impl DistanceModel {
    /// Every registered model, in listing order
    pub fn all() -> &'static [DistanceModel] {
        &[DistanceModel::Identity, DistanceModel::IdentityNoGap]
    }

    pub fn name(&self) -> &'static str {
        match self {
            DistanceModel::Identity => "identity",
            DistanceModel::IdentityNoGap => "identity-nogap",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DistanceModel::Identity => "fraction of differing positions (gaps count as symbols)",
            DistanceModel::IdentityNoGap => "fraction of differing positions, gapped columns excluded",
        }
    }

    /// Comma separated list of model names, used in error messages
    pub fn available_names() -> String {
        Self::all()
            .iter()
            .map(|m| m.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Distance between two aligned residue strings of equal length.
    ///
    /// Callers are expected to have validated the lengths; only the shared
    /// prefix is compared otherwise.
    pub fn distance(&self, seq1: &[u8], seq2: &[u8]) -> f64 {
        match self {
            DistanceModel::Identity => {
                let compared = seq1.len().min(seq2.len());
                if compared == 0 {
                    return 0.0;
                }
                let mismatches = seq1
                    .iter()
                    .zip(seq2.iter())
                    .filter(|(a, b)| a != b)
                    .count();
                mismatches as f64 / compared as f64
            }
            DistanceModel::IdentityNoGap => {
                let mut compared = 0usize;
                let mut mismatches = 0usize;
                for (a, b) in seq1.iter().zip(seq2.iter()) {
                    if GAP_SYMBOLS.contains(a) || GAP_SYMBOLS.contains(b) {
                        continue;
                    }
                    compared += 1;
                    if a != b {
                        mismatches += 1;
                    }
                }
                // No shared ungapped column: no evidence of divergence
                if compared == 0 {
                    0.0
                } else {
                    mismatches as f64 / compared as f64
                }
            }
        }
    }
}

impl fmt::Display for DistanceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DistanceModel {
    type Err = OutlierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "identity" => Ok(DistanceModel::Identity),
            "identity-nogap" | "identity-no-gap" | "pdistance" => Ok(DistanceModel::IdentityNoGap),
            _ => Err(OutlierError::UnsupportedModel {
                name: s.to_string(),
                available: Self::available_names(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_distance() {
        let model = DistanceModel::Identity;
        assert_eq!(model.distance(b"AAAA", b"AAAA"), 0.0);
        assert_eq!(model.distance(b"AAAA", b"TTTT"), 1.0);
        assert_eq!(model.distance(b"ACGT", b"ACGA"), 0.25);
    }

    #[test]
    fn test_identity_counts_gaps_as_symbols() {
        let model = DistanceModel::Identity;
        assert_eq!(model.distance(b"AC-T", b"AC-T"), 0.0);
        assert_eq!(model.distance(b"AC-T", b"ACGT"), 0.25);
    }

    #[test]
    fn test_nogap_excludes_gapped_columns() {
        let model = DistanceModel::IdentityNoGap;
        // Column 3 dropped, one mismatch among three compared columns
        let d = model.distance(b"AC-T", b"AGGT");
        assert!((d - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(model.distance(b"----", b"ACGT"), 0.0);
    }

    #[test]
    fn test_parse_models() {
        assert_eq!("identity".parse::<DistanceModel>().unwrap(), DistanceModel::Identity);
        assert_eq!("IDENTITY".parse::<DistanceModel>().unwrap(), DistanceModel::Identity);
        assert_eq!(
            "identity-nogap".parse::<DistanceModel>().unwrap(),
            DistanceModel::IdentityNoGap
        );
        assert_eq!(DistanceModel::default(), DistanceModel::Identity);
    }

    #[test]
    fn test_unknown_model_is_unsupported() {
        let err = "blosum62".parse::<DistanceModel>().unwrap_err();
        match err {
            OutlierError::UnsupportedModel { name, available } => {
                assert_eq!(name, "blosum62");
                assert!(available.contains("identity"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_names_round_trip_through_display() {
        for model in DistanceModel::all() {
            assert_eq!(model.to_string().parse::<DistanceModel>().unwrap(), *model);
        }
    }
}
