// alignment.rs - Multiple sequence alignment container and FASTA loading

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use bio::io::fasta;
use serde::{Deserialize, Serialize};

use crate::core::error::{OutlierError, Result};

/// One row of an alignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedSequence {
    pub id: String,
    pub residues: String,
}

impl AlignedSequence {
    pub fn new(id: impl Into<String>, residues: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            residues: residues.into(),
        }
    }
}

/// Validated alignment: at least one record, all residue strings of the same
/// non-zero length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    records: Vec<AlignedSequence>,
    length: usize,
}

impl Alignment {
    pub fn new(records: Vec<AlignedSequence>) -> Result<Self> {
        let length = match records.first() {
            Some(first) => first.residues.len(),
            None => {
                return Err(OutlierError::Alignment(
                    "alignment contains no sequences".to_string(),
                ))
            }
        };
        if length == 0 {
            return Err(OutlierError::Alignment(format!(
                "sequence '{}' has no residues",
                records[0].id
            )));
        }
        if let Some(bad) = records.iter().find(|r| r.residues.len() != length) {
            return Err(OutlierError::Alignment(format!(
                "sequence '{}' has length {}, expected {}",
                bad.id,
                bad.residues.len(),
                length
            )));
        }

        {
            let mut seen = HashSet::new();
            for record in &records {
                if !seen.insert(record.id.as_str()) {
                    log::warn!("Duplicate sequence identifier '{}' in alignment", record.id);
                }
            }
        }

        Ok(Self { records, length })
    }

    /// Load an aligned FASTA file
    pub fn from_fasta(path: &Path) -> std::result::Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open alignment file {}: {}", path.display(), e))?;
        let reader = fasta::Reader::new(BufReader::new(file));

        let mut records = Vec::new();
        for record_result in reader.records() {
            let record = record_result
                .map_err(|e| format!("Invalid FASTA record in {}: {}", path.display(), e))?;
            let residues = String::from_utf8(record.seq().to_vec()).map_err(|e| {
                format!(
                    "Non UTF-8 residues for '{}' in {}: {}",
                    record.id(),
                    path.display(),
                    e
                )
            })?;
            records.push(AlignedSequence::new(record.id(), residues));
        }

        Self::new(records).map_err(|e| format!("{}: {}", path.display(), e))
    }

    /// Alignment name derived from a file path: the file name up to its first dot
    pub fn name_from_path(path: &Path) -> String {
        path.file_name()
            .and_then(|s| s.to_str())
            .and_then(|s| s.split('.').next())
            .unwrap_or("alignment")
            .to_string()
    }

    pub fn records(&self) -> &[AlignedSequence] {
        &self.records
    }

    pub fn ids(&self) -> Vec<String> {
        self.records.iter().map(|r| r.id.clone()).collect()
    }

    /// Number of sequences
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a validated alignment
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of aligned columns
    pub fn alignment_length(&self) -> usize {
        self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_new_validates_lengths() {
        let ok = Alignment::new(vec![
            AlignedSequence::new("a", "AC-T"),
            AlignedSequence::new("b", "ACGT"),
        ])
        .unwrap();
        assert_eq!(ok.len(), 2);
        assert_eq!(ok.alignment_length(), 4);
        assert_eq!(ok.ids(), vec!["a".to_string(), "b".to_string()]);

        let err = Alignment::new(vec![
            AlignedSequence::new("a", "ACGT"),
            AlignedSequence::new("b", "ACGTA"),
        ])
        .unwrap_err();
        assert!(matches!(err, OutlierError::Alignment(_)));
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(Alignment::new(vec![]), Err(OutlierError::Alignment(_))));
        assert!(matches!(
            Alignment::new(vec![AlignedSequence::new("a", "")]),
            Err(OutlierError::Alignment(_))
        ));
    }

    #[test]
    fn test_from_fasta() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ">seq1 first sequence").unwrap();
        writeln!(file, "ACGT").unwrap();
        writeln!(file, "AC").unwrap();
        writeln!(file, ">seq2").unwrap();
        writeln!(file, "ACGTTT").unwrap();

        let alignment = Alignment::from_fasta(file.path()).unwrap();
        assert_eq!(alignment.len(), 2);
        assert_eq!(alignment.alignment_length(), 6);
        assert_eq!(alignment.records()[0].id, "seq1");
        assert_eq!(alignment.records()[0].residues, "ACGTAC");
    }

    #[test]
    fn test_from_fasta_unequal_lengths() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ">a\nACGT\n>b\nACGTA").unwrap();
        let err = Alignment::from_fasta(file.path()).unwrap_err();
        assert!(err.contains("length 5"));
    }

    #[test]
    fn test_from_fasta_missing_file() {
        let err = Alignment::from_fasta(Path::new("/nonexistent/aln.fasta")).unwrap_err();
        assert!(err.contains("Failed to open"));
    }

    #[test]
    fn test_name_from_path() {
        assert_eq!(Alignment::name_from_path(Path::new("/data/gene1.aligned.fasta")), "gene1");
        assert_eq!(Alignment::name_from_path(Path::new("cox1.fa")), "cox1");
    }
}
