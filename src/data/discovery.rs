// discovery.rs - Alignment file discovery in an input directory

use std::path::{Path, PathBuf};

use regex::Regex;

/// File extensions recognised as aligned FASTA
pub const ALIGNMENT_EXTENSIONS: &[&str] = &["fasta", "fa", "faa", "fna", "aln", "fas"];

/// Check whether a path carries one of the alignment extensions
pub fn is_alignment_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ALIGNMENT_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// List alignment files directly inside `dir`, sorted by path.
///
/// `include` keeps only file names matching the pattern, `exclude` drops
/// file names matching it.
pub fn find_alignment_files(
    dir: &Path,
    include: Option<&Regex>,
    exclude: Option<&Regex>,
) -> Result<Vec<PathBuf>, String> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("Failed to read input directory '{}': {}", dir.display(), e))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_alignment_file(path))
        .filter(|path| {
            let file_name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
            include.map_or(true, |re| re.is_match(file_name))
                && !exclude.map_or(false, |re| re.is_match(file_name))
        })
        .collect();

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), ">a\nACGT\n").unwrap();
    }

    #[test]
    fn test_finds_known_extensions_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.fasta", "a.aln", "c.fa", "notes.txt", "d.fas", "e.faa", "f.fna"] {
            touch(dir.path(), name);
        }
        std::fs::create_dir(dir.path().join("nested.fasta")).unwrap();

        let files = find_alignment_files(dir.path(), None, None).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.aln", "b.fasta", "c.fa", "d.fas", "e.faa", "f.fna"]);
    }

    #[test]
    fn test_include_and_exclude_filters() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["gene1.fasta", "gene2.fasta", "control.fasta"] {
            touch(dir.path(), name);
        }
        let include = Regex::new("^gene").unwrap();
        let exclude = Regex::new("2").unwrap();

        let files = find_alignment_files(dir.path(), Some(&include), Some(&exclude)).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("gene1.fasta"));
    }

    #[test]
    fn test_missing_directory() {
        let err = find_alignment_files(Path::new("/nonexistent/dir"), None, None).unwrap_err();
        assert!(err.contains("Failed to read input directory"));
    }
}
