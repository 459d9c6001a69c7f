// mod.rs - Data structures module

pub mod alignment;
pub mod discovery;

// Re-export main types for convenience
pub use alignment::{AlignedSequence, Alignment};
pub use discovery::{find_alignment_files, is_alignment_file, ALIGNMENT_EXTENSIONS};
