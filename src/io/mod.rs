pub mod data;
pub mod fs;
pub mod report;
pub mod walker;

pub use data::read_data_dir;
pub use fs::{read_text, write_atomic, Workspace};
pub use report::{render, ChangeKind, ChangeRecord, ReportFormat, StepReport};
pub use walker::{apply_fixers, apply_to_file, rename_matching, ContentWalker, RenameRule};
