pub mod snapshot;
pub mod storage;

pub use snapshot::{snapshot, ScoreSnapshot};
pub use storage::{default_export_path, load_snapshot, save_snapshot};
