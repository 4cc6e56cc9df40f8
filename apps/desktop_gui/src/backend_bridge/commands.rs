//! Backend commands queued from UI to backend worker.

use std::path::PathBuf;

pub enum BackendCommand {
    Grade {
        rubric: String,
        answer_path: Option<PathBuf>,
    },
}
