//! Backend commands queued from UI to backend worker.

pub enum BackendCommand {
    /// Read the whole collection once and report the outcome.
    FetchComments,
    Shutdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FetchComments => "fetch_comments",
            BackendCommand::Shutdown => "shutdown",
        }
    }
}
