use crate::history::HistoryLog;

/// Per-session state handed to the pipeline by reference.
///
/// One instance per interactive session; never share it across sessions.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub current_query: String,
    pub authenticated: bool,
    pub history: HistoryLog,
}

impl SessionContext {
    pub fn new(history_cap: usize) -> Self {
        Self {
            current_query: String::new(),
            authenticated: false,
            history: HistoryLog::new(history_cap),
        }
    }

    /// Forget the query and history but stay logged in.
    pub fn reset(&mut self) {
        self.current_query.clear();
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_keeps_authentication() {
        let mut session = SessionContext::new(5);
        session.authenticated = true;
        session.current_query = "AI in Healthcare".to_string();
        session.history.append("AI in Healthcare", "• point");

        session.reset();

        assert!(session.authenticated);
        assert!(session.current_query.is_empty());
        assert!(session.history.is_empty());
    }
}
