//! Interactive prompt input

/// Session commands typed with a leading `:`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    New,
    History,
    Trending,
    Clear,
    Quit,
}

/// One line typed at the interactive prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptInput {
    Empty,
    Command(SessionCommand),
    /// `#N`: repeat the N-th recent search (1-based)
    Recall(usize),
    Query(String),
    Unknown(String),
}

impl PromptInput {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();

        if line.is_empty() {
            return Self::Empty;
        }

        if let Some(command) = line.strip_prefix(':') {
            return match command {
                "new" => Self::Command(SessionCommand::New),
                "history" => Self::Command(SessionCommand::History),
                "trending" => Self::Command(SessionCommand::Trending),
                "clear" => Self::Command(SessionCommand::Clear),
                "quit" | "q" | "exit" => Self::Command(SessionCommand::Quit),
                _ => Self::Unknown(line.to_string()),
            };
        }

        if let Some(n) = line.strip_prefix('#').and_then(|n| n.parse::<usize>().ok()) {
            return Self::Recall(n);
        }

        Self::Query(line.to_string())
    }
}
