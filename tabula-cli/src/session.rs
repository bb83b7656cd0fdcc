use tabula_core::contracts::{
    TabulaAttachment, TabulaChatRequest, TabulaChatTurn, TabulaGenerationConfig,
};

/// Conversation state for `tabula chat`.
///
/// Attachments given on the command line are pending until the first
/// message goes out; after that the history carries text only.
pub struct ChatSession {
    history: Vec<TabulaChatTurn>,
    pending_attachments: Vec<TabulaAttachment>,
    context: Option<String>,
    session_id: String,
}

impl ChatSession {
    pub fn new(context: Option<String>, attachments: Vec<TabulaAttachment>, session_id: String) -> Self {
        Self {
            history: Vec::new(),
            pending_attachments: attachments,
            context,
            session_id,
        }
    }

    pub fn history(&self) -> &[TabulaChatTurn] {
        &self.history
    }

    pub fn pending_attachments(&self) -> usize {
        self.pending_attachments.len()
    }

    /// Appends the user turn and builds the request for it.
    pub fn next_request(
        &mut self,
        prompt: &str,
        model: &str,
        generation_config: Option<TabulaGenerationConfig>,
    ) -> TabulaChatRequest {
        self.history.push(TabulaChatTurn::user(prompt));
        TabulaChatRequest {
            model: model.to_string(),
            correlation_id: Some(format!("{}-{}", self.session_id, self.history.len())),
            history: self.history.clone(),
            attachments: self.pending_attachments.clone(),
            context: self.context.clone(),
            generation_config,
        }
    }

    /// Once a reply arrives the attachments have been delivered.
    pub fn record_reply(&mut self, reply: &str) {
        self.history.push(TabulaChatTurn::assistant(reply));
        self.pending_attachments.clear();
    }

    /// Drops the turn that failed so the user can retry it. Pending
    /// attachments are kept for the retry.
    pub fn discard_last_prompt(&mut self) {
        if self.history.last().is_some_and(TabulaChatTurn::is_user) {
            self.history.pop();
        }
    }

    /// Forgets the conversation; the context stays.
    pub fn clear(&mut self, session_id: String) {
        self.history.clear();
        self.session_id = session_id;
    }
}
