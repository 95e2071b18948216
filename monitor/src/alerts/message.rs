use serde::Serialize;

use super::chunking::chunk_for_transport;

/// Interactive control attached to the first delivered chunk only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageControl {
    pub label: String,
    pub action: String,
}

impl MessageControl {
    pub fn main_menu() -> Self {
        Self {
            label: "Back to Main Menu".to_string(),
            action: "start".to_string(),
        }
    }
}

/// Ordered, size-limited chunks ready for a notification sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertMessage {
    chunks: Vec<String>,
    control: Option<MessageControl>,
}

impl AlertMessage {
    pub fn new(text: &str, limit: usize, budget: usize, control: Option<MessageControl>) -> Self {
        Self {
            chunks: chunk_for_transport(text, limit, budget),
            control,
        }
    }

    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    pub fn control(&self) -> Option<&MessageControl> {
        self.control.as_ref()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Full text, i.e. the chunks joined back together
    pub fn text(&self) -> String {
        self.chunks.concat()
    }

    /// Chunks paired with the control that goes with them
    pub fn deliveries(&self) -> impl Iterator<Item = (usize, &str, Option<&MessageControl>)> {
        self.chunks.iter().enumerate().map(move |(index, chunk)| {
            let control = if index == 0 { self.control.as_ref() } else { None };
            (index, chunk.as_str(), control)
        })
    }
}
