//! Visible log of failed requests.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use ofp_domain::error::OfpError;

/// Messages kept when nobody renders the page for a while.
pub const DEFAULT_CAPACITY: usize = 64;

/// Shared, bounded log of localized error messages.
///
/// Messages are shown once: [`drain`](Self::drain) hands them to the page
/// being rendered and clears the panel.
#[derive(Debug)]
pub struct ErrorPanel {
    capacity: usize,
    messages: Mutex<VecDeque<String>>,
}

impl Default for ErrorPanel {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ErrorPanel {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            messages: Mutex::new(VecDeque::new()),
        }
    }

    /// Record a failed operation.
    pub fn log(&self, err: &OfpError) {
        tracing::warn!(%err, "controller request failed");
        self.push(err.to_string());
    }

    /// Record a message, dropping the oldest one when full.
    pub fn push(&self, message: String) {
        let mut messages = self.messages.lock().unwrap_or_else(PoisonError::into_inner);
        if messages.len() == self.capacity {
            messages.pop_front();
        }
        messages.push_back(message);
    }

    /// Take every pending message, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<String> {
        let mut messages = self.messages.lock().unwrap_or_else(PoisonError::into_inner);
        messages.drain(..).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

#[cfg(test)]
mod tests {
    use ofp_domain::error::{HttpError, HttpMethod};

    use super::*;

    #[test]
    fn should_show_each_message_once() {
        let panel = ErrorPanel::default();
        panel.log(&OfpError::from(HttpError {
            method: HttpMethod::Get,
            url: "/ofp-api/v1/status".to_string(),
            status: 500,
        }));
        assert_eq!(
            panel.drain(),
            vec!["Erreur lors de la récupération /ofp-api/v1/status : 500".to_string()]
        );
        assert!(panel.drain().is_empty());
    }

    #[test]
    fn should_drop_oldest_message_when_full() {
        let panel = ErrorPanel::new(2);
        panel.push("a".to_string());
        panel.push("b".to_string());
        panel.push("c".to_string());
        assert_eq!(panel.drain(), vec!["b".to_string(), "c".to_string()]);
        assert!(panel.is_empty());
    }
}
