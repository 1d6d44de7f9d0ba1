//! Mock SIM for integration testing
//!
//! Responses are scripted per challenge. Every command is recorded so tests
//! can check what reached the card and in which order.

use std::collections::HashMap;
use std::sync::Mutex;

use eapsim_common::{base64_encode, AppType, AuthType};
use eapsim_usim::SimCommand;

/// One AUTHENTICATE command seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimCommandRecord {
    pub app_type: AppType,
    pub auth_type: AuthType,
    /// Base64 command data
    pub challenge: String,
}

/// Scripted SIM card.
#[derive(Debug, Default)]
pub struct MockSim {
    responses: HashMap<Vec<u8>, Option<String>>,
    default_response: Option<String>,
    commands: Mutex<Vec<SimCommandRecord>>,
}

impl MockSim {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers commands whose data equals `challenge` with `response`.
    pub fn with_response(mut self, challenge: &[u8], response: &[u8]) -> Self {
        self.responses
            .insert(challenge.to_vec(), Some(base64_encode(response)));
        self
    }

    /// Answers commands whose data equals `challenge` with a raw base64 string.
    pub fn with_raw_response(mut self, challenge: &[u8], response: Option<&str>) -> Self {
        self.responses
            .insert(challenge.to_vec(), response.map(str::to_string));
        self
    }

    /// Answers every unscripted command with `response`.
    pub fn with_default_response(mut self, response: &[u8]) -> Self {
        self.default_response = Some(base64_encode(response));
        self
    }

    /// Commands received so far.
    pub fn commands(&self) -> Vec<SimCommandRecord> {
        self.commands
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    pub fn command_count(&self) -> usize {
        self.commands().len()
    }
}

impl SimCommand for MockSim {
    fn icc_authentication(
        &self,
        app_type: AppType,
        auth_type: AuthType,
        challenge: &str,
    ) -> Option<String> {
        if let Ok(mut commands) = self.commands.lock() {
            commands.push(SimCommandRecord {
                app_type,
                auth_type,
                challenge: challenge.to_string(),
            });
        }

        let key = eapsim_common::base64_decode(challenge).ok()?;
        match self.responses.get(&key) {
            Some(response) => response.clone(),
            None => self.default_response.clone(),
        }
    }
}
