//! Finite state machine for a release run

use serde::{Deserialize, Serialize};

use crate::models::device::Platform;

/// Release run state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "platform", rename_all = "snake_case")]
pub enum ReleaseState {
    /// Nothing attempted yet
    NotStarted,

    /// Deploying a platform
    Deploying(Platform),

    /// Launching the deployed application
    Launching(Platform),

    /// Reporting the project type
    Tracking(Platform),

    /// Every platform deployed and launched
    Done,

    /// A deploy or launch failed; terminal
    Failed,
}

/// Release run event
#[derive(Debug, Clone)]
pub enum ReleaseEvent {
    /// Begin deploying a platform
    Deploy(Platform),

    /// Deploy finished
    Deployed,

    /// Launch finished
    Launched,

    /// Deploy or launch failed
    Fail(String),

    /// No platforms remain
    Finish,
}

/// Release run FSM
#[derive(Debug, Clone)]
pub struct ReleaseFsm {
    state: ReleaseState,
    error: Option<String>,
    completed: Vec<Platform>,
}

impl ReleaseFsm {
    /// Create a new FSM in the not-started state
    pub fn new() -> Self {
        Self {
            state: ReleaseState::NotStarted,
            error: None,
            completed: Vec::new(),
        }
    }

    /// Get current state
    pub fn state(&self) -> &ReleaseState {
        &self.state
    }

    /// Get error message if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Platforms that went through deploy, launch and tracking
    pub fn completed(&self) -> &[Platform] {
        &self.completed
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, ReleaseState::Done | ReleaseState::Failed)
    }

    /// Process an event and transition state
    pub fn process(&mut self, event: ReleaseEvent) -> Result<(), String> {
        let new_state = match (&self.state, event) {
            // Next platform
            (ReleaseState::NotStarted, ReleaseEvent::Deploy(platform)) => {
                ReleaseState::Deploying(platform)
            }
            (ReleaseState::Tracking(current), ReleaseEvent::Deploy(platform)) => {
                self.completed.push(current.clone());
                ReleaseState::Deploying(platform)
            }

            (ReleaseState::Deploying(platform), ReleaseEvent::Deployed) => {
                ReleaseState::Launching(platform.clone())
            }
            (ReleaseState::Launching(platform), ReleaseEvent::Launched) => {
                ReleaseState::Tracking(platform.clone())
            }

            // Failures end the whole run
            (ReleaseState::Deploying(_), ReleaseEvent::Fail(err))
            | (ReleaseState::Launching(_), ReleaseEvent::Fail(err)) => {
                self.error = Some(err);
                ReleaseState::Failed
            }

            // Also covers an empty platform list
            (ReleaseState::NotStarted, ReleaseEvent::Finish) => ReleaseState::Done,
            (ReleaseState::Tracking(current), ReleaseEvent::Finish) => {
                self.completed.push(current.clone());
                ReleaseState::Done
            }

            // Invalid transitions
            (state, event) => {
                return Err(format!("Invalid transition: {:?} -> {:?}", state, event));
            }
        };

        self.state = new_state;
        Ok(())
    }
}

impl Default for ReleaseFsm {
    fn default() -> Self {
        Self::new()
    }
}
