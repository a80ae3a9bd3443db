//! Release FSM tests

use devsync::livesync::fsm::{ReleaseEvent, ReleaseFsm, ReleaseState};
use devsync::models::device::Platform;

#[test]
fn test_fsm_initial_state() {
    let fsm = ReleaseFsm::new();
    assert_eq!(fsm.state(), &ReleaseState::NotStarted);
    assert!(fsm.error().is_none());
    assert!(fsm.completed().is_empty());
    assert!(!fsm.is_terminal());
}

#[test]
fn test_fsm_two_platform_flow() {
    let mut fsm = ReleaseFsm::new();

    for platform in [Platform::Ios, Platform::Android] {
        fsm.process(ReleaseEvent::Deploy(platform.clone())).unwrap();
        assert_eq!(fsm.state(), &ReleaseState::Deploying(platform.clone()));

        fsm.process(ReleaseEvent::Deployed).unwrap();
        assert_eq!(fsm.state(), &ReleaseState::Launching(platform.clone()));

        fsm.process(ReleaseEvent::Launched).unwrap();
        assert_eq!(fsm.state(), &ReleaseState::Tracking(platform));
    }

    fsm.process(ReleaseEvent::Finish).unwrap();
    assert_eq!(fsm.state(), &ReleaseState::Done);
    assert_eq!(fsm.completed(), &[Platform::Ios, Platform::Android]);
    assert!(fsm.is_terminal());
}

#[test]
fn test_fsm_empty_run() {
    let mut fsm = ReleaseFsm::new();
    fsm.process(ReleaseEvent::Finish).unwrap();
    assert_eq!(fsm.state(), &ReleaseState::Done);
}

#[test]
fn test_fsm_launch_failure_is_terminal() {
    let mut fsm = ReleaseFsm::new();

    fsm.process(ReleaseEvent::Deploy(Platform::Ios)).unwrap();
    fsm.process(ReleaseEvent::Deployed).unwrap();
    fsm.process(ReleaseEvent::Fail("launch timeout".to_string())).unwrap();

    assert_eq!(fsm.state(), &ReleaseState::Failed);
    assert_eq!(fsm.error(), Some("launch timeout"));

    // Nothing leaves Failed
    assert!(fsm.process(ReleaseEvent::Deploy(Platform::Android)).is_err());
    assert!(fsm.process(ReleaseEvent::Finish).is_err());
}

#[test]
fn test_fsm_invalid_transition() {
    let mut fsm = ReleaseFsm::new();

    // Cannot launch before deploying
    assert!(fsm.process(ReleaseEvent::Launched).is_err());

    // Cannot finish mid-platform
    fsm.process(ReleaseEvent::Deploy(Platform::Android)).unwrap();
    assert!(fsm.process(ReleaseEvent::Finish).is_err());

    // Tracking cannot fail
    fsm.process(ReleaseEvent::Deployed).unwrap();
    fsm.process(ReleaseEvent::Launched).unwrap();
    assert!(fsm.process(ReleaseEvent::Fail("late".to_string())).is_err());
}
