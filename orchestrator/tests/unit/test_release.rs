//! Release runner tests

use std::path::PathBuf;

use devsync::app::options::{CommandOptions, DeployOptionsOverrides};
use devsync::errors::OrchestratorError;
use devsync::livesync::fsm::ReleaseState;
use devsync::models::device::{Device, Platform};

use crate::fakes::Harness;

fn windows() -> Platform {
    Platform::Other("windows".to_string())
}

fn release_options() -> CommandOptions {
    CommandOptions {
        release: true,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_abort_on_first_deploy_failure() {
    let harness = Harness::new()
        .with_platforms(vec![Platform::Ios, Platform::Android, windows()])
        .failing_deploy(Platform::Android);
    let orchestrator = harness.orchestrator(release_options());

    let failure = orchestrator.run_in_release_mode(None).await.unwrap_err();

    match failure.error {
        OrchestratorError::DeployError(msg) => assert_eq!(msg, "android deploy rejected"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(
        harness.work_calls(),
        vec![
            "deploy:ios".to_string(),
            "start:ios:org.example.app".to_string(),
            "track:angular".to_string(),
            "deploy:android".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_abort_on_launch_failure() {
    let harness = Harness::new().failing_start(Platform::Ios);
    let orchestrator = harness.orchestrator(release_options());

    let failure = orchestrator.run_in_release_mode(None).await.unwrap_err();

    assert!(matches!(failure.error, OrchestratorError::LaunchError(_)));
    let ios = failure.report.run(&Platform::Ios).unwrap();
    assert_eq!(ios.state, ReleaseState::Failed);
    assert_eq!(ios.error.as_deref(), Some("Launch error: ios did not start"));
    assert_eq!(harness.log.count("deploy:"), 1);
    assert_eq!(harness.log.count("track:"), 0);
    assert_eq!(harness.log.count("deploy:android"), 0);
}

#[tokio::test]
async fn test_failure_report_keeps_completed_platforms() {
    let harness = Harness::new()
        .with_platforms(vec![Platform::Ios, Platform::Android, windows()])
        .failing_deploy(Platform::Android);
    let orchestrator = harness.orchestrator(release_options());

    let failure = orchestrator.run_in_release_mode(None).await.unwrap_err();
    let report = &failure.report;

    assert_eq!(report.state, ReleaseState::Failed);
    assert_eq!(report.runs.len(), 3);

    let ios = report.run(&Platform::Ios).unwrap();
    assert_eq!(ios.state, ReleaseState::Done);
    assert!(ios.started_at.is_some());
    assert!(ios.finished_at.is_some());
    assert!(ios.error.is_none());

    let android = report.run(&Platform::Android).unwrap();
    assert_eq!(android.state, ReleaseState::Failed);
    assert_eq!(
        android.error.as_deref(),
        Some("Deployment error: android deploy rejected")
    );

    let skipped = report.run(&windows()).unwrap();
    assert_eq!(skipped.state, ReleaseState::NotStarted);
    assert!(skipped.started_at.is_none());
}

#[tokio::test]
async fn test_execute_returns_release_error_unchanged() {
    let harness = Harness::new().failing_deploy(Platform::Ios);
    let orchestrator = harness.orchestrator(release_options());

    let devices = vec![Device::new("iphone", Platform::Ios, false)];
    let result = orchestrator.execute(&devices, Some(&Platform::Ios), None).await;

    match result {
        Err(OrchestratorError::DeployError(msg)) => assert_eq!(msg, "ios deploy rejected"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_all_platforms_in_registry_order() {
    let harness = Harness::new().with_platforms(vec![Platform::Android, Platform::Ios, windows()]);
    let orchestrator = harness.orchestrator(release_options());

    let report = orchestrator.run_in_release_mode(None).await.unwrap();

    assert_eq!(report.state, ReleaseState::Done);
    let platforms: Vec<Platform> = report.runs.iter().map(|r| r.platform.clone()).collect();
    assert_eq!(platforms, vec![Platform::Android, Platform::Ios, windows()]);
    assert!(report.runs.iter().all(|r| r.finished_at.is_some()));
    assert!(report.runs.iter().all(|r| r.state == ReleaseState::Done));
    assert_eq!(harness.log.count("track:"), 3);
}

#[tokio::test]
async fn test_explicit_platform_only() {
    let harness = Harness::new();
    let orchestrator = harness.orchestrator(release_options());

    let report = orchestrator
        .run_in_release_mode(Some(&Platform::Android))
        .await
        .unwrap();

    assert_eq!(report.runs.len(), 1);
    assert_eq!(
        harness.work_calls(),
        vec![
            "deploy:android".to_string(),
            "start:android:org.example.app".to_string(),
            "track:angular".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_deploy_options_override_wins() {
    let harness = Harness::new();
    let orchestrator = harness.orchestrator(CommandOptions {
        release: true,
        bundle: true,
        deploy_overrides: DeployOptionsOverrides {
            clean: Some(false),
            team_id: Some("TEAM42".to_string()),
            ..Default::default()
        },
        ..Default::default()
    });

    orchestrator
        .run_in_release_mode(Some(&Platform::Ios))
        .await
        .unwrap();

    let requests = harness.platform.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);

    let request = &requests[0];
    assert_eq!(request.platform, Platform::Ios);
    assert!(!request.deploy_options.clean);
    assert_eq!(request.deploy_options.team_id.as_deref(), Some("TEAM42"));
    assert_eq!(request.deploy_options.project_dir, PathBuf::from("/work/app"));
    assert!(request.app_files_updater_options.bundle);
    assert!(request.app_files_updater_options.release);
    assert_eq!(request.project.project_id, "org.example.app");
}

#[tokio::test]
async fn test_clean_defaults_to_true() {
    let harness = Harness::new();
    let orchestrator = harness.orchestrator(release_options());

    orchestrator
        .run_in_release_mode(Some(&Platform::Android))
        .await
        .unwrap();

    let requests = harness.platform.requests.lock().unwrap();
    assert!(requests[0].deploy_options.clean);
}

#[tokio::test]
async fn test_run_options_passed_through() {
    let harness = Harness::new();
    let orchestrator = harness.orchestrator(CommandOptions {
        release: true,
        justlaunch: true,
        emulator: true,
        device: Some("emulator-5554".to_string()),
        ..Default::default()
    });

    orchestrator
        .run_in_release_mode(Some(&Platform::Android))
        .await
        .unwrap();

    let run_options = harness.platform.run_options.lock().unwrap();
    assert_eq!(run_options.len(), 1);
    assert!(run_options[0].justlaunch);
    assert!(run_options[0].emulator);
    assert_eq!(run_options[0].device.as_deref(), Some("emulator-5554"));
    assert_eq!(run_options[0].project_dir, PathBuf::from("/work/app"));
}

#[tokio::test]
async fn test_empty_registry_completes() {
    let harness = Harness::new().with_platforms(vec![]);
    let orchestrator = harness.orchestrator(release_options());

    let report = orchestrator.run_in_release_mode(None).await.unwrap();

    assert_eq!(report.state, ReleaseState::Done);
    assert!(report.runs.is_empty());
    assert!(harness.work_calls().is_empty());
}
