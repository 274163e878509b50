//! Deployments run against stand-in `docker` and `gcloud` scripts.
#![cfg(unix)]

mod common;

use common::{FakeTools, agent_dir};
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn failed_docker_build_stops_before_run() {
    let agent = agent_dir();
    let parent = TempDir::new().unwrap();
    let staging = parent.path().join("stage");
    let tools = FakeTools::new();
    tools.install("docker", "exit 1");

    tools
        .adk_deploy()
        .arg("docker")
        .arg(agent.path())
        .arg("--temp-folder")
        .arg(&staging)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Command failed: docker build"));

    let calls = tools.calls();
    assert_eq!(calls.len(), 1, "calls: {:?}", calls);
    assert!(calls[0].starts_with("docker build -t adk-python-adk-default-service-name "));
    assert!(!staging.exists());
}

#[test]
fn docker_builds_then_runs_container() {
    let agent = agent_dir();
    let tools = FakeTools::new();
    tools.install("docker", "exit 0");

    tools
        .adk_deploy()
        .arg("docker")
        .arg(agent.path())
        .args(["--service-name", "Weather", "--env", "A=1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:8000"));

    let calls = tools.calls();
    assert_eq!(calls.len(), 2, "calls: {:?}", calls);
    assert!(calls[0].starts_with("docker build -t adk-python-weather "));
    assert_eq!(calls[1], "docker run -d -p 8000:8000 -e A=1 adk-python-weather");
}

#[test]
fn failed_gcloud_deploy_runs_once_and_cleans_up() {
    let agent = agent_dir();
    let parent = TempDir::new().unwrap();
    let staging = parent.path().join("stage");
    let tools = FakeTools::new();
    tools.install("gcloud", "exit 1");

    tools
        .adk_deploy()
        .arg("cloud_run")
        .arg(agent.path())
        .args(["--project", "p", "--temp-folder"])
        .arg(&staging)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Command failed: gcloud run deploy"));

    let calls = tools.calls();
    assert_eq!(calls.len(), 1, "calls: {:?}", calls);
    assert!(calls[0].starts_with("gcloud run deploy adk-default-service-name --source "));
    assert!(calls[0].contains("--project p --region us-central1 --port 8000"));
    assert!(!staging.exists());
}

#[test]
fn gcloud_stderr_is_shown_in_quiet_mode() {
    let agent = agent_dir();
    let tools = FakeTools::new();
    tools.install(
        "gcloud",
        "echo 'ERROR: permission denied on project p' >&2\nexit 1",
    );

    tools
        .adk_deploy()
        .arg("cloud_run")
        .arg(agent.path())
        .args(["--project", "p", "--quiet"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("ERROR: permission denied on project p"));
}

#[test]
fn gcloud_prompt_reads_from_user_stdin() {
    let agent = agent_dir();
    let tools = FakeTools::new();
    tools.install(
        "gcloud",
        "printf 'Allow unauthenticated invocations? (y/N) '\nread answer\necho \"answer=$answer\" >> \"$FAKE_TOOL_LOG\"",
    );

    tools
        .adk_deploy()
        .arg("cloud_run")
        .arg(agent.path())
        .args(["--project", "p"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Allow unauthenticated invocations? (y/N)"));

    assert_eq!(tools.calls().last().map(String::as_str), Some("answer=y"));
}

#[test]
fn default_project_comes_from_gcloud_config() {
    let agent = agent_dir();
    let tools = FakeTools::new();
    tools.install(
        "gcloud",
        "if [ \"$1 $2\" = \"config get-value\" ]; then echo cfg-project; fi\nexit 0",
    );

    tools
        .adk_deploy()
        .arg("cloud_run")
        .arg(agent.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Using default project: cfg-project"));

    let calls = tools.calls();
    assert_eq!(calls.len(), 2, "calls: {:?}", calls);
    assert_eq!(calls[0], "gcloud config get-value project");
    assert!(calls[1].contains("--project cfg-project"));
    assert!(calls[1].contains("GOOGLE_CLOUD_PROJECT=cfg-project"));
}
