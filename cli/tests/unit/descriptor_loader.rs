//! Unit tests for the descriptor loader service.

#![allow(clippy::expect_used)]

use std::path::Path;

use devpod::application::services::descriptor_loader::{
    descriptor_path, load_compose, load_descriptor,
};
use devpod::domain::descriptor::{BuildPlan, PostCreateCommand};
use devpod::domain::error::DevpodError;

use crate::helpers::{COMPOSE_DESCRIPTOR, DOCKERFILE_DESCRIPTOR, Project, ProjectFs};

#[test]
fn descriptor_path_is_under_devcontainer() {
    assert_eq!(
        descriptor_path(Path::new("/src/demo")),
        Path::new("/src/demo/.devcontainer/devcontainer.json")
    );
}

#[test]
fn loads_dockerfile_descriptor_with_comments() {
    let project = Project::new(
        "demo",
        &[(".devcontainer/devcontainer.json", DOCKERFILE_DESCRIPTOR)],
    );
    let descriptor = load_descriptor(&ProjectFs::new(), &project.dir).expect("valid");

    assert_eq!(descriptor.name.as_deref(), Some("Demo"));
    assert_eq!(descriptor.workspace_folder, "/workspace");
    assert_eq!(
        descriptor.post_create,
        Some(PostCreateCommand::Shell("echo hi".into()))
    );
    match descriptor.plan {
        BuildPlan::Dockerfile {
            dockerfile,
            context,
            ..
        } => {
            assert_eq!(dockerfile, project.dir.join(".devcontainer/Dockerfile"));
            assert_eq!(context, project.dir);
        }
        BuildPlan::Compose { .. } => panic!("expected a Dockerfile plan"),
    }
}

#[test]
fn loads_compose_descriptor() {
    let project = Project::new(
        "demo",
        &[(".devcontainer/devcontainer.json", COMPOSE_DESCRIPTOR)],
    );
    let descriptor = load_descriptor(&ProjectFs::new(), &project.dir).expect("valid");
    assert!(descriptor.is_podded());
    assert_eq!(
        descriptor.plan,
        BuildPlan::Compose {
            file: project.dir.join(".devcontainer/docker-compose.yml"),
            service: "app".into(),
        }
    );
}

#[test]
fn missing_descriptor_is_not_found_with_path() {
    let project = Project::new("demo", &[]);
    let err = load_descriptor(&ProjectFs::new(), &project.dir).expect_err("missing");
    match err.downcast_ref::<DevpodError>() {
        Some(DevpodError::NotFound { path }) => {
            assert_eq!(path, &descriptor_path(&project.dir));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn invalid_compose_yaml_is_malformed() {
    let project = Project::new(
        "demo",
        &[(".devcontainer/docker-compose.yml", "services: [unclosed\n")],
    );
    let path = project.dir.join(".devcontainer/docker-compose.yml");
    let err = load_compose(&ProjectFs::new(), &path).expect_err("invalid yaml");
    assert!(matches!(
        err.downcast_ref::<DevpodError>(),
        Some(DevpodError::MalformedDescriptor { .. })
    ));
}

#[test]
fn compose_services_are_listed_in_order() {
    let project = Project::new(
        "demo",
        &[(
            ".devcontainer/docker-compose.yml",
            "services:\n  db:\n    image: postgres\n  app:\n    image: alpine\n",
        )],
    );
    let path = project.dir.join(".devcontainer/docker-compose.yml");
    let compose = load_compose(&ProjectFs::new(), &path).expect("valid");
    assert_eq!(compose.service_names(), ["db", "app"]);
}
