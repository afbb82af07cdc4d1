//! Tests for build-context staging.

use super::*;
use crate::test_support::Workspace;
use std::fs;

fn context_root(ws: &Workspace) -> std::path::PathBuf {
    ws.source().join("_docker-build")
}

#[test]
fn reset_creates_missing_directory() {
    let ws = Workspace::new();
    let root = context_root(&ws);

    reset_context(&root).unwrap();

    assert!(root.is_dir());
    assert_eq!(fs::read_dir(&root).unwrap().count(), 0);
}

#[test]
fn reset_clears_previous_contents() {
    let ws = Workspace::new();
    let root = context_root(&ws);
    fs::create_dir_all(root.join("stale").join("deep")).unwrap();
    fs::write(root.join("Dockerfile"), "FROM old").unwrap();
    fs::write(root.join("stale").join("deep").join("x"), "x").unwrap();

    reset_context(&root).unwrap();

    assert!(root.is_dir());
    assert_eq!(fs::read_dir(&root).unwrap().count(), 0);
}

#[test]
fn reset_replaces_file_at_context_path() {
    let ws = Workspace::new();
    let root = context_root(&ws);
    fs::write(&root, "not a directory").unwrap();

    reset_context(&root).unwrap();

    assert!(root.is_dir());
}

#[test]
fn reset_is_repeatable() {
    let ws = Workspace::new();
    let root = context_root(&ws);

    reset_context(&root).unwrap();
    fs::write(root.join("leftover"), "x").unwrap();
    reset_context(&root).unwrap();

    assert!(!root.join("leftover").exists());
}

#[cfg(unix)]
#[test]
fn reset_uses_standard_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let ws = Workspace::new();
    let root = context_root(&ws);
    reset_context(&root).unwrap();

    let mode = fs::metadata(&root).unwrap().permissions().mode();
    assert_eq!(mode & 0o700, 0o700);
}

#[test]
fn classify_prefers_template() {
    let ws = Workspace::new();
    ws.write_source("Dockerfile", "FROM a");
    ws.write_source("Dockerfile.template", "FROM %%B%%");

    assert_eq!(classify(&ws.source()).unwrap(), DockerfileKind::Template);
}

#[test]
fn classify_plain_dockerfile() {
    let ws = Workspace::new();
    ws.write_source("Dockerfile", "FROM a");

    assert_eq!(classify(&ws.source()).unwrap(), DockerfileKind::Plain);
}

#[test]
fn classify_missing_dockerfile() {
    let ws = Workspace::new();
    ws.write_source("README.md", "nothing to build");

    match classify(&ws.source()) {
        Err(BuilderError::MissingDockerfile(path)) => assert_eq!(path, ws.source()),
        other => panic!("expected missing Dockerfile error, got {:?}", other),
    }
}

#[test]
fn populate_copies_template_only() {
    let ws = Workspace::new();
    ws.write_source("Dockerfile", "FROM plain");
    ws.write_source("Dockerfile.template", "FROM %%BASE%%");
    let root = context_root(&ws);
    reset_context(&root).unwrap();

    let kind = populate_context(&ws.source(), &root).unwrap();

    assert_eq!(kind, Some(DockerfileKind::Template));
    assert_eq!(
        fs::read_to_string(root.join("Dockerfile.template")).unwrap(),
        "FROM %%BASE%%"
    );
    assert!(!root.join("Dockerfile").exists());
}

#[test]
fn populate_copies_plain_dockerfile_byte_identical() {
    let ws = Workspace::new();
    let content = "FROM alpine:3.18\r\nRUN echo %%NOT_A_PLACEHOLDER%%\n\n";
    ws.write_source("Dockerfile", content);
    let root = context_root(&ws);
    reset_context(&root).unwrap();

    let kind = populate_context(&ws.source(), &root).unwrap();

    assert_eq!(kind, Some(DockerfileKind::Plain));
    assert_eq!(
        fs::read(root.join("Dockerfile")).unwrap(),
        fs::read(ws.source().join("Dockerfile")).unwrap()
    );
}

#[test]
fn populate_copies_src_tree() {
    let ws = Workspace::new();
    ws.write_source("Dockerfile", "FROM a");
    ws.write_source("src/app/main.py", "print('hi')");
    ws.write_source("src/requirements.txt", "flask\n");
    let root = context_root(&ws);
    reset_context(&root).unwrap();

    populate_context(&ws.source(), &root).unwrap();

    assert_eq!(
        fs::read_to_string(root.join("src/app/main.py")).unwrap(),
        "print('hi')"
    );
    assert_eq!(
        fs::read_to_string(root.join("src/requirements.txt")).unwrap(),
        "flask\n"
    );
}

#[test]
fn populate_ignores_other_files() {
    let ws = Workspace::new();
    ws.write_source("Dockerfile", "FROM a");
    ws.write_source("Dockerfile.variables", "A: b");
    ws.write_source("notes.txt", "x");
    let root = context_root(&ws);
    reset_context(&root).unwrap();

    populate_context(&ws.source(), &root).unwrap();

    let mut names: Vec<_> = fs::read_dir(&root)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Dockerfile"]);
}

#[test]
fn populate_without_dockerfile_copies_nothing() {
    let ws = Workspace::new();
    let root = context_root(&ws);
    reset_context(&root).unwrap();

    let kind = populate_context(&ws.source(), &root).unwrap();

    assert_eq!(kind, None);
    assert_eq!(fs::read_dir(&root).unwrap().count(), 0);
}

#[test]
fn stage_builds_context() {
    let ws = Workspace::new();
    ws.write_source("Dockerfile.template", "FROM %%BASE%%");
    let root = context_root(&ws);

    let ctx = stage(&ws.source(), &root).unwrap();

    assert_eq!(ctx.root_path, root);
    assert!(ctx.uses_template);
    assert!(ctx.template_path().exists());
}

#[test]
fn stage_fails_without_dockerfile() {
    let ws = Workspace::new();
    let root = context_root(&ws);

    let result = stage(&ws.source(), &root);

    assert!(matches!(result, Err(BuilderError::MissingDockerfile(_))));
    assert!(root.is_dir());
}

#[test]
fn stage_does_not_copy_previous_context_into_itself() {
    let ws = Workspace::new();
    ws.write_source("Dockerfile", "FROM a");
    let root = context_root(&ws);

    stage(&ws.source(), &root).unwrap();
    let ctx = stage(&ws.source(), &root).unwrap();

    assert!(!ctx.root_path.join("_docker-build").exists());
    assert!(ctx.dockerfile_path().exists());
}
