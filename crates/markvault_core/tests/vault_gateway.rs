use markvault_core::{FsVaultGateway, GatewayError, VaultGateway};
use std::fs;
use tempfile::TempDir;

fn vault_with_layout() -> TempDir {
    let vault = TempDir::new().expect("temp vault");
    fs::write(vault.path().join("a.md"), "alpha").unwrap();
    fs::write(vault.path().join("B.MD"), "beta").unwrap();
    fs::write(vault.path().join("notes.txt"), "not markdown").unwrap();

    let sub = vault.path().join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("c.md"), "gamma").unwrap();
    fs::write(sub.join("image.png"), "binary").unwrap();

    let deep = sub.join("deep");
    fs::create_dir(&deep).unwrap();
    fs::write(deep.join("d.md"), "too deep").unwrap();

    vault
}

#[test]
fn listing_filters_markdown_one_level_deep() {
    let vault = vault_with_layout();
    let gateway = FsVaultGateway::new();

    let mut names: Vec<String> = gateway
        .list_markdown_files(vault.path())
        .iter()
        .map(|path| {
            path.strip_prefix(vault.path())
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();

    assert_eq!(names, vec!["B.MD", "a.md", "sub/c.md"]);
}

#[test]
fn listing_missing_root_returns_empty() {
    let vault = TempDir::new().unwrap();
    let gone = vault.path().join("does-not-exist");
    let gateway = FsVaultGateway::new();

    assert!(gateway.list_markdown_files(&gone).is_empty());
}

#[test]
fn read_write_roundtrip() {
    let vault = TempDir::new().unwrap();
    let path = vault.path().join("note.md");
    let gateway = FsVaultGateway::new();

    gateway.write_file(&path, "hello vault").unwrap();
    assert_eq!(gateway.read_file(&path).unwrap(), "hello vault");
}

#[test]
fn read_missing_file_is_not_found() {
    let vault = TempDir::new().unwrap();
    let gateway = FsVaultGateway::new();

    let err = gateway
        .read_file(&vault.path().join("absent.md"))
        .expect_err("missing file should fail");
    assert!(matches!(err, GatewayError::NotFound(_)));
}

#[test]
fn delete_is_idempotent() {
    let vault = TempDir::new().unwrap();
    let path = vault.path().join("note.md");
    let gateway = FsVaultGateway::new();

    gateway.write_file(&path, "x").unwrap();
    gateway.delete_file(&path).unwrap();
    assert!(!path.exists());

    // Second delete of the now-absent file still succeeds.
    gateway.delete_file(&path).unwrap();
}

#[test]
fn rename_moves_the_file() {
    let vault = TempDir::new().unwrap();
    let old = vault.path().join("old.md");
    let new = vault.path().join("new.md");
    let gateway = FsVaultGateway::new();

    gateway.write_file(&old, "body").unwrap();
    gateway.rename_file(&old, &new).unwrap();

    assert!(!old.exists());
    assert_eq!(gateway.read_file(&new).unwrap(), "body");
}

#[test]
fn rename_missing_source_is_not_found() {
    let vault = TempDir::new().unwrap();
    let gateway = FsVaultGateway::new();

    let err = gateway
        .rename_file(&vault.path().join("ghost.md"), &vault.path().join("x.md"))
        .expect_err("missing source should fail");
    assert!(matches!(err, GatewayError::NotFound(_)));
}

#[test]
fn rename_existing_target_is_a_conflict() {
    let vault = TempDir::new().unwrap();
    let old = vault.path().join("old.md");
    let new = vault.path().join("taken.md");
    let gateway = FsVaultGateway::new();

    gateway.write_file(&old, "a").unwrap();
    gateway.write_file(&new, "b").unwrap();

    let err = gateway
        .rename_file(&old, &new)
        .expect_err("existing target should fail");
    assert!(matches!(err, GatewayError::AlreadyExists(_)));
    assert_eq!(gateway.read_file(&new).unwrap(), "b");
}
