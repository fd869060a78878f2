use std::fs;

use rtl_eval::{canonicalize_or_current, executable_dir};
use tempfile::tempdir;

#[test]
fn canonicalize_or_current_resolves_existing_absolute_path() {
    let tmp = tempdir().expect("tempdir");
    let nested = tmp.path().join("nested");
    fs::create_dir_all(&nested).expect("create nested");

    let result = canonicalize_or_current(nested.to_str().unwrap()).expect("canonicalize");
    assert_eq!(result, nested.canonicalize().expect("canonicalize nested"));
}

#[test]
fn canonicalize_or_current_keeps_missing_absolute_path() {
    let tmp = tempdir().expect("tempdir");
    let missing = tmp.path().join("not-yet");
    let result = canonicalize_or_current(missing.to_str().unwrap()).expect("resolve");
    assert_eq!(result, missing);
}

#[test]
fn canonicalize_or_current_joins_missing_relative_path_onto_cwd() {
    let result = canonicalize_or_current("does/not/exist").expect("resolve");
    assert_eq!(result, std::env::current_dir().unwrap().join("does/not/exist"));
}

#[test]
fn executable_dir_is_a_directory() {
    assert!(executable_dir().expect("exe dir").is_dir());
}
