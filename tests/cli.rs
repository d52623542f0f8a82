mod common;

use common::{f32_entry, i32_entry, special_entry, ModelFixture, SPECIAL_KEY};
use predicates::prelude::*;
use predicates::str::contains;

const MARIAN_YAML: &[u8] = b"type: transformer\ndim-emb: 512\ndim-vocabs:\n  - 32000\n  - 32000\nversion: v1.12.0\n";

fn marian_payload() -> Vec<u8> {
    let mut payload = MARIAN_YAML.to_vec();
    payload.push(0);
    payload
}

fn two_arrays() -> ModelFixture {
    ModelFixture::new(&[
        ("a", f32_entry(&[0.5; 6], &[2, 3])),
        ("b", i32_entry(&[1, 2, 3, 4], &[4])),
    ])
}

#[test]
fn list_keys_and_total() {
    two_arrays()
        .cmd()
        .assert()
        .success()
        .stdout("a\nb\nTotal number of parameters: 10\n");
}

#[test]
fn list_matrix_info_short_flag() {
    two_arrays()
        .cmd()
        .arg("-mi")
        .assert()
        .success()
        .stdout("a (2, 3) float32\nb (4,) int32\nTotal number of parameters: 10\n");
}

#[test]
fn list_matrix_info_long_flag_with_special_key() {
    ModelFixture::new(&[
        ("a", f32_entry(&[0.5; 6], &[2, 3])),
        (SPECIAL_KEY, special_entry(&marian_payload())),
    ])
    .cmd()
    .arg("--matrix-info")
    .assert()
    .success()
    .stdout(contains("special:model.yml ("))
    .stdout(contains("Total number of parameters: 6\n"));
}

#[test]
fn missing_key_exits_1() {
    two_arrays()
        .cmd()
        .args(["--key", "c"])
        .assert()
        .code(1)
        .stdout("Key not found\n");
}

#[test]
fn full_matrix_prints_each_element() {
    ModelFixture::new(&[("m", i32_entry(&[1, 2, 3, 4], &[2, 2]))])
        .cmd()
        .args(["-k", "m", "-f"])
        .assert()
        .success()
        .stdout("1\n2\n3\n4\n");
}

#[test]
fn summarized_key_dump() {
    ModelFixture::new(&[("m", i32_entry(&[1, 2, 3, 4], &[2, 2]))])
        .cmd()
        .args(["-k", "m"])
        .assert()
        .success()
        .stdout("[[1, 2],\n [3, 4]]\n");
}

#[test]
fn special_without_node_exits_1() {
    two_arrays()
        .cmd()
        .arg("--special")
        .assert()
        .code(1)
        .stdout("No special Marian YAML node found in the model\n");
}

#[test]
fn special_field_value() {
    ModelFixture::new(&[(SPECIAL_KEY, special_entry(b"foo: 42\n"))])
        .cmd()
        .args(["-s", "-k", "foo"])
        .assert()
        .success()
        .stdout("42\n");
}

#[test]
fn special_field_with_trailing_nul() {
    ModelFixture::new(&[(SPECIAL_KEY, special_entry(&marian_payload()))])
        .cmd()
        .args(["-s", "-k", "dim-vocabs"])
        .assert()
        .success()
        .stdout("[32000, 32000]\n");
}

#[test]
fn special_text_verbatim() {
    ModelFixture::new(&[(SPECIAL_KEY, special_entry(MARIAN_YAML))])
        .cmd()
        .arg("-s")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("type: transformer\ndim-emb: 512\n"));
}

#[test]
fn special_missing_field_fails_loudly() {
    ModelFixture::new(&[(SPECIAL_KEY, special_entry(&marian_payload()))])
        .cmd()
        .args(["-s", "-k", "no-such-field"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(contains("no-such-field"));
}

#[test]
fn missing_model_file_fails() {
    let fixture = two_arrays();
    let mut cmd = assert_cmd::Command::cargo_bin("model-info").unwrap();
    cmd.args(["-m"])
        .arg(fixture.path.with_file_name("absent.npz"))
        .assert()
        .failure()
        .stderr(contains("Model not found"));
}

#[test]
fn model_is_opened_only_at_the_given_path() {
    let workdir = tempfile::TempDir::new().unwrap();
    let models = workdir.path().join("models");
    std::fs::create_dir(&models).unwrap();
    let fixture = two_arrays();
    std::fs::copy(&fixture.path, models.join("model.npz")).unwrap();

    assert_cmd::Command::cargo_bin("model-info")
        .unwrap()
        .current_dir(workdir.path())
        .args(["-m", "model.npz"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(contains("Model not found"));
}

#[test]
fn key_dump_accepts_member_name() {
    two_arrays()
        .cmd()
        .args(["-k", "b.npy", "-f"])
        .assert()
        .success()
        .stdout("1\n2\n3\n4\n");
}

#[test]
fn model_flag_is_required() {
    assert_cmd::Command::cargo_bin("model-info")
        .unwrap()
        .args(["-k", "a"])
        .assert()
        .failure()
        .stderr(contains("--model"));
}
