use assert_cmd::Command;
use base64::Engine;
use p256::ecdsa::signature::hazmat::PrehashVerifier;
use predicates::prelude::*;
use rsa::pkcs8::DecodePrivateKey;
use rstest::rstest;
use sha2::{Digest, Sha256};
use std::path::PathBuf;

fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .to_path_buf()
}

fn key_path(name: &str) -> String {
    project_root()
        .join("testdata/keys")
        .join(name)
        .to_string_lossy()
        .to_string()
}

fn shirushi() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_shirushi"));
    cmd.current_dir(project_root());
    cmd.env_remove("RUST_LOG");
    cmd
}

fn signature_line(stdout: &[u8]) -> String {
    String::from_utf8_lossy(stdout)
        .lines()
        .find_map(|line| line.strip_prefix("Signature: "))
        .unwrap()
        .to_string()
}

#[rstest]
#[case::rsa_pkcs1("rsa2048_pkcs1.pem", "PKCS#1", "sha256WithRSAEncryption")]
#[case::rsa_pkcs8("rsa2048_pkcs8.pem", "PKCS#8", "sha256WithRSAEncryption")]
#[case::ec_sec1("ec_p256_sec1.pem", "SEC1", "ecdsa-with-SHA256")]
#[case::ec_pkcs8("ec_p384_pkcs8.pem", "PKCS#8", "ecdsa-with-SHA256")]
fn test_key_inspect_file(#[case] file: &str, #[case] encoding: &str, #[case] algorithm: &str) {
    shirushi()
        .args(["key", "inspect", &key_path(file)])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Encoding: {encoding}")))
        .stdout(predicate::str::contains(format!(
            "Signature Algorithm: {algorithm}"
        )));
}

#[test]
fn test_key_inspect_stdin() {
    let pem = std::fs::read(key_path("ec_p384_sec1.pem")).unwrap();
    shirushi()
        .args(["key", "inspect"])
        .write_stdin(pem)
        .assert()
        .success()
        .stdout(predicate::str::contains("Curve: P-384"))
        .stdout(predicate::str::contains("Key Size: 384 bits"));
}

#[rstest]
#[case::p224("ec_p224_pkcs8.pem", "P-224", 224)]
#[case::p521("ec_p521_sec1.pem", "P-521", 521)]
fn test_key_inspect_curve(#[case] file: &str, #[case] curve: &str, #[case] bits: u32) {
    shirushi()
        .args(["key", "inspect", &key_path(file)])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Curve: {curve}")))
        .stdout(predicate::str::contains(format!("Key Size: {bits} bits")))
        .stdout(predicate::str::contains(
            "Signature Algorithm: ecdsa-with-SHA256",
        ));
}

#[test]
fn test_key_inspect_json() {
    let output = shirushi()
        .args(["key", "inspect", &key_path("rsa2048_pkcs1.pem"), "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["label"], "RSA PRIVATE KEY");
    assert_eq!(json["key_size"], 2048);
    assert_eq!(json["signature_algorithm_oid"], "1.2.840.113549.1.1.11");
}

#[rstest]
#[case::unsupported_label("unsupported_label.pem", "unsupported key type")]
#[case::encrypted("rsa2048_encrypted_pkcs8.pem", "unsupported key type")]
#[case::ed25519("ed25519_pkcs8.pem", "unsupported key type")]
#[case::unknown_curve("ec_secp256k1_sec1.pem", "malformed input")]
fn test_key_inspect_rejects(#[case] file: &str, #[case] kind: &str) {
    shirushi()
        .args(["key", "inspect", &key_path(file)])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(kind));
}

#[test]
fn test_key_inspect_garbage_stdin() {
    shirushi()
        .args(["key", "inspect"])
        .write_stdin("abc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed input"));
}

#[test]
fn test_key_inspect_missing_file() {
    shirushi()
        .args(["key", "inspect", "does/not/exist.pem"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_key_inspect_verbose_logs_to_stderr() {
    shirushi()
        .args(["-v", "key", "inspect", &key_path("ec_p256_pkcs8.pem")])
        .assert()
        .success()
        .stderr(predicate::str::contains("signature algorithm"));
}

#[test]
fn test_key_sign_rsa_verifies() {
    let message = b"hello from the build server";
    let output = shirushi()
        .args(["key", "sign", "--key", &key_path("rsa2048_pkcs8.pem")])
        .write_stdin(message.to_vec())
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    assert!(stdout.contains("Algorithm: sha256WithRSAEncryption"));

    let signature = base64::engine::general_purpose::STANDARD
        .decode(signature_line(&output.stdout))
        .unwrap();
    let pem = std::fs::read_to_string(key_path("rsa2048_pkcs8.pem")).unwrap();
    let public = rsa::RsaPublicKey::from(&rsa::RsaPrivateKey::from_pkcs8_pem(&pem).unwrap());
    public
        .verify(
            rsa::Pkcs1v15Sign::new::<Sha256>(),
            &Sha256::digest(message),
            &signature,
        )
        .unwrap();
}

#[test]
fn test_key_sign_ec_hex_verifies() {
    let message_path = key_path("ec_p256_sec1.pem");
    let output = shirushi()
        .args([
            "key",
            "sign",
            "--key",
            &key_path("ec_p256_sec1.pem"),
            &message_path,
            "-f",
            "hex",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let signature = hex::decode(signature_line(&output.stdout)).unwrap();
    let signature = p256::ecdsa::Signature::from_der(&signature).unwrap();
    let pem = std::fs::read_to_string(key_path("ec_p256_sec1.pem")).unwrap();
    let secret = p256::SecretKey::from_sec1_pem(&pem).unwrap();
    let verifying_key = p256::ecdsa::VerifyingKey::from(secret.public_key());
    let message = std::fs::read(&message_path).unwrap();
    verifying_key
        .verify_prehash(&Sha256::digest(&message), &signature)
        .unwrap();
}

#[test]
fn test_key_sign_unsupported_key() {
    shirushi()
        .args(["key", "sign", "--key", &key_path("ec_p192_sec1.pem")])
        .write_stdin("data")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported key type"));
}
