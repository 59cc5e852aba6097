mod common;

use std::fs;

use common::{private_key_der, TestPki};

#[test]
fn only_well_formed_der_certificates_are_detected() {
    // Files in the form type+encoding+extension: only the DER certificates
    // should survive loading.
    let pki = TestPki::new();
    let dir = tempfile::tempdir().expect("tempdir");

    fs::write(dir.path().join("certDER.cer"), &pki.leaf_dns.der).unwrap();
    fs::write(dir.path().join("certDER.crt"), &pki.intermediate.der).unwrap();
    fs::write(dir.path().join("certDER.der"), &pki.root.der).unwrap();
    // PEM-encoded well-formed certificate: excluded, only DER is accepted.
    fs::write(dir.path().join("certPEM.pem"), pki.leaf_dns.pem()).unwrap();
    // DER-encoded key, not a certificate.
    fs::write(dir.path().join("keyDER.der"), private_key_der()).unwrap();
    // Random data and an empty file.
    fs::write(dir.path().join("gibberish.crt"), b"\xde\xad\xbe\xef not a cert").unwrap();
    fs::write(dir.path().join("empty.cer"), b"").unwrap();

    let certificates =
        sentinel_engine::certificates_in_directory(dir.path()).expect("load bundle");
    assert_eq!(certificates.len(), 3, "expected 3 well-formed certificates");
}

#[test]
fn subdirectories_are_skipped() {
    let pki = TestPki::new();
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("cert.der"), &pki.leaf_dns.der).unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("other.der"), &pki.root.der).unwrap();

    let certificates =
        sentinel_engine::certificates_in_directory(dir.path()).expect("load bundle");
    assert_eq!(certificates.len(), 1);
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("does-not-exist");
    assert!(sentinel_engine::certificates_in_directory(&missing).is_err());
}

#[test]
fn trailing_garbage_after_certificate_is_excluded() {
    let pki = TestPki::new();
    let dir = tempfile::tempdir().expect("tempdir");
    let mut padded = pki.leaf_dns.der.clone();
    padded.extend_from_slice(b"trailing");
    fs::write(dir.path().join("padded.der"), padded).unwrap();

    let certificates =
        sentinel_engine::certificates_in_directory(dir.path()).expect("load bundle");
    assert!(certificates.is_empty());
}

#[test]
fn public_keys_follow_loaded_certificates() {
    let pki = TestPki::new();
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("leaf.der"), &pki.leaf_dns.der).unwrap();
    fs::write(dir.path().join("junk.pem"), pki.root.pem()).unwrap();

    let keys = sentinel_engine::public_keys_in_directory(dir.path()).expect("load keys");
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0], pki.leaf_dns.cert.public_key());
}
