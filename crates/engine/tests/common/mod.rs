#![allow(dead_code)]

use rcgen::{
    date_time_ymd, BasicConstraints, CertificateParams, DnType, IsCa, KeyPair, SanType,
    PKCS_ECDSA_P256_SHA256,
};
use sentinel_engine as se;

/// The hostname the well-known test leaves are issued for.
pub const HOST: &str = "test.sentinel.dev";

/// A generated certificate: the one-and-only DER serialization (ECDSA
/// signatures are randomized, so serialize once and reuse), the engine's
/// parsed form, and the rcgen handle kept around for signing children.
pub struct TestCert {
    pub der: Vec<u8>,
    pub cert: se::Certificate,
    pub rc: rcgen::Certificate,
}

impl TestCert {
    fn self_signed(params: CertificateParams) -> TestCert {
        let rc = rcgen::Certificate::from_params(params).expect("certificate");
        let der = rc.serialize_der().expect("serialize der");
        let cert = se::Certificate::from_der(der.clone()).expect("parse der");
        TestCert { der, cert, rc }
    }

    fn issued(params: CertificateParams, issuer: &TestCert) -> TestCert {
        let rc = rcgen::Certificate::from_params(params).expect("certificate");
        let der = rc.serialize_der_with_signer(&issuer.rc).expect("serialize der");
        let cert = se::Certificate::from_der(der.clone()).expect("parse der");
        TestCert { der, cert, rc }
    }

    /// PEM rendition of this certificate as self-signed output (only used to
    /// produce deliberately-excluded bundle fixtures).
    pub fn pem(&self) -> String {
        self.rc.serialize_pem().expect("serialize pem")
    }
}

fn base_params(common_name: &str) -> CertificateParams {
    let key = KeyPair::generate(&PKCS_ECDSA_P256_SHA256).expect("keypair");
    let mut params = CertificateParams::new(vec![]);
    params.alg = &PKCS_ECDSA_P256_SHA256;
    params.key_pair = Some(key);
    params.distinguished_name.push(DnType::CommonName, common_name);
    params
}

fn ca_params(common_name: &str) -> CertificateParams {
    let mut params = base_params(common_name);
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params
}

fn leaf_params(common_name: &str, sans: Vec<SanType>) -> CertificateParams {
    let mut params = base_params(common_name);
    params.subject_alt_names = sans;
    params
}

/// A complete in-memory PKI exercising every chain shape the policy layer
/// cares about: two independent CA hierarchies plus leaf variants for host
/// matching, expiry, and pin scenarios.
pub struct TestPki {
    pub root: TestCert,
    pub intermediate: TestCert,
    pub second_root: TestCert,
    pub second_intermediate: TestCert,

    // All leaves below are issued by `intermediate`.
    pub leaf_dns: TestCert,
    pub leaf_wildcard: TestCert,
    pub leaf_multiple_dns: TestCert,
    pub leaf_dns_and_uri: TestCert,
    pub leaf_uri_only: TestCert,
    pub leaf_no_san: TestCert,
    pub leaf_expired: TestCert,
}

impl TestPki {
    pub fn new() -> TestPki {
        let root = TestCert::self_signed(ca_params("Sentinel Test Root CA"));
        let intermediate =
            TestCert::issued(ca_params("Sentinel Test Intermediate CA"), &root);
        let second_root = TestCert::self_signed(ca_params("Sentinel Second Root CA"));
        let second_intermediate =
            TestCert::issued(ca_params("Sentinel Second Intermediate CA"), &second_root);

        let leaf_dns = TestCert::issued(
            leaf_params("leaf-dns", vec![SanType::DnsName(HOST.to_string())]),
            &intermediate,
        );
        let leaf_wildcard = TestCert::issued(
            leaf_params(
                "leaf-wildcard",
                vec![SanType::DnsName("*.sentinel.dev".to_string())],
            ),
            &intermediate,
        );
        let leaf_multiple_dns = TestCert::issued(
            leaf_params(
                "leaf-multiple-dns",
                vec![
                    SanType::DnsName(HOST.to_string()),
                    SanType::DnsName("blog.sentinel.dev".to_string()),
                ],
            ),
            &intermediate,
        );
        let leaf_dns_and_uri = TestCert::issued(
            leaf_params(
                "leaf-dns-and-uri",
                vec![
                    SanType::DnsName(HOST.to_string()),
                    SanType::URI(format!("https://{HOST}")),
                ],
            ),
            &intermediate,
        );
        let leaf_uri_only = TestCert::issued(
            leaf_params(
                "leaf-uri-only",
                vec![SanType::URI(format!("https://{HOST}"))],
            ),
            &intermediate,
        );
        let leaf_no_san = TestCert::issued(leaf_params("leaf-no-san", vec![]), &intermediate);

        let mut expired = leaf_params("leaf-expired", vec![SanType::DnsName(HOST.to_string())]);
        expired.not_before = date_time_ymd(2015, 1, 1);
        expired.not_after = date_time_ymd(2016, 1, 1);
        let leaf_expired = TestCert::issued(expired, &intermediate);

        TestPki {
            root,
            intermediate,
            second_root,
            second_intermediate,
            leaf_dns,
            leaf_wildcard,
            leaf_multiple_dns,
            leaf_dns_and_uri,
            leaf_uri_only,
            leaf_no_san,
            leaf_expired,
        }
    }
}

/// Assemble a leaf-first chain from test certificates.
pub fn chain(certs: &[&TestCert]) -> se::CertificateChain {
    se::CertificateChain::new(certs.iter().map(|c| c.cert.clone()).collect())
}

/// A self-contained chain of `len` CA certificates, leaf first, ending in a
/// self-signed root. Used to exercise depth handling.
pub fn ca_chain(len: usize) -> se::CertificateChain {
    let mut certs: Vec<TestCert> = Vec::with_capacity(len);
    certs.push(TestCert::self_signed(ca_params("Depth Root CA")));
    for i in 1..len {
        let child = TestCert::issued(ca_params(&format!("Depth CA {i}")), &certs[i - 1]);
        certs.push(child);
    }
    certs.reverse();
    se::CertificateChain::new(certs.into_iter().map(|c| c.cert).collect())
}

/// Evaluator with no configured roots.
pub fn evaluator() -> se::TrustEvaluator<se::X509ChainVerifier> {
    se::TrustEvaluator::new(se::X509ChainVerifier::new())
}

/// Evaluator whose verifier trusts `root` as its lone configured anchor,
/// the posture of a client shipping one known CA.
pub fn evaluator_with_root(root: &TestCert) -> se::TrustEvaluator<se::X509ChainVerifier> {
    se::TrustEvaluator::new(se::X509ChainVerifier::with_roots(vec![root.cert.clone()]))
}

/// A key pair unrelated to any test chain, as pinned "backup key" material.
pub fn unrelated_key() -> se::PublicKey {
    TestCert::self_signed(leaf_params("unrelated", vec![]))
        .cert
        .public_key()
}

/// A DER-encoded private key (not a certificate), for bundle fixtures.
pub fn private_key_der() -> Vec<u8> {
    KeyPair::generate(&PKCS_ECDSA_P256_SHA256)
        .expect("keypair")
        .serialize_der()
}
