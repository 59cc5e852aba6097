// crates/engine/src/lib.rs

//! Public facade for the Sentinel trust engine.
//! Exposes a stable API and re-exports types for consumers (apps, FFI).

pub mod adapters;
pub mod domain;

/// Evaluate server trust with the default x509 verifier (no configured
/// roots). For store-backed default evaluation, build a
/// [`TrustEvaluator`] over [`X509ChainVerifier::with_roots`] instead.
pub fn evaluate_server_trust(policy: &TrustPolicy, chain: &CertificateChain, host: &str) -> bool {
    TrustEvaluator::new(X509ChainVerifier::new()).evaluate(policy, chain, host)
}

/// As [`evaluate_server_trust`], returning the structured report.
pub fn evaluate_server_trust_detailed(
    policy: &TrustPolicy,
    chain: &CertificateChain,
    host: &str,
) -> TrustReport {
    TrustEvaluator::new(X509ChainVerifier::new()).evaluate_detailed(policy, chain, host)
}

// Re-exports for convenience
pub use adapters::x509::{certificates_in_directory, public_keys_in_directory, X509ChainVerifier};
pub use domain::error::{EngineError, EngineResult};
pub use domain::hostname;
pub use domain::policy::{CustomEvaluator, TrustPolicy};
pub use domain::types::{
    Certificate, CertificateChain, PublicKey, SubjectName, TrustAnchorSet, TrustPolicyConfig,
    TrustPolicyMode,
};
pub use domain::verify::{ChainVerifier, TrustEvaluator, TrustReport, Verdict};
