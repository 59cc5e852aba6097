use std::fmt;
use std::sync::Arc;

use super::types::{Certificate, CertificateChain, PublicKey};

/// Caller-supplied predicate for [`TrustPolicy::CustomEvaluation`].
pub type CustomEvaluator = Arc<dyn Fn(&CertificateChain, &str) -> bool + Send + Sync>;

/// How server trust is evaluated for a host.
///
/// A policy is immutable once constructed; evaluation is a pure function of
/// (policy, chain, hostname). On updates, replace the policy rather than
/// mutating pinned material under concurrent evaluations.
#[derive(Clone)]
pub enum TrustPolicy {
    /// Chain validation against the verifier's anchors, optionally plus host
    /// validation. The baseline policy for ordinary connections.
    PerformDefaultEvaluation { validate_host: bool },

    /// Accept only chains containing one of the pinned certificates,
    /// byte-for-byte. Pinning the leaf is the most restrictive choice;
    /// pinning an intermediate or root allows leaf rotation underneath it.
    PinCertificates {
        certificates: Vec<Certificate>,
        validate_certificate_chain: bool,
        validate_host: bool,
    },

    /// Accept only chains containing a certificate carrying one of the pinned
    /// public keys. Survives certificate reissue that keeps the key pair, and
    /// supports pinning a backup key alongside the deployed one.
    PinPublicKeys {
        keys: Vec<PublicKey>,
        validate_certificate_chain: bool,
        validate_host: bool,
    },

    /// Accept everything. This removes man-in-the-middle protection; only for
    /// local development against throwaway endpoints.
    DisableEvaluation,

    /// Escape hatch: the predicate's result is returned verbatim.
    CustomEvaluation { evaluator: CustomEvaluator },
}

impl TrustPolicy {
    /// Convenience constructor for [`TrustPolicy::CustomEvaluation`].
    pub fn custom<F>(evaluator: F) -> Self
    where
        F: Fn(&CertificateChain, &str) -> bool + Send + Sync + 'static,
    {
        TrustPolicy::CustomEvaluation { evaluator: Arc::new(evaluator) }
    }

    /// Stable variant name, used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            TrustPolicy::PerformDefaultEvaluation { .. } => "perform_default_evaluation",
            TrustPolicy::PinCertificates { .. } => "pin_certificates",
            TrustPolicy::PinPublicKeys { .. } => "pin_public_keys",
            TrustPolicy::DisableEvaluation => "disable_evaluation",
            TrustPolicy::CustomEvaluation { .. } => "custom_evaluation",
        }
    }
}

impl fmt::Debug for TrustPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrustPolicy::PerformDefaultEvaluation { validate_host } => f
                .debug_struct("PerformDefaultEvaluation")
                .field("validate_host", validate_host)
                .finish(),
            TrustPolicy::PinCertificates {
                certificates,
                validate_certificate_chain,
                validate_host,
            } => f
                .debug_struct("PinCertificates")
                .field("certificates", &certificates.len())
                .field("validate_certificate_chain", validate_certificate_chain)
                .field("validate_host", validate_host)
                .finish(),
            TrustPolicy::PinPublicKeys {
                keys,
                validate_certificate_chain,
                validate_host,
            } => f
                .debug_struct("PinPublicKeys")
                .field("keys", &keys.len())
                .field("validate_certificate_chain", validate_certificate_chain)
                .field("validate_host", validate_host)
                .finish(),
            TrustPolicy::DisableEvaluation => f.write_str("DisableEvaluation"),
            TrustPolicy::CustomEvaluation { .. } => f.write_str("CustomEvaluation"),
        }
    }
}
