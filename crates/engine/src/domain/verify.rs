// crates/engine/src/domain/verify.rs

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::Serialize;

use super::hostname;
use super::policy::TrustPolicy;
use super::types::{CertificateChain, TrustAnchorSet};

/// Structural and cryptographic chain validation, behind a narrow seam so the
/// policy logic stays portable and testable against a fake verifier.
///
/// `host`, when set, additionally requires the leaf to match it under
/// [`hostname::matches`]. Implementations must fail closed: any internal
/// error is a `false`, never a panic.
pub trait ChainVerifier {
    fn verify(
        &self,
        chain: &CertificateChain,
        anchors: &TrustAnchorSet,
        host: Option<&str>,
    ) -> bool;
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Rejected,
}

/// Structured evaluation outcome. `None` stages were not applicable under the
/// evaluated policy (e.g. no host check when host validation is off).
#[derive(Debug, Serialize, Clone)]
pub struct TrustReport {
    pub verdict: Verdict,
    /// Policy variant name, see [`TrustPolicy::name`].
    pub policy: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_validated: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_matched: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin_matched: Option<bool>,
}

impl TrustReport {
    pub fn is_allowed(&self) -> bool {
        self.verdict == Verdict::Allowed
    }

    fn new(policy: &TrustPolicy, verdict: Verdict) -> Self {
        TrustReport {
            verdict,
            policy: policy.name().to_string(),
            chain_validated: None,
            host_matched: None,
            pin_matched: None,
        }
    }
}

/// Evaluates a [`TrustPolicy`] against a presented chain and target host.
///
/// Stateless: every call is a pure function of its inputs, so one evaluator
/// can serve concurrent handshakes.
#[derive(Debug, Clone, Default)]
pub struct TrustEvaluator<V> {
    verifier: V,
}

impl<V: ChainVerifier> TrustEvaluator<V> {
    pub fn new(verifier: V) -> Self {
        Self { verifier }
    }

    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    /// Accept or reject the chain for `host` under `policy`.
    ///
    /// Never panics: a panicking custom predicate (or verifier) collapses to
    /// a rejection, preserving the fail-closed contract at the TLS boundary.
    pub fn evaluate(&self, policy: &TrustPolicy, chain: &CertificateChain, host: &str) -> bool {
        self.evaluate_detailed(policy, chain, host).is_allowed()
    }

    /// As [`evaluate`](Self::evaluate), with per-stage outcomes for logging
    /// and diagnostics. Carries the same never-panics contract: a panic
    /// during evaluation yields a `Rejected` report with no stage outcomes.
    pub fn evaluate_detailed(
        &self,
        policy: &TrustPolicy,
        chain: &CertificateChain,
        host: &str,
    ) -> TrustReport {
        catch_unwind(AssertUnwindSafe(|| self.dispatch(policy, chain, host)))
            .unwrap_or_else(|_| TrustReport::new(policy, Verdict::Rejected))
    }

    fn dispatch(
        &self,
        policy: &TrustPolicy,
        chain: &CertificateChain,
        host: &str,
    ) -> TrustReport {
        match policy {
            TrustPolicy::DisableEvaluation => TrustReport::new(policy, Verdict::Allowed),

            TrustPolicy::CustomEvaluation { evaluator } => {
                let verdict = if (evaluator.as_ref())(chain, host) {
                    Verdict::Allowed
                } else {
                    Verdict::Rejected
                };
                TrustReport::new(policy, verdict)
            }

            TrustPolicy::PerformDefaultEvaluation { validate_host } => {
                // Non-exclusive empty set: the verifier's configured roots
                // plus its self-contained-chain rule decide anchoring.
                let anchors = TrustAnchorSet::non_exclusive(Vec::new());
                let chain_validated = self.verifier.verify(chain, &anchors, None);
                let host_matched = validate_host.then(|| hostname::matches(chain, host));
                self.report(
                    policy,
                    Some(chain_validated),
                    host_matched,
                    None,
                )
            }

            TrustPolicy::PinCertificates {
                certificates,
                validate_certificate_chain,
                validate_host,
            } => {
                let chain_validated = validate_certificate_chain.then(|| {
                    let anchors = TrustAnchorSet::exclusive(certificates.clone());
                    self.verifier.verify(chain, &anchors, None)
                });
                // Host validation only applies alongside chain validation;
                // pinning without chain validation trusts the pinned bytes
                // alone, expiry and hostname included.
                let host_matched = (*validate_certificate_chain && *validate_host)
                    .then(|| hostname::matches(chain, host));
                let pin_matched = certificates.iter().any(|pin| chain.contains(pin));
                self.report(policy, chain_validated, host_matched, Some(pin_matched))
            }

            TrustPolicy::PinPublicKeys {
                keys,
                validate_certificate_chain,
                validate_host,
            } => {
                let chain_validated = validate_certificate_chain.then(|| {
                    // No pinned certificates to anchor on; key pinning keeps
                    // the default-evaluation anchor posture.
                    let anchors = TrustAnchorSet::non_exclusive(Vec::new());
                    self.verifier.verify(chain, &anchors, None)
                });
                let host_matched = (*validate_certificate_chain && *validate_host)
                    .then(|| hostname::matches(chain, host));
                let presented = chain.public_keys();
                let pin_matched = keys.iter().any(|key| presented.contains(key));
                self.report(policy, chain_validated, host_matched, Some(pin_matched))
            }
        }
    }

    fn report(
        &self,
        policy: &TrustPolicy,
        chain_validated: Option<bool>,
        host_matched: Option<bool>,
        pin_matched: Option<bool>,
    ) -> TrustReport {
        let passed = chain_validated.unwrap_or(true)
            && host_matched.unwrap_or(true)
            && pin_matched.unwrap_or(true);
        let verdict = if passed { Verdict::Allowed } else { Verdict::Rejected };
        TrustReport {
            verdict,
            policy: policy.name().to_string(),
            chain_validated,
            host_matched,
            pin_matched,
        }
    }
}
