use sentinel_engine::domain::error::EngineError;
use sentinel_engine::{
    evaluate_server_trust, evaluate_server_trust_detailed, Certificate, CertificateChain,
    PublicKey, TrustEvaluator, TrustPolicy, TrustReport, Verdict, X509ChainVerifier,
};

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("{message}")]
    Generic { message: String },
}

impl From<EngineError> for FfiError {
    fn from(e: EngineError) -> Self {
        FfiError::Generic {
            message: e.to_string(),
        }
    }
}

// ===== FFI types mirroring the public Rust API (FFI-friendly) =====

/// Trust policy as configured by a host application. `CustomEvaluation` is
/// deliberately absent: predicates do not cross the FFI boundary.
#[derive(uniffi::Enum, Debug, Clone)]
pub enum FfiTrustPolicy {
    PerformDefaultEvaluation {
        validate_host: bool,
    },
    PinCertificates {
        certificates: Vec<Vec<u8>>,
        validate_certificate_chain: bool,
        validate_host: bool,
    },
    PinPublicKeys {
        keys: Vec<Vec<u8>>,
        validate_certificate_chain: bool,
        validate_host: bool,
    },
    DisableEvaluation,
}

impl TryFrom<FfiTrustPolicy> for TrustPolicy {
    type Error = FfiError;

    fn try_from(v: FfiTrustPolicy) -> Result<Self, Self::Error> {
        match v {
            FfiTrustPolicy::PerformDefaultEvaluation { validate_host } => {
                Ok(TrustPolicy::PerformDefaultEvaluation { validate_host })
            }
            FfiTrustPolicy::PinCertificates {
                certificates,
                validate_certificate_chain,
                validate_host,
            } => {
                let certificates = certificates
                    .into_iter()
                    .map(Certificate::from_der)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(FfiError::from)?;
                Ok(TrustPolicy::PinCertificates {
                    certificates,
                    validate_certificate_chain,
                    validate_host,
                })
            }
            FfiTrustPolicy::PinPublicKeys {
                keys,
                validate_certificate_chain,
                validate_host,
            } => Ok(TrustPolicy::PinPublicKeys {
                keys: keys.into_iter().map(PublicKey::from_spki_der).collect(),
                validate_certificate_chain,
                validate_host,
            }),
            FfiTrustPolicy::DisableEvaluation => Ok(TrustPolicy::DisableEvaluation),
        }
    }
}

#[derive(uniffi::Enum, Debug, Clone, Copy)]
pub enum FfiVerdict {
    Allowed,
    Rejected,
}

#[derive(uniffi::Record, Debug, Clone)]
pub struct FfiTrustReport {
    pub verdict: FfiVerdict,
    pub policy: String,
    pub chain_validated: Option<bool>,
    pub host_matched: Option<bool>,
    pub pin_matched: Option<bool>,
}

impl From<TrustReport> for FfiTrustReport {
    fn from(r: TrustReport) -> Self {
        FfiTrustReport {
            verdict: match r.verdict {
                Verdict::Allowed => FfiVerdict::Allowed,
                Verdict::Rejected => FfiVerdict::Rejected,
            },
            policy: r.policy,
            chain_validated: r.chain_validated,
            host_matched: r.host_matched,
            pin_matched: r.pin_matched,
        }
    }
}

// ===== High-level API, mirroring the Rust surface =====

/// Evaluate server trust for a presented chain (leaf-first DER certificates).
///
/// A chain that fails to parse is rejected, never an error: peer-supplied
/// bytes must fail closed. Malformed *policy* material is a caller bug and
/// surfaces as `FfiError`.
#[uniffi::export]
pub fn evaluate_server_trust_ffi(
    policy: FfiTrustPolicy,
    chain: Vec<Vec<u8>>,
    host: String,
    roots: Vec<Vec<u8>>,
) -> Result<bool, FfiError> {
    let policy: TrustPolicy = policy.try_into()?;
    let Ok(chain) = CertificateChain::from_der_chain(&chain) else {
        return Ok(false);
    };
    if roots.is_empty() {
        return Ok(evaluate_server_trust(&policy, &chain, &host));
    }
    let roots = parse_roots(roots)?;
    let evaluator = TrustEvaluator::new(X509ChainVerifier::with_roots(roots));
    Ok(evaluator.evaluate(&policy, &chain, &host))
}

/// As [`evaluate_server_trust_ffi`], returning the structured report.
#[uniffi::export]
pub fn evaluate_server_trust_detailed_ffi(
    policy: FfiTrustPolicy,
    chain: Vec<Vec<u8>>,
    host: String,
    roots: Vec<Vec<u8>>,
) -> Result<FfiTrustReport, FfiError> {
    let policy: TrustPolicy = policy.try_into()?;
    let Ok(chain) = CertificateChain::from_der_chain(&chain) else {
        return Ok(FfiTrustReport {
            verdict: FfiVerdict::Rejected,
            policy: policy.name().to_string(),
            chain_validated: None,
            host_matched: None,
            pin_matched: None,
        });
    };
    let report = if roots.is_empty() {
        evaluate_server_trust_detailed(&policy, &chain, &host)
    } else {
        let roots = parse_roots(roots)?;
        TrustEvaluator::new(X509ChainVerifier::with_roots(roots))
            .evaluate_detailed(&policy, &chain, &host)
    };
    Ok(report.into())
}

/// Load the well-formed DER certificates in a directory; malformed entries
/// are silently excluded.
#[uniffi::export]
pub fn certificates_in_directory_ffi(path: String) -> Result<Vec<Vec<u8>>, FfiError> {
    let certificates =
        sentinel_engine::certificates_in_directory(&path).map_err(FfiError::from)?;
    Ok(certificates.iter().map(|c| c.as_der().to_vec()).collect())
}

fn parse_roots(roots: Vec<Vec<u8>>) -> Result<Vec<Certificate>, FfiError> {
    roots
        .into_iter()
        .map(Certificate::from_der)
        .collect::<Result<Vec<_>, _>>()
        .map_err(FfiError::from)
}

uniffi::setup_scaffolding!();
