use serde::{Deserialize, Serialize};

use super::core::{Certificate, PublicKey};
use crate::domain::error::{EngineError, EngineResult};
use crate::domain::policy::TrustPolicy;

/// Which evaluation strategy a configured policy uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustPolicyMode {
    #[default]
    Default,
    PinCertificates,
    PinPublicKeys,
    Disabled,
}

/// Trust policy configuration using raw bytes to avoid I/O in the engine.
/// Host and chain validation default to on; opting out must be explicit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrustPolicyConfig {
    pub mode: TrustPolicyMode,

    /// DER-encoded pinned certificates (mode `pin_certificates`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_certificates: Option<Vec<Vec<u8>>>,

    /// DER-encoded pinned SubjectPublicKeyInfo blobs (mode `pin_public_keys`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_keys: Option<Vec<Vec<u8>>>,

    /// DER-encoded extra trust anchors for the chain verifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchors: Option<Vec<Vec<u8>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate_certificate_chain: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate_host: Option<bool>,
}

impl TrustPolicyConfig {
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the runtime policy this configuration describes.
    ///
    /// Fails on malformed pinned material: a policy silently constructed from
    /// unparseable pins would reject every peer, which is indistinguishable
    /// from an outage at the call site.
    pub fn into_policy(self) -> EngineResult<TrustPolicy> {
        let validate_certificate_chain = self.validate_certificate_chain.unwrap_or(true);
        let validate_host = self.validate_host.unwrap_or(true);

        match self.mode {
            TrustPolicyMode::Default => Ok(TrustPolicy::PerformDefaultEvaluation { validate_host }),
            TrustPolicyMode::Disabled => Ok(TrustPolicy::DisableEvaluation),
            TrustPolicyMode::PinCertificates => {
                let ders = self.pinned_certificates.ok_or_else(|| {
                    EngineError::Config("pin_certificates mode requires pinned_certificates".into())
                })?;
                let certificates = ders
                    .into_iter()
                    .map(Certificate::from_der)
                    .collect::<EngineResult<Vec<_>>>()?;
                Ok(TrustPolicy::PinCertificates {
                    certificates,
                    validate_certificate_chain,
                    validate_host,
                })
            }
            TrustPolicyMode::PinPublicKeys => {
                let keys = self
                    .pinned_keys
                    .ok_or_else(|| {
                        EngineError::Config("pin_public_keys mode requires pinned_keys".into())
                    })?
                    .into_iter()
                    .map(PublicKey::from_spki_der)
                    .collect();
                Ok(TrustPolicy::PinPublicKeys {
                    keys,
                    validate_certificate_chain,
                    validate_host,
                })
            }
        }
    }

    /// Parse the configured extra anchors, for seeding the chain verifier.
    pub fn anchor_certificates(&self) -> EngineResult<Vec<Certificate>> {
        self.anchors
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(|d| Certificate::from_der(d.clone()))
            .collect()
    }
}
