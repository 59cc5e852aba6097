use std::time::{SystemTime, UNIX_EPOCH};

use x509_parser::prelude::*;

use crate::domain::hostname;
use crate::domain::types::{Certificate, CertificateChain, TrustAnchorSet};
use crate::domain::verify::ChainVerifier;

/// Maximum chain depth accepted. Chain building is adversarially cheap to
/// inflate; anything deeper than this is rejected outright.
const MAX_CHAIN_DEPTH: usize = 32;

/// Portable chain verifier built on `x509-parser`'s ring-backed signature
/// checks.
///
/// The verifier walks the presented chain leaf-first. A path terminates
/// successfully at a certificate byte-identical to one of the effective
/// anchors, or, for non-exclusive anchor sets, at a final self-signed root
/// that verifies its own signature (a self-contained chain needs no
/// configured root store). Every certificate visited must be inside its
/// validity window. Without configured roots, default evaluation therefore
/// accepts self-anchored chains; callers wanting store-backed trust must seed
/// the verifier via [`X509ChainVerifier::with_roots`].
#[derive(Debug, Clone)]
pub struct X509ChainVerifier {
    roots: Vec<Certificate>,
    max_depth: usize,
}

impl Default for X509ChainVerifier {
    fn default() -> Self {
        Self { roots: Vec::new(), max_depth: MAX_CHAIN_DEPTH }
    }
}

impl X509ChainVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A verifier trusting `roots` for non-exclusive verifications.
    pub fn with_roots(roots: Vec<Certificate>) -> Self {
        Self { roots, ..Self::default() }
    }

    pub fn add_root(&mut self, root: Certificate) {
        self.roots.push(root);
    }

    pub fn roots(&self) -> &[Certificate] {
        &self.roots
    }

    /// Verify at an explicit Unix timestamp instead of the current time.
    pub fn verify_at(
        &self,
        chain: &CertificateChain,
        anchors: &TrustAnchorSet,
        host: Option<&str>,
        at_time: i64,
    ) -> bool {
        let certs = chain.certificates();
        if certs.is_empty() || certs.len() > self.max_depth {
            return false;
        }
        if let Some(host) = host {
            if !hostname::matches(chain, host) {
                return false;
            }
        }

        let extra_roots: &[Certificate] =
            if anchors.is_exclusive() { &[] } else { &self.roots };

        // Re-parse for signature checks; malformed members fail the chain.
        let parsed: Vec<X509Certificate<'_>> = match certs
            .iter()
            .map(|c| parse_x509_certificate(c.as_der()).map(|(_, x)| x))
            .collect()
        {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };

        for (i, cert) in certs.iter().enumerate() {
            if !cert.valid_at(at_time) {
                return false;
            }
            if anchors.contains(cert) || extra_roots.iter().any(|a| a.as_der() == cert.as_der()) {
                return true;
            }
            let x = &parsed[i];
            if i + 1 == certs.len() {
                if !anchors.is_exclusive() && is_self_signed_root(x) {
                    return true;
                }
                // Top of the presented chain: a time-valid anchor may still
                // complete the path by having signed it.
                return anchors.anchors().iter().chain(extra_roots).any(|anchor| {
                    anchor.valid_at(at_time)
                        && parse_x509_certificate(anchor.as_der())
                            .map(|(_, ax)| x.verify_signature(Some(ax.public_key())).is_ok())
                            .unwrap_or(false)
                });
            }
            if x.verify_signature(Some(parsed[i + 1].public_key())).is_err() {
                return false;
            }
        }
        false
    }

    fn current_time() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

impl ChainVerifier for X509ChainVerifier {
    fn verify(
        &self,
        chain: &CertificateChain,
        anchors: &TrustAnchorSet,
        host: Option<&str>,
    ) -> bool {
        self.verify_at(chain, anchors, host, Self::current_time())
    }
}

fn is_self_signed_root(x: &X509Certificate<'_>) -> bool {
    x.subject().as_raw() == x.issuer().as_raw() && x.verify_signature(None).is_ok()
}
