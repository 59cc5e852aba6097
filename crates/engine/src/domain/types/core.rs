use std::fmt;

use x509_parser::prelude::*;

use crate::domain::error::{EngineError, EngineResult};

/// A subject alternative name entry relevant to host matching.
/// Other SAN types (email, IP, directory names) are ignored by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectName {
    Dns(String),
    Uri(String),
}

/// A parsed X.509 certificate, owning its DER encoding.
///
/// Parsing happens once in [`Certificate::from_der`]; the fields needed by the
/// policy layer (SPKI bytes, subject alternative names, validity interval) are
/// cached so evaluation never re-parses. Equality is DER byte equality, which
/// is what certificate pinning compares.
#[derive(Clone, PartialEq, Eq)]
pub struct Certificate {
    der: Vec<u8>,
    spki: Vec<u8>,
    names: Vec<SubjectName>,
    not_before: i64,
    not_after: i64,
}

impl Certificate {
    /// Parse a single DER-encoded certificate. Trailing bytes are rejected.
    pub fn from_der(der: impl Into<Vec<u8>>) -> EngineResult<Self> {
        let der = der.into();
        let (rest, parsed) = parse_x509_certificate(&der)
            .map_err(|e| EngineError::CertificateParse(e.to_string()))?;
        if !rest.is_empty() {
            return Err(EngineError::CertificateParse(
                "trailing data after certificate".into(),
            ));
        }

        let spki = parsed.public_key().raw.to_vec();
        let mut names = Vec::new();
        if let Ok(Some(san)) = parsed.subject_alternative_name() {
            for gn in &san.value.general_names {
                match gn {
                    GeneralName::DNSName(name) => names.push(SubjectName::Dns((*name).to_string())),
                    GeneralName::URI(uri) => names.push(SubjectName::Uri((*uri).to_string())),
                    _ => {}
                }
            }
        }
        let not_before = parsed.validity().not_before.timestamp();
        let not_after = parsed.validity().not_after.timestamp();

        Ok(Self { der, spki, names, not_before, not_after })
    }

    /// The raw DER encoding, used for byte-exact pinning comparisons.
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    /// The certificate's public key (SubjectPublicKeyInfo).
    pub fn public_key(&self) -> PublicKey {
        PublicKey { spki: self.spki.clone() }
    }

    /// DNS and URI subject alternative names, for host matching.
    pub fn subject_names(&self) -> &[SubjectName] {
        &self.names
    }

    pub fn not_before(&self) -> i64 {
        self.not_before
    }

    pub fn not_after(&self) -> i64 {
        self.not_after
    }

    /// Whether `at_time` (Unix seconds) falls within the validity interval.
    pub fn valid_at(&self, at_time: i64) -> bool {
        self.not_before <= at_time && at_time <= self.not_after
    }
}

impl fmt::Debug for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Certificate")
            .field("names", &self.names)
            .field("not_before", &self.not_before)
            .field("not_after", &self.not_after)
            .field("der_len", &self.der.len())
            .finish()
    }
}

/// An extracted public key, comparable for equality by its SPKI DER bytes.
/// Two certificates carrying the same key pair compare equal here even when
/// the certificates themselves differ (reissue, rotation).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    spki: Vec<u8>,
}

impl PublicKey {
    /// Wrap raw SubjectPublicKeyInfo DER bytes (e.g. a distributed pin).
    pub fn from_spki_der(spki: impl Into<Vec<u8>>) -> Self {
        PublicKey { spki: spki.into() }
    }

    pub fn as_der(&self) -> &[u8] {
        &self.spki
    }
}

/// An ordered certificate chain as presented by a peer, leaf first, root last
/// (the root may be absent). Constructed fresh per handshake.
#[derive(Debug, Clone, Default)]
pub struct CertificateChain {
    certificates: Vec<Certificate>,
}

impl CertificateChain {
    pub fn new(certificates: Vec<Certificate>) -> Self {
        Self { certificates }
    }

    /// Parse a leaf-first sequence of DER certificates into a chain.
    pub fn from_der_chain<B: AsRef<[u8]>>(ders: &[B]) -> EngineResult<Self> {
        let certificates = ders
            .iter()
            .map(|d| Certificate::from_der(d.as_ref().to_vec()))
            .collect::<EngineResult<Vec<_>>>()?;
        Ok(Self { certificates })
    }

    /// The end-entity certificate, if the chain is non-empty.
    pub fn leaf(&self) -> Option<&Certificate> {
        self.certificates.first()
    }

    pub fn certificates(&self) -> &[Certificate] {
        &self.certificates
    }

    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    /// True if any chain member is byte-identical to `certificate`.
    pub fn contains(&self, certificate: &Certificate) -> bool {
        self.certificates
            .iter()
            .any(|c| c.as_der() == certificate.as_der())
    }

    /// Public keys of every certificate in the chain, leaf first.
    pub fn public_keys(&self) -> Vec<PublicKey> {
        self.certificates.iter().map(Certificate::public_key).collect()
    }
}
