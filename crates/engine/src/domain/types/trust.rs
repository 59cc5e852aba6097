use super::core::Certificate;

/// Trust anchors for a single verification.
///
/// When `exclusive` is set, only these anchors may terminate a chain; the
/// verifier must not fall back to its configured root store. Pinning-based
/// policies always pass exclusive sets.
#[derive(Debug, Clone, Default)]
pub struct TrustAnchorSet {
    anchors: Vec<Certificate>,
    exclusive: bool,
}

impl TrustAnchorSet {
    /// Anchors that replace the verifier's root store entirely.
    pub fn exclusive(anchors: Vec<Certificate>) -> Self {
        Self { anchors, exclusive: true }
    }

    /// Anchors merged with whatever roots the verifier is configured with.
    pub fn non_exclusive(anchors: Vec<Certificate>) -> Self {
        Self { anchors, exclusive: false }
    }

    pub fn anchors(&self) -> &[Certificate] {
        &self.anchors
    }

    pub fn is_exclusive(&self) -> bool {
        self.exclusive
    }

    /// Byte-exact membership test.
    pub fn contains(&self, certificate: &Certificate) -> bool {
        self.anchors
            .iter()
            .any(|a| a.as_der() == certificate.as_der())
    }
}
