//! x509-parser backed implementations of the engine's external seams:
//! the chain verifier and the certificate bundle loader.

mod bundle;
mod verifier;

pub use bundle::{certificates_in_directory, public_keys_in_directory};
pub use verifier::X509ChainVerifier;
