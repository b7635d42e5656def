//! RSA public key export as a PEM-wrapped `SubjectPublicKeyInfo`.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::der::{DerNode, RSA_ENCRYPTION_OID};
use crate::{KeyMaterialSource, KeySourceError};

/// Encode raw RSA public key components as a PEM string.
///
/// `modulus` and `exponent` are big-endian unsigned magnitudes. The output
/// is the DER `SubjectPublicKeyInfo` for `rsaEncryption` wrapped in
/// `BEGIN PUBLIC KEY` armor: standard base64, 64-character lines, `\n`
/// line endings, trailing newline after the footer.
///
/// This is a pure byte transformation. No key validation is performed, so
/// degenerate inputs (an empty modulus, say) still yield structurally
/// valid DER.
#[must_use]
pub fn rsa_public_key_to_pem(modulus: &[u8], exponent: &[u8]) -> String {
    let spki = DerNode::Sequence(vec![
        DerNode::Sequence(vec![
            DerNode::ObjectIdentifier(RSA_ENCRYPTION_OID),
            DerNode::Null,
        ]),
        DerNode::BitString(Box::new(DerNode::Sequence(vec![
            DerNode::Integer(modulus.to_vec()),
            DerNode::Integer(exponent.to_vec()),
        ]))),
    ]);
    wrap_pem(&spki.encode())
}

fn wrap_pem(der: &[u8]) -> String {
    let encoded = STANDARD.encode(der);
    let mut pem = String::with_capacity(encoded.len() + encoded.len() / 64 + 64);
    pem.push_str("-----BEGIN PUBLIC KEY-----\n");
    let mut rest = encoded.as_str();
    while rest.len() > 64 {
        let (line, tail) = rest.split_at(64);
        pem.push_str(line);
        pem.push('\n');
        rest = tail;
    }
    if !rest.is_empty() {
        pem.push_str(rest);
        pem.push('\n');
    }
    pem.push_str("-----END PUBLIC KEY-----\n");
    pem
}

/// Exports public keys resolved through a [`KeyMaterialSource`].
pub struct PublicKeyExporter {
    source: Arc<dyn KeyMaterialSource>,
}

impl PublicKeyExporter {
    #[must_use]
    pub fn new(source: Arc<dyn KeyMaterialSource>) -> Self {
        Self { source }
    }

    /// Resolve `identifier` through the key source and export the key as
    /// PEM.
    ///
    /// # Errors
    ///
    /// Propagates the source error untransformed when the key cannot be
    /// fetched.
    #[tracing::instrument(skip(self))]
    pub async fn export(&self, identifier: &str) -> Result<String, KeySourceError> {
        let material = self.source.fetch_key(identifier).await?;
        Ok(rsa_public_key_to_pem(&material.modulus, &material.exponent))
    }
}

impl std::fmt::Debug for PublicKeyExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicKeyExporter")
            .field("source", &self.source.source_type())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Decode the base64 body between the PEM markers.
    fn pem_body(pem: &str) -> Vec<u8> {
        let body: String = pem
            .lines()
            .filter(|line| !line.starts_with("-----"))
            .collect();
        STANDARD.decode(body).expect("valid base64 body")
    }

    #[test]
    fn test_minimal_key_der_structure() {
        let pem = rsa_public_key_to_pem(&[0x01], &[0x01, 0x00, 0x01]);
        let der = pem_body(&pem);
        assert_eq!(
            der,
            vec![
                0x30, 0x1c, // SubjectPublicKeyInfo SEQUENCE, 28 bytes
                0x30, 0x0d, // AlgorithmIdentifier SEQUENCE, 13 bytes
                0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01, // rsaEncryption
                0x05, 0x00, // NULL parameters
                0x03, 0x0b, 0x00, // BIT STRING, 11 bytes, no unused bits
                0x30, 0x08, // RSAPublicKey SEQUENCE, 8 bytes
                0x02, 0x01, 0x01, // INTEGER 1 (modulus)
                0x02, 0x03, 0x01, 0x00, 0x01, // INTEGER 65537 (exponent)
            ]
        );
    }

    #[test]
    fn test_pem_armor_and_line_discipline() {
        // 300-byte modulus forces several base64 lines
        let pem = rsa_public_key_to_pem(&[0xab; 300], &[0x01, 0x00, 0x01]);
        assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----\n"));
        assert!(pem.ends_with("-----END PUBLIC KEY-----\n"));
        assert!(!pem.contains("\r"));

        let lines: Vec<&str> = pem.lines().collect();
        let body = &lines[1..lines.len() - 1];
        assert!(body.len() > 1);
        for line in &body[..body.len() - 1] {
            assert_eq!(line.len(), 64);
        }
        assert!(body[body.len() - 1].len() <= 64);
        assert!(!body[body.len() - 1].is_empty());
    }

    #[test]
    fn test_export_is_deterministic() {
        let modulus = [0x00, 0xc3, 0x7f, 0x90, 0x11];
        let exponent = [0x01, 0x00, 0x01];
        assert_eq!(
            rsa_public_key_to_pem(&modulus, &exponent),
            rsa_public_key_to_pem(&modulus, &exponent)
        );
    }

    #[test]
    fn test_empty_components_encode_as_integer_zero() {
        let pem = rsa_public_key_to_pem(&[], &[]);
        let der = pem_body(&pem);
        // RSAPublicKey SEQUENCE of two INTEGER 0 values at the tail
        assert_eq!(
            &der[der.len() - 8..],
            &[0x30, 0x06, 0x02, 0x01, 0x00, 0x02, 0x01, 0x00]
        );
    }

    #[test]
    fn test_high_bit_modulus_padded_in_der() {
        let pem = rsa_public_key_to_pem(&[0xff, 0x02], &[0x03]);
        let der = pem_body(&pem);
        // INTEGER content must open with the 0x00 pad before 0xff
        assert_eq!(
            &der[der.len() - 10..],
            &[0x30, 0x08, 0x02, 0x03, 0x00, 0xff, 0x02, 0x02, 0x01, 0x03]
        );
    }
}
