//! Password-based symmetric encryption for the wallet's private key.
//!
//! The scheme is deliberately plain to stay byte-compatible with the wallet
//! record format: AES-256-CBC with PKCS7 padding, the key being a single
//! SHA-256 of the password. No KDF stretching, no authentication tag.
//!
//! Because CBC does not authenticate, a wrong password usually fails the
//! padding check but can occasionally unpad cleanly and yield garbage.
//! Callers must treat a successful [`open`] as unverified plaintext, not as
//! proof the password was correct.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::error::VaultError;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Envelope format version tag.
const VERSION: &str = "v1";
/// AES block and IV length in bytes.
const IV_LEN: usize = 16;

/// Derive the AES-256 key as a single SHA-256 of the password.
fn derive_key(password: &str) -> [u8; 32] {
    use sha2::{Digest, Sha256};
    let mut key = [0u8; 32];
    key.copy_from_slice(&Sha256::digest(password.as_bytes()));
    key
}

/// Encrypt `plaintext` under `password`, returning the envelope string
/// `v1$<iv-hex>$<ciphertext-hex>` with a fresh random IV.
pub fn seal(plaintext: &str, password: &str) -> Result<String, VaultError> {
    let mut key = derive_key(password);

    let mut iv = [0u8; IV_LEN];
    rand::thread_rng().fill_bytes(&mut iv);

    let encryptor = Aes256CbcEnc::new_from_slices(&key, &iv)
        .map_err(|e| VaultError::Cipher(format!("AES init failed: {e}")))?;
    let ciphertext = encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
    key.zeroize();

    Ok(format!(
        "{VERSION}${}${}",
        hex::encode(iv),
        hex::encode(ciphertext)
    ))
}

/// Decrypt an envelope produced by [`seal`].
///
/// The returned plaintext is zeroized on drop. A cipher-level failure
/// (padding, structure) is an error; a structurally clean decrypt under the
/// wrong password is NOT detectable here.
pub fn open(envelope: &str, password: &str) -> Result<Zeroizing<String>, VaultError> {
    let parts: Vec<&str> = envelope.split('$').collect();
    if parts.len() != 3 {
        return Err(VaultError::MalformedEnvelope);
    }
    let (version, iv_hex, ciphertext_hex) = (parts[0], parts[1], parts[2]);
    if version != VERSION {
        return Err(VaultError::UnsupportedVersion(version.to_string()));
    }

    let iv = hex::decode(iv_hex).map_err(|_| VaultError::MalformedEnvelope)?;
    let ciphertext = hex::decode(ciphertext_hex).map_err(|_| VaultError::MalformedEnvelope)?;
    if iv.len() != IV_LEN {
        return Err(VaultError::MalformedEnvelope);
    }

    let mut key = derive_key(password);
    let decryptor = Aes256CbcDec::new_from_slices(&key, &iv)
        .map_err(|e| VaultError::Cipher(format!("AES init failed: {e}")))?;
    let decrypted = decryptor.decrypt_padded_vec_mut::<Pkcs7>(&ciphertext);
    key.zeroize();

    let decrypted = decrypted
        .map_err(|_| VaultError::Cipher("wrong password or corrupted data".to_string()))?;

    match String::from_utf8(decrypted) {
        Ok(text) => Ok(Zeroizing::new(text)),
        Err(e) => {
            let mut bytes = e.into_bytes();
            bytes.zeroize();
            Err(VaultError::Cipher(
                "decrypted bytes are not valid UTF-8".to_string(),
            ))
        }
    }
}
