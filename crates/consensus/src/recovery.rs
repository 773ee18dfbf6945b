//! Recovers signer public keys and addresses from signatures.

use crate::{TxError, TxResult, TxSignature};
use alloy_primitives::{keccak256, Address, B256, B512};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};

/// Recovers the uncompressed public key, without its `0x04` tag, that produced `signature`
/// over `hash`.
///
/// ## Errors
/// Fails with [TxError::SignatureRecoveryFailure] if `r` or `s` is zero or not below the curve
/// order, if `s` is in the upper half of the order, or if no point can be recovered.
pub fn recover_public_key(hash: B256, signature: &TxSignature) -> TxResult<B512> {
    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(&signature.r.to_be_bytes::<32>());
    compact[32..].copy_from_slice(&signature.s.to_be_bytes::<32>());

    let sig = Signature::from_slice(&compact).map_err(|_| TxError::SignatureRecoveryFailure)?;
    if sig.normalize_s().is_some() {
        return Err(TxError::SignatureRecoveryFailure);
    }

    let recovery_id = RecoveryId::new(signature.odd_y_parity, false);
    let key = VerifyingKey::recover_from_prehash(hash.as_slice(), &sig, recovery_id)
        .map_err(|_| TxError::SignatureRecoveryFailure)?;
    Ok(verifying_key_to_public_key(&key))
}

/// Derives an account address: the low 20 bytes of `keccak256(publicKey)`.
pub fn public_key_to_address(public_key: &B512) -> Address {
    Address::from_slice(&keccak256(public_key)[12..])
}

/// Recovers the address of the account that produced `signature` over `hash`.
pub fn recover_signer(hash: B256, signature: &TxSignature) -> TxResult<Address> {
    recover_public_key(hash, signature).map(|public_key| public_key_to_address(&public_key))
}

pub(crate) fn verifying_key_to_public_key(key: &VerifyingKey) -> B512 {
    let point = key.to_encoded_point(false);
    B512::from_slice(&point.as_bytes()[1..])
}

pub(crate) fn verifying_key_to_address(key: &VerifyingKey) -> Address {
    public_key_to_address(&verifying_key_to_public_key(key))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{sign_hash, test_utils::DEV_KEY};
    use alloy_primitives::{address, b256, uint, U256};

    const EIP155_HASH: B256 =
        b256!("daf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53");

    fn eip155_signature() -> TxSignature {
        TxSignature::new(
            uint!(0x28ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276_U256),
            uint!(0x67cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83_U256),
            false,
        )
    }

    #[test]
    fn test_recover_eip155_signer() {
        assert_eq!(
            recover_signer(EIP155_HASH, &eip155_signature()).unwrap(),
            address!("9d8A62f656a8d1615C1294fd71e9CFb3E4855A4F")
        );
    }

    #[test]
    fn test_recover_matches_signing_key() {
        let hash = keccak256(b"rawtx-recovery");
        let signature = sign_hash(hash, DEV_KEY).unwrap();
        assert_eq!(
            recover_signer(hash, &signature).unwrap(),
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
    }

    #[test]
    fn test_flipped_parity_recovers_other_key() {
        let hash = keccak256(b"forged-recovery-id");
        let valid = sign_hash(hash, DEV_KEY).unwrap();
        let forged = TxSignature { odd_y_parity: !valid.odd_y_parity, ..valid };
        match recover_signer(hash, &forged) {
            Ok(address) => assert_ne!(address, recover_signer(hash, &valid).unwrap()),
            Err(err) => assert_eq!(err, TxError::SignatureRecoveryFailure),
        }
    }

    #[test]
    fn test_rejects_out_of_range_components() {
        let order = uint!(0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141_U256);
        let valid = eip155_signature();
        for signature in [
            TxSignature { r: U256::ZERO, ..valid },
            TxSignature { s: U256::ZERO, ..valid },
            TxSignature { r: order, ..valid },
            TxSignature { r: U256::MAX, s: U256::MAX, ..valid },
        ] {
            assert_eq!(
                recover_public_key(EIP155_HASH, &signature),
                Err(TxError::SignatureRecoveryFailure)
            );
        }
    }

    #[test]
    fn test_rejects_high_s() {
        let order = uint!(0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141_U256);
        let valid = eip155_signature();
        let high = TxSignature { s: order - valid.s, odd_y_parity: !valid.odd_y_parity, ..valid };
        assert_eq!(recover_signer(EIP155_HASH, &high), Err(TxError::SignatureRecoveryFailure));
    }
}
