//! Cross-module checks for addresses, accounts, and id derivation.

use sirius_types::uint64;
use sirius_types::*;

// =============================================================================
// Helpers
// =============================================================================

const OWNER_KEY: &str = "b4f12e7c9f6946091e2cb8b6d3a12b50d17ccbbf646386ea27ce2946a7423dcf";

fn owner(network_type: NetworkType) -> PublicAccount {
    PublicAccount::from_public_key(OWNER_KEY, network_type).unwrap()
}

// =============================================================================
// Addresses
// =============================================================================

#[test]
fn address_prefix_follows_network() {
    for network in NetworkType::ALL {
        let plain = owner(network).address().plain();
        assert_eq!(plain.chars().next(), Some(network.address_prefix()));
        let parsed: Address = plain.parse().unwrap();
        assert_eq!(parsed.network_type(), network);
    }
}

#[test]
fn plain_pretty_and_encoded_forms_are_lossless() {
    let address = owner(NetworkType::MijinTest).address();
    let from_pretty = Address::from_raw(&address.pretty()).unwrap();
    let from_encoded = Address::from_encoded(&address.encoded()).unwrap();
    assert_eq!(from_pretty, address);
    assert_eq!(from_encoded, address);
    assert_eq!(from_encoded.to_string(), "SARNASAS2BIAB6LMFA3FPMGBPGIJGK6IJETM3ZSP");
}

#[test]
fn every_single_character_change_is_rejected() {
    let plain = "SDGLFWDSHILTIUHGIBH5UGX2VYF5VNJEKCCDBR26";
    for i in 1..plain.len() {
        let mut chars: Vec<char> = plain.chars().collect();
        chars[i] = if chars[i] == 'A' { 'B' } else { 'A' };
        let mutated: String = chars.into_iter().collect();
        assert!(Address::from_raw(&mutated).is_err(), "accepted mutation at {}", i);
    }
}

#[test]
fn errors_convert_into_types_error() {
    fn parse(s: &str) -> Result<Address, TypesError> {
        Ok(Address::from_raw(s)?)
    }
    assert!(matches!(parse("SHORT"), Err(TypesError::Address(AddressError::InvalidLength(5)))));
}

// =============================================================================
// Ids
// =============================================================================

#[test]
fn gateway_pairs_decode_to_known_ids() {
    let xem = NamespaceId::from_name("nem.xem").unwrap();
    assert_eq!(xem.id(), uint64::from_pair([3_646_934_825, 3_576_016_193]));
    assert_eq!(xem.to_pair(), [3_646_934_825, 3_576_016_193]);

    let key: [u8; 32] = *owner(NetworkType::Mijin).public_key();
    let mosaic = MosaicId::from_nonce(&MosaicNonce::from_u32(0), &key);
    assert_eq!(mosaic.id(), 992_621_222_383_397_347);
}

#[test]
fn namespace_and_mosaic_ids_are_disjoint() {
    let key: [u8; 32] = *owner(NetworkType::Mijin).public_key();
    for n in 0..16u32 {
        let mosaic = MosaicId::from_nonce(&MosaicNonce::from_u32(n), &key);
        assert!(mosaic.id() & namespace::NAMESPACE_FLAG == 0);
    }
    for name in ["nem", "prx", "prx.xpx", "a.b.c"] {
        assert!(NamespaceId::from_name(name).unwrap().id() & namespace::NAMESPACE_FLAG != 0);
    }
}

#[test]
fn wire_bytes_match_hex_form() {
    let id = MosaicId::from_hex("0dc67fbe1cad29e3").unwrap();
    let le = id.id().to_le_bytes();
    assert_eq!(hex::encode(le), "e329ad1cbe7fc60d");
    assert_eq!(uint64::from_le_slice(&le).unwrap(), id.id());
}
