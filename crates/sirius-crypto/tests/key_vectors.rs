//! Public key, signature, and secure message vectors shared with the
//! network's reference clients.

use sirius_crypto::block_cipher;
use sirius_crypto::{verify, KeyPair};
use sirius_types::NetworkType;

// =============================================================================
// Helpers
// =============================================================================

fn key(hex: &str) -> KeyPair {
    KeyPair::from_private_key_hex(hex).unwrap()
}

// =============================================================================
// Keys
// =============================================================================

#[test]
fn derives_known_public_keys() {
    let cases = [
        (
            "8374B5915AEAB6308C34368B15ABF33C79FD7FEFC0DEAF9CC51BA57F120F1190",
            "9E7930144DA0845361F650BF78A36791ABF2577E251706ECA45480998FE61D18",
        ),
        (
            "369CB3195F88A16F8326DABBD37DA5F8458B55AA5DA6F7E2F756A12BE6CAA546",
            "8E1A94D534EA6A3B02B0B967701549C21724C7644B2E4C20BF15D01D50097ACB",
        ),
        (
            "8534E476C13A736645035D535EDF2759295FF1EF65E7FFBDA31501A3C1F3CB99",
            "10F3D152493F173EC9ED55F70606392FFB4E21A333EDD192AD4770AA8DF911ED",
        ),
    ];
    for (private_key, public_key) in cases {
        assert_eq!(key(private_key).public_key_hex(), public_key);
    }
}

#[test]
fn public_account_address_matches_key() {
    let kp = key("787225aaff3d2c71f4ffa32d4f19ec4922f3cd869747f267378f81f8e3fcb12d");
    let account = kp.public_account(NetworkType::MijinTest);
    assert_eq!(account.public_key(), kp.public_key());
    assert_eq!(account.address().network_type(), NetworkType::MijinTest);
    assert!(account.address().plain().starts_with('S'));
}

#[test]
fn rejects_malformed_private_keys() {
    assert!(KeyPair::from_private_key_hex("1234").is_err());
    assert!(KeyPair::from_private_key_hex("zz").is_err());
}

#[test]
fn signature_over_empty_message_verifies() {
    let kp = key("26b64cb10f005e5988a36744ca19e20d835ccc7c105aaa5f3b212da593180930");
    let signature = kp.sign(&[]);
    assert!(verify(kp.public_key(), &[], &signature).is_ok());
}

// =============================================================================
// Secure messages
// =============================================================================

#[test]
fn secure_message_round_trip_for_many_lengths() {
    let sender = key("8374B5915AEAB6308C34368B15ABF33C79FD7FEFC0DEAF9CC51BA57F120F1190");
    let recipient = key("369CB3195F88A16F8326DABBD37DA5F8458B55AA5DA6F7E2F756A12BE6CAA546");
    for len in [0usize, 1, 15, 16, 17, 100] {
        let plaintext: Vec<u8> = (0..len).map(|i| i as u8).collect();
        let payload = block_cipher::encrypt(&sender, recipient.public_key(), &plaintext).unwrap();
        assert!(payload.len() >= block_cipher::MIN_PAYLOAD_SIZE);
        assert_eq!(block_cipher::decrypt(&recipient, sender.public_key(), &payload).unwrap(), plaintext);
    }
}
