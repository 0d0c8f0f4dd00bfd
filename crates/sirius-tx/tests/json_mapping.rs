//! Gateway JSON decoding and the build → JSON → decode round trip for
//! every transaction kind.

use serde_json::json;
use sirius_crypto::KeyPair;
use sirius_tx::transaction::*;
use sirius_tx::*;
use sirius_types::constants::EntityType;
use sirius_types::*;

// =============================================================================
// Helpers
// =============================================================================

const OWNER_KEY: &str = "B4F12E7C9F6946091E2CB8B6D3A12B50D17CCBBF646386EA27CE2946A7423DCF";
const OTHER_KEY: &str = "C2F93346E27CE6AD1A9F8F5E3066F8326593A406BDF357ACB041E2F9AB402EFE";

fn account(key: &str) -> PublicAccount {
    PublicAccount::from_public_key(key, NetworkType::MijinTest).unwrap()
}

fn address() -> Address {
    account(OWNER_KEY).address()
}

fn builder() -> TransactionBuilder {
    TransactionBuilder::new(NetworkType::MijinTest)
        .set_deadline(Deadline::new(0x1_0000_0005))
        .set_max_fee(25)
}

/// Build, encode, decode and compare both the value and its wire bytes.
fn round_trip(body: impl Into<TransactionBody>) -> Transaction {
    let tx = builder().build(body).unwrap();
    let decoded = Transaction::from_json(&tx.to_json()).unwrap();
    assert_eq!(decoded, tx);
    assert_eq!(decoded.to_bytes().unwrap(), tx.to_bytes().unwrap());
    decoded
}

fn header(entity_type: EntityType) -> serde_json::Value {
    json!({
        "type": entity_type.code(),
        "version": 0x9000_0001u32,
        "deadline": [5, 0],
        "maxFee": "0",
    })
}

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn transfer_round_trips() {
    let body = TransferBuilder::new()
        .set_recipient(address())
        .add_mosaic(Mosaic::new(MosaicId::new(0x0DC6_7FBE_1CAD_29E3), 1_000_000))
        .set_message(Message::plain("hello"))
        .build()
        .unwrap();
    round_trip(body);

    let to_alias = TransferBuilder::new()
        .set_recipient(NamespaceId::from_name("prx.xpx").unwrap())
        .build()
        .unwrap();
    let decoded = round_trip(to_alias);
    match decoded.body() {
        TransactionBody::Transfer(t) => {
            assert_eq!(t.recipient(), &Recipient::Namespace(NamespaceId::new(0xbffb_42a1_9116_bdf6)))
        }
        other => panic!("unexpected body {other:?}"),
    }
}

#[test]
fn secure_message_round_trips() {
    let sender = KeyPair::random().unwrap();
    let recipient = KeyPair::random().unwrap();
    let message = Message::secure_text(&sender, recipient.public_key(), "secret").unwrap();
    let body = TransferBuilder::new().set_recipient(address()).set_message(message).build().unwrap();

    let decoded = round_trip(body);
    let TransactionBody::Transfer(transfer) = decoded.body() else {
        panic!("expected a transfer");
    };
    let plaintext = transfer.message().decrypt_text(&recipient, sender.public_key()).unwrap();
    assert_eq!(plaintext, "secret");
}

#[test]
fn namespace_registration_round_trips() {
    round_trip(RegisterNamespaceBuilder::new().set_name("prx").set_duration(1000).build().unwrap());
    round_trip(
        RegisterNamespaceBuilder::new()
            .set_name("xpx")
            .set_parent_id(NamespaceId::from_name("prx").unwrap())
            .build()
            .unwrap(),
    );
}

#[test]
fn mosaic_transactions_round_trip() {
    for duration in [None, Some(10_000)] {
        round_trip(
            MosaicDefinitionBuilder::new()
                .set_nonce(MosaicNonce::from_u32(7))
                .set_owner(*account(OWNER_KEY).public_key())
                .set_properties(MosaicProperties::new(true, true, false, 6, duration))
                .build()
                .unwrap(),
        );
    }
    round_trip(MosaicSupplyChange::new(MosaicId::new(42), MosaicSupplyType::Decrease, 1 << 40));
}

#[test]
fn aliases_round_trip() {
    let namespace_id = NamespaceId::from_name("prx").unwrap();
    round_trip(Alias::new(AliasAction::Link, namespace_id.clone(), AliasTarget::Address(address())));
    round_trip(Alias::new(AliasAction::Unlink, namespace_id, AliasTarget::Mosaic(MosaicId::new(9))));
}

#[test]
fn multisig_and_contract_round_trip() {
    let modifications = vec![
        CosignatoryModification::new(ModificationType::Add, account(OWNER_KEY)),
        CosignatoryModification::new(ModificationType::Remove, account(OTHER_KEY)),
    ];
    round_trip(ModifyMultisigAccount::new(1, -1, modifications.clone()).unwrap());
    round_trip(ModifyContract::new(100, [7u8; 32], modifications.clone(), vec![], modifications).unwrap());
}

#[test]
fn aggregate_round_trips() {
    let transfer = builder()
        .build(TransferBuilder::new().set_recipient(address()).build().unwrap())
        .unwrap()
        .to_aggregate(account(OWNER_KEY))
        .unwrap();
    let supply = builder()
        .build(MosaicSupplyChange::new(MosaicId::new(1), MosaicSupplyType::Increase, 5))
        .unwrap()
        .to_aggregate(account(OTHER_KEY))
        .unwrap();
    let decoded = round_trip(Aggregate::new(AggregateKind::Bonded, vec![transfer, supply]).unwrap());
    assert_eq!(decoded.entity_type(), EntityType::AggregateBonded);
}

#[test]
fn locks_round_trip() {
    let key = KeyPair::from_private_key_hex("26b64cb10f005e5988a36744ca19e20d835ccc7c105aaa5f3b212da593180930").unwrap();
    let inner = builder()
        .build(TransferBuilder::new().set_recipient(address()).build().unwrap())
        .unwrap()
        .to_aggregate(key.public_account(NetworkType::MijinTest))
        .unwrap();
    let bonded = builder()
        .build(Aggregate::new(AggregateKind::Bonded, vec![inner]).unwrap())
        .unwrap()
        .sign_with(&key, &[1u8; 32])
        .unwrap();
    let mosaic = Mosaic::new(MosaicId::new(0x0DC6_7FBE_1CAD_29E3), 10);
    round_trip(LockFunds::new(mosaic, 480, &bonded).unwrap());

    let proof = b"proof bytes";
    for hash_type in [HashType::Sha3_256, HashType::Keccak256, HashType::Hash160, HashType::Hash256] {
        let secret = hex::encode(hash_type.secret_for(proof));
        round_trip(SecretLock::new(mosaic, 100, hash_type, &secret, address()).unwrap());
        round_trip(SecretProof::new(hash_type, &secret, address().into(), &hex::encode(proof)).unwrap());
    }
}

#[test]
fn account_transactions_round_trip() {
    round_trip(AccountLink::new(account(OTHER_KEY), AccountLinkAction::Unlink));

    let add = PropertyModificationType::Add;
    round_trip(
        AccountProperties::new(
            PropertyRule::Block,
            PropertyModifications::Address(vec![PropertyModification::new(add, address())]),
        )
        .unwrap(),
    );
    round_trip(
        AccountProperties::new(
            PropertyRule::Allow,
            PropertyModifications::Mosaic(vec![PropertyModification::new(add, MosaicId::new(u64::MAX))]),
        )
        .unwrap(),
    );
    round_trip(
        AccountProperties::new(
            PropertyRule::Block,
            PropertyModifications::EntityType(vec![PropertyModification::new(
                PropertyModificationType::Remove,
                EntityType::Transfer,
            )]),
        )
        .unwrap(),
    );
}

#[test]
fn metadata_round_trips_for_every_target() {
    let modifications = [MetadataModification::add("name", "value"), MetadataModification::remove("old")];
    let targets = [
        MetadataTarget::Address(address()),
        MetadataTarget::Mosaic(MosaicId::new(3)),
        MetadataTarget::Namespace(NamespaceId::from_name("prx").unwrap()),
    ];
    for target in targets {
        let mut builder = ModifyMetadataBuilder::new().set_target(target);
        for m in &modifications {
            builder = builder.add_modification(m.clone());
        }
        round_trip(builder.build().unwrap());
    }
}

#[test]
fn network_transactions_round_trip() {
    round_trip(BlockchainUpgrade::new(100, BlockchainVersion::from_parts(0, 7, 0, 1)));
    round_trip(BlockchainConfig::new(10, "[network]\nidentifier = mijin-test", "{}").unwrap());
}

#[test]
fn exchange_offers_round_trip() {
    let mosaic = Mosaic::new(MosaicId::new(0x1234), 50);
    round_trip(
        ExchangeOfferAdd::new(vec![AddExchangeOffer {
            mosaic,
            cost: 10,
            offer_type: ExchangeOfferType::Sell,
            duration: 1000,
        }])
        .unwrap(),
    );
    round_trip(
        ExchangeOffer::new(vec![ExchangeOfferItem {
            mosaic,
            cost: 10,
            offer_type: ExchangeOfferType::Buy,
            owner: account(OTHER_KEY),
        }])
        .unwrap(),
    );
    round_trip(
        ExchangeOfferRemove::new(vec![RemoveExchangeOffer {
            mosaic_id: mosaic.id,
            offer_type: ExchangeOfferType::Sell,
        }])
        .unwrap(),
    );
}

// =============================================================================
// Gateway shapes
// =============================================================================

#[test]
fn decodes_announced_aggregate() {
    let json = json!({
        "meta": {
            "hash": "671653C94E2254F2A23EFEDB15D67C38332AED1FBD24B063C0A8E675582B6A96",
            "height": [18160, 0],
            "id": "5A0069D83F17CF0001777E55",
            "index": 0,
            "merkleComponentHash": "81E5E7AE49998802DABC816EC10158D3A7879702FF29084C2C992CD1289877A7"
        },
        "transaction": {
            "deadline": [3266625578u32, 11],
            "fee": [0, 0],
            "signature": "939673209A13FF82397578D22CC96EB8516A6760C894D9B7535E3A1E068007B9255CFA9A914C97142A7AE18533E381C846B69D2AE0D60D1DC8A55AD120E2B606",
            "signer": "7681ED5023141D9CDCF184E5A7B60B7D466739918ED5DA30F7E71EA7B86EFF2D",
            "transactions": [{
                "transaction": {
                    "message": { "payload": "746573742D6D657373616765", "type": 0 },
                    "mosaics": [{ "amount": [3863990592u32, 95248], "id": [3646934825u32, 3576016193u32] }],
                    "recipient": "9050B9837EFAB4BBE8A4B9BB32D812F9885C00D8FC1650E142",
                    "signer": "B4F12E7C9F6946091E2CB8B6D3A12B50D17CCBBF646386EA27CE2946A7423DCF",
                    "type": 16724,
                    "version": 36867
                }
            }],
            "type": 16705,
            "version": 36867
        }
    });
    let tx = Transaction::from_json(&json).unwrap();
    assert_eq!(tx.network_type(), NetworkType::MijinTest);
    assert_eq!(tx.version(), 3);
    assert!(tx.is_confirmed());
    assert_eq!(tx.deadline().instant(), (11u64 << 32) | 3266625578);

    let TransactionBody::Aggregate(aggregate) = tx.body() else {
        panic!("expected an aggregate");
    };
    assert!(aggregate.cosignatures().is_empty());
    let inner = &aggregate.inner_transactions()[0];
    assert_eq!(inner.deadline(), tx.deadline());
    assert_eq!(inner.signature(), tx.signature());
    assert_eq!(inner.info(), tx.info());
    assert_eq!(inner.signer(), Some(&account(OWNER_KEY)));

    let TransactionBody::Transfer(transfer) = inner.body() else {
        panic!("expected a transfer");
    };
    assert_eq!(transfer.message().text(), Some("test-message"));
    let xem = NamespaceId::from_name("nem.xem").unwrap();
    assert_eq!(transfer.mosaics()[0].id.id(), xem.id());
    assert_eq!(transfer.mosaics()[0].amount, 409_090_909_000_000);
}

#[test]
fn inner_meta_is_kept_when_present() {
    let mut inner = header(EntityType::MosaicSupplyChange);
    inner["signer"] = json!(OWNER_KEY);
    inner["mosaicId"] = json!([1, 0]);
    inner["direction"] = json!(1);
    inner["delta"] = json!([5, 0]);
    let mut outer = header(EntityType::AggregateComplete);
    outer["transactions"] = json!([{
        "meta": { "height": [9, 0], "index": 1, "id": "b", "aggregateHash": "AA", "aggregateId": "a" },
        "transaction": inner,
    }]);
    let json = json!({ "meta": { "height": [9, 0], "hash": "AA" }, "transaction": outer });

    let tx = Transaction::from_json(&json).unwrap();
    let TransactionBody::Aggregate(aggregate) = tx.body() else {
        panic!("expected an aggregate");
    };
    let info = aggregate.inner_transactions()[0].info().unwrap();
    assert_eq!(info.aggregate_hash(), Some("AA"));
    assert_eq!(info.index(), Some(1));
    assert_eq!(tx.info().unwrap().index(), None);
}

#[test]
fn accepts_alternate_field_names() {
    let mut link = header(EntityType::AccountLink);
    link["remoteAccountKey"] = json!(OTHER_KEY);
    link["action"] = json!(1);
    link["fee"] = json!([7, 0]);
    link.as_object_mut().unwrap().remove("maxFee");
    let tx = Transaction::from_json(&json!({ "transaction": link })).unwrap();
    assert_eq!(tx.max_fee(), 7);
    let TransactionBody::AccountLink(body) = tx.body() else {
        panic!("expected an account link");
    };
    assert_eq!(body.action(), AccountLinkAction::Unlink);

    let mut metadata = header(EntityType::ModifyMosaicMetadata);
    metadata["metadataType"] = json!(2);
    metadata["metadataId"] = json!([3, 0]);
    metadata["modifications"] = json!([{ "type": 0, "key": "k", "value": "v" }]);
    let tx = Transaction::from_json(&json!({ "transaction": metadata })).unwrap();
    let TransactionBody::ModifyMetadata(body) = tx.body() else {
        panic!("expected metadata");
    };
    assert_eq!(body.modifications(), &[MetadataModification::add("k", "v")]);
}

#[test]
fn rejects_incomplete_input() {
    let mut no_fee = header(EntityType::AccountLink);
    no_fee["remoteAccountKey"] = json!(OTHER_KEY);
    no_fee["linkAction"] = json!(0);
    no_fee.as_object_mut().unwrap().remove("maxFee");
    assert!(matches!(Transaction::from_json(&json!({ "transaction": no_fee })), Err(TxError::Decode(_))));

    let mut no_recipient = header(EntityType::Transfer);
    no_recipient["mosaics"] = json!([]);
    assert!(Transaction::from_json(&json!({ "transaction": no_recipient })).is_err());

    assert!(matches!(
        Transaction::from_json(&json!({ "transaction": header(EntityType::Transfer) })),
        Err(TxError::Decode(_))
    ));
    assert!(matches!(Transaction::from_json(&json!({})), Err(TxError::Decode(_))));
}

#[test]
fn signed_transaction_round_trips_through_json() {
    let key = KeyPair::from_private_key_hex("787225aaff3d2c71f4ffa32d4f19ec4922f3cd869747f267378f81f8e3fcb12d").unwrap();
    let mut json = header(EntityType::MosaicSupplyChange);
    json["signer"] = json!(key.public_key_hex());
    json["signature"] = json!("AB".repeat(64));
    json["mosaicId"] = json!([1, 0]);
    json["direction"] = json!(1);
    json["delta"] = json!([5, 0]);
    let json = json!({ "transaction": json });

    let tx = Transaction::from_json(&json).unwrap();
    assert_eq!(tx.signature(), Some(&[0xAB; 64]));
    assert_eq!(Transaction::from_json(&tx.to_json()).unwrap(), tx);
}
