//! [`Transaction`] to JSON in the gateway's shape.

use super::pair;
use crate::message::Message;
use crate::transaction::*;
use crate::{Transaction, TransactionBody, TransactionInfo};
use serde_json::{json, Map, Value};

/// Encode as `{"meta": .., "transaction": ..}`. `meta` is omitted for
/// transactions the network has not reported on.
pub fn to_json(tx: &Transaction) -> Value {
    let mut out = Map::new();
    if let Some(info) = tx.info() {
        out.insert("meta".into(), encode_info(info));
    }
    out.insert("transaction".into(), Value::Object(encode_transaction(tx)));
    Value::Object(out)
}

fn encode_transaction(tx: &Transaction) -> Map<String, Value> {
    let mut out = Map::new();
    out.insert("type".into(), json!(tx.entity_type().code()));
    out.insert("version".into(), json!(tx.version_field()));
    out.insert("deadline".into(), pair(tx.deadline().instant()));
    out.insert("maxFee".into(), json!(tx.max_fee().to_string()));
    if let Some(signer) = tx.signer() {
        out.insert("signer".into(), json!(signer.public_key_hex()));
    }
    if let Some(signature) = tx.signature() {
        out.insert("signature".into(), json!(hex::encode_upper(signature)));
    }
    encode_body(tx.body(), &mut out);
    out
}

/// Inner entries carry only what the enclosing aggregate does not.
fn encode_inner(tx: &Transaction) -> Value {
    let mut body = Map::new();
    body.insert("type".into(), json!(tx.entity_type().code()));
    body.insert("version".into(), json!(tx.version_field()));
    if let Some(signer) = tx.signer() {
        body.insert("signer".into(), json!(signer.public_key_hex()));
    }
    encode_body(tx.body(), &mut body);

    let mut entry = Map::new();
    if let Some(info) = tx.info() {
        entry.insert("meta".into(), encode_info(info));
    }
    entry.insert("transaction".into(), Value::Object(body));
    Value::Object(entry)
}

fn encode_info(info: &TransactionInfo) -> Value {
    match info {
        TransactionInfo::Standalone { height, index, id, hash, merkle_component_hash } => json!({
            "height": pair(*height),
            "index": index,
            "id": id,
            "hash": hash,
            "merkleComponentHash": merkle_component_hash,
        }),
        TransactionInfo::AggregateInner { height, index, id, aggregate_hash, aggregate_id } => json!({
            "height": pair(*height),
            "index": index,
            "id": id,
            "aggregateHash": aggregate_hash,
            "aggregateId": aggregate_id,
        }),
        TransactionInfo::Legacy { height, hash, merkle_component_hash } => {
            let mut out = Map::new();
            out.insert("height".into(), pair(*height));
            if let Some(hash) = hash {
                out.insert("hash".into(), json!(hash));
            }
            if let Some(merkle) = merkle_component_hash {
                out.insert("merkleComponentHash".into(), json!(merkle));
            }
            Value::Object(out)
        }
    }
}

fn encode_message(message: &Message) -> Value {
    json!({
        "type": message.message_type().value(),
        "payload": hex::encode_upper(message.payload()),
    })
}

fn cosignatory_modifications(modifications: &[CosignatoryModification]) -> Value {
    modifications
        .iter()
        .map(|m| {
            json!({
                "type": m.modification_type.value(),
                "cosignatoryPublicKey": m.cosignatory.public_key_hex(),
            })
        })
        .collect()
}

fn property_modifications<T>(
    modifications: &[PropertyModification<T>],
    value: impl Fn(&T) -> Value,
) -> Value {
    modifications
        .iter()
        .map(|m| json!({ "type": m.modification_type.value(), "value": value(&m.value) }))
        .collect()
}

fn encode_body(body: &TransactionBody, out: &mut Map<String, Value>) {
    let fields = match body {
        TransactionBody::Transfer(b) => json!({
            "recipient": b.recipient().encoded(),
            "mosaics": b.mosaics()
                .iter()
                .map(|m| json!({ "id": pair(m.id.id()), "amount": pair(m.amount) }))
                .collect::<Vec<_>>(),
            "message": encode_message(b.message()),
        }),
        TransactionBody::RegisterNamespace(b) => {
            let mut fields = json!({
                "namespaceType": b.namespace_type().value(),
                "namespaceId": pair(b.namespace_id().id()),
                "name": b.name(),
            });
            match b.registration() {
                NamespaceRegistration::Root { duration } => fields["duration"] = pair(*duration),
                NamespaceRegistration::Sub { parent_id } => fields["parentId"] = pair(parent_id.id()),
            }
            fields
        }
        TransactionBody::MosaicDefinition(b) => {
            let properties = b.properties();
            let mut list = vec![
                json!({ "id": 0, "value": pair(properties.flags() as u64) }),
                json!({ "id": 1, "value": pair(properties.divisibility as u64) }),
            ];
            if let Some(duration) = properties.duration {
                list.push(json!({ "id": 2, "value": pair(duration) }));
            }
            json!({
                "nonce": b.nonce().value(),
                "mosaicId": pair(b.mosaic_id().id()),
                "properties": list,
            })
        }
        TransactionBody::MosaicSupplyChange(b) => json!({
            "mosaicId": pair(b.mosaic_id().id()),
            "direction": b.direction().value(),
            "delta": pair(b.delta()),
        }),
        TransactionBody::Alias(b) => {
            let mut fields = json!({
                "aliasAction": b.action().value(),
                "namespaceId": pair(b.namespace_id().id()),
            });
            match b.target() {
                AliasTarget::Address(address) => fields["address"] = json!(address.encoded()),
                AliasTarget::Mosaic(mosaic_id) => fields["mosaicId"] = pair(mosaic_id.id()),
            }
            fields
        }
        TransactionBody::ModifyMultisigAccount(b) => json!({
            "minApprovalDelta": b.min_approval_delta(),
            "minRemovalDelta": b.min_removal_delta(),
            "modifications": cosignatory_modifications(b.modifications()),
        }),
        TransactionBody::Aggregate(b) => json!({
            "transactions": b.inner_transactions().iter().map(encode_inner).collect::<Vec<_>>(),
            "cosignatures": b.cosignatures()
                .iter()
                .map(|c| json!({ "signer": c.signer.public_key_hex(), "signature": c.signature_hex() }))
                .collect::<Vec<_>>(),
        }),
        TransactionBody::LockFunds(b) => json!({
            "mosaic": { "id": pair(b.mosaic().id.id()), "amount": pair(b.mosaic().amount) },
            "duration": pair(b.duration()),
            "hash": b.hash_hex(),
        }),
        TransactionBody::SecretLock(b) => json!({
            "mosaic": { "id": pair(b.mosaic().id.id()), "amount": pair(b.mosaic().amount) },
            "duration": pair(b.duration()),
            "hashAlgorithm": b.hash_type().value(),
            "secret": b.secret_hex(),
            "recipient": b.recipient().encoded(),
        }),
        TransactionBody::SecretProof(b) => json!({
            "hashAlgorithm": b.hash_type().value(),
            "secret": b.secret_hex(),
            "recipient": b.recipient().encoded(),
            "proof": b.proof_hex(),
        }),
        TransactionBody::AccountLink(b) => json!({
            "remoteAccountKey": b.remote_account().public_key_hex(),
            "linkAction": b.action().value(),
        }),
        TransactionBody::ModifyMetadata(b) => {
            let metadata_id = match b.target() {
                MetadataTarget::Address(address) => json!(address.encoded()),
                MetadataTarget::Mosaic(mosaic_id) => pair(mosaic_id.id()),
                MetadataTarget::Namespace(namespace_id) => pair(namespace_id.id()),
            };
            let modifications: Vec<Value> = b
                .modifications()
                .iter()
                .map(|m| {
                    let mut entry = json!({ "modificationType": m.modification_type().value(), "key": m.key() });
                    if let Some(value) = m.value() {
                        entry["value"] = json!(value);
                    }
                    entry
                })
                .collect();
            json!({
                "metadataType": b.target().metadata_type(),
                "metadataId": metadata_id,
                "modifications": modifications,
            })
        }
        TransactionBody::AccountProperties(b) => {
            let modifications = match b.modifications() {
                PropertyModifications::Address(m) => property_modifications(m, |a| json!(a.encoded())),
                PropertyModifications::Mosaic(m) => property_modifications(m, |id| pair(id.id())),
                PropertyModifications::EntityType(m) => property_modifications(m, |t| json!(t.code())),
            };
            json!({ "propertyType": b.property_type(), "modifications": modifications })
        }
        TransactionBody::ModifyContract(b) => json!({
            "durationDelta": pair(b.duration_delta()),
            "hash": hex::encode_upper(b.hash()),
            "customers": cosignatory_modifications(b.customers()),
            "executors": cosignatory_modifications(b.executors()),
            "verifiers": cosignatory_modifications(b.verifiers()),
        }),
        TransactionBody::BlockchainUpgrade(b) => json!({
            "upgradePeriod": pair(b.upgrade_period()),
            "newBlockChainVersion": pair(b.new_version().value()),
        }),
        TransactionBody::BlockchainConfig(b) => json!({
            "applyHeightDelta": pair(b.apply_height_delta()),
            "blockchainConfig": b.blockchain_config(),
            "supportedEntityVersions": b.supported_entity_versions(),
        }),
        TransactionBody::ExchangeOfferAdd(b) => json!({
            "offers": b.offers().iter().map(|o| json!({
                "mosaicId": pair(o.mosaic.id.id()),
                "mosaicAmount": pair(o.mosaic.amount),
                "cost": pair(o.cost),
                "type": o.offer_type.value(),
                "duration": pair(o.duration),
            })).collect::<Vec<_>>(),
        }),
        TransactionBody::ExchangeOffer(b) => json!({
            "offers": b.offers().iter().map(|o| json!({
                "mosaicId": pair(o.mosaic.id.id()),
                "mosaicAmount": pair(o.mosaic.amount),
                "cost": pair(o.cost),
                "type": o.offer_type.value(),
                "owner": o.owner.public_key_hex(),
            })).collect::<Vec<_>>(),
        }),
        TransactionBody::ExchangeOfferRemove(b) => json!({
            "offers": b.offers().iter().map(|o| json!({
                "mosaicId": pair(o.mosaic_id.id()),
                "type": o.offer_type.value(),
            })).collect::<Vec<_>>(),
        }),
    };
    if let Value::Object(fields) = fields {
        out.extend(fields);
    }
}
