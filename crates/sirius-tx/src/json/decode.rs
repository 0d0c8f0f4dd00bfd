//! Inbound JSON to [`Transaction`].

use super::{as_u64, field, first_field, get_array, get_i8, get_str, get_u32, get_u64, get_u8, opt_array, opt_str};
use crate::message::{Message, MessageType};
use crate::transaction::*;
use crate::{decode_fixed, Transaction, TransactionBody, TransactionInfo, TxError};
use log::debug;
use serde_json::Value;
use sirius_types::constants::EntityType;
use sirius_types::mosaic::PROPERTY_DURATION;
use sirius_types::{
    Address, Deadline, Mosaic, MosaicId, MosaicNonce, MosaicProperties, NamespaceId, NamespaceType, NetworkType,
    PublicAccount, TypesError,
};

/// Decode a `{"meta": .., "transaction": ..}` object.
pub fn from_json(json: &Value) -> Result<Transaction, TxError> {
    let tx = field(json, "transaction")?;
    let code = get_u64(tx, "type")?;
    let entity_type = u16::try_from(code)
        .ok()
        .and_then(EntityType::from_u16)
        .ok_or(TxError::UnsupportedType(code))?;

    let info = match json.get("meta") {
        None | Some(Value::Null) => None,
        Some(meta) => Some(decode_info(meta)?),
    };
    let (network_type, version) = decode_version(tx)?;
    let deadline = Deadline::new(get_u64(tx, "deadline")?);
    let max_fee = decode_fee(tx)?;
    let signer = decode_signer(tx, network_type)?;
    let body = decode_body(entity_type, tx, json.get("meta"), network_type)?;

    debug!("decoded {} v{} for {}", entity_type, version, network_type);
    Ok(Transaction::from_parts(network_type, version, deadline, max_fee, signer, info, body))
}

pub fn from_json_str(json: &str) -> Result<Transaction, TxError> {
    let value: Value = serde_json::from_str(json).map_err(|e| TxError::Decode(e.to_string()))?;
    from_json(&value)
}

// ─── Header ─────────────────────────────────────────────────────────────────

/// Current gateways pack `network << 24 | version`; older ones sent a
/// 16-bit `network << 8 | version`. Clients with signed 32-bit integers
/// report high network bytes as negative numbers.
fn decode_version(tx: &Value) -> Result<(NetworkType, u32), TxError> {
    let value = field(tx, "version")?;
    let raw = value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .or_else(|| value.as_i64().and_then(|n| i32::try_from(n).ok()).map(|n| n as u32))
        .ok_or_else(|| TxError::Decode(format!("version: {value} is not a 32-bit integer")))?;
    let (network, version) = if raw > 0xFFFF {
        ((raw >> 24) as u8, raw & 0x00FF_FFFF)
    } else {
        ((raw >> 8) as u8, raw & 0xFF)
    };
    let network_type = NetworkType::from_u8(network)
        .ok_or_else(|| TypesError::UnknownNetwork(format!("{network:#04x}")))?;
    Ok((network_type, version))
}

fn decode_fee(tx: &Value) -> Result<u64, TxError> {
    as_u64(first_field(tx, &["maxFee", "fee"])?, "maxFee")
}

fn decode_signer(tx: &Value, network_type: NetworkType) -> Result<Signer, TxError> {
    let signer = opt_str(tx, "signer")
        .map(|key| PublicAccount::from_public_key(&key, network_type))
        .transpose()?;
    let signature = opt_str(tx, "signature").map(|s| decode_fixed("signature", &s)).transpose()?;
    match (signer, signature) {
        (None, None) => Ok(Signer::Unsigned),
        (Some(account), None) => Ok(Signer::Attributed(account)),
        (Some(signer), Some(signature)) => Ok(Signer::Signed { signer, signature }),
        (None, Some(_)) => Err(TxError::Decode("signature without signer".into())),
    }
}

fn decode_info(meta: &Value) -> Result<TransactionInfo, TxError> {
    let height = get_u64(meta, "height")?;
    let has = |key: &str| meta.get(key).is_some_and(|v| !v.is_null());

    if has("hash") && has("id") {
        return Ok(TransactionInfo::Standalone {
            height,
            index: get_u32(meta, "index")?,
            id: get_str(meta, "id")?.to_string(),
            hash: get_str(meta, "hash")?.to_string(),
            merkle_component_hash: get_str(meta, "merkleComponentHash")?.to_string(),
        });
    }
    if has("aggregateHash") && has("id") {
        return Ok(TransactionInfo::AggregateInner {
            height,
            index: get_u32(meta, "index")?,
            id: get_str(meta, "id")?.to_string(),
            aggregate_hash: get_str(meta, "aggregateHash")?.to_string(),
            aggregate_id: get_str(meta, "aggregateId")?.to_string(),
        });
    }
    Ok(TransactionInfo::Legacy {
        height,
        hash: opt_str(meta, "hash"),
        merkle_component_hash: opt_str(meta, "merkleComponentHash"),
    })
}

// ─── Body ───────────────────────────────────────────────────────────────────

fn decode_body(
    entity_type: EntityType,
    tx: &Value,
    meta: Option<&Value>,
    network_type: NetworkType,
) -> Result<TransactionBody, TxError> {
    let body: TransactionBody = match entity_type {
        EntityType::Transfer => decode_transfer(tx)?.into(),
        EntityType::RegisterNamespace => decode_register_namespace(tx)?.into(),
        EntityType::MosaicDefinition => decode_mosaic_definition(tx)?.into(),
        EntityType::MosaicSupplyChange => MosaicSupplyChange::new(
            mosaic_id(tx, "mosaicId")?,
            code(tx, &["direction"], MosaicSupplyType::from_u8)?,
            get_u64(tx, "delta")?,
        )
        .into(),
        EntityType::MosaicAlias | EntityType::AddressAlias => decode_alias(entity_type, tx)?.into(),
        EntityType::ModifyMultisigAccount => ModifyMultisigAccount::new(
            get_i8(tx, "minApprovalDelta")?,
            get_i8(tx, "minRemovalDelta")?,
            cosignatory_modifications(tx, "modifications", network_type)?,
        )?
        .into(),
        EntityType::AggregateComplete => decode_aggregate(AggregateKind::Complete, tx, meta, network_type)?.into(),
        EntityType::AggregateBonded => decode_aggregate(AggregateKind::Bonded, tx, meta, network_type)?.into(),
        EntityType::Lock => LockFunds::from_hash(
            lock_mosaic(tx)?,
            get_u64(tx, "duration")?,
            decode_fixed("hash", get_str(tx, "hash")?)?,
        )
        .into(),
        EntityType::SecretLock => SecretLock::new(
            lock_mosaic(tx)?,
            get_u64(tx, "duration")?,
            code(tx, &["hashAlgorithm"], HashType::from_u8)?,
            get_str(tx, "secret")?,
            Address::from_encoded(get_str(tx, "recipient")?)?,
        )?
        .into(),
        EntityType::SecretProof => SecretProof::new(
            code(tx, &["hashAlgorithm"], HashType::from_u8)?,
            get_str(tx, "secret")?,
            Recipient::from_encoded(get_str(tx, "recipient")?)?,
            get_str(tx, "proof")?,
        )?
        .into(),
        EntityType::AccountLink => AccountLink::new(
            PublicAccount::from_public_key(get_str(tx, "remoteAccountKey")?, network_type)?,
            code(tx, &["linkAction", "action"], AccountLinkAction::from_u8)?,
        )
        .into(),
        EntityType::ModifyAddressMetadata | EntityType::ModifyMosaicMetadata | EntityType::ModifyNamespaceMetadata => {
            decode_metadata(tx)?.into()
        }
        EntityType::AccountPropertiesAddress
        | EntityType::AccountPropertiesMosaic
        | EntityType::AccountPropertiesEntityType => decode_account_properties(tx)?.into(),
        EntityType::ModifyContract => ModifyContract::new(
            get_u64(tx, "durationDelta")?,
            decode_fixed("hash", get_str(tx, "hash")?)?,
            cosignatory_modifications(tx, "customers", network_type)?,
            cosignatory_modifications(tx, "executors", network_type)?,
            cosignatory_modifications(tx, "verifiers", network_type)?,
        )?
        .into(),
        EntityType::BlockchainUpgrade => BlockchainUpgrade::new(
            get_u64(tx, "upgradePeriod")?,
            BlockchainVersion::new(get_u64(tx, "newBlockChainVersion")?),
        )
        .into(),
        EntityType::BlockchainConfig => BlockchainConfig::new(
            get_u64(tx, "applyHeightDelta")?,
            get_str(tx, "blockchainConfig")?,
            get_str(tx, "supportedEntityVersions")?,
        )?
        .into(),
        EntityType::ExchangeOfferAdd => ExchangeOfferAdd::new(offers(tx, |o| {
            Ok(AddExchangeOffer {
                mosaic: offer_mosaic(o)?,
                cost: get_u64(o, "cost")?,
                offer_type: offer_type(o)?,
                duration: get_u64(o, "duration")?,
            })
        })?)?
        .into(),
        EntityType::ExchangeOffer => ExchangeOffer::new(offers(tx, |o| {
            Ok(ExchangeOfferItem {
                mosaic: offer_mosaic(o)?,
                cost: get_u64(o, "cost")?,
                offer_type: offer_type(o)?,
                owner: PublicAccount::from_public_key(get_str(o, "owner")?, network_type)?,
            })
        })?)?
        .into(),
        EntityType::ExchangeOfferRemove => ExchangeOfferRemove::new(offers(tx, |o| {
            Ok(RemoveExchangeOffer { mosaic_id: mosaic_id(o, "mosaicId")?, offer_type: offer_type(o)? })
        })?)?
        .into(),
    };
    Ok(body)
}

fn decode_transfer(tx: &Value) -> Result<Transfer, TxError> {
    let mosaics = opt_array(tx, "mosaics")?
        .iter()
        .map(|m| Ok(Mosaic::new(mosaic_id(m, "id")?, get_u64(m, "amount")?)))
        .collect::<Result<Vec<_>, TxError>>()?;
    let message = match tx.get("message") {
        None | Some(Value::Null) => Message::empty(),
        Some(message) => {
            let message_type = code(message, &["type"], MessageType::from_u8)?;
            let payload = match message.get("payload") {
                None | Some(Value::Null) => Vec::new(),
                Some(_) => hex::decode(get_str(message, "payload")?)
                    .map_err(|e| TxError::Decode(format!("message payload: {e}")))?,
            };
            Message::from_payload(message_type, payload)
        }
    };
    TransferBuilder::new()
        .set_recipient(Recipient::from_encoded(get_str(tx, "recipient")?)?)
        .set_mosaics(mosaics)
        .set_message(message)
        .build()
}

fn decode_register_namespace(tx: &Value) -> Result<RegisterNamespace, TxError> {
    let builder = RegisterNamespaceBuilder::new()
        .set_name(get_str(tx, "name")?)
        .set_namespace_id(namespace_id(tx, "namespaceId")?);
    let namespace_type = get_u8(tx, "namespaceType")?;
    let builder = match NamespaceType::from_u8(namespace_type) {
        Some(NamespaceType::Root) => builder.set_duration(get_u64(tx, "duration")?),
        Some(NamespaceType::Sub) => builder.set_parent_id(namespace_id(tx, "parentId")?),
        None => return Err(TxError::Decode(format!("namespaceType: unknown value {namespace_type}"))),
    };
    builder.build()
}

fn decode_mosaic_definition(tx: &Value) -> Result<MosaicDefinition, TxError> {
    let properties = get_array(tx, "properties")?;
    let property = |id: u64| -> Result<Option<u64>, TxError> {
        for p in properties {
            if get_u64(p, "id")? == id {
                return Ok(Some(get_u64(p, "value")?));
            }
        }
        Ok(None)
    };
    let flags = property(0)?.ok_or_else(|| TxError::Decode("missing mosaic property: flags".into()))?;
    let divisibility = property(1)?.ok_or_else(|| TxError::Decode("missing mosaic property: divisibility".into()))?;
    let duration = property(PROPERTY_DURATION as u64)?;
    let narrow = |name: &str, v: u64| {
        u8::try_from(v).map_err(|_| TxError::Decode(format!("mosaic property {name}: {v} out of range")))
    };

    MosaicDefinitionBuilder::new()
        .set_nonce(MosaicNonce::from_u32(get_u32(tx, "nonce")?))
        .set_mosaic_id(mosaic_id(tx, "mosaicId")?)
        .set_properties(MosaicProperties::from_flags(
            narrow("flags", flags)?,
            narrow("divisibility", divisibility)?,
            duration,
        ))
        .build()
}

fn decode_alias(entity_type: EntityType, tx: &Value) -> Result<Alias, TxError> {
    let target = match entity_type {
        EntityType::AddressAlias => AliasTarget::Address(Address::from_encoded(get_str(tx, "address")?)?),
        _ => AliasTarget::Mosaic(mosaic_id(tx, "mosaicId")?),
    };
    Ok(Alias::new(
        code(tx, &["aliasAction", "action"], AliasAction::from_u8)?,
        namespace_id(tx, "namespaceId")?,
        target,
    ))
}

/// Inner entries carry only their own signer and body; deadline, fee and
/// signature come from the enclosing aggregate.
fn decode_aggregate(
    kind: AggregateKind,
    tx: &Value,
    meta: Option<&Value>,
    network_type: NetworkType,
) -> Result<Aggregate, TxError> {
    let mut inner = Vec::new();
    for entry in get_array(tx, "transactions")? {
        let mut entry = entry.clone();
        let inner_tx = entry
            .get_mut("transaction")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| TxError::Decode("aggregate entry without transaction".into()))?;
        for key in ["deadline", "fee", "maxFee", "signature"] {
            if let Some(v) = tx.get(key) {
                inner_tx.insert(key.to_string(), v.clone());
            }
        }
        if let (Some(object), Some(meta)) = (entry.as_object_mut(), meta) {
            object.entry("meta").or_insert_with(|| meta.clone());
        }
        inner.push(from_json(&entry)?);
    }

    let cosignatures = opt_array(tx, "cosignatures")?
        .iter()
        .map(|c| {
            Ok(Cosignature::new(
                PublicAccount::from_public_key(get_str(c, "signer")?, network_type)?,
                decode_fixed("cosignature", get_str(c, "signature")?)?,
            ))
        })
        .collect::<Result<Vec<_>, TxError>>()?;
    Aggregate::with_cosignatures(kind, inner, cosignatures)
}

fn decode_metadata(tx: &Value) -> Result<ModifyMetadata, TxError> {
    let metadata_type = get_u8(tx, "metadataType")?;
    let target = match metadata_type {
        1 => MetadataTarget::Address(Address::from_encoded(get_str(tx, "metadataId")?)?),
        2 => MetadataTarget::Mosaic(mosaic_id(tx, "metadataId")?),
        3 => MetadataTarget::Namespace(namespace_id(tx, "metadataId")?),
        other => return Err(TxError::Decode(format!("metadataType: unknown value {other}"))),
    };

    let mut builder = ModifyMetadataBuilder::new().set_target(target);
    for m in get_array(tx, "modifications")? {
        let key = get_str(m, "key")?;
        let modification = match code(m, &["modificationType", "type"], MetadataModificationType::from_u8)? {
            MetadataModificationType::Add => MetadataModification::add(key, get_str(m, "value")?),
            MetadataModificationType::Remove => MetadataModification::remove(key),
        };
        builder = builder.add_modification(modification);
    }
    builder.build()
}

fn decode_account_properties(tx: &Value) -> Result<AccountProperties, TxError> {
    let property_type = get_u8(tx, "propertyType")?;
    let (rule, kind) = AccountProperties::parse_property_type(property_type)
        .ok_or_else(|| TxError::Decode(format!("propertyType: unknown value {property_type:#04x}")))?;
    let entries = get_array(tx, "modifications")?;

    fn each<T>(
        entries: &[Value],
        value: impl Fn(&Value) -> Result<T, TxError>,
    ) -> Result<Vec<PropertyModification<T>>, TxError> {
        entries
            .iter()
            .map(|m| {
                let modification_type = code(m, &["type", "modificationType"], PropertyModificationType::from_u8)?;
                Ok(PropertyModification::new(modification_type, value(field(m, "value")?)?))
            })
            .collect()
    }

    let modifications = match kind {
        PropertyKind::Address => PropertyModifications::Address(each(entries, |v| {
            let encoded = v.as_str().ok_or_else(|| TxError::Decode("value: expected an address".into()))?;
            Ok(Address::from_encoded(encoded)?)
        })?),
        PropertyKind::Mosaic => PropertyModifications::Mosaic(each(entries, |v| Ok(MosaicId::new(as_u64(v, "value")?)))?),
        PropertyKind::EntityType => PropertyModifications::EntityType(each(entries, |v| {
            let raw = as_u64(v, "value")?;
            u16::try_from(raw)
                .ok()
                .and_then(EntityType::from_u16)
                .ok_or(TxError::UnsupportedType(raw))
        })?),
    };
    AccountProperties::new(rule, modifications)
}

// ─── Field Helpers ──────────────────────────────────────────────────────────

fn mosaic_id(v: &Value, key: &str) -> Result<MosaicId, TxError> {
    Ok(MosaicId::new(get_u64(v, key)?))
}

fn namespace_id(v: &Value, key: &str) -> Result<NamespaceId, TxError> {
    Ok(NamespaceId::new(get_u64(v, key)?))
}

/// An enum code read from the first present of `keys`.
fn code<T>(v: &Value, keys: &[&str], parse: fn(u8) -> Option<T>) -> Result<T, TxError> {
    let raw = as_u64(first_field(v, keys)?, keys[0])?;
    u8::try_from(raw)
        .ok()
        .and_then(parse)
        .ok_or_else(|| TxError::Decode(format!("{}: unknown value {raw}", keys[0])))
}

/// Lock mosaics come either flat (`mosaicId`, `amount`) or nested (`mosaic`).
fn lock_mosaic(tx: &Value) -> Result<Mosaic, TxError> {
    match tx.get("mosaic") {
        Some(mosaic) if !mosaic.is_null() => Ok(Mosaic::new(mosaic_id(mosaic, "id")?, get_u64(mosaic, "amount")?)),
        _ => Ok(Mosaic::new(mosaic_id(tx, "mosaicId")?, get_u64(tx, "amount")?)),
    }
}

fn offer_mosaic(offer: &Value) -> Result<Mosaic, TxError> {
    Ok(Mosaic::new(mosaic_id(offer, "mosaicId")?, get_u64(offer, "mosaicAmount")?))
}

fn offer_type(offer: &Value) -> Result<ExchangeOfferType, TxError> {
    code(offer, &["type", "offerType"], ExchangeOfferType::from_u8)
}

fn offers<T>(tx: &Value, item: impl Fn(&Value) -> Result<T, TxError>) -> Result<Vec<T>, TxError> {
    get_array(tx, "offers")?.iter().map(item).collect()
}

fn cosignatory_modifications(
    tx: &Value,
    key: &str,
    network_type: NetworkType,
) -> Result<Vec<CosignatoryModification>, TxError> {
    opt_array(tx, key)?
        .iter()
        .map(|m| {
            Ok(CosignatoryModification::new(
                code(m, &["type", "modificationType"], ModificationType::from_u8)?,
                PublicAccount::from_public_key(get_str(m, "cosignatoryPublicKey")?, network_type)?,
            ))
        })
        .collect()
}
