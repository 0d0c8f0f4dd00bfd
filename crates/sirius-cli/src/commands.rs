//! CLI command implementations.

use crate::AppContext;
use sirius_crypto::KeyPair;
use sirius_tx::transaction::{Recipient, TransferBuilder};
use sirius_tx::{
    create_transaction_hash, verify_transaction, CosignatureTransaction, Message, Transaction, TransactionBody,
    TransactionBuilder,
};
use sirius_types::{Address, Deadline, Mosaic, MosaicId, NamespaceId, PublicAccount};
use std::io::Read;
use std::path::Path;

type Result = std::result::Result<(), Box<dyn std::error::Error>>;

const PRIVATE_KEY_VAR: &str = "SIRIUS_PRIVATE_KEY";

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Signing key from the environment, or prompted for without echo.
fn load_key_pair() -> std::result::Result<KeyPair, Box<dyn std::error::Error>> {
    let hex_key = match std::env::var(PRIVATE_KEY_VAR) {
        Ok(key) => key,
        Err(_) => rpassword::prompt_password("Private key: ")?,
    };
    if hex_key.trim().is_empty() {
        return Err("private key cannot be empty".into());
    }
    Ok(KeyPair::from_private_key_hex(hex_key.trim())?)
}

fn read_json(file: Option<&Path>) -> std::result::Result<serde_json::Value, Box<dyn std::error::Error>> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&text)?)
}

fn parse_recipient(ctx: &AppContext, s: &str) -> std::result::Result<Recipient, Box<dyn std::error::Error>> {
    if let Some(name) = s.strip_prefix('@') {
        return Ok(NamespaceId::from_name(name)?.into());
    }
    Ok(Address::from_raw_for_network(s, ctx.config.network_type)?.into())
}

/// `<id hex>:<amount>`
fn parse_mosaic(s: &str) -> std::result::Result<Mosaic, Box<dyn std::error::Error>> {
    let (id, amount) = s
        .split_once(':')
        .ok_or_else(|| format!("invalid mosaic {:?}, expected <id hex>:<amount>", s))?;
    let amount: u64 = amount.parse().map_err(|_| format!("invalid mosaic amount {:?}", amount))?;
    Ok(Mosaic::new(MosaicId::from_hex(id)?, amount))
}

fn print_transaction(tx: &Transaction, indent: &str) {
    println!("{}type:      {}", indent, tx.entity_type());
    println!("{}network:   {}", indent, tx.network_type());
    println!("{}version:   {}", indent, tx.version());
    match tx.signer() {
        Some(signer) => println!("{}signer:    {} ({})", indent, signer.public_key_hex(), signer.address()),
        None => println!("{}signer:    (none)", indent),
    }
    if let Some(info) = tx.info() {
        println!("{}height:    {}", indent, info.height());
        if let Some(hash) = info.hash().or_else(|| info.aggregate_hash()) {
            println!("{}hash:      {}", indent, hash);
        }
    }
}

// ─── Commands ───────────────────────────────────────────────────────────────

pub fn show_address(ctx: &AppContext, public_key: &str) -> Result {
    let account = PublicAccount::from_public_key(public_key, ctx.config.network_type)?;
    let address = account.address();
    println!("Address: {}", address.plain());
    println!("Pretty:  {}", address.pretty());
    println!("Encoded: {}", address.encoded());
    Ok(())
}

pub fn hash_payload(ctx: &AppContext, payload: &str) -> Result {
    let bytes = hex::decode(payload.trim())?;
    println!("{}", create_transaction_hash(&bytes, &ctx.generation_hash()?)?);
    Ok(())
}

pub fn verify_payload(ctx: &AppContext, payload: &str) -> Result {
    let bytes = hex::decode(payload.trim())?;
    verify_transaction(&bytes, &ctx.generation_hash()?)?;
    println!("Signature valid");
    Ok(())
}

pub fn decode(file: Option<&Path>) -> Result {
    let tx = Transaction::from_json(&read_json(file)?)?;
    print_transaction(&tx, "");
    println!("deadline:  {}", tx.deadline().instant());
    println!("max fee:   {}", tx.max_fee());

    if let TransactionBody::Aggregate(aggregate) = tx.body() {
        for (i, inner) in aggregate.inner_transactions().iter().enumerate() {
            println!("inner #{}:", i);
            print_transaction(inner, "  ");
        }
        for cosignature in aggregate.cosignatures() {
            println!("cosigned:  {}", cosignature.signer.public_key_hex());
        }
    }
    println!("payload:   {}", hex::encode_upper(tx.to_bytes()?));
    Ok(())
}

pub fn transfer(
    ctx: &AppContext,
    recipient: &str,
    mosaics: &[String],
    message: Option<&str>,
    max_fee: Option<u64>,
    deadline_hours: Option<u64>,
) -> Result {
    let generation_hash = ctx.generation_hash()?;
    let mosaics = mosaics.iter().map(|m| parse_mosaic(m)).collect::<std::result::Result<Vec<_>, _>>()?;
    let body = TransferBuilder::new()
        .set_recipient(parse_recipient(ctx, recipient)?)
        .set_mosaics(mosaics)
        .set_message(message.map(Message::plain).unwrap_or_default())
        .build()?;

    let mut builder = TransactionBuilder::from_config(&ctx.config);
    if let Some(fee) = max_fee {
        builder = builder.set_max_fee(fee);
    }
    if let Some(hours) = deadline_hours {
        builder = builder.set_deadline(Deadline::hours(hours));
    }
    let tx = builder.build(body)?;

    let key_pair = load_key_pair()?;
    let signed = tx.sign_with(&key_pair, &generation_hash)?;
    println!("{}", serde_json::to_string_pretty(&signed)?);
    Ok(())
}

pub fn cosign(file: Option<&Path>) -> Result {
    let tx = Transaction::from_json(&read_json(file)?)?;
    let to_cosign = CosignatureTransaction::new(tx)?;
    let key_pair = load_key_pair()?;
    if to_cosign.transaction().signed_by_account(&key_pair.public_account(to_cosign.transaction().network_type())) {
        log::warn!("{} has already signed this transaction", key_pair.public_key_hex());
    }
    let cosignature = to_cosign.sign_with(&key_pair);
    println!("{}", serde_json::to_string_pretty(&cosignature)?);
    Ok(())
}
