//! zbz-signer: off-chain verifier tooling for the Zombiezoo collection.
//!
//! Produces the fingerprints, signatures and Merkle data the collection checks
//! on mint. Results are printed as JSON on stdout.

#![allow(missing_docs, rustdoc::missing_crate_level_docs)]

use alloy_primitives::{hex, Address, Bytes, B256, U256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use clap::{Parser, Subcommand};
use eyre::{eyre, WrapErr};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use zbz_collection::{authorizer::recover_signer, order_hash, ActivationConfig, MerkleTree};

/// Verifier tooling for Zombiezoo mint authorizations.
#[derive(Parser, Debug)]
#[command(name = "zbz-signer", about = "Zombiezoo mint authorization tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the authorization fingerprint for a minter and salt
    Fingerprint(OrderArgs),
    /// Sign a mint authorization with the verifier key
    Sign {
        #[command(flatten)]
        order: OrderArgs,
        /// Hex-encoded verifier private key
        #[arg(long, env = "ZBZ_VERIFIER_KEY", hide_env_values = true)]
        key: String,
    },
    /// Recover the signer of a mint authorization
    Recover {
        #[command(flatten)]
        order: OrderArgs,
        /// 65-byte signature, hex encoded
        #[arg(long)]
        signature: Bytes,
    },
    /// Compute the presale Merkle root for an address list
    MerkleRoot(AllowlistArgs),
    /// Print the presale Merkle proof for one address
    MerkleProof {
        #[command(flatten)]
        allowlist: AllowlistArgs,
        /// Address to prove membership for
        #[arg(long)]
        account: Address,
    },
    /// Validate the activation settings read from `ZBZ_*` environment variables
    Activation,
}

#[derive(clap::Args, Debug)]
struct OrderArgs {
    /// Minter address the authorization is bound to
    #[arg(long)]
    minter: Address,
    /// Salt, decimal or 0x-prefixed hex
    #[arg(long)]
    salt: U256,
}

#[derive(clap::Args, Debug)]
struct AllowlistArgs {
    /// File with one address per line; blank lines and `#` comments are skipped
    #[arg(long, conflicts_with = "addresses", required_unless_present = "addresses")]
    file: Option<PathBuf>,
    /// Comma-separated addresses
    #[arg(long, value_delimiter = ',')]
    addresses: Vec<Address>,
}

impl AllowlistArgs {
    fn load(&self) -> eyre::Result<Vec<Address>> {
        match &self.file {
            Some(path) => read_address_file(path),
            None => Ok(self.addresses.clone()),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Fingerprint {
    minter: Address,
    salt: U256,
    fingerprint: B256,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SignedAuthorization {
    minter: Address,
    salt: U256,
    fingerprint: B256,
    verifier: Address,
    signature: Bytes,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Recovered {
    fingerprint: B256,
    signer: Address,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Allowlist {
    root: B256,
    leaves: usize,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Membership {
    root: B256,
    account: Address,
    proof: Vec<B256>,
}

fn read_address_file(path: &Path) -> eyre::Result<Vec<Address>> {
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read address list {}", path.display()))?;
    parse_address_list(&contents)
}

fn parse_address_list(contents: &str) -> eyre::Result<Vec<Address>> {
    contents
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.split('#').next().unwrap_or_default().trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_no, line)| {
            line.parse::<Address>()
                .wrap_err_with(|| format!("line {line_no}: invalid address {line:?}"))
        })
        .collect()
}

fn sign_authorization(
    signer: &PrivateKeySigner,
    minter: Address,
    salt: U256,
) -> eyre::Result<SignedAuthorization> {
    let fingerprint = order_hash(minter, salt);
    let signature = signer.sign_message_sync(fingerprint.as_slice())?;
    Ok(SignedAuthorization {
        minter,
        salt,
        fingerprint,
        verifier: signer.address(),
        signature: Bytes::from(signature.as_bytes().to_vec()),
    })
}

fn membership(accounts: &[Address], account: Address) -> eyre::Result<Membership> {
    let tree = MerkleTree::from_addresses(accounts);
    let proof = tree.proof_for(account).ok_or_else(|| eyre!("{account} is not in the allowlist"))?;
    Ok(Membership { root: tree.root(), account, proof })
}

fn print_json<T: Serialize>(value: &T) -> eyre::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn run(cli: Cli) -> eyre::Result<()> {
    match cli.command {
        Command::Fingerprint(OrderArgs { minter, salt }) => {
            print_json(&Fingerprint { minter, salt, fingerprint: order_hash(minter, salt) })
        }
        Command::Sign { order, key } => {
            let signer: PrivateKeySigner =
                key.trim().parse().wrap_err("invalid verifier private key")?;
            let signed = sign_authorization(&signer, order.minter, order.salt)?;
            info!(minter = ?signed.minter, verifier = ?signed.verifier, "authorization signed");
            print_json(&signed)
        }
        Command::Recover { order, signature } => {
            let fingerprint = order_hash(order.minter, order.salt);
            let signer = recover_signer(&fingerprint, &signature).map_err(|err| {
                eyre!("cannot recover signer from {}: {err}", hex::encode_prefixed(&signature))
            })?;
            print_json(&Recovered { fingerprint, signer })
        }
        Command::MerkleRoot(allowlist) => {
            let accounts = allowlist.load()?;
            let tree = MerkleTree::from_addresses(&accounts);
            info!(leaves = tree.len(), root = %tree.root(), "allowlist root computed");
            print_json(&Allowlist { root: tree.root(), leaves: tree.len() })
        }
        Command::MerkleProof { allowlist, account } => {
            print_json(&membership(&allowlist.load()?, account)?)
        }
        Command::Activation => {
            let config = ActivationConfig::from_env()?;
            config.validate()?;
            print_json(&config)
        }
    }
}

fn main() -> eyre::Result<()> {
    init_tracing();
    run(Cli::parse())
}
