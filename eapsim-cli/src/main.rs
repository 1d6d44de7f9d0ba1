//! eapsim CLI tool
//!
//! Builds EAP identities from subscriber data and decodes captured SIM
//! authentication responses. Never talks to a SIM.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use eapsim_common::{init_logging, ClientConfig, EapMethod, LogLevel};
use eapsim_crypto::{ImsiEncryptionInfo, RsaOaepEncryptor};
use eapsim_identity::{
    build_anonymous_identity, build_encrypted_identity, build_identity, decorate_pseudonym,
    split_mcc_mnc,
};
use eapsim_usim::{
    decode_gsm_fixed_response, decode_gsm_response, decode_umts_response, response_bytes,
    GsmAuthRecord, SimAuthResponse,
};

#[derive(Parser, Debug)]
#[command(name = "eapsim")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// YAML client configuration
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level, overrides the configuration file
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the permanent identity, optionally encrypted
    Identity {
        #[arg(short = 'm', long = "method", value_enum)]
        method: Method,
        #[arg(short = 'i', long = "imsi")]
        imsi: String,
        /// Operator numeric; derived from the IMSI when omitted
        #[arg(short = 'o', long = "mcc-mnc", default_value = "")]
        mcc_mnc: String,
        /// Carrier public key (PEM SubjectPublicKeyInfo)
        #[arg(short = 'k', long = "key", value_name = "PEM")]
        key: Option<PathBuf>,
        #[arg(long = "key-id", requires = "key")]
        key_id: Option<String>,
    },
    /// Build the anonymous identity
    Anonymous {
        #[arg(short = 'm', long = "method", value_enum)]
        method: Method,
        #[arg(short = 'o', long = "mcc-mnc")]
        mcc_mnc: String,
        /// Prepend the EAP method prefix
        #[arg(short = 'p', long = "prefix")]
        prefix: bool,
    },
    /// Append the 3GPP realm to a pseudonym
    Pseudonym {
        pseudonym: String,
        #[arg(short = 'o', long = "mcc-mnc")]
        mcc_mnc: String,
    },
    /// Decode a length-prefixed GSM response
    DecodeGsm { response: String },
    /// Decode a fixed 12-byte GSM response
    DecodeGsmFixed { response: String },
    /// Decode a tagged UMTS response
    DecodeUmts { response: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Method {
    Sim,
    Aka,
    AkaPrime,
}

impl From<Method> for EapMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Sim => EapMethod::Sim,
            Method::Aka => EapMethod::Aka,
            Method::AkaPrime => EapMethod::AkaPrime,
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ClientConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ClientConfig::default(),
    };
    init_logging(args.log_level.unwrap_or(config.log_level));
    debug!(carriers = config.carriers.len(), "Configuration loaded");

    match args.command {
        Command::Identity {
            method,
            imsi,
            mcc_mnc,
            key,
            key_id,
        } => {
            let identity = build_identity(method.into(), &imsi, &mcc_mnc)
                .context("Failed to build identity")?;
            println!("identity: {}", identity);

            if let Some(path) = key {
                let pem = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read key {}", path.display()))?;
                let info = ImsiEncryptionInfo::from_pem(&pem, key_id)
                    .context("Failed to parse carrier key")?;
                let encrypted = build_encrypted_identity(&identity, &info, &RsaOaepEncryptor)
                    .context("Failed to encrypt identity")?;
                println!("encrypted: {}", encrypted.escape_default());
            }
        }
        Command::Anonymous {
            method,
            mcc_mnc,
            prefix,
        } => {
            let (mcc, mnc) = split_mcc_mnc(&mcc_mnc)?;
            println!("{}", build_anonymous_identity(method.into(), mcc, mnc, prefix));
        }
        Command::Pseudonym { pseudonym, mcc_mnc } => {
            let (mcc, mnc) = split_mcc_mnc(&mcc_mnc)?;
            match decorate_pseudonym(&pseudonym, mcc, mnc) {
                Some(decorated) => println!("{}", decorated),
                None => bail!("Pseudonym is empty"),
            }
        }
        Command::DecodeGsm { response } => {
            let data = response_bytes(Some(response.as_str()))?;
            print_gsm(&decode_gsm_response(&data).context("Invalid GSM response")?);
        }
        Command::DecodeGsmFixed { response } => {
            let data = response_bytes(Some(response.as_str()))?;
            print_gsm(&decode_gsm_fixed_response(&data).context("Invalid GSM response")?);
        }
        Command::DecodeUmts { response } => {
            let data = response_bytes(Some(response.as_str()))?;
            let result = decode_umts_response(&data).context("Invalid UMTS response")?;
            println!("{}", SimAuthResponse::from(result));
        }
    }

    Ok(())
}

fn print_gsm(record: &GsmAuthRecord) {
    println!("sres: {}", record.sres);
    println!("kc:   {}", record.kc);
    println!("{}", SimAuthResponse::gsm(record.to_string()));
}
