use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use walletlib_native_rpc::{ConfigError, HostConfig, HostManifest};

/// native-rpc - talk to a native wallet host over native messaging
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub host: HostArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub struct HostArgs {
    /// Native messaging host manifest describing the host to launch
    #[arg(long, env = "NATIVE_RPC_MANIFEST", conflicts_with = "host", required_unless_present = "host")]
    pub manifest: Option<PathBuf>,

    /// Host program to launch directly
    #[arg(long, env = "NATIVE_RPC_HOST")]
    pub host: Option<PathBuf>,

    /// Extra argument passed to the host program (repeatable)
    #[arg(long = "host-arg", allow_hyphen_values = true)]
    pub host_args: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the accounts known to the native host
    Accounts {
        /// Correlation id (a UUID is generated when omitted)
        #[arg(long)]
        id: Option<String>,
    },
    /// Sign one or more payloads with an account's key
    Sign {
        /// Base64-encoded address of the signing account
        #[arg(long)]
        address: String,

        /// Base64-encoded payload (repeatable, order is preserved)
        #[arg(long = "payload", required = true)]
        payloads: Vec<String>,

        /// Correlation id (a UUID is generated when omitted)
        #[arg(long)]
        id: Option<String>,
    },
}

impl HostArgs {
    pub fn host_config(&self) -> Result<HostConfig, ConfigError> {
        let mut config = match (&self.manifest, &self.host) {
            (Some(manifest), _) => HostConfig::from_manifest(&HostManifest::load(manifest)?),
            (None, Some(program)) => HostConfig::new(program.clone(), Vec::new()),
            (None, None) => return Err(ConfigError::MissingHost),
        };
        config.args.extend(self.host_args.iter().cloned());
        Ok(config)
    }
}
