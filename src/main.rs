mod cli;

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use walletlib_native_rpc::{
    Error, NativeHostProcess, SignPayloadsParams, send_native_get_accounts_request,
    send_native_sign_payloads_request,
};

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.host.host_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid host configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("Using native host {}", config.program.display());
    let host = NativeHostProcess::from_config(&config);

    let outcome = match cli.command {
        Command::Accounts { id } => send_native_get_accounts_request(&host, id)
            .await
            .map(|result| serde_json::to_string_pretty(&result)),
        Command::Sign { address, payloads, id } => {
            let params = SignPayloadsParams { address, payloads };
            send_native_sign_payloads_request(&host, params, id)
                .await
                .map(|result| serde_json::to_string_pretty(&result))
        }
    };

    match outcome {
        Ok(Ok(text)) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Ok(Err(e)) => {
            error!("Failed to format result as JSON: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn report(e: &Error) {
    match e {
        Error::Rpc(rpc) => error!(
            "Native host returned error {} for request {}: {}",
            rpc.code, rpc.json_rpc_id, rpc.message
        ),
        Error::Transport(cause) => error!("Native messaging failed: {}", cause),
        other => error!("Request failed: {}", other),
    }
}
