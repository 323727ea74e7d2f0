//! # Twirpc CLI Entry Point
//!
//! The main executable for the Twirpc tool. This file drives the application lifecycle:
//!
//! 1. **Initialization**: Parses command-line arguments using [`cli::Cli`] and installs the
//!    log subscriber (`RUST_LOG`, defaulting to warnings only).
//! 2. **Schema**: Loads the `FileDescriptorSet` describing the target services.
//! 3. **Execution**: Delegates the request processing to the `DynamicClient`.
//! 4. **Presentation**: Formats and prints the resulting data or error to standard output/error.

mod cli;
mod formatter;

use clap::Parser;
use cli::{Cli, Commands, DescribeCommands, ListCommands};
use formatter::{ExpandedMessage, FormattedString, GenericError, ServiceList};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;
use twirpc_core::TwirpClient;
use twirpc_core::client::{Descriptor, DynamicClient, DynamicRequest, Offline};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "twirpc=warn,twirpc_core=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let client = load_schema_or_exit(args.file_descriptor_set);

    match args.command {
        Commands::Call {
            url,
            endpoint,
            body,
            headers,
            prefix,
        } => {
            let (service, method) = endpoint;
            run_call(client, url, prefix, service, method, body, headers).await;
        }
        Commands::List { sub } => match sub {
            ListCommands::Services => list_services(&client),
        },
        Commands::Describe { sub } => match sub {
            DescribeCommands::Service { service } => describe_symbol(&client, &service),
            DescribeCommands::Method { method } => {
                let (service, method_name) = method;
                describe_method(&client, &service, &method_name)
            }
            DescribeCommands::Message { message, recursive } => {
                describe_message(&client, &message, recursive)
            }
        },
    }
}

fn exit_with(message: FormattedString) -> ! {
    eprintln!("{message}");
    process::exit(1);
}

fn load_schema_or_exit(path: PathBuf) -> DynamicClient<Offline> {
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) => exit_with(FormattedString::from(err)),
    };

    match DynamicClient::offline(bytes) {
        Ok(client) => client,
        Err(err) => exit_with(FormattedString::from(err)),
    }
}

fn list_services(client: &DynamicClient<Offline>) {
    println!("{}", FormattedString::from(ServiceList(client.list_services())));
}

fn resolve_or_exit(client: &DynamicClient<Offline>, symbol: &str) -> Descriptor {
    match client.get_descriptor_by_symbol(symbol) {
        Some(descriptor) => descriptor,
        None => exit_with(FormattedString::from(GenericError(
            "Symbol Lookup Failed",
            format!("Descriptor at path '{symbol}' not found"),
        ))),
    }
}

fn describe_symbol(client: &DynamicClient<Offline>, symbol: &str) {
    let descriptor = resolve_or_exit(client, symbol);
    println!("{}", FormattedString::from(descriptor));
}

fn describe_method(client: &DynamicClient<Offline>, service_name: &str, method_name: &str) {
    let method = resolve_or_exit(client, service_name)
        .service_descriptor()
        .and_then(|service| service.methods().find(|m| m.name() == method_name));

    match method {
        Some(method) => println!("{}", FormattedString::from(method)),
        None => exit_with(FormattedString::from(GenericError(
            "Symbol Lookup Failed",
            format!("Method '{service_name}/{method_name}' not found"),
        ))),
    }
}

fn describe_message(client: &DynamicClient<Offline>, message_name: &str, recursive: bool) {
    let Some(message) = resolve_or_exit(client, message_name)
        .message_descriptor()
        .cloned()
    else {
        exit_with(FormattedString::from(GenericError(
            "Symbol Lookup Failed",
            format!("'{message_name}' is not a message"),
        )));
    };

    if recursive {
        println!("{}", FormattedString::from(ExpandedMessage(message)));
    } else {
        println!("{}", FormattedString::from(message));
    }
}

async fn run_call(
    client: DynamicClient<Offline>,
    url: String,
    prefix: String,
    service: String,
    method: String,
    body: serde_json::Value,
    headers: Vec<(String, String)>,
) {
    let client = client.connect(TwirpClient::new(url).with_prefix(&prefix));

    let request = DynamicRequest {
        body,
        headers,
        service,
        method,
    };

    match client.dynamic(request).await {
        Ok(Ok(value)) => println!("{}", FormattedString::from(value)),
        Ok(Err(err)) => println!("{}", FormattedString::from(err)),
        Err(err) => exit_with(FormattedString::from(err)),
    }
}
