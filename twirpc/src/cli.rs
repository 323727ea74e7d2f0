//! # CLI
//!
//! This module defines the command-line interface of `twirpc` using `clap`.
//!
//! It is responsible for parsing user input and performing validation (e.g., ensuring headers are `key:value`);
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "twirpc", version, about = "Dynamic Twirp CLI")]
pub struct Cli {
    /// Path to the descriptor set (.bin) describing the services
    #[arg(short = 'd', long)]
    pub file_descriptor_set: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Perform a Twirp call to a server
    ///
    /// This command sends a Protobuf request built from a JSON body and prints the response as JSON.
    ///
    /// ## Examples:
    ///
    /// ```bash
    /// twirpc -d descriptor.bin call http://localhost:8080 my.pkg.Service/Method --body '{"key": "value"}'
    /// ```
    Call {
        /// The server URL to send the request to (e.g. http://localhost:8080)
        url: String,
        /// Endpoint (package.Service/Method)
        #[arg(value_parser = parse_endpoint)]
        endpoint: (String, String),
        /// JSON body matching the method's input message
        #[arg(long, value_parser = parse_body, default_value = "{}")]
        body: serde_json::Value,

        #[arg(short = 'H', long = "header", value_parser = parse_header)]
        headers: Vec<(String, String)>,

        /// Path prefix the server routes Twirp requests under
        #[arg(long, default_value = "/twirp")]
        prefix: String,
    },

    /// List available services or other resources
    List {
        #[command(subcommand)]
        sub: ListCommands,
    },

    /// Describe a service or a method in detail
    Describe {
        #[command(subcommand)]
        sub: DescribeCommands,
    },
}

#[derive(Subcommand)]
pub enum ListCommands {
    /// List all services defined in the descriptor set
    Services,
}

#[derive(Subcommand)]
pub enum DescribeCommands {
    /// Describe a specific service (list its methods)
    Service {
        /// Fully qualified service name (e.g. my.package.Service)
        service: String,
    },
    /// Describe a specific method (Show method definition)
    Method {
        /// Fully qualified method name (e.g. my.package.Service/Method)
        #[arg(value_parser = parse_endpoint)]
        method: (String, String),
    },
    /// Describe a specific message (show definition and dependencies)
    Message {
        /// Fully qualified message name (e.g. my.package.Message)
        message: String,
        /// Recursively describe all dependencies (nested messages and enums)
        #[arg(short, long)]
        recursive: bool,
    },
}

fn parse_endpoint(value: &str) -> Result<(String, String), String> {
    let (service, method) = value.split_once('/').ok_or_else(|| {
        format!("Invalid endpoint format: '{value}'. Expected 'package.Service/Method'",)
    })?;

    if service.trim().is_empty() || method.trim().is_empty() {
        return Err("Service and Method names cannot be empty".to_string());
    }

    Ok((service.to_string(), method.to_string()))
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    s.split_once(':')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| "Format must be 'key:value'".to_string())
}

fn parse_body(value: &str) -> Result<serde_json::Value, String> {
    serde_json::from_str(value).map_err(|e| format!("Invalid JSON: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_call_command() {
        let cli = Cli::try_parse_from([
            "twirpc",
            "-d",
            "descriptor.bin",
            "call",
            "http://localhost:8080",
            "twirp.clientcompat.CompatService/Method",
            "--body",
            r#"{"v": "1"}"#,
            "-H",
            "x-request-id: abc",
        ])
        .unwrap();

        assert_eq!(cli.file_descriptor_set, PathBuf::from("descriptor.bin"));
        match cli.command {
            Commands::Call {
                url,
                endpoint,
                body,
                headers,
                prefix,
            } => {
                assert_eq!(url, "http://localhost:8080");
                assert_eq!(
                    endpoint,
                    (
                        "twirp.clientcompat.CompatService".to_string(),
                        "Method".to_string()
                    )
                );
                assert_eq!(body, serde_json::json!({ "v": "1" }));
                assert_eq!(headers, vec![("x-request-id".to_string(), "abc".to_string())]);
                assert_eq!(prefix, "/twirp");
            }
            _ => panic!("Expected call command"),
        }
    }

    #[test]
    fn body_defaults_to_empty_object() {
        let cli = Cli::try_parse_from([
            "twirpc",
            "-d",
            "descriptor.bin",
            "call",
            "http://localhost:8080",
            "pkg.Service/Method",
        ])
        .unwrap();

        match cli.command {
            Commands::Call { body, .. } => assert_eq!(body, serde_json::json!({})),
            _ => panic!("Expected call command"),
        }
    }

    #[test]
    fn descriptor_set_is_required() {
        let err = Cli::try_parse_from(["twirpc", "list", "services"])
            .err()
            .unwrap();

        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn rejects_malformed_arguments() {
        assert!(parse_endpoint("no-slash").is_err());
        assert!(parse_endpoint("/Method").is_err());
        assert!(parse_header("no-colon").is_err());
        assert!(parse_body("{not json").is_err());
    }
}
