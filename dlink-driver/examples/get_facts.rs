//! Facts Retrieval Example
//!
//! Connects to a D-Link switch, prints its facts, ARP table and MAC
//! table as JSON, then disconnects.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example get_facts -- --host 10.90.90.90 --user admin --password secret --transport telnet
//! ```

use std::env;
use std::time::Duration;

use dlink_driver::{ConfigSource, DriverBuilder, NetworkDriver, TransportKind};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    println!(
        "Connecting to {}:{} over {}...",
        args.host,
        args.port
            .map(|p| p.to_string())
            .unwrap_or_else(|| "default".to_string()),
        args.transport
    );

    let mut builder = DriverBuilder::new(&args.host)
        .username(&args.user)
        .password(&args.password)
        .transport(args.transport)
        .timeout(Duration::from_secs(args.timeout));

    if let Some(port) = args.port {
        builder = builder.port(port);
    }

    let mut driver = builder.build()?;

    driver.open().await?;
    println!("Connected!\n");

    println!("--- Facts ---");
    let facts = driver.get_facts().await?;
    println!("{}", serde_json::to_string_pretty(&facts)?);

    println!("\n--- ARP table ---");
    let arp = driver.get_arp_table().await?;
    println!("{}", serde_json::to_string_pretty(&arp)?);

    println!("\n--- MAC address table ---");
    let fdb = driver.get_mac_address_table().await?;
    println!("{}", serde_json::to_string_pretty(&fdb)?);

    println!("\n--- Running config (first 20 lines) ---");
    let config = driver.get_config(ConfigSource::Running).await?;
    for line in config.running.lines().take(20) {
        println!("{line}");
    }

    driver.close().await?;
    println!("\nDone!");

    Ok(())
}

/// Simple argument parser
struct Args {
    host: String,
    port: Option<u16>,
    user: String,
    password: String,
    timeout: u64,
    transport: TransportKind,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut host = "10.90.90.90".to_string();
        let mut port = None;
        let mut user = "admin".to_string();
        let mut password = String::new();
        let mut timeout = 60u64;
        let mut transport = TransportKind::Ssh;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--host" | "-h" => {
                    i += 1;
                    if i < args.len() {
                        host = args[i].clone();
                    }
                }
                "--port" | "-p" => {
                    i += 1;
                    if i < args.len() {
                        port = args[i].parse().ok();
                    }
                }
                "--user" | "-u" => {
                    i += 1;
                    if i < args.len() {
                        user = args[i].clone();
                    }
                }
                "--password" | "-P" => {
                    i += 1;
                    if i < args.len() {
                        password = args[i].clone();
                    }
                }
                "--timeout" | "-t" => {
                    i += 1;
                    if i < args.len() {
                        timeout = args[i].parse().unwrap_or(60);
                    }
                }
                "--transport" => {
                    i += 1;
                    if i < args.len() {
                        transport = match args[i].as_str() {
                            "telnet" => TransportKind::Telnet,
                            _ => TransportKind::Ssh,
                        };
                    }
                }
                "--help" => {
                    Self::print_help();
                    std::process::exit(0);
                }
                _ => {}
            }
            i += 1;
        }

        Self {
            host,
            port,
            user,
            password,
            timeout,
            transport,
        }
    }

    fn print_help() {
        println!(
            r#"dlink-driver facts example

USAGE:
    cargo run --example get_facts -- [OPTIONS]

OPTIONS:
    -h, --host <HOST>          Target switch [default: 10.90.90.90]
    -p, --port <PORT>          TCP port [default: 22 for ssh, 23 for telnet]
    -u, --user <USER>          Username [default: admin]
    -P, --password <PASS>      Password
    -t, --timeout <SECS>       Connection timeout [default: 60]
    --transport <TRANSPORT>    ssh or telnet [default: ssh]
    --help                     Print this help message

EXAMPLES:
    cargo run --example get_facts -- \
        --host 10.90.90.90 --user admin --password secret --transport telnet

    # With debug logging
    RUST_LOG=debug cargo run --example get_facts -- \
        --host 10.90.90.90 --user admin --password secret
"#
        );
    }
}
