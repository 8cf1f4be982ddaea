//! Port report example: read the state of a few ports as JSON
//!
//! Connects to an Eltex MES switch, prints its firmware version and, for
//! each requested port, the link state, switchport settings and PoE
//! parameters.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example port_report -- --host 192.168.1.10 --password secret 1 12 1001
//! ```
//!
//! Ports are numbers (`12` is `gi 1/0/12`, `1001` is `te 1/0/1`) or
//! interface names as the switch writes them (`"po 1"`).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use commutator::{Port, PoeQuery, SwitchBuilder, VlanQuery};
use serde_json::{Value, json};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.ports.is_empty() {
        eprintln!("Error: no ports given");
        std::process::exit(1);
    }

    let mut builder = SwitchBuilder::new(&args.host)
        .port(args.port)
        .username(&args.user)
        .timeout(Duration::from_secs(args.timeout))
        .danger_disable_host_key_verification();

    if let Some(password) = &args.password {
        builder = builder.password(password);
    } else if let Some(key_path) = &args.key {
        builder = builder.private_key(key_path);
    }

    let mut switch = builder.connect().await?;
    println!("Connected to {switch}");

    let firmware = switch.firmware_version().await?;
    let mut ports = Vec::new();

    for port in args.ports {
        // Report failures per port instead of stopping the whole run.
        let link = match switch.link_state(port.clone()).await {
            Ok(state) => json!(state),
            Err(e) => json!({ "error": e.to_string() }),
        };
        let vlan = match switch.get_vlan(port.clone(), VlanQuery::Settings).await {
            Ok(info) => json!(info),
            Err(e) => json!({ "error": e.to_string() }),
        };
        let poe = match switch.get_poe(port.clone(), PoeQuery::Params).await {
            Ok(status) => json!(status),
            Err(e) => json!({ "error": e.to_string() }),
        };

        ports.push(json!({
            "port": port.to_string(),
            "link": link,
            "vlan": vlan,
            "poe": poe,
        }));
    }

    let report: Value = json!({
        "host": switch.info().host,
        "firmware": firmware,
        "ports": ports,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    switch.close().await;
    Ok(())
}

/// Simple argument parser (avoiding external dependencies)
struct Args {
    host: String,
    port: u16,
    user: String,
    password: Option<String>,
    key: Option<PathBuf>,
    timeout: u64,
    ports: Vec<Port>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut host = "192.168.1.10".to_string();
        let mut port = 22u16;
        let mut user = commutator::switch::DEFAULT_LOGIN.to_string();
        let mut password = None;
        let mut key = None;
        let mut timeout = 30u64;
        let mut ports = Vec::new();

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
                        port = args[i].parse().unwrap_or(22);
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
                        password = Some(args[i].clone());
                    }
                }
                "--key" | "-k" => {
                    i += 1;
                    if i < args.len() {
                        key = Some(PathBuf::from(&args[i]));
                    }
                }
                "--timeout" | "-t" => {
                    i += 1;
                    if i < args.len() {
                        timeout = args[i].parse().unwrap_or(30);
                    }
                }
                "--help" => {
                    Self::print_help();
                    std::process::exit(0);
                }
                other => match other.parse::<u32>() {
                    Ok(n) => ports.push(Port::Number(n)),
                    Err(_) => ports.push(Port::from(other)),
                },
            }
            i += 1;
        }

        Self {
            host,
            port,
            user,
            password,
            key,
            timeout,
            ports,
        }
    }

    fn print_help() {
        println!(
            r#"commutator port_report example

USAGE:
    cargo run --example port_report -- [OPTIONS] <PORT>...

OPTIONS:
    -h, --host <HOST>        Switch address [default: 192.168.1.10]
    -p, --port <PORT>        SSH port [default: 22]
    -u, --user <USER>        Username [default: admin]
    -P, --password <PASS>    Password [default: admin]
    -k, --key <PATH>         Path to SSH private key
    -t, --timeout <SECS>     Connection timeout [default: 30]
    --help                   Print this help message

EXAMPLES:
    # Access ports 1 and 12, first 10G uplink
    cargo run --example port_report -- --host 10.0.0.2 --password secret 1 12 1001

    # Port-channel by name
    cargo run --example port_report -- --host 10.0.0.2 "po 1"
"#
        );
    }
}
