//! Script example: run a file of CLI commands on a switch
//!
//! Lines starting with `wr` save the configuration and answer the
//! confirmation. A line starting with `rel` reloads the switch and ends the
//! script. Blank lines are skipped.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example run_script -- --host 192.168.1.10 --password secret commands.txt
//! ```
//!
//! With `--echo`, the output of every command is logged.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use commutator::SwitchBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let Some(script) = args.script else {
        eprintln!("Error: no script file given");
        std::process::exit(1);
    };

    let mut builder = SwitchBuilder::new(&args.host)
        .port(args.port)
        .username(&args.user)
        .timeout(Duration::from_secs(args.timeout))
        .echo(args.echo)
        .danger_disable_host_key_verification();

    if let Some(password) = &args.password {
        builder = builder.password(password);
    }

    let mut switch = builder.connect().await?;
    println!("Running {} on {}", script.display(), switch);

    let outcome = switch.execute_file(&script).await;
    switch.close().await;

    let outcome = outcome?;
    println!("{} line(s) executed", outcome.executed);
    if outcome.reloaded {
        println!("Switch is reloading");
    }

    Ok(())
}

/// Simple argument parser (avoiding external dependencies)
struct Args {
    host: String,
    port: u16,
    user: String,
    password: Option<String>,
    timeout: u64,
    echo: bool,
    script: Option<PathBuf>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut host = "192.168.1.10".to_string();
        let mut port = 22u16;
        let mut user = commutator::switch::DEFAULT_LOGIN.to_string();
        let mut password = None;
        let mut timeout = 30u64;
        let mut echo = false;
        let mut script = None;

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
                "--timeout" | "-t" => {
                    i += 1;
                    if i < args.len() {
                        timeout = args[i].parse().unwrap_or(30);
                    }
                }
                "--echo" | "-e" => echo = true,
                "--help" => {
                    Self::print_help();
                    std::process::exit(0);
                }
                path => script = Some(PathBuf::from(path)),
            }
            i += 1;
        }

        Self {
            host,
            port,
            user,
            password,
            timeout,
            echo,
            script,
        }
    }

    fn print_help() {
        println!(
            r#"commutator run_script example

USAGE:
    cargo run --example run_script -- [OPTIONS] <FILE>

OPTIONS:
    -h, --host <HOST>        Switch address [default: 192.168.1.10]
    -p, --port <PORT>        SSH port [default: 22]
    -u, --user <USER>        Username [default: admin]
    -P, --password <PASS>    Password [default: admin]
    -t, --timeout <SECS>     Response timeout [default: 30]
    -e, --echo               Log the output of every command
    --help                   Print this help message
"#
        );
    }
}
