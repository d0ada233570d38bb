use anyhow::{bail, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

use intent_compiler::{CompileError, IntentCompiler};
use line_transport::{LineChannel, MockChannel};

mod lcd;

/// Delay between scroll frames so the LCD stays readable.
const SCROLL_DELAY: Duration = Duration::from_millis(300);

#[derive(Parser, Debug)]
#[command(
    name = "lumen",
    version,
    about = "Natural-language controller for an LED strip and relay board",
    disable_help_subcommand = true
)]
struct Cli {
    /// Use the in-memory mock channel instead of a serial port
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    mock: bool,

    /// Ask the model oracle when rule extraction finds no intent
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    fallback: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive loop: type a request, watch the wire commands go out
    Repl {
        /// Serial port to drive (e.g., /dev/ttyUSB0)
        #[arg(long, default_value = "/dev/ttyUSB0")]
        port: String,
    },
    /// Compile one utterance and print the wire commands without sending
    Compile {
        /// The request, as free-form words
        text: Vec<String>,
        /// Print a JSON report instead of raw lines
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },
    /// List available ports
    Ports,
}

fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Repl { port } => repl(cli.mock, cli.fallback, &port),
        Commands::Compile { text, json } => compile_once(&text.join(" "), json, cli.fallback),
        Commands::Ports => list_ports(cli.mock),
    }
}

fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn open_channel(mock: bool, port: &str) -> Result<Box<dyn LineChannel>> {
    if mock {
        return Ok(Box::new(MockChannel::open(port)?));
    }
    #[cfg(feature = "serial")]
    {
        return Ok(Box::new(line_transport::SerialChannel::open(port)?));
    }
    #[cfg(not(feature = "serial"))]
    {
        let _ = port;
        bail!("built without the serial feature; pass --mock")
    }
}

fn list_ports(mock: bool) -> Result<()> {
    let ports = if mock {
        MockChannel::list()?
    } else {
        #[cfg(feature = "serial")]
        {
            line_transport::SerialChannel::list()?
        }
        #[cfg(not(feature = "serial"))]
        {
            bail!("built without the serial feature; pass --mock")
        }
    };
    for port in ports {
        println!("{}\t{}", port.name, port.driver);
    }
    Ok(())
}

fn compile_once(text: &str, json: bool, fallback: bool) -> Result<()> {
    let compiler = IntentCompiler::new();
    match compiler.compile(text) {
        Ok(out) => {
            if json {
                let report = serde_json::json!({
                    "input": text,
                    "commands": out.commands,
                    "diagnostics": out.diagnostics.iter().map(|d| d.to_string()).collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for cmd in &out.commands {
                    println!("{cmd}");
                }
            }
            Ok(())
        }
        Err(CompileError::NoIntentFound) => {
            if fallback {
                if let Some(commands) = oracle_commands(text) {
                    for cmd in &commands {
                        println!("{cmd}");
                    }
                    return Ok(());
                }
            }
            bail!("no intent found in: {text}")
        }
    }
}

fn repl(mock: bool, fallback: bool, port: &str) -> Result<()> {
    let mut channel = open_channel(mock, port)?;
    let compiler = IntentCompiler::new();

    println!("lumen ready. Type a request, or 'exit' to quit.");
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            break;
        }

        let commands = match compiler.compile(line) {
            Ok(out) => {
                for diag in &out.diagnostics {
                    warn!(%diag, "compile diagnostic");
                }
                out.commands
            }
            Err(CompileError::NoIntentFound) => {
                match fallback.then(|| oracle_commands(line)).flatten() {
                    Some(commands) => commands,
                    None => {
                        println!("(no intent recognized)");
                        continue;
                    }
                }
            }
        };

        send_all(channel.as_mut(), &commands);
    }
    Ok(())
}

/// Send each command, scrolling wide LCD payloads. A failed send is logged
/// and the rest of the batch still goes out.
fn send_all(channel: &mut dyn LineChannel, commands: &[String]) {
    for cmd in commands {
        let frames = lcd::expand_command(cmd);
        let scrolling = frames.len() > 1;
        for frame in frames {
            if let Err(e) = channel.send_line(&frame) {
                warn!(command = %frame, error = %e, "send failed");
                break;
            }
            println!("  -> {frame}");
            if scrolling {
                thread::sleep(SCROLL_DELAY);
            }
        }
        match channel.drain_echo() {
            Ok(echo) => {
                for line in echo {
                    debug!(%line, "device echo");
                }
            }
            Err(e) => warn!(error = %e, "echo drain failed"),
        }
    }
}

/// Ask the model oracle when rules find nothing. Without the `ollama`
/// feature the `--fallback` flag is a no-op.
#[cfg(feature = "ollama")]
fn oracle_commands(text: &str) -> Option<Vec<String>> {
    use intent_compiler::CommandSet;
    use llm_fallback::{IntentOracle, OllamaClient};
    use tracing::info;

    let client = match OllamaClient::new() {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "oracle unavailable");
            return None;
        }
    };
    let intent = match client.infer(text) {
        Ok(intent) => intent,
        Err(e) => {
            info!(error = %e, "oracle found nothing");
            return None;
        }
    };
    let set: CommandSet = intent.into_slots().into_iter().collect();
    if set.is_empty() {
        return None;
    }
    let mut diagnostics = Vec::new();
    let commands = intent_compiler::emit(&set, &mut diagnostics);
    for diag in &diagnostics {
        warn!(%diag, "oracle diagnostic");
    }
    (!commands.is_empty()).then_some(commands)
}

#[cfg(not(feature = "ollama"))]
fn oracle_commands(_text: &str) -> Option<Vec<String>> {
    warn!("--fallback requested but this build has no ollama feature");
    None
}
