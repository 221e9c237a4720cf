//! RustMETS command-line tool.
//!
//! # Usage
//!
//! ```text
//! rustmets check <file>              print validation findings, exit 1 if any
//! rustmets normalize <in> [<out>]    read then rewrite (stdout without <out>)
//! rustmets dump <file>               print the document model as JSON
//! rustmets skeleton [<objid>]        print a minimal valid document
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RUSTMETS_INDENT` | `2` | Spaces per indentation level (0 = compact) |
//! | `RUSTMETS_XML_DECLARATION` | `true` | Emit the XML declaration |
//! | `RUSTMETS_SCHEMA_LOCATION` | METS schema | Value of `xsi:schemaLocation` |
//! | `RUSTMETS_MAX_DEPTH` | `512` | Maximum element nesting on read |
//! | `RUSTMETS_ID_LENGTH` | `8` | Length of minted identifiers |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use rustmets_core::{IdGenerator, MetsIo, RustMetsConfig, validate};
use rustmets_model::{Agent, AgentRole, AgentType, Mets, MetsHeader};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: rustmets <check|normalize|dump|skeleton> [args]";

/// Agent name recorded in generated headers.
const AGENT_NAME: &str = "rustmets";

/// A parsed command line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Check { input: PathBuf },
    Normalize { input: PathBuf, output: Option<PathBuf> },
    Dump { input: PathBuf },
    Skeleton { objid: Option<String> },
}

impl Command {
    fn parse(args: &[String]) -> Result<Self> {
        let (name, rest) = args.split_first().context(USAGE)?;
        let command = match (name.as_str(), rest) {
            ("check", [input]) => Self::Check {
                input: input.into(),
            },
            ("normalize", [input]) => Self::Normalize {
                input: input.into(),
                output: None,
            },
            ("normalize", [input, output]) => Self::Normalize {
                input: input.into(),
                output: Some(output.into()),
            },
            ("dump", [input]) => Self::Dump {
                input: input.into(),
            },
            ("skeleton", []) => Self::Skeleton { objid: None },
            ("skeleton", [objid]) => Self::Skeleton {
                objid: Some(objid.clone()),
            },
            _ => bail!("{USAGE}"),
        };
        Ok(command)
    }
}

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
/// Logs go to stderr so documents written to stdout stay clean.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// A minimal document: minted `ID`, optional `OBJID` and a header naming
/// this tool as creator.
fn skeleton(objid: Option<String>, ids: &mut IdGenerator) -> Result<Mets> {
    let mut agent = Agent::new(AgentRole::Creator, AGENT_NAME);
    agent.agent_type = Some(AgentType::Other);
    agent.other_type = Some("SOFTWARE".to_owned());

    let mut mets = Mets::new();
    mets.id = Some(ids.mint()?);
    mets.objid = objid;
    mets.header = Some(MetsHeader {
        id: Some(ids.mint()?),
        agents: vec![agent],
        ..MetsHeader::default()
    });
    Ok(mets)
}

fn emit(bytes: &[u8]) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(bytes).context("failed to write to stdout")?;
    stdout.flush().context("failed to flush stdout")
}

fn run(command: Command, config: &RustMetsConfig) -> Result<ExitCode> {
    let io = MetsIo::from_config(config).context("invalid configuration")?;

    match command {
        Command::Check { input } => {
            let mets = io.read_file(&input)?;
            let findings = validate(&mets);
            for finding in &findings {
                println!("{}: {finding}", input.display());
            }
            info!(path = %input.display(), findings = findings.len(), "check complete");
            Ok(if findings.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Normalize { input, output } => {
            let mut mets = io.read_file(&input)?;
            match output {
                Some(output) => io.write_file(&mut mets, &output)?,
                None => emit(&io.writer().write(&mut mets)?)?,
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Dump { input } => {
            let mets = io.read_file(&input)?;
            let json = serde_json::to_string_pretty(&mets).context("failed to encode JSON")?;
            println!("{json}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Skeleton { objid } => {
            let mut ids = IdGenerator::new(config.id_length);
            let mut mets = skeleton(objid, &mut ids)?;
            emit(&io.writer().write(&mut mets)?)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> Result<ExitCode> {
    let config = RustMetsConfig::from_env();
    init_tracing(&config.log_level)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;
    info!(?command, "running");

    run(command, &config)
}
