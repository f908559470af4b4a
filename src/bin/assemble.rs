//! Re-run partner docking and component assembly over a JSON document.
//!
//! ## Usage
//!     panelcad-assemble <input.json> [-o output.json] [--config file] [--reset-ids]
//!
//! Without `-o` the input file is overwritten. Every connection that cannot
//! be applied is logged and left in the document unresolved.

use anyhow::{bail, Context};
use panelcad::io::json::{JsonReader, JsonReaderConfiguration, JsonWriter};
use panelcad::Config;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

struct Args {
    input: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    reset_ids: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut input = None;
    let mut output = None;
    let mut config = None;
    let mut reset_ids = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-o" | "--output" => {
                let path = args.next().context("`-o` needs an output path")?;
                output = Some(PathBuf::from(path));
            }
            "--config" => {
                let path = args.next().context("`--config` needs a configuration file")?;
                config = Some(PathBuf::from(path));
            }
            "--reset-ids" => reset_ids = true,
            other if other.starts_with('-') => bail!("unknown option `{other}`"),
            other => {
                if input.replace(PathBuf::from(other)).is_some() {
                    bail!("more than one input file given");
                }
            }
        }
    }

    Ok(Args {
        input: input.context(
            "usage: panelcad-assemble <input.json> [-o output.json] [--config file] [--reset-ids]",
        )?,
        output,
        config,
        reset_ids,
    })
}

fn load_configuration(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::discover()?,
    };
    Ok(config)
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

fn main() -> anyhow::Result<()> {
    let args = parse_args()?;
    let config = load_configuration(args.config.as_ref())?;
    init_logging(&config);

    let mut document = JsonReader::from_file(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?
        .with_configuration(JsonReaderConfiguration {
            reset_ids: args.reset_ids,
            failsafe: false,
        })
        .read()
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    document.update_partners_with(&config.layout);
    let failures = document.update_components_with(&config.layout);
    for failure in &failures {
        warn!(
            node = %failure.node_id,
            ids = ?failure.connection.ids,
            error = %failure.error,
            "connection left unresolved"
        );
    }

    let rect = document.bounding_rect();
    info!(failures = failures.len(), "assembly finished");
    println!(
        "{}: {:.3} x {:.3} at ({:.3}, {:.3})",
        document.name,
        rect.width(),
        rect.height(),
        rect.left(),
        rect.top()
    );

    let output = args.output.unwrap_or(args.input);
    JsonWriter::new(&document)
        .pretty()
        .write_to_file(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(())
}
