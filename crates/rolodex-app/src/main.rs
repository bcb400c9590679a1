mod cli;

use std::io;

use anyhow::Context;
use clap::Parser;
use rolodex_core::config::load_config;
use rolodex_rfc::rfc::vcard::{io as vcf, write_to};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

use crate::cli::{Cli, Command, serialize_options, summary};

fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config()?;

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping info");
    }

    let encoding = config.input.encoding.as_deref();

    match cli.command {
        Command::Convert {
            input,
            output,
            target,
        } => {
            let options = serialize_options(&config, target.as_deref())?;
            let cards = vcf::load(&input, encoding)
                .with_context(|| format!("reading {}", input.display()))?;

            tracing::info!(count = cards.len(), version = %options.version, "Converting vCards");

            match output {
                Some(path) => vcf::save(&path, &cards, &options)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => write_to(&mut io::stdout().lock(), &cards, &options)?,
            }
        }
        Command::Inspect { input } => {
            let cards = vcf::load(&input, encoding)
                .with_context(|| format!("reading {}", input.display()))?;
            for (index, card) in cards.iter().enumerate() {
                println!("{}", summary(index + 1, card));
            }
        }
    }

    Ok(())
}
