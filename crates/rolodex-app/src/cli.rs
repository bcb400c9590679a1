use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use rolodex_core::config::Settings;
use rolodex_rfc::rfc::vcard::{SerializeOptions, VCard, VCardVersion};

/// Reads, converts and inspects vCard files.
#[derive(Debug, Parser)]
#[command(name = "rolodex", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Re-serialize a VCF file, optionally in another vCard version.
    Convert {
        /// Input VCF file.
        input: PathBuf,
        /// Output file; standard output when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Target version, overriding `output.version`.
        #[arg(short, long, value_parser = ["2.1", "3.0", "4.0"])]
        target: Option<String>,
    },
    /// Print one summary line per card.
    Inspect {
        /// Input VCF file.
        input: PathBuf,
    },
}

/// ## Summary
/// Builds serializer options from the loaded settings, letting `target`
/// override the configured version.
///
/// ## Errors
/// Returns an error if the resulting version is not a vCard version.
pub fn serialize_options(settings: &Settings, target: Option<&str>) -> Result<SerializeOptions> {
    let version_text = target.unwrap_or(&settings.output.version);
    let version = VCardVersion::parse(version_text)
        .ok_or_else(|| anyhow!("unsupported vCard version: {version_text}"))
        .context("resolving output version")?;

    let output = &settings.output;
    let mut options = SerializeOptions::new(version);
    options.write_rfc9554_extensions = output.write_rfc9554_extensions;
    options.write_x_extensions = output.write_x_extensions;
    options.write_non_standard = output.write_non_standard;
    options.write_empty_properties = output.write_empty_properties;
    options.product_id.clone_from(&output.product_id);
    Ok(options)
}

/// One line describing a card.
#[must_use]
pub fn summary(index: usize, card: &VCard) -> String {
    let name = card.formatted_name().unwrap_or("(no name)");
    let kind = card.kind().map_or("individual", |kind| kind.as_str());
    let mut line = format!(
        "#{index} [{}] {name} ({kind}), {} email(s), {} phone(s), {} address(es)",
        card.version,
        card.emails().len(),
        card.telephones().len(),
        card.addresses().len(),
    );
    if let Some(org) = card.organization()
        && !org.name.is_empty()
    {
        line.push_str(", org: ");
        line.push_str(&org.name);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rolodex_core::config::{InputConfig, LoggingConfig, OutputConfig};
    use rolodex_rfc::rfc::vcard::parse_single;

    fn settings(version: &str) -> Settings {
        Settings {
            logging: LoggingConfig {
                level: "info".into(),
            },
            output: OutputConfig {
                version: version.into(),
                write_rfc9554_extensions: true,
                write_x_extensions: false,
                write_non_standard: true,
                write_empty_properties: false,
                product_id: Some("-//Example//rolodex//EN".into()),
            },
            input: InputConfig { encoding: None },
        }
    }

    #[test]
    fn options_follow_settings() {
        let options = serialize_options(&settings("3.0"), None).unwrap();
        assert_eq!(options.version, VCardVersion::V3_0);
        assert!(options.write_rfc9554_extensions);
        assert!(!options.write_x_extensions);
        assert_eq!(options.product_id.as_deref(), Some("-//Example//rolodex//EN"));
    }

    #[test]
    fn target_overrides_settings() {
        let options = serialize_options(&settings("3.0"), Some("2.1")).unwrap();
        assert_eq!(options.version, VCardVersion::V2_1);
    }

    #[test]
    fn unknown_version_is_an_error() {
        assert!(serialize_options(&settings("9.9"), None).is_err());
    }

    #[test]
    fn convert_arguments() {
        let cli = Cli::try_parse_from(["rolodex", "convert", "in.vcf", "-o", "out.vcf", "--target", "2.1"])
            .unwrap();
        match cli.command {
            Command::Convert {
                input,
                output,
                target,
            } => {
                assert_eq!(input, PathBuf::from("in.vcf"));
                assert_eq!(output, Some(PathBuf::from("out.vcf")));
                assert_eq!(target.as_deref(), Some("2.1"));
            }
            Command::Inspect { .. } => panic!("expected convert"),
        }
    }

    #[test]
    fn target_must_be_a_version() {
        assert!(Cli::try_parse_from(["rolodex", "convert", "in.vcf", "--target", "5.0"]).is_err());
    }

    #[test]
    fn summary_line() {
        let card = parse_single(
            "BEGIN:VCARD\r\nVERSION:4.0\r\nFN:Jane Doe\r\nORG:Acme;Dev\r\n\
             EMAIL:jane@example.com\r\nTEL:+1-555\r\nEND:VCARD\r\n",
        )
        .unwrap();
        assert_eq!(
            summary(1, &card),
            "#1 [4.0] Jane Doe (individual), 1 email(s), 1 phone(s), 0 address(es), org: Acme"
        );
    }
}
