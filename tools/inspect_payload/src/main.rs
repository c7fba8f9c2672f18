//! Write sample IBus payloads and decode captured ones to JSON.
//!
//! Payloads are bincode-encoded `Argument` trees.
//!
//! Usage:
//!   cargo run -p inspect_payload -- sample text --output text.bin
//!   cargo run -p inspect_payload -- decode text.bin
//!   cargo run -p inspect_payload -- decode prop.bin --kind content-type

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use libibus::{
    codec, hints, AttrUnderline, Attribute, AttributeList, ClientCommitPreedit, Config,
    ContentType, EngineDesc, FormatRange, InputPurpose, Record, RecordKind, Rgb, Text,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "inspect_payload")]
#[command(about = "Write sample IBus payloads and decode captured ones")]
struct Args {
    /// Codec limits (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a populated sample record
    Sample {
        /// Record kind: attribute, attr-list, text, engine-desc, commit-preedit, content-type
        kind: RecordKind,

        #[arg(short, long)]
        output: PathBuf,
    },
    /// Decode a payload and print it as JSON
    Decode {
        input: PathBuf,

        /// Record kind (detected from the payload when omitted)
        #[arg(short, long)]
        kind: Option<RecordKind>,
    },
}

#[derive(Serialize)]
struct Decoded<'a> {
    signature: String,
    #[serde(flatten)]
    record: &'a Record,
    #[serde(skip_serializing_if = "Option::is_none")]
    format_ranges: Option<Vec<FormatRange>>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_toml(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))?,
        None => Config::default(),
    };

    match args.command {
        Command::Sample { kind, output } => {
            let arg = sample(kind).encode()?;
            let bytes = codec::encode(&arg)?;
            std::fs::write(&output, bytes)
                .with_context(|| format!("writing {}", output.display()))?;
            println!("✓ Wrote {} payload `{}` to {}", kind, arg.signature(), output.display());
        }
        Command::Decode { input, kind } => {
            let bytes =
                std::fs::read(&input).with_context(|| format!("reading {}", input.display()))?;
            let arg = codec::decode(&bytes, bytes.len(), &config)
                .with_context(|| format!("{} is not an encoded argument", input.display()))?;

            let kind = match kind.or_else(|| Record::detect(&arg)) {
                Some(kind) => kind,
                None => anyhow::bail!(
                    "cannot detect record kind of `{}`; pass --kind",
                    arg.signature()
                ),
            };
            let record = Record::decode(kind, &arg, &config)
                .with_context(|| format!("decoding {} as {}", input.display(), kind))?;

            let decoded = Decoded {
                signature: arg.signature().to_string(),
                record: &record,
                format_ranges: record.format_ranges(),
            };
            println!("{}", serde_json::to_string_pretty(&decoded)?);
        }
    }

    Ok(())
}

fn sample(kind: RecordKind) -> Record {
    let mut attrs = AttributeList::new();
    attrs.push(Attribute::underline(AttrUnderline::Single, 0, 2));
    attrs.push(Attribute::foreground(Rgb::new(0x20, 0x40, 0xC0), 0, 2));
    attrs.push(Attribute::background(Rgb::new(0xFF, 0xFF, 0xE0), 2, 4));

    match kind {
        RecordKind::Attribute => Record::Attribute(Attribute::underline(AttrUnderline::Error, 0, 4)),
        RecordKind::AttributeList => Record::AttributeList(attrs),
        RecordKind::Text => Record::Text(Text::with_attributes("你好世界", attrs)),
        RecordKind::EngineDesc => Record::EngineDesc(EngineDesc {
            engine_name: "pinyin".into(),
            longname: "Pinyin".into(),
            description: "Pinyin input method".into(),
            language: "zh_CN".into(),
            license: "MIT".into(),
            layout: "us".into(),
            rank: 50,
            symbol: "拼".into(),
            version: "0.1.0".into(),
            ..EngineDesc::default()
        }),
        RecordKind::ClientCommitPreedit => {
            Record::ClientCommitPreedit(ClientCommitPreedit::new(true))
        }
        RecordKind::ContentType => Record::ContentType(ContentType::new(
            InputPurpose::Email.as_raw(),
            hints::LOWERCASE | hints::NO_SPELLCHECK,
        )),
    }
}
