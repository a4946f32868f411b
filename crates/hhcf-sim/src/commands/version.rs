use std::collections::BTreeMap;
use std::error::Error;

use clap::Args;
use hhcf_core::SchemaVersion;
use hhcf_spec::to_canonical_json_bytes;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Emit crate versions and the artefact schema as JSON.
    #[arg(long)]
    pub long: bool,
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: String,
    crates: BTreeMap<String, String>,
    schema: SchemaVersion,
}

pub fn run(args: &VersionArgs) -> Result<(), Box<dyn Error>> {
    if !args.long {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let mut crates = BTreeMap::new();
    crates.insert("hhcf-spec".to_string(), hhcf_spec::VERSION.to_string());
    let info = VersionInfo {
        version: env!("CARGO_PKG_VERSION").into(),
        crates,
        schema: SchemaVersion::default(),
    };
    let json = to_canonical_json_bytes(&info)?;
    println!("{}", String::from_utf8(json)?);
    Ok(())
}
