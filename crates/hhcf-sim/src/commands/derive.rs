use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hhcf_io::load_parameters;
use hhcf_spec::{derive_parameters, to_canonical_json_bytes};

#[derive(Args, Debug)]
pub struct DeriveArgs {
    /// Parameter file (.json, .yaml or .yml).
    #[arg(long)]
    pub config: PathBuf,
}

pub fn run(args: &DeriveArgs) -> Result<(), Box<dyn Error>> {
    let params = load_parameters(&args.config)?;
    let derived = derive_parameters(&params)?;
    let json = to_canonical_json_bytes(&derived)?;
    println!("{}", String::from_utf8(json)?);
    Ok(())
}
