//! Run Command
//!
//! Fetch, regroup, and publish.

use clap::Args;

use super::VariantArg;

/// Arguments of `run`
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Claim file schema to regroup
    #[arg(long, value_enum)]
    pub variant: VariantArg,
}
