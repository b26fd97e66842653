//! Preview Command
//!
//! Fetch and regroup, then print or save the index instead of committing.
//! With `--dir` the tree is read from a local checkout and no credential
//! is needed.

use clap::Args;
use std::path::PathBuf;

use super::VariantArg;

/// Arguments of `preview`
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Claim file schema to regroup
    #[arg(long, value_enum)]
    pub variant: VariantArg,

    /// Read the claim tree from a local checkout instead of GitHub
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Write the index to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: PreviewArgs,
    }

    #[test]
    fn test_preview_local() {
        let cli = TestCli::try_parse_from(["test", "--variant", "single", "--dir", "./checkout"])
            .unwrap();
        assert_eq!(cli.args.dir, Some(PathBuf::from("./checkout")));
        assert!(cli.args.out.is_none());
    }

    #[test]
    fn test_preview_rejects_unknown_variant() {
        assert!(TestCli::try_parse_from(["test", "--variant", "triple"]).is_err());
    }
}
