//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Replay a recorded editing session and print the committed shapes.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "transfigure", version)]
pub struct Args {
    /// Editor config JSON; defaults apply when absent.
    #[arg(short, long, env = "TRANSFIGURE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print single-line JSON.
    #[arg(long)]
    pub compact: bool,

    /// Session script to replay.
    pub script: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("transfigure").chain(args.iter().copied()))
    }

    #[test]
    fn test_script_only() {
        let args = parse(&["session.json"]).unwrap();
        assert_eq!(args.script, PathBuf::from("session.json"));
        assert!(!args.compact);
    }

    #[test]
    fn test_all_options() {
        let args = parse(&["--config", "editor.json", "--compact", "session.json"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("editor.json")));
        assert!(args.compact);

        let args = parse(&["-c", "other.json", "session.json"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("other.json")));
    }

    #[test]
    fn test_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--config"]).is_err());
        assert!(parse(&["--verbose", "a.json"]).is_err());
        assert!(parse(&["a.json", "b.json"]).is_err());
    }
}
