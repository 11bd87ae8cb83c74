use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "inkpad", bin_name = "inkpad", version)]
#[command(about = "Paged notebook with freehand ink and colored text", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (overrides INKPAD_HOME)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub home: Option<PathBuf>,

    /// Debug logging on stderr (INKPAD_LOG takes precedence)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Show the page counter and a summary of every page
    Status,

    /// Feed recorded input events (JSON lines) into the notebook
    Replay {
        /// Event file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Directory for files exported during the replay
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Append a blank page
    New,

    /// Erase the text and ink of a page
    Clear {
        /// Page number, 1-based
        #[arg(long)]
        page: Option<usize>,
    },

    /// Export one page as Notebook_Page_<N>.png
    ExportPage {
        /// Page number, 1-based
        #[arg(long)]
        page: Option<usize>,

        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Export every page into a single A4 PDF
    ExportPdf {
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_page_and_out_flags() {
        let cli = Cli::try_parse_from([
            "inkpad",
            "export-page",
            "--page",
            "3",
            "--out",
            "/tmp/x",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::ExportPage {
                page: Some(3),
                out: Some(PathBuf::from("/tmp/x")),
            })
        );
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["inkpad", "status", "--home", "/data", "-v"]).unwrap();
        assert_eq!(cli.home, Some(PathBuf::from("/data")));
        assert!(cli.verbose);
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["inkpad"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn page_must_be_numeric() {
        assert!(Cli::try_parse_from(["inkpad", "clear", "--page", "two"]).is_err());
    }
}
