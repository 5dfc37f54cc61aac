use clap::Parser;
use log::{info, LevelFilter};
use std::{fmt::Display, fmt::Formatter};

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Builds a huffman code table for a file and writes it as a walkable binary table",
    long_about = None)]
pub struct Args {
    /// Filename of file to process
    #[clap()]
    filename: String,

    /// Where to write the table (defaults to <filename>.hft)
    #[clap(short = 'o', long = "output")]
    output: Option<String>,

    /// Print the code of every symbol instead of writing the table
    #[clap(long = "codes")]
    codes: bool,

    /// Encode the file with the table, decode it again and compare
    #[clap(long = "verify")]
    verify: bool,

    /// Force overwriting output file
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Sets verbosity. -v shows progress, -vvv is chatty
    #[clap(short = 'v', parse(from_occurrences))]
    v: u64,

    /// Only report errors
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,
}

#[derive(Debug, PartialEq, Eq)]
/// Table, Codes, Verify
pub enum Mode {
    Table,
    Codes,
    Verify,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Defines all user settable options to control program behavior
#[derive(Debug)]
pub struct HuffOpts {
    /// Name of file to read for input
    pub file: String,
    /// Where the serialized table goes
    pub output: String,
    /// What to do with the table
    pub op_mode: Mode,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Log level
    pub verbose: LevelFilter,
}

impl HuffOpts {
    /// Default parameters for an input file
    pub fn new(file: &str) -> Self {
        Self {
            file: file.to_string(),
            output: format!("{}.hft", file),
            op_mode: Mode::Table,
            force_overwrite: false,
            verbose: LevelFilter::Warn,
        }
    }

    /// Copy the parsed command line into our options
    pub fn from_args(args: Args) -> Self {
        let mut opts = HuffOpts::new(&args.filename);
        if let Some(output) = args.output {
            opts.output = output;
        }
        if args.codes {
            opts.op_mode = Mode::Codes
        };
        if args.verify {
            opts.op_mode = Mode::Verify
        };
        opts.force_overwrite = args.force;
        opts.verbose = match (args.quiet, args.v) {
            (true, _) => LevelFilter::Error,
            (false, 0) => LevelFilter::Warn,
            (false, 1) => LevelFilter::Info,
            (false, 2) => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        opts
    }

    /// Log the options in use
    pub fn report(&self) {
        info!("---- huffpack options ----");
        info!("Verbosity set to {}", self.verbose);
        info!("Operational mode set to {}", self.op_mode);
        info!("Getting input from the file {}", self.file);
        if self.op_mode == Mode::Table {
            info!("Writing the table to {}", self.output);
        }
        if self.force_overwrite {
            info!("Forcing file overwriting")
        };
    }
}

/// Parse the command line.
pub fn init_opts() -> HuffOpts {
    HuffOpts::from_args(Args::parse())
}
