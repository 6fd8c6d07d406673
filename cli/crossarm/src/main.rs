//! crossarm CLI — derive GNU Arm toolchain command lines and inspect
//! captured diagnostic output, without executing anything.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "crossarm", version, about = "GNU Arm toolchain adapter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether the toolchain is installed
    Probe {
        /// Toolchain root directory (empty: search PATH)
        #[arg(long, default_value = "")]
        root: PathBuf,
    },
    /// Print the derived flag set for a target
    Flags {
        /// Target descriptor file (.target.toml)
        #[arg(long)]
        target: PathBuf,
        /// Optimization profile (develop, debug, release)
        #[arg(long, default_value = "develop")]
        profile: String,
    },
    /// Print the compile command for one source file
    Compile {
        /// Target descriptor file (.target.toml)
        #[arg(long)]
        target: PathBuf,
        /// Source file
        source: PathBuf,
        /// Object file to produce
        #[arg(short, long)]
        output: PathBuf,
        /// Include directories
        #[arg(short = 'I', long = "include")]
        includes: Vec<PathBuf>,
        /// Use the C++ front end
        #[arg(long)]
        cxx: bool,
        /// Toolchain root directory
        #[arg(long, default_value = "")]
        root: PathBuf,
    },
    /// Print the link command(s) for a set of objects
    Link {
        /// Target descriptor file (.target.toml)
        #[arg(long)]
        target: PathBuf,
        /// Object files
        objects: Vec<PathBuf>,
        /// Output ELF
        #[arg(short, long)]
        output: PathBuf,
        /// Static libraries to link
        #[arg(short = 'l', long = "library")]
        libraries: Vec<PathBuf>,
        /// Library search directories
        #[arg(short = 'L', long = "library-dir")]
        library_dirs: Vec<PathBuf>,
        /// Device memory map (linker script, preprocessed before use)
        #[arg(long)]
        memory_map: Option<PathBuf>,
        /// Toolchain root directory
        #[arg(long, default_value = "")]
        root: PathBuf,
    },
    /// Print the archive command for a set of objects
    Archive {
        /// Target descriptor file (.target.toml)
        #[arg(long)]
        target: PathBuf,
        /// Object files
        objects: Vec<PathBuf>,
        /// Library to produce (lib<name>.a)
        #[arg(short, long)]
        output: PathBuf,
        /// Toolchain root directory
        #[arg(long, default_value = "")]
        root: PathBuf,
    },
    /// Print the ELF-to-image conversion command
    Binary {
        /// Target descriptor file (.target.toml)
        #[arg(long)]
        target: PathBuf,
        /// Linked ELF
        elf: PathBuf,
        /// Image to produce (.bin or .hex)
        #[arg(short, long)]
        output: PathBuf,
        /// Toolchain root directory
        #[arg(long, default_value = "")]
        root: PathBuf,
    },
    /// Parse captured compiler output into structured diagnostics
    Parse {
        /// Target descriptor file (.target.toml)
        #[arg(long)]
        target: PathBuf,
        /// File holding the captured output
        capture: PathBuf,
        /// Emit records as JSON lines
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Probe { root } => commands::probe::run(&root),
        Commands::Flags { target, profile } => commands::flags::run(&target, &profile),
        Commands::Compile {
            target,
            source,
            output,
            includes,
            cxx,
            root,
        } => commands::compile::run(&target, &root, &source, &output, &includes, cxx),
        Commands::Link {
            target,
            objects,
            output,
            libraries,
            library_dirs,
            memory_map,
            root,
        } => commands::link::run(
            &target,
            &root,
            &output,
            &objects,
            &libraries,
            &library_dirs,
            memory_map.as_deref(),
        ),
        Commands::Archive {
            target,
            objects,
            output,
            root,
        } => commands::archive::run(&target, &root, &objects, &output),
        Commands::Binary {
            target,
            elf,
            output,
            root,
        } => commands::binary::run(&target, &root, &elf, &output),
        Commands::Parse {
            target,
            capture,
            json,
        } => commands::parse::run(&target, &capture, json),
    }
}
