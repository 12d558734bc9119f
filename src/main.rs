//! Commons Util entry point
//!
//! Exposes the file helpers as shell commands.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commons_util::collection::{content_as_string_with, print_content_to_console};
use commons_util::file;
use commons_util::{ObjectFormat, Settings, deserialize_from_file};

#[derive(Parser, Debug)]
#[command(name = "commons-util", version, about = "Collection and file helpers")]
struct Cli {
    /// JSON settings file (defaults are used when absent)
    #[arg(long = "config", value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Delimiter for joined output (overrides the settings file)
    #[arg(long = "delimiter", global = true)]
    delimiter: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the extension of a path
    Ext {
        path: String,
        /// Include the leading dot
        #[arg(long = "dot", default_value_t = false)]
        dot: bool,
    },
    /// Print the file name of a path
    Name {
        path: String,
        /// Consult the disk: directories have no file name
        #[arg(long = "no-verify", default_value_t = false)]
        no_verify: bool,
    },
    /// Print the directory a path belongs to
    Dir { path: PathBuf },
    /// Print a free copy-number file name next to a path
    NextName { path: PathBuf },
    /// Print the lines of a file joined with the delimiter
    Lines { path: PathBuf },
    /// Print a file with its line breaks removed
    Cat { path: PathBuf },
    /// Print the byte count of a file
    Bytes { path: PathBuf },
    /// Exit successfully when the path has one of the extensions
    Matches {
        path: String,
        #[arg(required = true)]
        extensions: Vec<String>,
    },
    /// Store the lines of a text file as an object file
    Pack {
        input: PathBuf,
        output: PathBuf,
        /// Payload format: binary or json (defaults to the settings file)
        #[arg(long = "format")]
        format: Option<String>,
    },
    /// Print the lines stored in an object file
    Unpack { path: PathBuf },
}

fn run(cli: Cli) -> commons_util::Result<bool> {
    let mut settings = cli.config.as_ref().map(Settings::load).unwrap_or_default();
    if let Some(delimiter) = cli.delimiter {
        settings.delimiter = delimiter;
    }

    match cli.command {
        Commands::Ext { path, dot } => match file::get_file_extension(&path, dot) {
            Some(ext) => println!("{}", ext),
            None => return Ok(false),
        },
        Commands::Name { path, no_verify } => match file::get_file_name(&path, !no_verify) {
            Some(name) => println!("{}", name),
            None => return Ok(false),
        },
        Commands::Dir { path } => println!("{}", file::get_directory(&path).display()),
        Commands::NextName { path } => {
            println!("{}", file::generate_file_name(&path)?.display())
        }
        Commands::Lines { path } => {
            let mut lines = Vec::new();
            file::read_file_to_list(&path, &mut lines)?;
            println!("{}", content_as_string_with(Some(lines.as_slice()), &settings));
        }
        Commands::Cat { path } => println!("{}", file::get_file_content_as_string(&path)?),
        Commands::Bytes { path } => println!("{}", file::get_bytes(&path)?.len()),
        Commands::Matches { path, extensions } => {
            return file::compare_file_extensions(&path, &extensions);
        }
        Commands::Pack {
            input,
            output,
            format,
        } => {
            let format = match format {
                Some(name) => ObjectFormat::from_name(&name).ok_or_else(|| {
                    commons_util::Error::InvalidArgument(format!("Unknown format: {}", name))
                })?,
                None => settings.object_format,
            };
            let mut lines = Vec::new();
            file::read_file_to_list(&input, &mut lines)?;
            commons_util::persistence::serialize_to_file_with(&lines, &output, format)?;
            log::info!("Packed {} lines into {}", lines.len(), output.display());
        }
        Commands::Unpack { path } => {
            let lines: Vec<String> = deserialize_from_file(&path)?;
            print_content_to_console(Some(lines.as_slice()))
                .map_err(commons_util::Error::Console)?;
        }
    }
    Ok(true)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Running {:?}", cli.command);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::from(2)
        }
    }
}
