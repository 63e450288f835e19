use clap::{Args, Parser, Subcommand};
use log::debug;
use stellar::cli::{
    decrypt_file, default_output_path, encrypt_to_file, format_decrypted, generate_key,
    read_record, show_info, write_decrypted, DecryptOptions, EncryptOptions,
};
use stellar::{Key, Normalization, PipelineConfig, Record, RecordRescale, TextCodec, Transform};
use std::path::PathBuf;
use std::process::ExitCode;

/// Version info from Cargo and build.rs
const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROFILE: &str = env!("STELLAR_PROFILE");
const GIT_HASH: &str = env!("STELLAR_GIT_HASH");

#[derive(Parser)]
#[command(name = "stellar")]
#[command(about = "Keyed Hadamard transform for text and numeric records", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct EncryptArgs {
    /// Key: a number, or comma-separated numbers matching the padded length
    #[arg(long, required = true, allow_hyphen_values = true, value_parser = parse_key)]
    key: Key,

    /// JSON object of numeric fields
    #[arg(long)]
    record: Option<PathBuf>,

    /// Message text
    #[arg(long, conflicts_with = "message_file")]
    message: Option<String>,

    /// Read the message from a file
    #[arg(long)]
    message_file: Option<PathBuf>,

    /// JSON pipeline configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Text codec (byte, normalized)
    #[arg(long, value_parser = parse_text_codec)]
    text_codec: Option<TextCodec>,

    /// Transform (matrix, fast)
    #[arg(long, value_parser = parse_transform)]
    transform: Option<Transform>,

    /// Normalization (orthonormal, unnormalized)
    #[arg(long, value_parser = parse_normalization)]
    normalization: Option<Normalization>,

    /// Divide decoded record values by 64 and round to 4 places
    #[arg(long)]
    legacy_rescale: bool,

    /// Output envelope (default: <input>.stellar.json)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a record and a message into an envelope file
    #[command(alias = "e")]
    Encrypt(EncryptArgs),

    /// Decrypt an envelope file
    #[command(alias = "d")]
    Decrypt {
        /// Key used for encryption
        #[arg(long, required = true, allow_hyphen_values = true, value_parser = parse_key)]
        key: Key,

        /// Envelope file
        input: PathBuf,

        /// Write record and message as JSON instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a random vector key
    #[command(alias = "k")]
    Keygen {
        /// Key length, equal to the padded vector length
        #[arg(long)]
        length: usize,

        /// Seed for a reproducible key
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show information about an envelope file
    #[command(alias = "i")]
    Info {
        /// Envelope file to inspect
        file: PathBuf,
    },
}

fn parse_key(s: &str) -> Result<Key, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn parse_text_codec(s: &str) -> Result<TextCodec, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn parse_transform(s: &str) -> Result<Transform, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn parse_normalization(s: &str) -> Result<Normalization, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn run_encrypt(args: EncryptArgs) -> stellar::Result<()> {
    let EncryptArgs {
        key,
        record,
        message,
        message_file,
        config,
        text_codec,
        transform,
        normalization,
        legacy_rescale,
        output,
    } = args;

    // File config first, flags override
    let mut pipeline = match &config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(codec) = text_codec {
        pipeline.text_codec = codec;
    }
    if let Some(transform) = transform {
        pipeline.transform = transform;
    }
    if let Some(normalization) = normalization {
        pipeline.normalization = normalization;
    }
    if legacy_rescale {
        pipeline.record_rescale = Some(RecordRescale::LEGACY);
    }
    debug!("pipeline config: {:?}", pipeline);

    let record_data = match &record {
        Some(path) => read_record(path)?,
        None => Record::new(),
    };
    let message_text = match (&message, &message_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => String::new(),
    };

    let output = output.unwrap_or_else(|| {
        default_output_path(record.as_deref().or(message_file.as_deref()))
    });

    let options = EncryptOptions {
        key,
        config: pipeline,
    };
    let len = encrypt_to_file(&record_data, &message_text, &output, &options)?;
    println!("Encrypted {} values to {}", len, output.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    // Handle --version flag
    if cli.version {
        println!("stellar {} {} ({})", PROFILE, VERSION, GIT_HASH);
        return ExitCode::SUCCESS;
    }

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            let _ = Cli::command().print_help();
            println!();
            return ExitCode::SUCCESS;
        }
    };

    let result = match command {
        Commands::Encrypt(args) => run_encrypt(args),

        Commands::Decrypt { key, input, output } => {
            let options = DecryptOptions { key };
            decrypt_file(&input, &options).and_then(|decrypted| match output {
                Some(path) => {
                    write_decrypted(&path, &decrypted)?;
                    println!("Decrypted to {}", path.display());
                    Ok(())
                }
                None => {
                    print!("{}", format_decrypted(&decrypted));
                    Ok(())
                }
            })
        }

        Commands::Keygen { length, seed } => generate_key(length, seed).map(|key| {
            println!("{}", key);
        }),

        Commands::Info { file } => show_info(&file).map(|info| {
            print!("{}", info);
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
