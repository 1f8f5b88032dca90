//! tessera CLI - Command line interface for the tessera object store
//!
//! Provides git-style plumbing commands over a loose object directory.

use clap::{ArgGroup, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use tessera::{
    Compression, EntryMode, ObjectId, ObjectKind, RepoConfig, Repository, TreeEntry,
    DEFAULT_GIT_DIR,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tessera")]
#[command(about = "A content-addressed object store and directory tree snapshotter")]
#[command(version)]
struct Cli {
    /// Path to the repository metadata directory (discovered upward from
    /// the current directory when omitted)
    #[arg(short = 'g', long, global = true)]
    git_dir: Option<PathBuf>,

    /// Output format (json or text)
    #[arg(short, long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum CompressionArg {
    Zlib,
    Zstd,
}

impl From<CompressionArg> for Compression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::Zlib => Compression::Zlib,
            CompressionArg::Zstd => Compression::Zstd,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new repository
    Init {
        /// Codec for stored objects (zlib stays git-compatible)
        #[arg(long, default_value = "zlib")]
        compression: CompressionArg,
        /// Codec level
        #[arg(long)]
        level: Option<i32>,
    },

    /// Show an object's content, kind or size
    #[command(group(ArgGroup::new("mode").required(true).args(["pretty", "kind", "size"])))]
    CatFile {
        /// Print the payload exactly as stored
        #[arg(short = 'p')]
        pretty: bool,
        /// Print the object kind
        #[arg(short = 't')]
        kind: bool,
        /// Print the payload size in bytes
        #[arg(short = 's')]
        size: bool,
        /// Object id (full or abbreviated)
        object: String,
    },

    /// Compute a file's blob id
    HashObject {
        /// Also store the blob
        #[arg(short = 'w')]
        write: bool,
        /// File to hash
        file: PathBuf,
    },

    /// Store a directory as a tree and print its id
    WriteTree {
        /// Directory to snapshot (defaults to the working directory)
        dir: Option<PathBuf>,
    },

    /// List the entries of a tree
    LsTree {
        /// Only print entry names
        #[arg(long)]
        name_only: bool,
        /// Recurse into subtrees
        #[arg(short = 'r')]
        recursive: bool,
        /// Tree id (full or abbreviated)
        tree: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Init { compression, level } => {
            let git_dir = cli
                .git_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_GIT_DIR));
            let config = RepoConfig {
                compression: compression.into(),
                compression_level: level,
                ..Default::default()
            };
            Repository::init(&git_dir, config)?;
            match cli.format {
                OutputFormat::Json => output_json(&serde_json::json!({
                    "status": "ok",
                    "git_dir": git_dir.display().to_string()
                })),
                OutputFormat::Text => println!("Initialized git directory"),
            }
        }

        Commands::CatFile {
            pretty,
            kind,
            size: _,
            object,
        } => {
            let repo = open_repo(cli.git_dir.as_deref())?;
            let id = repo.resolve(&object)?;

            if pretty {
                let obj = repo.read_object(&id)?;
                match (cli.format, obj.kind) {
                    (OutputFormat::Text, ObjectKind::Blob) => {
                        let mut stdout = std::io::stdout().lock();
                        stdout.write_all(&obj.payload)?;
                        stdout.flush()?;
                    }
                    (OutputFormat::Json, ObjectKind::Blob) => output_json(&serde_json::json!({
                        "id": id,
                        "kind": obj.kind,
                        "content": String::from_utf8_lossy(&obj.payload)
                    })),
                    (format, ObjectKind::Tree) => {
                        let entries = repo.read_tree(&id)?;
                        print_entries(&format, id, &entries, false);
                    }
                }
            } else {
                let (object_kind, object_size) = repo.object_info(&id)?;
                if kind {
                    emit(&cli.format, "kind", object_kind.as_str());
                } else {
                    emit(&cli.format, "size", &object_size.to_string());
                }
            }
        }

        Commands::HashObject { write, file } => {
            let id = if write {
                open_repo(cli.git_dir.as_deref())?.hash_object(&file, true)?
            } else {
                tessera::Object::blob(std::fs::read(&file)?).id()
            };
            emit(&cli.format, "id", &id.to_hex());
        }

        Commands::WriteTree { dir } => {
            let repo = open_repo(cli.git_dir.as_deref())?;
            let id = repo.write_tree(dir.as_deref())?;
            emit(&cli.format, "id", &id.to_hex());
        }

        Commands::LsTree {
            name_only,
            recursive,
            tree,
        } => {
            let repo = open_repo(cli.git_dir.as_deref())?;
            let id = repo.resolve(&tree)?;
            if recursive {
                let walked: Vec<TreeEntry> = repo
                    .walk_tree(&id)?
                    .into_iter()
                    .filter(|(_, entry)| entry.mode == EntryMode::File)
                    .map(|(path, entry)| TreeEntry { name: path, ..entry })
                    .collect();
                print_entries(&cli.format, id, &walked, name_only);
            } else {
                let entries = repo.read_tree(&id)?;
                print_entries(&cli.format, id, &entries, name_only);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = if verbose > 0 {
        EnvFilter::new(format!("tessera={}", default))
    } else {
        EnvFilter::try_from_env("TESSERA_LOG").unwrap_or_else(|_| EnvFilter::new(default))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_repo(git_dir: Option<&Path>) -> anyhow::Result<Repository> {
    let repo = match git_dir {
        Some(path) => Repository::open(path)?,
        None => Repository::discover(std::env::current_dir()?)?,
    };
    Ok(repo)
}

fn print_entries(format: &OutputFormat, tree: ObjectId, entries: &[TreeEntry], name_only: bool) {
    match format {
        OutputFormat::Json => {
            let items: Vec<_> = entries
                .iter()
                .map(|e| {
                    serde_json::json!({
                        "mode": e.mode.as_str(),
                        "kind": e.mode.object_kind(),
                        "id": e.id,
                        "name": e.name_lossy()
                    })
                })
                .collect();
            output_json(&serde_json::json!({
                "tree": tree,
                "count": items.len(),
                "entries": items
            }));
        }
        OutputFormat::Text => {
            for entry in entries {
                if name_only {
                    println!("{}", entry.name_lossy());
                } else {
                    println!("{}", entry);
                }
            }
        }
    }
}

fn emit(format: &OutputFormat, key: &str, value: &str) {
    match format {
        OutputFormat::Json => output_json(&serde_json::json!({ key: value })),
        OutputFormat::Text => println!("{}", value),
    }
}

fn output_json(value: &serde_json::Value) {
    println!("{}", value);
}
