use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::util::SubscriberInitExt;

use songsheet::{
    render_lines, render_text, Catalog, LanguageFilter, Pager, SearchFilter, Song, SongError,
    ViewerConfig,
};

#[derive(Parser)]
#[command(name = "songsheet")]
#[command(about = "View worship songs with transposable, word-aligned chords")]
#[command(version)]
struct Cli {
    /// Viewer configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a song with chords above their words
    Render {
        /// Song file (JSON)
        song: PathBuf,

        /// Semitones to transpose by (overrides the config)
        #[arg(short, long, allow_negative_numbers = true)]
        transpose: Option<i32>,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// List songs in a catalog
    List {
        /// Catalog file (JSON array)
        catalog: PathBuf,

        /// Language code, or "all" (overrides the config)
        #[arg(short, long)]
        lang: Option<String>,

        /// Search title, artist and tags
        #[arg(short, long, default_value = "")]
        query: String,

        /// Skip this many results
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Results per batch (overrides the config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the section labels of a song
    Sections {
        /// Song file (JSON)
        song: PathBuf,
    },

    /// Report chords in a song that cannot be transposed
    Check {
        /// Song file (JSON)
        song: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&cli.log_level) {
        eprintln!("{}", e);
        process::exit(1);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), SongError> {
    let config = match &cli.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };

    match cli.command {
        Commands::Render {
            song,
            transpose,
            format,
        } => render_command(&song, transpose.unwrap_or(config.transpose), format),
        Commands::List {
            catalog,
            lang,
            query,
            offset,
            limit,
        } => {
            let language = lang.map(LanguageFilter::from).unwrap_or(config.language);
            let filter = SearchFilter::new(language, query);
            list_command(&catalog, &filter, offset, limit.unwrap_or(config.batch_size))
        }
        Commands::Sections { song } => sections_command(&song),
        Commands::Check { song } => check_command(&song),
    }
}

fn render_command(path: &Path, transpose: i32, format: Format) -> Result<(), SongError> {
    let song = Song::from_path(path)?;
    info!(title = %song.title, transpose, "rendering song");
    let rows = render_lines(&song, transpose);

    match format {
        Format::Text => {
            println!("{}", song.heading(transpose));
            println!();
            print!("{}", render_text(&rows));
        }
        Format::Json => {
            let json = serde_json::json!({
                "title": song.title,
                "key": song.display_key(transpose),
                "transpose": transpose,
                "rows": rows,
            });
            println!("{:#}", json);
        }
    }
    Ok(())
}

fn list_command(
    path: &Path,
    filter: &SearchFilter,
    offset: usize,
    limit: usize,
) -> Result<(), SongError> {
    let catalog = Catalog::from_path(path)?;
    let results = catalog.filter(filter);
    let mut pager = Pager::new(&results, limit).starting_at(offset);

    for entry in pager.next_batch() {
        let mut line = entry.title.clone();
        if let Some(artist) = &entry.artist {
            line.push_str(&format!(" - {}", artist));
        }
        if let Some(key) = &entry.key {
            line.push_str(&format!(" [Key: {}]", key));
        }
        line.push_str(&format!(" ({})", entry.language.to_uppercase()));
        println!("{}", line);
    }
    eprintln!(
        "{} of {} songs. {}",
        pager.offset().min(results.len()),
        results.len(),
        pager.status().message()
    );
    Ok(())
}

fn sections_command(path: &Path) -> Result<(), SongError> {
    let song = Song::from_path(path)?;
    for section in song.sections() {
        println!("{:>4}  {}", section.line_index, section.label);
    }
    Ok(())
}

fn check_command(path: &Path) -> Result<(), SongError> {
    let song = Song::from_path(path)?;
    let unrecognized = song.unrecognized_chords();
    if unrecognized.is_empty() {
        println!("{}: all chords can be transposed", song.title);
        return Ok(());
    }
    for (line, chord) in &unrecognized {
        warn!(line, chord = %chord, "chord will not transpose");
        println!("line {}: '{}' will not transpose", line, chord);
    }
    Ok(())
}

fn init_tracing(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

    let filter =
        EnvFilter::try_new(level).map_err(|e| format!("Invalid log level '{}': {}", level, e))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}
