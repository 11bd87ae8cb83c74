use super::print::{print_counter, print_messages, print_summaries};
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use inkpad::api::InkpadApi;
use inkpad::config::InkpadConfig;
use inkpad::error::{InkpadError, Result};
use inkpad::export::{DirSink, PaperRasterizer};
use inkpad::input::InputEvent;
use inkpad::session;
use inkpad::store::fs_backend::FsBackend;
use inkpad::surface::canvas::Canvas;
use inkpad::surface::rich_text::RichText;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const HOME_ENV: &str = "INKPAD_HOME";
const LOG_ENV: &str = "INKPAD_LOG";

struct AppContext {
    api: InkpadApi<FsBackend, Canvas, RichText>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let home = resolve_home(cli.home.as_deref())?;
    let config = InkpadConfig::load(&home)?;
    debug!(home = %home.display(), "using data directory");

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Config => handle_config(&home, &config),
        Commands::Status => {
            let ctx = init_context(&home, &config, None)?;
            handle_status(&ctx)
        }
        Commands::Replay { file, out } => {
            let mut ctx = init_context(&home, &config, out)?;
            handle_replay(&mut ctx, file.as_deref())
        }
        Commands::New => {
            let mut ctx = init_context(&home, &config, None)?;
            let result = ctx.api.new_page()?;
            print_messages(&result.messages);
            Ok(())
        }
        Commands::Clear { page } => {
            let mut ctx = init_context(&home, &config, None)?;
            select_page(&mut ctx, page)?;
            let result = ctx.api.clear_page()?;
            print_messages(&result.messages);
            Ok(())
        }
        Commands::ExportPage { page, out } => {
            let mut ctx = init_context(&home, &config, out)?;
            select_page(&mut ctx, page)?;
            let result = ctx.api.export_page_image()?;
            print_messages(&result.messages);
            Ok(())
        }
        Commands::ExportPdf { out } => {
            let mut ctx = init_context(&home, &config, out)?;
            let result = ctx.api.export_pdf()?;
            print_messages(&result.messages);
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// `--home`, then `INKPAD_HOME`, then the platform data directory.
fn resolve_home(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("", "", "inkpad")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| InkpadError::Config("could not determine a data directory".into()))
}

fn init_context(home: &Path, config: &InkpadConfig, out: Option<PathBuf>) -> Result<AppContext> {
    let out = match out {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let mut render_config = config.clone();
    render_config.font_path = config.font_path.as_ref().map(|font| home.join(font));
    let rasterizer = PaperRasterizer::from_config(&render_config)?;

    let session = session::headless(FsBackend::new(home.to_path_buf()), config);
    let mut api = InkpadApi::new(
        session,
        Box::new(rasterizer),
        Box::new(DirSink::new(out)),
        config,
    );
    let opened = api.open()?;
    print_messages(&opened.messages);
    Ok(AppContext { api })
}

fn select_page(ctx: &mut AppContext, page: Option<usize>) -> Result<()> {
    let Some(number) = page else {
        return Ok(());
    };
    let total = ctx.api.session().store().len();
    if number == 0 || number > total {
        return Err(InkpadError::Store(format!(
            "no page {} (the notebook has {} page(s))",
            number, total
        )));
    }
    let result = ctx.api.go_to_page(number)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_status(ctx: &AppContext) -> Result<()> {
    print_counter(ctx.api.session().page_counter());
    print_summaries(&ctx.api.summaries());
    Ok(())
}

fn handle_replay(ctx: &mut AppContext, file: Option<&Path>) -> Result<()> {
    let reader: Box<dyn BufRead> = match file {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut handled = 0usize;
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let event: InputEvent =
            serde_json::from_str(trimmed).map_err(|e| InkpadError::Replay {
                line: number + 1,
                message: e.to_string(),
            })?;
        let result = ctx.api.handle_event(event)?;
        print_messages(&result.messages);
        handled += 1;
    }

    info!(events = handled, "replay finished");
    print_counter(ctx.api.session().page_counter());
    Ok(())
}

fn handle_config(home: &Path, config: &InkpadConfig) -> Result<()> {
    println!("home: {}", home.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
