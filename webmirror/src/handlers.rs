use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;
use webmirror_core::mirror::{MirrorOptions, execute_mirror};
use webmirror_core::report::{ReportFormat, StatusCounts, generate_mirror_report};
use webmirror_scanner::{LinkScan, VisitPolicy};

/// Resolve the output directory argument against the working directory,
/// expanding a leading `~`.
pub fn resolve_output_dir(output: &str, cwd: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(output);
    let path = Path::new(expanded.as_ref());
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Resolve and create the output directory.
pub fn prepare_output_dir(output: &str, cwd: &Path) -> Result<PathBuf> {
    let dir = resolve_output_dir(output, cwd);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    Ok(dir)
}

/// Build mirror options from parsed command-line arguments
pub fn build_mirror_options(args: &ArgMatches, output_dir: PathBuf) -> Result<MirrorOptions> {
    let url = args
        .get_one::<Url>("URL")
        .ok_or_else(|| anyhow!("A URL to mirror must be provided"))?;
    let max_depth = args.get_one::<u32>("depth").copied().unwrap_or(0);
    let threads = args.get_one::<u64>("threads").copied().unwrap_or(10);
    let timeout = args
        .get_one::<u64>("timeout")
        .map(|secs| Duration::from_secs(*secs));

    let visit_policy = if args.get_flag("dedupe") {
        VisitPolicy::SkipSeen
    } else {
        VisitPolicy::Revisit
    };
    let link_scan = if args.get_flag("markup") {
        LinkScan::Markup
    } else {
        LinkScan::Raw
    };

    Ok(MirrorOptions {
        url: url.as_str().to_string(),
        max_depth,
        output_dir,
        threads: usize::try_from(threads).context("Thread count is too large")?,
        visit_policy,
        link_scan,
        timeout,
        show_progress_bars: !args.get_flag("quiet"),
    })
}

pub fn report_format(args: &ArgMatches) -> ReportFormat {
    args.get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text)
}

pub async fn handle_mirror(args: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let quiet = args.get_flag("quiet");
    let format = report_format(args);

    let output_dir = match std::env::current_dir()
        .context("Failed to determine the working directory")
        .and_then(|cwd| {
            let output = args
                .get_one::<String>("output")
                .map(String::as_str)
                .unwrap_or(crate::commands::DEFAULT_OUTPUT_DIR);
            prepare_output_dir(output, &cwd)
        }) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    let options = match build_mirror_options(args, output_dir) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    if !quiet {
        println!("{} Mirroring {}", "→".blue(), options.url.bright_white());
        println!("Max depth: {}", options.max_depth);
        println!("Workers: {}", options.threads);
        println!("Output: {}\n", options.output_dir.display());
    }

    let summary = match execute_mirror(options, None, None).await {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("{} Mirror failed: {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    if quiet {
        return;
    }

    let counts = StatusCounts::tally(&summary);
    if counts.failures() == 0 {
        println!("\n{} Mirror complete!\n", "✓".green().bold());
    } else {
        println!(
            "\n{} Mirror complete with {} failed branches\n",
            "⚠".yellow().bold(),
            counts.failures()
        );
    }

    print!("{}", generate_mirror_report(&summary, format));
}
