pub mod mirror;
pub mod report;

use colored::Colorize;

pub use mirror::{
    MirrorOptions, MirrorProgressCallback, MirrorResultCallback, MirrorSummary, execute_mirror,
    extract_url_path,
};
pub use report::{ReportFormat, StatusCounts, generate_mirror_report};

pub fn print_banner() {
    println!(
        "{} {}",
        "webmirror".bright_cyan().bold(),
        env!("CARGO_PKG_VERSION").bright_black()
    );
    println!("{}", "recursive site mirroring".bright_black());
    println!();
}
