use clap::arg;
use url::Url;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub const DEFAULT_OUTPUT_DIR: &str = "mirror";

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("webmirror")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("webmirror")
        .about("Download a resource and, recursively, everything it links to")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner, progress and the final report").required(false))
        .arg(
            arg!(-d --"depth" <DEPTH>)
                .required(false)
                .help("How many link levels to follow below the starting URL (0 = the URL only)")
                .value_parser(clap::value_parser!(u32))
                .default_value("0"),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Directory to write downloaded files to, relative to the working directory")
                .default_value(DEFAULT_OUTPUT_DIR),
        )
        .arg(
            arg!(-t --"threads" <NUM_WORKERS>)
                .required(false)
                .help("Maximum number of downloads in flight at once")
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value("10"),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds (default: none)")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            arg!(--"dedupe")
                .required(false)
                .help("Skip URLs already downloaded with as much depth left (default: follow every occurrence)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(--"markup")
                .required(false)
                .help("Only follow href/src attributes of HTML pages instead of every URL-shaped string")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Report format: text, json")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            arg!(<URL>)
                .required(true)
                .help("The URL to start mirroring from")
                .value_parser(clap::value_parser!(Url)),
        )
}
