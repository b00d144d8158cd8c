use webmirror::commands::command_argument_builder;
use webmirror::handlers::handle_mirror;
use webmirror_core::print_banner;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let matches = cmd.get_matches();

    // Show banner unless --quiet flag is set
    if !matches.get_flag("quiet") {
        print_banner();
    }

    handle_mirror(&matches).await;
}
