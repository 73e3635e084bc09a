mod commands;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::Shell;

use ghtail::i18n::Lang;

#[derive(Parser)]
#[command(name = "ghtail")]
#[command(about = "Tail a feed of recently active GitHub repositories", long_about = None)]
#[command(version)]
#[command(after_long_help = r#"SETTINGS
    ~/.config/ghtail/settings.toml    feed_url, poll_interval_secs, page_size, ...
    GHTAIL_FEED_URL                   Feed location (http(s) URL or local JSON file)
    GHTAIL_POLL_INTERVAL_SECS         Seconds between checks (default 30)
    GHTAIL_PAGE_SIZE                  Repositories per page (default 25)
    RUST_LOG                          Log filter, overrides -v
"#)]
pub(crate) struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by every command that reads the feed.
#[derive(Debug, Clone, Args)]
pub(crate) struct FeedArgs {
    /// Feed location, overriding settings (http(s) URL or path to a JSON file)
    #[arg(long, value_hint = ValueHint::Url)]
    feed: Option<String>,
    /// Interface language
    #[arg(long, value_enum)]
    lang: Option<Lang>,
    /// Only show repositories whose name or description contains this text
    #[arg(long, short = 's')]
    search: Option<String>,
    /// Minimum star count (non-numeric text counts as 0)
    #[arg(long, short = 'm', allow_hyphen_values = true)]
    min_stars: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the feed, refreshing on a timer (interactive)
    #[command(short_flag = 'w')]
    Watch {
        #[command(flatten)]
        feed: FeedArgs,
        /// Seconds between checks, overriding settings
        #[arg(long, short = 'i')]
        interval: Option<u64>,
    },
    /// Fetch the feed once and print one page
    #[command(short_flag = 'l', visible_alias = "ls")]
    List {
        #[command(flatten)]
        feed: FeedArgs,
        /// Page to print (clamped to the available pages)
        #[arg(long, short = 'p', default_value_t = 1)]
        page: usize,
    },
    /// Remember the interface language
    Lang {
        #[arg(value_enum)]
        lang: Lang,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn display_banner() {
    println!(
        r#"
       _     _        _ _
  __ _| |__ | |_ __ _(_) |
 / _` | '_ \| __/ _` | | |
| (_| | | | | || (_| | | |
 \__, |_| |_|\__\__,_|_|_|
 |___/
"#
    );

    let mut cmd = Cli::command();
    let _ = cmd.print_help();
    println!();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    ghtail::logging::init(cli.verbose);

    match cli.command {
        None => {
            display_banner();
            Ok(())
        }
        Some(Commands::Watch { feed, interval }) => commands::watch(feed, interval).await,
        Some(Commands::List { feed, page }) => commands::list(feed, page).await,
        Some(Commands::Lang { lang }) => commands::save_language(lang),
        Some(Commands::Completions { shell }) => {
            commands::generate_completions(shell);
            Ok(())
        }
    }
}
