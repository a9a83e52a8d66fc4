use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use jamcli::{cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth(AuthOptions),

    /// Search the catalog for tracks
    Search(SearchOptions),

    #[clap(about = "Show and edit the working playlist, or save it to Spotify")]
    Playlist(PlaylistOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Drop the cached credential instead of logging in
    #[clap(long)]
    pub logout: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Free-text search terms (song, album, or artist)
    #[clap(required = true)]
    pub term: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Show and edit the working playlist, or save it to Spotify",
    args_conflicts_with_subcommands = true // plain `playlist` shows the working playlist
)]
pub struct PlaylistOptions {
    /// Subcommands under `playlist` (e.g., `add`, `save`)
    #[command(subcommand)]
    pub command: Option<PlaylistSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistSubcommand {
    /// Add a track from the last search results
    Add(TrackNumberOpts),

    /// Remove a track from the working playlist
    Remove(TrackNumberOpts),

    /// Rename the working playlist
    Rename(RenameOpts),

    /// Save the working playlist to your Spotify account
    Save,
}

#[derive(Parser, Debug, Clone)]
pub struct TrackNumberOpts {
    /// Track number as printed in the relevant listing (starting at 1)
    pub number: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct RenameOpts {
    /// New playlist name
    #[clap(required = true)]
    pub name: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth(opt) => cli::auth(opt.logout).await,

        Command::Search(opt) => cli::search(opt.term.join(" ")).await,

        Command::Playlist(opt) => match opt.command {
            Some(PlaylistSubcommand::Add(t)) => cli::add_track(t.number).await,
            Some(PlaylistSubcommand::Remove(t)) => cli::remove_track(t.number).await,
            Some(PlaylistSubcommand::Rename(r)) => cli::rename_playlist(r.name.join(" ")).await,
            Some(PlaylistSubcommand::Save) => cli::save_playlist().await,
            None => cli::show_playlist().await,
        },

        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
