use clap::builder::{styling::AnsiColor, Styles};
use clap::ColorChoice;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use commands::{pack_app, PackAppArgs};
use miette::Result;

mod commands;
mod errors;
mod tools;
mod utils;
mod workspace;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Package a project directory into a signed apk
    Pack {
        /// The project directory to embed (defaults to the current directory)
        source_dir: Option<String>,

        /// Path to the Android build-tools directory containing zipalign and apksigner
        #[arg(short, long)]
        build_tools: Option<String>,

        /// The output apk path, resolved against the project directory when relative
        #[arg(short, long, default_value = "app.apk")]
        out: String,
    },
}

fn parse_args() -> Args {
    // Configure colored/styled help output
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Blue.on_default());

    let matches = Args::command()
        .styles(styles)
        .color(ColorChoice::Auto)
        .get_matches();

    Args::from_arg_matches(&matches).expect("failed to parse arguments")
}

fn main() -> Result<()> {
    let args = parse_args();

    match args.command {
        Commands::Pack {
            source_dir,
            build_tools,
            out,
        } => pack_app(PackAppArgs {
            source_dir,
            build_tools,
            out,
        }),
    }
}
