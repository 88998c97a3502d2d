use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tvrs::catalog::{TvMaze, DEFAULT_API_URL};
use tvrs::command::{self, Outputs};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(after_help = "COMMANDS:\n  --search <title>\n  --sort <asc|desc> [genre]\n  --plot rating genres")]
struct Cli {
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Base URL of the TVmaze API
    #[arg(long, env = "TVRS_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Where `--sort` writes its table
    #[arg(long, default_value = "sorted_movies.csv")]
    sorted_file: PathBuf,

    /// Where `--plot` writes its chart
    #[arg(long, default_value = "plot.png")]
    plot_file: PathBuf,

    /// The command and its arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    command: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", &cli.log_level);
    }

    env_logger::init();

    let catalog = TvMaze::new(&cli.api_url);
    let outputs = Outputs {
        sorted_file: cli.sorted_file,
        plot_file: cli.plot_file,
    };

    let mut stdout = std::io::stdout().lock();
    command::run(&catalog, &cli.command, &outputs, &mut stdout)
}
