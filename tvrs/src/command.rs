use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::export;
use crate::plot;
use crate::stats::{self, GenreSet, Order};
use log::{debug, info};
use std::io::Write;
use std::path::PathBuf;

/// Where the file-producing commands write.
#[derive(Debug, Clone)]
pub struct Outputs {
    pub sorted_file: PathBuf,
    pub plot_file: PathBuf,
}

impl Default for Outputs {
    fn default() -> Self {
        Self {
            sorted_file: PathBuf::from("sorted_movies.csv"),
            plot_file: PathBuf::from("plot.png"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `--search <title>`
    Search { title: String },
    /// `--sort <asc|desc> [genre]`
    Sort { order: Order, genre: Option<String> },
    /// `--plot rating genres`
    Plot,
    /// Any other first token. Nothing is done for it.
    Unrecognized(String),
}

fn invalid(msg: impl Into<String>) -> Error {
    Error::InvalidInput(msg.into())
}

impl Command {
    /// Validate the command tokens, `args[0]` being the command itself.
    ///
    /// Genre names are only checked by [`Command::resolve_genre`], which
    /// needs the genre universe.
    pub fn parse(args: &[String]) -> Result<Command> {
        if args.len() < 2 {
            return Err(invalid("Not enough arguments entered. Try again!"));
        }

        let rest = &args[1..];
        match args[0].trim().to_lowercase().as_str() {
            "--search" => {
                if rest.len() > 1 {
                    return Err(invalid(
                        "Too many arguments for search. Type one show per search. Try again!",
                    ));
                }
                Ok(Command::Search {
                    title: rest[0].clone(),
                })
            }
            "--sort" => {
                let order = rest[0].parse::<Order>().map_err(|_| {
                    invalid(format!(
                        "Command is not valid. Sort order must be 'asc' or 'desc', got '{}'. Try again!",
                        rest[0]
                    ))
                })?;
                if rest.len() > 2 {
                    return Err(invalid(
                        "Command is not valid. Too many arguments entered. Try again!",
                    ));
                }
                Ok(Command::Sort {
                    order,
                    genre: rest.get(1).map(|g| g.trim().to_string()),
                })
            }
            "--plot" => {
                if rest.len() != 2 {
                    return Err(invalid(
                        "Valid plot command needs exactly two arguments: rating genres. Try again!",
                    ));
                }
                for (token, expected, position) in
                    [(&rest[0], "rating", "first"), (&rest[1], "genres", "second")]
                {
                    if token.trim().to_lowercase() != expected {
                        return Err(invalid(format!(
                            "Valid plot command needs '{}' as {} argument, got '{}'. Try again!",
                            expected, position, token
                        )));
                    }
                }
                Ok(Command::Plot)
            }
            _ => Ok(Command::Unrecognized(args[0].clone())),
        }
    }

    /// Swap a user supplied genre for its spelling in `genres`, or reject it
    /// if no show carries it.
    pub fn resolve_genre(self, genres: &GenreSet) -> Result<Command> {
        match self {
            Command::Sort {
                order,
                genre: Some(wanted),
            } => {
                let lower = wanted.to_lowercase();
                let found = genres.iter().find(|g| g.to_lowercase() == lower);
                match found {
                    Some(genre) => Ok(Command::Sort {
                        order,
                        genre: Some(genre.clone()),
                    }),
                    None => Err(invalid(format!(
                        "Command is not valid. Genre '{}' is not found in any show. Try again!",
                        wanted
                    ))),
                }
            }
            other => Ok(other),
        }
    }
}

/// Validate `args`, then carry out the command against `catalog`.
///
/// Text meant for the user goes to `out`; files go where `outputs` says.
pub fn run<C: Catalog + ?Sized>(
    catalog: &C,
    args: &[String],
    outputs: &Outputs,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let command = Command::parse(args)?;

    let genres = stats::genre_universe(catalog).map_err(|e| Error::Genres(Box::new(e)))?;
    let command = command.resolve_genre(&genres)?;
    info!("running {:?}", command);

    match command {
        Command::Search { title } => run_search(catalog, &title, out),
        Command::Sort { order, genre } => run_sort(catalog, order, genre.as_deref(), outputs, out),
        Command::Plot => run_plot(catalog, outputs, out),
        Command::Unrecognized(token) => {
            debug!("nothing to do for {:?}", token);
            Ok(())
        }
    }
}

fn run_search<C: Catalog + ?Sized>(
    catalog: &C,
    title: &str,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let query = title.trim().to_lowercase();
    let id = catalog
        .search_by_name(&query)
        .found()
        .ok_or_else(|| Error::NotFound(title.to_string()))?;
    info!("{:?} resolved to id {}", title, id);

    let show = catalog.fetch_by_id(id).into_result(title)?;
    writeln!(out, "We found a match in the database for the entry {}!", title)?;
    writeln!(out)?;
    writeln!(out, "{}", show)?;
    Ok(())
}

fn run_sort<C: Catalog + ?Sized>(
    catalog: &C,
    order: Order,
    genre: Option<&str>,
    outputs: &Outputs,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let entries = stats::ranked_list(catalog, order, genre)?;
    export::write_ranking_file(&outputs.sorted_file, &entries)?;
    writeln!(
        out,
        "Sorted list of movies has been written to \"{}\"",
        outputs.sorted_file.display()
    )?;
    Ok(())
}

fn run_plot<C: Catalog + ?Sized>(
    catalog: &C,
    outputs: &Outputs,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let averages = stats::genre_averages(catalog)?;
    plot::create_plot(&outputs.plot_file, &averages)?;
    writeln!(out, "Plot saved as '{}'", outputs.plot_file.display())?;
    Ok(())
}
