mod config;
mod render;

use std::{collections::BTreeSet, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use calendar_core::{
    CalendarController, Clock, FixedClock, NotificationSync, SystemClock, WeekStart,
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use release_source::{InMemoryReleaseRepository, ReleaseRepository};
use shared::{
    domain::{MovieId, ReleaseTypeFilter, UserId, YearMonth},
    protocol::FilterPatch,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

#[derive(Parser, Debug)]
#[command(about = "Browse movie releases month by month")]
struct Cli {
    /// JSON array of releases. The built-in May 2024 catalog is used when unset.
    #[arg(long, global = true)]
    releases: Option<PathBuf>,
    #[arg(long, global = true, value_parser = parse_week_start)]
    week_start: Option<WeekStart>,
    /// Date treated as today, YYYY-MM-DD.
    #[arg(long, global = true)]
    today: Option<NaiveDate>,
    /// Month to display, YYYY-MM. Defaults to the month of today.
    #[arg(long, global = true, value_parser = parse_month)]
    month: Option<YearMonth>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Month grid with release markers.
    Grid(ViewArgs),
    /// Releases for the selected date, or the whole month.
    List(ViewArgs),
    /// Tag values available for filtering in the displayed month.
    Facets {
        #[arg(long)]
        json: bool,
    },
    /// Toggle release notifications for each movie in turn.
    Notify {
        #[arg(required = true)]
        movie_ids: Vec<String>,
        #[arg(long)]
        user_id: Option<i64>,
    },
}

#[derive(Args, Debug)]
struct ViewArgs {
    #[arg(long = "type", value_enum, default_value_t = TypeArg::All)]
    release_type: TypeArg,
    #[arg(long = "language")]
    languages: Vec<String>,
    #[arg(long = "genre")]
    genres: Vec<String>,
    #[arg(long = "country")]
    countries: Vec<String>,
    /// Date to select, YYYY-MM-DD. Must lie in the displayed month.
    #[arg(long)]
    select: Option<NaiveDate>,
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TypeArg {
    All,
    Theatrical,
    Ott,
}

impl From<TypeArg> for ReleaseTypeFilter {
    fn from(value: TypeArg) -> Self {
        match value {
            TypeArg::All => Self::All,
            TypeArg::Theatrical => Self::Theatrical,
            TypeArg::Ott => Self::Ott,
        }
    }
}

impl ViewArgs {
    fn filter_patch(&self) -> FilterPatch {
        let tags = |values: &[String]| -> Option<BTreeSet<String>> {
            (!values.is_empty()).then(|| values.iter().cloned().collect())
        };
        FilterPatch {
            release_type: Some(self.release_type.into()),
            languages: tags(&self.languages),
            genres: tags(&self.genres),
            countries: tags(&self.countries),
        }
    }
}

fn parse_week_start(value: &str) -> Result<WeekStart, String> {
    WeekStart::parse(value).ok_or_else(|| format!("expected sunday or monday, got '{value}'"))
}

fn parse_month(value: &str) -> Result<YearMonth, String> {
    let invalid = || format!("expected YYYY-MM, got '{value}'");
    let (year, month) = value.split_once('-').ok_or_else(invalid)?;
    let year = year.parse::<i32>().map_err(|_| invalid())?;
    let month = month.parse::<u32>().map_err(|_| invalid())?;
    YearMonth::new(year, month).ok_or_else(invalid)
}

fn open_repository(settings: &Settings) -> Result<Arc<dyn ReleaseRepository>> {
    let repository = match &settings.releases_path {
        Some(path) => InMemoryReleaseRepository::from_json_file(path)?,
        None => InMemoryReleaseRepository::with_seed_catalog(),
    };
    Ok(Arc::new(repository))
}

/// Number of months from `from` to `to`.
fn month_offset(from: YearMonth, to: YearMonth) -> i64 {
    let index = |m: YearMonth| i64::from(m.year()) * 12 + i64::from(m.month() - 1);
    index(to) - index(from)
}

async fn show_month(controller: &CalendarController, target: Option<YearMonth>) -> Result<()> {
    let current = controller.snapshot().await.current_month();
    let offset = target.map_or(0, |target| month_offset(current, target));
    if offset == 0 {
        controller.reload().await?;
    }
    for _ in 0..offset.unsigned_abs() {
        if offset > 0 {
            controller.go_to_next_month().await?;
        } else {
            controller.go_to_previous_month().await?;
        }
    }
    Ok(())
}

async fn apply_view_args(controller: &CalendarController, args: &ViewArgs) -> Result<()> {
    let filters = controller.set_filters(args.filter_patch()).await;
    if filters.has_active_filters() {
        info!(active = filters.active_filter_count(), "filters applied");
    }
    if let Some(date) = args.select {
        controller
            .select_date(date)
            .await
            .with_context(|| format!("cannot select {date}"))?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let mut settings = config::load_settings();
    if let Some(path) = cli.releases {
        settings.releases_path = Some(path);
    }
    if let Some(week_start) = cli.week_start {
        settings.week_start = week_start;
    }

    let repository = open_repository(&settings)?;
    let today = cli.today.unwrap_or_else(|| SystemClock.today());
    let controller = CalendarController::new_with_dependencies(
        repository,
        Arc::new(FixedClock(today)),
        settings.week_start,
    );
    show_month(&controller, cli.month)
        .await
        .context("failed to load releases")?;

    match cli.command {
        Command::Grid(args) => {
            apply_view_args(&controller, &args).await?;
            let grid = controller.grid_view().await;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&grid)?);
            } else {
                print!("{}", render::render_grid(&grid, controller.week_start()));
            }
        }
        Command::List(args) => {
            apply_view_args(&controller, &args).await?;
            let list = controller.release_list().await;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else {
                let month = controller.snapshot().await.current_month();
                print!("{}", render::render_list(&list, month));
            }
        }
        Command::Facets { json } => {
            let facets = controller.facets().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&facets)?);
            } else {
                print!("{}", render::render_facets(&facets));
            }
        }
        Command::Notify { movie_ids, user_id } => {
            let user_id = UserId(user_id.unwrap_or(settings.user_id));
            let notifications = NotificationSync::local();
            for movie_id in movie_ids.into_iter().map(MovieId::new) {
                let enabled = notifications.toggle(user_id, &movie_id).await?;
                let state = if enabled { "on" } else { "off" };
                println!("notifications for {movie_id}: {state}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
