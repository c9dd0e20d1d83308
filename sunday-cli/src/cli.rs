use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use inquire::{Password, PasswordDisplayMode};
use sunday_core::{
    Action, App, Config, ServiceId, Services, Theme, ThemeStore, suggest,
    theme::FileThemeStore,
};

use crate::{render, session};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "sunday", version, about = "5-day weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
    Toggle,
    Dark,
    Light,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key for a service.
    Configure {
        /// Service short name: "openweather" or "opencage".
        service: String,

        /// Language requested from the services, e.g. "en".
        #[arg(long)]
        language: Option<String>,
    },

    /// Show the 5-day forecast for a city.
    Show {
        /// City name; omit with --here.
        #[arg(required_unless_present = "here")]
        city: Option<String>,

        /// Use the location from the config file.
        #[arg(long, conflicts_with = "city")]
        here: bool,

        /// Day to show in the detail panel, 1 to 5.
        #[arg(long, default_value_t = 1)]
        day: usize,

        /// Keep the local clock ticking until Ctrl-C.
        #[arg(long)]
        follow: bool,

        /// Also write an HTML snapshot of the page.
        #[arg(long, value_name = "PATH")]
        html: Option<PathBuf>,
    },

    /// List city suggestions for a partial name.
    Suggest {
        query: String,
    },

    /// Show or change the persisted theme.
    Theme {
        #[arg(value_enum)]
        mode: Option<ThemeMode>,
    },

    /// Search and flip through days interactively.
    Browse,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { service, language } => configure(&service, language),
            Command::Show { city, here, day, follow, html } => {
                show(city, here, day, follow, html).await
            }
            Command::Suggest { query } => suggest_cities(query).await,
            Command::Theme { mode } => theme(mode),
            Command::Browse => {
                let config = Config::load()?;
                let (mut app, mut rx) = App::new(Services::from_config(&config)?);
                session::browse(&mut app, &mut rx).await
            }
        }
    }
}

fn configure(service: &str, language: Option<String>) -> anyhow::Result<()> {
    let id = ServiceId::try_from(service)?;
    let mut config = Config::load()?;

    let api_key = Password::new(&format!("API key for {id}:"))
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }

    config.upsert_service_api_key(id, api_key.trim().to_string());
    if let Some(language) = language {
        config.language = language;
    }
    config.save()?;

    println!("Saved {id} key to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(
    city: Option<String>,
    here: bool,
    day: usize,
    follow: bool,
    html: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let (mut app, mut rx) = App::new(Services::from_config(&config)?);

    match city {
        Some(city) if !here => app.dispatch(Action::SubmitCity(city)),
        _ => app.dispatch(Action::UseLocation),
    }
    session::settle(&mut app, &mut rx).await?;

    if let Some(message) = app.view().strip.error() {
        bail!("{message}");
    }

    let days = app.view().strip.cards().len();
    if day == 0 || day > days {
        bail!("--day must be between 1 and {days}");
    }
    app.dispatch(Action::ClickCard(day - 1));

    print!("{}", render::text(app.view()));

    if let Some(path) = html {
        std::fs::write(&path, render::html(app.view()))
            .with_context(|| format!("Failed to write HTML snapshot: {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    if follow {
        session::follow_clock(&mut app, &mut rx).await?;
    }
    Ok(())
}

async fn suggest_cities(query: String) -> anyhow::Result<()> {
    if suggest::query_for(&query).is_none() {
        bail!("Type at least {} characters", suggest::MIN_QUERY_CHARS);
    }

    let config = Config::load()?;
    let services = Services::from_config(&config)?;
    if services.geocoder.is_none() {
        bail!(
            "No API key configured for service 'opencage'.\n\
             Hint: run `sunday configure opencage` or set {}.",
            ServiceId::OpenCage.env_var()
        );
    }

    let (mut app, mut rx) = App::new(services);
    app.dispatch(Action::Input(query));
    session::settle(&mut app, &mut rx).await?;

    for row in app.view().suggestions.rows() {
        println!("{}", row.label());
    }
    Ok(())
}

fn theme(mode: Option<ThemeMode>) -> anyhow::Result<()> {
    let store = FileThemeStore::in_dir(&Config::data_dir()?);
    let current = store.load();

    let next = match mode {
        None => current,
        Some(ThemeMode::Toggle) => current.toggled(),
        Some(ThemeMode::Dark) => Theme::Dark,
        Some(ThemeMode::Light) => Theme::Light,
    };
    if next != current {
        store.save(next)?;
    }

    println!("{}", next.as_str());
    Ok(())
}
