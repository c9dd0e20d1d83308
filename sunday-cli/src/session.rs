//! Drives an [`App`] from the terminal: pumps completions back into it and
//! runs the interactive browse loop.

use std::{io::Write, time::Duration};

use anyhow::{Context, Result, anyhow, bail};
use inquire::{InquireError, Select, Text};
use sunday_core::{
    Action, App, AppEvent,
    suggest::{SuggestionList, SuggestionRow},
};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::render;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Feed completions back into the app until nothing is outstanding.
pub async fn settle(app: &mut App, rx: &mut UnboundedReceiver<AppEvent>) -> Result<()> {
    while app.is_loading() || app.suggestions_pending() {
        let event = tokio::time::timeout(FETCH_TIMEOUT, rx.recv())
            .await
            .context("Timed out waiting for the weather service")?
            .ok_or_else(|| anyhow!("Event channel closed"))?;
        if !app.handle_event(event) {
            tracing::trace!("ignored stale completion");
        }
    }
    Ok(())
}

/// Keep the local clock line ticking until Ctrl-C.
pub async fn follow_clock(app: &mut App, rx: &mut UnboundedReceiver<AppEvent>) -> Result<()> {
    let mut stdout = std::io::stdout();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = rx.recv() => {
                let Some(event) = event else { break };
                let is_tick = matches!(event, AppEvent::ClockTick { .. });
                app.handle_event(event);
                if is_tick {
                    if let Some(text) = &app.view().clock_text {
                        write!(stdout, "\r{text}   ")?;
                        stdout.flush()?;
                    }
                }
            }
        }
    }
    writeln!(stdout)?;
    Ok(())
}

/// Run a blocking prompt off the async runtime. `None` means the user
/// cancelled.
async fn prompt<T, F>(f: F) -> Result<Option<T>>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, InquireError> + Send + 'static,
{
    match tokio::task::spawn_blocking(f).await? {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

enum DayChoice {
    Card(usize),
    ToggleTheme,
    NewSearch,
    Quit,
}

/// Interactive loop: search, pick a suggestion, then flip through days.
pub async fn browse(app: &mut App, rx: &mut UnboundedReceiver<AppEvent>) -> Result<()> {
    loop {
        let Some(input) = prompt(|| {
            Text::new("City:")
                .with_help_message("leave empty to use your configured location, Esc to quit")
                .prompt()
        })
        .await?
        else {
            return Ok(());
        };

        if input.trim().is_empty() {
            app.dispatch(Action::UseLocation);
        } else {
            app.dispatch(Action::Input(input.clone()));
            settle(app, rx).await?;
            pick_suggestion(app, &input).await?;
        }
        settle(app, rx).await?;

        if let Some(message) = app.view().strip.error() {
            eprintln!("{message}");
            continue;
        }

        loop {
            println!("{}", render::text(app.view()));
            match pick_day(app).await? {
                DayChoice::Card(index) => app.dispatch(Action::ClickCard(index)),
                DayChoice::ToggleTheme => app.dispatch(Action::ToggleTheme),
                DayChoice::NewSearch => break,
                DayChoice::Quit => return Ok(()),
            }
        }
    }
}

/// Rows on screen for the current input. Hidden rows belong to an earlier
/// search and are never offered.
fn visible_rows(list: &SuggestionList) -> &[SuggestionRow] {
    if list.is_visible() { list.rows() } else { &[] }
}

/// City rows as `(row index, label)`.
fn offered_cities(list: &SuggestionList) -> Vec<(usize, String)> {
    visible_rows(list)
        .iter()
        .enumerate()
        .filter(|(_, row)| matches!(row, SuggestionRow::City(_)))
        .map(|(i, row)| (i, row.label()))
        .collect()
}

async fn pick_suggestion(app: &mut App, input: &str) -> Result<()> {
    let list = &app.view().suggestions;
    let cities = offered_cities(list);

    if cities.is_empty() {
        if let Some(row) = visible_rows(list).first() {
            println!("{}", row.label());
        }
        app.dispatch(Action::Submit);
        return Ok(());
    }

    let mut options: Vec<String> = cities.iter().map(|(_, label)| label.clone()).collect();
    options.push(format!("Search \"{}\"", input.trim()));

    let picked = prompt(move || Select::new("Suggestions:", options).raw_prompt()).await?;
    match picked {
        Some(choice) if choice.index < cities.len() => {
            app.dispatch(Action::ClickSuggestion(cities[choice.index].0));
        }
        Some(_) => app.dispatch(Action::Submit),
        None => bail!("Search cancelled"),
    }
    Ok(())
}

async fn pick_day(app: &App) -> Result<DayChoice> {
    let cards = app.view().strip.cards();
    let mut options: Vec<String> = cards
        .iter()
        .map(|c| format!("{} {}°C {}", c.day_name, c.temperature_c, c.condition))
        .collect();
    let n = options.len();
    options.extend(["Toggle theme".to_string(), "New search".to_string(), "Quit".to_string()]);

    let picked = prompt(move || Select::new("Day:", options).raw_prompt()).await?;
    Ok(match picked.map(|c| c.index) {
        Some(i) if i < n => DayChoice::Card(i),
        Some(i) if i == n => DayChoice::ToggleTheme,
        Some(i) if i == n + 1 => DayChoice::NewSearch,
        _ => DayChoice::Quit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sunday_core::CitySuggestion;

    fn london() -> CitySuggestion {
        CitySuggestion { city: "London".into(), country: Some("UK".into()) }
    }

    #[test]
    fn offers_visible_cities_with_their_row_index() {
        let mut list = SuggestionList::default();
        list.show(vec![london()]);

        assert_eq!(offered_cities(&list), vec![(0, "London, UK".to_string())]);
    }

    #[test]
    fn hidden_rows_from_an_earlier_search_are_not_offered() {
        let mut list = SuggestionList::default();
        list.show(vec![london()]);
        // A submit hides the rows but keeps them; a failed lookup leaves them.
        list.hide();

        assert!(offered_cities(&list).is_empty());
        assert!(visible_rows(&list).is_empty());
    }

    #[test]
    fn placeholder_is_not_a_city() {
        let mut list = SuggestionList::default();
        list.show(vec![]);

        assert!(offered_cities(&list).is_empty());
        assert_eq!(visible_rows(&list).len(), 1);
    }
}
