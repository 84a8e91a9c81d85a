mod prompt;

use clap::Parser;
use std::error::Error;
use std::io::{self, stdin, stdout};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::engine::{
  new as new_engine, parse_duration, parse_name, BrowseStep, Browser, CsvStore, DateRange,
  Navigation, Query, Task, TaskDate, ValidationError, WorkLog, WorkLogError, NO_NOTES,
};
pub use prompt::{Prompt, Terminal};

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Debug, Parser)]
#[command(name = "worklog", author, about = "Record and search a personal work log")]
struct Opts {
  /// CSV file holding the work log. Created on the first write.
  #[arg(long, short, env = "WORK_LOG_FILE", default_value = "work_log.csv")]
  file: PathBuf,

  /// Never clear the screen (it is never cleared when stdout is not a terminal)
  #[arg(long)]
  no_clear: bool,
}

/// Where control goes once a menu is left.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Flow {
  SearchMenu,
  MainMenu,
  Quit,
}

const MAIN_MENU: &str = "WORK LOG MAIN MENU
Please choose an option.
A) Add new task
B) Search existing tasks
C) Quit";

const SEARCH_MENU: &str = "SEARCH
Please choose how you would like to search.
A) View all entries
B) Exact date
C) Range of dates
D) Task duration
E) Exact search
F) Pattern search
G) Back to main menu
H) Quit";

const DATE_FORMAT_HINT: &str = "DD-MM-YYYY format:  ";

pub fn cli() -> CliResult<()> {
  let opts = Opts::parse();
  install_tracing();
  let clear = !opts.no_clear && atty::is(atty::Stream::Stdout);
  let stdin = stdin();
  let mut terminal = Terminal::new(stdin.lock(), stdout(), clear);
  run(&mut new_engine(CsvStore::new(opts.file)), &mut terminal)
}

/// Logs to stderr. Keeps an already installed global subscriber.
fn install_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .with_target(false)
    .compact()
    .try_init()
    .ok();
}

/// Runs the main menu until the user quits. Work log errors are reported and
/// lead back to the main menu; prompt errors end the session.
pub fn run<A: WorkLog, P: Prompt>(app: &mut A, prompt: &mut P) -> CliResult<()> {
  loop {
    match main_menu(app, prompt) {
      Ok(Flow::Quit) => return Ok(()),
      Ok(_) => {}
      Err(e) if e.is::<WorkLogError>() => {
        error!(error = %e, "work log operation failed");
        prompt.say(&format!("Sorry, something went wrong: {e}"))?;
        pause(prompt, "Press enter to go back to the main menu.")?;
      }
      Err(e) => return Err(e),
    }
  }
}

fn main_menu<A: WorkLog, P: Prompt>(app: &mut A, prompt: &mut P) -> CliResult<Flow> {
  prompt.clear_display()?;
  prompt.say(MAIN_MENU)?;
  match prompt.prompt_choice(">  ", &['a', 'b', 'c'])? {
    'a' => add_task(app, prompt),
    'b' => search_menu(app, prompt),
    _ => Ok(Flow::Quit),
  }
}

fn pause<P: Prompt>(prompt: &mut P, message: &str) -> io::Result<()> {
  prompt.prompt_line(message).map(|_| ())
}

fn read_valid<P: Prompt, T>(
  prompt: &mut P,
  message: &str,
  parse: impl Fn(&str) -> Result<T, ValidationError>,
) -> io::Result<T> {
  loop {
    let input = prompt.prompt_line(message)?;
    match parse(&input) {
      Ok(value) => return Ok(value),
      Err(e) => prompt.say(&e.to_string())?,
    }
  }
}

fn read_date<P: Prompt>(prompt: &mut P, message: &str) -> io::Result<TaskDate> {
  read_valid(prompt, &format!("{message} {DATE_FORMAT_HINT}"), str::parse::<TaskDate>)
}

fn add_task<A: WorkLog, P: Prompt>(app: &mut A, prompt: &mut P) -> CliResult<Flow> {
  prompt.clear_display()?;
  let name = read_valid(prompt, "Please enter the title of your task?:  ", parse_name)?;
  let date = read_date(prompt, "Please enter the date of your task in")?;
  let duration = read_valid(
    prompt,
    "Please enter the duration of your task in minutes:  ",
    parse_duration,
  )?;
  let wants_notes = prompt.prompt_line("Do you wish to add some notes about this task? Y/N  ")?;
  let notes = if wants_notes.trim().eq_ignore_ascii_case("y") {
    prompt.prompt_line("Add notes:  ")?
  } else {
    NO_NOTES.into()
  };

  prompt.clear_display()?;
  match app.create_task(Task::new(name, date, duration, notes)) {
    Ok(()) => pause(prompt, "Task saved! Press enter to continue.  ")?,
    Err(WorkLogError::Duplicate) => pause(
      prompt,
      "This task already exists. Task has not been added.\nPress enter to go back to the main menu.",
    )?,
    Err(e) => return Err(e.into()),
  }
  Ok(Flow::MainMenu)
}

fn read_exact_date<A: WorkLog, P: Prompt>(app: &A, prompt: &mut P) -> CliResult<Query> {
  prompt.say("DATES WITH TASKS")?;
  for date in app.known_dates()? {
    prompt.say(&date.to_string())?;
  }
  let date = read_date(
    prompt,
    "The above dates have tasks. Please enter the date of your task in",
  )?;
  Ok(Query::ExactDate(date))
}

fn read_date_range<P: Prompt>(prompt: &mut P) -> io::Result<Query> {
  prompt.say("Search between two dates.")?;
  loop {
    let start = read_date(prompt, "Enter the start date to begin in")?;
    let end = read_date(prompt, "Enter the end date in")?;
    match DateRange::new(start, end) {
      Ok(range) => return Ok(Query::DateRange(range)),
      Err(e) => prompt.say(&format!("Sorry. {e} Please try again."))?,
    }
  }
}

fn search_menu<A: WorkLog, P: Prompt>(app: &mut A, prompt: &mut P) -> CliResult<Flow> {
  loop {
    prompt.clear_display()?;
    match app.searchable_tasks() {
      Ok(_) => {}
      Err(WorkLogError::EmptyStore) => {
        pause(
          prompt,
          "Sorry! There are no tasks to search. Press enter to go and add some!",
        )?;
        return add_task(app, prompt);
      }
      Err(e) => return Err(e.into()),
    }

    prompt.say(SEARCH_MENU)?;
    let choice = prompt.prompt_choice(
      "Please choose an option. ",
      &['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'],
    )?;
    let results = loop {
      let query = match choice {
        'a' => Query::All,
        'b' => read_exact_date(app, prompt)?,
        'c' => read_date_range(prompt)?,
        'd' => Query::Duration(read_valid(
          prompt,
          "Search by duration of task.\nPlease enter a number of minutes to search by:   ",
          parse_duration,
        )?),
        'e' => Query::Text(prompt.prompt_line(
          "This will search the task name and notes for an exact term. Please enter:   ",
        )?),
        'f' => read_valid(
          prompt,
          "This will search regular expression. Please enter:   ",
          Query::pattern,
        )?,
        'g' => return Ok(Flow::MainMenu),
        _ => return Ok(Flow::Quit),
      };
      match app.search(&query) {
        Ok(results) => break results,
        Err(WorkLogError::NoMatches) => {
          prompt.clear_display()?;
          prompt.say("Sorry. No matches. Please try again.")?;
        }
        Err(e) => return Err(e.into()),
      }
    };

    match browse(app, prompt, results)? {
      Flow::SearchMenu => {}
      flow => return Ok(flow),
    }
  }
}

fn browse<A: WorkLog, P: Prompt>(
  app: &mut A,
  prompt: &mut P,
  results: Vec<Task>,
) -> CliResult<Flow> {
  let Some(mut browser) = Browser::new(results) else {
    return Ok(Flow::SearchMenu);
  };
  prompt.clear_display()?;
  loop {
    prompt.say(&format!("{}\n", browser.current()))?;
    prompt.say(&format!(
      "Entry {} of {}.",
      browser.cursor() + 1,
      browser.len()
    ))?;
    let options: Vec<_> = browser.available().into_iter().map(Navigation::label).collect();
    let answer = prompt.prompt_line(&format!("{}\n>", options.join(", ")))?;

    match answer.parse().and_then(|nav| browser.apply(nav)) {
      Ok(BrowseStep::Moved) => prompt.clear_display()?,
      Ok(BrowseStep::Back) => return Ok(Flow::SearchMenu),
      Ok(BrowseStep::Edit(task)) => return edit_task(app, prompt, &task),
      Ok(BrowseStep::Delete(task)) => {
        let confirmation = prompt.prompt_line("Are you sure? Y/N: ")?;
        if confirmation.trim().eq_ignore_ascii_case("y") {
          app.delete_task(&task)?;
          prompt.clear_display()?;
          pause(prompt, "Task deleted. Press enter to continue.")?;
          return Ok(Flow::MainMenu);
        }
      }
      Err(e) => prompt.say(&e.to_string())?,
    }
  }
}

fn edit_task<A: WorkLog, P: Prompt>(app: &mut A, prompt: &mut P, old: &Task) -> CliResult<Flow> {
  prompt.clear_display()?;
  prompt.say(&format!("Old task name: {}", old.name))?;
  let name = read_valid(prompt, "Please enter a new task name:  ", parse_name)?;
  prompt.say(&format!("Old date: {}", old.date))?;
  let date = read_date(prompt, "Please enter a new date in")?;
  prompt.say(&format!("Old duration of task: {}", old.duration))?;
  let duration = read_valid(
    prompt,
    "Please enter a duration of your task in minutes:  ",
    parse_duration,
  )?;
  prompt.say(&format!("Old notes: {}", old.notes))?;
  let notes =
    prompt.prompt_line("Please enter task notes. (Optional, empty keeps the old notes):  ")?;
  let notes = if notes.is_empty() {
    old.notes.clone()
  } else {
    notes
  };

  prompt.clear_display()?;
  match app.edit_task(old, Task::new(name, date, duration, notes)) {
    Ok(()) => pause(prompt, "Task updated. Press enter to continue.")?,
    Err(WorkLogError::Duplicate) => pause(
      prompt,
      "Sorry. This entry already exists. Press enter to go back to the main menu.",
    )?,
    Err(e) => return Err(e.into()),
  }
  Ok(Flow::MainMenu)
}
