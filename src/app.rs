//! Line-oriented console: menus, form prompts and the dashboard view.

use std::fmt::Write as _;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::error;

use crate::error::AppError;
use crate::exercises::{ExerciseSuggestion, TIP};
use crate::meals::{common_meal, MealLog, COMMON_MEALS};
use crate::session::{Session, SessionState};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Login,
    Register,
    Add,
    Meals,
    Exercises,
    Logout,
    Help,
    Quit,
}

impl Command {
    fn parse(input: &str) -> Option<Self> {
        let cmd = match input.trim().to_ascii_lowercase().as_str() {
            "login" | "l" => Self::Login,
            "register" | "r" => Self::Register,
            "add" | "a" => Self::Add,
            "meals" | "m" | "list" => Self::Meals,
            "exercises" | "e" => Self::Exercises,
            "logout" | "o" => Self::Logout,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => return None,
        };
        Some(cmd)
    }
}

struct Console<R, W> {
    lines: Lines<R>,
    out: W,
    session: Session,
}

/// Drives one interactive session until `quit` or end of input.
pub async fn run<R, W>(state: AppState, input: R, out: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut console = Console {
        lines: input.lines(),
        out,
        session: Session::new(state),
    };
    console.say("Welcome to the Tracker").await?;
    console.menu().await?;

    while let Some(line) = console.prompt("> ").await? {
        if line.trim().is_empty() {
            continue;
        }
        let Some(cmd) = Command::parse(&line) else {
            console
                .say(&format!("Unknown command `{}`. Type `help` for options.", line.trim()))
                .await?;
            continue;
        };
        if cmd == Command::Quit {
            break;
        }
        console.dispatch(cmd).await?;
    }

    console.session.logout();
    console.say("Goodbye.").await?;
    Ok(())
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    async fn say(&mut self, text: &str) -> std::io::Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        if !text.ends_with('\n') {
            self.out.write_all(b"\n").await?;
        }
        self.out.flush().await
    }

    async fn prompt(&mut self, label: &str) -> std::io::Result<Option<String>> {
        self.out.write_all(label.as_bytes()).await?;
        self.out.flush().await?;
        self.lines.next_line().await
    }

    /// `title` names the form that failed; faults outside the user's input
    /// are always reported under a plain `Error`.
    async fn report(&mut self, title: &str, err: AppError) -> std::io::Result<()> {
        let title = match err {
            AppError::Storage(_) | AppError::Migration(_) | AppError::PasswordHash(_) => {
                error!(error = %err, "action failed");
                "Error"
            }
            _ => title,
        };
        self.say(&format!("{title}: {err}")).await
    }

    async fn menu(&mut self) -> std::io::Result<()> {
        let text = if matches!(self.session.state(), SessionState::Authenticated(_)) {
            "Commands: add, meals, exercises, logout, quit"
        } else {
            "Commands: login, register, quit"
        };
        self.say(text).await
    }

    async fn dispatch(&mut self, cmd: Command) -> std::io::Result<()> {
        let authed = self.session.current_user().is_some();
        match (cmd, authed) {
            (Command::Help, _) => self.menu().await,
            (Command::Login, false) => self.login().await,
            (Command::Register, false) => self.register().await,
            (Command::Add, true) => self.add_meal().await,
            (Command::Meals, true) => self.show_dashboard().await,
            (Command::Exercises, true) => self.show_exercises().await,
            (Command::Logout, true) => {
                self.session.logout();
                self.say("Logged out.").await?;
                self.menu().await
            }
            (Command::Login | Command::Register, true) => {
                self.say("Already logged in. Use `logout` first.").await
            }
            (_, false) => self.report("Error", AppError::NotAuthenticated).await,
            (Command::Quit, true) => Ok(()),
        }
    }

    /// Reads a username/password pair. `None` on end of input.
    async fn credentials(&mut self) -> std::io::Result<Option<(String, String)>> {
        let Some(username) = self.prompt("Username: ").await? else {
            return Ok(None);
        };
        let Some(password) = self.prompt("Password: ").await? else {
            return Ok(None);
        };
        Ok(Some((username, password)))
    }

    async fn login(&mut self) -> std::io::Result<()> {
        let Some((username, password)) = self.credentials().await? else {
            return Ok(());
        };
        match self.session.login(&username, &password).await {
            Ok(user) => {
                let name = user.username.clone();
                self.say(&format!("Calorie Counter - Logged in as: {name}")).await?;
                self.show_dashboard().await?;
                self.show_exercises().await?;
                self.menu().await
            }
            Err(e) => self.report("Login Error", e).await,
        }
    }

    async fn register(&mut self) -> std::io::Result<()> {
        let Some((username, password)) = self.credentials().await? else {
            return Ok(());
        };
        match self.session.register(&username, &password).await {
            Ok(_) => {
                self.say("Registration successful! You can now log in.")
                    .await
            }
            Err(e) => self.report("Registration Error", e).await,
        }
    }

    async fn add_meal(&mut self) -> std::io::Result<()> {
        self.say(&render_common_meals()).await?;
        let Some(meal) = self.prompt("Meal/Item: ").await? else {
            return Ok(());
        };
        let meal = common_meal(&meal).map(str::to_owned).unwrap_or(meal);
        let Some(calories) = self.prompt("Calories: ").await? else {
            return Ok(());
        };
        match self.session.submit_meal(&meal, &calories).await {
            Ok(log) => self.say(&render_meal_log(&log)).await,
            Err(e) => self.report("Input Error", e).await,
        }
    }

    async fn show_dashboard(&mut self) -> std::io::Result<()> {
        match self.session.meal_log().await {
            Ok(log) => self.say(&render_meal_log(&log)).await,
            Err(e) => self.report("Error", e).await,
        }
    }

    async fn show_exercises(&mut self) -> std::io::Result<()> {
        match self.session.view_exercises() {
            Ok(list) => self.say(&render_exercises(list)).await,
            Err(e) => self.report("Error", e).await,
        }
    }
}

fn render_common_meals() -> String {
    let mut s = String::from("Common meals (type a number or any name):\n");
    for (i, name) in COMMON_MEALS.iter().enumerate() {
        let _ = writeln!(s, "  {}. {name}", i + 1);
    }
    s
}

pub fn render_meal_log(log: &MealLog) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "Total Calories: {} kcal", log.total);
    s.push_str("--- Today's Entries ---\n");
    if log.entries.is_empty() {
        s.push_str("No entries tracked yet. Add a meal above!\n");
    }
    for entry in &log.entries {
        let _ = writeln!(s, "{}: {} kcal", entry.meal_name, entry.calories);
    }
    s
}

pub fn render_exercises(list: &[ExerciseSuggestion]) -> String {
    let mut s = String::from("Daily Exercise Goal\n");
    for ex in list {
        let _ = writeln!(s, "  {}", ex.name);
        let _ = writeln!(s, "    Burn Est.: {} kcal", ex.calories_burned);
    }
    let _ = writeln!(s, "{TIP}");
    s
}
