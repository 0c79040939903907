use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use mailer_core::{update, AppState, Msg, ProcessState};
use mailer_logging::{mailer_info, mailer_warn};

use super::config;
use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::ui::commands::{parse_command, Command, HELP_TEXT};
use super::ui::render::render;

/// Tick interval for polling engine events between keystrokes.
const TICK: Duration = Duration::from_millis(75);

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::from_env());

    let runner = EffectRunner::new(config::engine_config()).context("failed to start engine")?;
    let mut app = App::new(runner);
    let mut input = Some(spawn_input_reader()?);

    println!("{HELP_TEXT}");
    app.print_view();

    let mut quitting = false;
    loop {
        match input.as_ref().map(|rx| rx.recv_timeout(TICK)) {
            Some(Ok(command)) => quitting |= app.handle_command(command),
            Some(Err(RecvTimeoutError::Timeout)) => app.dispatch(Msg::Tick),
            Some(Err(RecvTimeoutError::Disconnected)) => {
                input = None;
                quitting = true;
            }
            None => thread::sleep(TICK),
        }

        for msg in app.runner.poll() {
            app.dispatch(msg);
        }

        if quitting {
            if app.state.process() != ProcessState::Sending {
                break;
            }
            if !app.waiting_notice_shown {
                println!("Waiting for the outstanding submission to finish...");
                app.waiting_notice_shown = true;
            }
        }
    }

    mailer_info!("Exiting");
    Ok(())
}

fn spawn_input_reader() -> io::Result<mpsc::Receiver<Command>> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("mailer-input".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(parse_command(&line)).is_err() {
                    return;
                }
            }
            let _ = tx.send(Command::Quit);
        })?;
    Ok(rx)
}

struct App {
    state: AppState,
    runner: EffectRunner,
    waiting_notice_shown: bool,
}

impl App {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
            waiting_notice_shown: false,
        }
    }

    /// Returns true when the user asked to quit.
    fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::Dispatch(msg) => self.dispatch(msg),
            Command::Help => println!("{HELP_TEXT}"),
            Command::Quit => return true,
            Command::Empty => self.prompt(),
            Command::Unknown(verb) => {
                mailer_warn!("Unknown command {:?}", verb);
                println!("Unknown command \"{verb}\", type help for the list.");
                self.prompt();
            }
        }
        false
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);
        if was_dirty {
            self.print_view();
        }
    }

    fn print_view(&self) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out);
        for line in render(&self.state.view()) {
            let _ = writeln!(out, "{line}");
        }
        drop(out);
        self.prompt();
    }

    fn prompt(&self) {
        let mut out = io::stdout().lock();
        let _ = write!(out, "> ");
        let _ = out.flush();
    }
}
