/*
 * A line-oriented console surface. Each input line is translated into an
 * `AppEvent` and handed to the event handler; afterwards every queued
 * `PlatformCommand` is dequeued and executed by writing to the output.
 *
 * Recognized input lines:
 *   search <text>   subtree <key>   all
 *   toggle <key>    expand <key>    show
 *   lowest <key>    quit
 */
use super::error::{PlatformError, Result as PlatformResult};
use super::text_renderer::TextRenderer;
use super::types::{AppEvent, MessageSeverity, PlatformCommand, PlatformEventHandler};
use crate::core::NodeKey;
use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex};

#[derive(Debug, PartialEq)]
enum ConsoleInput {
    Event(AppEventKind),
    Quit,
    Blank,
    Unknown(String),
}

// `AppEvent` minus the variants only the application itself raises.
#[derive(Debug, PartialEq)]
enum AppEventKind {
    Search(String),
    Toggle(NodeKey),
    Lowest(NodeKey),
    Subtree(NodeKey),
    Expand(NodeKey),
    SelectAll,
    Show,
}

impl AppEventKind {
    fn into_event(self) -> AppEvent {
        match self {
            AppEventKind::Search(text) => AppEvent::SearchTextChanged { text },
            AppEventKind::Toggle(key) => AppEvent::ItemToggled { key },
            AppEventKind::Lowest(key) => AppEvent::LowestToggled { key },
            AppEventKind::Subtree(key) => AppEvent::SubtreeToggled { key },
            AppEventKind::Expand(key) => AppEvent::ExpandToggled { key },
            AppEventKind::SelectAll => AppEvent::SelectAllClicked,
            AppEventKind::Show => AppEvent::RefreshRequested,
        }
    }
}

fn parse_input_line(line: &str) -> ConsoleInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ConsoleInput::Blank;
    }
    let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (trimmed, ""),
    };
    let key = || NodeKey::new(rest);
    let kind = match (verb, rest.is_empty()) {
        // The raw remainder is passed through; normalization belongs to the filter.
        ("search", _) => AppEventKind::Search(rest.to_string()),
        ("toggle", false) => AppEventKind::Toggle(key()),
        ("lowest", false) => AppEventKind::Lowest(key()),
        ("subtree", false) => AppEventKind::Subtree(key()),
        ("expand", false) => AppEventKind::Expand(key()),
        ("all", _) => AppEventKind::SelectAll,
        ("show", _) => AppEventKind::Show,
        ("quit", _) | ("exit", _) => return ConsoleInput::Quit,
        _ => return ConsoleInput::Unknown(trimmed.to_string()),
    };
    ConsoleInput::Event(kind)
}

pub struct PlatformInterface {
    app_name: String,
}

impl PlatformInterface {
    pub fn new(app_name: impl Into<String>) -> Self {
        PlatformInterface {
            app_name: app_name.into(),
        }
    }

    // Writes the effect of one command to `output`.
    pub fn execute_command(
        &self,
        command: PlatformCommand,
        output: &mut dyn Write,
    ) -> PlatformResult<()> {
        match command {
            PlatformCommand::SetHeading { text } => {
                writeln!(output, "== {text} ==")?;
            }
            PlatformCommand::PopulateTreeView { items } => {
                for line in TextRenderer::render_tree(&items) {
                    writeln!(output, "{line}")?;
                }
            }
            PlatformCommand::SetSelectAllLabel { label } => {
                if let Some(label) = label {
                    writeln!(output, "[{label}]")?;
                }
            }
            PlatformCommand::UpdateStatusText { text, severity } => {
                let prefix = match severity {
                    MessageSeverity::Information => "info",
                    MessageSeverity::Warning => "warning",
                };
                writeln!(output, "{prefix}: {text}")?;
            }
        }
        Ok(())
    }

    fn drain_commands(
        &self,
        event_handler: &Arc<Mutex<dyn PlatformEventHandler>>,
        output: &mut dyn Write,
    ) -> PlatformResult<()> {
        loop {
            let command = {
                let mut handler = event_handler
                    .lock()
                    .map_err(|_| PlatformError::HandlerUnavailable)?;
                handler.try_dequeue_command()
            };
            let Some(command) = command else {
                return Ok(());
            };
            log::trace!("Platform: Executing {command:?}");
            self.execute_command(command, output)?;
        }
    }

    fn dispatch(
        &self,
        event_handler: &Arc<Mutex<dyn PlatformEventHandler>>,
        event: AppEvent,
    ) -> PlatformResult<()> {
        let mut handler = event_handler
            .lock()
            .map_err(|_| PlatformError::HandlerUnavailable)?;
        handler.handle_event(event);
        Ok(())
    }

    /*
     * Runs until `input` is exhausted or a quit is requested. Commands queued
     * before the loop starts (e.g. from an initial catalog load) are executed
     * first.
     */
    pub fn run(
        &self,
        event_handler: Arc<Mutex<dyn PlatformEventHandler>>,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> PlatformResult<()> {
        log::debug!("Platform: Console loop for '{}' starting.", self.app_name);
        self.drain_commands(&event_handler, output)?;
        let mut line = String::new();
        loop {
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            match parse_input_line(&line) {
                ConsoleInput::Event(kind) => {
                    self.dispatch(&event_handler, kind.into_event())?;
                    self.drain_commands(&event_handler, output)?;
                }
                ConsoleInput::Quit => break,
                ConsoleInput::Blank => {}
                ConsoleInput::Unknown(text) => {
                    log::warn!("Platform: Unrecognized input '{text}'.");
                    writeln!(output, "warning: unrecognized command '{text}'")?;
                }
            }
            output.flush()?;
        }
        event_handler
            .lock()
            .map_err(|_| PlatformError::HandlerUnavailable)?
            .on_quit();
        log::debug!("Platform: Console loop exited cleanly.");
        Ok(())
    }
}
