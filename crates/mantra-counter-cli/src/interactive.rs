//! Line-driven interactive session.
//!
//! Each input line is one user action. While the target is being edited, a
//! line is submitted as the new target.

use std::io::Write;

use anyhow::Result;
use mantra_counter::store::Storage;
use mantra_counter::{Counter, Notifier};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::terminal::render;

const HELP: &str = "\
  <enter> or c   count
  r              reset count
  t              set target
  x              cancel target edit
  q              quit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Count,
    Reset,
    EditTarget,
    CancelEdit,
    Submit(String),
    Help,
    Quit,
    Unknown(String),
}

impl Input {
    pub fn parse(line: &str, editing: bool) -> Self {
        let line = line.trim();
        match (line, editing) {
            ("q" | "quit", _) => Input::Quit,
            ("?" | "h" | "help", _) => Input::Help,
            ("x" | "cancel", true) => Input::CancelEdit,
            (text, true) => Input::Submit(text.to_string()),
            ("" | "c" | "count", false) => Input::Count,
            ("r" | "reset", false) => Input::Reset,
            ("t" | "target", false) => Input::EditTarget,
            (other, false) => Input::Unknown(other.to_string()),
        }
    }
}

/// Run until `q` or end of input.
pub async fn run<S, N, R, W>(counter: &mut Counter<S, N>, input: R, out: &mut W) -> Result<()>
where
    S: Storage + 'static,
    N: Notifier,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    writeln!(out, "{}", render(&counter.state()))?;
    prompt(counter, out)?;

    while let Some(line) = lines.next_line().await? {
        match Input::parse(&line, counter.is_editing()) {
            Input::Quit => break,
            Input::Help => writeln!(out, "{}", HELP)?,
            Input::Count => {
                counter.increment();
            }
            Input::Reset => {
                counter.reset();
            }
            Input::EditTarget => {
                counter.begin_edit();
            }
            Input::CancelEdit => {
                counter.cancel_edit();
            }
            Input::Submit(text) => {
                // Rejections are already alerted; stay in editing mode.
                let _ = counter.set_target(&text);
            }
            Input::Unknown(text) => {
                writeln!(out, "unknown command {:?}, type ? for help", text)?;
            }
        }
        writeln!(out, "{}", render(&counter.state()))?;
        prompt(counter, out)?;
    }

    Ok(())
}

fn prompt<S, N, W>(counter: &Counter<S, N>, out: &mut W) -> Result<()>
where
    S: Storage + 'static,
    N: Notifier,
    W: Write,
{
    if counter.is_editing() {
        write!(out, "new target [{}]> ", counter.target())?;
    } else {
        write!(out, "> ")?;
    }
    out.flush()?;
    Ok(())
}
