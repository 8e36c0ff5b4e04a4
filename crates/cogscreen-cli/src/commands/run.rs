//! The `cogscreen run` command: an interactive session on stdin/stdout.
//!
//! Input lines and countdown ticks are multiplexed on one task, so the
//! session sees them strictly one at a time.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

use cogscreen_core::config::{load_config_from, validate_config};
use cogscreen_core::model::Stage;
use cogscreen_core::session::{Feedback, Prompt, Session};
use cogscreen_core::subtests::AddAnimal;
use cogscreen_core::timer::TickOutcome;

use super::score::breakdown_table;

enum Control {
    Continue,
    Quit,
}

pub async fn execute(
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    word_bank: Option<PathBuf>,
    json: bool,
    report_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if seed.is_some() {
        config.seed = seed;
    }
    if word_bank.is_some() {
        config.word_bank = word_bank;
    }
    for w in validate_config(&config) {
        tracing::warn!("{}", w.message);
    }

    let mut session = Session::from_config(&config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(config.timing.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    render(&session);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read input")? else {
                    if !session.is_complete() {
                        println!("\nSession ended before completion.");
                    }
                    break;
                };

                let before = session.stage();
                if let Control::Quit = handle_line(&mut session, &line)? {
                    break;
                }
                let after = session.stage();
                if after != before && after.is_timed() {
                    ticker.reset();
                }
                if after != before || redraw_in_place(after) {
                    render(&session);
                }
            }
            _ = ticker.tick(), if session.countdown().is_some() => {
                match session.tick() {
                    TickOutcome::Ticked { remaining } => {
                        if remaining % 10 == 0 || remaining <= 5 {
                            println!("  {remaining}s left");
                        }
                    }
                    TickOutcome::Expired => {
                        println!("\nTime is up.");
                        render(&session);
                    }
                    TickOutcome::Idle => {}
                }
            }
        }
    }

    if session.is_complete() {
        println!("\n{}", breakdown_table(&session.scores()));
    }

    let report = session.report();
    if json {
        println!("{}", report.to_json()?);
    }
    if let Some(path) = report_path {
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

/// Apply one line of input to the session.
fn handle_line(session: &mut Session, line: &str) -> Result<Control> {
    let input = line.trim();

    match session.stage() {
        Stage::Results => {
            if matches!(input.to_lowercase().as_str(), "r" | "restart") {
                session.restart();
            } else {
                return Ok(Control::Quit);
            }
        }
        Stage::Fluency if input.is_empty() || input.eq_ignore_ascii_case("done") => {
            session.finish_fluency()?;
        }
        // Blank lines do not consume a trial.
        Stage::Stroop if input.is_empty() => {}
        Stage::Stroop => {
            session.submit(expand_color(input))?;
        }
        stage if stage.accepts_input() => {
            let feedback = session.submit(input)?;
            print_feedback(&feedback);
        }
        _ => {
            session.advance()?;
        }
    }

    Ok(Control::Continue)
}

/// Single-letter shortcuts for the four ink colors.
fn expand_color(input: &str) -> &str {
    match input.to_lowercase().as_str() {
        "r" => "red",
        "b" => "blue",
        "g" => "green",
        "y" => "yellow",
        _ => input,
    }
}

/// Stages whose prompt changes without a stage change.
fn redraw_in_place(stage: Stage) -> bool {
    matches!(
        stage,
        Stage::Orientation | Stage::DigitSpanForward | Stage::DigitSpanBackward | Stage::Stroop
    )
}

fn print_feedback(feedback: &Feedback) {
    match feedback {
        Feedback::Animal(AddAnimal::Added { count, recent }) => {
            println!("  Animals named: {count}  Recent: {recent}");
        }
        Feedback::Animal(AddAnimal::TooShort) => println!("  Please type an animal name."),
        Feedback::Animal(AddAnimal::Duplicate) => println!("  Already named."),
        _ => {}
    }
}

fn render(session: &Session) {
    let Prompt {
        heading,
        lines,
        countdown,
        ink,
    } = session.prompt();

    println!("\n== {heading} ==");
    for (i, line) in lines.iter().enumerate() {
        match ink {
            // The Stroop word is the last line.
            Some(rgba) if i + 1 == lines.len() => println!("{}", paint(line, rgba)),
            _ => println!("{line}"),
        }
    }
    if let Some(secs) = countdown {
        println!("({secs}s remaining)");
    }
    if let Some(hint) = hint(session.stage()) {
        println!("{hint}");
    }
}

/// Wrap text in a 24-bit ANSI foreground color.
fn paint(text: &str, rgba: [f32; 4]) -> String {
    let [r, g, b, _] = rgba.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    format!("\x1b[1;38;2;{r};{g};{b}m{text}\x1b[0m")
}

fn hint(stage: Stage) -> Option<&'static str> {
    match stage {
        Stage::Results => Some("Type 'r' to restart, or press Enter to quit."),
        Stage::FiveWords => Some("Press Enter when you are ready."),
        Stage::Fluency => Some("Type one animal per line. A blank line or 'done' finishes."),
        Stage::Stroop => Some("Type the ink color: red, blue, green, yellow (or r/b/g/y)."),
        s if s.accepts_input() => None,
        _ => Some("Press Enter to continue."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_shortcuts() {
        assert_eq!(expand_color("r"), "red");
        assert_eq!(expand_color("Y"), "yellow");
        assert_eq!(expand_color("green"), "green");
        assert_eq!(expand_color(""), "");
    }

    #[test]
    fn paint_uses_truecolor() {
        assert_eq!(
            paint("RED", [1.0, 0.2, 0.2, 1.0]),
            "\x1b[1;38;2;255;51;51mRED\x1b[0m"
        );
    }
}
