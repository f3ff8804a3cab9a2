use std::io;
use std::io::Write;
use std::thread;
use std::time;

use anyhow::Context;
use clap::Parser;
use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::style;
use crossterm::terminal;
use tracing_subscriber::EnvFilter;

use torus_life::app::Life;
use torus_life::config::Args;
use torus_life::config::Config;
use torus_life::io::convert_event;

fn draw(life: &mut Life, stdout: &mut io::Stdout) -> io::Result<()> {
    let s = life.render();

    execute!(stdout, cursor::MoveTo(0, 0))?;

    for line in s.lines() {
        execute!(stdout, style::Print(line), cursor::MoveToNextLine(1))?;
    }

    stdout.flush()
}

fn run(life: &mut Life, stdout: &mut io::Stdout) -> anyhow::Result<()> {
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let frame_time = life.frame_time();

    loop {
        let t = time::Instant::now();

        // Poll events for as long as a frame lasts
        if event::poll(frame_time)? {
            if let Some(event) = convert_event(event::read()?) {
                if !life.handle_event(event) {
                    break;
                }
            }
        }

        life.step();
        draw(life, stdout)?;

        let time_left = frame_time.saturating_sub(t.elapsed());
        thread::sleep(time_left);
    }

    Ok(())
}

/// Undo everything `run` and raw mode did to the terminal, attempting every step.
fn restore_terminal(stdout: &mut io::Stdout) -> io::Result<()> {
    let shown = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
    terminal::disable_raw_mode()?;

    shown
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = Config::try_from(Args::parse()).context("Invalid arguments")?;

    // Get the width and height of the terminal
    let (cols, rows) = terminal::size().context("Failed to read terminal size")?;

    let mut life = Life::new(config, cols, rows)?;
    let mut stdout = io::stdout();

    terminal::enable_raw_mode()?;

    let res = run(&mut life, &mut stdout);
    let restored = restore_terminal(&mut stdout);

    // The error that stopped the loop matters more than a failed cleanup
    res?;
    restored.context("Failed to restore terminal")?;

    Ok(())
}
