use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use manyapps_ui::{AppServices, Command, Shell};

fn main() -> Result<()> {
    // Initialize core
    manyapps_core::init()?;

    let mut app = manyapps_core::App::new()?;
    let services = AppServices::new().context("Failed to start async runtime")?;
    let request_timeout = Duration::from_secs(app.config().weather.timeout_secs + 1);

    tracing::info!("ManyApps started");

    let mut shell = Shell::new(app.context(), services);
    let mut stdout = io::stdout();
    print_page(&mut stdout, &shell)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read input")?;
        shell.handle_command(Command::parse(&line));
        if !shell.is_running() {
            break;
        }

        if shell.is_busy() {
            print_page(&mut stdout, &shell)?;
            if !shell.wait_idle(request_timeout) {
                tracing::warn!("Weather request still pending after {:?}", request_timeout);
            }
        }
        shell.pump();
        print_page(&mut stdout, &shell)?;
    }

    // Graceful shutdown
    shell.shutdown();
    app.shutdown()?;

    Ok(())
}

fn print_page(out: &mut impl Write, shell: &Shell) -> Result<()> {
    write!(out, "{}> ", shell.render())?;
    out.flush()?;
    Ok(())
}
