//! Message-only window IPC endpoint.
//!
//! This binary registers a shared window message, opens a message-only window that listens
//! for it, and logs every instance it receives until Ctrl+C (which posts WM_QUIT to the pump
//! thread) or an external `WM_QUIT` stops the loop.
//!
//! High-level flow:
//! 1. Parse CLI (message, class and window names plus verbosity flags).
//! 2. Initialize tracing from the flags or RUST_LOG.
//! 3. Resolve the user32 entry points and open the endpoint on the main thread.
//! 4. Optionally broadcast the registered message carrying our window handle.
//! 5. Run the message loop; its quit code becomes the process exit code.

use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use winmsg_ipc::cli::Cli;
use winmsg_ipc::logging::configure_logging;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    configure_logging(cli.log_level());
    info!(version = env!("CARGO_PKG_VERSION"), "starting");
    run(&cli)
}

#[cfg(windows)]
fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    use std::rc::Rc;

    use anyhow::Context;
    use tracing::{debug, error, warn};
    use winmsg_ipc::send::post_quit;
    use winmsg_ipc::types::{LParam, LResult, MessageId, WParam, WindowHandle};
    use winmsg_ipc::win32::User32;
    use winmsg_ipc::{IpcEndpoint, MessageHandler};

    let api = User32::load()?;
    let endpoint = IpcEndpoint::open(Rc::new(api), &cli.endpoint_config(), |id| {
        let handler: Rc<dyn MessageHandler> =
            Rc::new(move |window: WindowHandle, message: MessageId, wparam: WParam, lparam: LParam| {
                if message != id {
                    return None;
                }
                info!(?window, wparam = wparam.0, lparam = lparam.0, "IPC message received");
                Some(LResult(1))
            });
        handler
    })
    .context("open IPC endpoint")?;

    // Ctrl+C runs on its own thread; quit is delivered to the pump thread's queue.
    let main_tid = endpoint.thread_id();
    ctrlc::set_handler(move || {
        info!("Ctrl+C received, shutting down");
        if let Err(e) = post_quit(&api, main_tid, 0) {
            error!(error = %e, "failed to stop message loop");
        }
    })
    .context("install Ctrl+C handler")?;

    if cli.announce {
        endpoint.announce(LParam(0))?;
        debug!(window = ?endpoint.window(), "endpoint announced");
    }

    let code = endpoint.run()?;
    info!(code, "message loop finished");
    let status = u8::try_from(code).unwrap_or_else(|_| {
        warn!(code, "quit code does not fit a process exit status; using 255");
        u8::MAX
    });
    Ok(ExitCode::from(status))
}

#[cfg(not(windows))]
fn run(_cli: &Cli) -> anyhow::Result<ExitCode> {
    anyhow::bail!("message-only windows require Windows")
}
