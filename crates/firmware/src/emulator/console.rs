//! Console touch input.
//!
//! One command per line on stdin stands in for the touch screen:
//!
//! | Line | Widget |
//! |---|---|
//! | `n` | next button |
//! | `p` | previous button |
//! | `t`, space or empty | play/pause button |
//! | `v <0-100>` | volume slider |
//! | `r` | rescan the card |
//! | `q` | quit |

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;
use embassy_sync::mutex::Mutex;
use platform::{AudioSink, InputEvent, Widget};
use playback::Command;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use ui::{Control, ControlRouter};

use super::display::EmulatorDisplay;

/// What a console line asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleAction {
    /// A touch on a widget.
    Input(InputEvent),
    /// Rebuild the catalog.
    Rescan,
    /// Leave the emulator.
    Quit,
}

/// Parse one console line. `None` for anything unrecognised.
pub fn parse_line(line: &str) -> Option<ConsoleAction> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Some(ConsoleAction::Input(InputEvent::Clicked(Widget::PlayPause)));
    }
    let mut words = line.split_whitespace();
    let action = match words.next()? {
        "n" => ConsoleAction::Input(InputEvent::Clicked(Widget::Next)),
        "p" => ConsoleAction::Input(InputEvent::Clicked(Widget::Previous)),
        "t" => ConsoleAction::Input(InputEvent::Clicked(Widget::PlayPause)),
        "v" => {
            let level = words.next()?.parse::<u8>().ok()?;
            ConsoleAction::Input(InputEvent::VolumeChanged(level))
        }
        "r" => ConsoleAction::Rescan,
        "q" => ConsoleAction::Quit,
        _ => return None,
    };
    if words.next().is_some() {
        return None;
    }
    Some(action)
}

/// Read console lines until `q` or end of input.
///
/// Volume moves the on-screen slider before the router applies it to the
/// sink, as dragging the real slider would.
pub async fn run_console<R, CM, SM, DM, A, const N: usize>(
    input: R,
    router: &ControlRouter<'_, CM, SM, A, N>,
    commands: Sender<'_, CM, Command, N>,
    display: &Mutex<DM, EmulatorDisplay>,
) where
    R: AsyncBufRead + Unpin,
    CM: RawMutex,
    SM: RawMutex,
    DM: RawMutex,
    A: AudioSink,
{
    let mut lines = input.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                tracing::info!("console closed");
                return;
            }
            Err(e) => {
                tracing::error!(error = %e, "console read failed");
                return;
            }
        };
        let Some(action) = parse_line(&line) else {
            tracing::warn!(line = line.as_str(), "unknown console command");
            continue;
        };
        match action {
            ConsoleAction::Quit => return,
            ConsoleAction::Rescan => commands.send(Command::Rescan).await,
            ConsoleAction::Input(event) => {
                if let Control::Volume(level) = Control::from_input(event) {
                    display.lock().await.set_volume(level);
                }
                if let Err(e) = router.dispatch(event).await {
                    tracing::error!(error = %e, "control failed");
                }
            }
        }
    }
}
