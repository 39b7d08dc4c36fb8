use std::path::PathBuf;

use kanal::AsyncSender;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use sumi_types::{AppEvent, DropPayload, LanguageCode};

/// Terminal frontend: one command per stdin line, translated into app
/// events. EOF and `quit` both end the session; either way a final Shutdown
/// event lets the loops drain and stop in order.
pub async fn watcher_io(
    event_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    match parse_command(&line) {
                        Some(AppEvent::Shutdown) => break,
                        Some(event) => {
                            if event_tx.send(event).await.is_err() {
                                break;
                            }
                        }
                        None => {
                            if !line.trim().is_empty() {
                                tracing::warn!(input = line.trim(), "unrecognized command");
                            }
                        }
                    }
                }
                Ok(None) => break, // EOF
                Err(e) => {
                    tracing::error!("stdin read failed: {e}");
                    break;
                }
            }
        }
    }

    let _ = event_tx.send(AppEvent::Shutdown).await;
    Ok(())
}

/// Parse one line of the terminal protocol:
/// `open <path>` | `drop <path>...` | `paste` | `lang <code>` | `recognize`
/// | `copy [text]` | `info` | `quit`
pub(crate) fn parse_command(line: &str) -> Option<AppEvent> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "open" if !rest.is_empty() => Some(AppEvent::OpenImage(PathBuf::from(rest))),
        "drop" if !rest.is_empty() => {
            let paths = rest.split_whitespace().map(PathBuf::from).collect();
            Some(AppEvent::DropImage(DropPayload::Paths(paths)))
        }
        "paste" => Some(AppEvent::PasteClipboard),
        "lang" => LanguageCode::parse(rest).map(AppEvent::ChangeLanguage),
        "recognize" => Some(AppEvent::Recognize),
        "copy" => Some(AppEvent::CopyText {
            selection: (!rest.is_empty()).then(|| rest.to_string()),
        }),
        "info" => Some(AppEvent::ShowInfo),
        "quit" | "exit" => Some(AppEvent::Shutdown),
        _ => None,
    }
}
