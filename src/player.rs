use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::app::AsyncAction;
use crate::playback::MediaEvent;

/// Property id used for `observe_property`
const CACHE_OBSERVER_ID: u64 = 1;

/// Handle to the external mpv process. Cloning shares the same process.
#[derive(Clone, Default)]
pub struct Player {
    process: Arc<Mutex<Option<Child>>>,
    ipc_path: Arc<Mutex<Option<PathBuf>>>,
    session: Arc<AtomicU64>,
}

pub fn ipc_socket_path(session: u64) -> PathBuf {
    std::env::temp_dir().join(format!("beingtv-mpv-{}-{}.sock", std::process::id(), session))
}

pub fn mpv_args(url: &str, title: &str, ipc_path: &std::path::Path) -> Vec<String> {
    vec![
        url.to_string(),
        "--force-window".to_string(),
        "--no-terminal".to_string(),
        "--cache=yes".to_string(),
        "--demuxer-max-bytes=128MiB".to_string(),
        "--demuxer-max-back-bytes=32MiB".to_string(),
        "--hwdec=auto".to_string(),
        format!("--title={}", title),
        format!("--input-ipc-server={}", ipc_path.display()),
    ]
}

#[derive(Deserialize)]
struct IpcMessage {
    event: Option<String>,
    name: Option<String>,
    data: Option<serde_json::Value>,
}

/// Map one line of mpv's JSON IPC output to a media signal
pub fn parse_ipc_line(line: &str) -> Option<MediaEvent> {
    let msg: IpcMessage = serde_json::from_str(line).ok()?;
    match msg.event.as_deref()? {
        "file-loaded" => Some(MediaEvent::CanPlay),
        "playback-restart" => Some(MediaEvent::Playing),
        "seek" => Some(MediaEvent::Waiting),
        "property-change" if msg.name.as_deref() == Some("paused-for-cache") => {
            match msg.data {
                Some(serde_json::Value::Bool(true)) => Some(MediaEvent::Waiting),
                Some(serde_json::Value::Bool(false)) => Some(MediaEvent::Playing),
                _ => None,
            }
        }
        _ => None,
    }
}

pub fn pause_command(paused: bool) -> String {
    format!("{}\n", serde_json::json!({ "command": ["set_property", "pause", paused] }))
}

fn observe_command() -> String {
    format!(
        "{}\n",
        serde_json::json!({ "command": ["observe_property", CACHE_OBSERVER_ID, "paused-for-cache"] })
    )
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the most recent `play` call; stale events carry older ids
    pub fn current_session(&self) -> u64 {
        self.session.load(Ordering::SeqCst)
    }

    /// Start mpv for `url`, replacing any running instance
    pub fn play(&self, url: &str, title: &str) -> Result<u64, anyhow::Error> {
        self.stop();

        let session = self.session.fetch_add(1, Ordering::SeqCst) + 1;
        let ipc = ipc_socket_path(session);
        let _ = std::fs::remove_file(&ipc);

        let child = Command::new("mpv")
            .args(mpv_args(url, title, &ipc))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| anyhow::anyhow!("Failed to start mpv: {}. Make sure mpv is installed and in PATH.", e))?;

        info!("mpv started for {} (session {})", title, session);
        {
            let mut guard = self
                .process
                .lock()
                .map_err(|e| anyhow::anyhow!("Failed to lock process mutex: {}", e))?;
            *guard = Some(child);
        }
        {
            let mut ipc_guard = self
                .ipc_path
                .lock()
                .map_err(|e| anyhow::anyhow!("Failed to lock IPC path mutex: {}", e))?;
            *ipc_guard = Some(ipc);
        }
        Ok(session)
    }

    /// Check if mpv is still running
    pub fn is_running(&self) -> bool {
        if let Ok(mut guard) = self.process.lock() {
            if let Some(ref mut child) = *guard {
                matches!(child.try_wait(), Ok(None))
            } else {
                false
            }
        } else {
            false
        }
    }

    fn current_ipc_path(&self) -> Option<PathBuf> {
        self.ipc_path.lock().ok().and_then(|g| g.clone())
    }

    /// Forward pause intent. Failures (no socket yet, mpv gone) are dropped.
    pub async fn set_paused(&self, paused: bool) {
        let Some(path) = self.current_ipc_path() else {
            return;
        };
        if let Err(e) = send_ipc_command(&path, &pause_command(paused)).await {
            debug!("Ignoring failed pause={} request: {}", paused, e);
        }
    }

    /// Relay mpv signals for `session` into the UI loop until mpv exits
    pub fn spawn_event_bridge(&self, session: u64, tx: mpsc::Sender<AsyncAction>) {
        let player = self.clone();
        tokio::spawn(async move {
            let Some(path) = player.current_ipc_path() else {
                return;
            };
            if let Err(e) = relay_events(&player, &path, session, &tx).await {
                debug!("mpv event bridge for session {} ended: {}", session, e);
            }
        });
    }

    pub fn stop(&self) {
        if let Ok(mut guard) = self.process.lock() {
            if let Some(mut child) = guard.take() {
                let _ = child.kill();
                let _ = child.wait();
            }
        }

        if let Ok(mut ipc_guard) = self.ipc_path.lock() {
            if let Some(path) = ipc_guard.take() {
                let _ = std::fs::remove_file(path);
            }
        }
    }
}

#[cfg(unix)]
async fn connect_ipc(player: &Player, path: &std::path::Path) -> Result<tokio::net::UnixStream, anyhow::Error> {
    use tokio::time::{sleep, Duration};

    // mpv creates the socket shortly after launch
    for _ in 0..50 {
        if !player.is_running() {
            anyhow::bail!("mpv exited before opening its IPC socket");
        }
        if let Ok(stream) = tokio::net::UnixStream::connect(path).await {
            return Ok(stream);
        }
        sleep(Duration::from_millis(100)).await;
    }
    anyhow::bail!("mpv IPC socket {:?} never appeared", path)
}

#[cfg(unix)]
async fn send_ipc_command(path: &std::path::Path, command: &str) -> Result<(), anyhow::Error> {
    use tokio::io::AsyncWriteExt;

    let mut stream = tokio::net::UnixStream::connect(path).await?;
    stream.write_all(command.as_bytes()).await?;
    Ok(())
}

#[cfg(unix)]
async fn relay_events(
    player: &Player,
    path: &std::path::Path,
    session: u64,
    tx: &mpsc::Sender<AsyncAction>,
) -> Result<(), anyhow::Error> {
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

    let stream = connect_ipc(player, path).await?;
    let (read_half, mut write_half) = stream.into_split();
    write_half.write_all(observe_command().as_bytes()).await?;

    let mut lines = BufReader::new(read_half).lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(event) = parse_ipc_line(&line) {
            if tx.send(AsyncAction::Media(session, event)).await.is_err() {
                break;
            }
        }
    }
    Ok(())
}

// Without a unix socket the only signal available is "process stayed up"
#[cfg(not(unix))]
async fn send_ipc_command(_path: &std::path::Path, _command: &str) -> Result<(), anyhow::Error> {
    anyhow::bail!("mpv IPC is only wired up on unix")
}

#[cfg(not(unix))]
async fn relay_events(
    player: &Player,
    _path: &std::path::Path,
    session: u64,
    tx: &mpsc::Sender<AsyncAction>,
) -> Result<(), anyhow::Error> {
    use tokio::time::{sleep, Duration};

    sleep(Duration::from_millis(2000)).await;
    if player.is_running() {
        let _ = tx.send(AsyncAction::Media(session, MediaEvent::CanPlay)).await;
    } else {
        tracing::warn!("mpv exited during startup");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ipc_events() {
        assert_eq!(parse_ipc_line(r#"{"event":"file-loaded"}"#), Some(MediaEvent::CanPlay));
        assert_eq!(parse_ipc_line(r#"{"event":"playback-restart"}"#), Some(MediaEvent::Playing));
        assert_eq!(
            parse_ipc_line(r#"{"event":"property-change","id":1,"name":"paused-for-cache","data":true}"#),
            Some(MediaEvent::Waiting)
        );
        assert_eq!(
            parse_ipc_line(r#"{"event":"property-change","id":1,"name":"paused-for-cache","data":false}"#),
            Some(MediaEvent::Playing)
        );
    }

    #[test]
    fn test_parse_ignores_noise() {
        assert_eq!(parse_ipc_line(r#"{"request_id":0,"error":"success"}"#), None);
        assert_eq!(parse_ipc_line(r#"{"event":"property-change","name":"volume","data":50}"#), None);
        assert_eq!(parse_ipc_line("garbage"), None);
    }

    #[test]
    fn test_pause_command_shape() {
        assert_eq!(pause_command(true), "{\"command\":[\"set_property\",\"pause\",true]}\n");
    }

    #[test]
    fn test_mpv_args_include_ipc() {
        let path = PathBuf::from("/tmp/x.sock");
        let args = mpv_args("https://cdn/live.m3u8", "beIN Sport 1", &path);
        assert_eq!(args[0], "https://cdn/live.m3u8");
        assert!(args.contains(&"--input-ipc-server=/tmp/x.sock".to_string()));
        assert!(args.contains(&"--title=beIN Sport 1".to_string()));
    }

    #[test]
    fn test_stop_without_process_is_noop() {
        let player = Player::new();
        player.stop();
        assert!(!player.is_running());
        assert_eq!(player.current_session(), 0);
    }
}
