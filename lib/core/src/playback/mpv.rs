use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use bon::Builder;
use serde_json::{json, Value};
use tracing::{debug, warn};

use pocket_video_player_common::PlayerError;

use super::{EngineEvent, MediaSource, PlaybackEngine};

/// Position changes below this are not worth a notification.
const POSITION_EPSILON: f64 = 0.01;

#[derive(Builder, Debug, Clone)]
pub struct EngineOptions {
    /// Engine binary. Defaults to `mpv` on `$PATH`.
    #[builder(into)]
    pub binary: Option<PathBuf>,
    /// IPC socket path. Defaults to a per-process file in the temp dir.
    #[builder(into)]
    pub socket: Option<PathBuf>,
    #[builder(default = Duration::from_secs(10))]
    pub startup_timeout: Duration,
}

/// Playback engine backed by an external `mpv` process.
///
/// The process owns its window and the whole decode/render pipeline; this
/// side only speaks newline-delimited JSON over the IPC socket, one
/// connection per request, and turns polled property changes into
/// [`EngineEvent`]s.
pub struct MpvEngine {
    child: Child,
    socket: PathBuf,
    snapshot: Snapshot,
    stopped: bool,
}

#[derive(Debug, Default)]
struct Snapshot {
    path: Option<String>,
    position: Option<f64>,
    end_reached: bool,
}

impl MpvEngine {
    pub fn spawn(options: EngineOptions) -> Result<Self, PlayerError> {
        let socket = options.socket.unwrap_or_else(|| {
            std::env::temp_dir().join(format!("pocket-player-{}.sock", std::process::id()))
        });
        if socket.exists() {
            std::fs::remove_file(&socket)?;
        }

        let binary = options.binary.unwrap_or_else(|| PathBuf::from("mpv"));
        let mut child = Command::new(&binary)
            .arg(format!("--input-ipc-server={}", socket.display()))
            .arg("--idle=yes")
            .arg("--force-window=yes")
            .arg("--keep-open=yes")
            .arg("--input-default-bindings=no")
            .arg("--input-vo-keyboard=no")
            .arg("--input-terminal=no")
            .arg("--msg-level=all=no")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| {
                PlayerError::Engine(format!("failed to spawn {}: {err}", binary.display()))
            })?;

        wait_for_socket(&socket, options.startup_timeout, &mut child)?;
        debug!("engine ready on {}", socket.display());

        Ok(Self {
            child,
            socket,
            snapshot: Snapshot::default(),
            stopped: false,
        })
    }

    /// One request/response round trip on a fresh connection.
    fn request(&self, command: Value) -> Result<Value, PlayerError> {
        let payload = json!({
            "command": command,
            "request_id": 1,
        });
        let mut stream = UnixStream::connect(&self.socket)?;
        stream.write_all(payload.to_string().as_bytes())?;
        stream.write_all(b"\n")?;
        stream.flush()?;

        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return Err(PlayerError::Engine("engine closed the IPC socket".into()));
            }
            if line.trim().is_empty() {
                continue;
            }
            let value: Value = serde_json::from_str(line.trim())?;
            // The engine broadcasts events on every connection; only the
            // line carrying an error field answers our request.
            if value.get("event").is_some() {
                continue;
            }
            let error = value
                .get("error")
                .and_then(|e| e.as_str())
                .unwrap_or("unknown");
            if error != "success" {
                return Err(PlayerError::EngineRefused(error.to_string()));
            }
            return Ok(value.get("data").cloned().unwrap_or(Value::Null));
        }
    }

    fn command(&self, command: Value) -> Result<(), PlayerError> {
        let _ = self.request(command)?;
        Ok(())
    }

    /// Property read where a refusal means "not available yet".
    fn property(&self, name: &str) -> Result<Option<Value>, PlayerError> {
        match self.request(json!(["get_property", name])) {
            Ok(value) => Ok(Some(value)),
            Err(PlayerError::EngineRefused(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn property_f64(&self, name: &str) -> Result<Option<f64>, PlayerError> {
        Ok(self.property(name)?.and_then(|v| v.as_f64()))
    }

    fn property_bool(&self, name: &str) -> Result<Option<bool>, PlayerError> {
        Ok(self.property(name)?.and_then(|v| v.as_bool()))
    }

    fn property_string(&self, name: &str) -> Result<Option<String>, PlayerError> {
        Ok(self
            .property(name)?
            .and_then(|v| v.as_str().map(|s| s.to_string())))
    }

    fn set_property(&self, name: &str, value: Value) -> Result<(), PlayerError> {
        self.command(json!(["set_property", name, value]))
    }
}

impl PlaybackEngine for MpvEngine {
    fn play(&mut self, source: &MediaSource) -> Result<(), PlayerError> {
        self.command(json!(["loadfile", source.location(), "replace"]))?;
        self.set_property("pause", json!(false))
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        self.set_property("pause", json!(true))
    }

    fn resume(&mut self) -> Result<(), PlayerError> {
        self.set_property("pause", json!(false))
    }

    fn seek(&mut self, position: Duration) -> Result<(), PlayerError> {
        self.command(json!(["seek", position.as_secs_f64(), "absolute"]))
    }

    fn set_volume(&mut self, level: f64) -> Result<(), PlayerError> {
        self.set_property("volume", json!(level.clamp(0.0, 100.0)))
    }

    fn set_mute(&mut self, mute: bool) -> Result<(), PlayerError> {
        self.set_property("mute", json!(mute))
    }

    fn duration(&mut self) -> Result<Option<Duration>, PlayerError> {
        Ok(self
            .property_f64("duration")?
            .map(|secs| Duration::from_secs_f64(secs.max(0.0))))
    }

    fn video_size(&mut self) -> Result<Option<(u32, u32)>, PlayerError> {
        let width = self.property_f64("video-params/w")?;
        let height = self.property_f64("video-params/h")?;
        match (width, height) {
            (Some(w), Some(h)) if w >= 1.0 && h >= 1.0 => Ok(Some((w as u32, h as u32))),
            _ => Ok(None),
        }
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        let mut events = Vec::new();

        match self.child.try_wait() {
            Ok(Some(status)) => {
                events.push(EngineEvent::Error(format!(
                    "engine process exited: {status}"
                )));
                return events;
            }
            Ok(None) => {}
            Err(err) => {
                events.push(EngineEvent::Error(format!(
                    "engine process unreachable: {err}"
                )));
                return events;
            }
        }

        let path = match self.property_string("path") {
            Ok(path) => path,
            Err(err) => {
                events.push(EngineEvent::Error(err.to_string()));
                return events;
            }
        };
        if path != self.snapshot.path {
            if let Some(ref location) = path {
                events.push(EngineEvent::MediaChanged(location.clone()));
            }
            self.snapshot.position = None;
            self.snapshot.end_reached = false;
        }
        self.snapshot.path = path;

        if let Ok(Some(position)) = self.property_f64("time-pos") {
            let moved = match self.snapshot.position {
                Some(last) => (position - last).abs() >= POSITION_EPSILON,
                None => true,
            };
            if moved {
                self.snapshot.position = Some(position);
                events.push(EngineEvent::PositionChanged(Duration::from_secs_f64(
                    position.max(0.0),
                )));
            }
        }

        if let Ok(Some(end)) = self.property_bool("eof-reached") {
            if end && !self.snapshot.end_reached {
                events.push(EngineEvent::EndReached);
            }
            self.snapshot.end_reached = end;
        }

        events
    }

    fn shutdown(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;

        if let Err(err) = self.command(json!(["quit"])) {
            warn!("engine quit failed: {err}");
        }
        if let Err(err) = self.child.kill() {
            if err.kind() != std::io::ErrorKind::InvalidInput {
                warn!("failed to kill engine: {err}");
            }
        }
        let _ = self.child.wait();
        if self.socket.exists() {
            if let Err(err) = std::fs::remove_file(&self.socket) {
                warn!("failed to remove IPC socket: {err}");
            }
        }
    }
}

impl Drop for MpvEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn wait_for_socket(socket: &Path, timeout: Duration, child: &mut Child) -> Result<(), PlayerError> {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Err(PlayerError::Engine(format!(
                "engine exited before IPC ready: {status}"
            )));
        }
        if socket.exists() {
            match UnixStream::connect(socket) {
                Ok(_) => return Ok(()),
                Err(err) if start.elapsed() > timeout => {
                    return Err(PlayerError::Engine(format!(
                        "engine IPC socket not ready: {err}"
                    )));
                }
                Err(_) => {}
            }
        } else if start.elapsed() > timeout {
            return Err(PlayerError::Engine("engine IPC socket not ready: timed out".into()));
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}
