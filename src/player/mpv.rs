//! Karaoke backing track through a scoped mpv process.
//!
//! The deck owns the child process and its IPC socket. Dropping it kills the
//! process and removes the socket, so replacing `Option<AudioDeck>` is all it
//! takes to release the audio for a song.

use crate::app::events::{Event, PlayerEvent};
use crate::karaoke::pitch_scale;
use anyhow::Context;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::UnixStream,
    process::{Child, Command},
    sync::mpsc,
};

#[derive(Debug)]
pub struct AudioDeck {
    child: Child,
    socket_path: PathBuf,
    writer: tokio::sync::Mutex<tokio::io::WriteHalf<UnixStream>>,
    request_id: AtomicU64,
}

impl AudioDeck {
    pub async fn spawn(
        event_tx: mpsc::Sender<Event>,
        audio_device: Option<&str>,
        log_file: Option<&Path>,
    ) -> anyhow::Result<Self> {
        let socket_path =
            std::env::temp_dir().join(format!("lyrics-finder-mpv-{}.sock", std::process::id()));
        let _ = std::fs::remove_file(&socket_path);

        let mut cmd = Command::new("mpv");
        cmd.args([
            "--no-video",
            "--idle=yes",
            "--pause=yes",
            "--keep-open=yes",
            "--input-terminal=no",
            "--really-quiet",
        ]);
        if let Some(dev) = audio_device {
            cmd.arg(format!("--audio-device={dev}"));
        }
        if let Some(p) = log_file {
            cmd.arg(format!("--log-file={}", p.display()));
        }
        let child = cmd
            .arg(format!("--input-ipc-server={}", socket_path.display()))
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .context("spawn mpv")?;

        let stream = connect_with_retry(&socket_path).await?;
        let (reader, writer) = tokio::io::split(stream);

        tokio::spawn(read_events_loop(reader, event_tx));

        let this = Self {
            child,
            socket_path,
            writer: tokio::sync::Mutex::new(writer),
            request_id: AtomicU64::new(1),
        };

        this.command(json!({"command":["request_log_messages", "warn"]}))
            .await?;
        this.command(json!({"command":["observe_property", 1, "time-pos"]}))
            .await?;
        this.command(json!({"command":["observe_property", 2, "pause"]}))
            .await?;
        this.command(json!({"command":["observe_property", 3, "eof-reached"]}))
            .await?;

        tracing::debug!(socket = %this.socket_path.display(), "mpv ready");
        Ok(this)
    }

    /// Queue a local file, paused at the start.
    pub async fn load(&self, path: &Path) -> anyhow::Result<()> {
        let path = path.to_string_lossy();
        self.set_paused(true).await?;
        self.command(json!({"command":["loadfile", path, "replace"]}))
            .await
    }

    pub async fn set_paused(&self, paused: bool) -> anyhow::Result<()> {
        self.command(json!({"command":["set_property", "pause", paused]}))
            .await
    }

    pub async fn seek_to(&self, seconds: f64) -> anyhow::Result<()> {
        self.command(json!({"command":["seek", seconds.max(0.0), "absolute"]}))
            .await
    }

    /// Shift pitch by whole semitones without changing tempo.
    pub async fn set_pitch(&self, semitones: i8) -> anyhow::Result<()> {
        let filter = format!("rubberband=pitch-scale={:.6}", pitch_scale(semitones));
        self.command(json!({"command":["af", "set", filter]}))
            .await
    }

    pub async fn set_volume(&self, volume_0_100: u8) -> anyhow::Result<()> {
        self.command(json!({"command":["set_property", "volume", volume_0_100]}))
            .await
    }

    async fn command(&self, mut v: serde_json::Value) -> anyhow::Result<()> {
        // Tagged requests get their errors echoed back on the event stream.
        if v.get("request_id").is_none() {
            let id = self.request_id.fetch_add(1, Ordering::Relaxed);
            if let serde_json::Value::Object(ref mut o) = v {
                o.insert("request_id".to_string(), serde_json::Value::from(id));
            }
        }
        let mut w = self.writer.lock().await;
        let mut line = serde_json::to_vec(&v).context("encode mpv json")?;
        line.push(b'\n');
        w.write_all(&line).await.context("write mpv ipc")?;
        w.flush().await.context("flush mpv ipc")?;
        Ok(())
    }
}

impl Drop for AudioDeck {
    fn drop(&mut self) {
        let _ = self.child.start_kill();
        let _ = std::fs::remove_file(&self.socket_path);
        tracing::debug!("mpv released");
    }
}

async fn connect_with_retry(path: &Path) -> anyhow::Result<UnixStream> {
    let deadline = tokio::time::Instant::now() + std::time::Duration::from_secs(5);
    loop {
        match UnixStream::connect(path).await {
            Ok(s) => return Ok(s),
            Err(e) => {
                if tokio::time::Instant::now() > deadline {
                    return Err(e).with_context(|| format!("connect to mpv ipc {}", path.display()));
                }
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            }
        }
    }
}

async fn read_events_loop(reader: tokio::io::ReadHalf<UnixStream>, event_tx: mpsc::Sender<Event>) {
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let Ok(v) = serde_json::from_str::<serde_json::Value>(&line) else {
            continue;
        };
        if let Some(pe) = map_mpv_event(&v)
            && event_tx.send(Event::Player(pe)).await.is_err()
        {
            break;
        }
    }
}

fn map_mpv_event(v: &serde_json::Value) -> Option<PlayerEvent> {
    // Command replies: {"request_id":..., "error":"..."}
    if v.get("request_id").is_some() {
        let err = v.get("error")?.as_str()?;
        return (err != "success").then(|| PlayerEvent::Error(format!("mpv ipc error: {err}")));
    }

    match v.get("event")?.as_str()? {
        "property-change" => match v.get("name")?.as_str()? {
            "time-pos" => Some(PlayerEvent::Position {
                seconds: v.get("data")?.as_f64()?,
            }),
            "pause" => {
                let paused = v.get("data")?.as_bool()?;
                Some(if paused { PlayerEvent::Paused } else { PlayerEvent::Started })
            }
            "eof-reached" => v
                .get("data")?
                .as_bool()?
                .then_some(PlayerEvent::Ended),
            _ => None,
        },
        "end-file" => {
            let reason = v.get("reason").and_then(|x| x.as_str()).unwrap_or("");
            if reason == "error" {
                let err = v.get("error").and_then(|x| x.as_str()).unwrap_or("unknown");
                Some(PlayerEvent::Error(format!("mpv end-file error: {err}")))
            } else {
                None
            }
        }
        "log-message" => {
            let level = v.get("level")?.as_str()?;
            let text = v.get("text")?.as_str()?.trim();
            ((level == "warn" || level == "error") && !text.is_empty())
                .then(|| PlayerEvent::Error(format!("mpv {level}: {text}")))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_property_changes() {
        let pos = json!({"event":"property-change","id":1,"name":"time-pos","data":12.5});
        assert!(matches!(map_mpv_event(&pos), Some(PlayerEvent::Position { seconds }) if seconds == 12.5));

        let paused = json!({"event":"property-change","id":2,"name":"pause","data":true});
        assert!(matches!(map_mpv_event(&paused), Some(PlayerEvent::Paused)));

        let eof = json!({"event":"property-change","id":3,"name":"eof-reached","data":true});
        assert!(matches!(map_mpv_event(&eof), Some(PlayerEvent::Ended)));

        // time-pos is null while idle
        let idle = json!({"event":"property-change","id":1,"name":"time-pos"});
        assert!(map_mpv_event(&idle).is_none());
    }

    #[test]
    fn test_map_errors() {
        let ok = json!({"request_id":4,"error":"success"});
        assert!(map_mpv_event(&ok).is_none());

        let bad = json!({"request_id":5,"error":"property not found"});
        assert!(matches!(map_mpv_event(&bad), Some(PlayerEvent::Error(e)) if e.contains("property not found")));

        let end = json!({"event":"end-file","reason":"error","error":"loading failed"});
        assert!(matches!(map_mpv_event(&end), Some(PlayerEvent::Error(_))));

        let info = json!({"event":"log-message","level":"info","text":"hello"});
        assert!(map_mpv_event(&info).is_none());
    }
}
