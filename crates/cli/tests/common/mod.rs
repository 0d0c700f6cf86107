#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use vidaio_analyzer::api::ApiError;
use vidaio_analyzer::messages::{MessagesRequest, MessagesResponse, ResponseBlock};
use vidaio_analyzer::{AnalyzerSettings, InferenceClient, VisionAnalyzer};
use vidaio_core::ffmpeg::MediaTools;

pub const VERDICT: &str = r#"{
  "vehicle_detected": true,
  "person_detected": true,
  "license_plates": ["7XYZ123"],
  "possible_vehicle_accident": false,
  "smoke_detected": false,
  "fire_detected": false,
  "firearm_detected": false,
  "threat_level": 3,
  "summary": "A person loiters beside a parked car."
}"#;

/// In-memory stand-in for the Messages API that records every request.
pub struct FakeClient {
    reply: String,
    seen: Mutex<Vec<MessagesRequest>>,
}

impl FakeClient {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<MessagesRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl InferenceClient for FakeClient {
    async fn create_message(&self, request: &MessagesRequest) -> Result<MessagesResponse, ApiError> {
        self.seen.lock().unwrap().push(request.clone());
        Ok(MessagesResponse {
            id: "msg_fake".to_string(),
            model: request.model.clone(),
            content: vec![ResponseBlock::Text {
                text: self.reply.clone(),
            }],
            stop_reason: Some("end_turn".to_string()),
            usage: None,
        })
    }
}

pub fn analyzer(reply: &str) -> VisionAnalyzer<FakeClient> {
    VisionAnalyzer::new(FakeClient::replying(reply), AnalyzerSettings::default())
}

/// Media tools pointing at binaries that cannot exist, so any invocation
/// fails with `NotFound`.
pub fn unreachable_tools(dir: &Path) -> MediaTools {
    MediaTools {
        ffprobe: dir.join("no-such-ffprobe"),
        ffmpeg: dir.join("no-such-ffmpeg"),
    }
}

/// Write an executable `sh` script into `dir` and return its path.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}")).expect("write script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("chmod script");
    path
}

/// Fake `ffprobe` that prints a fixed duration.
#[cfg(unix)]
pub fn fake_ffprobe(dir: &Path, duration: &str) -> PathBuf {
    write_script(dir, "ffprobe", &format!("echo {duration}\n"))
}

/// Fake `ffmpeg` that writes `count` frames next to its last argument
/// (the output pattern) and exits with `status`.
#[cfg(unix)]
pub fn fake_ffmpeg(dir: &Path, count: u32, status: i32) -> PathBuf {
    let body = format!(
        r#"for last; do :; done
out=$(dirname "$last")
i=1
while [ $i -le {count} ]; do
  printf 'jpeg-%d' $i > "$out/$(printf 'frame_%04d.jpg' $i)"
  i=$((i + 1))
done
exit {status}
"#
    );
    write_script(dir, "ffmpeg", &body)
}
