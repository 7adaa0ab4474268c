use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use serde::Deserialize;

use super::TranscriptProvider;
use crate::config::ProviderConfig;
use crate::error::{TranscriptError, TranscriptResult};
use crate::filename::sanitize_filename;
use crate::transcript::{TrackDescriptor, TranscriptSegment};

static API_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).expect("valid api key pattern")
});
static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<title>(.*?)</title>").expect("valid title pattern"));

// Player response, trimmed to the fields we read.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    playability_status: Option<PlayabilityStatus>,
    captions: Option<Captions>,
}

#[derive(Deserialize)]
struct PlayabilityStatus {
    status: String,
    reason: Option<String>,
}

#[derive(Deserialize)]
struct Captions {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    renderer: Option<TracklistRenderer>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    name: Option<TrackName>,
    language_code: String,
    kind: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackName {
    simple_text: Option<String>,
    #[serde(default)]
    runs: Vec<TextRun>,
}

#[derive(Deserialize)]
struct TextRun {
    text: String,
}

impl TrackName {
    fn text(&self) -> Option<String> {
        match &self.simple_text {
            Some(text) => Some(text.clone()),
            None if !self.runs.is_empty() => {
                Some(self.runs.iter().map(|r| r.text.as_str()).collect())
            }
            None => None,
        }
    }
}

// json3 timed text.

#[derive(Deserialize)]
struct TimedText {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimedTextEvent {
    t_start_ms: Option<u64>,
    d_duration_ms: Option<u64>,
    segs: Option<Vec<TimedTextSeg>>,
}

#[derive(Deserialize)]
struct TimedTextSeg {
    #[serde(default)]
    utf8: String,
}

/// Caption provider backed by the public YouTube watch page and the
/// innertube player endpoint.
pub struct YouTubeProvider {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl YouTubeProvider {
    pub fn new(config: ProviderConfig) -> TranscriptResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client, config })
    }

    async fn fetch_watch_html(&self, video_id: &str) -> TranscriptResult<String> {
        let url = format!("{}/watch?v={}", self.config.base_url, video_id);
        debug!("Fetching watch page: {url}");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT_LANGUAGE, &self.config.accept_language)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }

    async fn fetch_player_response(
        &self,
        video_id: &str,
        api_key: &str,
    ) -> TranscriptResult<PlayerResponse> {
        let url = format!("{}/youtubei/v1/player?key={}", self.config.base_url, api_key);
        let body = serde_json::json!({
            "context": {
                "client": {
                    "clientName": "ANDROID",
                    "clientVersion": self.config.client_version,
                }
            },
            "videoId": video_id,
        });
        debug!("Requesting player response for {video_id}");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TranscriptError::RequestBlocked);
        }
        let text = response.error_for_status()?.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl TranscriptProvider for YouTubeProvider {
    async fn list_tracks(&self, video_id: &str) -> TranscriptResult<Vec<TrackDescriptor>> {
        let html = self.fetch_watch_html(video_id).await?;
        let api_key = extract_api_key(&html)?;
        let player = self.fetch_player_response(video_id, &api_key).await?;
        tracks_from_player(player)
    }

    async fn fetch_segments(
        &self,
        track: &TrackDescriptor,
    ) -> TranscriptResult<Vec<TranscriptSegment>> {
        let url = json3_url(&track.url)?;
        debug!("Fetching {} track '{}'", track.kind(), track.language_code);

        let text = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        if text.trim().is_empty() {
            return Err(TranscriptError::MalformedResponse(
                "empty timed text response".to_string(),
            ));
        }
        parse_timed_text(&text)
    }

    async fn video_title(&self, video_id: &str) -> TranscriptResult<String> {
        let html = self.fetch_watch_html(video_id).await?;
        extract_title(&html)
            .ok_or_else(|| TranscriptError::MalformedResponse("no <title> in watch page".to_string()))
    }
}

fn extract_api_key(html: &str) -> TranscriptResult<String> {
    if let Some(caps) = API_KEY_RE.captures(html) {
        return Ok(caps[1].to_string());
    }
    if html.contains("class=\"g-recaptcha\"") {
        return Err(TranscriptError::RequestBlocked);
    }
    Err(TranscriptError::MalformedResponse(
        "innertube API key not found in watch page".to_string(),
    ))
}

fn tracks_from_player(player: PlayerResponse) -> TranscriptResult<Vec<TrackDescriptor>> {
    if let Some(status) = &player.playability_status {
        match status.status.as_str() {
            "OK" => {}
            "LOGIN_REQUIRED"
                if status
                    .reason
                    .as_deref()
                    .is_some_and(|r| r.contains("not a bot")) =>
            {
                return Err(TranscriptError::RequestBlocked);
            }
            other => {
                let reason = status.reason.clone().unwrap_or_else(|| other.to_string());
                return Err(TranscriptError::VideoUnavailable(reason));
            }
        }
    }

    let renderer = player
        .captions
        .and_then(|c| c.renderer)
        .ok_or(TranscriptError::TranscriptsDisabled)?;

    Ok(renderer
        .caption_tracks
        .into_iter()
        .map(|track| TrackDescriptor {
            language: track
                .name
                .as_ref()
                .and_then(TrackName::text)
                .unwrap_or_else(|| track.language_code.clone()),
            is_generated: track.kind.as_deref() == Some("asr"),
            language_code: track.language_code,
            url: track.base_url,
        })
        .collect())
}

/// Rewrites a track URL to request the json3 timed-text format.
fn json3_url(base_url: &str) -> TranscriptResult<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| TranscriptError::MalformedResponse(format!("bad track url: {e}")))?;
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "fmt")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(pairs)
        .append_pair("fmt", "json3");
    Ok(url)
}

fn parse_timed_text(body: &str) -> TranscriptResult<Vec<TranscriptSegment>> {
    let timed: TimedText = serde_json::from_str(body)?;

    Ok(timed
        .events
        .into_iter()
        .filter_map(|event| {
            let segs = event.segs?;
            let raw: String = segs.iter().map(|s| s.utf8.as_str()).collect();
            let text = html_escape::decode_html_entities(&raw).trim().to_string();
            if text.is_empty() {
                return None;
            }
            Some(TranscriptSegment::new(
                event.t_start_ms.unwrap_or(0) as f64 / 1000.0,
                event.d_duration_ms.unwrap_or(0) as f64 / 1000.0,
                text,
            ))
        })
        .collect())
}

fn extract_title(html: &str) -> Option<String> {
    let caps = TITLE_RE.captures(html)?;
    let raw = caps[1].replace(" - YouTube", "");
    let decoded = html_escape::decode_html_entities(raw.trim());
    let title = sanitize_filename(&decoded).trim().to_string();
    (!title.is_empty()).then_some(title)
}
