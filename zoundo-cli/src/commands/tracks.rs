// zoundo-cli/src/commands/tracks.rs
use crate::output::{format_output, print_response, Formattable, OutputFormat, Response};
use anyhow::{anyhow, Result};
use clap::Subcommand;
use zoundo_client::{fields, PagedData, ReviewStatus, Track, TracksQuery, ZoundoClient};

#[derive(Subcommand, Clone, Debug)]
pub enum TracksCommands {
    /// List tracks
    List {
        /// Free-text search
        #[arg(short, long)]
        query: Option<String>,
        /// Only tracks in this review state (draft, review, approve, reject)
        #[arg(short, long, value_parser = parse_status)]
        status: Option<ReviewStatus>,
        #[arg(short, long)]
        page: Option<u32>,
        #[arg(short, long, default_value = "20")]
        limit: u32,
    },
    /// Show one track
    Get {
        /// Track ID
        id: u64,
    },
    /// Send a draft to review
    Review {
        /// Track ID
        id: u64,
    },
}

fn parse_status(value: &str) -> Result<ReviewStatus> {
    serde_json::from_value(serde_json::Value::String(value.to_ascii_lowercase()))
        .map_err(|_| anyhow!("unknown review status: {}", value))
}

struct TrackPage(PagedData<Track>);

impl Formattable for TrackPage {
    fn to_json(&self) -> String {
        Response::ok(&self.0).to_json()
    }

    fn to_human(&self) -> String {
        let mut lines: Vec<String> = self
            .0
            .data
            .iter()
            .map(|track| {
                let status = track
                    .status
                    .map(|s| format!(" [{:?}]", s).to_lowercase())
                    .unwrap_or_default();
                format!("#{:<6} {} - {}{}", track.id, track.artist, track.title, status)
            })
            .collect();
        match self.0.pages {
            Some(pages) => lines.push(format!("page {} of {}", self.0.page, pages)),
            None => lines.push(format!("page {}", self.0.page)),
        }
        lines.join("\n")
    }
}

pub async fn handle_tracks(
    client: &ZoundoClient,
    cmd: TracksCommands,
    format: OutputFormat,
) -> Result<()> {
    match cmd {
        TracksCommands::List {
            query,
            status,
            page,
            limit,
        } => {
            let query = TracksQuery {
                query,
                status,
                page,
                limit: Some(limit),
                ..Default::default()
            };
            let page = client
                .tracks()
                .list(&query, &[fields::TRACK_STATUS])
                .await?;
            println!("{}", format_output(&TrackPage(page), format));
        }
        TracksCommands::Get { id } => {
            let track = client
                .tracks()
                .get(
                    id,
                    &[fields::TRACK_STATUS, fields::TRACK_DURATION, fields::TRACK_VIEWS],
                )
                .await?;
            print_response(&Response::ok(track), format);
        }
        TracksCommands::Review { id } => {
            let sent = client.tracks().review(id).await?;
            print_response(&Response::ok(sent), format);
        }
    }
    Ok(())
}
