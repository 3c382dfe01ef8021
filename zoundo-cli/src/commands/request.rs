// zoundo-cli/src/commands/request.rs
use crate::output::{print_response, OutputFormat, Response};
use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::Value;
use zoundo_client::{HttpMethod, Payload, ZoundoClient};

#[derive(Args, Clone, Debug)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, PUT, PATCH, DELETE)
    pub method: HttpMethod,
    /// Endpoint path appended to the API URL, e.g. /tracks/12
    pub endpoint: String,
    /// Request parameters as a JSON object
    #[arg(short, long)]
    pub data: Option<String>,
    /// Extra fields to ask for, comma separated
    #[arg(short, long, value_delimiter = ',')]
    pub fields: Vec<String>,
}

pub async fn handle_request(
    client: &ZoundoClient,
    args: RequestArgs,
    format: OutputFormat,
) -> Result<()> {
    let payload = parse_payload(args.data.as_deref())?;
    let fields: Vec<&str> = args.fields.iter().map(String::as_str).collect();

    let result = client
        .api()
        .request(args.method, &args.endpoint, payload, &fields)
        .await?;

    print_response(&Response::ok(result), format);
    Ok(())
}

fn parse_payload(data: Option<&str>) -> Result<Payload> {
    let Some(data) = data else {
        return Ok(Payload::default());
    };
    let value: Value = serde_json::from_str(data).context("--data is not valid JSON")?;
    match value {
        Value::Object(map) => Ok(Payload::Json(map)),
        other => bail!("--data must be a JSON object, got {}", other),
    }
}
