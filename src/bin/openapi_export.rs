// Prints the OpenAPI document of the reference service as JSON.
// Run with: cargo run --bin openapi_export > openapi.json

use structured_errors::api::openapi::ApiDoc;
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&ApiDoc::openapi())?;
    println!("{}", json);
    Ok(())
}
