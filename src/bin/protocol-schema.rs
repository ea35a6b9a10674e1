use stylekit::services::documentation::ProtocolDoc;
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    let doc = ProtocolDoc::openapi();
    println!("{}", doc.to_pretty_json()?);
    Ok(())
}
