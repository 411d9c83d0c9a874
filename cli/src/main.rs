use std::io::Read;

use serde_json::{Map, Value};

use structopt::StructOpt;

use mandrill::{MandrillClient, SendRequest, TemplateRequest};

mod error;

use error::Error;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "mandrill-send",
    about = "Send a transactional email through Mandrill.\n\nMessage fields are read from stdin as a JSON object."
)]
struct Opt {
    /// Config file (defaults to /etc/mandrill/mandrill.toml)
    #[structopt(short, long)]
    config: Option<String>,

    /// Render the message from this stored template
    #[structopt(short, long)]
    template: Option<String>,

    /// Template content as JSON, e.g. '[{"name": "main", "content": "Hi"}]'
    #[structopt(long)]
    template_content: Option<String>,
}

enum Request {
    Plain(SendRequest),
    Template(TemplateRequest),
}

/// Turn stdin plus command line options into a request.
///
/// Template mode is picked when a template is named on the command line or
/// in the input itself.
fn build_request(opt: &Opt, input: &str) -> Result<Request, Error> {
    let mut fields: Map<String, Value> = match serde_json::from_str::<Value>(input)? {
        Value::Object(fields) => fields,
        _ => return Err(Error::Input("expected a JSON object".to_string())),
    };

    if let Some(ref name) = opt.template {
        fields.insert("template_name".to_string(), Value::String(name.clone()));
    }

    if let Some(ref content) = opt.template_content {
        fields.insert("template_content".to_string(), serde_json::from_str(content)?);
    }

    if !fields.contains_key("template_name") {
        if opt.template_content.is_some() {
            return Err(Error::Input(
                "--template-content needs a template name".to_string(),
            ));
        }

        return Ok(Request::Plain(SendRequest::from_fields(fields)?));
    }

    // Templates without editable regions still need an (empty) list
    fields
        .entry("template_content")
        .or_insert_with(|| Value::Array(Vec::new()));

    Ok(Request::Template(TemplateRequest::from_fields(fields)?))
}

fn run(opt: Opt) -> Result<mandrill::Response, Error> {
    let config = mandrill::load_config(opt.config.as_deref())?;
    let client = MandrillClient::new(config)?;

    // Get message fields from stdin
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    let resp = match build_request(&opt, &input)? {
        Request::Plain(request) => client.send_email(request)?,
        Request::Template(request) => client.send_template_email(request)?,
    };

    Ok(resp)
}

fn main() {
    // Init logger
    env_logger::builder().format_timestamp_micros().init();

    let opt = Opt::from_args();

    match run(opt) {
        Ok(resp) => {
            log::info!("Mandrill responded with {}", resp.status());
            println!("{}", resp.text());
        }
        Err(e) => {
            log::error!("Failed to send email: {}", e);
            std::process::exit(1);
        }
    }
}
