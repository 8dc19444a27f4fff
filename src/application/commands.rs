use crate::application::builders::request_builder::RequestBuilder;
use crate::domain::entities::{Method, Request};
use crate::domain::errors::CarError;
use crate::domain::value_objects::{JsonBody, Payload};
use crate::infrastructure::config::ApiConfig;
use std::str::FromStr;

const COLLECTION_PATH: &str = "/api/car";

/// Subcommands understood by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Create,
    Update,
    Delete,
    GetById,
    Get,
}

impl FromStr for Command {
    type Err = CarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Command::Help),
            "create" => Ok(Command::Create),
            "update" => Ok(Command::Update),
            "delete" => Ok(Command::Delete),
            "getById" => Ok(Command::GetById),
            "get" => Ok(Command::Get),
            other => Err(CarError::InvalidCommand(other.to_string())),
        }
    }
}

/// What the runner should do for one invocation
#[derive(Debug)]
pub enum Action {
    Help,
    Send(Request),
}

/// Resolves the subcommand and its field tokens into an action.
///
/// No subcommand means help.
pub fn dispatch<S: AsRef<str>>(
    api: &ApiConfig,
    command: Option<&str>,
    tokens: &[S],
) -> Result<Action, CarError> {
    let Some(command) = command else {
        return Ok(Action::Help);
    };

    let request = match command.parse::<Command>()? {
        Command::Help => return Ok(Action::Help),
        Command::Create => create_car(api, tokens)?,
        Command::Update => update_car(api, tokens)?,
        Command::Delete => delete_car(api, tokens)?,
        Command::GetById => get_car_by_id(api, tokens)?,
        Command::Get => get_cars(api, tokens)?,
    };
    Ok(Action::Send(request))
}

/// POST the whole payload to the collection endpoint
pub fn create_car<S: AsRef<str>>(api: &ApiConfig, tokens: &[S]) -> Result<Request, CarError> {
    require_fields(tokens, "create requires fields like \"model=string\"")?;
    let payload = Payload::parse(tokens);

    Ok(json_request(Method::Post)
        .url(&collection_url(api, None))?
        .body(JsonBody::from_payload(&payload)?)
        .build()?)
}

/// PUT the payload to the item endpoint named by `id`
pub fn update_car<S: AsRef<str>>(api: &ApiConfig, tokens: &[S]) -> Result<Request, CarError> {
    require_fields(tokens, "update requires fields like \"id=string model=string\"")?;
    let payload = Payload::parse(tokens);
    let id = payload.id().ok_or(CarError::MissingId)?;

    Ok(json_request(Method::Put)
        .url(&item_url(api, id))?
        .body(JsonBody::from_payload(&payload)?)
        .build()?)
}

pub fn delete_car<S: AsRef<str>>(api: &ApiConfig, tokens: &[S]) -> Result<Request, CarError> {
    require_fields(tokens, "delete requires the field \"id=string\"")?;
    item_request(api, Method::Delete, tokens)
}

pub fn get_car_by_id<S: AsRef<str>>(api: &ApiConfig, tokens: &[S]) -> Result<Request, CarError> {
    require_fields(tokens, "getById requires the field \"id=string\"")?;
    item_request(api, Method::Get, tokens)
}

/// GET the collection, passing every field through as a query parameter
pub fn get_cars<S: AsRef<str>>(api: &ApiConfig, tokens: &[S]) -> Result<Request, CarError> {
    let query = Payload::parse(tokens);

    Ok(json_request(Method::Get)
        .url(&collection_url(api, Some(&query)))?
        .build()?)
}

fn item_request<S: AsRef<str>>(
    api: &ApiConfig,
    method: Method,
    tokens: &[S],
) -> Result<Request, CarError> {
    let payload = Payload::parse(tokens);
    let id = payload.id().ok_or(CarError::MissingId)?;

    Ok(json_request(method).url(&item_url(api, id))?.build()?)
}

/// At least one token must follow the subcommand. Which fields they carry is
/// not checked here.
fn require_fields<S: AsRef<str>>(tokens: &[S], message: &str) -> Result<(), CarError> {
    if tokens.is_empty() {
        return Err(CarError::Usage(message.to_string()));
    }
    Ok(())
}

fn json_request(method: Method) -> RequestBuilder {
    RequestBuilder::new()
        .method(method)
        .header("Accept", "application/json")
}

fn collection_url(api: &ApiConfig, query: Option<&Payload>) -> String {
    let mut url = format!("{}{}", api.base_url(), COLLECTION_PATH);
    if let Some(query) = query.filter(|query| !query.is_empty()) {
        url.push('?');
        url.push_str(&query.to_query_string());
    }
    url
}

fn item_url(api: &ApiConfig, id: &str) -> String {
    format!(
        "{}{}/{}",
        api.base_url(),
        COLLECTION_PATH,
        urlencoding::encode(id)
    )
}
