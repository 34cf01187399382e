use std::collections::BTreeMap;

use quick_xml::{Reader, events::Event};

use crate::{
    error::{MalformedResponseError, Result, ServiceError},
    types::{ConsoleSession, InstanceId},
};

const INSTANCE_ID_ELEMENT: &str = "instanceId";
const URL_ELEMENT: &str = "url";

/// A response document split into its leaf elements.
struct Document {
    is_error_envelope: bool,
    fields: Vec<(String, String)>,
}

impl Document {
    fn first(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Decodes a `GetAjaxConsole` response body into a [`ConsoleSession`].
///
/// Servers that leave out `instanceId` are answered for `requested`.
pub fn decode_console_session(body: &str, requested: &InstanceId) -> Result<ConsoleSession> {
    let document = parse_document(body)?;
    if document.is_error_envelope {
        return Err(service_error_from(&document).into());
    }

    let url = document
        .first(URL_ELEMENT)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| MalformedResponseError::MissingField {
            field: URL_ELEMENT.to_string(),
        })?
        .to_string();
    let instance_id = document
        .first(INSTANCE_ID_ELEMENT)
        .filter(|instance_id| !instance_id.is_empty())
        .unwrap_or(requested.as_str())
        .to_string();

    let mut extra = BTreeMap::new();
    for (name, value) in document.fields {
        if name != URL_ELEMENT && name != INSTANCE_ID_ELEMENT {
            extra.entry(name).or_insert(value);
        }
    }

    Ok(ConsoleSession {
        instance_id,
        url,
        extra,
    })
}

/// Returns the fault carried by `body` when it is a provider error envelope.
pub fn decode_service_error(body: &str) -> Option<ServiceError> {
    let document = parse_document(body).ok()?;
    document
        .is_error_envelope
        .then(|| service_error_from(&document))
}

fn service_error_from(document: &Document) -> ServiceError {
    ServiceError {
        code: document.first("Code").unwrap_or("Unknown").to_string(),
        message: document.first("Message").unwrap_or_default().to_string(),
        request_id: document
            .first("RequestID")
            .or_else(|| document.first("RequestId"))
            .map(str::to_string),
    }
}

fn parse_document(body: &str) -> Result<Document> {
    let mut reader = Reader::from_str(body);
    reader.trim_text(true);

    let mut document = Document {
        is_error_envelope: false,
        fields: Vec::new(),
    };
    let mut current_tag: Option<String> = None;
    let mut seen_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref element)) => {
                let local = local_name(element.name().as_ref());
                if local == "Errors" || local == "Error" {
                    document.is_error_envelope = true;
                }
                seen_root = true;
                current_tag = Some(local);
            }
            Ok(Event::Empty(ref element)) => {
                seen_root = true;
                current_tag = None;
                let local = local_name(element.name().as_ref());
                document.fields.push((local, String::new()));
            }
            Ok(Event::Text(ref text)) => {
                if let Some(tag) = current_tag.as_ref() {
                    let value = text.unescape().map_err(|error| {
                        MalformedResponseError::InvalidDocument {
                            reason: error.to_string(),
                        }
                    })?;
                    document.fields.push((tag.clone(), value.into_owned()));
                }
            }
            Ok(Event::CData(ref data)) => {
                if let Some(tag) = current_tag.as_ref() {
                    let value = String::from_utf8_lossy(data).into_owned();
                    document.fields.push((tag.clone(), value));
                }
            }
            Ok(Event::End(_)) => current_tag = None,
            Ok(Event::Eof) => break,
            Err(error) => {
                return Err(MalformedResponseError::InvalidDocument {
                    reason: error.to_string(),
                }
                .into());
            }
            _ => {}
        }
    }

    if !seen_root {
        return Err(MalformedResponseError::InvalidDocument {
            reason: "no elements found".to_string(),
        }
        .into());
    }
    Ok(document)
}

fn local_name(raw: &[u8]) -> String {
    let name = String::from_utf8_lossy(raw);
    match name.rfind(':') {
        Some(position) => name[position + 1..].to_string(),
        None => name.into_owned(),
    }
}
