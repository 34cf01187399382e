use tracing::debug;

use crate::{
    error::{Error, Result, TransportError},
    response::{decode_console_session, decode_service_error},
    transport::{ApiAction, Transport},
    types::{ConsoleSession, InstanceId},
};

pub async fn get_ajax_console(
    transport: &dyn Transport,
    instance_id: &InstanceId,
) -> Result<ConsoleSession> {
    let action = ApiAction::get_ajax_console(instance_id);
    debug!(action = action.name, %instance_id, "requesting ajax console");

    let body = match transport.send(&action).await {
        Ok(body) => body,
        Err(Error::Transport(TransportError::HttpStatus { status, body })) => {
            return Err(match decode_service_error(&body) {
                Some(fault) => {
                    debug!(status, code = %fault.code, "service returned an error envelope");
                    fault.into()
                }
                None => TransportError::HttpStatus { status, body }.into(),
            });
        }
        Err(error) => return Err(error),
    };

    let session = decode_console_session(&body, instance_id)?;
    debug!(instance_id = %session.instance_id, extra = ?session.extra, "decoded console session");
    Ok(session)
}
