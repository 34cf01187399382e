use ajaxconsole_core::{
    commands::get_ajax_console::get_ajax_console, credentials::get_credentials, error::Result,
    types::InstanceId,
};
use ajaxconsole_ec2::Ec2Transport;
use tracing::debug;

pub async fn print_ajax_console(instance_id: &InstanceId) -> Result<()> {
    let credentials = get_credentials().await?;
    let transport = Ec2Transport::new(&credentials)?;
    debug!(endpoint = %transport.endpoint(), "connecting");

    let session = get_ajax_console(&transport, instance_id).await?;
    println!("{}", session.url);
    Ok(())
}
