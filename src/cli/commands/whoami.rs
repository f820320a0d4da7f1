//! Handler for `fastly whoami`.

use super::Context;
use crate::cli::OutputFormat;
use crate::error::Error;
use indexmap::IndexMap;
use std::io::Write;

pub async fn execute_whoami(ctx: &Context, out: &mut dyn Write) -> Result<(), Error> {
    let client = ctx.client()?;
    let who = client.verify().await?;

    let mut fields = IndexMap::new();
    fields.insert("Customer", format!("{} ({})", who.customer.name, who.customer.id));
    fields.insert("User", format!("{} ({})", who.user.name, who.user.id));
    if let Some(login) = &who.user.login {
        fields.insert("Login", login.clone());
    }
    fields.insert("Services", who.services.len().to_string());
    ctx.output.record(out, &who, &fields)?;

    if ctx.output.format() == OutputFormat::Text && !who.services.is_empty() {
        for (id, name) in &who.services {
            writeln!(out, "  {id}  {name}")?;
        }
    }
    Ok(())
}
