use espwire_peer::{Entity, PeerError};
use serde::Serialize;

use crate::cmd::{hang_up, open, DeviceArgs, EntitiesArgs};
use crate::exit::{peer_error, CliError, CliResult, FAILURE, SUCCESS};
use crate::output::{print_json, table, OutputFormat};

#[derive(Debug, Serialize)]
struct EntityOutput<'a> {
    kind: &'static str,
    key: u32,
    name: &'a str,
    object_id: &'a str,
    unique_id: &'a str,
}

impl<'a> From<&'a Entity> for EntityOutput<'a> {
    fn from(entity: &'a Entity) -> Self {
        Self {
            kind: entity.kind.as_str(),
            key: entity.key,
            name: &entity.name,
            object_id: &entity.object_id,
            unique_id: &entity.unique_id,
        }
    }
}

pub async fn run(_args: EntitiesArgs, device: &DeviceArgs, format: OutputFormat) -> CliResult<i32> {
    let (conn, _) = open(device).await?;

    let entities = match conn.list_entities().await {
        Ok(entities) => entities,
        Err(PeerError::IncompleteListing { entities, reason }) => {
            print_entities(&entities, format);
            return Err(CliError::new(
                FAILURE,
                format!(
                    "entity listing interrupted after {} entities: {reason}",
                    entities.len()
                ),
            ));
        }
        Err(err) => {
            hang_up(&conn).await;
            return Err(peer_error("entity listing failed", err));
        }
    };
    hang_up(&conn).await;

    print_entities(&entities, format);
    Ok(SUCCESS)
}

fn print_entities(entities: &[Entity], format: OutputFormat) {
    let rows: Vec<EntityOutput<'_>> = entities.iter().map(EntityOutput::from).collect();
    match format {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Table => {
            let mut table = table(vec!["KIND", "KEY", "NAME", "OBJECT ID", "UNIQUE ID"]);
            for row in &rows {
                table.add_row(vec![
                    row.kind.to_string(),
                    row.key.to_string(),
                    row.name.to_string(),
                    row.object_id.to_string(),
                    row.unique_id.to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for row in &rows {
                println!("{:<14} {:>10}  {} ({})", row.kind, row.key, row.name, row.object_id);
            }
        }
    }
}
