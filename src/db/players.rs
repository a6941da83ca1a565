use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, Error as SqlError, ErrorCode};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::Player;

/// Retrieve the whole roster in the order players were added. An empty table
/// is simply an empty list.
pub fn fetch_players(conn: &Connection) -> Result<Vec<Player>> {
    let mut stmt = conn
        .prepare("SELECT id, player_name FROM players ORDER BY position, rowid")
        .context("failed to prepare player query")?;

    let players = stmt
        .query_map([], |row| {
            Ok(Player {
                id: row.get(0)?,
                player_name: row.get(1)?,
            })
        })
        .context("failed to load players")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect players")?;

    debug!(count = players.len(), "fetched players");
    Ok(players)
}

/// Insert a new player at the end of the roster, returning the hydrated struct
/// so the caller can push it straight into the in-memory list.
pub fn create_player(conn: &Connection, player_name: &str) -> Result<Player> {
    let player = Player {
        id: Uuid::new_v4().to_string(),
        player_name: player_name.to_string(),
    };

    conn.execute(
        "INSERT INTO players (id, player_name, position)
         VALUES (?1, ?2, (SELECT COALESCE(MAX(position), -1) + 1 FROM players))",
        params![player.id, player.player_name],
    )
    .map_err(|err| map_unique_constraint(err, player_name))
    .context("failed to insert player")?;

    info!(id = %player.id, name = %player.player_name, "created player");
    Ok(player)
}

/// Remove `player` from storage and hand back the roster as it stands after
/// the deletion.
pub fn delete_player(conn: &Connection, player: &Player) -> Result<Vec<Player>> {
    let mut players = fetch_players(conn)?;
    let before = players.len();
    players.retain(|existing| existing.id != player.id);

    if players.len() == before {
        return Err(anyhow!("Player not found"));
    }

    set_players(conn, &players)?;
    info!(id = %player.id, name = %player.player_name, "deleted player");
    Ok(players)
}

/// Replace the stored roster with `players`, keeping their slice order. Runs
/// in a single transaction so a failure leaves the previous roster intact.
pub fn set_players(conn: &Connection, players: &[Player]) -> Result<()> {
    let tx = conn
        .unchecked_transaction()
        .context("failed to start roster transaction")?;

    tx.execute("DELETE FROM players", [])
        .context("failed to clear players")?;

    {
        let mut insert = tx
            .prepare("INSERT INTO players (id, player_name, position) VALUES (?1, ?2, ?3)")
            .context("failed to prepare player insert")?;
        for (position, player) in players.iter().enumerate() {
            insert
                .execute(params![player.id, player.player_name, position as i64])
                .map_err(|err| map_unique_constraint(err, &player.player_name))
                .context("failed to store player")?;
        }
    }

    tx.commit().context("failed to commit roster")?;
    debug!(count = players.len(), "stored roster");
    Ok(())
}

/// Coerce SQLite constraint errors into human-readable messages. Player names
/// are unique regardless of case.
fn map_unique_constraint(err: SqlError, player_name: &str) -> anyhow::Error {
    if matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::ConstraintViolation)
    ) {
        anyhow!("Player {player_name} already exists.")
    } else {
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ensure_schema;

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn
    }

    fn names(players: &[Player]) -> Vec<&str> {
        players.iter().map(|p| p.player_name.as_str()).collect()
    }

    #[test]
    fn empty_roster_loads_as_empty_list() {
        let conn = memory_db();
        assert!(fetch_players(&conn).unwrap().is_empty());
    }

    #[test]
    fn created_players_come_back_in_insertion_order() {
        let conn = memory_db();
        let zoe = create_player(&conn, "Zoe").unwrap();
        create_player(&conn, "Ana").unwrap();
        create_player(&conn, "Marcos").unwrap();

        let players = fetch_players(&conn).unwrap();
        assert_eq!(names(&players), vec!["Zoe", "Ana", "Marcos"]);
        assert_eq!(players[0], zoe);
    }

    #[test]
    fn created_players_get_distinct_ids() {
        let conn = memory_db();
        let a = create_player(&conn, "Ana").unwrap();
        let b = create_player(&conn, "Bruno").unwrap();
        assert_ne!(a.id, b.id);
        assert!(!a.id.is_empty());
    }

    #[test]
    fn duplicate_names_are_rejected_ignoring_case() {
        let conn = memory_db();
        create_player(&conn, "Ana").unwrap();
        let err = create_player(&conn, "ANA").unwrap_err();
        assert_eq!(err.root_cause().to_string(), "Player ANA already exists.");
        assert_eq!(fetch_players(&conn).unwrap().len(), 1);
    }

    #[test]
    fn delete_returns_roster_without_the_player() {
        let conn = memory_db();
        let ana = create_player(&conn, "Ana").unwrap();
        let bruno = create_player(&conn, "Bruno").unwrap();
        let carla = create_player(&conn, "Carla").unwrap();

        let remaining = delete_player(&conn, &bruno).unwrap();
        assert_eq!(remaining, vec![ana, carla]);
        assert_eq!(fetch_players(&conn).unwrap(), remaining);
    }

    #[test]
    fn deleting_an_unknown_player_fails() {
        let conn = memory_db();
        create_player(&conn, "Ana").unwrap();
        let ghost = Player {
            id: "missing".to_string(),
            player_name: "Ghost".to_string(),
        };
        let err = delete_player(&conn, &ghost).unwrap_err();
        assert_eq!(err.root_cause().to_string(), "Player not found");
        assert_eq!(fetch_players(&conn).unwrap().len(), 1);
    }

    #[test]
    fn set_players_replaces_roster_and_order() {
        let conn = memory_db();
        let ana = create_player(&conn, "Ana").unwrap();
        let bruno = create_player(&conn, "Bruno").unwrap();

        set_players(&conn, &[bruno.clone(), ana.clone()]).unwrap();
        assert_eq!(fetch_players(&conn).unwrap(), vec![bruno.clone(), ana]);

        set_players(&conn, &[]).unwrap();
        assert!(fetch_players(&conn).unwrap().is_empty());
    }

    #[test]
    fn failed_set_players_keeps_previous_roster() {
        let conn = memory_db();
        let ana = create_player(&conn, "Ana").unwrap();
        let clash = Player {
            id: "other".to_string(),
            player_name: "ana".to_string(),
        };

        assert!(set_players(&conn, &[ana.clone(), clash]).is_err());
        assert_eq!(fetch_players(&conn).unwrap(), vec![ana]);
    }

    #[test]
    fn create_after_delete_still_appends() {
        let conn = memory_db();
        let ana = create_player(&conn, "Ana").unwrap();
        create_player(&conn, "Bruno").unwrap();
        delete_player(&conn, &ana).unwrap();
        create_player(&conn, "Carla").unwrap();

        assert_eq!(names(&fetch_players(&conn).unwrap()), vec!["Bruno", "Carla"]);
    }
}
