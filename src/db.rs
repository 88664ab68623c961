use anyhow::Context;
use rusqlite::Connection;
use std::path::Path;

pub fn open_db(workspace: &Path, file_name: &str) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)
        .with_context(|| format!("create workspace {}", workspace.display()))?;
    let db_path = workspace.join(file_name);
    let conn = Connection::open(&db_path)
        .with_context(|| format!("open database {}", db_path.display()))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS records(
            id TEXT PRIMARY KEY,
            position INTEGER NOT NULL,
            doc TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_records_position ON records(position)",
        [],
    )?;

    Ok(conn)
}
