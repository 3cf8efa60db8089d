use anyhow::Result;
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait};
use tracing::warn;

use crate::entities::{prelude::*, session_snapshots};
use puzzle_types::SessionSnapshot;

/// Key-value store of session snapshots, one row per date key.
///
/// Reads are corruption-tolerant: a payload that no longer parses is
/// treated as "no snapshot" so a fresh session can start, matching the
/// playability-over-durability policy.
pub struct SnapshotRepository {
    db: DatabaseConnection,
}

impl SnapshotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        let payload = serde_json::to_string(snapshot)?;

        let model = session_snapshots::ActiveModel {
            date_key: ActiveValue::Set(snapshot.date_key.clone()),
            payload: ActiveValue::Set(payload),
            updated_at: ActiveValue::Set(chrono::Utc::now().into()),
        };

        SessionSnapshots::insert(model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(session_snapshots::Column::DateKey)
                    .update_columns([
                        session_snapshots::Column::Payload,
                        session_snapshots::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        Ok(())
    }

    pub async fn find_by_date(&self, date_key: &str) -> Result<Option<SessionSnapshot>> {
        let row = SessionSnapshots::find_by_id(date_key.to_string())
            .one(&self.db)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        match serde_json::from_str::<SessionSnapshot>(&row.payload) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(err) => {
                warn!(date_key, %err, "discarding corrupt session snapshot");
                Ok(None)
            }
        }
    }

    pub async fn remove(&self, date_key: &str) -> Result<()> {
        SessionSnapshots::delete_by_id(date_key.to_string())
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
