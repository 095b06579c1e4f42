use bevy::prelude::*;

use crate::game_params::GameParams;

use super::store::HistoryStore;

/// Inserts a fresh [`HistoryStore`] and checks that its capacity covers the
/// configured ghost lag.
pub struct SyncBufferPlugin;

impl Plugin for SyncBufferPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameParams>();
        app.init_resource::<HistoryStore>();

        let store = app.world().resource::<HistoryStore>();
        let capacity = store.snapshot_capacity();
        let params = app.world().resource::<GameParams>();
        if let Err(err) = params.check_history_coverage(capacity) {
            warn!("SyncBufferPlugin: {}", err);
        }
    }
}
