mod context_menu;
mod inspector;
mod status_bar;
mod toolbar;

pub use context_menu::*;
pub use inspector::*;
pub use status_bar::*;
pub use toolbar::*;

use bevy::prelude::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ToolbarPlugin)
            .add_plugins(InspectorPlugin)
            .add_plugins(ContextMenuPlugin)
            .add_plugins(StatusBarPlugin);
    }
}
