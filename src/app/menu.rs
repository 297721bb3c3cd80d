//! Home menu
//!
//! The available actions depend on the firewall state, so the menu is rebuilt
//! from [`FirewallStatus`] after every reload.

use crate::core::firewall::FirewallStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Enable,
    Disable,
    SetDefaults,
    Profiles,
    CreateRule,
    DeleteRule,
    ExportRules,
    EnableLogging,
    DisableLogging,
    Reset,
    Quit,
}

impl MenuAction {
    pub const fn title(self) -> &'static str {
        match self {
            MenuAction::Enable => "Enable",
            MenuAction::Disable => "Disable",
            MenuAction::SetDefaults => "Set defaults",
            MenuAction::Profiles => "Profiles",
            MenuAction::CreateRule => "Create rule",
            MenuAction::DeleteRule => "Delete rule",
            MenuAction::ExportRules => "Export rules",
            MenuAction::EnableLogging => "Enable logging",
            MenuAction::DisableLogging => "Disable logging",
            MenuAction::Reset => "Reset UFW",
            MenuAction::Quit => "Quit",
        }
    }
}

/// Menu entries for the given status, in display order
pub fn build_menu(status: FirewallStatus) -> Vec<MenuAction> {
    let mut items = Vec::new();

    if status.enabled {
        items.extend([
            MenuAction::Disable,
            MenuAction::SetDefaults,
            MenuAction::Profiles,
            MenuAction::CreateRule,
            MenuAction::DeleteRule,
            MenuAction::ExportRules,
        ]);
        items.push(if status.logging_on {
            MenuAction::DisableLogging
        } else {
            MenuAction::EnableLogging
        });
    } else {
        items.push(MenuAction::Enable);
    }

    items.extend([MenuAction::Reset, MenuAction::Quit]);
    items
}
