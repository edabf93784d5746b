/// Commands from the pet's right-click menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    ClosePet,
}

/// Right-click context menu drawn with egui inside the pet window.
#[derive(Debug, Default)]
pub struct ContextMenu {
    /// Window-local logical position of the menu's top-left corner.
    open_at: Option<egui::Pos2>,
}

impl ContextMenu {
    pub fn open(&mut self, at: egui::Pos2) {
        self.open_at = Some(at);
    }

    pub fn dismiss(&mut self) {
        self.open_at = None;
    }

    pub fn is_open(&self) -> bool {
        self.open_at.is_some()
    }

    /// Draw the menu if open. Clicking outside dismisses it.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<MenuCommand> {
        let at = self.open_at?;
        let mut command = None;

        let area = egui::Area::new(egui::Id::new("pet_context_menu"))
            .order(egui::Order::Foreground)
            .fixed_pos(at)
            .constrain(true)
            .show(ctx, |ui| {
                egui::Frame::menu(ui.style()).show(ui, |ui| {
                    if ui.button("Close Pet").clicked() {
                        command = Some(MenuCommand::ClosePet);
                    }
                });
            });

        if command.is_some() || area.response.clicked_elsewhere() {
            self.dismiss();
        }
        command
    }
}
