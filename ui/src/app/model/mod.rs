use crate::app::controller::{Controller, Screen};
use crate::app::task_manager::TaskManager;
use crate::app::view::{view_home, view_message, view_status};
use crate::components::common::{ComponentId, Msg};
use crate::components::help_bar::HelpBar;
use crate::error::{AppError, AppResult, ErrorReporter};
use crate::theme::Palette;
use std::sync::mpsc::{Receiver, Sender};
use tokio_util::sync::CancellationToken;
use tuirealm::event::NoUserEvent;
use tuirealm::ratatui::layout::{Constraint, Direction, Layout};
use tuirealm::terminal::{TerminalAdapter, TerminalBridge};
use tuirealm::{Application, Update};

// Submodules
mod initialization;
mod update_handler;

/// Columns kept free on each side of the content.
const HORIZONTAL_MARGIN: u16 = 6;
const VERTICAL_MARGIN: u16 = 1;

/// Application model
pub struct Model<T>
where
    T: TerminalAdapter,
{
    /// Application
    pub app: Application<ComponentId, Msg, NoUserEvent>,
    /// Indicates that the application must quit
    pub quit: bool,
    /// Tells whether to redraw interface
    pub redraw: bool,
    /// Used to draw to terminal
    pub terminal: TerminalBridge<T>,

    pub controller: Controller,
    pub palette: Palette,

    pub tx_to_main: Sender<Msg>,
    pub rx_to_main: Receiver<Msg>,

    /// Stops the demo traffic generator, if one was started
    pub traffic: CancellationToken,

    pub error_reporter: ErrorReporter,
    pub task_manager: TaskManager,
}

impl<T> Model<T>
where
    T: TerminalAdapter,
{
    /// Issues the initial load and arms the notification listener.
    pub fn start(&mut self) {
        let tickets = self.controller.start();
        self.task_manager.dispatch_all(tickets);
    }

    pub fn update_outside_msg(&mut self) {
        // Handle messages sent from background tasks
        while let Ok(msg) = self.rx_to_main.try_recv() {
            let mut msg = Some(msg);
            while msg.is_some() {
                msg = self.update(msg);
            }
        }
    }

    /// Shutdown the application and clean up resources
    pub fn shutdown(&mut self) {
        log::info!("Shutting down application");

        self.traffic.cancel();
        self.task_manager.shutdown();

        // Set quit flag
        self.quit = true;
    }

    pub fn view(&mut self) -> AppResult<()> {
        let controller = &mut self.controller;
        let app = &mut self.app;
        let palette = self.palette;

        self.terminal
            .draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .vertical_margin(VERTICAL_MARGIN)
                    .horizontal_margin(HORIZONTAL_MARGIN)
                    .constraints(
                        [
                            Constraint::Length(1), // Title
                            Constraint::Min(1),    // Screen
                            Constraint::Length(1), // Status
                            Constraint::Length(1), // Help bar
                        ]
                        .as_ref(),
                    )
                    .split(area);

                // The first frame learns the terminal size here
                if controller.size() != (area.width, area.height) {
                    controller.handle(Msg::Resize(area.width, area.height));
                }

                if controller.is_quitting() {
                    return;
                }

                app.view(&ComponentId::TitleLabel, f, chunks[0]);

                match controller.screen() {
                    Screen::Home => view_home(f, chunks[1], controller.home(), &palette),
                    Screen::Message(reader) => view_message(f, chunks[1], reader, &palette),
                }

                view_status(
                    f,
                    chunks[2],
                    controller.status(),
                    controller.is_busy(),
                    controller.listener_armed(),
                    &palette,
                );

                HelpBar::new(palette).view(
                    f,
                    chunks[3],
                    &controller.help_entries(),
                    controller.signature(),
                );
            })
            .map_err(|e| AppError::Component(e.to_string()))?;

        Ok(())
    }
}

impl<T> Update<Msg> for Model<T>
where
    T: TerminalAdapter,
{
    fn update(&mut self, msg: Option<Msg>) -> Option<Msg> {
        self.handle_update(msg)
    }
}
