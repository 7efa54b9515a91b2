use super::Model;
use crate::components::common::Msg;
use tuirealm::terminal::TerminalAdapter;

impl<T> Model<T>
where
    T: TerminalAdapter,
{
    pub fn handle_update(&mut self, msg: Option<Msg>) -> Option<Msg> {
        let msg = msg?;
        // Set redraw
        self.redraw = true;

        let tickets = self.controller.handle(msg);
        self.task_manager.dispatch_all(tickets);

        if self.controller.is_quitting() && !self.quit {
            self.shutdown();
        }
        None
    }
}
