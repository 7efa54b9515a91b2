use super::Model;
use crate::app::controller::Controller;
use crate::app::task_manager::TaskManager;
use crate::app::traffic::TrafficGenerator;
use crate::components::common::{ComponentId, Msg};
use crate::components::input_router::InputRouter;
use crate::components::keymap::KeyMap;
use crate::components::text_label::TextLabel;
use crate::config::AppConfig;
use crate::error::{AppError, AppResult, ErrorReporter};
use crate::theme::Palette;
use server::bus::MailboxSignal;
use server::delivery::Delivery;
use server::store::MailStore;
use server::taskpool::TaskPool;
use std::sync::Arc;
use std::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tuirealm::event::NoUserEvent;
use tuirealm::terminal::{CrosstermTerminalAdapter, TerminalAdapter, TerminalBridge};
use tuirealm::{Application, EventListenerCfg, Sub, SubClause, SubEventClause};

impl<T> Model<T>
where
    T: TerminalAdapter,
{
    fn init_app(
        config: &AppConfig,
        palette: &Palette,
    ) -> AppResult<Application<ComponentId, Msg, NoUserEvent>> {
        let mut app: Application<ComponentId, Msg, NoUserEvent> = Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(
                    config.crossterm_input_listener_interval(),
                    config.crossterm_input_listener_retries(),
                )
                .poll_timeout(config.poll_timeout())
                .tick_interval(config.tick_interval()),
        );
        app.mount(
            ComponentId::TitleLabel,
            Box::new(TextLabel::new(config.ui().title().to_string(), palette)),
            Vec::default(),
        )
        .map_err(|e| AppError::Component(e.to_string()))?;

        app.mount(
            ComponentId::InputRouter,
            Box::new(InputRouter::default()),
            vec![Sub::new(SubEventClause::Any, SubClause::Always)],
        )
        .map_err(|e| AppError::Component(e.to_string()))?;

        app.active(&ComponentId::InputRouter)
            .map_err(|e| AppError::Component(e.to_string()))?;

        Ok(app)
    }
}

impl Model<CrosstermTerminalAdapter> {
    /// Builds the model around `store`. Must be called inside a tokio runtime.
    pub fn new(config: &AppConfig, store: Arc<dyn MailStore>) -> AppResult<Self> {
        let palette = Palette::from_config(config.ui());
        let account = config.account_id();

        let (tx_to_main, rx_to_main) = mpsc::channel();
        let taskpool = TaskPool::new(config.task_pool_size());
        let signal = Arc::new(MailboxSignal::new());

        // Create error reporter for enhanced error handling
        let error_reporter = ErrorReporter::new(tx_to_main.clone());

        let task_manager = TaskManager::new(
            taskpool,
            tx_to_main.clone(),
            error_reporter.clone(),
            store.clone(),
            signal.clone(),
        );

        let controller = Controller::new(account, KeyMap::from_config(config.keys()))
            .with_branding(config.ui().title(), config.ui().signature());

        let traffic = CancellationToken::new();
        if config.demo().traffic_enabled() {
            let delivery = Delivery::new(store, signal);
            TrafficGenerator::new(delivery, account, config.demo()).spawn(traffic.clone());
        }

        Ok(Self {
            app: Self::init_app(config, &palette)?,
            quit: false,
            redraw: true,
            terminal: TerminalBridge::init_crossterm()
                .map_err(|e| AppError::Component(e.to_string()))?,
            controller,
            palette,
            tx_to_main,
            rx_to_main,
            traffic,
            error_reporter,
            task_manager,
        })
    }
}
